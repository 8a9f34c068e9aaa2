//! HTML rendering
//!
//! Everything here is pure string building. Anything that came from a
//! service or from the operator goes through [`escape_html`] before it is
//! placed inside markup; the chrome around it does not.

pub mod json;
pub mod page;
pub mod panels;
pub mod style;

pub use page::{render_not_found, render_page, PageView};
pub use style::STYLESHEET;

/// Same replacements as Python's `html.escape(s, quote=True)`.
pub fn escape_html(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Escapes free text and turns its line breaks into `<br>`.
pub fn text_to_html(s: &str) -> String {
    escape_html(s).replace('\n', "<br>")
}
