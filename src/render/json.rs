//! JSON viewer: pretty printing plus syntax highlighting.
//!
//! Highlighting goes through syntect's classed HTML output, so colours come
//! from the stylesheet and follow the light/dark scheme.

use super::escape_html;
use lazy_static::lazy_static;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use serde_json::Value;
use syntect::html::{ClassStyle, ClassedHTMLGenerator};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

/// Prefix for every class syntect emits, keeping them apart from page classes.
pub const CLASS_STYLE: ClassStyle = ClassStyle::SpacedPrefixed { prefix: "sx-" };

lazy_static! {
    pub static ref SYNTAX_SET: SyntaxSet = SyntaxSet::load_defaults_newlines();
}

/// Pretty prints with `indent` spaces. Non-ASCII text is written as is.
pub fn pretty(value: &Value, indent: usize) -> String {
    let indent = vec![b' '; indent];
    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(&indent));
    if value.serialize(&mut ser).is_err() {
        return value.to_string();
    }
    String::from_utf8(buf).unwrap_or_else(|_| value.to_string())
}

/// Highlights JSON text into classed, escaped HTML.
pub fn highlight(json: &str) -> String {
    let syntax = SYNTAX_SET
        .find_syntax_by_extension("json")
        .unwrap_or_else(|| SYNTAX_SET.find_syntax_plain_text());
    let mut generator = ClassedHTMLGenerator::new_with_class_style(syntax, &SYNTAX_SET, CLASS_STYLE);

    for line in LinesWithEndings::from(json) {
        if generator.parse_html_for_line_which_includes_newline(line).is_err() {
            return escape_html(json);
        }
    }
    generator.finalize()
}

/// Pretty printed and highlighted, ready to drop into a `<pre>`.
pub fn json_view(value: &Value, indent: usize) -> String {
    let text = format!("{}\n", pretty(value, indent));
    format!(
        "<pre class=\"json-view\"><code>{}</code></pre>",
        highlight(&text)
    )
}

#[cfg(test)]
pub(crate) fn visible_text(html: &str) -> String {
    let mut text = String::new();
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => text.push(c),
            _ => {}
        }
    }
    text.replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}
