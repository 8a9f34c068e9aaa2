//! Process-wide stylesheet, built once on first use and served from
//! `/static/app.css`. Every panel has a light and a dark variant.

use super::json::CLASS_STYLE;
use lazy_static::lazy_static;
use syntect::highlighting::ThemeSet;
use syntect::html::css_for_theme_with_class_style;

const LAYOUT: &str = r#"
*{box-sizing:border-box}
body{margin:0;font-family:-apple-system,BlinkMacSystemFont,'Segoe UI',Roboto,sans-serif;line-height:1.5}
.page{max-width:1100px;margin:0 auto;padding:24px 32px}
label{display:block;font-weight:600;margin:12px 0 4px}
textarea,select,input[type=number]{width:100%;padding:8px 10px;border-radius:6px;font:inherit}
textarea{min-height:72px;resize:vertical}
.help{margin:2px 0 0;font-size:.85em;opacity:.7}
.service-selector{margin-bottom:24px}
.tool-form button{margin-top:16px;padding:8px 20px;border-radius:6px;border:1px solid #4a90e2;background:#4a90e2;color:#fff;font:inherit;cursor:pointer}
.tool-form button:disabled{opacity:.5;cursor:wait}
.spinner{margin-top:8px;font-style:italic}
.alert{padding:12px 16px;border-radius:8px;margin:16px 0}
details.raw-json summary{cursor:pointer;font-weight:600;margin:16px 0 8px}
"#;

const THEME_LIGHT: &str = r#"
@media (prefers-color-scheme: light){
body{background:#fff;color:#000}
textarea,select,input[type=number]{background:#fff;color:#000;border:1px solid #ccc}
.alert-success{background:#e6f4ea;color:#1e4620}
.alert-warning{background:#fff8e1;color:#5f4b00}
.alert-error{background:#fdecea;color:#611a15}
.answer-box{background-color:#f9f9f9;color:#000;border:1px solid #ddd}
.fragment-card{background-color:#f0f2f6;color:#000}
.json-view{background:#f6f8fa;color:#24292e}
}
"#;

const THEME_DARK: &str = r#"
@media (prefers-color-scheme: dark){
body{background:#0e1117;color:#eee}
textarea,select,input[type=number]{background:#262730;color:#eee;border:1px solid #444}
.alert-success{background:#173928;color:#c7f0d2}
.alert-warning{background:#3d3413;color:#ffe9a8}
.alert-error{background:#3e1a1a;color:#ffc9c4}
.answer-box{background-color:#222;color:#eee;border:1px solid #444}
.fragment-card{background-color:#1e1e1e;color:#eee;border-color:#3e8ef7}
.json-view{background:#161b22;color:#c9d1d9}
}
"#;

const PANELS: &str = r#"
.answer-box{padding:15px 20px;border-radius:10px;border:1px solid #ccc;margin-bottom:1em}
.fragment-card{padding:10px 15px;border-radius:6px;margin-bottom:10px;border-left:4px solid #4a90e2}
.json-view{padding:12px 16px;border-radius:6px;overflow-x:auto;font-size:.9em}
"#;

const SYNTAX_THEME_LIGHT: &str = "InspiredGitHub";
const SYNTAX_THEME_DARK: &str = "base16-ocean.dark";

lazy_static! {
    pub static ref STYLESHEET: String = build_stylesheet();
}

fn build_stylesheet() -> String {
    let themes = ThemeSet::load_defaults();
    let syntax_rules = |name: &str, scheme: &str| -> String {
        themes
            .themes
            .get(name)
            .and_then(|theme| css_for_theme_with_class_style(theme, CLASS_STYLE).ok())
            .map(|css| format!("@media (prefers-color-scheme: {}){{\n{}\n}}", scheme, css))
            .unwrap_or_default()
    };

    let light = syntax_rules(SYNTAX_THEME_LIGHT, "light");
    let dark = syntax_rules(SYNTAX_THEME_DARK, "dark");

    [LAYOUT, PANELS, THEME_LIGHT, THEME_DARK, light.as_str(), dark.as_str()]
        .iter()
        .map(|part| part.trim())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
