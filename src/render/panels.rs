//! Result panels shown under each form.

use super::json::json_view;
use super::{escape_html, text_to_html};
use crate::error::{CallError, FormError};
use crate::forms::Submission;
use crate::models::RagReply;
use serde_json::Value;
use std::time::Duration;

pub const CLASSIFIER_JSON_INDENT: usize = 2;
pub const RAG_JSON_INDENT: usize = 4;

/// A retrieved fragment ready for display. `body_html` is already escaped.
#[derive(Debug, Clone, PartialEq)]
pub struct FragmentCard {
    pub index: usize,
    pub body_html: String,
}

impl FragmentCard {
    pub fn label(&self) -> String {
        format!("Fragmento {}", self.index)
    }

    pub fn to_html(&self) -> String {
        format!(
            "<div class=\"fragment-card\"><strong>{}:</strong><br>{}</div>",
            self.label(),
            self.body_html
        )
    }
}

/// Display form of a successful RAG reply.
#[derive(Debug, Clone, PartialEq)]
pub struct RagPanel {
    pub answer_html: String,
    pub cards: Vec<FragmentCard>,
    pub raw_json_html: String,
}

impl RagPanel {
    pub fn from_reply(reply: &RagReply) -> Self {
        let cards = reply
            .response
            .fragments()
            .iter()
            .enumerate()
            .map(|(i, fragment)| FragmentCard {
                index: i + 1,
                body_html: text_to_html(fragment.text()),
            })
            .collect();

        Self {
            answer_html: text_to_html(reply.response.answer()),
            cards,
            raw_json_html: json_view(&reply.raw, RAG_JSON_INDENT),
        }
    }

    pub fn to_html(&self) -> String {
        let mut html = String::new();
        html.push_str("<section class=\"rag-answer\"><h3>Respuesta generada</h3>");
        html.push_str(&format!("<div class=\"answer-box\">{}</div></section>", self.answer_html));

        if !self.cards.is_empty() {
            html.push_str("<section class=\"rag-fragments\"><h3>📄 Fragmentos recuperados</h3>");
            for card in &self.cards {
                html.push_str(&card.to_html());
            }
            html.push_str("</section>");
        }

        html.push_str("<details class=\"raw-json\"><summary>JSON completo de la respuesta</summary>");
        html.push_str(&self.raw_json_html);
        html.push_str("</details>");
        html
    }
}

pub fn success_banner(message: &str) -> String {
    format!(
        "<div class=\"alert alert-success\" role=\"status\">{}</div>",
        escape_html(message)
    )
}

pub fn warning_banner(err: &FormError) -> String {
    format!(
        "<div class=\"alert alert-warning\" role=\"alert\">{}</div>",
        escape_html(&err.to_string())
    )
}

pub fn error_banner(err: &CallError) -> String {
    format!(
        "<div class=\"alert alert-error\" role=\"alert\">❌ {}</div>",
        escape_html(&err.to_string())
    )
}

pub fn elapsed_secs(elapsed: Duration) -> String {
    format!("{:.2}", elapsed.as_secs_f64())
}

pub fn classifier_result(submission: &Submission<Value>) -> String {
    match submission {
        Submission::Idle => String::new(),
        Submission::Rejected(err) => warning_banner(err),
        Submission::Completed { outcome: Err(err), .. } => error_banner(err),
        Submission::Completed { outcome: Ok(body), elapsed } => {
            let mut html = success_banner(&format!(
                "✅ Clasificación recibida en {}s",
                elapsed_secs(*elapsed)
            ));
            html.push_str(&json_view(body, CLASSIFIER_JSON_INDENT));
            html
        }
    }
}

pub fn rag_result(submission: &Submission<RagReply>) -> String {
    match submission {
        Submission::Idle => String::new(),
        Submission::Rejected(err) => warning_banner(err),
        Submission::Completed { outcome: Err(err), .. } => error_banner(err),
        Submission::Completed { outcome: Ok(reply), elapsed } => {
            let mut html = success_banner(&format!(
                "✅ Respuesta recibida en {}s",
                elapsed_secs(*elapsed)
            ));
            html.push_str(&RagPanel::from_reply(reply).to_html());
            html
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EMPTY_FRAGMENT;
    use serde_json::json;

    fn reply(raw: Value) -> RagReply {
        RagReply::from_value(raw).unwrap()
    }

    fn completed<T>(outcome: Result<T, CallError>) -> Submission<T> {
        Submission::Completed {
            outcome,
            elapsed: Duration::from_millis(1234),
        }
    }

    #[test]
    fn test_empty_fragments_omit_section() {
        let panel = RagPanel::from_reply(&reply(json!({"answer": "hola", "fragments": []})));
        assert!(panel.cards.is_empty());

        let html = panel.to_html();
        assert!(!html.contains("Fragmentos recuperados"));
        assert!(!html.contains("fragment-card"));
        assert!(html.contains("JSON completo de la respuesta"));
    }

    #[test]
    fn test_fragments_render_in_order() {
        let panel = RagPanel::from_reply(&reply(json!({
            "answer": "ok",
            "fragments": [{"content": "a"}, {"page_content": "b"}]
        })));

        assert_eq!(panel.cards.len(), 2);
        assert_eq!(panel.cards[0].label(), "Fragmento 1");
        assert_eq!(panel.cards[0].body_html, "a");
        assert_eq!(panel.cards[1].label(), "Fragmento 2");
        assert_eq!(panel.cards[1].body_html, "b");

        let html = panel.to_html();
        let first = html.find("Fragmento 1:").unwrap();
        let second = html.find("Fragmento 2:").unwrap();
        assert!(first < second);
        assert!(html.contains("📄 Fragmentos recuperados"));
    }

    #[test]
    fn test_placeholder_fragment() {
        let panel = RagPanel::from_reply(&reply(json!({"fragments": [{}]})));
        assert_eq!(panel.cards[0].body_html, EMPTY_FRAGMENT);
        assert_eq!(panel.answer_html, "No hay respuesta");
    }

    #[test]
    fn test_answer_is_escaped() {
        let panel = RagPanel::from_reply(&reply(json!({
            "answer": "<script>alert('x')</script>\nfin",
            "fragments": [{"content": "<b>negrita</b>"}]
        })));

        assert_eq!(
            panel.answer_html,
            "&lt;script&gt;alert(&#x27;x&#x27;)&lt;/script&gt;<br>fin"
        );
        assert_eq!(panel.cards[0].body_html, "&lt;b&gt;negrita&lt;/b&gt;");
        assert!(!panel.to_html().contains("<script>"));
    }

    #[test]
    fn test_raw_json_is_collapsed_with_four_spaces() {
        let html = RagPanel::from_reply(&reply(json!({"answer": "x"}))).to_html();
        assert!(html.contains("<details class=\"raw-json\">"));
        assert!(!html.contains("<details class=\"raw-json\" open"));
        assert!(crate::render::json::visible_text(&html).contains("{\n    \"answer\": \"x\"\n}"));
    }

    #[test]
    fn test_classifier_success() {
        let html = classifier_result(&completed(Ok(json!({"intent": "reservar"}))));
        assert!(html.contains("✅ Clasificación recibida en 1.23s"));
        assert!(crate::render::json::visible_text(&html).contains("{\n  \"intent\": \"reservar\"\n}"));
    }

    #[test]
    fn test_timeout_shows_message_without_json() {
        let classifier = classifier_result(&completed(Err(CallError::Timeout)));
        let rag = rag_result(&completed(Err(CallError::Timeout)));

        for html in [classifier, rag] {
            assert!(html.contains("⏳ Tiempo de espera agotado, intenta de nuevo."));
            assert!(html.contains("alert-error"));
            assert!(!html.contains("json-view"));
            assert!(!html.contains("answer-box"));
        }
    }

    #[test]
    fn test_rejection_shows_warning() {
        let html = classifier_result(&Submission::Rejected(FormError::EmptyUtterance));
        assert!(html.contains("alert-warning"));
        assert!(html.contains("Por favor, introduce un texto para clasificar."));
        assert!(rag_result(&Submission::Idle).is_empty());
    }

    #[test]
    fn test_unexpected_detail_is_escaped() {
        let html = error_banner(&CallError::Unexpected("<html>502</html>".to_string()));
        assert!(html.contains("Error inesperado: &lt;html&gt;502&lt;/html&gt;"));
    }
}
