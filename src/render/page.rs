//! Page shell: title, service selector, the active form and its result.

use super::escape_html;
use super::panels::{classifier_result, rag_result};
use crate::forms::{ClassifierForm, RagForm, Submission};
use crate::forms::rag::QUESTION_PLACEHOLDER;
use crate::models::{RagDomain, RagReply, K_MAX, K_MIN};
use crate::shell::Service;
use serde_json::Value;

pub const PAGE_TITLE: &str = "inference-ui | Lekta ES";

/// Disables the submit button and shows the pending line until the next
/// page arrives, so one form never has two requests in flight.
const PENDING_SCRIPT: &str = r#"
document.querySelectorAll('form[data-pending]').forEach(function (form) {
  form.addEventListener('submit', function (event) {
    if (form.dataset.busy === '1') { event.preventDefault(); return; }
    form.dataset.busy = '1';
    var button = form.querySelector('button[type=submit]');
    if (button) { button.disabled = true; }
    var spinner = form.querySelector('.spinner');
    if (spinner) { spinner.hidden = false; }
  });
});
"#;

pub enum PageView<'a> {
    Classifier {
        form: &'a ClassifierForm,
        submission: &'a Submission<Value>,
    },
    Rag {
        form: &'a RagForm,
        submission: &'a Submission<RagReply>,
    },
}

impl PageView<'_> {
    pub fn service(&self) -> Service {
        match self {
            PageView::Classifier { .. } => Service::DynamicClassifier,
            PageView::Rag { .. } => Service::Rag,
        }
    }
}

pub fn render_page(view: &PageView<'_>) -> String {
    let body = match view {
        PageView::Classifier { form, submission } => {
            format!("{}{}", classifier_form(form), classifier_result(submission))
        }
        PageView::Rag { form, submission } => {
            format!("{}{}", rag_form(form), rag_result(submission))
        }
    };

    layout(&format!("{}{}", service_selector(view.service()), body))
}

pub fn render_not_found(path: &str) -> String {
    layout(&format!(
        "<div class=\"alert alert-error\" role=\"alert\">Página no encontrada: {}</div><p><a href=\"/\">Volver</a></p>",
        escape_html(path)
    ))
}

fn layout(content: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"es\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width,initial-scale=1\">\n\
         <title>{title}</title>\n<link rel=\"stylesheet\" href=\"/static/app.css\">\n</head>\n\
         <body>\n<main class=\"page\">\n<h1>{title}</h1>\n{content}\n</main>\n\
         <script>{script}</script>\n</body>\n</html>\n",
        title = escape_html(PAGE_TITLE),
        content = content,
        script = PENDING_SCRIPT,
    )
}

fn service_selector(active: Service) -> String {
    let options: String = Service::ALL
        .iter()
        .map(|service| {
            format!(
                "<option value=\"{}\"{}>{}</option>",
                service.slug(),
                if *service == active { " selected" } else { "" },
                escape_html(service.label())
            )
        })
        .collect();

    format!(
        "<form class=\"service-selector\" method=\"get\" action=\"/\">\
         <label for=\"service\">Selecciona el servicio</label>\
         <select id=\"service\" name=\"service\" onchange=\"this.form.submit()\">{}</select>\
         <noscript><button type=\"submit\">Cambiar</button></noscript></form>",
        options
    )
}

/// The newline after the opening tag is swallowed by the HTML parser, so a
/// value starting with a line break survives the round trip.
fn textarea(name: &str, value: &str, extra: &str) -> String {
    format!(
        "<textarea id=\"{name}\" name=\"{name}\" rows=\"3\"{extra}>\n{value}</textarea>",
        name = name,
        extra = extra,
        value = escape_html(value)
    )
}

fn help(text: &str) -> String {
    format!("<p class=\"help\">{}</p>", escape_html(text))
}

fn classifier_form(form: &ClassifierForm) -> String {
    let mut html = String::new();
    html.push_str("<form class=\"tool-form\" method=\"post\" action=\"/classify\" data-pending>");

    html.push_str("<label for=\"user_input\">Entrada del usuario</label>");
    html.push_str(&textarea("user_input", &form.user_input, ""));
    html.push_str(&help("Introduce el texto que quieres clasificar."));

    html.push_str("<h4>Intents</h4><label for=\"intents\">Introduce las intenciones</label>");
    html.push_str(&textarea("intents", &form.intents, ""));
    html.push_str(&help("Ejemplo: book_flight, cancel_booking, get_status"));

    html.push_str("<h4>Entities</h4><label for=\"entities\">Introduce las entidades</label>");
    html.push_str(&textarea("entities", &form.entities, ""));
    html.push_str(&help("Ejemplo: date, destination, origin"));

    html.push_str("<button type=\"submit\">🚀 GO!</button>");
    html.push_str("<div class=\"spinner\" hidden>⌛ Enviando petición al clasificador...</div>");
    html.push_str("</form>");
    html
}

fn rag_form(form: &RagForm) -> String {
    let options: String = RagDomain::ALL
        .iter()
        .map(|domain| {
            format!(
                "<option value=\"{id}\"{selected}>{id}</option>",
                id = domain.id(),
                selected = if domain.id() == form.domain_id { " selected" } else { "" }
            )
        })
        .collect();

    let mut html = String::new();
    html.push_str("<form class=\"tool-form\" method=\"post\" action=\"/rag\" data-pending>");

    html.push_str("<label for=\"id\">Tipo de consulta</label>");
    html.push_str(&format!("<select id=\"id\" name=\"id\">{}</select>", options));
    html.push_str(&help("Elige el dominio de conocimiento para la consulta."));

    html.push_str("<label for=\"question\">Pregunta</label>");
    html.push_str(&textarea(
        "question",
        &form.question,
        &format!(" placeholder=\"{}\"", escape_html(QUESTION_PLACEHOLDER)),
    ));
    html.push_str(&help("Haz una pregunta clara y específica."));

    html.push_str("<label for=\"k\">Número de documentos a recuperar (k)</label>");
    html.push_str(&format!(
        "<input id=\"k\" name=\"k\" type=\"number\" min=\"{}\" max=\"{}\" step=\"1\" value=\"{}\" required>",
        K_MIN, K_MAX, form.k
    ));
    html.push_str(&help("Cuántos documentos quieres que se usen para responder."));

    html.push_str("<button type=\"submit\">🚀 GO!</button>");
    html.push_str("<div class=\"spinner\" hidden>⌛ Enviando consulta RAG...</div>");
    html.push_str("</form>");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FormError;

    #[test]
    fn test_classifier_page_defaults() {
        let form = ClassifierForm::default();
        let html = render_page(&PageView::Classifier {
            form: &form,
            submission: &Submission::Idle,
        });

        assert!(html.contains("<title>inference-ui | Lekta ES</title>"));
        assert!(html.contains("<option value=\"classifier\" selected>Dynamic Classifier</option>"));
        assert!(html.contains("<option value=\"rag\">RAG + consultas</option>"));
        assert!(html.contains("Hola, quiero reservar un vuelo para mañana</textarea>"));
        assert!(html.contains("action=\"/classify\""));
        assert!(!html.contains("action=\"/rag\""));
        assert!(!html.contains("alert"));
    }

    #[test]
    fn test_rag_page_defaults() {
        let form = RagForm::default();
        let html = render_page(&PageView::Rag {
            form: &form,
            submission: &Submission::Idle,
        });

        assert!(html.contains("<option value=\"rag\" selected>RAG + consultas</option>"));
        assert!(html.contains("<option value=\"rag_salud\" selected>rag_salud</option>"));
        assert!(html.contains("<option value=\"out_of_scope\">out_of_scope</option>"));
        assert!(html.contains("min=\"1\" max=\"20\" step=\"1\" value=\"5\""));
        assert!(html.contains("placeholder=\"Escribe aquí tu pregunta\""));
        assert!(!html.contains("action=\"/classify\""));
    }

    #[test]
    fn test_echoed_fields_are_escaped() {
        let form = ClassifierForm {
            user_input: "</textarea><script>x</script>".to_string(),
            ..ClassifierForm::default()
        };
        let html = render_page(&PageView::Classifier {
            form: &form,
            submission: &Submission::Rejected(FormError::EmptyUtterance),
        });

        assert!(!html.contains("<script>x</script>"));
        assert!(html.contains("&lt;/textarea&gt;&lt;script&gt;x&lt;/script&gt;"));
    }

    #[test]
    fn test_submit_controls_are_guarded() {
        let form = RagForm::default();
        let html = render_page(&PageView::Rag {
            form: &form,
            submission: &Submission::Idle,
        });
        assert!(html.contains("data-pending"));
        assert!(html.contains("button.disabled = true"));
        assert!(html.contains("⌛ Enviando consulta RAG..."));
    }

    #[test]
    fn test_padded_domain_stays_selected() {
        let mut fields = crate::forms::FormFields::new();
        fields.insert("id".to_string(), " rag_laserum".to_string());
        let form = RagForm::from_fields(&fields);
        let html = render_page(&PageView::Rag {
            form: &form,
            submission: &Submission::Idle,
        });

        assert!(html.contains("<option value=\"rag_laserum\" selected>"));
        assert!(!html.contains("<option value=\"rag_salud\" selected>"));
    }

    #[test]
    fn test_not_found_escapes_path() {
        let html = render_not_found("/<x>");
        assert!(html.contains("/&lt;x&gt;"));
    }
}
