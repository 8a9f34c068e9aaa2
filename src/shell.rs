//! Top-level service selector.

/// The two tools the page can show. Only one form is active at a time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Service {
    #[default]
    DynamicClassifier,
    Rag,
}

impl Service {
    pub const ALL: [Service; 2] = [Service::DynamicClassifier, Service::Rag];

    pub fn label(&self) -> &'static str {
        match self {
            Service::DynamicClassifier => "Dynamic Classifier",
            Service::Rag => "RAG + consultas",
        }
    }

    /// Value used in the `service` query parameter.
    pub fn slug(&self) -> &'static str {
        match self {
            Service::DynamicClassifier => "classifier",
            Service::Rag => "rag",
        }
    }

    /// Unknown or missing values select the first service.
    pub fn from_slug(slug: Option<&str>) -> Self {
        match slug.map(str::trim) {
            Some("rag") => Service::Rag,
            _ => Service::DynamicClassifier,
        }
    }
}
