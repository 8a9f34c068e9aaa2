//! Wire shapes for the two inference services.

use crate::error::CallError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

pub const NO_ANSWER: &str = "No hay respuesta";
pub const EMPTY_FRAGMENT: &str = "⚠️ Fragmento vacío";

pub const K_MIN: u32 = 1;
pub const K_MAX: u32 = 20;
pub const K_DEFAULT: u32 = 5;

/// Body sent to the classifier. Intent and entity values are always empty;
/// the service fills them in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierRequest {
    pub user_input: String,
    pub intents: BTreeMap<String, String>,
    pub entities: BTreeMap<String, String>,
}

/// Knowledge domains the RAG service can answer from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RagDomain {
    #[default]
    RagSalud,
    RagLaserum,
    RagTeleasistencia,
    RagTarjeta65,
    Construccion,
    OutOfScope,
}

impl RagDomain {
    pub const ALL: [RagDomain; 6] = [
        RagDomain::RagSalud,
        RagDomain::RagLaserum,
        RagDomain::RagTeleasistencia,
        RagDomain::RagTarjeta65,
        RagDomain::Construccion,
        RagDomain::OutOfScope,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            RagDomain::RagSalud => "rag_salud",
            RagDomain::RagLaserum => "rag_laserum",
            RagDomain::RagTeleasistencia => "rag_teleasistencia",
            RagDomain::RagTarjeta65 => "rag_tarjeta65",
            RagDomain::Construccion => "construccion",
            RagDomain::OutOfScope => "out_of_scope",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|d| d.id() == id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RagRequest {
    pub id: RagDomain,
    pub question: String,
    pub k: u32,
}

/// One retrieved snippet. Services disagree on the field name, so both are
/// accepted.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Fragment {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub page_content: Option<String>,
}

impl Fragment {
    /// Non-empty `content`, else `page_content`, else the placeholder.
    pub fn text(&self) -> &str {
        match (self.content.as_deref(), self.page_content.as_deref()) {
            (Some(content), _) if !content.is_empty() => content,
            (_, Some(page_content)) => page_content,
            _ => EMPTY_FRAGMENT,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RagResponse {
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default)]
    pub fragments: Option<Vec<Fragment>>,
}

impl RagResponse {
    pub fn answer(&self) -> &str {
        self.answer.as_deref().unwrap_or(NO_ANSWER)
    }

    pub fn fragments(&self) -> &[Fragment] {
        self.fragments.as_deref().unwrap_or(&[])
    }
}

/// A decoded RAG response together with the body it came from, which is
/// still shown verbatim in the raw JSON viewer.
#[derive(Debug, Clone, PartialEq)]
pub struct RagReply {
    pub raw: Value,
    pub response: RagResponse,
}

impl RagReply {
    pub fn from_value(raw: Value) -> Result<Self, CallError> {
        let object = raw
            .as_object()
            .ok_or_else(|| CallError::Unexpected("la respuesta RAG no es un objeto JSON".to_string()))?;

        if let Some(Value::Array(fragments)) = object.get("fragments") {
            if let Some(pos) = fragments.iter().position(|f| !f.is_object()) {
                return Err(CallError::Unexpected(format!(
                    "el fragmento {} no es un objeto JSON",
                    pos + 1
                )));
            }
        }

        let response = RagResponse::deserialize(&raw)
            .map_err(|e| CallError::Unexpected(e.to_string()))?;

        Ok(Self { raw, response })
    }
}

/// Result of a single round trip. Exactly one of body or error.
#[derive(Debug, Clone, PartialEq)]
pub enum CallOutcome {
    Success(Value),
    Failure(CallError),
}

impl CallOutcome {
    pub fn into_result(self) -> Result<Value, CallError> {
        match self {
            CallOutcome::Success(body) => Ok(body),
            CallOutcome::Failure(err) => Err(err),
        }
    }
}
