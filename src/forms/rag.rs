use super::{field, FormFields, Submission};
use crate::client::InferenceTransport;
use crate::config::EndpointConfig;
use crate::error::{CallError, FormError};
use crate::models::{RagDomain, RagReply, RagRequest, K_DEFAULT, K_MAX, K_MIN};
use std::time::{Duration, Instant};
use tracing::{info, warn};

pub const QUESTION_PLACEHOLDER: &str = "Escribe aquí tu pregunta";

#[derive(Debug, Clone, PartialEq)]
pub struct RagForm {
    /// Selected domain id as submitted; checked against [`RagDomain`] on submit.
    pub domain_id: String,
    pub question: String,
    /// Always within `K_MIN..=K_MAX`.
    pub k: u32,
}

impl Default for RagForm {
    fn default() -> Self {
        Self {
            domain_id: RagDomain::default().id().to_string(),
            question: String::new(),
            k: K_DEFAULT,
        }
    }
}

impl RagForm {
    pub fn from_fields(fields: &FormFields) -> Self {
        let domain_id = fields
            .get("id")
            .map(|id| id.trim().to_string())
            .unwrap_or_else(|| RagDomain::default().id().to_string());

        Self {
            domain_id,
            question: field(fields, "question"),
            k: fields.get("k").map(|raw| parse_k(raw)).unwrap_or(K_DEFAULT),
        }
    }

    pub fn build_request(&self) -> Result<RagRequest, FormError> {
        let question = self.question.trim();
        if question.is_empty() {
            return Err(FormError::EmptyQuestion);
        }

        let id = RagDomain::from_id(&self.domain_id)
            .ok_or_else(|| FormError::UnknownDomain(self.domain_id.clone()))?;

        Ok(RagRequest {
            id,
            question: question.to_string(),
            k: clamp_k(i64::from(self.k)),
        })
    }

    pub async fn submit(&self, transport: &dyn InferenceTransport, endpoint: &EndpointConfig) -> Submission<RagReply> {
        let request = match self.build_request() {
            Ok(request) => request,
            Err(e) => {
                warn!("RAG form rejected ({:?}): {}", e.kind(), e);
                return Submission::Rejected(e);
            }
        };

        info!("RAG query on {} with k={}", request.id.id(), request.k);

        let payload = match serde_json::to_value(&request) {
            Ok(payload) => payload,
            Err(e) => {
                return Submission::Completed {
                    outcome: Err(CallError::Unexpected(e.to_string())),
                    elapsed: Duration::ZERO,
                }
            }
        };

        let start = Instant::now();
        let outcome = transport.call(&endpoint.url, &payload, endpoint.timeout).await;
        let elapsed = start.elapsed();

        let outcome = outcome.into_result().and_then(|body| {
            RagReply::from_value(body).map_err(|e| {
                warn!("RAG response could not be decoded: {}", e);
                e
            })
        });

        Submission::Completed { outcome, elapsed }
    }
}

pub fn clamp_k(k: i64) -> u32 {
    k.clamp(i64::from(K_MIN), i64::from(K_MAX)) as u32
}

/// Reads the `k` field the way a number input would: out-of-range values are
/// pinned to the nearest bound, garbage falls back to the default.
pub fn parse_k(raw: &str) -> u32 {
    let raw = raw.trim();
    if let Ok(k) = raw.parse::<i64>() {
        return clamp_k(k);
    }
    match raw.parse::<f64>() {
        Ok(k) if k.is_finite() => clamp_k(k.round() as i64),
        _ => K_DEFAULT,
    }
}
