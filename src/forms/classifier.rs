use super::{field, parse_keys, FormFields, Submission};
use crate::client::InferenceTransport;
use crate::config::EndpointConfig;
use crate::error::{CallError, FormError};
use crate::models::ClassifierRequest;
use serde_json::Value;
use std::collections::BTreeMap;
use std::time::{Duration, Instant};
use tracing::{info, warn};

pub const DEFAULT_USER_INPUT: &str = "Hola, quiero reservar un vuelo para mañana";
pub const DEFAULT_INTENTS: &str = "book_flight, cancel_booking, get_status";
pub const DEFAULT_ENTITIES: &str = "date, destination, origin";

/// Raw text of the three classifier fields, exactly as typed.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifierForm {
    pub user_input: String,
    pub intents: String,
    pub entities: String,
}

impl Default for ClassifierForm {
    fn default() -> Self {
        Self {
            user_input: DEFAULT_USER_INPUT.to_string(),
            intents: DEFAULT_INTENTS.to_string(),
            entities: DEFAULT_ENTITIES.to_string(),
        }
    }
}

impl ClassifierForm {
    pub fn from_fields(fields: &FormFields) -> Self {
        Self {
            user_input: field(fields, "user_input"),
            intents: field(fields, "intents"),
            entities: field(fields, "entities"),
        }
    }

    pub fn build_request(&self) -> Result<ClassifierRequest, FormError> {
        let user_input = self.user_input.trim();
        if user_input.is_empty() {
            return Err(FormError::EmptyUtterance);
        }

        Ok(ClassifierRequest {
            user_input: user_input.to_string(),
            intents: empty_slots(&self.intents),
            entities: empty_slots(&self.entities),
        })
    }

    pub async fn submit(&self, transport: &dyn InferenceTransport, endpoint: &EndpointConfig) -> Submission<Value> {
        let request = match self.build_request() {
            Ok(request) => request,
            Err(e) => {
                warn!("Classifier form rejected ({:?}): {}", e.kind(), e);
                return Submission::Rejected(e);
            }
        };

        info!(
            "Classifying input ({} intents, {} entities)",
            request.intents.len(),
            request.entities.len()
        );

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

        Submission::Completed {
            outcome: outcome.into_result(),
            elapsed,
        }
    }
}

fn empty_slots(input: &str) -> BTreeMap<String, String> {
    parse_keys(input)
        .into_iter()
        .map(|key| (key, String::new()))
        .collect()
}
