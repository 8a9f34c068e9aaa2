//! In-process transport used by unit tests.

use crate::client::InferenceTransport;
use crate::error::CallError;
use crate::models::CallOutcome;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Mutex;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub url: String,
    pub payload: Value,
    pub timeout: Duration,
}

/// Returns the same outcome for every call and remembers what was sent.
pub struct ScriptedTransport {
    outcome: CallOutcome,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedTransport {
    pub fn succeeding(body: Value) -> Self {
        Self {
            outcome: CallOutcome::Success(body),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(err: CallError) -> Self {
        Self {
            outcome: CallOutcome::Failure(err),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl InferenceTransport for ScriptedTransport {
    async fn call(&self, endpoint_url: &str, payload: &Value, timeout: Duration) -> CallOutcome {
        self.calls.lock().unwrap().push(RecordedCall {
            url: endpoint_url.to_string(),
            payload: payload.clone(),
            timeout,
        });
        self.outcome.clone()
    }
}
