//! Outbound calls to the inference services.
//!
//! One POST per submission, JSON in and JSON out. Transport failures are
//! folded into a [`CallError`] here so nothing above this layer has to know
//! about reqwest.

use crate::error::{CallError, Result};
use crate::models::CallOutcome;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

#[async_trait]
pub trait InferenceTransport: Send + Sync {
    async fn call(&self, endpoint_url: &str, payload: &Value, timeout: Duration) -> CallOutcome;
}

pub struct ServiceClient {
    client: Client,
}

impl ServiceClient {
    pub fn new() -> Result<Self> {
        let client = Client::builder().build()?;
        Ok(Self { client })
    }

    async fn post_json(&self, endpoint_url: &str, payload: &Value, timeout: Duration) -> std::result::Result<Value, reqwest::Error> {
        let response = self
            .client
            .post(endpoint_url)
            .header("Content-Type", "application/json")
            .timeout(timeout)
            .json(payload)
            .send()
            .await?
            .error_for_status()?;

        response.json::<Value>().await
    }
}

#[async_trait]
impl InferenceTransport for ServiceClient {
    async fn call(&self, endpoint_url: &str, payload: &Value, timeout: Duration) -> CallOutcome {
        debug!("POST {} payload={}", endpoint_url, payload);
        let start = Instant::now();

        let outcome = match self.post_json(endpoint_url, payload, timeout).await {
            Ok(body) => CallOutcome::Success(body),
            Err(e) => CallOutcome::Failure(classify_error(&e)),
        };

        match &outcome {
            CallOutcome::Success(_) => {
                info!("POST {} ok in {:?}", endpoint_url, start.elapsed());
            }
            CallOutcome::Failure(err) => {
                warn!("POST {} failed after {:?} ({:?}): {}", endpoint_url, start.elapsed(), err.kind(), err);
            }
        }

        outcome
    }
}

/// Timeout is checked before connect: a connect that times out is reported
/// as a timeout.
pub fn classify_error(err: &reqwest::Error) -> CallError {
    if err.is_timeout() {
        CallError::Timeout
    } else if err.is_connect() {
        CallError::Connection
    } else {
        CallError::Unexpected(err.to_string())
    }
}
