//! Static configuration
//!
//! Loaded once at startup from the environment (and `.env`), then shared
//! read-only for the life of the process.

use crate::error::{Result, UiError};
use std::time::Duration;
use url::Url;

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8501";
pub const DEFAULT_CLASSIFIER_URL: &str = "https://dynamic-classifier-models-es.up.railway.app/classify";
pub const DEFAULT_RAG_URL: &str = "https://api-rag-models-es.up.railway.app/query";

/// Classification is a single model pass; retrieval plus generation is slower.
pub const CLASSIFIER_TIMEOUT: Duration = Duration::from_secs(10);
pub const RAG_TIMEOUT: Duration = Duration::from_secs(20);

#[derive(Debug, Clone, PartialEq)]
pub struct EndpointConfig {
    pub url: String,
    pub timeout: Duration,
}

impl EndpointConfig {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let url = url.into();
        let parsed = Url::parse(&url)
            .map_err(|e| UiError::Config(format!("invalid endpoint URL '{}': {}", url, e)))?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(UiError::Config(format!(
                "endpoint URL '{}' must use http or https",
                url
            )));
        }
        Ok(Self { url, timeout })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub bind_addr: String,
    pub classifier: EndpointConfig,
    pub rag: EndpointConfig,
}

impl AppConfig {
    pub fn new(bind_addr: impl Into<String>, classifier_url: &str, rag_url: &str) -> Result<Self> {
        Ok(Self {
            bind_addr: bind_addr.into(),
            classifier: EndpointConfig::new(classifier_url, CLASSIFIER_TIMEOUT)?,
            rag: EndpointConfig::new(rag_url, RAG_TIMEOUT)?,
        })
    }

    /// Reads `INFERENCE_UI_*` variables, falling back to the built-in endpoints.
    pub fn from_env() -> Result<Self> {
        let bind_addr = std::env::var("INFERENCE_UI_BIND_ADDR")
            .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
        let classifier_url = std::env::var("INFERENCE_UI_CLASSIFIER_URL")
            .unwrap_or_else(|_| DEFAULT_CLASSIFIER_URL.to_string());
        let rag_url = std::env::var("INFERENCE_UI_RAG_URL")
            .unwrap_or_else(|_| DEFAULT_RAG_URL.to_string());

        Self::new(bind_addr, &classifier_url, &rag_url)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            classifier: EndpointConfig {
                url: DEFAULT_CLASSIFIER_URL.to_string(),
                timeout: CLASSIFIER_TIMEOUT,
            },
            rag: EndpointConfig {
                url: DEFAULT_RAG_URL.to_string(),
                timeout: RAG_TIMEOUT,
            },
        }
    }
}
