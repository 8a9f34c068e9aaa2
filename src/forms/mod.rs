//! Form controllers
//!
//! Each controller owns the field values of one form, validates them, builds
//! the request payload and performs one round trip through an
//! [`InferenceTransport`](crate::client::InferenceTransport).

pub mod classifier;
pub mod rag;

pub use classifier::ClassifierForm;
pub use rag::RagForm;

use crate::error::{CallError, FormError};
use std::collections::HashMap;
use std::time::Duration;

/// Form fields as decoded from an `application/x-www-form-urlencoded` body.
pub type FormFields = HashMap<String, String>;

/// What the renderer gets after a submit (or before any).
#[derive(Debug, Clone, PartialEq)]
pub enum Submission<T> {
    Idle,
    Rejected(FormError),
    Completed {
        outcome: Result<T, CallError>,
        elapsed: Duration,
    },
}

/// Splits a comma separated list, trims each entry and drops empties.
/// Duplicates are kept here; callers collecting into a map dedupe them.
pub fn parse_keys(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|key| !key.is_empty())
        .map(str::to_string)
        .collect()
}

fn field(fields: &FormFields, name: &str) -> String {
    fields.get(name).cloned().unwrap_or_default()
}
