//! Uniform result envelope returned for every dispatched operation.

use serde::Serialize;
use serde_json::Value;

use crate::error::{Error, ErrorKind};

/// The result shape the protocol transport receives: either a payload with
/// `ok: true`, or an error kind plus a human-readable message with
/// `ok: false`. Built fresh per dispatch and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Envelope {
    pub ok: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,

    #[serde(rename = "errorKind", skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<ErrorKind>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Envelope {
    pub fn success(payload: Value) -> Self {
        Self {
            ok: true,
            payload: Some(payload),
            error_kind: None,
            message: None,
        }
    }

    pub fn failure(error: &Error) -> Self {
        Self {
            ok: false,
            payload: None,
            error_kind: Some(error.kind()),
            message: Some(error.to_string()),
        }
    }
}
