//! Error types for order lookups and the widget.

use crate::document::DocumentError;
use thiserror::Error;

/// Why a single order lookup failed.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum LookupError {
    /// The request never got a response (connection refused, reset, timeout).
    #[error("Network error: {0}")]
    Network(String),

    /// The endpoint answered with a non-success status.
    #[error("Error on response: {status} {reason}")]
    HttpStatus { status: u16, reason: String },

    /// The response body was not JSON.
    #[error("Response decoding failed: {0}")]
    Decode(String),

    /// `CustomerOrder` was present but not an object.
    #[error("Malformed order: {0}")]
    MalformedOrder(String),

    /// The service answered with a failure message instead of an order.
    #[error("Lookup rejected: {0}")]
    Rejected(String),
}

impl From<reqwest::Error> for LookupError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            LookupError::Decode(e.to_string())
        } else {
            LookupError::Network(e.to_string())
        }
    }
}

impl From<serde_json::Error> for LookupError {
    fn from(e: serde_json::Error) -> Self {
        LookupError::Decode(e.to_string())
    }
}

/// Errors surfaced by the widget to whoever submitted or initialized it.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum WidgetError {
    /// A required element is not on the page.
    #[error("Missing element: {0}")]
    MissingElement(String),

    /// An element exists but is not the kind the widget needs.
    #[error("Element {id} is a {found}, expected a {expected}")]
    WrongElementKind {
        id: String,
        expected: &'static str,
        found: &'static str,
    },

    /// The form has no field with the configured name.
    #[error("Form {form} has no field {field}")]
    MissingField { form: String, field: String },

    #[error(transparent)]
    Lookup(#[from] LookupError),

    #[error(transparent)]
    Document(#[from] DocumentError),

    /// The widget's event loop is no longer running.
    #[error("Widget detached")]
    Detached,
}
