//! Error Types
//!
//! Failures are handled where they happen: widgets log them and go inert,
//! invalid date input is shown to the user.

use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};

/// Failures while wiring or running a widget
#[derive(Error, Debug)]
pub enum ShowcaseError {
    /// A required page element is absent
    #[error("element not found: {0}")]
    MissingElement(String),

    /// Browser local storage is not accessible
    #[error("local storage unavailable")]
    StorageUnavailable,

    /// A persisted value could not be decoded
    #[error("malformed stored value under '{key}': {reason}")]
    MalformedState { key: String, reason: String },

    /// Page configuration could not be decoded
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// A JavaScript call threw or a promise rejected
    #[error("javascript error: {0}")]
    Js(String),
}

impl From<JsValue> for ShowcaseError {
    fn from(value: JsValue) -> Self {
        let text = value
            .as_string()
            .or_else(|| {
                value
                    .dyn_ref::<js_sys::Error>()
                    .map(|e| String::from(e.message()))
            })
            .unwrap_or_else(|| format!("{:?}", value));
        ShowcaseError::Js(text)
    }
}

/// Rejected date input. The messages are shown verbatim to the user.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateInputError {
    #[error("Please select a date.")]
    Empty,

    #[error("Invalid date format.")]
    Format,

    #[error("Invalid date components.")]
    Components,

    #[error("Invalid date selected.")]
    NotACalendarDate,

    #[error("Please select a future date.")]
    InPast,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_messages() {
        assert_eq!(DateInputError::Empty.to_string(), "Please select a date.");
        assert_eq!(DateInputError::InPast.to_string(), "Please select a future date.");
    }

    #[test]
    fn test_config_error_wraps_serde() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = ShowcaseError::from(err);
        assert!(err.to_string().starts_with("invalid configuration"));
    }
}
