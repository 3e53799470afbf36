//! The embedded call-request wire format.
//!
//! A request rides inside an Assistant message as a single-line JSON object
//! wrapped in literal `<oracle>` / `</oracle>` delimiters. Delimiters and
//! field names are protocol contract: they must match what the system
//! preamble advertises, or the model cannot be expected to comply.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::error::OracleError;

/// Opening delimiter for an embedded request.
pub const REQUEST_START: &str = "<oracle>";
/// Closing delimiter for an embedded request.
pub const REQUEST_END: &str = "</oracle>";

/// Matches the first delimited payload. `.` does not cross newlines: the
/// payload must sit on a single line.
static REQUEST_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<oracle>(.*?)</oracle>").expect("request pattern compiles"));

/// A parsed reference to one capability invocation.
///
/// `parameters` are positional strings that align, by position, with the
/// target capability's declared parameter order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallRequest {
    /// Identifier of the owning module.
    pub module_name: String,
    /// Name of the capability within that module.
    pub api_name: String,
    /// Positional string arguments.
    pub parameters: Vec<String>,
}

impl CallRequest {
    pub fn new(
        module_name: impl Into<String>,
        api_name: impl Into<String>,
        parameters: Vec<String>,
    ) -> Self {
        Self {
            module_name: module_name.into(),
            api_name: api_name.into(),
            parameters,
        }
    }

    /// Parse a request from its JSON payload.
    pub fn from_json(payload: &str) -> Result<Self, OracleError> {
        serde_json::from_str(payload).map_err(|e| OracleError::MalformedRequest {
            message: e.to_string(),
        })
    }

    /// Serialize to the JSON payload form.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).expect("call request serializes")
    }
}

/// Extract the first embedded request payload from `text`, if any.
pub fn find_embedded(text: &str) -> Option<&str> {
    REQUEST_PATTERN
        .captures(text)
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_embedded_extracts_payload() {
        let text = r#"Let me check. <oracle>{"module_name":"MathModule_1","api_name":"add","parameters":["2","3"]}</oracle> One moment."#;
        let payload = find_embedded(text).unwrap();
        let request = CallRequest::from_json(payload).unwrap();
        assert_eq!(request.module_name, "MathModule_1");
        assert_eq!(request.api_name, "add");
        assert_eq!(request.parameters, vec!["2", "3"]);
    }

    #[test]
    fn test_find_embedded_absent() {
        assert!(find_embedded("No request in here.").is_none());
        assert!(find_embedded("<oracle>unterminated").is_none());
    }

    #[test]
    fn test_find_embedded_takes_first_match() {
        let text = "<oracle>first</oracle> and <oracle>second</oracle>";
        assert_eq!(find_embedded(text), Some("first"));
    }

    #[test]
    fn test_find_embedded_requires_single_line() {
        let text = "<oracle>{\n}</oracle>";
        assert!(find_embedded(text).is_none());
    }

    #[test]
    fn test_from_json_rejects_malformed_payload() {
        let err = CallRequest::from_json("{not json").unwrap_err();
        assert!(matches!(err, OracleError::MalformedRequest { .. }));

        let err = CallRequest::from_json(r#"{"module_name":"m"}"#).unwrap_err();
        assert!(matches!(err, OracleError::MalformedRequest { .. }));
    }

    #[test]
    fn test_request_json_round_trip() {
        let request = CallRequest::new("SocialModule_1", "post", vec!["hello".to_string()]);
        let parsed = CallRequest::from_json(&request.to_json()).unwrap();
        assert_eq!(parsed, request);
    }
}
