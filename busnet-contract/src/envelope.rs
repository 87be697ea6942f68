use serde_json::Value as JsonValue;

/// A response payload from the backend.
///
/// Successful responses look like `{"output": "..."}`.
/// Failures usually carry an `error` key and an empty `output`,
/// but nothing stops the backend from sending arbitrary JSON,
/// so the raw value is kept as-is (key order included).
#[derive(Debug, Clone, PartialEq)]
pub struct OutputEnvelope(JsonValue);

impl OutputEnvelope {
    /// Parses a response body.
    ///
    /// # Errors
    ///
    /// Fails if the body is not valid JSON.
    pub fn from_slice(body: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(body).map(OutputEnvelope)
    }

    /// The `output` field, if the payload has a string there.
    pub fn output(&self) -> Option<&str> {
        self.0.get("output").and_then(JsonValue::as_str)
    }

    /// The `error` field, if the payload has a string there.
    pub fn error_message(&self) -> Option<&str> {
        self.0.get("error").and_then(JsonValue::as_str)
    }

    /// The text to show the user for this payload.
    ///
    /// A non-empty string, non-zero number or `true` in `output` is shown as-is.
    /// Anything else (missing, empty, zero, `false`, `null` or a nested value)
    /// falls back to the whole payload, pretty-printed with two-space indentation.
    pub fn render(&self) -> String {
        match self.0.get("output") {
            Some(JsonValue::String(output)) if !output.is_empty() => output.clone(),
            Some(JsonValue::Number(n)) if n.as_f64().is_some_and(|v| v.abs() > 0.0) => {
                n.to_string()
            }
            Some(JsonValue::Bool(true)) => "true".to_string(),
            _ => serde_json::to_string_pretty(&self.0).unwrap_or_else(|_| self.0.to_string()),
        }
    }
}

impl From<JsonValue> for OutputEnvelope {
    fn from(value: JsonValue) -> Self {
        OutputEnvelope(value)
    }
}
