//! The uniform outcome every tool returns

use serde::Serialize;
use serde_json::{Map, Value, json};

use crate::runner::RunError;

/// Outcome of a tool invocation.
///
/// `success` is authoritative. A successful result never carries an
/// `error`, and a failed one always carries a non-empty `message`. The
/// constructors are the only way to build one, so both hold by construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolResult {
    success: bool,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl ToolResult {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
            error: None,
        }
    }

    /// Domain failure. An empty message falls back to the error text.
    pub fn failure(message: impl Into<String>, error: impl Into<String>) -> Self {
        let error = error.into();
        let mut message = message.into();
        if message.trim().is_empty() {
            message = if error.trim().is_empty() {
                "Operation failed".to_string()
            } else {
                error.clone()
            };
        }
        Self {
            success: false,
            message,
            data: None,
            error: Some(error),
        }
    }

    /// Dry-run outcome: nothing was mutated, `data` describes what would happen.
    ///
    /// The payload always contains `dryRun: true` and a `preview` line.
    pub fn preview(message: impl Into<String>, data: Value) -> Self {
        let message = message.into();
        let mut map = match data {
            Value::Object(map) => map,
            Value::Null => Map::new(),
            other => {
                let mut map = Map::new();
                map.insert("details".to_string(), other);
                map
            }
        };
        map.insert("dryRun".to_string(), Value::Bool(true));
        map.entry("preview".to_string())
            .or_insert_with(|| Value::String(message.clone()));
        Self::success(message).with_data(Value::Object(map))
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn data(&self) -> Option<&Value> {
        self.data.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whole result as JSON, the shape callers inspect for `success`.
    pub fn to_json(&self) -> Value {
        json!({
            "success": self.success,
            "message": self.message,
            "data": self.data,
            "error": self.error,
        })
    }
}

/// Folds an expected failure into a `success: false` result.
pub trait OrFailure {
    fn or_failure(self, message: impl Into<String>) -> ToolResult;
}

impl OrFailure for Result<ToolResult, RunError> {
    fn or_failure(self, message: impl Into<String>) -> ToolResult {
        match self {
            Ok(result) => result,
            Err(e) => {
                let message = message.into();
                log::warn!("{message}: {e}");
                ToolResult::failure(message, error_text(&e))
            }
        }
    }
}

/// Short error text for a process failure: the command's own output when it
/// produced any, otherwise the error's display form.
pub fn error_text(e: &RunError) -> String {
    match e.output().map(str::trim) {
        Some(out) if !out.is_empty() => out.to_string(),
        _ => e.to_string(),
    }
}
