//! Rendering of tool results for the protocol edge

use rmcp::model::{CallToolResult, Content};

use crate::result::ToolResult;

/// Transport-ready rendering of a [`ToolResult`].
///
/// The first block is a one-line summary, the second the whole result as
/// pretty-printed JSON so callers can read `success` and `data` directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    pub is_error: bool,
    pub blocks: Vec<String>,
}

impl Envelope {
    pub fn from_result(result: &ToolResult) -> Self {
        let summary = if result.is_success() {
            format!("✓ {}", result.message())
        } else {
            match result.error() {
                Some(error) if error != result.message() => {
                    format!("✗ {}\nError: {error}", result.message())
                }
                _ => format!("✗ {}", result.message()),
            }
        };

        let json = serde_json::to_string_pretty(result).unwrap_or_else(|_| "{}".to_string());

        Self {
            is_error: !result.is_success(),
            blocks: vec![summary, json],
        }
    }

    pub fn summary(&self) -> &str {
        self.blocks.first().map(String::as_str).unwrap_or_default()
    }
}

impl From<Envelope> for CallToolResult {
    fn from(envelope: Envelope) -> Self {
        let content = envelope.blocks.into_iter().map(Content::text).collect();
        if envelope.is_error {
            CallToolResult::error(content)
        } else {
            CallToolResult::success(content)
        }
    }
}
