//! MCP server over the dispatcher
//!
//! Implements [`rmcp::ServerHandler`] by hand: the tool list is read from the
//! dispatcher on every request so tools gated on a freshly installed CLI
//! appear without a restart.

use std::sync::Arc;

use rmcp::model::{
    CallToolRequestParam, CallToolResult, ErrorCode, Implementation, ListToolsResult, PaginatedRequestParam,
    ProtocolVersion, ServerCapabilities, ServerInfo, Tool as McpTool, ToolAnnotations,
};
use rmcp::service::{RequestContext, RoleServer};
use rmcp::ErrorData as McpError;

use crate::dispatch::Dispatcher;
use crate::envelope::Envelope;
use crate::tool::ToolDescriptor;
use crate::ToolError;

/// The git tools MCP server handler.
#[derive(Clone)]
pub struct GitServer {
    dispatcher: Arc<Dispatcher>,
}

impl GitServer {
    pub fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }

    pub fn dispatcher(&self) -> &Arc<Dispatcher> {
        &self.dispatcher
    }
}

/// Protocol view of a registered tool.
pub fn to_mcp_tool(descriptor: &ToolDescriptor) -> McpTool {
    let hints = descriptor.annotations();
    let mut tool = McpTool::new(
        descriptor.name(),
        descriptor.description(),
        descriptor.input_schema().clone(),
    );
    tool.annotations = Some(ToolAnnotations {
        read_only_hint: Some(hints.read_only),
        destructive_hint: Some(hints.destructive),
        idempotent_hint: Some(hints.idempotent),
        ..Default::default()
    });
    tool
}

impl From<ToolError> for McpError {
    fn from(err: ToolError) -> Self {
        let message = err.to_string();
        match err {
            ToolError::NotFound(_) => McpError::new(ErrorCode::METHOD_NOT_FOUND, message, None),
            ToolError::InvalidParams { .. } => McpError::invalid_params(message, None),
            ToolError::Internal { .. } => McpError::internal_error(message, None),
        }
    }
}

impl rmcp::ServerHandler for GitServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            instructions: Some(
                "Git, GitHub CLI and GitKraken CLI operations as tools.\n\n\
                 Tools run in the server's working directory. Mutating tools accept \
                 dryRun to preview what would happen; destructive ones refuse unless \
                 force is set. GitHub tools are listed only when `gh` is installed, \
                 GitKraken tools only when `gk` is."
                    .to_string(),
            ),
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        let tools = self.dispatcher.list().await.iter().map(to_mcp_tool).collect();
        Ok(ListToolsResult::with_all_items(tools))
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let result = self.dispatcher.dispatch(&request.name, request.arguments).await?;
        Ok(Envelope::from_result(&result).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caller_errors_map_to_protocol_codes() {
        let not_found: McpError = ToolError::NotFound("git_nope".into()).into();
        assert_eq!(not_found.code, ErrorCode::METHOD_NOT_FOUND);

        let bad_args: McpError = ToolError::InvalidParams {
            tool: "git_add".into(),
            message: "missing field `files`".into(),
        }
        .into();
        assert_eq!(bad_args.code, ErrorCode::INVALID_PARAMS);

        let defect: McpError = ToolError::Internal {
            tool: "git_add".into(),
            message: "boom".into(),
        }
        .into();
        assert_eq!(defect.code, ErrorCode::INTERNAL_ERROR);
    }
}
