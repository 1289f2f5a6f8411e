pub mod context;
pub mod http;
pub mod render;

use context::McpContext;
use render::{render, OutputFormat, ResultKind};
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{
        CallToolResult, Content, ErrorData as McpError, Implementation, ProtocolVersion,
        ServerCapabilities, ServerInfo,
    },
    schemars, tool, tool_handler, tool_router, ServerHandler,
};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use trello_client::{CreateCardParams, UpdateCardParams};
use trello_core::{TrelloError, TrelloResult};

// ============================================================================
// Request Types
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BoardIdRequest {
    #[schemars(description = "ID of the board")]
    pub board_id: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct OptionalBoardRequest {
    #[schemars(description = "ID of the board (optional, defaults to the active board)")]
    pub board_id: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceIdRequest {
    #[schemars(description = "ID of the workspace (organization)")]
    pub workspace_id: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct OptionalWorkspaceRequest {
    #[schemars(
        description = "ID of the workspace (optional, defaults to the active workspace)"
    )]
    pub workspace_id: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddListRequest {
    #[schemars(description = "Name of the new list")]
    pub name: String,
    #[schemars(description = "ID of the board (optional, defaults to the active board)")]
    pub board_id: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListIdRequest {
    #[schemars(description = "ID of the list")]
    pub list_id: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CardIdRequest {
    #[schemars(description = "ID of the card")]
    pub card_id: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddCardRequest {
    #[schemars(description = "ID of the list to create the card in")]
    pub list_id: String,
    #[schemars(description = "Name of the card")]
    pub name: String,
    #[schemars(description = "Description of the card (optional)")]
    pub description: Option<String>,
    #[schemars(description = "Due date in ISO 8601 format (optional)")]
    pub due_date: Option<String>,
    #[schemars(description = "Label IDs to apply (optional)")]
    pub labels: Option<Vec<String>>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttachImageRequest {
    #[schemars(description = "ID of the card")]
    pub card_id: String,
    #[schemars(description = "Public URL of the image")]
    pub image_url: String,
    #[schemars(description = "Attachment name (optional, defaults to 'Image')")]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MoveCardRequest {
    #[schemars(description = "ID of the card to move")]
    pub card_id: String,
    #[schemars(description = "ID of the destination list")]
    pub list_id: String,
    #[schemars(description = "Position in the new list: 'top', 'bottom', or a number (optional)")]
    pub pos: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCardRequest {
    #[schemars(description = "ID of the card to update")]
    pub card_id: String,
    #[schemars(description = "New name (optional)")]
    pub name: Option<String>,
    #[schemars(description = "New description (optional, use empty string to clear)")]
    pub description: Option<String>,
    #[schemars(description = "Due date in ISO 8601 format (optional, use empty string to clear)")]
    pub due_date: Option<String>,
    #[schemars(description = "Label IDs replacing the current ones (optional, empty list clears)")]
    pub labels: Option<Vec<String>>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecentActivityRequest {
    #[schemars(description = "Maximum number of actions to return (optional, defaults to 10)")]
    pub limit: Option<u32>,
    #[schemars(description = "ID of the board (optional, defaults to the active board)")]
    pub board_id: Option<String>,
}

// ============================================================================
// MCP Server
// ============================================================================

#[derive(Clone)]
pub struct TrelloMcpServer {
    context: Arc<McpContext>,
    format: OutputFormat,
    tool_router: ToolRouter<Self>,
}

/// Map a dispatch failure onto an MCP error. Caller mistakes become
/// `invalid_params`; everything else is reported as an internal error.
pub fn into_mcp_error(err: TrelloError) -> McpError {
    if err.is_caller_error() {
        McpError::invalid_params(err.to_string(), None)
    } else {
        McpError::internal_error(err.to_string(), None)
    }
}

#[tool_router]
impl TrelloMcpServer {
    pub fn new(context: McpContext) -> Self {
        Self {
            context: Arc::new(context),
            format: OutputFormat::default(),
            tool_router: Self::tool_router(),
        }
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    fn respond(&self, kind: ResultKind, result: TrelloResult<Value>) -> Result<CallToolResult, McpError> {
        let value = result.map_err(into_mcp_error)?;
        Ok(CallToolResult::success(vec![Content::text(render(
            self.format,
            kind,
            &value,
        ))]))
    }

    // ========================================================================
    // Server and Selection
    // ========================================================================

    #[tool(description = "Get information about the MCP server, environment, and active Trello context")]
    pub async fn get_server_info(&self) -> Result<CallToolResult, McpError> {
        tracing::info!("tool:get_server_info");
        self.respond(ResultKind::ServerInfo, Ok(self.context.server_info()))
    }

    #[tool(description = "Get info for the currently active board")]
    pub async fn get_active_board_info(&self) -> Result<CallToolResult, McpError> {
        tracing::info!("tool:get_active_board_info");
        let result = self.context.get_active_board_info().await;
        self.respond(ResultKind::Board, result)
    }

    #[tool(description = "Set the active board for subsequent operations")]
    pub async fn set_active_board(
        &self,
        Parameters(req): Parameters<BoardIdRequest>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!("tool:set_active_board boardId={}", req.board_id);
        let result = self.context.set_active_board(&req.board_id).await;
        self.respond(ResultKind::ActiveBoard, result)
    }

    #[tool(description = "Set the active workspace (organization) for subsequent operations")]
    pub async fn set_active_workspace(
        &self,
        Parameters(req): Parameters<WorkspaceIdRequest>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!("tool:set_active_workspace workspaceId={}", req.workspace_id);
        let result = self.context.set_active_workspace(&req.workspace_id);
        self.respond(ResultKind::ActiveWorkspace, result)
    }

    // ========================================================================
    // Boards and Workspaces
    // ========================================================================

    #[tool(description = "List boards accessible to the Trello user")]
    pub async fn list_boards(&self) -> Result<CallToolResult, McpError> {
        tracing::info!("tool:list_boards");
        let result = self.context.list_boards().await;
        self.respond(ResultKind::Boards, result)
    }

    #[tool(description = "List workspaces (organizations) the Trello user belongs to")]
    pub async fn list_workspaces(&self) -> Result<CallToolResult, McpError> {
        tracing::info!("tool:list_workspaces");
        let result = self.context.list_workspaces().await;
        self.respond(ResultKind::Workspaces, result)
    }

    #[tool(description = "List boards in a workspace (organization). If workspaceId omitted, uses active workspace.")]
    pub async fn list_boards_in_workspace(
        &self,
        Parameters(req): Parameters<OptionalWorkspaceRequest>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!(
            "tool:list_boards_in_workspace workspaceId={:?}",
            req.workspace_id
        );
        let result = self
            .context
            .list_boards_in_workspace(req.workspace_id.as_deref())
            .await;
        self.respond(ResultKind::Boards, result)
    }

    // ========================================================================
    // Lists
    // ========================================================================

    #[tool(description = "Fetch all lists on a board. If boardId omitted, uses active board.")]
    pub async fn get_lists(
        &self,
        Parameters(req): Parameters<OptionalBoardRequest>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!("tool:get_lists boardId={:?}", req.board_id);
        let result = self.context.get_lists(req.board_id.as_deref()).await;
        self.respond(ResultKind::Lists, result)
    }

    #[tool(description = "Create a new list on the given or active board")]
    pub async fn add_list_to_board(
        &self,
        Parameters(req): Parameters<AddListRequest>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!(
            "tool:add_list_to_board name={:?} boardId={:?}",
            req.name,
            req.board_id
        );
        let result = self
            .context
            .add_list_to_board(&req.name, req.board_id.as_deref())
            .await;
        self.respond(ResultKind::List, result)
    }

    #[tool(description = "Archive (close) a Trello list")]
    pub async fn archive_list(
        &self,
        Parameters(req): Parameters<ListIdRequest>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!("tool:archive_list listId={}", req.list_id);
        let result = self.context.archive_list(&req.list_id).await;
        self.respond(ResultKind::List, result)
    }

    // ========================================================================
    // Cards
    // ========================================================================

    #[tool(description = "Fetch cards from a specific list")]
    pub async fn get_cards_by_list_id(
        &self,
        Parameters(req): Parameters<ListIdRequest>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!("tool:get_cards_by_list_id listId={}", req.list_id);
        let result = self.context.get_cards_by_list_id(&req.list_id).await;
        self.respond(ResultKind::Cards, result)
    }

    #[tool(description = "Create a Trello card in a list")]
    pub async fn add_card_to_list(
        &self,
        Parameters(req): Parameters<AddCardRequest>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!(
            "tool:add_card_to_list listId={} name={:?} dueDate={:?} labels_count={}",
            req.list_id,
            req.name,
            req.due_date,
            req.labels.as_ref().map_or(0, Vec::len)
        );
        let result = self
            .context
            .add_card_to_list(CreateCardParams {
                list_id: req.list_id,
                name: req.name,
                description: req.description,
                due_date: req.due_date,
                labels: req.labels,
            })
            .await;
        self.respond(ResultKind::Card, result)
    }

    #[tool(description = "Archive (close) a Trello card")]
    pub async fn archive_card(
        &self,
        Parameters(req): Parameters<CardIdRequest>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!("tool:archive_card cardId={}", req.card_id);
        let result = self.context.archive_card(&req.card_id).await;
        self.respond(ResultKind::Card, result)
    }

    #[tool(description = "Attach an image URL to a Trello card")]
    pub async fn attach_image_to_card(
        &self,
        Parameters(req): Parameters<AttachImageRequest>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!(
            "tool:attach_image_to_card cardId={} imageUrl_len={} name={:?}",
            req.card_id,
            req.image_url.len(),
            req.name
        );
        let result = self
            .context
            .attach_image_to_card(&req.card_id, &req.image_url, req.name)
            .await;
        self.respond(ResultKind::Attachment, result)
    }

    #[tool(description = "Move a card to another list, optionally setting its position")]
    pub async fn move_card(
        &self,
        Parameters(req): Parameters<MoveCardRequest>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!(
            "tool:move_card cardId={} listId={} pos={:?}",
            req.card_id,
            req.list_id,
            req.pos
        );
        let result = self
            .context
            .move_card(&req.card_id, &req.list_id, req.pos)
            .await;
        self.respond(ResultKind::Card, result)
    }

    #[tool(description = "Update card details: name, description, dueDate, labels")]
    pub async fn update_card_details(
        &self,
        Parameters(req): Parameters<UpdateCardRequest>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!(
            "tool:update_card_details cardId={} name={:?} dueDate={:?} labels_count={}",
            req.card_id,
            req.name,
            req.due_date,
            req.labels.as_ref().map_or(0, Vec::len)
        );
        let result = self
            .context
            .update_card_details(UpdateCardParams {
                card_id: req.card_id,
                name: req.name,
                description: req.description,
                due_date: req.due_date,
                labels: req.labels,
            })
            .await;
        self.respond(ResultKind::Card, result)
    }

    #[tool(description = "Fetch all cards assigned to the current user")]
    pub async fn get_my_cards(&self) -> Result<CallToolResult, McpError> {
        tracing::info!("tool:get_my_cards");
        let result = self.context.get_my_cards().await;
        self.respond(ResultKind::Cards, result)
    }

    // ========================================================================
    // Activity
    // ========================================================================

    #[tool(description = "Fetch recent activity (actions) on a board. If boardId omitted, uses active board.")]
    pub async fn get_recent_activity(
        &self,
        Parameters(req): Parameters<RecentActivityRequest>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!(
            "tool:get_recent_activity limit={:?} boardId={:?}",
            req.limit,
            req.board_id
        );
        let result = self
            .context
            .get_recent_activity(req.limit, req.board_id.as_deref())
            .await;
        self.respond(ResultKind::Activity, result)
    }
}

#[tool_handler]
impl ServerHandler for TrelloMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(
                "Trello MCP Server - Manage Trello boards, lists, and cards through MCP. \
                 Set an active board with set_active_board to omit boardId on later calls."
                    .to_string(),
            ),
        }
    }
}
