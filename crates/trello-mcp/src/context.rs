//! Tool dispatch: parameter checks, active-selection defaults, and calls
//! into the Trello client.

use serde_json::{json, Value};
use std::sync::Arc;
use trello_client::{CreateCardParams, TrelloApi, UpdateCardParams, DEFAULT_ACTIVITY_LIMIT};
use trello_core::{ActiveSelection, TrelloError, TrelloResult};

pub const SERVER_NAME: &str = "Trello MCP Server";

/// Attachment name used when the caller does not supply one.
pub const DEFAULT_ATTACHMENT_NAME: &str = "Image";

pub struct McpContext {
    api: Arc<dyn TrelloApi>,
    selection: ActiveSelection,
    environment: String,
}

impl McpContext {
    pub fn new(api: Arc<dyn TrelloApi>, selection: ActiveSelection) -> Self {
        Self {
            api,
            selection,
            environment: "development".to_string(),
        }
    }

    pub fn with_environment(mut self, environment: &str) -> Self {
        self.environment = environment.to_string();
        self
    }

    pub fn selection(&self) -> &ActiveSelection {
        &self.selection
    }

    // ========================================================================
    // Server and selection
    // ========================================================================

    pub fn server_info(&self) -> Value {
        json!({
            "server_name": SERVER_NAME,
            "version": env!("CARGO_PKG_VERSION"),
            "environment": self.environment,
            "active_board_id": self.selection.board_id(),
            "active_workspace_id": self.selection.workspace_id(),
        })
    }

    pub async fn get_active_board_info(&self) -> TrelloResult<Value> {
        let board_id = self.selection.board_id().ok_or_else(|| {
            TrelloError::Precondition(
                "No active board set. Provide TRELLO_BOARD_ID or call set_active_board."
                    .to_string(),
            )
        })?;
        self.api.get_board(&board_id).await
    }

    /// Record the board as active, then fetch it for confirmation.
    ///
    /// The selection is updated even if the fetch fails.
    pub async fn set_active_board(&self, board_id: &str) -> TrelloResult<Value> {
        require("boardId", board_id)?;
        self.selection.set_board(board_id);
        let board = self.api.get_board(board_id).await?;
        Ok(json!({ "active_board": board }))
    }

    pub fn set_active_workspace(&self, workspace_id: &str) -> TrelloResult<Value> {
        require("workspaceId", workspace_id)?;
        self.selection.set_workspace(workspace_id);
        Ok(json!({ "active_workspace_id": self.selection.workspace_id() }))
    }

    // ========================================================================
    // Boards and workspaces
    // ========================================================================

    pub async fn list_boards(&self) -> TrelloResult<Value> {
        self.api.list_boards().await
    }

    pub async fn list_workspaces(&self) -> TrelloResult<Value> {
        self.api.list_workspaces().await
    }

    pub async fn list_boards_in_workspace(
        &self,
        workspace_id: Option<&str>,
    ) -> TrelloResult<Value> {
        let workspace = self.selection.resolve_workspace(workspace_id)?;
        self.api.list_boards_in_workspace(&workspace).await
    }

    // ========================================================================
    // Lists
    // ========================================================================

    pub async fn get_lists(&self, board_id: Option<&str>) -> TrelloResult<Value> {
        let board = self.selection.resolve_board(board_id)?;
        self.api.get_lists(&board).await
    }

    pub async fn add_list_to_board(
        &self,
        name: &str,
        board_id: Option<&str>,
    ) -> TrelloResult<Value> {
        let board = self.selection.resolve_board(board_id)?;
        self.api.add_list(&board, name).await
    }

    pub async fn archive_list(&self, list_id: &str) -> TrelloResult<Value> {
        require("listId", list_id)?;
        self.api.archive_list(list_id).await
    }

    // ========================================================================
    // Cards
    // ========================================================================

    pub async fn get_cards_by_list_id(&self, list_id: &str) -> TrelloResult<Value> {
        require("listId", list_id)?;
        self.api.get_cards_by_list(list_id).await
    }

    pub async fn add_card_to_list(&self, params: CreateCardParams) -> TrelloResult<Value> {
        require("listId", &params.list_id)?;
        self.api.add_card(params).await
    }

    pub async fn archive_card(&self, card_id: &str) -> TrelloResult<Value> {
        require("cardId", card_id)?;
        self.api.archive_card(card_id).await
    }

    pub async fn attach_image_to_card(
        &self,
        card_id: &str,
        image_url: &str,
        name: Option<String>,
    ) -> TrelloResult<Value> {
        require("cardId", card_id)?;
        require("imageUrl", image_url)?;
        let name = name
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| DEFAULT_ATTACHMENT_NAME.to_string());
        self.api.attach_image(card_id, image_url, Some(name)).await
    }

    pub async fn move_card(
        &self,
        card_id: &str,
        list_id: &str,
        pos: Option<String>,
    ) -> TrelloResult<Value> {
        require("cardId", card_id)?;
        require("listId", list_id)?;
        self.api.move_card(card_id, list_id, pos).await
    }

    pub async fn update_card_details(&self, params: UpdateCardParams) -> TrelloResult<Value> {
        require("cardId", &params.card_id)?;
        self.api.update_card(params).await
    }

    pub async fn get_my_cards(&self) -> TrelloResult<Value> {
        self.api.get_my_cards().await
    }

    // ========================================================================
    // Activity
    // ========================================================================

    pub async fn get_recent_activity(
        &self,
        limit: Option<u32>,
        board_id: Option<&str>,
    ) -> TrelloResult<Value> {
        let board = self.selection.resolve_board(board_id)?;
        let limit = limit.unwrap_or(DEFAULT_ACTIVITY_LIMIT);
        if limit == 0 {
            return Err(TrelloError::Validation(
                "limit must be at least 1".to_string(),
            ));
        }
        self.api.get_recent_activity(&board, Some(limit)).await
    }
}

fn require(field: &str, value: &str) -> TrelloResult<()> {
    if value.trim().is_empty() {
        return Err(TrelloError::Validation(format!("{} must not be empty", field)));
    }
    Ok(())
}
