use async_trait::async_trait;
use serde_json::Value;
use trello_core::TrelloResult;

/// Parameters for creating a card
#[derive(Debug, Clone, Default)]
pub struct CreateCardParams {
    pub list_id: String,
    pub name: String,
    pub description: Option<String>,
    pub due_date: Option<String>,
    pub labels: Option<Vec<String>>,
}

/// Parameters for updating a card. `None` leaves a field untouched;
/// `Some("")` clears it.
#[derive(Debug, Clone, Default)]
pub struct UpdateCardParams {
    pub card_id: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<String>,
    pub labels: Option<Vec<String>>,
}

/// Trello operations exposed to the tool layer.
///
/// Results are passed through as normalized JSON; callers decide how to
/// render them.
#[async_trait]
pub trait TrelloApi: Send + Sync {
    // Boards
    async fn get_board(&self, board_id: &str) -> TrelloResult<Value>;
    async fn list_boards(&self) -> TrelloResult<Value>;
    async fn list_boards_in_workspace(&self, workspace_id: &str) -> TrelloResult<Value>;

    // Workspaces
    async fn list_workspaces(&self) -> TrelloResult<Value>;

    // Lists
    async fn get_lists(&self, board_id: &str) -> TrelloResult<Value>;
    async fn add_list(&self, board_id: &str, name: &str) -> TrelloResult<Value>;
    async fn archive_list(&self, list_id: &str) -> TrelloResult<Value>;

    // Cards
    async fn get_cards_by_list(&self, list_id: &str) -> TrelloResult<Value>;
    async fn add_card(&self, params: CreateCardParams) -> TrelloResult<Value>;
    async fn archive_card(&self, card_id: &str) -> TrelloResult<Value>;
    async fn attach_image(
        &self,
        card_id: &str,
        image_url: &str,
        name: Option<String>,
    ) -> TrelloResult<Value>;
    async fn move_card(
        &self,
        card_id: &str,
        list_id: &str,
        pos: Option<String>,
    ) -> TrelloResult<Value>;
    async fn update_card(&self, params: UpdateCardParams) -> TrelloResult<Value>;
    async fn get_my_cards(&self) -> TrelloResult<Value>;

    // Activity
    async fn get_recent_activity(&self, board_id: &str, limit: Option<u32>)
        -> TrelloResult<Value>;
}
