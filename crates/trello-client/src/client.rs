use crate::api::{CreateCardParams, TrelloApi, UpdateCardParams};
use crate::params::QueryParams;
use crate::redact::{mask_secrets, scrub_secrets};
use crate::response::{error_message, normalize_body};
use async_trait::async_trait;
use reqwest::{Client, Method, Url};
use serde_json::{json, Value};
use trello_core::{TrelloConfig, TrelloError, TrelloResult};

pub const TRELLO_BASE_URL: &str = "https://api.trello.com/1";
pub const DEFAULT_ACTIVITY_LIMIT: u32 = 10;

const BOARD_FIELDS: &str = "id,name,url";
const LIST_FIELDS: &str = "id,name,closed";
const MY_CARD_FIELDS: &str = "id,name,idList,idBoard,url";

/// Async Trello REST API client.
///
/// No timeout or retry is configured: a hung upstream call hangs the caller,
/// and failures are returned as soon as they happen.
#[derive(Clone)]
pub struct TrelloClient {
    api_key: String,
    token: String,
    base_url: String,
    debug: bool,
    http: Client,
}

impl std::fmt::Debug for TrelloClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrelloClient")
            .field("base_url", &self.base_url)
            .field("debug", &self.debug)
            .finish_non_exhaustive()
    }
}

impl TrelloClient {
    /// Create a client for the public Trello API.
    ///
    /// # Errors
    /// Returns [`TrelloError::Config`] if the key or token is empty. No
    /// network call is made.
    pub fn new(api_key: impl Into<String>, token: impl Into<String>) -> TrelloResult<Self> {
        let api_key = api_key.into();
        let token = token.into();
        if api_key.trim().is_empty() || token.trim().is_empty() {
            return Err(TrelloError::Config(
                "Trello API credentials are not configured. Set TRELLO_API_KEY and TRELLO_TOKEN env vars."
                    .to_string(),
            ));
        }

        let http = Client::builder()
            .build()
            .map_err(|e| TrelloError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            api_key,
            token,
            base_url: TRELLO_BASE_URL.to_string(),
            debug: false,
            http,
        })
    }

    pub fn from_config(config: &TrelloConfig) -> TrelloResult<Self> {
        let client = Self::new(
            config.api_key.clone().unwrap_or_default(),
            config.token.clone().unwrap_or_default(),
        )?;
        Ok(client.with_debug(config.debug))
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Log each request's method, masked URL and status at debug level.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Issue one authenticated request and normalize its response.
    ///
    /// `key` and `token` are always sent as query parameters. The body, when
    /// given, is sent as JSON. Non-2xx responses become
    /// [`TrelloError::Api`] carrying the status and the normalized body.
    ///
    /// `path` is a fixed route split on `/`; domain operations pass IDs as
    /// separate segments instead.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        query: &QueryParams,
        body: Option<&Value>,
    ) -> TrelloResult<Value> {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        self.send(method, &segments, query, body).await
    }

    /// Build the endpoint URL with each segment percent-encoded on its own,
    /// so an ID containing `/`, `?` or `#` stays a single path segment.
    fn endpoint(&self, segments: &[&str]) -> TrelloResult<Url> {
        if let Some(bad) = segments.iter().find(|s| matches!(**s, "" | "." | "..")) {
            return Err(TrelloError::Validation(format!(
                "Invalid path segment: {:?}",
                bad
            )));
        }

        let invalid_base =
            || TrelloError::Config(format!("Invalid Trello base URL: {}", self.base_url));
        let mut url = Url::parse(&self.base_url).map_err(|_| invalid_base())?;
        url.path_segments_mut()
            .map_err(|_| invalid_base())?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn secrets(&self) -> [&str; 2] {
        [self.api_key.as_str(), self.token.as_str()]
    }

    async fn send(
        &self,
        method: Method,
        segments: &[&str],
        query: &QueryParams,
        body: Option<&Value>,
    ) -> TrelloResult<Value> {
        let url = self.endpoint(segments)?;

        let mut builder = self
            .http
            .request(method.clone(), url)
            .query(&query.build())
            .query(&[("key", self.api_key.as_str()), ("token", self.token.as_str())]);
        if let Some(body) = body {
            builder = builder.json(body);
        }
        let request = builder.build().map_err(|e| {
            TrelloError::Serialization(format!("Failed to build request: {}", e.without_url()))
        })?;

        let route = scrub_secrets(request.url().path(), &self.secrets());
        if self.debug {
            tracing::debug!(
                "[Trello] {} {}",
                method,
                mask_secrets(request.url(), &self.secrets())
            );
        }

        let response = self.http.execute(request).await.map_err(|e| {
            TrelloError::Transport(format!("Failed to reach Trello API: {}", e.without_url()))
        })?;

        let status = response.status();
        if self.debug {
            tracing::debug!("[Trello] -> {}", status.as_u16());
        }

        let text = response.text().await.map_err(|e| {
            TrelloError::Transport(format!("Failed to read Trello response: {}", e.without_url()))
        })?;
        let data = normalize_body(&text);

        if !status.is_success() {
            // Upstreams and proxies sometimes echo the credentials back.
            let message = scrub_secrets(&error_message(&data), &self.secrets());
            tracing::warn!(
                "[Trello] ERROR {} on {} {}: {}",
                status.as_u16(),
                method,
                route,
                message
            );
            return Err(TrelloError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(data)
    }

    async fn get(&self, segments: &[&str], query: QueryParams) -> TrelloResult<Value> {
        self.send(Method::GET, segments, &query, None).await
    }

    async fn put(&self, segments: &[&str], query: QueryParams) -> TrelloResult<Value> {
        self.send(Method::PUT, segments, &query, None).await
    }

    async fn close(&self, segments: &[&str]) -> TrelloResult<Value> {
        let body = json!({ "value": "true" });
        self.send(Method::PUT, segments, &QueryParams::new(), Some(&body))
            .await
    }
}

#[async_trait]
impl TrelloApi for TrelloClient {
    // ========================================================================
    // Boards
    // ========================================================================

    async fn get_board(&self, board_id: &str) -> TrelloResult<Value> {
        self.get(
            &["boards", board_id],
            QueryParams::from([("fields", BOARD_FIELDS)]),
        )
        .await
    }

    async fn list_boards(&self) -> TrelloResult<Value> {
        self.get(
            &["members", "me", "boards"],
            QueryParams::from([("fields", BOARD_FIELDS)]),
        )
        .await
    }

    async fn list_boards_in_workspace(&self, workspace_id: &str) -> TrelloResult<Value> {
        self.get(
            &["organizations", workspace_id, "boards"],
            QueryParams::from([("fields", BOARD_FIELDS)]),
        )
        .await
    }

    async fn list_workspaces(&self) -> TrelloResult<Value> {
        self.get(&["members", "me", "organizations"], QueryParams::new())
            .await
    }

    // ========================================================================
    // Lists
    // ========================================================================

    async fn get_lists(&self, board_id: &str) -> TrelloResult<Value> {
        self.get(
            &["boards", board_id, "lists"],
            QueryParams::from([("fields", LIST_FIELDS)]),
        )
        .await
    }

    async fn add_list(&self, board_id: &str, name: &str) -> TrelloResult<Value> {
        let body = json!({ "name": name, "idBoard": board_id });
        self.send(Method::POST, &["lists"], &QueryParams::new(), Some(&body))
            .await
    }

    async fn archive_list(&self, list_id: &str) -> TrelloResult<Value> {
        self.close(&["lists", list_id, "closed"]).await
    }

    // ========================================================================
    // Cards
    // ========================================================================

    async fn get_cards_by_list(&self, list_id: &str) -> TrelloResult<Value> {
        self.get(&["lists", list_id, "cards"], QueryParams::new())
            .await
    }

    async fn add_card(&self, params: CreateCardParams) -> TrelloResult<Value> {
        let mut query = QueryParams::new();
        query
            .add("idList", params.list_id.as_str())
            .add("name", params.name.as_str())
            .add_non_empty("desc", params.description.as_deref())
            .add_non_empty("due", params.due_date.as_deref())
            .add_non_empty_list("idLabels", params.labels.as_deref());
        self.send(Method::POST, &["cards"], &query, None).await
    }

    async fn archive_card(&self, card_id: &str) -> TrelloResult<Value> {
        self.close(&["cards", card_id, "closed"]).await
    }

    async fn attach_image(
        &self,
        card_id: &str,
        image_url: &str,
        name: Option<String>,
    ) -> TrelloResult<Value> {
        let mut query = QueryParams::new();
        query.add("url", image_url).add_opt("name", name.as_deref());
        self.send(
            Method::POST,
            &["cards", card_id, "attachments"],
            &query,
            None,
        )
        .await
    }

    /// Move the card, then reposition it when `pos` is given.
    ///
    /// The two calls are independent: if repositioning fails, the move has
    /// already happened upstream and the repositioning error is returned.
    async fn move_card(
        &self,
        card_id: &str,
        list_id: &str,
        pos: Option<String>,
    ) -> TrelloResult<Value> {
        let moved = self
            .put(
                &["cards", card_id, "idList"],
                QueryParams::from([("value", list_id)]),
            )
            .await?;

        if let Some(pos) = pos.filter(|p| !p.is_empty()) {
            self.put(
                &["cards", card_id, "pos"],
                QueryParams::from([("value", pos.as_str())]),
            )
            .await?;
        }

        Ok(moved)
    }

    async fn update_card(&self, params: UpdateCardParams) -> TrelloResult<Value> {
        let mut query = QueryParams::new();
        query
            .add_opt("name", params.name.as_deref())
            .add_opt("desc", params.description.as_deref())
            .add_opt("due", params.due_date.as_deref())
            .add_opt_list("idLabels", params.labels.as_deref());
        self.put(&["cards", params.card_id.as_str()], query).await
    }

    async fn get_my_cards(&self) -> TrelloResult<Value> {
        self.get(
            &["members", "me", "cards"],
            QueryParams::from([("fields", MY_CARD_FIELDS)]),
        )
        .await
    }

    // ========================================================================
    // Activity
    // ========================================================================

    async fn get_recent_activity(
        &self,
        board_id: &str,
        limit: Option<u32>,
    ) -> TrelloResult<Value> {
        let mut query = QueryParams::new();
        query.add_opt_num("limit", Some(limit.unwrap_or(DEFAULT_ACTIVITY_LIMIT)));
        self.get(&["boards", board_id, "actions"], query)
            .await
    }
}
