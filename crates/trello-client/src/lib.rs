//! Trello REST client.
//!
//! Every request carries the `key` and `token` query parameters, and every
//! response is normalized into a [`serde_json::Value`]: parsed JSON when the
//! body is JSON, `{"text": <raw body>}` otherwise.

mod api;
mod client;
mod params;
mod redact;
mod response;

pub use api::{CreateCardParams, TrelloApi, UpdateCardParams};
pub use client::{TrelloClient, DEFAULT_ACTIVITY_LIMIT, TRELLO_BASE_URL};
pub use params::QueryParams;
pub use redact::{mask_secrets, scrub_secrets, REDACTED};
pub use response::{error_message, normalize_body};
pub use reqwest::Method;
pub use trello_core::{TrelloError, TrelloResult};
