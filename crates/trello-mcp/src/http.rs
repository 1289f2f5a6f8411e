//! Streamable HTTP transport with a health endpoint.

use crate::context::SERVER_NAME;
use crate::TrelloMcpServer;
use anyhow::{Context, Result};
use axum::{routing::get, Json, Router};
use rmcp::transport::streamable_http_server::{
    session::local::LocalSessionManager, StreamableHttpServerConfig, StreamableHttpService,
};
use serde_json::{json, Value};

pub const MCP_PATH: &str = "/mcp";

pub fn health_payload() -> Value {
    json!({ "status": "ok", "name": SERVER_NAME, "endpoint": MCP_PATH })
}

async fn health() -> Json<Value> {
    Json(health_payload())
}

/// `/` and `/health` answer liveness probes; MCP is served statelessly at `/mcp`.
pub fn router(server: TrelloMcpServer) -> Router {
    let mcp = StreamableHttpService::new(
        move || Ok(server.clone()),
        LocalSessionManager::default().into(),
        StreamableHttpServerConfig {
            stateful_mode: false,
            ..Default::default()
        },
    );

    Router::new()
        .route("/", get(health))
        .route("/health", get(health))
        .nest_service(MCP_PATH, mcp)
}

pub async fn serve(server: TrelloMcpServer, host: &str, port: u16) -> Result<()> {
    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!(
        "Starting {} on {} | Health: / and /health | MCP: {}",
        SERVER_NAME,
        addr,
        MCP_PATH
    );

    axum::serve(listener, router(server))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::McpContext;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use std::sync::Arc;
    use tower::ServiceExt;
    use trello_client::TrelloClient;
    use trello_core::ActiveSelection;

    fn test_router() -> Router {
        let client = TrelloClient::new("key", "token").unwrap();
        let context = McpContext::new(Arc::new(client), ActiveSelection::default());
        router(TrelloMcpServer::new(context))
    }

    #[test]
    fn test_health_payload() {
        let payload = health_payload();
        assert_eq!(payload["status"], "ok");
        assert_eq!(payload["name"], "Trello MCP Server");
        assert_eq!(payload["endpoint"], "/mcp");
    }

    #[tokio::test]
    async fn test_health_routes() {
        for uri in ["/", "/health"] {
            let response = test_router()
                .oneshot(Request::get(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);

            let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
            let body: Value = serde_json::from_slice(&bytes).unwrap();
            assert_eq!(body, health_payload());
        }
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let response = test_router()
            .oneshot(Request::get("/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
