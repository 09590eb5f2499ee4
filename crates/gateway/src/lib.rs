//! HTTP chat gateway for RefSeek.
//!
//! Exposes the conversation agent to a browser chat surface:
//! health check, chat turns, transcript access, and the suggestion
//! quick-actions, plus an embedded single-page frontend.
//!
//! Built on Axum. One gateway process hosts one conversation; turns are
//! serialized behind a mutex, matching the agent's sequential model.

pub mod frontend;

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;
use tracing::info;

use refseek_agent::{ConversationAgent, ResponseEnhancer, ResultAggregator};
use refseek_core::message::ConversationTurn;

/// Shared application state for the gateway.
pub struct GatewayState {
    /// The single conversation this process hosts. Chat turns lock it for
    /// their full duration, serializing the pipeline.
    pub agent: Mutex<ConversationAgent>,
}

type SharedState = Arc<GatewayState>;

/// Build the Axum router with all gateway routes.
pub fn build_router(state: SharedState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/api/chat", post(chat_handler))
        .route(
            "/api/history",
            get(history_handler).delete(clear_history_handler),
        )
        .route("/api/suggestions", get(suggestions_handler))
        .with_state(state)
        .merge(frontend::frontend_router())
        .layer(DefaultBodyLimit::max(64 * 1024))
        .layer(CorsLayer::permissive())
        .layer(tower_http::trace::TraceLayer::new_for_http())
}

/// Start the gateway HTTP server.
///
/// Builds the index client and completion backend from configuration once,
/// wires them into a fresh conversation agent, and serves until shutdown.
pub async fn start(config: refseek_config::AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let addr = format!("{}:{}", config.gateway.host, config.gateway.port);

    let index = refseek_index::build_from_config(&config);
    let completion = refseek_providers::build_from_config(&config);

    let capabilities = config.capabilities();
    info!(
        index_configured = capabilities.index_configured,
        completion_configured = capabilities.completion_configured,
        "Assembling conversation agent"
    );

    let aggregator = ResultAggregator::new(index);
    let enhancer = completion.map(ResponseEnhancer::new);
    let agent = ConversationAgent::new(aggregator, enhancer);

    let state = Arc::new(GatewayState {
        agent: Mutex::new(agent),
    });

    let app = build_router(state);

    info!(addr = %addr, "Gateway starting");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// --- Handlers ---

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    llm_enabled: bool,
    index_configured: bool,
}

async fn health_handler(State(state): State<SharedState>) -> Json<HealthResponse> {
    let agent = state.agent.lock().await;
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        llm_enabled: agent.llm_enabled(),
        index_configured: agent.index_configured(),
    })
}

#[derive(Deserialize)]
struct ChatRequest {
    message: String,
}

#[derive(Serialize)]
struct ChatResponse {
    response: String,
}

async fn chat_handler(
    State(state): State<SharedState>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, StatusCode> {
    let message = payload.message.trim();
    if message.is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }

    info!(message_len = message.len(), "Chat turn received");

    let mut agent = state.agent.lock().await;
    let response = agent.chat(message).await;

    Ok(Json(ChatResponse { response }))
}

async fn history_handler(State(state): State<SharedState>) -> Json<Vec<ConversationTurn>> {
    let agent = state.agent.lock().await;
    Json(agent.history().to_vec())
}

async fn clear_history_handler(State(state): State<SharedState>) -> StatusCode {
    let mut agent = state.agent.lock().await;
    agent.clear_history();
    StatusCode::NO_CONTENT
}

async fn suggestions_handler() -> Json<Vec<&'static str>> {
    Json(ConversationAgent::suggestions().to_vec())
}
