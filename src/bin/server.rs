use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use furia_esports_bot::{BotConfig, BotResponse, CacheStats, FuriaBot};

#[derive(Clone)]
struct AppState {
    bot: Arc<FuriaBot>,
}

/// Raw chat message; only handled when it starts with the bot mention
#[derive(Debug, Deserialize)]
struct MessageRequest {
    user_id: String,
    message: String,
}

/// Command already addressed to the bot
#[derive(Debug, Deserialize)]
struct CommandRequest {
    user_id: String,
    text: String,
}

#[derive(Debug, Serialize)]
struct BotMessage {
    #[serde(flatten)]
    response: BotResponse,
    timestamp: DateTime<Local>,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

#[derive(Debug, Serialize)]
struct StatsResponse {
    cache: CacheStats,
    hit_ratio: f64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "furia_bot_server=debug,furia_esports_bot=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = BotConfig::from_env();
    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(5000);

    tracing::info!("🚀 Starting FURIA Esports Bot Server");
    tracing::info!("🌐 Source: {}", config.base_url);
    tracing::info!("📦 Cache: {} entries, {}s TTL", config.cache_maxsize, config.cache_ttl_secs);
    tracing::info!("🔌 Port: {}", port);

    let state = AppState {
        bot: Arc::new(FuriaBot::new(config)?),
    };

    // Build router
    let app = Router::new()
        .route("/health", get(health_handler))
        .route("/v1/message", post(message_handler))
        .route("/v1/command", post(command_handler))
        .route("/v1/stats", get(stats_handler))
        .layer(CorsLayer::permissive())
        .with_state(state);

    let addr = format!("0.0.0.0:{}", port);
    tracing::info!("🤖 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("🛑 Shutting down");
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: furia_esports_bot::VERSION.to_string(),
    })
}

async fn message_handler(State(state): State<AppState>, Json(req): Json<MessageRequest>) -> Result<Response, AppError> {
    check_user_id(&req.user_id)?;

    let Some(command) = state.bot.addressed_command(&req.message) else {
        return Ok(StatusCode::NO_CONTENT.into_response());
    };

    tracing::debug!("Command from {}: {:?}", req.user_id, command);
    let response = state.bot.on_user_command(&req.user_id, command).await;
    Ok(Json(stamp(response)).into_response())
}

async fn command_handler(State(state): State<AppState>, Json(req): Json<CommandRequest>) -> Result<Json<BotMessage>, AppError> {
    check_user_id(&req.user_id)?;

    let response = state.bot.on_user_command(&req.user_id, &req.text).await;
    tracing::info!("✅ {} → final={}", req.user_id, response.is_final);
    Ok(Json(stamp(response)))
}

async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let cache = state.bot.cache_stats();
    Json(StatsResponse {
        hit_ratio: cache.hit_ratio(),
        cache,
    })
}

/// Conversation state is keyed by user, so an empty id would be shared by everyone
fn check_user_id(user_id: &str) -> Result<(), AppError> {
    if user_id.trim().is_empty() {
        return Err(AppError::BadRequest("user_id must not be empty".to_string()));
    }
    Ok(())
}

fn stamp(response: BotResponse) -> BotMessage {
    BotMessage {
        response,
        timestamp: Local::now(),
    }
}

// Error handling
enum AppError {
    BadRequest(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
        };

        tracing::error!("❌ Error: {} - {}", status, message);

        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}
