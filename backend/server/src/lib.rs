//! Backend for the Interviewer flashcard app.
//!
//!
//!
//! # Endpoints
//! - `POST /api/chat`: relays a transcript to the completion provider, see [`relay`]
//! - `GET /data/questions.csv`: the static question bank, parsed client side
//!
//!
//!
//! # Notes
//!
//! ## Stateless
//! Nothing is stored server side. The question bank is a file on disk served as-is, and each
//! chat request carries the whole transcript plus the categories the client knows about.
//!
//! ## Navigation
//! The relay never interprets `[NAVIGATE:<slug>]` directives, it only asks the model to emit
//! them. Clients scrub and act on them, see `bank::navigation`.
//!
//!
//!
//! # Setup
//!
//! Run locally.
//! ```sh
//! GROQ_API_KEY=... cargo run -p server
//! ```
//!
//! Environment
//! - `RUST_PORT`: listen port, default `1111`
//! - `QUESTIONS_PATH`: CSV served at `/data/questions.csv`, default `data/questions.csv`
//! - `GROQ_API_KEY`: provider credential, falls back to `/run/secrets/GROQ_API_KEY`
//! - `CHAT_API_URL`, `CHAT_MODEL`, `CHAT_TEMPERATURE`, `CHAT_MAX_TOKENS`: provider overrides
//! - `RUST_LOG`: tracing filter
use std::{sync::Arc, time::Duration};

use axum::{
    Router,
    http::{Method, header::CONTENT_TYPE},
    routing::post,
};

use signal::{
    ctrl_c,
    unix::{SignalKind, signal},
};
use tokio::{net::TcpListener, signal};
use tower_http::{cors::CorsLayer, services::ServeFile};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

pub mod config;
pub mod error;
pub mod relay;
pub mod routes;
pub mod state;
pub mod utils;

use bank::QUESTIONS_PATH;
use config::Config;
use routes::chat_handler;
use state::State;

pub fn router(state: Arc<State>) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/api/chat", post(chat_handler))
        .route_service(QUESTIONS_PATH, ServeFile::new(&state.config.questions_path))
        .layer(cors)
        .with_state(state)
}

pub async fn start_server() -> Result<(), Box<dyn std::error::Error>> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    info!("Initializing state...");
    let config = Config::load()?;
    let state = State::new(config);

    info!("Starting server...");
    let address = format!("0.0.0.0:{}", state.config.port);
    let app = router(state);

    info!("Binding to {address}");
    let listener = TcpListener::bind(&address).await?;
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutting down...");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        ctrl_c().await.expect("Failed to install Ctrl+C handler");

        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        signal(SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;

        info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
