//! Minimal HTTP surface exposing a health endpoint.

use crate::cli::Output;
use axum::{response::IntoResponse, routing::get, Json, Router};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    details: String,
}

/// Run the HTTP server.
pub async fn run_serve(host: &str, port: u16) -> anyhow::Result<()> {
    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    Output::header("Recap Server");
    println!();
    Output::success(&format!("Listening on http://{}", addr));
    Output::kv("Health", "GET  /health");
    println!();
    Output::info("Press Ctrl+C to stop the server.");

    tracing::info!(%addr, "serving health endpoint");
    axum::serve(listener, router()).await?;

    Ok(())
}

fn router() -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new().route("/health", get(health)).layer(cors)
}

async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        details: String::new(),
    })
}
