//! Shift planner REST API server.

mod db;
mod domain;
mod rest;
mod storage;

use anyhow::Result;
use axum::serve;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::info;

use crate::rest::{create_router, initialize_backend};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "shift_planner_backend=info,tower_http=info".into()),
        )
        .init();

    let app_state = initialize_backend().await?;
    let router = create_router(app_state);

    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
    info!("Starting REST API server at {}", addr);

    let listener = TcpListener::bind(addr).await?;
    serve(listener, router).await?;

    Ok(())
}
