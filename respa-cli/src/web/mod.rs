//! Admin web pages

pub mod error;
pub mod pagination;
pub mod units;

use anyhow::{Context, Result};
use axum::Router;
use axum::routing::get;
use handlebars::Handlebars;
use sqlx::SqlitePool;
use std::sync::Arc;

/// Shared state of the admin server
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub templates: Arc<Handlebars<'static>>,
}

/// Compile the page templates
pub fn load_templates() -> Result<Handlebars<'static>> {
    let mut handlebars = Handlebars::new();
    handlebars
        .register_template_string(
            units::UNIT_LIST_TEMPLATE,
            include_str!("templates/unit_list.html"),
        )
        .context("Failed to compile unit list template")?;
    Ok(handlebars)
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/units/", get(units::unit_list))
        .route("/units", get(units::unit_list))
        .with_state(state)
}

/// Serve the admin pages until the process is stopped
pub async fn serve(pool: SqlitePool, bind: &str) -> Result<()> {
    let state = AppState {
        pool,
        templates: Arc::new(load_templates()?),
    };
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .with_context(|| format!("Failed to bind {}", bind))?;
    log::info!("Serving admin pages on http://{}/units/", bind);

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
