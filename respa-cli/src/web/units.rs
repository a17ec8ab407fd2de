//! Unit list page

use axum::extract::{Query, State};
use axum::response::Html;
use serde::Deserialize;
use serde_json::json;

use super::AppState;
use super::error::AppError;
use super::pagination::Paginator;
use crate::repository::units;

/// Template rendered by the unit list
pub const UNIT_LIST_TEMPLATE: &str = "respa_admin/unit_list.html";

/// Units shown per page
pub const UNITS_PER_PAGE: i64 = 10;

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
}

/// GET /units/, paginated list of all units
pub async fn unit_list(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Html<String>, AppError> {
    let count = units::count_units(&state.pool).await?;
    let paginator = Paginator::new(count, UNITS_PER_PAGE);

    let requested = query.page.as_deref().filter(|p| !p.is_empty()).unwrap_or("1");
    let page = paginator.page(requested)?;
    let units = units::list_units_page(&state.pool, page.offset(), page.item_count()).await?;

    let html = state.templates.render(
        UNIT_LIST_TEMPLATE,
        &json!({
            "units": units,
            "page_obj": page,
            "is_paginated": paginator.num_pages() > 1,
        }),
    )?;

    Ok(Html(html))
}
