// HTTP request handlers
use crate::domain::dashboard::DashboardView;
use crate::domain::series::LoadReport;
use crate::infrastructure::http_response::{html_response, json_response};
use crate::presentation::app_state::AppState;
use crate::presentation::page::render_page;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Raw `?page=` value; anything that is not a page number means the first page
#[derive(Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
}

impl PageQuery {
    pub fn requested_page(&self) -> usize {
        self.page
            .as_deref()
            .and_then(|page| page.trim().parse::<usize>().ok())
            .unwrap_or(1)
    }
}

#[derive(Serialize)]
pub struct DashboardResponse {
    #[serde(flatten)]
    pub view: DashboardView,
    pub report: LoadReport,
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Dashboard page, rebuilt from the data file on every request
pub async fn dashboard_page(
    Query(query): Query<PageQuery>,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let (view, _) = state.dashboard_service.get_dashboard().await;
    let html = render_page(&view, &state.settings, query.requested_page());

    match html_response(html) {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}

/// Dashboard view model plus load counters as JSON
pub async fn dashboard_json(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let (view, report) = state.dashboard_service.get_dashboard().await;

    match json_response(&DashboardResponse { view, report }) {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}
