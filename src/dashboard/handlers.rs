use axum::{extract::State, routing::get, Json, Router};
use time::OffsetDateTime;
use tracing::instrument;

use super::dto::DashboardInfo;
use super::services;
use crate::{auth::AuthUser, error::AppResult, state::AppState};

pub fn dashboard_routes() -> Router<AppState> {
    Router::new().route(
        "/Identity/GetDashboardInformationForUser",
        get(get_dashboard_information),
    )
}

#[instrument(skip(state))]
pub async fn get_dashboard_information(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> AppResult<Json<DashboardInfo>> {
    let info = services::dashboard_info(&state.db, user_id, OffsetDateTime::now_utc()).await?;
    Ok(Json(info))
}
