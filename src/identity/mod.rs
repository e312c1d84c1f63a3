pub mod dto;
pub mod handlers;
pub mod repo;
pub mod repo_types;
pub mod schedule;
pub mod services;
pub mod targets;

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    handlers::identity_routes()
}
