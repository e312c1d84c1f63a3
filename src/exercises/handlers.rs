use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument};

use super::repo::{self, Exercise, ExerciseRequest};
use crate::{
    auth::AdminUser,
    error::{AppError, AppResult},
    products::dto::NameListing,
    state::AppState,
};

pub fn exercise_routes() -> Router<AppState> {
    Router::new()
        .route("/Exercises/AllExercises", get(all_exercises))
        .route("/Exercises/AllExercisesByNames", get(all_exercises_by_names))
        .route("/Exercises/Create", post(create))
        .route("/Exercises/:id", get(details).put(update).delete(delete))
}

fn validate(req: &ExerciseRequest) -> AppResult<()> {
    if req.name.trim().is_empty() {
        return Err(AppError::validation("Exercise name is required."));
    }
    Ok(())
}

#[instrument(skip(state))]
pub async fn all_exercises(State(state): State<AppState>) -> AppResult<Json<Vec<Exercise>>> {
    Ok(Json(repo::list(&state.db).await?))
}

#[instrument(skip(state))]
pub async fn all_exercises_by_names(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<NameListing>>> {
    Ok(Json(repo::list_names(&state.db).await?))
}

#[instrument(skip(state))]
pub async fn details(State(state): State<AppState>, Path(id): Path<i32>) -> AppResult<Json<Exercise>> {
    repo::find(&state.db, id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found("Exercise Not Found."))
}

#[instrument(skip(state, payload))]
pub async fn create(
    State(state): State<AppState>,
    AdminUser(admin_id): AdminUser,
    Json(payload): Json<ExerciseRequest>,
) -> AppResult<(StatusCode, Json<i32>)> {
    validate(&payload)?;
    let id = repo::create(&state.db, &payload).await?;
    info!(exercise_id = id, %admin_id, "exercise created");
    Ok((StatusCode::CREATED, Json(id)))
}

#[instrument(skip(state, payload))]
pub async fn update(
    State(state): State<AppState>,
    AdminUser(admin_id): AdminUser,
    Path(id): Path<i32>,
    Json(payload): Json<ExerciseRequest>,
) -> AppResult<StatusCode> {
    validate(&payload)?;
    if !repo::update(&state.db, id, &payload).await? {
        return Err(AppError::not_found("Exercise Not Found."));
    }
    info!(exercise_id = id, %admin_id, "exercise updated");
    Ok(StatusCode::OK)
}

#[instrument(skip(state))]
pub async fn delete(
    State(state): State<AppState>,
    AdminUser(admin_id): AdminUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    if !repo::delete(&state.db, id).await? {
        return Err(AppError::not_found("Exercise Not Found."));
    }
    info!(exercise_id = id, %admin_id, "exercise deleted");
    Ok(StatusCode::OK)
}
