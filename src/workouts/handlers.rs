use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use time::OffsetDateTime;
use tracing::instrument;

use super::dto::{WorkoutDetails, WorkoutListing, WorkoutRequest};
use super::{repo, services};
use crate::{
    auth::AuthUser,
    error::{AppResult, OpResult},
    logs::{
        dto::{AddToUserRequest, DeleteWorkoutLogRequest},
        services as log_services, AddToUserResponse, LogKind, LoggedItem,
    },
    products::dto::NameListing,
    state::AppState,
};

pub fn workout_routes() -> Router<AppState> {
    Router::new()
        .route("/Workouts/AllWorkouts", get(all_workouts))
        .route("/Workouts/AllWorkoutsByNames", get(all_workouts_by_names))
        .route("/Workouts/Create", post(create))
        .route("/Workouts/AddWorkoutToUser", post(add_workout_to_user))
        .route("/Workouts/DeleteWorkoutLog", put(delete_workout_log))
        .route("/Workouts/:id", get(details).put(update).delete(delete))
        .route("/Identity/GetUsersWorkouts", get(users_workouts))
}

#[instrument(skip(state, viewer))]
pub async fn all_workouts(
    State(state): State<AppState>,
    viewer: Option<AuthUser>,
) -> AppResult<Json<Vec<WorkoutListing>>> {
    let viewer = viewer.map(|AuthUser(id)| id);
    Ok(Json(services::list_all(&state.db, viewer).await?))
}

#[instrument(skip(state))]
pub async fn all_workouts_by_names(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
) -> AppResult<Json<Vec<NameListing>>> {
    Ok(Json(repo::list_names(&state.db).await?))
}

#[instrument(skip(state, viewer))]
pub async fn details(
    State(state): State<AppState>,
    viewer: Option<AuthUser>,
    Path(id): Path<i32>,
) -> AppResult<Json<WorkoutDetails>> {
    let viewer = viewer.map(|AuthUser(id)| id);
    Ok(Json(services::details(&state.db, id, viewer).await?))
}

#[instrument(skip(state, payload))]
pub async fn create(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<WorkoutRequest>,
) -> AppResult<(StatusCode, Json<i32>)> {
    let id = services::create(&state.db, user_id, payload).await?;
    Ok((StatusCode::CREATED, Json(id)))
}

#[instrument(skip(state, payload))]
pub async fn update(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<i32>,
    Json(payload): Json<WorkoutRequest>,
) -> AppResult<Json<OpResult>> {
    services::update(&state.db, id, user_id, payload, OffsetDateTime::now_utc()).await?;
    Ok(Json(OpResult::ok()))
}

#[instrument(skip(state))]
pub async fn delete(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<i32>,
) -> AppResult<Json<OpResult>> {
    services::delete(&state.db, id, user_id, OffsetDateTime::now_utc()).await?;
    Ok(Json(OpResult::ok()))
}

#[instrument(skip(state, payload))]
pub async fn add_workout_to_user(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<AddToUserRequest>,
) -> AppResult<Json<AddToUserResponse>> {
    let resp = log_services::add_to_user(
        &state.db,
        LogKind::Workout,
        payload.id,
        user_id,
        OffsetDateTime::now_utc(),
    )
    .await?;
    Ok(Json(resp))
}

#[instrument(skip(state, payload))]
pub async fn delete_workout_log(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<DeleteWorkoutLogRequest>,
) -> AppResult<Json<OpResult>> {
    log_services::delete_logged(
        &state.db,
        LogKind::Workout,
        user_id,
        payload.workout_id,
        payload.date_logged,
        OffsetDateTime::now_utc(),
    )
    .await?;
    Ok(Json(OpResult::ok()))
}

#[instrument(skip(state))]
pub async fn users_workouts(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> AppResult<Json<Vec<LoggedItem>>> {
    Ok(Json(log_services::list_logged(&state.db, LogKind::Workout, user_id).await?))
}
