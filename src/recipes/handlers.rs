use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use time::OffsetDateTime;
use tracing::instrument;

use super::dto::{RecipeDetails, RecipeListing, RecipeRequest};
use super::{repo, services};
use crate::{
    auth::AuthUser,
    error::{AppResult, OpResult},
    logs::{
        dto::{AddToUserRequest, DeleteRecipeLogRequest},
        services as log_services, AddToUserResponse, LogKind, LoggedItem,
    },
    products::dto::NameListing,
    state::AppState,
};

pub fn recipe_routes() -> Router<AppState> {
    Router::new()
        .route("/Recipes/AllRecipes", get(all_recipes))
        .route("/Recipes/AllRecipesByNames", get(all_recipes_by_names))
        .route("/Recipes/Create", post(create))
        .route("/Recipes/AddRecipeToUser", post(add_recipe_to_user))
        .route("/Recipes/DeleteRecipeLog", put(delete_recipe_log))
        .route("/Recipes/:id", get(details).put(update).delete(delete))
        .route("/Identity/GetUsersRecipes", get(users_recipes))
}

#[instrument(skip(state, viewer))]
pub async fn all_recipes(
    State(state): State<AppState>,
    viewer: Option<AuthUser>,
) -> AppResult<Json<Vec<RecipeListing>>> {
    let viewer = viewer.map(|AuthUser(id)| id);
    Ok(Json(services::list_all(&state.db, viewer).await?))
}

#[instrument(skip(state))]
pub async fn all_recipes_by_names(
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
) -> AppResult<Json<RecipeDetails>> {
    let viewer = viewer.map(|AuthUser(id)| id);
    Ok(Json(services::details(&state.db, id, viewer).await?))
}

#[instrument(skip(state, payload))]
pub async fn create(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<RecipeRequest>,
) -> AppResult<(StatusCode, Json<i32>)> {
    let id = services::create(&state.db, user_id, payload).await?;
    Ok((StatusCode::CREATED, Json(id)))
}

#[instrument(skip(state, payload))]
pub async fn update(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<i32>,
    Json(payload): Json<RecipeRequest>,
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
pub async fn add_recipe_to_user(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<AddToUserRequest>,
) -> AppResult<Json<AddToUserResponse>> {
    let resp = log_services::add_to_user(
        &state.db,
        LogKind::Recipe,
        payload.id,
        user_id,
        OffsetDateTime::now_utc(),
    )
    .await?;
    Ok(Json(resp))
}

#[instrument(skip(state, payload))]
pub async fn delete_recipe_log(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<DeleteRecipeLogRequest>,
) -> AppResult<Json<OpResult>> {
    log_services::delete_logged(
        &state.db,
        LogKind::Recipe,
        user_id,
        payload.recipe_id,
        payload.date_logged,
        OffsetDateTime::now_utc(),
    )
    .await?;
    Ok(Json(OpResult::ok()))
}

#[instrument(skip(state))]
pub async fn users_recipes(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> AppResult<Json<Vec<LoggedItem>>> {
    Ok(Json(log_services::list_logged(&state.db, LogKind::Recipe, user_id).await?))
}
