use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use tracing::instrument;

use super::dto::{
    AccountUpdateResponse, ChangePasswordRequest, LoginRequest, PersonalInfoResponse,
    RefreshRequest, RegisterRequest, RegisterResponse, UpdatePersonalInfoRequest,
};
use super::services;
use crate::{
    auth::{AuthUser, TokenPair},
    error::AppResult,
    state::AppState,
};

pub fn identity_routes() -> Router<AppState> {
    Router::new()
        .route("/Identity/Register", post(register))
        .route("/Identity/Login", post(login))
        .route("/Identity/Refresh", post(refresh))
        .route("/Identity/GetUserPersonalInfo", get(get_personal_info))
        .route("/Identity/UpdateUserPersonalInfo", post(update_personal_info))
        .route("/Identity/ChangePassword", post(change_password))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> AppResult<Json<RegisterResponse>> {
    let user = services::register(&state, payload).await?;
    Ok(Json(RegisterResponse {
        id: user.id,
        user_name: user.username,
    }))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<TokenPair>> {
    let tokens = services::login(&state, &payload.user_name, &payload.password).await?;
    Ok(Json(tokens))
}

#[instrument(skip(state, payload))]
pub async fn refresh(
    State(state): State<AppState>,
    Json(payload): Json<RefreshRequest>,
) -> AppResult<Json<TokenPair>> {
    let tokens = services::refresh(&state, &payload.refresh_token).await?;
    Ok(Json(tokens))
}

#[instrument(skip(state))]
pub async fn get_personal_info(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> AppResult<Json<PersonalInfoResponse>> {
    Ok(Json(services::get_personal_info(&state.db, user_id).await?))
}

#[instrument(skip(state, payload))]
pub async fn update_personal_info(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<UpdatePersonalInfoRequest>,
) -> AppResult<Json<AccountUpdateResponse>> {
    Ok(Json(
        services::update_personal_info(&state, user_id, payload).await?,
    ))
}

#[instrument(skip(state, payload))]
pub async fn change_password(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<ChangePasswordRequest>,
) -> AppResult<Json<AccountUpdateResponse>> {
    Ok(Json(services::change_password(&state, user_id, payload).await?))
}
