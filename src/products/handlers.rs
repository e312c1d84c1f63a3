use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument, warn};

use super::dto::{NameListing, ProductRequest};
use super::repo;
use super::repo_types::Product;
use crate::{
    auth::AdminUser,
    error::{AppError, AppResult},
    state::AppState,
};

pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/Products/AllProducts", get(all_products))
        .route("/Products/AllProductsByNames", get(all_products_by_names))
        .route("/Products/Create", post(create))
        .route("/Products/:id", get(details).put(update).delete(delete))
}

#[instrument(skip(state))]
pub async fn all_products(State(state): State<AppState>) -> AppResult<Json<Vec<Product>>> {
    Ok(Json(repo::list(&state.db).await?))
}

#[instrument(skip(state))]
pub async fn all_products_by_names(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<NameListing>>> {
    Ok(Json(repo::list_names(&state.db).await?))
}

#[instrument(skip(state))]
pub async fn details(State(state): State<AppState>, Path(id): Path<i32>) -> AppResult<Json<Product>> {
    repo::find(&state.db, id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found("Product Not Found."))
}

#[instrument(skip(state, payload))]
pub async fn create(
    State(state): State<AppState>,
    AdminUser(admin_id): AdminUser,
    Json(payload): Json<ProductRequest>,
) -> AppResult<(StatusCode, Json<i32>)> {
    payload.validate().map_err(|e| {
        warn!(error = %e, "product rejected");
        AppError::Validation(e)
    })?;
    let id = repo::create(&state.db, &payload).await?;
    info!(product_id = id, %admin_id, "product created");
    Ok((StatusCode::CREATED, Json(id)))
}

#[instrument(skip(state, payload))]
pub async fn update(
    State(state): State<AppState>,
    AdminUser(admin_id): AdminUser,
    Path(id): Path<i32>,
    Json(payload): Json<ProductRequest>,
) -> AppResult<StatusCode> {
    payload.validate().map_err(AppError::Validation)?;
    if !repo::update(&state.db, id, &payload).await? {
        return Err(AppError::not_found("Product Not Found."));
    }
    info!(product_id = id, %admin_id, "product updated");
    Ok(StatusCode::OK)
}

#[instrument(skip(state))]
pub async fn delete(
    State(state): State<AppState>,
    AdminUser(admin_id): AdminUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    if !repo::delete(&state.db, id).await? {
        return Err(AppError::not_found("Product Not Found."));
    }
    info!(product_id = id, %admin_id, "product deleted");
    Ok(StatusCode::OK)
}
