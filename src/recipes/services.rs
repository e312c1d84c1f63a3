use std::collections::HashMap;

use sqlx::PgPool;
use time::OffsetDateTime;
use tracing::{info, warn};
use uuid::Uuid;

use super::dto::{ProductQuantity, RecipeDetails, RecipeListing, RecipeProduct, RecipeRequest};
use super::repo;
use super::repo_types::{RecipeProductRow, RecipeRow};
use crate::error::{AppError, AppResult};
use crate::products;

pub(crate) const NOT_FOUND: &str = "Recipe Not Found.";

/// Changes needed to turn a recipe's stored product set into the requested one.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ProductDiff {
    pub remove: Vec<i32>,
    pub upsert: Vec<(i32, i32)>,
}

impl ProductDiff {
    pub fn between(existing: &[(i32, i32)], wanted: &[ProductQuantity]) -> Self {
        let current: HashMap<i32, i32> = existing.iter().copied().collect();
        let mut remove: Vec<i32> = existing
            .iter()
            .map(|(id, _)| *id)
            .filter(|id| !wanted.iter().any(|w| w.product_id == *id))
            .collect();
        remove.sort_unstable();
        let upsert = wanted
            .iter()
            .filter(|w| current.get(&w.product_id) != Some(&w.quantity))
            .map(|w| (w.product_id, w.quantity))
            .collect();
        Self { remove, upsert }
    }
}

fn to_products(rows: Vec<RecipeProductRow>) -> HashMap<i32, Vec<RecipeProduct>> {
    let mut by_recipe: HashMap<i32, Vec<RecipeProduct>> = HashMap::new();
    for row in rows {
        let calories = row.unit_calories();
        by_recipe.entry(row.recipe_id).or_default().push(RecipeProduct {
            product_id: row.product_id,
            product_name: row.product_name,
            quantity: row.quantity,
            calories,
        });
    }
    by_recipe
}

/// Listing total: per-unit calories of each product, not scaled by quantity.
pub(crate) fn total_calories(products: &[RecipeProduct]) -> i64 {
    products.iter().map(|p| p.calories).sum()
}

pub(crate) fn build_listings(
    recipes: Vec<RecipeRow>,
    product_rows: Vec<RecipeProductRow>,
    viewer: Option<Uuid>,
) -> Vec<RecipeListing> {
    let mut products = to_products(product_rows);
    recipes
        .into_iter()
        .map(|r| {
            let items = products.remove(&r.id).unwrap_or_default();
            RecipeListing {
                id: r.id,
                total_calories: total_calories(&items),
                is_mine: viewer == Some(r.user_id),
                is_admin: r.owner_is_admin,
                name: r.name,
                time_to_finish: r.time_to_finish,
                difficulty: r.difficulty,
                photo: r.photo,
                products: items,
            }
        })
        .collect()
}

async fn check_products(db: &PgPool, req: &RecipeRequest) -> AppResult<()> {
    req.validate().map_err(|e| {
        warn!(error = %e, "recipe rejected");
        AppError::Validation(e)
    })?;
    let missing = products::repo::missing_ids(db, &req.product_ids()).await?;
    if !missing.is_empty() {
        warn!(?missing, "recipe references unknown products");
        return Err(AppError::validation(format!("Unknown products: {:?}", missing)));
    }
    Ok(())
}

pub async fn list_all(db: &PgPool, viewer: Option<Uuid>) -> AppResult<Vec<RecipeListing>> {
    let recipes = repo::list(db).await?;
    let ids: Vec<i32> = recipes.iter().map(|r| r.id).collect();
    let rows = repo::products_for(db, &ids).await?;
    Ok(build_listings(recipes, rows, viewer))
}

pub async fn details(db: &PgPool, id: i32, viewer: Option<Uuid>) -> AppResult<RecipeDetails> {
    let recipe = repo::find(db, id)
        .await?
        .ok_or_else(|| AppError::not_found(NOT_FOUND))?;
    let items = to_products(repo::products_for(db, &[id]).await?)
        .remove(&id)
        .unwrap_or_default();
    Ok(RecipeDetails {
        id: recipe.id,
        total_calories: total_calories(&items),
        is_mine: viewer == Some(recipe.user_id),
        name: recipe.name,
        time_to_finish: recipe.time_to_finish,
        difficulty: recipe.difficulty,
        photo: recipe.photo,
        description: recipe.description,
        notes_and_tips: recipe.notes_and_tips,
        products: items,
    })
}

pub async fn create(db: &PgPool, owner: Uuid, req: RecipeRequest) -> AppResult<i32> {
    check_products(db, &req).await?;
    let id = repo::create(db, owner, &req).await?;
    info!(recipe_id = id, %owner, "recipe created");
    Ok(id)
}

// Any authenticated user may edit or delete any recipe.
pub async fn update(
    db: &PgPool,
    id: i32,
    user_id: Uuid,
    req: RecipeRequest,
    now: OffsetDateTime,
) -> AppResult<()> {
    check_products(db, &req).await?;
    if !repo::update(db, id, &req, now).await? {
        return Err(AppError::not_found(NOT_FOUND));
    }
    info!(recipe_id = id, %user_id, "recipe updated");
    Ok(())
}

pub async fn delete(db: &PgPool, id: i32, user_id: Uuid, now: OffsetDateTime) -> AppResult<()> {
    if !repo::soft_delete(db, id, user_id, now).await? {
        return Err(AppError::not_found(NOT_FOUND));
    }
    info!(recipe_id = id, %user_id, "recipe deleted");
    Ok(())
}
