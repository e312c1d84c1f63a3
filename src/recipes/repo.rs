use sqlx::{PgPool, Postgres, Transaction};
use time::OffsetDateTime;
use uuid::Uuid;

use super::dto::RecipeRequest;
use super::repo_types::{RecipeProductRow, RecipeRow};
use super::services::ProductDiff;
use crate::products::dto::NameListing;

const RECIPE_SELECT: &str = r#"
    SELECT r.id, r.name, r.time_to_finish, r.difficulty, r.photo, r.description,
           r.notes_and_tips, r.user_id,
           EXISTS (SELECT 1 FROM user_roles ur
                    WHERE ur.user_id = r.user_id AND ur.role = 'Admin') AS owner_is_admin
      FROM recipes r
"#;

pub async fn list(db: &PgPool) -> anyhow::Result<Vec<RecipeRow>> {
    let sql = format!("{RECIPE_SELECT} WHERE r.deleted_at IS NULL ORDER BY r.id");
    let rows = sqlx::query_as::<_, RecipeRow>(&sql).fetch_all(db).await?;
    Ok(rows)
}

pub async fn list_names(db: &PgPool) -> anyhow::Result<Vec<NameListing>> {
    let rows = sqlx::query_as::<_, NameListing>(
        "SELECT id, name FROM recipes WHERE deleted_at IS NULL ORDER BY name",
    )
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn find(db: &PgPool, id: i32) -> anyhow::Result<Option<RecipeRow>> {
    let sql = format!("{RECIPE_SELECT} WHERE r.id = $1 AND r.deleted_at IS NULL");
    let row = sqlx::query_as::<_, RecipeRow>(&sql)
        .bind(id)
        .fetch_optional(db)
        .await?;
    Ok(row)
}

/// Products (with current macros) of the given recipes.
pub async fn products_for(db: &PgPool, recipe_ids: &[i32]) -> anyhow::Result<Vec<RecipeProductRow>> {
    let rows = sqlx::query_as::<_, RecipeProductRow>(
        r#"
        SELECT pr.recipe_id, pr.product_id, p.name AS product_name, pr.quantity,
               p.carbs, p.protein, p.fats
          FROM product_recipes pr
          JOIN products p ON p.id = pr.product_id
         WHERE pr.recipe_id = ANY($1)
         ORDER BY pr.recipe_id, pr.product_id
        "#,
    )
    .bind(recipe_ids)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

async fn upsert_product(
    tx: &mut Transaction<'_, Postgres>,
    recipe_id: i32,
    product_id: i32,
    quantity: i32,
) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        INSERT INTO product_recipes (recipe_id, product_id, quantity)
        VALUES ($1, $2, $3)
        ON CONFLICT (recipe_id, product_id) DO UPDATE SET quantity = EXCLUDED.quantity
        "#,
    )
    .bind(recipe_id)
    .bind(product_id)
    .bind(quantity)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

pub async fn create(db: &PgPool, owner: Uuid, req: &RecipeRequest) -> anyhow::Result<i32> {
    let mut tx = db.begin().await?;
    let id = sqlx::query_scalar::<_, i32>(
        r#"
        INSERT INTO recipes (name, time_to_finish, difficulty, photo, description,
                             notes_and_tips, user_id)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING id
        "#,
    )
    .bind(req.name.trim())
    .bind(req.time_to_finish)
    .bind(req.difficulty)
    .bind(&req.photo)
    .bind(&req.description)
    .bind(&req.notes_and_tips)
    .bind(owner)
    .fetch_one(&mut *tx)
    .await?;

    for p in &req.products {
        upsert_product(&mut tx, id, p.product_id, p.quantity).await?;
    }
    tx.commit().await?;
    Ok(id)
}

/// Current (product_id, quantity) pairs of a recipe.
async fn product_pairs(
    tx: &mut Transaction<'_, Postgres>,
    recipe_id: i32,
) -> anyhow::Result<Vec<(i32, i32)>> {
    let rows = sqlx::query_as::<_, (i32, i32)>(
        "SELECT product_id, quantity FROM product_recipes WHERE recipe_id = $1",
    )
    .bind(recipe_id)
    .fetch_all(&mut **tx)
    .await?;
    Ok(rows)
}

/// Replaces the recipe's fields and reconciles its product set. Returns false
/// when no live recipe has this id.
pub async fn update(
    db: &PgPool,
    id: i32,
    req: &RecipeRequest,
    now: OffsetDateTime,
) -> anyhow::Result<bool> {
    let mut tx = db.begin().await?;
    let res = sqlx::query(
        r#"
        UPDATE recipes
           SET name = $2, time_to_finish = $3, difficulty = $4, photo = $5,
               description = $6, notes_and_tips = $7, modified_at = $8
         WHERE id = $1 AND deleted_at IS NULL
        "#,
    )
    .bind(id)
    .bind(req.name.trim())
    .bind(req.time_to_finish)
    .bind(req.difficulty)
    .bind(&req.photo)
    .bind(&req.description)
    .bind(&req.notes_and_tips)
    .bind(now)
    .execute(&mut *tx)
    .await?;
    if res.rows_affected() == 0 {
        return Ok(false);
    }

    let existing = product_pairs(&mut tx, id).await?;
    let diff = ProductDiff::between(&existing, &req.products);
    if !diff.remove.is_empty() {
        sqlx::query("DELETE FROM product_recipes WHERE recipe_id = $1 AND product_id = ANY($2)")
            .bind(id)
            .bind(&diff.remove)
            .execute(&mut *tx)
            .await?;
    }
    for (product_id, quantity) in &diff.upsert {
        upsert_product(&mut tx, id, *product_id, *quantity).await?;
    }
    tx.commit().await?;
    Ok(true)
}

pub async fn soft_delete(
    db: &PgPool,
    id: i32,
    deleted_by: Uuid,
    now: OffsetDateTime,
) -> anyhow::Result<bool> {
    let res = sqlx::query(
        "UPDATE recipes SET deleted_at = $2, deleted_by = $3 WHERE id = $1 AND deleted_at IS NULL",
    )
    .bind(id)
    .bind(now)
    .bind(deleted_by)
    .execute(db)
    .await?;
    Ok(res.rows_affected() > 0)
}
