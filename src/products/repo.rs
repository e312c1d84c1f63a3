use sqlx::PgPool;

use super::dto::{NameListing, ProductRequest};
use super::repo_types::Product;

pub async fn list(db: &PgPool) -> anyhow::Result<Vec<Product>> {
    let rows = sqlx::query_as::<_, Product>(
        "SELECT id, name, carbs, protein, fats, sugar, sodium FROM products ORDER BY id",
    )
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn list_names(db: &PgPool) -> anyhow::Result<Vec<NameListing>> {
    let rows = sqlx::query_as::<_, NameListing>("SELECT id, name FROM products ORDER BY name")
        .fetch_all(db)
        .await?;
    Ok(rows)
}

pub async fn find(db: &PgPool, id: i32) -> anyhow::Result<Option<Product>> {
    let row = sqlx::query_as::<_, Product>(
        "SELECT id, name, carbs, protein, fats, sugar, sodium FROM products WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(db)
    .await?;
    Ok(row)
}

pub async fn create(db: &PgPool, req: &ProductRequest) -> anyhow::Result<i32> {
    let id = sqlx::query_scalar::<_, i32>(
        r#"
        INSERT INTO products (name, carbs, fats, protein, sodium, sugar)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id
        "#,
    )
    .bind(req.name.trim())
    .bind(req.carbs)
    .bind(req.fats)
    .bind(req.protein)
    .bind(req.sodium)
    .bind(req.sugar)
    .fetch_one(db)
    .await?;
    Ok(id)
}

/// Returns false when no product has this id.
pub async fn update(db: &PgPool, id: i32, req: &ProductRequest) -> anyhow::Result<bool> {
    let res = sqlx::query(
        r#"
        UPDATE products
           SET name = $2, carbs = $3, fats = $4, protein = $5, sodium = $6, sugar = $7
         WHERE id = $1
        "#,
    )
    .bind(id)
    .bind(req.name.trim())
    .bind(req.carbs)
    .bind(req.fats)
    .bind(req.protein)
    .bind(req.sodium)
    .bind(req.sugar)
    .execute(db)
    .await?;
    Ok(res.rows_affected() > 0)
}

pub async fn delete(db: &PgPool, id: i32) -> anyhow::Result<bool> {
    let res = sqlx::query("DELETE FROM products WHERE id = $1")
        .bind(id)
        .execute(db)
        .await?;
    Ok(res.rows_affected() > 0)
}

/// Ids from `ids` that do not exist.
pub async fn missing_ids(db: &PgPool, ids: &[i32]) -> anyhow::Result<Vec<i32>> {
    let found = sqlx::query_scalar::<_, i32>("SELECT id FROM products WHERE id = ANY($1)")
        .bind(ids)
        .fetch_all(db)
        .await?;
    Ok(ids.iter().copied().filter(|id| !found.contains(id)).collect())
}
