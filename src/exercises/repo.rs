use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use crate::products::dto::NameListing;

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseRequest {
    pub name: String,
    pub description: Option<String>,
}

pub async fn list(db: &PgPool) -> anyhow::Result<Vec<Exercise>> {
    let rows = sqlx::query_as::<_, Exercise>("SELECT id, name, description FROM exercises ORDER BY id")
        .fetch_all(db)
        .await?;
    Ok(rows)
}

pub async fn list_names(db: &PgPool) -> anyhow::Result<Vec<NameListing>> {
    let rows = sqlx::query_as::<_, NameListing>("SELECT id, name FROM exercises ORDER BY name")
        .fetch_all(db)
        .await?;
    Ok(rows)
}

pub async fn find(db: &PgPool, id: i32) -> anyhow::Result<Option<Exercise>> {
    let row = sqlx::query_as::<_, Exercise>("SELECT id, name, description FROM exercises WHERE id = $1")
        .bind(id)
        .fetch_optional(db)
        .await?;
    Ok(row)
}

pub async fn create(db: &PgPool, req: &ExerciseRequest) -> anyhow::Result<i32> {
    let id = sqlx::query_scalar::<_, i32>(
        "INSERT INTO exercises (name, description) VALUES ($1, $2) RETURNING id",
    )
    .bind(req.name.trim())
    .bind(&req.description)
    .fetch_one(db)
    .await?;
    Ok(id)
}

pub async fn update(db: &PgPool, id: i32, req: &ExerciseRequest) -> anyhow::Result<bool> {
    let res = sqlx::query("UPDATE exercises SET name = $2, description = $3 WHERE id = $1")
        .bind(id)
        .bind(req.name.trim())
        .bind(&req.description)
        .execute(db)
        .await?;
    Ok(res.rows_affected() > 0)
}

pub async fn delete(db: &PgPool, id: i32) -> anyhow::Result<bool> {
    let res = sqlx::query("DELETE FROM exercises WHERE id = $1")
        .bind(id)
        .execute(db)
        .await?;
    Ok(res.rows_affected() > 0)
}

pub async fn missing_ids(db: &PgPool, ids: &[i32]) -> anyhow::Result<Vec<i32>> {
    let found = sqlx::query_scalar::<_, i32>("SELECT id FROM exercises WHERE id = ANY($1)")
        .bind(ids)
        .fetch_all(db)
        .await?;
    Ok(ids.iter().copied().filter(|id| !found.contains(id)).collect())
}
