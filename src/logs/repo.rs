use sqlx::PgPool;
use time::OffsetDateTime;
use uuid::Uuid;

use super::dto::LoggedItem;
use super::LogKind;

/// True when a non-deleted recipe/workout with this id exists.
pub async fn item_exists(db: &PgPool, kind: LogKind, item_id: i32) -> anyhow::Result<bool> {
    let sql = format!(
        "SELECT EXISTS (SELECT 1 FROM {} WHERE id = $1 AND deleted_at IS NULL)",
        kind.item_table()
    );
    let exists = sqlx::query_scalar::<_, bool>(&sql)
        .bind(item_id)
        .fetch_one(db)
        .await?;
    Ok(exists)
}

pub async fn insert(
    db: &PgPool,
    kind: LogKind,
    user_id: Uuid,
    item_id: i32,
    date_logged: OffsetDateTime,
) -> anyhow::Result<OffsetDateTime> {
    let sql = format!(
        "INSERT INTO {} (user_id, {}, date_logged) VALUES ($1, $2, $3) RETURNING date_logged",
        kind.log_table(),
        kind.item_column()
    );
    let stored = sqlx::query_scalar::<_, OffsetDateTime>(&sql)
        .bind(user_id)
        .bind(item_id)
        .bind(date_logged)
        .fetch_one(db)
        .await?;
    Ok(stored)
}

/// Soft-deletes the live row with exactly this key. Returns false when no
/// such row exists (including one already deleted).
pub async fn soft_delete(
    db: &PgPool,
    kind: LogKind,
    user_id: Uuid,
    item_id: i32,
    date_logged: OffsetDateTime,
    now: OffsetDateTime,
) -> anyhow::Result<bool> {
    let sql = format!(
        r#"
        UPDATE {}
           SET deleted_at = $4
         WHERE user_id = $1 AND {} = $2 AND date_logged = $3 AND deleted_at IS NULL
        "#,
        kind.log_table(),
        kind.item_column()
    );
    let res = sqlx::query(&sql)
        .bind(user_id)
        .bind(item_id)
        .bind(date_logged)
        .bind(now)
        .execute(db)
        .await?;
    Ok(res.rows_affected() > 0)
}

pub async fn list_for_user(
    db: &PgPool,
    kind: LogKind,
    user_id: Uuid,
) -> anyhow::Result<Vec<LoggedItem>> {
    let sql = format!(
        r#"
        SELECT l.{col} AS item_id, i.name, l.date_logged
          FROM {log} l
          JOIN {item} i ON i.id = l.{col}
         WHERE l.user_id = $1 AND l.deleted_at IS NULL AND i.deleted_at IS NULL
         ORDER BY l.date_logged DESC
        "#,
        col = kind.item_column(),
        log = kind.log_table(),
        item = kind.item_table()
    );
    let rows = sqlx::query_as::<_, LoggedItem>(&sql)
        .bind(user_id)
        .fetch_all(db)
        .await?;
    Ok(rows)
}
