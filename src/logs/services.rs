use sqlx::PgPool;
use time::{Duration, OffsetDateTime};
use tracing::{info, warn};
use uuid::Uuid;

use super::dto::{AddToUserResponse, LoggedItem};
use super::{repo, LogKind};
use crate::error::{AppError, AppResult};
use crate::identity::repo_types::User;

/// Drops sub-microsecond precision so the instant survives a TIMESTAMPTZ
/// round-trip unchanged.
pub(crate) fn truncate_to_micros(t: OffsetDateTime) -> OffsetDateTime {
    t - Duration::nanoseconds(i64::from(t.nanosecond() % 1_000))
}

/// Logs `item_id` for `user_id` at `now`. Duplicates on the same day are
/// separate entries.
pub async fn add_to_user(
    db: &PgPool,
    kind: LogKind,
    item_id: i32,
    user_id: Uuid,
    now: OffsetDateTime,
) -> AppResult<AddToUserResponse> {
    if !repo::item_exists(db, kind, item_id).await? {
        warn!(?kind, item_id, "log target missing");
        return Err(AppError::not_found(kind.item_not_found()));
    }
    if User::find_by_id(db, user_id).await?.is_none() {
        warn!(%user_id, "log owner missing");
        return Err(AppError::not_found("User Not Found."));
    }

    let stamp = truncate_to_micros(now);
    let date_logged = repo::insert(db, kind, user_id, item_id, stamp).await?;
    info!(?kind, item_id, %user_id, "entry logged");

    Ok(AddToUserResponse {
        is_success: true,
        error: None,
        date_logged: Some(date_logged),
    })
}

/// Soft-deletes the entry keyed by `(user_id, item_id, date_logged)`. The
/// timestamp must match exactly.
pub async fn delete_logged(
    db: &PgPool,
    kind: LogKind,
    user_id: Uuid,
    item_id: i32,
    date_logged: OffsetDateTime,
    now: OffsetDateTime,
) -> AppResult<()> {
    if !repo::soft_delete(db, kind, user_id, item_id, date_logged, now).await? {
        warn!(?kind, item_id, %user_id, %date_logged, "log entry missing");
        return Err(AppError::not_found(kind.log_not_found()));
    }
    info!(?kind, item_id, %user_id, "log entry deleted");
    Ok(())
}

/// Live entries for the user, newest first.
pub async fn list_logged(db: &PgPool, kind: LogKind, user_id: Uuid) -> AppResult<Vec<LoggedItem>> {
    Ok(repo::list_for_user(db, kind, user_id).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn truncation_keeps_microseconds() {
        let t = datetime!(2024-03-05 10:15:30.123_456_789 UTC);
        assert_eq!(truncate_to_micros(t), datetime!(2024-03-05 10:15:30.123_456 UTC));
        let exact = datetime!(2024-03-05 10:15:30.5 UTC);
        assert_eq!(truncate_to_micros(exact), exact);
    }

    #[test]
    fn not_found_messages_per_kind() {
        assert_eq!(LogKind::Recipe.item_not_found(), "Recipe Not Found.");
        assert_eq!(LogKind::Workout.log_not_found(), "Workout log Not Found.");
    }

    async fn seed_user_and_recipe(pool: &PgPool) -> (Uuid, i32) {
        let user_id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO users (email, username, password_hash, training_goal,
                               daily_calorie_goal, target_proteins, target_carbs, target_fats)
            VALUES ('ann@example.com', 'ann', 'x', 0, 2000, 150, 250, 44)
            RETURNING id
            "#,
        )
        .fetch_one(pool)
        .await
        .unwrap();
        let recipe_id = sqlx::query_scalar::<_, i32>(
            "INSERT INTO recipes (name, time_to_finish, difficulty, user_id) VALUES ('Oats', 5, 0, $1) RETURNING id",
        )
        .bind(user_id)
        .fetch_one(pool)
        .await
        .unwrap();
        (user_id, recipe_id)
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn delete_with_other_timestamp_changes_nothing(pool: PgPool) {
        let (user_id, recipe_id) = seed_user_and_recipe(&pool).await;
        let now = OffsetDateTime::now_utc();
        let added = add_to_user(&pool, LogKind::Recipe, recipe_id, user_id, now)
            .await
            .unwrap();
        let logged = added.date_logged.unwrap();

        let err = delete_logged(
            &pool,
            LogKind::Recipe,
            user_id,
            recipe_id,
            logged + Duration::microseconds(1),
            now,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::NotFound(ref m) if m == "Recipe log Not Found."));
        assert_eq!(list_logged(&pool, LogKind::Recipe, user_id).await.unwrap().len(), 1);

        delete_logged(&pool, LogKind::Recipe, user_id, recipe_id, logged, now)
            .await
            .unwrap();
        assert!(list_logged(&pool, LogKind::Recipe, user_id).await.unwrap().is_empty());

        let again = delete_logged(&pool, LogKind::Recipe, user_id, recipe_id, logged, now).await;
        assert!(matches!(again, Err(AppError::NotFound(_))));
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn adding_unknown_recipe_is_not_found(pool: PgPool) {
        let (user_id, _) = seed_user_and_recipe(&pool).await;
        let err = add_to_user(&pool, LogKind::Recipe, 9999, user_id, OffsetDateTime::now_utc())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(ref m) if m == "Recipe Not Found."));
    }
}
