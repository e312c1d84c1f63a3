use sqlx::{PgPool, Postgres, Transaction};
use time::OffsetDateTime;
use uuid::Uuid;

use super::dto::WorkoutRequest;
use super::repo_types::{WorkoutExerciseRow, WorkoutRow};
use super::services::ExerciseDiff;
use crate::products::dto::NameListing;

const WORKOUT_SELECT: &str = r#"
    SELECT w.id, w.name, w.time_to_finish, w.difficulty, w.photo, w.description,
           w.calories_burned, w.user_id, u.username AS creator
      FROM workouts w
      JOIN users u ON u.id = w.user_id
"#;

pub async fn list(db: &PgPool) -> anyhow::Result<Vec<WorkoutRow>> {
    let sql = format!("{WORKOUT_SELECT} WHERE w.deleted_at IS NULL ORDER BY w.id");
    let rows = sqlx::query_as::<_, WorkoutRow>(&sql).fetch_all(db).await?;
    Ok(rows)
}

pub async fn list_names(db: &PgPool) -> anyhow::Result<Vec<NameListing>> {
    let rows = sqlx::query_as::<_, NameListing>(
        "SELECT id, name FROM workouts WHERE deleted_at IS NULL ORDER BY name",
    )
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn find(db: &PgPool, id: i32) -> anyhow::Result<Option<WorkoutRow>> {
    let sql = format!("{WORKOUT_SELECT} WHERE w.id = $1 AND w.deleted_at IS NULL");
    let row = sqlx::query_as::<_, WorkoutRow>(&sql)
        .bind(id)
        .fetch_optional(db)
        .await?;
    Ok(row)
}

pub async fn exercises_for(
    db: &PgPool,
    workout_ids: &[i32],
) -> anyhow::Result<Vec<WorkoutExerciseRow>> {
    let rows = sqlx::query_as::<_, WorkoutExerciseRow>(
        r#"
        SELECT we.workout_id, we.exercise_id, e.name AS exercise_name, we.sets, we.repetitions
          FROM workout_exercises we
          JOIN exercises e ON e.id = we.exercise_id
         WHERE we.workout_id = ANY($1)
         ORDER BY we.workout_id, we.exercise_id
        "#,
    )
    .bind(workout_ids)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

async fn upsert_exercise(
    tx: &mut Transaction<'_, Postgres>,
    workout_id: i32,
    (exercise_id, sets, repetitions): (i32, i32, i32),
) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        INSERT INTO workout_exercises (workout_id, exercise_id, sets, repetitions)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (workout_id, exercise_id)
        DO UPDATE SET sets = EXCLUDED.sets, repetitions = EXCLUDED.repetitions
        "#,
    )
    .bind(workout_id)
    .bind(exercise_id)
    .bind(sets)
    .bind(repetitions)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

pub async fn create(db: &PgPool, owner: Uuid, req: &WorkoutRequest) -> anyhow::Result<i32> {
    let mut tx = db.begin().await?;
    let id = sqlx::query_scalar::<_, i32>(
        r#"
        INSERT INTO workouts (name, time_to_finish, difficulty, photo, description,
                              calories_burned, user_id)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING id
        "#,
    )
    .bind(req.name.trim())
    .bind(req.time_to_finish)
    .bind(req.difficulty)
    .bind(&req.photo)
    .bind(&req.description)
    .bind(req.calories_burned)
    .bind(owner)
    .fetch_one(&mut *tx)
    .await?;

    for e in &req.exercises {
        upsert_exercise(&mut tx, id, (e.exercise_id, e.sets, e.repetitions)).await?;
    }
    tx.commit().await?;
    Ok(id)
}

/// Returns false when no live workout has this id.
pub async fn update(
    db: &PgPool,
    id: i32,
    req: &WorkoutRequest,
    now: OffsetDateTime,
) -> anyhow::Result<bool> {
    let mut tx = db.begin().await?;
    let res = sqlx::query(
        r#"
        UPDATE workouts
           SET name = $2, time_to_finish = $3, difficulty = $4, photo = $5,
               description = $6, calories_burned = $7, modified_at = $8
         WHERE id = $1 AND deleted_at IS NULL
        "#,
    )
    .bind(id)
    .bind(req.name.trim())
    .bind(req.time_to_finish)
    .bind(req.difficulty)
    .bind(&req.photo)
    .bind(&req.description)
    .bind(req.calories_burned)
    .bind(now)
    .execute(&mut *tx)
    .await?;
    if res.rows_affected() == 0 {
        return Ok(false);
    }

    let existing = sqlx::query_as::<_, (i32, i32, i32)>(
        "SELECT exercise_id, sets, repetitions FROM workout_exercises WHERE workout_id = $1",
    )
    .bind(id)
    .fetch_all(&mut *tx)
    .await?;
    let diff = ExerciseDiff::between(&existing, &req.exercises);
    if !diff.remove.is_empty() {
        sqlx::query("DELETE FROM workout_exercises WHERE workout_id = $1 AND exercise_id = ANY($2)")
            .bind(id)
            .bind(&diff.remove)
            .execute(&mut *tx)
            .await?;
    }
    for entry in diff.upsert {
        upsert_exercise(&mut tx, id, entry).await?;
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
        "UPDATE workouts SET deleted_at = $2, deleted_by = $3 WHERE id = $1 AND deleted_at IS NULL",
    )
    .bind(id)
    .bind(now)
    .bind(deleted_by)
    .execute(db)
    .await?;
    Ok(res.rows_affected() > 0)
}
