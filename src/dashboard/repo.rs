use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

/// One product line of one logged recipe. A recipe without products shows up
/// once with the product columns empty.
#[derive(Debug, Clone, FromRow)]
pub struct RecipeLogLine {
    pub recipe_id: i32,
    pub name: String,
    pub date_logged: OffsetDateTime,
    pub quantity: Option<i32>,
    pub carbs: Option<f64>,
    pub protein: Option<f64>,
    pub fats: Option<f64>,
    pub sugar: Option<f64>,
    pub sodium: Option<f64>,
}

#[derive(Debug, Clone, FromRow)]
pub struct WorkoutLogLine {
    pub workout_id: i32,
    pub name: String,
    pub date_logged: OffsetDateTime,
    pub time_to_finish: i32,
    pub calories_burned: f64,
}

/// Live recipe logs in `[from, to)` whose recipe is live, joined with the
/// products' current macros.
pub async fn recipe_lines(
    db: &PgPool,
    user_id: Uuid,
    from: OffsetDateTime,
    to: OffsetDateTime,
) -> anyhow::Result<Vec<RecipeLogLine>> {
    let rows = sqlx::query_as::<_, RecipeLogLine>(
        r#"
        SELECT l.recipe_id, r.name, l.date_logged, pr.quantity,
               p.carbs, p.protein, p.fats, p.sugar, p.sodium
          FROM user_recipes l
          JOIN recipes r ON r.id = l.recipe_id AND r.deleted_at IS NULL
          LEFT JOIN product_recipes pr ON pr.recipe_id = r.id
          LEFT JOIN products p ON p.id = pr.product_id
         WHERE l.user_id = $1
           AND l.deleted_at IS NULL
           AND l.date_logged >= $2 AND l.date_logged < $3
         ORDER BY l.date_logged, l.recipe_id, pr.product_id
        "#,
    )
    .bind(user_id)
    .bind(from)
    .bind(to)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn workout_lines(
    db: &PgPool,
    user_id: Uuid,
    from: OffsetDateTime,
    to: OffsetDateTime,
) -> anyhow::Result<Vec<WorkoutLogLine>> {
    let rows = sqlx::query_as::<_, WorkoutLogLine>(
        r#"
        SELECT l.workout_id, w.name, l.date_logged, w.time_to_finish, w.calories_burned
          FROM user_workouts l
          JOIN workouts w ON w.id = l.workout_id AND w.deleted_at IS NULL
         WHERE l.user_id = $1
           AND l.deleted_at IS NULL
           AND l.date_logged >= $2 AND l.date_logged < $3
         ORDER BY l.date_logged, l.workout_id
        "#,
    )
    .bind(user_id)
    .bind(from)
    .bind(to)
    .fetch_all(db)
    .await?;
    Ok(rows)
}
