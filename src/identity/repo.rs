use sqlx::PgPool;
use uuid::Uuid;

use super::repo_types::{NewUser, ProfileUpdate, User};
use super::targets::MacroTargets;

const USER_COLUMNS: &str = r#"
    id, email, username, password_hash, height, weight, gender, training_goal,
    daily_calorie_goal, target_proteins, target_carbs, target_fats,
    workout_schedule, created_at, deleted_at
"#;

impl User {
    pub async fn find_by_id(db: &PgPool, id: Uuid) -> anyhow::Result<Option<User>> {
        let sql = format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1 AND deleted_at IS NULL"
        );
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(db)
            .await?;
        Ok(user)
    }

    pub async fn find_by_username(db: &PgPool, username: &str) -> anyhow::Result<Option<User>> {
        let sql = format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = $1 AND deleted_at IS NULL"
        );
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(username)
            .fetch_optional(db)
            .await?;
        Ok(user)
    }

    pub async fn find_by_email(db: &PgPool, email: &str) -> anyhow::Result<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1");
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(email)
            .fetch_optional(db)
            .await?;
        Ok(user)
    }

    /// Whether another user already holds this email or username.
    pub async fn identity_taken(
        db: &PgPool,
        email: &str,
        username: &str,
        except: Option<Uuid>,
    ) -> anyhow::Result<(bool, bool)> {
        let (email_taken, username_taken): (bool, bool) = sqlx::query_as(
            r#"
            SELECT
                EXISTS (SELECT 1 FROM users WHERE email = $1 AND id IS DISTINCT FROM $3),
                EXISTS (SELECT 1 FROM users WHERE username = $2 AND id IS DISTINCT FROM $3)
            "#,
        )
        .bind(email)
        .bind(username)
        .bind(except)
        .fetch_one(db)
        .await?;
        Ok((email_taken, username_taken))
    }

    /// Insert a user; macro targets are derived from the calorie goal here.
    pub async fn create(db: &PgPool, new: &NewUser) -> anyhow::Result<User> {
        let targets = MacroTargets::from_daily_calories(new.daily_calorie_goal);
        let sql = format!(
            r#"
            INSERT INTO users (
                email, username, password_hash, height, weight, gender, training_goal,
                daily_calorie_goal, target_proteins, target_carbs, target_fats, workout_schedule
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING {USER_COLUMNS}
            "#
        );
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(&new.email)
            .bind(&new.username)
            .bind(&new.password_hash)
            .bind(new.height)
            .bind(new.weight)
            .bind(new.gender)
            .bind(new.training_goal)
            .bind(new.daily_calorie_goal)
            .bind(targets.protein)
            .bind(targets.carbs)
            .bind(targets.fat)
            .bind(&new.workout_schedule)
            .fetch_one(db)
            .await?;
        Ok(user)
    }

    pub async fn update_profile(
        db: &PgPool,
        id: Uuid,
        update: &ProfileUpdate,
    ) -> anyhow::Result<User> {
        let sql = format!(
            r#"
            UPDATE users
               SET email = $2, username = $3, height = $4, weight = $5, gender = $6,
                   training_goal = $7, daily_calorie_goal = $8, target_proteins = $9,
                   target_carbs = $10, target_fats = $11, workout_schedule = $12,
                   modified_at = now()
             WHERE id = $1 AND deleted_at IS NULL
            RETURNING {USER_COLUMNS}
            "#
        );
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .bind(&update.email)
            .bind(&update.username)
            .bind(update.height)
            .bind(update.weight)
            .bind(update.gender)
            .bind(update.training_goal)
            .bind(update.daily_calorie_goal)
            .bind(update.target_proteins)
            .bind(update.target_carbs)
            .bind(update.target_fats)
            .bind(&update.workout_schedule)
            .fetch_one(db)
            .await?;
        Ok(user)
    }

    pub async fn set_password_hash(db: &PgPool, id: Uuid, hash: &str) -> anyhow::Result<()> {
        sqlx::query(
            "UPDATE users SET password_hash = $2, modified_at = now() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .bind(hash)
        .execute(db)
        .await?;
        Ok(())
    }

    pub async fn roles(db: &PgPool, id: Uuid) -> anyhow::Result<Vec<String>> {
        let roles = sqlx::query_scalar::<_, String>(
            "SELECT role FROM user_roles WHERE user_id = $1 ORDER BY role",
        )
        .bind(id)
        .fetch_all(db)
        .await?;
        Ok(roles)
    }

    pub async fn add_role(db: &PgPool, id: Uuid, role: &str) -> anyhow::Result<()> {
        sqlx::query("INSERT INTO user_roles (user_id, role) VALUES ($1, $2) ON CONFLICT DO NOTHING")
            .bind(id)
            .bind(role)
            .execute(db)
            .await?;
        Ok(())
    }
}
