use serde::Serialize;
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::enums::{Gender, TrainingType};

/// User record in the database.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String, // Argon2 hash, not exposed in JSON
    pub height: f64,
    pub weight: f64,
    pub gender: Gender,
    pub training_goal: TrainingType,
    pub daily_calorie_goal: i64,
    pub target_proteins: i64,
    pub target_carbs: i64,
    pub target_fats: i64,
    pub workout_schedule: String, // comma-encoded weekday numbers
    pub created_at: OffsetDateTime,
    pub deleted_at: Option<OffsetDateTime>,
}

/// Fields written when a user is created.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub username: String,
    pub password_hash: String,
    pub height: f64,
    pub weight: f64,
    pub gender: Gender,
    pub training_goal: TrainingType,
    pub daily_calorie_goal: i64,
    pub workout_schedule: String,
}

/// Profile fields a user may change about themselves.
#[derive(Debug, Clone)]
pub struct ProfileUpdate {
    pub email: String,
    pub username: String,
    pub height: f64,
    pub weight: f64,
    pub gender: Gender,
    pub training_goal: TrainingType,
    pub daily_calorie_goal: i64,
    pub target_proteins: i64,
    pub target_carbs: i64,
    pub target_fats: i64,
    pub workout_schedule: String,
}
