use sqlx::FromRow;
use uuid::Uuid;

use crate::enums::Difficulty;

#[derive(Debug, Clone, FromRow)]
pub struct WorkoutRow {
    pub id: i32,
    pub name: String,
    pub time_to_finish: i32,
    pub difficulty: Difficulty,
    pub photo: String,
    pub description: Option<String>,
    pub calories_burned: f64,
    pub user_id: Uuid,
    pub creator: String,
}

#[derive(Debug, Clone, FromRow)]
pub struct WorkoutExerciseRow {
    pub workout_id: i32,
    pub exercise_id: i32,
    pub exercise_name: String,
    pub sets: i32,
    pub repetitions: i32,
}
