use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::enums::Difficulty;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseSets {
    pub exercise_id: i32,
    pub sets: i32,
    pub repetitions: i32,
}

/// Body for workout create and update.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutRequest {
    pub name: String,
    pub time_to_finish: i32,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub photo: String,
    pub description: Option<String>,
    pub calories_burned: f64,
    #[serde(default)]
    pub exercises: Vec<ExerciseSets>,
}

impl WorkoutRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Workout name is required.".into());
        }
        if self.time_to_finish < 0 {
            return Err("Time to finish cannot be negative.".into());
        }
        if !self.calories_burned.is_finite() || self.calories_burned < 0.0 {
            return Err("Calories burned must be a non-negative number.".into());
        }
        if self.exercises.iter().any(|e| e.sets <= 0 || e.repetitions <= 0) {
            return Err("Sets and repetitions must be positive.".into());
        }
        let mut seen = HashSet::new();
        if let Some(dup) = self.exercises.iter().find(|e| !seen.insert(e.exercise_id)) {
            return Err(format!("Exercise {} is listed more than once.", dup.exercise_id));
        }
        Ok(())
    }

    pub fn exercise_ids(&self) -> Vec<i32> {
        self.exercises.iter().map(|e| e.exercise_id).collect()
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutExercise {
    pub exercise_id: i32,
    pub exercise_name: String,
    pub sets: i32,
    pub repetitions: i32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutListing {
    pub id: i32,
    pub name: String,
    pub time_to_finish: i32,
    pub difficulty: Difficulty,
    pub photo: String,
    pub calories_burned: f64,
    pub creator: String,
    pub is_mine: bool,
    pub exercises: Vec<WorkoutExercise>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutDetails {
    pub id: i32,
    pub name: String,
    pub time_to_finish: i32,
    pub difficulty: Difficulty,
    pub photo: String,
    pub description: Option<String>,
    pub calories_burned: f64,
    pub creator: String,
    pub is_mine: bool,
    pub exercises: Vec<WorkoutExercise>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn req() -> WorkoutRequest {
        WorkoutRequest {
            name: "Leg day".into(),
            time_to_finish: 45,
            difficulty: Difficulty::Hard,
            photo: String::new(),
            description: None,
            calories_burned: 350.0,
            exercises: vec![ExerciseSets {
                exercise_id: 1,
                sets: 4,
                repetitions: 10,
            }],
        }
    }

    #[test]
    fn accepts_plain_workout() {
        assert!(req().validate().is_ok());
    }

    #[test]
    fn rejects_bad_numbers() {
        let mut negative = req();
        negative.calories_burned = -5.0;
        assert!(negative.validate().is_err());

        let mut no_reps = req();
        no_reps.exercises[0].repetitions = 0;
        assert!(no_reps.validate().is_err());

        let mut dup = req();
        dup.exercises.push(dup.exercises[0].clone());
        assert!(dup.validate().is_err());
    }
}
