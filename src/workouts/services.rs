use std::collections::HashMap;

use sqlx::PgPool;
use time::OffsetDateTime;
use tracing::{info, warn};
use uuid::Uuid;

use super::dto::{ExerciseSets, WorkoutDetails, WorkoutExercise, WorkoutListing, WorkoutRequest};
use super::repo;
use super::repo_types::{WorkoutExerciseRow, WorkoutRow};
use crate::error::{AppError, AppResult};
use crate::exercises;

pub(crate) const NOT_FOUND: &str = "Workout Not Found.";

/// Changes needed to turn a workout's stored exercise set into the requested one.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ExerciseDiff {
    pub remove: Vec<i32>,
    pub upsert: Vec<(i32, i32, i32)>,
}

impl ExerciseDiff {
    pub fn between(existing: &[(i32, i32, i32)], wanted: &[ExerciseSets]) -> Self {
        let current: HashMap<i32, (i32, i32)> =
            existing.iter().map(|&(id, s, r)| (id, (s, r))).collect();
        let mut remove: Vec<i32> = existing
            .iter()
            .map(|(id, _, _)| *id)
            .filter(|id| !wanted.iter().any(|w| w.exercise_id == *id))
            .collect();
        remove.sort_unstable();
        let upsert = wanted
            .iter()
            .filter(|w| current.get(&w.exercise_id) != Some(&(w.sets, w.repetitions)))
            .map(|w| (w.exercise_id, w.sets, w.repetitions))
            .collect();
        Self { remove, upsert }
    }
}

fn to_exercises(rows: Vec<WorkoutExerciseRow>) -> HashMap<i32, Vec<WorkoutExercise>> {
    let mut by_workout: HashMap<i32, Vec<WorkoutExercise>> = HashMap::new();
    for row in rows {
        by_workout.entry(row.workout_id).or_default().push(WorkoutExercise {
            exercise_id: row.exercise_id,
            exercise_name: row.exercise_name,
            sets: row.sets,
            repetitions: row.repetitions,
        });
    }
    by_workout
}

pub(crate) fn build_listings(
    workouts: Vec<WorkoutRow>,
    exercise_rows: Vec<WorkoutExerciseRow>,
    viewer: Option<Uuid>,
) -> Vec<WorkoutListing> {
    let mut exercises = to_exercises(exercise_rows);
    workouts
        .into_iter()
        .map(|w| WorkoutListing {
            exercises: exercises.remove(&w.id).unwrap_or_default(),
            is_mine: viewer == Some(w.user_id),
            id: w.id,
            name: w.name,
            time_to_finish: w.time_to_finish,
            difficulty: w.difficulty,
            photo: w.photo,
            calories_burned: w.calories_burned,
            creator: w.creator,
        })
        .collect()
}

async fn check_exercises(db: &PgPool, req: &WorkoutRequest) -> AppResult<()> {
    req.validate().map_err(|e| {
        warn!(error = %e, "workout rejected");
        AppError::Validation(e)
    })?;
    let missing = exercises::repo::missing_ids(db, &req.exercise_ids()).await?;
    if !missing.is_empty() {
        warn!(?missing, "workout references unknown exercises");
        return Err(AppError::validation(format!("Unknown exercises: {:?}", missing)));
    }
    Ok(())
}

pub async fn list_all(db: &PgPool, viewer: Option<Uuid>) -> AppResult<Vec<WorkoutListing>> {
    let workouts = repo::list(db).await?;
    let ids: Vec<i32> = workouts.iter().map(|w| w.id).collect();
    let rows = repo::exercises_for(db, &ids).await?;
    Ok(build_listings(workouts, rows, viewer))
}

pub async fn details(db: &PgPool, id: i32, viewer: Option<Uuid>) -> AppResult<WorkoutDetails> {
    let w = repo::find(db, id)
        .await?
        .ok_or_else(|| AppError::not_found(NOT_FOUND))?;
    let exercises = to_exercises(repo::exercises_for(db, &[id]).await?)
        .remove(&id)
        .unwrap_or_default();
    Ok(WorkoutDetails {
        is_mine: viewer == Some(w.user_id),
        id: w.id,
        name: w.name,
        time_to_finish: w.time_to_finish,
        difficulty: w.difficulty,
        photo: w.photo,
        description: w.description,
        calories_burned: w.calories_burned,
        creator: w.creator,
        exercises,
    })
}

pub async fn create(db: &PgPool, owner: Uuid, req: WorkoutRequest) -> AppResult<i32> {
    check_exercises(db, &req).await?;
    let id = repo::create(db, owner, &req).await?;
    info!(workout_id = id, %owner, "workout created");
    Ok(id)
}

// Any authenticated user may edit or delete any workout.
pub async fn update(
    db: &PgPool,
    id: i32,
    user_id: Uuid,
    req: WorkoutRequest,
    now: OffsetDateTime,
) -> AppResult<()> {
    check_exercises(db, &req).await?;
    if !repo::update(db, id, &req, now).await? {
        return Err(AppError::not_found(NOT_FOUND));
    }
    info!(workout_id = id, %user_id, "workout updated");
    Ok(())
}

pub async fn delete(db: &PgPool, id: i32, user_id: Uuid, now: OffsetDateTime) -> AppResult<()> {
    if !repo::soft_delete(db, id, user_id, now).await? {
        return Err(AppError::not_found(NOT_FOUND));
    }
    info!(workout_id = id, %user_id, "workout deleted");
    Ok(())
}
