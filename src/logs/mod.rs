//! Log entries: "this user consumed this recipe / performed this workout at
//! this instant". Rows are insert-only and soft-deleted; the exact logged
//! timestamp is part of the key.

pub mod dto;
pub mod repo;
pub mod services;

pub use dto::{AddToUserResponse, LoggedItem};

/// Which of the two log tables an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogKind {
    Recipe,
    Workout,
}

impl LogKind {
    pub(crate) fn log_table(self) -> &'static str {
        match self {
            LogKind::Recipe => "user_recipes",
            LogKind::Workout => "user_workouts",
        }
    }

    pub(crate) fn item_table(self) -> &'static str {
        match self {
            LogKind::Recipe => "recipes",
            LogKind::Workout => "workouts",
        }
    }

    pub(crate) fn item_column(self) -> &'static str {
        match self {
            LogKind::Recipe => "recipe_id",
            LogKind::Workout => "workout_id",
        }
    }

    pub fn item_not_found(self) -> &'static str {
        match self {
            LogKind::Recipe => "Recipe Not Found.",
            LogKind::Workout => "Workout Not Found.",
        }
    }

    pub fn log_not_found(self) -> &'static str {
        match self {
            LogKind::Recipe => "Recipe log Not Found.",
            LogKind::Workout => "Workout log Not Found.",
        }
    }
}
