use serde::{Deserialize, Serialize};

/// How hard a recipe or workout is. Stored as its integer discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[repr(i32)]
pub enum Difficulty {
    Easy = 0,
    Medium = 1,
    Hard = 2,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[repr(i32)]
pub enum Gender {
    #[default]
    Male = 0,
    Female = 1,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[repr(i32)]
pub enum TrainingType {
    BurnFat = 0,
    MaintainWeight = 1,
    BuildMuscle = 2,
}
