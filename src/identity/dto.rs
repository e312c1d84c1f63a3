use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::enums::{Gender, TrainingType};

/// Request body for user registration.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub user_name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub height: f64,
    #[serde(default)]
    pub weight: f64,
    #[serde(default)]
    pub gender: Gender,
    pub training_goal: TrainingType,
    pub daily_calorie_goal: i64,
    pub workout_schedule: Vec<String>,
}

/// Request body for login.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub user_name: String,
    pub password: String,
}

/// Request body for token refresh.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub id: Uuid,
    pub user_name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfoResponse {
    pub email: String,
    pub user_name: String,
    pub gender: Gender,
    pub height: f64,
    pub weight: f64,
    pub training_goal: TrainingType,
    pub workout_schedule: Vec<String>,
    pub daily_calorie_goal: i64,
    pub weekly_calorie_goal: i64,
    pub target_proteins: i64,
    pub target_carbs: i64,
    pub target_fats: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePersonalInfoRequest {
    pub email: String,
    pub user_name: String,
    #[serde(default)]
    pub height: f64,
    #[serde(default)]
    pub weight: f64,
    pub training_goal: TrainingType,
    pub daily_calorie_goal: i64,
    #[serde(default)]
    pub gender: Gender,
    pub workout_schedule: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub old_password: String,
    pub new_password: String,
}

/// Outcome of a profile or password change. On success carries a fresh token.
#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AccountUpdateResponse {
    pub is_success: bool,
    pub token: Option<String>,
    pub errors: Vec<String>,
}

impl AccountUpdateResponse {
    pub fn success(token: String) -> Self {
        Self {
            is_success: true,
            token: Some(token),
            errors: Vec::new(),
        }
    }

    pub fn failure(errors: Vec<String>) -> Self {
        Self {
            is_success: false,
            token: None,
            errors,
        }
    }
}
