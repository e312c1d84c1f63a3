use serde::Serialize;
use time::OffsetDateTime;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggedRecipeSummary {
    pub recipe_id: i32,
    pub name: String,
    #[serde(with = "time::serde::rfc3339")]
    pub date_logged: OffsetDateTime,
    pub calories: i64,
    pub fats: f64,
    pub carbs: f64,
    pub protein: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggedWorkoutSummary {
    pub workout_id: i32,
    pub name: String,
    #[serde(with = "time::serde::rfc3339")]
    pub date_logged: OffsetDateTime,
    pub time_trained: i64,
    pub calories_burned: f64,
}

/// Everything the home screen shows for one user and one UTC day.
///
/// A missing user yields the default value with `error` set and
/// `is_success == false`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardInfo {
    pub is_success: bool,
    pub error: Option<String>,
    pub is_rest_day: bool,
    pub target_calories: i64,
    pub target_proteins: i64,
    pub target_carbs: i64,
    pub target_fats: i64,
    pub current_calories: i64,
    pub current_proteins: f64,
    pub current_carbs: f64,
    pub current_fats: f64,
    pub current_sugars: f64,
    pub current_sodium: f64,
    pub burned_calories: f64,
    pub time_spent_training: i64,
    pub logged_recipes: Vec<LoggedRecipeSummary>,
    pub logged_workouts: Vec<LoggedWorkoutSummary>,
}

impl DashboardInfo {
    pub fn failed(msg: impl Into<String>) -> Self {
        Self {
            error: Some(msg.into()),
            ..Self::default()
        }
    }
}
