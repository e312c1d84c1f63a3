use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToUserRequest {
    pub id: i32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToUserResponse {
    pub is_success: bool,
    pub error: Option<String>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub date_logged: Option<OffsetDateTime>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteRecipeLogRequest {
    pub recipe_id: i32,
    #[serde(with = "time::serde::rfc3339")]
    pub date_logged: OffsetDateTime,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteWorkoutLogRequest {
    pub workout_id: i32,
    #[serde(with = "time::serde::rfc3339")]
    pub date_logged: OffsetDateTime,
}

/// One live log entry as listed back to its owner.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct LoggedItem {
    pub item_id: i32,
    pub name: String,
    #[serde(with = "time::serde::rfc3339")]
    pub date_logged: OffsetDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn delete_request_keeps_sub_second_precision() {
        let body = r#"{"recipeId":7,"dateLogged":"2024-03-05T23:59:58.123456Z"}"#;
        let req: DeleteRecipeLogRequest = serde_json::from_str(body).unwrap();
        assert_eq!(req.recipe_id, 7);
        assert_eq!(req.date_logged, datetime!(2024-03-05 23:59:58.123456 UTC));
    }

    #[test]
    fn add_response_echoes_timestamp() {
        let resp = AddToUserResponse {
            is_success: true,
            error: None,
            date_logged: Some(datetime!(2024-03-05 08:00:00.5 UTC)),
        };
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("\"dateLogged\":\"2024-03-05T08:00:00.5Z\""));
    }
}
