use axum::extract::FromRef;
use lazy_static::lazy_static;
use regex::Regex;
use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;

use super::dto::{
    AccountUpdateResponse, ChangePasswordRequest, PersonalInfoResponse, RegisterRequest,
    UpdatePersonalInfoRequest,
};
use super::repo_types::{NewUser, ProfileUpdate, User};
use super::schedule::WorkoutSchedule;
use super::targets::{weekly_calorie_goal, MacroTargets};
use crate::auth::claims::ADMIN_ROLE;
use crate::auth::password::{hash_password, password_errors, verify_password};
use crate::auth::{JwtKeys, TokenPair};
use crate::config::SeedAdminConfig;
use crate::enums::{Gender, TrainingType};
use crate::error::{AppError, AppResult};
use crate::state::AppState;

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

fn profile_errors(email: &str, username: &str, daily_calorie_goal: i64) -> Vec<String> {
    let mut errors = Vec::new();
    if username.trim().is_empty() {
        errors.push("User name is required.".to_string());
    }
    if !is_valid_email(email) {
        errors.push(format!("Email '{}' is invalid.", email));
    }
    if daily_calorie_goal <= 0 {
        errors.push("Daily calorie goal must be positive.".to_string());
    }
    errors
}

/// Validates a registration and builds the row to insert (minus the hash).
pub(crate) fn registration_draft(req: &RegisterRequest) -> Result<NewUser, Vec<String>> {
    let email = req.email.trim().to_lowercase();
    let username = req.user_name.trim().to_string();
    let mut errors = profile_errors(&email, &username, req.daily_calorie_goal);
    errors.extend(password_errors(&req.password));
    let schedule = match WorkoutSchedule::from_request(&req.workout_schedule) {
        Ok(s) => Some(s),
        Err(e) => {
            errors.push(e);
            None
        }
    };
    if !errors.is_empty() {
        return Err(errors);
    }
    Ok(NewUser {
        email,
        username,
        password_hash: String::new(),
        height: req.height,
        weight: req.weight,
        gender: req.gender,
        training_goal: req.training_goal,
        daily_calorie_goal: req.daily_calorie_goal,
        workout_schedule: schedule.map(|s| s.encode()).unwrap_or_default(),
    })
}

/// Applies a personal-info request to the stored user. Targets are recomputed
/// only when the calorie goal actually changes.
pub(crate) fn profile_update(
    user: &User,
    req: &UpdatePersonalInfoRequest,
) -> Result<ProfileUpdate, Vec<String>> {
    let email = req.email.trim().to_lowercase();
    let username = req.user_name.trim().to_string();
    let mut errors = profile_errors(&email, &username, req.daily_calorie_goal);
    let schedule = match WorkoutSchedule::from_request(&req.workout_schedule) {
        Ok(s) => Some(s),
        Err(e) => {
            errors.push(e);
            None
        }
    };
    if !errors.is_empty() {
        return Err(errors);
    }

    let (target_proteins, target_carbs, target_fats) =
        if user.daily_calorie_goal != req.daily_calorie_goal {
            let t = MacroTargets::from_daily_calories(req.daily_calorie_goal);
            (t.protein, t.carbs, t.fat)
        } else {
            (user.target_proteins, user.target_carbs, user.target_fats)
        };

    Ok(ProfileUpdate {
        email,
        username,
        height: req.height,
        weight: req.weight,
        gender: req.gender,
        training_goal: req.training_goal,
        daily_calorie_goal: req.daily_calorie_goal,
        target_proteins,
        target_carbs,
        target_fats,
        workout_schedule: schedule.map(|s| s.encode()).unwrap_or_default(),
    })
}

pub(crate) fn personal_info(user: &User) -> PersonalInfoResponse {
    PersonalInfoResponse {
        email: user.email.clone(),
        user_name: user.username.clone(),
        gender: user.gender,
        height: user.height,
        weight: user.weight,
        training_goal: user.training_goal,
        workout_schedule: WorkoutSchedule::parse(&user.workout_schedule).days(),
        daily_calorie_goal: user.daily_calorie_goal,
        weekly_calorie_goal: weekly_calorie_goal(user.daily_calorie_goal),
        target_proteins: user.target_proteins,
        target_carbs: user.target_carbs,
        target_fats: user.target_fats,
    }
}

async fn issue_tokens(state: &AppState, user: &User) -> AppResult<TokenPair> {
    let roles = User::roles(&state.db, user.id).await?;
    let keys = JwtKeys::from_ref(state);
    Ok(keys.sign_pair(user.id, &user.username, &roles)?)
}

pub async fn register(state: &AppState, req: RegisterRequest) -> AppResult<User> {
    let mut new = registration_draft(&req).map_err(|errors| {
        warn!(?errors, "registration rejected");
        AppError::Validation(errors.join(" "))
    })?;

    let (email_taken, username_taken) =
        User::identity_taken(&state.db, &new.email, &new.username, None).await?;
    if email_taken {
        return Err(AppError::Conflict(format!("Email '{}' is already taken.", new.email)));
    }
    if username_taken {
        return Err(AppError::Conflict(format!(
            "User name '{}' is already taken.",
            new.username
        )));
    }

    new.password_hash = hash_password(&req.password)?;
    let user = User::create(&state.db, &new).await?;
    info!(user_id = %user.id, username = %user.username, "user registered");
    Ok(user)
}

pub async fn login(state: &AppState, username: &str, password: &str) -> AppResult<TokenPair> {
    let user = match User::find_by_username(&state.db, username.trim()).await? {
        Some(u) => u,
        None => {
            warn!(username = %username, "login unknown user");
            return Err(AppError::Unauthorized("Invalid credentials".into()));
        }
    };

    if !verify_password(password, &user.password_hash)? {
        warn!(user_id = %user.id, "login invalid password");
        return Err(AppError::Unauthorized("Invalid credentials".into()));
    }

    let tokens = issue_tokens(state, &user).await?;
    info!(user_id = %user.id, "user logged in");
    Ok(tokens)
}

pub async fn refresh(state: &AppState, refresh_token: &str) -> AppResult<TokenPair> {
    let keys = JwtKeys::from_ref(state);
    let claims = keys
        .verify_refresh(refresh_token)
        .map_err(|e| AppError::Unauthorized(e.to_string()))?;
    let user = User::find_by_id(&state.db, claims.sub)
        .await?
        .ok_or_else(|| AppError::Unauthorized("User not found".into()))?;
    issue_tokens(state, &user).await
}

pub async fn get_personal_info(db: &PgPool, user_id: Uuid) -> AppResult<PersonalInfoResponse> {
    let user = User::find_by_id(db, user_id)
        .await?
        .ok_or_else(|| AppError::not_found("Could not find user."))?;
    Ok(personal_info(&user))
}

pub async fn update_personal_info(
    state: &AppState,
    user_id: Uuid,
    req: UpdatePersonalInfoRequest,
) -> AppResult<AccountUpdateResponse> {
    let Some(user) = User::find_by_id(&state.db, user_id).await? else {
        return Ok(AccountUpdateResponse::failure(vec!["Could not find user.".into()]));
    };

    let update = match profile_update(&user, &req) {
        Ok(u) => u,
        Err(errors) => {
            warn!(user_id = %user_id, ?errors, "personal info update rejected");
            return Ok(AccountUpdateResponse::failure(errors));
        }
    };

    let (email_taken, username_taken) =
        User::identity_taken(&state.db, &update.email, &update.username, Some(user_id)).await?;
    let mut errors = Vec::new();
    if email_taken {
        errors.push(format!("Email '{}' is already taken.", update.email));
    }
    if username_taken {
        errors.push(format!("User name '{}' is already taken.", update.username));
    }
    if !errors.is_empty() {
        return Ok(AccountUpdateResponse::failure(errors));
    }

    let goal_changed = user.daily_calorie_goal != update.daily_calorie_goal;
    let user = User::update_profile(&state.db, user_id, &update).await?;
    info!(user_id = %user_id, goal_changed, "personal info updated");

    let tokens = issue_tokens(state, &user).await?;
    Ok(AccountUpdateResponse::success(tokens.token))
}

pub async fn change_password(
    state: &AppState,
    user_id: Uuid,
    req: ChangePasswordRequest,
) -> AppResult<AccountUpdateResponse> {
    let Some(user) = User::find_by_id(&state.db, user_id).await? else {
        return Ok(AccountUpdateResponse::failure(vec!["Could not find user.".into()]));
    };

    if !verify_password(&req.old_password, &user.password_hash)? {
        warn!(user_id = %user_id, "change password with wrong old password");
        return Ok(AccountUpdateResponse::failure(vec!["Incorrect password.".into()]));
    }
    let errors = password_errors(&req.new_password);
    if !errors.is_empty() {
        return Ok(AccountUpdateResponse::failure(errors));
    }

    let hash = hash_password(&req.new_password)?;
    User::set_password_hash(&state.db, user_id, &hash).await?;
    info!(user_id = %user_id, "password changed");

    let tokens = issue_tokens(state, &user).await?;
    Ok(AccountUpdateResponse::success(tokens.token))
}

/// Creates the configured admin account when it does not exist yet.
pub async fn seed_admin(db: &PgPool, seed: &SeedAdminConfig) -> anyhow::Result<()> {
    let email = seed.email.trim().to_lowercase();
    if User::find_by_email(db, &email).await?.is_some() {
        return Ok(());
    }
    let user = User::create(
        db,
        &NewUser {
            email,
            username: seed.username.clone(),
            password_hash: hash_password(&seed.password)?,
            height: 180.0,
            weight: 100.0,
            gender: Gender::Male,
            training_goal: TrainingType::BurnFat,
            daily_calorie_goal: 1500,
            workout_schedule: "1,3,5".into(),
        },
    )
    .await?;
    User::add_role(db, user.id, ADMIN_ROLE).await?;
    info!(user_id = %user.id, "admin user seeded");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::OffsetDateTime;

    fn register_req() -> RegisterRequest {
        RegisterRequest {
            user_name: " lifter ".into(),
            email: "Lifter@Example.com".into(),
            password: "barbell1".into(),
            height: 180.0,
            weight: 82.5,
            gender: Gender::Female,
            training_goal: TrainingType::BuildMuscle,
            daily_calorie_goal: 2000,
            workout_schedule: vec!["5".into(), "1".into(), "3".into()],
        }
    }

    fn stored_user(goal: i64) -> User {
        let t = MacroTargets::from_daily_calories(goal);
        User {
            id: Uuid::new_v4(),
            email: "lifter@example.com".into(),
            username: "lifter".into(),
            password_hash: String::new(),
            height: 180.0,
            weight: 82.5,
            gender: Gender::Male,
            training_goal: TrainingType::BurnFat,
            daily_calorie_goal: goal,
            target_proteins: t.protein,
            target_carbs: t.carbs,
            target_fats: t.fat,
            workout_schedule: "1,3,5".into(),
            created_at: OffsetDateTime::now_utc(),
            deleted_at: None,
        }
    }

    fn update_req(goal: i64) -> UpdatePersonalInfoRequest {
        UpdatePersonalInfoRequest {
            email: "lifter@example.com".into(),
            user_name: "lifter".into(),
            height: 181.0,
            weight: 80.0,
            training_goal: TrainingType::MaintainWeight,
            daily_calorie_goal: goal,
            gender: Gender::Male,
            workout_schedule: vec!["2".into(), "4".into()],
        }
    }

    #[test]
    fn email_validation() {
        assert!(is_valid_email("a@b.co"));
        assert!(!is_valid_email("no-at-sign"));
        assert!(!is_valid_email("spaces @x.com"));
    }

    #[test]
    fn registration_normalizes_identity_and_schedule() {
        let draft = registration_draft(&register_req()).expect("valid");
        assert_eq!(draft.email, "lifter@example.com");
        assert_eq!(draft.username, "lifter");
        assert_eq!(draft.workout_schedule, "1,3,5");
    }

    #[test]
    fn registration_collects_every_error() {
        let mut req = register_req();
        req.email = "nope".into();
        req.password = "123".into();
        req.daily_calorie_goal = 0;
        req.workout_schedule = vec!["8".into()];
        let errors = registration_draft(&req).unwrap_err();
        assert_eq!(errors.len(), 4);
    }

    #[test]
    fn unchanged_goal_keeps_stored_targets() {
        let mut user = stored_user(2000);
        // Stored targets that no longer match the formula must survive untouched.
        user.target_proteins = 1;
        let update = profile_update(&user, &update_req(2000)).expect("valid");
        assert_eq!(update.target_proteins, 1);
        assert_eq!(update.workout_schedule, "2,4");
    }

    #[test]
    fn changed_goal_recomputes_targets() {
        let user = stored_user(2000);
        let update = profile_update(&user, &update_req(2500)).expect("valid");
        let expected = MacroTargets::from_daily_calories(2500);
        assert_eq!(update.target_proteins, expected.protein);
        assert_eq!(update.target_carbs, expected.carbs);
        assert_eq!(update.target_fats, expected.fat);
    }

    #[test]
    fn personal_info_reports_weekly_goal() {
        let info = personal_info(&stored_user(1800));
        assert_eq!(info.weekly_calorie_goal, 1800 * 7);
        assert_eq!(info.workout_schedule, vec!["1", "3", "5"]);
        let json = serde_json::to_string(&info).unwrap();
        assert!(json.contains("\"weeklyCalorieGoal\":12600"));
    }
}
