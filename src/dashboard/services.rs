use std::collections::HashMap;

use sqlx::PgPool;
use time::{Date, Duration, OffsetDateTime, UtcOffset};
use tracing::{debug, warn};
use uuid::Uuid;

use super::dto::{DashboardInfo, LoggedRecipeSummary, LoggedWorkoutSummary};
use super::repo::{self, RecipeLogLine, WorkoutLogLine};
use crate::error::AppResult;
use crate::identity::repo_types::User;
use crate::identity::schedule::WorkoutSchedule;
use crate::products::repo_types::calories_of;

fn utc_date(t: OffsetDateTime) -> Date {
    t.to_offset(UtcOffset::UTC).date()
}

/// `[00:00, next 00:00)` of the UTC calendar day containing `now`.
pub(crate) fn utc_day_bounds(now: OffsetDateTime) -> (OffsetDateTime, OffsetDateTime) {
    let start = utc_date(now).midnight().assume_utc();
    (start, start + Duration::days(1))
}

#[derive(Default)]
struct Totals {
    sugar: f64,
    sodium: f64,
}

fn summarize_recipes(
    lines: Vec<RecipeLogLine>,
    today: Date,
) -> (Vec<LoggedRecipeSummary>, Totals) {
    let mut summaries: Vec<LoggedRecipeSummary> = Vec::new();
    let mut index: HashMap<(i32, OffsetDateTime), usize> = HashMap::new();
    let mut totals = Totals::default();

    for line in lines.into_iter().filter(|l| utc_date(l.date_logged) == today) {
        let slot = *index.entry((line.recipe_id, line.date_logged)).or_insert_with(|| {
            summaries.push(LoggedRecipeSummary {
                recipe_id: line.recipe_id,
                name: line.name.clone(),
                date_logged: line.date_logged,
                calories: 0,
                fats: 0.0,
                carbs: 0.0,
                protein: 0.0,
            });
            summaries.len() - 1
        });

        let Some(quantity) = line.quantity else {
            continue;
        };
        let carbs = line.carbs.unwrap_or_default();
        let protein = line.protein.unwrap_or_default();
        let fats = line.fats.unwrap_or_default();
        let q = f64::from(quantity);

        let summary = &mut summaries[slot];
        summary.calories += i64::from(quantity) * calories_of(carbs, protein, fats);
        summary.carbs += q * carbs;
        summary.protein += q * protein;
        summary.fats += q * fats;
        totals.sugar += q * line.sugar.unwrap_or_default();
        totals.sodium += q * line.sodium.unwrap_or_default();
    }
    (summaries, totals)
}

fn summarize_workouts(lines: Vec<WorkoutLogLine>, today: Date) -> Vec<LoggedWorkoutSummary> {
    lines
        .into_iter()
        .filter(|l| utc_date(l.date_logged) == today)
        .map(|l| LoggedWorkoutSummary {
            workout_id: l.workout_id,
            name: l.name,
            date_logged: l.date_logged,
            time_trained: i64::from(l.time_to_finish),
            calories_burned: l.calories_burned,
        })
        .collect()
}

/// Folds today's log lines into the dashboard. Lines from other UTC days are
/// ignored.
pub fn build_dashboard(
    user: &User,
    recipe_lines: Vec<RecipeLogLine>,
    workout_lines: Vec<WorkoutLogLine>,
    now: OffsetDateTime,
) -> DashboardInfo {
    let today = utc_date(now);
    let schedule = WorkoutSchedule::parse(&user.workout_schedule);
    let (logged_recipes, totals) = summarize_recipes(recipe_lines, today);
    let logged_workouts = summarize_workouts(workout_lines, today);

    DashboardInfo {
        is_success: true,
        error: None,
        is_rest_day: schedule.is_rest_day(today),
        target_calories: user.daily_calorie_goal,
        target_proteins: user.target_proteins,
        target_carbs: user.target_carbs,
        target_fats: user.target_fats,
        current_calories: logged_recipes.iter().map(|r| r.calories).sum(),
        current_proteins: logged_recipes.iter().map(|r| r.protein).sum(),
        current_carbs: logged_recipes.iter().map(|r| r.carbs).sum(),
        current_fats: logged_recipes.iter().map(|r| r.fats).sum(),
        current_sugars: totals.sugar,
        current_sodium: totals.sodium,
        burned_calories: logged_workouts.iter().map(|w| w.calories_burned).sum(),
        time_spent_training: logged_workouts.iter().map(|w| w.time_trained).sum(),
        logged_recipes,
        logged_workouts,
    }
}

/// Dashboard for `user_id` on the UTC day of `now`. An unknown user is not an
/// error; the result carries the message instead.
pub async fn dashboard_info(
    db: &PgPool,
    user_id: Uuid,
    now: OffsetDateTime,
) -> AppResult<DashboardInfo> {
    let Some(user) = User::find_by_id(db, user_id).await? else {
        warn!(%user_id, "dashboard requested for unknown user");
        return Ok(DashboardInfo::failed("Could not find user."));
    };

    let (from, to) = utc_day_bounds(now);
    let recipes = repo::recipe_lines(db, user_id, from, to).await?;
    let workouts = repo::workout_lines(db, user_id, from, to).await?;
    debug!(
        %user_id,
        recipe_lines = recipes.len(),
        workout_lines = workouts.len(),
        "dashboard loaded"
    );
    Ok(build_dashboard(&user, recipes, workouts, now))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::{Gender, TrainingType};
    use time::macros::datetime;

    fn user(schedule: &str) -> User {
        User {
            id: Uuid::new_v4(),
            email: "ann@example.com".into(),
            username: "ann".into(),
            password_hash: String::new(),
            height: 170.0,
            weight: 65.0,
            gender: Gender::Female,
            training_goal: TrainingType::MaintainWeight,
            daily_calorie_goal: 2000,
            target_proteins: 150,
            target_carbs: 250,
            target_fats: 44,
            workout_schedule: schedule.into(),
            created_at: datetime!(2024-01-01 00:00 UTC),
            deleted_at: None,
        }
    }

    /// A single product line; 1 unit of (carbs, protein, fats).
    fn line(
        recipe_id: i32,
        at: OffsetDateTime,
        quantity: i32,
        (carbs, protein, fats): (f64, f64, f64),
    ) -> RecipeLogLine {
        RecipeLogLine {
            recipe_id,
            name: format!("recipe {recipe_id}"),
            date_logged: at,
            quantity: Some(quantity),
            carbs: Some(carbs),
            protein: Some(protein),
            fats: Some(fats),
            sugar: Some(1.0),
            sodium: Some(0.5),
        }
    }

    // 300 kcal: 50*4 + 25*4 = 300
    const A: (f64, f64, f64) = (50.0, 25.0, 0.0);
    // 500 kcal: 100*4 + 25*4 = 500
    const B: (f64, f64, f64) = (100.0, 25.0, 0.0);

    #[test]
    fn totals_follow_each_logged_entry() {
        let now = datetime!(2024-03-05 18:00 UTC);
        let first = vec![
            line(1, datetime!(2024-03-05 08:00 UTC), 1, A),
            line(2, datetime!(2024-03-05 12:00 UTC), 1, B),
        ];
        let info = build_dashboard(&user("1,3,5"), first.clone(), vec![], now);
        assert!(info.is_success);
        assert_eq!(info.current_calories, 800);
        assert_eq!(info.logged_recipes.len(), 2);

        let mut second = first;
        second.push(line(1, datetime!(2024-03-05 17:00 UTC), 1, A));
        let info = build_dashboard(&user("1,3,5"), second, vec![], now);
        assert_eq!(info.current_calories, 1100);
        assert_eq!(info.logged_recipes.len(), 3);
    }

    #[test]
    fn multi_product_recipe_is_one_entry() {
        let at = datetime!(2024-03-05 08:00 UTC);
        let lines = vec![line(1, at, 2, A), line(1, at, 1, B)];
        let info = build_dashboard(&user(""), lines, vec![], datetime!(2024-03-05 09:00 UTC));
        assert_eq!(info.logged_recipes.len(), 1);
        assert_eq!(info.logged_recipes[0].calories, 2 * 300 + 500);
        assert_eq!(info.current_carbs, 200.0);
        assert_eq!(info.current_sugars, 3.0);
        assert_eq!(info.current_sodium, 1.5);
    }

    #[test]
    fn recipe_without_products_counts_as_zero() {
        let empty = RecipeLogLine {
            recipe_id: 4,
            name: "water".into(),
            date_logged: datetime!(2024-03-05 08:00 UTC),
            quantity: None,
            carbs: None,
            protein: None,
            fats: None,
            sugar: None,
            sodium: None,
        };
        let info = build_dashboard(&user(""), vec![empty], vec![], datetime!(2024-03-05 09:00 UTC));
        assert_eq!(info.logged_recipes.len(), 1);
        assert_eq!(info.current_calories, 0);
    }

    #[test]
    fn only_the_current_utc_day_counts() {
        let lines = vec![
            line(1, datetime!(2024-03-04 23:59 UTC), 1, A),
            line(2, datetime!(2024-03-05 00:01 UTC), 1, B),
        ];
        let info = build_dashboard(&user(""), lines, vec![], datetime!(2024-03-05 00:02 UTC));
        assert_eq!(info.current_calories, 500);
        assert_eq!(info.logged_recipes[0].recipe_id, 2);
    }

    #[test]
    fn current_product_data_drives_calories() {
        let at = datetime!(2024-03-05 08:00 UTC);
        let now = datetime!(2024-03-05 09:00 UTC);
        let before = build_dashboard(&user(""), vec![line(1, at, 1, A)], vec![], now);
        let after = build_dashboard(&user(""), vec![line(1, at, 1, (60.0, 25.0, 0.0))], vec![], now);
        assert_eq!(before.current_calories, 300);
        assert_eq!(after.current_calories, 340);
    }

    #[test]
    fn rest_day_follows_schedule() {
        // 2024-03-05 is a Tuesday, 2024-03-04 a Monday.
        let tuesday = build_dashboard(&user("1,3,5"), vec![], vec![], datetime!(2024-03-05 10:00 UTC));
        assert!(tuesday.is_rest_day);
        let monday = build_dashboard(&user("1,3,5"), vec![], vec![], datetime!(2024-03-04 10:00 UTC));
        assert!(!monday.is_rest_day);
        let garbage = build_dashboard(&user(",x,,"), vec![], vec![], datetime!(2024-03-04 10:00 UTC));
        assert!(garbage.is_rest_day);
    }

    #[test]
    fn targets_are_copied_and_workouts_summed() {
        let workouts = vec![
            WorkoutLogLine {
                workout_id: 1,
                name: "run".into(),
                date_logged: datetime!(2024-03-05 07:00 UTC),
                time_to_finish: 30,
                calories_burned: 250.5,
            },
            WorkoutLogLine {
                workout_id: 2,
                name: "lift".into(),
                date_logged: datetime!(2024-03-05 19:00 UTC),
                time_to_finish: 45,
                calories_burned: 300.0,
            },
        ];
        let info = build_dashboard(&user("2"), vec![], workouts, datetime!(2024-03-05 20:00 UTC));
        assert_eq!(info.target_calories, 2000);
        assert_eq!(info.target_proteins, 150);
        assert_eq!(info.target_fats, 44);
        assert_eq!(info.target_carbs, 250);
        assert_eq!(info.burned_calories, 550.5);
        assert_eq!(info.time_spent_training, 75);
        assert!(!info.is_rest_day);
    }

    #[test]
    fn missing_user_shape() {
        let info = DashboardInfo::failed("Could not find user.");
        assert!(!info.is_success);
        assert_eq!(info.current_calories, 0);
        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["error"], "Could not find user.");
        assert_eq!(json["isSuccess"], false);
    }

    #[test]
    fn day_bounds_cover_whole_utc_day() {
        let (from, to) = utc_day_bounds(datetime!(2024-03-05 13:45 +02:00));
        assert_eq!(from, datetime!(2024-03-05 00:00 UTC));
        assert_eq!(to, datetime!(2024-03-06 00:00 UTC));
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn dashboard_reads_todays_logs(pool: PgPool) {
        let user_id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO users (email, username, password_hash, training_goal, daily_calorie_goal,
                               target_proteins, target_carbs, target_fats, workout_schedule)
            VALUES ('bo@example.com', 'bo', 'x', 0, 2000, 150, 250, 44, '1,3,5')
            RETURNING id
            "#,
        )
        .fetch_one(&pool)
        .await
        .unwrap();
        let product_id = sqlx::query_scalar::<_, i32>(
            "INSERT INTO products (name, carbs, protein, fats) VALUES ('t', 50, 25, 0) RETURNING id",
        )
        .fetch_one(&pool)
        .await
        .unwrap();
        let recipe_id = sqlx::query_scalar::<_, i32>(
            "INSERT INTO recipes (name, time_to_finish, difficulty, user_id) VALUES ('t', 1, 0, $1) RETURNING id",
        )
        .bind(user_id)
        .fetch_one(&pool)
        .await
        .unwrap();
        sqlx::query("INSERT INTO product_recipes (recipe_id, product_id, quantity) VALUES ($1, $2, 2)")
            .bind(recipe_id)
            .bind(product_id)
            .execute(&pool)
            .await
            .unwrap();

        let now = datetime!(2024-03-05 12:00 UTC);
        for at in [datetime!(2024-03-05 08:00 UTC), datetime!(2024-03-04 08:00 UTC)] {
            sqlx::query("INSERT INTO user_recipes (user_id, recipe_id, date_logged) VALUES ($1, $2, $3)")
                .bind(user_id)
                .bind(recipe_id)
                .bind(at)
                .execute(&pool)
                .await
                .unwrap();
        }

        let info = dashboard_info(&pool, user_id, now).await.unwrap();
        assert!(info.is_success);
        assert_eq!(info.current_calories, 600);
        assert_eq!(info.logged_recipes.len(), 1);

        let missing = dashboard_info(&pool, Uuid::new_v4(), now).await.unwrap();
        assert_eq!(missing.error.as_deref(), Some("Could not find user."));
    }
}
