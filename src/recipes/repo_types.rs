use sqlx::FromRow;
use uuid::Uuid;

use crate::enums::Difficulty;
use crate::products::repo_types::calories_of;

#[derive(Debug, Clone, FromRow)]
pub struct RecipeRow {
    pub id: i32,
    pub name: String,
    pub time_to_finish: i32,
    pub difficulty: Difficulty,
    pub photo: String,
    pub description: Option<String>,
    pub notes_and_tips: Option<String>,
    pub user_id: Uuid,
    pub owner_is_admin: bool,
}

/// One (recipe, product) pair joined with the product's current macros.
#[derive(Debug, Clone, FromRow)]
pub struct RecipeProductRow {
    pub recipe_id: i32,
    pub product_id: i32,
    pub product_name: String,
    pub quantity: i32,
    pub carbs: f64,
    pub protein: f64,
    pub fats: f64,
}

impl RecipeProductRow {
    /// Calories of a single unit of the product.
    pub fn unit_calories(&self) -> i64 {
        calories_of(self.carbs, self.protein, self.fats)
    }
}
