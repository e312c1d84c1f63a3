use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::enums::Difficulty;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductQuantity {
    pub product_id: i32,
    pub quantity: i32,
}

/// Body for recipe create and update.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeRequest {
    pub name: String,
    pub time_to_finish: i32,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub photo: String,
    pub description: Option<String>,
    pub notes_and_tips: Option<String>,
    #[serde(default)]
    pub products: Vec<ProductQuantity>,
}

impl RecipeRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Recipe name is required.".into());
        }
        if self.time_to_finish < 0 {
            return Err("Time to finish cannot be negative.".into());
        }
        if self.products.iter().any(|p| p.quantity <= 0) {
            return Err("Product quantities must be positive.".into());
        }
        let mut seen = HashSet::new();
        if let Some(dup) = self.products.iter().find(|p| !seen.insert(p.product_id)) {
            return Err(format!("Product {} is listed more than once.", dup.product_id));
        }
        Ok(())
    }

    pub fn product_ids(&self) -> Vec<i32> {
        self.products.iter().map(|p| p.product_id).collect()
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeProduct {
    pub product_id: i32,
    pub product_name: String,
    pub quantity: i32,
    pub calories: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeListing {
    pub id: i32,
    pub name: String,
    pub time_to_finish: i32,
    pub difficulty: Difficulty,
    pub photo: String,
    pub total_calories: i64,
    pub is_mine: bool,
    pub is_admin: bool,
    pub products: Vec<RecipeProduct>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeDetails {
    pub id: i32,
    pub name: String,
    pub time_to_finish: i32,
    pub difficulty: Difficulty,
    pub photo: String,
    pub description: Option<String>,
    pub notes_and_tips: Option<String>,
    pub total_calories: i64,
    pub is_mine: bool,
    pub products: Vec<RecipeProduct>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn req(products: Vec<(i32, i32)>) -> RecipeRequest {
        RecipeRequest {
            name: "Porridge".into(),
            time_to_finish: 10,
            difficulty: Difficulty::Easy,
            photo: String::new(),
            description: None,
            notes_and_tips: None,
            products: products
                .into_iter()
                .map(|(product_id, quantity)| ProductQuantity {
                    product_id,
                    quantity,
                })
                .collect(),
        }
    }

    #[test]
    fn accepts_recipe_without_products() {
        assert!(req(vec![]).validate().is_ok());
    }

    #[test]
    fn rejects_duplicate_and_non_positive_products() {
        assert!(req(vec![(1, 2), (1, 3)]).validate().is_err());
        assert!(req(vec![(1, 0)]).validate().is_err());
    }

    #[test]
    fn parses_client_body() {
        let body = r#"{"name":"Salad","timeToFinish":5,"difficulty":"Medium",
                       "products":[{"productId":3,"quantity":2}]}"#;
        let parsed: RecipeRequest = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.difficulty, Difficulty::Medium);
        assert_eq!(parsed.product_ids(), vec![3]);
        assert!(parsed.photo.is_empty());
    }
}
