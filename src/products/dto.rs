use serde::{Deserialize, Serialize};

/// Body for product create and update.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRequest {
    pub name: String,
    pub carbs: f64,
    pub fats: f64,
    pub protein: f64,
    #[serde(default)]
    pub sodium: f64,
    #[serde(default)]
    pub sugar: f64,
}

impl ProductRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Product name is required.".into());
        }
        let values = [self.carbs, self.fats, self.protein, self.sodium, self.sugar];
        if values.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err("Nutrition values must be non-negative numbers.".into());
        }
        Ok(())
    }
}

#[derive(Debug, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct NameListing {
    pub id: i32,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn req() -> ProductRequest {
        ProductRequest {
            name: "Oats".into(),
            carbs: 66.0,
            fats: 7.0,
            protein: 17.0,
            sodium: 2.0,
            sugar: 1.0,
        }
    }

    #[test]
    fn accepts_plain_product() {
        assert!(req().validate().is_ok());
    }

    #[test]
    fn rejects_blank_name_and_negative_values() {
        let mut blank = req();
        blank.name = "  ".into();
        assert!(blank.validate().is_err());

        let mut negative = req();
        negative.fats = -1.0;
        assert!(negative.validate().is_err());
    }
}
