use serde::Serialize;
use sqlx::FromRow;

/// Per-unit nutrition for one product.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub carbs: f64,
    pub protein: f64,
    pub fats: f64,
    pub sugar: f64,
    pub sodium: f64,
}

/// Whole kilocalories for the given macros, fractional part dropped.
pub fn calories_of(carbs: f64, protein: f64, fats: f64) -> i64 {
    (4.0 * carbs + 4.0 * protein + 9.0 * fats) as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn calories_drop_fraction() {
        assert_eq!(calories_of(10.0, 5.0, 2.0), 78);
        assert_eq!(calories_of(0.1, 0.1, 0.1), 1); // 1.7
        assert_eq!(calories_of(0.0, 0.0, 0.0), 0);
    }
}
