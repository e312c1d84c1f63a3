use serde::Serialize;

/// Daily macro targets in grams derived from a calorie goal.
///
/// Split is 30% protein, 20% fat, 50% carbs, converted at 4/9/4 kcal per gram.
/// Each step truncates, so neighbouring goals can share targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MacroTargets {
    pub protein: i64,
    pub fat: i64,
    pub carbs: i64,
}

impl MacroTargets {
    pub fn from_daily_calories(goal: i64) -> Self {
        Self {
            protein: (goal * 3 / 10) / 4,
            fat: (goal * 2 / 10) / 9,
            carbs: (goal * 5 / 10) / 4,
        }
    }

    pub fn calories(&self) -> i64 {
        self.protein * 4 + self.fat * 9 + self.carbs * 4
    }
}

pub fn weekly_calorie_goal(daily: i64) -> i64 {
    daily * 7
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_thousand_kcal_split() {
        let t = MacroTargets::from_daily_calories(2000);
        assert_eq!(t.protein, 150);
        assert_eq!(t.fat, 44);
        assert_eq!(t.carbs, 250);
    }

    #[test]
    fn targets_stay_within_truncation_of_goal() {
        for goal in 0..=10_000 {
            let t = MacroTargets::from_daily_calories(goal);
            let gap = goal - t.calories();
            assert!((0..=17).contains(&gap), "goal {goal} gap {gap}");
        }
    }

    #[test]
    fn truncation_can_merge_neighbouring_goals() {
        assert_eq!(
            MacroTargets::from_daily_calories(3999).protein,
            MacroTargets::from_daily_calories(4000).protein - 1
        );
        assert_eq!(
            MacroTargets::from_daily_calories(4001).protein,
            MacroTargets::from_daily_calories(4000).protein
        );
    }

    #[test]
    fn weekly_is_seven_days() {
        assert_eq!(weekly_calorie_goal(1500), 10_500);
        assert_eq!(weekly_calorie_goal(0), 0);
    }
}
