use std::collections::BTreeSet;

use time::Date;

/// Training days as ISO weekday numbers, 1 = Monday .. 7 = Sunday.
///
/// Persisted comma-encoded (`"1,3,5"`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkoutSchedule(BTreeSet<u8>);

impl WorkoutSchedule {
    /// Lenient parse of the stored form: blank, non-numeric and out-of-range
    /// segments are skipped.
    pub fn parse(stored: &str) -> Self {
        let days = stored
            .split(',')
            .filter_map(|s| s.trim().parse::<u8>().ok())
            .filter(|d| (1..=7).contains(d))
            .collect();
        Self(days)
    }

    /// Strict parse of client input; every entry must be a weekday number.
    pub fn from_request(days: &[String]) -> Result<Self, String> {
        let mut set = BTreeSet::new();
        for raw in days {
            match raw.trim().parse::<u8>() {
                Ok(d) if (1..=7).contains(&d) => {
                    set.insert(d);
                }
                _ => return Err(format!("Invalid workout day '{}'.", raw)),
            }
        }
        Ok(Self(set))
    }

    pub fn encode(&self) -> String {
        self.0
            .iter()
            .map(|d| d.to_string())
            .collect::<Vec<_>>()
            .join(",")
    }

    pub fn days(&self) -> Vec<String> {
        self.0.iter().map(|d| d.to_string()).collect()
    }

    pub fn contains(&self, weekday: u8) -> bool {
        self.0.contains(&weekday)
    }

    pub fn is_rest_day(&self, date: Date) -> bool {
        !self.contains(date.weekday().number_from_monday())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn mon_wed_fri_schedule() {
        let s = WorkoutSchedule::parse("1,3,5");
        // 2024-01-01 is a Monday.
        assert!(!s.is_rest_day(date!(2024 - 01 - 01)));
        assert!(s.is_rest_day(date!(2024 - 01 - 02)));
        assert!(!s.is_rest_day(date!(2024 - 01 - 03)));
    }

    #[test]
    fn sunday_is_seven() {
        let s = WorkoutSchedule::parse("7");
        assert!(!s.is_rest_day(date!(2024 - 01 - 07)));
        assert!(s.is_rest_day(date!(2024 - 01 - 06)));
    }

    #[test]
    fn empty_schedule_means_every_day_is_rest() {
        let s = WorkoutSchedule::parse("");
        assert!(s.is_rest_day(date!(2024 - 01 - 01)));
        assert_eq!(s.encode(), "");
    }

    #[test]
    fn lenient_parse_skips_garbage() {
        let s = WorkoutSchedule::parse("1,,x, 3,9");
        assert_eq!(s.encode(), "1,3");
    }

    #[test]
    fn strict_parse_rejects_bad_days() {
        let ok = WorkoutSchedule::from_request(&["5".into(), "1".into(), "1".into()]).unwrap();
        assert_eq!(ok.encode(), "1,5");
        assert_eq!(ok.days(), vec!["1".to_string(), "5".to_string()]);
        assert!(WorkoutSchedule::from_request(&["0".into()]).is_err());
        assert!(WorkoutSchedule::from_request(&["Mon".into()]).is_err());
    }
}
