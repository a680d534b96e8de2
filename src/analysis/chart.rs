use std::collections::{BTreeMap, BTreeSet};

use crate::tracker::storage::entities::ProjectMapping;

/// Days with more hours than this are considered overtime.
pub const DEFAULT_OVERTIME_THRESHOLD: f64 = 8.;

/// Total hours of every project on a single date.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyPoint {
    pub date: String,
    pub total_hours: f64,
}

/// One point for each date that has an entry in any project, sorted by date.
pub fn daily_totals(projects: &ProjectMapping) -> Vec<DailyPoint> {
    let mut totals = BTreeMap::<&str, f64>::new();
    for record in projects.values() {
        for (date, hours) in &record.hours {
            *totals.entry(date.as_str()).or_insert(0.) += hours;
        }
    }

    totals
        .into_iter()
        .map(|(date, total_hours)| DailyPoint {
            date: date.to_string(),
            total_hours,
        })
        .collect()
}

/// Dates whose total is strictly above `threshold`.
pub fn flag_overtime(series: &[DailyPoint], threshold: f64) -> BTreeSet<String> {
    series
        .iter()
        .filter(|v| v.total_hours > threshold)
        .map(|v| v.date.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use crate::tracker::store::ProjectStore;

    use super::*;

    fn date(value: &str) -> NaiveDate {
        NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap()
    }

    fn point(date: &str, total_hours: f64) -> DailyPoint {
        DailyPoint {
            date: date.into(),
            total_hours,
        }
    }

    #[test]
    fn test_daily_totals_single_project() {
        let mut store = ProjectStore::default();
        store.add_hours("Acme", date("2024-01-09"), 3.).unwrap();
        store.add_hours("Acme", date("2024-01-08"), 10.).unwrap();

        let series = daily_totals(store.projects());

        assert_eq!(series, [point("2024-01-08", 10.), point("2024-01-09", 3.)]);
        assert_eq!(
            flag_overtime(&series, DEFAULT_OVERTIME_THRESHOLD),
            BTreeSet::from(["2024-01-08".to_string()])
        );
    }

    #[test]
    fn test_daily_totals_sum_across_projects() {
        let mut store = ProjectStore::default();
        store.add_hours("Acme", date("2024-02-01"), 5.).unwrap();
        store.add_hours("Beta", date("2024-02-01"), 3.).unwrap();
        store.add_hours("Beta", date("2023-12-31"), 2.).unwrap();
        store.add_hours("Gamma", date("2024-02-01"), 1.).unwrap();

        let series = daily_totals(store.projects());

        assert_eq!(series, [point("2023-12-31", 2.), point("2024-02-01", 9.)]);
    }

    #[test]
    fn test_flag_overtime_is_strict() {
        let series = [
            point("2024-01-01", 8.),
            point("2024-01-02", 8.5),
            point("2024-01-03", 0.),
        ];

        assert_eq!(
            flag_overtime(&series, DEFAULT_OVERTIME_THRESHOLD),
            BTreeSet::from(["2024-01-02".to_string()])
        );
        assert_eq!(flag_overtime(&series, 7.).len(), 2);
    }

    #[test]
    fn test_daily_totals_empty() {
        assert!(daily_totals(ProjectStore::default().projects()).is_empty());
        assert!(flag_overtime(&[], DEFAULT_OVERTIME_THRESHOLD).is_empty());
    }
}
