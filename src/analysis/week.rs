use std::{collections::BTreeMap, collections::BTreeSet, fmt::Display, str::FromStr};

use chrono::{Datelike, NaiveDate, Weekday};
use indexmap::IndexMap;
use tracing::warn;

use crate::{
    tracker::{error::TrackerError, storage::entities::ProjectMapping},
    utils::time::{date_to_record_name, record_name_to_date},
};

const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// ISO 8601 week, Monday to Sunday. Formatted as `YYYY-Www`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WeekId {
    year: i32,
    week: u32,
}

impl WeekId {
    /// Returns None for weeks that don't exist, for example week 53 of a 52 week year, and for
    /// weeks that run past the dates chrono can represent.
    pub fn new_opt(year: i32, week: u32) -> Option<Self> {
        NaiveDate::from_isoywd_opt(year, week, Weekday::Mon)
            .and(NaiveDate::from_isoywd_opt(year, week, Weekday::Sun))
            .map(|_| Self { year, week })
    }

    pub fn of(date: NaiveDate) -> Self {
        let iso = date.iso_week();
        Self {
            year: iso.year(),
            week: iso.week(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn week(&self) -> u32 {
        self.week
    }

    /// Monday and Sunday of the week, both inclusive. A week built with [WeekId::of] around
    /// [NaiveDate::MIN] or [NaiveDate::MAX] is cut to the representable dates.
    pub fn date_range(&self) -> (NaiveDate, NaiveDate) {
        let day = |weekday| NaiveDate::from_isoywd_opt(self.year, self.week, weekday);
        let start = WEEK.iter().find_map(|v| day(*v)).unwrap_or(NaiveDate::MIN);
        let end = WEEK.iter().rev().find_map(|v| day(*v)).unwrap_or(NaiveDate::MAX);
        (start, end)
    }

    /// Days of the week starting from Monday.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let (start, end) = self.date_range();
        start.iter_days().take_while(move |date| *date <= end)
    }
}

impl Display for WeekId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-W{:02}", self.year, self.week)
    }
}

impl FromStr for WeekId {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || TrackerError::InvalidWeek(s.to_string());
        let (year, week) = s.trim().split_once("-W").ok_or_else(invalid)?;
        let year = year.parse::<i32>().map_err(|_| invalid())?;
        let week = week.parse::<u32>().map_err(|_| invalid())?;
        WeekId::new_opt(year, week).ok_or_else(invalid)
    }
}

/// Hours of a single week, split by project.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeekBreakdown {
    /// Only projects with hours in the week, in project creation order.
    pub per_project_hours: IndexMap<String, f64>,
    pub total_hours: f64,
}

impl WeekBreakdown {
    fn add(&mut self, project: &str, hours: f64) {
        *self
            .per_project_hours
            .entry(project.to_string())
            .or_insert(0.) += hours;
        self.total_hours += hours;
    }
}

/// Total hours of every project on one day of a week.
#[derive(Debug, Clone, PartialEq)]
pub struct DayHours {
    pub day: Weekday,
    pub date: NaiveDate,
    pub total_hours: f64,
}

/// Goes through each ledger entry that has a valid date. Keys that aren't `YYYY-MM-DD` can only
/// appear in a hand edited file and are skipped.
fn dated_entries(
    projects: &ProjectMapping,
) -> impl Iterator<Item = (&str, NaiveDate, f64)> {
    projects.iter().flat_map(|(project, record)| {
        record
            .hours
            .iter()
            .filter_map(move |(date, hours)| match record_name_to_date(date) {
                Ok(parsed) => Some((project.as_str(), parsed, *hours)),
                Err(e) => {
                    warn!("Skipping entry of {project}: {e}");
                    None
                }
            })
    })
}

/// Every week that has at least one ledger entry in any project.
pub fn weeks_present(projects: &ProjectMapping) -> BTreeSet<WeekId> {
    dated_entries(projects)
        .map(|(_, date, _)| WeekId::of(date))
        .collect()
}

/// Sums hours per project and overall for every date inside `week`.
pub fn week_breakdown(projects: &ProjectMapping, week: WeekId) -> WeekBreakdown {
    let mut breakdown = WeekBreakdown::default();
    for (project, date, hours) in dated_entries(projects) {
        if WeekId::of(date) == week {
            breakdown.add(project, hours);
        }
    }
    breakdown
}

/// Breakdowns of every week that has hours, in a single pass over the ledger.
pub fn weekly_overview(projects: &ProjectMapping) -> BTreeMap<WeekId, WeekBreakdown> {
    let mut weeks = BTreeMap::<WeekId, WeekBreakdown>::new();
    for (project, date, hours) in dated_entries(projects) {
        weeks.entry(WeekId::of(date)).or_default().add(project, hours);
    }
    weeks
}

/// Monday..Sunday span of the week.
pub fn week_date_range(week: WeekId) -> (NaiveDate, NaiveDate) {
    week.date_range()
}

/// Total hours for each of the 7 days of the week, 0 for days without entries.
pub fn day_breakdown(projects: &ProjectMapping, week: WeekId) -> Vec<DayHours> {
    week.days()
        .map(|date| {
            let key = date_to_record_name(date);
            DayHours {
                day: date.weekday(),
                date,
                total_hours: projects.values().map(|v| v.hours_on(&key)).sum(),
            }
        })
        .collect()
}

pub fn day_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, Weekday};

    use crate::tracker::{error::TrackerError, store::ProjectStore};

    use super::*;

    fn date(value: &str) -> NaiveDate {
        NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap()
    }

    fn week(value: &str) -> WeekId {
        value.parse().unwrap()
    }

    fn test_store() -> ProjectStore {
        let mut store = ProjectStore::default();
        store.create("Acme", "123", "").unwrap();
        store.create("Beta", "", "").unwrap();
        store.add_hours("Acme", date("2024-01-08"), 5.).unwrap();
        store.add_hours("Acme", date("2024-01-08"), 4.).unwrap();
        store.add_hours("Acme", date("2024-01-14"), 2.).unwrap();
        store.add_hours("Beta", date("2024-01-10"), 3.).unwrap();
        store.add_hours("Beta", date("2024-01-15"), 7.).unwrap();
        // ISO week 1 of 2025 starts on 2024-12-30.
        store.add_hours("Beta", date("2024-12-31"), 1.).unwrap();
        store
    }

    #[test]
    fn test_week_id_parsing() {
        let parsed = week("2024-W02");
        assert_eq!((parsed.year(), parsed.week()), (2024, 2));
        assert_eq!(parsed.to_string(), "2024-W02");
        assert_eq!(week("2020-W53").to_string(), "2020-W53");

        for invalid in ["", "2024", "2024-02", "2024-W", "2024-Wxx", "2024-W00", "2023-W53"] {
            assert_eq!(
                invalid.parse::<WeekId>(),
                Err(TrackerError::InvalidWeek(invalid.to_string()))
            );
        }

        let last = WeekId::of(NaiveDate::MAX).to_string();
        assert_eq!(last.parse::<WeekId>(), Err(TrackerError::InvalidWeek(last.clone())));
    }

    #[test]
    fn test_week_at_calendar_edge_is_cut() {
        let last = WeekId::of(NaiveDate::MAX);
        let (start, end) = last.date_range();
        assert_eq!(end, NaiveDate::MAX);
        assert!(start <= end);
        assert_eq!(last.days().last(), Some(NaiveDate::MAX));
        assert!(last.days().count() <= 7);
    }

    #[test]
    fn test_week_of_date_is_iso() {
        assert_eq!(WeekId::of(date("2024-01-08")), week("2024-W02"));
        assert_eq!(WeekId::of(date("2024-01-14")), week("2024-W02"));
        assert_eq!(WeekId::of(date("2024-12-31")), week("2025-W01"));
        assert_eq!(WeekId::of(date("2021-01-03")), week("2020-W53"));
    }

    #[test]
    fn test_week_date_range_matches_bucketing() {
        assert_eq!(
            week_date_range(week("2024-W02")),
            (date("2024-01-08"), date("2024-01-14"))
        );
        assert_eq!(
            week_date_range(week("2025-W01")),
            (date("2024-12-30"), date("2025-01-05"))
        );
        assert_eq!(
            week_date_range(week("2020-W53")),
            (date("2020-12-28"), date("2021-01-03"))
        );

        // Every day of a reconstructed range buckets back into the same week.
        for id in ["2024-W01", "2024-W52", "2025-W01", "2020-W53", "2026-W10"] {
            let id = week(id);
            assert!(id.days().all(|day| WeekId::of(day) == id));
        }
    }

    #[test]
    fn test_weeks_present() {
        let store = test_store();

        let weeks = weeks_present(store.projects());

        assert_eq!(
            weeks.into_iter().collect::<Vec<_>>(),
            [week("2024-W02"), week("2024-W03"), week("2025-W01")]
        );
        assert!(weeks_present(ProjectStore::default().projects()).is_empty());
    }

    #[test]
    fn test_week_breakdown() {
        let store = test_store();

        let breakdown = week_breakdown(store.projects(), week("2024-W02"));

        assert_eq!(breakdown.total_hours, 14.);
        assert_eq!(breakdown.per_project_hours["Acme"], 11.);
        assert_eq!(breakdown.per_project_hours["Beta"], 3.);

        let empty = week_breakdown(store.projects(), week("2024-W30"));
        assert_eq!(empty, WeekBreakdown::default());
    }

    #[test]
    fn test_week_breakdown_sums_to_total() {
        let store = test_store();

        for (id, breakdown) in weekly_overview(store.projects()) {
            let sum: f64 = breakdown.per_project_hours.values().sum();
            assert_eq!(sum, breakdown.total_hours);
            assert_eq!(breakdown, week_breakdown(store.projects(), id));
        }
    }

    #[test]
    fn test_breakdown_skips_projects_without_hours() {
        let store = test_store();

        let breakdown = week_breakdown(store.projects(), week("2024-W03"));

        assert_eq!(
            breakdown.per_project_hours.keys().collect::<Vec<_>>(),
            ["Beta"]
        );
    }

    #[test]
    fn test_day_breakdown() {
        let store = test_store();

        let days = day_breakdown(store.projects(), week("2024-W02"));

        assert_eq!(days.len(), 7);
        assert_eq!(days[0].day, Weekday::Mon);
        assert_eq!(days[0].date, date("2024-01-08"));
        assert_eq!(days[0].total_hours, 9.);
        assert_eq!(days[1].total_hours, 0.);
        assert_eq!(days[2].total_hours, 3.);
        assert_eq!(days[6].day, Weekday::Sun);
        assert_eq!(days[6].date, date("2024-01-14"));
        assert_eq!(days[6].total_hours, 2.);
    }

    #[test]
    fn test_malformed_keys_are_skipped() {
        let mut projects = test_store().into_projects();
        projects
            .get_mut("Acme")
            .unwrap()
            .hours
            .insert("someday".into(), 4.);

        assert_eq!(weeks_present(&projects).len(), 3);
        assert_eq!(week_breakdown(&projects, week("2024-W02")).total_hours, 14.);
    }

    #[test]
    fn test_unpadded_keys_are_skipped() {
        let mut store = ProjectStore::default();
        store.create("Hand", "", "").unwrap();
        let mut projects = store.into_projects();
        projects
            .get_mut("Hand")
            .unwrap()
            .hours
            .insert("2024-1-8".into(), 4.);

        assert!(weeks_present(&projects).is_empty());
        assert_eq!(week_breakdown(&projects, week("2024-W02")).total_hours, 0.);
    }

    #[test]
    fn test_day_names() {
        assert_eq!(day_name(Weekday::Mon), "Monday");
        assert_eq!(day_name(Weekday::Sun), "Sunday");
    }
}
