use std::fmt::Display;

use anyhow::Result;
use chrono::{DateTime, Duration, Local, NaiveDate};
use chrono_english::parse_date_string;
use clap::{Parser, ValueEnum};

use crate::{
    tracker::{error::TrackerError, storage::project_storage::ProjectStorage, TimeTracker},
    utils::{
        clock::Clock,
        time::{record_name_to_date, week_start},
    },
};

/// How far back an entry can be dated.
pub const MAX_BACKDATE_DAYS: i64 = 30;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum DateStyle {
    Uk,
    Us,
}

impl From<DateStyle> for chrono_english::Dialect {
    fn from(value: DateStyle) -> Self {
        match value {
            DateStyle::Uk => Self::Uk,
            DateStyle::Us => Self::Us,
        }
    }
}

impl Display for DateStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DateStyle::Uk => write!(f, "uk"),
            DateStyle::Us => write!(f, "us"),
        }
    }
}

/// Working days of the current week that can be picked directly.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum WorkDay {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
}

impl WorkDay {
    fn days_from_monday(self) -> i64 {
        match self {
            WorkDay::Monday => 0,
            WorkDay::Tuesday => 1,
            WorkDay::Wednesday => 2,
            WorkDay::Thursday => 3,
            WorkDay::Friday => 4,
        }
    }
}

#[derive(Debug, Parser)]
pub struct AddCommand {
    #[arg(help = "Project the hours go to. Unknown projects are created without any details")]
    project: String,
    #[arg(
        long,
        value_parser = clap::value_parser!(u8).range(1..=10),
        help = "Hours worked, from 1 to 10"
    )]
    hours: u8,
    #[arg(
        long,
        short,
        conflicts_with = "weekday",
        help = "Date of the work, at most 30 days ago. Examples are \"2025-03-15\", \"yesterday\", \"15/03/2025\". Defaults to today"
    )]
    date: Option<String>,
    #[arg(long, short, help = "Pick a day of the current week instead of a date")]
    weekday: Option<WorkDay>,
    #[arg(long, default_value_t = DateStyle::Uk, help = "Style of dates used during parsing. For Uk it's day/month/year. For Us it's month/day/year")]
    date_style: DateStyle,
}

/// Command to process `add` command. Adds hours to the project on the picked date and returns
/// the confirmation message.
pub async fn process_add_command(
    AddCommand {
        project,
        hours,
        date,
        weekday,
        date_style,
    }: AddCommand,
    tracker: &mut TimeTracker<impl ProjectStorage>,
    clock: &impl Clock,
) -> Result<String> {
    let date = resolve_entry_date(date.as_deref(), weekday, date_style, clock)?;
    tracker.add_hours(&project, date, f64::from(hours)).await?;
    Ok(format!("Added {hours} hours for {project} on {date}."))
}

/// Picks the date of an entry. A weekday means that day of the current week, even when it's
/// still ahead. An explicit date has to be within the last [MAX_BACKDATE_DAYS] days. Without
/// either it's today.
pub fn resolve_entry_date(
    date: Option<&str>,
    weekday: Option<WorkDay>,
    date_style: DateStyle,
    clock: &impl Clock,
) -> Result<NaiveDate, TrackerError> {
    let now = clock.now();
    let today = now.date_naive();

    if let Some(weekday) = weekday {
        return Ok(week_start(today) + Duration::days(weekday.days_from_monday()));
    }
    let Some(date) = date else {
        return Ok(today);
    };

    let parsed = parse_date(date, now, date_style)?;
    let earliest = today - Duration::days(MAX_BACKDATE_DAYS);
    if parsed < earliest || parsed > today {
        return Err(TrackerError::DateOutOfRange {
            date: parsed,
            earliest,
            latest: today,
        });
    }
    Ok(parsed)
}

fn parse_date(
    value: &str,
    now: DateTime<Local>,
    date_style: DateStyle,
) -> Result<NaiveDate, TrackerError> {
    if let Ok(date) = record_name_to_date(value.trim()) {
        return Ok(date);
    }
    parse_date_string(value, now, date_style.into())
        .map(|v| v.date_naive())
        .map_err(|_| TrackerError::InvalidDate(value.to_string()))
}
