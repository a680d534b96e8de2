//! Plain text renditions of the projects and of the analysis views. Every function returns the
//! whole text, printing is left to the caller.

pub mod chart;

use std::fmt::Write;

use crate::{
    analysis::week::{day_breakdown, day_name, weekly_overview, weeks_present, WeekId},
    tracker::storage::entities::ProjectMapping,
    utils::percentage::hours_percentage,
};

pub const NO_HOURS_MESSAGE: &str = "No hours have been recorded yet.";
pub const NO_PROJECTS_MESSAGE: &str = "No projects have been created yet.";

/// One project name per line.
pub fn project_names(projects: &ProjectMapping) -> String {
    if projects.is_empty() {
        return format!("{NO_PROJECTS_MESSAGE}\n");
    }
    projects.keys().fold(String::new(), |mut output, name| {
        let _ = writeln!(output, "{name}");
        output
    })
}

pub fn project_details(projects: &ProjectMapping) -> String {
    if projects.is_empty() {
        return format!("{NO_PROJECTS_MESSAGE}\n");
    }
    let mut output = String::new();
    for (name, details) in projects {
        let _ = writeln!(output, "Project Name: {name}");
        let _ = writeln!(
            output,
            "  Account Number: {}",
            details.account_number.as_deref().unwrap_or("N/A")
        );
        let _ = writeln!(
            output,
            "  Comments: {}",
            details.comments.as_deref().unwrap_or("N/A")
        );
        output.push('\n');
    }
    output
}

/// Week -> project -> hours with each project's share of the week.
pub fn hours_overview(projects: &ProjectMapping) -> String {
    let weeks = weekly_overview(projects);
    if weeks.is_empty() {
        return format!("{NO_HOURS_MESSAGE}\n");
    }

    let mut output = String::from("Hours Worked per Project:\n\n");
    for (week, breakdown) in weeks {
        let _ = writeln!(output, "Week: {week}");
        for (project, hours) in &breakdown.per_project_hours {
            let _ = writeln!(
                output,
                "  - {project}: {hours} hours ({:.2})",
                hours_percentage(*hours, breakdown.total_hours)
            );
        }
        let _ = writeln!(output, "  Total hours in week: {}", breakdown.total_hours);
        output.push('\n');
    }
    output
}

/// Weeks that have any hours, oldest first.
pub fn week_list(projects: &ProjectMapping) -> String {
    let weeks = weeks_present(projects);
    if weeks.is_empty() {
        return format!("{NO_HOURS_MESSAGE}\n");
    }
    weeks.into_iter().fold(String::new(), |mut output, week| {
        let _ = writeln!(output, "{week}");
        output
    })
}

/// Hours of each day of the week, Monday to Sunday.
pub fn week_days(projects: &ProjectMapping, week: WeekId) -> String {
    let mut output = format!("Hours for Week {week}:\n\n");
    for day in day_breakdown(projects, week) {
        let _ = writeln!(
            output,
            "{} ({}): {} hours",
            day_name(day.day),
            day.date,
            day.total_hours
        );
    }
    output
}
