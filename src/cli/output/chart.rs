use std::{collections::BTreeSet, fmt::Write};

use ansi_term::Colour;

use crate::analysis::chart::DailyPoint;

use super::NO_HOURS_MESSAGE;

const BAR_WIDTH: usize = 40;

/// Renders the daily series as horizontal bars scaled to the busiest day. Overtime days are
/// marked with `!` and painted red when `color` is set.
pub fn render_chart(series: &[DailyPoint], overtime: &BTreeSet<String>, color: bool) -> String {
    if series.is_empty() {
        return format!("{NO_HOURS_MESSAGE}\n");
    }

    let max = series
        .iter()
        .map(|v| v.total_hours)
        .fold(0., f64::max);

    let mut output = String::from("Hours Worked Per Day\n\n");
    for point in series {
        let bar = "#".repeat(bar_length(point.total_hours, max));
        let line = format!("{} {bar:<BAR_WIDTH$} {:>5}", point.date, point.total_hours);
        if overtime.contains(&point.date) {
            let line = format!("{line} !");
            if color {
                let _ = writeln!(output, "{}", Colour::Red.paint(line));
            } else {
                let _ = writeln!(output, "{line}");
            }
        } else {
            let _ = writeln!(output, "{line}");
        }
    }
    output
}

fn bar_length(hours: f64, max: f64) -> usize {
    if max <= 0. || hours <= 0. {
        return 0;
    }
    ((hours / max * BAR_WIDTH as f64).round() as usize).clamp(1, BAR_WIDTH)
}
