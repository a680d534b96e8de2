pub mod add;
pub mod output;

use std::{io::IsTerminal, path::PathBuf};

use add::{process_add_command, AddCommand};
use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{debug, level_filters::LevelFilter};

use crate::{
    analysis::{
        chart::{daily_totals, flag_overtime, DEFAULT_OVERTIME_THRESHOLD},
        week::WeekId,
    },
    tracker::{
        storage::project_storage::{JsonProjectStorage, ProjectStorage},
        TimeTracker,
    },
    utils::{
        clock::{Clock, DefaultClock},
        dir::{create_application_default_path, create_dir, DATA_FILE_NAME},
        logging::{enable_logging, CLI_PREFIX},
    },
};

#[derive(Parser, Debug)]
#[command(name = "Timeplanner", version, long_about = None)]
#[command(about = "Application for logging hours worked per project", long_about = None)]
struct Args {
    #[command(subcommand)]
    commands: Commands,
    #[arg(long, global = true, help = "Enable logging")]
    log: bool,
    #[arg(
        long,
        global = true,
        help = "Application directory. By default tries to save into $XDG_STATE_HOME or $HOME/.local/state"
    )]
    dir: Option<PathBuf>,
    #[arg(
        long,
        global = true,
        help = "File with projects and hours. By default projects.json inside the application directory"
    )]
    file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
#[command(version, about, long_about = None)]
enum Commands {
    #[command(about = "List project names")]
    Projects {
        #[arg(long, help = "Show account numbers and comments")]
        details: bool,
    },
    #[command(about = "Create a new project")]
    NewProject {
        #[arg(help = "Unique, case sensitive project name")]
        name: String,
        #[arg(long, short, default_value = "")]
        account_number: String,
        #[arg(long, short, default_value = "")]
        comments: String,
    },
    #[command(about = "Add hours worked on a project")]
    Add {
        #[command(flatten)]
        command: AddCommand,
    },
    #[command(about = "Show hours per project for every week")]
    Hours {},
    #[command(about = "List weeks that have hours")]
    Weeks {},
    #[command(about = "Show hours of each day of a week")]
    Week {
        #[arg(help = "ISO week, for example 2024-W02")]
        week: WeekId,
    },
    #[command(about = "Remove all entries of a week from every project")]
    ClearWeek {
        #[arg(help = "ISO week, for example 2024-W02")]
        week: WeekId,
    },
    #[command(about = "Chart of hours worked per day")]
    Chart {
        #[arg(long, default_value_t = DEFAULT_OVERTIME_THRESHOLD, help = "Days above this many hours are highlighted")]
        threshold: f64,
    },
}

pub async fn run_cli() -> Result<()> {
    let args = Args::parse();

    let app_dir = match args.dir {
        Some(dir) => create_dir(dir)?,
        None => create_application_default_path()?,
    };

    let logging_level = if args.log {
        Some(LevelFilter::TRACE)
    } else {
        None
    };
    enable_logging(CLI_PREFIX, &app_dir.join("logs"), logging_level, args.log)?;

    let data_file = args.file.unwrap_or_else(|| app_dir.join(DATA_FILE_NAME));
    debug!("Using data file {data_file:?}");
    let mut tracker = TimeTracker::open(JsonProjectStorage::new(data_file)?).await?;

    let color = std::io::stdout().is_terminal();
    let output = process_command(args.commands, &mut tracker, &DefaultClock, color).await?;
    print!("{output}");
    Ok(())
}

/// Runs a single command against the tracker and returns what should be shown to the user.
async fn process_command(
    command: Commands,
    tracker: &mut TimeTracker<impl ProjectStorage>,
    clock: &impl Clock,
    color: bool,
) -> Result<String> {
    match command {
        Commands::Projects { details: false } => Ok(output::project_names(tracker.projects())),
        Commands::Projects { details: true } => Ok(output::project_details(tracker.projects())),
        Commands::NewProject {
            name,
            account_number,
            comments,
        } => {
            tracker
                .create_project(&name, &account_number, &comments)
                .await?;
            Ok(format!("New project '{name}' added.\n"))
        }
        Commands::Add { command } => {
            let message = process_add_command(command, tracker, clock).await?;
            Ok(format!("{message}\n"))
        }
        Commands::Hours {} => Ok(output::hours_overview(tracker.projects())),
        Commands::Weeks {} => Ok(output::week_list(tracker.projects())),
        Commands::Week { week } => Ok(output::week_days(tracker.projects(), week)),
        Commands::ClearWeek { week } => {
            let removed = tracker.clear_week(week).await?;
            Ok(format!(
                "All entries for week {week} have been cleared ({removed} removed).\n"
            ))
        }
        Commands::Chart { threshold } => {
            let series = daily_totals(tracker.projects());
            let overtime = flag_overtime(&series, threshold);
            Ok(output::chart::render_chart(&series, &overtime, color))
        }
    }
}
