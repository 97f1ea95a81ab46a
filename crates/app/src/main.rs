use std::fmt;
use std::path::PathBuf;

use fitness_core::Error as ModelError;
use fitness_core::model::{ExerciseId, UserId, WorkoutFilter, WorkoutId};
use services::{AppServices, Clock, Dashboard, Navigation, RECENT_ACTIVITY_LIMIT, SessionTracker};
use storage::Dataset;
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidDbUrl { raw: String },
    InvalidNumber { flag: &'static str, raw: String },
    Invalid { flag: &'static str, source: ModelError },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidNumber { flag, raw } => write!(f, "invalid {flag} value: {raw}"),
            ArgsError::Invalid { flag, source } => write!(f, "invalid {flag} value: {source}"),
        }
    }
}

impl std::error::Error for ArgsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ArgsError::Invalid { source, .. } => Some(source),
            _ => None,
        }
    }
}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn parse_model<T, E>(raw: &str, flag: &'static str) -> Result<T, ArgsError>
where
    T: std::str::FromStr<Err = E>,
    E: Into<ModelError>,
{
    raw.parse::<T>().map_err(|e| ArgsError::Invalid {
        flag,
        source: e.into(),
    })
}

fn parse_number(raw: &str, flag: &'static str) -> Result<usize, ArgsError> {
    raw.trim().parse().map_err(|_| ArgsError::InvalidNumber {
        flag,
        raw: raw.to_string(),
    })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--db <sqlite_url>|memory] [--dataset <json_path>]");
    eprintln!("                      [--user <id>] [--recent <n>]");
    eprintln!("                      [--start <workout-id>]... [--complete <index>]...");
    eprintln!("                      [--log <name> --exercise <id>...]");
    eprintln!("                      [--search <text>] [--category <c>] [--difficulty <d>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db sqlite::memory:");
    eprintln!("  --dataset <built-in sample>");
    eprintln!("  --user <first seeded user>");
    eprintln!("  --recent {RECENT_ACTIVITY_LIMIT}");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  FITNESS_DB_URL, FITNESS_DATASET, FITNESS_USER_ID, FITNESS_RECENT_LIMIT, RUST_LOG");
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Action {
    Start(WorkoutId),
    Complete(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CustomLog {
    name: String,
    exercises: Vec<ExerciseId>,
}

#[derive(Debug)]
struct Args {
    db_url: String,
    dataset: Option<PathBuf>,
    user: Option<UserId>,
    recent: usize,
    actions: Vec<Action>,
    log: Option<CustomLog>,
    filter: WorkoutFilter,
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut db_url =
            std::env::var("FITNESS_DB_URL").unwrap_or_else(|_| "sqlite::memory:".into());
        let mut dataset = std::env::var_os("FITNESS_DATASET").map(PathBuf::from);
        let mut user = match std::env::var("FITNESS_USER_ID") {
            Ok(raw) => Some(parse_model::<UserId, _>(&raw, "FITNESS_USER_ID")?),
            Err(_) => None,
        };
        let mut recent = match std::env::var("FITNESS_RECENT_LIMIT") {
            Ok(raw) => parse_number(&raw, "FITNESS_RECENT_LIMIT")?,
            Err(_) => RECENT_ACTIVITY_LIMIT,
        };
        let mut actions = Vec::new();
        let mut log: Option<CustomLog> = None;
        let mut filter = WorkoutFilter::new();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = value;
                }
                "--dataset" => {
                    let value = require_value(args, "--dataset")?;
                    dataset = Some(PathBuf::from(value));
                }
                "--user" => {
                    let value = require_value(args, "--user")?;
                    user = Some(parse_model(&value, "--user")?);
                }
                "--recent" => {
                    let value = require_value(args, "--recent")?;
                    recent = parse_number(&value, "--recent")?;
                }
                "--start" => {
                    let value = require_value(args, "--start")?;
                    actions.push(Action::Start(parse_model(&value, "--start")?));
                }
                "--complete" => {
                    let value = require_value(args, "--complete")?;
                    actions.push(Action::Complete(parse_number(&value, "--complete")?));
                }
                "--log" => {
                    let name = require_value(args, "--log")?;
                    log = Some(CustomLog {
                        name,
                        exercises: Vec::new(),
                    });
                }
                "--exercise" => {
                    let value = require_value(args, "--exercise")?;
                    let id = parse_model::<ExerciseId, _>(&value, "--exercise")?;
                    log.get_or_insert_with(|| CustomLog {
                        name: String::new(),
                        exercises: Vec::new(),
                    })
                    .exercises
                    .push(id);
                }
                "--search" => {
                    filter = filter.with_query(require_value(args, "--search")?);
                }
                "--category" => {
                    let value = require_value(args, "--category")?;
                    let category = WorkoutFilter::parse_category(&value).map_err(|e| {
                        ArgsError::Invalid {
                            flag: "--category",
                            source: e.into(),
                        }
                    })?;
                    filter = filter.with_category(category);
                }
                "--difficulty" => {
                    let value = require_value(args, "--difficulty")?;
                    let difficulty = WorkoutFilter::parse_difficulty(&value).map_err(|e| {
                        ArgsError::Invalid {
                            flag: "--difficulty",
                            source: e.into(),
                        }
                    })?;
                    filter = filter.with_difficulty(difficulty);
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            db_url,
            dataset,
            user,
            recent,
            actions,
            log,
            filter,
        })
    }
}

async fn build_services(args: &Args) -> Result<AppServices, Box<dyn std::error::Error>> {
    let clock = Clock::system();
    let dataset = match &args.dataset {
        Some(path) => {
            let raw = std::fs::read_to_string(path)?;
            let dataset = Dataset::from_json(&raw)?;
            tracing::info!(path = %path.display(), workouts = dataset.workouts.len(), "dataset loaded");
            dataset
        }
        None => Dataset::sample(),
    };
    let services = if args.db_url == "memory" {
        AppServices::new_in_memory(dataset, clock, args.user.clone()).await?
    } else {
        AppServices::new_sqlite(&args.db_url, dataset, clock, args.user.clone()).await?
    };
    Ok(services)
}

async fn log_custom_workout(
    services: &AppServices,
    log: &CustomLog,
) -> Result<(), Box<dyn std::error::Error>> {
    let log_workout = services.log_workout();
    let mut draft = log_workout.new_draft();
    draft.name.clone_from(&log.name);
    for id in &log.exercises {
        if !draft.is_selected(id) {
            draft.toggle_exercise(id.clone());
        }
    }

    let exercises = log_workout.exercises().await?;
    for exercise in draft.selected_exercises(&exercises) {
        println!("  + {} ({})", exercise.name, exercise.category);
    }
    let totals = log_workout.estimate(&draft).await?;
    println!(
        "Estimated: {} min, {} cal",
        totals.duration, totals.calories_burned
    );
    match log_workout.submit(&draft).await {
        Ok((workout, _)) => println!("Logged custom workout {}", workout.template.name),
        Err(services::LogWorkoutError::Invalid(reason)) => println!("{reason}"),
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

async fn print_dashboard(
    dashboard: &Dashboard,
    filter: &WorkoutFilter,
) -> Result<(), Box<dyn std::error::Error>> {
    let listing = dashboard.browse(filter).await?;
    println!(
        "Workouts ({} of {}):",
        listing.workouts.len(),
        listing.total
    );
    for workout in &listing.workouts {
        println!(
            "  [{}] {} · {} · {} · {} min · {} cal",
            workout.id,
            workout.name,
            workout.category,
            workout.difficulty,
            workout.duration,
            workout.calories_burned
        );
    }
    Ok(())
}

async fn apply_actions(
    services: &AppServices,
    tracker: &mut SessionTracker,
    actions: &[Action],
) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = services.storage().catalog.as_ref();
    for action in actions {
        match action {
            Action::Start(id) => match tracker.start_workout_by_id(id, catalog).await? {
                Some(Navigation::Progress) => println!("Started workout {id}"),
                Some(Navigation::Dashboard) | None => println!("Workout {id} not found"),
            },
            Action::Complete(index) => match tracker.complete_workout(*index).await? {
                Some(log) => println!(
                    "Completed {}",
                    log.workout_name.as_deref().unwrap_or("workout")
                ),
                None => println!("No ongoing workout at index {index}"),
            },
        }
    }
    Ok(())
}

async fn print_progress(
    services: &AppServices,
    tracker: &SessionTracker,
    recent: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let storage = services.storage();
    let overview = tracker
        .overview(storage.users.as_ref(), storage.catalog.as_ref(), recent)
        .await?;

    println!();
    println!("{} ({})", overview.user.name, overview.user.initials());
    println!(
        "Workouts: {}  Minutes: {}  Calories: {}  Avg/workout: {}",
        overview.stats.total_workouts,
        overview.stats.total_minutes,
        overview.stats.total_calories,
        overview.stats.average_calories_per_workout
    );

    if !overview.ongoing.is_empty() {
        println!("In progress:");
        for (index, session) in overview.ongoing.iter().enumerate() {
            println!(
                "  {index}: {} since {}",
                session.workout_name,
                session.start_time.format("%H:%M")
            );
        }
    }

    println!("Recent activity:");
    for item in &overview.recent {
        println!(
            "  {} · {} · {} min · {} cal{}",
            item.view.date.format("%b %-d, %Y"),
            item.display_name,
            item.view.duration,
            item.view.calories_burned,
            if item.view.completed { "" } else { " (in progress)" }
        );
    }
    Ok(())
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let args = Args::parse(&mut argv).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let services = build_services(&args).await?;
    tracing::info!(user = %services.user_id(), db = %args.db_url, "services ready");

    if let Some(log) = &args.log {
        log_custom_workout(&services, log).await?;
    }
    print_dashboard(&services.open_dashboard(), &args.filter).await?;

    run_tab(&services, &args.actions, args.recent).await
}

/// Drives one tab session. The tab store is cleared even when an action
/// or the report fails; the first error wins.
async fn run_tab(
    services: &AppServices,
    actions: &[Action],
    recent: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut tracker = services.open_tracker().await?;
    let outcome = match apply_actions(services, &mut tracker, actions).await {
        Ok(()) => print_progress(services, &tracker, recent).await,
        Err(e) => Err(e),
    };
    let closed = tracker.close().await;
    outcome?;
    closed?;
    Ok(())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = run().await {
        tracing::error!(error = %e, "fatal");
        std::process::exit(1);
    }
}
