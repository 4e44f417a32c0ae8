use clap::{Parser, Subcommand};
use liftcast_core::*;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "liftcast")]
#[command(about = "Personal record forecasting from logged training sets", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Read a single JSON export instead of the data directory
    #[arg(long, global = true)]
    snapshot: Option<PathBuf>,

    /// Override config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Predict weeks until a target 1RM is reached
    Predict {
        /// Target 1RM in pounds
        #[arg(long, allow_negative_numbers = true, value_parser = parse_target_weight)]
        target: f64,

        /// Lift to forecast (defaults to the configured exercise)
        #[arg(long)]
        exercise: Option<String>,

        /// Week ordering (lexicographic, shortlex, submitted)
        #[arg(long)]
        week_order: Option<WeekOrderPolicy>,
    },

    /// Show the weekly best estimated 1RM and fitted trend
    Weeks {
        #[arg(long)]
        exercise: Option<String>,

        #[arg(long)]
        week_order: Option<WeekOrderPolicy>,
    },

    /// Export the weekly series to CSV
    Export {
        /// Output CSV path
        #[arg(long)]
        out: PathBuf,

        #[arg(long)]
        exercise: Option<String>,

        #[arg(long)]
        week_order: Option<WeekOrderPolicy>,
    },

    /// List days and exercises in the split
    Exercises,
}

fn main() -> Result<()> {
    liftcast_core::logging::init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    let snapshot = match &cli.snapshot {
        Some(path) => {
            tracing::debug!("Reading snapshot file {:?}", path);
            TrainingSnapshot::load_from_file(path)?
        }
        None => {
            let data_dir = cli
                .data_dir
                .clone()
                .unwrap_or_else(|| config.data.data_dir.clone());
            tracing::debug!("Reading data directory {:?}", data_dir);
            TrainingSnapshot::load_from_dir(&data_dir)?
        }
    };

    match cli.command {
        Commands::Predict {
            target,
            exercise,
            week_order,
        } => {
            let policy = resolve_policy(&config, week_order)?;
            check_catalog(&snapshot)?;
            cmd_predict(&snapshot, &policy, exercise, target);
            Ok(())
        }
        Commands::Weeks {
            exercise,
            week_order,
        } => {
            let policy = resolve_policy(&config, week_order)?;
            check_catalog(&snapshot)?;
            cmd_weeks(&snapshot, &policy, exercise);
            Ok(())
        }
        Commands::Export {
            out,
            exercise,
            week_order,
        } => {
            let policy = resolve_policy(&config, week_order)?;
            check_catalog(&snapshot)?;
            cmd_export(&snapshot, &policy, exercise, out)
        }
        Commands::Exercises => cmd_exercises(&snapshot),
    }
}

/// Reject target weights the forecaster must never see
fn parse_target_weight(s: &str) -> std::result::Result<f64, String> {
    let weight: f64 = s
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a number", s))?;
    if !weight.is_finite() || weight <= 0.0 {
        return Err("target weight must be a positive number of pounds".into());
    }
    Ok(weight)
}

fn resolve_policy(config: &Config, week_order: Option<WeekOrderPolicy>) -> Result<ForecastPolicy> {
    let mut policy = config.forecast.clone();
    if let Some(order) = week_order {
        policy.week_order = order;
    }
    policy.validate()?;
    tracing::debug!("Forecast policy: {:?}", policy);
    Ok(policy)
}

fn check_catalog(snapshot: &TrainingSnapshot) -> Result<()> {
    let errors = catalog::validate(&snapshot.split);
    if errors.is_empty() {
        return Ok(());
    }

    eprintln!("Catalog validation errors:");
    for error in &errors {
        eprintln!("  - {}", error);
    }
    Err(Error::CatalogValidation(format!(
        "{} problem(s) in split",
        errors.len()
    )))
}

fn cmd_predict(
    snapshot: &TrainingSnapshot,
    policy: &ForecastPolicy,
    exercise: Option<String>,
    target: f64,
) {
    let exercise = exercise.unwrap_or_else(|| policy.exercise.clone());
    let analysis = snapshot.analyze(&exercise, target, policy);

    println!();
    println!("  {} → {} lbs 1RM", exercise, target);
    println!();

    match &analysis.outcome {
        PrOutcome::InsufficientData(reason) => {
            println!("  Not enough data");
            println!("  ({})", reason);
        }
        PrOutcome::AlreadyAchieved => {
            println!("  Already achieved");
            println!(
                "  Your highest estimated 1RM is already {} lbs or higher!",
                target
            );
        }
        PrOutcome::Unreliable { weeks } => {
            println!("  Prediction is unreliable");
            println!("  (Progress rate is too slow or negative.)");
            println!(
                "  At least {} weeks at {} lbs/week",
                weeks, policy.unreliable_slope
            );
        }
        PrOutcome::Forecast { weeks } => {
            println!("  Estimated time: {} weeks", weeks);
        }
    }

    if let Some(trend) = &analysis.trend {
        println!();
        println!("  Best estimated 1RM: {} lbs", trend.current_max_1rm);
        print_trend_line(trend);
    }
    println!();
}

fn cmd_weeks(snapshot: &TrainingSnapshot, policy: &ForecastPolicy, exercise: Option<String>) {
    let exercise = exercise.unwrap_or_else(|| policy.exercise.clone());

    let trend = match snapshot.trend(&exercise, policy) {
        Ok(trend) => trend,
        Err(reason) => {
            println!("{}: Not enough data ({})", exercise, reason);
            return;
        }
    };

    println!("{}: weekly best estimated 1RM", exercise);
    println!("  {:>4}  {:<16} {:>8}", "#", "week", "1RM");
    for point in &trend.points {
        println!(
            "  {:>4}  {:<16} {:>8}",
            point.week_index, point.week_id, point.estimated_1rm
        );
    }
    print_trend_line(&trend);
}

fn cmd_export(
    snapshot: &TrainingSnapshot,
    policy: &ForecastPolicy,
    exercise: Option<String>,
    out: PathBuf,
) -> Result<()> {
    let exercise = exercise.unwrap_or_else(|| policy.exercise.clone());

    let trend = match snapshot.trend(&exercise, policy) {
        Ok(trend) => trend,
        Err(reason) => {
            println!("{}: Not enough data ({}) - nothing exported.", exercise, reason);
            return Ok(());
        }
    };

    let count = export_weekly_maxima(&trend.points, &out)?;
    println!("✓ Exported {} weeks to {}", count, out.display());
    Ok(())
}

fn cmd_exercises(snapshot: &TrainingSnapshot) -> Result<()> {
    for day in &snapshot.split {
        println!("{} ({})", day.name, day.id);
        for exercise in &day.exercises {
            println!("  - {} ({})", exercise.name, exercise.id);
        }
    }
    check_catalog(snapshot)
}

fn print_trend_line(trend: &TrendFit) {
    match trend.r_squared {
        Some(r2) => println!(
            "  Trend: {:+.2} lbs/week over {} weeks (R² {:.2})",
            trend.model.slope,
            trend.points.len(),
            r2
        ),
        None => println!(
            "  Trend: {:+.2} lbs/week over {} weeks",
            trend.model.slope,
            trend.points.len()
        ),
    }
}
