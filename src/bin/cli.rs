//! Paddock CLI - championship analysis from the command line

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use dialoguer::{theme::ColorfulTheme, Input, Select};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use paddock::analysis::correlation::start_position_impact;
use paddock::analysis::predictor::{forecast_drivers, forecast_teams};
use paddock::analysis::stats::{top_drivers, top_teams};
use paddock::report::{save_driver_report, save_team_report};
use paddock::Championship;

/// Default dataset directory (relative to the working directory)
const DEFAULT_DATA_DIR: &str = "Database";

/// Season bounds accepted by the year prompts; matches dataset coverage
const FIRST_SEASON: i32 = 1950;
const LAST_SEASON: i32 = 2023;

#[derive(Parser)]
#[command(name = "paddock")]
#[command(author, version, about = "Championship analysis CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Run in interactive mode
    #[arg(short, long)]
    interactive: bool,

    /// Path to the dataset directory
    #[arg(long, default_value = DEFAULT_DATA_DIR)]
    data_dir: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank the top 5 drivers over a year range
    TopDrivers {
        /// First season of the range (inclusive)
        #[arg(short, long)]
        start: i32,

        /// Last season of the range (inclusive)
        #[arg(short, long)]
        end: i32,

        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Rank the top 5 teams over a year range
    TopTeams {
        /// First season of the range (inclusive)
        #[arg(short, long)]
        start: i32,

        /// Last season of the range (inclusive)
        #[arg(short, long)]
        end: i32,

        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Write a top-5 report to a file
    Report {
        /// Entity kind: drivers or teams
        #[arg(short, long, default_value = "drivers")]
        kind: String,

        /// First season of the range (inclusive)
        #[arg(short, long)]
        start: i32,

        /// Last season of the range (inclusive)
        #[arg(short, long)]
        end: i32,

        /// Output file path
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Forecast future competitiveness for named drivers or teams
    Forecast {
        /// Entity kind: drivers or teams
        #[arg(short, long, default_value = "drivers")]
        kind: String,

        /// Names to forecast (exact match, repeatable)
        #[arg(short, long, required = true)]
        name: Vec<String>,

        /// Restrict to one circuit by exact name
        #[arg(short, long)]
        circuit: Option<String>,

        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Measure how strongly grid position predicts finishing position
    GridImpact {
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::WARN)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("Failed to set subscriber");

    let cli = Cli::parse();

    println!("{}", "Paddock CLI v0.1.0".cyan().bold());
    println!();

    if cli.interactive {
        run_interactive(&cli.data_dir)?;
    } else if let Some(command) = cli.command {
        let data = load_dataset(&cli.data_dir)?;
        match command {
            Commands::TopDrivers { start, end, json } => {
                show_top_drivers(&data, start, end, json)?;
            }
            Commands::TopTeams { start, end, json } => {
                show_top_teams(&data, start, end, json)?;
            }
            Commands::Report {
                kind,
                start,
                end,
                output,
            } => {
                run_report(&data, &kind, start, end, &output)?;
            }
            Commands::Forecast {
                kind,
                name,
                circuit,
                json,
            } => {
                show_forecast(&data, &kind, &name, circuit.as_deref(), json)?;
            }
            Commands::GridImpact { json } => {
                show_grid_impact(&data, json)?;
            }
        }
    } else {
        println!("Use --help for usage information or --interactive for interactive mode.");
    }

    Ok(())
}

/// Load the dataset behind a spinner; ingestion failures are fatal.
fn load_dataset(data_dir: &Path) -> Result<Championship> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.set_message("Loading championship data...");

    let data = Championship::load_dir(data_dir)
        .with_context(|| format!("Failed to load dataset from {:?}", data_dir))?;

    pb.finish_and_clear();
    Ok(data)
}

fn validate_year_range(start: i32, end: i32) -> Result<()> {
    if !(FIRST_SEASON..=LAST_SEASON).contains(&start) || !(FIRST_SEASON..=LAST_SEASON).contains(&end)
    {
        bail!(
            "Years must be between {} and {}",
            FIRST_SEASON,
            LAST_SEASON
        );
    }
    if start > end {
        bail!("Start year {} cannot be after end year {}", start, end);
    }
    Ok(())
}

fn show_top_drivers(data: &Championship, start: i32, end: i32, json: bool) -> Result<()> {
    validate_year_range(start, end)?;
    let ranked = top_drivers(data, start, end);

    if json {
        println!("{}", serde_json::to_string_pretty(&ranked)?);
        return Ok(());
    }

    println!("{} {}-{}", "Top drivers".yellow().bold(), start, end);
    if ranked.is_empty() {
        println!("{}", "No drivers with results in this range.".yellow());
        return Ok(());
    }

    println!(
        "{:<4} {:<28} {:>8} {:>8} {:>8} {:>8}",
        "#", "Driver", "Max", "Min", "Mean", "StdDev"
    );
    println!("{}", "-".repeat(70));

    for (i, entry) in ranked.iter().enumerate() {
        println!(
            "{:<4} {:<28} {:>8.2} {:>8.2} {:>8.2} {:>8.2}",
            i + 1,
            truncate_name(&entry.driver.full_name, 28),
            entry.summary.max,
            entry.summary.min,
            entry.summary.mean,
            entry.summary.std_dev
        );
    }
    println!();
    Ok(())
}

fn show_top_teams(data: &Championship, start: i32, end: i32, json: bool) -> Result<()> {
    validate_year_range(start, end)?;
    let ranked = top_teams(data, start, end);

    if json {
        println!("{}", serde_json::to_string_pretty(&ranked)?);
        return Ok(());
    }

    println!("{} {}-{}", "Top teams".yellow().bold(), start, end);
    if ranked.is_empty() {
        println!("{}", "No teams with standings in this range.".yellow());
        return Ok(());
    }

    println!(
        "{:<4} {:<28} {:>8} {:>8} {:>8} {:>8}",
        "#", "Team", "Max", "Min", "Mean", "StdDev"
    );
    println!("{}", "-".repeat(70));

    for (i, entry) in ranked.iter().enumerate() {
        println!(
            "{:<4} {:<28} {:>8.2} {:>8.2} {:>8.2} {:>8.2}",
            i + 1,
            truncate_name(&entry.team.name, 28),
            entry.summary.max,
            entry.summary.min,
            entry.summary.mean,
            entry.summary.std_dev
        );
    }
    println!();
    Ok(())
}

fn run_report(data: &Championship, kind: &str, start: i32, end: i32, output: &Path) -> Result<()> {
    validate_year_range(start, end)?;

    match kind {
        "drivers" => {
            let ranked = top_drivers(data, start, end);
            save_driver_report(output, &ranked)
                .with_context(|| format!("Failed to write report to {:?}", output))?;
        }
        "teams" => {
            let ranked = top_teams(data, start, end);
            save_team_report(output, &ranked)
                .with_context(|| format!("Failed to write report to {:?}", output))?;
        }
        other => bail!("Unknown kind '{}': expected 'drivers' or 'teams'", other),
    }

    println!("{} {:?}", "Report saved to".green(), output);
    Ok(())
}

fn show_forecast(
    data: &Championship,
    kind: &str,
    names: &[String],
    circuit: Option<&str>,
    json: bool,
) -> Result<()> {
    if let Some(name) = circuit {
        if data.circuit_by_name(name).is_none() {
            bail!("Circuit not found: {}", name);
        }
    }

    let forecasts = match kind {
        "drivers" => forecast_drivers(data, names, circuit),
        "teams" => forecast_teams(data, names, circuit),
        other => bail!("Unknown kind '{}': expected 'drivers' or 'teams'", other),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&forecasts)?);
        return Ok(());
    }

    match circuit {
        Some(name) => println!("{} {}", "Forecast for circuit".yellow().bold(), name),
        None => println!("{}", "Forecast from past performance".yellow().bold()),
    }

    if forecasts.is_empty() {
        println!("{}", "No standings match the requested names.".yellow());
        return Ok(());
    }

    println!("{:<6} {:<28} {:>10}", "Id", "Name", "Score");
    println!("{}", "-".repeat(46));
    for forecast in &forecasts {
        println!(
            "{:<6} {:<28} {:>10.2}",
            forecast.id,
            truncate_name(&forecast.name, 28),
            forecast.score
        );
    }
    println!();
    Ok(())
}

fn show_grid_impact(data: &Championship, json: bool) -> Result<()> {
    let impact = start_position_impact(data);

    if json {
        println!("{}", serde_json::to_string_pretty(&impact)?);
        return Ok(());
    }

    println!(
        "{}: {:.4} ({} samples)",
        "Pearson correlation".green(),
        impact.coefficient,
        impact.samples
    );
    println!("{}", impact.strength.label());
    Ok(())
}

fn run_interactive(data_dir: &Path) -> Result<()> {
    println!("{}", "Interactive mode".green().bold());
    println!();

    let data = load_dataset(data_dir)?;
    let theme = ColorfulTheme::default();

    loop {
        let options = vec![
            "Forecast driver results",
            "Forecast team results",
            "Grid position impact",
            "Top 5 drivers",
            "Top 5 drivers report",
            "Top 5 teams",
            "Top 5 teams report",
            "Quit",
        ];

        let selection = Select::with_theme(&theme)
            .with_prompt("What would you like to do?")
            .items(&options)
            .default(0)
            .interact()?;

        match selection {
            0 | 1 => {
                let kind = if selection == 1 { "teams" } else { "drivers" };

                let scope = Select::with_theme(&theme)
                    .with_prompt("Forecast scope")
                    .items(&["Overall", "By circuit"])
                    .default(0)
                    .interact()?;

                let circuit = if scope == 1 {
                    let name: String = Input::with_theme(&theme)
                        .with_prompt("Circuit name")
                        .interact_text()?;
                    if data.circuit_by_name(&name).is_none() {
                        println!("{}", "Circuit not found.".red());
                        continue;
                    }
                    Some(name)
                } else {
                    None
                };

                let names = prompt_names(&theme, kind)?;
                if names.is_empty() {
                    println!("{}", "No names entered.".yellow());
                    continue;
                }

                println!();
                show_forecast(&data, kind, &names, circuit.as_deref(), false)?;
            }
            2 => {
                println!();
                show_grid_impact(&data, false)?;
                println!();
            }
            3 => {
                let (start, end) = prompt_years(&theme)?;
                println!();
                show_top_drivers(&data, start, end, false)?;
            }
            4 => {
                let output: String = Input::with_theme(&theme)
                    .with_prompt("Report file")
                    .interact_text()?;
                let (start, end) = prompt_years(&theme)?;
                println!();
                run_report(&data, "drivers", start, end, Path::new(&output))?;
                println!();
            }
            5 => {
                let (start, end) = prompt_years(&theme)?;
                println!();
                show_top_teams(&data, start, end, false)?;
            }
            6 => {
                let output: String = Input::with_theme(&theme)
                    .with_prompt("Report file")
                    .interact_text()?;
                let (start, end) = prompt_years(&theme)?;
                println!();
                run_report(&data, "teams", start, end, Path::new(&output))?;
                println!();
            }
            7 => {
                println!("Goodbye!");
                break;
            }
            _ => {}
        }
    }

    Ok(())
}

/// Collect names one per line until an empty line or 'done'.
fn prompt_names(theme: &ColorfulTheme, kind: &str) -> Result<Vec<String>> {
    println!("Enter {} names one per line; finish with 'done' or an empty line.", kind);

    let mut names = Vec::new();
    loop {
        let name: String = Input::with_theme(theme)
            .with_prompt("Name")
            .allow_empty(true)
            .interact_text()?;
        if name.is_empty() || name == "done" {
            break;
        }
        names.push(name);
    }
    Ok(names)
}

/// Prompt for a year range until it validates.
fn prompt_years(theme: &ColorfulTheme) -> Result<(i32, i32)> {
    loop {
        let start: i32 = Input::with_theme(theme)
            .with_prompt(format!("Start year ({}-{})", FIRST_SEASON, LAST_SEASON))
            .interact_text()?;
        let end: i32 = Input::with_theme(theme)
            .with_prompt("End year")
            .interact_text()?;

        match validate_year_range(start, end) {
            Ok(()) => return Ok((start, end)),
            Err(e) => println!("{}", e.to_string().red()),
        }
    }
}

/// Truncate a name to fit display width
fn truncate_name(name: &str, max_len: usize) -> String {
    let chars: Vec<char> = name.chars().collect();
    if chars.len() <= max_len {
        name.to_string()
    } else {
        chars[..max_len - 1].iter().collect::<String>() + "…"
    }
}
