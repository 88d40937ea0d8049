use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::{error, info};
use std::path::PathBuf;

use daterange_backend::domain::{format_time_12, parse_time_string, CalendarOptions};
use daterange_backend::Backend;
use shared::{CalendarDayType, CalendarMonth};

/// Calendar grids, time parsing and range defaults from the command line
#[derive(Parser, Debug)]
#[command(name = "daterange", version, about, long_about = None)]
struct Cli {
    /// YAML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Locale tag such as en-US or de-DE
    #[arg(long, global = true)]
    locale: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Commands {
    /// Print a month grid
    Calendar {
        year: i32,
        /// Month, 1-12
        #[arg(value_parser = clap::value_parser!(u32).range(1..=12))]
        month: u32,
    },
    /// Parse a time such as 17:30 or 5:30 PM
    Parse {
        #[arg(required = true, num_args = 1..)]
        time: Vec<String>,
    },
    /// Print the smart default range
    Defaults,
    /// List the quick date presets
    Presets,
}

fn print_calendar(backend: &Backend, month: &CalendarMonth, locale: &str) {
    let formatting = &backend.formatting_service;
    println!("{}", formatting.month_title(month.year, month.month, locale));
    let headers: Vec<String> = formatting
        .weekday_headers(locale)
        .iter()
        .map(|name| format!("{:>4}", name.chars().take(3).collect::<String>()))
        .collect();
    println!("{}", headers.join(""));

    for week in &month.weeks {
        let line: String = week
            .iter()
            .map(|day| match day.day_type {
                CalendarDayType::MonthDay if day.is_today => format!("{:>3}*", day.day),
                CalendarDayType::MonthDay => format!("{:>4}", day.day),
                CalendarDayType::PaddingBefore | CalendarDayType::PaddingAfter => "    ".to_string(),
            })
            .collect();
        println!("{}", line.trim_end());
    }
}

fn run(cli: Cli) -> Result<()> {
    let backend = match &cli.config {
        Some(path) => Backend::from_config_file(path)?,
        None => Backend::new(),
    };
    let formatting = &backend.formatting_service;
    let locale = cli
        .locale
        .clone()
        .unwrap_or_else(|| formatting.default_locale().to_string());
    let format = formatting.default_format();

    match cli.command {
        Commands::Calendar { year, month } => {
            let grid = backend
                .calendar_service
                .generate_calendar_month(year, month - 1, &CalendarOptions::default())
                .with_context(|| format!("Cannot build calendar for {}-{:02}", year, month))?;
            print_calendar(&backend, &grid, &locale);
        }
        Commands::Parse { time } => {
            let input = time.join(" ");
            match parse_time_string(&input) {
                Ok(time) => println!("{} ({} minutes after midnight)", format_time_12(time), time.total_minutes()),
                Err(e) => println!("{:?}: {}", e.kind, e),
            }
        }
        Commands::Defaults => {
            let session = backend.range_state_machine.initialize(None);
            println!("{}", formatting.format_date_time_range(&session.value, format, &locale));
        }
        Commands::Presets => {
            for preset in backend.range_state_machine.quick_date_presets() {
                println!(
                    "{:<14} {}",
                    preset.label,
                    formatting.format_date_time_range(&preset.value, format, &locale)
                );
            }
        }
    }
    Ok(())
}

fn main() {
    env_logger::init();
    info!("Starting daterange");

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        error!("daterange failed: {:#}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
