//! Prints an ASCII crescent visibility map and the coming months.
//!
//! ```text
//! cargo run --release --example crescent_map -- 2026-02-18 --resolution 5 -v
//! ```

use chrono::Utc;
use clap::Parser;
use hilal::prelude::*;
use tracing_subscriber::EnvFilter;

const CRATE_TARGETS: &[&str] = &[
    "hilal_types",
    "hilal_calendar",
    "hilal_astronomy",
    "hilal_months",
    "hilal_core",
];

#[derive(Parser)]
#[command(about = "Crescent visibility map for one evening or morning")]
struct Cli {
    /// Civil date, YYYY-MM-DD (default: today, UTC)
    date: Option<String>,

    /// Morning (waning) crescent instead of the evening one
    #[arg(long)]
    waning: bool,

    /// Grid spacing in degrees
    #[arg(short, long, default_value_t = 5.0)]
    resolution: f64,

    /// Use Yallop's published thresholds
    #[arg(long)]
    published: bool,

    /// Months to list after the map
    #[arg(short, long, default_value_t = 3)]
    months: usize,

    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// `RUST_LOG` overrides the verbosity flag when set.
fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let default_filter = CRATE_TARGETS
        .iter()
        .map(|t| format!("{t}={level}"))
        .collect::<Vec<_>>()
        .join(",");
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn glyph(r: &VisibilityResult) -> char {
    if r.is_degraded() {
        return 'x';
    }
    match r.category {
        VisibilityCategory::A => '#',
        VisibilityCategory::B => '+',
        VisibilityCategory::C => ':',
        VisibilityCategory::D => '.',
        VisibilityCategory::E => ' ',
    }
}

fn print_map(grid: &VisibilityGrid) {
    let lng_count = grid
        .results()
        .iter()
        .take_while(|r| r.point.lat == grid.results()[0].point.lat)
        .count()
        .max(1);
    // Scan order is south to north; print north up.
    for row in grid.results().chunks(lng_count).rev() {
        let lat = row[0].point.lat;
        let line: String = row.iter().map(glyph).collect();
        println!("{lat:>6.1} |{line}|");
    }
    for category in VisibilityCategory::ALL {
        println!(
            "  {category}: {:>5}  {}",
            grid.counts().get(category),
            category.description()
        );
    }
}

fn main() -> Result<(), HilalError> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let date = match cli.date.as_deref() {
        Some(s) => parse_civil_date(s)?,
        None => Utc::now().date_naive(),
    };
    let direction = if cli.waning {
        CrescentDirection::Waning
    } else {
        CrescentDirection::Waxing
    };
    let thresholds = if cli.published {
        YallopThresholds::published()
    } else {
        YallopThresholds::relaxed()
    };
    let config = hilal::VisibilityConfigBuilder::new()
        .resolution(cli.resolution)
        .thresholds(thresholds)
        .build()?;
    let engine = HilalEngine::new().visibility_config(config);

    let grid = engine.visibility_grid(date, direction)?;
    println!("{direction} crescent, {date} ({} points)", grid.len());
    if let Some(nm) = grid.new_moon() {
        println!("previous new moon: {nm}");
    }
    print_map(&grid);

    if cli.months > 0 {
        let months = engine.upcoming_months(date, cli.months)?;
        println!();
        for m in &months {
            println!(
                "{:<22} {:<14} new moon {}  {}",
                m.label(),
                m.gregorian_label,
                m.new_moon.format("%Y-%m-%d %H:%M UTC"),
                m.route_path()
            );
        }
        if let Some(route) = nearest_month_route(&months, Utc::now()) {
            println!("nearest: {route}");
        }
    }
    Ok(())
}
