use std::path::PathBuf;

use anyhow::Context;
use chrono::{NaiveDate, Utc};
use clap::{ArgGroup, Parser, Subcommand};

mod models;
mod progress;
mod report;
mod source;

#[derive(Parser)]
#[command(name = "progress-rollup")]
#[command(about = "Weighted task progress rollup for project tracking", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a starter task file
    Init {
        #[arg(long, default_value = "tasks.csv")]
        out: PathBuf,
    },
    /// Show schedule health across tasks
    #[command(group(
        ArgGroup::new("elapsed")
            .args(["days_elapsed", "start_date"])
            .required(true)
            .multiple(false)
    ))]
    Status {
        #[arg(long)]
        tasks: PathBuf,
        #[arg(long)]
        days_elapsed: Option<i64>,
        #[arg(long)]
        start_date: Option<NaiveDate>,
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
    /// Generate a markdown report
    #[command(group(
        ArgGroup::new("elapsed")
            .args(["days_elapsed", "start_date"])
            .required(true)
            .multiple(false)
    ))]
    Report {
        #[arg(long)]
        tasks: PathBuf,
        #[arg(long)]
        days_elapsed: Option<i64>,
        #[arg(long)]
        start_date: Option<NaiveDate>,
        #[arg(long)]
        project: Option<String>,
        #[arg(long, default_value = "report.md")]
        out: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Init { out } => {
            let written = source::write_starter(&out)?;
            println!("Wrote {written} starter tasks to {}.", out.display());
        }
        Commands::Status {
            tasks,
            days_elapsed,
            start_date,
            limit,
        } => {
            let records = source::load_tasks(&tasks)?;
            let days = resolve_days_elapsed(days_elapsed, start_date)?;
            let (results, summary) = progress::aggregate(&records, days)
                .with_context(|| format!("invalid task data in {}", tasks.display()))?;

            if results.is_empty() {
                println!("No tasks found in {}.", tasks.display());
                return Ok(());
            }

            println!(
                "Day {}: {}% actual against {}% expected (gap {:+}%, total weight {})",
                days,
                summary.total_actual,
                summary.total_expected,
                summary.total_gap,
                summary.total_weight
            );

            let mut by_gap: Vec<_> = results.iter().collect();
            by_gap.sort_by_key(|r| r.gap);

            println!("Tasks most behind schedule:");
            for result in by_gap.iter().take(limit) {
                println!(
                    "- {} [{}] {}% actual, {}% expected, gap {:+}, {}",
                    result.name,
                    result.id,
                    result.progress,
                    result.expected,
                    result.gap,
                    result.status
                );
            }
        }
        Commands::Report {
            tasks,
            days_elapsed,
            start_date,
            project,
            out,
        } => {
            let records = source::load_tasks(&tasks)?;
            let days = resolve_days_elapsed(days_elapsed, start_date)?;
            let (results, summary) = progress::aggregate(&records, days)
                .with_context(|| format!("invalid task data in {}", tasks.display()))?;
            let report = report::build_report(project.as_deref(), days, &results, &summary);
            std::fs::write(&out, report)?;
            println!("Report written to {}.", out.display());
        }
    }

    Ok(())
}

fn resolve_days_elapsed(
    days_elapsed: Option<i64>,
    start_date: Option<NaiveDate>,
) -> anyhow::Result<i64> {
    if let Some(days) = days_elapsed {
        return Ok(days);
    }

    let start = start_date.context("either --days-elapsed or --start-date is required")?;
    Ok((Utc::now().date_naive() - start).num_days())
}
