use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Args, Parser, Subcommand};
use reer_cli::app::{Planner, ScenarioArgs};
use reer_cli::{logging, render};
use rust_decimal::Decimal;
use tracing::debug;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// REER contribution planner.
///
/// Estimates the tax refund of a contribution under progressive brackets,
/// the interest paid on a loan taken to fund it, and the resulting net gain.
#[derive(Debug, Parser)]
#[command(name = "reer", version, about)]
struct Cli {
    /// Bracket table CSV (columns `threshold,rate`). Defaults to the
    /// built-in Québec + Federal 2026 table.
    #[arg(long, global = true)]
    brackets: Option<PathBuf>,

    /// Planner settings TOML file.
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    /// Append log output to this file.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Evaluate a single contribution.
    Estimate {
        #[command(flatten)]
        scenario: ScenarioOpts,

        /// Contribution amount; must be one of the offered options.
        #[arg(long)]
        contribution: Option<Decimal>,

        /// Print the result as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Evaluate every offered contribution amount.
    Sweep {
        #[command(flatten)]
        scenario: ScenarioOpts,

        #[arg(long)]
        json: bool,
    },

    /// Show the bracket table, and how an income splits across it.
    Brackets {
        #[arg(long)]
        income: Option<Decimal>,
    },

    /// Evaluate every scenario in a CSV file.
    Batch {
        /// CSV with columns `income,contribution,loan_rate,horizon_months`.
        file: PathBuf,

        #[arg(long)]
        json: bool,
    },

    /// List the planner inputs with their domains and defaults, as JSON.
    Inputs,
}

#[derive(Debug, Args)]
struct ScenarioOpts {
    /// Gross annual income.
    #[arg(long)]
    income: Option<Decimal>,

    /// Annual loan interest rate, in percent.
    #[arg(long)]
    rate: Option<Decimal>,

    /// Months to repay what the refund does not cover.
    #[arg(long)]
    months: Option<u32>,
}

impl ScenarioOpts {
    fn into_args(
        self,
        contribution: Option<Decimal>,
    ) -> ScenarioArgs {
        ScenarioArgs {
            income: self.income,
            contribution,
            rate_percent: self.rate,
            months: self.months.map(Decimal::from),
        }
    }
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose, cli.log_file.as_deref())?;

    let planner = Planner::load(cli.settings.as_deref(), cli.brackets.as_deref())?;
    debug!(command = ?cli.command, "running");

    match cli.command {
        Command::Estimate {
            scenario,
            contribution,
            json,
        } => {
            let result = planner.estimate(&scenario.into_args(contribution))?;
            if json {
                println!("{}", render::json(&result)?);
            } else {
                print!("{}", render::estimate_report(&result));
            }
        }
        Command::Sweep { scenario, json } => {
            let results = planner.sweep(&scenario.into_args(None))?;
            if json {
                println!("{}", render::json(&results)?);
            } else {
                println!("{}", render::sweep_table(&results));
            }
        }
        Command::Brackets { income } => {
            if let Some(label) = planner.table.label() {
                println!("{label}");
            }
            println!("{}", render::bracket_table(&planner.table));
            if let Some(income) = income {
                let slices = planner.table.tax_breakdown(income)?;
                let total = planner.table.compute_tax(income)?;
                println!("{}", render::breakdown_table(&slices));
                println!(
                    "Total tax on {}: {}",
                    render::dollars(income),
                    render::dollars(total)
                );
            }
        }
        Command::Batch { file, json } => {
            let results = planner.batch(&file)?;
            if json {
                println!("{}", render::json(&results)?);
            } else {
                for (idx, result) in results.iter().enumerate() {
                    println!("── scenario {} ──", idx + 1);
                    print!("{}", render::estimate_report(result));
                }
            }
        }
        Command::Inputs => {
            println!("{}", render::json(&planner.inputs)?);
        }
    }

    Ok(())
}
