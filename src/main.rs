//! Tourism dashboard CLI - Render dashboard views as JSON
//!
//! Usage:
//!   tourism-dashboard <dataset.json> overview
//!   tourism-dashboard <dataset.json> international --region Asie --year 2023
//!   tourism-dashboard <dataset.json> compare Chine Japon --page economic

use std::path::PathBuf;
use std::process::ExitCode;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;

use tourism_dashboard_lib::analytics::{Metric, SortOrder};
use tourism_dashboard_lib::dashboard::{self, InternationalParams, RegionalParams};
use tourism_dashboard_lib::{bootstrap, DashboardState, ErrorResponse, Result};

#[derive(Parser)]
#[command(name = "tourism-dashboard")]
#[command(about = "Aggregated views over French international-tourism statistics")]
#[command(version)]
struct Cli {
    /// Path to the cleaned JSON dataset
    dataset: PathBuf,

    /// Directory holding dashboard.yaml
    #[arg(short, long)]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Home page figures
    Overview,

    /// Values offered by the selection widgets
    Options,

    /// Regional page over a month range
    Regional {
        /// First month (YYYY-MM-DD)
        #[arg(long)]
        start: Option<NaiveDate>,

        /// Last month (YYYY-MM-DD)
        #[arg(long)]
        end: Option<NaiveDate>,

        #[arg(short, long, default_value = "tourists")]
        metric: MetricArg,
    },

    /// Monthly volume of the given regions
    Evolution { regions: Vec<String> },

    /// International page for a region and year
    International {
        #[arg(short, long, default_value = "")]
        region: String,

        #[arg(short, long)]
        year: Option<i32>,

        #[arg(short, long, default_value = "tourists")]
        metric: MetricArg,
    },

    /// Country ranking
    Ranking {
        #[arg(short, long, default_value = "")]
        region: String,

        /// Ignored on the economic page
        #[arg(short, long)]
        year: Option<i32>,

        #[arg(short, long, default_value = "tourists")]
        metric: MetricArg,

        /// Number of countries, clamped to the configured bounds
        #[arg(short)]
        n: Option<usize>,

        /// Smallest first
        #[arg(long)]
        ascending: bool,

        #[arg(short, long, default_value = "international")]
        page: Page,
    },

    /// Side-by-side country comparison
    Compare {
        countries: Vec<String>,

        #[arg(short, long, default_value = "")]
        region: String,

        /// Ignored on the economic page
        #[arg(short, long)]
        year: Option<i32>,

        #[arg(short, long, default_value = "international")]
        page: Page,
    },

    /// Economic page for a region
    Economic {
        #[arg(short, long, default_value = "")]
        region: String,
    },

    /// Market insights for a region
    Insights {
        #[arg(short, long, default_value = "")]
        region: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum MetricArg {
    Tourists,
    Stays,
    Duration,
    Intensity,
}

impl From<MetricArg> for Metric {
    fn from(arg: MetricArg) -> Self {
        match arg {
            MetricArg::Tourists => Metric::TouristCount,
            MetricArg::Stays => Metric::OvernightStays,
            MetricArg::Duration => Metric::AvgStayDuration,
            MetricArg::Intensity => Metric::EconomicIntensity,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Page {
    International,
    Economic,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let response = ErrorResponse::from(&e);
            match serde_json::to_string(&response) {
                Ok(json) => eprintln!("{}", json),
                Err(_) => eprintln!("{}: {}", response.code, response.message),
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let state = bootstrap(&cli.dataset, cli.config_dir.as_deref())?;

    match cli.command {
        Commands::Overview => print_json(&dashboard::overview(&state)),
        Commands::Options => print_json(&state.filter_options()),
        Commands::Regional { start, end, metric } => {
            let params = RegionalParams {
                start,
                end,
                metric: metric.into(),
            };
            print_json(&dashboard::regional_view(&state, &params)?)
        }
        Commands::Evolution { regions } => {
            print_json(&dashboard::regional_evolution(&state, &regions))
        }
        Commands::International {
            region,
            year,
            metric,
        } => {
            let params = InternationalParams { region, year };
            print_json(&dashboard::international_view(&state, &params, metric.into()))
        }
        Commands::Ranking {
            region,
            year,
            metric,
            n,
            ascending,
            page,
        } => cmd_ranking(&state, region, year, metric.into(), n, ascending, page),
        Commands::Compare {
            countries,
            region,
            year,
            page,
        } => match page {
            Page::International => {
                let params = InternationalParams { region, year };
                print_json(&dashboard::international_comparison(&state, &params, &countries))
            }
            Page::Economic => {
                print_json(&dashboard::economic_comparison(&state, &region, &countries))
            }
        },
        Commands::Economic { region } => print_json(&dashboard::economic_view(&state, &region)),
        Commands::Insights { region } => {
            print_json(&dashboard::economic_insights(&state, &region))
        }
    }
}

fn cmd_ranking(
    state: &DashboardState,
    region: String,
    year: Option<i32>,
    metric: Metric,
    n: Option<usize>,
    ascending: bool,
    page: Page,
) -> Result<()> {
    let ranking = match page {
        Page::International => {
            let order = if ascending {
                SortOrder::Ascending
            } else {
                SortOrder::Descending
            };
            let params = InternationalParams { region, year };
            dashboard::international_ranking(state, &params, metric, n, order)
        }
        Page::Economic => dashboard::economic_ranking(state, &region, metric, n),
    };
    print_json(&ranking)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
