use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::dashboard::ClimateLayer;
use crate::utils::constants::{DEFAULT_ZOOM, MAX_ZOOM, MIN_ZOOM};

#[derive(Parser)]
#[command(name = "solaris")]
#[command(about = "Climate maps and charts for locating solar farm sites in Colombia")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, help = "Unified NASA POWER CSV (irradiance and clarity)")]
    pub unified: Option<PathBuf>,

    #[arg(long, global = true, help = "Humidity CSV (RH2M)")]
    pub humidity: Option<PathBuf>,

    #[arg(long, global = true, help = "Precipitation CSV (PRECTOTCORR)")]
    pub precipitation: Option<PathBuf>,

    #[arg(long, global = true, help = "Temperature CSV (T2M)")]
    pub temperature: Option<PathBuf>,

    #[arg(long, global = true, help = "CSV with every column of the correlation matrix")]
    pub correlation: Option<PathBuf>,

    #[arg(long, global = true, help = "Configuration file [default: solaris.toml]")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    #[arg(short, long, global = true, help = "Write the view to this file")]
    pub output: Option<PathBuf>,

    #[arg(
        long,
        global = true,
        conflicts_with = "output",
        help = "Write the view to output/solaris-{view}-{YYMMDD}.json"
    )]
    pub save: bool,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(short, long, global = true, help = "Hide the progress spinner")]
    pub quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LayerArg {
    Humidity,
    Precipitation,
    Temperature,
}

impl From<LayerArg> for ClimateLayer {
    fn from(layer: LayerArg) -> Self {
        match layer {
            LayerArg::Humidity => ClimateLayer::Humidity,
            LayerArg::Precipitation => ClimateLayer::Precipitation,
            LayerArg::Temperature => ClimateLayer::Temperature,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Welcome page and list of sections
    Home,

    /// Table of the unified dataset with date and region columns
    Data {
        #[arg(short, long, help = "Maximum rows to show")]
        limit: Option<usize>,
    },

    /// Location map and irradiance time series for one site
    Visualize {
        #[arg(long, help = "Year [default: first year in the data]")]
        year: Option<i32>,

        #[arg(long, requires = "to", help = "Start date (YYYY-MM-DD)")]
        from: Option<NaiveDate>,

        #[arg(long, requires = "from", help = "End date (YYYY-MM-DD)")]
        to: Option<NaiveDate>,

        #[arg(long, allow_hyphen_values = true)]
        lat: Option<f64>,

        #[arg(long, allow_hyphen_values = true)]
        lon: Option<f64>,
    },

    /// Solar radiation heat map over Colombia
    MainMap {
        #[arg(
            short,
            long,
            default_value_t = DEFAULT_ZOOM,
            value_parser = clap::value_parser!(u8).range(MIN_ZOOM as i64..=MAX_ZOOM as i64)
        )]
        zoom: u8,
    },

    /// Three-tier humidity, precipitation or temperature map
    ClimateMap {
        #[arg(short, long, value_enum)]
        layer: LayerArg,
    },

    /// Regional clarity means and best viability sites
    Analysis,

    /// Pearson correlation matrix of the correlation upload
    Correlation,

    /// Locations above and below an irradiance percentile
    Percentiles {
        #[arg(short, long, default_value_t = 75, help = "Percentile (75 or 50)")]
        percentile: u8,
    },
}
