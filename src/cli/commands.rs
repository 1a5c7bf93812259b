use std::path::{Path, PathBuf};

use tracing::{info, warn, Level};

use crate::cli::args::{Cli, Commands, OutputFormat};
use crate::config::DashboardConfig;
use crate::dashboard::{
    AppState, PercentileChoice, UploadSlot, View, ViewDispatcher, ViewOutput, VisualizationParams,
};
use crate::error::Result;
use crate::readers::ClimateCsvReader;
use crate::utils::filename::generate_default_output_filename;
use crate::utils::progress::ProgressReporter;

pub fn run(cli: Cli) -> Result<()> {
    init_logging(cli.verbose);

    let config = DashboardConfig::load(cli.config.as_deref())?;
    let state = load_uploads(&cli)?;

    for warning in state.missing_uploads() {
        warn!("{}", warning);
        eprintln!("⚠️  {}", warning);
    }

    let view = view_for(&cli.command)?;
    let dispatcher = ViewDispatcher::new(config);
    let output = dispatcher.render(&state, &view)?;

    let rendered = match cli.format {
        OutputFormat::Text => format!("{}\n{}", view.title(), output.summary()),
        OutputFormat::Json => serde_json::to_string_pretty(&output)?,
    };

    let target = match (&cli.output, cli.save) {
        (Some(path), _) => Some(path.clone()),
        (None, true) => Some(generate_default_output_filename(view.slug())),
        (None, false) => None,
    };
    match target {
        None => println!("{}", rendered),
        Some(path) => {
            write_output(&path, &output, cli.format, &rendered)?;
            println!("Wrote {} view to {}", view.slug(), path.display());
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    // A subscriber may already be installed when driven from tests.
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Parse every file given on the command line into its upload slot.
pub fn load_uploads(cli: &Cli) -> Result<AppState> {
    let uploads: Vec<(UploadSlot, &PathBuf)> = [
        (UploadSlot::Unified, cli.unified.as_ref()),
        (UploadSlot::Humidity, cli.humidity.as_ref()),
        (UploadSlot::Precipitation, cli.precipitation.as_ref()),
        (UploadSlot::Temperature, cli.temperature.as_ref()),
        (UploadSlot::Correlation, cli.correlation.as_ref()),
    ]
    .into_iter()
    .filter_map(|(slot, path)| Some((slot, path?)))
    .collect();

    let mut state = AppState::new();
    if uploads.is_empty() {
        return Ok(state);
    }

    let progress = ProgressReporter::new_spinner("Loading uploads...", cli.quiet);
    let reader = ClimateCsvReader::new();
    let mut records = 0;
    for (slot, path) in uploads {
        progress.set_message(&format!("Reading {}", path.display()));
        let dataset = reader.read_path(path)?;
        records += dataset.len();
        state.upload(slot, dataset);
    }
    progress.finish_with_message(&format!("Loaded {} records", records));

    Ok(state)
}

pub fn view_for(command: &Commands) -> Result<View> {
    let view = match command {
        Commands::Home => View::Home,
        Commands::Data { limit } => View::Data { limit: *limit },
        Commands::Visualize {
            year,
            from,
            to,
            lat,
            lon,
        } => View::Visualization(VisualizationParams {
            year: *year,
            date_range: from.zip(*to),
            latitude: *lat,
            longitude: *lon,
        }),
        Commands::MainMap { zoom } => View::MainMap { zoom: *zoom },
        Commands::ClimateMap { layer } => View::ClimateMaps {
            layer: (*layer).into(),
        },
        Commands::Analysis => View::DetailedAnalysis,
        Commands::Correlation => View::CorrelationMatrix,
        Commands::Percentiles { percentile } => View::Percentiles {
            percentile: PercentileChoice::from_percent(*percentile)?,
        },
    };
    Ok(view)
}

fn write_output(
    path: &Path,
    output: &ViewOutput,
    format: OutputFormat,
    rendered: &str,
) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    match format {
        OutputFormat::Json => {
            let file = std::fs::File::create(path)?;
            serde_json::to_writer_pretty(file, output)?;
        }
        OutputFormat::Text => std::fs::write(path, rendered)?,
    }

    info!(path = %path.display(), "view written");
    Ok(())
}
