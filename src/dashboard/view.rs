use chrono::NaiveDate;
use serde::Serialize;

use crate::analyzers::{RankedSite, RegionalRecord};
use crate::dashboard::state::UploadSlot;
use crate::error::{DashboardError, Result};
use crate::models::Measurement;
use crate::render::{
    BarChart, DensityMap, HeatmapChart, MapView, MarkerColor, PercentileMap, TimeSeriesChart,
};

/// Layers of the climate maps menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ClimateLayer {
    Humidity,
    Precipitation,
    Temperature,
}

impl ClimateLayer {
    pub fn slot(&self) -> UploadSlot {
        match self {
            ClimateLayer::Humidity => UploadSlot::Humidity,
            ClimateLayer::Precipitation => UploadSlot::Precipitation,
            ClimateLayer::Temperature => UploadSlot::Temperature,
        }
    }

    pub fn measurement(&self) -> Measurement {
        match self {
            ClimateLayer::Humidity => Measurement::Humidity,
            ClimateLayer::Precipitation => Measurement::Precipitation,
            ClimateLayer::Temperature => Measurement::Temperature,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ClimateLayer::Humidity => "Humidity",
            ClimateLayer::Precipitation => "Precipitation",
            ClimateLayer::Temperature => "Temperature",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PercentileChoice {
    P75,
    P50,
}

impl PercentileChoice {
    pub fn from_percent(percent: u8) -> Result<Self> {
        match percent {
            75 => Ok(PercentileChoice::P75),
            50 => Ok(PercentileChoice::P50),
            other => Err(DashboardError::InvalidParameter(format!(
                "percentile must be 75 or 50, got {}",
                other
            ))),
        }
    }

    pub fn value(&self) -> f64 {
        match self {
            PercentileChoice::P75 => 0.75,
            PercentileChoice::P50 => 0.50,
        }
    }
}

/// Selector values for the visualization view; `None` takes the first option.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VisualizationParams {
    pub year: Option<i32>,
    pub date_range: Option<(NaiveDate, NaiveDate)>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// One entry of the dashboard menu.
#[derive(Debug, Clone, PartialEq)]
pub enum View {
    Home,
    Data { limit: Option<usize> },
    Visualization(VisualizationParams),
    MainMap { zoom: u8 },
    ClimateMaps { layer: ClimateLayer },
    DetailedAnalysis,
    CorrelationMatrix,
    Percentiles { percentile: PercentileChoice },
}

impl View {
    pub fn slug(&self) -> &'static str {
        match self {
            View::Home => "home",
            View::Data { .. } => "data",
            View::Visualization(_) => "visualization",
            View::MainMap { .. } => "main-map",
            View::ClimateMaps { .. } => "climate-maps",
            View::DetailedAnalysis => "analysis",
            View::CorrelationMatrix => "correlation",
            View::Percentiles { .. } => "percentiles",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            View::Home => "Welcome!",
            View::Data { .. } => "Available data",
            View::Visualization(_) => "Climate data visualization",
            View::MainMap { .. } => "Solar radiation heat map",
            View::ClimateMaps { .. } => "Humidity, precipitation and temperature maps",
            View::DetailedAnalysis => "Climate data analysis",
            View::CorrelationMatrix => "Correlation matrix",
            View::Percentiles { .. } => "Irradiance percentile map",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HomePage {
    pub title: String,
    pub welcome: String,
    pub sections: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataTable {
    pub dataset: String,
    pub columns: Vec<String>,
    pub total_rows: usize,
    pub rows: Vec<RegionalRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisualizationOutput {
    pub year: i32,
    pub date_range: (NaiveDate, NaiveDate),
    pub latitude: f64,
    pub longitude: f64,
    pub map: MapView,
    pub chart: TimeSeriesChart,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisOutput {
    pub region_chart: BarChart,
    pub top_sites: Vec<RankedSite>,
}

/// Everything a view hands to the rendering surface.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum ViewOutput {
    Home(HomePage),
    Data(DataTable),
    Visualization(VisualizationOutput),
    MainMap(DensityMap),
    ClimateMap(MapView),
    Analysis(AnalysisOutput),
    Correlation(HeatmapChart),
    Percentiles(PercentileMap),
}

impl ViewOutput {
    /// Plain-text rendering for terminals.
    pub fn summary(&self) -> String {
        match self {
            ViewOutput::Home(page) => {
                let sections: Vec<String> =
                    page.sections.iter().map(|s| format!("- {}", s)).collect();
                format!("{}\n{}\n\n{}", page.title, page.welcome, sections.join("\n"))
            }
            ViewOutput::Data(table) => {
                let mut lines = vec![
                    format!(
                        "{}: showing {} of {} rows",
                        table.dataset,
                        table.rows.len(),
                        table.total_rows
                    ),
                    table.columns.join(" | "),
                ];
                for row in &table.rows {
                    let r = &row.record;
                    lines.push(format!(
                        "{} | {:.4} | {:.4} | {} | {}",
                        r.date,
                        r.latitude,
                        r.longitude,
                        row.region,
                        r.values
                            .pairs()
                            .iter()
                            .map(|(m, v)| format!("{}={:.2}", m, v))
                            .collect::<Vec<_>>()
                            .join(" ")
                    ));
                }
                lines.join("\n")
            }
            ViewOutput::Visualization(output) => {
                let points = output.chart.series.first().map_or(0, |s| s.points.len());
                format!(
                    "Showing data for year {} ({} to {})\n{}\nLocation map: {}\nChart: {} points",
                    output.year,
                    output.date_range.0,
                    output.date_range.1,
                    output.chart.title,
                    output
                        .map
                        .markers
                        .first()
                        .map_or_else(String::new, |m| m.popup.clone()),
                    points
                )
            }
            ViewOutput::MainMap(map) => {
                let range = map.value_range.map_or_else(
                    || "no values".to_string(),
                    |(lo, hi)| format!("{:.2} to {:.2}", lo, hi),
                );
                format!(
                    "{} points of {} ({}), centered at {:.4}, {:.4}, zoom {}",
                    map.points.len(),
                    map.measurement.column_name(),
                    range,
                    map.center.latitude,
                    map.center.longitude,
                    map.zoom
                )
            }
            ViewOutput::ClimateMap(map) => {
                let mut lines = vec![format!(
                    "{} map: {} markers ({} green, {} orange, {} red), centered at {:.4}, {:.4}",
                    map.title,
                    map.markers.len(),
                    map.count_color(MarkerColor::Green),
                    map.count_color(MarkerColor::Orange),
                    map.count_color(MarkerColor::Red),
                    map.center.latitude,
                    map.center.longitude
                )];
                if let Some(legend) = &map.legend {
                    lines.push(legend.title.clone());
                    lines.extend(legend.lines());
                }
                lines.join("\n")
            }
            ViewOutput::Analysis(output) => {
                let mut lines = vec![output.region_chart.title.clone()];
                for bar in &output.region_chart.bars {
                    lines.push(format!("  {:<10} {:.2}", bar.label, bar.value));
                }
                for site in &output.top_sites {
                    lines.push(format!(
                        "{}: {} ({})",
                        site.label(),
                        site.score_text(),
                        site.location_text()
                    ));
                }
                lines.join("\n")
            }
            ViewOutput::Correlation(chart) => {
                let mut lines = vec![chart.title.clone()];
                for (label, row) in chart.labels.iter().zip(&chart.annotations) {
                    lines.push(format!("{:<18} {}", label, row.join("  ")));
                }
                lines.join("\n")
            }
            ViewOutput::Percentiles(result) => format!(
                "{}\nThreshold (p{:.0}): {:.4}\n{} locations above, {} below",
                result.map.title,
                result.cut.percentile * 100.0,
                result.cut.threshold,
                result.above,
                result.below
            ),
        }
    }
}
