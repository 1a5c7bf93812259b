use crate::error::Result;
use crate::utils::constants::{
    COLOMBIA_CENTER_LAT, COLOMBIA_CENTER_LON, DEFAULT_CONFIG_FILE, ENV_PREFIX,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Rendering and ranking tunables.
///
/// Classification thresholds, region boundaries and viability weights are
/// deliberately absent: they are fixed constants of the analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DashboardConfig {
    pub map: MapSettings,
    pub analysis: AnalysisSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapSettings {
    /// Climate map markers use `radius = value * climate_marker_scale`.
    pub climate_marker_scale: f64,
    pub region_zoom: u8,
    pub location_zoom: u8,
    pub fill_opacity: f64,
    pub heatmap_center_latitude: f64,
    pub heatmap_center_longitude: f64,
    pub heatmap_opacity: f64,
    pub heatmap_point_size: f64,
    pub percentile_high_radius: f64,
    pub percentile_low_base_radius: f64,
    pub percentile_low_radius_span: f64,
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            climate_marker_scale: 0.1,
            region_zoom: 6,
            location_zoom: 10,
            fill_opacity: 0.6,
            heatmap_center_latitude: COLOMBIA_CENTER_LAT,
            heatmap_center_longitude: COLOMBIA_CENTER_LON,
            heatmap_opacity: 0.15,
            heatmap_point_size: 3.0,
            percentile_high_radius: 8.0,
            percentile_low_base_radius: 4.0,
            percentile_low_radius_span: 10.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisSettings {
    pub top_sites: usize,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self { top_sites: 3 }
    }
}

impl DashboardConfig {
    /// Layer defaults, an optional TOML file and `SOLARIS__*` environment variables.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));
        debug!(file = %file.display(), "loading dashboard configuration");

        let settings = config::Config::builder()
            .add_source(config::File::from(file).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}
