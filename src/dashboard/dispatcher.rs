use tracing::{debug, info};

use crate::analyzers::{correlation_matrix, label_regions, top_sites, CORRELATION_COLUMNS};
use crate::config::DashboardConfig;
use crate::dashboard::state::{AppState, UploadSlot};
use crate::dashboard::view::{
    AnalysisOutput, DataTable, HomePage, View, ViewOutput, VisualizationOutput,
    VisualizationParams,
};
use crate::error::{DashboardError, Result};
use crate::models::{Dataset, Measurement};
use crate::processors::DatasetFilter;
use crate::render::{ChartRenderer, MapRenderer};

const WELCOME: &str = "Dashboard for analysing candidate solar-park zones in Colombia \
from NASA POWER climate data.";

const SECTIONS: [&str; 3] = [
    "Data table: the uploaded records with their date and region",
    "Interactive maps: solar radiation, climate layers and percentiles",
    "Visual and statistical analysis: regional means, best sites and correlations",
];

/// Turns a menu selection plus the session's datasets into renderable output.
pub struct ViewDispatcher {
    config: DashboardConfig,
    maps: MapRenderer,
    charts: ChartRenderer,
}

impl ViewDispatcher {
    pub fn new(config: DashboardConfig) -> Self {
        let maps = MapRenderer::new(config.map.clone());
        Self {
            config,
            maps,
            charts: ChartRenderer::new(),
        }
    }

    pub fn render(&self, state: &AppState, view: &View) -> Result<ViewOutput> {
        info!(view = view.slug(), "rendering view");

        match view {
            View::Home => Ok(ViewOutput::Home(HomePage {
                title: view.title().to_string(),
                welcome: WELCOME.to_string(),
                sections: SECTIONS.iter().map(|s| s.to_string()).collect(),
            })),
            View::Data { limit } => {
                let dataset = state.require(UploadSlot::Unified)?;
                Ok(ViewOutput::Data(self.data_table(dataset, *limit)))
            }
            View::Visualization(params) => {
                let dataset = state.require(UploadSlot::Unified)?;
                self.visualization(dataset, params)
                    .map(ViewOutput::Visualization)
            }
            View::MainMap { zoom } => {
                let dataset = state.require(UploadSlot::Unified)?;
                self.maps
                    .density_map(dataset, Measurement::SolarIrradiance, *zoom)
                    .map(ViewOutput::MainMap)
            }
            View::ClimateMaps { layer } => {
                let dataset = state.require(layer.slot())?;
                self.maps
                    .climate_map(dataset, layer.measurement(), layer.title())
                    .map(ViewOutput::ClimateMap)
            }
            View::DetailedAnalysis => {
                let dataset = state.require(UploadSlot::Unified)?;
                let region_chart = self
                    .charts
                    .region_bar_chart(dataset, Measurement::ClarityIndex)?;
                let top_sites = top_sites(dataset, self.config.analysis.top_sites)?;
                Ok(ViewOutput::Analysis(AnalysisOutput {
                    region_chart,
                    top_sites,
                }))
            }
            View::CorrelationMatrix => {
                let dataset = state.require(UploadSlot::Correlation)?;
                let matrix = correlation_matrix(dataset, &CORRELATION_COLUMNS)?;
                Ok(ViewOutput::Correlation(
                    self.charts.correlation_heatmap(&matrix),
                ))
            }
            View::Percentiles { percentile } => {
                let dataset = state.require(UploadSlot::Unified)?;
                self.maps
                    .percentile_map(dataset, Measurement::SolarIrradiance, percentile.value())
                    .map(ViewOutput::Percentiles)
            }
        }
    }

    fn data_table(&self, dataset: &Dataset, limit: Option<usize>) -> DataTable {
        let mut columns = dataset.column_names();
        columns.push("date".to_string());
        columns.push("Region".to_string());

        let mut rows = label_regions(dataset);
        if let Some(limit) = limit {
            rows.truncate(limit);
        }

        DataTable {
            dataset: dataset.name().to_string(),
            columns,
            total_rows: dataset.len(),
            rows,
        }
    }

    /// Year, then date range, then location; each unset selector takes the
    /// first option left by the previous one.
    fn visualization(
        &self,
        dataset: &Dataset,
        params: &VisualizationParams,
    ) -> Result<VisualizationOutput> {
        let years = dataset.unique_years();
        let year = match params.year {
            Some(year) if years.contains(&year) => year,
            Some(year) => {
                return Err(DashboardError::InvalidParameter(format!(
                    "year {} is not present in {}",
                    year,
                    dataset.name()
                )))
            }
            None => *years.first().ok_or_else(|| {
                DashboardError::EmptyInput(format!("{} has no records", dataset.name()))
            })?,
        };

        let year_slice = DatasetFilter::new().with_year(year).apply(dataset);
        let (start, end) = match params.date_range {
            Some(range) => range,
            None => year_slice.date_bounds().ok_or_else(|| {
                DashboardError::EmptyInput(format!("no records for year {}", year))
            })?,
        };

        let date_slice = DatasetFilter::new()
            .with_date_range(start, end)?
            .apply(&year_slice);
        let latitude = params
            .latitude
            .or_else(|| date_slice.unique_latitudes().first().copied());
        let longitude = params
            .longitude
            .or_else(|| date_slice.unique_longitudes().first().copied());
        let (latitude, longitude) = match (latitude, longitude) {
            (Some(lat), Some(lon)) => (lat, lon),
            _ => {
                return Err(DashboardError::EmptyInput(format!(
                    "no records between {} and {}",
                    start, end
                )))
            }
        };

        let location_slice = DatasetFilter::new()
            .with_location(latitude, longitude)
            .apply(&date_slice);
        if location_slice.is_empty() {
            return Err(DashboardError::EmptyInput(format!(
                "no records at Lat: {:?}, Lon: {:?} between {} and {}",
                latitude, longitude, start, end
            )));
        }
        debug!(
            year,
            %start,
            %end,
            latitude,
            longitude,
            records = location_slice.len(),
            "visualization slice"
        );

        let title = format!(
            "Irradiance at Lat: {:?} and Lon: {:?} for {}",
            latitude, longitude, year
        );
        let chart =
            self.charts
                .time_series(&location_slice, &[Measurement::SolarIrradiance], &title)?;

        Ok(VisualizationOutput {
            year,
            date_range: (start, end),
            latitude,
            longitude,
            map: self.maps.location_map(latitude, longitude),
            chart,
        })
    }
}
