use chrono::NaiveDate;
use serde::Serialize;

use crate::analyzers::CorrelationMatrix;
use crate::error::Result;
use crate::models::{Dataset, Measurement};
use crate::processors::region_means;
use crate::utils::constants::{CORRELATION_COLOR_SCALE, LINE_CHART_TEMPLATE};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimePoint {
    pub date: NaiveDate,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub name: String,
    pub points: Vec<TimePoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeSeriesChart {
    pub title: String,
    pub x: String,
    pub template: String,
    pub series: Vec<Series>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bar {
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub bars: Vec<Bar>,
}

/// Annotated square heatmap, one cell per column pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatmapChart {
    pub title: String,
    pub labels: Vec<String>,
    pub values: Vec<Vec<f64>>,
    pub annotations: Vec<Vec<String>>,
    pub color_scale: String,
}

pub struct ChartRenderer;

impl ChartRenderer {
    pub fn new() -> Self {
        Self
    }

    /// One line per measurement over `date`, in record order.
    pub fn time_series(
        &self,
        dataset: &Dataset,
        columns: &[Measurement],
        title: &str,
    ) -> Result<TimeSeriesChart> {
        let series = columns
            .iter()
            .map(|m| -> Result<Series> {
                dataset.require(*m)?;
                Ok(Series {
                    name: m.column_name().to_string(),
                    points: dataset
                        .records()
                        .iter()
                        .filter_map(|r| {
                            Some(TimePoint {
                                date: r.date,
                                value: r.value(*m)?,
                            })
                        })
                        .collect(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(TimeSeriesChart {
            title: title.to_string(),
            x: "date".to_string(),
            template: LINE_CHART_TEMPLATE.to_string(),
            series,
        })
    }

    pub fn region_bar_chart(&self, dataset: &Dataset, measurement: Measurement) -> Result<BarChart> {
        let bars = region_means(dataset, measurement)?
            .into_iter()
            .map(|(region, mean)| Bar {
                label: region.label().to_string(),
                value: mean,
            })
            .collect();

        Ok(BarChart {
            title: format!("Mean {} by region", measurement.column_name()),
            x_label: "Region".to_string(),
            y_label: measurement.column_name().to_string(),
            bars,
        })
    }

    pub fn correlation_heatmap(&self, matrix: &CorrelationMatrix) -> HeatmapChart {
        HeatmapChart {
            title: "Correlation matrix".to_string(),
            labels: matrix.labels.clone(),
            values: matrix.values.clone(),
            annotations: matrix
                .values
                .iter()
                .map(|row| row.iter().map(|v| format!("{:.2}", v)).collect())
                .collect(),
            color_scale: CORRELATION_COLOR_SCALE.to_string(),
        }
    }
}

impl Default for ChartRenderer {
    fn default() -> Self {
        Self::new()
    }
}
