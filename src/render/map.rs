use serde::Serialize;
use tracing::debug;

use crate::analyzers::{classify_three_tier, Band, PercentileCut, Tier};
use crate::config::MapSettings;
use crate::error::{DashboardError, Result};
use crate::models::{Dataset, Measurement};
use crate::processors::{location_means, LocationMean};
use crate::render::legend::{band_color, render_legend, tier_color, Legend, MarkerColor};
use crate::utils::constants::{HEATMAP_COLOR_SCALE, MAX_ZOOM, MIN_ZOOM};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerShape {
    Circle,
    Pin,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub shape: MarkerShape,
    pub latitude: f64,
    pub longitude: f64,
    pub radius: f64,
    pub color: MarkerColor,
    pub fill_opacity: f64,
    pub popup: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapView {
    pub title: String,
    pub center: GeoPoint,
    pub zoom: u8,
    pub markers: Vec<Marker>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legend: Option<Legend>,
}

impl MapView {
    pub fn count_color(&self, color: MarkerColor) -> usize {
        self.markers.iter().filter(|m| m.color == color).count()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PercentileMap {
    pub map: MapView,
    pub cut: PercentileCut,
    pub above: usize,
    pub below: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DensityPoint {
    pub latitude: f64,
    pub longitude: f64,
    pub value: f64,
}

/// Every record as a translucent point on a continuous color scale.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DensityMap {
    pub measurement: Measurement,
    pub center: GeoPoint,
    pub zoom: u8,
    pub color_scale: String,
    pub opacity: f64,
    pub point_size: f64,
    pub value_range: Option<(f64, f64)>,
    pub points: Vec<DensityPoint>,
}

pub struct MapRenderer {
    settings: MapSettings,
}

impl MapRenderer {
    pub fn new(settings: MapSettings) -> Self {
        Self { settings }
    }

    /// Three-tier map: color by tier, radius straight from the value.
    ///
    /// Radius is `value * climate_marker_scale` and ignores the tier, so two
    /// markers of one color can differ in size.
    pub fn climate_map(
        &self,
        dataset: &Dataset,
        measurement: Measurement,
        title: &str,
    ) -> Result<MapView> {
        let classification = classify_three_tier(dataset.records(), measurement)?;
        let peak = dataset.max_record(measurement)?;

        let markers = dataset
            .records()
            .iter()
            .zip(&classification.tiers)
            .filter_map(|(record, tier)| {
                let value = record.value(measurement)?;
                Some(Marker {
                    shape: MarkerShape::Circle,
                    latitude: record.latitude,
                    longitude: record.longitude,
                    radius: value * self.settings.climate_marker_scale,
                    color: tier_color(*tier),
                    fill_opacity: self.settings.fill_opacity,
                    popup: format!("{}: {:.2}", title, value),
                })
            })
            .collect();

        debug!(
            title,
            high = classification.count(Tier::High),
            medium = classification.count(Tier::Medium),
            low = classification.count(Tier::Low),
            "built climate map"
        );

        Ok(MapView {
            title: title.to_string(),
            center: GeoPoint {
                latitude: peak.latitude,
                longitude: peak.longitude,
            },
            zoom: self.settings.region_zoom,
            markers,
            legend: Some(render_legend(
                classification.thresholds.p50,
                classification.thresholds.p75,
                "Value",
            )),
        })
    }

    /// Per-location means split by a percentile of the unaggregated column.
    pub fn percentile_map(
        &self,
        dataset: &Dataset,
        measurement: Measurement,
        percentile_value: f64,
    ) -> Result<PercentileMap> {
        let cut = PercentileCut::from_values(&dataset.values(measurement)?, percentile_value)?;
        let means = location_means(dataset, measurement)?;
        if means.is_empty() {
            return Err(DashboardError::EmptyInput(format!(
                "{} has no locations",
                dataset.name()
            )));
        }

        let max_mean = means
            .iter()
            .map(|m| m.mean)
            .fold(f64::NEG_INFINITY, f64::max);
        let count = means.len() as f64;
        let center = GeoPoint {
            latitude: means.iter().map(|m| m.latitude).sum::<f64>() / count,
            longitude: means.iter().map(|m| m.longitude).sum::<f64>() / count,
        };

        let marker_for = |lat: f64, lon: f64, mean: f64, band: Band| {
            let radius = match band {
                Band::Above => self.settings.percentile_high_radius,
                Band::Below => {
                    let ratio = if max_mean > 0.0 { mean / max_mean } else { 0.0 };
                    self.settings.percentile_low_base_radius
                        + ratio * self.settings.percentile_low_radius_span
                }
            };
            Marker {
                shape: MarkerShape::Circle,
                latitude: lat,
                longitude: lon,
                radius,
                color: band_color(band),
                fill_opacity: self.settings.fill_opacity,
                popup: format!(
                    "Lat: {:?} - Lon: {:?}<br>Mean {}: {:.2}",
                    lat,
                    lon,
                    measurement.column_name(),
                    mean
                ),
            }
        };

        let mean_values: Vec<f64> = means.iter().map(|m| m.mean).collect();
        let (above, below): (Vec<(&LocationMean, Band)>, Vec<(&LocationMean, Band)>) = means
            .iter()
            .zip(cut.bands(&mean_values))
            .partition(|(_, band)| *band == Band::Above);

        let markers: Vec<Marker> = above
            .iter()
            .chain(below.iter())
            .map(|(m, band)| marker_for(m.latitude, m.longitude, m.mean, *band))
            .collect();

        let percent = (percentile_value * 100.0).round();
        Ok(PercentileMap {
            map: MapView {
                title: format!("Points above and below percentile {}", percent),
                center,
                zoom: self.settings.region_zoom,
                markers,
                legend: None,
            },
            cut,
            above: above.len(),
            below: below.len(),
        })
    }

    pub fn location_map(&self, latitude: f64, longitude: f64) -> MapView {
        MapView {
            title: "Location map".to_string(),
            center: GeoPoint {
                latitude,
                longitude,
            },
            zoom: self.settings.location_zoom,
            markers: vec![Marker {
                shape: MarkerShape::Pin,
                latitude,
                longitude,
                radius: 0.0,
                color: MarkerColor::Blue,
                fill_opacity: 1.0,
                popup: format!("Lat: {:?}, Lon: {:?}", latitude, longitude),
            }],
            legend: None,
        }
    }

    pub fn density_map(
        &self,
        dataset: &Dataset,
        measurement: Measurement,
        zoom: u8,
    ) -> Result<DensityMap> {
        if !(MIN_ZOOM..=MAX_ZOOM).contains(&zoom) {
            return Err(DashboardError::InvalidParameter(format!(
                "zoom must be between {} and {}, got {}",
                MIN_ZOOM, MAX_ZOOM, zoom
            )));
        }
        dataset.require(measurement)?;

        let points: Vec<DensityPoint> = dataset
            .records()
            .iter()
            .filter_map(|r| {
                Some(DensityPoint {
                    latitude: r.latitude,
                    longitude: r.longitude,
                    value: r.value(measurement)?,
                })
            })
            .collect();

        let value_range = points.iter().map(|p| p.value).fold(None, |range, v| match range {
            None => Some((v, v)),
            Some((lo, hi)) => Some((f64::min(lo, v), f64::max(hi, v))),
        });

        Ok(DensityMap {
            measurement,
            center: GeoPoint {
                latitude: self.settings.heatmap_center_latitude,
                longitude: self.settings.heatmap_center_longitude,
            },
            zoom,
            color_scale: HEATMAP_COLOR_SCALE.to_string(),
            opacity: self.settings.heatmap_opacity,
            point_size: self.settings.heatmap_point_size,
            value_range,
            points,
        })
    }
}
