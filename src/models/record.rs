use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{DashboardError, Result};
use crate::models::Measurement;

/// Measurement cells of one row; absent columns stay `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MeasurementValues {
    #[serde(rename = "ALLSKY_KT", skip_serializing_if = "Option::is_none", default)]
    pub solar_irradiance: Option<f64>,

    #[serde(rename = "ALLSKY_SFC_SW_DWN", skip_serializing_if = "Option::is_none", default)]
    pub clarity_index: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub humidity: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub precipitation: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub temperature: Option<f64>,
}

impl MeasurementValues {
    pub fn get(&self, measurement: Measurement) -> Option<f64> {
        match measurement {
            Measurement::SolarIrradiance => self.solar_irradiance,
            Measurement::ClarityIndex => self.clarity_index,
            Measurement::Humidity => self.humidity,
            Measurement::Precipitation => self.precipitation,
            Measurement::Temperature => self.temperature,
        }
    }

    pub fn set(&mut self, measurement: Measurement, value: f64) {
        let slot = match measurement {
            Measurement::SolarIrradiance => &mut self.solar_irradiance,
            Measurement::ClarityIndex => &mut self.clarity_index,
            Measurement::Humidity => &mut self.humidity,
            Measurement::Precipitation => &mut self.precipitation,
            Measurement::Temperature => &mut self.temperature,
        };
        *slot = Some(value);
    }

    /// Present cells in canonical column order.
    pub fn pairs(&self) -> Vec<(Measurement, f64)> {
        Measurement::ALL
            .iter()
            .filter_map(|m| Some((*m, self.get(*m)?)))
            .collect()
    }
}

/// One row of an uploaded file. `date` is derived from year/month/day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct ClimateRecord {
    #[serde(rename = "YEAR")]
    pub year: i32,

    #[serde(rename = "MO")]
    pub month: u32,

    #[serde(rename = "DY")]
    pub day: u32,

    pub date: NaiveDate,

    #[serde(rename = "LAT")]
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,

    #[serde(rename = "LON")]
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,

    #[serde(flatten)]
    pub values: MeasurementValues,
}

impl ClimateRecord {
    pub fn builder() -> ClimateRecordBuilder {
        ClimateRecordBuilder::new()
    }

    pub fn value(&self, measurement: Measurement) -> Option<f64> {
        self.values.get(measurement)
    }

    pub fn is_at(&self, latitude: f64, longitude: f64) -> bool {
        self.latitude == latitude && self.longitude == longitude
    }
}

#[derive(Debug, Default)]
pub struct ClimateRecordBuilder {
    year: Option<i32>,
    month: Option<u32>,
    day: Option<u32>,
    latitude: Option<f64>,
    longitude: Option<f64>,
    values: MeasurementValues,
}

impl ClimateRecordBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ymd(mut self, year: i32, month: u32, day: u32) -> Self {
        self.year = Some(year);
        self.month = Some(month);
        self.day = Some(day);
        self
    }

    pub fn coordinates(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        self
    }

    pub fn value(mut self, measurement: Measurement, value: f64) -> Self {
        self.values.set(measurement, value);
        self
    }

    pub fn build(self) -> Result<ClimateRecord> {
        let (year, month, day) = match (self.year, self.month, self.day) {
            (Some(y), Some(m), Some(d)) => (y, m, d),
            _ => {
                return Err(DashboardError::InvalidFormat(
                    "Record requires YEAR, MO and DY".to_string(),
                ))
            }
        };
        let (latitude, longitude) = match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => (lat, lon),
            _ => {
                return Err(DashboardError::InvalidFormat(
                    "Record requires LAT and LON".to_string(),
                ))
            }
        };

        let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
            DashboardError::InvalidFormat(format!(
                "Invalid calendar date: {}-{}-{}",
                year, month, day
            ))
        })?;

        let record = ClimateRecord {
            year,
            month,
            day,
            date,
            latitude,
            longitude,
            values: self.values,
        };
        record.validate()?;

        Ok(record)
    }
}
