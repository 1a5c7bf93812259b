use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{DashboardError, Result};
use crate::models::{ClimateRecord, Dataset};

/// Row selection applied before a view classifies or charts a dataset.
///
/// Criteria apply in order: year, inclusive date range, exact location.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatasetFilter {
    pub year: Option<i32>,
    pub date_range: Option<(NaiveDate, NaiveDate)>,
    pub location: Option<(f64, f64)>,
}

impl DatasetFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    pub fn with_date_range(mut self, start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(DashboardError::InvalidParameter(format!(
                "date range start {} is after end {}",
                start, end
            )));
        }
        self.date_range = Some((start, end));
        Ok(self)
    }

    pub fn with_location(mut self, latitude: f64, longitude: f64) -> Self {
        self.location = Some((latitude, longitude));
        self
    }

    pub fn matches(&self, record: &ClimateRecord) -> bool {
        if let Some(year) = self.year {
            if record.year != year {
                return false;
            }
        }
        if let Some((start, end)) = self.date_range {
            if record.date < start || record.date > end {
                return false;
            }
        }
        if let Some((lat, lon)) = self.location {
            if !record.is_at(lat, lon) {
                return false;
            }
        }
        true
    }

    pub fn apply(&self, dataset: &Dataset) -> Dataset {
        let records: Vec<ClimateRecord> = dataset
            .records()
            .iter()
            .filter(|r| self.matches(r))
            .cloned()
            .collect();

        debug!(
            dataset = dataset.name(),
            before = dataset.len(),
            after = records.len(),
            "applied filter"
        );
        dataset.with_records(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Measurement;

    fn record(year: i32, month: u32, day: u32, lat: f64, lon: f64) -> ClimateRecord {
        ClimateRecord::builder()
            .ymd(year, month, day)
            .coordinates(lat, lon)
            .value(Measurement::SolarIrradiance, 0.5)
            .build()
            .unwrap()
    }

    fn dataset() -> Dataset {
        Dataset::new(
            "unified.csv",
            vec![Measurement::SolarIrradiance],
            vec![
                record(2020, 12, 31, 4.5, -74.0),
                record(2021, 1, 1, 4.5, -74.0),
                record(2021, 1, 15, 4.5, -73.5),
                record(2021, 2, 1, 4.5, -74.0),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_empty_filter_keeps_everything() {
        assert_eq!(DatasetFilter::new().apply(&dataset()).len(), 4);
    }

    #[test]
    fn test_year_then_inclusive_date_range_then_location() {
        let start = NaiveDate::from_ymd_opt(2021, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2021, 1, 15).unwrap();

        let by_year = DatasetFilter::new().with_year(2021).apply(&dataset());
        assert_eq!(by_year.len(), 3);

        let by_range = DatasetFilter::new()
            .with_year(2021)
            .with_date_range(start, end)
            .unwrap()
            .apply(&dataset());
        assert_eq!(by_range.len(), 2);

        let by_location = DatasetFilter::new()
            .with_year(2021)
            .with_date_range(start, end)
            .unwrap()
            .with_location(4.5, -74.0)
            .apply(&dataset());
        assert_eq!(by_location.len(), 1);
        assert_eq!(by_location.records()[0].date, start);
    }

    #[test]
    fn test_reversed_range_is_rejected() {
        let start = NaiveDate::from_ymd_opt(2021, 2, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2021, 1, 1).unwrap();
        assert!(DatasetFilter::new().with_date_range(start, end).is_err());
    }
}
