use chrono::NaiveDate;
use serde::Serialize;

use crate::error::{DashboardError, Result};
use crate::models::{ClimateRecord, Measurement};
use crate::utils::constants::{COL_DAY, COL_LAT, COL_LON, COL_MONTH, COL_YEAR};

/// An uploaded table: records sharing one schema.
///
/// The schema lists the measurement columns present. Every record carries a
/// value for each of them, which is checked on construction so later access
/// only has to look at the schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    name: String,
    schema: Vec<Measurement>,
    records: Vec<ClimateRecord>,
}

impl Dataset {
    pub fn new(
        name: impl Into<String>,
        schema: Vec<Measurement>,
        records: Vec<ClimateRecord>,
    ) -> Result<Self> {
        let name = name.into();

        for (row, record) in records.iter().enumerate() {
            if let Some(missing) = schema.iter().find(|m| record.value(**m).is_none()) {
                return Err(DashboardError::InvalidFormat(format!(
                    "{}: row {} has no value for {}",
                    name,
                    row + 1,
                    missing
                )));
            }
        }

        Ok(Self {
            name,
            schema,
            records,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn schema(&self) -> &[Measurement] {
        &self.schema
    }

    pub fn records(&self) -> &[ClimateRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn has(&self, measurement: Measurement) -> bool {
        self.schema.contains(&measurement)
    }

    pub fn column_names(&self) -> Vec<String> {
        [COL_YEAR, COL_MONTH, COL_DAY, COL_LAT, COL_LON]
            .iter()
            .map(|c| c.to_string())
            .chain(self.schema.iter().map(|m| m.column_name().to_string()))
            .collect()
    }

    pub fn require(&self, measurement: Measurement) -> Result<()> {
        if self.has(measurement) {
            Ok(())
        } else {
            Err(DashboardError::MissingColumn {
                column: measurement.column_name().to_string(),
                available: self.column_names(),
            })
        }
    }

    /// Values of one column in record order.
    pub fn values(&self, measurement: Measurement) -> Result<Vec<f64>> {
        self.require(measurement)?;
        Ok(self
            .records
            .iter()
            .filter_map(|r| r.value(measurement))
            .collect())
    }

    /// Same schema, different rows. Used by filters and aggregations.
    pub fn with_records(&self, records: Vec<ClimateRecord>) -> Self {
        Self {
            name: self.name.clone(),
            schema: self.schema.clone(),
            records,
        }
    }

    /// First record holding the column maximum.
    pub fn max_record(&self, measurement: Measurement) -> Result<&ClimateRecord> {
        self.require(measurement)?;

        let mut best: Option<(&ClimateRecord, f64)> = None;
        for record in &self.records {
            if let Some(value) = record.value(measurement) {
                match best {
                    Some((_, current)) if value <= current => {}
                    _ => best = Some((record, value)),
                }
            }
        }

        best.map(|(record, _)| record).ok_or_else(|| {
            DashboardError::EmptyInput(format!("{} has no {} values", self.name, measurement))
        })
    }

    pub fn unique_years(&self) -> Vec<i32> {
        let mut years = Vec::new();
        for record in &self.records {
            if !years.contains(&record.year) {
                years.push(record.year);
            }
        }
        years
    }

    pub fn date_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.records.first()?.date;
        Some(self.records.iter().fold((first, first), |(min, max), r| {
            (min.min(r.date), max.max(r.date))
        }))
    }

    pub fn unique_latitudes(&self) -> Vec<f64> {
        unique_in_order(self.records.iter().map(|r| r.latitude))
    }

    pub fn unique_longitudes(&self) -> Vec<f64> {
        unique_in_order(self.records.iter().map(|r| r.longitude))
    }
}

fn unique_in_order(values: impl Iterator<Item = f64>) -> Vec<f64> {
    let mut seen: Vec<f64> = Vec::new();
    for value in values {
        if !seen.contains(&value) {
            seen.push(value);
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(year: i32, day: u32, lat: f64, lon: f64, kt: f64) -> ClimateRecord {
        ClimateRecord::builder()
            .ymd(year, 1, day)
            .coordinates(lat, lon)
            .value(Measurement::SolarIrradiance, kt)
            .build()
            .unwrap()
    }

    fn sample() -> Dataset {
        Dataset::new(
            "unified.csv",
            vec![Measurement::SolarIrradiance],
            vec![
                record(2021, 3, 4.5, -74.0, 0.4),
                record(2020, 1, 4.5, -73.5, 0.7),
                record(2021, 2, 6.0, -74.0, 0.7),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_values_require_schema_column() {
        let dataset = sample();
        assert_eq!(
            dataset.values(Measurement::SolarIrradiance).unwrap(),
            vec![0.4, 0.7, 0.7]
        );

        match dataset.values(Measurement::Humidity) {
            Err(DashboardError::MissingColumn { column, available }) => {
                assert_eq!(column, "humidity");
                assert!(available.contains(&"ALLSKY_KT".to_string()));
            }
            other => panic!("expected MissingColumn, got {:?}", other),
        }
    }

    #[test]
    fn test_record_missing_schema_value_is_rejected() {
        let result = Dataset::new(
            "broken.csv",
            vec![Measurement::SolarIrradiance, Measurement::Humidity],
            vec![record(2021, 1, 4.5, -74.0, 0.4)],
        );
        assert!(matches!(result, Err(DashboardError::InvalidFormat(_))));
    }

    #[test]
    fn test_max_record_keeps_first_maximum() {
        let dataset = sample();
        let max = dataset.max_record(Measurement::SolarIrradiance).unwrap();
        assert_eq!(max.year, 2020);
    }

    #[test]
    fn test_selector_helpers_preserve_first_seen_order() {
        let dataset = sample();
        assert_eq!(dataset.unique_years(), vec![2021, 2020]);
        assert_eq!(dataset.unique_latitudes(), vec![4.5, 6.0]);
        assert_eq!(dataset.unique_longitudes(), vec![-74.0, -73.5]);

        let (min, max) = dataset.date_bounds().unwrap();
        assert_eq!(min, NaiveDate::from_ymd_opt(2020, 1, 1).unwrap());
        assert_eq!(max, NaiveDate::from_ymd_opt(2021, 1, 3).unwrap());
    }

    #[test]
    fn test_empty_dataset_has_no_bounds_or_max() {
        let dataset = sample().with_records(Vec::new());
        assert!(dataset.is_empty());
        assert!(dataset.date_bounds().is_none());
        assert!(matches!(
            dataset.max_record(Measurement::SolarIrradiance),
            Err(DashboardError::EmptyInput(_))
        ));
    }
}
