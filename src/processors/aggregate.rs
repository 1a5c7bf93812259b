use std::collections::BTreeMap;

use serde::Serialize;

use crate::analyzers::region_of;
use crate::error::{DashboardError, Result};
use crate::models::{Dataset, Measurement, Region};

/// Mean of one column at a single (lat, lon).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LocationMean {
    pub latitude: f64,
    pub longitude: f64,
    pub mean: f64,
    pub samples: usize,
}

/// Per-location means, sorted by latitude then longitude.
pub fn location_means(dataset: &Dataset, measurement: Measurement) -> Result<Vec<LocationMean>> {
    dataset.require(measurement)?;

    // Grouped by the exact bit pattern of each coordinate.
    let mut sums: BTreeMap<(u64, u64), (f64, usize)> = BTreeMap::new();
    for record in dataset.records() {
        if let Some(value) = record.value(measurement) {
            let entry = sums
                .entry((record.latitude.to_bits(), record.longitude.to_bits()))
                .or_insert((0.0, 0));
            entry.0 += value;
            entry.1 += 1;
        }
    }

    let mut groups: Vec<LocationMean> = sums
        .into_iter()
        .map(|((lat, lon), (sum, samples))| LocationMean {
            latitude: f64::from_bits(lat),
            longitude: f64::from_bits(lon),
            mean: sum / samples as f64,
            samples,
        })
        .collect();
    groups.sort_by(|a, b| {
        a.latitude
            .total_cmp(&b.latitude)
            .then(a.longitude.total_cmp(&b.longitude))
    });

    Ok(groups)
}

/// Mean of one column per region, in region label order.
pub fn region_means(dataset: &Dataset, measurement: Measurement) -> Result<Vec<(Region, f64)>> {
    dataset.require(measurement)?;
    if dataset.is_empty() {
        return Err(DashboardError::EmptyInput(format!(
            "{} has no rows to group by region",
            dataset.name()
        )));
    }

    let mut sums: BTreeMap<Region, (f64, usize)> = BTreeMap::new();
    for record in dataset.records() {
        if let Some(value) = record.value(measurement) {
            let entry = sums
                .entry(region_of(record.latitude, record.longitude))
                .or_insert((0.0, 0));
            entry.0 += value;
            entry.1 += 1;
        }
    }

    Ok(sums
        .into_iter()
        .map(|(region, (sum, count))| (region, sum / count as f64))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ClimateRecord;

    fn record(lat: f64, lon: f64, kt: f64) -> ClimateRecord {
        ClimateRecord::builder()
            .ymd(2022, 5, 1)
            .coordinates(lat, lon)
            .value(Measurement::SolarIrradiance, kt)
            .value(Measurement::ClarityIndex, kt * 10.0)
            .build()
            .unwrap()
    }

    fn dataset() -> Dataset {
        Dataset::new(
            "unified.csv",
            vec![Measurement::SolarIrradiance, Measurement::ClarityIndex],
            vec![
                record(9.0, -74.0, 0.6),
                record(5.0, -76.0, 0.2),
                record(9.0, -74.0, 0.4),
                record(5.0, -70.0, 0.5),
                record(1.0, -77.0, 0.3),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_location_means_group_and_sort() {
        let means = location_means(&dataset(), Measurement::SolarIrradiance).unwrap();
        let keys: Vec<(f64, f64)> = means.iter().map(|m| (m.latitude, m.longitude)).collect();
        assert_eq!(
            keys,
            vec![(1.0, -77.0), (5.0, -76.0), (5.0, -70.0), (9.0, -74.0)]
        );
        assert!((means[3].mean - 0.5).abs() < 1e-12);
        assert_eq!(means[3].samples, 2);
    }

    #[test]
    fn test_location_means_over_interleaved_records() {
        let records: Vec<ClimateRecord> = (0..300)
            .map(|i| record(1.0 + (i % 3) as f64, -74.0, (i % 3) as f64 * 0.1 + 0.2))
            .collect();
        let dataset = dataset().with_records(records);

        let means = location_means(&dataset, Measurement::SolarIrradiance).unwrap();
        assert_eq!(means.len(), 3);
        for (i, m) in means.iter().enumerate() {
            assert_eq!(m.latitude, 1.0 + i as f64);
            assert_eq!(m.samples, 100);
            assert!((m.mean - (i as f64 * 0.1 + 0.2)).abs() < 1e-9);
        }
    }

    #[test]
    fn test_region_means_in_label_order() {
        let means = region_means(&dataset(), Measurement::ClarityIndex).unwrap();
        let regions: Vec<Region> = means.iter().map(|(r, _)| *r).collect();
        assert_eq!(
            regions,
            vec![Region::Andina, Region::Caribe, Region::Pacifico, Region::Sur]
        );
        assert!((means[1].1 - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_region_means_of_empty_dataset_fail() {
        let empty = dataset().with_records(Vec::new());
        assert!(matches!(
            region_means(&empty, Measurement::ClarityIndex),
            Err(DashboardError::EmptyInput(_))
        ));
    }
}
