//! Percentile-based tiering of a measurement column.
//!
//! Thresholds are always computed over the slice handed in, so a filtered
//! dataset gets thresholds relative to that filter, not to the full upload.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{DashboardError, Result};
use crate::models::{ClimateRecord, Measurement};

/// Linearly interpolated percentile, `q` in `[0, 1]`.
///
/// Rank is `q * (n - 1)` over the sorted values; the result interpolates
/// between the two neighbouring order statistics.
pub fn percentile(values: &[f64], q: f64) -> Result<f64> {
    if !(0.0..=1.0).contains(&q) {
        return Err(DashboardError::InvalidParameter(format!(
            "percentile must be within [0, 1], got {}",
            q
        )));
    }
    if values.is_empty() {
        return Err(DashboardError::EmptyInput(
            "percentile of zero values".to_string(),
        ));
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    Ok(percentile_of_sorted(&sorted, q))
}

fn percentile_of_sorted(sorted: &[f64], q: f64) -> f64 {
    let rank = q * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let fraction = rank - lower as f64;

    sorted[lower] + (sorted[upper] - sorted[lower]) * fraction
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Tier {
    Low,
    Medium,
    High,
}

/// Two-tier category relative to a single percentile threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Band {
    Above,
    Below,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PercentileThresholds {
    pub p50: f64,
    pub p75: f64,
}

impl PercentileThresholds {
    pub fn from_values(values: &[f64]) -> Result<Self> {
        if values.is_empty() {
            return Err(DashboardError::EmptyInput(
                "cannot compute thresholds of zero values".to_string(),
            ));
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));

        Ok(Self {
            p50: percentile_of_sorted(&sorted, 0.50),
            p75: percentile_of_sorted(&sorted, 0.75),
        })
    }

    /// `value <= p50` is Low, `p50 < value <= p75` is Medium, above p75 is High.
    pub fn tier_of(&self, value: f64) -> Tier {
        if value > self.p75 {
            Tier::High
        } else if value > self.p50 {
            Tier::Medium
        } else {
            Tier::Low
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PercentileCut {
    pub percentile: f64,
    pub threshold: f64,
}

impl PercentileCut {
    pub fn from_values(values: &[f64], q: f64) -> Result<Self> {
        Ok(Self {
            percentile: q,
            threshold: percentile(values, q)?,
        })
    }

    pub fn band_of(&self, value: f64) -> Band {
        if value > self.threshold {
            Band::Above
        } else {
            Band::Below
        }
    }

    /// Band of each value against this cut, in input order.
    pub fn bands(&self, values: &[f64]) -> Vec<Band> {
        values.iter().map(|v| self.band_of(*v)).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThreeTierClassification {
    pub thresholds: PercentileThresholds,
    pub tiers: Vec<Tier>,
}

impl ThreeTierClassification {
    pub fn count(&self, tier: Tier) -> usize {
        self.tiers.iter().filter(|t| **t == tier).count()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TwoTierClassification {
    pub cut: PercentileCut,
    pub bands: Vec<Band>,
}

impl TwoTierClassification {
    pub fn count(&self, band: Band) -> usize {
        self.bands.iter().filter(|b| **b == band).count()
    }
}

fn column_values(records: &[ClimateRecord], column: Measurement) -> Result<Vec<f64>> {
    if records.is_empty() {
        return Err(DashboardError::EmptyInput(format!(
            "no records to classify on {}",
            column
        )));
    }

    records
        .iter()
        .enumerate()
        .map(|(row, record)| {
            record
                .value(column)
                .ok_or_else(|| DashboardError::MissingColumn {
                    column: column.column_name().to_string(),
                    available: vec![format!("record {} has no {}", row + 1, column)],
                })
        })
        .collect()
}

/// Bucket every record into Low/Medium/High by the slice's own p50/p75.
pub fn classify_three_tier(
    records: &[ClimateRecord],
    column: Measurement,
) -> Result<ThreeTierClassification> {
    let values = column_values(records, column)?;
    let thresholds = PercentileThresholds::from_values(&values)?;
    debug!(
        column = %column,
        records = values.len(),
        p50 = thresholds.p50,
        p75 = thresholds.p75,
        "three-tier thresholds"
    );

    Ok(ThreeTierClassification {
        tiers: values.iter().map(|v| thresholds.tier_of(*v)).collect(),
        thresholds,
    })
}

/// Split records into Above/Below a single percentile of the column.
pub fn classify_two_tier(
    records: &[ClimateRecord],
    column: Measurement,
    percentile_value: f64,
) -> Result<TwoTierClassification> {
    let values = column_values(records, column)?;
    let cut = PercentileCut::from_values(&values, percentile_value)?;
    debug!(
        column = %column,
        percentile = percentile_value,
        threshold = cut.threshold,
        "two-tier threshold"
    );

    Ok(TwoTierClassification {
        bands: cut.bands(&values),
        cut,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kt_records(values: &[f64]) -> Vec<ClimateRecord> {
        values
            .iter()
            .map(|v| {
                ClimateRecord::builder()
                    .ymd(2022, 1, 1)
                    .coordinates(1.0, -74.0)
                    .value(Measurement::SolarIrradiance, *v)
                    .build()
                    .unwrap()
            })
            .collect()
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {}, got {}",
            expected,
            actual
        );
    }

    #[test]
    fn test_percentile_interpolates_between_order_statistics() {
        let values = [4.0, 1.0, 3.0, 2.0];
        assert_close(percentile(&values, 0.0).unwrap(), 1.0);
        assert_close(percentile(&values, 0.5).unwrap(), 2.5);
        assert_close(percentile(&values, 0.75).unwrap(), 3.25);
        assert_close(percentile(&values, 1.0).unwrap(), 4.0);
    }

    #[test]
    fn test_percentile_rejects_empty_and_out_of_range() {
        assert!(matches!(
            percentile(&[], 0.5),
            Err(DashboardError::EmptyInput(_))
        ));
        assert!(matches!(
            percentile(&[1.0], 1.5),
            Err(DashboardError::InvalidParameter(_))
        ));
        assert!(matches!(
            percentile(&[1.0], -0.1),
            Err(DashboardError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_three_tier_reference_scenario() {
        let records = kt_records(&[0.5, 0.6, 0.9]);
        let result = classify_three_tier(&records, Measurement::SolarIrradiance).unwrap();

        assert_close(result.thresholds.p50, 0.6);
        assert_close(result.thresholds.p75, 0.75);
        // 0.6 sits exactly on p50, which is Low.
        assert_eq!(result.tiers, vec![Tier::Low, Tier::Low, Tier::High]);
    }

    #[test]
    fn test_three_tier_assigns_each_tier() {
        let records = kt_records(&[0.5, 0.6, 0.7, 0.9]);
        let result = classify_three_tier(&records, Measurement::SolarIrradiance).unwrap();

        assert_close(result.thresholds.p50, 0.65);
        assert_close(result.thresholds.p75, 0.75);
        assert_eq!(
            result.tiers,
            vec![Tier::Low, Tier::Low, Tier::Medium, Tier::High]
        );
    }

    #[test]
    fn test_boundary_values_use_inclusive_upper_bounds() {
        let thresholds = PercentileThresholds { p50: 2.0, p75: 3.0 };
        assert_eq!(thresholds.tier_of(2.0), Tier::Low);
        assert_eq!(thresholds.tier_of(2.0001), Tier::Medium);
        assert_eq!(thresholds.tier_of(3.0), Tier::Medium);
        assert_eq!(thresholds.tier_of(3.0001), Tier::High);
    }

    #[test]
    fn test_identical_values_all_classify_low() {
        // Known boundary behavior: p50 == p75, nothing exceeds p75.
        let records = kt_records(&[0.42; 6]);
        let result = classify_three_tier(&records, Measurement::SolarIrradiance).unwrap();

        assert_eq!(result.thresholds.p50, result.thresholds.p75);
        assert_eq!(result.count(Tier::Low), 6);
        assert_eq!(result.count(Tier::Medium), 0);
        assert_eq!(result.count(Tier::High), 0);
    }

    #[test]
    fn test_three_tier_partitions_every_record() {
        let values: Vec<f64> = (0..97).map(|i| ((i * 37) % 101) as f64 / 7.0).collect();
        let records = kt_records(&values);
        let result = classify_three_tier(&records, Measurement::SolarIrradiance).unwrap();

        assert!(result.thresholds.p50 <= result.thresholds.p75);
        assert_eq!(result.tiers.len(), records.len());
        assert_eq!(
            result.count(Tier::Low) + result.count(Tier::Medium) + result.count(Tier::High),
            records.len()
        );
    }

    #[test]
    fn test_three_tier_is_idempotent() {
        let records = kt_records(&[0.3, 0.8, 0.55, 0.61, 0.2, 0.9]);
        let first = classify_three_tier(&records, Measurement::SolarIrradiance).unwrap();
        let second = classify_three_tier(&records, Measurement::SolarIrradiance).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_percentile_monotonicity_over_many_sequences() {
        for n in 1..40 {
            let values: Vec<f64> = (0..n).map(|i| ((i * 7919) % 113) as f64 - 50.0).collect();
            let thresholds = PercentileThresholds::from_values(&values).unwrap();
            assert!(thresholds.p50 <= thresholds.p75, "n = {}", n);
        }
    }

    #[test]
    fn test_empty_records_fail_classification() {
        assert!(matches!(
            classify_three_tier(&[], Measurement::SolarIrradiance),
            Err(DashboardError::EmptyInput(_))
        ));
        assert!(matches!(
            classify_two_tier(&[], Measurement::SolarIrradiance, 0.5),
            Err(DashboardError::EmptyInput(_))
        ));
    }

    #[test]
    fn test_missing_column_fails_classification() {
        let records = kt_records(&[0.5, 0.6]);
        assert!(matches!(
            classify_three_tier(&records, Measurement::Humidity),
            Err(DashboardError::MissingColumn { .. })
        ));
    }

    #[test]
    fn test_two_tier_splits_on_strictly_greater() {
        let records = kt_records(&[0.5, 0.6, 0.9]);
        let result = classify_two_tier(&records, Measurement::SolarIrradiance, 0.5).unwrap();

        assert_close(result.cut.threshold, 0.6);
        assert_eq!(result.bands, vec![Band::Below, Band::Below, Band::Above]);
        assert_eq!(result.count(Band::Above), 1);

        let result = classify_two_tier(&records, Measurement::SolarIrradiance, 0.75).unwrap();
        assert_close(result.cut.threshold, 0.75);
        assert_eq!(result.bands, vec![Band::Below, Band::Below, Band::Above]);
    }
}
