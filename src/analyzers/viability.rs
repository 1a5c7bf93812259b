use chrono::NaiveDate;
use serde::Serialize;

use crate::error::Result;
use crate::models::{Dataset, Measurement};
use crate::utils::constants::{VIABILITY_CLARITY_WEIGHT, VIABILITY_IRRADIANCE_WEIGHT};

/// Weighted sum of the two solar columns. Inputs are not normalized.
pub fn viability_score(clarity_index: f64, solar_irradiance: f64) -> f64 {
    VIABILITY_CLARITY_WEIGHT * clarity_index + VIABILITY_IRRADIANCE_WEIGHT * solar_irradiance
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedSite {
    pub rank: usize,
    pub latitude: f64,
    pub longitude: f64,
    pub date: NaiveDate,
    pub score: f64,
}

impl RankedSite {
    pub fn label(&self) -> String {
        format!("Location {}", self.rank)
    }

    pub fn score_text(&self) -> String {
        format!("{:.2} pts", self.score)
    }

    pub fn location_text(&self) -> String {
        format!("Lat: {:.4} Lon: {:.4}", self.latitude, self.longitude)
    }
}

/// The `n` highest-scoring records; ties keep input order.
pub fn top_sites(dataset: &Dataset, n: usize) -> Result<Vec<RankedSite>> {
    dataset.require(Measurement::ClarityIndex)?;
    dataset.require(Measurement::SolarIrradiance)?;

    let mut scored: Vec<(usize, f64)> = dataset
        .records()
        .iter()
        .enumerate()
        .filter_map(|(idx, r)| {
            let clarity = r.value(Measurement::ClarityIndex)?;
            let irradiance = r.value(Measurement::SolarIrradiance)?;
            Some((idx, viability_score(clarity, irradiance)))
        })
        .collect();

    // Stable sort keeps the earlier record first among equal scores.
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));

    Ok(scored
        .into_iter()
        .take(n)
        .enumerate()
        .map(|(position, (idx, score))| {
            let record = &dataset.records()[idx];
            RankedSite {
                rank: position + 1,
                latitude: record.latitude,
                longitude: record.longitude,
                date: record.date,
                score,
            }
        })
        .collect())
}
