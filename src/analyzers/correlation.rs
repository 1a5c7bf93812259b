use serde::Serialize;

use crate::error::{DashboardError, Result};
use crate::models::{Dataset, Measurement};

/// Column order of the correlation view.
pub const CORRELATION_COLUMNS: [Measurement; 5] = [
    Measurement::SolarIrradiance,
    Measurement::ClarityIndex,
    Measurement::Temperature,
    Measurement::Humidity,
    Measurement::Precipitation,
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    pub labels: Vec<String>,
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.values.get(row)?.get(col).copied()
    }
}

/// Pearson correlation. NaN when either side has zero variance.
pub fn pearson(xs: &[f64], ys: &[f64]) -> f64 {
    let n = xs.len().min(ys.len());
    if n < 2 {
        return f64::NAN;
    }

    let mean_x = xs[..n].iter().sum::<f64>() / n as f64;
    let mean_y = ys[..n].iter().sum::<f64>() / n as f64;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (x, y) in xs[..n].iter().zip(&ys[..n]) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return f64::NAN;
    }
    cov / (var_x.sqrt() * var_y.sqrt())
}

pub fn correlation_matrix(dataset: &Dataset, columns: &[Measurement]) -> Result<CorrelationMatrix> {
    if dataset.is_empty() {
        return Err(DashboardError::EmptyInput(format!(
            "{} has no rows to correlate",
            dataset.name()
        )));
    }

    let series = columns
        .iter()
        .map(|m| dataset.values(*m))
        .collect::<Result<Vec<_>>>()?;

    let values = series
        .iter()
        .enumerate()
        .map(|(i, xs)| {
            series
                .iter()
                .enumerate()
                .map(|(j, ys)| {
                    let r = pearson(xs, ys);
                    if i == j && !r.is_nan() {
                        1.0
                    } else {
                        r
                    }
                })
                .collect()
        })
        .collect();

    Ok(CorrelationMatrix {
        labels: columns.iter().map(|m| m.display_name().to_string()).collect(),
        values,
    })
}
