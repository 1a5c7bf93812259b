use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{info, warn};

use crate::error::{DashboardError, Result};
use crate::models::Dataset;

/// Where an uploaded file goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum UploadSlot {
    Unified,
    Humidity,
    Precipitation,
    Temperature,
    Correlation,
}

impl UploadSlot {
    /// Slots the sidebar asks for on start-up.
    pub const PRIMARY: [UploadSlot; 4] = [
        UploadSlot::Unified,
        UploadSlot::Humidity,
        UploadSlot::Precipitation,
        UploadSlot::Temperature,
    ];

    pub fn description(&self) -> &'static str {
        match self {
            UploadSlot::Unified => "unified data",
            UploadSlot::Humidity => "humidity data",
            UploadSlot::Precipitation => "precipitation data",
            UploadSlot::Temperature => "temperature data",
            UploadSlot::Correlation => "correlation data",
        }
    }
}

/// Session-owned datasets, one per upload slot.
///
/// A new upload replaces whatever the slot held; views only ever borrow.
#[derive(Debug, Default)]
pub struct AppState {
    datasets: BTreeMap<UploadSlot, Dataset>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a dataset, returning the one it replaced.
    pub fn upload(&mut self, slot: UploadSlot, dataset: Dataset) -> Option<Dataset> {
        info!(
            slot = slot.description(),
            dataset = dataset.name(),
            records = dataset.len(),
            "dataset uploaded"
        );
        let previous = self.datasets.insert(slot, dataset);
        if let Some(ref old) = previous {
            info!(slot = slot.description(), replaced = old.name(), "dataset replaced");
        }
        previous
    }

    pub fn discard(&mut self, slot: UploadSlot) -> Option<Dataset> {
        self.datasets.remove(&slot)
    }

    pub fn get(&self, slot: UploadSlot) -> Option<&Dataset> {
        self.datasets.get(&slot)
    }

    pub fn require(&self, slot: UploadSlot) -> Result<&Dataset> {
        self.get(slot).ok_or_else(|| {
            warn!(slot = slot.description(), "view needs a dataset that was not uploaded");
            DashboardError::MissingData(format!("Upload the {} file.", slot.description()))
        })
    }

    /// One warning per empty primary slot.
    pub fn missing_uploads(&self) -> Vec<String> {
        UploadSlot::PRIMARY
            .iter()
            .filter(|slot| !self.datasets.contains_key(*slot))
            .map(|slot| format!("Upload the {} file", slot.description()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ClimateRecord, Measurement};

    fn dataset(name: &str) -> Dataset {
        let record = ClimateRecord::builder()
            .ymd(2022, 1, 1)
            .coordinates(4.0, -74.0)
            .value(Measurement::Humidity, 80.0)
            .build()
            .unwrap();
        Dataset::new(name, vec![Measurement::Humidity], vec![record]).unwrap()
    }

    #[test]
    fn test_upload_replace_discard_lifecycle() {
        let mut state = AppState::new();
        assert!(state.upload(UploadSlot::Humidity, dataset("a.csv")).is_none());

        let replaced = state.upload(UploadSlot::Humidity, dataset("b.csv")).unwrap();
        assert_eq!(replaced.name(), "a.csv");
        assert_eq!(state.require(UploadSlot::Humidity).unwrap().name(), "b.csv");

        assert!(state.discard(UploadSlot::Humidity).is_some());
        assert!(state.get(UploadSlot::Humidity).is_none());
    }

    #[test]
    fn test_require_missing_slot_is_missing_data() {
        let state = AppState::new();
        let err = state.require(UploadSlot::Unified).unwrap_err();
        assert!(err.is_warning());
        assert_eq!(
            err.to_string(),
            "Missing required data: Upload the unified data file."
        );
    }

    #[test]
    fn test_missing_uploads_lists_primary_slots_only() {
        let mut state = AppState::new();
        state.upload(UploadSlot::Humidity, dataset("h.csv"));

        assert_eq!(
            state.missing_uploads(),
            vec![
                "Upload the unified data file".to_string(),
                "Upload the precipitation data file".to_string(),
                "Upload the temperature data file".to_string(),
            ]
        );
    }
}
