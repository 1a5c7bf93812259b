use serde::Serialize;

use crate::models::{ClimateRecord, Dataset, Region};
use crate::utils::constants::{CARIBE_MIN_LAT, PACIFICO_MAX_LON, SUR_MAX_LAT};

/// Assign a region from fixed latitude/longitude boundaries; first match wins.
pub fn region_of(latitude: f64, longitude: f64) -> Region {
    if latitude > CARIBE_MIN_LAT {
        Region::Caribe
    } else if latitude < SUR_MAX_LAT {
        Region::Sur
    } else if longitude < PACIFICO_MAX_LON {
        Region::Pacifico
    } else {
        Region::Andina
    }
}

/// A record with its derived region label, as shown in the data table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionalRecord {
    #[serde(flatten)]
    pub record: ClimateRecord,
    #[serde(rename = "Region")]
    pub region: Region,
}

pub fn label_regions(dataset: &Dataset) -> Vec<RegionalRecord> {
    dataset
        .records()
        .iter()
        .map(|record| RegionalRecord {
            region: region_of(record.latitude, record.longitude),
            record: record.clone(),
        })
        .collect()
}
