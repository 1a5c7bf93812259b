use crate::utils::constants::{
    COL_ALLSKY_KT, COL_ALLSKY_SFC_SW_DWN, COL_HUMIDITY, COL_PRECIPITATION, COL_PRECTOTCORR,
    COL_RH2M, COL_T2M, COL_TEMPERATURE,
};
use serde::{Deserialize, Serialize};

/// A numeric measurement column of an uploaded dataset.
///
/// Labels follow the dashboard's convention: `ALLSKY_KT` is reported as
/// "Solar irradiance" and `ALLSKY_SFC_SW_DWN` as "Clarity index".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Measurement {
    SolarIrradiance,
    ClarityIndex,
    Humidity,
    Precipitation,
    Temperature,
}

impl Measurement {
    pub const ALL: [Measurement; 5] = [
        Measurement::SolarIrradiance,
        Measurement::ClarityIndex,
        Measurement::Humidity,
        Measurement::Precipitation,
        Measurement::Temperature,
    ];

    /// Resolve a header cell, accepting both source and canonical names.
    pub fn from_column(name: &str) -> Option<Self> {
        match name.trim() {
            COL_ALLSKY_KT => Some(Measurement::SolarIrradiance),
            COL_ALLSKY_SFC_SW_DWN => Some(Measurement::ClarityIndex),
            COL_RH2M | COL_HUMIDITY => Some(Measurement::Humidity),
            COL_PRECTOTCORR | COL_PRECIPITATION => Some(Measurement::Precipitation),
            COL_T2M | COL_TEMPERATURE => Some(Measurement::Temperature),
            _ => None,
        }
    }

    pub fn source_column(&self) -> &'static str {
        match self {
            Measurement::SolarIrradiance => COL_ALLSKY_KT,
            Measurement::ClarityIndex => COL_ALLSKY_SFC_SW_DWN,
            Measurement::Humidity => COL_RH2M,
            Measurement::Precipitation => COL_PRECTOTCORR,
            Measurement::Temperature => COL_T2M,
        }
    }

    /// Column name after the load-time rename.
    pub fn column_name(&self) -> &'static str {
        match self {
            Measurement::SolarIrradiance => COL_ALLSKY_KT,
            Measurement::ClarityIndex => COL_ALLSKY_SFC_SW_DWN,
            Measurement::Humidity => COL_HUMIDITY,
            Measurement::Precipitation => COL_PRECIPITATION,
            Measurement::Temperature => COL_TEMPERATURE,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Measurement::SolarIrradiance => "Solar irradiance",
            Measurement::ClarityIndex => "Clarity index",
            Measurement::Humidity => "Relative humidity",
            Measurement::Precipitation => "Precipitation",
            Measurement::Temperature => "Temperature",
        }
    }
}

impl std::fmt::Display for Measurement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.column_name())
    }
}
