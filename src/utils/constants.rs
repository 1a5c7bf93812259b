/// Required columns of every uploaded file
pub const COL_YEAR: &str = "YEAR";
pub const COL_MONTH: &str = "MO";
pub const COL_DAY: &str = "DY";
pub const COL_LAT: &str = "LAT";
pub const COL_LON: &str = "LON";

/// Source measurement columns (NASA POWER parameter names)
pub const COL_ALLSKY_KT: &str = "ALLSKY_KT";
pub const COL_ALLSKY_SFC_SW_DWN: &str = "ALLSKY_SFC_SW_DWN";
pub const COL_RH2M: &str = "RH2M";
pub const COL_PRECTOTCORR: &str = "PRECTOTCORR";
pub const COL_T2M: &str = "T2M";

/// Canonical names for renamed measurement columns
pub const COL_HUMIDITY: &str = "humidity";
pub const COL_PRECIPITATION: &str = "precipitation";
pub const COL_TEMPERATURE: &str = "temperature";

/// NASA POWER preamble markers
pub const POWER_HEADER_BEGIN: &str = "-BEGIN HEADER-";
pub const POWER_HEADER_END: &str = "-END HEADER-";

/// Region boundaries (degrees)
pub const CARIBE_MIN_LAT: f64 = 8.0;
pub const SUR_MAX_LAT: f64 = 2.0;
pub const PACIFICO_MAX_LON: f64 = -75.0;

/// Viability weights
pub const VIABILITY_CLARITY_WEIGHT: f64 = 0.6;
pub const VIABILITY_IRRADIANCE_WEIGHT: f64 = 0.4;

/// Geographic center of Colombia
pub const COLOMBIA_CENTER_LAT: f64 = 4.5709;
pub const COLOMBIA_CENTER_LON: f64 = -74.2973;

/// Main map zoom slider bounds
pub const MIN_ZOOM: u8 = 4;
pub const MAX_ZOOM: u8 = 15;
pub const DEFAULT_ZOOM: u8 = 6;

/// Configuration sources
pub const DEFAULT_CONFIG_FILE: &str = "solaris.toml";
pub const ENV_PREFIX: &str = "SOLARIS";

/// Chart styling
pub const LINE_CHART_TEMPLATE: &str = "plotly_dark";
pub const HEATMAP_COLOR_SCALE: &str = "plasma";
pub const CORRELATION_COLOR_SCALE: &str = "coolwarm";
