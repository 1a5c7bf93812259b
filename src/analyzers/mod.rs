pub mod correlation;
pub mod percentile;
pub mod region;
pub mod viability;

pub use correlation::{correlation_matrix, pearson, CorrelationMatrix, CORRELATION_COLUMNS};
pub use percentile::{
    classify_three_tier, classify_two_tier, percentile, Band, PercentileCut,
    PercentileThresholds, ThreeTierClassification, Tier, TwoTierClassification,
};
pub use region::{label_regions, region_of, RegionalRecord};
pub use viability::{top_sites, viability_score, RankedSite};
