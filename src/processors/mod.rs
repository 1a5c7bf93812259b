pub mod aggregate;
pub mod filter;

pub use aggregate::{location_means, region_means, LocationMean};
pub use filter::DatasetFilter;
