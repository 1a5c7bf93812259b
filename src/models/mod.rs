pub mod dataset;
pub mod measurement;
pub mod record;
pub mod region;

pub use dataset::Dataset;
pub use measurement::Measurement;
pub use record::{ClimateRecord, ClimateRecordBuilder, MeasurementValues};
pub use region::Region;
