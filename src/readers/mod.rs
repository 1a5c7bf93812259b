pub mod climate_reader;

pub use climate_reader::{decode_upload, strip_power_preamble, ClimateCsvReader};
