pub mod dispatcher;
pub mod state;
pub mod view;

pub use dispatcher::ViewDispatcher;
pub use state::{AppState, UploadSlot};
pub use view::{ClimateLayer, PercentileChoice, View, ViewOutput, VisualizationParams};
