pub mod chart;
pub mod legend;
pub mod map;

pub use chart::{Bar, BarChart, ChartRenderer, HeatmapChart, Series, TimePoint, TimeSeriesChart};
pub use legend::{band_color, render_legend, tier_color, Legend, LegendEntry, MarkerColor};
pub use map::{
    DensityMap, DensityPoint, GeoPoint, MapRenderer, MapView, Marker, MarkerShape, PercentileMap,
};
