pub mod indicators;
pub mod series;

pub use indicators::{SeriesSmoother, smooth};
pub use series::{ChartPeriod, ChartView, HistoricalSeries, Overlay};
