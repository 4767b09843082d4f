//! Client-side logic of a trading dashboard: moving-average chart overlays,
//! debounced search, order table filters and order ticket validation.

pub mod app;
pub mod config;
pub mod engine;
pub mod errors;
pub mod marketdata;
pub mod orders;
pub mod storage;
pub mod tables;
pub mod telemetry;
pub mod utils;

pub use app::{App, Command};
pub use config::Settings;
pub use engine::{Debouncer, SearchOutcome, SearchSession};
pub use errors::{AppError, AppResult};
pub use marketdata::{SeriesSmoother, smooth};
