use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default = "TelemetryConfig::default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub json: bool,
}

impl TelemetryConfig {
    fn default_log_level() -> String {
        "info".to_string()
    }
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: Self::default_log_level(),
            json: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartConfig {
    #[serde(default = "ChartConfig::default_overlay_windows")]
    pub overlay_windows: Vec<usize>,
}

impl ChartConfig {
    fn default_overlay_windows() -> Vec<usize> {
        vec![20, 50]
    }
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            overlay_windows: Self::default_overlay_windows(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    #[serde(default = "SearchConfig::default_quiet_period_ms")]
    pub quiet_period_ms: u64,
    #[serde(default = "SearchConfig::default_min_query_len")]
    pub min_query_len: usize,
}

impl SearchConfig {
    fn default_quiet_period_ms() -> u64 {
        300
    }

    fn default_min_query_len() -> usize {
        2
    }

    pub fn quiet_period(&self) -> Duration {
        Duration::from_millis(self.quiet_period_ms)
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            quiet_period_ms: Self::default_quiet_period_ms(),
            min_query_len: Self::default_min_query_len(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub telemetry: TelemetryConfig,
    #[serde(default)]
    pub charts: ChartConfig,
    #[serde(default)]
    pub search: SearchConfig,
}

impl Settings {
    /// Reads the TOML file at `path` when present, then applies `TICKERDESK__*` overrides.
    pub fn load_from(path: impl AsRef<Path>) -> AppResult<Self> {
        let builder = config::Config::builder()
            .add_source(config::File::from(path.as_ref()).required(false))
            .add_source(config::Environment::with_prefix("TICKERDESK").separator("__"));
        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.charts.overlay_windows.iter().any(|w| *w == 0) {
            return Err(AppError::Config(
                "charts.overlay_windows entries must be positive".into(),
            ));
        }
        if self.search.quiet_period_ms == 0 {
            return Err(AppError::Config(
                "search.quiet_period_ms must be positive".into(),
            ));
        }
        Ok(())
    }
}
