use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::errors::{AppError, AppResult};
use crate::marketdata::indicators::SeriesSmoother;
use crate::utils::math::format_volume;

/// Price history payload as served to the chart page. Missing samples are `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoricalSeries {
    #[serde(default)]
    pub dates: Vec<String>,
    #[serde(default)]
    pub prices: Vec<Option<f64>>,
    #[serde(default)]
    pub volumes: Vec<Option<f64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Overlay {
    pub label: String,
    pub window: usize,
    pub values: Vec<Option<f64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartView {
    #[serde(flatten)]
    pub series: HistoricalSeries,
    pub overlays: Vec<Overlay>,
    pub volume_labels: Vec<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval: Option<String>,
}

impl HistoricalSeries {
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn validate(&self) -> AppResult<()> {
        let dates = self.dates.len();
        if self.prices.len() != dates || self.volumes.len() != dates {
            return Err(AppError::InvalidSeries(format!(
                "misaligned series: {dates} dates, {} prices, {} volumes",
                self.prices.len(),
                self.volumes.len()
            )));
        }
        Ok(())
    }

    #[instrument(skip(self), fields(len = self.len()))]
    pub fn overlays(&self, windows: &[usize]) -> AppResult<Vec<Overlay>> {
        self.validate()?;
        windows
            .iter()
            .map(|&window| {
                let smoother = SeriesSmoother::new(window)?;
                Ok(Overlay {
                    label: format!("{window}-day MA"),
                    window,
                    values: smoother.apply_sparse(&self.prices),
                })
            })
            .collect()
    }

    pub fn into_chart(
        self,
        windows: &[usize],
        period: Option<ChartPeriod>,
    ) -> AppResult<ChartView> {
        let overlays = self.overlays(windows)?;
        let volume_labels = self
            .volumes
            .iter()
            .map(|volume| volume.map(format_volume))
            .collect();
        debug!(overlays = overlays.len(), points = self.len(), "chart view built");
        Ok(ChartView {
            series: self,
            overlays,
            volume_labels,
            interval: period.map(|p| p.interval().to_string()),
        })
    }
}

/// Lookback period selectable on the chart page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChartPeriod {
    #[serde(rename = "1d")]
    OneDay,
    #[serde(rename = "5d")]
    FiveDays,
    #[serde(rename = "1mo")]
    OneMonth,
    #[serde(rename = "3mo")]
    ThreeMonths,
    #[serde(rename = "1y")]
    OneYear,
    #[serde(rename = "5y")]
    FiveYears,
}

impl ChartPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChartPeriod::OneDay => "1d",
            ChartPeriod::FiveDays => "5d",
            ChartPeriod::OneMonth => "1mo",
            ChartPeriod::ThreeMonths => "3mo",
            ChartPeriod::OneYear => "1y",
            ChartPeriod::FiveYears => "5y",
        }
    }

    /// Sampling interval used when fetching history for this period.
    pub fn interval(&self) -> &'static str {
        match self {
            ChartPeriod::OneDay => "5m",
            ChartPeriod::FiveDays => "30m",
            ChartPeriod::OneMonth | ChartPeriod::ThreeMonths => "1d",
            ChartPeriod::OneYear => "1wk",
            ChartPeriod::FiveYears => "1mo",
        }
    }
}

impl fmt::Display for ChartPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChartPeriod {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1d" => Ok(ChartPeriod::OneDay),
            "5d" => Ok(ChartPeriod::FiveDays),
            "1mo" => Ok(ChartPeriod::OneMonth),
            "3mo" => Ok(ChartPeriod::ThreeMonths),
            "1y" => Ok(ChartPeriod::OneYear),
            "5y" => Ok(ChartPeriod::FiveYears),
            other => Err(AppError::InvalidArgument(format!(
                "unsupported chart period '{other}'"
            ))),
        }
    }
}
