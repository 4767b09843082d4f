use tracing::trace;

use crate::errors::{AppError, AppResult};
use crate::utils::math::trailing_mean;

/// Trailing simple moving average over a whole series.
///
/// Output has the same length as the input. The first `window - 1` points are
/// `None` because there is not enough history yet; every later point is the
/// mean of the `window` samples ending at that index, each summed afresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeriesSmoother {
    window: usize,
}

impl SeriesSmoother {
    pub fn new(window: usize) -> AppResult<Self> {
        if window == 0 {
            return Err(AppError::InvalidArgument(
                "smoothing window must be positive".into(),
            ));
        }
        Ok(Self { window })
    }

    pub fn window(&self) -> usize {
        self.window
    }

    pub fn apply(&self, data: &[f64]) -> Vec<Option<f64>> {
        trace!(window = self.window, len = data.len(), "smoothing series");
        (0..data.len())
            .map(|idx| {
                if idx + 1 < self.window {
                    None
                } else {
                    trailing_mean(&data[idx + 1 - self.window..=idx])
                }
            })
            .collect()
    }

    /// Like [`SeriesSmoother::apply`] for series with gaps. A point whose
    /// window contains an absent sample is itself absent.
    pub fn apply_sparse(&self, data: &[Option<f64>]) -> Vec<Option<f64>> {
        trace!(window = self.window, len = data.len(), "smoothing sparse series");
        (0..data.len())
            .map(|idx| {
                if idx + 1 < self.window {
                    return None;
                }
                data[idx + 1 - self.window..=idx]
                    .iter()
                    .copied()
                    .rev()
                    .try_fold(0.0, |sum, sample| sample.map(|value| sum + value))
                    .map(|sum| sum / self.window as f64)
            })
            .collect()
    }
}

pub fn smooth(data: &[f64], window: usize) -> AppResult<Vec<Option<f64>>> {
    Ok(SeriesSmoother::new(window)?.apply(data))
}
