//! Ordinary least-squares trend fitting
//!
//! Time is the independent variable, the measured value the dependent one.
//! Sums are taken about the means, which keeps the fit stable when time is
//! a large epoch-like number and the spread is small.

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use crate::{MlError, MlResult, TimeSeriesPoint};

/// Points needed for a line fit
pub const MIN_FIT_POINTS: usize = 2;

/// Fitted line `value = slope · time + intercept`
///
/// Derived from one complete batch. A changed batch needs a new fit; models
/// are never adjusted in place.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LinearModel {
    /// Change in value per unit time
    pub slope: f64,
    /// Value at time zero
    pub intercept: f64,
    /// Coefficient of determination. 1.0 when the values have no variance,
    /// since the line then reproduces them exactly.
    pub r_squared: f64,
    /// Points the model was fitted on
    pub n_points: usize,
}

impl LinearModel {
    /// Predicted value at `time`
    pub fn predict(&self, time: f64) -> f64 {
        self.slope * time + self.intercept
    }
}

/// One point with its fitted prediction
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Residual {
    /// Observed point
    pub point: TimeSeriesPoint,
    /// Model value at the point's time
    pub predicted: f64,
    /// `point.value - predicted`
    pub residual: f64,
}

/// Predicted value of `model` at `time`
pub fn predict(model: &LinearModel, time: f64) -> f64 {
    model.predict(time)
}

/// Fit a least-squares line through `points`
///
/// Fails with [`MlError::InsufficientData`] below two points,
/// [`MlError::NonFinitePoint`] on NaN/infinite input and
/// [`MlError::DegenerateInput`] when every time value is the same.
pub fn fit(points: &[TimeSeriesPoint]) -> MlResult<LinearModel> {
    if points.len() < MIN_FIT_POINTS {
        return Err(MlError::InsufficientData {
            required: MIN_FIT_POINTS,
            available: points.len(),
        });
    }

    if let Some(index) = points
        .iter()
        .position(|p| !p.time.is_finite() || !p.value.is_finite())
    {
        return Err(MlError::NonFinitePoint { index });
    }

    let first_time = points[0].time;
    if points.iter().all(|p| p.time == first_time) {
        return Err(MlError::DegenerateInput);
    }

    let n = points.len() as f64;
    let mean_time = points.iter().map(|p| p.time).sum::<f64>() / n;
    let mean_value = points.iter().map(|p| p.value).sum::<f64>() / n;

    let mut sxx = 0.0;
    let mut sxy = 0.0;
    let mut syy = 0.0;
    for p in points {
        let dt = p.time - mean_time;
        let dv = p.value - mean_value;
        sxx += dt * dt;
        sxy += dt * dv;
        syy += dv * dv;
    }

    // Distinct times that still cancel to zero spread (subnormal differences)
    if sxx == 0.0 {
        return Err(MlError::DegenerateInput);
    }

    let slope = sxy / sxx;
    let intercept = mean_value - slope * mean_time;

    let ss_res: f64 = points
        .iter()
        .map(|p| {
            let r = p.value - (slope * p.time + intercept);
            r * r
        })
        .sum();
    let r_squared = if syy == 0.0 { 1.0 } else { 1.0 - ss_res / syy };

    log::debug!(
        "fitted {} points: slope={} intercept={} r2={}",
        points.len(),
        slope,
        intercept,
        r_squared
    );

    Ok(LinearModel {
        slope,
        intercept,
        r_squared,
        n_points: points.len(),
    })
}

/// Residual of every point against `model`, in input order
pub fn residuals(points: &[TimeSeriesPoint], model: &LinearModel) -> Vec<Residual> {
    points
        .iter()
        .map(|&point| {
            let predicted = model.predict(point.time);
            Residual {
                point,
                predicted,
                residual: point.value - predicted,
            }
        })
        .collect()
}
