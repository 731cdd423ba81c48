//! Trend analysis reports for the presentation layer
//!
//! One call takes a table (or a ready series) through fit and
//! classification and returns everything a dashboard needs to draw the
//! "hydrates detected" view: the fitted line, the batch statistics, and the
//! flagged points with their actual and predicted values.
//!
//! ```rust
//! use hydrawatch_ml::{analyze, AnalysisConfig, Table};
//!
//! let times: Vec<f64> = (0..10).map(f64::from).collect();
//! let mut volumes: Vec<f64> = times.iter().map(|t| 2.0 * t + 1.0).collect();
//! volumes[6] += 8.0;
//!
//! let table = Table::new()
//!     .with_column("numeric_time", times)?
//!     .with_column("total_volume", volumes)?;
//!
//! let report = analyze(&table, &AnalysisConfig::default())?;
//! assert_eq!(report.flagged.len(), 1);
//! assert_eq!(report.flagged[0].time, 6.0);
//! # Ok::<(), hydrawatch_ml::MlError>(())
//! ```

#[cfg(not(feature = "std"))]
use alloc::{string::String, vec::Vec};

use crate::{
    outliers::{OutlierClassifier, OutlierConfig, ResidualStats},
    table::Table,
    trend::{fit, LinearModel},
    MlResult, TimeSeriesPoint,
};

/// Time column used by the logged flow-loop runs
pub const DEFAULT_TIME_COLUMN: &str = "numeric_time";

/// Value column used by the logged flow-loop runs
pub const DEFAULT_VALUE_COLUMN: &str = "total_volume";

/// Which columns to analyse and how strictly
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnalysisConfig {
    /// Independent variable column
    pub time_column: String,
    /// Measured quantity column
    pub value_column: String,
    /// Outlier thresholds
    pub outliers: OutlierConfig,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            time_column: DEFAULT_TIME_COLUMN.into(),
            value_column: DEFAULT_VALUE_COLUMN.into(),
            outliers: OutlierConfig::default(),
        }
    }
}

impl AnalysisConfig {
    /// Analyse `value_column` against `time_column`
    pub fn new(time_column: impl Into<String>, value_column: impl Into<String>) -> Self {
        Self {
            time_column: time_column.into(),
            value_column: value_column.into(),
            outliers: OutlierConfig::default(),
        }
    }

    /// Use custom outlier thresholds
    pub fn with_outliers(mut self, outliers: OutlierConfig) -> Self {
        self.outliers = outliers;
        self
    }
}

/// A point that left the trend
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct FlaggedPoint {
    /// Time of the observation
    pub time: f64,
    /// Observed value
    pub actual_value: f64,
    /// Value the trend predicts at that time
    pub predicted_value: f64,
}

/// A point on the fitted line, for plotting the best-fit overlay
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FittedPoint {
    /// Time of the input point
    pub time: f64,
    /// Model value at that time
    pub predicted: f64,
}

/// Everything the presentation layer renders for one batch
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrendReport {
    /// Fitted line
    pub model: LinearModel,
    /// Residual statistics behind the flags
    pub stats: ResidualStats,
    /// Flagged points in input order
    pub flagged: Vec<FlaggedPoint>,
    /// Fitted value at every input time, in input order
    pub fitted: Vec<FittedPoint>,
}

/// Fit and classify a series
pub fn analyze_series(points: &[TimeSeriesPoint], outliers: &OutlierConfig) -> MlResult<TrendReport> {
    let model = fit(points)?;
    let classification = OutlierClassifier::new(*outliers).classify(points, &model);

    let flagged = classification
        .outliers()
        .map(|r| FlaggedPoint {
            time: r.residual.point.time,
            actual_value: r.residual.point.value,
            predicted_value: r.residual.predicted,
        })
        .collect();

    let fitted = classification
        .residuals
        .iter()
        .map(|r| FittedPoint {
            time: r.residual.point.time,
            predicted: r.residual.predicted,
        })
        .collect();

    Ok(TrendReport {
        model,
        stats: classification.stats,
        flagged,
        fitted,
    })
}

/// Select the configured columns from `table`, then fit and classify
///
/// Missing columns are reported before any fitting happens.
pub fn analyze(table: &Table, config: &AnalysisConfig) -> MlResult<TrendReport> {
    let points = table.series(&config.time_column, &config.value_column)?;
    let report = analyze_series(&points, &config.outliers)?;

    if !report.flagged.is_empty() {
        log::info!(
            "{} of {} '{}' readings off trend",
            report.flagged.len(),
            points.len(),
            config.value_column
        );
    }

    Ok(report)
}
