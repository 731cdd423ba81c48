//! Trend Fitting and Outlier Detection for Sensor Time Series
//!
//! ## Overview
//!
//! Hydrate formation in a flow loop shows up as volume readings that leave
//! the otherwise steady trend. This crate fits that trend and flags the
//! points that depart from it:
//!
//! ```text
//! Table ──series()──→ [TimeSeriesPoint] ──fit()──→ LinearModel
//!                            │                         │
//!                            └──────classify()─────────┘
//!                                       │
//!                                       ▼
//!                     residuals + population stats → outlier flags
//! ```
//!
//! ## Why Ordinary Least Squares?
//!
//! The loop is driven at a constant rate, so healthy readings follow a
//! straight line in time. A closed-form OLS fit needs two passes over the
//! data and no tuning, and the residuals it leaves are exactly what the
//! outlier rule needs.
//!
//! ## Outlier Rule
//!
//! ```text
//! residual_i = value_i - (slope · time_i + intercept)
//! μ, σ       = population mean / std-dev of all residuals (divide by N)
//! outlier_i  ⇔ |residual_i - μ| > k · σ          (k = 2 by default)
//! ```
//!
//! Population statistics are used throughout. For small batches they differ
//! noticeably from the N−1 sample estimate, so the choice is fixed here
//! rather than left to callers. The inequality is strict: when every
//! residual is equal (σ = 0), nothing is flagged. A σ at float rounding
//! level for the batch's magnitudes counts as zero too, so exactly linear
//! data never reports outliers.
//!
//! The threshold is derived from each batch and recomputed on every call.
//!
//! ## Usage Example
//!
//! ```rust
//! use hydrawatch_ml::{fit, classify, TimeSeriesPoint};
//!
//! let points = [
//!     TimeSeriesPoint::new(0.0, 0.0),
//!     TimeSeriesPoint::new(1.0, 2.0),
//!     TimeSeriesPoint::new(2.0, 4.0),
//! ];
//!
//! let model = fit(&points)?;
//! assert_eq!(model.slope, 2.0);
//! assert_eq!(model.intercept, 0.0);
//!
//! // Exact linear data leaves no outliers
//! assert!(classify(&points, &model).iter().all(|r| !r.is_outlier));
//! # Ok::<(), hydrawatch_ml::MlError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

#[cfg(not(feature = "std"))]
extern crate alloc;

#[cfg(not(feature = "std"))]
use alloc::string::String;

use thiserror_no_std::Error;

pub mod analysis;
pub mod outliers;
pub mod table;
pub mod trend;

pub use analysis::{analyze, analyze_series, AnalysisConfig, FittedPoint, FlaggedPoint, TrendReport};
pub use hydrawatch_core::TimeSeriesPoint;
pub use outliers::{
    classify, residual_stats, rounding_floor, Classification, ClassifiedResidual,
    OutlierClassifier, OutlierConfig, ResidualStats,
};
pub use table::Table;
pub use trend::{fit, predict, residuals, LinearModel, Residual};

/// Result type for fitting and analysis
pub type MlResult<T> = Result<T, MlError>;

/// Reasons a batch cannot be fitted or analysed
///
/// None of these are fatal. The batch is rejected as a whole and nothing is
/// partially computed.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MlError {
    /// Fewer points than the fit needs
    #[error("Insufficient data: need {required} points, have {available}")]
    InsufficientData {
        /// Minimum number of points
        required: usize,
        /// Points supplied
        available: usize,
    },

    /// Every point shares one time value, so the slope is undefined
    #[error("Degenerate input: all time values are identical")]
    DegenerateInput,

    /// A point holds NaN or an infinity
    #[error("Point {index} is not a finite number")]
    NonFinitePoint {
        /// Position in the input sequence
        index: usize,
    },

    /// A required column is absent from the table
    #[error("Missing column '{name}'")]
    MissingColumn {
        /// Column that was requested
        name: String,
    },

    /// A column name was added twice
    #[error("Duplicate column '{name}'")]
    DuplicateColumn {
        /// Repeated column name
        name: String,
    },

    /// Columns of different lengths
    #[error("Column '{column}' has {found} rows, expected {expected}")]
    RaggedColumns {
        /// Offending column
        column: String,
        /// Row count of the table
        expected: usize,
        /// Row count of the column
        found: usize,
    },

    /// A cell that is NaN or infinite
    #[error("Column '{column}' row {row} is not a finite number")]
    InvalidValue {
        /// Column holding the bad cell
        column: String,
        /// Row index
        row: usize,
    },
}

impl MlError {
    /// Short, stable tag for this error
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InsufficientData { .. } => "insufficient_data",
            Self::DegenerateInput => "degenerate_input",
            Self::NonFinitePoint { .. } => "non_finite_point",
            Self::MissingColumn { .. } => "missing_column",
            Self::DuplicateColumn { .. } => "duplicate_column",
            Self::RaggedColumns { .. } => "ragged_columns",
            Self::InvalidValue { .. } => "invalid_value",
        }
    }
}
