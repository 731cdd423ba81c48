//! Residual-based outlier classification
//!
//! Every call works on one whole batch: residuals are computed against the
//! supplied model, their population mean and standard deviation are taken
//! over the batch, and each point is flagged against that batch's threshold.
//! Nothing is cached between calls.

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use crate::{
    trend::{residuals, LinearModel, Residual},
    TimeSeriesPoint,
};

/// Default number of standard deviations a residual may stray from the mean
pub const DEFAULT_SIGMA_MULTIPLIER: f64 = 2.0;

/// Spreads within this many ulps of the batch's largest magnitude count as
/// rounding noise, not scatter
pub const ROUNDING_TOLERANCE_ULPS: f64 = 16.0;

/// Outlier thresholds
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OutlierConfig {
    /// `k` in `|residual - mean| > k · std_dev`
    pub sigma_multiplier: f64,
    /// Spreads at or below this are treated as zero, flagging nothing.
    ///
    /// Zero by default. Independently of this, a spread at float rounding
    /// level for the batch's magnitudes (see [`ROUNDING_TOLERANCE_ULPS`]) is
    /// always treated as zero, so exactly linear data flags nothing.
    pub min_std_dev: f64,
}

impl Default for OutlierConfig {
    fn default() -> Self {
        Self {
            sigma_multiplier: DEFAULT_SIGMA_MULTIPLIER,
            min_std_dev: 0.0,
        }
    }
}

impl OutlierConfig {
    /// Use a different multiplier (negative values are made positive)
    pub fn with_sigma_multiplier(mut self, k: f64) -> Self {
        self.sigma_multiplier = libm::fabs(k);
        self
    }

    /// Ignore spreads no larger than `floor`, e.g. sensor resolution
    pub fn with_min_std_dev(mut self, floor: f64) -> Self {
        self.min_std_dev = libm::fabs(floor);
        self
    }
}

/// Population statistics of one batch of residuals
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResidualStats {
    /// Number of residuals
    pub count: usize,
    /// Mean residual
    pub mean: f64,
    /// Population standard deviation (divides by N, not N−1)
    pub std_dev: f64,
    /// Largest allowed deviation from the mean, `k · std_dev`
    pub threshold: f64,
}

impl ResidualStats {
    /// True if `residual` lies strictly beyond the threshold
    pub fn is_outlier(&self, residual: f64) -> bool {
        libm::fabs(residual - self.mean) > self.threshold
    }
}

/// Residual with its outlier flag
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClassifiedResidual {
    /// Point, prediction and residual
    pub residual: Residual,
    /// Whether the residual breaks the batch threshold
    pub is_outlier: bool,
}

/// Result of classifying one batch
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    /// Statistics the flags were derived from
    pub stats: ResidualStats,
    /// One entry per input point, in input order
    pub residuals: Vec<ClassifiedResidual>,
}

impl Classification {
    /// Only the flagged entries
    pub fn outliers(&self) -> impl Iterator<Item = &ClassifiedResidual> + '_ {
        self.residuals.iter().filter(|r| r.is_outlier)
    }

    /// Number of flagged entries
    pub fn outlier_count(&self) -> usize {
        self.outliers().count()
    }
}

/// Spread below which residuals are indistinguishable from rounding error
///
/// Scaled by the largest observed or predicted magnitude (at least 1.0).
pub fn rounding_floor(residuals: &[Residual]) -> f64 {
    let scale = residuals.iter().fold(1.0_f64, |scale, r| {
        scale
            .max(libm::fabs(r.point.value))
            .max(libm::fabs(r.predicted))
    });
    f64::EPSILON * ROUNDING_TOLERANCE_ULPS * scale
}

/// Mean and population standard deviation of `residuals`, with `k · σ`
///
/// The threshold is infinite when σ does not exceed the configured
/// `min_std_dev` or the batch's [`rounding_floor`].
pub fn residual_stats(residuals: &[Residual], config: &OutlierConfig) -> ResidualStats {
    if residuals.is_empty() {
        return ResidualStats::default();
    }

    let n = residuals.len() as f64;
    let mean = residuals.iter().map(|r| r.residual).sum::<f64>() / n;
    let variance = residuals
        .iter()
        .map(|r| {
            let d = r.residual - mean;
            d * d
        })
        .sum::<f64>()
        / n;
    let std_dev = libm::sqrt(variance);

    let floor = config.min_std_dev.max(rounding_floor(residuals));
    let threshold = if std_dev <= floor {
        f64::INFINITY
    } else {
        config.sigma_multiplier * std_dev
    };

    ResidualStats {
        count: residuals.len(),
        mean,
        std_dev,
        threshold,
    }
}

/// Classifier holding its thresholds
#[derive(Debug, Clone, Copy, Default)]
pub struct OutlierClassifier {
    config: OutlierConfig,
}

impl OutlierClassifier {
    /// Classifier with custom thresholds
    pub fn new(config: OutlierConfig) -> Self {
        Self { config }
    }

    /// Active thresholds
    pub fn config(&self) -> &OutlierConfig {
        &self.config
    }

    /// Flag the points of one batch against `model`
    pub fn classify(&self, points: &[TimeSeriesPoint], model: &LinearModel) -> Classification {
        let residuals = residuals(points, model);
        let stats = residual_stats(&residuals, &self.config);

        let residuals: Vec<_> = residuals
            .into_iter()
            .map(|residual| ClassifiedResidual {
                is_outlier: stats.is_outlier(residual.residual),
                residual,
            })
            .collect();

        let classification = Classification { stats, residuals };
        log::debug!(
            "classified {} residuals: mean={} std_dev={} outliers={}",
            stats.count,
            stats.mean,
            stats.std_dev,
            classification.outlier_count()
        );
        classification
    }
}

/// Flag points beyond two population standard deviations of the residual mean
pub fn classify(points: &[TimeSeriesPoint], model: &LinearModel) -> Vec<ClassifiedResidual> {
    OutlierClassifier::default().classify(points, model).residuals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trend::fit;

    fn line_with_spike() -> Vec<TimeSeriesPoint> {
        // 2t + 1 with ±0.1 jitter, one point pushed 8 units off the line
        (0..10)
            .map(|i| {
                let t = i as f64;
                let jitter = if i % 2 == 0 { 0.1 } else { -0.1 };
                let spike = if i == 6 { 8.0 } else { 0.0 };
                TimeSeriesPoint::new(t, 2.0 * t + 1.0 + jitter + spike)
            })
            .collect()
    }

    #[test]
    fn only_the_spike_is_flagged() {
        let points = line_with_spike();
        let model = fit(&points).unwrap();
        let flagged: Vec<usize> = classify(&points, &model)
            .iter()
            .enumerate()
            .filter(|(_, r)| r.is_outlier)
            .map(|(i, _)| i)
            .collect();
        assert_eq!(flagged, vec![6]);
    }

    #[test]
    fn exact_line_flags_nothing() {
        let points = [
            TimeSeriesPoint::new(0.0, 0.0),
            TimeSeriesPoint::new(1.0, 2.0),
            TimeSeriesPoint::new(2.0, 4.0),
        ];
        let model = fit(&points).unwrap();
        let classification = OutlierClassifier::default().classify(&points, &model);
        assert_eq!(classification.stats.std_dev, 0.0);
        assert_eq!(classification.outlier_count(), 0);
    }

    #[test]
    fn rounding_noise_on_fractional_steps_flags_nothing() {
        // 0.1 steps are inexact in binary, leaving residuals around 1e-17
        for n in 6..60 {
            for step in 1..19 {
                let slope = f64::from(step) * 0.1;
                let points: Vec<_> = (0..n)
                    .map(|i| {
                        let t = f64::from(i) * 0.1;
                        TimeSeriesPoint::new(t, slope * t + 0.3)
                    })
                    .collect();
                let model = fit(&points).unwrap();
                let classification = OutlierClassifier::default().classify(&points, &model);
                assert_eq!(classification.outlier_count(), 0, "n={} slope={}", n, slope);
            }
        }
    }

    #[test]
    fn real_scatter_is_above_rounding_floor() {
        let points = line_with_spike();
        let model = fit(&points).unwrap();
        let rs = residuals(&points, &model);
        let stats = residual_stats(&rs, &OutlierConfig::default());
        assert!(stats.std_dev > rounding_floor(&rs));
        assert!(stats.threshold.is_finite());
    }

    #[test]
    fn population_not_sample_deviation() {
        let model = LinearModel {
            slope: 0.0,
            intercept: 0.0,
            r_squared: 0.0,
            n_points: 2,
        };
        let points = [TimeSeriesPoint::new(0.0, -1.0), TimeSeriesPoint::new(1.0, 1.0)];
        let rs = residuals(&points, &model);
        let stats = residual_stats(&rs, &OutlierConfig::default());
        // Population: sqrt(2 / 2) = 1. The N-1 estimate would be sqrt(2).
        assert_eq!(stats.std_dev, 1.0);
        assert_eq!(stats.mean, 0.0);
        assert_eq!(stats.threshold, 2.0);
    }

    #[test]
    fn residual_at_threshold_is_not_flagged() {
        let stats = ResidualStats {
            count: 4,
            mean: 0.0,
            std_dev: 1.0,
            threshold: 2.0,
        };
        assert!(!stats.is_outlier(2.0));
        assert!(stats.is_outlier(2.0 + 1e-9));
        assert!(stats.is_outlier(-2.5));
    }

    #[test]
    fn tighter_multiplier_flags_more() {
        let points = line_with_spike();
        let model = fit(&points).unwrap();
        let strict = OutlierClassifier::new(OutlierConfig::default().with_sigma_multiplier(0.5));
        assert!(strict.classify(&points, &model).outlier_count() > 1);
    }

    #[test]
    fn std_dev_floor_suppresses_flags() {
        let points = line_with_spike();
        let model = fit(&points).unwrap();
        let relaxed = OutlierClassifier::new(OutlierConfig::default().with_min_std_dev(100.0));
        let classification = relaxed.classify(&points, &model);
        assert_eq!(classification.outlier_count(), 0);
        assert!(classification.stats.threshold.is_infinite());
    }

    #[test]
    fn empty_batch() {
        let model = LinearModel {
            slope: 1.0,
            intercept: 0.0,
            r_squared: 1.0,
            n_points: 2,
        };
        let classification = OutlierClassifier::default().classify(&[], &model);
        assert!(classification.residuals.is_empty());
        assert_eq!(classification.stats, ResidualStats::default());
    }

    #[test]
    fn statistics_follow_the_batch() {
        let model = fit(&line_with_spike()).unwrap();

        // Same model, calmer batch: the threshold shrinks with it
        let calm: Vec<_> = (0..10)
            .map(|i| TimeSeriesPoint::new(i as f64, model.predict(i as f64) + 0.01))
            .collect();
        let noisy = OutlierClassifier::default().classify(&line_with_spike(), &model);
        let quiet = OutlierClassifier::default().classify(&calm, &model);
        assert!(quiet.stats.threshold < noisy.stats.threshold);
    }
}
