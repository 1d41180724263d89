//! Means and t-based confidence intervals for two samples and their
//! difference.
//!
//! # Estimators
//!
//! | Quantity | Centre | Margin of error |
//! |---|---|---|
//! | single sample | x̄ | t(n−1) · SD / √n |
//! | paired difference | mean(B − A) | single-sample estimator on `B − A` |
//! | unpaired difference | x̄_B − x̄_A | t(n_A+n_B−2) · √((w_A + w_B)/dof) · √(1/n_A + 1/n_B) |
//!
//! `SD` is the population standard deviation and `w = (n − 1) · SD²` is the
//! per-group weighted sum of squares. Both conventions are kept exactly; the
//! unpaired formula follows Cumming & Calin-Jageman (2017), *Introduction to
//! the New Statistics*.
//!
//! Samples of size one (zero degrees of freedom) are not rejected: their
//! bounds come out as NaN. Constant samples get a zero-width interval.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::abd::Abd;
use crate::special;
use crate::stats;

/// Errors raised while estimating means and intervals.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EstimateError {
    /// Design string is neither `paired` nor `unpaired`.
    #[error("design must be set to either 'paired' or 'unpaired', got '{0}'")]
    InvalidDesign(String),

    /// Paired design requested with samples of different lengths.
    #[error("samples must have the same length in paired design, got {len_a} (a) and {len_b} (b)")]
    LengthMismatch { len_a: usize, len_b: usize },

    /// A sample with no observations.
    #[error("sample must contain at least one value")]
    EmptySample,

    /// Confidence level outside the open interval (0, 100).
    #[error("confidence level must lie strictly between 0 and 100 percent, got {0}")]
    InvalidConfidenceLevel(u8),
}

// ============================================================================
// Design
// ============================================================================

/// How the observations in sample A relate to those in sample B.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Design {
    /// `A[i]` and `B[i]` are measurements on the same subject.
    Paired,
    /// A and B are independent groups.
    #[default]
    Unpaired,
}

impl Design {
    pub fn is_paired(self) -> bool {
        self == Design::Paired
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Design::Paired => "paired",
            Design::Unpaired => "unpaired",
        }
    }
}

impl FromStr for Design {
    type Err = EstimateError;

    /// Case-insensitive; surrounding whitespace is ignored.
    ///
    /// ```
    /// use abd_figure::{Design, EstimateError};
    /// assert_eq!(" Paired ".parse::<Design>(), Ok(Design::Paired));
    /// assert_eq!(
    ///     "crossover".parse::<Design>(),
    ///     Err(EstimateError::InvalidDesign("crossover".into()))
    /// );
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "paired" => Ok(Design::Paired),
            "unpaired" => Ok(Design::Unpaired),
            _ => Err(EstimateError::InvalidDesign(s.to_string())),
        }
    }
}

impl TryFrom<String> for Design {
    type Error = EstimateError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Design> for String {
    fn from(design: Design) -> Self {
        design.as_str().to_string()
    }
}

impl fmt::Display for Design {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Confidence level
// ============================================================================

/// Integer confidence percentage in the open interval (0, 100).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct ConfidenceLevel(u8);

impl ConfidenceLevel {
    /// # Errors
    /// [`EstimateError::InvalidConfidenceLevel`] unless `0 < percent < 100`.
    pub fn new(percent: u8) -> Result<Self, EstimateError> {
        if percent == 0 || percent >= 100 {
            return Err(EstimateError::InvalidConfidenceLevel(percent));
        }
        Ok(Self(percent))
    }

    pub fn percent(self) -> u8 {
        self.0
    }

    /// Upper-tail probability of the two-sided interval,
    /// `1 − (1 − level/100) / 2` (0.975 for 95%).
    pub fn two_sided_probability(self) -> f64 {
        1.0 - (1.0 - f64::from(self.0) / 100.0) / 2.0
    }
}

impl Default for ConfidenceLevel {
    fn default() -> Self {
        Self(95)
    }
}

impl TryFrom<u8> for ConfidenceLevel {
    type Error = EstimateError;

    fn try_from(percent: u8) -> Result<Self, Self::Error> {
        Self::new(percent)
    }
}

impl From<ConfidenceLevel> for u8 {
    fn from(level: ConfidenceLevel) -> Self {
        level.0
    }
}

impl fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

// ============================================================================
// Estimates
// ============================================================================

/// A mean with its confidence interval. Immutable once built.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Estimate {
    mean: f64,
    ci_low: f64,
    ci_high: f64,
}

impl Estimate {
    pub fn new(mean: f64, ci_low: f64, ci_high: f64) -> Self {
        Self {
            mean,
            ci_low,
            ci_high,
        }
    }

    fn from_margin(mean: f64, margin: f64) -> Self {
        Self::new(mean, mean - margin, mean + margin)
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    pub fn ci_low(&self) -> f64 {
        self.ci_low
    }

    pub fn ci_high(&self) -> f64 {
        self.ci_high
    }

    pub fn ci(&self) -> (f64, f64) {
        (self.ci_low, self.ci_high)
    }

    /// Half-width of the interval.
    pub fn margin(&self) -> f64 {
        (self.ci_high - self.ci_low) / 2.0
    }
}

/// Estimates for group A, group B and their difference.
pub type EstimateTriple = Abd<Estimate>;

/// Two-sided Student-t critical value for `level` with `dof` degrees of
/// freedom. NaN when `dof` is zero.
///
/// # Examples
/// ```
/// use abd_figure::{critical_value, ConfidenceLevel};
/// let t = critical_value(ConfidenceLevel::new(95).unwrap(), 30);
/// assert!((t - 2.042272456).abs() < 1e-8);
/// ```
pub fn critical_value(level: ConfidenceLevel, dof: usize) -> f64 {
    special::t_quantile(level.two_sided_probability(), dof as f64)
}

/// Mean and confidence interval of one sample.
///
/// # Errors
/// [`EstimateError::EmptySample`] for an empty slice.
///
/// # Examples
/// ```
/// use abd_figure::{estimate_single, ConfidenceLevel};
/// let e = estimate_single(&[1.0, 2.0, 3.0, 4.0, 5.0], ConfidenceLevel::new(99)?)?;
/// assert_eq!(e.mean(), 3.0);
/// assert!((e.ci_low() - 0.088114729).abs() < 1e-8);
/// # Ok::<(), abd_figure::EstimateError>(())
/// ```
pub fn estimate_single(sample: &[f64], level: ConfidenceLevel) -> Result<Estimate, EstimateError> {
    let (Some(mean), Some(sem)) = (stats::mean(sample), stats::standard_error(sample)) else {
        return Err(EstimateError::EmptySample);
    };
    let n = sample.len();
    if n < 2 {
        tracing::warn!(n, "fewer than two observations, confidence interval is undefined");
    }
    let t = critical_value(level, n - 1);
    let estimate = Estimate::from_margin(mean, sem * t);
    tracing::debug!(
        n,
        mean,
        sem,
        t,
        ci_low = estimate.ci_low,
        ci_high = estimate.ci_high,
        "single-sample estimate"
    );
    Ok(estimate)
}

/// Element-wise differences `B[i] − A[i]`.
///
/// # Errors
/// [`EstimateError::LengthMismatch`] when the samples differ in length.
pub fn paired_differences(a: &[f64], b: &[f64]) -> Result<Vec<f64>, EstimateError> {
    if a.len() != b.len() {
        return Err(EstimateError::LengthMismatch {
            len_a: a.len(),
            len_b: b.len(),
        });
    }
    Ok(a.iter().zip(b).map(|(x, y)| y - x).collect())
}

/// Mean difference `B − A` and its confidence interval.
///
/// # Errors
/// - [`EstimateError::EmptySample`] if either sample is empty.
/// - [`EstimateError::LengthMismatch`] for a paired design with unequal
///   lengths.
pub fn estimate_difference(
    a: &[f64],
    b: &[f64],
    design: Design,
    level: ConfidenceLevel,
) -> Result<Estimate, EstimateError> {
    if a.is_empty() || b.is_empty() {
        return Err(EstimateError::EmptySample);
    }
    match design {
        Design::Paired => estimate_single(&paired_differences(a, b)?, level),
        Design::Unpaired => Ok(unpaired_difference(a, b, level)),
    }
}

fn unpaired_difference(a: &[f64], b: &[f64], level: ConfidenceLevel) -> Estimate {
    let (len_a, len_b) = (a.len(), b.len());
    let dof = len_a + len_b - 2;
    let weighted = |x: &[f64]| stats::weighted_sum_of_squares(x).unwrap_or(f64::NAN);
    let mean = |x: &[f64]| stats::mean(x).unwrap_or(f64::NAN);

    let t = critical_value(level, dof);
    let variability = ((weighted(a) + weighted(b)) / dof as f64).sqrt();
    let sample_size = (1.0 / len_a as f64 + 1.0 / len_b as f64).sqrt();
    let margin = t * variability * sample_size;

    let estimate = Estimate::from_margin(mean(b) - mean(a), margin);
    tracing::debug!(len_a, len_b, dof, t, variability, margin, "unpaired difference estimate");
    estimate
}

/// Estimates for A, B and the difference `B − A`.
///
/// All inputs are checked before anything is computed, so either the full
/// triple is returned or nothing is.
///
/// # Examples
/// ```
/// use abd_figure::{estimate_triple, ConfidenceLevel, Design};
/// let a = [1.0, 2.0, 3.0, 4.0, 5.0];
/// let b = [1.0, 4.0, 6.0, 7.0, 9.0];
/// let est = estimate_triple(&a, &b, Design::Paired, ConfidenceLevel::new(99)?)?;
/// assert!((est.diff.mean() - 2.4).abs() < 1e-12);
/// # Ok::<(), abd_figure::EstimateError>(())
/// ```
pub fn estimate_triple(
    a: &[f64],
    b: &[f64],
    design: Design,
    level: ConfidenceLevel,
) -> Result<EstimateTriple, EstimateError> {
    if a.is_empty() || b.is_empty() {
        return Err(EstimateError::EmptySample);
    }
    if design.is_paired() && a.len() != b.len() {
        return Err(EstimateError::LengthMismatch {
            len_a: a.len(),
            len_b: b.len(),
        });
    }
    Ok(Abd {
        a: estimate_single(a, level)?,
        b: estimate_single(b, level)?,
        diff: estimate_difference(a, b, design, level)?,
    })
}
