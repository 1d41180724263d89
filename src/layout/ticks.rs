//! Y-axis tick selection.
//!
//! A [`TickLocator`] proposes initial ticks for the autoscaled data range,
//! the way a plotting library would. [`optimise_yticks`] then widens those
//! ticks in whole steps until every raw observation lies strictly inside
//! them.

use serde::Serialize;

use super::{LayoutError, Side, AUTOSCALE_MARGIN, EXTRA_Y_TICKS, MAX_TICKS};

/// Step multipliers tried within each power of ten.
const NICE_STEPS: [f64; 5] = [1.0, 2.0, 2.5, 5.0, 10.0];

/// Relative slack when comparing tick arithmetic against data.
const TICK_TOLERANCE: f64 = 1e-9;

/// Proposes tick positions covering `[lo, hi]`.
pub trait TickLocator {
    /// Ascending, evenly spaced ticks. May return fewer than two ticks for
    /// unusable ranges; callers must check.
    fn ticks(&self, lo: f64, hi: f64) -> Vec<f64>;
}

/// Picks the smallest "nice" step (1, 2, 2.5, 5 or 10 times a power of
/// ten) giving at most `nbins` intervals over the range.
///
/// Ranges that would need more than [`MAX_TICKS`] ticks yield none.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NiceTicks {
    nbins: usize,
}

impl NiceTicks {
    /// `nbins` is clamped to at least one.
    pub fn new(nbins: usize) -> Self {
        Self {
            nbins: nbins.max(1),
        }
    }
}

impl Default for NiceTicks {
    fn default() -> Self {
        Self::new(5)
    }
}

impl TickLocator for NiceTicks {
    fn ticks(&self, lo: f64, hi: f64) -> Vec<f64> {
        if !lo.is_finite() || !hi.is_finite() {
            return Vec::new();
        }
        let (mut lo, mut hi) = if lo <= hi { (lo, hi) } else { (hi, lo) };
        if hi - lo <= f64::EPSILON * lo.abs().max(hi.abs()).max(1.0) {
            let pad = if lo == 0.0 { 1.0 } else { lo.abs() * AUTOSCALE_MARGIN };
            lo -= pad;
            hi += pad;
        }

        let step = nice_step((hi - lo) / self.nbins as f64);
        let lo_k = (lo / step + TICK_TOLERANCE).floor();
        let hi_k = (hi / step - TICK_TOLERANCE).ceil();
        if !(lo_k.is_finite() && hi_k.is_finite()) || hi_k - lo_k >= MAX_TICKS as f64 {
            return Vec::new();
        }
        (lo_k as i64..=hi_k as i64).map(|k| k as f64 * step).collect()
    }
}

/// Caller-supplied ticks, returned as given.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FixedTicks(pub Vec<f64>);

impl TickLocator for FixedTicks {
    fn ticks(&self, _lo: f64, _hi: f64) -> Vec<f64> {
        self.0.clone()
    }
}

/// Smallest nice step not below `raw_step`.
///
/// # Examples
/// ```
/// use abd_figure::layout::ticks::nice_step;
/// assert_eq!(nice_step(2.471), 2.5);
/// assert_eq!(nice_step(17.82), 20.0);
/// ```
pub fn nice_step(raw_step: f64) -> f64 {
    let magnitude = 10f64.powf(raw_step.log10().floor());
    NICE_STEPS
        .iter()
        .map(|m| m * magnitude)
        .find(|&step| step >= raw_step * (1.0 - TICK_TOLERANCE))
        .unwrap_or(10.0 * magnitude)
}

/// Autoscaled view limits: the extent of `values` padded by
/// [`AUTOSCALE_MARGIN`] of the span on each side.
///
/// # Returns
/// - `None` if `values` is empty or holds a non-finite value.
pub fn autoscale_limits<I>(values: I) -> Option<(f64, f64)>
where
    I: IntoIterator<Item = f64>,
{
    let mut extent: Option<(f64, f64)> = None;
    for v in values {
        if !v.is_finite() {
            return None;
        }
        extent = Some(match extent {
            None => (v, v),
            Some((lo, hi)) => (lo.min(v), hi.max(v)),
        });
    }
    let (lo, hi) = extent?;
    let pad = (hi - lo) * AUTOSCALE_MARGIN;
    Some((lo - pad, hi + pad))
}

/// Evenly spaced y ticks and their step.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YTicks {
    pub step: f64,
    pub ticks: Vec<f64>,
}

impl YTicks {
    pub fn first(&self) -> f64 {
        self.ticks.first().copied().unwrap_or(f64::NAN)
    }

    pub fn last(&self) -> f64 {
        self.ticks.last().copied().unwrap_or(f64::NAN)
    }

    /// Axis limits matching the outermost ticks.
    pub fn limits(&self) -> (f64, f64) {
        (self.first(), self.last())
    }
}

/// Widens `initial` ticks so that `data_min` and `data_max` lie strictly
/// inside them.
///
/// The step is `initial[1] - initial[0]`. Candidate ticks extend the initial
/// ticks by [`EXTRA_Y_TICKS`] steps on each side; the result runs from the
/// largest candidate strictly below `data_min` to the smallest candidate
/// strictly above `data_max`.
///
/// # Errors
/// - [`LayoutError::NonFiniteData`] if either extreme is NaN or infinite.
/// - [`LayoutError::InvalidTicks`] for fewer than two initial ticks or a
///   step that is not finite and positive.
/// - [`LayoutError::LayoutOverflow`] when the data reach past the extra
///   candidates on a side.
///
/// # Examples
/// ```
/// use abd_figure::layout::ticks::optimise_yticks;
/// let initial = [0.0, 2.0, 4.0, 6.0, 8.0, 10.0];
/// let yticks = optimise_yticks(&initial, 1.0, 10.5)?;
/// assert_eq!(yticks.ticks, vec![0.0, 2.0, 4.0, 6.0, 8.0, 10.0, 12.0]);
/// # Ok::<(), abd_figure::LayoutError>(())
/// ```
pub fn optimise_yticks(
    initial: &[f64],
    data_min: f64,
    data_max: f64,
) -> Result<YTicks, LayoutError> {
    if !data_min.is_finite() || !data_max.is_finite() {
        return Err(LayoutError::NonFiniteData);
    }
    let (first, second) = match initial {
        [first, second, ..] => (*first, *second),
        _ => {
            return Err(LayoutError::InvalidTicks(format!(
                "need at least two initial ticks, got {}",
                initial.len()
            )))
        }
    };
    let step = second - first;
    if !step.is_finite() || step <= 0.0 {
        return Err(LayoutError::InvalidTicks(format!(
            "tick step must be finite and positive, got {step}"
        )));
    }

    let extra = EXTRA_Y_TICKS as i64;
    let last_k = initial.len() as i64 - 1;
    let tick = |k: i64| first + k as f64 * step;

    let lo_k = (-extra..=last_k + extra)
        .rev()
        .find(|&k| tick(k) < data_min)
        .ok_or(LayoutError::LayoutOverflow {
            side: Side::Below,
            step,
        })?;
    let hi_k = (-extra..=last_k + extra)
        .find(|&k| tick(k) > data_max)
        .ok_or(LayoutError::LayoutOverflow {
            side: Side::Above,
            step,
        })?;

    if lo_k != 0 || hi_k != last_k {
        tracing::debug!(
            step,
            widened_below = -lo_k,
            widened_above = hi_k - last_k,
            "adjusted y ticks to contain raw data"
        );
    }

    Ok(YTicks {
        step,
        ticks: (lo_k..=hi_k).map(tick).collect(),
    })
}
