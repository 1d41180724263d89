//! Floating difference axis.
//!
//! The axis shares the primary axis tick step and is anchored so that its
//! zero sits level with the mean of group A. The mean of group B then lines
//! up with the mean difference.

use serde::Serialize;

use super::ab::{raw_points, AbLayout, RawPoints, SummaryMark};
use super::style::{LineStyle, MarkerStyle};
use super::{
    AxisSide, LayoutError, Point, Segment, DIFF_AXIS_WIDTH, DIFF_AXIS_X, DIFF_RAW_X, DIFF_X,
    DIFF_XLIM, MAX_TICKS,
};
use crate::abd::Group;
use crate::config::Config;
use crate::estimate::Estimate;
use crate::stats;

/// Slack for extents that land exactly on a tick multiple.
const STEP_TOLERANCE: f64 = 1e-9;

/// Dashed reference line at zero difference.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZeroLine {
    pub segment: Segment,
    pub style: LineStyle,
}

/// Placement and marks of the floating difference axis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiffLayout {
    /// Left edge in primary-axis coordinates.
    pub x: f64,
    /// Bottom edge in primary-axis coordinates.
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub steps_below: u32,
    pub steps_above: u32,
    pub ytick_step: f64,
    pub yticks: Vec<f64>,
    pub ylim: (f64, f64),
    pub xlim: (f64, f64),
    pub ytick_side: AxisSide,
    pub summary: SummaryMark,
    /// Present only when raw paired differences are drawn.
    pub raw: Option<RawPoints>,
    pub zero_line: ZeroLine,
}

/// Lays out the floating difference axis next to `ab`.
///
/// The vertical extent to cover is the raw differences when `plot_raw_diff`
/// is set and `raw_diffs` holds values, otherwise the interval of
/// `estimate_diff`. Whole tick steps are reserved below and above zero to
/// contain it, plus one extra step on the side opposite the difference:
/// below zero when `mean(A) − mean(B)` is negative, above it otherwise.
///
/// # Errors
/// - [`LayoutError::NonFiniteData`] when the extent to cover is NaN or
///   infinite.
/// - [`LayoutError::InvalidTicks`] when covering it would take more than
///   [`MAX_TICKS`] ticks.
///
/// # Examples
/// ```
/// use abd_figure::layout::{compute_ab_layout, compute_diff_layout};
/// use abd_figure::{estimate_triple, paired_differences, ConfidenceLevel, Config, Design};
///
/// let a = [1.0, 2.0, 3.0, 4.0, 5.0];
/// let b = [1.0, 4.0, 6.0, 7.0, 9.0];
/// let config = Config { design: Design::Paired, ..Config::default() };
/// let est = estimate_triple(&a, &b, config.design, ConfidenceLevel::new(99)?)?;
/// let ab = compute_ab_layout(&a, &b, &est.a, &est.b, &config)?;
/// let diffs = paired_differences(&a, &b)?;
/// let diff = compute_diff_layout(&ab, &est.diff, Some(&diffs), true, &config)?;
/// assert_eq!(diff.yticks, vec![-2.5, 0.0, 2.5, 5.0]);
/// assert_eq!(diff.y, 0.5);
/// # Ok::<(), abd_figure::Error>(())
/// ```
pub fn compute_diff_layout(
    ab: &AbLayout,
    estimate_diff: &Estimate,
    raw_diffs: Option<&[f64]>,
    plot_raw_diff: bool,
    config: &Config,
) -> Result<DiffLayout, LayoutError> {
    let step = ab.yticks.step;
    let plotted = raw_diffs.filter(|d| plot_raw_diff && !d.is_empty());

    let (lowest, highest) = match plotted {
        Some(diffs) => stats::min(diffs)
            .zip(stats::max(diffs))
            .ok_or(LayoutError::NonFiniteData)?,
        None => estimate_diff.ci(),
    };
    if !lowest.is_finite() || !highest.is_finite() {
        return Err(LayoutError::NonFiniteData);
    }

    let mut steps_below = steps_to_cover(-lowest, step);
    let mut steps_above = steps_to_cover(highest, step);
    let mean_a = ab.a.mean.y;
    if mean_a - ab.b.mean.y < 0.0 {
        steps_below += 1;
    } else {
        steps_above += 1;
    }
    tracing::debug!(step, lowest, highest, steps_below, steps_above, "placed difference axis");
    if u64::from(steps_below) + u64::from(steps_above) >= MAX_TICKS as u64 {
        return Err(LayoutError::InvalidTicks(format!(
            "difference axis needs {steps_below} steps below and {steps_above} above zero"
        )));
    }

    let yticks: Vec<f64> = (-(steps_below as i64)..=steps_above as i64)
        .map(|k| k as f64 * step)
        .collect();
    let ylim = (-(steps_below as f64) * step, steps_above as f64 * step);

    Ok(DiffLayout {
        x: DIFF_AXIS_X,
        y: mean_a - steps_below as f64 * step,
        width: DIFF_AXIS_WIDTH,
        height: step * (steps_below + steps_above) as f64,
        steps_below,
        steps_above,
        ytick_step: step,
        yticks,
        ylim,
        xlim: DIFF_XLIM,
        ytick_side: AxisSide::Right,
        summary: SummaryMark::new(DIFF_X, estimate_diff, config, Group::Diff),
        raw: plotted.map(|diffs| {
            raw_points(diffs, DIFF_RAW_X, ab.jitter, MarkerStyle::raw(config, Group::Diff))
        }),
        zero_line: ZeroLine {
            segment: Segment::new(Point::new(DIFF_XLIM.0, 0.0), Point::new(DIFF_XLIM.1, 0.0)),
            style: LineStyle::zero(config),
        },
    })
}

/// Whole steps from zero needed to reach `extent`; zero for non-positive
/// extents.
fn steps_to_cover(extent: f64, step: f64) -> u32 {
    (extent.max(0.0) / step - STEP_TOLERANCE).ceil().max(0.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimate::{
        estimate_triple, paired_differences, ConfidenceLevel, Design, EstimateTriple,
    };
    use crate::layout::ab::compute_ab_layout;
    use approx::assert_abs_diff_eq;

    const A: [f64; 5] = [1.0, 2.0, 3.0, 4.0, 5.0];
    const B: [f64; 5] = [1.0, 4.0, 6.0, 7.0, 9.0];
    const NEG_A: [f64; 5] = [-11.0, -22.0, -32.0, -43.0, -52.0];
    const NEG_B: [f64; 5] = [-11.0, -43.0, -61.0, -71.0, -92.0];

    fn setup(a: &[f64], b: &[f64], design: Design, pct: u8) -> (Config, EstimateTriple, AbLayout) {
        let config = Config {
            design,
            confidence_level: ConfidenceLevel::new(pct).unwrap(),
            ..Config::default()
        };
        let est = estimate_triple(a, b, design, config.confidence_level).unwrap();
        let ab = compute_ab_layout(a, b, &est.a, &est.b, &config).unwrap();
        (config, est, ab)
    }

    #[test]
    fn test_paired_raw_differences() {
        let (config, est, ab) = setup(&A, &B, Design::Paired, 99);
        let diffs = paired_differences(&A, &B).unwrap();
        let diff = compute_diff_layout(&ab, &est.diff, Some(&diffs), true, &config).unwrap();

        // diffs span [0, 4]; mean(A) < mean(B) adds a step below
        assert_eq!((diff.steps_below, diff.steps_above), (1, 2));
        assert_eq!(diff.yticks, vec![-2.5, 0.0, 2.5, 5.0]);
        assert_eq!(diff.ylim, (-2.5, 5.0));
        assert_abs_diff_eq!(diff.y, 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(diff.height, 7.5, epsilon = 1e-12);
        assert_eq!((diff.x, diff.width), (DIFF_AXIS_X, DIFF_AXIS_WIDTH));
        assert_eq!(diff.ytick_side, AxisSide::Right);

        let raw = diff.raw.unwrap();
        assert_eq!(raw.points.len(), 5);
        assert_abs_diff_eq!(raw.points[0].x, DIFF_RAW_X, epsilon = 1e-15);
        assert_abs_diff_eq!(raw.points[4].x, 0.23, epsilon = 1e-12);
        assert_eq!(raw.points[2].y, 3.0);
    }

    #[test]
    fn test_paired_ci_only() {
        let (config, est, ab) = setup(&A, &B, Design::Paired, 99);
        let diffs = paired_differences(&A, &B).unwrap();
        let diff = compute_diff_layout(&ab, &est.diff, Some(&diffs), false, &config).unwrap();

        // CI (-0.39, 5.19) needs 1 below and 3 above, plus one below
        assert_eq!((diff.steps_below, diff.steps_above), (2, 3));
        assert_eq!(diff.yticks, vec![-5.0, -2.5, 0.0, 2.5, 5.0, 7.5]);
        assert_abs_diff_eq!(diff.y, -2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(diff.height, 12.5, epsilon = 1e-12);
        assert!(diff.raw.is_none());
    }

    #[test]
    fn test_negative_difference_reserves_step_above() {
        let (config, est, ab) = setup(&NEG_A, &NEG_B, Design::Unpaired, 95);
        assert_eq!(ab.yticks.step, 20.0);
        let diff = compute_diff_layout(&ab, &est.diff, None, true, &config).unwrap();

        // CI (-55.6, 8.4): 3 below, 1 above, mean(A) > mean(B) adds one above
        assert_eq!((diff.steps_below, diff.steps_above), (3, 2));
        assert_eq!(diff.yticks, vec![-60.0, -40.0, -20.0, 0.0, 20.0, 40.0]);
        assert_abs_diff_eq!(diff.y, -92.0, epsilon = 1e-9);
        assert_abs_diff_eq!(diff.height, 100.0, epsilon = 1e-9);
    }

    #[test]
    fn test_tie_break_side_flips_with_group_order() {
        // unpaired 95%: step 2, difference CI about (-0.77, 5.57)
        let (config, est, ab) = setup(&A, &B, Design::Unpaired, 95);
        assert_eq!(ab.yticks.step, 2.0);
        let forward = compute_diff_layout(&ab, &est.diff, None, true, &config).unwrap();
        assert_eq!((forward.steps_below, forward.steps_above), (2, 3));

        let (config, est, ab) = setup(&B, &A, Design::Unpaired, 95);
        let reverse = compute_diff_layout(&ab, &est.diff, None, true, &config).unwrap();
        assert_eq!((reverse.steps_below, reverse.steps_above), (3, 2));
    }

    #[test]
    fn test_zero_line_and_summary() {
        let (config, est, ab) = setup(&A, &B, Design::Paired, 99);
        let diff = compute_diff_layout(&ab, &est.diff, None, true, &config).unwrap();
        assert_eq!(diff.zero_line.segment.start, Point::new(0.0, 0.0));
        assert_eq!(diff.zero_line.segment.end, Point::new(0.5, 0.0));
        assert!(diff.zero_line.style.dashed);
        assert_eq!(diff.zero_line.style.color, "grey");
        assert_eq!(diff.summary.mean.x, DIFF_X);
        assert_abs_diff_eq!(diff.summary.mean.y, 2.4, epsilon = 1e-12);
        assert_eq!(diff.summary.marker.marker, "^");
        assert_eq!(diff.xlim, DIFF_XLIM);
    }

    #[test]
    fn test_non_finite_extent() {
        let (config, _, ab) = setup(&A, &B, Design::Paired, 99);
        let undefined = Estimate::new(1.0, f64::NAN, f64::NAN);
        assert_eq!(
            compute_diff_layout(&ab, &undefined, None, true, &config),
            Err(LayoutError::NonFiniteData)
        );
        assert_eq!(
            compute_diff_layout(&ab, &undefined, Some(&[1.0, f64::INFINITY]), true, &config),
            Err(LayoutError::NonFiniteData)
        );
    }

    #[test]
    fn test_interval_too_wide_for_step() {
        let (config, _, ab) = setup(&A, &B, Design::Paired, 99);
        let wide = Estimate::new(1.0, -1e12, 1e12);
        assert!(matches!(
            compute_diff_layout(&ab, &wide, None, true, &config),
            Err(LayoutError::InvalidTicks(_))
        ));
    }

    #[test]
    fn test_steps_to_cover() {
        assert_eq!(steps_to_cover(-3.0, 2.5), 0);
        assert_eq!(steps_to_cover(0.0, 2.5), 0);
        assert_eq!(steps_to_cover(5.0, 2.5), 2);
        assert_eq!(steps_to_cover(5.1, 2.5), 3);
    }
}
