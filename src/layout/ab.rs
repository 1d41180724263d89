//! Primary axis: raw observations, means and intervals of groups A and B.

use serde::Serialize;

use super::style::{LineStyle, MarkerStyle};
use super::ticks::{autoscale_limits, optimise_yticks, NiceTicks, TickLocator, YTicks};
use super::{
    AxisSide, LayoutError, Point, Segment, AB_XLIM, JITTER_RANGE, RAW_X_A, RAW_X_B, X_A, X_B,
    X_DIFF_TICK,
};
use crate::abd::Group;
use crate::config::Config;
use crate::estimate::Estimate;
use crate::stats;

/// Raw observations drawn as individual markers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RawPoints {
    pub points: Vec<Point>,
    pub style: MarkerStyle,
}

/// How raw observations appear on the primary axis.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RawMarks {
    /// Jittered markers for each group.
    Points { a: RawPoints, b: RawPoints },
    /// One line per pair joining `A[i]` to `B[i]`.
    PairedLines { segments: Vec<Segment>, style: LineStyle },
}

/// Mean marker plus its confidence interval.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryMark {
    pub mean: Point,
    pub ci: Segment,
    pub marker: MarkerStyle,
    pub ci_style: LineStyle,
}

impl SummaryMark {
    pub(crate) fn new(x: f64, estimate: &Estimate, config: &Config, group: Group) -> Self {
        Self {
            mean: Point::new(x, estimate.mean()),
            ci: Segment::vertical(x, estimate.ci_low(), estimate.ci_high()),
            marker: MarkerStyle::summary(config, group),
            ci_style: LineStyle::ci(config, group),
        }
    }
}

/// Geometry of the primary axis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AbLayout {
    /// Horizontal offset between successive raw observations.
    pub jitter: f64,
    pub raw: RawMarks,
    pub a: SummaryMark,
    pub b: SummaryMark,
    pub xticks: Vec<f64>,
    pub xtick_labels: Vec<String>,
    pub xlim: (f64, f64),
    pub yticks: YTicks,
    pub ylim: (f64, f64),
    pub ylabel: String,
    pub ytick_side: AxisSide,
}

/// Lays out the primary axis with [`NiceTicks`] as the initial tick choice.
///
/// # Errors
/// See [`compute_ab_layout_with`].
pub fn compute_ab_layout(
    a: &[f64],
    b: &[f64],
    estimate_a: &Estimate,
    estimate_b: &Estimate,
    config: &Config,
) -> Result<AbLayout, LayoutError> {
    let locator = NiceTicks::new(config.ytick_bins);
    compute_ab_layout_with(a, b, estimate_a, estimate_b, config, &locator)
}

/// Lays out the primary axis, asking `locator` for the initial y ticks over
/// the autoscaled range of raw values, means and interval bounds.
///
/// # Errors
/// - [`LayoutError::EmptySample`] if either sample is empty.
/// - [`LayoutError::NonFiniteData`] if any raw value or estimate bound is
///   NaN or infinite.
/// - [`LayoutError::InvalidTicks`] or [`LayoutError::LayoutOverflow`] from
///   [`optimise_yticks`].
pub fn compute_ab_layout_with<L: TickLocator + ?Sized>(
    a: &[f64],
    b: &[f64],
    estimate_a: &Estimate,
    estimate_b: &Estimate,
    config: &Config,
    locator: &L,
) -> Result<AbLayout, LayoutError> {
    if a.is_empty() {
        return Err(LayoutError::EmptySample(Group::A));
    }
    if b.is_empty() {
        return Err(LayoutError::EmptySample(Group::B));
    }

    let jitter = JITTER_RANGE / a.len().max(b.len()) as f64;
    let raw = if config.design.is_paired() && config.paired_data_joining_lines {
        RawMarks::PairedLines {
            segments: paired_segments(a, b, jitter),
            style: LineStyle::paired(config),
        }
    } else {
        RawMarks::Points {
            a: raw_points(a, RAW_X_A, jitter, MarkerStyle::raw(config, Group::A)),
            b: raw_points(b, RAW_X_B, -jitter, MarkerStyle::raw(config, Group::B)),
        }
    };

    let (data_min, data_max) = match (
        stats::min(a).zip(stats::min(b)),
        stats::max(a).zip(stats::max(b)),
    ) {
        (Some((min_a, min_b)), Some((max_a, max_b))) => (min_a.min(min_b), max_a.max(max_b)),
        _ => return Err(LayoutError::NonFiniteData),
    };

    let estimate_values = [estimate_a, estimate_b]
        .into_iter()
        .flat_map(|e| [e.mean(), e.ci_low(), e.ci_high()]);
    let (view_lo, view_hi) = autoscale_limits(a.iter().chain(b).copied().chain(estimate_values))
        .ok_or(LayoutError::NonFiniteData)?;
    let initial = locator.ticks(view_lo, view_hi);
    let yticks = optimise_yticks(&initial, data_min, data_max)?;

    let (xticks, xtick_labels) = xticks(config);

    Ok(AbLayout {
        jitter,
        raw,
        a: SummaryMark::new(X_A, estimate_a, config, Group::A),
        b: SummaryMark::new(X_B, estimate_b, config, Group::B),
        xticks,
        xtick_labels,
        xlim: AB_XLIM,
        ylim: yticks.limits(),
        yticks,
        ylabel: config.measure_units.clone(),
        ytick_side: AxisSide::Left,
    })
}

/// Markers starting at `x0`, each shifted `drift` from the previous one.
pub(crate) fn raw_points(data: &[f64], x0: f64, drift: f64, style: MarkerStyle) -> RawPoints {
    let points = data
        .iter()
        .enumerate()
        .map(|(i, &y)| Point::new(x0 + i as f64 * drift, y))
        .collect();
    RawPoints { points, style }
}

/// Pairs positionally up to the shorter sample; both ends move outward.
fn paired_segments(a: &[f64], b: &[f64], jitter: f64) -> Vec<Segment> {
    a.iter()
        .zip(b)
        .enumerate()
        .map(|(i, (&ya, &yb))| {
            let offset = i as f64 * jitter;
            Segment::new(Point::new(X_A + offset, ya), Point::new(X_B - offset, yb))
        })
        .collect()
}

fn xticks(config: &Config) -> (Vec<f64>, Vec<String>) {
    let labels = &config.labels;
    if labels.diff.is_empty() {
        (vec![X_A, X_B], vec![labels.a.clone(), labels.b.clone()])
    } else {
        (
            vec![X_A, X_B, X_DIFF_TICK],
            vec![labels.a.clone(), labels.b.clone(), labels.diff.clone()],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abd::Abd;
    use crate::estimate::{estimate_single, ConfidenceLevel, Design};
    use crate::layout::ticks::FixedTicks;
    use approx::assert_abs_diff_eq;

    const A: [f64; 5] = [1.0, 2.0, 3.0, 4.0, 5.0];
    const B: [f64; 5] = [1.0, 4.0, 6.0, 7.0, 9.0];

    fn estimates(a: &[f64], b: &[f64]) -> (Estimate, Estimate) {
        let level = ConfidenceLevel::new(99).unwrap();
        (estimate_single(a, level).unwrap(), estimate_single(b, level).unwrap())
    }

    fn paired() -> Config {
        Config {
            design: Design::Paired,
            ..Config::default()
        }
    }

    #[test]
    fn test_paired_lines_jitter_outward() {
        let (ea, eb) = estimates(&A, &B);
        let layout = compute_ab_layout(&A, &B, &ea, &eb, &paired()).unwrap();
        assert_abs_diff_eq!(layout.jitter, 0.02, epsilon = 1e-15);

        let RawMarks::PairedLines { segments, style } = &layout.raw else {
            panic!("expected paired lines, got {:?}", layout.raw);
        };
        assert_eq!(segments.len(), 5);
        assert_eq!(style.color, "gainsboro");
        assert_abs_diff_eq!(segments[3].start.x, 1.06, epsilon = 1e-12);
        assert_abs_diff_eq!(segments[3].end.x, 1.94, epsilon = 1e-12);
        assert_eq!((segments[3].start.y, segments[3].end.y), (4.0, 7.0));
    }

    #[test]
    fn test_raw_points_drift_away_from_centres() {
        let (ea, eb) = estimates(&A, &B[..4]);
        let config = Config::default();
        let layout = compute_ab_layout(&A, &B[..4], &ea, &eb, &config).unwrap();

        let RawMarks::Points { a, b } = &layout.raw else {
            panic!("expected raw points, got {:?}", layout.raw);
        };
        assert_eq!(a.points.len(), 5);
        assert_eq!(b.points.len(), 4);
        assert_abs_diff_eq!(a.points[0].x, RAW_X_A, epsilon = 1e-15);
        assert_abs_diff_eq!(a.points[4].x, 1.18, epsilon = 1e-12);
        assert_abs_diff_eq!(b.points[0].x, RAW_X_B, epsilon = 1e-15);
        assert_abs_diff_eq!(b.points[3].x, 1.74, epsilon = 1e-12);
        assert_eq!(a.style.alpha, 0.2);
    }

    #[test]
    fn test_paired_without_lines_uses_points() {
        let (ea, eb) = estimates(&A, &B);
        let config = Config {
            paired_data_joining_lines: false,
            ..paired()
        };
        let layout = compute_ab_layout(&A, &B, &ea, &eb, &config).unwrap();
        assert!(matches!(layout.raw, RawMarks::Points { .. }));
    }

    #[test]
    fn test_summary_marks() {
        let (ea, eb) = estimates(&A, &B);
        let layout = compute_ab_layout(&A, &B, &ea, &eb, &paired()).unwrap();
        assert_eq!(layout.a.mean, Point::new(X_A, 3.0));
        assert_eq!(layout.b.ci.start.x, X_B);
        assert_abs_diff_eq!(layout.b.ci.end.y, 11.01624092, epsilon = 1e-7);
        assert_eq!(layout.a.marker.size, 5.0);
    }

    #[test]
    fn test_yticks_contain_raw_data() {
        let (ea, eb) = estimates(&A, &B);
        let layout = compute_ab_layout(&A, &B, &ea, &eb, &paired()).unwrap();
        assert_eq!(layout.yticks.step, 2.5);
        assert_eq!(layout.yticks.ticks, vec![0.0, 2.5, 5.0, 7.5, 10.0]);
        assert_eq!(layout.ylim, (0.0, 10.0));
        assert_eq!(layout.ylabel, "Amplitude (a.u.)");
        assert_eq!(layout.ytick_side, AxisSide::Left);
    }

    #[test]
    fn test_fixed_ticks_unchanged_when_data_inside() {
        let a = [1.0, 3.0, 5.0];
        let b = [2.0, 7.0, 9.0];
        let (ea, eb) = estimates(&a, &b);
        let locator = FixedTicks(vec![0.0, 2.0, 4.0, 6.0, 8.0, 10.0]);
        let layout =
            compute_ab_layout_with(&a, &b, &ea, &eb, &Config::default(), &locator).unwrap();
        assert_eq!(layout.yticks.ticks, vec![0.0, 2.0, 4.0, 6.0, 8.0, 10.0]);
    }

    #[test]
    fn test_fixed_ticks_widen_one_step() {
        let a = [1.0, 3.0, 5.0];
        let b = [2.0, 7.0, 10.5];
        let (ea, eb) = estimates(&a, &b);
        let locator = FixedTicks(vec![0.0, 2.0, 4.0, 6.0, 8.0, 10.0]);
        let layout =
            compute_ab_layout_with(&a, &b, &ea, &eb, &Config::default(), &locator).unwrap();
        assert_eq!(layout.ylim, (0.0, 12.0));
    }

    #[test]
    fn test_fixed_ticks_overflow() {
        let a = [1.0, 3.0, 5.0];
        let b = [2.0, 7.0, 40.0];
        let (ea, eb) = estimates(&a, &b);
        let locator = FixedTicks(vec![0.0, 2.0, 4.0, 6.0, 8.0, 10.0]);
        let err =
            compute_ab_layout_with(&a, &b, &ea, &eb, &Config::default(), &locator).unwrap_err();
        assert!(matches!(err, LayoutError::LayoutOverflow { .. }));
    }

    #[test]
    fn test_hidden_diff_label_drops_tick() {
        let (ea, eb) = estimates(&A, &B);
        let config = Config {
            labels: Abd::new("ants".into(), "fleas".into(), String::new()),
            ..Config::default()
        };
        let layout = compute_ab_layout(&A, &B, &ea, &eb, &config).unwrap();
        assert_eq!(layout.xticks, vec![X_A, X_B]);
        assert_eq!(layout.xtick_labels, vec!["ants", "fleas"]);

        let layout = compute_ab_layout(&A, &B, &ea, &eb, &Config::default()).unwrap();
        assert_eq!(layout.xticks, vec![X_A, X_B, X_DIFF_TICK]);
        assert_eq!(layout.xlim, AB_XLIM);
    }

    #[test]
    fn test_rejects_empty_and_non_finite() {
        let (ea, eb) = estimates(&A, &B);
        assert_eq!(
            compute_ab_layout(&[], &B, &ea, &eb, &Config::default()),
            Err(LayoutError::EmptySample(Group::A))
        );
        assert_eq!(
            compute_ab_layout(&A, &[1.0, f64::NAN], &ea, &eb, &Config::default()),
            Err(LayoutError::NonFiniteData)
        );
        let undefined = Estimate::new(4.0, f64::NAN, f64::NAN);
        assert_eq!(
            compute_ab_layout(&A, &[4.0], &ea, &undefined, &Config::default()),
            Err(LayoutError::NonFiniteData)
        );
    }
}
