//! Layout engine: turns estimates and raw data into renderer-ready geometry.
//!
//! # Coordinate systems
//!
//! The AB part of the figure is drawn on a primary axis with fixed group
//! positions ([`X_A`], [`X_B`]) and x limits [`AB_XLIM`]. The difference is
//! drawn on a floating axis whose bottom-left corner and size are expressed
//! in primary-axis data coordinates ([`DiffLayout::x`], [`DiffLayout::y`],
//! [`DiffLayout::width`], [`DiffLayout::height`]). Marks on the floating axis
//! use its own coordinates, with x limits [`DIFF_XLIM`] and zero at the
//! difference origin.
//!
//! Both axes share one y tick step, so one unit of difference spans the same
//! height as one unit of measurement.
//!
//! The entry point is [`plan`]. [`compute_ab_layout`] and
//! [`compute_diff_layout`] are public for callers that already hold the
//! pieces.

pub mod ab;
pub mod diff;
pub mod style;
pub mod ticks;

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use crate::abd::Group;
use crate::config::{Config, SaveType};
use crate::estimate::EstimateTriple;

pub use ab::{compute_ab_layout, compute_ab_layout_with, AbLayout, RawMarks, RawPoints, SummaryMark};
pub use diff::{compute_diff_layout, DiffLayout, ZeroLine};
pub use style::{LineStyle, MarkerStyle};
pub use ticks::{optimise_yticks, FixedTicks, NiceTicks, TickLocator, YTicks};

// ============================================================================
// Positions
// ============================================================================

/// Group A centre on the primary axis.
pub const X_A: f64 = 1.0;
/// Group B centre on the primary axis.
pub const X_B: f64 = 2.0;
/// X tick labelling the floating difference axis.
pub const X_DIFF_TICK: f64 = 2.8;
/// First raw point of group A.
pub const RAW_X_A: f64 = 1.1;
/// First raw point of group B.
pub const RAW_X_B: f64 = 1.8;
pub const AB_XLIM: (f64, f64) = (0.8, 3.0);
/// Total horizontal spread shared by the raw points of the larger group.
pub const JITTER_RANGE: f64 = 0.1;

/// Left edge of the floating axis in primary-axis coordinates.
pub const DIFF_AXIS_X: f64 = 2.5;
pub const DIFF_AXIS_WIDTH: f64 = 0.5;
pub const DIFF_XLIM: (f64, f64) = (0.0, 0.5);
/// Mean difference marker on the floating axis.
pub const DIFF_X: f64 = 0.3;
/// First raw difference on the floating axis.
pub const DIFF_RAW_X: f64 = 0.15;

/// Whole tick steps searched beyond the initial ticks on each side.
pub const EXTRA_Y_TICKS: usize = 3;
/// Fraction of the data span added on each side when autoscaling.
pub const AUTOSCALE_MARGIN: f64 = 0.05;
/// Largest accepted `ytick_bins`.
pub const MAX_YTICK_BINS: usize = 100;
/// Upper bound on ticks generated for any axis.
pub const MAX_TICKS: usize = 1000;

// ============================================================================
// Errors
// ============================================================================

/// Direction relative to the data or to zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Below,
    Above,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Below => f.write_str("below"),
            Side::Above => f.write_str("above"),
        }
    }
}

/// Errors raised while laying out a figure.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LayoutError {
    /// Raw data reach past the extra candidate ticks.
    #[error(
        "raw data extend more than {EXTRA_Y_TICKS} steps of {step} {side} the initial y ticks"
    )]
    LayoutOverflow { side: Side, step: f64 },

    #[error("invalid y ticks: {0}")]
    InvalidTicks(String),

    #[error("data contain NaN or infinite values")]
    NonFiniteData,

    #[error("sample `{0}` is empty")]
    EmptySample(Group),
}

// ============================================================================
// Geometry
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Straight line between two points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

impl Segment {
    pub const fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    /// Vertical segment at `x` from `y0` to `y1`.
    pub const fn vertical(x: f64, y0: f64, y1: f64) -> Self {
        Self::new(Point::new(x, y0), Point::new(x, y1))
    }
}

/// Side of an axis carrying its y tick labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisSide {
    Left,
    Right,
}

// ============================================================================
// Whole figure
// ============================================================================

/// File the renderer should write.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SaveTarget {
    pub path: PathBuf,
    pub format: SaveType,
    pub dpi: u32,
}

/// Figure-wide settings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FigureSettings {
    pub width_height_in_inches: Option<(f64, f64)>,
    pub fontsize: f64,
    pub show: bool,
    pub save: Option<SaveTarget>,
}

impl FigureSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            width_height_in_inches: config.width_height_in_inches,
            fontsize: config.fontsize,
            show: config.show,
            save: config.figure_path().map(|path| SaveTarget {
                path,
                format: config.save_type,
                dpi: config.dpi,
            }),
        }
    }
}

/// Everything a renderer needs to draw an ABD figure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutSpec {
    pub ab: AbLayout,
    pub diff: DiffLayout,
    pub figure: FigureSettings,
}

impl LayoutSpec {
    /// Pretty-printed JSON for an external renderer.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Lays out the full figure.
///
/// For paired designs the raw differences `B[i] − A[i]` are paired
/// positionally up to the shorter sample; the estimator rejects unequal
/// lengths before this point.
///
/// # Errors
/// Any [`LayoutError`] from [`compute_ab_layout`] or
/// [`compute_diff_layout`].
pub fn plan(
    a: &[f64],
    b: &[f64],
    estimates: &EstimateTriple,
    config: &Config,
) -> Result<LayoutSpec, LayoutError> {
    let ab = compute_ab_layout(a, b, &estimates.a, &estimates.b, config)?;

    let raw_diffs: Option<Vec<f64>> = config
        .design
        .is_paired()
        .then(|| a.iter().zip(b).map(|(x, y)| y - x).collect());
    let diff = compute_diff_layout(
        &ab,
        &estimates.diff,
        raw_diffs.as_deref(),
        config.paired_data_plot_raw_diff,
        config,
    )?;

    Ok(LayoutSpec {
        ab,
        diff,
        figure: FigureSettings::from_config(config),
    })
}
