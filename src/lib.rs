//! # abd-figure
//!
//! Estimation and layout engine for A/B/difference (ABD) figures.
//!
//! An ABD figure shows two groups of raw observations with their means and
//! confidence intervals, plus a floating axis for the mean difference
//! `B − A` and its interval. This crate computes the estimates and the
//! geometry; drawing is left to an external renderer that consumes the
//! [`LayoutSpec`] (directly or via [`LayoutSpec::to_json`]).
//!
//! ## Modules
//!
//! - [`stats`]: compensated mean, population variance and extremes
//! - [`special`]: Student-t CDF and quantile, inverse normal CDF
//! - [`estimate`]: paired/unpaired estimators with t-based intervals
//! - [`layout`]: x positions, jitter, y-tick optimisation, floating
//!   difference axis
//! - [`config`]: options with defaults, JSON loading and validation
//! - [`report`]: console summary table
//! - [`demo`]: seeded mock data and demonstration scenarios
//!
//! ## Example
//!
//! ```
//! use abd_figure::{prepare_figure, Config, Design};
//!
//! let a = [1.0, 2.0, 3.0, 4.0, 5.0];
//! let b = [1.0, 4.0, 6.0, 7.0, 9.0];
//! let config = Config { design: Design::Paired, ..Config::default() };
//!
//! let figure = prepare_figure(&a, &b, &config)?;
//! assert!((figure.estimates.diff.mean() - 2.4).abs() < 1e-12);
//! assert_eq!(figure.layout.ab.yticks.ticks, vec![0.0, 2.0, 4.0, 6.0, 8.0, 10.0]);
//! # Ok::<(), abd_figure::Error>(())
//! ```
//!
//! ## Logging
//!
//! Events are emitted through [`tracing`]; install a subscriber to see them.
//! The summary table is logged at `INFO`, layout decisions at `DEBUG`.

pub mod abd;
pub mod config;
pub mod demo;
mod error;
pub mod estimate;
pub mod layout;
pub mod report;
pub mod special;
pub mod stats;

use serde::Serialize;

pub use abd::{Abd, Group};
pub use config::{Config, ConfigError, SaveType};
pub use error::{Error, Result};
pub use estimate::{
    critical_value, estimate_difference, estimate_single, estimate_triple, paired_differences,
    ConfidenceLevel, Design, Estimate, EstimateError, EstimateTriple,
};
pub use layout::{LayoutError, LayoutSpec};

/// Estimates plus the layout that draws them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Figure {
    pub estimates: EstimateTriple,
    /// Console summary of `estimates`, see [`report::estimates_table`].
    pub summary: String,
    pub layout: LayoutSpec,
}

/// Validates `config`, estimates A, B and their difference, then lays out
/// the figure.
///
/// # Errors
/// - [`Error::Config`] if `config` fails [`Config::validate`].
/// - [`Error::Estimate`] for empty samples or unequal paired lengths.
/// - [`Error::Layout`] for non-finite data or ticks that cannot contain it.
pub fn prepare_figure(a: &[f64], b: &[f64], config: &Config) -> Result<Figure> {
    config.validate()?;
    let estimates = estimate_triple(a, b, config.design, config.confidence_level)?;

    let summary = report::estimates_table(
        &estimates,
        &config.labels,
        config.confidence_level,
        config.decimals,
    );
    tracing::info!(design = %config.design, level = %config.confidence_level, "\n{summary}");

    let layout = layout::plan(a, b, &estimates, config)?;
    Ok(Figure {
        estimates,
        summary,
        layout,
    })
}
