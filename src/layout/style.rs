//! Styling handed through to the renderer untouched.

use serde::Serialize;

use crate::abd::Group;
use crate::config::Config;

/// Appearance of a point marker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerStyle {
    pub marker: String,
    pub color: String,
    pub size: f64,
    /// Opacity in `[0, 1]`.
    pub alpha: f64,
    /// Marker outline width; raw markers are drawn without one.
    pub edge_width: Option<f64>,
}

/// Appearance of a line or segment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineStyle {
    pub color: String,
    pub width: f64,
    pub alpha: f64,
    pub dashed: bool,
}

impl MarkerStyle {
    /// Marker for the mean of `group`.
    pub fn summary(config: &Config, group: Group) -> Self {
        Self {
            marker: config.marker[group].clone(),
            color: config.marker_color[group].clone(),
            size: config.summary_marker_size[group],
            alpha: 1.0,
            edge_width: None,
        }
    }

    /// Marker for the raw observations of `group`.
    pub fn raw(config: &Config, group: Group) -> Self {
        Self {
            marker: config.marker[group].clone(),
            color: config.marker_color[group].clone(),
            size: config.raw_marker_size[group],
            alpha: config.raw_marker_transparency,
            edge_width: Some(0.0),
        }
    }
}

impl LineStyle {
    /// Confidence interval of `group`, drawn in the group's marker colour.
    pub fn ci(config: &Config, group: Group) -> Self {
        Self {
            color: config.marker_color[group].clone(),
            width: config.ci_line_width,
            alpha: 1.0,
            dashed: false,
        }
    }

    pub fn paired(config: &Config) -> Self {
        Self {
            color: config.paired_data_line_color.clone(),
            width: config.paired_data_line_width,
            alpha: config.paired_data_line_transparency,
            dashed: false,
        }
    }

    pub fn zero(config: &Config) -> Self {
        Self {
            color: config.zero_line_color.clone(),
            width: config.zero_line_width,
            alpha: 1.0,
            dashed: true,
        }
    }
}
