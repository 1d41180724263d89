//! Figure configuration.
//!
//! Every option has a default, so an empty JSON object is a complete
//! configuration. Per-group options (labels, markers, colours, sizes) are
//! [`Abd`] records and must give all three of `a`, `b` and `diff` when
//! overridden.
//!
//! ```
//! use abd_figure::{Config, Design};
//!
//! let config = Config::from_json(r#"{"design": "paired", "confidence_level": 99}"#)?;
//! assert_eq!(config.design, Design::Paired);
//! assert_eq!(config.confidence_level.percent(), 99);
//! assert_eq!(config.measure_units, "Amplitude (a.u.)");
//! # Ok::<(), abd_figure::ConfigError>(())
//! ```

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::abd::{Abd, Group};
use crate::estimate::{ConfidenceLevel, Design};
use crate::layout::MAX_YTICK_BINS;

/// Errors raised while loading or validating a [`Config`].
///
/// Unknown designs and out-of-range confidence levels in JSON input surface
/// as [`ConfigError::Parse`] carrying the estimator's message.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Output format of a saved figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SaveType {
    #[default]
    Png,
    Svg,
    Pdf,
}

impl SaveType {
    pub fn extension(self) -> &'static str {
        match self {
            SaveType::Png => "png",
            SaveType::Svg => "svg",
            SaveType::Pdf => "pdf",
        }
    }
}

impl fmt::Display for SaveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Options controlling estimation, layout and styling of an ABD figure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub design: Design,
    pub confidence_level: ConfidenceLevel,
    /// Y-axis label.
    pub measure_units: String,
    /// X tick labels. An empty `diff` label drops the third tick.
    pub labels: Abd<String>,
    /// Decimal places in the console summary table.
    pub decimals: usize,
    pub plot_name: String,
    pub save: bool,
    pub save_path: Option<PathBuf>,
    pub save_type: SaveType,
    pub dpi: u32,
    pub marker: Abd<String>,
    pub marker_color: Abd<String>,
    pub summary_marker_size: Abd<f64>,
    pub raw_marker_size: Abd<f64>,
    pub raw_marker_transparency: f64,
    /// Join paired observations with lines instead of drawing raw points.
    pub paired_data_joining_lines: bool,
    pub paired_data_line_color: String,
    pub paired_data_line_width: f64,
    pub paired_data_line_transparency: f64,
    /// Show raw paired differences on the difference axis.
    pub paired_data_plot_raw_diff: bool,
    pub ci_line_width: f64,
    pub fontsize: f64,
    pub zero_line_color: String,
    pub zero_line_width: f64,
    pub show: bool,
    /// Figure size; `None` leaves it to the renderer.
    pub width_height_in_inches: Option<(f64, f64)>,
    /// Target number of intervals for automatic y ticks, at most
    /// [`MAX_YTICK_BINS`].
    pub ytick_bins: usize,
}

impl Default for Config {
    fn default() -> Self {
        let per_group =
            |a: &str, b: &str, diff: &str| Abd::new(a.to_string(), b.to_string(), diff.to_string());
        Self {
            design: Design::Unpaired,
            confidence_level: ConfidenceLevel::default(),
            measure_units: "Amplitude (a.u.)".to_string(),
            labels: per_group("a", "b", "diff"),
            decimals: 2,
            plot_name: "figure".to_string(),
            save: false,
            save_path: None,
            save_type: SaveType::Png,
            dpi: 180,
            marker: per_group("o", "o", "^"),
            marker_color: per_group("black", "black", "black"),
            summary_marker_size: Abd::new(5.0, 5.0, 6.0),
            raw_marker_size: Abd::new(3.0, 3.0, 3.0),
            raw_marker_transparency: 0.2,
            paired_data_joining_lines: true,
            paired_data_line_color: "gainsboro".to_string(),
            paired_data_line_width: 1.0,
            paired_data_line_transparency: 0.3,
            paired_data_plot_raw_diff: true,
            ci_line_width: 1.0,
            fontsize: 11.0,
            zero_line_color: "grey".to_string(),
            zero_line_width: 1.0,
            show: true,
            width_height_in_inches: None,
            ytick_bins: 5,
        }
    }
}

impl Config {
    /// Parses a JSON object and validates the result.
    ///
    /// # Errors
    /// [`ConfigError::Parse`] for malformed JSON, unknown keys, an unknown
    /// design or a confidence level outside (0, 100);
    /// [`ConfigError::Invalid`] when [`Config::validate`] fails.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks numeric options the type system does not constrain.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for group in Group::ALL {
            positive(&format!("summary_marker_size.{group}"), self.summary_marker_size[group])?;
            positive(&format!("raw_marker_size.{group}"), self.raw_marker_size[group])?;
        }
        positive("paired_data_line_width", self.paired_data_line_width)?;
        positive("ci_line_width", self.ci_line_width)?;
        positive("fontsize", self.fontsize)?;
        positive("zero_line_width", self.zero_line_width)?;
        unit_interval("raw_marker_transparency", self.raw_marker_transparency)?;
        unit_interval("paired_data_line_transparency", self.paired_data_line_transparency)?;

        if let Some((width, height)) = self.width_height_in_inches {
            positive("width_height_in_inches.0", width)?;
            positive("width_height_in_inches.1", height)?;
        }
        if !(1..=MAX_YTICK_BINS).contains(&self.ytick_bins) {
            return Err(ConfigError::Invalid(format!(
                "ytick_bins must lie in 1..={MAX_YTICK_BINS}, got {}",
                self.ytick_bins
            )));
        }
        if self.dpi == 0 {
            return Err(ConfigError::Invalid("dpi must be positive".into()));
        }
        if self.save && self.plot_name.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "plot_name must not be empty when saving".into(),
            ));
        }
        Ok(())
    }

    /// Where the renderer should write the figure: `save_path/plot_name.ext`,
    /// or `None` when saving is off. Without a `save_path` the file name is
    /// returned as a relative path.
    pub fn figure_path(&self) -> Option<PathBuf> {
        if !self.save {
            return None;
        }
        let file_name = format!("{}.{}", self.plot_name, self.save_type.extension());
        Some(match &self.save_path {
            Some(dir) => dir.join(file_name),
            None => PathBuf::from(file_name),
        })
    }
}

fn positive(name: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!(
            "{name} must be finite and positive, got {value}"
        )))
    }
}

fn unit_interval(name: &str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!("{name} must lie in [0, 1], got {value}")))
    }
}
