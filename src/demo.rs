//! Mock data and canned demonstration figures.
//!
//! # Reproducibility
//!
//! Every generator takes an explicit RNG. Use [`create_rng`] with a fixed
//! seed to get the same samples on every run on the same platform.

use rand::Rng;
use rand_distr::{Distribution, StandardNormal};

use crate::abd::Abd;
use crate::config::Config;
use crate::estimate::{ConfidenceLevel, Design, EstimateError};

/// Parameters of a mocked two-group experiment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DataSpecs {
    pub size_a: usize,
    /// Ignored for paired designs, where B has `size_a` values.
    pub size_b: usize,
    pub mean_a: f64,
    pub mean_b: f64,
    pub sd_a: f64,
    /// Spread of B, or of the per-pair effect for paired designs.
    pub sd_b: f64,
    pub design: Design,
}

impl Default for DataSpecs {
    fn default() -> Self {
        Self {
            size_a: 30,
            size_b: 30,
            mean_a: 100.0,
            mean_b: 95.0,
            sd_a: 5.0,
            sd_b: 5.0,
            design: Design::Paired,
        }
    }
}

/// A named demonstration: two samples and the configuration to draw them.
#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    pub name: &'static str,
    pub a: Vec<f64>,
    pub b: Vec<f64>,
    pub config: Config,
}

/// Creates a fast, seeded random number generator.
///
/// # Examples
/// ```
/// use abd_figure::demo::create_rng;
/// use rand::Rng;
/// let mut rng = create_rng(42);
/// let x: f64 = rng.random();
/// assert!(x >= 0.0 && x < 1.0);
/// ```
pub fn create_rng(seed: u64) -> rand::rngs::SmallRng {
    use rand::SeedableRng;
    rand::rngs::SmallRng::seed_from_u64(seed)
}

fn normal<R: Rng + ?Sized>(rng: &mut R, n: usize, mean: f64, sd: f64) -> Vec<f64> {
    (0..n)
        .map(|_| {
            let z: f64 = StandardNormal.sample(&mut *rng);
            mean + sd * z
        })
        .collect()
}

/// Draws samples A and B.
///
/// A ~ N(mean_a, sd_a). For a paired design each B value is its A value
/// minus an effect drawn from N(mean_a − mean_b, sd_b); otherwise
/// B ~ N(mean_b, sd_b).
///
/// # Examples
/// ```
/// use abd_figure::demo::{create_rng, generate, DataSpecs};
/// let (a, b) = generate(&DataSpecs::default(), &mut create_rng(7));
/// assert_eq!(a.len(), 30);
/// assert_eq!(b.len(), 30);
/// ```
pub fn generate<R: Rng + ?Sized>(specs: &DataSpecs, rng: &mut R) -> (Vec<f64>, Vec<f64>) {
    let a = normal(rng, specs.size_a, specs.mean_a, specs.sd_a);
    let b = match specs.design {
        Design::Paired => {
            let effects = normal(rng, specs.size_a, specs.mean_a - specs.mean_b, specs.sd_b);
            a.iter().zip(&effects).map(|(x, e)| x - e).collect()
        }
        Design::Unpaired => normal(rng, specs.size_b, specs.mean_b, specs.sd_b),
    };
    (a, b)
}

fn per_group(a: &str, b: &str, diff: &str) -> Abd<String> {
    Abd::new(a.to_string(), b.to_string(), diff.to_string())
}

/// The built-in demonstration figures, drawn from one seeded RNG.
///
/// Each scenario plots the lower-mean sample as group A.
///
/// # Errors
/// Propagates [`EstimateError::InvalidConfidenceLevel`] from the built-in
/// levels.
pub fn scenarios(seed: u64) -> Result<Vec<Scenario>, EstimateError> {
    let mut rng = create_rng(seed);
    let mut scenarios = Vec::with_capacity(4);

    let (b, a) = generate(&DataSpecs::default(), &mut rng);
    scenarios.push(Scenario {
        name: "paired",
        a,
        b,
        config: Config {
            design: Design::Paired,
            ..Config::default()
        },
    });

    let specs = DataSpecs {
        size_a: 50,
        size_b: 10,
        mean_a: 10.0,
        mean_b: 4.0,
        sd_a: 5.0,
        sd_b: 3.0,
        design: Design::Unpaired,
    };
    let (b, a) = generate(&specs, &mut rng);
    scenarios.push(Scenario {
        name: "unpaired_styled",
        a,
        b,
        config: Config {
            confidence_level: ConfidenceLevel::new(95)?,
            measure_units: "Weight (Kg)".into(),
            labels: per_group("fish", "birds", "effect"),
            decimals: 4,
            marker: per_group("s", "s", "^"),
            marker_color: per_group("tab:blue", "tab:red", "tab:green"),
            fontsize: 12.0,
            ..Config::default()
        },
    });

    let specs = DataSpecs {
        size_a: 70,
        size_b: 10,
        mean_a: 0.234,
        mean_b: 0.1031,
        sd_a: 0.14,
        sd_b: 0.1,
        design: Design::Unpaired,
    };
    let (b, a) = generate(&specs, &mut rng);
    scenarios.push(Scenario {
        name: "unpaired_hidden_diff_label",
        a,
        b,
        config: Config {
            confidence_level: ConfidenceLevel::new(90)?,
            measure_units: "Height (cm)".into(),
            labels: per_group("ants", "fleas", ""),
            decimals: 8,
            marker_color: per_group("tab:brown", "tab:pink", "tab:olive"),
            raw_marker_transparency: 0.8,
            fontsize: 10.0,
            ..Config::default()
        },
    });

    let specs = DataSpecs {
        size_a: 10,
        size_b: 10,
        mean_a: 15.0,
        mean_b: 10.0,
        sd_a: 5.0,
        sd_b: 5.0,
        design: Design::Paired,
    };
    let (b, a) = generate(&specs, &mut rng);
    scenarios.push(Scenario {
        name: "paired_raw_differences",
        a,
        b,
        config: Config {
            design: Design::Paired,
            measure_units: "Anxiety (points)".into(),
            labels: per_group("Control", "Test", "Effect"),
            decimals: 1,
            marker_color: per_group("tab:orange", "tab:purple", "tab:cyan"),
            summary_marker_size: Abd::new(6.0, 6.0, 8.0),
            raw_marker_size: Abd::new(4.0, 4.0, 4.0),
            raw_marker_transparency: 1.0,
            paired_data_joining_lines: false,
            paired_data_plot_raw_diff: true,
            ci_line_width: 2.0,
            fontsize: 12.0,
            zero_line_width: 2.0,
            zero_line_color: "tab:red".into(),
            ..Config::default()
        },
    });

    Ok(scenarios)
}
