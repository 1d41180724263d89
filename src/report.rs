//! Console summary of the three estimates.

use crate::abd::Abd;
use crate::estimate::{ConfidenceLevel, EstimateTriple};

/// Formats the estimates as a fixed-width table.
///
/// ```text
/// --------------------------------------------------------------
/// outcome                 mean              95% CI
/// --------------------------------------------------------------
/// a                       3.00           0.09 to 5.91
/// ...
/// ```
///
/// Numbers use `decimals` places. The upper bound is left-aligned, so rows
/// carry trailing spaces.
pub fn estimates_table(
    estimates: &EstimateTriple,
    labels: &Abd<String>,
    level: ConfidenceLevel,
    decimals: usize,
) -> String {
    let header = format!(
        "{:<12}{:>16}{:^34}",
        "outcome",
        "mean",
        format!("{}% CI", level.percent())
    );
    let rule = "-".repeat(header.chars().count());

    let mut lines = vec![rule.clone(), header, rule.clone()];
    for (group, estimate) in estimates.iter() {
        lines.push(format!(
            "{:<12}{:>16.p$}{:>15.p$} to {:<15.p$}",
            labels[group],
            estimate.mean(),
            estimate.ci_low(),
            estimate.ci_high(),
            p = decimals,
        ));
    }
    lines.push(rule);
    lines.join("\n")
}
