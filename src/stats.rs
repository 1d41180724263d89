//! Descriptive statistics used by the estimators.
//!
//! Only the handful of summaries the ABD estimators need live here. All
//! of them use compensated summation so that large offsets (e.g. samples
//! around `1e9` with unit spread) do not lose their low-order bits.
//!
//! # Conventions
//!
//! The estimators work with the **population** variance (denominator `n`),
//! matching the pooled sum-of-squares formulas in [`crate::estimate`].

/// Arithmetic mean using Neumaier compensated summation.
///
/// # Returns
/// - `None` if `data` is empty.
///
/// Non-finite values are not filtered: they propagate into the result.
///
/// # Examples
/// ```
/// use abd_figure::stats::mean;
/// assert_eq!(mean(&[1.0, 2.0, 3.0, 4.0, 5.0]), Some(3.0));
/// assert_eq!(mean(&[]), None);
/// ```
pub fn mean(data: &[f64]) -> Option<f64> {
    if data.is_empty() {
        return None;
    }
    Some(compensated_sum(data) / data.len() as f64)
}

/// Population variance (denominator `n`), two-pass around the
/// compensated mean.
///
/// # Returns
/// - `None` if `data` is empty.
///
/// # Examples
/// ```
/// use abd_figure::stats::population_variance;
/// let v = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
/// assert!((population_variance(&v).unwrap() - 4.0).abs() < 1e-12);
/// ```
pub fn population_variance(data: &[f64]) -> Option<f64> {
    let m = mean(data)?;
    let squares: Vec<f64> = data.iter().map(|&x| (x - m) * (x - m)).collect();
    Some(compensated_sum(&squares) / data.len() as f64)
}

/// Population standard deviation, `sqrt(population_variance(data))`.
pub fn population_std_dev(data: &[f64]) -> Option<f64> {
    population_variance(data).map(f64::sqrt)
}

/// Standard error of the mean: population SD / √n.
pub fn standard_error(data: &[f64]) -> Option<f64> {
    population_std_dev(data).map(|sd| sd / (data.len() as f64).sqrt())
}

/// Sum of squared deviations expressed as `(n − 1) × population variance`.
///
/// This is the per-group term of the pooled variability used by the
/// unpaired difference estimator.
///
/// # Examples
/// ```
/// use abd_figure::stats::weighted_sum_of_squares;
/// // population variance of 1..=5 is 2, n − 1 = 4
/// let w = weighted_sum_of_squares(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
/// assert!((w - 8.0).abs() < 1e-12);
/// ```
pub fn weighted_sum_of_squares(data: &[f64]) -> Option<f64> {
    population_variance(data).map(|var| (data.len() as f64 - 1.0) * var)
}

/// Smallest value in the slice.
///
/// # Returns
/// - `None` if `data` is empty or contains NaN.
pub fn min(data: &[f64]) -> Option<f64> {
    if data.is_empty() {
        return None;
    }
    data.iter().copied().try_fold(f64::INFINITY, |acc, x| {
        if x.is_nan() {
            None
        } else {
            Some(acc.min(x))
        }
    })
}

/// Largest value in the slice.
///
/// # Returns
/// - `None` if `data` is empty or contains NaN.
pub fn max(data: &[f64]) -> Option<f64> {
    if data.is_empty() {
        return None;
    }
    data.iter().copied().try_fold(f64::NEG_INFINITY, |acc, x| {
        if x.is_nan() {
            None
        } else {
            Some(acc.max(x))
        }
    })
}

/// Neumaier compensated summation.
///
/// Keeps a running correction term and picks the branch that captures
/// the low-order bits of the smaller operand, so the error stays O(ε)
/// regardless of `n` or ordering.
///
/// Reference: Neumaier (1974), *ZAMM* 54(1), pp. 39–51.
pub fn compensated_sum(data: &[f64]) -> f64 {
    let mut sum = 0.0_f64;
    let mut c = 0.0_f64;
    for &x in data {
        let t = sum + x;
        if sum.abs() >= x.abs() {
            c += (sum - t) + x;
        } else {
            c += (x - t) + sum;
        }
        sum = t;
    }
    sum + c
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn finite_vec(min_len: usize, max_len: usize) -> impl Strategy<Value = Vec<f64>> {
        proptest::collection::vec(-1e6_f64..1e6, min_len..=max_len)
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(300))]

        #[test]
        fn variance_non_negative(data in finite_vec(1, 60)) {
            prop_assert!(population_variance(&data).unwrap() >= 0.0);
        }

        #[test]
        fn mean_between_extremes(data in finite_vec(1, 60)) {
            let m = mean(&data).unwrap();
            let tol = 1e-9 * m.abs().max(1.0);
            prop_assert!(min(&data).unwrap() - tol <= m && m <= max(&data).unwrap() + tol);
        }

        #[test]
        fn shift_leaves_variance_unchanged(data in finite_vec(2, 60), shift in -1e3_f64..1e3) {
            let shifted: Vec<f64> = data.iter().map(|x| x + shift).collect();
            let v0 = population_variance(&data).unwrap();
            let v1 = population_variance(&shifted).unwrap();
            prop_assert!((v0 - v1).abs() <= 1e-6 * v0.max(1.0));
        }
    }
}
