//! Small statistics kit used by the questions.
//!
//! Everything here is total: empty or degenerate input produces a defined value
//! (usually 0) instead of NaN or a panic.

use crate::{HashMap, hash_map_with_capacity};
use core::cmp::Ordering;

/// Count each distinct value and rank by descending count.
///
/// Values with equal counts keep the order in which they were first seen.
#[must_use]
pub fn frequency_ranking<'a>(values: impl IntoIterator<Item = &'a str>) -> Vec<(&'a str, usize)> {
    let values = values.into_iter();
    let mut index: HashMap<&str, usize> = hash_map_with_capacity(values.size_hint().0);
    let mut counts: Vec<(&str, usize)> = Vec::new();

    for value in values {
        match index.get(value) {
            Some(&i) => counts[i].1 += 1,
            None => {
                let _ = index.insert(value, counts.len());
                counts.push((value, 1));
            }
        }
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// The `k` items with the largest key, largest first. Ties keep input order.
///
/// NaN keys compare equal to everything, so they never reorder other items.
#[must_use]
pub fn top_k_by<T>(items: impl IntoIterator<Item = T>, k: usize, key: impl Fn(&T) -> f64) -> Vec<T> {
    let mut keyed: Vec<(f64, T)> = items.into_iter().map(|item| (key(&item), item)).collect();
    keyed.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));
    keyed.into_iter().take(k).map(|(_, item)| item).collect()
}

/// Arithmetic mean, `None` for an empty input.
#[must_use]
#[expect(clippy::cast_precision_loss, reason = "row counts are far below 2^52")]
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// Centered sums `(Σdx·dy, Σdx², Σdy²)` over paired samples.
fn centered_sums(xs: &[f64], ys: &[f64]) -> Option<(f64, f64, f64)> {
    let n = xs.len().min(ys.len());
    if n == 0 {
        return None;
    }

    let (xs, ys) = (&xs[..n], &ys[..n]);
    let mx = mean(xs)?;
    let my = mean(ys)?;

    let mut sxy = 0.0;
    let mut sxx = 0.0;
    let mut syy = 0.0;
    for (x, y) in xs.iter().zip(ys) {
        let dx = x - mx;
        let dy = y - my;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }

    Some((sxy, sxx, syy))
}

/// Pearson correlation coefficient of paired samples, clamped to `[-1, 1]`.
///
/// Empty input and zero variance in either column give 0.
#[must_use]
pub fn pearson(xs: &[f64], ys: &[f64]) -> f64 {
    let Some((sxy, sxx, syy)) = centered_sums(xs, ys) else {
        return 0.0;
    };

    if sxx == 0.0 || syy == 0.0 {
        return 0.0;
    }

    (sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0)
}

/// Slope `b` of the least-squares fit `y = a + b·x`.
///
/// Empty input and a constant predictor give 0.
#[must_use]
pub fn ols_slope(xs: &[f64], ys: &[f64]) -> f64 {
    let Some((sxy, sxx, _)) = centered_sums(xs, ys) else {
        return 0.0;
    };

    if sxx == 0.0 {
        return 0.0;
    }

    sxy / sxx
}

/// Round to 3 decimals, ties to even. Non-finite values and negative zero become 0.
#[must_use]
pub fn round3(value: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }

    let rounded = (value * 1000.0).round_ties_even() / 1000.0;
    if rounded == 0.0 { 0.0 } else { rounded }
}
