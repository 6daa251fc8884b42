//! Weighted sampling without replacement.
//!
//! Each draw picks a remaining candidate with probability proportional to
//! its weight, then removes it from the pool. Weights are recomputed on every
//! draw; pools are small enough that an O(count * pool) walk is fine.

use rand::seq::SliceRandom;
use rand::Rng;

/// Draw up to `count` distinct items from `catalog`, weighted by `weight_of`.
///
/// The result is in draw order. When `count` covers the whole catalog the
/// result is a uniform shuffle of every item. Non-finite or non-positive
/// weights count as zero; if every remaining candidate weighs zero, the draw
/// falls back to a uniform pick. `catalog` is never modified.
pub fn sample<'a, T, F, R>(catalog: &'a [T], count: usize, weight_of: F, rng: &mut R) -> Vec<&'a T>
where
    F: Fn(&T) -> f64,
    R: Rng + ?Sized,
{
    let mut remaining: Vec<&'a T> = catalog.iter().collect();

    if count == 0 {
        return Vec::new();
    }
    if count >= remaining.len() {
        remaining.shuffle(rng);
        return remaining;
    }

    let mut selected = Vec::with_capacity(count);
    for _ in 0..count {
        let weights: Vec<f64> = remaining.iter().map(|&item| usable(weight_of(item))).collect();
        let index = pick_index(&weights, rng);
        selected.push(remaining.remove(index));
    }

    selected
}

fn usable(weight: f64) -> f64 {
    if weight.is_finite() && weight > 0.0 {
        weight
    } else {
        0.0
    }
}

/// Roulette-wheel pick over `weights`, which must be non-empty.
fn pick_index<R: Rng + ?Sized>(weights: &[f64], rng: &mut R) -> usize {
    let total: f64 = weights.iter().sum();
    if !(total.is_finite() && total > 0.0) {
        return rng.gen_range(0..weights.len());
    }

    let target = rng.gen::<f64>() * total;
    let mut cumulative = 0.0;
    for (index, weight) in weights.iter().enumerate() {
        cumulative += weight;
        if cumulative > target {
            return index;
        }
    }

    // Rounding can leave `target` at the very top of the range.
    weights
        .iter()
        .rposition(|&w| w > 0.0)
        .unwrap_or(weights.len() - 1)
}
