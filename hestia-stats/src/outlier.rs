use hestia_api_types::Listing;
use thiserror::Error;
use tracing::debug;

use crate::math::median_sorted;

/// Default neighbour count for the price filter; clamped to `n - 1` for
/// small groups.
pub const DEFAULT_NEIGHBOURS: usize = 20;

/// Scores at or below this are always inliers, whatever the score
/// distribution looks like. Density ratios hover around 1 inside a cluster.
const MIN_DROP_SCORE: f64 = 1.5;
/// Consistency constant putting the median absolute deviation on the sigma
/// scale.
const MAD_SCALE: f64 = 1.4826;
/// Keeps densities finite for groups full of identical prices.
const DENSITY_STABILIZER: f64 = 1e-9;

#[derive(Debug, Error)]
pub enum FilterError {
    #[error("price at row {index} is {price}, prices must be positive and finite")]
    InvalidInput { index: usize, price: f64 },
}

/// Scores every price against the local density of its k nearest neighbours
/// and returns a keep mask (`true` = keep). Stateless: nothing is fitted or
/// carried between calls, so each city or sub-view is judged only against
/// itself.
///
/// A record's density is the reciprocal mean distance to its `k` closest
/// other prices. Its score is the mean density of those neighbours divided
/// by its own density, which sits near 1 inside a cluster and grows large
/// for an isolated price. The drop threshold adapts to the score
/// distribution of the call instead of assuming a fixed contamination
/// fraction.
///
/// Fewer than 3 records cannot outvote each other, so the mask is all-keep.
pub fn outlier_mask(prices: &[f64], k: usize) -> Result<Vec<bool>, FilterError> {
    validate(prices)?;
    let n = prices.len();
    if n < 3 {
        return Ok(vec![true; n]);
    }
    let k = k.min(n - 1);

    // Prices are one-dimensional: sort once, then the k nearest neighbours
    // of any record form a contiguous window around its sorted position.
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| prices[a].total_cmp(&prices[b]));
    let sorted: Vec<f64> = order.iter().map(|&i| prices[i]).collect();

    let mut windows = vec![(0usize, 0usize); n];
    let mut density = vec![0.0; n];
    for pos in 0..n {
        let window = nearest_window(&sorted, pos, k);
        let value = sorted[pos];
        let sum: f64 = (window.0..=window.1)
            .filter(|&j| j != pos)
            .map(|j| (sorted[j] - value).abs())
            .sum();
        windows[pos] = window;
        density[pos] = 1.0 / (sum / k as f64 + DENSITY_STABILIZER);
    }

    let scores: Vec<f64> = (0..n)
        .map(|pos| {
            let (lo, hi) = windows[pos];
            let neighbour_density: f64 = (lo..=hi)
                .filter(|&j| j != pos)
                .map(|j| density[j])
                .sum::<f64>()
                / k as f64;
            neighbour_density / density[pos]
        })
        .collect();

    let threshold = drop_threshold(&scores);
    let mut keep = vec![true; n];
    let mut dropped = 0usize;
    for (pos, &score) in scores.iter().enumerate() {
        if score > threshold {
            keep[order[pos]] = false;
            dropped += 1;
        }
    }
    debug!(threshold, dropped, total = n, "scored prices for outliers");
    Ok(keep)
}

/// Drops the price outliers out of a listing collection. The output is a
/// subset of the input in input order.
pub fn filter_listings(
    listings: Vec<Listing>,
    k: usize,
) -> Result<Vec<Listing>, FilterError> {
    let prices: Vec<f64> = listings.iter().map(|l| l.price).collect();
    let mask = outlier_mask(&prices, k)?;
    Ok(listings
        .into_iter()
        .zip(mask)
        .filter_map(|(listing, keep)| keep.then_some(listing))
        .collect())
}

fn validate(prices: &[f64]) -> Result<(), FilterError> {
    for (index, &price) in prices.iter().enumerate() {
        if !price.is_finite() || price <= 0.0 {
            return Err(FilterError::InvalidInput { index, price });
        }
    }
    Ok(())
}

/// Index range (inclusive) of `pos` plus its k nearest values in `sorted`.
fn nearest_window(sorted: &[f64], pos: usize, k: usize) -> (usize, usize) {
    let value = sorted[pos];
    let (mut lo, mut hi) = (pos, pos);
    for _ in 0..k {
        let left = lo.checked_sub(1).map(|j| value - sorted[j]);
        let right = (hi + 1 < sorted.len()).then(|| sorted[hi + 1] - value);
        match (left, right) {
            (Some(l), Some(r)) if l <= r => lo -= 1,
            (Some(_), Some(_)) => hi += 1,
            (Some(_), None) => lo -= 1,
            (None, Some(_)) => hi += 1,
            (None, None) => break,
        }
    }
    (lo, hi)
}

/// Scores above this are dropped. The median + 5 scaled MADs adapts the cut
/// to however tight or noisy this particular group's scores are, with
/// [`MIN_DROP_SCORE`] as the fixed floor. Genuine price outliers score an
/// order of magnitude past either bound.
fn drop_threshold(scores: &[f64]) -> f64 {
    let mut sorted = scores.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let median = median_sorted(&sorted);
    let mut deviations: Vec<f64> = scores.iter().map(|s| (s - median).abs()).collect();
    deviations.sort_by(|a, b| a.total_cmp(b));
    let mad = median_sorted(&deviations);
    MIN_DROP_SCORE.max(median + 5.0 * MAD_SCALE * mad)
}
