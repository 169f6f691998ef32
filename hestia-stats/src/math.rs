use hestia_api_types::report::PriceBoxStats;

/// Median of an already sorted, non-empty slice.
pub(crate) fn median_sorted(sorted: &[f64]) -> f64 {
    let n = sorted.len();
    if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    }
}

/// Quartiles with the exclusive median method: the halves used for Q1/Q3
/// leave the median observation out when the count is odd. This is the
/// quartile method the dashboard's box plots use.
pub fn quartiles_exclusive(sorted: &[f64]) -> Option<(f64, f64, f64)> {
    if sorted.is_empty() {
        return None;
    }
    let n = sorted.len();
    let median = median_sorted(sorted);
    let lower = &sorted[..n / 2];
    let upper = &sorted[n.div_ceil(2)..];
    // a single observation is its own box
    let q1 = if lower.is_empty() {
        median
    } else {
        median_sorted(lower)
    };
    let q3 = if upper.is_empty() {
        median
    } else {
        median_sorted(upper)
    };
    Some((q1, median, q3))
}

pub fn mean(values: &[f64]) -> Option<f64> {
    (!values.is_empty()).then(|| values.iter().sum::<f64>() / values.len() as f64)
}

/// Box-plot statistics for one price group. Whiskers land on the most
/// extreme observation still within 1.5 IQR of the box.
pub fn price_box_stats(prices: &[f64]) -> Option<PriceBoxStats> {
    let mut sorted = prices.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let (q1, median, q3) = quartiles_exclusive(&sorted)?;
    let reach = 1.5 * (q3 - q1);
    let whisker_low = sorted
        .iter()
        .copied()
        .find(|v| *v >= q1 - reach)
        .unwrap_or(q1);
    let whisker_high = sorted
        .iter()
        .rev()
        .copied()
        .find(|v| *v <= q3 + reach)
        .unwrap_or(q3);
    Some(PriceBoxStats {
        q1,
        median,
        q3,
        whisker_low,
        whisker_high,
        sample_size: sorted.len(),
    })
}
