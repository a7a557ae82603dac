//! Small statistics helpers: means, pie shares and histogram bins


/// Bin count used by every histogram on the dashboard
pub const DEFAULT_BINS: usize = 10;

/// Arithmetic mean, `None` for an empty slice
pub fn mean(values: &[u32]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let sum: u64 = values.iter().map(|&v| u64::from(v)).sum();
    Some(sum as f64 / values.len() as f64)
}

/// One labelled wedge of a pie chart
#[derive(Debug, Clone, PartialEq)]
pub struct Share {
    pub label: String,
    pub value: f64,
    /// Percentage of the total (0-100)
    pub percentage: f64,
}

impl Share {
    /// Percentage text as drawn on the wedge, e.g. `25.0%`
    pub fn percentage_label(&self) -> String {
        format!("{:.1}%", self.percentage)
    }
}

/// Turn labelled sizes into pie shares. With a zero total every share is 0%.
pub fn pie_shares<L: Into<String>>(sizes: impl IntoIterator<Item = (L, f64)>) -> Vec<Share> {
    let items: Vec<(String, f64)> = sizes.into_iter().map(|(l, v)| (l.into(), v)).collect();
    let total: f64 = items.iter().map(|(_, v)| v).sum();

    items
        .into_iter()
        .map(|(label, value)| {
            let percentage = if total > 0.0 { value / total * 100.0 } else { 0.0 };
            Share {
                label,
                value,
                percentage,
            }
        })
        .collect()
}

/// Equal-width histogram bins over one or more series.
///
/// Binning follows the usual numeric convention: `bins` intervals spanning
/// `[min, max]`, each half-open except the last which also holds `max`.
/// A degenerate range (`min == max`) is widened to `[min - 0.5, max + 0.5]`.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramBins {
    /// `bins + 1` ascending bin edges
    pub edges: Vec<f64>,
    /// Per-series frequencies, one `Vec` of length `bins` for each series
    pub counts: Vec<Vec<u32>>,
}

impl HistogramBins {
    /// Bin several series over their shared range
    pub fn shared(series: &[&[u32]], bins: usize) -> Self {
        let bins = bins.max(1);
        let (lo, hi) = Self::range(series.iter().flat_map(|s| s.iter().copied()));
        let width = (hi - lo) / bins as f64;
        let edges = (0..=bins).map(|i| lo + width * i as f64).collect();

        let counts = series
            .iter()
            .map(|values| {
                let mut freq = vec![0u32; bins];
                for &value in values.iter() {
                    let offset = ((f64::from(value) - lo) / width).floor() as usize;
                    freq[offset.min(bins - 1)] += 1;
                }
                freq
            })
            .collect();

        Self { edges, counts }
    }

    /// Bin a single series over its own range
    pub fn single(values: &[u32], bins: usize) -> Self {
        Self::shared(&[values], bins)
    }

    pub fn bin_count(&self) -> usize {
        self.edges.len().saturating_sub(1)
    }

    /// Largest frequency across all series and bins
    pub fn max_frequency(&self) -> u32 {
        self.counts.iter().flatten().copied().max().unwrap_or(0)
    }

    /// `(start, end)` of bin `i`
    pub fn bin_range(&self, i: usize) -> (f64, f64) {
        (self.edges[i], self.edges[i + 1])
    }

    fn range(values: impl Iterator<Item = u32>) -> (f64, f64) {
        let (min, max) = values.fold((None, None), |(min, max): (Option<u32>, Option<u32>), v| {
            (Some(min.map_or(v, |m| m.min(v))), Some(max.map_or(v, |m| m.max(v))))
        });

        match (min, max) {
            (Some(min), Some(max)) if min < max => (f64::from(min), f64::from(max)),
            (Some(v), Some(_)) => (f64::from(v) - 0.5, f64::from(v) + 0.5),
            _ => (0.0, 1.0),
        }
    }
}
