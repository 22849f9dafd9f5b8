use super::ztest::SampleSummary;

// ---------------------------------------------------------------------------
// Histogram + kernel density estimate
// ---------------------------------------------------------------------------

/// A fixed-bin histogram with an overlaid Gaussian KDE curve.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    /// Left edge of the first bin.
    pub start: f64,
    pub bin_width: f64,
    pub counts: Vec<usize>,
    /// `(x, density)` points of the KDE curve; empty when undefined.
    pub density: Vec<[f64; 2]>,
    /// Number of values binned.
    pub n: usize,
}

impl Histogram {
    pub fn bin_center(&self, i: usize) -> f64 {
        self.start + (i as f64 + 0.5) * self.bin_width
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }
}

/// Bin `values` into `bins` equal-width bins spanning their range.
///
/// Empty input yields an empty histogram rather than an error; a
/// zero-span input (all values equal) collapses to one unit-width bin.
pub fn histogram(values: &[f64], bins: usize) -> Histogram {
    if values.is_empty() || bins == 0 {
        return Histogram {
            start: 0.0,
            bin_width: 0.0,
            counts: Vec::new(),
            density: Vec::new(),
            n: 0,
        };
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let span = max - min;

    let (start, bin_width, n_bins) = if span == 0.0 {
        (min - 0.5, 1.0, 1)
    } else {
        (min, span / bins as f64, bins)
    };

    let mut counts = vec![0usize; n_bins];
    for &v in values {
        // The maximum lands exactly on the right edge; close it into the
        // last bin.
        let idx = (((v - start) / bin_width) as usize).min(n_bins - 1);
        counts[idx] += 1;
    }

    Histogram {
        start,
        bin_width,
        counts,
        density: kde_curve(values, 200),
        n: values.len(),
    }
}

/// Gaussian kernel density estimate sampled at `points` positions,
/// bandwidth by Scott's rule. Undefined (fewer than two values, or zero
/// dispersion) yields an empty curve.
pub fn kde_curve(values: &[f64], points: usize) -> Vec<[f64; 2]> {
    let n = values.len();
    if n < 2 || points < 2 {
        return Vec::new();
    }
    let Some(summary) = SampleSummary::from_values(values) else {
        return Vec::new();
    };
    let bandwidth = summary.std_dev * (n as f64).powf(-0.2);
    if !bandwidth.is_finite() || bandwidth <= 0.0 {
        return Vec::new();
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let lo = min - 3.0 * bandwidth;
    let hi = max + 3.0 * bandwidth;
    let norm = n as f64 * bandwidth * (2.0 * std::f64::consts::PI).sqrt();

    (0..points)
        .map(|i| {
            let x = lo + (hi - lo) * i as f64 / (points - 1) as f64;
            let density = values
                .iter()
                .map(|&v| {
                    let u = (x - v) / bandwidth;
                    (-0.5 * u * u).exp()
                })
                .sum::<f64>()
                / norm;
            [x, density]
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Grouped five-number summaries (box plots)
// ---------------------------------------------------------------------------

/// Five-number summary of one category's values.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupStats {
    pub label: String,
    pub n: usize,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

/// Group `(label, value)` pairs by label and summarize each group.
///
/// Rows with a missing label are skipped; rows with a missing value are
/// excluded from their group only. Groups appear in first-seen order;
/// groups left with no usable values are omitted.
pub fn grouped_box_stats(
    pairs: impl Iterator<Item = (Option<String>, Option<f64>)>,
) -> Vec<GroupStats> {
    let mut groups: Vec<(String, Vec<f64>)> = Vec::new();

    for (label, value) in pairs {
        let Some(label) = label else { continue };
        let idx = match groups.iter().position(|(l, _)| *l == label) {
            Some(i) => i,
            None => {
                groups.push((label, Vec::new()));
                groups.len() - 1
            }
        };
        if let Some(v) = value {
            groups[idx].1.push(v);
        }
    }

    groups
        .into_iter()
        .filter_map(|(label, mut values)| {
            if values.is_empty() {
                return None;
            }
            values.sort_by(f64::total_cmp);
            Some(GroupStats {
                label,
                n: values.len(),
                min: values[0],
                q1: percentile(&values, 0.25),
                median: percentile(&values, 0.5),
                q3: percentile(&values, 0.75),
                max: values[values.len() - 1],
            })
        })
        .collect()
}

/// Linear-interpolation percentile over already-sorted values.
fn percentile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    if lo == hi {
        sorted[lo]
    } else {
        sorted[lo] + (pos - lo as f64) * (sorted[hi] - sorted[lo])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn histogram_bins_every_value() {
        let values = [250.0, 260.0, 150.0];
        let hist = histogram(&values, 30);
        assert_eq!(hist.n, 3);
        assert_eq!(hist.counts.iter().sum::<usize>(), 3);
        assert_eq!(hist.counts.len(), 30);
        // The maximum must not fall off the right edge.
        assert_eq!(*hist.counts.last().unwrap(), 1);
    }

    #[test]
    fn empty_input_yields_empty_histogram() {
        let hist = histogram(&[], 30);
        assert!(hist.is_empty());
        assert!(hist.counts.is_empty());
        assert!(hist.density.is_empty());
    }

    #[test]
    fn zero_span_collapses_to_one_bin() {
        let hist = histogram(&[42.0, 42.0, 42.0], 30);
        assert_eq!(hist.counts, vec![3]);
        assert_eq!(hist.bin_width, 1.0);
        // No dispersion, no density curve.
        assert!(hist.density.is_empty());
    }

    #[test]
    fn kde_integrates_to_roughly_one() {
        let values = [10.0, 12.0, 11.0, 14.0, 13.0, 9.0, 10.5, 12.5];
        let curve = kde_curve(&values, 400);
        assert!(!curve.is_empty());
        let dx = curve[1][0] - curve[0][0];
        let area: f64 = curve.iter().map(|p| p[1] * dx).sum();
        assert!((area - 1.0).abs() < 0.05, "area = {area}");
    }

    #[test]
    fn quartiles_interpolate_linearly() {
        let sorted = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(percentile(&sorted, 0.25), 1.75);
        assert_eq!(percentile(&sorted, 0.5), 2.5);
        assert_eq!(percentile(&sorted, 0.75), 3.25);
    }

    #[test]
    fn groups_keep_first_seen_order_and_drop_missing_per_group() {
        let pairs = vec![
            (Some("PHEV".to_string()), Some(30.0)),
            (Some("BEV".to_string()), Some(250.0)),
            (Some("PHEV".to_string()), None),
            (Some("BEV".to_string()), Some(200.0)),
            (None, Some(999.0)),
        ];
        let stats = grouped_box_stats(pairs.into_iter());

        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0].label, "PHEV");
        assert_eq!(stats[0].n, 1);
        assert_eq!(stats[1].label, "BEV");
        assert_eq!(stats[1].n, 2);
        assert_eq!(stats[1].median, 225.0);
    }

    #[test]
    fn all_missing_group_is_omitted() {
        let pairs = vec![
            (Some("BEV".to_string()), Some(250.0)),
            (Some("PHEV".to_string()), None),
        ];
        let stats = grouped_box_stats(pairs.into_iter());
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].label, "BEV");
    }
}
