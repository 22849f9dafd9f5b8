use statrs::distribution::{ContinuousCDF, Normal};

use super::AnalysisError;

/// Two-sided significance threshold for the verdict.
pub const SIGNIFICANCE_LEVEL: f64 = 0.05;

// ---------------------------------------------------------------------------
// Sample summaries
// ---------------------------------------------------------------------------

/// Count, mean, and sample standard deviation of one group.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleSummary {
    pub n: usize,
    pub mean: f64,
    /// n−1 denominator; NaN for a single observation, where the sample
    /// standard deviation is undefined.
    pub std_dev: f64,
}

impl SampleSummary {
    /// `None` for an empty sample.
    pub fn from_values(values: &[f64]) -> Option<SampleSummary> {
        if values.is_empty() {
            return None;
        }
        let n = values.len();
        let mean = values.iter().sum::<f64>() / n as f64;
        let std_dev = if n < 2 {
            f64::NAN
        } else {
            let ss: f64 = values.iter().map(|v| (v - mean) * (v - mean)).sum();
            (ss / (n - 1) as f64).sqrt()
        };
        Some(SampleSummary { n, mean, std_dev })
    }
}

// ---------------------------------------------------------------------------
// Two-sample Z-test
// ---------------------------------------------------------------------------

/// Result of comparing two group means with a Z-test.
#[derive(Debug, Clone, PartialEq)]
pub struct ZTestReport {
    pub first_label: String,
    pub second_label: String,
    pub first: SampleSummary,
    pub second: SampleSummary,
    pub z: f64,
    /// Two-sided p-value from the standard normal survival function.
    pub p: f64,
}

impl ZTestReport {
    pub fn significant(&self) -> bool {
        self.p < SIGNIFICANCE_LEVEL
    }
}

/// Test whether the means of two groups differ.
///
/// `z = (m₁ − m₂) / √(s₁²/n₁ + s₂²/n₂)`, `p = 2 · sf(|z|)`. An empty
/// group makes the statistic undefined and is surfaced as
/// [`AnalysisError::EmptySubgroup`] instead of a NaN result.
pub fn two_sample_z_test(
    first_label: &str,
    first: &[f64],
    second_label: &str,
    second: &[f64],
) -> Result<ZTestReport, AnalysisError> {
    let empty = |label: &str| AnalysisError::EmptySubgroup {
        group: label.to_string(),
    };
    let a = SampleSummary::from_values(first).ok_or_else(|| empty(first_label))?;
    let b = SampleSummary::from_values(second).ok_or_else(|| empty(second_label))?;

    let standard_error =
        (a.std_dev * a.std_dev / a.n as f64 + b.std_dev * b.std_dev / b.n as f64).sqrt();
    let z = (a.mean - b.mean) / standard_error;
    let p = 2.0 * standard_normal().sf(z.abs());

    Ok(ZTestReport {
        first_label: first_label.to_string(),
        second_label: second_label.to_string(),
        first: a,
        second: b,
        z,
        p,
    })
}

fn standard_normal() -> Normal {
    // (0, 1) is always a valid parameterization.
    Normal::new(0.0, 1.0).unwrap()
}
