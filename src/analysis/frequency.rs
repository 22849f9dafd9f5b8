// ---------------------------------------------------------------------------
// Categorical frequency counts
// ---------------------------------------------------------------------------

/// Category frequencies, sorted by descending count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueCounts {
    /// `(label, count)` pairs, most frequent first.
    pub entries: Vec<(String, usize)>,
}

impl ValueCounts {
    /// Keep only the `k` most frequent categories.
    pub fn top(mut self, k: usize) -> ValueCounts {
        self.entries.truncate(k);
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Count occurrences of each label, skipping missing cells.
///
/// Sorted by descending count; the sort is stable over first-seen
/// accumulation order, so equal counts keep the order in which the
/// labels first appear in the data. That first-seen order is the
/// documented tie-break.
pub fn value_counts(labels: impl Iterator<Item = Option<String>>) -> ValueCounts {
    let mut entries: Vec<(String, usize)> = Vec::new();
    for label in labels.flatten() {
        match entries.iter_mut().find(|(l, _)| *l == label) {
            Some((_, n)) => *n += 1,
            None => entries.push((label, 1)),
        }
    }
    entries.sort_by(|a, b| b.1.cmp(&a.1));
    ValueCounts { entries }
}

/// Count occurrences of each distinct numeric value, skipping missing
/// cells, sorted ascending by value. Used for the count-by-model-year
/// view.
pub fn year_counts(values: impl Iterator<Item = Option<f64>>) -> Vec<(f64, usize)> {
    let mut entries: Vec<(f64, usize)> = Vec::new();
    for value in values.flatten() {
        match entries.iter_mut().find(|(v, _)| *v == value) {
            Some((_, n)) => *n += 1,
            None => entries.push((value, 1)),
        }
    }
    entries.sort_by(|a, b| a.0.total_cmp(&b.0));
    entries
}
