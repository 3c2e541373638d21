//! Aggregation shared by every chart derivation: category counts, localized
//! numeric coercion, and the summary statistics quoted next to each chart.

use std::collections::HashMap;

/// Counts of distinct non-missing responses, ordered by descending frequency.
///
/// Ties keep first-appearance order, so the ordering is deterministic for a
/// given input file.
#[derive(Debug, Clone)]
pub struct ValueCounts {
    entries: Vec<(String, u64)>,
}

impl ValueCounts {
    pub fn from_values<'a, I>(values: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut entries: Vec<(String, u64)> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        for v in values {
            if v.is_empty() {
                continue; // missing response
            }
            match index.get(v) {
                Some(&i) => entries[i].1 += 1,
                None => {
                    index.insert(v.to_string(), entries.len());
                    entries.push((v.to_string(), 1));
                }
            }
        }

        // Stable sort: equal counts stay in first-seen order.
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        ValueCounts { entries }
    }

    /// Drop categories rejected by the filter (used for "not applicable"
    /// placeholder answers).
    pub fn retain(&mut self, mut keep: impl FnMut(&str) -> bool) {
        self.entries.retain(|(label, _)| keep(label));
    }

    pub fn entries(&self) -> &[(String, u64)] {
        &self.entries
    }

    pub fn labels(&self) -> Vec<String> {
        self.entries.iter().map(|(l, _)| l.clone()).collect()
    }

    pub fn values(&self) -> Vec<u64> {
        self.entries.iter().map(|(_, c)| *c).collect()
    }

    pub fn total(&self) -> u64 {
        self.entries.iter().map(|(_, c)| *c).sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Most frequent category, if any.
    pub fn top(&self) -> Option<(&str, u64)> {
        self.entries.first().map(|(l, c)| (l.as_str(), *c))
    }

    /// Count for a specific label; absent labels count as zero.
    pub fn get(&self, label: &str) -> u64 {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, c)| *c)
            .unwrap_or(0)
    }

    /// `"label: count"` pairs joined with commas, in stored (descending) order.
    pub fn join_counts(&self) -> String {
        self.entries
            .iter()
            .map(|(l, c)| format!("{}: {}", l, c))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Best-effort numeric coercion of a localized text column.
///
/// Every comma in the cell is replaced with a dot before parsing, matching the
/// source data's decimal convention; as a consequence a multi-comma cell like
/// `"1,234,5"` becomes `"1.234.5"` and is dropped as unparseable rather than
/// read as a grouped number. Missing and unparseable cells are dropped.
pub fn numeric_series<'a, I>(values: I) -> Vec<f64>
where
    I: IntoIterator<Item = &'a str>,
{
    values
        .into_iter()
        .filter_map(|v| {
            let v = v.trim();
            if v.is_empty() {
                return None;
            }
            v.replace(',', ".").parse::<f64>().ok()
        })
        .collect()
}

pub fn min(values: &[f64]) -> Option<f64> {
    values.iter().copied().reduce(f64::min)
}

pub fn max(values: &[f64]) -> Option<f64> {
    values.iter().copied().reduce(f64::max)
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Median; the average of the two middle elements for even lengths.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        Some(sorted[mid])
    } else {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    }
}

/// Counts of distinct numeric values, sorted ascending by value.
pub fn numeric_value_counts(values: &[f64]) -> (Vec<f64>, Vec<u64>) {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let mut xs: Vec<f64> = Vec::new();
    let mut counts: Vec<u64> = Vec::new();
    for v in sorted {
        if let (Some(&last), Some(count)) = (xs.last(), counts.last_mut()) {
            if last == v {
                *count += 1;
                continue;
            }
        }
        xs.push(v);
        counts.push(1);
    }
    (xs, counts)
}

pub fn round_to(x: f64, digits: i32) -> f64 {
    let f = 10f64.powi(digits);
    (x * f).round() / f
}

/// `round(100 * count / total, 1)`, the share figure quoted in summaries.
pub fn share_pct(count: u64, total: u64) -> f64 {
    round_to(100.0 * count as f64 / total as f64, 1)
}

/// Display a float the way the summaries expect: integral values keep one
/// decimal place (`4` becomes `"4.0"`), everything else prints in shortest
/// form.
pub fn fmt_num(x: f64) -> String {
    if x.is_finite() && x == x.trunc() {
        format!("{:.1}", x)
    } else {
        format!("{}", x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_order_by_descending_frequency() {
        let vc = ValueCounts::from_values(["B", "A", "A", "C", "A", "B"]);
        assert_eq!(
            vc.entries(),
            &[
                ("A".to_string(), 3),
                ("B".to_string(), 2),
                ("C".to_string(), 1)
            ]
        );
        assert_eq!(vc.total(), 6);
        assert_eq!(vc.top(), Some(("A", 3)));
    }

    #[test]
    fn ties_keep_first_seen_order() {
        let vc = ValueCounts::from_values(["x", "y", "x", "y"]);
        assert_eq!(vc.labels(), vec!["x", "y"]);
    }

    #[test]
    fn missing_values_are_excluded() {
        let vc = ValueCounts::from_values(["Yes", "", "No", "", "Yes"]);
        assert_eq!(vc.total(), 3);
        assert_eq!(vc.get("Yes"), 2);
        assert_eq!(vc.get("Maybe"), 0);
    }

    #[test]
    fn numeric_series_replaces_decimal_commas() {
        let vals = numeric_series(["1,5", "2.25", " 3 ", "", "n/a"]);
        assert_eq!(vals, vec![1.5, 2.25, 3.0]);
    }

    #[test]
    fn numeric_series_replaces_every_comma() {
        // "1,234,5" -> "1.234.5": dropped, not parsed as a grouped number.
        let vals = numeric_series(["1,234,5", "0,5"]);
        assert_eq!(vals, vec![0.5]);
    }

    #[test]
    fn numeric_value_counts_sort_ascending() {
        let (xs, counts) = numeric_value_counts(&[2.0, 1.5, 2.0, 1.5, 1.5, 4.0]);
        assert_eq!(xs, vec![1.5, 2.0, 4.0]);
        assert_eq!(counts, vec![3, 2, 1]);
    }

    #[test]
    fn median_handles_even_and_odd_lengths() {
        assert_eq!(median(&[3.0, 1.0, 2.0]), Some(2.0));
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), Some(2.5));
        assert_eq!(median(&[]), None);
    }

    #[test]
    fn share_pct_rounds_to_one_decimal() {
        assert_eq!(share_pct(6, 10), 60.0);
        assert_eq!(share_pct(1, 3), 33.3);
        assert_eq!(share_pct(2, 3), 66.7);
    }

    #[test]
    fn fmt_num_keeps_trailing_zero_for_integral_floats() {
        assert_eq!(fmt_num(4.0), "4.0");
        assert_eq!(fmt_num(2.5), "2.5");
        assert_eq!(fmt_num(0.333), "0.333");
    }
}
