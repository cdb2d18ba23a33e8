//! Per-group binning of observations over normalized surgery progress.
//!
//! Rows matching the selected signal are partitioned by the chosen grouping
//! column, then each partition is binned into fixed-width progress buckets
//! and summarized as mean and sample standard deviation.

use std::collections::HashMap;

use crate::controls::GroupField;
use crate::dataset::VitalRow;

/// Width of one progress bucket
pub const BIN_SIZE: f64 = 0.01;

/// Summary of all observations that fell into one progress bucket
#[derive(Clone, Debug, PartialEq)]
pub struct Bucket {
    /// Bucket key: progress rounded to the nearest multiple of [`BIN_SIZE`]
    pub norm_time: f64,
    pub mean: f64,
    /// Sample standard deviation; absent when the bucket holds one sample
    pub sd: Option<f64>,
    pub count: usize,
}

impl Bucket {
    /// Lower edge of the spread band (absent sd counts as zero)
    pub fn lower(&self) -> f64 {
        self.mean - self.sd.unwrap_or(0.0)
    }

    /// Upper edge of the spread band (absent sd counts as zero)
    pub fn upper(&self) -> f64 {
        self.mean + self.sd.unwrap_or(0.0)
    }
}

/// One curve: the buckets of a single group, ordered by progress
#[derive(Clone, Debug, PartialEq)]
pub struct Series {
    pub key: String,
    pub values: Vec<Bucket>,
}

/// Bucket index for a progress value
#[inline]
pub fn bin_index(norm_time: f64) -> i64 {
    (norm_time / BIN_SIZE).round() as i64
}

/// Aggregate the rows of one signal into one series per group key.
///
/// Groups appear in the order their key is first seen. Rows without a
/// progress value or with a missing/non-finite measurement are skipped, so a
/// group made only of such rows yields a series with no buckets.
pub fn aggregate(rows: &[VitalRow], signal: &str, group: GroupField) -> Vec<Series> {
    let mut order: Vec<String> = Vec::new();
    let mut partitions: HashMap<String, Vec<&VitalRow>> = HashMap::new();

    for row in rows.iter().filter(|r| r.signal == signal) {
        let key = group.key_of(row);
        partitions
            .entry(key.to_string())
            .or_insert_with(|| {
                order.push(key.to_string());
                Vec::new()
            })
            .push(row);
    }

    order
        .into_iter()
        .map(|key| {
            let rows = partitions.remove(&key).unwrap_or_default();
            Series {
                values: bin_rows(&rows),
                key,
            }
        })
        .collect()
}

fn bin_rows(rows: &[&VitalRow]) -> Vec<Bucket> {
    let mut bins: HashMap<i64, Vec<f64>> = HashMap::new();

    for row in rows {
        let (Some(t), Some(v)) = (row.norm_time, row.value) else {
            continue;
        };
        if !t.is_finite() || !v.is_finite() {
            continue;
        }
        bins.entry(bin_index(t)).or_default().push(v);
    }

    let mut indexed: Vec<(i64, Vec<f64>)> = bins.into_iter().collect();
    indexed.sort_unstable_by_key(|(idx, _)| *idx);

    indexed
        .into_iter()
        .map(|(idx, values)| {
            let mean = mean(&values);
            Bucket {
                norm_time: idx as f64 * BIN_SIZE,
                mean,
                sd: sample_deviation(&values, mean),
                count: values.len(),
            }
        })
        .collect()
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (n - 1 denominator); `None` below two samples
pub fn sample_deviation(values: &[f64], mean: f64) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let sum_sq: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
    Some((sum_sq / (values.len() - 1) as f64).sqrt())
}
