//! 1D merge of repeated detections of the same physical line.
//!
//! A thick printed stroke or a slightly blurred edge typically yields several
//! Hough peaks a few pixels apart. Consecutive lines (in rho order) whose gap
//! stays below the merge tolerance are replaced by their mean.
use crate::types::Line;
use std::ops::Range;

/// Partitions `items` into maximal runs of consecutive elements where every
/// adjacent pair satisfies `joins(prev, next)`.
///
/// The returned ranges are non-empty, disjoint and cover `0..items.len()`.
pub fn group_runs<T>(items: &[T], mut joins: impl FnMut(&T, &T) -> bool) -> Vec<Range<usize>> {
    let mut runs = Vec::new();
    if items.is_empty() {
        return runs;
    }
    let mut begin = 0;
    for (end, pair) in items.windows(2).enumerate().map(|(i, w)| (i + 1, w)) {
        if !joins(&pair[0], &pair[1]) {
            runs.push(begin..end);
            begin = end;
        }
    }
    runs.push(begin..items.len());
    runs
}

/// Merges near-duplicate lines of a rho-sorted list.
///
/// Groups consecutive lines whose rho gap to the previous member is strictly
/// below `merge_tolerance` and represents each group by its mean rho and mean
/// theta. Singletons pass through unchanged.
pub fn cluster_lines(sorted: &[Line], merge_tolerance: f64) -> Vec<Line> {
    group_runs(sorted, |prev, next| next.rho - prev.rho < merge_tolerance)
        .into_iter()
        .map(|run| mean_line(&sorted[run]))
        .collect()
}

fn mean_line(group: &[Line]) -> Line {
    if let [single] = group {
        return *single;
    }
    let n = group.len() as f64;
    let (rho, theta) = group
        .iter()
        .fold((0.0, 0.0), |(r, t), l| (r + l.rho, t + l.theta));
    Line::new(rho / n, theta / n)
}
