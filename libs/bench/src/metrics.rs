//! Recall and throughput metrics for sweep evaluation.
//!
//! Recall is *pooled*: total matched neighbors divided by total valid
//! neighbors across all queries in a sweep point, not an average of
//! per-query ratios. The intersection is a sorted-merge multiset
//! intersection, so an id duplicated in both lists can count more than
//! once.

/// Count the multiset intersection of two id lists via a sorted merge.
///
/// Both inputs are sorted internally; callers pass them as returned by
/// the index / ground-truth loader.
pub fn sorted_intersection_count(a: &[usize], b: &[usize]) -> usize {
    let mut a = a.to_vec();
    let mut b = b.to_vec();
    a.sort_unstable();
    b.sort_unstable();

    let mut count = 0;
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                count += 1;
                i += 1;
                j += 1;
            }
        }
    }
    count
}

/// Pooled recall for one sweep point.
///
/// Per query `i`, `n_valid = min(k, |groundtruth[i]|)`; the result is
/// `sum(intersection_i) / sum(n_valid_i)` over all queries.
pub fn pooled_recall(results: &[Vec<usize>], groundtruth: &[Vec<usize>], k: usize) -> f64 {
    debug_assert_eq!(results.len(), groundtruth.len());

    let mut match_count = 0usize;
    let mut total_count = 0usize;
    for (result, truth) in results.iter().zip(groundtruth.iter()) {
        match_count += sorted_intersection_count(truth, result);
        total_count += k.min(truth.len());
    }

    if total_count == 0 {
        return 0.0;
    }
    match_count as f64 / total_count as f64
}

/// Throughput in queries per second for a batch.
pub fn compute_qps(num_queries: usize, elapsed_seconds: f64) -> f64 {
    if elapsed_seconds <= 0.0 {
        return 0.0;
    }
    num_queries as f64 / elapsed_seconds
}
