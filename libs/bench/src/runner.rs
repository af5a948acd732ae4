//! Build-once / sweep-many benchmark execution.
//!
//! The driver builds the collaborator index exactly once over the
//! reindexed database, then walks the configured search-effort values
//! in input order (duplicates preserved). Each sweep point runs every
//! query sequentially and times the whole batch; throughput is batch
//! queries-per-second, not per-query latency. The index is never
//! mutated between sweep points, and no timeout or watchdog exists: a
//! stalled collaborator stalls the run.

use anyhow::Result;
use std::time::Instant;
use tracing::info;

use crate::dataset::BenchmarkData;
use crate::index::{IndexParams, RangeIndexBuilder};
use crate::metrics::{compute_qps, pooled_recall};

/// One `(search_effort, throughput, pooled recall)` measurement.
#[derive(Debug, Clone, Copy)]
pub struct SweepPoint {
    /// Search-effort setting used for this batch.
    pub search_effort: usize,
    /// Batch throughput in queries per second.
    pub qps: f64,
    /// Pooled recall across all queries in the batch.
    pub recall: f64,
}

/// Results of a full benchmark run.
#[derive(Debug, Clone)]
pub struct BenchmarkReport {
    /// Wall-clock index construction time in seconds.
    pub build_time_s: f64,
    /// One point per configured search-effort value, input order.
    pub points: Vec<SweepPoint>,
}

/// Truncate each ground-truth list to at most `k` ids, keeping the
/// first `k` in order.
///
/// Applied before the reindex remap; remap rewrites ids and is
/// independent of list length.
pub fn truncate_ground_truth(groundtruth: &mut [Vec<usize>], k: usize) {
    for ids in groundtruth.iter_mut() {
        ids.truncate(k);
    }
}

/// Build the index once, then sweep the search-effort values.
///
/// `data` must already be reindexed (attributes non-decreasing) with
/// its ground truth truncated and remapped.
pub fn run_benchmark(
    builder: &dyn RangeIndexBuilder,
    data: &BenchmarkData,
    params: &IndexParams,
    search_efforts: &[usize],
    k: usize,
) -> Result<BenchmarkReport> {
    let num_queries = data.num_queries();

    info!(
        "Building index over {} vectors ({}D, degree={}, construction_effort={})",
        data.num_vectors(),
        data.dim,
        params.degree,
        params.construction_effort
    );
    let build_start = Instant::now();
    let index = builder.build(&data.vectors, &data.attributes, params)?;
    let build_time_s = build_start.elapsed().as_secs_f64();

    let mut points = Vec::with_capacity(search_efforts.len());
    for &search_effort in search_efforts {
        let mut results = Vec::with_capacity(num_queries);

        let batch_start = Instant::now();
        for (query, range) in data.query_vectors.iter().zip(&data.query_ranges) {
            results.push(index.query(query, *range, range.width(), search_effort, k));
        }
        let elapsed = batch_start.elapsed().as_secs_f64();

        let qps = compute_qps(num_queries, elapsed);
        let recall = pooled_recall(&results, &data.groundtruth, k);
        info!(
            "search_effort={}: {} queries in {:.3}s ({:.1} QPS, recall {:.3})",
            search_effort, num_queries, elapsed, qps, recall
        );

        points.push(SweepPoint {
            search_effort,
            qps,
            recall,
        });
    }

    Ok(BenchmarkReport {
        build_time_s,
        points,
    })
}
