//! Benchmark harness for range-filtered approximate nearest-neighbor search.
//!
//! Measures the accuracy/throughput tradeoff of a range-filtered ANN index
//! across a sweep of search-effort (`ef_search`) settings. The index itself
//! is an external collaborator behind the [`RangeIndexBuilder`] /
//! [`RangeFilteredIndex`] traits; this crate owns everything around it:
//!
//! - [`formats`] - fvecs/ivecs binary readers plus line-oriented text formats
//! - [`dataset`] - parallel-array dataset/query types with validated loading
//! - [`reindex`] - attribute-sort preprocessing with ground-truth remapping
//! - [`runner`] - build-once / query-many-per-effort execution protocol
//! - [`metrics`] - pooled recall and throughput computation
//! - [`resource`] - peak memory and peak thread-count reporting
//!
//! ## Execution model
//!
//! The whole load -> reindex -> build -> sweep -> evaluate pipeline is
//! single-threaded and sequential. The index may parallelize internally;
//! the harness only measures wall-clock time across the call boundary.
//! The sole background task is a best-effort thread-count sampler.
//!
//! ## Example
//!
//! ```ignore
//! use rfann_bench::{BenchmarkData, BruteForceIndex, IndexParams};
//! use rfann_bench::{reindex_by_attribute, run_benchmark, truncate_ground_truth};
//!
//! let mut data = BenchmarkData::load(&db_vec, &db_attr, &q_vec, &q_range, &gt)?;
//! truncate_ground_truth(&mut data.groundtruth, k);
//! reindex_by_attribute(
//!     &mut data.vectors,
//!     &mut data.attributes,
//!     &mut data.groundtruth,
//! );
//! let report = run_benchmark(&BruteForceIndex, &data, &params, &[50, 100, 200], k)?;
//! for p in &report.points {
//!     println!("ef_search: {} QPS: {:.3} Recall: {:.3}", p.search_effort, p.qps, p.recall);
//! }
//! ```

pub mod dataset;
pub mod formats;
pub mod index;
pub mod metrics;
pub mod reindex;
pub mod resource;
pub mod runner;

// Re-exports for public API - loading
pub use dataset::{AttributeRange, BenchmarkData};
pub use formats::{
    parse_effort_list, read_csv_int_rows, read_fvecs, read_ints_one_per_line, read_ivecs,
    read_range_pairs, write_fvecs, write_ivecs,
};

// Re-exports for public API - preprocessing and execution
pub use index::{BruteForceIndex, IndexParams, RangeFilteredIndex, RangeIndexBuilder};
pub use reindex::reindex_by_attribute;
pub use runner::{run_benchmark, truncate_ground_truth, BenchmarkReport, SweepPoint};

// Re-exports for public API - measurement
pub use metrics::{compute_qps, pooled_recall, sorted_intersection_count};
pub use resource::{print_peak_memory, ThreadCountMonitor};
