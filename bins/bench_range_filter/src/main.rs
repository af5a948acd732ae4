//! Range-filtered ANN benchmark CLI.
//!
//! Loads a vector database with per-item attributes, sorts it by
//! attribute (remapping ground truth), builds the index once, then
//! sweeps the search-effort values and reports QPS + pooled recall per
//! sweep point, plus peak memory and thread figures.
//!
//! ```bash
//! bench_range_filter db.fvecs db_attrs.txt queries.fvecs query_ranges.txt \
//!     groundtruth.ivecs 16 200 500 "[50,100,200]" 10
//! ```
//!
//! Any argument count other than ten prints usage to stderr and exits
//! non-zero.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use rfann_bench::{
    parse_effort_list, print_peak_memory, reindex_by_attribute, run_benchmark,
    truncate_ground_truth, BenchmarkData, BruteForceIndex, IndexParams, ThreadCountMonitor,
};
use rfann_bench::index::RecursionStrategy;

#[derive(Parser)]
#[command(name = "bench_range_filter")]
#[command(version, about = "Benchmark a range-filtered ANN index across a search-effort sweep")]
struct Cli {
    /// Database vectors (fvecs)
    database_vectors: PathBuf,

    /// Database attributes (one integer per line)
    database_attributes: PathBuf,

    /// Query vectors (fvecs)
    query_vectors: PathBuf,

    /// Query attribute ranges (one inclusive `A-B` per line)
    query_ranges: PathBuf,

    /// Ground truth (ivecs, ids into the unsorted database)
    groundtruth: PathBuf,

    /// Graph out-degree bound
    degree: usize,

    /// Construction-time search effort
    construction_effort: usize,

    /// Upper bound on per-query search effort
    max_effort_cap: usize,

    /// Search-effort sweep, encoded as "[v1,v2,...]"
    search_effort_list: String,

    /// Result count per query
    k: usize,
}

fn main() -> Result<()> {
    // Initialize logging
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let search_efforts = parse_effort_list(&cli.search_effort_list)?;

    // Best-effort sampler for the peak thread count; runs for the whole
    // pipeline and is joined before its value is used.
    let monitor = ThreadCountMonitor::spawn();

    let mut data = BenchmarkData::load(
        &cli.database_vectors,
        &cli.database_attributes,
        &cli.query_vectors,
        &cli.query_ranges,
        &cli.groundtruth,
    )?;

    // Truncate before the remap; the remap rewrites ids and does not
    // depend on list length.
    truncate_ground_truth(&mut data.groundtruth, cli.k);
    reindex_by_attribute(&mut data.vectors, &mut data.attributes, &mut data.groundtruth);

    let params = IndexParams {
        degree: cli.degree,
        construction_effort: cli.construction_effort,
        secondary_effort: cli.construction_effort,
        max_effort_cap: cli.max_effort_cap,
        recursion: RecursionStrategy::MaxPosition,
    };

    let report = run_benchmark(&BruteForceIndex, &data, &params, &search_efforts, cli.k)?;

    let peak_threads = monitor.stop();
    print_peak_memory();
    println!("Peak threads: {}", peak_threads);
    println!("Index construction time: {:.3} s", report.build_time_s);
    for point in &report.points {
        println!(
            "ef_search: {} QPS: {:.3} Recall: {:.3}",
            point.search_effort, point.qps, point.recall
        );
    }

    Ok(())
}
