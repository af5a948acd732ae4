//! Dataset assembly for range-filtered benchmark runs.
//!
//! A benchmark run consumes five files:
//!
//! | File | Format | Contents |
//! |------|--------|----------|
//! | database vectors | fvecs | one vector per database item |
//! | database attributes | one int per line | one attribute per item |
//! | query vectors | fvecs | one vector per query |
//! | query ranges | `A-B` per line | inclusive attribute range per query |
//! | ground truth | ivecs | true neighbor ids per query |
//!
//! [`BenchmarkData::load`] reads all five and validates the parallel
//! arrays against each other. Because the binary readers silently stop
//! at truncated input, these size checks are what surfaces corrupt
//! binary files.

use anyhow::{ensure, Result};
use std::path::Path;

use crate::formats::{read_fvecs, read_ints_one_per_line, read_ivecs, read_range_pairs};

/// An inclusive attribute range attached to a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeRange {
    /// Inclusive lower bound.
    pub low: i32,
    /// Inclusive upper bound.
    pub high: i32,
}

impl AttributeRange {
    /// Number of attribute values the range covers (`high - low + 1`).
    pub fn width(&self) -> usize {
        (self.high as i64 - self.low as i64 + 1).max(0) as usize
    }

    /// Whether the range contains the given attribute value.
    pub fn contains(&self, attribute: i32) -> bool {
        self.low <= attribute && attribute <= self.high
    }
}

/// Fully loaded benchmark input: database, queries, and ground truth.
///
/// `vectors`/`attributes` are index-aligned, as are the three
/// query-side arrays. Ground-truth ids reference database positions;
/// they point into the *original* ordering until
/// [`crate::reindex::reindex_by_attribute`] rewrites them.
#[derive(Debug, Clone)]
pub struct BenchmarkData {
    /// Database vectors.
    pub vectors: Vec<Vec<f32>>,
    /// One integer attribute per database vector.
    pub attributes: Vec<i32>,
    /// Query vectors.
    pub query_vectors: Vec<Vec<f32>>,
    /// Inclusive attribute range per query.
    pub query_ranges: Vec<AttributeRange>,
    /// True neighbor ids per query, ordered by distance.
    pub groundtruth: Vec<Vec<usize>>,
    /// Vector dimension shared by database and queries.
    pub dim: usize,
}

impl BenchmarkData {
    /// Load and cross-validate all five input files.
    pub fn load(
        database_vectors: &Path,
        database_attributes: &Path,
        query_vectors: &Path,
        query_ranges: &Path,
        groundtruth: &Path,
    ) -> Result<Self> {
        let vectors = read_fvecs(database_vectors);
        ensure!(
            !vectors.is_empty(),
            "No database vectors loaded from {}",
            database_vectors.display()
        );
        let dim = vectors[0].len();

        let attributes = read_ints_one_per_line(database_attributes)?;
        ensure!(
            attributes.len() == vectors.len(),
            "Attribute count {} does not match database size {}",
            attributes.len(),
            vectors.len()
        );

        let query_vectors = read_fvecs(query_vectors);
        ensure!(!query_vectors.is_empty(), "No query vectors loaded");
        for (i, q) in query_vectors.iter().enumerate() {
            ensure!(
                q.len() == dim,
                "Query {} has dimension {} but database dimension is {}",
                i,
                q.len(),
                dim
            );
        }

        let query_ranges = read_range_pairs(query_ranges)?;
        ensure!(
            query_ranges.len() == query_vectors.len(),
            "Range count {} does not match query count {}",
            query_ranges.len(),
            query_vectors.len()
        );

        let raw_groundtruth = read_ivecs(groundtruth);
        ensure!(
            raw_groundtruth.len() == query_vectors.len(),
            "Ground-truth count {} does not match query count {}",
            raw_groundtruth.len(),
            query_vectors.len()
        );
        let mut groundtruth: Vec<Vec<usize>> = Vec::with_capacity(raw_groundtruth.len());
        for (query_idx, row) in raw_groundtruth.into_iter().enumerate() {
            let mut ids = Vec::with_capacity(row.len());
            for id in row {
                ensure!(
                    id >= 0 && (id as usize) < vectors.len(),
                    "Ground-truth id {} for query {} is outside the database (size {})",
                    id,
                    query_idx,
                    vectors.len()
                );
                ids.push(id as usize);
            }
            groundtruth.push(ids);
        }

        Ok(Self {
            vectors,
            attributes,
            query_vectors,
            query_ranges,
            groundtruth,
            dim,
        })
    }

    /// Number of database vectors.
    pub fn num_vectors(&self) -> usize {
        self.vectors.len()
    }

    /// Number of queries.
    pub fn num_queries(&self) -> usize {
        self.query_vectors.len()
    }
}
