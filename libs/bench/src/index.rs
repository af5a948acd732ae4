//! Collaborator interface for the external range-filtered ANN index.
//!
//! The harness never implements the graph algorithm itself; it drives
//! any index satisfying [`RangeIndexBuilder`] / [`RangeFilteredIndex`].
//! A single non-incremental `build` produces an immutable queryable
//! handle; `query` returns ids referencing positions in the
//! attribute-sorted (reindexed) database. The index may parallelize
//! internally; the harness neither bounds nor observes that beyond
//! wall-clock time.
//!
//! [`BruteForceIndex`] is the in-tree reference implementation: an
//! exact, effort-independent range-filtered scan used to exercise the
//! harness and validate recall plumbing.

use anyhow::Result;

use crate::dataset::AttributeRange;

/// Construction-time parameters passed to [`RangeIndexBuilder::build`].
#[derive(Debug, Clone)]
pub struct IndexParams {
    /// Graph out-degree bound.
    pub degree: usize,
    /// Construction-time search effort (ef_construction).
    pub construction_effort: usize,
    /// Secondary construction effort; conventionally equal to
    /// `construction_effort`.
    pub secondary_effort: usize,
    /// Upper bound on per-query search effort.
    pub max_effort_cap: usize,
    /// Recursion strategy used while segmenting the attribute axis.
    pub recursion: RecursionStrategy,
}

/// How the index recurses over attribute segments during construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecursionStrategy {
    /// Split at the maximum position.
    #[default]
    MaxPosition,
    /// Split at the minimum position.
    MinPosition,
}

/// An immutable, queryable range-filtered index handle.
pub trait RangeFilteredIndex {
    /// Search for the `k` nearest neighbors of `vector` whose attribute
    /// lies in `range`, exploring the structure with `search_effort`.
    ///
    /// `range_width` is the derived `high - low + 1`. Returned ids
    /// reference positions in the reindexed database.
    fn query(
        &self,
        vector: &[f32],
        range: AttributeRange,
        range_width: usize,
        search_effort: usize,
        k: usize,
    ) -> Vec<usize>;
}

/// Builds a [`RangeFilteredIndex`] from an attribute-sorted database.
pub trait RangeIndexBuilder {
    /// Build the index once over the full (reindexed) database.
    fn build(
        &self,
        vectors: &[Vec<f32>],
        attributes: &[i32],
        params: &IndexParams,
    ) -> Result<Box<dyn RangeFilteredIndex>>;
}

/// Squared L2 distance between two vectors.
#[inline]
pub fn l2_distance_squared(a: &[f32], b: &[f32]) -> f32 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum()
}

/// Exact range-filtered scan; the substitutable reference index.
///
/// Ignores construction parameters and search effort, so its results
/// are identical at every sweep point (recall 1.0 against exact ground
/// truth computed over the same database).
#[derive(Debug, Clone, Copy, Default)]
pub struct BruteForceIndex;

struct BruteForceHandle {
    vectors: Vec<Vec<f32>>,
    attributes: Vec<i32>,
}

impl RangeIndexBuilder for BruteForceIndex {
    fn build(
        &self,
        vectors: &[Vec<f32>],
        attributes: &[i32],
        _params: &IndexParams,
    ) -> Result<Box<dyn RangeFilteredIndex>> {
        Ok(Box::new(BruteForceHandle {
            vectors: vectors.to_vec(),
            attributes: attributes.to_vec(),
        }))
    }
}

impl RangeFilteredIndex for BruteForceHandle {
    fn query(
        &self,
        vector: &[f32],
        range: AttributeRange,
        _range_width: usize,
        _search_effort: usize,
        k: usize,
    ) -> Vec<usize> {
        let mut candidates: Vec<(usize, f32)> = self
            .vectors
            .iter()
            .enumerate()
            .filter(|(i, _)| range.contains(self.attributes[*i]))
            .map(|(i, v)| (i, l2_distance_squared(vector, v)))
            .collect();

        candidates.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap());
        candidates.into_iter().take(k).map(|(i, _)| i).collect()
    }
}
