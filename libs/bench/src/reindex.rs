//! Attribute-sort preprocessing for range-filtered indexes.
//!
//! The collaborator index requires the database sorted by attribute
//! value before build; its range pruning assumes attribute order. This
//! module sorts the parallel `vectors`/`attributes` arrays and rewrites
//! every ground-truth id through the resulting old-to-new mapping so
//! recall evaluation stays aligned with the reordered database.

/// Sort the database by attribute (ascending, stable) and remap
/// ground-truth ids in place.
///
/// Equal attribute values keep their original relative order. Returns
/// the old-to-new id mapping, a bijection over `[0, n)`.
///
/// Ground-truth ids must reference positions in `[0, n)`.
pub fn reindex_by_attribute(
    vectors: &mut Vec<Vec<f32>>,
    attributes: &mut Vec<i32>,
    groundtruth: &mut [Vec<usize>],
) -> Vec<usize> {
    let n = attributes.len();
    debug_assert_eq!(vectors.len(), n);

    // order[new] = old; sort_by_key is stable, so ties keep input order.
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by_key(|&i| attributes[i]);

    let mut new_of_old = vec![0usize; n];
    for (new_idx, &old_idx) in order.iter().enumerate() {
        new_of_old[old_idx] = new_idx;
    }

    // Apply the permutation, moving vectors rather than cloning them.
    let mut old_vectors = std::mem::take(vectors);
    *vectors = order
        .iter()
        .map(|&old| std::mem::take(&mut old_vectors[old]))
        .collect();
    let old_attributes = std::mem::take(attributes);
    *attributes = order.iter().map(|&old| old_attributes[old]).collect();

    for ids in groundtruth.iter_mut() {
        for id in ids.iter_mut() {
            *id = new_of_old[*id];
        }
    }

    new_of_old
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::prelude::*;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_reindex_worked_example() {
        // Attributes [30, 10, 20, 10] sort to [10, 10, 20, 30]; original
        // indices 1, 3, 2, 0 land at new positions 0, 1, 2, 3 (the two
        // 10s keep their original relative order).
        let mut vectors = vec![
            vec![0.0, 0.0],
            vec![1.0, 1.0],
            vec![2.0, 2.0],
            vec![3.0, 3.0],
        ];
        let mut attributes = vec![30, 10, 20, 10];
        let mut groundtruth = vec![vec![0, 2]];

        let mapping = reindex_by_attribute(&mut vectors, &mut attributes, &mut groundtruth);

        assert_eq!(attributes, vec![10, 10, 20, 30]);
        assert_eq!(mapping, vec![3, 0, 2, 1]);
        assert_eq!(
            vectors,
            vec![
                vec![1.0, 1.0],
                vec![3.0, 3.0],
                vec![2.0, 2.0],
                vec![0.0, 0.0],
            ]
        );
        assert_eq!(groundtruth, vec![vec![3, 2]]);
    }

    #[test]
    fn test_reindex_is_a_bijection() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let n = 200;

        let mut vectors: Vec<Vec<f32>> = (0..n).map(|i| vec![i as f32]).collect();
        let mut attributes: Vec<i32> = (0..n).map(|_| rng.gen_range(0..50)).collect();
        let mut groundtruth: Vec<Vec<usize>> = vec![(0..n).collect()];

        let mapping =
            reindex_by_attribute(&mut vectors, &mut attributes, &mut groundtruth);

        // Non-decreasing attributes.
        assert!(attributes.windows(2).all(|w| w[0] <= w[1]));

        // Every new position is hit exactly once.
        let mut seen = vec![false; n];
        for &new_idx in &mapping {
            assert!(!seen[new_idx]);
            seen[new_idx] = true;
        }

        // Remapped ids still address the same vector content.
        for old_id in 0..n {
            assert_eq!(vectors[mapping[old_id]], vec![old_id as f32]);
        }
    }

    #[test]
    fn test_reindex_ties_keep_original_order() {
        let mut vectors: Vec<Vec<f32>> = (0..6).map(|i| vec![i as f32]).collect();
        let mut attributes = vec![5, 5, 5, 5, 5, 5];
        let mut groundtruth: Vec<Vec<usize>> = Vec::new();

        let mapping = reindex_by_attribute(&mut vectors, &mut attributes, &mut groundtruth);

        // All-equal attributes: the permutation must be the identity.
        assert_eq!(mapping, vec![0, 1, 2, 3, 4, 5]);
        for (i, v) in vectors.iter().enumerate() {
            assert_eq!(v[0], i as f32);
        }
    }

    #[test]
    fn test_reindex_roundtrip_through_inverse() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let n = 64;

        let mut vectors: Vec<Vec<f32>> = (0..n).map(|i| vec![i as f32]).collect();
        let mut attributes: Vec<i32> = (0..n).map(|_| rng.gen_range(-10..10)).collect();
        let mut groundtruth: Vec<Vec<usize>> = Vec::new();

        let mapping =
            reindex_by_attribute(&mut vectors, &mut attributes, &mut groundtruth);

        // Inverse of the mapping sends each new position back to its old id.
        let mut inverse = vec![0usize; n];
        for (old_id, &new_id) in mapping.iter().enumerate() {
            inverse[new_id] = old_id;
        }
        for old_id in 0..n {
            assert_eq!(inverse[mapping[old_id]], old_id);
        }
    }
}
