//! Rank transform with midranks for ties.
//!
//! Ranks are 0-based: the smallest value has rank 0. Every member of a run
//! of equal values receives the mean of the ranks the run occupies.
//!
//! # Examples
//!
//! ```
//! use u_statfit::rank::rank;
//!
//! let ranks = rank(&[5.0, 3.0, 3.0, 3.0, 1.0]);
//! assert_eq!(ranks, vec![4.0, 2.0, 2.0, 2.0, 0.0]);
//! ```

use std::cmp::Ordering;

/// A value paired with its original position and its rank.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedValue {
    /// The observed value.
    pub value: f64,
    /// Position of the value in the input slice.
    pub index: usize,
    /// 0-based rank; a midrank for tied values.
    pub rank: f64,
}

/// Total order used for ranking: numbers ascending, `NaN` after every
/// number, all `NaN`s equal, `-0.0 == 0.0`.
pub(crate) fn compare_values(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b)
        .unwrap_or_else(|| a.is_nan().cmp(&b.is_nan()))
}

/// Returns the rank of each element, index-aligned with `values`.
///
/// # Algorithm
///
/// 1. Pair each value with its index and sort a private copy ascending
/// 2. Assign sequential ranks 0..n-1 in sorted order
/// 3. Overwrite each maximal run of k equal values starting at sorted
///    position p with the midrank p + (k-1)/2
/// 4. Scatter the ranks back to input order
///
/// # Complexity
///
/// O(n log n).
pub fn rank(values: &[f64]) -> Vec<f64> {
    let mut ranks = vec![0.0; values.len()];
    for rv in ranked_values(values) {
        ranks[rv.index] = rv.rank;
    }
    ranks
}

/// Returns the ranked triples in ascending value order.
///
/// The sort is stable, so tied values keep their input order.
pub fn ranked_values(values: &[f64]) -> Vec<RankedValue> {
    let mut ranked: Vec<RankedValue> = values
        .iter()
        .enumerate()
        .map(|(index, &value)| RankedValue {
            value,
            index,
            rank: 0.0,
        })
        .collect();
    ranked.sort_by(|a, b| compare_values(a.value, b.value));

    let n = ranked.len();
    let mut start = 0;
    while start < n {
        let mut end = start + 1;
        while end < n && compare_values(ranked[end].value, ranked[start].value).is_eq() {
            end += 1;
        }
        // Midrank of positions start..end
        let midrank = start as f64 + (end - start - 1) as f64 / 2.0;
        for rv in &mut ranked[start..end] {
            rv.rank = midrank;
        }
        start = end;
    }

    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rank_no_ties() {
        let ranks = rank(&[3.0, 1.0, 2.0]);
        assert_eq!(ranks, vec![2.0, 0.0, 1.0]);
    }

    #[test]
    fn rank_three_way_tie() {
        let ranks = rank(&[5.0, 3.0, 3.0, 3.0, 1.0]);
        assert_eq!(ranks[1], 2.0);
        assert_eq!(ranks[2], 2.0);
        assert_eq!(ranks[3], 2.0);
        assert_eq!(ranks[0], 4.0);
        assert_eq!(ranks[4], 0.0);
    }

    #[test]
    fn rank_pair_tie() {
        let ranks = rank(&[1.0, 2.0, 2.0, 4.0]);
        assert_eq!(ranks, vec![0.0, 1.5, 1.5, 3.0]);
    }

    #[test]
    fn rank_all_same() {
        let ranks = rank(&[5.0, 5.0, 5.0]);
        assert_eq!(ranks, vec![1.0, 1.0, 1.0]);
    }

    #[test]
    fn rank_descending_thousand() {
        let data: Vec<f64> = (0..1000).map(|i| (1000 - i) as f64).collect();
        let ranks = rank(&data);
        for i in 1..1000 {
            assert!(ranks[i - 1] > ranks[i]);
        }
    }

    #[test]
    fn rank_tie_inside_long_run() {
        let mut data: Vec<f64> = (0..1000).map(|i| (999 - i) as f64).collect();
        data[200] = 800.0; // duplicates data[199]
        let ranks = rank(&data);
        assert_eq!(ranks[199], 799.5);
        assert_eq!(ranks[200], 799.5);
    }

    #[test]
    fn rank_empty_and_single() {
        assert!(rank(&[]).is_empty());
        assert_eq!(rank(&[42.0]), vec![0.0]);
    }

    #[test]
    fn rank_nan_sorts_last() {
        let ranks = rank(&[f64::NAN, 1.0, f64::NAN, 0.0]);
        assert_eq!(ranks[3], 0.0);
        assert_eq!(ranks[1], 1.0);
        assert_eq!(ranks[0], 2.5);
        assert_eq!(ranks[2], 2.5);
    }

    #[test]
    fn signed_zero_ties() {
        let ranks = rank(&[0.0, -0.0, 1.0]);
        assert_eq!(ranks[0], 0.5);
        assert_eq!(ranks[1], 0.5);
    }

    #[test]
    fn ranked_values_keep_original_index() {
        let ranked = ranked_values(&[30.0, 10.0, 20.0]);
        let order: Vec<usize> = ranked.iter().map(|rv| rv.index).collect();
        assert_eq!(order, vec![1, 2, 0]);
        assert_eq!(ranked[0].value, 10.0);
        assert_eq!(ranked[2].rank, 2.0);
    }

    #[test]
    fn input_not_mutated() {
        let data = vec![3.0, 1.0, 2.0];
        let _ = rank(&data);
        assert_eq!(data, vec![3.0, 1.0, 2.0]);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn distinct_values_rank_to_permutation(
            data in proptest::collection::btree_set(-1_000_000_i64..1_000_000, 1..=60)
        ) {
            // btree_set guarantees distinct values; shuffle by reversing halves
            let mut values: Vec<f64> = data.iter().map(|&v| v as f64).collect();
            let mid = values.len() / 2;
            values[..mid].reverse();

            let ranks = rank(&values);
            let mut sorted_ranks = ranks.clone();
            sorted_ranks.sort_by(|a, b| a.partial_cmp(b).unwrap());
            for (i, &r) in sorted_ranks.iter().enumerate() {
                prop_assert_eq!(r, i as f64);
            }

            for i in 0..values.len() {
                for j in 0..values.len() {
                    if values[i] < values[j] {
                        prop_assert!(ranks[i] < ranks[j]);
                    }
                }
            }
        }

        #[test]
        fn rank_sum_is_invariant(
            data in proptest::collection::vec(-50_i32..50, 1..=80)
        ) {
            let values: Vec<f64> = data.iter().map(|&v| v as f64).collect();
            let n = values.len() as f64;
            let total: f64 = rank(&values).iter().sum();
            prop_assert!((total - n * (n - 1.0) / 2.0).abs() < 1e-9);
        }
    }
}
