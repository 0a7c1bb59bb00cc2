//! Leaderboard ranking by comment count.
//!
//! Uses standard competition ranking ("1224"): items with equal counts share
//! a rank, and the next distinct count skips ahead by the size of the tie.
//! The store supplies the counts; this module never touches it.

use serde::Serialize;

/// An item paired with its competition rank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ranked<T> {
    #[serde(flatten)]
    pub item: T,
    pub rank: i64,
}

/// Rank `items` by the count `count_of` extracts, highest count first.
///
/// The rank of each item is one plus the number of items with a strictly
/// greater count, so every input item appears in the output, including
/// those with a count of zero. Items with equal counts keep their input
/// order relative to each other.
pub fn rank_by_count<T, F>(mut items: Vec<T>, count_of: F) -> Vec<Ranked<T>>
where
    F: Fn(&T) -> i64,
{
    // Stable sort: ties stay in the order the caller supplied.
    items.sort_by_key(|item| std::cmp::Reverse(count_of(item)));

    let mut ranked = Vec::with_capacity(items.len());
    let mut previous_count: Option<i64> = None;
    let mut rank = 0;

    for (position, item) in items.into_iter().enumerate() {
        let count = count_of(&item);
        if previous_count != Some(count) {
            rank = position as i64 + 1;
            previous_count = Some(count);
        }
        ranked.push(Ranked { item, rank });
    }

    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranks_for(counts: &[(char, i64)]) -> Vec<(char, i64, i64)> {
        rank_by_count(counts.to_vec(), |(_, count)| *count)
            .into_iter()
            .map(|r| (r.item.0, r.item.1, r.rank))
            .collect()
    }

    #[test]
    fn ties_share_rank_and_next_rank_skips() {
        let ranked = ranks_for(&[
            ('A', 3),
            ('B', 2),
            ('C', 2),
            ('D', 1),
            ('E', 1),
            ('F', 0),
        ]);

        assert_eq!(
            ranked,
            vec![
                ('A', 3, 1),
                ('B', 2, 2),
                ('C', 2, 2),
                ('D', 1, 4),
                ('E', 1, 4),
                ('F', 0, 6),
            ]
        );
    }

    #[test]
    fn unsorted_input_is_ordered_descending() {
        let ranked = ranks_for(&[('F', 0), ('D', 1), ('A', 3), ('C', 2), ('E', 1), ('B', 2)]);
        let counts: Vec<i64> = ranked.iter().map(|r| r.1).collect();
        assert_eq!(counts, vec![3, 2, 2, 1, 1, 0]);

        let rank_of = |id: char| ranked.iter().find(|r| r.0 == id).unwrap().2;
        assert_eq!(rank_of('A'), 1);
        assert_eq!(rank_of('B'), 2);
        assert_eq!(rank_of('C'), 2);
        assert_eq!(rank_of('D'), 4);
        assert_eq!(rank_of('E'), 4);
        assert_eq!(rank_of('F'), 6);
    }

    #[test]
    fn ties_keep_input_order() {
        let ranked = ranks_for(&[('X', 1), ('Y', 5), ('Z', 1)]);
        assert_eq!(ranked, vec![('Y', 5, 1), ('X', 1, 2), ('Z', 1, 2)]);
    }

    #[test]
    fn all_zero_counts_rank_first() {
        let ranked = ranks_for(&[('A', 0), ('B', 0), ('C', 0)]);
        assert!(ranked.iter().all(|r| r.2 == 1));
        assert_eq!(ranked.len(), 3);
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(ranks_for(&[]).is_empty());
    }

    #[test]
    fn rank_invariants_hold_for_assorted_sequences() {
        let sequences: Vec<Vec<i64>> = vec![
            vec![1],
            vec![5, 5, 5, 5],
            vec![0, 1, 2, 3, 4],
            vec![9, 0, 9, 0, 4, 4, 4],
            vec![2, 7, 7, 1, 0, 0, 3, 7],
        ];

        for counts in sequences {
            let ranked = rank_by_count(counts.clone(), |c| *c);

            assert_eq!(ranked.len(), counts.len());
            assert!(ranked.iter().all(|r| r.rank >= 1));

            for pair in ranked.windows(2) {
                assert!(pair[0].item >= pair[1].item, "counts must be descending");
                assert!(pair[0].rank <= pair[1].rank, "ranks must be non-decreasing");
                if pair[0].item == pair[1].item {
                    assert_eq!(pair[0].rank, pair[1].rank);
                }
            }

            for r in &ranked {
                let greater = counts.iter().filter(|c| **c > r.item).count() as i64;
                assert_eq!(r.rank, greater + 1);
            }
        }
    }
}
