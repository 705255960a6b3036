//! Incremental diffing between two list snapshots.
//!
//! Given the previously displayed sequence and a freshly submitted one,
//! [`diff`] computes the positional edit script - inserts, removals, moves,
//! and content updates - that transforms the old sequence into the new one.
//! The adapter replays that script as change notifications, so an attached
//! view touches only the rows that actually changed instead of redrawing the
//! whole list.
//!
//! Items are matched by identity key (see [`DiffItem`]), then compared by
//! content. The common cases - append-only emissions and single-item
//! updates - reduce to prefix/suffix trimming and run in linear time. The
//! remaining interior is matched through a hash map and ordered with a
//! longest-increasing-subsequence anchor, so a full reorder of `n` rows costs
//! O(n log n), never the quadratic worst case of pairwise matching.
//!
//! # Preconditions
//!
//! Identity keys must be unique within each sequence. A colliding key makes
//! the produced script unspecified; debug builds assert on it. This is a
//! programmer error at the data layer, not a condition the engine recovers
//! from.

use std::collections::HashMap;
use std::hash::Hash;

use somnia_core::logging::targets;

/// An item the diff engine can match across snapshots.
///
/// `identity` recognizes "the same logical item" independent of its content;
/// `content_eq` decides whether a matched item needs an update notification.
/// Both must be pure: two calls on the same value return the same answer.
pub trait DiffItem {
    /// Identity key type. Hashable so interior matching stays linear.
    type Key: Hash + Eq + Clone;

    /// The identity key of this item, stable across content changes.
    fn identity(&self) -> Self::Key;

    /// Whether this item would render identically to `other`.
    ///
    /// Only ever called on items whose identity keys are equal.
    fn content_eq(&self, other: &Self) -> bool;
}

/// One positional operation in an edit script.
///
/// Positions are expressed against the sequence state at the moment the
/// operation applies, so replaying a script's operations in order transforms
/// the old sequence into the new one exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOp<T> {
    /// Insert `item` so that it ends up at position `at`.
    Insert { at: usize, item: T },
    /// Remove the item currently at position `at`.
    Remove { at: usize },
    /// Remove the item at `from`, then reinsert it at `to`.
    ///
    /// `to` is the insertion index in the sequence after the removal.
    Move { from: usize, to: usize },
    /// Replace the content of the item at position `at` with `item`.
    ///
    /// The identity at that position is unchanged; only content differs.
    Update { at: usize, item: T },
}

/// The ordered operations transforming one snapshot into another.
///
/// Operations are grouped by phase: removals (descending positions), moves,
/// inserts (ascending positions), then updates (ascending final positions).
/// Consumed once by the adapter's notification pass and discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditScript<T> {
    ops: Vec<EditOp<T>>,
}

impl<T> EditScript<T> {
    /// A script with no operations.
    pub fn empty() -> Self {
        Self { ops: Vec::new() }
    }

    /// The operations in application order.
    #[inline]
    pub fn ops(&self) -> &[EditOp<T>] {
        &self.ops
    }

    /// Number of operations.
    #[inline]
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Whether the script changes nothing.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Consumes the script, yielding its operations.
    pub fn into_ops(self) -> Vec<EditOp<T>> {
        self.ops
    }

    /// Replays the script onto `items`, mutating it in place.
    ///
    /// Used to keep a mirror of the sequence in step with the source that
    /// produced the script. Panics if an operation's position is out of
    /// bounds, which only happens when the script is applied to a sequence
    /// other than the one it was computed from.
    pub fn apply(&self, items: &mut Vec<T>)
    where
        T: Clone,
    {
        for op in &self.ops {
            match op {
                EditOp::Insert { at, item } => items.insert(*at, item.clone()),
                EditOp::Remove { at } => {
                    items.remove(*at);
                }
                EditOp::Move { from, to } => {
                    let item = items.remove(*from);
                    items.insert(*to, item);
                }
                EditOp::Update { at, item } => items[*at] = item.clone(),
            }
        }
    }
}

/// Computes the edit script transforming `old` into `new`.
///
/// Matching is by [`DiffItem::identity`]; matched items whose
/// [`DiffItem::content_eq`] reports a difference produce an `Update`. Ties
/// between equally small scripts resolve toward the new sequence's order:
/// unmatched and displaced items are emitted in the order they appear in
/// `new`.
pub fn diff<T>(old: &[T], new: &[T]) -> EditScript<T>
where
    T: DiffItem + Clone,
{
    // Fast path: shared prefix and suffix by identity. Covers the dominant
    // emissions (unchanged list, append, single removal, in-place update).
    let max_prefix = old.len().min(new.len());
    let mut prefix = 0;
    while prefix < max_prefix && old[prefix].identity() == new[prefix].identity() {
        prefix += 1;
    }
    let mut suffix = 0;
    while suffix < old.len() - prefix
        && suffix < new.len() - prefix
        && old[old.len() - 1 - suffix].identity() == new[new.len() - 1 - suffix].identity()
    {
        suffix += 1;
    }

    let old_mid = &old[prefix..old.len() - suffix];
    let new_mid = &new[prefix..new.len() - suffix];

    let mut ops = Vec::new();

    // Interior matching through a key map over the new side.
    let mut new_index: HashMap<T::Key, usize> = HashMap::with_capacity(new_mid.len());
    for (j, item) in new_mid.iter().enumerate() {
        let previous = new_index.insert(item.identity(), j);
        debug_assert!(
            previous.is_none(),
            "duplicate identity key within the new sequence"
        );
    }

    #[cfg(debug_assertions)]
    {
        let mut old_keys = std::collections::HashSet::with_capacity(old_mid.len());
        for item in old_mid {
            assert!(
                old_keys.insert(item.identity()),
                "duplicate identity key within the old sequence"
            );
        }
    }

    // (old_mid index, new_mid index) for identity-matched pairs.
    let mut matched: Vec<(usize, usize)> = Vec::new();
    let mut removed: Vec<usize> = Vec::new();
    for (i, item) in old_mid.iter().enumerate() {
        match new_index.get(&item.identity()) {
            Some(&j) => matched.push((i, j)),
            None => removed.push(i),
        }
    }

    // Removals run highest-position-first so the positions of items before
    // them stay valid; each `at` is then simply the old absolute position.
    for &i in removed.iter().rev() {
        ops.push(EditOp::Remove { at: prefix + i });
    }

    // Moves. Matched items whose new-order ranks form the longest increasing
    // subsequence stay anchored; every other matched item is placed in new
    // order, directly after its new-order predecessor.
    let ranks: Vec<usize> = matched.iter().map(|&(_, j)| j).collect();
    let anchored = longest_increasing_subsequence(&ranks);

    // Identity keys of the post-removal sequence, kept in step as moves apply.
    let mut work: Vec<T::Key> = Vec::with_capacity(old.len() - removed.len());
    work.extend(old[..prefix].iter().map(DiffItem::identity));
    work.extend(matched.iter().map(|&(i, _)| old_mid[i].identity()));
    work.extend(old[old.len() - suffix..].iter().map(DiffItem::identity));

    // Matched pairs walked in new order, with their anchor flags.
    let mut order: Vec<(usize, usize, bool)> = matched
        .iter()
        .enumerate()
        .map(|(k, &(i, j))| (j, i, anchored[k]))
        .collect();
    order.sort_unstable_by_key(|&(j, _, _)| j);

    for r in 0..order.len() {
        let (_, i, is_anchor) = order[r];
        if is_anchor {
            continue;
        }
        let key = old_mid[i].identity();
        let from = index_of(&work, &key);
        work.remove(from);
        let to = if r == 0 {
            prefix
        } else {
            let (_, pred_i, _) = order[r - 1];
            index_of(&work, &old_mid[pred_i].identity()) + 1
        };
        work.insert(to, key);
        if from != to {
            ops.push(EditOp::Move { from, to });
        }
    }

    // Inserts run lowest-position-first; every position before an insert is
    // already final, so `at` is the new absolute position.
    let mut matched_new = vec![false; new_mid.len()];
    for &(_, j) in &matched {
        matched_new[j] = true;
    }
    for (j, item) in new_mid.iter().enumerate() {
        if !matched_new[j] {
            ops.push(EditOp::Insert {
                at: prefix + j,
                item: item.clone(),
            });
        }
    }

    // Updates last, against final positions: prefix pairs, interior matches,
    // then suffix pairs, sorted ascending.
    let mut updates: Vec<(usize, &T)> = Vec::new();
    for p in 0..prefix {
        if !old[p].content_eq(&new[p]) {
            updates.push((p, &new[p]));
        }
    }
    for &(i, j) in &matched {
        if !old_mid[i].content_eq(&new_mid[j]) {
            updates.push((prefix + j, &new_mid[j]));
        }
    }
    for s in 0..suffix {
        let old_item = &old[old.len() - suffix + s];
        let new_item = &new[new.len() - suffix + s];
        if !old_item.content_eq(new_item) {
            updates.push((new.len() - suffix + s, new_item));
        }
    }
    updates.sort_unstable_by_key(|&(at, _)| at);
    for (at, item) in updates {
        ops.push(EditOp::Update {
            at,
            item: item.clone(),
        });
    }

    if !ops.is_empty() {
        let moves = ops
            .iter()
            .filter(|op| matches!(op, EditOp::Move { .. }))
            .count();
        tracing::debug!(
            target: targets::DIFF,
            old_len = old.len(),
            new_len = new.len(),
            removed = removed.len(),
            inserted = new_mid.len() - matched.len(),
            moved = moves,
            updated = ops.len() - removed.len() - (new_mid.len() - matched.len()) - moves,
            "computed edit script"
        );
    }

    EditScript { ops }
}

/// Position of `key` in `work`. The key is always present; moves only ever
/// look up items that survived the removal pass.
fn index_of<K: Eq>(work: &[K], key: &K) -> usize {
    work.iter()
        .position(|k| k == key)
        .expect("moved item missing from working sequence")
}

/// Membership flags for the longest strictly increasing subsequence of
/// `ranks`. Patience algorithm, O(n log n); ranks are unique by construction.
fn longest_increasing_subsequence(ranks: &[usize]) -> Vec<bool> {
    let mut tails: Vec<usize> = Vec::new();
    let mut prev: Vec<Option<usize>> = vec![None; ranks.len()];

    for i in 0..ranks.len() {
        let pos = tails.partition_point(|&t| ranks[t] < ranks[i]);
        if pos > 0 {
            prev[i] = Some(tails[pos - 1]);
        }
        if pos == tails.len() {
            tails.push(i);
        } else {
            tails[pos] = i;
        }
    }

    let mut member = vec![false; ranks.len()];
    let mut cursor = tails.last().copied();
    while let Some(i) = cursor {
        member[i] = true;
        cursor = prev[i];
    }
    member
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A minimal diffable item: identity by `key`, content by `value`.
    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Row {
        key: u32,
        value: &'static str,
    }

    fn row(key: u32, value: &'static str) -> Row {
        Row { key, value }
    }

    impl DiffItem for Row {
        type Key = u32;

        fn identity(&self) -> u32 {
            self.key
        }

        fn content_eq(&self, other: &Self) -> bool {
            self.value == other.value
        }
    }

    fn check_applies(old: &[Row], new: &[Row]) -> EditScript<Row> {
        let script = diff(old, new);
        let mut mirror = old.to_vec();
        script.apply(&mut mirror);
        assert_eq!(mirror, new, "script must transform old into new");
        script
    }

    fn count_ops(script: &EditScript<Row>) -> (usize, usize, usize, usize) {
        let mut counts = (0, 0, 0, 0);
        for op in script.ops() {
            match op {
                EditOp::Insert { .. } => counts.0 += 1,
                EditOp::Remove { .. } => counts.1 += 1,
                EditOp::Move { .. } => counts.2 += 1,
                EditOp::Update { .. } => counts.3 += 1,
            }
        }
        counts
    }

    #[test]
    fn test_identical_sequences_produce_empty_script() {
        let items = vec![row(1, "a"), row(2, "b"), row(3, "c")];
        let script = check_applies(&items, &items.clone());
        assert!(script.is_empty());
    }

    #[test]
    fn test_append_is_inserts_only() {
        let old = vec![row(1, "a"), row(2, "b")];
        let new = vec![row(1, "a"), row(2, "b"), row(3, "c"), row(4, "d")];
        let script = check_applies(&old, &new);
        assert_eq!(count_ops(&script), (2, 0, 0, 0));
        assert_eq!(
            script.ops()[0],
            EditOp::Insert {
                at: 2,
                item: row(3, "c")
            }
        );
        assert_eq!(
            script.ops()[1],
            EditOp::Insert {
                at: 3,
                item: row(4, "d")
            }
        );
    }

    #[test]
    fn test_single_content_change_is_one_update() {
        let old = vec![row(1, "a"), row(2, "b"), row(3, "c")];
        let new = vec![row(1, "a"), row(2, "B"), row(3, "c")];
        let script = check_applies(&old, &new);
        assert_eq!(
            script.ops(),
            &[EditOp::Update {
                at: 1,
                item: row(2, "B")
            }]
        );
    }

    #[test]
    fn test_removal_uses_old_position() {
        let old = vec![row(1, "a"), row(2, "b"), row(3, "c")];
        let new = vec![row(1, "a"), row(3, "c")];
        let script = check_applies(&old, &new);
        assert_eq!(script.ops(), &[EditOp::Remove { at: 1 }]);
    }

    #[test]
    fn test_remove_and_insert_without_spurious_updates() {
        // First item dropped, new item appended, the surviving item
        // unchanged.
        let old = vec![row(0, "h"), row(1, "a"), row(2, "b")];
        let new = vec![row(0, "h"), row(2, "b"), row(3, "c")];
        let script = check_applies(&old, &new);
        assert_eq!(
            script.ops(),
            &[
                EditOp::Remove { at: 1 },
                EditOp::Insert {
                    at: 2,
                    item: row(3, "c")
                },
            ]
        );
    }

    #[test]
    fn test_adjacent_swap_is_one_move() {
        let old = vec![row(0, "h"), row(1, "a"), row(2, "b")];
        let new = vec![row(0, "h"), row(2, "b"), row(1, "a")];
        let script = check_applies(&old, &new);
        assert_eq!(count_ops(&script), (0, 0, 1, 0));
    }

    #[test]
    fn test_full_reversal_moves_all_but_one() {
        let old: Vec<Row> = (0..6).map(|k| row(k, "x")).collect();
        let new: Vec<Row> = (0..6).rev().map(|k| row(k, "x")).collect();
        let script = check_applies(&old, &new);
        let (inserts, removes, moves, updates) = count_ops(&script);
        assert_eq!((inserts, removes, updates), (0, 0, 0));
        assert_eq!(moves, 5);
    }

    #[test]
    fn test_permutations_apply_cleanly() {
        let base: Vec<Row> = vec![
            row(1, "a"),
            row(2, "b"),
            row(3, "c"),
            row(4, "d"),
            row(5, "e"),
        ];
        let orders: &[[u32; 5]] = &[
            [2, 4, 1, 3, 5],
            [5, 4, 3, 2, 1],
            [3, 1, 2, 5, 4],
            [2, 1, 4, 3, 5],
            [4, 5, 1, 2, 3],
        ];
        for order in orders {
            let new: Vec<Row> = order
                .iter()
                .map(|&k| base.iter().find(|r| r.key == k).unwrap().clone())
                .collect();
            check_applies(&base, &new);
        }
    }

    #[test]
    fn test_mixed_churn_applies_cleanly() {
        let old = vec![
            row(1, "a"),
            row(2, "b"),
            row(3, "c"),
            row(4, "d"),
            row(5, "e"),
        ];
        // 2 removed, 6 added, 4 re-rated, 5 and 3 swapped.
        let new = vec![
            row(1, "a"),
            row(6, "f"),
            row(5, "e"),
            row(4, "D"),
            row(3, "c"),
        ];
        let script = check_applies(&old, &new);
        let (inserts, removes, _, updates) = count_ops(&script);
        assert_eq!(inserts, 1);
        assert_eq!(removes, 1);
        assert_eq!(updates, 1);
    }

    #[test]
    fn test_growth_from_empty_and_back() {
        let empty: Vec<Row> = Vec::new();
        let full = vec![row(1, "a"), row(2, "b")];
        let grow = check_applies(&empty, &full);
        assert_eq!(count_ops(&grow), (2, 0, 0, 0));
        let shrink = check_applies(&full, &empty);
        assert_eq!(count_ops(&shrink), (0, 2, 0, 0));
    }

    #[test]
    fn test_update_inside_common_prefix_and_suffix() {
        let old = vec![row(1, "a"), row(2, "b"), row(3, "c"), row(4, "d")];
        let new = vec![row(1, "A"), row(2, "b"), row(3, "c"), row(4, "D")];
        let script = check_applies(&old, &new);
        assert_eq!(
            script.ops(),
            &[
                EditOp::Update {
                    at: 0,
                    item: row(1, "A")
                },
                EditOp::Update {
                    at: 3,
                    item: row(4, "D")
                },
            ]
        );
    }

    #[test]
    fn test_moved_item_with_changed_content_updates_at_final_position() {
        let old = vec![row(1, "a"), row(2, "b"), row(3, "c")];
        let new = vec![row(2, "B"), row(3, "c"), row(1, "a")];
        let script = check_applies(&old, &new);
        let update_positions: Vec<usize> = script
            .ops()
            .iter()
            .filter_map(|op| match op {
                EditOp::Update { at, .. } => Some(*at),
                _ => None,
            })
            .collect();
        assert_eq!(update_positions, vec![0]);
    }
}
