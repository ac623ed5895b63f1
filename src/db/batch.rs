//! In-memory association for batched secondary fetches.
//!
//! A batched fetch issues one query for the roots and one `IN (...)` query
//! for every related row, then stitches the two result sets together here
//! by foreign key. These helpers never touch the database.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

/// Deduplicates keys, keeping the order in which they were first seen.
pub fn distinct_keys<K, I>(keys: I) -> Vec<K>
where
    K: Eq + Hash + Copy,
    I: IntoIterator<Item = K>,
{
    let mut seen = HashSet::new();
    keys.into_iter().filter(|k| seen.insert(*k)).collect()
}

/// Pairs every parent with the children whose foreign key points at it.
///
/// Parent order is preserved and children keep their relative order. Each
/// child is handed to at most one parent; children matching no parent are
/// discarded.
pub fn group_children<P, C, K>(
    parents: Vec<P>,
    children: Vec<C>,
    parent_key: impl Fn(&P) -> K,
    child_fk: impl Fn(&C) -> K,
) -> Vec<(P, Vec<C>)>
where
    K: Eq + Hash,
{
    let mut by_parent: HashMap<K, Vec<C>> = HashMap::new();
    for child in children {
        by_parent.entry(child_fk(&child)).or_default().push(child);
    }

    parents
        .into_iter()
        .map(|parent| {
            let children = by_parent.remove(&parent_key(&parent)).unwrap_or_default();
            (parent, children)
        })
        .collect()
}

/// Pairs every child with the parent its foreign key references.
///
/// Child order is preserved. Parents are cloned because several children
/// may share one.
pub fn attach_parent<C, P, K>(
    children: Vec<C>,
    parents: Vec<P>,
    child_fk: impl Fn(&C) -> K,
    parent_key: impl Fn(&P) -> K,
) -> Vec<(C, Option<P>)>
where
    P: Clone,
    K: Eq + Hash,
{
    let by_key: HashMap<K, P> = parents.into_iter().map(|p| (parent_key(&p), p)).collect();

    children
        .into_iter()
        .map(|child| {
            let parent = by_key.get(&child_fk(&child)).cloned();
            (child, parent)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Parent {
        id: i32,
    }

    #[derive(Debug, Clone, PartialEq)]
    struct Child {
        id: i32,
        parent_id: i32,
    }

    fn child(id: i32, parent_id: i32) -> Child {
        Child { id, parent_id }
    }

    #[test]
    fn test_distinct_keys_preserves_first_seen_order() {
        assert_eq!(distinct_keys([3, 1, 3, 2, 1]), vec![3, 1, 2]);
        assert!(distinct_keys(Vec::<i32>::new()).is_empty());
    }

    #[test]
    fn test_group_children_never_drops_or_duplicates() {
        let parents = vec![Parent { id: 1 }, Parent { id: 2 }, Parent { id: 3 }];
        let children = vec![child(10, 1), child(11, 2), child(12, 1), child(13, 2)];

        let grouped = group_children(parents, children.clone(), |p| p.id, |c| c.parent_id);

        assert_eq!(grouped.len(), 3);
        assert_eq!(grouped[0].1, vec![child(10, 1), child(12, 1)]);
        assert_eq!(grouped[1].1, vec![child(11, 2), child(13, 2)]);
        assert!(grouped[2].1.is_empty());

        let mut all: Vec<i32> = grouped
            .iter()
            .flat_map(|(_, cs)| cs.iter().map(|c| c.id))
            .collect();
        all.sort_unstable();
        assert_eq!(all, vec![10, 11, 12, 13]);
    }

    #[test]
    fn test_group_children_keeps_parent_order() {
        let parents = vec![Parent { id: 5 }, Parent { id: 2 }];
        let grouped = group_children(parents, vec![child(1, 2)], |p| p.id, |c| c.parent_id);

        let order: Vec<i32> = grouped.iter().map(|(p, _)| p.id).collect();
        assert_eq!(order, vec![5, 2]);
    }

    #[test]
    fn test_group_children_with_no_parents() {
        let grouped = group_children(
            Vec::<Parent>::new(),
            vec![child(1, 1)],
            |p| p.id,
            |c| c.parent_id,
        );
        assert!(grouped.is_empty());
    }

    #[test]
    fn test_attach_parent_shares_parent_between_children() {
        let children = vec![child(10, 1), child(11, 1), child(12, 2)];
        let parents = vec![Parent { id: 1 }];

        let attached = attach_parent(children, parents, |c| c.parent_id, |p| p.id);

        assert_eq!(attached.len(), 3);
        assert_eq!(attached[0].1, Some(Parent { id: 1 }));
        assert_eq!(attached[1].1, Some(Parent { id: 1 }));
        assert_eq!(attached[2].1, None);
    }
}
