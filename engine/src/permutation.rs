//! Array moves and full-list renumbering.
//!
//! A drag gesture is a `(source, destination)` pair over the displayed list.
//! The item at `source` is removed and reinserted at `destination`, and every
//! entry then receives its 0-based position as its new `order`. Renumbering the
//! whole list, rather than patching the moved item, keeps the batch
//! idempotent and free of collisions with untouched records.

use crate::{Order, SetId};
use serde::{Deserialize, Serialize};

/// One `{id, order}` pair of a batch reorder.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderEntry {
    pub id: SetId,
    pub order: Order,
}

impl OrderEntry {
    pub fn new(id: impl Into<SetId>, order: Order) -> Self {
        Self {
            id: id.into(),
            order,
        }
    }
}

/// Request body of a batch reorder: the full desired ordering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReorderBatch {
    pub sets: Vec<OrderEntry>,
}

impl ReorderBatch {
    /// Build a batch from ids in their desired display order.
    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SetId>,
    {
        Self {
            sets: renumber(ids),
        }
    }

    /// Ids in submitted order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.sets.iter().map(|entry| entry.id.as_str())
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }
}

/// Move the item at `source` to `destination`.
///
/// Returns `None` when either index is out of range or both are equal; the
/// gesture is then a no-op.
pub fn move_item<T: Clone>(items: &[T], source: usize, destination: usize) -> Option<Vec<T>> {
    if source == destination || source >= items.len() || destination >= items.len() {
        return None;
    }

    let mut moved = items.to_vec();
    let item = moved.remove(source);
    moved.insert(destination, item);
    Some(moved)
}

/// Assign every id its 0-based position as `order`.
pub fn renumber<I, S>(ids: I) -> Vec<OrderEntry>
where
    I: IntoIterator<Item = S>,
    S: Into<SetId>,
{
    ids.into_iter()
        .enumerate()
        .map(|(position, id)| OrderEntry::new(id, position as Order))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn move_first_to_last() {
        let ids = vec!["a", "b", "c"];
        assert_eq!(move_item(&ids, 0, 2), Some(vec!["b", "c", "a"]));
    }

    #[test]
    fn move_last_to_first() {
        let ids = vec!["a", "b", "c", "d"];
        assert_eq!(move_item(&ids, 3, 0), Some(vec!["d", "a", "b", "c"]));
    }

    #[test]
    fn move_to_neighbour() {
        let ids = vec!["a", "b", "c"];
        assert_eq!(move_item(&ids, 1, 2), Some(vec!["a", "c", "b"]));
    }

    #[test]
    fn invalid_gestures_are_noops() {
        let ids = vec!["a", "b", "c"];
        assert_eq!(move_item(&ids, 1, 1), None);
        assert_eq!(move_item(&ids, 3, 0), None);
        assert_eq!(move_item(&ids, 0, 3), None);

        let empty: Vec<&str> = Vec::new();
        assert_eq!(move_item(&empty, 0, 0), None);
    }

    #[test]
    fn renumber_assigns_positions() {
        let entries = renumber(["b", "c", "a"]);
        assert_eq!(
            entries,
            vec![
                OrderEntry::new("b", 0),
                OrderEntry::new("c", 1),
                OrderEntry::new("a", 2),
            ]
        );
    }

    #[test]
    fn batch_wire_format() {
        let batch = ReorderBatch::from_ids(["b", "a"]);
        let json = serde_json::to_string(&batch).unwrap();
        assert_eq!(
            json,
            r#"{"sets":[{"id":"b","order":0},{"id":"a","order":1}]}"#
        );
        assert_eq!(batch.ids().collect::<Vec<_>>(), vec!["b", "a"]);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;
        use std::collections::HashSet;

        fn arb_gesture() -> impl Strategy<Value = (usize, usize, usize)> {
            (1usize..40).prop_flat_map(|len| (Just(len), 0..len, 0..len))
        }

        proptest! {
            #[test]
            fn prop_move_is_permutation((len, source, destination) in arb_gesture()) {
                let ids: Vec<String> = (0..len).map(|i| format!("set-{}", i)).collect();

                match move_item(&ids, source, destination) {
                    Some(moved) => {
                        prop_assert_ne!(source, destination);
                        prop_assert_eq!(moved.len(), ids.len());

                        let before: HashSet<_> = ids.iter().collect();
                        let after: HashSet<_> = moved.iter().collect();
                        prop_assert_eq!(before, after);

                        prop_assert_eq!(&moved[destination], &ids[source]);
                    }
                    None => {
                        prop_assert_eq!(source, destination);
                    }
                }
            }

            #[test]
            fn prop_renumber_is_contiguous((len, source, destination) in arb_gesture()) {
                let ids: Vec<String> = (0..len).map(|i| format!("set-{}", i)).collect();
                let moved = move_item(&ids, source, destination).unwrap_or(ids);

                let entries = renumber(moved.clone());

                for (position, entry) in entries.iter().enumerate() {
                    prop_assert_eq!(entry.order, position as Order);
                    prop_assert_eq!(&entry.id, &moved[position]);
                }
            }
        }
    }
}
