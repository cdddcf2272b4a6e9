//! Column reordering.
//!
//! Translates a completed column drag (grab one column, drop it on
//! another) into a new column-order permutation. The move is a pure
//! remove-then-insert splice, not a swap: columns between the source and
//! destination shift by one position.

use tracing::debug;

use super::state::TableState;

/// Compute the column order after moving `dragged_id` onto `target_id`.
///
/// The dragged id is removed from its current position and reinserted at
/// the position `target_id` occupied before the removal. Returns `None`
/// when nothing should change: the two ids are equal, or either id is not
/// part of the current order (a stale drop signal, e.g. a column hidden
/// mid-drag).
pub fn reorder(order: &[String], dragged_id: &str, target_id: &str) -> Option<Vec<String>> {
    if dragged_id == target_id {
        return None;
    }
    let from = order.iter().position(|id| id == dragged_id)?;
    let to = order.iter().position(|id| id == target_id)?;

    let mut next = order.to_vec();
    let column = next.remove(from);
    next.insert(to, column);
    Some(next)
}

/// Apply a completed drag to the table state.
///
/// Invalid drops leave the order untouched. Returns whether the order
/// changed. The new permutation replaces the old one in a single setter
/// call; no intermediate order is ever observable.
pub fn apply_reorder(state: &mut TableState, dragged_id: &str, target_id: &str) -> bool {
    let mut moved = false;
    state.update_column_order(|prev| match reorder(prev, dragged_id, target_id) {
        Some(next) => {
            debug!(dragged = dragged_id, target = target_id, "Column reordered");
            moved = true;
            next
        }
        None => {
            debug!(dragged = dragged_id, target = target_id, "Reorder ignored");
            prev.to_vec()
        }
    });
    moved
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::column::{ColumnRegistry, ColumnSpec};
    use crate::table::state::DEFAULT_PAGE_SIZE;

    fn order(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_move_left_inserts_before_target() {
        let result = reorder(&order(&["id", "name", "email", "age"]), "age", "id");
        assert_eq!(result, Some(order(&["age", "id", "name", "email"])));
    }

    #[test]
    fn test_move_right_inserts_after_target() {
        let result = reorder(&order(&["id", "name", "email", "age"]), "id", "email");
        assert_eq!(result, Some(order(&["name", "email", "id", "age"])));
    }

    #[test]
    fn test_adjacent_move_is_a_swap_of_neighbors() {
        let result = reorder(&order(&["id", "name", "email"]), "name", "id");
        assert_eq!(result, Some(order(&["name", "id", "email"])));
    }

    #[test]
    fn test_result_is_permutation_of_input() {
        let input = order(&["a", "b", "c", "d", "e"]);
        for dragged in &input {
            for target in &input {
                if let Some(next) = reorder(&input, dragged, target) {
                    assert_eq!(next.len(), input.len());
                    let mut sorted = next.clone();
                    sorted.sort();
                    let mut expected = input.clone();
                    expected.sort();
                    assert_eq!(sorted, expected, "{dragged} -> {target}");
                }
            }
        }
    }

    #[test]
    fn test_relative_order_of_others_preserved() {
        let input = order(&["a", "b", "c", "d", "e"]);
        let next = reorder(&input, "b", "e").unwrap();
        let rest: Vec<&String> = next.iter().filter(|id| *id != "b").collect();
        assert_eq!(rest, [&"a", &"c", &"d", &"e"]);
    }

    #[test]
    fn test_same_id_is_noop() {
        assert_eq!(reorder(&order(&["id", "name"]), "id", "id"), None);
    }

    #[test]
    fn test_unknown_dragged_id_is_noop() {
        assert_eq!(reorder(&order(&["id", "name"]), "ghost", "name"), None);
    }

    #[test]
    fn test_unknown_target_id_is_noop() {
        assert_eq!(reorder(&order(&["id", "name"]), "id", "ghost"), None);
    }

    #[test]
    fn test_apply_reorder_updates_state() {
        let registry = ColumnRegistry::new(vec![
            ColumnSpec::new("id", "ID"),
            ColumnSpec::new("name", "Name"),
            ColumnSpec::new("email", "Email"),
            ColumnSpec::new("age", "Age"),
        ]);
        let mut state = TableState::new(&registry, DEFAULT_PAGE_SIZE);

        assert!(apply_reorder(&mut state, "age", "id"));
        assert_eq!(state.column_order(), ["age", "id", "name", "email"]);
    }

    #[test]
    fn test_apply_reorder_stale_id_leaves_state() {
        let registry = ColumnRegistry::new(vec![
            ColumnSpec::new("id", "ID"),
            ColumnSpec::new("name", "Name"),
        ]);
        let mut state = TableState::new(&registry, DEFAULT_PAGE_SIZE);

        assert!(!apply_reorder(&mut state, "ghost", "id"));
        assert_eq!(state.column_order(), ["id", "name"]);
    }
}
