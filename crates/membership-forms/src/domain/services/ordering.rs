//! Ordering / Reindex Engine
//!
//! Moves a field one step within its own category by swapping order keys with
//! the immediate neighbour. Nothing is ever renumbered, so order values of
//! unrelated fields (including other categories) stay untouched.

use crate::domain::aggregates::FieldDefinition;
use crate::domain::value_objects::{Category, FieldId};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// Indices into `fields` of every field in `category`, ascending by order.
///
/// Equal order keys fall back to insertion index.
pub fn positions_in_category(fields: &[FieldDefinition], category: Category) -> Vec<usize> {
    let mut positions: Vec<usize> = fields
        .iter()
        .enumerate()
        .filter(|(_, f)| f.category == category)
        .map(|(i, _)| i)
        .collect();
    positions.sort_by_key(|&i| (fields[i].order, i));
    positions
}

/// Index of the field `index` would swap with, or `None` at the boundary
pub fn neighbor(sorted: &[usize], index: usize, direction: Direction) -> Option<usize> {
    let rank = sorted.iter().position(|&i| i == index)?;
    match direction {
        Direction::Up => rank.checked_sub(1).map(|r| sorted[r]),
        Direction::Down => sorted.get(rank + 1).copied(),
    }
}

/// Swap the order key of `fields[index]` with its category neighbour.
///
/// Returns the neighbour's id when a swap happened; `None` leaves `fields`
/// untouched. When both keys are equal the entries also trade places in the
/// backing vector so the insertion-index tiebreak reflects the move.
pub fn swap_with_neighbor(
    fields: &mut [FieldDefinition],
    index: usize,
    direction: Direction,
) -> Option<FieldId> {
    let category = fields.get(index)?.category;
    let sorted = positions_in_category(fields, category);
    let other = neighbor(&sorted, index, direction)?;

    let (mine, theirs) = (fields[index].order, fields[other].order);
    fields[index].order = theirs;
    fields[other].order = mine;
    if mine == theirs {
        fields.swap(index, other);
        return Some(fields[index].id.clone());
    }

    Some(fields[other].id.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::FieldType;

    fn field(id: &str, category: Category, order: u32) -> FieldDefinition {
        FieldDefinition::new(id, id, FieldType::Text, category, order)
    }

    fn ids_in(fields: &[FieldDefinition], category: Category) -> Vec<&str> {
        positions_in_category(fields, category)
            .into_iter()
            .map(|i| fields[i].id.as_str())
            .collect()
    }

    #[test]
    fn test_positions_sorted_by_order() {
        let fields = vec![
            field("c", Category::Contact, 9),
            field("x", Category::Personal, 1),
            field("a", Category::Contact, 2),
        ];
        assert_eq!(ids_in(&fields, Category::Contact), vec!["a", "c"]);
    }

    #[test]
    fn test_ties_fall_back_to_insertion_index() {
        let fields = vec![
            field("first", Category::Contact, 5),
            field("second", Category::Contact, 5),
        ];
        assert_eq!(ids_in(&fields, Category::Contact), vec!["first", "second"]);
    }

    #[test]
    fn test_swap_leaves_other_categories_alone() {
        let mut fields = vec![
            field("a", Category::Contact, 10),
            field("p", Category::Personal, 11),
            field("b", Category::Contact, 20),
        ];
        let swapped = swap_with_neighbor(&mut fields, 2, Direction::Up);
        assert_eq!(swapped.as_ref().map(FieldId::as_str), Some("a"));
        assert_eq!(fields[0].order, 20);
        assert_eq!(fields[1].order, 11);
        assert_eq!(fields[2].order, 10);
    }

    #[test]
    fn test_boundaries_are_no_ops() {
        let mut fields = vec![field("a", Category::Contact, 1), field("b", Category::Contact, 2)];
        let before = fields.clone();
        assert!(swap_with_neighbor(&mut fields, 0, Direction::Up).is_none());
        assert!(swap_with_neighbor(&mut fields, 1, Direction::Down).is_none());
        assert_eq!(fields, before);
    }

    #[test]
    fn test_swap_with_tied_orders_still_moves() {
        let mut fields = vec![
            field("first", Category::Contact, 5),
            field("second", Category::Contact, 5),
        ];
        let swapped = swap_with_neighbor(&mut fields, 1, Direction::Up);
        assert_eq!(swapped.as_ref().map(FieldId::as_str), Some("first"));
        assert_eq!(ids_in(&fields, Category::Contact), vec!["second", "first"]);
    }
}
