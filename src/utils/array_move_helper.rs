use crate::utils::range_relationship::{RangeIndexRelationship, range_index_relationship};

/// Direction in which an array move relocates its element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    /// `from_index < to_index`: the elements in between shift left.
    Forward,
    /// `from_index > to_index`: the elements in between shift right.
    Backward,
    /// `from_index == to_index`: nothing changes.
    Identity,
}

#[must_use]
pub fn move_direction(from_index: usize, to_index: usize) -> MoveDirection {
    match from_index.cmp(&to_index) {
        std::cmp::Ordering::Less => MoveDirection::Forward,
        std::cmp::Ordering::Greater => MoveDirection::Backward,
        std::cmp::Ordering::Equal => MoveDirection::Identity,
    }
}

/// Classifies `index` against the span touched by a move, which is
/// `[min(from, to), max(from, to)]` regardless of the direction. For a
/// forward move `Start` is the vacated slot, for a backward move it's the
/// target slot.
#[must_use]
pub fn move_range_index_relationship(
    from_index: usize,
    to_index: usize,
    index: usize,
) -> RangeIndexRelationship {
    range_index_relationship(from_index.min(to_index), from_index.max(to_index), index)
}

/// Where the element at `index` ends up after moving the element at
/// `from_index` to `to_index`.
#[must_use]
pub fn index_after_move(from_index: usize, to_index: usize, index: usize) -> usize {
    if index == from_index {
        return to_index;
    }

    match (
        move_direction(from_index, to_index),
        move_range_index_relationship(from_index, to_index, index),
    ) {
        (MoveDirection::Forward, RangeIndexRelationship::Within | RangeIndexRelationship::End) => {
            index - 1
        }
        (
            MoveDirection::Backward,
            RangeIndexRelationship::Start | RangeIndexRelationship::Within,
        ) => index + 1,
        _ => index,
    }
}
