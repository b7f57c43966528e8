//! Transformation functions for pairs of array operations targeting the same
//! array.

use log::debug;

use super::{
    TransformResult,
    conflict_resolution::{
        both_no_op, client_wins, indices, resolve_value_clash, server_wins, unknown_pair,
    },
};
use crate::{
    DiscreteOperation, Edit,
    utils::{
        array_move_helper::{
            MoveDirection, index_after_move, move_direction, move_range_index_relationship,
        },
        range_relationship::RangeIndexRelationship,
    },
};

pub(super) fn insert_insert(s: DiscreteOperation, c: DiscreteOperation) -> TransformResult {
    let (s_index, c_index) = indices(&s, &c)?;

    if s_index <= c_index {
        Ok((s, c.with_shifted_index(1)))
    } else {
        Ok((s.with_shifted_index(1), c))
    }
}

pub(super) fn insert_remove(s: DiscreteOperation, c: DiscreteOperation) -> TransformResult {
    let (s_index, c_index) = indices(&s, &c)?;

    if s_index <= c_index {
        Ok((s, c.with_shifted_index(1)))
    } else {
        Ok((s.with_shifted_index(-1), c))
    }
}

pub(super) fn insert_replace(s: DiscreteOperation, c: DiscreteOperation) -> TransformResult {
    let (s_index, c_index) = indices(&s, &c)?;

    if s_index <= c_index {
        Ok((s, c.with_shifted_index(1)))
    } else {
        Ok((s, c))
    }
}

pub(super) fn insert_move(s: DiscreteOperation, c: DiscreteOperation) -> TransformResult {
    insert_against_move(s, c)
}

pub(super) fn remove_insert(s: DiscreteOperation, c: DiscreteOperation) -> TransformResult {
    let (s_index, c_index) = indices(&s, &c)?;

    if s_index < c_index {
        Ok((s, c.with_shifted_index(-1)))
    } else {
        Ok((s.with_shifted_index(1), c))
    }
}

pub(super) fn remove_remove(s: DiscreteOperation, c: DiscreteOperation) -> TransformResult {
    let (s_index, c_index) = indices(&s, &c)?;

    match s_index.cmp(&c_index) {
        std::cmp::Ordering::Less => Ok((s, c.with_shifted_index(-1))),
        std::cmp::Ordering::Equal => both_no_op(s, c),
        std::cmp::Ordering::Greater => Ok((s.with_shifted_index(-1), c)),
    }
}

pub(super) fn remove_replace(s: DiscreteOperation, c: DiscreteOperation) -> TransformResult {
    let (s_index, c_index) = indices(&s, &c)?;

    match s_index.cmp(&c_index) {
        std::cmp::Ordering::Less => Ok((s, c.with_shifted_index(-1))),
        std::cmp::Ordering::Equal => Ok((s.with_no_op(), replacement_as_insert(c))),
        std::cmp::Ordering::Greater => Ok((s, c)),
    }
}

pub(super) fn remove_move(s: DiscreteOperation, c: DiscreteOperation) -> TransformResult {
    remove_against_move(s, c)
}

pub(super) fn replace_insert(s: DiscreteOperation, c: DiscreteOperation) -> TransformResult {
    let (s_index, c_index) = indices(&s, &c)?;

    if s_index < c_index {
        Ok((s, c))
    } else {
        Ok((s.with_shifted_index(1), c))
    }
}

pub(super) fn replace_remove(s: DiscreteOperation, c: DiscreteOperation) -> TransformResult {
    let (s_index, c_index) = indices(&s, &c)?;

    match s_index.cmp(&c_index) {
        std::cmp::Ordering::Less => Ok((s, c)),
        std::cmp::Ordering::Equal => Ok((replacement_as_insert(s), c.with_no_op())),
        std::cmp::Ordering::Greater => Ok((s.with_shifted_index(-1), c)),
    }
}

pub(super) fn replace_replace(s: DiscreteOperation, c: DiscreteOperation) -> TransformResult {
    let (s_index, c_index) = indices(&s, &c)?;

    if s_index == c_index {
        resolve_value_clash(s, c)
    } else {
        Ok((s, c))
    }
}

pub(super) fn replace_move(s: DiscreteOperation, c: DiscreteOperation) -> TransformResult {
    replace_against_move(s, c)
}

pub(super) fn move_insert(s: DiscreteOperation, c: DiscreteOperation) -> TransformResult {
    let (c, s) = insert_against_move(c, s)?;
    Ok((s, c))
}

pub(super) fn move_remove(s: DiscreteOperation, c: DiscreteOperation) -> TransformResult {
    let (c, s) = remove_against_move(c, s)?;
    Ok((s, c))
}

pub(super) fn move_replace(s: DiscreteOperation, c: DiscreteOperation) -> TransformResult {
    let (c, s) = replace_against_move(c, s)?;
    Ok((s, c))
}

/// Both moves are expressed as "take the element out, then put it into a
/// gap between the remaining elements". Moving the same element is decided
/// in favour of the server. Otherwise each move keeps its gap among the
/// elements neither of them touched, and when both elements end up in the
/// same gap, they are ordered the way the server placed them.
pub(super) fn move_move(s: DiscreteOperation, c: DiscreteOperation) -> TransformResult {
    let ((s_from, s_to), (c_from, c_to)) = s
        .move_indices()
        .zip(c.move_indices())
        .ok_or_else(|| unknown_pair(&s, &c))?;

    if s_from == c_from {
        if s_to == c_to {
            return both_no_op(s, c);
        }

        debug!("{c} moves the same element as {s}");
        return Ok((s.with_move(c_to, s_to), c.with_no_op()));
    }

    // Positions of each moved element once the other one has been taken out.
    let c_from_without_s = c_from - usize::from(c_from > s_from);
    let s_from_without_c = s_from - usize::from(s_from > c_from);

    // Gaps among the elements that neither operation moves.
    let s_gap = s_to - usize::from(c_from_without_s < s_to);
    let c_gap = c_to - usize::from(s_from_without_c < c_to);

    // Where each element is right before the transformed move is applied.
    let s_source = s_from_without_c + usize::from(s_from_without_c >= c_to);
    let c_source = c_from_without_s + usize::from(c_from_without_s >= s_to);

    let server_first = s_gap < c_gap || (s_gap == c_gap && s_to <= c_from_without_s);
    let (s_target, c_target) = if server_first {
        (s_gap, c_gap + 1)
    } else {
        (s_gap + 1, c_gap)
    };

    Ok((
        s.with_move(s_source, s_target),
        c.with_move(c_source, c_target),
    ))
}

/// Transforms an insert and a concurrent move of the same array against each
/// other, returning `(insert', move')`. The result doesn't depend on which of
/// them is the server operand.
fn insert_against_move(
    insert: DiscreteOperation,
    array_move: DiscreteOperation,
) -> TransformResult {
    let (index, (from, to)) = insert
        .index()
        .zip(array_move.move_indices())
        .ok_or_else(|| unknown_pair(&insert, &array_move))?;

    let result = match (
        move_direction(from, to),
        move_range_index_relationship(from, to, index),
    ) {
        (MoveDirection::Identity, _) if index <= from => {
            (insert, array_move.with_move(from + 1, to + 1))
        }
        (MoveDirection::Identity, _) => (insert, array_move),

        (_, RangeIndexRelationship::Before | RangeIndexRelationship::Start) => {
            (insert, array_move.with_move(from + 1, to + 1))
        }
        (_, RangeIndexRelationship::After) => (insert, array_move),

        (MoveDirection::Forward, RangeIndexRelationship::Within | RangeIndexRelationship::End) => {
            (insert.with_index(index - 1), array_move.with_move(from, to + 1))
        }
        (MoveDirection::Backward, RangeIndexRelationship::Within | RangeIndexRelationship::End) => {
            (insert.with_index(index + 1), array_move.with_move(from + 1, to))
        }
    };

    Ok(result)
}

/// Transforms a remove and a concurrent move of the same array against each
/// other, returning `(remove', move')`. Removing the moved element wins over
/// the move.
fn remove_against_move(
    remove: DiscreteOperation,
    array_move: DiscreteOperation,
) -> TransformResult {
    let (index, (from, to)) = remove
        .index()
        .zip(array_move.move_indices())
        .ok_or_else(|| unknown_pair(&remove, &array_move))?;

    if index == from {
        debug!("{array_move} moves the element removed by {remove}");
        return Ok((remove.with_index(to), array_move.with_no_op()));
    }

    let result = match (
        move_direction(from, to),
        move_range_index_relationship(from, to, index),
    ) {
        (_, RangeIndexRelationship::Before) => (remove, array_move.with_move(from - 1, to - 1)),
        (MoveDirection::Forward, RangeIndexRelationship::Within | RangeIndexRelationship::End) => {
            (remove.with_index(index - 1), array_move.with_move(from, to - 1))
        }
        (
            MoveDirection::Backward,
            RangeIndexRelationship::Start | RangeIndexRelationship::Within,
        ) => (remove.with_index(index + 1), array_move.with_move(from - 1, to)),

        // Everything else is either after the moved span or the moved element
        // itself, which has been handled above.
        _ => (remove, array_move),
    };

    Ok(result)
}

/// Transforms a replace and a concurrent move of the same array against each
/// other, returning `(replace', move')`. The replace follows its element; the
/// move is never affected.
fn replace_against_move(
    replace: DiscreteOperation,
    array_move: DiscreteOperation,
) -> TransformResult {
    let (index, (from, to)) = replace
        .index()
        .zip(array_move.move_indices())
        .ok_or_else(|| unknown_pair(&replace, &array_move))?;

    Ok((replace.with_index(index_after_move(from, to, index)), array_move))
}

/// The element a replace targets has been removed concurrently, so the
/// replacement value is inserted at its place instead.
fn replacement_as_insert(replace: DiscreteOperation) -> DiscreteOperation {
    let edit = match replace.edit() {
        Edit::ArrayReplace { index, value } => Edit::ArrayInsert {
            index: *index,
            value: value.clone(),
        },
        other => other.clone(),
    };

    debug!("{replace} turns into an insert because its element has been removed");
    replace.with_edit(edit)
}

pub(super) fn set_overwrites(s: DiscreteOperation, c: DiscreteOperation) -> TransformResult {
    server_wins(s, c)
}

pub(super) fn overwritten_by_set(s: DiscreteOperation, c: DiscreteOperation) -> TransformResult {
    client_wins(s, c)
}

pub(super) fn set_set(s: DiscreteOperation, c: DiscreteOperation) -> TransformResult {
    resolve_value_clash(s, c)
}
