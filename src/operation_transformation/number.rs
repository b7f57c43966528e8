use super::{
    TransformResult,
    conflict_resolution::{client_wins, resolve_value_clash, server_wins},
};
use crate::DiscreteOperation;

/// Additions commute.
pub(super) fn add_add(s: DiscreteOperation, c: DiscreteOperation) -> TransformResult { Ok((s, c)) }

pub(super) fn add_set(s: DiscreteOperation, c: DiscreteOperation) -> TransformResult {
    client_wins(s, c)
}

pub(super) fn set_add(s: DiscreteOperation, c: DiscreteOperation) -> TransformResult {
    server_wins(s, c)
}

pub(super) fn set_set(s: DiscreteOperation, c: DiscreteOperation) -> TransformResult {
    resolve_value_clash(s, c)
}
