use log::{debug, warn};

use super::TransformResult;
use crate::{DiscreteOperation, TransformError};

/// The server operand overwrote the value the client operand edits.
pub(super) fn server_wins(s: DiscreteOperation, c: DiscreteOperation) -> TransformResult {
    debug!("{c} is overwritten by {s}");
    Ok((s, c.with_no_op()))
}

/// The client operand overwrites the value the server operand edited.
pub(super) fn client_wins(s: DiscreteOperation, c: DiscreteOperation) -> TransformResult {
    debug!("{s} is overwritten by {c}");
    Ok((s.with_no_op(), c))
}

pub(super) fn both_no_op(s: DiscreteOperation, c: DiscreteOperation) -> TransformResult {
    debug!("{s} and {c} have the same effect");
    Ok((s.with_no_op(), c.with_no_op()))
}

/// Two operations writing the same location: equal effects have already
/// converged, otherwise the server's value is kept on every replica.
pub(super) fn resolve_value_clash(s: DiscreteOperation, c: DiscreteOperation) -> TransformResult {
    if s.edit() == c.edit() {
        both_no_op(s, c)
    } else {
        server_wins(s, c)
    }
}

pub(super) fn unknown_pair(s: &DiscreteOperation, c: &DiscreteOperation) -> TransformError {
    TransformError::UnknownOperationPair {
        server: s.kind(),
        client: c.kind(),
    }
}

pub(super) fn illegal_concurrent_edit(
    s: &DiscreteOperation,
    c: &DiscreteOperation,
) -> TransformError {
    warn!("{s} and {c} cannot be concurrent");

    TransformError::IllegalConcurrentEdit {
        server: s.kind(),
        client: c.kind(),
        path: s.path().clone(),
    }
}

/// Indices of two index-addressed operations.
pub(super) fn indices(
    s: &DiscreteOperation,
    c: &DiscreteOperation,
) -> Result<(usize, usize), TransformError> {
    s.index()
        .zip(c.index())
        .ok_or_else(|| unknown_pair(s, c))
}
