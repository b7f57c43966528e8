//! Transformation functions for pairs of object operations targeting the same
//! object. Property operations on different keys commute.

use log::debug;

use super::{
    TransformResult,
    conflict_resolution::{
        both_no_op, client_wins, illegal_concurrent_edit, resolve_value_clash, server_wins,
        unknown_pair,
    },
};
use crate::{DiscreteOperation, Edit, TransformError};

fn same_key(s: &DiscreteOperation, c: &DiscreteOperation) -> Result<bool, TransformError> {
    s.key()
        .zip(c.key())
        .map(|(s_key, c_key)| s_key == c_key)
        .ok_or_else(|| unknown_pair(s, c))
}

/// Rewrites a property operation carrying a value to an upsert.
fn into_set_property(operation: DiscreteOperation) -> DiscreteOperation {
    let edit = match operation.edit() {
        Edit::ObjectAddProperty { key, value } | Edit::ObjectSetProperty { key, value } => {
            Edit::ObjectSetProperty {
                key: key.clone(),
                value: value.clone(),
            }
        }
        edit => edit.clone(),
    };

    debug!("{operation} turns into a property upsert");
    operation.with_edit(edit)
}

/// Rewrites a property operation carrying a value to an insertion of a new
/// property.
fn into_add_property(operation: DiscreteOperation) -> DiscreteOperation {
    let edit = match operation.edit() {
        Edit::ObjectAddProperty { key, value } | Edit::ObjectSetProperty { key, value } => {
            Edit::ObjectAddProperty {
                key: key.clone(),
                value: value.clone(),
            }
        }
        edit => edit.clone(),
    };

    debug!("{operation} turns into a property insertion");
    operation.with_edit(edit)
}

/// Both sides created the same property. If the values differ, the server's
/// value overwrites the one already applied by the client.
pub(super) fn add_add(s: DiscreteOperation, c: DiscreteOperation) -> TransformResult {
    if !same_key(&s, &c)? {
        return Ok((s, c));
    }

    if s.value() == c.value() {
        both_no_op(s, c)
    } else {
        server_wins(into_set_property(s), c)
    }
}

pub(super) fn add_remove(s: DiscreteOperation, c: DiscreteOperation) -> TransformResult {
    if same_key(&s, &c)? {
        Err(illegal_concurrent_edit(&s, &c))
    } else {
        Ok((s, c))
    }
}

pub(super) fn add_set_property(s: DiscreteOperation, c: DiscreteOperation) -> TransformResult {
    add_add(s, c)
}

pub(super) fn remove_add(s: DiscreteOperation, c: DiscreteOperation) -> TransformResult {
    if same_key(&s, &c)? {
        Err(illegal_concurrent_edit(&s, &c))
    } else {
        Ok((s, c))
    }
}

pub(super) fn remove_remove(s: DiscreteOperation, c: DiscreteOperation) -> TransformResult {
    if same_key(&s, &c)? {
        both_no_op(s, c)
    } else {
        Ok((s, c))
    }
}

/// The client's value is kept: the property is recreated on the server.
pub(super) fn remove_set_property(s: DiscreteOperation, c: DiscreteOperation) -> TransformResult {
    if same_key(&s, &c)? {
        client_wins(s, into_add_property(c))
    } else {
        Ok((s, c))
    }
}

pub(super) fn set_property_add(s: DiscreteOperation, c: DiscreteOperation) -> TransformResult {
    if !same_key(&s, &c)? {
        return Ok((s, c));
    }

    if s.value() == c.value() {
        both_no_op(s, c)
    } else {
        server_wins(s, c)
    }
}

/// The server's value is kept: the property is recreated on the client.
pub(super) fn set_property_remove(s: DiscreteOperation, c: DiscreteOperation) -> TransformResult {
    if same_key(&s, &c)? {
        server_wins(into_add_property(s), c)
    } else {
        Ok((s, c))
    }
}

pub(super) fn set_property_set_property(
    s: DiscreteOperation,
    c: DiscreteOperation,
) -> TransformResult {
    if same_key(&s, &c)? {
        resolve_value_clash(s, c)
    } else {
        Ok((s, c))
    }
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
