//! Path transformation functions: an operation changing the shape of a
//! collection rewrites the paths of concurrent operations targeting the
//! collection's descendants.

use log::debug;

use super::conflict_resolution::illegal_concurrent_edit;
use crate::{
    DiscreteOperation, Path, PathElement, TransformError,
    utils::array_move_helper::index_after_move,
};

/// Effect of an ancestor operation on the path of a descendant operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathTransformation {
    /// The descendant still addresses the same location.
    NoTransformation,
    /// The descendant's location has moved to the given path.
    PathUpdated(Path),
    /// The descendant's location no longer exists, so the descendant must
    /// become a no-op.
    PathObsoleted,
}

pub(super) type PathTransformationResult = Result<PathTransformation, TransformError>;

/// The element of the descendant's path at the depth of the ancestor's
/// target, i.e. the child of the modified collection the descendant lives in.
fn segment<'a>(
    ancestor: &DiscreteOperation,
    descendant: &'a DiscreteOperation,
) -> Option<&'a PathElement> {
    descendant.path().get(ancestor.path().len())
}

/// Replaces the segment at the ancestor's depth with `index`, unless it
/// already is `index`.
fn update_index(
    ancestor: &DiscreteOperation,
    descendant: &DiscreteOperation,
    index: usize,
) -> PathTransformation {
    let depth = ancestor.path().len();

    if descendant.path().get(depth) == Some(&PathElement::Index(index)) {
        return PathTransformation::NoTransformation;
    }

    descendant
        .path()
        .with_element_at(depth, PathElement::Index(index))
        .map_or(PathTransformation::NoTransformation, PathTransformation::PathUpdated)
}

fn obsoleted(ancestor: &DiscreteOperation, descendant: &DiscreteOperation) -> PathTransformation {
    debug!("{descendant} targets a location discarded by {ancestor}");
    PathTransformation::PathObsoleted
}

pub(super) fn array_insert(
    ancestor: &DiscreteOperation,
    descendant: &DiscreteOperation,
) -> PathTransformationResult {
    let (Some(index), Some(PathElement::Index(segment))) =
        (ancestor.index(), segment(ancestor, descendant))
    else {
        return Ok(PathTransformation::NoTransformation);
    };

    if *segment >= index {
        Ok(update_index(ancestor, descendant, segment + 1))
    } else {
        Ok(PathTransformation::NoTransformation)
    }
}

pub(super) fn array_remove(
    ancestor: &DiscreteOperation,
    descendant: &DiscreteOperation,
) -> PathTransformationResult {
    let (Some(index), Some(PathElement::Index(segment))) =
        (ancestor.index(), segment(ancestor, descendant))
    else {
        return Ok(PathTransformation::NoTransformation);
    };

    match segment.cmp(&index) {
        std::cmp::Ordering::Less => Ok(PathTransformation::NoTransformation),
        std::cmp::Ordering::Equal => Ok(obsoleted(ancestor, descendant)),
        std::cmp::Ordering::Greater => Ok(update_index(ancestor, descendant, segment - 1)),
    }
}

pub(super) fn array_replace(
    ancestor: &DiscreteOperation,
    descendant: &DiscreteOperation,
) -> PathTransformationResult {
    match (ancestor.index(), segment(ancestor, descendant)) {
        (Some(index), Some(PathElement::Index(segment))) if *segment == index => {
            Ok(obsoleted(ancestor, descendant))
        }
        _ => Ok(PathTransformation::NoTransformation),
    }
}

pub(super) fn array_move(
    ancestor: &DiscreteOperation,
    descendant: &DiscreteOperation,
) -> PathTransformationResult {
    let (Some((from_index, to_index)), Some(PathElement::Index(segment))) =
        (ancestor.move_indices(), segment(ancestor, descendant))
    else {
        return Ok(PathTransformation::NoTransformation);
    };

    Ok(update_index(
        ancestor,
        descendant,
        index_after_move(from_index, to_index, *segment),
    ))
}

/// Used for `ArraySet` and `ObjectSet`: the whole collection is discarded.
pub(super) fn collection_set(
    ancestor: &DiscreteOperation,
    descendant: &DiscreteOperation,
) -> PathTransformationResult {
    Ok(obsoleted(ancestor, descendant))
}

/// The property cannot have had descendants in the shared base state.
pub(super) fn object_add_property(
    ancestor: &DiscreteOperation,
    descendant: &DiscreteOperation,
) -> PathTransformationResult {
    match (ancestor.key(), segment(ancestor, descendant)) {
        (Some(key), Some(PathElement::Key(segment))) if segment == key => {
            Err(illegal_concurrent_edit(ancestor, descendant))
        }
        _ => Ok(PathTransformation::NoTransformation),
    }
}

/// Used for `ObjectRemoveProperty` and `ObjectSetProperty`: the property's
/// previous value is discarded.
pub(super) fn object_property_discarded(
    ancestor: &DiscreteOperation,
    descendant: &DiscreteOperation,
) -> PathTransformationResult {
    match (ancestor.key(), segment(ancestor, descendant)) {
        (Some(key), Some(PathElement::Key(segment))) if segment == key => {
            Ok(obsoleted(ancestor, descendant))
        }
        _ => Ok(PathTransformation::NoTransformation),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::{Map, json};
    use test_case::test_case;

    use super::*;
    use crate::{Operation, OperationKind, path, transform};

    fn edit_at(path: Path) -> DiscreteOperation { DiscreteOperation::string_insert(path, 0, "x") }

    #[test_case(DiscreteOperation::array_insert(path![], 1, "new"), path![2, "name"], PathTransformation::PathUpdated(path![3, "name"]); "insert before")]
    #[test_case(DiscreteOperation::array_insert(path![], 2, "new"), path![2, "name"], PathTransformation::PathUpdated(path![3, "name"]); "insert at")]
    #[test_case(DiscreteOperation::array_insert(path![], 3, "new"), path![2, "name"], PathTransformation::NoTransformation; "insert after")]
    #[test_case(DiscreteOperation::array_remove(path![], 1), path![2, "name"], PathTransformation::PathUpdated(path![1, "name"]); "remove before")]
    #[test_case(DiscreteOperation::array_remove(path![], 2), path![2, "name"], PathTransformation::PathObsoleted; "remove at")]
    #[test_case(DiscreteOperation::array_remove(path![], 3), path![2, "name"], PathTransformation::NoTransformation; "remove after")]
    #[test_case(DiscreteOperation::array_replace(path![], 2, 0), path![2, "name"], PathTransformation::PathObsoleted; "replace at")]
    #[test_case(DiscreteOperation::array_replace(path![], 1, 0), path![2, "name"], PathTransformation::NoTransformation; "replace elsewhere")]
    #[test_case(DiscreteOperation::array_move(path![], 2, 0), path![2, "name"], PathTransformation::PathUpdated(path![0, "name"]); "moved element")]
    #[test_case(DiscreteOperation::array_move(path![], 0, 3), path![2, "name"], PathTransformation::PathUpdated(path![1, "name"]); "forward move over")]
    #[test_case(DiscreteOperation::array_move(path![], 3, 1), path![2, "name"], PathTransformation::PathUpdated(path![3, "name"]); "backward move over")]
    #[test_case(DiscreteOperation::array_move(path![], 3, 4), path![2, "name"], PathTransformation::NoTransformation; "move elsewhere")]
    #[test_case(DiscreteOperation::array_set(path![], vec![]), path![2, "name"], PathTransformation::PathObsoleted; "array set")]
    #[test_case(DiscreteOperation::object_set(path![2], Map::new()), path![2, "name"], PathTransformation::PathObsoleted; "object set")]
    #[test_case(DiscreteOperation::object_set_property(path![2], "name", "v"), path![2, "name"], PathTransformation::PathObsoleted; "set property")]
    #[test_case(DiscreteOperation::object_remove_property(path![2], "name"), path![2, "name"], PathTransformation::PathObsoleted; "remove property")]
    #[test_case(DiscreteOperation::object_remove_property(path![2], "other"), path![2, "name"], PathTransformation::NoTransformation; "remove other property")]
    #[test_case(DiscreteOperation::object_add_property(path![2], "other", 1), path![2, "name"], PathTransformation::NoTransformation; "add other property")]
    #[test_case(DiscreteOperation::array_insert(path![], 0, "new"), path!["list", 0], PathTransformation::NoTransformation; "key segment under array")]
    #[test_case(DiscreteOperation::object_remove_property(path![], "0"), path![0, "name"], PathTransformation::NoTransformation; "index segment under object")]
    fn test_descendant_path(
        ancestor: DiscreteOperation,
        descendant_path: Path,
        expected: PathTransformation,
    ) {
        let descendant = edit_at(descendant_path);
        let transformation = match ancestor.kind() {
            OperationKind::ArrayInsert => array_insert(&ancestor, &descendant),
            OperationKind::ArrayRemove => array_remove(&ancestor, &descendant),
            OperationKind::ArrayReplace => array_replace(&ancestor, &descendant),
            OperationKind::ArrayMove => array_move(&ancestor, &descendant),
            OperationKind::ObjectAddProperty => object_add_property(&ancestor, &descendant),
            OperationKind::ObjectRemoveProperty | OperationKind::ObjectSetProperty => {
                object_property_discarded(&ancestor, &descendant)
            }
            _ => collection_set(&ancestor, &descendant),
        };

        assert_eq!(transformation, Ok(expected));
    }

    #[test]
    fn test_added_property_cannot_have_concurrent_descendants() {
        let ancestor = DiscreteOperation::object_add_property(path![], "name", json!({}));
        let descendant = DiscreteOperation::object_set_property(path!["name"], "first", 1);

        assert_eq!(
            object_add_property(&ancestor, &descendant),
            Err(TransformError::IllegalConcurrentEdit {
                server: OperationKind::ObjectAddProperty,
                client: OperationKind::ObjectSetProperty,
                path: path![],
            })
        );
    }

    #[test]
    fn test_insert_shifts_client_descendant() {
        let s = DiscreteOperation::array_insert(path![], 1, json!({ "name": "" }));
        let c = DiscreteOperation::string_insert(path![2, "name"], 0, "Bob");

        assert_eq!(
            transform(s.clone().into(), c.into()).unwrap(),
            (
                Operation::from(s),
                Operation::from(DiscreteOperation::string_insert(path![3, "name"], 0, "Bob"))
            )
        );
    }

    #[test]
    fn test_remove_obsoletes_server_descendant() {
        let s = DiscreteOperation::string_insert(path![2, "name"], 0, "Bob");
        let c = DiscreteOperation::array_remove(path![], 2);

        assert_eq!(
            transform(s.clone().into(), c.clone().into()).unwrap(),
            (Operation::from(s.with_no_op()), Operation::from(c))
        );
    }
}
