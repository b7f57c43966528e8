mod compound_operation;
mod discrete_operation;
mod edit;
mod operation_kind;

use std::fmt::Display;

pub use compound_operation::CompoundOperation;
pub use discrete_operation::DiscreteOperation;
pub use edit::Edit;
pub use operation_kind::OperationKind;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Either a single edit or an atomic group of edits. This is the unit that
/// gets transformed, exchanged between replicas and applied.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    Compound(CompoundOperation),
    Discrete(DiscreteOperation),
}

impl Operation {
    /// True if the operation has no effect when applied. A compound is
    /// inert when all of its members are.
    #[must_use]
    pub fn is_no_op(&self) -> bool {
        match self {
            Operation::Discrete(operation) => operation.is_no_op(),
            Operation::Compound(compound) => {
                compound.operations().iter().all(DiscreteOperation::is_no_op)
            }
        }
    }

    #[must_use]
    pub fn as_discrete(&self) -> Option<&DiscreteOperation> {
        match self {
            Operation::Discrete(operation) => Some(operation),
            Operation::Compound(_) => None,
        }
    }

    #[must_use]
    pub fn as_compound(&self) -> Option<&CompoundOperation> {
        match self {
            Operation::Discrete(_) => None,
            Operation::Compound(compound) => Some(compound),
        }
    }
}

impl From<DiscreteOperation> for Operation {
    fn from(operation: DiscreteOperation) -> Self { Operation::Discrete(operation) }
}

impl From<CompoundOperation> for Operation {
    fn from(compound: CompoundOperation) -> Self { Operation::Compound(compound) }
}

impl Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Discrete(operation) => write!(f, "{operation}"),
            Operation::Compound(compound) => write!(f, "{compound}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{Path, path};

    #[test]
    fn test_compound_no_op() {
        let compound = CompoundOperation::new(vec![
            DiscreteOperation::array_remove(Path::root(), 0).with_no_op(),
            DiscreteOperation::array_insert(Path::root(), 1, 3),
        ]);
        assert!(!Operation::from(compound.clone()).is_no_op());

        let compound: CompoundOperation = compound
            .into_operations()
            .into_iter()
            .map(DiscreteOperation::with_no_op)
            .collect();
        assert!(Operation::from(compound).is_no_op());
    }

    #[test]
    fn test_display() {
        let compound = CompoundOperation::new(vec![
            DiscreteOperation::array_remove(path!["list"], 0),
            DiscreteOperation::array_insert(path!["list"], 2, true),
        ]);

        insta::assert_snapshot!(
            Operation::from(compound).to_string(),
            @r#"Compound[ArrayRemove(index: 0) at ["list"]; ArrayInsert(index: 2, value: true) at ["list"]]"#
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_untagged_wire_format() {
        let operation: Operation = serde_json::from_str(
            r#"{"operations": [
                {"type": "StringInsert", "path": ["title"], "index": 0, "text": "a"},
                {"type": "BooleanSet", "path": ["done"], "noOp": true, "value": false}
            ]}"#,
        )
        .unwrap();

        assert_eq!(
            operation,
            Operation::Compound(CompoundOperation::new(vec![
                DiscreteOperation::string_insert(path!["title"], 0, "a"),
                DiscreteOperation::boolean_set(path!["done"], false).with_no_op(),
            ]))
        );

        let operation: Operation =
            serde_json::from_str(r#"{"type": "NumberSet", "path": [], "value": 5}"#).unwrap();
        assert_eq!(operation, DiscreteOperation::number_set(Path::root(), 5.0).into());
    }
}
