use std::fmt::Display;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The tag of a discrete operation, used as the key of the transformation
/// function tables.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OperationKind {
    ArrayInsert,
    ArrayRemove,
    ArrayReplace,
    ArrayMove,
    ArraySet,
    ObjectAddProperty,
    ObjectRemoveProperty,
    ObjectSetProperty,
    ObjectSet,
    StringInsert,
    StringRemove,
    StringSet,
    NumberAdd,
    NumberSet,
    BooleanSet,
}

impl OperationKind {
    pub const ALL: [OperationKind; 15] = [
        OperationKind::ArrayInsert,
        OperationKind::ArrayRemove,
        OperationKind::ArrayReplace,
        OperationKind::ArrayMove,
        OperationKind::ArraySet,
        OperationKind::ObjectAddProperty,
        OperationKind::ObjectRemoveProperty,
        OperationKind::ObjectSetProperty,
        OperationKind::ObjectSet,
        OperationKind::StringInsert,
        OperationKind::StringRemove,
        OperationKind::StringSet,
        OperationKind::NumberAdd,
        OperationKind::NumberSet,
        OperationKind::BooleanSet,
    ];

    /// Name of the kind as it appears on the wire.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            OperationKind::ArrayInsert => "ArrayInsert",
            OperationKind::ArrayRemove => "ArrayRemove",
            OperationKind::ArrayReplace => "ArrayReplace",
            OperationKind::ArrayMove => "ArrayMove",
            OperationKind::ArraySet => "ArraySet",
            OperationKind::ObjectAddProperty => "ObjectAddProperty",
            OperationKind::ObjectRemoveProperty => "ObjectRemoveProperty",
            OperationKind::ObjectSetProperty => "ObjectSetProperty",
            OperationKind::ObjectSet => "ObjectSet",
            OperationKind::StringInsert => "StringInsert",
            OperationKind::StringRemove => "StringRemove",
            OperationKind::StringSet => "StringSet",
            OperationKind::NumberAdd => "NumberAdd",
            OperationKind::NumberSet => "NumberSet",
            OperationKind::BooleanSet => "BooleanSet",
        }
    }

    /// The JSON type of the value the kind edits.
    #[must_use]
    pub fn target_type(self) -> &'static str {
        match self {
            OperationKind::ArrayInsert
            | OperationKind::ArrayRemove
            | OperationKind::ArrayReplace
            | OperationKind::ArrayMove
            | OperationKind::ArraySet => "array",
            OperationKind::ObjectAddProperty
            | OperationKind::ObjectRemoveProperty
            | OperationKind::ObjectSetProperty
            | OperationKind::ObjectSet => "object",
            OperationKind::StringInsert
            | OperationKind::StringRemove
            | OperationKind::StringSet => "string",
            OperationKind::NumberAdd | OperationKind::NumberSet => "number",
            OperationKind::BooleanSet => "boolean",
        }
    }
}

impl Display for OperationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
