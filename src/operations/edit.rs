use std::fmt::Display;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::OperationKind;

/// The effect of a discrete operation on the value addressed by its path.
///
/// Array and string indices are zero-based; string indices and lengths count
/// characters, not bytes.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(tag = "type", rename_all_fields = "camelCase")
)]
#[derive(Debug, Clone, PartialEq)]
pub enum Edit {
    ArrayInsert { index: usize, value: Value },
    ArrayRemove { index: usize },
    ArrayReplace { index: usize, value: Value },
    ArrayMove { from_index: usize, to_index: usize },
    ArraySet { value: Vec<Value> },

    ObjectAddProperty { key: String, value: Value },
    ObjectRemoveProperty { key: String },
    ObjectSetProperty { key: String, value: Value },
    ObjectSet { value: Map<String, Value> },

    StringInsert { index: usize, text: String },
    StringRemove { index: usize, text: String },
    StringSet { text: String },

    NumberAdd { delta: f64 },
    NumberSet { value: f64 },

    BooleanSet { value: bool },
}

impl Edit {
    #[must_use]
    pub fn kind(&self) -> OperationKind {
        match self {
            Edit::ArrayInsert { .. } => OperationKind::ArrayInsert,
            Edit::ArrayRemove { .. } => OperationKind::ArrayRemove,
            Edit::ArrayReplace { .. } => OperationKind::ArrayReplace,
            Edit::ArrayMove { .. } => OperationKind::ArrayMove,
            Edit::ArraySet { .. } => OperationKind::ArraySet,
            Edit::ObjectAddProperty { .. } => OperationKind::ObjectAddProperty,
            Edit::ObjectRemoveProperty { .. } => OperationKind::ObjectRemoveProperty,
            Edit::ObjectSetProperty { .. } => OperationKind::ObjectSetProperty,
            Edit::ObjectSet { .. } => OperationKind::ObjectSet,
            Edit::StringInsert { .. } => OperationKind::StringInsert,
            Edit::StringRemove { .. } => OperationKind::StringRemove,
            Edit::StringSet { .. } => OperationKind::StringSet,
            Edit::NumberAdd { .. } => OperationKind::NumberAdd,
            Edit::NumberSet { .. } => OperationKind::NumberSet,
            Edit::BooleanSet { .. } => OperationKind::BooleanSet,
        }
    }
}

impl Display for Edit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Edit::ArrayInsert { index, value } => {
                write!(f, "ArrayInsert(index: {index}, value: {value})")
            }
            Edit::ArrayRemove { index } => write!(f, "ArrayRemove(index: {index})"),
            Edit::ArrayReplace { index, value } => {
                write!(f, "ArrayReplace(index: {index}, value: {value})")
            }
            Edit::ArrayMove {
                from_index,
                to_index,
            } => write!(f, "ArrayMove(from: {from_index}, to: {to_index})"),
            Edit::ArraySet { value } => {
                write!(f, "ArraySet(value: {})", Value::Array(value.clone()))
            }
            Edit::ObjectAddProperty { key, value } => {
                write!(f, "ObjectAddProperty(key: {key:?}, value: {value})")
            }
            Edit::ObjectRemoveProperty { key } => write!(f, "ObjectRemoveProperty(key: {key:?})"),
            Edit::ObjectSetProperty { key, value } => {
                write!(f, "ObjectSetProperty(key: {key:?}, value: {value})")
            }
            Edit::ObjectSet { value } => {
                write!(f, "ObjectSet(value: {})", Value::Object(value.clone()))
            }
            Edit::StringInsert { index, text } => {
                write!(f, "StringInsert(index: {index}, text: {text:?})")
            }
            Edit::StringRemove { index, text } => {
                write!(f, "StringRemove(index: {index}, text: {text:?})")
            }
            Edit::StringSet { text } => write!(f, "StringSet(text: {text:?})"),
            Edit::NumberAdd { delta } => write!(f, "NumberAdd(delta: {delta})"),
            Edit::NumberSet { value } => write!(f, "NumberSet(value: {value})"),
            Edit::BooleanSet { value } => write!(f, "BooleanSet(value: {value})"),
        }
    }
}
