use std::fmt::Display;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{Edit, OperationKind, Path};

/// A single edit targeting one location of a document.
///
/// Operations are never mutated: transforming one produces a new value
/// through the `with_*` builders. An operation marked as no-op has been
/// neutralised by a concurrent operation; it's kept so that it can still be
/// acknowledged but it must not be applied.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct DiscreteOperation {
    path: Path,

    #[cfg_attr(feature = "serde", serde(rename = "noOp", default))]
    no_op: bool,

    #[cfg_attr(feature = "serde", serde(flatten))]
    edit: Edit,
}

impl DiscreteOperation {
    #[must_use]
    pub fn new(path: Path, edit: Edit) -> Self {
        Self {
            path,
            no_op: false,
            edit,
        }
    }

    #[must_use]
    pub fn array_insert(path: Path, index: usize, value: impl Into<Value>) -> Self {
        Self::new(
            path,
            Edit::ArrayInsert {
                index,
                value: value.into(),
            },
        )
    }

    #[must_use]
    pub fn array_remove(path: Path, index: usize) -> Self {
        Self::new(path, Edit::ArrayRemove { index })
    }

    #[must_use]
    pub fn array_replace(path: Path, index: usize, value: impl Into<Value>) -> Self {
        Self::new(
            path,
            Edit::ArrayReplace {
                index,
                value: value.into(),
            },
        )
    }

    #[must_use]
    pub fn array_move(path: Path, from_index: usize, to_index: usize) -> Self {
        Self::new(
            path,
            Edit::ArrayMove {
                from_index,
                to_index,
            },
        )
    }

    #[must_use]
    pub fn array_set(path: Path, value: Vec<Value>) -> Self {
        Self::new(path, Edit::ArraySet { value })
    }

    #[must_use]
    pub fn object_add_property(
        path: Path,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> Self {
        Self::new(
            path,
            Edit::ObjectAddProperty {
                key: key.into(),
                value: value.into(),
            },
        )
    }

    #[must_use]
    pub fn object_remove_property(path: Path, key: impl Into<String>) -> Self {
        Self::new(path, Edit::ObjectRemoveProperty { key: key.into() })
    }

    #[must_use]
    pub fn object_set_property(
        path: Path,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> Self {
        Self::new(
            path,
            Edit::ObjectSetProperty {
                key: key.into(),
                value: value.into(),
            },
        )
    }

    #[must_use]
    pub fn object_set(path: Path, value: Map<String, Value>) -> Self {
        Self::new(path, Edit::ObjectSet { value })
    }

    #[must_use]
    pub fn string_insert(path: Path, index: usize, text: impl Into<String>) -> Self {
        Self::new(
            path,
            Edit::StringInsert {
                index,
                text: text.into(),
            },
        )
    }

    #[must_use]
    pub fn string_remove(path: Path, index: usize, text: impl Into<String>) -> Self {
        Self::new(
            path,
            Edit::StringRemove {
                index,
                text: text.into(),
            },
        )
    }

    #[must_use]
    pub fn string_set(path: Path, text: impl Into<String>) -> Self {
        Self::new(path, Edit::StringSet { text: text.into() })
    }

    #[must_use]
    pub fn number_add(path: Path, delta: f64) -> Self { Self::new(path, Edit::NumberAdd { delta }) }

    #[must_use]
    pub fn number_set(path: Path, value: f64) -> Self { Self::new(path, Edit::NumberSet { value }) }

    #[must_use]
    pub fn boolean_set(path: Path, value: bool) -> Self {
        Self::new(path, Edit::BooleanSet { value })
    }

    #[must_use]
    pub fn path(&self) -> &Path { &self.path }

    #[must_use]
    pub fn is_no_op(&self) -> bool { self.no_op }

    #[must_use]
    pub fn edit(&self) -> &Edit { &self.edit }

    #[must_use]
    pub fn kind(&self) -> OperationKind { self.edit.kind() }

    /// The index of array and string inserts, removes and replaces.
    #[must_use]
    pub fn index(&self) -> Option<usize> {
        match &self.edit {
            Edit::ArrayInsert { index, .. }
            | Edit::ArrayRemove { index }
            | Edit::ArrayReplace { index, .. }
            | Edit::StringInsert { index, .. }
            | Edit::StringRemove { index, .. } => Some(*index),
            _ => None,
        }
    }

    /// The `(from_index, to_index)` pair of an array move.
    #[must_use]
    pub fn move_indices(&self) -> Option<(usize, usize)> {
        match &self.edit {
            Edit::ArrayMove {
                from_index,
                to_index,
            } => Some((*from_index, *to_index)),
            _ => None,
        }
    }

    /// The property key of object property operations.
    #[must_use]
    pub fn key(&self) -> Option<&str> {
        match &self.edit {
            Edit::ObjectAddProperty { key, .. }
            | Edit::ObjectRemoveProperty { key }
            | Edit::ObjectSetProperty { key, .. } => Some(key),
            _ => None,
        }
    }

    /// The single value carried by element and property operations.
    #[must_use]
    pub fn value(&self) -> Option<&Value> {
        match &self.edit {
            Edit::ArrayInsert { value, .. }
            | Edit::ArrayReplace { value, .. }
            | Edit::ObjectAddProperty { value, .. }
            | Edit::ObjectSetProperty { value, .. } => Some(value),
            _ => None,
        }
    }

    /// The text of string operations.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match &self.edit {
            Edit::StringInsert { text, .. }
            | Edit::StringRemove { text, .. }
            | Edit::StringSet { text } => Some(text),
            _ => None,
        }
    }

    /// Number of characters inserted or removed by a string operation.
    #[must_use]
    pub fn text_len(&self) -> usize { self.text().map_or(0, |text| text.chars().count()) }

    /// Creates a copy of the operation that must not be applied.
    #[must_use]
    pub fn with_no_op(self) -> Self {
        Self {
            no_op: true,
            ..self
        }
    }

    #[must_use]
    pub fn with_path(self, path: Path) -> Self { Self { path, ..self } }

    /// Creates a copy of the operation with a different effect at the same
    /// location. Used when a transform changes the kind of an operation, for
    /// instance when a replaced element has been concurrently removed and the
    /// replacement has to be inserted instead.
    #[must_use]
    pub fn with_edit(self, edit: Edit) -> Self { Self { edit, ..self } }

    /// Creates a copy of the operation with the given index. Operations
    /// without an index are returned as they are.
    #[must_use]
    pub fn with_index(self, index: usize) -> Self {
        debug_assert!(
            self.index().is_some(),
            "Cannot set the index of an operation without one: {self}"
        );

        let edit = match self.edit {
            Edit::ArrayInsert { value, .. } => Edit::ArrayInsert { index, value },
            Edit::ArrayRemove { .. } => Edit::ArrayRemove { index },
            Edit::ArrayReplace { value, .. } => Edit::ArrayReplace { index, value },
            Edit::StringInsert { text, .. } => Edit::StringInsert { index, text },
            Edit::StringRemove { text, .. } => Edit::StringRemove { index, text },
            edit => edit,
        };

        Self { edit, ..self }
    }

    /// Creates a copy of the operation with its index shifted by the given
    /// offset. The offset can be negative but the resulting index must be
    /// non-negative.
    ///
    /// # Panics
    ///
    /// In debug mode, panics if the resulting index is negative.
    #[must_use]
    pub fn with_shifted_index(self, offset: isize) -> Self {
        let index = self.index().unwrap_or_default();
        debug_assert!(
            index.checked_add_signed(offset).is_some(),
            "Shifted index must be non-negative"
        );

        self.with_index(index.saturating_add_signed(offset))
    }

    /// Creates a copy of a string operation with a different text.
    #[must_use]
    pub fn with_text(self, text: String) -> Self {
        debug_assert!(
            self.text().is_some(),
            "Cannot set the text of a non-string operation: {self}"
        );

        let edit = match self.edit {
            Edit::StringInsert { index, .. } => Edit::StringInsert { index, text },
            Edit::StringRemove { index, .. } => Edit::StringRemove { index, text },
            Edit::StringSet { .. } => Edit::StringSet { text },
            edit => edit,
        };

        Self { edit, ..self }
    }

    /// Creates a copy of an array move with different indices.
    #[must_use]
    pub fn with_move(self, from_index: usize, to_index: usize) -> Self {
        debug_assert!(
            self.move_indices().is_some(),
            "Cannot set the indices of a non-move operation: {self}"
        );

        match self.edit {
            Edit::ArrayMove { .. } => Self {
                edit: Edit::ArrayMove {
                    from_index,
                    to_index,
                },
                ..self
            },
            _ => self,
        }
    }
}

impl Display for DiscreteOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at {}", self.edit, self.path)?;

        if self.no_op {
            write!(f, " (noOp)")?;
        }

        Ok(())
    }
}
