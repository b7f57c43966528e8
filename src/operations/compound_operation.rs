use std::fmt::Display;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::DiscreteOperation;

/// An ordered group of discrete operations that are transformed and applied
/// as a single atomic unit. Each operation sees the document as left by the
/// operations before it.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CompoundOperation {
    operations: Vec<DiscreteOperation>,
}

impl CompoundOperation {
    #[must_use]
    pub fn new(operations: Vec<DiscreteOperation>) -> Self { Self { operations } }

    #[must_use]
    pub fn operations(&self) -> &[DiscreteOperation] { &self.operations }

    #[must_use]
    pub fn into_operations(self) -> Vec<DiscreteOperation> { self.operations }

    #[must_use]
    pub fn len(&self) -> usize { self.operations.len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.operations.is_empty() }
}

impl FromIterator<DiscreteOperation> for CompoundOperation {
    fn from_iter<I: IntoIterator<Item = DiscreteOperation>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl Display for CompoundOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Compound[")?;
        for (i, operation) in self.operations.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{operation}")?;
        }
        write!(f, "]")
    }
}
