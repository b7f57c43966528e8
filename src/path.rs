mod path_element;

use std::fmt::Display;

pub use path_element::PathElement;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Address of a location in a hierarchical document: a sequence of array
/// indices and object keys, starting from the document root.
///
/// Any two paths are in exactly one [`PathRelationship`]; the transformer
/// relies on this to pick a single way of reconciling two operations.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Path(Vec<PathElement>);

/// How a path relates to another one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathRelationship {
    /// The paths are element-wise equal.
    Equal,
    /// The path is a strict prefix of the other path.
    Ancestor,
    /// The other path is a strict prefix of the path.
    Descendant,
    /// Neither path is a prefix of the other.
    Unrelated,
}

/// Creates a [`Path`] from a list of indices and keys.
///
/// ```
/// use realtime_ot::{Path, PathElement, path};
///
/// assert_eq!(
///     path![2, "name"],
///     Path::new(vec![PathElement::Index(2), PathElement::from("name")])
/// );
/// assert_eq!(path![], Path::root());
/// ```
#[macro_export]
macro_rules! path {
    () => { $crate::Path::root() };
    ($($element:expr),+ $(,)?) => {
        $crate::Path::new(vec![$($crate::PathElement::from($element)),+])
    };
}

impl Path {
    #[must_use]
    pub fn new(elements: Vec<PathElement>) -> Self { Self(elements) }

    /// The path of the document root.
    #[must_use]
    pub fn root() -> Self { Self(Vec::new()) }

    #[must_use]
    pub fn elements(&self) -> &[PathElement] { &self.0 }

    #[must_use]
    pub fn len(&self) -> usize { self.0.len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    #[must_use]
    pub fn get(&self, depth: usize) -> Option<&PathElement> { self.0.get(depth) }

    /// Returns a new path pointing to `element` inside of the location
    /// addressed by `self`.
    #[must_use]
    pub fn child(&self, element: impl Into<PathElement>) -> Self {
        let mut elements = self.0.clone();
        elements.push(element.into());
        Self(elements)
    }

    /// Returns a copy of the path with the element at `depth` replaced.
    /// Returns `None` if the path is not deeper than `depth`.
    #[must_use]
    pub fn with_element_at(&self, depth: usize, element: PathElement) -> Option<Self> {
        if depth >= self.0.len() {
            return None;
        }

        let mut elements = self.0.clone();
        elements[depth] = element;
        Some(Self(elements))
    }

    /// True iff `self` is a strict prefix of `other`.
    #[must_use]
    pub fn is_ancestor_of(&self, other: &Path) -> bool {
        self.0.len() < other.0.len() && other.0.starts_with(&self.0)
    }

    #[must_use]
    pub fn relationship_to(&self, other: &Path) -> PathRelationship {
        if are_equal(self, other) {
            PathRelationship::Equal
        } else if self.is_ancestor_of(other) {
            PathRelationship::Ancestor
        } else if other.is_ancestor_of(self) {
            PathRelationship::Descendant
        } else {
            PathRelationship::Unrelated
        }
    }
}

/// Element-wise equality of two paths.
#[must_use]
pub fn are_equal(a: &Path, b: &Path) -> bool { a.0 == b.0 }

/// True iff `a` is a strict prefix of `b`.
#[must_use]
pub fn is_ancestor_of(a: &Path, b: &Path) -> bool { a.is_ancestor_of(b) }

impl Display for Path {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        for (i, element) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{element}")?;
        }
        write!(f, "]")
    }
}

impl From<Vec<PathElement>> for Path {
    fn from(elements: Vec<PathElement>) -> Self { Self(elements) }
}

impl FromIterator<PathElement> for Path {
    fn from_iter<I: IntoIterator<Item = PathElement>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
