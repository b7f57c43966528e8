use std::{borrow::Cow, fmt::Display};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A single step of a [`Path`](crate::Path): either an index into an array
/// (or a string) or the key of an object property.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathElement {
    Index(usize),
    Key(String),
}

impl PathElement {
    #[must_use]
    pub fn as_index(&self) -> Option<usize> {
        match self {
            PathElement::Index(index) => Some(*index),
            PathElement::Key(_) => None,
        }
    }

    #[must_use]
    pub fn as_key(&self) -> Option<&str> {
        match self {
            PathElement::Index(_) => None,
            PathElement::Key(key) => Some(key),
        }
    }
}

impl Display for PathElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathElement::Index(index) => write!(f, "{index}"),
            PathElement::Key(key) => write!(f, "{key:?}"),
        }
    }
}

impl From<usize> for PathElement {
    fn from(value: usize) -> Self { PathElement::Index(value) }
}

impl From<String> for PathElement {
    fn from(value: String) -> Self { PathElement::Key(value) }
}

impl From<&str> for PathElement {
    fn from(value: &str) -> Self { PathElement::Key(value.to_owned()) }
}

impl<'a> From<Cow<'a, str>> for PathElement {
    fn from(value: Cow<'a, str>) -> Self { PathElement::Key(value.into_owned()) }
}
