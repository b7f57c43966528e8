//! Operational Transformation for concurrently edited JSON-like documents.
//!
//! Two replicas that applied different operations to the same document state
//! exchange their operations and [`transform`] them against each other, after
//! which applying the transformed remote operation brings both replicas to
//! the same state.

mod document;
mod errors;
mod operation_transformation;
mod operations;
mod path;
mod utils;

pub use document::apply;
pub use errors::{ApplyError, RegistrationKey, TransformError};
pub use operation_transformation::{
    OperationTransformationFunction, OperationTransformer, PathTransformation,
    PathTransformationFunction, TransformationFunctionRegistry,
    TransformationFunctionRegistryBuilder, transform,
};
pub use operations::{CompoundOperation, DiscreteOperation, Edit, Operation, OperationKind};
pub use path::{Path, PathElement, PathRelationship, are_equal, is_ancestor_of};

#[cfg(feature = "wasm")]
pub mod wasm;
