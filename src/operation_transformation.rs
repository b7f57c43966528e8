mod array;
mod boolean;
mod conflict_resolution;
mod number;
mod object;
mod path_transformation;
mod registry;
mod string;

use std::sync::LazyLock;

use log::trace;
pub use path_transformation::PathTransformation;
pub use registry::{
    OperationTransformationFunction, PathTransformationFunction, TransformationFunctionRegistry,
    TransformationFunctionRegistryBuilder,
};

use crate::{CompoundOperation, DiscreteOperation, Operation, PathRelationship, TransformError};

pub(crate) type TransformResult = Result<(DiscreteOperation, DiscreteOperation), TransformError>;

static STANDARD_REGISTRY: LazyLock<Result<TransformationFunctionRegistry, TransformError>> =
    LazyLock::new(TransformationFunctionRegistry::new);

/// Given a `server` operation and a `client` operation created concurrently
/// against the same document state, return `(server', client')` such that
/// applying `server` then `client'` results in the same document as applying
/// `client` then `server'`.
///
/// Conflicting edits are resolved deterministically, mostly in favour of the
/// server. The losing operation is kept but marked as no-op.
///
/// ```
/// use realtime_ot::{DiscreteOperation, Operation, Path, transform};
///
/// let server = DiscreteOperation::array_insert(Path::root(), 2, "x");
/// let client = DiscreteOperation::array_insert(Path::root(), 2, "y");
///
/// let (server, client) = transform(server.clone().into(), client.into()).unwrap();
/// assert_eq!(server, Operation::from(DiscreteOperation::array_insert(Path::root(), 2, "x")));
/// assert_eq!(client, Operation::from(DiscreteOperation::array_insert(Path::root(), 3, "y")));
/// ```
///
/// # Errors
///
/// Returns an error if the operations cannot be concurrent or if no
/// transformation function is known for them. Neither of these can be
/// recovered from.
pub fn transform(
    server: Operation,
    client: Operation,
) -> Result<(Operation, Operation), TransformError> {
    let registry = STANDARD_REGISTRY.as_ref().map_err(Clone::clone)?;
    OperationTransformer::new(registry).transform(server, client)
}

/// Transforms operations using the functions of a registry. The transformer
/// itself holds no state, transforming is a pure function of the operands.
#[derive(Debug, Clone, Copy)]
pub struct OperationTransformer<'r> {
    registry: &'r TransformationFunctionRegistry,
}

impl<'r> OperationTransformer<'r> {
    #[must_use]
    pub fn new(registry: &'r TransformationFunctionRegistry) -> Self { Self { registry } }

    /// See [`transform`].
    ///
    /// # Errors
    ///
    /// Returns an error if the operations cannot be concurrent or if the
    /// registry has no transformation function for them.
    pub fn transform(
        &self,
        server: Operation,
        client: Operation,
    ) -> Result<(Operation, Operation), TransformError> {
        match server {
            Operation::Discrete(server) => {
                let (server, client) = self.transform_discrete_against(server, client)?;
                Ok((server.into(), client))
            }
            Operation::Compound(server) => {
                let mut client = client;
                let mut transformed = Vec::with_capacity(server.len());

                for operation in server.into_operations() {
                    let (operation, next_client) =
                        self.transform_discrete_against(operation, client)?;
                    transformed.push(operation);
                    client = next_client;
                }

                Ok((CompoundOperation::new(transformed).into(), client))
            }
        }
    }

    /// Transforms `server` against each of the `clients` in order, as if the
    /// clients had been applied one after the other. Returns the server
    /// operation rebased onto all of them along with the transformed
    /// clients.
    ///
    /// # Errors
    ///
    /// Fails on the first pair that cannot be transformed.
    pub fn transform_against_sequence(
        &self,
        server: Operation,
        clients: impl IntoIterator<Item = Operation>,
    ) -> Result<(Operation, Vec<Operation>), TransformError> {
        let mut server = server;
        let mut transformed = Vec::new();

        for client in clients {
            let (next_server, client) = self.transform(server, client)?;
            server = next_server;
            transformed.push(client);
        }

        Ok((server, transformed))
    }

    fn transform_discrete_against(
        &self,
        server: DiscreteOperation,
        client: Operation,
    ) -> Result<(DiscreteOperation, Operation), TransformError> {
        match client {
            Operation::Discrete(client) => {
                let (server, client) = self.transform_discrete(server, client)?;
                Ok((server, client.into()))
            }
            Operation::Compound(client) => {
                let mut server = server;
                let mut transformed = Vec::with_capacity(client.len());

                for operation in client.into_operations() {
                    let (next_server, operation) = self.transform_discrete(server, operation)?;
                    server = next_server;
                    transformed.push(operation);
                }

                Ok((server, CompoundOperation::new(transformed).into()))
            }
        }
    }

    fn transform_discrete(
        &self,
        server: DiscreteOperation,
        client: DiscreteOperation,
    ) -> TransformResult {
        if server.is_no_op() || client.is_no_op() {
            trace!("Skipping transformation of {server} and {client}");
            return Ok((server, client));
        }

        match server.path().relationship_to(client.path()) {
            PathRelationship::Equal => {
                trace!("Transforming {server} and {client} on the same path");

                let function = self
                    .registry
                    .operation_transformation_function(server.kind(), client.kind())
                    .ok_or(TransformError::UnknownOperationPair {
                        server: server.kind(),
                        client: client.kind(),
                    })?;

                function(server, client)
            }
            PathRelationship::Ancestor => {
                trace!("Transforming the path of {client} under {server}");

                let client = self.transform_descendant(&server, client, true)?;
                Ok((server, client))
            }
            PathRelationship::Descendant => {
                trace!("Transforming the path of {server} under {client}");

                let server = self.transform_descendant(&client, server, false)?;
                Ok((server, client))
            }
            PathRelationship::Unrelated => {
                trace!("{server} and {client} are independent");
                Ok((server, client))
            }
        }
    }

    /// A missing path transformation function is reported with the ancestor
    /// as the server, whichever side it came from.
    fn transform_descendant(
        &self,
        ancestor: &DiscreteOperation,
        descendant: DiscreteOperation,
        ancestor_is_server: bool,
    ) -> Result<DiscreteOperation, TransformError> {
        let function = self
            .registry
            .path_transformation_function(ancestor.kind())
            .ok_or(TransformError::UnknownOperationPair {
                server: ancestor.kind(),
                client: descendant.kind(),
            })?;

        let transformation = function(ancestor, &descendant).map_err(|error| {
            if ancestor_is_server {
                error
            } else {
                error.with_swapped_roles()
            }
        })?;

        Ok(match transformation {
            PathTransformation::NoTransformation => descendant,
            PathTransformation::PathUpdated(path) => descendant.with_path(path),
            PathTransformation::PathObsoleted => descendant.with_no_op(),
        })
    }
}
