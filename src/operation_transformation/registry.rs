use std::collections::{HashMap, hash_map::Entry};

use super::{PathTransformation, array, boolean, number, object, path_transformation, string};
use crate::{DiscreteOperation, OperationKind, RegistrationKey, TransformError};

/// Transforms two concurrent operations targeting the same path, returning
/// `(server', client')`.
pub type OperationTransformationFunction = fn(
    DiscreteOperation,
    DiscreteOperation,
) -> Result<(DiscreteOperation, DiscreteOperation), TransformError>;

/// Computes how an ancestor operation (first argument) changes the path of a
/// concurrent descendant operation (second argument).
pub type PathTransformationFunction =
    fn(&DiscreteOperation, &DiscreteOperation) -> Result<PathTransformation, TransformError>;

const OPERATION_TRANSFORMATIONS: [(
    OperationKind,
    OperationKind,
    OperationTransformationFunction,
); 55] = [
    (OperationKind::ArrayInsert, OperationKind::ArrayInsert, array::insert_insert),
    (OperationKind::ArrayInsert, OperationKind::ArrayRemove, array::insert_remove),
    (OperationKind::ArrayInsert, OperationKind::ArrayReplace, array::insert_replace),
    (OperationKind::ArrayInsert, OperationKind::ArrayMove, array::insert_move),
    (OperationKind::ArrayInsert, OperationKind::ArraySet, array::overwritten_by_set),
    (OperationKind::ArrayRemove, OperationKind::ArrayInsert, array::remove_insert),
    (OperationKind::ArrayRemove, OperationKind::ArrayRemove, array::remove_remove),
    (OperationKind::ArrayRemove, OperationKind::ArrayReplace, array::remove_replace),
    (OperationKind::ArrayRemove, OperationKind::ArrayMove, array::remove_move),
    (OperationKind::ArrayRemove, OperationKind::ArraySet, array::overwritten_by_set),
    (OperationKind::ArrayReplace, OperationKind::ArrayInsert, array::replace_insert),
    (OperationKind::ArrayReplace, OperationKind::ArrayRemove, array::replace_remove),
    (OperationKind::ArrayReplace, OperationKind::ArrayReplace, array::replace_replace),
    (OperationKind::ArrayReplace, OperationKind::ArrayMove, array::replace_move),
    (OperationKind::ArrayReplace, OperationKind::ArraySet, array::overwritten_by_set),
    (OperationKind::ArrayMove, OperationKind::ArrayInsert, array::move_insert),
    (OperationKind::ArrayMove, OperationKind::ArrayRemove, array::move_remove),
    (OperationKind::ArrayMove, OperationKind::ArrayReplace, array::move_replace),
    (OperationKind::ArrayMove, OperationKind::ArrayMove, array::move_move),
    (OperationKind::ArrayMove, OperationKind::ArraySet, array::overwritten_by_set),
    (OperationKind::ArraySet, OperationKind::ArrayInsert, array::set_overwrites),
    (OperationKind::ArraySet, OperationKind::ArrayRemove, array::set_overwrites),
    (OperationKind::ArraySet, OperationKind::ArrayReplace, array::set_overwrites),
    (OperationKind::ArraySet, OperationKind::ArrayMove, array::set_overwrites),
    (OperationKind::ArraySet, OperationKind::ArraySet, array::set_set),
    (OperationKind::StringInsert, OperationKind::StringInsert, string::insert_insert),
    (OperationKind::StringInsert, OperationKind::StringRemove, string::insert_remove),
    (OperationKind::StringInsert, OperationKind::StringSet, string::overwritten_by_set),
    (OperationKind::StringRemove, OperationKind::StringInsert, string::remove_insert),
    (OperationKind::StringRemove, OperationKind::StringRemove, string::remove_remove),
    (OperationKind::StringRemove, OperationKind::StringSet, string::overwritten_by_set),
    (OperationKind::StringSet, OperationKind::StringInsert, string::set_overwrites),
    (OperationKind::StringSet, OperationKind::StringRemove, string::set_overwrites),
    (OperationKind::StringSet, OperationKind::StringSet, string::set_set),
    (OperationKind::ObjectAddProperty, OperationKind::ObjectAddProperty, object::add_add),
    (OperationKind::ObjectAddProperty, OperationKind::ObjectRemoveProperty, object::add_remove),
    (OperationKind::ObjectAddProperty, OperationKind::ObjectSetProperty, object::add_set_property),
    (OperationKind::ObjectAddProperty, OperationKind::ObjectSet, object::overwritten_by_set),
    (OperationKind::ObjectRemoveProperty, OperationKind::ObjectAddProperty, object::remove_add),
    (
        OperationKind::ObjectRemoveProperty,
        OperationKind::ObjectRemoveProperty,
        object::remove_remove,
    ),
    (
        OperationKind::ObjectRemoveProperty,
        OperationKind::ObjectSetProperty,
        object::remove_set_property,
    ),
    (OperationKind::ObjectRemoveProperty, OperationKind::ObjectSet, object::overwritten_by_set),
    (OperationKind::ObjectSetProperty, OperationKind::ObjectAddProperty, object::set_property_add),
    (
        OperationKind::ObjectSetProperty,
        OperationKind::ObjectRemoveProperty,
        object::set_property_remove,
    ),
    (
        OperationKind::ObjectSetProperty,
        OperationKind::ObjectSetProperty,
        object::set_property_set_property,
    ),
    (OperationKind::ObjectSetProperty, OperationKind::ObjectSet, object::overwritten_by_set),
    (OperationKind::ObjectSet, OperationKind::ObjectAddProperty, object::set_overwrites),
    (OperationKind::ObjectSet, OperationKind::ObjectRemoveProperty, object::set_overwrites),
    (OperationKind::ObjectSet, OperationKind::ObjectSetProperty, object::set_overwrites),
    (OperationKind::ObjectSet, OperationKind::ObjectSet, object::set_set),
    (OperationKind::NumberAdd, OperationKind::NumberAdd, number::add_add),
    (OperationKind::NumberAdd, OperationKind::NumberSet, number::add_set),
    (OperationKind::NumberSet, OperationKind::NumberAdd, number::set_add),
    (OperationKind::NumberSet, OperationKind::NumberSet, number::set_set),
    (OperationKind::BooleanSet, OperationKind::BooleanSet, boolean::set_set),
];

const PATH_TRANSFORMATIONS: [(OperationKind, PathTransformationFunction); 9] = [
    (OperationKind::ArrayInsert, path_transformation::array_insert),
    (OperationKind::ArrayRemove, path_transformation::array_remove),
    (OperationKind::ArrayReplace, path_transformation::array_replace),
    (OperationKind::ArrayMove, path_transformation::array_move),
    (OperationKind::ArraySet, path_transformation::collection_set),
    (OperationKind::ObjectAddProperty, path_transformation::object_add_property),
    (OperationKind::ObjectRemoveProperty, path_transformation::object_property_discarded),
    (OperationKind::ObjectSetProperty, path_transformation::object_property_discarded),
    (OperationKind::ObjectSet, path_transformation::collection_set),
];

/// Collects transformation functions and rejects keys registered more than
/// once.
#[derive(Debug, Default)]
pub struct TransformationFunctionRegistryBuilder {
    operation_functions: HashMap<(OperationKind, OperationKind), OperationTransformationFunction>,
    path_functions: HashMap<OperationKind, PathTransformationFunction>,
}

impl TransformationFunctionRegistryBuilder {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Registers the function transforming a `server` operation against a
    /// concurrent `client` operation on the same path.
    ///
    /// # Errors
    ///
    /// Returns `TransformError::DuplicateRegistration` if the pair already
    /// has a function.
    pub fn register_operation_transformation(
        mut self,
        server: OperationKind,
        client: OperationKind,
        function: OperationTransformationFunction,
    ) -> Result<Self, TransformError> {
        match self.operation_functions.entry((server, client)) {
            Entry::Occupied(_) => Err(TransformError::DuplicateRegistration(
                RegistrationKey::Pair(server, client),
            )),
            Entry::Vacant(entry) => {
                entry.insert(function);
                Ok(self)
            }
        }
    }

    /// Registers the function rewriting the paths of operations nested
    /// under an operation of the given kind.
    ///
    /// # Errors
    ///
    /// Returns `TransformError::DuplicateRegistration` if the kind already
    /// has a function.
    pub fn register_path_transformation(
        mut self,
        ancestor: OperationKind,
        function: PathTransformationFunction,
    ) -> Result<Self, TransformError> {
        match self.path_functions.entry(ancestor) {
            Entry::Occupied(_) => Err(TransformError::DuplicateRegistration(
                RegistrationKey::Path(ancestor),
            )),
            Entry::Vacant(entry) => {
                entry.insert(function);
                Ok(self)
            }
        }
    }

    /// Registers every transformation function of the protocol.
    ///
    /// # Errors
    ///
    /// Returns `TransformError::DuplicateRegistration` if any of them has
    /// already been registered.
    pub fn register_standard_functions(self) -> Result<Self, TransformError> {
        let builder = OPERATION_TRANSFORMATIONS.into_iter().try_fold(
            self,
            |builder, (server, client, function)| {
                builder.register_operation_transformation(server, client, function)
            },
        )?;

        PATH_TRANSFORMATIONS
            .into_iter()
            .try_fold(builder, |builder, (ancestor, function)| {
                builder.register_path_transformation(ancestor, function)
            })
    }

    #[must_use]
    pub fn build(self) -> TransformationFunctionRegistry {
        TransformationFunctionRegistry {
            operation_functions: self.operation_functions,
            path_functions: self.path_functions,
        }
    }
}

/// Immutable lookup tables of transformation functions. Once built, a
/// registry can be shared between threads freely.
#[derive(Debug, Clone)]
pub struct TransformationFunctionRegistry {
    operation_functions: HashMap<(OperationKind, OperationKind), OperationTransformationFunction>,
    path_functions: HashMap<OperationKind, PathTransformationFunction>,
}

impl TransformationFunctionRegistry {
    /// Builds the registry of every transformation function of the protocol.
    ///
    /// # Errors
    ///
    /// Returns `TransformError::DuplicateRegistration` if the standard tables
    /// contain a key twice.
    pub fn new() -> Result<Self, TransformError> {
        Ok(TransformationFunctionRegistryBuilder::new()
            .register_standard_functions()?
            .build())
    }

    #[must_use]
    pub fn builder() -> TransformationFunctionRegistryBuilder {
        TransformationFunctionRegistryBuilder::new()
    }

    #[must_use]
    pub fn operation_transformation_function(
        &self,
        server: OperationKind,
        client: OperationKind,
    ) -> Option<OperationTransformationFunction> {
        self.operation_functions.get(&(server, client)).copied()
    }

    #[must_use]
    pub fn path_transformation_function(
        &self,
        ancestor: OperationKind,
    ) -> Option<PathTransformationFunction> {
        self.path_functions.get(&ancestor).copied()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_standard_registry_covers_every_pair_of_the_same_type() {
        let registry = TransformationFunctionRegistry::new().unwrap();

        for server in OperationKind::ALL {
            for client in OperationKind::ALL {
                assert_eq!(
                    registry
                        .operation_transformation_function(server, client)
                        .is_some(),
                    server.target_type() == client.target_type(),
                    "({server}, {client})"
                );
            }
        }
    }

    #[test]
    fn test_leaf_kinds_have_no_path_transformation() {
        let registry = TransformationFunctionRegistry::new().unwrap();

        for kind in [
            OperationKind::StringInsert,
            OperationKind::StringRemove,
            OperationKind::StringSet,
            OperationKind::NumberAdd,
            OperationKind::NumberSet,
            OperationKind::BooleanSet,
        ] {
            assert!(registry.path_transformation_function(kind).is_none());
        }
    }

    #[test]
    fn test_duplicate_registration() {
        let result = TransformationFunctionRegistry::builder()
            .register_operation_transformation(
                OperationKind::NumberAdd,
                OperationKind::NumberAdd,
                number::add_add,
            )
            .and_then(|builder| {
                builder.register_operation_transformation(
                    OperationKind::NumberAdd,
                    OperationKind::NumberAdd,
                    number::add_add,
                )
            });

        assert_eq!(
            result.unwrap_err(),
            TransformError::DuplicateRegistration(RegistrationKey::Pair(
                OperationKind::NumberAdd,
                OperationKind::NumberAdd
            ))
        );
    }

    #[test]
    fn test_duplicate_path_registration() {
        let result = TransformationFunctionRegistry::builder()
            .register_standard_functions()
            .and_then(|builder| {
                builder.register_path_transformation(
                    OperationKind::ArraySet,
                    path_transformation::collection_set,
                )
            });

        assert_eq!(
            result.unwrap_err(),
            TransformError::DuplicateRegistration(RegistrationKey::Path(OperationKind::ArraySet))
        );
    }
}
