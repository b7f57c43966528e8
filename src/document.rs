//! Applying operations to JSON documents.

use log::trace;
use serde_json::{Map, Number, Value};

use crate::{
    ApplyError, DiscreteOperation, Edit, Operation, Path, PathElement,
    utils::string_builder::StringBuilder,
};

/// Largest magnitude up to which every integer is exactly representable as a
/// `f64`.
const INTEGRAL_LIMIT: f64 = (1u64 << 53) as f64;

/// Applies `operation` to `document` in place. No-op operations are skipped.
///
/// A compound operation is applied atomically: if any of its members fails,
/// the document is left untouched.
///
/// ```
/// use realtime_ot::{DiscreteOperation, apply, path};
/// use serde_json::json;
///
/// let mut document = json!({ "items": [{ "name": "Alice" }] });
/// let operation = DiscreteOperation::string_insert(path!["items", 0, "name"], 5, "!");
///
/// apply(&mut document, &operation.into()).unwrap();
/// assert_eq!(document, json!({ "items": [{ "name": "Alice!" }] }));
/// ```
///
/// # Errors
///
/// Returns an error if the operation doesn't fit the document, e.g. its path
/// doesn't exist or addresses a value of a different type.
pub fn apply(document: &mut Value, operation: &Operation) -> Result<(), ApplyError> {
    match operation {
        Operation::Discrete(operation) => apply_discrete(document, operation),
        Operation::Compound(compound) => {
            let mut result = document.clone();
            for operation in compound.operations() {
                apply_discrete(&mut result, operation)?;
            }

            *document = result;
            Ok(())
        }
    }
}

fn apply_discrete(document: &mut Value, operation: &DiscreteOperation) -> Result<(), ApplyError> {
    if operation.is_no_op() {
        trace!("Skipping {operation}");
        return Ok(());
    }

    trace!("Applying {operation}");

    let path = operation.path();
    let target = resolve_mut(document, path)?;

    match operation.edit() {
        Edit::ArrayInsert { index, value } => {
            let items = as_array_mut(target, path)?;
            if *index > items.len() {
                return Err(out_of_bounds(path, *index, items.len()));
            }

            items.insert(*index, value.clone());
        }
        Edit::ArrayRemove { index } => {
            let items = as_array_mut(target, path)?;
            check_bounds(path, *index, items.len())?;
            items.remove(*index);
        }
        Edit::ArrayReplace { index, value } => {
            let items = as_array_mut(target, path)?;
            check_bounds(path, *index, items.len())?;
            items[*index] = value.clone();
        }
        Edit::ArrayMove {
            from_index,
            to_index,
        } => {
            let items = as_array_mut(target, path)?;
            check_bounds(path, *from_index, items.len())?;
            check_bounds(path, *to_index, items.len())?;

            let item = items.remove(*from_index);
            items.insert(*to_index, item);
        }
        Edit::ArraySet { value } => {
            as_array_mut(target, path)?;
            *target = Value::Array(value.clone());
        }
        Edit::ObjectAddProperty { key, value } => {
            let properties = as_object_mut(target, path)?;
            if properties.contains_key(key) {
                return Err(ApplyError::PropertyAlreadyExists {
                    path: path.clone(),
                    key: key.clone(),
                });
            }

            properties.insert(key.clone(), value.clone());
        }
        Edit::ObjectRemoveProperty { key } => {
            as_object_mut(target, path)?
                .remove(key)
                .ok_or_else(|| ApplyError::PropertyNotFound {
                    path: path.clone(),
                    key: key.clone(),
                })?;
        }
        Edit::ObjectSetProperty { key, value } => {
            as_object_mut(target, path)?.insert(key.clone(), value.clone());
        }
        Edit::ObjectSet { value } => {
            as_object_mut(target, path)?;
            *target = Value::Object(value.clone());
        }
        Edit::StringInsert { index, text } => {
            let original = as_str(target, path)?;
            let mut builder = StringBuilder::new(original);

            let length = builder.remaining();
            if builder.retain(*index) < *index {
                return Err(out_of_bounds(path, *index, length));
            }

            builder.insert(text);
            builder.retain_rest();
            *target = Value::String(builder.build());
        }
        Edit::StringRemove { index, text } => {
            let original = as_str(target, path)?;
            let mut builder = StringBuilder::new(original);

            let length = builder.remaining();
            if builder.retain(*index) < *index {
                return Err(out_of_bounds(path, *index, length));
            }

            let removed = builder.delete(operation.text_len());
            if removed != *text {
                return Err(ApplyError::RemovedTextMismatch {
                    path: path.clone(),
                    expected: text.clone(),
                    found: removed,
                });
            }

            builder.retain_rest();
            *target = Value::String(builder.build());
        }
        Edit::StringSet { text } => {
            as_str(target, path)?;
            *target = Value::String(text.clone());
        }
        Edit::NumberAdd { delta } => {
            let current = as_f64(target, path)?;
            *target = to_number(current + delta)?;
        }
        Edit::NumberSet { value } => {
            as_f64(target, path)?;
            *target = to_number(*value)?;
        }
        Edit::BooleanSet { value } => {
            if !target.is_boolean() {
                return Err(type_mismatch(path, operation.kind().target_type(), target));
            }

            *target = Value::Bool(*value);
        }
    }

    Ok(())
}

fn resolve_mut<'a>(document: &'a mut Value, path: &Path) -> Result<&'a mut Value, ApplyError> {
    path.elements()
        .iter()
        .try_fold(document, |value, element| match (value, element) {
            (Value::Array(items), PathElement::Index(index)) => items.get_mut(*index),
            (Value::Object(properties), PathElement::Key(key)) => properties.get_mut(key),
            _ => None,
        })
        .ok_or_else(|| ApplyError::PathNotFound(path.clone()))
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn type_mismatch(path: &Path, expected: &'static str, found: &Value) -> ApplyError {
    ApplyError::TypeMismatch {
        path: path.clone(),
        expected,
        found: type_name(found),
    }
}

fn out_of_bounds(path: &Path, index: usize, length: usize) -> ApplyError {
    ApplyError::IndexOutOfBounds {
        path: path.clone(),
        index,
        length,
    }
}

fn check_bounds(path: &Path, index: usize, length: usize) -> Result<(), ApplyError> {
    if index < length {
        Ok(())
    } else {
        Err(out_of_bounds(path, index, length))
    }
}

fn as_array_mut<'a>(value: &'a mut Value, path: &Path) -> Result<&'a mut Vec<Value>, ApplyError> {
    match value {
        Value::Array(items) => Ok(items),
        other => Err(type_mismatch(path, "array", other)),
    }
}

fn as_object_mut<'a>(
    value: &'a mut Value,
    path: &Path,
) -> Result<&'a mut Map<String, Value>, ApplyError> {
    match value {
        Value::Object(properties) => Ok(properties),
        other => Err(type_mismatch(path, "object", other)),
    }
}

fn as_str<'a>(value: &'a Value, path: &Path) -> Result<&'a str, ApplyError> {
    value
        .as_str()
        .ok_or_else(|| type_mismatch(path, "string", value))
}

fn as_f64(value: &Value, path: &Path) -> Result<f64, ApplyError> {
    value
        .as_f64()
        .ok_or_else(|| type_mismatch(path, "number", value))
}

/// Converts a number to JSON, keeping integral values integral.
#[allow(clippy::float_cmp)]
fn to_number(value: f64) -> Result<Value, ApplyError> {
    if !value.is_finite() {
        return Err(ApplyError::InvalidNumber(value));
    }

    if value.fract() == 0.0 && value.abs() < INTEGRAL_LIMIT {
        return Ok(Value::from(value as i64));
    }

    Number::from_f64(value)
        .map(Value::Number)
        .ok_or(ApplyError::InvalidNumber(value))
}
