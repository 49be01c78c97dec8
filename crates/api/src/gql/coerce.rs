//! Coercion of mock values to leaf types (built-in scalars, enums and custom
//! scalars), plus the zero values used when a non-null leaf has no mock.

use async_graphql::{Name, Number, Value};

use super::document::{SchemaDocument, TypeKind};
use super::error::MockError;
use super::mock::Mock;

/// Coerce a leaf mock. Custom scalars also take object and list mocks,
/// flattened into a single value.
pub fn coerce_mock(
    document: &SchemaDocument,
    type_name: &str,
    mock: Mock,
) -> Result<Value, MockError> {
    let custom = document
        .get(type_name)
        .is_some_and(|def| matches!(def.kind, TypeKind::Scalar));

    match mock.force() {
        Mock::Value(value) => coerce_leaf(document, type_name, &value),
        other if custom => {
            let found = other.describe();
            other
                .into_value()
                .ok_or_else(|| MockError::coercion(type_name, found))
        }
        other => Err(MockError::coercion(type_name, other.describe())),
    }
}

pub fn coerce_leaf(
    document: &SchemaDocument,
    type_name: &str,
    value: &Value,
) -> Result<Value, MockError> {
    let mismatch = || MockError::coercion(type_name, value);

    match type_name {
        "Int" => match value {
            Value::Number(n) => n
                .as_i64()
                .and_then(|i| i32::try_from(i).ok())
                .map(|i| Value::Number(i.into()))
                .ok_or_else(mismatch),
            Value::String(s) => s
                .trim()
                .parse::<i32>()
                .map(|i| Value::Number(i.into()))
                .map_err(|_| mismatch()),
            _ => Err(mismatch()),
        },
        "Float" => {
            let float = match value {
                Value::Number(n) => n.as_f64(),
                Value::String(s) => s.trim().parse::<f64>().ok(),
                _ => None,
            };
            float
                .and_then(Number::from_f64)
                .map(Value::Number)
                .ok_or_else(mismatch)
        }
        "String" => match value {
            Value::String(_) => Ok(value.clone()),
            Value::Number(n) => Ok(Value::String(n.to_string())),
            Value::Boolean(b) => Ok(Value::String(b.to_string())),
            Value::Enum(name) => Ok(Value::String(name.to_string())),
            _ => Err(mismatch()),
        },
        "ID" => match value {
            Value::String(_) => Ok(value.clone()),
            Value::Number(n) if n.is_i64() || n.is_u64() => Ok(Value::String(n.to_string())),
            _ => Err(mismatch()),
        },
        "Boolean" => match value {
            Value::Boolean(_) => Ok(value.clone()),
            _ => Err(mismatch()),
        },
        other => match document.get(other).map(|def| &def.kind) {
            Some(TypeKind::Enum(values)) => {
                let name = match value {
                    Value::Enum(name) => name.as_str(),
                    Value::String(s) => s.as_str(),
                    _ => return Err(mismatch()),
                };
                values
                    .iter()
                    .find(|v| v.name == name)
                    .map(|v| Value::Enum(Name::new(&v.name)))
                    .ok_or_else(mismatch)
            }
            // Custom scalars carry any value as-is.
            Some(TypeKind::Scalar) => Ok(value.clone()),
            _ => Err(mismatch()),
        },
    }
}

pub fn zero_value(document: &SchemaDocument, type_name: &str) -> Value {
    match type_name {
        "Int" => Value::Number(0.into()),
        "Float" => Number::from_f64(0.0).map_or(Value::Null, Value::Number),
        "String" => Value::String(String::new()),
        "ID" => Value::String("0".to_string()),
        "Boolean" => Value::Boolean(false),
        other => match document.get(other).map(|def| &def.kind) {
            Some(TypeKind::Enum(values)) => values
                .first()
                .map_or(Value::Null, |v| Value::Enum(Name::new(&v.name))),
            _ => Value::String(String::new()),
        },
    }
}
