//! Mock values and the per-type mock table.
//!
//! A table maps a type name to a provider: a zero-argument function returning
//! a [`Mock`]. Domain tables are combined with [`MockTable::merge`], which
//! refuses to let two tables provide the same type. `Query` and `Mutation`
//! providers are the exception: they are combined field by field, since every
//! domain contributes its own root fields.

use std::fmt;
use std::sync::Arc;

use async_graphql::{Name, Value};
use indexmap::IndexMap;

use super::coerce::coerce_mock;
use super::document::{is_builtin_scalar, is_root, SchemaDocument, TypeKind, TypeRef};
use super::error::{MockError, SchemaError};

pub type Thunk = Arc<dyn Fn() -> Mock + Send + Sync>;

#[derive(Clone)]
pub enum Mock {
    /// A concrete value: scalar, enum name, or a JSON-like object/list.
    Value(Value),
    /// Field name to mock; layered over the type's own provider.
    Object(IndexMap<String, Mock>),
    List(Vec<Mock>),
    /// `n` elements, each mocked from the element type's provider.
    Repeat(usize),
    Lazy(Thunk),
}

impl Mock {
    pub fn null() -> Self {
        Mock::Value(Value::Null)
    }

    /// An object with no field overrides.
    pub fn empty() -> Self {
        Mock::Object(IndexMap::new())
    }

    pub fn object<K, I>(fields: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Mock)>,
    {
        Mock::Object(fields.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    pub fn repeat(count: usize) -> Self {
        Mock::Repeat(count)
    }

    pub fn lazy(thunk: impl Fn() -> Mock + Send + Sync + 'static) -> Self {
        Mock::Lazy(Arc::new(thunk))
    }

    /// Evaluate thunks until a non-lazy mock is reached.
    pub fn force(self) -> Mock {
        let mut mock = self;
        while let Mock::Lazy(thunk) = mock {
            mock = thunk();
        }
        mock
    }

    /// Field overrides of an object mock; `None` if this is not an object.
    pub fn into_fields(self) -> Option<IndexMap<String, Mock>> {
        match self.force() {
            Mock::Object(fields) => Some(fields),
            Mock::Value(Value::Object(fields)) => Some(
                fields
                    .into_iter()
                    .map(|(name, value)| (name.to_string(), Mock::Value(value)))
                    .collect(),
            ),
            _ => None,
        }
    }

    /// Flatten into a plain value, as custom scalars carry one. `None` while a
    /// placeholder list remains anywhere inside.
    pub fn into_value(self) -> Option<Value> {
        match self.force() {
            Mock::Value(value) => Some(value),
            Mock::Object(fields) => fields
                .into_iter()
                .map(|(name, mock)| Some((Name::new(name), mock.into_value()?)))
                .collect::<Option<_>>()
                .map(Value::Object),
            Mock::List(items) => items
                .into_iter()
                .map(Mock::into_value)
                .collect::<Option<_>>()
                .map(Value::List),
            Mock::Repeat(_) | Mock::Lazy(_) => None,
        }
    }

    pub(crate) fn describe(&self) -> String {
        match self {
            Mock::Value(value) => value.to_string(),
            Mock::Object(_) => "an object".to_string(),
            Mock::List(_) => "a list".to_string(),
            Mock::Repeat(n) => format!("a placeholder list of {n}"),
            Mock::Lazy(_) => "a lazy mock".to_string(),
        }
    }
}

impl fmt::Debug for Mock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mock::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Mock::Object(fields) => f.debug_tuple("Object").field(fields).finish(),
            Mock::List(items) => f.debug_tuple("List").field(items).finish(),
            Mock::Repeat(n) => f.debug_tuple("Repeat").field(n).finish(),
            Mock::Lazy(_) => f.write_str("Lazy(..)"),
        }
    }
}

impl From<Value> for Mock {
    fn from(value: Value) -> Self {
        Mock::Value(value)
    }
}

impl From<&str> for Mock {
    fn from(value: &str) -> Self {
        Mock::Value(Value::String(value.to_string()))
    }
}

impl From<i32> for Mock {
    fn from(value: i32) -> Self {
        Mock::Value(Value::Number(value.into()))
    }
}

impl From<bool> for Mock {
    fn from(value: bool) -> Self {
        Mock::Value(Value::Boolean(value))
    }
}

/// JSON objects become field overrides and arrays explicit lists, so canned
/// data can be written with `serde_json::json!`.
impl From<serde_json::Value> for Mock {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Mock::null(),
            serde_json::Value::Bool(b) => Mock::Value(Value::Boolean(b)),
            serde_json::Value::Number(n) => Mock::Value(Value::Number(n)),
            serde_json::Value::String(s) => Mock::Value(Value::String(s)),
            serde_json::Value::Array(items) => {
                Mock::List(items.into_iter().map(Mock::from).collect())
            }
            serde_json::Value::Object(fields) => {
                Mock::Object(fields.into_iter().map(|(k, v)| (k, Mock::from(v))).collect())
            }
        }
    }
}

#[derive(Clone, Default)]
pub struct MockTable {
    providers: IndexMap<String, Thunk>,
}

impl fmt::Debug for MockTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.providers.keys()).finish()
    }
}

impl MockTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the provider for `type_name`. A table holds one provider per type.
    pub fn insert<F>(
        &mut self,
        type_name: impl Into<String>,
        provider: F,
    ) -> Result<(), SchemaError>
    where
        F: Fn() -> Mock + Send + Sync + 'static,
    {
        let type_name = type_name.into();
        if self.providers.contains_key(&type_name) {
            return Err(SchemaError::MockCollision { type_name });
        }
        self.providers.insert(type_name, Arc::new(provider));
        Ok(())
    }

    /// Union of two tables. Fails on a type provided by both, except for root
    /// types whose field sets are disjoint.
    pub fn merge(mut self, other: MockTable) -> Result<Self, SchemaError> {
        for (type_name, provider) in other.providers {
            let combined = match self.providers.get(&type_name) {
                None => provider,
                Some(existing) if is_root(&type_name) => {
                    combine_roots(&type_name, existing.clone(), provider)?
                }
                Some(_) => return Err(SchemaError::MockCollision { type_name }),
            };
            self.providers.insert(type_name, combined);
        }
        Ok(self)
    }

    /// Union of two tables where `other` deliberately replaces entries.
    pub fn merge_overriding(mut self, other: MockTable) -> Self {
        for (type_name, provider) in other.providers {
            if self.providers.contains_key(&type_name) {
                tracing::warn!(type_name = %type_name, "mock provider overridden");
            }
            self.providers.insert(type_name, provider);
        }
        self
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.providers.contains_key(type_name)
    }

    /// Run the provider for `type_name`.
    pub fn get(&self, type_name: &str) -> Option<Mock> {
        self.providers.get(type_name).map(|provider| provider().force())
    }

    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.providers.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Check every provider against the schema: the type must be a declared
    /// output type, object mocks may only set declared fields, and literal
    /// values must be coercible to the declared field types.
    pub fn validate(&self, document: &SchemaDocument) -> Result<(), SchemaError> {
        for (type_name, provider) in &self.providers {
            let invalid = |source| SchemaError::InvalidMock {
                type_name: type_name.clone(),
                source,
            };
            let mock = provider().force();

            if is_builtin_scalar(type_name) {
                check_leaf(document, type_name, mock).map_err(invalid)?;
                continue;
            }
            match document.get(type_name).map(|def| &def.kind) {
                Some(TypeKind::Object(_)) => {
                    let fields = mock.into_fields().ok_or_else(|| {
                        invalid(MockError::coercion(type_name, "a non-object mock"))
                    })?;
                    check_fields(document, type_name, fields).map_err(invalid)?;
                }
                Some(TypeKind::Enum(_) | TypeKind::Scalar) => {
                    check_leaf(document, type_name, mock).map_err(invalid)?;
                }
                Some(TypeKind::InputObject(_)) | None => {
                    return Err(SchemaError::UnknownMockType {
                        type_name: type_name.clone(),
                    })
                }
            }
        }
        Ok(())
    }
}

fn combine_roots(type_name: &str, first: Thunk, second: Thunk) -> Result<Thunk, SchemaError> {
    let (Some(a), Some(b)) = (first().into_fields(), second().into_fields()) else {
        return Err(SchemaError::MockCollision {
            type_name: type_name.to_string(),
        });
    };
    if let Some(field) = b.keys().find(|field| a.contains_key(*field)) {
        return Err(SchemaError::MockCollision {
            type_name: format!("{type_name}.{field}"),
        });
    }

    Ok(Arc::new(move || {
        let mut fields = first().into_fields().unwrap_or_default();
        fields.extend(second().into_fields().unwrap_or_default());
        Mock::Object(fields)
    }))
}

fn check_leaf(document: &SchemaDocument, type_name: &str, mock: Mock) -> Result<(), MockError> {
    coerce_mock(document, type_name, mock).map(|_| ())
}

fn check_fields(
    document: &SchemaDocument,
    type_name: &str,
    fields: IndexMap<String, Mock>,
) -> Result<(), MockError> {
    for (name, mock) in fields {
        let field = document
            .field(type_name, &name)
            .ok_or_else(|| MockError::UnknownField {
                type_name: type_name.to_string(),
                field: name.clone(),
            })?;
        check_mock(document, &field.of_type, mock)?;
    }
    Ok(())
}

fn check_mock(document: &SchemaDocument, ty: &TypeRef, mock: Mock) -> Result<(), MockError> {
    let mock = mock.force();
    if let Mock::Value(Value::Null) = mock {
        return if ty.is_nullable() {
            Ok(())
        } else {
            Err(MockError::NullForNonNull(ty.to_string()))
        };
    }

    match ty {
        TypeRef::List { of_type, .. } => match mock {
            Mock::List(items) => items
                .into_iter()
                .try_for_each(|item| check_mock(document, of_type, item)),
            Mock::Value(Value::List(values)) => values
                .into_iter()
                .try_for_each(|value| check_mock(document, of_type, Mock::Value(value))),
            Mock::Repeat(_) => Ok(()),
            other => Err(MockError::coercion(ty, other.describe())),
        },
        TypeRef::Named { name, .. } if document.is_object(name) => {
            let found = mock.describe();
            match mock.into_fields() {
                Some(fields) => check_fields(document, name, fields),
                None => Err(MockError::coercion(ty, found)),
            }
        }
        TypeRef::Named { name, .. } => check_leaf(document, name, mock),
    }
}
