use std::sync::Arc;

use async_graphql::dynamic::FieldValue;
use async_graphql::Value;
use indexmap::IndexMap;

use super::coerce::{coerce_mock, zero_value};
use super::document::{FieldDefinition, SchemaDocument, TypeRef};
use super::error::MockError;
use super::mock::{Mock, MockTable};

/// Parent value handed to the fields of a mocked object: the type's own
/// provider output with any overrides from the enclosing field on top.
#[derive(Debug, Clone)]
pub struct MockNode {
    type_name: String,
    fields: IndexMap<String, Mock>,
}

impl MockNode {
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn get(&self, field: &str) -> Option<&Mock> {
        self.fields.get(field)
    }
}

/// Resolves every field of the schema from the mock table.
pub struct MockResolver {
    document: Arc<SchemaDocument>,
    mocks: Arc<MockTable>,
    list_length: usize,
}

impl MockResolver {
    pub fn new(document: Arc<SchemaDocument>, mocks: Arc<MockTable>, list_length: usize) -> Self {
        Self {
            document,
            mocks,
            list_length,
        }
    }

    pub fn node(&self, type_name: &str, overrides: Option<IndexMap<String, Mock>>) -> MockNode {
        let mut fields = self
            .mocks
            .get(type_name)
            .and_then(Mock::into_fields)
            .unwrap_or_default();
        if let Some(overrides) = overrides {
            fields.extend(overrides);
        }
        MockNode {
            type_name: type_name.to_string(),
            fields,
        }
    }

    pub fn resolve_field<'a>(
        &self,
        parent: &MockNode,
        field: &FieldDefinition,
    ) -> Result<Option<FieldValue<'a>>, MockError> {
        self.resolve(&field.of_type, parent.get(&field.name).cloned())
    }

    fn resolve<'a>(
        &self,
        ty: &TypeRef,
        mock: Option<Mock>,
    ) -> Result<Option<FieldValue<'a>>, MockError> {
        let mock = mock.map(Mock::force);
        if let Some(Mock::Value(Value::Null)) = mock {
            return Ok(None);
        }

        match ty {
            TypeRef::List { of_type, .. } => self.resolve_list(ty, of_type, mock),
            TypeRef::Named { name, .. } if self.document.is_object(name) => {
                let overrides = match mock {
                    None => None,
                    Some(mock) => {
                        let found = mock.describe();
                        Some(mock.into_fields().ok_or_else(|| MockError::coercion(ty, found))?)
                    }
                };
                Ok(Some(FieldValue::owned_any(self.node(name, overrides))))
            }
            TypeRef::Named { name, .. } => {
                match mock.or_else(|| self.mocks.get(name)) {
                    Some(mock) => {
                        let value = coerce_mock(&self.document, name, mock)?;
                        Ok(Some(FieldValue::value(value)))
                    }
                    None if ty.is_nullable() => Ok(None),
                    None => Ok(Some(FieldValue::value(zero_value(&self.document, name)))),
                }
            }
        }
    }

    fn resolve_list<'a>(
        &self,
        ty: &TypeRef,
        of_type: &TypeRef,
        mock: Option<Mock>,
    ) -> Result<Option<FieldValue<'a>>, MockError> {
        let items: Vec<Option<Mock>> = match mock {
            Some(Mock::List(items)) => items.into_iter().map(Some).collect(),
            Some(Mock::Value(Value::List(values))) => {
                values.into_iter().map(|v| Some(Mock::Value(v))).collect()
            }
            Some(Mock::Repeat(count)) => vec![None; count],
            Some(other) => return Err(MockError::coercion(ty, other.describe())),
            None if self.has_default_elements(of_type) => vec![None; self.list_length],
            None if ty.is_nullable() => return Ok(None),
            None => Vec::new(),
        };

        let values = items
            .into_iter()
            .map(|item| {
                self.resolve(of_type, item)
                    .map(|value| value.unwrap_or(FieldValue::NULL))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Some(FieldValue::list(values)))
    }

    /// Unmocked lists are filled only when their elements can be mocked.
    fn has_default_elements(&self, of_type: &TypeRef) -> bool {
        let name = of_type.name();
        self.document.is_object(name) || self.mocks.contains(name)
    }
}
