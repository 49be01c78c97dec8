use std::borrow::Cow;
use std::sync::Arc;

use async_graphql::dynamic::{
    self, Enum, EnumItem, Field, FieldFuture, InputObject, Object, Scalar, SchemaBuilder,
};

use super::document::{
    InputValue, SchemaDocument, TypeDefinition, TypeKind, TypeRef, MUTATION, QUERY,
};
use super::error::SchemaError;
use super::mock::MockTable;
use super::resolver::{MockNode, MockResolver};
use crate::config::Config;

/// Build the executable schema. Every object field is resolved from the mock
/// table; arguments are declared so requests validate, but are not read.
pub fn build_schema(
    config: &Config,
    document: Arc<SchemaDocument>,
    mocks: Arc<MockTable>,
) -> Result<dynamic::Schema, SchemaError> {
    let resolver = Arc::new(MockResolver::new(
        document.clone(),
        mocks,
        config.mock_list_length,
    ));

    let mutation = document.has_mutation().then_some(MUTATION);
    let mut builder = dynamic::Schema::build(QUERY, mutation, None);
    for def in document.types() {
        builder = builder.register(to_type(def, &resolver));
    }

    builder = apply_limits(builder, config);
    Ok(builder.finish()?)
}

fn apply_limits(mut builder: SchemaBuilder, config: &Config) -> SchemaBuilder {
    if let Some(depth) = config.depth_limit {
        builder = builder.limit_depth(depth);
    }
    if let Some(complexity) = config.complexity_limit {
        builder = builder.limit_complexity(complexity);
    }
    if !config.introspection {
        builder = builder.disable_introspection();
    }
    builder
}

fn to_type_ref(type_of: &TypeRef) -> dynamic::TypeRef {
    match type_of {
        TypeRef::Named { name, non_null } => {
            let named = dynamic::TypeRef::Named(Cow::Owned(name.clone()));
            if *non_null {
                dynamic::TypeRef::NonNull(Box::new(named))
            } else {
                named
            }
        }
        TypeRef::List { of_type, non_null } => {
            let list = dynamic::TypeRef::List(Box::new(to_type_ref(of_type)));
            if *non_null {
                dynamic::TypeRef::NonNull(Box::new(list))
            } else {
                list
            }
        }
    }
}

fn to_input_value(value: &InputValue) -> dynamic::InputValue {
    let mut input = dynamic::InputValue::new(value.name.clone(), to_type_ref(&value.of_type));
    if let Some(default) = &value.default_value {
        input = input.default_value(default.clone());
    }
    if let Some(description) = &value.description {
        input = input.description(description);
    }
    input
}

fn to_type(def: &TypeDefinition, resolver: &Arc<MockResolver>) -> dynamic::Type {
    match &def.kind {
        TypeKind::Object(fields) => {
            let mut object = Object::new(def.name.clone());
            for field in fields.values() {
                let resolver = resolver.clone();
                let type_name = def.name.clone();
                let definition = field.clone();

                let mut dyn_field = Field::new(
                    field.name.clone(),
                    to_type_ref(&field.of_type),
                    move |ctx| {
                        // Root fields have no mocked parent; start from the root's provider.
                        let result = match ctx.parent_value.try_downcast_ref::<MockNode>() {
                            Ok(parent) => resolver.resolve_field(parent, &definition),
                            Err(_) => {
                                let root = resolver.node(&type_name, None);
                                resolver.resolve_field(&root, &definition)
                            }
                        };
                        if let Err(err) = &result {
                            tracing::debug!(
                                type_name = %type_name,
                                field = %definition.name,
                                error = %err,
                                "mock value rejected"
                            );
                        }
                        FieldFuture::new(async move {
                            result.map_err(async_graphql::Error::from)
                        })
                    },
                );
                if let Some(description) = &field.description {
                    dyn_field = dyn_field.description(description);
                }
                for arg in &field.args {
                    dyn_field = dyn_field.argument(to_input_value(arg));
                }
                object = object.field(dyn_field);
            }
            if let Some(description) = &def.description {
                object = object.description(description);
            }
            dynamic::Type::Object(object)
        }
        TypeKind::InputObject(fields) => {
            let mut input = InputObject::new(def.name.clone());
            for field in fields.values() {
                input = input.field(to_input_value(field));
            }
            if let Some(description) = &def.description {
                input = input.description(description);
            }
            dynamic::Type::InputObject(input)
        }
        TypeKind::Enum(values) => {
            let mut enum_type = Enum::new(def.name.clone());
            for value in values {
                let mut item = EnumItem::new(value.name.clone());
                if let Some(description) = &value.description {
                    item = item.description(description);
                }
                enum_type = enum_type.item(item);
            }
            if let Some(description) = &def.description {
                enum_type = enum_type.description(description);
            }
            dynamic::Type::Enum(enum_type)
        }
        TypeKind::Scalar => {
            let mut scalar = Scalar::new(def.name.clone());
            if let Some(description) = &def.description {
                scalar = scalar.description(description);
            }
            dynamic::Type::Scalar(scalar)
        }
    }
}
