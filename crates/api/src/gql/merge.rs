use async_graphql::parser::types::{
    InputValueDefinition, TypeDefinition as AstTypeDefinition, TypeKind as AstTypeKind,
    TypeSystemDefinition,
};
use async_graphql::parser::{parse_schema, Positioned};
use indexmap::IndexMap;

use super::document::{
    is_builtin_scalar, is_root, EnumValue, FieldDefinition, InputValue, SchemaDocument,
    TypeDefinition, TypeKind, QUERY,
};
use super::error::SchemaError;

/// One SDL document covering a single domain area.
#[derive(Debug, Clone, Copy)]
pub struct Fragment {
    pub name: &'static str,
    pub source: &'static str,
}

impl Fragment {
    pub const fn new(name: &'static str, source: &'static str) -> Self {
        Self { name, source }
    }
}

/// Merge fragments, in order, into one schema document.
///
/// `Query` and `Mutation` blocks (and `extend type` declarations) union their
/// fields. Any other type declared more than once must have the same shape
/// every time, otherwise the merge fails naming the type.
pub fn merge_fragments(fragments: &[Fragment]) -> Result<SchemaDocument, SchemaError> {
    let mut merger = Merger::default();
    for fragment in fragments {
        let document = parse_schema(fragment.source).map_err(|e| SchemaError::Parse {
            fragment: fragment.name.to_string(),
            message: e.to_string(),
        })?;
        for definition in document.definitions {
            merger.add(fragment.name, definition)?;
        }
    }
    let document = merger.finish()?;
    tracing::debug!(
        fragments = fragments.len(),
        types = document.len(),
        "merged schema fragments"
    );
    Ok(document)
}

#[derive(Default)]
struct Merger {
    types: IndexMap<String, TypeDefinition>,
    /// Fragment that first declared each type, for diagnostics.
    origins: IndexMap<String, &'static str>,
}

impl Merger {
    fn add(
        &mut self,
        fragment: &'static str,
        definition: TypeSystemDefinition,
    ) -> Result<(), SchemaError> {
        let definition = match definition {
            TypeSystemDefinition::Type(definition) => definition.node,
            TypeSystemDefinition::Schema(_) => {
                return Err(unsupported(fragment, "schema definition".to_string()))
            }
            TypeSystemDefinition::Directive(directive) => {
                return Err(unsupported(
                    fragment,
                    format!("directive definition @{}", directive.node.name.node),
                ))
            }
        };
        let extend = definition.extend;
        let incoming = convert_type(fragment, definition)?;

        if is_root(&incoming.name) && !incoming.is_object() {
            return Err(unsupported(
                fragment,
                format!("{} root type {}", incoming.kind.name(), incoming.name),
            ));
        }

        let Some(existing) = self.types.get_mut(&incoming.name) else {
            self.origins.insert(incoming.name.clone(), fragment);
            self.types.insert(incoming.name.clone(), incoming);
            return Ok(());
        };
        let first = self.origins.get(&incoming.name).copied().unwrap_or_default();

        if is_root(&incoming.name) || extend {
            extend_type(existing, incoming, first, fragment)
        } else if let Some(reason) = shape_difference(existing, &incoming) {
            Err(SchemaError::TypeConflict {
                type_name: incoming.name,
                first: first.to_string(),
                second: fragment.to_string(),
                reason,
            })
        } else {
            if existing.description.is_none() {
                existing.description = incoming.description;
            }
            Ok(())
        }
    }

    fn finish(self) -> Result<SchemaDocument, SchemaError> {
        if !self.types.get(QUERY).is_some_and(TypeDefinition::is_object) {
            return Err(SchemaError::MissingQuery);
        }

        for def in self.types.values() {
            match &def.kind {
                TypeKind::Object(fields) => {
                    for field in fields.values() {
                        let owner = format!("{}.{}", def.name, field.name);
                        self.check_output(&owner, field.of_type.name())?;
                        for arg in &field.args {
                            let owner = format!("{owner}({})", arg.name);
                            self.check_input(&owner, arg.of_type.name())?;
                        }
                    }
                }
                TypeKind::InputObject(fields) => {
                    for field in fields.values() {
                        let owner = format!("{}.{}", def.name, field.name);
                        self.check_input(&owner, field.of_type.name())?;
                    }
                }
                TypeKind::Enum(_) | TypeKind::Scalar => {}
            }
        }

        Ok(SchemaDocument::new(self.types))
    }

    fn check_output(&self, owner: &str, referenced: &str) -> Result<(), SchemaError> {
        match self.lookup(owner, referenced)? {
            Some(TypeKind::InputObject(_)) => Err(SchemaError::InvalidReference {
                owner: owner.to_string(),
                referenced: referenced.to_string(),
                reason: "input objects cannot be returned from fields",
            }),
            _ => Ok(()),
        }
    }

    fn check_input(&self, owner: &str, referenced: &str) -> Result<(), SchemaError> {
        match self.lookup(owner, referenced)? {
            Some(TypeKind::Object(_)) => Err(SchemaError::InvalidReference {
                owner: owner.to_string(),
                referenced: referenced.to_string(),
                reason: "object types cannot be used as inputs",
            }),
            _ => Ok(()),
        }
    }

    /// `None` for built-in scalars.
    fn lookup(&self, owner: &str, referenced: &str) -> Result<Option<&TypeKind>, SchemaError> {
        if is_builtin_scalar(referenced) {
            return Ok(None);
        }
        self.types
            .get(referenced)
            .map(|def| Some(&def.kind))
            .ok_or_else(|| SchemaError::UnknownType {
                owner: owner.to_string(),
                referenced: referenced.to_string(),
            })
    }
}

fn unsupported(fragment: &str, definition: String) -> SchemaError {
    SchemaError::Unsupported {
        fragment: fragment.to_string(),
        definition,
    }
}

fn convert_type(
    fragment: &str,
    definition: AstTypeDefinition,
) -> Result<TypeDefinition, SchemaError> {
    let name = definition.name.node.to_string();
    let description = definition.description.map(|d| d.node);

    let kind = match definition.kind {
        AstTypeKind::Scalar => TypeKind::Scalar,
        AstTypeKind::Object(object) => {
            if !object.implements.is_empty() {
                return Err(unsupported(fragment, format!("interface implementation on {name}")));
            }
            let fields = object
                .fields
                .into_iter()
                .map(|field| {
                    let field = field.node;
                    let definition = FieldDefinition {
                        name: field.name.node.to_string(),
                        of_type: (&field.ty.node).into(),
                        args: field.arguments.into_iter().map(convert_input_value).collect(),
                        description: field.description.map(|d| d.node),
                    };
                    (definition.name.clone(), definition)
                })
                .collect();
            TypeKind::Object(fields)
        }
        AstTypeKind::InputObject(input) => TypeKind::InputObject(
            input
                .fields
                .into_iter()
                .map(convert_input_value)
                .map(|value| (value.name.clone(), value))
                .collect(),
        ),
        AstTypeKind::Enum(enum_type) => TypeKind::Enum(
            enum_type
                .values
                .into_iter()
                .map(|value| EnumValue {
                    name: value.node.value.node.to_string(),
                    description: value.node.description.map(|d| d.node),
                })
                .collect(),
        ),
        AstTypeKind::Interface(_) => return Err(unsupported(fragment, format!("interface {name}"))),
        AstTypeKind::Union(_) => return Err(unsupported(fragment, format!("union {name}"))),
    };

    Ok(TypeDefinition {
        name,
        description,
        kind,
    })
}

fn convert_input_value(value: Positioned<InputValueDefinition>) -> InputValue {
    let value = value.node;
    InputValue {
        name: value.name.node.to_string(),
        of_type: (&value.ty.node).into(),
        default_value: value.default_value.map(|v| v.node),
        description: value.description.map(|d| d.node),
    }
}

/// Union `incoming` into `existing`. Identical fields are deduplicated, the
/// same field name with another signature is an error.
fn extend_type(
    existing: &mut TypeDefinition,
    incoming: TypeDefinition,
    first: &str,
    fragment: &str,
) -> Result<(), SchemaError> {
    let type_name = existing.name.clone();
    let field_conflict = |field: &str| {
        if is_root(&type_name) {
            SchemaError::RootFieldConflict {
                root: type_name.clone(),
                field: field.to_string(),
                first: first.to_string(),
                second: fragment.to_string(),
            }
        } else {
            SchemaError::FieldConflict {
                type_name: type_name.clone(),
                field: field.to_string(),
                fragment: fragment.to_string(),
            }
        }
    };

    match (&mut existing.kind, incoming.kind) {
        (TypeKind::Object(fields), TypeKind::Object(extra)) => {
            for (name, field) in extra {
                match fields.get(&name) {
                    Some(current) if current.same_signature(&field) => {}
                    Some(_) => return Err(field_conflict(&name)),
                    None => {
                        fields.insert(name, field);
                    }
                }
            }
        }
        (TypeKind::InputObject(fields), TypeKind::InputObject(extra)) => {
            for (name, field) in extra {
                match fields.get(&name) {
                    Some(current) if current.same_signature(&field) => {}
                    Some(_) => return Err(field_conflict(&name)),
                    None => {
                        fields.insert(name, field);
                    }
                }
            }
        }
        (TypeKind::Enum(values), TypeKind::Enum(extra)) => {
            for value in extra {
                if !values.iter().any(|v| v.name == value.name) {
                    values.push(value);
                }
            }
        }
        (current, other) => {
            return Err(SchemaError::TypeConflict {
                type_name: type_name.clone(),
                first: first.to_string(),
                second: fragment.to_string(),
                reason: format!("declared as {} and extended as {}", current.name(), other.name()),
            })
        }
    }

    if existing.description.is_none() {
        existing.description = incoming.description;
    }
    Ok(())
}

/// Describe how two declarations of one type differ, if they do.
fn shape_difference(existing: &TypeDefinition, incoming: &TypeDefinition) -> Option<String> {
    match (&existing.kind, &incoming.kind) {
        (TypeKind::Scalar, TypeKind::Scalar) => None,
        (TypeKind::Object(a), TypeKind::Object(b)) => {
            keyed_difference(a, b, |x, y| x.same_signature(y), |f| f.of_type.to_string())
        }
        (TypeKind::InputObject(a), TypeKind::InputObject(b)) => {
            keyed_difference(a, b, |x, y| x.same_signature(y), |f| f.of_type.to_string())
        }
        (TypeKind::Enum(a), TypeKind::Enum(b)) => {
            let names = |values: &[EnumValue]| {
                let mut names: Vec<_> = values.iter().map(|v| v.name.clone()).collect();
                names.sort();
                names
            };
            let (a, b) = (names(a), names(b));
            (a != b).then(|| format!("enum values [{}] and [{}]", a.join(", "), b.join(", ")))
        }
        (a, b) => Some(format!("declared as {} and as {}", a.name(), b.name())),
    }
}

fn keyed_difference<T>(
    a: &IndexMap<String, T>,
    b: &IndexMap<String, T>,
    same: impl Fn(&T, &T) -> bool,
    render: impl Fn(&T) -> String,
) -> Option<String> {
    for (name, left) in a {
        match b.get(name) {
            None => return Some(format!("field `{name}` is missing from one declaration")),
            Some(right) if !same(left, right) => {
                return Some(format!(
                    "field `{name}` is declared as `{}` and `{}`",
                    render(left),
                    render(right)
                ))
            }
            Some(_) => {}
        }
    }
    b.keys()
        .find(|name| !a.contains_key(*name))
        .map(|name| format!("field `{name}` is missing from one declaration"))
}
