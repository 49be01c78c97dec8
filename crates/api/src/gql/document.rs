//! In-memory model of the merged schema.
//!
//! The document is built once by [`crate::gql::merge::merge_fragments`] and is
//! read-only afterwards. Type order is the order of first declaration, which
//! keeps [`SchemaDocument::sdl`] byte-stable for a given fragment list.

use std::fmt::{self, Display, Formatter};

use async_graphql::parser::types::{BaseType, Type};
use async_graphql::Value;
use indexmap::IndexMap;

pub const QUERY: &str = "Query";
pub const MUTATION: &str = "Mutation";

pub const BUILTIN_SCALARS: [&str; 5] = ["Int", "Float", "String", "Boolean", "ID"];

pub fn is_builtin_scalar(name: &str) -> bool {
    BUILTIN_SCALARS.contains(&name)
}

pub fn is_root(name: &str) -> bool {
    name == QUERY || name == MUTATION
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeRef {
    Named { name: String, non_null: bool },
    List { of_type: Box<TypeRef>, non_null: bool },
}

impl TypeRef {
    /// Name of the innermost named type.
    pub fn name(&self) -> &str {
        match self {
            TypeRef::Named { name, .. } => name,
            TypeRef::List { of_type, .. } => of_type.name(),
        }
    }

    pub fn is_nullable(&self) -> bool {
        match self {
            TypeRef::Named { non_null, .. } | TypeRef::List { non_null, .. } => !non_null,
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self, TypeRef::List { .. })
    }
}

impl From<&Type> for TypeRef {
    fn from(ty: &Type) -> Self {
        match &ty.base {
            BaseType::Named(name) => TypeRef::Named {
                name: name.to_string(),
                non_null: !ty.nullable,
            },
            BaseType::List(inner) => TypeRef::List {
                of_type: Box::new(TypeRef::from(inner.as_ref())),
                non_null: !ty.nullable,
            },
        }
    }
}

impl Display for TypeRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let non_null = match self {
            TypeRef::Named { name, non_null } => {
                f.write_str(name)?;
                non_null
            }
            TypeRef::List { of_type, non_null } => {
                write!(f, "[{of_type}]")?;
                non_null
            }
        };
        if *non_null {
            f.write_str("!")?;
        }
        Ok(())
    }
}

/// An argument or an input object field.
#[derive(Debug, Clone)]
pub struct InputValue {
    pub name: String,
    pub of_type: TypeRef,
    pub default_value: Option<Value>,
    pub description: Option<String>,
}

impl InputValue {
    pub fn same_signature(&self, other: &InputValue) -> bool {
        self.name == other.name
            && self.of_type == other.of_type
            && self.default_value == other.default_value
    }
}

#[derive(Debug, Clone)]
pub struct FieldDefinition {
    pub name: String,
    pub of_type: TypeRef,
    pub args: Vec<InputValue>,
    pub description: Option<String>,
}

impl FieldDefinition {
    /// Name, return type and arguments (in any order) match; descriptions are
    /// ignored.
    pub fn same_signature(&self, other: &FieldDefinition) -> bool {
        self.name == other.name
            && self.of_type == other.of_type
            && self.args.len() == other.args.len()
            && self.args.iter().all(|arg| {
                other
                    .args
                    .iter()
                    .find(|o| o.name == arg.name)
                    .is_some_and(|o| arg.same_signature(o))
            })
    }
}

#[derive(Debug, Clone)]
pub struct EnumValue {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone)]
pub enum TypeKind {
    Object(IndexMap<String, FieldDefinition>),
    InputObject(IndexMap<String, InputValue>),
    Enum(Vec<EnumValue>),
    Scalar,
}

impl TypeKind {
    pub fn name(&self) -> &'static str {
        match self {
            TypeKind::Object(_) => "object",
            TypeKind::InputObject(_) => "input object",
            TypeKind::Enum(_) => "enum",
            TypeKind::Scalar => "scalar",
        }
    }
}

#[derive(Debug, Clone)]
pub struct TypeDefinition {
    pub name: String,
    pub description: Option<String>,
    pub kind: TypeKind,
}

impl TypeDefinition {
    pub fn field(&self, name: &str) -> Option<&FieldDefinition> {
        match &self.kind {
            TypeKind::Object(fields) => fields.get(name),
            _ => None,
        }
    }

    pub fn is_object(&self) -> bool {
        matches!(self.kind, TypeKind::Object(_))
    }
}

#[derive(Debug, Clone)]
pub struct SchemaDocument {
    types: IndexMap<String, TypeDefinition>,
}

impl SchemaDocument {
    pub(crate) fn new(types: IndexMap<String, TypeDefinition>) -> Self {
        Self { types }
    }

    pub fn get(&self, name: &str) -> Option<&TypeDefinition> {
        self.types.get(name)
    }

    pub fn types(&self) -> impl Iterator<Item = &TypeDefinition> {
        self.types.values()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn has_mutation(&self) -> bool {
        self.types.contains_key(MUTATION)
    }

    pub fn is_object(&self, name: &str) -> bool {
        self.get(name).is_some_and(TypeDefinition::is_object)
    }

    pub fn field(&self, type_name: &str, field: &str) -> Option<&FieldDefinition> {
        self.get(type_name).and_then(|def| def.field(field))
    }

    /// Field names of a root type, in declaration order.
    pub fn root_fields(&self, root: &str) -> Vec<&str> {
        match self.get(root).map(|def| &def.kind) {
            Some(TypeKind::Object(fields)) => fields.keys().map(String::as_str).collect(),
            _ => Vec::new(),
        }
    }

    /// Printed SDL of the merged document.
    pub fn sdl(&self) -> String {
        self.to_string()
    }
}

impl Display for SchemaDocument {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (i, def) in self.types.values().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write_type(f, def)?;
        }
        Ok(())
    }
}

fn write_type(f: &mut Formatter<'_>, def: &TypeDefinition) -> fmt::Result {
    write_description(f, def.description.as_deref(), "")?;
    match &def.kind {
        TypeKind::Scalar => writeln!(f, "scalar {}", def.name),
        TypeKind::Enum(values) => {
            writeln!(f, "enum {} {{", def.name)?;
            for value in values {
                write_description(f, value.description.as_deref(), "  ")?;
                writeln!(f, "  {}", value.name)?;
            }
            writeln!(f, "}}")
        }
        TypeKind::InputObject(fields) => {
            writeln!(f, "input {} {{", def.name)?;
            for field in fields.values() {
                write_description(f, field.description.as_deref(), "  ")?;
                write!(f, "  ")?;
                write_input_value(f, field)?;
                writeln!(f)?;
            }
            writeln!(f, "}}")
        }
        TypeKind::Object(fields) => {
            writeln!(f, "type {} {{", def.name)?;
            for field in fields.values() {
                write_description(f, field.description.as_deref(), "  ")?;
                write!(f, "  {}", field.name)?;
                if !field.args.is_empty() {
                    write!(f, "(")?;
                    for (i, arg) in field.args.iter().enumerate() {
                        if i > 0 {
                            write!(f, ", ")?;
                        }
                        write_input_value(f, arg)?;
                    }
                    write!(f, ")")?;
                }
                writeln!(f, ": {}", field.of_type)?;
            }
            writeln!(f, "}}")
        }
    }
}

fn write_input_value(f: &mut Formatter<'_>, value: &InputValue) -> fmt::Result {
    write!(f, "{}: {}", value.name, value.of_type)?;
    if let Some(default) = &value.default_value {
        write!(f, " = {default}")?;
    }
    Ok(())
}

fn write_description(
    f: &mut Formatter<'_>,
    description: Option<&str>,
    indent: &str,
) -> fmt::Result {
    let Some(description) = description.filter(|d| !d.trim().is_empty()) else {
        return Ok(());
    };
    if !fits_block_string(description) {
        let quoted = serde_json::to_string(description).map_err(|_| fmt::Error)?;
        return writeln!(f, "{indent}{quoted}");
    }
    // Every line gets the same prefix, which the parser strips again as the
    // common indent; deeper indentation inside the text survives.
    writeln!(f, "{indent}\"\"\"")?;
    for line in description.lines() {
        if line.is_empty() {
            writeln!(f)?;
        } else {
            writeln!(f, "{indent}{}", line.replace("\"\"\"", "\\\"\"\""))?;
        }
    }
    writeln!(f, "{indent}\"\"\"")
}

/// Block strings drop leading and trailing blank lines, the indent of the
/// first line and carriage returns.
fn fits_block_string(description: &str) -> bool {
    description == description.trim()
        && !description.contains('\r')
        && description
            .lines()
            .all(|line| line.is_empty() || !line.trim().is_empty())
}
