use thiserror::Error;

/// Failures while assembling the executable schema. All of them are fatal at
/// startup: the server never listens on a partially built schema.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("failed to parse fragment `{fragment}`: {message}")]
    Parse { fragment: String, message: String },

    #[error("fragment `{fragment}` declares an unsupported {definition}")]
    Unsupported { fragment: String, definition: String },

    #[error("conflicting declarations of `{type_name}` in fragments `{first}` and `{second}`: {reason}")]
    TypeConflict {
        type_name: String,
        first: String,
        second: String,
        reason: String,
    },

    #[error("root field `{root}.{field}` is declared with different signatures in fragments `{first}` and `{second}`")]
    RootFieldConflict {
        root: String,
        field: String,
        first: String,
        second: String,
    },

    #[error("field `{type_name}.{field}` is extended in fragment `{fragment}` with a different signature")]
    FieldConflict {
        type_name: String,
        field: String,
        fragment: String,
    },

    #[error("`{owner}` references undeclared type `{referenced}`")]
    UnknownType { owner: String, referenced: String },

    #[error("`{owner}` cannot use `{referenced}`: {reason}")]
    InvalidReference {
        owner: String,
        referenced: String,
        reason: &'static str,
    },

    #[error("merged schema has no `Query` type")]
    MissingQuery,

    #[error("mock tables both provide `{type_name}`")]
    MockCollision { type_name: String },

    #[error("mock provided for `{type_name}`, which is not a declared output type")]
    UnknownMockType { type_name: String },

    #[error("invalid mock for `{type_name}`: {source}")]
    InvalidMock {
        type_name: String,
        #[source]
        source: MockError,
    },

    #[error("failed to build executable schema: {0}")]
    Build(#[from] async_graphql::dynamic::SchemaError),
}

/// A mock value that does not fit the declared type. Raised by startup
/// validation and, for values produced lazily, as a field error at execution.
#[derive(Debug, Clone, Error)]
pub enum MockError {
    #[error("expected {expected}, found {found}")]
    Coercion { expected: String, found: String },

    #[error("null given for non-null `{0}`")]
    NullForNonNull(String),

    #[error("`{type_name}` has no field `{field}`")]
    UnknownField { type_name: String, field: String },
}

impl MockError {
    pub(crate) fn coercion(expected: impl ToString, found: impl ToString) -> Self {
        MockError::Coercion {
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }
}
