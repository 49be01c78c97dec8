pub mod coerce;
pub mod document;
pub mod domains;
pub mod error;
pub mod merge;
pub mod mock;
pub mod resolver;
pub mod schema;

pub use document::SchemaDocument;
pub use error::{MockError, SchemaError};
pub use merge::{merge_fragments, Fragment};
pub use mock::{Mock, MockTable};
pub use schema::build_schema;
