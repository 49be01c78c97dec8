use crate::gql::error::SchemaError;
use crate::gql::mock::{Mock, MockTable};

pub fn mocks() -> Result<MockTable, SchemaError> {
    let mut table = MockTable::new();
    table.insert("Query", || Mock::object([("users", Mock::repeat(10))]))?;
    Ok(table)
}
