use serde_json::json;

use crate::gql::error::SchemaError;
use crate::gql::mock::{Mock, MockTable};

pub fn mocks() -> Result<MockTable, SchemaError> {
    let mut table = MockTable::new();

    table.insert("ShoppingCartLine", || {
        json!({ "id": "123", "productQuantity": 23, "product": {} }).into()
    })?;
    table.insert("CartDetailResponse", || {
        Mock::object([
            ("cartId", "123".into()),
            ("lines", Mock::repeat(3)),
            ("errorMessage", Mock::null()),
        ])
    })?;

    table.insert("Query", || json!({ "myCart": {} }).into())?;
    table.insert("Mutation", || json!({ "addOrUpdateProductInCart": {} }).into())?;

    Ok(table)
}
