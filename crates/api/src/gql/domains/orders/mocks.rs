use serde_json::json;

use crate::gql::error::SchemaError;
use crate::gql::mock::{Mock, MockTable};

pub fn mocks() -> Result<MockTable, SchemaError> {
    let mut table = MockTable::new();

    table.insert("OrderLine", || {
        json!({ "id": "1", "productQuantity": 2, "unitPrice": 1999, "product": {} }).into()
    })?;
    table.insert("Order", || {
        Mock::object([
            ("id", "1001".into()),
            ("status", "pending".into()),
            ("totalAmount", 3998.into()),
            ("createdAt", "2024-09-08T12:00:00Z".into()),
            ("user", Mock::empty()),
            ("lines", Mock::repeat(2)),
        ])
    })?;

    table.insert("OrdersListResponse", || {
        Mock::object([
            ("pagination", Mock::empty()),
            ("data", Mock::repeat(3)),
            ("errorMessage", Mock::null()),
        ])
    })?;
    table.insert("OrderResponse", || {
        json!({ "order": {}, "errorMessage": null }).into()
    })?;

    table.insert("Query", || json!({ "orders": {}, "order": {} }).into())?;
    table.insert("Mutation", || json!({ "processCheckout": {} }).into())?;

    Ok(table)
}
