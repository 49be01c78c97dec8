use serde_json::json;

use crate::gql::error::SchemaError;
use crate::gql::mock::{Mock, MockTable};

pub fn mocks() -> Result<MockTable, SchemaError> {
    let mut table = MockTable::new();

    // Types
    table.insert("Product", || {
        Mock::object([
            ("id", "1".into()),
            ("name", "Product A".into()),
            ("price", 1999.into()),
            ("stock", 100.into()),
            ("likes", 12.into()),
            ("specification", "Description of Product A".into()),
            ("category", Mock::empty()),
            (
                "pictures",
                json!([{
                    "id": "234",
                    "imageUrl": "https://example.com/image1.jpg",
                    "createdAt": "2024-09-08T12:00:00Z"
                }])
                .into(),
            ),
        ])
    })?;
    table.insert("Picture", || {
        json!({
            "id": "234",
            "imageUrl": "https://example.com/image1.jpg",
            "createdAt": "2024-09-08T12:00:00Z"
        })
        .into()
    })?;
    table.insert("Category", || json!({ "id": "2", "name": "Fertilizers" }).into())?;

    // Responses
    table.insert("PaginationResponse", || {
        json!({ "page": 1, "limit": 10, "total": 20 }).into()
    })?;
    table.insert("ProductsListResponse", || {
        Mock::object([
            ("pagination", Mock::empty()),
            ("data", Mock::repeat(6)),
            ("errorMessage", Mock::null()),
        ])
    })?;
    table.insert("ProductResponse", || {
        json!({ "product": {}, "errorMessage": null }).into()
    })?;
    table.insert("PicturesResponse", || {
        Mock::object([
            ("pictures", Mock::repeat(2)),
            ("errorMessage", Mock::null()),
        ])
    })?;

    table.insert("Query", || json!({ "products": {}, "product": {} }).into())?;
    table.insert("Mutation", || {
        json!({
            "createProduct": {},
            "updateProduct": {},
            "deleteProduct": { "message": "Product deleted successfully." },
            "likeProduct": { "product": { "likes": 13 } },
            "uploadProductImages": {}
        })
        .into()
    })?;

    Ok(table)
}
