use serde_json::json;

use crate::common::*;

#[tokio::test]
async fn test_products_list_has_complete_products() {
    let state = setup_state();

    let query = r#"
        {
            products(filter: { page: 1, limit: 10, category: null }) {
                data { id name price }
                errorMessage
            }
        }
    "#;

    let data = query_data(&state, query).await;
    let products = data["products"]["data"]
        .as_array()
        .expect("data should be a list");

    assert!(!products.is_empty());
    assert!(data["products"]["errorMessage"].is_null());
    for product in products {
        assert!(!product["id"].is_null());
        assert!(!product["name"].is_null());
        assert!(!product["price"].is_null());
    }
}

#[tokio::test]
async fn test_products_nested_category_and_pictures() {
    let state = setup_state();

    let query = r#"
        {
            products(filter: { page: 2, limit: 6, category: { id: "2", name: "Fertilizers" } }) {
                pagination { page limit total }
                data {
                    category { id name }
                    pictures { id imageUrl createdAt }
                }
            }
        }
    "#;

    let data = query_data(&state, query).await;
    let products = data["products"]["data"].as_array().expect("data should be a list");

    assert_eq!(products.len(), 6);
    assert_eq!(products[0]["category"], json!({ "id": "2", "name": "Fertilizers" }));
    assert_eq!(
        products[0]["pictures"],
        json!([{
            "id": "234",
            "imageUrl": "https://example.com/image1.jpg",
            "createdAt": "2024-09-08T12:00:00Z"
        }])
    );
}

#[tokio::test]
async fn test_single_product() {
    let state = setup_state();

    let query = r#"{ product(id: "42") { product { id name stock specification } errorMessage } }"#;

    let data = query_data(&state, query).await;

    assert_eq!(
        data["product"],
        json!({
            "product": {
                "id": "1",
                "name": "Product A",
                "stock": 100,
                "specification": "Description of Product A"
            },
            "errorMessage": null
        })
    );
}

#[tokio::test]
async fn test_product_management_mutations() {
    let state = setup_state();

    let query = r#"
        mutation {
            createProduct(input: { name: "Seeds", price: 500, stock: 3 }) { product { id name } }
            updateProduct(
                id: "1"
                input: { name: "Seeds", price: 600, stock: 3, categoryId: "2" }
            ) {
                product { price }
            }
            deleteProduct(id: "1") { message errorMessage }
            likeProduct(productId: "1") { product { name likes } }
            uploadProductImages(productId: "1", imageUrls: ["https://example.com/a.jpg"]) {
                pictures { id imageUrl }
                errorMessage
            }
        }
    "#;

    let data = query_data(&state, query).await;

    assert_eq!(data["createProduct"]["product"]["name"], "Product A");
    assert_eq!(data["updateProduct"]["product"]["price"], 1999);
    assert_eq!(
        data["deleteProduct"],
        json!({ "message": "Product deleted successfully.", "errorMessage": null })
    );
    assert_eq!(
        data["likeProduct"]["product"],
        json!({ "name": "Product A", "likes": 13 })
    );
    assert_eq!(
        data["uploadProductImages"]["pictures"].as_array().map(Vec::len),
        Some(2)
    );
    assert!(data["uploadProductImages"]["errorMessage"].is_null());
}

#[tokio::test]
async fn test_products_requires_filter() {
    let state = setup_state();

    let response = execute_graphql(&state, "{ products { errorMessage } }", None).await;

    assert!(
        !response.errors.is_empty(),
        "Missing non-null filter argument should be rejected"
    );
}
