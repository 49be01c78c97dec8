use serde_json::Value;

use crate::common::*;

fn names(list: &Value) -> Vec<&str> {
    list.as_array()
        .into_iter()
        .flatten()
        .filter_map(|item| item["name"].as_str())
        .collect()
}

#[tokio::test]
async fn test_unknown_field_is_rejected() {
    let state = setup_state();

    let response = execute_graphql(&state, "{ products { nope } }", None).await;

    assert!(!response.errors.is_empty(), "Unknown field should be rejected");
    assert!(
        !response.errors[0].locations.is_empty(),
        "Validation errors should carry a source location"
    );
}

#[tokio::test]
async fn test_malformed_query_is_rejected() {
    let state = setup_state();

    let response = execute_graphql(&state, "{ users { id ", None).await;

    assert!(!response.errors.is_empty(), "Malformed query should be rejected");
}

#[tokio::test]
async fn test_introspection_lists_root_fields() {
    let state = setup_state();

    let query = r#"
        {
            __schema {
                queryType { name }
                mutationType { name }
            }
            query: __type(name: "Query") { fields { name } }
            mutation: __type(name: "Mutation") { fields { name } }
        }
    "#;

    let data = query_data(&state, query).await;

    assert_eq!(data["__schema"]["queryType"]["name"], "Query");
    assert_eq!(data["__schema"]["mutationType"]["name"], "Mutation");
    assert_eq!(
        names(&data["query"]["fields"]),
        vec!["users", "myCart", "orders", "order", "products", "product"]
    );
    assert_eq!(names(&data["mutation"]["fields"]).len(), 13);
}

#[tokio::test]
async fn test_every_root_query_field_resolves() {
    let state = setup_state();

    let query = r#"
        {
            users { id }
            myCart { cartId }
            orders(filter: { page: 1, limit: 10 }) { errorMessage }
            order(id: "1") { errorMessage }
            products(filter: { page: 1, limit: 10 }) { errorMessage }
            product(id: "1") { errorMessage }
        }
    "#;

    let data = query_data(&state, query).await;

    for field in ["users", "myCart", "orders", "order", "products", "product"] {
        assert!(!data[field].is_null(), "`{field}` should resolve to a value");
    }
}

#[tokio::test]
async fn test_every_root_mutation_field_resolves() {
    let state = setup_state();

    let query = r#"
        mutation {
            signUp(name: "a", email: "b", password: "c") { __typename }
            signIn(email: "b", password: "c") { __typename }
            signOut { __typename }
            forgotPassword(email: "b") { __typename }
            resetPassword(currentPassword: "c", newPassword: "d") { __typename }
            newPassword(newPassword: "d") { __typename }
            addOrUpdateProductInCart(productId: "1", quantity: 1) { __typename }
            processCheckout(cartId: "1") { __typename }
            createProduct(input: { name: "a", price: 1, stock: 1 }) { __typename }
            updateProduct(id: "1", input: { name: "a", price: 1, stock: 1 }) { __typename }
            deleteProduct(id: "1") { __typename }
            likeProduct(productId: "1") { __typename }
            uploadProductImages(productId: "1", imageUrls: []) { __typename }
        }
    "#;

    let data = query_data(&state, query).await;

    assert_eq!(data["signIn"]["__typename"], "SignInResponse");
    assert_eq!(data["deleteProduct"]["__typename"], "AuthResponse");
    assert_eq!(data["uploadProductImages"]["__typename"], "PicturesResponse");
    assert_eq!(data.as_object().map(|o| o.len()), Some(13));
}

#[tokio::test]
async fn test_introspection_can_be_disabled() {
    let config = storefront_api::Config {
        introspection: false,
        ..Default::default()
    };
    let state = storefront_api::AppState::new(config).expect("Failed to build state");

    let response = execute_graphql(&state, "{ __schema { queryType { name } } }", None).await;
    let data = response.data.into_json().expect("Failed to convert data");

    assert!(
        !response.errors.is_empty() || data["__schema"].is_null(),
        "Introspection should not expose the schema when disabled"
    );
}

#[tokio::test]
async fn test_depth_limit_rejects_deep_queries() {
    let config = storefront_api::Config {
        depth_limit: Some(2),
        ..Default::default()
    };
    let state = storefront_api::AppState::new(config).expect("Failed to build state");

    let response = execute_graphql(&state, "{ myCart { lines { product { name } } } }", None).await;

    assert!(!response.errors.is_empty(), "Query deeper than the limit should fail");
}
