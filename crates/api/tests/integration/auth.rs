use serde_json::json;
use storefront_api::gql::domains::auth::MOCK_TOKEN;

use crate::common::*;

#[tokio::test]
async fn test_sign_in_returns_stable_token_and_user() {
    let state = setup_state();

    let query = r#"
        mutation {
            signIn(email: "a@b.com", password: "x") {
                token
                user { id name }
                errorMessage
            }
        }
    "#;

    let data = query_data(&state, query).await;

    assert_eq!(
        data["signIn"],
        json!({
            "token": MOCK_TOKEN,
            "user": { "id": "1", "name": "John Doe" },
            "errorMessage": null
        })
    );
}

#[tokio::test]
async fn test_sign_in_is_repeatable() {
    let state = setup_state();
    let query = r#"
        mutation { signIn(email: "a@b.com", password: "x") { token user { id email } } }
    "#;

    let first = query_data(&state, query).await;
    let second = query_data(&state, query).await;

    assert_eq!(first, second, "Mock values should not change between calls");
}

#[tokio::test]
async fn test_sign_up_returns_user_with_role() {
    let state = setup_state();

    let query = r#"
        mutation {
            signUp(name: "Jane", email: "jane@example.com", password: "secret") {
                user {
                    id
                    email
                    shoppingCartId
                    role { id name }
                }
                errorMessage
            }
        }
    "#;

    let data = query_data(&state, query).await;
    let user = &data["signUp"]["user"];

    assert_eq!(user["email"], "john.doe@example.com");
    assert_eq!(user["shoppingCartId"], "1");
    assert_eq!(user["role"], json!({ "id": "1", "name": "client" }));
    assert!(data["signUp"]["errorMessage"].is_null());
}

#[tokio::test]
async fn test_password_mutations_share_auth_response() {
    let state = setup_state();

    let query = r#"
        mutation {
            signOut { message errorMessage }
            resetPassword(currentPassword: "old", newPassword: "new") { message errorMessage }
            newPassword(newPassword: "new") { message errorMessage }
        }
    "#;

    let data = query_data(&state, query).await;
    let expected = json!({ "message": "Action completed successfully.", "errorMessage": null });

    assert_eq!(data["signOut"], expected);
    assert_eq!(data["resetPassword"], expected);
    assert_eq!(data["newPassword"], expected);
}

#[tokio::test]
async fn test_forgot_password_returns_reset_token() {
    let state = setup_state();

    let query = r#"
        mutation {
            forgotPassword(email: "john.doe@example.com") { resetToken expiresAt errorMessage }
        }
    "#;

    let data = query_data(&state, query).await;
    let response = &data["forgotPassword"];

    assert!(response["resetToken"].as_str().is_some_and(|t| !t.is_empty()));
    assert_eq!(response["expiresAt"], "2024-09-11T12:34:56Z");
    assert!(response["errorMessage"].is_null());
}

#[tokio::test]
async fn test_sign_in_requires_arguments() {
    let state = setup_state();

    let query = r#"mutation { signIn(email: "a@b.com") { token } }"#;
    let response = execute_graphql(&state, query, None).await;

    assert!(
        !response.errors.is_empty(),
        "Missing required argument should be rejected"
    );
}
