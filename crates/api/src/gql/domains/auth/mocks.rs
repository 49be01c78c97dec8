use serde_json::json;

use crate::gql::error::SchemaError;
use crate::gql::mock::{Mock, MockTable};

pub const MOCK_TOKEN: &str = "mock-token-123456";

pub fn mocks() -> Result<MockTable, SchemaError> {
    let mut table = MockTable::new();

    // Types
    table.insert("Role", || json!({ "id": "1", "name": "client" }).into())?;
    table.insert("User", || {
        json!({
            "id": "1",
            "name": "John Doe",
            "email": "john.doe@example.com",
            "shoppingCartId": "1"
        })
        .into()
    })?;

    // Responses
    table.insert("SignUpResponse", || {
        Mock::object([("user", Mock::empty()), ("errorMessage", Mock::null())])
    })?;
    table.insert("SignInResponse", || {
        Mock::object([
            ("user", Mock::empty()),
            ("token", MOCK_TOKEN.into()),
            ("errorMessage", Mock::null()),
        ])
    })?;
    table.insert("AuthResponse", || {
        json!({ "message": "Action completed successfully.", "errorMessage": null }).into()
    })?;
    table.insert("ForgotPasswordResponse", || {
        json!({
            "resetToken": "d4f5e6g7h8i9j0k1l2m3n4o5p6q7r8s9t0u1v2w3x4y5z6a7b8c9d0e1f2g3h4i5j6k7l8m9n0",
            "expiresAt": "2024-09-11T12:34:56Z",
            "errorMessage": null
        })
        .into()
    })?;

    table.insert("Mutation", || {
        json!({
            "signUp": {},
            "signIn": {},
            "signOut": {},
            "forgotPassword": {},
            "resetPassword": {},
            "newPassword": {}
        })
        .into()
    })?;

    Ok(table)
}
