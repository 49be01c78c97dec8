use async_graphql::{Request, Response, Variables};
use serde_json::Value;
use storefront_api::{AppState, Config};

pub fn setup_state() -> AppState {
    AppState::new(Config::default()).expect("Failed to build the storefront mock schema")
}

/// Helper function to execute GraphQL queries and mutations
pub async fn execute_graphql(
    state: &AppState,
    query: &str,
    variables: Option<Variables>,
) -> Response {
    let mut request = Request::new(query);

    if let Some(vars) = variables {
        request = request.variables(vars);
    }

    state.schema().execute(request).await
}

/// Execute and return `data` as JSON, failing the test on GraphQL errors.
#[allow(dead_code)]
pub async fn query_data(state: &AppState, query: &str) -> Value {
    let response = execute_graphql(state, query, None).await;
    assert!(
        response.errors.is_empty(),
        "Query should succeed: {:?}",
        response.errors
    );
    response
        .data
        .into_json()
        .expect("Failed to convert response data to JSON")
}
