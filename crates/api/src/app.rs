use std::time::Duration;

use async_graphql::http::GraphiQLSource;
use async_graphql::Executor;
use async_graphql_axum::{rejection::GraphQLRejection, GraphQLBatchRequest, GraphQLResponse};
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{Html, IntoResponse},
    routing::get,
    Router,
};
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::{HEALTH_PATH, SDL_PATH};
use crate::error::AppError;
use crate::state::AppState;

/// Build the Axum router: GraphQL on the configured path, plus health and SDL.
pub fn build_router(state: AppState) -> Router {
    let config = state.config();
    let graphql_path = config.graphql_path.clone();
    let timeout = Duration::from_secs(config.request_timeout_secs);

    Router::new()
        .route(HEALTH_PATH, get(health))
        .route(SDL_PATH, get(sdl))
        .route(&graphql_path, get(graphiql).post(graphql_handler))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, timeout))
        .layer(CorsLayer::permissive())
}

/// Executes a single request or a batch (JSON array) against the mock schema.
/// GraphQL-level failures come back as a normal response with `errors`; only an
/// unreadable body is an HTTP error.
async fn graphql_handler(
    State(state): State<AppState>,
    request: Result<GraphQLBatchRequest, GraphQLRejection>,
) -> Result<GraphQLResponse, AppError> {
    let request = request
        .map_err(|rejection| {
            AppError::BadRequest(format!("Invalid GraphQL request: {}", rejection.0))
        })?
        .into_inner();

    let response = state.schema().execute_batch(request).await;

    Ok(response.into())
}

async fn graphiql(State(state): State<AppState>) -> Html<String> {
    Html(
        GraphiQLSource::build()
            .endpoint(&state.config().graphql_path)
            .finish(),
    )
}

async fn sdl(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        state.document().sdl(),
    )
}

async fn health() -> &'static str {
    "ok"
}
