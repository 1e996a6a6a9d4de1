use crate::configuration::Environment;
use crate::routes::not_found;
use axum::Router;
use axum::extract::{Request, State};
use axum::handler::HandlerWithoutStateExt;
use axum::http::header::{CACHE_CONTROL, EXPIRES, PRAGMA};
use axum::http::{HeaderValue, StatusCode};
use axum::middleware::{Next, from_fn_with_state};
use axum::response::Response;
use std::path::Path;
use tower::ServiceBuilder;
use tower_http::services::ServeDir;

/// Stylesheet that browsers must always re-fetch.
const UNCACHED_STYLESHEET: &str = "/styles.css";

/// Serves the landing page from `directory`; misses end up in `not_found`.
pub fn landing_page(directory: &Path, environment: Environment) -> Router {
    let serve_dir = ServeDir::new(directory)
        .call_fallback_on_method_not_allowed(true)
        .fallback(not_found.into_service());
    Router::new().fallback_service(
        ServiceBuilder::new()
            .layer(from_fn_with_state(environment, cache_headers))
            .service(serve_dir),
    )
}

async fn cache_headers(
    State(environment): State<Environment>,
    request: Request,
    next: Next,
) -> Response {
    let uncached = request.uri().path() == UNCACHED_STYLESHEET;
    let mut response = next.run(request).await;
    let status = response.status();
    if !(status.is_success() || status == StatusCode::NOT_MODIFIED) {
        return response;
    }

    let headers = response.headers_mut();
    if uncached {
        headers.insert(
            CACHE_CONTROL,
            HeaderValue::from_static("no-cache, no-store, must-revalidate"),
        );
        headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));
        headers.insert(EXPIRES, HeaderValue::from_static("0"));
    } else {
        headers.insert(CACHE_CONTROL, cache_control(environment));
    }
    response
}

fn cache_control(environment: Environment) -> HeaderValue {
    match environment {
        Environment::Production => HeaderValue::from_static("public, max-age=86400"),
        Environment::Development | Environment::Test => {
            HeaderValue::from_static("public, max-age=0")
        }
    }
}
