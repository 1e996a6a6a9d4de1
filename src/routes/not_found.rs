use crate::routes::errors::ApiError;
use axum::extract::OriginalUri;

/// Fallback for every path (or method) no handler claims.
pub async fn not_found(OriginalUri(uri): OriginalUri) -> ApiError {
    let path = uri
        .path_and_query()
        .map(|path_and_query| path_and_query.as_str())
        .unwrap_or_else(|| uri.path());
    ApiError::not_found(path)
}
