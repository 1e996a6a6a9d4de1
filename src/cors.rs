use crate::configuration::{CorsSettings, Environment};
use crate::routes::ApiError;
use axum::extract::{Request, State};
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE, ORIGIN};
use axum::http::{HeaderName, HeaderValue, Method};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use std::collections::HashSet;
use std::net::IpAddr;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Which browser origins may call the API.
///
/// Loopback origins are always allowed, as are requests without an
/// `Origin` header (curl, server-to-server calls, same-origin navigation).
#[derive(Clone, Debug)]
pub struct OriginPolicy {
    allowed_origins: Arc<HashSet<String>>,
    allow_any: bool,
}

impl OriginPolicy {
    pub fn new(settings: &CorsSettings, environment: Environment) -> Self {
        let allow_any =
            settings.allow_any_origin_in_development && environment == Environment::Development;
        if allow_any {
            tracing::warn!("Every origin is allowed: CORS allow-list is disabled in development");
        }
        Self {
            allowed_origins: Arc::new(
                settings
                    .allowed_origins
                    .iter()
                    .map(|origin| origin.trim_end_matches('/').to_string())
                    .collect(),
            ),
            allow_any,
        }
    }

    pub fn allows(&self, origin: &str) -> bool {
        self.allow_any || is_loopback(origin) || self.allowed_origins.contains(origin)
    }

    /// Adds the CORS response headers for allowed origins and answers preflights.
    pub fn layer(&self) -> CorsLayer {
        let policy = self.clone();
        CorsLayer::new()
            .allow_origin(AllowOrigin::predicate(move |origin: &HeaderValue, _| {
                origin.to_str().is_ok_and(|origin| policy.allows(origin))
            }))
            .allow_credentials(true)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([
                CONTENT_TYPE,
                AUTHORIZATION,
                HeaderName::from_static("x-requested-with"),
            ])
    }
}

fn is_loopback(origin: &str) -> bool {
    let Ok(url) = reqwest::Url::parse(origin) else {
        return false;
    };
    match url.host_str() {
        Some("localhost") => true,
        Some(host) => host
            .trim_start_matches('[')
            .trim_end_matches(']')
            .parse::<IpAddr>()
            .is_ok_and(|ip| ip.is_loopback()),
        None => false,
    }
}

/// Turns requests from origins outside the policy away with a 403.
pub async fn reject_disallowed_origins(
    State(policy): State<OriginPolicy>,
    request: Request,
    next: Next,
) -> Response {
    if let Some(origin) = request.headers().get(ORIGIN) {
        let allowed = origin.to_str().is_ok_and(|origin| policy.allows(origin));
        if !allowed {
            tracing::warn!(?origin, path = %request.uri().path(), "Rejected cross-origin request");
            return ApiError::cors_violation().into_response();
        }
    }
    next.run(request).await
}
