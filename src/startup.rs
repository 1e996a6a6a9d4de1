use crate::api_doc::openapi_json;
use crate::configuration::{Environment, Settings};
use crate::cors::{OriginPolicy, reject_disallowed_origins};
use crate::notification_dispatcher::NotificationDispatcher;
use crate::routes::{health_check, join_waitlist, not_found, panic_response};
use crate::static_assets::landing_page;
use axum::Router;
use axum::extract::{DefaultBodyLimit, Request};
use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};
use std::net::{SocketAddr, TcpListener};
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

/// Largest request body accepted on any route.
const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub dispatcher: NotificationDispatcher,
    pub environment: Environment,
}

pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
}

impl Application {
    pub async fn build(configuration: Settings) -> Result<Self, anyhow::Error> {
        let email_client = configuration
            .email_client
            .client(configuration.notifications.sender.clone())?;
        let admin_recipient = configuration
            .notifications
            .admin_recipient()
            .map_err(|e| anyhow::anyhow!("Invalid admin email address: {}", e))?;
        let environment = configuration.application.environment;
        let state = AppState {
            dispatcher: NotificationDispatcher::new(Arc::new(email_client), admin_recipient),
            environment,
        };

        let address = format!(
            "{}:{}",
            configuration.application.host, configuration.application.port
        );
        let listener = TcpListener::bind(address)?;
        listener.set_nonblocking(true)?;
        let local_address = listener.local_addr()?;
        tracing::info!(
            address = %local_address,
            environment = environment.as_str(),
            admin_email = %configuration.notifications.admin_email,
            static_dir = ?configuration.application.static_dir,
            "Waitlist server listening; health check at http://{}/api/health",
            local_address
        );

        Ok(Self {
            port: local_address.port(),
            listener,
            router: router(state, &configuration),
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Serves requests until SIGINT or SIGTERM, then drains in-flight ones.
    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        let listener = tokio::net::TcpListener::from_std(self.listener)?;
        axum::serve(
            listener,
            self.router
                .into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown_signal())
        .await
    }
}

pub fn router(state: AppState, configuration: &Settings) -> Router {
    let origin_policy = OriginPolicy::new(&configuration.cors, state.environment);

    let api = Router::new()
        .route("/api/waitlist", post(join_waitlist).fallback(not_found))
        .route("/api/health", get(health_check).fallback(not_found))
        .route("/api/openapi.json", get(openapi_json).fallback(not_found));
    let app = match &configuration.application.static_dir {
        Some(directory) => api.fallback_service(landing_page(directory, state.environment)),
        None => api.fallback(not_found),
    };

    // Outermost layer last: tracing wraps everything, the origin check runs
    // before CORS headers are computed.
    app.with_state(state)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(origin_policy.layer())
        .layer(from_fn_with_state(origin_policy, reject_disallowed_origins))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request| {
                tracing::info_span!(
                    "HTTP request",
                    method = %request.method(),
                    path = %request.uri().path(),
                    request_id = %Uuid::new_v4(),
                )
            }),
        )
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("Shutdown signal received, draining connections");
}
