use crate::domain::{Interest, SignupField, SignupForm};
use crate::routes::{ErrorBody, HealthResponse, JoinWaitlistResponse};
use axum::Json;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "D-Bac AI Tea waitlist",
        description = "Signup endpoint of the D-Bac AI Tea landing page"
    ),
    paths(
        crate::routes::health_check::health_check,
        crate::routes::waitlist::join_waitlist,
    ),
    components(schemas(
        SignupForm,
        Interest,
        SignupField,
        JoinWaitlistResponse,
        HealthResponse,
        ErrorBody
    )),
    tags(
        (name = "waitlist", description = "Waitlist signups"),
        (name = "health", description = "Liveness probe")
    )
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
