/// Health check endpoint
///
/// GET /health
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is up", body = String)),
    tag = "Health"
)]
pub async fn health_check() -> &'static str {
    "OK"
}
