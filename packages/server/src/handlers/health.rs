use axum::response::IntoResponse;

#[utoipa::path(
    get,
    path = "/",
    tag = "Health",
    responses((status = 200, description = "Service is running", body = String)),
)]
pub async fn health() -> impl IntoResponse {
    "Realty listings API is alive!"
}
