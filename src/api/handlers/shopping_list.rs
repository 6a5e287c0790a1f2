//! Shopping-list download endpoint.

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;

use crate::app_state::AppState;
use crate::auth::token_from_header;
use crate::error::{ErrorResponse, GatewayError};

/// `GET /recipes/download_shopping_cart` — Download the consolidated
/// shopping list for the authenticated user's cart as a plain-text
/// attachment.
///
/// # Errors
///
/// Returns [`GatewayError::Unauthorized`] without a valid
/// `Authorization: Token <key>` header, or a data-access error if the
/// cart cannot be fetched.
#[utoipa::path(
    get,
    path = "/api/v1/recipes/download_shopping_cart",
    tag = "ShoppingList",
    summary = "Download shopping list",
    description = "Aggregates the ingredient lines of every recipe in the user's cart into one list (amounts summed per ingredient, first-occurrence order) and returns it as a downloadable text file.",
    responses(
        (status = 200, description = "Plain-text shopping list", body = String, content_type = "text/plain"),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
    )
)]
pub async fn download_shopping_cart(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, GatewayError> {
    let header_value = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(GatewayError::Unauthorized)?;
    let token = token_from_header(header_value)?;

    let user = state.auth.authenticate(token).await?;
    let document = state.shopping_list.build_document(user).await?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"shopping_list.txt\"",
            ),
        ],
        document,
    ))
}

/// Shopping-list routes, mounted under `/api/v1`.
pub fn routes() -> Router<AppState> {
    Router::new().route(
        "/recipes/download_shopping_cart",
        get(download_shopping_cart),
    )
}
