//! HSL redirect API handler

use crate::domain::RedirectUrl;
use crate::error::Result;
use crate::state::HasRedirect;
use axum::{
    extract::{Path, State},
    Json,
};

/// Generate an encrypted redirect URL for a tag
///
/// GET /hsl/{tag}
#[utoipa::path(
    get,
    path = "/hsl/{tag}",
    tag = "Redirect",
    params(
        ("tag" = String, Path, description = "Caller-supplied redirect context")
    ),
    responses(
        (status = 200, description = "Redirect URL generated", body = RedirectUrl),
        (status = 500, description = "Redirect service misconfigured or encryption failed")
    )
)]
pub async fn get_redirect_url<S: HasRedirect>(
    State(state): State<S>,
    Path(tag): Path<String>,
) -> Result<Json<RedirectUrl>> {
    let url = state.redirect_service().get_redirect_url(&tag)?;
    Ok(Json(url))
}
