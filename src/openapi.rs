//! OpenAPI 3.0 documentation assembly
//!
//! Served as JSON at `/api-docs/openapi.json` outside production.

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Wealth Core API",
        description = "Wealth backend core service API",
        license(name = "Proprietary"),
        contact(name = "Wealth Platform Team")
    ),
    tags(
        (name = "System", description = "Health checks and system status"),
        (name = "Redirect", description = "Encrypted HSL redirect URL generation"),
    ),
    components(
        schemas(
            crate::api::health::HealthResponse,
            crate::domain::RedirectUrl,
        )
    ),
    paths(
        crate::api::health::health,
        crate::api::health::ready,
        crate::api::redirect::get_redirect_url,
    ),
)]
pub struct ApiDoc;

impl ApiDoc {
    pub fn build() -> utoipa::openapi::OpenApi {
        let mut doc = Self::openapi();
        doc.info.version = env!("CARGO_PKG_VERSION").to_string();
        doc
    }
}
