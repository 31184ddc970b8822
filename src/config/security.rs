use std::env;

use axum::http::{HeaderName, HeaderValue};
use axum::Router;
use tower_http::set_header::SetResponseHeaderLayer;

/// Security header names (lowercase, `HeaderName::from_static` requires it)
const X_CONTENT_TYPE_OPTIONS: &str = "x-content-type-options";
const X_FRAME_OPTIONS: &str = "x-frame-options";
const X_XSS_PROTECTION: &str = "x-xss-protection";
const STRICT_TRANSPORT_SECURITY: &str = "strict-transport-security";
const CONTENT_SECURITY_POLICY: &str = "content-security-policy";
const REFERRER_POLICY: &str = "referrer-policy";
const PERMISSIONS_POLICY: &str = "permissions-policy";

/// Security header values
const NOSNIFF: &str = "nosniff";
const DENY: &str = "DENY";
const XSS_BLOCK: &str = "1; mode=block";
const HSTS_VALUE: &str = "max-age=31536000; includeSubDomains";
// Visitor pages carry an inline stylesheet and may embed external images
// from organizer-authored markdown
const CSP_VALUE: &str = "default-src 'none'; img-src * data:; style-src 'unsafe-inline'; frame-ancestors 'none'";
const REFERRER_POLICY_VALUE: &str = "strict-origin-when-cross-origin";
const PERMISSIONS_POLICY_VALUE: &str = "geolocation=(), microphone=(), camera=()";

#[derive(Clone)]
pub struct SecurityHeaders {
    include_hsts: bool,
}

impl SecurityHeaders {
    pub fn new(include_hsts: bool) -> Self {
        Self { include_hsts }
    }

    pub fn from_env() -> Self {
        let is_production = env::var("RUST_ENV")
            .map(|v| v.to_lowercase() == "production")
            .unwrap_or(false);

        if is_production {
            tracing::info!("Security: HSTS header enabled (production mode)");
        } else {
            tracing::info!("Security: HSTS header disabled (development mode)");
        }

        Self::new(is_production)
    }

    pub fn apply(&self, router: Router) -> Router {
        let mut router = router
            .layer(static_header(X_CONTENT_TYPE_OPTIONS, NOSNIFF))
            .layer(static_header(X_FRAME_OPTIONS, DENY))
            .layer(static_header(X_XSS_PROTECTION, XSS_BLOCK))
            .layer(static_header(CONTENT_SECURITY_POLICY, CSP_VALUE))
            .layer(static_header(REFERRER_POLICY, REFERRER_POLICY_VALUE))
            .layer(static_header(PERMISSIONS_POLICY, PERMISSIONS_POLICY_VALUE));

        // Only add HSTS in production (HTTPS environments)
        if self.include_hsts {
            router = router.layer(static_header(STRICT_TRANSPORT_SECURITY, HSTS_VALUE));
        }

        router
    }
}

fn static_header(name: &'static str, value: &'static str) -> SetResponseHeaderLayer<HeaderValue> {
    SetResponseHeaderLayer::overriding(
        HeaderName::from_static(name),
        HeaderValue::from_static(value),
    )
}

pub fn apply_security_headers(router: Router) -> Router {
    SecurityHeaders::from_env().apply(router)
}
