use axum::http::{header, HeaderName, HeaderValue, Method};
use tower_http::cors::{AllowOrigin, CorsLayer};

const DEFAULT_ALLOWED_ORIGINS: &[&str] = &["http://localhost:3000", "http://localhost:5173"];

const PREFLIGHT_MAX_AGE_SECS: u64 = 86400;

pub fn create_cors_layer(configured_origins: &[String]) -> CorsLayer {
    let allowed_origins = build_allowed_origins(configured_origins);

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::ORIGIN,
            HeaderName::from_static("x-requested-with"),
        ])
        .expose_headers([
            header::CONTENT_LENGTH,
            header::CONTENT_TYPE,
            HeaderName::from_static("x-request-id"),
        ])
        .max_age(std::time::Duration::from_secs(PREFLIGHT_MAX_AGE_SECS))
}

fn build_allowed_origins(configured_origins: &[String]) -> AllowOrigin {
    let candidates: Vec<&str> = if configured_origins.is_empty() {
        DEFAULT_ALLOWED_ORIGINS.to_vec()
    } else {
        configured_origins.iter().map(String::as_str).collect()
    };

    let origins: Vec<HeaderValue> = candidates
        .iter()
        .filter_map(|origin| {
            let trimmed = origin.trim();
            if trimmed.is_empty() {
                return None;
            }
            match trimmed.parse::<HeaderValue>() {
                Ok(value) => {
                    tracing::debug!("CORS: Allowing origin: {}", trimmed);
                    Some(value)
                }
                Err(e) => {
                    tracing::warn!("CORS: Invalid origin '{}': {}", trimmed, e);
                    None
                }
            }
        })
        .collect();

    if origins.is_empty() {
        tracing::warn!(
            "CORS: No valid origins configured, using permissive settings for development"
        );
        AllowOrigin::any()
    } else {
        tracing::info!("CORS: Configured with {} allowed origin(s)", origins.len());
        AllowOrigin::list(origins)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_cors_layer() {
        // Should not panic when creating the CORS layer
        let _layer = create_cors_layer(&[]);
        let _layer = create_cors_layer(&["https://placard.example".to_string()]);
    }

    #[test]
    fn test_default_origins_are_valid() {
        // Verify default origins can be parsed as HeaderValues
        for origin in DEFAULT_ALLOWED_ORIGINS {
            assert!(
                origin.parse::<HeaderValue>().is_ok(),
                "Default origin '{}' should be a valid HeaderValue",
                origin
            );
        }
    }

    #[test]
    fn test_invalid_configured_origins_fall_back_to_any() {
        // All-invalid input must not panic and must degrade to a permissive layer
        let _layer = create_cors_layer(&["not an origin\u{7f}".to_string()]);
    }
}
