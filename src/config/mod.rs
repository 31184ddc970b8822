use std::env;

use uuid::Uuid;

pub mod cors;
pub mod security;

pub use cors::create_cors_layer;
pub use security::apply_security_headers;

const DEFAULT_PORT: u16 = 3001;
const DEFAULT_PUBLIC_BASE_URL: &str = "http://localhost:3001";

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    /// Externally reachable base URL, embedded in QR payloads. The printed
    /// codes go stale if this changes after events have been published.
    pub public_base_url: String,
    pub cors_allowed_origins: Vec<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "postgres://localhost/placard".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            public_base_url: env::var("PUBLIC_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_PUBLIC_BASE_URL.to_string()),
            cors_allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                .map(|v| {
                    v.split(',')
                        .map(|o| o.trim().to_string())
                        .filter(|o| !o.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
        }
    }

    /// Visitor-facing page URL for an event. This is the QR payload and must
    /// stay stable for the lifetime of the event.
    pub fn page_url(&self, id: Uuid) -> String {
        format!("{}/e/{}", self.public_base_url.trim_end_matches('/'), id)
    }

    pub fn qr_url(&self, id: Uuid) -> String {
        format!("{}/qr.png", self.page_url(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_url_is_stable_under_base_url_trailing_slash() {
        let id = Uuid::new_v4();
        let mut config = Config {
            database_url: String::new(),
            port: DEFAULT_PORT,
            public_base_url: "https://placard.example".to_string(),
            cors_allowed_origins: Vec::new(),
        };
        let without_slash = config.page_url(id);

        config.public_base_url = "https://placard.example/".to_string();
        assert_eq!(config.page_url(id), without_slash);
        assert_eq!(without_slash, format!("https://placard.example/e/{}", id));
    }

    #[test]
    fn test_qr_url_extends_page_url() {
        let id = Uuid::new_v4();
        let config = Config {
            database_url: String::new(),
            port: DEFAULT_PORT,
            public_base_url: "https://placard.example".to_string(),
            cors_allowed_origins: Vec::new(),
        };
        assert_eq!(config.qr_url(id), format!("{}/qr.png", config.page_url(id)));
    }
}
