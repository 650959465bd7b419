use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub jwt_secret: String,
    pub jwt_issuer: String,
    /// Token lifetime in seconds. `None` issues tokens without an expiry.
    pub token_ttl_secs: Option<i64>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        let token_ttl_secs = match env::var("TOKEN_TTL_SECS") {
            Ok(raw) => Some(
                raw.parse()
                    .context("TOKEN_TTL_SECS must be a valid number")?,
            ),
            Err(_) => None,
        };

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            port: env::var("PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            jwt_secret: env::var("JWT_SECRET").context("JWT_SECRET must be set")?,
            jwt_issuer: env::var("JWT_ISSUER").unwrap_or_else(|_| "internship-hub".to_string()),
            token_ttl_secs,
        })
    }
}
