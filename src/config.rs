// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 ForumHub Contributors

//! # Runtime Configuration
//!
//! Environment variable names, default values and the startup loader.
//! Configuration is read from the environment once at startup and never
//! mutated afterwards.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `JWT_SECRET` | Shared HMAC signing secret | Required; startup fails without it |
//! | `TOKEN_TTL_SECS` | Access token lifetime in seconds | `7200` (2 hours) |
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info` |
//! | `SEED_ADMIN_EMAIL` | Email for a seeded admin account | Optional |
//! | `SEED_ADMIN_PASSWORD` | Password for the seeded admin account | Optional |
//! | `SEED_COURSES` | Comma-separated course names to seed | Optional |

use std::env;

/// Environment variable name for the token signing secret.
///
/// The secret is the sole trust anchor for both issuance and validation.
/// It must be set; a missing or empty value is a fatal startup condition.
pub const JWT_SECRET_ENV: &str = "JWT_SECRET";

/// Environment variable name for the token lifetime in seconds.
pub const TOKEN_TTL_ENV: &str = "TOKEN_TTL_SECS";

/// Environment variable name for the bind host.
pub const HOST_ENV: &str = "HOST";

/// Environment variable name for the bind port.
pub const PORT_ENV: &str = "PORT";

/// Environment variable name for the log format (`json` or `pretty`).
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

/// Environment variable name for the seeded admin email.
pub const SEED_ADMIN_EMAIL_ENV: &str = "SEED_ADMIN_EMAIL";

/// Environment variable name for the seeded admin password.
pub const SEED_ADMIN_PASSWORD_ENV: &str = "SEED_ADMIN_PASSWORD";

/// Environment variable name for the comma-separated seed course list.
pub const SEED_COURSES_ENV: &str = "SEED_COURSES";

/// Default access token lifetime: 2 hours.
pub const DEFAULT_TOKEN_TTL_SECS: i64 = 7200;

/// Startup configuration loaded from the environment.
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub jwt_secret: Vec<u8>,
    pub token_ttl_secs: i64,
}

impl ServerConfig {
    /// Load configuration from the environment.
    ///
    /// Fails when `JWT_SECRET` is missing or empty; every other variable
    /// has a default.
    pub fn from_env() -> Result<Self, String> {
        let jwt_secret = env::var(JWT_SECRET_ENV)
            .map_err(|_| format!("{JWT_SECRET_ENV} must be set"))?;
        if jwt_secret.is_empty() {
            return Err(format!("{JWT_SECRET_ENV} must not be empty"));
        }

        let token_ttl_secs = match env::var(TOKEN_TTL_ENV) {
            Ok(raw) => raw
                .parse::<i64>()
                .ok()
                .filter(|ttl| *ttl > 0)
                .ok_or_else(|| format!("{TOKEN_TTL_ENV} must be a positive integer"))?,
            Err(_) => DEFAULT_TOKEN_TTL_SECS,
        };

        let host = env::var(HOST_ENV).unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var(PORT_ENV)
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .map_err(|_| format!("{PORT_ENV} must be a valid port number"))?;

        Ok(Self {
            host,
            port,
            jwt_secret: jwt_secret.into_bytes(),
            token_ttl_secs,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Env vars are process-global; one test owns them all to avoid races
    // between parallel test threads.
    #[test]
    fn config_loading_from_env() {
        let saved = env::var(JWT_SECRET_ENV).ok();

        env::remove_var(JWT_SECRET_ENV);
        assert!(ServerConfig::from_env().is_err(), "missing secret must be fatal");

        env::set_var(JWT_SECRET_ENV, "");
        assert!(ServerConfig::from_env().is_err(), "empty secret must be fatal");

        env::set_var(JWT_SECRET_ENV, "unit-test-secret");
        let config = ServerConfig::from_env().expect("config loads");
        assert_eq!(config.jwt_secret, b"unit-test-secret");
        assert_eq!(config.token_ttl_secs, DEFAULT_TOKEN_TTL_SECS);

        match saved {
            Some(value) => env::set_var(JWT_SECRET_ENV, value),
            None => env::remove_var(JWT_SECRET_ENV),
        }
    }
}
