//! # Service Configuration
//!
//! Environment-driven settings with development defaults, so a bare
//! `ServiceConfig::from_env()` yields a runnable local setup.
//!
//! | Variable                 | Default            |
//! |--------------------------|--------------------|
//! | `KOPIKAS_DB_PATH`        | `./kopikas_dev.db` |
//! | `KOPIKAS_UPLOAD_DIR`     | `./uploads`        |
//! | `KOPIKAS_UPLOAD_PREFIX`  | `/uploads`         |

use std::env;
use std::path::PathBuf;

// =============================================================================
// Service Config
// =============================================================================

/// Runtime settings for the service layer.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// SQLite database file path.
    pub db_path: PathBuf,

    /// Directory attachment files are written into.
    pub upload_dir: PathBuf,

    /// Public prefix prepended to stored attachment references.
    pub upload_prefix: String,
}

impl ServiceConfig {
    /// Loads the configuration from the environment, falling back to
    /// development defaults for anything unset or empty.
    pub fn from_env() -> Self {
        ServiceConfig {
            db_path: PathBuf::from(env_or("KOPIKAS_DB_PATH", "./kopikas_dev.db")),
            upload_dir: PathBuf::from(env_or("KOPIKAS_UPLOAD_DIR", "./uploads")),
            upload_prefix: env_or("KOPIKAS_UPLOAD_PREFIX", "/uploads"),
        }
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        ServiceConfig {
            db_path: PathBuf::from("./kopikas_dev.db"),
            upload_dir: PathBuf::from("./uploads"),
            upload_prefix: "/uploads".to_string(),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => value,
        _ => default.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServiceConfig::default();
        assert_eq!(config.db_path, PathBuf::from("./kopikas_dev.db"));
        assert_eq!(config.upload_dir, PathBuf::from("./uploads"));
        assert_eq!(config.upload_prefix, "/uploads");
    }
}
