//! Server configuration
//!
//! All settings come from environment variables (a `.env` file is loaded
//! first when present):
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `WORK_DIR` | `./data` | Root for database and log files |
//! | `HTTP_PORT` | `8080` | Listen port |
//! | `DATABASE_PATH` | `<WORK_DIR>/database/hub.db` | SQLite file |
//! | `LOG_LEVEL` | `info` | Tracing filter |
//! | `LOG_DIR` | unset | Daily-rolling file logs when set |
//! | `ENVIRONMENT` | `development` | `development` or `production` |

use std::env;
use std::path::Path;

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub work_dir: String,
    pub http_port: u16,
    /// Explicit database file; defaults under the work dir when unset.
    pub database_path: Option<String>,
    pub log_level: String,
    pub log_dir: Option<String>,
    pub environment: String,
}

impl Config {
    /// Load configuration from the environment
    pub fn from_env() -> Self {
        Self {
            work_dir: env::var("WORK_DIR").unwrap_or_else(|_| "./data".to_string()),
            http_port: env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            database_path: env::var("DATABASE_PATH").ok(),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            log_dir: env::var("LOG_DIR").ok(),
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
        }
    }

    /// Environment config with work dir and port overridden, for tests and
    /// embedded setups
    pub fn with_overrides(work_dir: &str, http_port: u16) -> Self {
        Self {
            work_dir: work_dir.to_string(),
            http_port,
            ..Self::from_env()
        }
    }

    /// Resolved database file path
    pub fn database_path(&self) -> String {
        self.database_path
            .clone()
            .unwrap_or_else(|| format!("{}/database/hub.db", self.work_dir))
    }

    /// Create the work directory layout (database dir, log dir)
    pub fn ensure_work_dirs(&self) -> std::io::Result<()> {
        let db_path = self.database_path();
        if let Some(parent) = Path::new(&db_path).parent() {
            std::fs::create_dir_all(parent)?;
        }
        if let Some(log_dir) = &self.log_dir {
            std::fs::create_dir_all(log_dir)?;
        }
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        !self.is_production()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_path_defaults_under_work_dir() {
        let config = Config {
            work_dir: "/tmp/hub-test".to_string(),
            http_port: 8080,
            database_path: None,
            log_level: "info".to_string(),
            log_dir: None,
            environment: "development".to_string(),
        };
        assert_eq!(config.database_path(), "/tmp/hub-test/database/hub.db");
    }

    #[test]
    fn test_explicit_database_path_wins() {
        let config = Config {
            work_dir: "/tmp/hub-test".to_string(),
            http_port: 8080,
            database_path: Some("/var/lib/hub.db".to_string()),
            log_level: "info".to_string(),
            log_dir: None,
            environment: "production".to_string(),
        };
        assert_eq!(config.database_path(), "/var/lib/hub.db");
        assert!(config.is_production());
        assert!(!config.is_development());
    }

    #[test]
    fn test_overrides_replace_work_dir_and_port() {
        let config = Config::with_overrides("/tmp/elsewhere", 9099);
        assert_eq!(config.work_dir, "/tmp/elsewhere");
        assert_eq!(config.http_port, 9099);
    }
}
