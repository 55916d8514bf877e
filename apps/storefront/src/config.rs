//! # Configuration
//!
//! Loaded once at startup from environment variables, with defaults for
//! everything.
//!
//! | variable                      | default                          |
//! |-------------------------------|----------------------------------|
//! | `KNITCRAFT_DB_PATH`           | `<data dir>/knitcraft.db`        |
//! | `KNITCRAFT_BIND_ADDR`         | `127.0.0.1`                      |
//! | `KNITCRAFT_PORT`              | `8501`                           |
//! | `KNITCRAFT_ADMIN_USERNAME`    | `admin`                          |
//! | `KNITCRAFT_ADMIN_PASSWORD`    | `admin123`                       |
//! | `KNITCRAFT_MAX_IMAGE_BYTES`   | `5242880` (5 MiB)                |
//!
//! The admin variables only matter the first time a database file is
//! created: they name the account seeded into an empty `admin_users` table.

use std::env;
use std::path::PathBuf;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use knitcraft_core::{AdminCredential, DEFAULT_ADMIN_PASSWORD, DEFAULT_ADMIN_USERNAME};
use knitcraft_db::DbConfig;

/// Default HTTP port.
pub const DEFAULT_PORT: u16 = 8501;

/// Default upload size limit for product images.
pub const DEFAULT_MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Width, in pixels, the storefront renders product images at.
pub const IMAGE_DISPLAY_WIDTH: u32 = 200;

/// Display settings sent to the browser.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StoreConfig {
    /// Page title.
    pub store_name: String,

    /// Prefix shown in front of prices.
    pub currency_symbol: String,

    /// Image render width in pixels.
    pub image_display_width: u32,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            store_name: "KnitCraft Store".to_string(),
            currency_symbol: "₹".to_string(),
            image_display_width: IMAGE_DISPLAY_WIDTH,
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// SQLite database file.
    pub database_path: PathBuf,

    /// Interface to listen on.
    pub bind_addr: String,

    /// Port to listen on.
    pub port: u16,

    /// Account seeded into an empty admin table.
    pub seed_admin: AdminCredential,

    /// Largest accepted image upload, in bytes.
    pub max_image_bytes: usize,

    /// Display settings.
    pub store: StoreConfig,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let database_path = match env::var("KNITCRAFT_DB_PATH") {
            Ok(path) => PathBuf::from(path),
            Err(_) => default_database_path()?,
        };

        let config = AppConfig {
            database_path,

            bind_addr: env::var("KNITCRAFT_BIND_ADDR").unwrap_or_else(|_| "127.0.0.1".to_string()),

            port: env::var("KNITCRAFT_PORT")
                .unwrap_or_else(|_| DEFAULT_PORT.to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("KNITCRAFT_PORT".to_string()))?,

            seed_admin: AdminCredential::new(
                env::var("KNITCRAFT_ADMIN_USERNAME")
                    .unwrap_or_else(|_| DEFAULT_ADMIN_USERNAME.to_string()),
                env::var("KNITCRAFT_ADMIN_PASSWORD")
                    .unwrap_or_else(|_| DEFAULT_ADMIN_PASSWORD.to_string()),
            ),

            max_image_bytes: env::var("KNITCRAFT_MAX_IMAGE_BYTES")
                .unwrap_or_else(|_| DEFAULT_MAX_IMAGE_BYTES.to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("KNITCRAFT_MAX_IMAGE_BYTES".to_string()))?,

            store: StoreConfig::default(),
        };

        config.validate()?;
        Ok(config)
    }

    /// Configuration for tests: in-memory database, default admin.
    pub fn for_tests() -> Self {
        AppConfig {
            database_path: PathBuf::from(":memory:"),
            bind_addr: "127.0.0.1".to_string(),
            port: 0,
            seed_admin: AdminCredential::new(DEFAULT_ADMIN_USERNAME, DEFAULT_ADMIN_PASSWORD),
            max_image_bytes: DEFAULT_MAX_IMAGE_BYTES,
            store: StoreConfig::default(),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.seed_admin.username.trim().is_empty() {
            return Err(ConfigError::InvalidValue("KNITCRAFT_ADMIN_USERNAME".to_string()));
        }
        if self.max_image_bytes == 0 {
            return Err(ConfigError::InvalidValue("KNITCRAFT_MAX_IMAGE_BYTES".to_string()));
        }
        Ok(())
    }

    /// Returns the `host:port` string to bind.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }

    /// Database settings derived from this configuration.
    pub fn db_config(&self) -> DbConfig {
        let base = if self.database_path.as_os_str() == ":memory:" {
            DbConfig::in_memory()
        } else {
            DbConfig::new(&self.database_path)
        };
        base.seed_admin(Some(self.seed_admin.clone()))
    }

    /// Request body limit: a base64 image is 4/3 of its size, plus room
    /// for the other form fields. Saturates at `usize::MAX`.
    pub fn body_limit(&self) -> usize {
        (self.max_image_bytes / 3)
            .saturating_mul(4)
            .saturating_add(64 * 1024)
    }
}

/// Determines the database file path based on the platform.
///
/// ## Platform-Specific Paths
/// - **macOS**: `~/Library/Application Support/com.knitcraft.store/knitcraft.db`
/// - **Windows**: `%APPDATA%\knitcraft\store\data\knitcraft.db`
/// - **Linux**: `~/.local/share/store/knitcraft.db`
fn default_database_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs = ProjectDirs::from("com", "knitcraft", "store")
        .ok_or(ConfigError::NoDataDirectory)?;

    let data_dir = proj_dirs.data_dir();
    std::fs::create_dir_all(data_dir)
        .map_err(|e| ConfigError::DataDirectory(e.to_string()))?;

    Ok(data_dir.join("knitcraft.db"))
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Could not determine app data directory; set KNITCRAFT_DB_PATH")]
    NoDataDirectory,

    #[error("Could not create app data directory: {0}")]
    DataDirectory(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_defaults() {
        let store = StoreConfig::default();
        assert_eq!(store.store_name, "KnitCraft Store");
        assert_eq!(store.currency_symbol, "₹");
        assert_eq!(store.image_display_width, 200);
    }

    #[test]
    fn test_body_limit_covers_base64_image() {
        let config = AppConfig::for_tests();
        assert!(config.body_limit() > config.max_image_bytes / 3 * 4);
    }

    #[test]
    fn test_body_limit_saturates_for_huge_images() {
        let mut config = AppConfig::for_tests();
        config.max_image_bytes = usize::MAX;
        assert_eq!(config.body_limit(), usize::MAX);

        config.max_image_bytes = usize::MAX / 4 * 3;
        assert_eq!(config.body_limit(), usize::MAX);
    }

    #[test]
    fn test_in_memory_path_maps_to_in_memory_db() {
        let db = AppConfig::for_tests().db_config();
        assert_eq!(db.max_connections, 1);
        assert_eq!(db.seed_admin.unwrap().username, "admin");
    }

    #[test]
    fn test_validate_rejects_blank_admin() {
        let mut config = AppConfig::for_tests();
        config.seed_admin = AdminCredential::new(" ", "x");
        assert!(matches!(config.validate(), Err(ConfigError::InvalidValue(_))));
    }
}
