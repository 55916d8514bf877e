//! # Configuration State
//!
//! Read-only after startup, so it is shared behind an `Arc` with no lock.

use std::sync::Arc;

use crate::config::{AppConfig, StoreConfig};

/// Shared, immutable application configuration.
#[derive(Debug, Clone)]
pub struct ConfigState {
    config: Arc<AppConfig>,
}

impl ConfigState {
    pub fn new(config: AppConfig) -> Self {
        ConfigState {
            config: Arc::new(config),
        }
    }

    /// Full application configuration.
    pub fn app(&self) -> &AppConfig {
        &self.config
    }

    /// Display settings.
    pub fn store(&self) -> &StoreConfig {
        &self.config.store
    }

    /// Largest accepted image upload, in bytes.
    pub fn max_image_bytes(&self) -> usize {
        self.config.max_image_bytes
    }
}
