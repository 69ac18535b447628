//! Service layer for dependency injection
//!
//! `SimpleServices` is a lightweight container that owns the configuration
//! and hands out constructed service clients to the CLI commands.

use std::sync::Arc;

use crate::config::Config;
use crate::core::services::ChosicClient;

pub struct SimpleServices {
    config: Arc<Config>,
}

impl SimpleServices {
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> Arc<Config> {
        self.config.clone()
    }

    pub fn create_search_client(&self) -> ChosicClient {
        self.config.create_search_client()
    }
}
