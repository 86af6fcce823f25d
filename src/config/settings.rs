//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from configuration files and environment variables.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::utils::errors::{KinshipError, Result};

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub store: StoreConfig,
    pub collections: CollectionsConfig,
    pub concepts: ConceptsConfig,
    pub logging: LoggingConfig,
}

/// Which document store backend holds the collections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Memory,
    Postgres,
}

/// Document store configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_seconds: u64,
    /// Attempts a read-modify-write makes before giving up with `Conflict`
    pub max_update_retries: u32,
}

/// Collection name per concept
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CollectionsConfig {
    pub users: String,
    pub posts: String,
    pub comments: String,
    pub friends: String,
    pub friend_requests: String,
    pub groups: String,
    pub milestones: String,
    pub maps: String,
}

/// Limits enforced by the collaborator concepts
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ConceptsConfig {
    pub min_password_length: usize,
    pub max_post_length: usize,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub file_path: Option<String>,
    pub json: bool,
}

impl Settings {
    /// Load settings from `.env`, an optional `config` file and `KINSHIP__*`
    /// environment variables, layered over the defaults
    pub fn new() -> Result<Self> {
        dotenv::dotenv().ok();

        let settings = config::Config::builder()
            .add_source(config::Config::try_from(&Settings::default())?)
            .add_source(config::File::with_name("config").required(false))
            .add_source(
                config::Environment::with_prefix("KINSHIP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Load settings from one explicit file, layered over the defaults
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let path_str = path
            .to_str()
            .ok_or_else(|| KinshipError::Config(format!("Non UTF-8 config path: {}", path.display())))?;

        let settings = config::Config::builder()
            .add_source(config::Config::try_from(&Settings::default())?)
            .add_source(config::File::with_name(path_str))
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Render the settings as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| KinshipError::Config(format!("Failed to render settings: {}", e)))
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<()> {
        super::validation::validate_settings(self)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            store: StoreConfig {
                backend: StoreBackend::Memory,
                url: "postgresql://localhost/kinship".to_string(),
                max_connections: 10,
                min_connections: 1,
                acquire_timeout_seconds: 30,
                max_update_retries: 16,
            },
            collections: CollectionsConfig {
                users: "users".to_string(),
                posts: "posts".to_string(),
                comments: "comments".to_string(),
                friends: "friends".to_string(),
                friend_requests: "friendRequests".to_string(),
                groups: "groups".to_string(),
                milestones: "milestones".to_string(),
                maps: "maps".to_string(),
            },
            concepts: ConceptsConfig {
                min_password_length: 1,
                max_post_length: 5000,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                file_path: None,
                json: false,
            },
        }
    }
}
