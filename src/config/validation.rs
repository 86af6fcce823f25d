//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use std::collections::HashSet;

use super::{Settings, StoreBackend};
use crate::utils::errors::{KinshipError, Result};

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_store_config(&settings.store)?;
    validate_collections_config(&settings.collections)?;
    validate_concepts_config(&settings.concepts)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate document store configuration
fn validate_store_config(config: &super::StoreConfig) -> Result<()> {
    if config.max_update_retries == 0 {
        return Err(KinshipError::Config(
            "Max update retries must be greater than 0".to_string()
        ));
    }

    if config.backend == StoreBackend::Memory {
        return Ok(());
    }

    if config.url.is_empty() {
        return Err(KinshipError::Config(
            "Database URL is required".to_string()
        ));
    }

    if config.max_connections == 0 {
        return Err(KinshipError::Config(
            "Max connections must be greater than 0".to_string()
        ));
    }

    if config.min_connections > config.max_connections {
        return Err(KinshipError::Config(
            "Min connections cannot be greater than max connections".to_string()
        ));
    }

    Ok(())
}

/// Validate collection names: present and pairwise distinct
fn validate_collections_config(config: &super::CollectionsConfig) -> Result<()> {
    let names = [
        &config.users,
        &config.posts,
        &config.comments,
        &config.friends,
        &config.friend_requests,
        &config.groups,
        &config.milestones,
        &config.maps,
    ];

    let mut seen = HashSet::new();
    for name in names {
        if name.is_empty() {
            return Err(KinshipError::Config(
                "Collection names cannot be empty".to_string()
            ));
        }
        if !seen.insert(name.as_str()) {
            return Err(KinshipError::Config(
                format!("Collection name used twice: {}", name)
            ));
        }
    }

    Ok(())
}

/// Validate concept limits
fn validate_concepts_config(config: &super::ConceptsConfig) -> Result<()> {
    if config.min_password_length == 0 {
        return Err(KinshipError::Config(
            "Minimum password length must be greater than 0".to_string()
        ));
    }

    if config.max_post_length == 0 {
        return Err(KinshipError::Config(
            "Maximum post length must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(KinshipError::Config(
            "Log level is required".to_string()
        ));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(KinshipError::Config(
            format!("Invalid log level: {}. Valid levels: {:?}", config.level, valid_levels)
        ));
    }

    if let Some(path) = &config.file_path {
        if path.is_empty() {
            return Err(KinshipError::Config(
                "Log file path cannot be empty when set".to_string()
            ));
        }
    }

    Ok(())
}
