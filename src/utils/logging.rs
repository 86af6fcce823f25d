//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging utilities
//! for the Kinship backend.

use std::path::Path;

use tracing::{debug, error, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config::LoggingConfig;
use crate::utils::errors::{KinshipError, Result};

/// Initialize logging based on configuration.
///
/// The returned guard flushes the file writer on drop and must be held for
/// the lifetime of the process when a log file is configured.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_new(&config.level)
        .map_err(|e| KinshipError::Config(format!("Invalid log filter {}: {}", config.level, e)))?;

    let stdout_layer = if config.json {
        tracing_subscriber::fmt::layer().json().with_writer(std::io::stdout).boxed()
    } else {
        tracing_subscriber::fmt::layer().with_writer(std::io::stdout).boxed()
    };

    let (file_layer, guard) = match config.file_path.as_deref() {
        Some(path) => {
            let path = Path::new(path);
            let directory = path.parent().unwrap_or_else(|| Path::new("."));
            let file_name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| "kinship.log".to_string());

            let file_appender = tracing_appender::rolling::daily(directory, file_name);
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(non_blocking)
                .boxed();
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stdout_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| KinshipError::Config(format!("Logging already initialized: {}", e)))?;

    info!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Log user actions with structured data
pub fn log_user_action(user: &str, action: &str, details: Option<&str>) {
    info!(
        user = user,
        action = action,
        details = details,
        "User action performed"
    );
}

/// Log group events
pub fn log_group_event(group: &str, event: &str, user: Option<&str>, details: Option<&str>) {
    info!(
        group = group,
        event = event,
        user = user,
        details = details,
        "Group event occurred"
    );
}

/// Log a badge transition from unearned to earned
pub fn log_badge_awarded(user: &str, badge: &str) {
    info!(user = user, badge = badge, "Badge awarded");
}

/// Log store operations
pub fn log_store_operation(operation: &str, collection: &str, duration_ms: u64, success: bool) {
    if success {
        debug!(
            operation = operation,
            collection = collection,
            duration_ms = duration_ms,
            "Store operation completed"
        );
    } else {
        error!(
            operation = operation,
            collection = collection,
            duration_ms = duration_ms,
            "Store operation failed"
        );
    }
}
