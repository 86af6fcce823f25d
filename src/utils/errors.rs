//! Error handling for Kinship
//!
//! This module defines the main error type used by every concept and by the
//! synchronization layer, plus the coarse classification the request boundary
//! uses to shape a response.

use thiserror::Error;

/// Main error type for Kinship
#[derive(Error, Debug)]
pub enum KinshipError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration loading error: {0}")]
    ConfigLoad(#[from] config::ConfigError),

    #[error("{0} not found")]
    NotFound(String),

    #[error("Not allowed: {0}")]
    NotAllowed(String),

    #[error("User {user} is not the owner of group {group}")]
    NotOwner { user: String, group: String },

    #[error("{0} already exists")]
    AlreadyExists(String),

    #[error("User {user} is already a member of group {group}")]
    AlreadyMember { user: String, group: String },

    #[error("Concurrent modification: {0}")]
    Conflict(String),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for Kinship operations
pub type Result<T> = std::result::Result<T, KinshipError>;

/// Coarse error classes surfaced to the request boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    NotAllowed,
    AlreadyExists,
    Generic,
}

impl KinshipError {
    /// Classify the error for response shaping
    pub fn kind(&self) -> ErrorKind {
        match self {
            KinshipError::NotFound(_) => ErrorKind::NotFound,
            KinshipError::NotAllowed(_)
            | KinshipError::NotOwner { .. }
            | KinshipError::Authentication(_) => ErrorKind::NotAllowed,
            KinshipError::AlreadyExists(_) | KinshipError::AlreadyMember { .. } => {
                ErrorKind::AlreadyExists
            }
            _ => ErrorKind::Generic,
        }
    }

    /// Check if the error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            KinshipError::Database(_) => true,
            KinshipError::Migration(_) => false,
            KinshipError::Config(_) => false,
            KinshipError::ConfigLoad(_) => false,
            KinshipError::NotFound(_) => false,
            KinshipError::NotAllowed(_) => false,
            KinshipError::NotOwner { .. } => false,
            KinshipError::AlreadyExists(_) => false,
            KinshipError::AlreadyMember { .. } => false,
            // a retry may observe a quieter record
            KinshipError::Conflict(_) => true,
            KinshipError::Authentication(_) => false,
            KinshipError::InvalidInput(_) => false,
            KinshipError::Serialization(_) => false,
            KinshipError::Io(_) => true,
            KinshipError::Internal(_) => false,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            KinshipError::Database(_) => ErrorSeverity::Critical,
            KinshipError::Migration(_) => ErrorSeverity::Critical,
            KinshipError::Config(_) | KinshipError::ConfigLoad(_) => ErrorSeverity::Critical,
            KinshipError::NotAllowed(_) => ErrorSeverity::Warning,
            KinshipError::NotOwner { .. } => ErrorSeverity::Warning,
            KinshipError::Authentication(_) => ErrorSeverity::Warning,
            KinshipError::Conflict(_) => ErrorSeverity::Warning,
            KinshipError::NotFound(_)
            | KinshipError::AlreadyExists(_)
            | KinshipError::AlreadyMember { .. }
            | KinshipError::InvalidInput(_) => ErrorSeverity::Info,
            _ => ErrorSeverity::Error,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
