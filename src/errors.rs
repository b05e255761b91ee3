// src/errors.rs

//! Crate-wide error type and `Result` alias.
//!
//! Command failures are *not* errors: they are reported as
//! [`crate::exec::CommandOutcome`] values and only ever logged. The variants
//! here cover what can stop the binary before the lifecycle starts.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SupervisorError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, SupervisorError>;
