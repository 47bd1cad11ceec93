/*
 * error.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Error types for mdmap-core.
 */

//! Error types for mdmap-core

use thiserror::Error;

/// Errors surfaced by the transform pipeline.
///
/// Malformed map block content never produces one of these: payload
/// problems degrade to defaults inside the assembler. Only configuration
/// loading and the pipeline seam return errors.
#[derive(Error, Debug)]
pub enum MapError {
    #[error("Configuration error: {0}")]
    Config(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Output formatting error: {0}")]
    Format(#[from] std::fmt::Error),

    #[error("Transform error: {0}")]
    Transform(String),
}

impl MapError {
    /// Create a transform error from any message.
    pub fn transform(msg: impl Into<String>) -> Self {
        Self::Transform(msg.into())
    }

    /// Create an invalid-configuration error from any message.
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, MapError>;
