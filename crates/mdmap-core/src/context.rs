/*
 * context.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Per-document context for transform execution.
 */

//! Per-document context for transform execution.
//!
//! The `TransformContext` is the mutable state passed through all
//! transforms while one document is processed. It is created fresh for each
//! document and dropped afterwards; nothing in it is shared across
//! documents.

use std::path::{Path, PathBuf};

/// A non-fatal problem noticed while transforming a document.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformWarning {
    /// Name of the transform that raised the warning
    pub transform: String,

    /// Human-readable description
    pub message: String,
}

/// Context for a single document transform pass.
#[derive(Debug, Default)]
pub struct TransformContext {
    /// Path of the document being transformed, if it came from a file
    pub input: Option<PathBuf>,

    /// Number of map blocks rewritten so far
    pub maps_rendered: usize,

    /// Non-fatal warnings collected during transforms
    pub warnings: Vec<TransformWarning>,
}

impl TransformContext {
    /// Create a context for a document without a backing file.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a context for the document at `input`.
    pub fn for_path(input: impl Into<PathBuf>) -> Self {
        Self {
            input: Some(input.into()),
            ..Self::default()
        }
    }

    pub fn input(&self) -> Option<&Path> {
        self.input.as_deref()
    }

    /// Add a non-fatal warning.
    ///
    /// Warnings are collected during transforms and can be displayed
    /// after processing completes. They don't stop processing.
    pub fn add_warning(&mut self, transform: &str, message: impl Into<String>) {
        self.warnings.push(TransformWarning {
            transform: transform.to_string(),
            message: message.into(),
        });
    }
}
