/*
 * transform.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * AST transformation pipeline infrastructure.
 */

//! AST transformation pipeline infrastructure.
//!
//! - [`AstTransform`] - The trait implemented by all transformations
//! - [`TransformPipeline`] - Ordered collection of transforms to execute
//!
//! Transforms run once per document, in insertion order. Each transform
//! can rewrite the syntax tree, write document-scoped data, and record
//! warnings on the [`TransformContext`].
//!
//! # Example
//!
//! ```ignore
//! use mdmap_core::{LeafletConfig, TransformContext, TransformPipeline};
//!
//! let pipeline = TransformPipeline::standard(&LeafletConfig::default());
//! let mut ctx = TransformContext::new();
//! pipeline.execute(&mut document, &mut ctx)?;
//! ```

use mdmap_ast::Document;

use crate::Result;
use crate::config::LeafletConfig;
use crate::context::TransformContext;
use crate::transforms::{LeafletBlocksTransform, WordCountTransform};

/// Trait for document transformations.
///
/// # Thread Safety
///
/// Transforms must be `Send + Sync` so that a host can process several
/// documents in parallel with one shared pipeline.
pub trait AstTransform: Send + Sync {
    /// Human-readable name for this transform.
    ///
    /// Used for logging and warnings.
    fn name(&self) -> &str;

    /// Apply the transformation to a document.
    ///
    /// # Errors
    ///
    /// Returns an error if the transformation fails.
    fn transform(&self, doc: &mut Document, ctx: &mut TransformContext) -> Result<()>;
}

/// A pipeline of transforms to execute in order.
pub struct TransformPipeline {
    transforms: Vec<Box<dyn AstTransform>>,
}

impl TransformPipeline {
    /// Create a new empty pipeline.
    pub fn new() -> Self {
        Self {
            transforms: Vec::new(),
        }
    }

    /// The standard pipeline: leaflet block rewriting, then word count.
    pub fn standard(config: &LeafletConfig) -> Self {
        let mut pipeline = Self::new();
        pipeline.push(Box::new(LeafletBlocksTransform::new(config.clone())));
        pipeline.push(Box::new(WordCountTransform::new()));
        pipeline
    }

    /// Add a transform to the pipeline.
    pub fn push(&mut self, transform: Box<dyn AstTransform>) {
        self.transforms.push(transform);
    }

    /// Add multiple transforms to the pipeline.
    pub fn extend(&mut self, transforms: impl IntoIterator<Item = Box<dyn AstTransform>>) {
        self.transforms.extend(transforms);
    }

    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }

    /// Execute all transforms in insertion order.
    ///
    /// # Errors
    ///
    /// Returns the first error encountered. Execution stops on error.
    pub fn execute(&self, doc: &mut Document, ctx: &mut TransformContext) -> Result<()> {
        for transform in &self.transforms {
            tracing::debug!(
                transform = transform.name(),
                input = ?ctx.input(),
                "Running transform"
            );
            transform.transform(doc, ctx)?;
        }

        Ok(())
    }

    /// List the names of all transforms in execution order.
    pub fn transform_names(&self) -> Vec<&str> {
        self.transforms.iter().map(|t| t.name()).collect()
    }
}

impl Default for TransformPipeline {
    fn default() -> Self {
        Self::new()
    }
}
