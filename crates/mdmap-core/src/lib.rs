//! Map block rendering for markdown sites
//!
//! This crate rewrites fenced `leaflet` code blocks in a markdown syntax
//! tree into the HTML and script that draw an interactive Leaflet map, and
//! records a word count for each document.
//!
//! # Architecture
//!
//! - [`spec`] - Turns a block's YAML payload into a [`MapSpec`]
//! - [`emit`] - Renders a [`MapSpec`] as container and script HTML nodes
//! - [`TransformPipeline`] - Ordered [`AstTransform`]s run once per document
//! - [`TransformContext`] - Per-document warnings and counters
//! - [`LeafletConfig`] - Language tag, asset prefix and scale settings
//!
//! # Example
//!
//! ```ignore
//! use mdmap_ast::Document;
//! use mdmap_core::{LeafletConfig, TransformContext, TransformPipeline};
//!
//! let config = LeafletConfig::from_yaml_str(&std::fs::read_to_string("mdmap.yml")?)?;
//! let pipeline = TransformPipeline::standard(&config);
//!
//! let mut doc: Document = serde_json::from_str(&tree_json)?;
//! let mut ctx = TransformContext::for_path("notes/atlas.md");
//! pipeline.execute(&mut doc, &mut ctx)?;
//! ```

pub mod config;
pub mod context;
pub mod emit;
pub mod error;
pub mod spec;
pub mod transform;
pub mod transforms;

// Re-export commonly used types
pub use config::{LeafletConfig, ScaleTransform};
pub use context::{TransformContext, TransformWarning};
pub use error::{MapError, Result};
pub use spec::{Bounds, MapSpec, Unit};
pub use spec::markers::Marker;
pub use spec::tiles::TileLayer;
pub use transform::{AstTransform, TransformPipeline};
pub use transforms::{
    BlockEdit, LeafletBlocksTransform, WORD_COUNT_KEY, WordCountTransform, apply_block_edits,
    count_words, render_word_count,
};
