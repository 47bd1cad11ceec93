/*
 * transforms/mod.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Document transforms.
 */

//! Document transforms.
//!
//! - [`LeafletBlocksTransform`] - Rewrite `leaflet` code blocks into map HTML
//! - [`WordCountTransform`] - Store the document word count in its data

mod leaflet_blocks;
mod word_count;

pub use leaflet_blocks::{BlockEdit, LeafletBlocksTransform, apply_block_edits};
pub use word_count::{WORD_COUNT_KEY, WordCountTransform, count_words, render_word_count};
