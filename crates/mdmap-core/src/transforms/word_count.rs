/*
 * word_count.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Transform that records a document's word count in its metadata.
 */

//! Word count side channel.
//!
//! Counts whitespace-separated tokens in the raw document source and stores
//! the count under [`WORD_COUNT_KEY`] in the document data, where page
//! templates pick it up through [`render_word_count`].

use mdmap_ast::{Document, DocumentData};

use crate::Result;
use crate::context::TransformContext;
use crate::transform::AstTransform;

/// Document data key holding the word count.
pub const WORD_COUNT_KEY: &str = "wordcount";

/// Count whitespace-separated tokens in `text`.
///
/// Empty and whitespace-only text count as one word, matching a plain
/// split of the trimmed text.
pub fn count_words(text: &str) -> u64 {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return 1;
    }
    trimmed.split_whitespace().count() as u64
}

/// The word count badge for a document; a missing count reads as 0.
pub fn render_word_count(data: &DocumentData) -> String {
    let count = data.get_u64(WORD_COUNT_KEY).unwrap_or(0);
    format!("<span class=\"wc\">~{} words</span>", count)
}

/// Transform that stores the document's word count.
#[derive(Debug, Default)]
pub struct WordCountTransform;

impl WordCountTransform {
    pub fn new() -> Self {
        Self
    }
}

impl AstTransform for WordCountTransform {
    fn name(&self) -> &str {
        "word-count"
    }

    fn transform(&self, doc: &mut Document, _ctx: &mut TransformContext) -> Result<()> {
        let count = count_words(&doc.source);
        tracing::debug!(count, "Counted words");
        doc.data.insert(WORD_COUNT_KEY, count);
        Ok(())
    }
}
