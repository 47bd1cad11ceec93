/*
 * leaflet_blocks.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Transform that rewrites leaflet code blocks into map HTML.
 */

//! Leaflet block rewriting transform.
//!
//! This transform finds code blocks tagged with the map language and
//! replaces them with the HTML that initializes an interactive map.
//!
//! ## Input Structure
//!
//! ````markdown
//! ```leaflet
//! id: harbor
//! lat: 40
//! long: -70
//! marker: default, 40.1, -70.2, [[Harbor notes]]
//! ```
//! ````
//!
//! ## Output Structure
//!
//! Two `html` nodes (see [`crate::emit`]): the container plus info script,
//! and the initialization script. They take the place of the code block
//! and of the node right after it; when the code block is the last child
//! the second node is appended instead.
//!
//! ## Traversal
//!
//! Every sibling list is scanned in document order. Matches become
//! [`BlockEdit`]s that are applied once the list has been scanned, so the
//! scan never sees the inserted nodes. A node consumed as the reserved slot
//! of an earlier match is not inspected, even if it is itself a map block.

use mdmap_ast::{Code, Document, Node};

use crate::Result;
use crate::config::LeafletConfig;
use crate::context::TransformContext;
use crate::emit::render_map_nodes;
use crate::spec::MapSpec;
use crate::spec::payload::Payload;
use crate::transform::AstTransform;

const TRANSFORM_NAME: &str = "leaflet-blocks";

/// One pending replacement in a sibling list.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockEdit {
    /// Index of the first replaced node
    pub index: usize,

    /// Number of existing nodes removed starting at `index`
    pub consumed: usize,

    /// Nodes inserted in their place
    pub replacement: Vec<Node>,
}

/// Apply edits produced by a scan of `children`.
///
/// Edits must be sorted by index and must not overlap. They are applied
/// back to front so earlier indices stay valid.
pub fn apply_block_edits(children: &mut Vec<Node>, edits: Vec<BlockEdit>) {
    for edit in edits.into_iter().rev() {
        let end = (edit.index + edit.consumed).min(children.len());
        children.splice(edit.index..end, edit.replacement);
    }
}

/// Transform that rewrites map code blocks into HTML.
pub struct LeafletBlocksTransform {
    config: LeafletConfig,
}

impl LeafletBlocksTransform {
    pub fn new(config: LeafletConfig) -> Self {
        Self { config }
    }

    /// Whether a code block is tagged with the map language.
    fn is_map_block(&self, code: &Code) -> bool {
        code.lang
            .as_deref()
            .is_some_and(|lang| lang.eq_ignore_ascii_case(&self.config.language))
    }

    /// Build the edit for the map block at `index`.
    ///
    /// `line` is the block's starting source line, used in warnings.
    fn edit_for(
        &self,
        index: usize,
        siblings: usize,
        code: &Code,
        line: Option<usize>,
        ctx: &mut TransformContext,
    ) -> Result<BlockEdit> {
        let payload = match Payload::parse(&code.value) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::warn!(index, ?line, error = %e, "Map block payload is not valid YAML, using defaults");
                let location = match line {
                    Some(line) => format!("map block at line {}", line),
                    None => "map block".to_string(),
                };
                ctx.add_warning(
                    TRANSFORM_NAME,
                    format!("{} payload is not valid YAML: {}", location, e),
                );
                Payload::empty()
            }
        };
        let spec = MapSpec::from_payload(&payload, &self.config);
        let replacement = render_map_nodes(&spec, &self.config.scale)?.to_vec();

        let consumed = if self.config.consume_following && index + 1 < siblings {
            2
        } else {
            1
        };

        tracing::debug!(id = spec.dom_id(), index, consumed, "Rewriting map block");
        ctx.maps_rendered += 1;

        Ok(BlockEdit {
            index,
            consumed,
            replacement,
        })
    }

    /// Rewrite a sibling list and, depth-first, everything below it.
    fn rewrite_children(&self, children: &mut Vec<Node>, ctx: &mut TransformContext) -> Result<()> {
        let mut edits = Vec::new();
        let mut index = 0;

        while index < children.len() {
            if let Node::Code(code) = &children[index]
                && self.is_map_block(code)
            {
                let line = children[index].position().map(|p| p.start.line);
                let edit = self.edit_for(index, children.len(), code, line, ctx)?;
                index += edit.consumed;
                edits.push(edit);
                continue;
            }

            if let Some(grandchildren) = children[index].children_mut() {
                self.rewrite_children(grandchildren, ctx)?;
            }
            index += 1;
        }

        apply_block_edits(children, edits);
        Ok(())
    }
}

impl AstTransform for LeafletBlocksTransform {
    fn name(&self) -> &str {
        TRANSFORM_NAME
    }

    fn transform(&self, doc: &mut Document, ctx: &mut TransformContext) -> Result<()> {
        let before = ctx.maps_rendered;
        self.rewrite_children(&mut doc.tree.children, ctx)?;
        tracing::debug!("Rendered {} map block(s)", ctx.maps_rendered - before);
        Ok(())
    }
}
