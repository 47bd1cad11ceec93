/*
 * lib.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Markdown syntax tree type definitions for mdmap.
 *
 * This crate provides pure data type definitions for the markdown
 * syntax tree handed to mdmap transforms, mirroring the mdast node
 * shapes (`{ type, lang?, value, children? }`) produced by remark-style
 * parsers. It has minimal dependencies (serde, serde_json, hashlink)
 * and can be used by any crate that needs to read or write such trees.
 */

pub mod document;
pub mod node;
pub mod position;

// Re-export commonly used types at the crate root
pub use document::{Document, DocumentData};
pub use node::{
    Blockquote, Break, Code, Emphasis, Heading, Html, Image, InlineCode, Link, List, ListItem,
    Node, Paragraph, Root, Strong, Text, ThematicBreak, UnknownNode, Yaml,
};
pub use position::{Point, Position};
