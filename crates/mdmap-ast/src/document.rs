/*
 * document.rs
 * Copyright (c) 2025 Posit, PBC
 */

use hashlink::LinkedHashMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::node::{Node, Root};

/// Document-scoped data written by transforms and read by later stages.
///
/// Keys keep their insertion order so that serialized output is stable.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentData {
    entries: LinkedHashMap<String, Value>,
}

impl DocumentData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Read an entry as an unsigned integer.
    ///
    /// Returns None if the key is missing or holds anything else.
    pub fn get_u64(&self, key: &str) -> Option<u64> {
        self.entries.get(key).and_then(Value::as_u64)
    }

    /// Set an entry, replacing any previous value while keeping its slot.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        let value = value.into();
        if let Some(existing) = self.entries.get_mut(&key) {
            *existing = value;
        } else {
            self.entries.insert(key, value);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A parsed document as handed to the transform pipeline.
///
/// Bundles the raw source text, the syntax tree produced from it, and the
/// document-scoped data map. One `Document` is processed at a time and
/// nothing in it outlives that processing pass.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Document {
    /// Raw markdown source of the document.
    #[serde(default)]
    pub source: String,
    pub tree: Root,
    #[serde(default)]
    pub data: DocumentData,
}

impl Document {
    pub fn new(source: impl Into<String>, children: Vec<Node>) -> Self {
        Document {
            source: source.into(),
            tree: Root::new(children),
            data: DocumentData::new(),
        }
    }

    /// Top-level nodes of the tree.
    pub fn children(&self) -> &[Node] {
        &self.tree.children
    }
}
