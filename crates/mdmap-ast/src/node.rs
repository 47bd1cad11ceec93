/*
 * node.rs
 * Copyright (c) 2025 Posit, PBC
 */

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::position::Position;

/*
 * A data structure that mimics the mdast `Node` union.
 *
 * Flow content (paragraphs, code, html, ...) and phrasing content
 * (text, emphasis, links, ...) share a single enum, the same way mdast
 * does. Serialization uses the mdast JSON shape, with the node kind in
 * a `type` field.
 *
 * Node kinds without a dedicated variant (GFM tables, footnotes,
 * references, directives, ...) land in `Node::Unknown` and are written
 * back unchanged. A known kind with missing required fields also ends up
 * there, since serde tries the untagged variant when a tagged one fails.
 */

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Node {
    Root(Root),
    Paragraph(Paragraph),
    Heading(Heading),
    Code(Code),
    Html(Html),
    Blockquote(Blockquote),
    List(List),
    ListItem(ListItem),
    ThematicBreak(ThematicBreak),
    Text(Text),
    InlineCode(InlineCode),
    Emphasis(Emphasis),
    Strong(Strong),
    Link(Link),
    Image(Image),
    Break(Break),
    // frontmatter
    Yaml(Yaml),
    #[serde(untagged)]
    Unknown(UnknownNode),
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Root {
    #[serde(default)]
    pub children: Vec<Node>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

impl Root {
    pub fn new(children: Vec<Node>) -> Self {
        Root {
            children,
            position: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paragraph {
    #[serde(default)]
    pub children: Vec<Node>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Heading {
    pub depth: u8,
    #[serde(default)]
    pub children: Vec<Node>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

/// A fenced or indented code block.
///
/// `lang` is the first word of the fence info string, `meta` the rest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Code {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<String>,
    #[serde(default)]
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

/// Raw HTML, passed through to the output untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Html {
    #[serde(default)]
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Blockquote {
    #[serde(default)]
    pub children: Vec<Node>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct List {
    #[serde(default)]
    pub ordered: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<u32>,
    #[serde(default)]
    pub spread: bool,
    #[serde(default)]
    pub children: Vec<Node>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListItem {
    #[serde(default)]
    pub spread: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checked: Option<bool>,
    #[serde(default)]
    pub children: Vec<Node>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThematicBreak {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Text {
    #[serde(default)]
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InlineCode {
    #[serde(default)]
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Emphasis {
    #[serde(default)]
    pub children: Vec<Node>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Strong {
    #[serde(default)]
    pub children: Vec<Node>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub children: Vec<Node>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Break {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Yaml {
    #[serde(default)]
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

/// Any node kind this crate does not model.
///
/// `children` stays typed so that transforms can still reach nodes nested
/// inside, e.g. a code block inside a footnote definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnknownNode {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<Node>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Node {
    /// A raw HTML node with no source position.
    pub fn html(value: impl Into<String>) -> Self {
        Node::Html(Html {
            value: value.into(),
            position: None,
        })
    }

    /// A code node with an optional language tag.
    pub fn code(lang: Option<&str>, value: impl Into<String>) -> Self {
        Node::Code(Code {
            lang: lang.map(str::to_string),
            meta: None,
            value: value.into(),
            position: None,
        })
    }

    pub fn text(value: impl Into<String>) -> Self {
        Node::Text(Text {
            value: value.into(),
            position: None,
        })
    }

    pub fn paragraph(children: Vec<Node>) -> Self {
        Node::Paragraph(Paragraph {
            children,
            position: None,
        })
    }

    pub fn blockquote(children: Vec<Node>) -> Self {
        Node::Blockquote(Blockquote {
            children,
            position: None,
        })
    }

    /// The mdast `type` string of this node.
    pub fn type_name(&self) -> &str {
        match self {
            Node::Root(_) => "root",
            Node::Paragraph(_) => "paragraph",
            Node::Heading(_) => "heading",
            Node::Code(_) => "code",
            Node::Html(_) => "html",
            Node::Blockquote(_) => "blockquote",
            Node::List(_) => "list",
            Node::ListItem(_) => "listItem",
            Node::ThematicBreak(_) => "thematicBreak",
            Node::Text(_) => "text",
            Node::InlineCode(_) => "inlineCode",
            Node::Emphasis(_) => "emphasis",
            Node::Strong(_) => "strong",
            Node::Link(_) => "link",
            Node::Image(_) => "image",
            Node::Break(_) => "break",
            Node::Yaml(_) => "yaml",
            Node::Unknown(n) => &n.kind,
        }
    }

    /// Child nodes, for node kinds that can have any.
    pub fn children(&self) -> Option<&[Node]> {
        match self {
            Node::Root(n) => Some(&n.children),
            Node::Paragraph(n) => Some(&n.children),
            Node::Heading(n) => Some(&n.children),
            Node::Blockquote(n) => Some(&n.children),
            Node::List(n) => Some(&n.children),
            Node::ListItem(n) => Some(&n.children),
            Node::Emphasis(n) => Some(&n.children),
            Node::Strong(n) => Some(&n.children),
            Node::Link(n) => Some(&n.children),
            Node::Unknown(n) => n.children.as_deref(),
            Node::Code(_)
            | Node::Html(_)
            | Node::ThematicBreak(_)
            | Node::Text(_)
            | Node::InlineCode(_)
            | Node::Image(_)
            | Node::Break(_)
            | Node::Yaml(_) => None,
        }
    }

    /// Mutable access to child nodes, for node kinds that can have any.
    pub fn children_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            Node::Root(n) => Some(&mut n.children),
            Node::Paragraph(n) => Some(&mut n.children),
            Node::Heading(n) => Some(&mut n.children),
            Node::Blockquote(n) => Some(&mut n.children),
            Node::List(n) => Some(&mut n.children),
            Node::ListItem(n) => Some(&mut n.children),
            Node::Emphasis(n) => Some(&mut n.children),
            Node::Strong(n) => Some(&mut n.children),
            Node::Link(n) => Some(&mut n.children),
            Node::Unknown(n) => n.children.as_mut(),
            _ => None,
        }
    }

    pub fn position(&self) -> Option<&Position> {
        match self {
            Node::Root(n) => n.position.as_ref(),
            Node::Paragraph(n) => n.position.as_ref(),
            Node::Heading(n) => n.position.as_ref(),
            Node::Code(n) => n.position.as_ref(),
            Node::Html(n) => n.position.as_ref(),
            Node::Blockquote(n) => n.position.as_ref(),
            Node::List(n) => n.position.as_ref(),
            Node::ListItem(n) => n.position.as_ref(),
            Node::ThematicBreak(n) => n.position.as_ref(),
            Node::Text(n) => n.position.as_ref(),
            Node::InlineCode(n) => n.position.as_ref(),
            Node::Emphasis(n) => n.position.as_ref(),
            Node::Strong(n) => n.position.as_ref(),
            Node::Link(n) => n.position.as_ref(),
            Node::Image(n) => n.position.as_ref(),
            Node::Break(n) => n.position.as_ref(),
            Node::Yaml(n) => n.position.as_ref(),
            Node::Unknown(n) => n.position.as_ref(),
        }
    }
}
