/*
 * tiles.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Tile server and overlay layer parsing.
 */

use serde::Serialize;
use yaml_rust2::Yaml;

use super::payload::{field, is_truthy, scalar_to_string};

/// A map tile source.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TileLayer {
    /// URL pattern such as `https://{s}.tile.example.org/{z}/{x}/{y}.png`.
    pub template: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribution: Option<String>,
}

impl TileLayer {
    /// Parse the compact `template|name|attribution` form.
    ///
    /// Segments are trimmed; name and attribution are optional and an empty
    /// segment counts as missing. Returns None when the template is empty.
    pub fn parse(text: &str) -> Option<Self> {
        let mut segments = text.split('|').map(str::trim);
        let template = segments.next().filter(|s| !s.is_empty())?;
        let name = non_empty(segments.next());
        let attribution = non_empty(segments.next());
        Some(TileLayer {
            template: template.to_string(),
            name,
            attribution,
        })
    }
}

fn non_empty(segment: Option<&str>) -> Option<String> {
    segment.filter(|s| !s.is_empty()).map(str::to_string)
}

/// Parse a single tile entry given as a mapping or a compact string.
///
/// A mapping must carry a `template`; mappings without one and nested lists
/// are unusable and yield None.
pub fn parse_tile_entry(raw: &Yaml) -> Option<TileLayer> {
    if !is_truthy(raw) {
        return None;
    }
    match raw {
        Yaml::Hash(_) => {
            let template = field(raw, "template")
                .filter(|t| is_truthy(t))
                .and_then(scalar_to_string)?;
            Some(TileLayer {
                template,
                name: field(raw, "name").and_then(scalar_to_string),
                attribution: field(raw, "attribution").and_then(scalar_to_string),
            })
        }
        Yaml::Array(_) => None,
        scalar => scalar_to_string(scalar).and_then(|text| TileLayer::parse(&text)),
    }
}

/// Parse a tile layer field into a non-empty list.
///
/// A single entry is lifted into a one-element list. Unusable entries are
/// dropped and input order is preserved. Returns None instead of an empty
/// list.
pub fn parse_tile_list(raw: Option<&Yaml>) -> Option<Vec<TileLayer>> {
    let raw = raw.filter(|r| is_truthy(r))?;
    let layers: Vec<TileLayer> = match raw {
        Yaml::Array(items) => items.iter().filter_map(parse_tile_entry).collect(),
        single => parse_tile_entry(single).into_iter().collect(),
    };
    if layers.is_empty() { None } else { Some(layers) }
}
