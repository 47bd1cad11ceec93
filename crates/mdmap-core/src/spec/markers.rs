/*
 * markers.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Point-of-interest marker parsing.
 */

use serde::Serialize;
use yaml_rust2::Yaml;

use super::coerce::{parse_number, to_number};
use super::payload::{field, is_truthy, scalar_to_string};

/// A point of interest on the map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub lat: f64,
    pub lng: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub popup: Option<String>,
}

/// Parse the marker field of a payload.
///
/// Accepts a single marker or a list of markers, each given as a mapping
/// or in positional form. Markers without both coordinates are dropped.
/// Returns None only when the field itself is absent; a list whose markers
/// were all dropped comes back empty.
pub fn parse_markers(raw: Option<&Yaml>) -> Option<Vec<Marker>> {
    let raw = raw.filter(|r| is_truthy(r))?;
    let markers = match raw {
        Yaml::Array(items) => items.iter().filter_map(parse_marker).collect(),
        single => parse_marker(single).into_iter().collect(),
    };
    Some(markers)
}

/// Parse one marker from a mapping, a sequence, or a comma-separated string.
pub fn parse_marker(item: &Yaml) -> Option<Marker> {
    match item {
        Yaml::Hash(_) => parse_marker_record(item),
        Yaml::Array(values) => {
            let segments: Vec<String> = values
                .iter()
                .map(|v| scalar_to_string(v).unwrap_or_default().trim().to_string())
                .collect();
            parse_positional(&segments)
        }
        scalar => {
            let text = scalar_to_string(scalar)?;
            let segments: Vec<String> = text.split(',').map(|s| s.trim().to_string()).collect();
            parse_positional(&segments)
        }
    }
}

fn parse_marker_record(record: &Yaml) -> Option<Marker> {
    let lat = to_number(field(record, "lat"))?;
    let lng = to_number(field(record, "lng").or_else(|| field(record, "long")))?;
    let link = field(record, "link").and_then(scalar_to_string);
    let popup = field(record, "popup")
        .or_else(|| field(record, "desc"))
        .and_then(scalar_to_string);
    Some(Marker {
        lat,
        lng,
        link,
        popup,
    })
}

/// Positional form: `[type?, lat, lng, link?, popup?]`.
///
/// A leading segment that is not a number is a marker type label and is
/// skipped, shifting the coordinates one position to the right.
fn parse_positional(segments: &[String]) -> Option<Marker> {
    let has_label = segments
        .first()
        .is_some_and(|first| parse_number(first).is_none());
    let fields = if has_label { &segments[1..] } else { segments };

    let lat = fields.first().and_then(|s| parse_number(s))?;
    let lng = fields.get(1).and_then(|s| parse_number(s))?;
    Some(Marker {
        lat,
        lng,
        link: non_empty(fields.get(2)),
        popup: non_empty(fields.get(3)),
    })
}

fn non_empty(segment: Option<&String>) -> Option<String> {
    segment.filter(|s| !s.is_empty()).cloned()
}
