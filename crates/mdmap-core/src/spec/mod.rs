/*
 * spec/mod.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Canonical map description assembled from a map block payload.
 */

//! Canonical map description.
//!
//! A map block carries a hand-written YAML payload in which several fields
//! accept more than one shape. This module turns that payload into a
//! [`MapSpec`] where every field has exactly one type:
//!
//! - [`coerce`] - numbers from integers, reals or numeric strings
//! - [`tiles`] - tile layers from records, `template|name|attribution`
//!   strings, or lists of either
//! - [`markers`] - markers from records, positional lists or comma strings
//! - [`image`] - image overlay filename to served asset path
//!
//! Assembly never fails. Unusable values become absent and unusable list
//! entries are dropped.

pub mod coerce;
pub mod image;
pub mod markers;
pub mod payload;
pub mod tiles;

use serde::Serialize;
use yaml_rust2::Yaml;

use crate::config::LeafletConfig;
use coerce::to_number;
use image::normalize_image_path;
use markers::{Marker, parse_markers};
use payload::{Payload, is_truthy, scalar_to_string};
use tiles::{TileLayer, parse_tile_list};

pub const DEFAULT_HEIGHT: &str = "500px";
pub const DEFAULT_WIDTH: &str = "100%";
pub const DEFAULT_ZOOM: f64 = 5.0;

/// Distance unit shown by the map scale control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    #[default]
    Metric,
    Imperial,
    Both,
}

impl Unit {
    /// Parse from string value, ignoring case.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "metric" => Some(Self::Metric),
            "imperial" => Some(Self::Imperial),
            "both" => Some(Self::Both),
            _ => None,
        }
    }
}

/// Rectangle given as two `[lat, lng]` corners.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds(pub [[f64; 2]; 2]);

impl Bounds {
    /// Parse `[[lat, lng], [lat, lng]]`. Every coordinate must coerce.
    pub fn parse(raw: &Yaml) -> Option<Self> {
        let corners = raw.as_vec().filter(|c| c.len() == 2)?;
        let first = corner(&corners[0])?;
        let second = corner(&corners[1])?;
        Some(Bounds([first, second]))
    }

    pub fn first(&self) -> [f64; 2] {
        self.0[0]
    }

    pub fn second(&self) -> [f64; 2] {
        self.0[1]
    }
}

fn corner(raw: &Yaml) -> Option<[f64; 2]> {
    let pair = raw.as_vec().filter(|p| p.len() == 2)?;
    Some([to_number(Some(&pair[0]))?, to_number(Some(&pair[1]))?])
}

/// The normalized description of one interactive map.
///
/// Serializes with camelCase keys; absent optional fields are omitted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub height: String,
    pub width: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lng: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bounds: Option<Bounds>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_zoom: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_zoom: Option<f64>,
    pub default_zoom: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zoom_delta: Option<f64>,
    pub unit: Unit,
    pub scale: bool,
    pub recenter: bool,
    pub dark_mode: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tile_server: Option<Vec<TileLayer>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overlay: Option<Vec<TileLayer>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub markers: Option<Vec<Marker>>,
}

impl Default for MapSpec {
    fn default() -> Self {
        MapSpec {
            id: None,
            height: DEFAULT_HEIGHT.to_string(),
            width: DEFAULT_WIDTH.to_string(),
            lat: None,
            lng: None,
            bounds: None,
            min_zoom: None,
            max_zoom: None,
            default_zoom: DEFAULT_ZOOM,
            zoom_delta: None,
            unit: Unit::Metric,
            scale: true,
            recenter: false,
            dark_mode: false,
            tile_server: None,
            overlay: None,
            images: None,
            markers: None,
        }
    }
}

impl MapSpec {
    /// Assemble a spec from the raw text of a map block.
    ///
    /// Text that is not valid YAML is treated as an empty payload.
    pub fn from_block_text(text: &str, config: &LeafletConfig) -> Self {
        Self::from_payload(&Payload::parse_or_empty(text), config)
    }

    /// Assemble a spec from an already parsed payload.
    pub fn from_payload(payload: &Payload, config: &LeafletConfig) -> Self {
        let defaults = MapSpec::default();
        MapSpec {
            id: payload.get("id").and_then(scalar_to_string),
            height: payload
                .get("height")
                .and_then(scalar_to_string)
                .unwrap_or(defaults.height),
            width: payload
                .get("width")
                .and_then(scalar_to_string)
                .unwrap_or(defaults.width),
            lat: to_number(payload.get("lat")),
            lng: to_number(payload.get_first(&["lng", "long"])),
            bounds: payload.get("bounds").and_then(Bounds::parse),
            min_zoom: to_number(payload.get("minZoom")),
            max_zoom: to_number(payload.get("maxZoom")),
            default_zoom: to_number(payload.get("defaultZoom")).unwrap_or(defaults.default_zoom),
            zoom_delta: to_number(payload.get("zoomDelta")),
            unit: payload.get("unit").map_or(defaults.unit, parse_unit),
            scale: !matches!(payload.get("scale"), Some(Yaml::Boolean(false))),
            recenter: payload.get("recenter").is_some_and(is_truthy),
            dark_mode: payload.get("darkMode").is_some_and(is_truthy),
            tile_server: parse_tile_list(payload.get("tileServer"))
                .or_else(|| parse_tile_list(payload.get("tiles"))),
            overlay: parse_tile_list(payload.get("overlay")),
            images: normalize_image_path(payload, &config.asset_prefix),
            markers: parse_markers(payload.get_first(&["marker", "markers"])),
        }
    }

    /// The identifier used for the container element and the script.
    ///
    /// A spec without an `id` renders as `undefined`, the way the client
    /// script has always seen it.
    pub fn dom_id(&self) -> &str {
        self.id.as_deref().unwrap_or("undefined")
    }
}

fn parse_unit(raw: &Yaml) -> Unit {
    let parsed = scalar_to_string(raw).and_then(|s| Unit::from_str(&s));
    match parsed {
        Some(unit) => unit,
        None => {
            tracing::warn!(value = ?raw, "Unknown map unit, using metric");
            Unit::Metric
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn assemble(text: &str) -> MapSpec {
        MapSpec::from_block_text(text, &LeafletConfig::default())
    }

    #[test]
    fn test_defaults_for_empty_payload() {
        let spec = assemble("");
        assert_eq!(spec, MapSpec::default());
        assert_eq!(spec.height, "500px");
        assert_eq!(spec.width, "100%");
        assert_eq!(spec.default_zoom, 5.0);
        assert!(spec.scale);
        assert!(!spec.recenter);
        assert!(!spec.dark_mode);
    }

    #[test]
    fn test_center_and_zoom() {
        let spec = assemble("defaultZoom: 5\nlat: 40\nlong: -70\n");
        assert_eq!(spec.default_zoom, 5.0);
        assert_eq!(spec.lat, Some(40.0));
        assert_eq!(spec.lng, Some(-70.0));
        assert_eq!(spec.height, "500px");
        assert_eq!(spec.width, "100%");
        assert_eq!(spec.unit, Unit::Metric);
        assert!(spec.scale);
    }

    #[test]
    fn test_malformed_yaml_degrades_to_defaults() {
        let spec = assemble("lat: [1, 2\nid: broken");
        assert_eq!(spec, MapSpec::default());
    }

    #[test]
    fn test_numeric_fields_are_coerced() {
        let spec = assemble("minZoom: '1'\nmaxZoom: ten\nzoomDelta: 0.5\ndefaultZoom: ''\n");
        assert_eq!(spec.min_zoom, Some(1.0));
        assert_eq!(spec.max_zoom, None);
        assert_eq!(spec.zoom_delta, Some(0.5));
        assert_eq!(spec.default_zoom, 5.0);
    }

    #[test]
    fn test_scale_defaults_true_unless_literally_false() {
        assert!(assemble("scale: true").scale);
        assert!(assemble("scale: 0").scale);
        assert!(assemble("scale: 'false'").scale);
        assert!(!assemble("scale: false").scale);
    }

    #[test]
    fn test_flags_use_truthiness() {
        let spec = assemble("recenter: yes\ndarkMode: 1\n");
        assert!(spec.recenter);
        assert!(spec.dark_mode);
        let spec = assemble("recenter: 0\ndarkMode: ''\n");
        assert!(!spec.recenter);
        assert!(!spec.dark_mode);
    }

    #[test]
    fn test_unit_parsing() {
        assert_eq!(assemble("unit: Imperial").unit, Unit::Imperial);
        assert_eq!(assemble("unit: both").unit, Unit::Both);
        assert_eq!(assemble("unit: furlongs").unit, Unit::Metric);
    }

    #[test]
    fn test_dimensions_keep_authored_values() {
        let spec = assemble("height: 300px\nwidth: 80%\n");
        assert_eq!(spec.height, "300px");
        assert_eq!(spec.width, "80%");
        assert_eq!(assemble("height: 400").height, "400");
    }

    #[test]
    fn test_lng_alias() {
        assert_eq!(assemble("lng: 12").lng, Some(12.0));
        assert_eq!(assemble("long: 13").lng, Some(13.0));
    }

    #[test]
    fn test_bounds() {
        let spec = assemble("bounds: [[0, 0], [1000, 2000]]");
        assert_eq!(spec.bounds, Some(Bounds([[0.0, 0.0], [1000.0, 2000.0]])));
        assert_eq!(assemble("bounds: [[0, 0]]").bounds, None);
        assert_eq!(assemble("bounds: [[0, x], [1, 2]]").bounds, None);
        assert_eq!(assemble("bounds: 12").bounds, None);
    }

    #[test]
    fn test_tile_server_falls_back_to_tiles() {
        let spec = assemble("tiles: https://t/{z}/{x}/{y}.png|Tiles\n");
        let layers = spec.tile_server.unwrap();
        assert_eq!(layers[0].template, "https://t/{z}/{x}/{y}.png");

        let spec = assemble("tileServer: https://a/{z}.png\ntiles: https://b/{z}.png\n");
        assert_eq!(spec.tile_server.unwrap()[0].template, "https://a/{z}.png");
    }

    #[test]
    fn test_tile_server_string() {
        let spec = assemble(r#"tileServer: "https://a/{z}/{x}/{y}.png|Alias|Attr""#);
        assert_eq!(
            spec.tile_server,
            Some(vec![TileLayer {
                template: "https://a/{z}/{x}/{y}.png".to_string(),
                name: Some("Alias".to_string()),
                attribution: Some("Attr".to_string()),
            }])
        );
    }

    fn layer(template: &str, name: Option<&str>, attribution: Option<&str>) -> TileLayer {
        TileLayer {
            template: template.to_string(),
            name: name.map(str::to_string),
            attribution: attribution.map(str::to_string),
        }
    }

    #[test]
    fn test_tile_server_list_of_records() {
        let spec = assemble(
            "tileServer:\n  - template: https://a/{z}.png\n    name: A\n  - template: https://b/{z}.png\n    attribution: B corp\n  - name: no template\n",
        );
        assert_eq!(
            spec.tile_server,
            Some(vec![
                layer("https://a/{z}.png", Some("A"), None),
                layer("https://b/{z}.png", None, Some("B corp")),
            ])
        );
    }

    #[test]
    fn test_overlay_string() {
        let spec = assemble("overlay: https://o/{z}.png|Roads|OSM\n");
        assert_eq!(
            spec.overlay,
            Some(vec![layer("https://o/{z}.png", Some("Roads"), Some("OSM"))])
        );
        assert_eq!(spec.tile_server, None);
    }

    #[test]
    fn test_overlay_record() {
        let spec = assemble("overlay:\n  template: https://o/{z}.png\n  name: Rivers\n");
        assert_eq!(
            spec.overlay,
            Some(vec![layer("https://o/{z}.png", Some("Rivers"), None)])
        );
    }

    #[test]
    fn test_overlay_mixed_list() {
        let spec = assemble(
            "overlay:\n  - https://x/{z}.png|X\n  - template: https://y/{z}.png\n  - [nested]\n  - ''\n",
        );
        assert_eq!(
            spec.overlay,
            Some(vec![
                layer("https://x/{z}.png", Some("X"), None),
                layer("https://y/{z}.png", None, None),
            ])
        );
    }

    #[test]
    fn test_overlay_absent() {
        assert_eq!(assemble("lat: 1").overlay, None);
        assert_eq!(assemble("overlay: ~").overlay, None);
        assert_eq!(assemble("overlay: []").overlay, None);
    }

    #[test]
    fn test_multiple_documents_use_defaults() {
        assert_eq!(assemble("---\nlat: 1\n---\nlat: 2\n"), MapSpec::default());
    }

    #[test]
    fn test_markers_from_either_key() {
        let spec = assemble("markers:\n  - [poi, 10, 20, \"http://x\", \"desc\"]\n");
        assert_eq!(
            spec.markers,
            Some(vec![Marker {
                lat: 10.0,
                lng: 20.0,
                link: Some("http://x".to_string()),
                popup: Some("desc".to_string()),
            }])
        );
        let spec = assemble("marker: default, 1, 2\n");
        assert_eq!(spec.markers.unwrap().len(), 1);
    }

    #[test]
    fn test_image_uses_config_prefix() {
        let config = LeafletConfig {
            asset_prefix: "/assets/".to_string(),
            ..LeafletConfig::default()
        };
        let spec = MapSpec::from_block_text("image: map.png", &config);
        assert_eq!(spec.images, Some("/assets/map.png".to_string()));
    }

    #[test]
    fn test_id_and_dom_id() {
        assert_eq!(assemble("id: world").dom_id(), "world");
        assert_eq!(assemble("id: 42").id, Some("42".to_string()));
        assert_eq!(assemble("").dom_id(), "undefined");
    }

    #[test]
    fn test_json_omits_absent_fields() {
        let spec = assemble("id: m\nlat: 1\n");
        let json = serde_json::to_value(&spec).unwrap();
        assert_eq!(json["id"], "m");
        assert_eq!(json["defaultZoom"], 5.0);
        assert_eq!(json["darkMode"], false);
        assert_eq!(json["unit"], "metric");
        assert!(json.get("lng").is_none());
        assert!(json.get("tileServer").is_none());
        assert!(json.get("images").is_none());
    }
}
