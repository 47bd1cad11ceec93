/*
 * emit.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * HTML emission for map descriptions.
 */

//! HTML emission for map descriptions.
//!
//! A map block is replaced by two raw HTML nodes:
//!
//! 1. The container `<div>` followed by a script defining `obsidianInfo`,
//!    an object literal with every spec field.
//! 2. The map initialization script, which creates the Leaflet map on the
//!    container and adds the image overlay.
//!
//! Field values are written as JSON literals so that every value is valid
//! JavaScript; absent values are written as `undefined`. Center, zoom and
//! bounds go through the configured [`ScaleTransform`] and are written the
//! way JavaScript template interpolation would print them.

use std::fmt::Write;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use mdmap_ast::Node;
use serde::Serialize;

use crate::Result;
use crate::config::ScaleTransform;
use crate::spec::MapSpec;

/// Build the two replacement nodes for a map spec.
pub fn render_map_nodes(spec: &MapSpec, scale: &ScaleTransform) -> Result<[Node; 2]> {
    Ok([
        Node::html(render_container(spec)?),
        Node::html(render_init_script(spec, scale)?),
    ])
}

/// Base64 of the spec's JSON serialization.
pub fn encode_spec(spec: &MapSpec) -> Result<String> {
    let json = serde_json::to_vec(spec)?;
    Ok(STANDARD.encode(json))
}

/// The container element plus the `obsidianInfo` script.
pub fn render_container(spec: &MapSpec) -> Result<String> {
    let mut html = String::new();
    write_container(spec, &mut html)?;
    Ok(html)
}

/// The Leaflet initialization script.
///
/// The image overlay is only added when the spec has an image.
pub fn render_init_script(spec: &MapSpec, scale: &ScaleTransform) -> Result<String> {
    let mut js = String::new();
    write_init_script(spec, scale, &mut js)?;
    Ok(js)
}

fn write_container<W: Write>(spec: &MapSpec, buf: &mut W) -> Result<()> {
    let label = match &spec.id {
        Some(id) if !id.is_empty() => format!("Interactive map: {}", id),
        _ => "Interactive map".to_string(),
    };

    writeln!(
        buf,
        "<div class=\"qz-leaflet\" id=\"{}\" style=\"height:{};width:{}\" aria-label=\"{}\" data-map-spec=\"{}\"></div>",
        escape_html(spec.dom_id()),
        escape_html(&spec.height),
        escape_html(&spec.width),
        escape_html(&label),
        encode_spec(spec)?,
    )?;
    writeln!(buf, "<script type=\"text/javascript\">")?;
    writeln!(buf, "var obsidianInfo = {{")?;

    let fields = [
        ("id", js_literal(spec.id.as_ref())?),
        ("height", js_literal(Some(&spec.height))?),
        ("width", js_literal(Some(&spec.width))?),
        ("lat", js_literal(spec.lat.as_ref())?),
        ("lng", js_literal(spec.lng.as_ref())?),
        ("bounds", js_literal(spec.bounds.as_ref())?),
        ("minZoom", js_literal(spec.min_zoom.as_ref())?),
        ("maxZoom", js_literal(spec.max_zoom.as_ref())?),
        ("defaultZoom", js_literal(Some(&spec.default_zoom))?),
        ("zoomDelta", js_literal(spec.zoom_delta.as_ref())?),
        ("unit", js_literal(Some(&spec.unit))?),
        ("scale", js_literal(Some(&spec.scale))?),
        ("recenter", js_literal(Some(&spec.recenter))?),
        ("darkMode", js_literal(Some(&spec.dark_mode))?),
        ("tileServer", js_literal(spec.tile_server.as_ref())?),
        ("overlay", js_literal(spec.overlay.as_ref())?),
        ("images", js_literal(spec.images.as_ref())?),
        ("markers", js_literal(spec.markers.as_ref())?),
    ];
    let last = fields.len() - 1;
    for (i, (key, value)) in fields.iter().enumerate() {
        let sep = if i == last { "" } else { "," };
        writeln!(buf, "    {}: {}{}", key, value, sep)?;
    }

    writeln!(buf, "}};")?;
    writeln!(buf, "var getUrl = window.location;")?;
    writeln!(
        buf,
        "baseUrl = getUrl.protocol + \"//\" + getUrl.host + \"/\" + getUrl.pathname.split('/')[1];"
    )?;
    write!(buf, "</script>")?;
    Ok(())
}

fn write_init_script<W: Write>(spec: &MapSpec, scale: &ScaleTransform, buf: &mut W) -> Result<()> {
    let [center_lat, center_lng] = scale.center(spec.lat, spec.lng);

    writeln!(buf, "<script type=\"text/javascript\">")?;
    writeln!(buf, "var map = L.map({}, {{", js_literal(Some(spec.dom_id()))?)?;
    writeln!(
        buf,
        "    center: [{}, {}],",
        js_number(center_lat),
        js_number(center_lng)
    )?;
    writeln!(buf, "    zoom: {}", js_number(scale.zoom(spec.default_zoom)))?;
    writeln!(buf, "}});")?;

    if let Some(images) = &spec.images {
        writeln!(
            buf,
            "var imageUrl = {},\n    imageBounds = {};",
            js_literal(Some(images))?,
            bounds_literal(spec, scale)
        )?;
        writeln!(buf, "L.imageOverlay(imageUrl, imageBounds).addTo(map);")?;
    }

    write!(buf, "</script>")?;
    Ok(())
}

/// Bounds as `[[a,b],[c, d]]`, with only the second corner scaled.
///
/// Missing bounds print as `[[undefined],[NaN, NaN]]`.
fn bounds_literal(spec: &MapSpec, scale: &ScaleTransform) -> String {
    match &spec.bounds {
        Some(bounds) => {
            let [a, b] = bounds.first();
            let [c, d] = scale.far_corner(bounds.second());
            format!(
                "[[{},{}],[{}, {}]]",
                js_number(a),
                js_number(b),
                js_number(c),
                js_number(d)
            )
        }
        None => "[[undefined],[NaN, NaN]]".to_string(),
    }
}

/// A value as a JavaScript literal; None is `undefined`.
///
/// `</` is escaped so that string content cannot close the script element.
pub fn js_literal<T: Serialize + ?Sized>(value: Option<&T>) -> Result<String> {
    match value {
        Some(v) => Ok(serde_json::to_string(v)?.replace("</", "<\\/")),
        None => Ok("undefined".to_string()),
    }
}

/// Format a number the way JavaScript prints it in a template string.
pub fn js_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n == f64::INFINITY {
        "Infinity".to_string()
    } else if n == f64::NEG_INFINITY {
        "-Infinity".to_string()
    } else if n == 0.0 {
        "0".to_string()
    } else {
        n.to_string()
    }
}

/// Escape HTML special characters.
fn escape_html(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '&' => "&amp;".to_string(),
            '<' => "&lt;".to_string(),
            '>' => "&gt;".to_string(),
            '"' => "&quot;".to_string(),
            '\'' => "&#39;".to_string(),
            _ => c.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LeafletConfig;
    use crate::error::MapError;
    use std::fmt;

    fn spec(text: &str) -> MapSpec {
        MapSpec::from_block_text(text, &LeafletConfig::default())
    }

    #[test]
    fn test_js_number() {
        assert_eq!(js_number(40.0), "40");
        assert_eq!(js_number(0.04), "0.04");
        assert_eq!(js_number(-7.5), "-7.5");
        assert_eq!(js_number(-0.0), "0");
        assert_eq!(js_number(f64::NAN), "NaN");
        assert_eq!(js_number(f64::NEG_INFINITY), "-Infinity");
    }

    #[test]
    fn test_js_literal() {
        assert_eq!(js_literal::<String>(None).unwrap(), "undefined");
        assert_eq!(js_literal(Some("a\"b")).unwrap(), r#""a\"b""#);
        assert_eq!(js_literal(Some(&true)).unwrap(), "true");
        assert_eq!(
            js_literal(Some("</script>")).unwrap(),
            r#""<\/script>""#
        );
    }

    #[test]
    fn test_encode_spec_round_trips_json() {
        let spec = spec("id: m\nlat: 1\n");
        let encoded = encode_spec(&spec).unwrap();
        let decoded = STANDARD.decode(encoded).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&decoded).unwrap();
        assert_eq!(json["id"], "m");
        assert_eq!(json["lat"], 1.0);
    }

    #[test]
    fn test_container_attributes() {
        let html = render_container(&spec("id: world\nheight: 300px\n")).unwrap();
        assert!(html.starts_with(
            "<div class=\"qz-leaflet\" id=\"world\" style=\"height:300px;width:100%\" aria-label=\"Interactive map: world\" data-map-spec=\""
        ));
        assert!(html.contains("    id: \"world\",\n"));
        assert!(html.contains("    lng: undefined,\n"));
        assert!(html.contains("    markers: undefined\n};"));
        assert!(html.ends_with("</script>"));
    }

    #[test]
    fn test_container_writes_layer_and_marker_arrays() {
        let html = render_container(&spec(
            "tileServer:\n  - template: https://a/{z}.png\n    name: A\noverlay: https://o/{z}.png|Roads\nmarkers:\n  - [10, 20, '', Dock]\n",
        ))
        .unwrap();
        assert!(html.contains("    tileServer: [{\"template\":\"https://a/{z}.png\",\"name\":\"A\"}],\n"));
        assert!(html.contains("    overlay: [{\"template\":\"https://o/{z}.png\",\"name\":\"Roads\"}],\n"));
        assert!(html.contains("    markers: [{\"lat\":10.0,\"lng\":20.0,\"popup\":\"Dock\"}]\n};"));
    }

    #[test]
    fn test_write_errors_propagate() {
        struct RejectingWriter;

        impl fmt::Write for RejectingWriter {
            fn write_str(&mut self, _: &str) -> fmt::Result {
                Err(fmt::Error)
            }
        }

        let spec = spec("id: m");
        assert!(matches!(
            write_container(&spec, &mut RejectingWriter),
            Err(MapError::Format(_))
        ));
        assert!(matches!(
            write_init_script(&spec, &ScaleTransform::default(), &mut RejectingWriter),
            Err(MapError::Format(_))
        ));
    }

    #[test]
    fn test_container_without_id() {
        let html = render_container(&spec("lat: 1")).unwrap();
        assert!(html.contains("id=\"undefined\""));
        assert!(html.contains("aria-label=\"Interactive map\""));
    }

    #[test]
    fn test_container_escapes_attributes() {
        let html = render_container(&spec("id: '\"><b>'")).unwrap();
        assert!(html.contains("id=\"&quot;&gt;&lt;b&gt;\""));
    }

    #[test]
    fn test_init_script_scaling() {
        let js = render_init_script(
            &spec("id: m\nlat: 40\nlong: -70\nimage: a.png\nbounds: [[0, 0], [2000, 3000]]\n"),
            &ScaleTransform::default(),
        )
        .unwrap();
        assert!(js.contains("var map = L.map(\"m\", {\n"));
        assert!(js.contains("    center: [0.04, -0.07],\n"));
        assert!(js.contains("    zoom: -7.5\n"));
        assert!(js.contains("var imageUrl = \"/z_assets/a.png\",\n    imageBounds = [[0,0],[2, 3]];\n"));
        assert!(js.contains("L.imageOverlay(imageUrl, imageBounds).addTo(map);"));
    }

    #[test]
    fn test_init_script_missing_values() {
        let js = render_init_script(&spec("image: a.png"), &ScaleTransform::default()).unwrap();
        assert!(js.contains("center: [NaN, NaN]"));
        assert!(js.contains("imageBounds = [[undefined],[NaN, NaN]];"));
    }

    #[test]
    fn test_init_script_without_image_skips_overlay() {
        let js = render_init_script(&spec("lat: 1\nlong: 2"), &ScaleTransform::default()).unwrap();
        assert!(!js.contains("imageOverlay"));
        assert!(!js.contains("imageUrl"));
    }

    #[test]
    fn test_render_map_nodes_are_html() {
        let nodes = render_map_nodes(&spec("id: m"), &ScaleTransform::default()).unwrap();
        assert!(nodes.iter().all(|n| n.type_name() == "html"));
    }
}
