/*
 * image.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Image overlay path normalization.
 */

use yaml_rust2::Yaml;

use super::payload::{Payload, scalar_to_string};

/// Build the served asset path for the payload's `image` field.
///
/// This is a plain string join of `prefix` and the declared filename; the
/// file is not checked for existence. Returns None when the payload
/// declares no image, so that no overlay is emitted for it.
pub fn normalize_image_path(payload: &Payload, prefix: &str) -> Option<String> {
    let name = image_name(payload.get("image")?)?;
    Some(format!("{}{}", prefix, name))
}

/// Filename of an image reference.
///
/// Wiki-style embeds (`image: [[map.png]]`) arrive as nested single-item
/// lists and are unwrapped.
fn image_name(value: &Yaml) -> Option<String> {
    match value {
        Yaml::Array(items) if items.len() == 1 => image_name(&items[0]),
        other => scalar_to_string(other)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty()),
    }
}
