/*
 * config.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Configuration for the leaflet block transform.
 */

//! Configuration for the leaflet block transform.
//!
//! All keys are optional; a missing key takes the default that reproduces
//! the historical output of the transform. Configuration is usually read
//! from the `leaflet:` section of a site configuration file:
//!
//! ```yaml
//! language: leaflet
//! asset-prefix: /z_assets/
//! consume-following: true
//! scale:
//!   center-divisor: 1000
//!   zoom-factor: -1.5
//!   bounds-divisor: 1000
//! ```

use serde::Deserialize;

use crate::Result;
use crate::error::MapError;

/// Code block language tag that marks a map block.
pub const DEFAULT_LANGUAGE: &str = "leaflet";

/// Route segment prepended to image overlay filenames.
pub const DEFAULT_ASSET_PREFIX: &str = "/z_assets/";

/// Settings for [`LeafletBlocksTransform`](crate::transforms::LeafletBlocksTransform).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct LeafletConfig {
    /// Language tag matched case-insensitively against code blocks.
    pub language: String,

    /// Prefix for image overlay paths.
    pub asset_prefix: String,

    /// Whether the node following a map block is replaced by the
    /// initialization script (it is overwritten, not shifted).
    pub consume_following: bool,

    /// Arithmetic applied to coordinates and zoom in the emitted script.
    pub scale: ScaleTransform,
}

impl Default for LeafletConfig {
    fn default() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.to_string(),
            asset_prefix: DEFAULT_ASSET_PREFIX.to_string(),
            consume_following: true,
            scale: ScaleTransform::default(),
        }
    }
}

impl LeafletConfig {
    /// Parse configuration from a YAML fragment.
    ///
    /// An empty fragment yields the defaults.
    pub fn from_yaml_str(source: &str) -> Result<Self> {
        if source.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: LeafletConfig = serde_yaml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Check values that deserialize fine but cannot produce usable output.
    pub fn validate(&self) -> Result<()> {
        if self.language.trim().is_empty() {
            return Err(MapError::invalid_config("language must not be empty"));
        }
        self.scale.validate()
    }
}

/// Coordinate and zoom arithmetic used when emitting the map script.
///
/// The defaults divide the center and the second bounds corner by 1000 and
/// multiply the default zoom by -1.5. The first bounds corner is never
/// scaled.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct ScaleTransform {
    pub center_divisor: f64,
    pub zoom_factor: f64,
    pub bounds_divisor: f64,
}

impl Default for ScaleTransform {
    fn default() -> Self {
        Self {
            center_divisor: 1000.0,
            zoom_factor: -1.5,
            bounds_divisor: 1000.0,
        }
    }
}

impl ScaleTransform {
    /// Leaves every value as authored.
    pub fn identity() -> Self {
        Self {
            center_divisor: 1.0,
            zoom_factor: 1.0,
            bounds_divisor: 1.0,
        }
    }

    fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("center-divisor", self.center_divisor),
            ("bounds-divisor", self.bounds_divisor),
        ] {
            if !value.is_finite() || value == 0.0 {
                return Err(MapError::invalid_config(format!(
                    "scale.{} must be a finite, non-zero number",
                    name
                )));
            }
        }
        if !self.zoom_factor.is_finite() {
            return Err(MapError::invalid_config(
                "scale.zoom-factor must be a finite number",
            ));
        }
        Ok(())
    }

    /// Map center as emitted. Absent coordinates become NaN.
    pub fn center(&self, lat: Option<f64>, lng: Option<f64>) -> [f64; 2] {
        [
            lat.map_or(f64::NAN, |v| v / self.center_divisor),
            lng.map_or(f64::NAN, |v| v / self.center_divisor),
        ]
    }

    pub fn zoom(&self, default_zoom: f64) -> f64 {
        default_zoom * self.zoom_factor
    }

    /// Scale the second corner of a bounds rectangle.
    pub fn far_corner(&self, corner: [f64; 2]) -> [f64; 2] {
        [
            corner[0] / self.bounds_divisor,
            corner[1] / self.bounds_divisor,
        ]
    }
}
