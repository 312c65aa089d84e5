// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Visitlane-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Visitlane and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! TOML configuration.
//!
//! Every section and field is optional; a missing file section falls back to the defaults
//! the layout, geometry and SVG modules define themselves.
//!
//! ```toml
//! [layout]
//! branch_origin = "previous-track-last-row"
//! palette = ["#4f46e5", "#0891b2"]
//!
//! [geometry]
//! row_height = 48.0
//!
//! [render]
//! show_grid = false
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::geometry::GeometryConfig;
use crate::layout::{BranchOrigin, LayoutOptions, Palette, PaletteError, DEFAULT_PALETTE};
use crate::render::SvgOptions;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config value `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
    #[error("invalid palette: {0}")]
    Palette(#[from] PaletteError),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutSection {
    pub branch_origin: BranchOrigin,
    pub palette: Vec<String>,
}

impl Default for LayoutSection {
    fn default() -> Self {
        Self {
            branch_origin: BranchOrigin::default(),
            palette: DEFAULT_PALETTE.iter().map(|color| (*color).to_owned()).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VisitlaneConfig {
    pub layout: LayoutSection,
    pub geometry: GeometryConfig,
    pub render: SvgOptions,
}

impl VisitlaneConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads `path` and parses it with [`Self::from_toml_str`].
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        let config = Self::from_toml_str(&contents)?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Defaults when `path` is `None`.
    pub fn load_optional(path: Option<&Path>) -> Result<Self, ConfigError> {
        path.map_or_else(|| Ok(Self::default()), Self::load)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let geometry = &self.geometry;
        let positive = [
            ("geometry.padding", geometry.padding),
            ("geometry.track_width", geometry.track_width),
            ("geometry.row_height", geometry.row_height),
            ("geometry.node_radius", geometry.node_radius),
        ];
        let non_negative = [
            ("geometry.curve_height", geometry.curve_height),
            ("geometry.branch_curve_height", geometry.branch_curve_height),
            ("geometry.hit_slop", geometry.hit_slop),
        ];

        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("expected a finite value > 0, got {value}"),
                });
            }
        }
        for (field, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("expected a finite value >= 0, got {value}"),
                });
            }
        }

        self.palette().map(|_| ())
    }

    pub fn palette(&self) -> Result<Palette, ConfigError> {
        Ok(Palette::new(&self.layout.palette)?)
    }

    pub fn layout_options(&self) -> Result<LayoutOptions, ConfigError> {
        Ok(LayoutOptions { palette: self.palette()?, branch_origin: self.layout.branch_origin })
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, VisitlaneConfig};
    use crate::layout::{BranchOrigin, PaletteError};

    #[test]
    fn empty_document_yields_defaults() {
        let config = VisitlaneConfig::from_toml_str("").expect("config");
        assert_eq!(config, VisitlaneConfig::default());
        assert_eq!(config.geometry.row_height, 60.0);
        assert!(config.render.show_grid);
        assert_eq!(config.layout_options().expect("options").palette.colors().len(), 8);
    }

    #[test]
    fn partial_sections_override_only_named_fields() {
        let config = VisitlaneConfig::from_toml_str(
            r##"
            [layout]
            branch_origin = "previous-track-last-row"
            palette = ["#111111", "#222222"]

            [geometry]
            row_height = 48.0
            curve_height = 0.0

            [render]
            show_grid = false
            "##,
        )
        .expect("config");

        assert_eq!(config.layout.branch_origin, BranchOrigin::PreviousTrackLastRow);
        assert_eq!(config.geometry.row_height, 48.0);
        assert_eq!(config.geometry.curve_height, 0.0);
        assert_eq!(config.geometry.track_width, 100.0);
        assert!(!config.render.show_grid);
        assert!(config.render.show_track_labels);

        let options = config.layout_options().expect("options");
        assert_eq!(options.palette.color_for(3).as_str(), "#222222");
    }

    #[test]
    fn rejects_non_positive_geometry() {
        let err = VisitlaneConfig::from_toml_str("[geometry]\ntrack_width = 0.0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "geometry.track_width", .. }));

        let err = VisitlaneConfig::from_toml_str("[geometry]\nhit_slop = -1.0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "geometry.hit_slop", .. }));
    }

    #[test]
    fn rejects_empty_palette_and_unknown_fields() {
        let err = VisitlaneConfig::from_toml_str("[layout]\npalette = []\n").unwrap_err();
        assert!(matches!(err, ConfigError::Palette(PaletteError::Empty)));

        let err = VisitlaneConfig::from_toml_str("[geometry]\nzoom = 2.0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = VisitlaneConfig::load(std::path::Path::new("/nonexistent/visitlane.toml"))
            .unwrap_err();
        assert!(err.to_string().contains("/nonexistent/visitlane.toml"));
    }
}
