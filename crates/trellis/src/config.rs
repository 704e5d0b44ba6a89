//! Host session configuration.
//!
//! A [`HostConfig`] carries the per-session flags and the defaults a host
//! applies to the panels it creates. It is usually built in code, but can
//! also be parsed from a TOML document:
//!
//! ```
//! use trellis::HostConfig;
//!
//! let config = HostConfig::from_toml_str(r#"
//! dark_mode = true
//! title = "Storage"
//! title_alignment = "center"
//! root_insets = [4, 4, 4, 4]
//! "#)?;
//!
//! assert!(config.dark_mode);
//! assert_eq!(config.root_insets.left(), 4);
//! assert_eq!(config.grid_cell_size, 18);
//! # Ok::<(), trellis::ConfigError>(())
//! ```
//!
//! Reading the document from disk is left to the embedding application.

use serde::Deserialize;
use thiserror::Error;
use trellis_core::{HorizontalAlignment, Insets, TrellisError};

/// Errors produced while loading a [`HostConfig`].
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The document is not valid TOML or does not match the schema. Negative
    /// insets are reported here, since they are rejected while parsing.
    #[error("failed to parse host configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// The document parsed but holds values the toolkit cannot use.
    #[error("invalid host configuration: {0}")]
    Invalid(#[from] TrellisError),
}

/// Per-session settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HostConfig {
    /// Paint the dark variant of panels and text.
    pub dark_mode: bool,
    /// The embedding screen covers the whole window.
    pub fullscreen: bool,
    /// Screen title text.
    pub title: String,
    /// Horizontal placement of the title.
    pub title_alignment: HorizontalAlignment,
    /// Whether the title is drawn.
    pub title_visible: bool,
    /// Padding of root panels created by the host.
    pub root_insets: Insets,
    /// Cell size of grid panels created by the host.
    pub grid_cell_size: i32,
    /// Whether an unhandled Tab press cycles focus.
    pub tab_cycles_focus: bool,
}

impl HostConfig {
    /// Parse a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Check values serde cannot check on its own.
    pub fn validate(&self) -> Result<(), TrellisError> {
        if self.grid_cell_size <= 0 {
            return Err(TrellisError::invalid_argument(format!(
                "grid cell size must be positive: {}",
                self.grid_cell_size
            )));
        }
        Ok(())
    }
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            dark_mode: false,
            fullscreen: false,
            title: String::new(),
            title_alignment: HorizontalAlignment::Left,
            title_visible: true,
            root_insets: Insets::ROOT_PANEL,
            grid_cell_size: crate::widget::layout::DEFAULT_CELL_SIZE,
            tab_cycles_focus: true,
        }
    }
}
