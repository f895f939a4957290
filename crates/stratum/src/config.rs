//! Configuration types for Stratum layouts.
//!
//! This module provides configuration structures that control where the
//! layout engine places nodes and how results are exported. All types
//! implement [`serde::Deserialize`] for loading from external sources such as
//! TOML files.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining layout and export settings.
//! - [`LayoutConfig`] - [`LayoutOptions`] plus the seed for the fallback placement.
//! - [`ExportConfig`] - Output formatting options.
//!
//! # Example
//!
//! ```
//! # use stratum::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.layout().options().center_x(), 500.0);
//! assert_eq!(config.layout().seed(), None);
//! ```

use serde::Deserialize;

use crate::layout::LayoutOptions;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Export configuration section.
    #[serde(default)]
    export: ExportConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified sections.
    pub fn new(layout: LayoutConfig, export: ExportConfig) -> Self {
        Self { layout, export }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the export configuration.
    pub fn export(&self) -> &ExportConfig {
        &self.export
    }
}

/// Layout section of the configuration.
///
/// The [`LayoutOptions`] fields sit directly in this section, next to `seed`:
///
/// ```toml
/// [layout]
/// center_x = 0
/// level_spacing = 120
/// seed = 42
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LayoutConfig {
    #[serde(flatten)]
    options: LayoutOptions,

    /// Seed for the random fallback placement. When absent, the thread-local
    /// generator is used and fallback positions vary between runs.
    #[serde(default)]
    seed: Option<u64>,
}

impl LayoutConfig {
    /// Creates a new [`LayoutConfig`].
    ///
    /// # Arguments
    ///
    /// * `options` - Placement settings for the layout engine.
    /// * `seed` - Optional seed making fallback placement reproducible.
    pub fn new(options: LayoutOptions, seed: Option<u64>) -> Self {
        Self { options, seed }
    }

    /// Returns the layout options.
    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }

    /// Returns the fallback seed, if configured.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
}

/// Output formatting options.
#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    /// Pretty-print JSON output.
    #[serde(default = "default_pretty")]
    pretty: bool,
}

fn default_pretty() -> bool {
    true
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            pretty: default_pretty(),
        }
    }
}

impl ExportConfig {
    /// Creates a new [`ExportConfig`].
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    /// Returns whether JSON output is pretty-printed.
    pub fn pretty(&self) -> bool {
        self.pretty
    }
}
