//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. Stock defaults
//! are overridden by a user `config.toml` placed next to the document
//! manifest:
//!
//! ```text
//! site/
//! ├── documents.json
//! └── config.toml        # optional, overrides stock defaults
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [site]
//! title = "Home"            # Breadcrumb root and <title> suffix
//!
//! [paths]
//! index_segment = "index"   # Slug segment marking a folder's own document
//!
//! [listing]
//! show_folder_count = true  # "N items under this folder"
//! show_subfolders = true    # Synthetic entries for sub-folders
//! limit = 0                 # Hard cap on entries (0 = unlimited)
//! items_per_page = 10       # Client-side pagination (0 = off)
//! sort = "modified"         # modified | created | published | title
//!
//! [categories]
//! enabled = true
//! exclude = ["project"]     # Folder prefixes hidden from the grid
//! default_icon = "📁"
//!
//! [processing]
//! max_processes = 4         # Max parallel render workers (omit for auto = CPU cores)
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse. Override just the values you want:
//!
//! ```toml
//! [listing]
//! limit = 5
//! ```
//!
//! A non-zero `limit` without an explicit `items_per_page` switches client
//! pagination off; setting both non-zero is a validation error.
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::listing::SortOrder;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
///
/// All fields have sensible defaults. User config files need only specify
/// the values they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Site-wide labels.
    pub site: SiteMeta,
    /// Slug conventions.
    pub paths: PathsConfig,
    /// Folder listing assembly and pagination.
    pub listing: ListingConfig,
    /// Category grid of indexed sub-folders.
    pub categories: CategoriesConfig,
    /// Parallel rendering settings.
    pub processing: ProcessingConfig,
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.paths.index_segment.is_empty() {
            return Err(ConfigError::Validation(
                "paths.index_segment must not be empty".into(),
            ));
        }
        if self.paths.index_segment.contains('/') {
            return Err(ConfigError::Validation(
                "paths.index_segment must be a single segment (no '/')".into(),
            ));
        }
        if self.listing.limit > 0 && self.listing.items_per_page > 0 {
            return Err(ConfigError::Validation(
                "listing.limit and listing.items_per_page cannot both be set; use one".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteMeta {
    pub title: String,
}

impl Default for SiteMeta {
    fn default() -> Self {
        Self {
            title: "Home".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathsConfig {
    /// Trailing segment that attaches a document to its parent folder.
    pub index_segment: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            index_segment: "index".to_string(),
        }
    }
}

/// Folder listing settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ListingConfig {
    /// Show the "N items under this folder" line.
    pub show_folder_count: bool,
    /// Emit synthetic entries for sub-folders without their own document.
    pub show_subfolders: bool,
    /// Keep only the first N sorted entries (0 = all).
    pub limit: usize,
    /// Entries per client-side page (0 = no pagination).
    pub items_per_page: usize,
    pub sort: SortOrder,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            show_folder_count: true,
            show_subfolders: true,
            limit: 0,
            items_per_page: 10,
            sort: SortOrder::Modified,
        }
    }
}

/// Category grid settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CategoriesConfig {
    pub enabled: bool,
    /// Folder slugs (and everything below them) left off the grid.
    pub exclude: Vec<String>,
    /// Icon for categories whose index document sets none.
    pub default_icon: String,
    /// Heading above the grid.
    pub heading: String,
}

impl Default for CategoriesConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            exclude: vec!["project".to_string()],
            default_icon: "📁".to_string(),
            heading: "Categories".to_string(),
        }
    }
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel render workers.
    /// When absent or null, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config.max_processes.map(|n| n.min(cores)).unwrap_or(cores)
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the canonical representation of all default values, used as the
/// base layer for merging user overrides on top.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if no `config.toml` exists in the directory.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = path.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// A user-set `listing.limit` replaces the default pagination unless the
/// same file also sets `listing.items_per_page`.
fn limit_disables_default_pagination(mut overlay: toml::Value) -> toml::Value {
    if let Some(listing) = overlay.get_mut("listing").and_then(toml::Value::as_table_mut) {
        let limited = listing
            .get("limit")
            .and_then(toml::Value::as_integer)
            .is_some_and(|n| n > 0);
        if limited && !listing.contains_key("items_per_page") {
            listing.insert("items_per_page".into(), toml::Value::Integer(0));
        }
    }
    overlay
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, limit_disables_default_pagination(ov)),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(root)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Folder Index Configuration
# ==========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Place this file next to documents.json. Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Site
# ---------------------------------------------------------------------------
[site]
# Label of the root folder in breadcrumbs and page titles.
title = "Home"

# ---------------------------------------------------------------------------
# Slugs
# ---------------------------------------------------------------------------
[paths]
# A slug ending in this segment is the folder's own document:
#   notes/index -> the "notes" folder page
index_segment = "index"

# ---------------------------------------------------------------------------
# Folder listing
# ---------------------------------------------------------------------------
[listing]
# Show "N items under this folder" above the list.
show_folder_count = true

# List sub-folders that have no index document, dated by their newest child.
show_subfolders = true

# Keep only the first N entries after sorting (0 = show all).
# Setting limit alone turns pagination off; setting both is an error.
limit = 0

# Split the list into pages of this size in the browser (0 = no pagination).
items_per_page = 10

# Entry order: "modified", "created", "published" (newest first) or "title".
sort = "modified"

# ---------------------------------------------------------------------------
# Category grid
# ---------------------------------------------------------------------------
[categories]
# Show a grid of direct sub-folders that have an index document.
enabled = true

# Folders (and everything below them) left off the grid.
exclude = ["project"]

# Icon for categories whose index document sets none. URLs render as images.
default_icon = "📁"

# Heading above the grid.
heading = "Categories"

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum parallel render workers for `build`.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_processes = 4
"##
}
