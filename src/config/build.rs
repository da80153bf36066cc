//! `[build]` section configuration.
//!
//! Contains output paths, templates and minification.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `[build]` section in folio.toml - static output configuration.
///
/// # Example
/// ```toml
/// [build]
/// output = "public"        # Output directory
/// assets = "assets"        # Copied verbatim into the output
/// minify = true            # Minify HTML
/// template = "templates/index.html"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Project root directory (usually set via CLI `--root`).
    #[serde(default = "defaults::build::root", skip_serializing)]
    #[educe(Default = defaults::build::root())]
    pub root: Option<PathBuf>,

    /// Output directory for the generated site.
    #[serde(default = "defaults::build::output")]
    #[educe(Default = defaults::build::output())]
    pub output: PathBuf,

    /// Static assets directory, mirrored into `output/<assets>`.
    #[serde(default = "defaults::build::assets")]
    #[educe(Default = defaults::build::assets())]
    pub assets: PathBuf,

    /// Custom public page template. Uses the built-in one when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<PathBuf>,

    /// Custom admin page template. Uses the built-in one when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_template: Option<PathBuf>,

    /// Minify generated HTML.
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub minify: bool,

    /// Remove the output directory before building.
    pub clean: bool,
}
