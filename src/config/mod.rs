//! Site configuration management for `folio.toml`.
//!
//! # Sections
//!
//! | Section     | Purpose                                          |
//! |-------------|--------------------------------------------------|
//! | `[base]`    | Page metadata (title, description, language)     |
//! | `[build]`   | Output paths, templates, minification            |
//! | `[storage]` | Where the site document is persisted             |
//! | `[serve]`   | Development server (interface, port)             |
//!
//! # Example
//!
//! ```toml
//! [base]
//! title = "Jane Doe"
//!
//! [build]
//! output = "public"
//! minify = true
//!
//! [storage]
//! dir = ".folio"
//! key = "siteData"
//!
//! [serve]
//! port = 5277
//! ```

mod base;
mod build;
pub mod defaults;
mod error;
mod serve;
mod storage;

use base::BaseConfig;
use build::BuildConfig;
pub use error::ConfigError;
use serve::ServeConfig;
use storage::StorageConfig;

use crate::cli::{Cli, Commands};
use crate::data::{DocumentStore, FileStorage};
use anyhow::{Result, bail};
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// Root Configuration
// ============================================================================

/// Root configuration structure representing folio.toml
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// Absolute path to the config file (set after loading)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Page metadata
    #[serde(default)]
    pub base: BaseConfig,

    /// Build settings
    #[serde(default)]
    pub build: BuildConfig,

    /// Document persistence
    #[serde(default)]
    pub storage: StorageConfig,

    /// Development server settings
    #[serde(default)]
    pub serve: ServeConfig,
}

impl SiteConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: SiteConfig = toml::from_str(content).map_err(ConfigError::from)?;
        Ok(config)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        Self::from_str(&content)
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        self.build.root.as_deref().unwrap_or(Path::new("./"))
    }

    /// Set the root directory path
    pub fn set_root(&mut self, path: &Path) {
        self.build.root = Some(path.to_path_buf())
    }

    /// Open the document store described by `[storage]`.
    pub fn store(&self) -> DocumentStore<FileStorage> {
        DocumentStore::new(
            FileStorage::new(&self.storage.dir),
            self.storage.key.clone(),
        )
    }

    /// Update configuration with CLI arguments
    pub fn update_with_cli(&mut self, cli: &Cli) {
        let base = cli
            .root
            .as_ref()
            .cloned()
            .unwrap_or_else(|| self.get_root().to_owned());
        let root = match &cli.command {
            Commands::Init { name: Some(name) } => base.join(name),
            _ => base,
        };

        self.update_path_with_root(&root, &cli.config);

        match &cli.command {
            Commands::Build { clean, minify } => {
                Self::update_option(&mut self.build.minify, minify.as_ref());
                self.build.clean |= *clean;
            }
            Commands::Serve {
                interface,
                port,
                scratch,
            } => {
                Self::update_option(&mut self.serve.interface, interface.as_ref());
                Self::update_option(&mut self.serve.port, port.as_ref());
                self.serve.scratch |= *scratch;
            }
            _ => {}
        }
    }

    /// Update config option if CLI value is provided
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Update all paths relative to root directory and normalize to absolute paths
    fn update_path_with_root(&mut self, root: &Path, config: &Path) {
        let root = Self::normalize_path(root);
        self.set_root(&root);

        self.config_path = Self::normalize_path(&root.join(config));

        self.build.output = Self::normalize_path(&root.join(&self.build.output));
        self.build.assets = Self::normalize_path(&root.join(&self.build.assets));
        if let Some(template) = &self.build.template {
            self.build.template = Some(Self::normalize_path(&root.join(template)));
        }
        if let Some(template) = &self.build.admin_template {
            self.build.admin_template = Some(Self::normalize_path(&root.join(template)));
        }

        // Storage dir may live outside the site (`~/...`)
        let expanded = shellexpand::tilde(&self.storage.dir.to_string_lossy()).into_owned();
        let dir = PathBuf::from(expanded);
        self.storage.dir = if dir.is_relative() {
            Self::normalize_path(&root.join(dir))
        } else {
            Self::normalize_path(&dir)
        };
    }

    /// Normalize a path to absolute, using canonicalize if the path exists
    fn normalize_path(path: &Path) -> PathBuf {
        path.canonicalize().unwrap_or_else(|_| {
            // For non-existent paths, manually make them absolute
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                std::env::current_dir()
                    .map(|cwd| cwd.join(path))
                    .unwrap_or_else(|_| path.to_path_buf())
            }
        })
    }

    /// Validate configuration after paths are resolved
    pub fn validate(&self) -> Result<()> {
        if !self.config_path.exists() {
            bail!("Config file not found");
        }

        let key = &self.storage.key;
        if key.trim().is_empty() {
            bail!(ConfigError::Validation("[storage.key] must not be empty".into()));
        }
        if key.contains(['/', '\\']) || key == ".." {
            bail!(ConfigError::Validation(
                "[storage.key] must not contain path separators".into()
            ));
        }

        for (field, template) in [
            ("[build.template]", &self.build.template),
            ("[build.admin_template]", &self.build.admin_template),
        ] {
            match template {
                Some(path) if !path.exists() => {
                    bail!(ConfigError::Validation(format!("{field} not found")))
                }
                Some(path) if !path.is_file() => {
                    bail!(ConfigError::Validation(format!("{field} is not a file")))
                }
                _ => {}
            }
        }

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
