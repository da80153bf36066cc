//! `[storage]` section configuration.
//!
//! Location of the persistent key-value storage holding the site document.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `[storage]` section in folio.toml.
///
/// # Example
/// ```toml
/// [storage]
/// dir = "~/.local/share/folio"   # `~` is expanded
/// key = "siteData"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Directory holding one JSON file per key.
    #[serde(default = "defaults::storage::dir")]
    #[educe(Default = defaults::storage::dir())]
    pub dir: PathBuf,

    /// Key the site document is stored under.
    #[serde(default = "defaults::storage::key")]
    #[educe(Default = defaults::storage::key())]
    pub key: String,
}

#[cfg(test)]
mod tests {
    use super::super::SiteConfig;
    use std::path::PathBuf;

    #[test]
    fn test_storage_config_defaults() {
        let config: SiteConfig = toml::from_str("").unwrap();
        assert_eq!(config.storage.dir, PathBuf::from(".folio"));
        assert_eq!(config.storage.key, "siteData");
    }

    #[test]
    fn test_storage_config_custom() {
        let config = r#"
            [storage]
            dir = "~/data"
            key = "portfolio"
        "#;
        let config: SiteConfig = toml::from_str(config).unwrap();
        assert_eq!(config.storage.dir, PathBuf::from("~/data"));
        assert_eq!(config.storage.key, "portfolio");
    }
}
