//! `[base]` section configuration.
//!
//! Contains page metadata written into the templates.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[base]` section in folio.toml - page metadata.
///
/// # Example
/// ```toml
/// [base]
/// title = "Jane Doe"
/// description = "Graphic design portfolio"
/// language = "en"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct BaseConfig {
    /// Title shown in the browser tab and admin header.
    #[serde(default = "defaults::base::title")]
    #[educe(Default = defaults::base::title())]
    pub title: String,

    /// Description for the `<meta name="description">` tag.
    #[serde(default)]
    pub description: String,

    /// BCP 47 language code for `<html lang>`.
    #[serde(default = "defaults::base::language")]
    #[educe(Default = defaults::base::language())]
    pub language: String,
}

#[cfg(test)]
mod tests {
    use super::super::SiteConfig;

    #[test]
    fn test_base_config_full() {
        let config = r#"
            [base]
            title = "Jane Doe"
            description = "Graphic design portfolio"
            language = "de"
        "#;
        let config: SiteConfig = toml::from_str(config).unwrap();

        assert_eq!(config.base.title, "Jane Doe");
        assert_eq!(config.base.description, "Graphic design portfolio");
        assert_eq!(config.base.language, "de");
    }

    #[test]
    fn test_base_config_defaults() {
        let config: SiteConfig = toml::from_str("[base]").unwrap();

        assert_eq!(config.base.title, "Portfolio");
        assert_eq!(config.base.description, "");
        assert_eq!(config.base.language, "en");
    }

    #[test]
    fn test_unknown_field_rejection() {
        let config = r#"
            [base]
            title = "Test"
            author = "should_fail"
        "#;
        let result: Result<SiteConfig, _> = toml::from_str(config);

        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("unknown field"));
    }

    #[test]
    fn test_base_config_unicode() {
        let config = r#"
            [base]
            title = "Atelier René 🎨"
        "#;
        let config: SiteConfig = toml::from_str(config).unwrap();
        assert_eq!(config.base.title, "Atelier René 🎨");
    }
}
