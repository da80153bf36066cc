//! Document types persisted under the site data key.
//!
//! Field names follow the stored JSON layout (`heroSlides`, `profilePhoto`, ...).
//! Every field falls back to an empty value when missing, so a structurally
//! incomplete document still loads.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::asset::AssetHandle;

/// Prefix marking a session-scoped asset reference in serialized form.
pub const EPHEMERAL_PREFIX: &str = "blob:";

/// Route under which the server exposes session assets.
pub const EPHEMERAL_ROUTE: &str = "/blob/";

/// Literal marking an open-ended experience range.
pub const PRESENT: &str = "Present";

// ============================================================================
// Document
// ============================================================================

/// The single aggregate of all site content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Document {
    /// Hero banner media, displayed in array order.
    pub hero_slides: Vec<Slide>,
    pub about: About,
    /// Unordered at rest, sorted at render time.
    pub experience: Vec<ExperienceEntry>,
    pub projects: Vec<Project>,
    /// Client logo URIs.
    pub clients: Vec<AssetUri>,
    pub social_links: SocialLinks,
}

impl Document {
    /// Iterate over every ephemeral handle referenced by the document.
    pub fn ephemeral_handles(&self) -> impl Iterator<Item = &AssetHandle> {
        self.hero_slides
            .iter()
            .map(|s| &s.src)
            .chain(std::iter::once(&self.about.profile_photo))
            .chain(self.projects.iter().map(|p| &p.img))
            .chain(self.clients.iter())
            .filter_map(AssetUri::handle)
    }
}

/// One hero-banner media entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Slide {
    #[serde(rename = "type")]
    pub kind: SlideKind,
    pub src: AssetUri,
}

/// Media tag a slide renders as.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlideKind {
    #[default]
    Image,
    Video,
}

impl SlideKind {
    /// Guess the kind from a URI's file extension.
    ///
    /// Returns `None` when the extension is not a known image or video type.
    pub fn from_extension(uri: &str) -> Option<Self> {
        let lower = uri.to_ascii_lowercase();
        if [".mp4", ".webm", ".ogg"].iter().any(|ext| lower.ends_with(ext)) {
            Some(Self::Video)
        } else if [".jpg", ".jpeg", ".png", ".gif"].iter().any(|ext| lower.ends_with(ext)) {
            Some(Self::Image)
        } else {
            None
        }
    }

    /// Classify a declared media type (`image/png`, `video/mp4`, ...).
    pub fn from_mime(mime: &str) -> Option<Self> {
        let mime = mime.trim().to_ascii_lowercase();
        if mime.starts_with("image/") {
            Some(Self::Image)
        } else if mime.starts_with("video/") {
            Some(Self::Video)
        } else {
            None
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Video => "video",
        }
    }
}

impl std::str::FromStr for SlideKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "image" => Ok(Self::Image),
            "video" => Ok(Self::Video),
            other => Err(other.to_string()),
        }
    }
}

/// About block. Only `profile_photo` is edited; the rest are legacy fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct About {
    pub name: String,
    pub role: String,
    pub experience_years: String,
    pub profile_photo: AssetUri,
}

/// One row of work experience.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExperienceEntry {
    /// Four-digit year or `"Present"`.
    pub start_year: String,
    pub end_year: String,
    pub company: String,
    pub role: String,
}

impl ExperienceEntry {
    pub fn start_key(&self) -> YearKey {
        YearKey::parse(&self.start_year)
    }
}

/// A gallery project tagged with a free-form category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    #[serde(rename = "type")]
    pub category: String,
    pub img: AssetUri,
    pub link: String,
}

/// Footer links for the fixed set of platforms.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialLinks {
    pub instagram: String,
    pub linkedin: String,
    pub behance: String,
}

impl SocialLinks {
    /// Platforms in display order, paired with their stored URI.
    pub fn entries(&self) -> [(&'static str, &str); 3] {
        [
            ("instagram", &self.instagram),
            ("linkedin", &self.linkedin),
            ("behance", &self.behance),
        ]
    }
}

// ============================================================================
// Year ordering
// ============================================================================

/// Sort key for an experience year.
///
/// `Present` ranks above every numeric year; values that are neither rank
/// below all of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum YearKey {
    Unknown,
    Year(u32),
    Present,
}

impl YearKey {
    pub fn parse(s: &str) -> Self {
        let s = s.trim();
        if s == PRESENT {
            return Self::Present;
        }
        s.parse().map_or(Self::Unknown, Self::Year)
    }
}

/// Newest-first comparison of two experience entries.
pub fn newest_first(a: &ExperienceEntry, b: &ExperienceEntry) -> Ordering {
    b.start_key().cmp(&a.start_key())
}

// ============================================================================
// Asset URIs
// ============================================================================

/// A media location: either an ordinary URI or a session-scoped upload.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AssetUri {
    Remote(String),
    LocalEphemeral(AssetHandle),
}

impl Default for AssetUri {
    fn default() -> Self {
        Self::Remote(String::new())
    }
}

impl AssetUri {
    /// Interpret a stored string, recognizing the ephemeral prefix.
    pub fn parse(s: &str) -> Self {
        match s.strip_prefix(EPHEMERAL_PREFIX) {
            Some(handle) => Self::LocalEphemeral(AssetHandle::new(handle)),
            None => Self::Remote(s.to_string()),
        }
    }

    /// An ordinary URI. A `blob:` string cannot be remote and is read as
    /// an upload handle, the same way it reads back from storage.
    pub fn remote(s: impl Into<String>) -> Self {
        let s = s.into();
        match s.strip_prefix(EPHEMERAL_PREFIX) {
            Some(handle) => Self::LocalEphemeral(AssetHandle::new(handle)),
            None => Self::Remote(s),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Remote(s) if s.trim().is_empty())
    }

    pub fn is_ephemeral(&self) -> bool {
        matches!(self, Self::LocalEphemeral(_))
    }

    pub fn handle(&self) -> Option<&AssetHandle> {
        match self {
            Self::LocalEphemeral(handle) => Some(handle),
            Self::Remote(_) => None,
        }
    }

    /// Location a browser should load this asset from.
    pub fn href(&self) -> String {
        match self {
            Self::Remote(uri) => uri.clone(),
            Self::LocalEphemeral(handle) => format!("{EPHEMERAL_ROUTE}{handle}"),
        }
    }
}

impl fmt::Display for AssetUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Remote(uri) => f.write_str(uri),
            Self::LocalEphemeral(handle) => write!(f, "{EPHEMERAL_PREFIX}{handle}"),
        }
    }
}

impl Serialize for AssetUri {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for AssetUri {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Self::parse(&s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_key_order() {
        assert!(YearKey::Present > YearKey::Year(9999));
        assert!(YearKey::Year(2020) > YearKey::Year(2019));
        assert!(YearKey::Year(0) > YearKey::Unknown);
        assert_eq!(YearKey::parse("Present"), YearKey::Present);
        assert_eq!(YearKey::parse("2021"), YearKey::Year(2021));
        assert_eq!(YearKey::parse("abcd"), YearKey::Unknown);
        assert_eq!(YearKey::parse(""), YearKey::Unknown);
    }

    #[test]
    fn test_slide_kind_from_extension() {
        assert_eq!(SlideKind::from_extension("a/b.MP4"), Some(SlideKind::Video));
        assert_eq!(SlideKind::from_extension("x.webm"), Some(SlideKind::Video));
        assert_eq!(SlideKind::from_extension("x.jpeg"), Some(SlideKind::Image));
        assert_eq!(SlideKind::from_extension("x.gif"), Some(SlideKind::Image));
        assert_eq!(SlideKind::from_extension("x.svg"), None);
        assert_eq!(SlideKind::from_extension("https://cdn.example.com/clip"), None);
    }

    #[test]
    fn test_slide_kind_from_mime() {
        assert_eq!(SlideKind::from_mime("image/png"), Some(SlideKind::Image));
        assert_eq!(SlideKind::from_mime("Video/MP4"), Some(SlideKind::Video));
        assert_eq!(SlideKind::from_mime("application/pdf"), None);
        assert_eq!(SlideKind::from_mime(""), None);
    }

    #[test]
    fn test_asset_uri_serde() {
        let remote: AssetUri = serde_json::from_str(r#""https://x.com/a.png""#).unwrap();
        assert_eq!(remote, AssetUri::remote("https://x.com/a.png"));

        let local: AssetUri = serde_json::from_str(r#""blob:abc123""#).unwrap();
        assert_eq!(local, AssetUri::LocalEphemeral(AssetHandle::new("abc123")));
        assert_eq!(serde_json::to_string(&local).unwrap(), r#""blob:abc123""#);
        assert_eq!(local.href(), "/blob/abc123");
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let doc: Document = serde_json::from_str(
            r#"{ "heroSlides": [{ "src": "a.jpg" }], "about": {}, "experience": [{ "company": "C" }] }"#,
        )
        .unwrap();

        assert_eq!(doc.hero_slides[0].kind, SlideKind::Image);
        assert!(doc.about.profile_photo.is_empty());
        assert_eq!(doc.experience[0].start_year, "");
        assert!(doc.projects.is_empty());
        assert_eq!(doc.social_links, SocialLinks::default());
    }

    #[test]
    fn test_unknown_slide_kind_is_rejected() {
        let result: Result<Document, _> =
            serde_json::from_str(r#"{ "heroSlides": [{ "type": "audio", "src": "a.mp3" }] }"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_json_layout_uses_stored_names() {
        let doc = Document {
            projects: vec![Project {
                category: "social".into(),
                img: AssetUri::remote("i.png"),
                link: "https://x.com".into(),
            }],
            ..Document::default()
        };
        let json = serde_json::to_value(&doc).unwrap();

        assert!(json.get("heroSlides").is_some());
        assert!(json.get("socialLinks").is_some());
        assert_eq!(json["projects"][0]["type"], "social");
        assert!(json["about"].get("profilePhoto").is_some());
    }

    #[test]
    fn test_remote_never_holds_ephemeral_prefix() {
        let uri = AssetUri::remote("blob:https://x.com/uuid");
        assert!(uri.is_ephemeral());

        let json = serde_json::to_string(&uri).unwrap();
        assert_eq!(serde_json::from_str::<AssetUri>(&json).unwrap(), uri);
    }

    #[test]
    fn test_ephemeral_handles() {
        let doc = Document {
            hero_slides: vec![Slide {
                kind: SlideKind::Image,
                src: AssetUri::parse("blob:one"),
            }],
            clients: vec![AssetUri::remote("https://x.com/l.png"), AssetUri::parse("blob:two")],
            ..Document::default()
        };
        let handles: Vec<_> = doc.ephemeral_handles().map(ToString::to_string).collect();
        assert_eq!(handles, vec!["one", "two"]);
    }
}
