//! Field validation shared by every admin collection.

use std::sync::LazyLock;

use regex::Regex;

use crate::data::types::{EPHEMERAL_PREFIX, PRESENT};
use crate::data::{AssetUri, SlideKind};

use super::AdminError;

static RE_YEAR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]{4}$").unwrap());

static RE_ABSOLUTE_URI: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*:[^ \t\r\n\x0B\x0C]+$").unwrap());

/// Trimmed value of a required field.
pub fn required<'a>(field: &'static str, value: &'a str) -> Result<&'a str, AdminError> {
    match value.trim() {
        "" => Err(AdminError::MissingField(field)),
        value => Ok(value),
    }
}

/// A required absolute URI. Ephemeral references only come from uploads.
pub fn uri(field: &'static str, value: &str) -> Result<AssetUri, AdminError> {
    let value = required(field, value)?;
    if value.starts_with(EPHEMERAL_PREFIX) || !RE_ABSOLUTE_URI.is_match(value) {
        return Err(AdminError::InvalidUri {
            field,
            value: value.to_string(),
        });
    }
    Ok(AssetUri::remote(value))
}

/// A required four-digit year or `Present`.
pub fn year(field: &'static str, value: &str) -> Result<String, AdminError> {
    let value = required(field, value)?;
    if value == PRESENT || RE_YEAR.is_match(value) {
        Ok(value.to_string())
    } else {
        Err(AdminError::InvalidYear {
            field,
            value: value.to_string(),
        })
    }
}

/// Resolve the slide kind: explicit choice first, then the file extension.
pub fn slide_kind(explicit: Option<&str>, src: &str) -> Result<SlideKind, AdminError> {
    match explicit.map(str::trim).filter(|k| !k.is_empty()) {
        Some(kind) => kind.parse().map_err(AdminError::UnknownSlideKind),
        None => SlideKind::from_extension(src)
            .ok_or_else(|| AdminError::SlideKindRequired(src.to_string())),
    }
}

/// Declared media type of an upload that must be an image.
pub fn image_media(mime: &str) -> Result<(), AdminError> {
    match SlideKind::from_mime(mime) {
        Some(SlideKind::Image) => Ok(()),
        _ => Err(AdminError::UnsupportedMedia(mime.trim().to_string())),
    }
}

/// Declared media type of an upload that may be an image or a video.
pub fn slide_media(mime: &str) -> Result<SlideKind, AdminError> {
    SlideKind::from_mime(mime).ok_or_else(|| AdminError::UnsupportedMedia(mime.trim().to_string()))
}

/// Bounds check for delete-by-index.
pub fn index(index: usize, len: usize) -> Result<usize, AdminError> {
    if index < len {
        Ok(index)
    } else {
        Err(AdminError::IndexOutOfRange { index, len })
    }
}
