//! Admin editing errors.

use crate::data::StorageError;
use thiserror::Error;

/// Why an admin mutation was rejected. Nothing is mutated or written when one
/// of these is returned.
#[derive(Debug, Error)]
pub enum AdminError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("{field} must be an absolute URI, got `{value}`")]
    InvalidUri { field: &'static str, value: String },

    #[error("{field} must be a four-digit year or `Present`, got `{value}`")]
    InvalidYear { field: &'static str, value: String },

    #[error("unsupported media type `{0}`")]
    UnsupportedMedia(String),

    #[error("cannot tell whether `{0}` is an image or a video, specify the kind")]
    SlideKindRequired(String),

    #[error("unknown slide kind `{0}`, expected `image` or `video`")]
    UnknownSlideKind(String),

    #[error("no entry at index {index} (list has {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("failed to save changes")]
    Storage(#[from] StorageError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_error_display() {
        let err = AdminError::InvalidYear {
            field: "Start year",
            value: "abcd".into(),
        };
        assert_eq!(
            err.to_string(),
            "Start year must be a four-digit year or `Present`, got `abcd`"
        );

        let err = AdminError::IndexOutOfRange { index: 5, len: 3 };
        assert!(err.to_string().contains("index 5"));
    }
}
