//! Session-scoped uploads.
//!
//! An upload is held in memory for the lifetime of one editing session and
//! addressed by an opaque handle. Handles survive in the stored document as
//! `blob:<handle>` strings but resolve to nothing once the session ends.
//! Whoever removes the owning entry must call [`AssetRegistry::revoke`].

use std::collections::HashMap;
use std::fmt;

/// Opaque identifier for an in-memory upload.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AssetHandle(String);

impl AssetHandle {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AssetHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Uploaded bytes together with their declared media type.
#[derive(Debug, Clone)]
pub struct Asset {
    pub mime: String,
    pub bytes: Vec<u8>,
}

/// In-memory table of live uploads for one session.
#[derive(Debug, Default)]
pub struct AssetRegistry {
    assets: HashMap<AssetHandle, Asset>,
    /// Mixed into the handle hash so identical uploads get distinct handles.
    counter: u64,
}

impl AssetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an upload and return its handle.
    pub fn register(&mut self, bytes: Vec<u8>, mime: &str) -> AssetHandle {
        self.counter += 1;
        let mut hasher = blake3::Hasher::new();
        hasher.update(&self.counter.to_le_bytes());
        hasher.update(&bytes);
        let digest = hasher.finalize();
        let handle = AssetHandle(hex::encode(&digest.as_bytes()[..12]));

        self.assets.insert(
            handle.clone(),
            Asset {
                mime: mime.trim().to_string(),
                bytes,
            },
        );
        handle
    }

    pub fn get(&self, handle: &AssetHandle) -> Option<&Asset> {
        self.assets.get(handle)
    }

    /// Release an upload. Returns `false` if the handle was not live
    /// (already revoked, or left over from an earlier session).
    pub fn revoke(&mut self, handle: &AssetHandle) -> bool {
        self.assets.remove(handle).is_some()
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }
}
