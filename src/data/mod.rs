//! Site document model and persistence.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐  resolve()   ┌───────────────┐   get/set   ┌────────────┐
//! │ PublicRender │ ◄─────────── │ DocumentStore │ ◄─────────► │ KvStorage  │
//! └──────────────┘              └───────────────┘             └────────────┘
//!                                  ▲        │ write()
//! ┌──────────────┐  resolve()      │        │
//! │ AdminEditor  │ ────────────────┘ ◄──────┘
//! └──────────────┘
//! ```
//!
//! The two surfaces never share mutable state; they meet only through the
//! persisted document.

pub mod asset;
mod sample;
pub mod storage;
mod store;
pub mod types;

pub use asset::{AssetHandle, AssetRegistry};
pub use sample::DEFAULT_PROFILE_PHOTO;
pub use storage::{FileStorage, KvStorage, MemoryStorage, StorageError};
pub use store::{DEFAULT_KEY, DocumentStore};
pub use types::{About, AssetUri, Document, ExperienceEntry, Project, Slide, SlideKind, SocialLinks};
