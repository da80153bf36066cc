//! Admin editing session.
//!
//! An [`AdminEditor`] resolves the document once, then applies one mutation at
//! a time. Each mutation runs the same pipeline:
//!
//! ```text
//! validate ──► clone + mutate ──► DocumentStore::write ──► swap in, revoke released uploads
//!    │                                  │
//!    └── AdminError ◄───────────────────┘   (document and storage untouched)
//! ```
//!
//! The returned [`Collection`] names the list the caller should re-render.

mod error;
pub mod page;
mod validate;

pub use error::AdminError;

use std::fmt;

use crate::data::asset::Asset;
use crate::data::{
    AssetHandle, AssetRegistry, AssetUri, DEFAULT_PROFILE_PHOTO, Document, DocumentStore,
    ExperienceEntry, KvStorage, Project, Slide,
};
use crate::log;

/// An editable collection of the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Slides,
    Photo,
    Experience,
    Projects,
    Clients,
}

impl Collection {
    pub const ALL: [Self; 5] = [
        Self::Slides,
        Self::Photo,
        Self::Experience,
        Self::Projects,
        Self::Clients,
    ];

    /// Id of the admin page container listing this collection.
    pub const fn container(self) -> &'static str {
        match self {
            Self::Slides => "newSlideList",
            Self::Photo => "aboutProfilePhoto",
            Self::Experience => "expList",
            Self::Projects => "projectList",
            Self::Clients => "clientList",
        }
    }

    /// Path segment under `/admin/`.
    pub const fn segment(self) -> &'static str {
        match self {
            Self::Slides => "slides",
            Self::Photo => "photo",
            Self::Experience => "experience",
            Self::Projects => "projects",
            Self::Clients => "clients",
        }
    }

    pub fn from_segment(segment: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.segment() == segment)
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Slides => "hero slide",
            Self::Photo => "profile photo",
            Self::Experience => "experience entry",
            Self::Projects => "project",
            Self::Clients => "client logo",
        })
    }
}

/// One line of an admin list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRow {
    pub index: usize,
    pub label: String,
}

/// Editing session over one stored document.
#[derive(Debug)]
pub struct AdminEditor<S> {
    store: DocumentStore<S>,
    document: Document,
    assets: AssetRegistry,
}

impl<S: KvStorage> AdminEditor<S> {
    /// Start a session, resolving the document once.
    pub fn open(store: DocumentStore<S>) -> Self {
        let document = store.resolve();
        Self {
            store,
            document,
            assets: AssetRegistry::new(),
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn store(&self) -> &DocumentStore<S> {
        &self.store
    }

    /// Bytes of a live upload.
    pub fn asset(&self, handle: &AssetHandle) -> Option<&Asset> {
        self.assets.get(handle)
    }

    /// Number of uploads still held by this session.
    pub fn upload_count(&self) -> usize {
        self.assets.len()
    }

    // ------------------------------------------------------------------------
    // Lists
    // ------------------------------------------------------------------------

    pub fn list(&self, collection: Collection) -> Vec<ListRow> {
        match collection {
            Collection::Slides => self.list_slides(),
            Collection::Photo => rows([self.document.about.profile_photo.to_string()]),
            Collection::Experience => self.list_experience(),
            Collection::Projects => self.list_projects(),
            Collection::Clients => self.list_clients(),
        }
    }

    pub fn list_slides(&self) -> Vec<ListRow> {
        rows(self.document.hero_slides.iter().map(|slide| {
            format!("[{}] {}", slide.kind.as_str().to_uppercase(), slide.src)
        }))
    }

    pub fn list_experience(&self) -> Vec<ListRow> {
        rows(self.document.experience.iter().map(|exp| {
            format!(
                "{} - {}, {}, {}",
                exp.start_year, exp.end_year, exp.company, exp.role
            )
        }))
    }

    pub fn list_projects(&self) -> Vec<ListRow> {
        rows(self.document.projects.iter().map(|proj| {
            format!("[{}] {}", proj.category.to_uppercase(), proj.link)
        }))
    }

    pub fn list_clients(&self) -> Vec<ListRow> {
        rows(self.document.clients.iter().map(|uri| format!("Logo URL: {uri}")))
    }

    // ------------------------------------------------------------------------
    // Hero slides
    // ------------------------------------------------------------------------

    /// Append a slide. The kind is inferred from the extension when omitted.
    pub fn add_slide(&mut self, src: &str, kind: Option<&str>) -> Result<Collection, AdminError> {
        let src = validate::uri("Slide URL", src)?;
        let kind = validate::slide_kind(kind, &src.to_string())?;

        let mut next = self.document.clone();
        next.hero_slides.push(Slide { kind, src });
        self.commit(next, None)?;
        log!("admin"; "added {} {}", kind.as_str(), Collection::Slides);
        Ok(Collection::Slides)
    }

    /// Append an uploaded image or video as a slide.
    pub fn upload_slide(&mut self, bytes: Vec<u8>, mime: &str) -> Result<Collection, AdminError> {
        let kind = validate::slide_media(mime)?;
        let handle = self.assets.register(bytes, mime);

        let mut next = self.document.clone();
        next.hero_slides.push(Slide {
            kind,
            src: AssetUri::LocalEphemeral(handle.clone()),
        });
        self.commit_upload(next, handle, None)?;
        Ok(Collection::Slides)
    }

    pub fn delete_slide(&mut self, index: usize) -> Result<Collection, AdminError> {
        self.remove_at(Collection::Slides, index, |d| &mut d.hero_slides, |s| {
            s.src.handle().cloned()
        })
    }

    // ------------------------------------------------------------------------
    // Profile photo
    // ------------------------------------------------------------------------

    /// Replace the profile photo.
    ///
    /// Empty input keeps a current upload and otherwise reverts to the
    /// default photo. The default path is accepted as-is.
    pub fn set_photo(&mut self, uri: &str) -> Result<Collection, AdminError> {
        let current = &self.document.about.profile_photo;
        let photo = match uri.trim() {
            "" if current.is_ephemeral() => current.clone(),
            "" | DEFAULT_PROFILE_PHOTO => AssetUri::remote(DEFAULT_PROFILE_PHOTO),
            uri => validate::uri("Profile photo URL", uri)?,
        };
        self.replace_photo(photo)
    }

    /// Use an uploaded image as the profile photo.
    pub fn upload_photo(&mut self, bytes: Vec<u8>, mime: &str) -> Result<Collection, AdminError> {
        validate::image_media(mime)?;
        let handle = self.assets.register(bytes, mime);

        let mut next = self.document.clone();
        next.about.profile_photo = AssetUri::LocalEphemeral(handle.clone());
        let released = self.document.about.profile_photo.handle().cloned();
        self.commit_upload(next, handle, released)?;
        Ok(Collection::Photo)
    }

    /// Revert to the default profile photo.
    pub fn reset_photo(&mut self) -> Result<Collection, AdminError> {
        self.replace_photo(AssetUri::remote(DEFAULT_PROFILE_PHOTO))
    }

    fn replace_photo(&mut self, photo: AssetUri) -> Result<Collection, AdminError> {
        let current = &self.document.about.profile_photo;
        let released = current.handle().filter(|_| *current != photo).cloned();

        let mut next = self.document.clone();
        next.about.profile_photo = photo;
        self.commit(next, released)?;
        log!("admin"; "{} set to {}", Collection::Photo, self.document.about.profile_photo);
        Ok(Collection::Photo)
    }

    // ------------------------------------------------------------------------
    // Experience
    // ------------------------------------------------------------------------

    /// Append an experience entry. Entries are stored unsorted.
    pub fn add_experience(
        &mut self,
        start: &str,
        end: &str,
        company: &str,
        role: &str,
    ) -> Result<Collection, AdminError> {
        let entry = ExperienceEntry {
            start_year: validate::year("Start year", start)?,
            end_year: validate::year("End year", end)?,
            company: validate::required("Company", company)?.to_string(),
            role: validate::required("Role", role)?.to_string(),
        };

        let mut next = self.document.clone();
        next.experience.push(entry);
        self.commit(next, None)?;
        log!("admin"; "added {}", Collection::Experience);
        Ok(Collection::Experience)
    }

    pub fn delete_experience(&mut self, index: usize) -> Result<Collection, AdminError> {
        self.remove_at(Collection::Experience, index, |d| &mut d.experience, |_| None)
    }

    // ------------------------------------------------------------------------
    // Projects
    // ------------------------------------------------------------------------

    pub fn add_project(
        &mut self,
        img: &str,
        link: &str,
        category: &str,
    ) -> Result<Collection, AdminError> {
        let project = Project {
            img: validate::uri("Image URL", img)?,
            link: validate::uri("Project link", link)?.to_string(),
            category: validate::required("Category", category)?.to_string(),
        };

        let mut next = self.document.clone();
        next.projects.push(project);
        self.commit(next, None)?;
        log!("admin"; "added {}", Collection::Projects);
        Ok(Collection::Projects)
    }

    pub fn delete_project(&mut self, index: usize) -> Result<Collection, AdminError> {
        self.remove_at(Collection::Projects, index, |d| &mut d.projects, |p| {
            p.img.handle().cloned()
        })
    }

    // ------------------------------------------------------------------------
    // Clients
    // ------------------------------------------------------------------------

    pub fn add_client(&mut self, uri: &str) -> Result<Collection, AdminError> {
        let uri = validate::uri("Logo URL", uri)?;

        let mut next = self.document.clone();
        next.clients.push(uri);
        self.commit(next, None)?;
        log!("admin"; "added {}", Collection::Clients);
        Ok(Collection::Clients)
    }

    /// Append an uploaded image as a client logo.
    pub fn upload_client(&mut self, bytes: Vec<u8>, mime: &str) -> Result<Collection, AdminError> {
        validate::image_media(mime)?;
        let handle = self.assets.register(bytes, mime);

        let mut next = self.document.clone();
        next.clients.push(AssetUri::LocalEphemeral(handle.clone()));
        self.commit_upload(next, handle, None)?;
        Ok(Collection::Clients)
    }

    pub fn delete_client(&mut self, index: usize) -> Result<Collection, AdminError> {
        self.remove_at(Collection::Clients, index, |d| &mut d.clients, |uri| {
            uri.handle().cloned()
        })
    }

    // ------------------------------------------------------------------------
    // Pipeline
    // ------------------------------------------------------------------------

    fn remove_at<T>(
        &mut self,
        collection: Collection,
        index: usize,
        list: impl FnOnce(&mut Document) -> &mut Vec<T>,
        owned: impl FnOnce(&T) -> Option<AssetHandle>,
    ) -> Result<Collection, AdminError> {
        let mut next = self.document.clone();
        let items = list(&mut next);
        let index = validate::index(index, items.len())?;
        let removed = items.remove(index);

        self.commit(next, owned(&removed))?;
        log!("admin"; "deleted {collection} #{index}");
        Ok(collection)
    }

    /// Persist `next`, then make it current and release uploads it no longer
    /// references.
    fn commit(&mut self, next: Document, released: Option<AssetHandle>) -> Result<(), AdminError> {
        self.store.write(&next)?;
        self.document = next;

        if let Some(handle) = released
            && !self.document.ephemeral_handles().any(|h| *h == handle)
        {
            self.assets.revoke(&handle);
        }
        Ok(())
    }

    /// Like [`Self::commit`], but drops the fresh upload if the write fails.
    fn commit_upload(
        &mut self,
        next: Document,
        handle: AssetHandle,
        released: Option<AssetHandle>,
    ) -> Result<(), AdminError> {
        if let Err(err) = self.commit(next, released) {
            self.assets.revoke(&handle);
            return Err(err);
        }
        log!("admin"; "stored upload {handle}");
        Ok(())
    }
}

fn rows(labels: impl IntoIterator<Item = String>) -> Vec<ListRow> {
    labels
        .into_iter()
        .enumerate()
        .map(|(index, label)| ListRow { index, label })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{DEFAULT_KEY, MemoryStorage, SlideKind, StorageError};

    fn editor(storage: &MemoryStorage) -> AdminEditor<&MemoryStorage> {
        AdminEditor::open(DocumentStore::new(storage, DEFAULT_KEY))
    }

    fn reload(storage: &MemoryStorage) -> Document {
        DocumentStore::new(storage, DEFAULT_KEY).resolve()
    }

    /// Storage whose writes always fail.
    struct ReadOnly;

    impl KvStorage for ReadOnly {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Ok(None)
        }

        fn set(&self, key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Io(
                key.into(),
                std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
            ))
        }
    }

    #[test]
    fn test_delete_client_by_index() {
        let storage = MemoryStorage::new();
        let mut admin = editor(&storage);
        let before = admin.document().clients.clone();
        assert_eq!(before.len(), 3);

        assert_eq!(admin.delete_client(1).unwrap(), Collection::Clients);

        let expected = vec![before[0].clone(), before[2].clone()];
        assert_eq!(admin.document().clients, expected);
        assert_eq!(reload(&storage).clients, expected);
        assert_eq!(storage.write_count(), 1);
    }

    #[test]
    fn test_invalid_year_aborts_without_write() {
        let storage = MemoryStorage::new();
        let mut admin = editor(&storage);
        let len = admin.document().experience.len();

        let err = admin
            .add_experience("abcd", "2022", "Acme", "Designer")
            .unwrap_err();

        assert!(matches!(err, AdminError::InvalidYear { .. }));
        assert_eq!(admin.document().experience.len(), len);
        assert_eq!(storage.write_count(), 0);
    }

    #[test]
    fn test_non_ascii_digit_year_rejected() {
        let storage = MemoryStorage::new();
        let mut admin = editor(&storage);

        let err = admin
            .add_experience("٢٠٢٠", "Present", "Acme", "Designer")
            .unwrap_err();

        assert!(matches!(err, AdminError::InvalidYear { field: "Start year", .. }));
        assert_eq!(storage.write_count(), 0);
    }

    #[test]
    fn test_add_experience_appends_unsorted() {
        let storage = MemoryStorage::new();
        let mut admin = editor(&storage);

        admin
            .add_experience(" 2010 ", "Present", "Acme", "Intern")
            .unwrap();

        let stored = reload(&storage).experience;
        assert_eq!(stored.len(), 4);
        assert_eq!(stored[3].start_year, "2010");
        assert_eq!(
            admin.list_experience()[3].label,
            "2010 - Present, Acme, Intern"
        );
    }

    #[test]
    fn test_missing_fields_rejected() {
        let storage = MemoryStorage::new();
        let mut admin = editor(&storage);

        assert!(matches!(
            admin.add_experience("2020", "2021", "  ", "Designer"),
            Err(AdminError::MissingField("Company"))
        ));
        assert!(matches!(
            admin.add_project("https://x.com/a.jpg", "https://x.com", ""),
            Err(AdminError::MissingField("Category"))
        ));
        assert_eq!(storage.write_count(), 0);
    }

    #[test]
    fn test_add_slide_infers_kind() {
        let storage = MemoryStorage::new();
        let mut admin = editor(&storage);

        admin.add_slide("https://x.com/intro.webm", None).unwrap();
        admin.add_slide("https://x.com/still", Some("image")).unwrap();
        assert!(matches!(
            admin.add_slide("https://x.com/unknown", None),
            Err(AdminError::SlideKindRequired(_))
        ));

        let slides = &admin.document().hero_slides;
        assert_eq!(slides.len(), 5);
        assert_eq!(slides[3].kind, SlideKind::Video);
        assert_eq!(slides[4].kind, SlideKind::Image);
        assert_eq!(admin.list_slides()[3].label, "[VIDEO] https://x.com/intro.webm");
        assert_eq!(storage.write_count(), 2);
    }

    #[test]
    fn test_delete_out_of_range() {
        let storage = MemoryStorage::new();
        let mut admin = editor(&storage);

        assert!(matches!(
            admin.delete_project(3),
            Err(AdminError::IndexOutOfRange { index: 3, len: 3 })
        ));
        assert_eq!(storage.write_count(), 0);
    }

    #[test]
    fn test_upload_and_revoke_on_delete() {
        let storage = MemoryStorage::new();
        let mut admin = editor(&storage);

        admin.upload_client(b"png".to_vec(), "image/png").unwrap();
        let uri = admin.document().clients[3].clone();
        let handle = uri.handle().cloned().unwrap();
        assert_eq!(admin.asset(&handle).unwrap().bytes, b"png");
        assert!(uri.to_string().starts_with("blob:"));
        assert_eq!(reload(&storage).clients[3], uri);

        admin.delete_client(3).unwrap();
        assert!(admin.asset(&handle).is_none());
    }

    #[test]
    fn test_upload_media_type_rejected() {
        let storage = MemoryStorage::new();
        let mut admin = editor(&storage);

        assert!(matches!(
            admin.upload_client(b"x".to_vec(), "video/mp4"),
            Err(AdminError::UnsupportedMedia(_))
        ));
        assert!(matches!(
            admin.upload_slide(b"x".to_vec(), "application/pdf"),
            Err(AdminError::UnsupportedMedia(_))
        ));
        assert_eq!(storage.write_count(), 0);

        admin.upload_slide(b"x".to_vec(), "video/mp4").unwrap();
        assert_eq!(admin.document().hero_slides[3].kind, SlideKind::Video);
    }

    #[test]
    fn test_photo_semantics() {
        let storage = MemoryStorage::new();
        let mut admin = editor(&storage);

        admin.upload_photo(b"me".to_vec(), "image/jpeg").unwrap();
        let uploaded = admin.document().about.profile_photo.clone();
        let handle = uploaded.handle().cloned().unwrap();

        // empty input keeps the upload
        admin.set_photo("").unwrap();
        assert_eq!(admin.document().about.profile_photo, uploaded);
        assert!(admin.asset(&handle).is_some());

        // replacing it releases the upload
        admin.set_photo("https://x.com/me.jpg").unwrap();
        assert_eq!(
            admin.document().about.profile_photo,
            AssetUri::remote("https://x.com/me.jpg")
        );
        assert!(admin.asset(&handle).is_none());

        // empty input over a remote photo reverts to the default
        admin.set_photo("  ").unwrap();
        assert_eq!(
            admin.document().about.profile_photo,
            AssetUri::remote(DEFAULT_PROFILE_PHOTO)
        );

        assert!(matches!(
            admin.set_photo("profile.jpg"),
            Err(AdminError::InvalidUri { .. })
        ));
    }

    #[test]
    fn test_reset_photo_releases_upload() {
        let storage = MemoryStorage::new();
        let mut admin = editor(&storage);

        admin.upload_photo(b"me".to_vec(), "image/png").unwrap();
        let handle = admin.document().about.profile_photo.handle().cloned().unwrap();

        admin.reset_photo().unwrap();
        assert_eq!(
            reload(&storage).about.profile_photo,
            AssetUri::remote(DEFAULT_PROFILE_PHOTO)
        );
        assert!(admin.asset(&handle).is_none());
    }

    #[test]
    fn test_failed_write_leaves_session_untouched() {
        let mut admin = AdminEditor::open(DocumentStore::new(ReadOnly, DEFAULT_KEY));
        let before = admin.document().clone();

        assert!(matches!(
            admin.add_client("https://x.com/logo.png"),
            Err(AdminError::Storage(_))
        ));
        assert!(matches!(
            admin.upload_client(b"x".to_vec(), "image/png"),
            Err(AdminError::Storage(_))
        ));
        assert_eq!(*admin.document(), before);
        assert_eq!(admin.upload_count(), 0);
    }

    #[test]
    fn test_list_labels() {
        let storage = MemoryStorage::new();
        let admin = editor(&storage);

        assert_eq!(admin.list_slides()[0].label, "[IMAGE] assets/images/slide1.jpg");
        assert_eq!(
            admin.list_projects()[1].label,
            "[BRANDING] https://behance.net/project2"
        );
        assert_eq!(
            admin.list(Collection::Clients)[2],
            ListRow {
                index: 2,
                label: "Logo URL: assets/images/logo3.png".into()
            }
        );
    }

    #[test]
    fn test_collection_segments() {
        for collection in Collection::ALL {
            assert_eq!(Collection::from_segment(collection.segment()), Some(collection));
        }
        assert_eq!(Collection::from_segment("nope"), None);
        assert_eq!(Collection::Experience.container(), "expList");
    }
}
