//! The `/admin` editor page.

use anyhow::{Context, Result};
use std::fs;

use crate::config::SiteConfig;
use crate::data::KvStorage;
use crate::render::Page;
use crate::render::dom::{Element, Node};

use super::{AdminEditor, Collection, ListRow};

/// Built-in admin page template.
pub const ADMIN_TEMPLATE: &str = include_str!("../embed/admin.html");

/// Delete confirmation and upload wiring for the admin page.
pub const ADMIN_SCRIPT: &str = include_str!("../embed/admin.js");

const NOTICE: &str = "notice";

/// Load the configured admin template, or the built-in one.
pub fn load_admin_template(config: &SiteConfig) -> Result<String> {
    match &config.build.admin_template {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read admin template {}", path.display())),
        None => Ok(ADMIN_TEMPLATE.to_string()),
    }
}

/// Render every collection list, the photo field and the last notice.
pub fn render_admin<S: KvStorage>(
    editor: &AdminEditor<S>,
    template: &str,
    config: &SiteConfig,
    notice: Option<&str>,
) -> Result<String> {
    let mut page = Page::new(template);
    page.set_var("title", &config.base.title)
        .set_var("language", &config.base.language);

    for collection in [
        Collection::Slides,
        Collection::Experience,
        Collection::Projects,
        Collection::Clients,
    ] {
        page.swap(
            collection.container(),
            render_list(collection, &editor.list(collection)),
        );
    }

    // Uploads cannot be typed back in, so only a remote photo is prefilled
    let photo = &editor.document().about.profile_photo;
    if !photo.is_ephemeral() {
        page.set_attr(Collection::Photo.container(), "value", &photo.to_string());
    }

    if let Some(notice) = notice.filter(|n| !n.is_empty()) {
        page.swap(NOTICE, vec![Node::Text(notice.to_string())]);
    }

    page.render()
}

/// One `li` per row, each with a confirm-guarded delete form.
pub fn render_list(collection: Collection, rows: &[ListRow]) -> Vec<Node> {
    rows.iter()
        .map(|row| {
            Element::new("li")
                .child(Element::new("span").text(&row.label))
                .child(
                    Element::new("form")
                        .attr("method", "post")
                        .attr("action", format!("/admin/{}/delete", collection.segment()))
                        .attr("data-confirm", format!("Delete this {collection}?"))
                        .child(
                            Element::new("input")
                                .attr("type", "hidden")
                                .attr("name", "index")
                                .attr("value", row.index.to_string()),
                        )
                        .child(Element::new("button").attr("type", "submit").text("Delete")),
                )
                .into()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{DEFAULT_KEY, DocumentStore, MemoryStorage};

    #[test]
    fn test_render_admin_lists() {
        let storage = MemoryStorage::new();
        let editor = AdminEditor::open(DocumentStore::new(&storage, DEFAULT_KEY));
        let html = render_admin(
            &editor,
            ADMIN_TEMPLATE,
            &SiteConfig::default(),
            Some("Client added"),
        )
        .unwrap();

        assert!(html.contains(r#"action="/admin/clients/delete""#));
        assert!(html.contains(r#"data-confirm="Delete this client logo?""#));
        assert!(html.contains("Logo URL: assets/images/logo2.png"));
        assert!(html.contains("2022 - Present, Company C, Senior Designer"));
        assert!(html.contains(r#"value="assets/images/your-default-profile-section-image.jpg""#));
        assert!(html.contains(">Client added</p>"));
    }

    #[test]
    fn test_uploaded_photo_not_prefilled() {
        let storage = MemoryStorage::new();
        let mut editor = AdminEditor::open(DocumentStore::new(&storage, DEFAULT_KEY));
        editor.upload_photo(b"me".to_vec(), "image/png").unwrap();

        let html = render_admin(&editor, ADMIN_TEMPLATE, &SiteConfig::default(), None).unwrap();
        assert!(!html.contains("blob:"));
        assert!(html.contains(r#"<p id="notice" class="notice"></p>"#));
    }

    #[test]
    fn test_render_list_rows() {
        let rows = vec![ListRow {
            index: 0,
            label: "[SOCIAL] https://x.com".into(),
        }];
        let nodes = render_list(Collection::Projects, &rows);
        let li = nodes[0].as_element().unwrap();

        assert_eq!(li.tag, "li");
        assert!(li.text_content().starts_with("[SOCIAL] https://x.com"));
    }
}
