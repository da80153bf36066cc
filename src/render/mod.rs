//! Public page rendering.
//!
//! Every section is a pure function of the document returning DOM
//! construction instructions; [`render_public`] swaps them into the named
//! containers of the page template.
//!
//! | Container            | Source                 | Function               |
//! |----------------------|------------------------|------------------------|
//! | `#heroSlides`        | `heroSlides`           | [`render_hero`]        |
//! | `#about`             | `about`                | [`render_about`]       |
//! | `#workExperienceGrid`| `experience`           | [`render_experience`]  |
//! | `#projects`          | `projects`             | [`render_projects`]    |
//! | `#projectNav`        | `projects` categories  | [`render_filter_nav`]  |
//! | `#clientLogos`       | `clients`              | [`render_clients`]     |
//! | `#socialLinks`       | `socialLinks`          | [`render_social`]      |

mod about;
pub mod dom;
mod experience;
mod footer;
mod hero;
pub mod page;
mod projects;

pub use about::render_about;
pub use experience::render_experience;
pub use footer::{render_clients, render_social};
pub use hero::{SLIDE_INTERVAL, render_hero};
pub use page::Page;
pub use projects::{ProjectFilter, render_filter_nav, render_projects};

use crate::{config::SiteConfig, data::Document};
use anyhow::{Context, Result};
use std::fs;

/// Built-in public page template.
pub const INDEX_TEMPLATE: &str = include_str!("../embed/index.html");

/// Client script driving the slider, filter and experience panel.
pub const SITE_SCRIPT: &str = include_str!("../embed/site.js");

pub const HERO: &str = "heroSlides";
pub const ABOUT: &str = "about";
pub const EXPERIENCE: &str = "workExperienceGrid";
pub const PROJECTS: &str = "projects";
pub const PROJECT_NAV: &str = "projectNav";
pub const CLIENTS: &str = "clientLogos";
pub const SOCIAL: &str = "socialLinks";

const CONTAINERS: &[&str] = &[HERO, ABOUT, EXPERIENCE, PROJECTS, PROJECT_NAV, CLIENTS, SOCIAL];

/// Section containers the template does not declare.
pub fn missing_containers(template: &str) -> Vec<&'static str> {
    let page = Page::new(template);
    CONTAINERS
        .iter()
        .copied()
        .filter(|id| !page.has_container(id))
        .collect()
}

/// Load the configured public template, or the built-in one.
pub fn load_template(config: &SiteConfig) -> Result<String> {
    match &config.build.template {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read template {}", path.display())),
        None => Ok(INDEX_TEMPLATE.to_string()),
    }
}

/// Render the full public page for a document.
pub fn render_public(
    doc: &Document,
    template: &str,
    config: &SiteConfig,
    filter: &ProjectFilter,
) -> Result<String> {
    let mut page = Page::new(template);
    page.set_var("title", &config.base.title)
        .set_var("description", &config.base.description)
        .set_var("language", &config.base.language);

    page.swap(HERO, render_hero(&doc.hero_slides))
        .set_attr(HERO, "data-interval", &SLIDE_INTERVAL.as_millis().to_string())
        .swap(ABOUT, render_about(&doc.about))
        .swap(EXPERIENCE, render_experience(&doc.experience))
        .swap(PROJECTS, render_projects(&doc.projects, filter))
        .swap(PROJECT_NAV, render_filter_nav(&doc.projects, filter))
        .swap(CLIENTS, render_clients(&doc.clients))
        .swap(SOCIAL, render_social(&doc.social_links));

    page.render()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{AssetUri, Project};

    fn config() -> SiteConfig {
        let mut config = SiteConfig::default();
        config.base.title = "Jane <Designer>".into();
        config
    }

    #[test]
    fn test_render_sample_document() {
        let html = render_public(
            &Document::sample(),
            INDEX_TEMPLATE,
            &config(),
            &ProjectFilter::All,
        )
        .unwrap();

        assert!(html.contains("<title>Jane &lt;Designer&gt;</title>"));
        assert!(html.contains(r#"data-interval="4000""#));
        assert_eq!(html.matches(r#"class="slide""#).count(), 3);
        assert_eq!(html.matches(r#"class="exp-item""#).count(), 3);
        assert!(html.contains("Company C"));
        assert!(html.contains("Instagram"));
        assert!(html.contains("/_folio/site.js"));
    }

    #[test]
    fn test_render_is_idempotent() {
        let doc = Document::sample();
        let a = render_public(&doc, INDEX_TEMPLATE, &config(), &ProjectFilter::All).unwrap();
        let b = render_public(&doc, INDEX_TEMPLATE, &config(), &ProjectFilter::All).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_missing_containers() {
        assert!(missing_containers(INDEX_TEMPLATE).is_empty());

        let partial = r#"<main><div id="about"></div><ul id="socialLinks"></ul></main>"#;
        let missing = missing_containers(partial);
        assert_eq!(missing.len(), 5);
        assert!(!missing.contains(&ABOUT));
        assert!(missing.contains(&HERO));
    }

    #[test]
    fn test_template_without_containers() {
        let template = "<html><body><p>static</p></body></html>";
        let html =
            render_public(&Document::sample(), template, &config(), &ProjectFilter::All).unwrap();
        assert_eq!(html, template);
    }

    #[test]
    fn test_empty_document_renders_empty_sections() {
        let html = render_public(
            &Document::default(),
            INDEX_TEMPLATE,
            &config(),
            &ProjectFilter::All,
        )
        .unwrap();

        assert!(!html.contains(r#"class="slide""#));
        assert!(html.contains(r#"<div id="clientLogos" class="client-logos"></div>"#));
        // About falls back to placeholders
        assert!(html.contains("Your Name"));
    }

    #[test]
    fn test_filter_applies_to_page() {
        let doc = Document {
            projects: ["social", "branding", "social"]
                .iter()
                .map(|t| Project {
                    category: (*t).into(),
                    img: AssetUri::remote("https://x.com/a.jpg"),
                    link: "https://x.com".into(),
                })
                .collect(),
            ..Document::default()
        };
        let html = render_public(
            &doc,
            INDEX_TEMPLATE,
            &config(),
            &ProjectFilter::parse("branding"),
        )
        .unwrap();

        assert_eq!(
            html.matches(r#"class="project-item social" style="display: none""#).count(),
            2
        );
        assert_eq!(
            html.matches(r#"class="project-item branding" style="display: block""#).count(),
            1
        );
    }
}
