//! Built-in sample content shown until the first write.

use super::types::{About, AssetUri, Document, ExperienceEntry, Project, Slide, SlideKind, SocialLinks};

/// Default profile photo used when none is set.
pub const DEFAULT_PROFILE_PHOTO: &str = "assets/images/profile.jpg";

impl Document {
    /// The statically defined default document.
    pub fn sample() -> Self {
        Self {
            hero_slides: vec![
                slide(SlideKind::Image, "assets/images/slide1.jpg"),
                slide(SlideKind::Image, "assets/images/slide2.jpg"),
                slide(SlideKind::Video, "assets/videos/slide1.mp4"),
            ],
            about: About {
                name: String::new(),
                role: String::new(),
                experience_years: String::new(),
                profile_photo: AssetUri::remote("assets/images/your-default-profile-section-image.jpg"),
            },
            experience: vec![
                experience("2020", "2021", "Company A", "Junior Designer"),
                experience("2021", "2022", "Company B", "Designer"),
                experience("2022", "Present", "Company C", "Senior Designer"),
            ],
            projects: vec![
                project("social", "assets/images/project1.jpg", "https://behance.net/project1"),
                project("branding", "assets/images/project2.jpg", "https://behance.net/project2"),
                project("presentation", "assets/images/project3.jpg", "https://behance.net/project3"),
            ],
            clients: vec![
                AssetUri::remote("assets/images/logo1.png"),
                AssetUri::remote("assets/images/logo2.png"),
                AssetUri::remote("assets/images/logo3.png"),
            ],
            social_links: SocialLinks {
                instagram: "https://instagram.com/yourhandle".into(),
                linkedin: "https://linkedin.com/in/yourprofile".into(),
                behance: "https://behance.net/yourprofile".into(),
            },
        }
    }
}

fn slide(kind: SlideKind, src: &str) -> Slide {
    Slide {
        kind,
        src: AssetUri::remote(src),
    }
}

fn experience(start: &str, end: &str, company: &str, role: &str) -> ExperienceEntry {
    ExperienceEntry {
        start_year: start.into(),
        end_year: end.into(),
        company: company.into(),
        role: role.into(),
    }
}

fn project(category: &str, img: &str, link: &str) -> Project {
    Project {
        category: category.into(),
        img: AssetUri::remote(img),
        link: link.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_is_non_empty() {
        let doc = Document::sample();
        assert_eq!(doc.hero_slides.len(), 3);
        assert_eq!(doc.experience.len(), 3);
        assert_eq!(doc.projects.len(), 3);
        assert_eq!(doc.clients.len(), 3);
        assert!(!doc.about.profile_photo.is_empty());
        assert_eq!(doc.ephemeral_handles().count(), 0);
    }

    #[test]
    fn test_sample_survives_json() {
        let doc = Document::sample();
        let json = serde_json::to_string(&doc).unwrap();
        let back: Document = serde_json::from_str(&json).unwrap();
        assert_eq!(back, doc);
    }
}
