//! About block.

use crate::data::{About, DEFAULT_PROFILE_PHOTO};

use super::dom::{Element, Node};

const NAME_FALLBACK: &str = "Your Name";
const ROLE_FALLBACK: &str = "Graphic Designer";
const YEARS_FALLBACK: &str = "X Years Experience";

pub fn render_about(about: &About) -> Vec<Node> {
    let photo = if about.profile_photo.is_empty() {
        DEFAULT_PROFILE_PHOTO.to_string()
    } else {
        about.profile_photo.href()
    };

    vec![
        span("name", or_fallback(&about.name, NAME_FALLBACK)),
        span("role", or_fallback(&about.role, ROLE_FALLBACK)),
        span("experience-years", or_fallback(&about.experience_years, YEARS_FALLBACK)),
        Element::new("img")
            .class("profile-photo")
            .attr("src", photo)
            .attr("alt", "Profile Photo")
            .into(),
    ]
}

fn span(class: &str, text: &str) -> Node {
    Element::new("span").class(class).text(text).into()
}

fn or_fallback<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.is_empty() { fallback } else { value }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::AssetUri;

    #[test]
    fn test_fallbacks_for_empty_fields() {
        let nodes = render_about(&About::default());
        let texts: Vec<_> = nodes
            .iter()
            .filter_map(Node::as_element)
            .map(Element::text_content)
            .collect();

        assert_eq!(texts[..3], ["Your Name", "Graphic Designer", "X Years Experience"]);
        let img = nodes[3].as_element().unwrap();
        assert_eq!(img.get_attr("src"), Some(DEFAULT_PROFILE_PHOTO));
    }

    #[test]
    fn test_populated_fields() {
        let about = About {
            name: "Ada".into(),
            role: "Illustrator".into(),
            experience_years: "7 Years".into(),
            profile_photo: AssetUri::remote("https://x.com/me.jpg"),
        };
        let nodes = render_about(&about);

        assert_eq!(nodes[0].as_element().unwrap().text_content(), "Ada");
        assert!(nodes[2].as_element().unwrap().has_class("experience-years"));
        assert_eq!(
            nodes[3].as_element().unwrap().get_attr("src"),
            Some("https://x.com/me.jpg")
        );
    }
}
