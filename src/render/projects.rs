//! Project gallery and category filter.

use crate::data::Project;

use super::dom::{Element, Node};

/// Token that shows every tile.
pub const ALL: &str = "all";

/// Which tiles a filter control shows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ProjectFilter {
    #[default]
    All,
    Category(String),
}

impl ProjectFilter {
    /// Parse a filter token. Empty input and `"all"` show everything.
    pub fn parse(token: &str) -> Self {
        match token.trim() {
            "" | ALL => Self::All,
            token => Self::Category(token.to_string()),
        }
    }

    pub fn token(&self) -> &str {
        match self {
            Self::All => ALL,
            Self::Category(token) => token,
        }
    }

    /// Whether a tile tagged with `category` stays visible.
    ///
    /// A category behaves like a class list: `"social print"` matches both
    /// `social` and `print`.
    pub fn matches(&self, category: &str) -> bool {
        match self {
            Self::All => true,
            Self::Category(token) => category.split_whitespace().any(|c| c == token),
        }
    }
}

/// One tile per project, hidden when the filter excludes it.
pub fn render_projects(projects: &[Project], filter: &ProjectFilter) -> Vec<Node> {
    projects
        .iter()
        .map(|proj| {
            Element::new("div")
                .class(format!("project-item {}", proj.category).trim_end().to_string())
                .display(filter.matches(&proj.category))
                .child(
                    Element::new("img")
                        .attr("src", proj.img.href())
                        .attr("alt", "Project Image"),
                )
                .child(
                    Element::new("div").class("hover-layer").child(
                        Element::new("a")
                            .attr("href", &proj.link)
                            .attr("target", "_blank")
                            .class("view-btn")
                            .text("View Full Project"),
                    ),
                )
                .into()
        })
        .collect()
}

/// Distinct category tokens in first-seen order.
pub fn categories(projects: &[Project]) -> Vec<&str> {
    let mut seen: Vec<&str> = Vec::new();
    for token in projects.iter().flat_map(|p| p.category.split_whitespace()) {
        if !seen.contains(&token) {
            seen.push(token);
        }
    }
    seen
}

/// Filter controls: `all` followed by each category.
pub fn render_filter_nav(projects: &[Project], active: &ProjectFilter) -> Vec<Node> {
    std::iter::once(ALL)
        .chain(categories(projects))
        .map(|token| {
            let class = if token == active.token() {
                "filter-btn active"
            } else {
                "filter-btn"
            };
            Element::new("a")
                .class(class)
                .attr("href", format!("?filter={}", urlencoding::encode(token)))
                .attr("data-filter", token)
                .text(capitalize(token))
                .into()
        })
        .collect()
}

/// Uppercase the first character.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
