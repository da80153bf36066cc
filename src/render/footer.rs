//! Client logos and social links.

use crate::data::{AssetUri, SocialLinks};

use super::dom::{Element, Node};
use super::projects::capitalize;

/// Placeholder URI meaning "no link configured".
const PLACEHOLDER: &str = "#";

pub fn render_clients(clients: &[AssetUri]) -> Vec<Node> {
    clients
        .iter()
        .map(|logo| {
            Element::new("img")
                .attr("src", logo.href())
                .attr("alt", "Client Logo")
                .into()
        })
        .collect()
}

/// One link per configured platform, skipping empty and placeholder URIs.
pub fn render_social(links: &SocialLinks) -> Vec<Node> {
    links
        .entries()
        .into_iter()
        .filter(|(_, uri)| is_configured(uri))
        .map(|(platform, uri)| {
            Element::new("a")
                .attr("href", uri)
                .attr("target", "_blank")
                .text(capitalize(platform))
                .into()
        })
        .collect()
}

fn is_configured(uri: &str) -> bool {
    let uri = uri.trim();
    !uri.is_empty() && uri != PLACEHOLDER
}
