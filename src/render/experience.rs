//! Work experience grid.

use crate::data::ExperienceEntry;
use crate::data::types::newest_first;

use super::dom::{Element, Node};

/// Entries ordered newest first, `Present` above every year.
///
/// The sort is stable, so entries with the same start keep stored order.
pub fn sorted_experience(entries: &[ExperienceEntry]) -> Vec<&ExperienceEntry> {
    let mut sorted: Vec<_> = entries.iter().collect();
    sorted.sort_by(|a, b| newest_first(a, b));
    sorted
}

pub fn render_experience(entries: &[ExperienceEntry]) -> Vec<Node> {
    sorted_experience(entries)
        .into_iter()
        .map(|exp| {
            Element::new("div")
                .class("exp-item")
                .child(Element::new("span").class("company-name").text(&exp.company))
                .child(
                    Element::new("span")
                        .class("date-role")
                        .text(format!("{} - {}, {}", exp.start_year, exp.end_year, exp.role)),
                )
                .into()
        })
        .collect()
}
