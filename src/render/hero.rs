//! Hero slider.

use std::time::Duration;

use crate::data::{Slide, SlideKind};

use super::dom::{Element, Node};

/// Time each slide stays on screen.
pub const SLIDE_INTERVAL: Duration = Duration::from_secs(4);

/// Round-robin display state: exactly one slide visible at a time.
///
/// There is no cycle for an empty slide list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlideCycle {
    len: usize,
    current: usize,
}

impl SlideCycle {
    pub const fn new(len: usize) -> Option<Self> {
        if len == 0 {
            None
        } else {
            Some(Self { len, current: 0 })
        }
    }

    pub const fn is_visible(&self, index: usize) -> bool {
        index == self.current
    }

    /// Move to the next slide, wrapping to the first after the last.
    #[allow(dead_code)] // Rotation runs in site.js
    pub fn advance(&mut self) -> usize {
        self.current = (self.current + 1) % self.len;
        self.current
    }
}

/// One `div.slide` per hero slide; only the cycle's current slide is shown.
pub fn render_hero(slides: &[Slide]) -> Vec<Node> {
    let Some(cycle) = SlideCycle::new(slides.len()) else {
        return Vec::new();
    };

    slides
        .iter()
        .enumerate()
        .map(|(i, slide)| {
            let media = match slide.kind {
                SlideKind::Image => Element::new("img")
                    .attr("src", slide.src.href())
                    .attr("alt", "Hero Slide"),
                SlideKind::Video => Element::new("video")
                    .attr("src", slide.src.href())
                    .flag("autoplay")
                    .flag("muted")
                    .flag("loop")
                    .flag("playsinline"),
            };
            Element::new("div")
                .class("slide")
                .display(cycle.is_visible(i))
                .child(media)
                .into()
        })
        .collect()
}
