//! # Parallax Controller
//!
//! Translates layered elements against the scroll position. The speed factor
//! comes from each element's own metadata.

use crate::config::ParallaxConfig;
use crate::page::events::ScrollSample;
use crate::page::surface::{NodeId, PageSurface, Selector};

pub struct ParallaxController {
    config: ParallaxConfig,
}

impl ParallaxController {
    pub fn new(config: ParallaxConfig) -> Self {
        Self { config }
    }

    /// Speed factor of `node`; missing or unparsable values use the default
    pub fn speed(&self, page: &dyn PageSurface, node: NodeId) -> f32 {
        page.attribute(node, &self.config.speed_attribute)
            .and_then(|raw| raw.trim().parse::<f32>().ok())
            .filter(|speed| speed.is_finite())
            .unwrap_or(self.config.default_speed)
    }

    pub fn on_scroll(&mut self, sample: &ScrollSample, page: &mut dyn PageSurface) {
        for layer in page.query(&Selector::class(&self.config.class)) {
            let offset = sample.position as f32 * self.speed(page, layer);
            let shift = if offset == 0.0 { 0.0 } else { -offset };
            page.set_style(layer, "transform", &format!("translateY({shift}px)"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::events::ScrollDirection;
    use crate::page::surface::InMemoryPage;

    fn layered_page() -> (InMemoryPage, NodeId, NodeId) {
        let mut page = InMemoryPage::default();
        let body = page.body();
        let slow = page.append(body, "div");
        page.add_class(slow, "parallax");
        let fast = page.append(body, "div");
        page.add_class(fast, "parallax");
        page.set_attribute(fast, "data-speed", "0.75");
        (page, slow, fast)
    }

    #[test]
    fn layers_should_move_by_their_speed() {
        let (mut page, slow, fast) = layered_page();
        let mut parallax = ParallaxController::new(ParallaxConfig::default());

        parallax.on_scroll(&ScrollSample::new(200, ScrollDirection::Down), &mut page);

        assert_eq!(page.style(slow, "transform").as_deref(), Some("translateY(-100px)"));
        assert_eq!(page.style(fast, "transform").as_deref(), Some("translateY(-150px)"));
    }

    #[test]
    fn invalid_speed_should_fall_back_to_default() {
        let (mut page, _, fast) = layered_page();
        page.set_attribute(fast, "data-speed", "quick");
        let parallax = ParallaxController::new(ParallaxConfig::default());
        assert_eq!(parallax.speed(&page, fast), 0.5);
    }

    #[test]
    fn top_of_page_should_reset_transform() {
        let (mut page, slow, _) = layered_page();
        let mut parallax = ParallaxController::new(ParallaxConfig::default());
        parallax.on_scroll(&ScrollSample::at_rest(0), &mut page);
        assert_eq!(page.style(slow, "transform").as_deref(), Some("translateY(0px)"));
    }
}
