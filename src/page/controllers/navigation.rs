//! # Navigation Controller
//!
//! Owns the mobile menu, the navbar chrome (scrolled styling, hide-on-scroll),
//! active-link highlighting, in-page anchor scrolling and the back-to-top
//! control. Scroll-driven behavior runs off published samples only.

use crate::config::NavigationConfig;
use crate::page::events::{EventOutcome, Key, ScrollDirection, ScrollSample};
use crate::page::models::{active_section, NavState, Section};
use crate::page::scroll_lock::{ScrollLock, ScrollLockHandle};
use crate::page::surface::{NodeId, PageSurface, ScrollBehavior, ScrollRequest, Selector};

const HIDDEN_TRANSFORM: &str = "translateY(-100%)";
const SHOWN_TRANSFORM: &str = "translateY(0)";

pub struct NavigationController {
    config: NavigationConfig,
    state: NavState,
    lock: ScrollLockHandle,
}

impl NavigationController {
    pub fn new(config: NavigationConfig, lock: &ScrollLock) -> Self {
        Self {
            config,
            state: NavState::new(),
            lock: lock.handle(),
        }
    }

    pub fn state(&self) -> &NavState {
        &self.state
    }

    // === Element lookup ===

    fn navbar(&self, page: &dyn PageSurface) -> Option<NodeId> {
        page.element_by_id(&self.config.navbar_id)
            .or_else(|| page.query_first(&Selector::class(&self.config.navbar_class)))
    }

    fn hamburger(&self, page: &dyn PageSurface) -> Option<NodeId> {
        page.query_first(&Selector::class(&self.config.hamburger_class))
    }

    fn menu(&self, page: &dyn PageSurface) -> Option<NodeId> {
        page.query_first(&Selector::class(&self.config.menu_class))
    }

    /// Sections a link can point at, in document order
    fn sections(page: &dyn PageSurface) -> Vec<Section> {
        page.query(&Selector::tag("section").and(Selector::attribute("id")))
            .into_iter()
            .filter_map(|node| {
                let id = page.attribute(node, "id")?;
                let rect = page.rect(node)?;
                Some(Section::new(id, rect.top, rect.height))
            })
            .collect()
    }

    // === Skip link ===

    /// Insert the skip link as the first child of the body, once
    pub fn install_skip_link(&self, page: &mut dyn PageSurface) -> Option<NodeId> {
        let config = self.config.skip_link.as_ref()?;
        if let Some(existing) = page.query_first(&Selector::class(&config.class)) {
            return Some(existing);
        }
        let body = page.body();
        let link = page.create_first_child("a", body);
        page.set_attribute(link, "href", &config.target);
        page.add_class(link, &config.class);
        page.set_text(link, &config.text);
        page.set_style(link, "position", "absolute");
        page.set_style(link, "top", &config.hidden_top);
        tracing::debug!("Skip link installed for '{}'", config.target);
        Some(link)
    }

    /// Pull the skip link into view while it holds focus
    pub fn handle_focus_change(&self, page: &mut dyn PageSurface, target: NodeId, focused: bool) {
        let Some(config) = &self.config.skip_link else {
            return;
        };
        if !page.has_class(target, &config.class) {
            return;
        }
        let top = if focused { "0" } else { config.hidden_top.as_str() };
        page.set_style(target, "top", top);
    }

    // === Menu ===

    pub fn toggle_menu(&mut self, page: &mut dyn PageSurface) {
        if self.state.menu_open {
            self.close_menu(page);
        } else {
            self.open_menu(page);
        }
    }

    pub fn open_menu(&mut self, page: &mut dyn PageSurface) -> bool {
        if self.state.menu_open {
            return false;
        }
        self.state.menu_open = true;
        self.set_menu_classes(page, true);
        self.lock.acquire(page);
        tracing::debug!("Mobile menu opened");
        true
    }

    /// Close the menu and release the scroll lock; a no-op when already closed
    pub fn close_menu(&mut self, page: &mut dyn PageSurface) -> bool {
        if !self.state.menu_open {
            return false;
        }
        self.state.menu_open = false;
        self.set_menu_classes(page, false);
        self.lock.release(page);
        tracing::debug!("Mobile menu closed");
        true
    }

    fn set_menu_classes(&self, page: &mut dyn PageSurface, open: bool) {
        let body = page.body();
        let targets = [self.hamburger(page), self.menu(page)];
        for node in targets.into_iter().flatten() {
            toggle_class(page, node, &self.config.active_class, open);
        }
        toggle_class(page, body, &self.config.menu_open_class, open);
    }

    // === Input ===

    pub fn handle_click(&mut self, page: &mut dyn PageSurface, target: NodeId) -> EventOutcome {
        if page
            .closest(target, &Selector::class(&self.config.hamburger_class))
            .is_some()
        {
            self.toggle_menu(page);
            return EventOutcome::default();
        }

        if let Some(back_to_top) = &self.config.back_to_top {
            if page.closest(target, &Selector::class(&back_to_top.class)).is_some() {
                page.scroll_to(ScrollRequest {
                    top: 0,
                    behavior: ScrollBehavior::Smooth,
                });
                return EventOutcome::prevented();
            }
        }

        let on_nav_link = page
            .closest(target, &Selector::class(&self.config.link_class))
            .is_some();
        let outside_nav = match self.navbar(page) {
            Some(navbar) => !page.contains(navbar, target),
            None => [self.hamburger(page), self.menu(page)]
                .into_iter()
                .flatten()
                .all(|node| !page.contains(node, target)),
        };
        if on_nav_link || outside_nav {
            self.close_menu(page);
        }

        let anchor = page.closest(target, &Selector::tag("a").and(Selector::attribute("href")));
        match anchor {
            Some(anchor) => self.follow_anchor(page, anchor),
            None => EventOutcome::default(),
        }
    }

    /// Smooth-scroll to an in-page anchor's target
    fn follow_anchor(&mut self, page: &mut dyn PageSurface, anchor: NodeId) -> EventOutcome {
        let Some(href) = page.attribute(anchor, "href") else {
            return EventOutcome::default();
        };
        let Some(fragment) = href.strip_prefix('#') else {
            return EventOutcome::default();
        };

        let top = if fragment.is_empty() || fragment == "top" {
            0
        } else {
            let Some(rect) = page.element_by_id(fragment).and_then(|node| page.rect(node)) else {
                tracing::debug!("Anchor target '{}' not found", fragment);
                return EventOutcome::default();
            };
            let offset = rect.top - i64::from(self.config.header_clearance);
            u32::try_from(offset.max(0)).unwrap_or(u32::MAX)
        };

        tracing::debug!("Scrolling to anchor '{}' at {}", href, top);
        page.scroll_to(ScrollRequest {
            top,
            behavior: ScrollBehavior::Smooth,
        });
        self.close_menu(page);
        EventOutcome::prevented()
    }

    pub fn handle_key(&mut self, page: &mut dyn PageSurface, key: &Key) {
        if *key == Key::Escape {
            self.close_menu(page);
        }
    }

    // === Scroll ===

    pub fn on_scroll(&mut self, sample: &ScrollSample, page: &mut dyn PageSurface) {
        let navbar = self.navbar(page);
        self.update_chrome(sample, page, navbar);
        self.update_active_link(sample, page);
        self.update_back_to_top(sample, page);
    }

    fn update_chrome(
        &mut self,
        sample: &ScrollSample,
        page: &mut dyn PageSurface,
        navbar: Option<NodeId>,
    ) {
        let scrolled = sample.position > self.config.scrolled_threshold;
        if scrolled != self.state.scrolled_past_threshold {
            self.state.scrolled_past_threshold = scrolled;
            if let Some(navbar) = navbar {
                toggle_class(page, navbar, &self.config.scrolled_class, scrolled);
            }
            tracing::debug!("Navbar scrolled state: {}", scrolled);
        }

        let Some(hide_threshold) = self.config.hide_threshold else {
            return;
        };
        let hidden = match sample.direction {
            ScrollDirection::Down => sample.position > hide_threshold,
            ScrollDirection::Up => false,
            ScrollDirection::None => return,
        };
        if hidden != self.state.hidden {
            self.state.hidden = hidden;
            if let Some(navbar) = navbar {
                let transform = if hidden { HIDDEN_TRANSFORM } else { SHOWN_TRANSFORM };
                page.set_style(navbar, "transform", transform);
            }
        }
    }

    fn update_active_link(&mut self, sample: &ScrollSample, page: &mut dyn PageSurface) {
        let probe = i64::from(sample.position) + i64::from(self.config.active_offset);
        let sections = Self::sections(page);
        let active = active_section(&sections, probe).map(|section| section.id.clone());

        let links = page.query(&Selector::class(&self.config.link_class));
        let active_href = active.as_ref().map(|id| format!("#{id}"));
        // Only the first matching link in document order is marked
        let mut marked = false;
        for link in links {
            let is_active = !marked
                && active_href.is_some()
                && page.attribute(link, "href") == active_href;
            marked |= is_active;
            toggle_class(page, link, &self.config.active_class, is_active);
        }

        if active != self.state.active_section_id {
            tracing::debug!("Active section: {:?}", active);
            self.state.active_section_id = active;
        }
    }

    fn update_back_to_top(&mut self, sample: &ScrollSample, page: &mut dyn PageSurface) {
        let Some(config) = &self.config.back_to_top else {
            return;
        };
        let visible = sample.position > config.threshold;
        for node in page.query(&Selector::class(&config.class)) {
            toggle_class(page, node, &config.visible_class, visible);
        }
        self.state.back_to_top_visible = visible;
    }
}

fn toggle_class(page: &mut dyn PageSurface, node: NodeId, class: &str, on: bool) {
    if on {
        page.add_class(node, class);
    } else {
        page.remove_class(node, class);
    }
}
