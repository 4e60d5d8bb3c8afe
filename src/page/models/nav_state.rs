//! # Navigation State Model
//!
//! Menu, chrome and active-section state owned by the navigation controller,
//! plus the section geometry used to pick the active link.

use serde::Serialize;

/// A page section that a navigation link can point at
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub id: String,
    pub top: i64,
    pub height: u32,
}

impl Section {
    pub fn new(id: impl Into<String>, top: i64, height: u32) -> Self {
        Self {
            id: id.into(),
            top,
            height,
        }
    }

    /// True when `probe` lies in `[top, top + height)`
    pub fn contains(&self, probe: i64) -> bool {
        probe >= self.top && probe < self.top + i64::from(self.height)
    }
}

/// First section (in document order) containing `probe`
pub fn active_section(sections: &[Section], probe: i64) -> Option<&Section> {
    sections.iter().find(|section| section.contains(probe))
}

/// UI state of the navigation chrome
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NavState {
    pub menu_open: bool,
    pub scrolled_past_threshold: bool,
    pub active_section_id: Option<String>,
    /// Bar translated off-screen by hide-on-scroll
    pub hidden: bool,
    pub back_to_top_visible: bool,
}

impl NavState {
    pub fn new() -> Self {
        Self::default()
    }
}
