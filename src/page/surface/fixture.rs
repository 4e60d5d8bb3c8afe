//! # Page Fixtures
//!
//! Declarative description of a page (elements, metadata, geometry) that can be
//! deserialized from JSON and materialized as an [`InMemoryPage`].

use super::{InMemoryPage, NodeId, PageSurface, Rect};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Whole-page description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageFixture {
    pub viewport_height: u32,
    pub scroll_position: u32,
    /// Children of the body, in document order
    pub elements: Vec<ElementFixture>,
}

impl Default for PageFixture {
    fn default() -> Self {
        Self {
            viewport_height: 800,
            scroll_position: 0,
            elements: Vec::new(),
        }
    }
}

/// One element and its subtree
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementFixture {
    pub tag: String,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub attributes: BTreeMap<String, String>,
    pub text: Option<String>,
    pub value: Option<String>,
    pub top: i64,
    pub height: u32,
    pub children: Vec<ElementFixture>,
}

impl PageFixture {
    /// Parse a fixture from its JSON text
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse page fixture")
    }

    /// Materialize the fixture as a headless page
    pub fn build(&self) -> InMemoryPage {
        let mut page = InMemoryPage::new(self.viewport_height);
        page.set_scroll_position(self.scroll_position);
        let body = page.body();
        for element in &self.elements {
            element.build_into(&mut page, body);
        }
        page
    }
}

impl ElementFixture {
    fn build_into(&self, page: &mut InMemoryPage, parent: NodeId) -> NodeId {
        let tag = if self.tag.is_empty() { "div" } else { &self.tag };
        let node = page.append(parent, tag);
        if let Some(id) = &self.id {
            page.set_attribute(node, "id", id);
        }
        for class in &self.classes {
            page.add_class(node, class);
        }
        for (name, value) in &self.attributes {
            page.set_attribute(node, name, value);
        }
        if let Some(text) = &self.text {
            page.set_text(node, text);
        }
        if let Some(value) = &self.value {
            page.set_value(node, value);
        }
        page.set_rect(node, Rect::new(self.top, self.height));
        for child in &self.children {
            child.build_into(page, node);
        }
        node
    }
}

impl InMemoryPage {
    /// Build a headless page straight from fixture JSON
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(PageFixture::from_json(json)?.build())
    }
}
