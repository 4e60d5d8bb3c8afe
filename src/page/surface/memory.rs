//! # In-Memory Page Surface
//!
//! Headless implementation of [`PageSurface`] backed by an arena of nodes.
//! Used by hosts without a browser and throughout the test suites.

use super::{NodeId, PageSurface, Rect, ScrollRequest, Selector};
use anyhow::{anyhow, Result};
use std::collections::{BTreeMap, BTreeSet};

/// Playback state of a media element
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MediaState {
    pub playing: bool,
    /// When set, every play attempt fails
    pub broken: bool,
}

#[derive(Debug, Clone)]
struct Node {
    tag: String,
    classes: BTreeSet<String>,
    attributes: BTreeMap<String, String>,
    styles: BTreeMap<String, String>,
    text: String,
    value: String,
    disabled: bool,
    rect: Rect,
    media: MediaState,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    fn new(tag: &str, parent: Option<NodeId>) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            classes: BTreeSet::new(),
            attributes: BTreeMap::new(),
            styles: BTreeMap::new(),
            text: String::new(),
            value: String::new(),
            disabled: false,
            rect: Rect::default(),
            media: MediaState::default(),
            parent,
            children: Vec::new(),
        }
    }
}

/// Headless page: a node arena plus scroll and viewport state.
///
/// Slots are never reused. A removed node leaves an empty slot behind so that
/// stale handles stay dead instead of aliasing a newer element. The arena
/// therefore grows with every element created during a session.
#[derive(Debug, Clone)]
pub struct InMemoryPage {
    nodes: Vec<Option<Node>>,
    body: NodeId,
    scroll_position: u32,
    viewport_height: u32,
    scroll_requests: Vec<ScrollRequest>,
}

impl InMemoryPage {
    /// Create an empty page with only a body element
    pub fn new(viewport_height: u32) -> Self {
        Self {
            nodes: vec![Some(Node::new("body", None))],
            body: NodeId(0),
            scroll_position: 0,
            viewport_height,
            scroll_requests: Vec::new(),
        }
    }

    fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0).and_then(Option::as_ref)
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0).and_then(Option::as_mut)
    }

    // === Builder helpers ===

    /// Append an element and return its handle; unknown parents fall back to the body
    pub fn append(&mut self, parent: NodeId, tag: &str) -> NodeId {
        let parent = if self.node(parent).is_some() {
            parent
        } else {
            self.body
        };
        let id = NodeId(self.nodes.len());
        self.nodes.push(Some(Node::new(tag, Some(parent))));
        if let Some(parent_node) = self.node_mut(parent) {
            parent_node.children.push(id);
        }
        id
    }

    /// Insert an element as the first child of `parent`; unknown parents fall back to the body
    pub fn prepend(&mut self, parent: NodeId, tag: &str) -> NodeId {
        let parent = if self.node(parent).is_some() {
            parent
        } else {
            self.body
        };
        let id = NodeId(self.nodes.len());
        self.nodes.push(Some(Node::new(tag, Some(parent))));
        if let Some(parent_node) = self.node_mut(parent) {
            parent_node.children.insert(0, id);
        }
        id
    }

    /// Set the document-relative box of `node`
    pub fn set_rect(&mut self, node: NodeId, rect: Rect) {
        if let Some(n) = self.node_mut(node) {
            n.rect = rect;
        }
    }

    /// Simulate the user scrolling to `position` (no event is dispatched)
    pub fn set_scroll_position(&mut self, position: u32) {
        self.scroll_position = position;
    }

    pub fn set_viewport_height(&mut self, height: u32) {
        self.viewport_height = height;
    }

    /// Make every subsequent play attempt on `node` fail
    pub fn break_media(&mut self, node: NodeId) {
        if let Some(n) = self.node_mut(node) {
            n.media.broken = true;
            n.media.playing = false;
        }
    }

    // === Inspection helpers ===

    pub fn media_state(&self, node: NodeId) -> Option<MediaState> {
        self.node(node).map(|n| n.media)
    }

    /// Programmatic scroll requests issued so far, oldest first
    pub fn scroll_requests(&self) -> &[ScrollRequest] {
        &self.scroll_requests
    }

    pub fn last_scroll_request(&self) -> Option<ScrollRequest> {
        self.scroll_requests.last().copied()
    }

    pub fn classes(&self, node: NodeId) -> Vec<String> {
        self.node(node)
            .map(|n| n.classes.iter().cloned().collect())
            .unwrap_or_default()
    }

    fn document_order(&self, root: NodeId) -> Vec<NodeId> {
        let mut order = Vec::new();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            if let Some(node) = self.node(id) {
                order.push(id);
                stack.extend(node.children.iter().rev().copied());
            }
        }
        order
    }

    fn matches(&self, id: NodeId, selector: &Selector) -> bool {
        let Some(node) = self.node(id) else {
            return false;
        };
        match selector {
            Selector::Id(value) => node.attributes.get("id") == Some(value),
            Selector::Class(class) => node.classes.contains(class),
            Selector::Tag(tag) => node.tag.eq_ignore_ascii_case(tag),
            Selector::Attribute(name) => node.attributes.contains_key(name),
            Selector::AttributeValue(name, value) => node.attributes.get(name) == Some(value),
            Selector::All(inner) => inner.iter().all(|s| self.matches(id, s)),
            Selector::Any(inner) => inner.iter().any(|s| self.matches(id, s)),
        }
    }
}

impl Default for InMemoryPage {
    fn default() -> Self {
        Self::new(800)
    }
}

impl PageSurface for InMemoryPage {
    fn body(&self) -> NodeId {
        self.body
    }

    fn query(&self, selector: &Selector) -> Vec<NodeId> {
        self.document_order(self.body)
            .into_iter()
            .filter(|id| self.matches(*id, selector))
            .collect()
    }

    fn query_within(&self, root: NodeId, selector: &Selector) -> Vec<NodeId> {
        self.document_order(root)
            .into_iter()
            .skip(1)
            .filter(|id| self.matches(*id, selector))
            .collect()
    }

    fn exists(&self, node: NodeId) -> bool {
        // A node is live only while its ancestor chain reaches the body
        let mut current = Some(node);
        while let Some(id) = current {
            if id == self.body {
                return true;
            }
            current = match self.node(id) {
                Some(n) => n.parent,
                None => return false,
            };
        }
        false
    }

    fn tag_name(&self, node: NodeId) -> Option<String> {
        self.node(node).map(|n| n.tag.clone())
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.node(node).and_then(|n| n.parent)
    }

    fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.node(node)
            .map(|n| n.children.clone())
            .unwrap_or_default()
    }

    fn next_sibling(&self, node: NodeId) -> Option<NodeId> {
        let parent = self.parent(node)?;
        let siblings = &self.node(parent)?.children;
        let index = siblings.iter().position(|id| *id == node)?;
        siblings.get(index + 1).copied()
    }

    fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return self.node(id).is_some();
            }
            current = self.parent(id);
        }
        false
    }

    fn closest(&self, node: NodeId, selector: &Selector) -> Option<NodeId> {
        let mut current = Some(node);
        while let Some(id) = current {
            if self.matches(id, selector) {
                return Some(id);
            }
            current = self.parent(id);
        }
        None
    }

    fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.node(node).is_some_and(|n| n.classes.contains(class))
    }

    fn add_class(&mut self, node: NodeId, class: &str) -> bool {
        self.node_mut(node)
            .is_some_and(|n| n.classes.insert(class.to_string()))
    }

    fn remove_class(&mut self, node: NodeId, class: &str) -> bool {
        self.node_mut(node).is_some_and(|n| n.classes.remove(class))
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.node(node).and_then(|n| n.attributes.get(name).cloned())
    }

    fn attribute_names(&self, node: NodeId) -> Vec<String> {
        self.node(node)
            .map(|n| n.attributes.keys().cloned().collect())
            .unwrap_or_default()
    }

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        if let Some(n) = self.node_mut(node) {
            n.attributes.insert(name.to_string(), value.to_string());
        }
    }

    fn remove_attribute(&mut self, node: NodeId, name: &str) {
        if let Some(n) = self.node_mut(node) {
            n.attributes.remove(name);
        }
    }

    fn style(&self, node: NodeId, property: &str) -> Option<String> {
        self.node(node).and_then(|n| n.styles.get(property).cloned())
    }

    fn set_style(&mut self, node: NodeId, property: &str, value: &str) {
        if let Some(n) = self.node_mut(node) {
            if value.is_empty() {
                n.styles.remove(property);
            } else {
                n.styles.insert(property.to_string(), value.to_string());
            }
        }
    }

    fn text(&self, node: NodeId) -> Option<String> {
        self.node(node).map(|n| n.text.clone())
    }

    fn set_text(&mut self, node: NodeId, text: &str) {
        if let Some(n) = self.node_mut(node) {
            n.text = text.to_string();
        }
    }

    fn value(&self, node: NodeId) -> Option<String> {
        self.node(node).map(|n| n.value.clone())
    }

    fn set_value(&mut self, node: NodeId, value: &str) {
        if let Some(n) = self.node_mut(node) {
            n.value = value.to_string();
        }
    }

    fn is_disabled(&self, node: NodeId) -> bool {
        self.node(node).is_some_and(|n| n.disabled)
    }

    fn set_disabled(&mut self, node: NodeId, disabled: bool) {
        if let Some(n) = self.node_mut(node) {
            n.disabled = disabled;
        }
    }

    fn rect(&self, node: NodeId) -> Option<Rect> {
        self.node(node).map(|n| n.rect)
    }

    fn scroll_position(&self) -> u32 {
        self.scroll_position
    }

    fn viewport_height(&self) -> u32 {
        self.viewport_height
    }

    fn scroll_to(&mut self, request: ScrollRequest) {
        tracing::debug!(
            "Scroll requested to {} ({:?})",
            request.top,
            request.behavior
        );
        self.scroll_requests.push(request);
        // Headless: smooth scrolling lands immediately
        self.scroll_position = request.top;
    }

    fn play_media(&mut self, node: NodeId) -> Result<()> {
        let n = self
            .node_mut(node)
            .ok_or_else(|| anyhow!("media element {node} is not on the page"))?;
        if n.media.broken {
            return Err(anyhow!("media element {node} failed to start playback"));
        }
        n.media.playing = true;
        Ok(())
    }

    fn pause_media(&mut self, node: NodeId) {
        if let Some(n) = self.node_mut(node) {
            n.media.playing = false;
        }
    }

    fn create_element(&mut self, tag: &str, parent: NodeId) -> NodeId {
        self.append(parent, tag)
    }

    fn create_first_child(&mut self, tag: &str, parent: NodeId) -> NodeId {
        self.prepend(parent, tag)
    }

    fn remove_element(&mut self, node: NodeId) -> bool {
        if node == self.body || !self.exists(node) {
            return false;
        }
        if let Some(parent) = self.parent(node) {
            if let Some(parent_node) = self.node_mut(parent) {
                parent_node.children.retain(|child| *child != node);
            }
        }
        for id in self.document_order(node) {
            if let Some(slot) = self.nodes.get_mut(id.0) {
                *slot = None;
            }
        }
        true
    }
}
