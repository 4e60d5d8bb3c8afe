//! Step definitions shared by every feature
//!
//! This module contains step definitions for:
//! - Loading the landing page
//! - Clicks, key presses and the passage of time
//! - Class, style, attribute and text assertions on elements

use crate::common::world::PageWorld;
use cucumber::{given, then, when};
use pagewright::PageSurface;
use tracing::info;

#[given("the landing page is loaded")]
async fn given_landing_page(world: &mut PageWorld) {
    info!("Loading landing page fixture");
    world.load_page();
}

#[when(expr = "the user clicks {string}")]
async fn when_click(world: &mut PageWorld, id: String) {
    world.click(&id).await;
}

#[when(expr = "the user presses {string}")]
async fn when_press(world: &mut PageWorld, key: String) {
    world.press(&key, None).await;
}

#[when(expr = "the user presses {string} on {string}")]
async fn when_press_on(world: &mut PageWorld, key: String, id: String) {
    world.press(&key, Some(&id)).await;
}

#[when(expr = "{int} ms pass")]
async fn when_time_passes(world: &mut PageWorld, millis: u64) {
    world.advance_ms(millis);
}

#[then(expr = "the default action should be prevented")]
async fn then_prevented(world: &mut PageWorld) {
    let outcome = world.last_outcome.expect("an event was dispatched");
    assert!(outcome.default_prevented);
}

#[then(expr = "the default action should not be prevented")]
async fn then_not_prevented(world: &mut PageWorld) {
    let outcome = world.last_outcome.expect("an event was dispatched");
    assert!(!outcome.default_prevented);
}

#[then(expr = "element {string} should have class {string}")]
async fn then_has_class(world: &mut PageWorld, id: String, class: String) {
    assert!(
        world.has_class(&id, &class),
        "'{id}' lacks class '{class}': {:?}",
        world.page().classes(world.element(&id))
    );
}

#[then(expr = "element {string} should not have class {string}")]
async fn then_lacks_class(world: &mut PageWorld, id: String, class: String) {
    assert!(!world.has_class(&id, &class), "'{id}' has class '{class}'");
}

#[then(expr = "element {string} should have style {string} set to {string}")]
async fn then_style(world: &mut PageWorld, id: String, property: String, value: String) {
    let node = world.element(&id);
    assert_eq!(world.page().style(node, &property), Some(value));
}

#[then(expr = "element {string} should have attribute {string} set to {string}")]
async fn then_attribute(world: &mut PageWorld, id: String, name: String, value: String) {
    let node = world.element(&id);
    assert_eq!(world.page().attribute(node, &name), Some(value));
}

#[then(expr = "element {string} should have text {string}")]
async fn then_text(world: &mut PageWorld, id: String, text: String) {
    let node = world.element(&id);
    assert_eq!(world.page().text(node), Some(text));
}

#[then("background scrolling should be locked")]
async fn then_locked(world: &mut PageWorld) {
    assert!(world.runtime().scroll_lock().is_locked());
    let body = world.page().body();
    assert_eq!(world.page().style(body, "overflow").as_deref(), Some("hidden"));
}

#[then("background scrolling should be unlocked")]
async fn then_unlocked(world: &mut PageWorld) {
    assert!(!world.runtime().scroll_lock().is_locked());
    let body = world.page().body();
    assert_eq!(world.page().style(body, "overflow"), None);
}
