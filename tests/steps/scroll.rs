//! Step definitions for scroll publishing, navbar chrome and parallax

use crate::common::world::PageWorld;
use cucumber::{then, when};
use pagewright::PageSurface;
use tracing::debug;

#[when(expr = "the user scrolls to {int}")]
async fn when_scroll_to(world: &mut PageWorld, position: u32) {
    world.scroll_to(position).await;
}

#[when(expr = "{int} scroll events arrive {int} ms apart while moving down {int} units each")]
async fn when_burst(world: &mut PageWorld, count: u32, spacing: u64, step_size: u32) {
    for i in 1..=count {
        world.scroll_without_waiting(i * step_size).await;
        world.advance_ms(spacing);
    }
    debug!("Burst finished at {:?}", world.runtime().now());
}

#[when(expr = "the user scrolls through positions {int} to {int} in steps of {int}")]
async fn when_scroll_through(world: &mut PageWorld, from: u32, to: u32, step_size: usize) {
    for position in (from..=to).step_by(step_size) {
        world.scroll_to(position).await;
    }
}

#[then(expr = "{int} scroll samples should have been published")]
async fn then_published(world: &mut PageWorld, expected: usize) {
    assert_eq!(world.runtime().published_samples(), expected);
}

#[then(expr = "the navbar should have class {string}")]
async fn then_navbar_class(world: &mut PageWorld, class: String) {
    assert!(world.has_class("navbar", &class));
}

#[then(expr = "the navbar should not have class {string}")]
async fn then_navbar_lacks_class(world: &mut PageWorld, class: String) {
    assert!(!world.has_class("navbar", &class));
}

#[then(expr = "the navbar scrolled visual should have changed {int} time(s)")]
async fn then_chrome_transitions(world: &mut PageWorld, expected: usize) {
    assert_eq!(world.chrome_transitions, expected);
}

#[then("the navbar should be hidden")]
async fn then_navbar_hidden(world: &mut PageWorld) {
    assert!(world.runtime().nav_state().hidden);
    let navbar = world.element("navbar");
    assert_eq!(
        world.page().style(navbar, "transform").as_deref(),
        Some("translateY(-100%)")
    );
}

#[then("the navbar should be shown")]
async fn then_navbar_shown(world: &mut PageWorld) {
    assert!(!world.runtime().nav_state().hidden);
    let navbar = world.element("navbar");
    assert_eq!(
        world.page().style(navbar, "transform").as_deref(),
        Some("translateY(0)")
    );
}
