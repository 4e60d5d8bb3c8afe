//! Step definitions for the menu, active links and anchor scrolling

use crate::common::world::PageWorld;
use cucumber::{then, when};
use pagewright::surface::{NodeId, ScrollBehavior, ScrollRequest};
use pagewright::{PageEvent, PageSurface, Selector};

fn active_links(world: &PageWorld) -> Vec<String> {
    let page = world.page();
    page.query(&Selector::class("nav-link").and(Selector::class("active")))
        .into_iter()
        .filter_map(|link| page.attribute(link, "id"))
        .collect()
}

fn skip_link(world: &PageWorld) -> NodeId {
    world
        .page()
        .query_first(&Selector::class("skip-link"))
        .expect("skip link installed")
}

#[then("the menu should be open")]
async fn then_menu_open(world: &mut PageWorld) {
    assert!(world.runtime().nav_state().menu_open);
    assert!(world.has_class("hamburger", "active"));
}

#[then("the menu should be closed")]
async fn then_menu_closed(world: &mut PageWorld) {
    assert!(!world.runtime().nav_state().menu_open);
    assert!(!world.has_class("hamburger", "active"));
    let body = world.page().body();
    assert!(!world.page().has_class(body, "menu-open"));
}

#[then(expr = "the body should have class {string}")]
async fn then_body_class(world: &mut PageWorld, class: String) {
    let body = world.page().body();
    assert!(world.page().has_class(body, &class));
}

#[then("no navigation link should be active")]
async fn then_no_active_link(world: &mut PageWorld) {
    assert!(active_links(world).is_empty());
}

#[then(expr = "only {string} should be active")]
async fn then_only_active(world: &mut PageWorld, id: String) {
    assert_eq!(active_links(world), vec![id]);
}

#[then(expr = "the page should have scrolled smoothly to {int}")]
async fn then_scrolled_to(world: &mut PageWorld, top: u32) {
    assert_eq!(
        world.page().last_scroll_request(),
        Some(ScrollRequest {
            top,
            behavior: ScrollBehavior::Smooth
        })
    );
}

#[then("the page should not have scrolled")]
async fn then_not_scrolled(world: &mut PageWorld) {
    assert!(world.page().scroll_requests().is_empty());
}

#[when(expr = "the skip link is {word}")]
async fn when_skip_link(world: &mut PageWorld, action: String) {
    let target = skip_link(world);
    let event = match action.as_str() {
        "focused" => PageEvent::Focus { target },
        "blurred" => PageEvent::Blur { target },
        "clicked" => PageEvent::Click { target },
        other => panic!("unknown skip link action '{other}'"),
    };
    world.dispatch(event).await;
}

#[then("the skip link should come first in the body")]
async fn then_skip_link_first(world: &mut PageWorld) {
    let link = skip_link(world);
    let body = world.page().body();
    assert_eq!(world.page().children(body).first(), Some(&link));
}

#[then(expr = "the skip link should sit at top {string}")]
async fn then_skip_link_top(world: &mut PageWorld, top: String) {
    let link = skip_link(world);
    assert_eq!(world.page().style(link, "top"), Some(top));
}
