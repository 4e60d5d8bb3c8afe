//! Step definitions for viewport reveal and media

use crate::common::world::PageWorld;
use cucumber::{then, when};
use pagewright::testing::placed;
use pagewright::{PageEvent, PageSurface};

#[then(expr = "element {string} should be revealed")]
async fn then_revealed(world: &mut PageWorld, id: String) {
    let node = world.element(&id);
    assert!(world.runtime().is_revealed(node));
}

#[then(expr = "element {string} should not be revealed")]
async fn then_not_revealed(world: &mut PageWorld, id: String) {
    let node = world.element(&id);
    assert!(!world.runtime().is_revealed(node));
}

#[when(expr = "{string} is removed and a new reveal element is added at {int}")]
async fn when_replace_element(world: &mut PageWorld, id: String, top: i64) {
    let node = world.element(&id);
    let page = world.runtime_mut().page_mut();
    page.remove_element(node);
    let body = page.body();
    let late = placed(page, body, "div", &[("data-reveal", "")], top, 100);
    world.late_element = Some(late);
}

#[then("the new reveal element should not be revealed")]
async fn then_late_not_revealed(world: &mut PageWorld) {
    let late = world.late_element.expect("a late element was added");
    assert!(!world.runtime().is_revealed(late));
    assert!(!world.page().has_class(late, "visible"));
}

#[then("the hero video should be playing")]
async fn then_video_playing(world: &mut PageWorld) {
    let video = world.element("hero-video");
    assert_eq!(world.page().media_state(video).map(|m| m.playing), Some(true));
}

#[then("the hero video should be paused")]
async fn then_video_paused(world: &mut PageWorld) {
    let video = world.element("hero-video");
    assert_eq!(world.page().media_state(video).map(|m| m.playing), Some(false));
}

#[when("the hero video fails to load")]
async fn when_video_fails(world: &mut PageWorld) {
    let target = world.element("hero-video");
    world.dispatch(PageEvent::MediaError { target }).await;
}
