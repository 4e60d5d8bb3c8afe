//! Step definitions for the project overlay

use crate::common::world::PageWorld;
use cucumber::{then, when};
use pagewright::PageSurface;

#[when(expr = "the modal is opened for {string}")]
async fn when_open_modal(world: &mut PageWorld, key: String) {
    let record = world.project(&key);
    assert!(world.runtime_mut().open_modal(record));
}

#[then(expr = "the modal should show {string}")]
async fn then_modal_shows(world: &mut PageWorld, title: String) {
    let state = world.runtime().modal_state();
    assert!(state.open);
    assert_eq!(state.record.as_ref().map(|r| r.title.clone()), Some(title.clone()));
    assert!(world.has_class("projectModal", "open"));
    let heading = world.element("modal-title");
    assert_eq!(world.page().text(heading), Some(title));
}

#[then("the modal should be closed")]
async fn then_modal_closed(world: &mut PageWorld) {
    assert!(!world.runtime().modal_state().open);
    assert!(!world.has_class("projectModal", "open"));
}
