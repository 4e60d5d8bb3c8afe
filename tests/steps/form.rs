//! Step definitions for the consultation form
//!
//! This module contains step definitions for:
//! - Filling fields and submitting
//! - Phase history and field error assertions
//! - Notices and floating labels

use crate::common::world::PageWorld;
use cucumber::{given, then, when};
use pagewright::{FormPhase, PageEvent, PageSurface, Selector};

fn phase_name(phase: &FormPhase) -> String {
    format!("{phase:?}").to_lowercase()
}

fn notice(world: &PageWorld) -> Option<pagewright::NodeId> {
    world.page().query_first(&Selector::class("notification"))
}

#[given(expr = "field {string} contains {string}")]
async fn given_field_value(world: &mut PageWorld, id: String, value: String) {
    let field = world.element(&id);
    world.runtime_mut().page_mut().set_value(field, &value);
}

#[given("the transport will fail")]
async fn given_transport_fails(world: &mut PageWorld) {
    world.transport.push_result(false);
}

#[when("the user submits the form")]
async fn when_submit(world: &mut PageWorld) {
    let form = world.element("consultation");
    world.dispatch(PageEvent::Submit { form }).await;
    world.runtime_mut().settle_submissions().await;
}

#[given("an unnamed required field is added to the form")]
async fn given_unnamed_field(world: &mut PageWorld) {
    let form = world.element("consultation");
    let page = world.runtime_mut().page_mut();
    let field = page.create_element("input", form);
    page.set_attribute(field, "type", "tel");
    page.set_attribute(field, "required", "");
    world.extra_field = Some(field);
}

#[then(expr = "the unnamed field should have class {string}")]
async fn then_unnamed_field_class(world: &mut PageWorld, class: String) {
    let field = world.extra_field.expect("an unnamed field was added");
    assert!(world.page().has_class(field, &class));
}

#[when(expr = "the user focuses {string}")]
async fn when_focus(world: &mut PageWorld, id: String) {
    let target = world.element(&id);
    world.dispatch(PageEvent::Focus { target }).await;
}

#[when(expr = "the user blurs {string}")]
async fn when_blur(world: &mut PageWorld, id: String) {
    let target = world.element(&id);
    world.dispatch(PageEvent::Blur { target }).await;
}

#[when(expr = "the user types {string} into {string}")]
async fn when_type(world: &mut PageWorld, text: String, id: String) {
    let target = world.element(&id);
    world.runtime_mut().page_mut().set_value(target, &text);
    world.dispatch(PageEvent::Input { target }).await;
}

#[then("the form should be idle")]
async fn then_idle(world: &mut PageWorld) {
    assert_eq!(world.form_state().phase(), FormPhase::Idle);
}

#[then(expr = "the field errors should be {string}")]
async fn then_field_errors(world: &mut PageWorld, expected: String) {
    let errors: Vec<&str> = world
        .form_state()
        .field_errors()
        .iter()
        .map(String::as_str)
        .collect();
    assert_eq!(errors.join(", "), expected);
}

#[then("the form should never have been submitting")]
async fn then_never_submitting(world: &mut PageWorld) {
    assert!(!world.form_state().history().contains(&FormPhase::Submitting));
}

#[then(expr = "the form should have passed through {string}")]
async fn then_history(world: &mut PageWorld, expected: String) {
    let history: Vec<String> = world.form_state().history().iter().map(phase_name).collect();
    assert_eq!(history.join(", "), expected);
}

#[then("the submission should have succeeded")]
async fn then_succeeded(world: &mut PageWorld) {
    let history = world.form_state().history();
    assert!(history.contains(&FormPhase::Succeeded));
    assert!(!history.contains(&FormPhase::Failed));
}

#[then("the submission should have failed")]
async fn then_failed(world: &mut PageWorld) {
    let history = world.form_state().history();
    assert!(history.contains(&FormPhase::Failed));
    assert!(!history.contains(&FormPhase::Succeeded));
}

#[then("no submission should have been sent")]
async fn then_nothing_sent(world: &mut PageWorld) {
    assert!(world.transport.calls().is_empty());
}

#[then(expr = "{int} submission(s) should have been sent")]
async fn then_sent(world: &mut PageWorld, expected: usize) {
    assert_eq!(world.transport.calls().len(), expected);
}

#[then(expr = "field {string} should be empty")]
async fn then_field_empty(world: &mut PageWorld, id: String) {
    let field = world.element(&id);
    assert_eq!(world.page().value(field).as_deref(), Some(""));
}

#[then(expr = "field {string} should contain {string}")]
async fn then_field_contains(world: &mut PageWorld, id: String, value: String) {
    let field = world.element(&id);
    assert_eq!(world.page().value(field), Some(value));
}

#[then(expr = "element {string} should be enabled")]
async fn then_enabled(world: &mut PageWorld, id: String) {
    let node = world.element(&id);
    assert!(!world.page().is_disabled(node));
}

#[then(expr = "a notice should say {string}")]
async fn then_notice_says(world: &mut PageWorld, message: String) {
    let notice = notice(world).expect("a notice is shown");
    let texts: Vec<String> = world
        .page()
        .children(notice)
        .into_iter()
        .filter_map(|child| world.page().text(child))
        .collect();
    assert!(texts.contains(&message), "notice texts: {texts:?}");
}

#[then("the notice should be leaving")]
async fn then_notice_leaving(world: &mut PageWorld) {
    let notice = notice(world).expect("a notice is shown");
    assert!(world.page().has_class(notice, "leaving"));
}

#[then("no notice should be shown")]
async fn then_no_notice(world: &mut PageWorld) {
    assert!(notice(world).is_none());
}
