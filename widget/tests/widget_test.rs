//! Integration tests for the mounted widget.
//!
//! Each test drives a Store the way a user drives the widget (typing,
//! submitting the form, clicking affordances) and asserts on the rendered
//! view after awaiting the render revision.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic

use std::sync::Arc;
use todo_widget::view::{COMPLETED_LIST, DONE, FORM_LABEL, MOVE_BACK, READY_LIST, REMOVE, SUBMIT};
use todo_widget::{TodoEnvironment, TodoStore, events, mount, render};
use todo_widget_core::environment::MonotonicIds;
use todo_widget_core::view::{Element, Role};
use todo_widget_testing::screen::{Queries, within};
use todo_widget_testing::{Screen, init_test_tracing, test_clock};

fn test_env() -> TodoEnvironment {
    TodoEnvironment::new(Arc::new(test_clock()), Arc::new(MonotonicIds::new()))
}

async fn mounted() -> TodoStore {
    init_test_tracing();
    mount(test_env(), Vec::new()).await.unwrap()
}

async fn screen(store: &TodoStore) -> Screen {
    Screen::new(render(store).await)
}

/// Dispatch and wait for the view to catch up
async fn dispatch(store: &TodoStore, action: Option<todo_widget::TodoAction>) {
    let action = action.expect("element has no handler");
    let before = store.revision();
    store.send(action).await.unwrap();
    let seen = store.rendered(before).await;
    assert!(seen > before);
}

async fn type_text(store: &TodoStore, text: &str) {
    dispatch(store, Some(events::input(text))).await;
}

async fn submit(store: &TodoStore) {
    let screen = screen(store).await;
    dispatch(store, events::submit(screen.get_by_label(FORM_LABEL))).await;
}

async fn click(store: &TodoStore, find: impl FnOnce(&Screen) -> &Element) {
    let screen = screen(store).await;
    dispatch(store, events::click(find(&screen))).await;
}

async fn add(store: &TodoStore, text: &str) {
    type_text(store, text).await;
    submit(store).await;
}

fn only_item(list: &Element) -> &Element {
    within(list).get_by_role(Role::ListItem, None)
}

// ========== Rendering ==========

#[tokio::test]
async fn renders_the_component() {
    let store = mounted().await;
    let screen = screen(&store).await;
    assert_eq!(screen.get_by_label("todo-list").tag, "section");
}

#[tokio::test]
async fn renders_an_input_field() {
    let store = mounted().await;
    let screen = screen(&store).await;
    let input = screen.get_by_role(Role::TextBox, None);
    assert_eq!(input.attribute("name"), Some("todo"));
}

#[tokio::test]
async fn renders_a_submit_button_inside_the_form() {
    let store = mounted().await;
    let screen = screen(&store).await;
    let form = screen.get_by_label(FORM_LABEL);
    let button = within(form).get_by_role(Role::Button, Some(SUBMIT));
    assert_eq!(button.attribute("type"), Some("submit"));
}

// ========== Submit enablement ==========

#[tokio::test]
async fn submit_button_disabled_without_input() {
    let store = mounted().await;
    let screen = screen(&store).await;
    assert!(screen.get_by_role(Role::Button, Some(SUBMIT)).disabled);
}

#[tokio::test]
async fn submit_button_enabled_with_input() {
    let store = mounted().await;
    type_text(&store, "test").await;
    let screen = screen(&store).await;
    assert!(!screen.get_by_role(Role::Button, Some(SUBMIT)).disabled);
}

#[tokio::test]
async fn submit_button_disabled_after_clearing_input() {
    let store = mounted().await;
    type_text(&store, "test").await;
    type_text(&store, "").await;
    let screen = screen(&store).await;
    assert!(screen.get_by_role(Role::Button, Some(SUBMIT)).disabled);
}

#[tokio::test]
async fn submit_button_disabled_for_whitespace_input() {
    let store = mounted().await;
    type_text(&store, "   ").await;
    let screen = screen(&store).await;
    assert!(screen.get_by_role(Role::Button, Some(SUBMIT)).disabled);
}

#[tokio::test]
async fn submitting_empty_input_adds_nothing() {
    let store = mounted().await;
    submit(&store).await;
    type_text(&store, " ").await;
    submit(&store).await;

    assert_eq!(store.state(|s| s.count()).await, 0);
    let screen = screen(&store).await;
    assert!(screen.query_by_test_id(READY_LIST).is_none());
    assert!(screen.query_by_test_id(COMPLETED_LIST).is_none());
}

// ========== Adding ==========

#[tokio::test]
async fn renders_ready_list_when_adding_a_todo() {
    let store = mounted().await;
    add(&store, "test").await;

    let screen = screen(&store).await;
    screen.get_by_test_id(READY_LIST);
    screen.get_by_text("Ready");
    assert!(screen.query_by_test_id(COMPLETED_LIST).is_none());
}

#[tokio::test]
async fn renders_the_todo_list_item() {
    let store = mounted().await;
    add(&store, "test").await;

    let screen = screen(&store).await;
    let item = only_item(screen.get_by_test_id(READY_LIST));
    assert_eq!(within(item).get_by_text("test").tag, "p");
    within(item).get_by_label(DONE);
}

#[tokio::test]
async fn submitting_clears_the_input() {
    let store = mounted().await;
    add(&store, "test").await;

    let screen = screen(&store).await;
    assert_eq!(screen.get_by_role(Role::TextBox, None).attribute("value"), Some(""));
    assert!(screen.get_by_role(Role::Button, Some(SUBMIT)).disabled);
}

#[tokio::test]
async fn clicking_enabled_submit_button_adds() {
    let store = mounted().await;
    type_text(&store, "test").await;
    click(&store, |s| s.get_by_role(Role::Button, Some(SUBMIT))).await;

    assert_eq!(store.state(|s| s.count()).await, 1);
}

#[tokio::test]
async fn newest_items_first() {
    let store = mounted().await;
    add(&store, "Buy milk").await;
    add(&store, "Walk dog").await;

    let screen = screen(&store).await;
    let descriptions: Vec<String> = within(screen.get_by_test_id(READY_LIST))
        .get_all_by_role(Role::ListItem)
        .into_iter()
        .map(Element::text_content)
        .collect();
    assert_eq!(descriptions, ["Walk dog", "Buy milk"]);
}

// ========== Completing ==========

#[tokio::test]
async fn done_moves_item_to_completed_list() {
    let store = mounted().await;
    add(&store, "test").await;
    click(&store, |s| s.get_by_label(DONE)).await;

    let screen = screen(&store).await;
    assert!(screen.query_by_test_id(READY_LIST).is_none());
    let item = only_item(screen.get_by_test_id(COMPLETED_LIST));
    within(item).get_by_text("test");
    within(item).get_by_label(MOVE_BACK);
    within(item).get_by_label(REMOVE);
    screen.get_by_text("Completed");
}

#[tokio::test]
async fn move_back_returns_item_to_ready_list() {
    let store = mounted().await;
    add(&store, "test").await;
    click(&store, |s| s.get_by_label(DONE)).await;
    click(&store, |s| s.get_by_label(MOVE_BACK)).await;

    let screen = screen(&store).await;
    assert!(screen.query_by_test_id(COMPLETED_LIST).is_none());
    let item = only_item(screen.get_by_test_id(READY_LIST));
    within(item).get_by_text("test");
}

#[tokio::test]
async fn both_lists_render_when_both_have_items() {
    let store = mounted().await;
    add(&store, "first").await;
    add(&store, "second").await;
    click(&store, |s| {
        let item = within(s.get_by_test_id(READY_LIST))
            .get_all_by_role(Role::ListItem)
            .into_iter()
            .find(|li| li.text_content() == "first")
            .expect("first is listed");
        within(item).get_by_label(DONE)
    })
    .await;

    let screen = screen(&store).await;
    within(only_item(screen.get_by_test_id(READY_LIST))).get_by_text("second");
    within(only_item(screen.get_by_test_id(COMPLETED_LIST))).get_by_text("first");
}

#[tokio::test]
async fn ready_list_hidden_after_completing_every_item() {
    let store = mounted().await;
    add(&store, "a").await;
    add(&store, "b").await;
    click(&store, |s| s.query_all_by_label(DONE)[0]).await;
    click(&store, |s| s.get_by_label(DONE)).await;

    let screen = screen(&store).await;
    assert!(screen.query_by_test_id(READY_LIST).is_none());
    assert!(screen.query_by_text_heading("Ready").is_none());
    assert_eq!(
        within(screen.get_by_test_id(COMPLETED_LIST))
            .get_all_by_role(Role::ListItem)
            .len(),
        2
    );
}

// ========== Removing ==========

#[tokio::test]
async fn remove_deletes_the_item() {
    let store = mounted().await;
    add(&store, "test").await;
    click(&store, |s| s.get_by_label(DONE)).await;
    click(&store, |s| s.get_by_label(REMOVE)).await;

    assert_eq!(store.state(|s| s.count()).await, 0);
    let screen = screen(&store).await;
    assert!(screen.query_by_test_id(READY_LIST).is_none());
    assert!(screen.query_by_test_id(COMPLETED_LIST).is_none());
}

#[tokio::test]
async fn active_items_have_no_remove_affordance() {
    let store = mounted().await;
    add(&store, "test").await;

    let screen = screen(&store).await;
    assert!(screen.query_by_label(REMOVE).is_none());
}

#[tokio::test]
async fn stale_click_after_removal_is_ignored() {
    let store = mounted().await;
    add(&store, "test").await;
    click(&store, |s| s.get_by_label(DONE)).await;

    let stale = screen(&store).await;
    let remove = stale.get_by_label(REMOVE);
    let move_back = stale.get_by_label(MOVE_BACK);

    dispatch(&store, events::click(remove)).await;
    dispatch(&store, events::click(move_back)).await;

    assert_eq!(store.state(|s| s.count()).await, 0);
}

// ========== Lifecycle ==========

#[tokio::test]
async fn seeded_items_render_in_order() {
    init_test_tracing();
    let store = mount(test_env(), vec!["one".into(), "two".into()]).await.unwrap();

    let screen = screen(&store).await;
    let listed: Vec<String> = within(screen.get_by_test_id(READY_LIST))
        .get_all_by_role(Role::ListItem)
        .into_iter()
        .map(Element::text_content)
        .collect();
    assert_eq!(listed, ["one", "two"]);
}

#[tokio::test]
async fn unmounted_widget_rejects_input() {
    let store = mounted().await;
    add(&store, "test").await;
    store.unmount();

    assert!(store.send(events::input("more")).await.is_err());
    assert_eq!(store.state(|s| s.draft.clone()).await, "");
}

trait HeadingQuery {
    fn query_by_text_heading(&self, text: &str) -> Option<&Element>;
}

impl HeadingQuery for Screen {
    fn query_by_text_heading(&self, text: &str) -> Option<&Element> {
        self.root()
            .find(|e| e.role() == Some(Role::Heading) && e.text_content() == text)
    }
}
