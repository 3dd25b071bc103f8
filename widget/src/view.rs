//! View projection for the todo widget.
//!
//! [`render`] is a pure function of state: the same state always renders the
//! same tree and rendering never feeds anything back into the model. The
//! labels and test ids below are the contract any harness uses to locate
//! elements.

use crate::types::{TodoItem, TodoState};
use todo_widget_core::view::Element;

/// `aria-label` of the root section
pub const ROOT_LABEL: &str = "todo-list";
/// `aria-label` of the input form
pub const FORM_LABEL: &str = "todo";
/// `name` of the text input
pub const INPUT_NAME: &str = "todo";
/// `data-testid` of the ready list
pub const READY_LIST: &str = "ready-list";
/// `data-testid` of the completed list
pub const COMPLETED_LIST: &str = "completed-list";
/// Label of the affordance completing a ready item
pub const DONE: &str = "done";
/// Label of the affordance returning a completed item to ready
pub const MOVE_BACK: &str = "move back";
/// Label of the affordance deleting a completed item
pub const REMOVE: &str = "remove";
/// Text of the submit button
pub const SUBMIT: &str = "Submit";

/// Project widget state into an element tree
///
/// A section with no items is omitted entirely, heading included.
#[must_use]
pub fn render(state: &TodoState) -> Element {
    let mut root = Element::new("section")
        .label(ROOT_LABEL)
        .child(Element::new("h2").text("Todo List"))
        .child(form(state));

    let ready: Vec<Element> = state.active_items().map(ready_item).collect();
    if !ready.is_empty() {
        root = root
            .child(Element::new("h3").text("Ready"))
            .child(Element::new("ul").test_id(READY_LIST).children(ready));
    }

    let completed: Vec<Element> = state.completed_items().map(completed_item).collect();
    if !completed.is_empty() {
        root = root
            .child(Element::new("h3").text("Completed"))
            .child(Element::new("ul").test_id(COMPLETED_LIST).children(completed));
    }

    root
}

fn form(state: &TodoState) -> Element {
    Element::new("form")
        .label(FORM_LABEL)
        .child(
            Element::new("input")
                .attr("type", "text")
                .attr("name", INPUT_NAME)
                .attr("autocomplete", "off")
                .attr("value", state.draft.clone()),
        )
        .child(
            Element::new("button")
                .attr("type", "submit")
                .disabled(!state.can_submit())
                .text(SUBMIT),
        )
}

fn ready_item(item: &TodoItem) -> Element {
    Element::new("li")
        .child(Element::new("p").text(item.description.clone()))
        .child(action_button(DONE, item))
}

fn completed_item(item: &TodoItem) -> Element {
    Element::new("li")
        .child(Element::new("p").text(item.description.clone()))
        .child(action_button(MOVE_BACK, item))
        .child(action_button(REMOVE, item))
}

fn action_button(label: &str, item: &TodoItem) -> Element {
    Element::new("button")
        .attr("type", "button")
        .label(label)
        .target(item.id.to_string())
}
