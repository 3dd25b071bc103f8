//! Interaction handlers: what happens when a user acts on the rendered view.
//!
//! These mirror the event wiring of the rendered widget. Typing changes the
//! draft, submitting the form submits the draft, and clicking an item
//! affordance toggles or removes the item it was rendered for.

use crate::types::{TodoAction, TodoId};
use crate::view::{DONE, FORM_LABEL, MOVE_BACK, REMOVE};
use todo_widget_core::view::{Element, Role};

/// The user replaced the input's contents with `text`
#[must_use]
pub fn input(text: impl Into<String>) -> TodoAction {
    TodoAction::DraftChanged { text: text.into() }
}

/// The user submitted `form` (enter key or submit button)
///
/// Only the widget's own form submits. Submission is not gated on the
/// button's disabled state; a blank draft is ignored by the reducer.
#[must_use]
pub fn submit(form: &Element) -> Option<TodoAction> {
    (form.role() == Some(Role::Form) && form.label.as_deref() == Some(FORM_LABEL))
        .then_some(TodoAction::Submit)
}

/// The user clicked `element`
///
/// Returns `None` for disabled controls and for elements with no handler.
/// A submit button submits its form.
#[must_use]
pub fn click(element: &Element) -> Option<TodoAction> {
    if element.role() != Some(Role::Button) || element.disabled {
        return None;
    }

    if element.attribute("type") == Some("submit") {
        return Some(TodoAction::Submit);
    }

    let id: TodoId = element.target.as_deref()?.parse().ok()?;
    match element.label.as_deref()? {
        DONE | MOVE_BACK => Some(TodoAction::ToggleComplete { id }),
        REMOVE => Some(TodoAction::Remove { id }),
        _ => None,
    }
}
