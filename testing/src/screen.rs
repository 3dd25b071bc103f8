//! Queries over rendered element trees, in the spirit of DOM testing
//! libraries: locate things the way a user would (by label, role, or
//! visible text) or by an explicit test id.
//!
//! `get_*` queries panic unless exactly one element matches. `query_*`
//! queries return `None` when nothing matches, which is how absence is
//! asserted. Searches include the scope element itself.

use todo_widget_core::view::{Element, Role};

/// Query methods available on any scope
pub trait Queries {
    /// Element the queries search under
    fn scope(&self) -> &Element;

    /// Every element with the given `aria-label`
    fn query_all_by_label(&self, label: &str) -> Vec<&Element> {
        self.scope().find_all(|e| e.label.as_deref() == Some(label))
    }

    /// The element with the given `aria-label`, if any
    ///
    /// # Panics
    ///
    /// Panics if more than one element matches.
    fn query_by_label(&self, label: &str) -> Option<&Element> {
        at_most_one(self.query_all_by_label(label), &format!("label {label:?}"))
    }

    /// The element with the given `aria-label`
    ///
    /// # Panics
    ///
    /// Panics unless exactly one element matches.
    fn get_by_label(&self, label: &str) -> &Element {
        exactly_one(self.query_all_by_label(label), &format!("label {label:?}"))
    }

    /// The element with the given `data-testid`, if any
    ///
    /// # Panics
    ///
    /// Panics if more than one element matches.
    fn query_by_test_id(&self, test_id: &str) -> Option<&Element> {
        at_most_one(
            self.scope().find_all(|e| e.test_id.as_deref() == Some(test_id)),
            &format!("test id {test_id:?}"),
        )
    }

    /// The element with the given `data-testid`
    ///
    /// # Panics
    ///
    /// Panics unless exactly one element matches.
    fn get_by_test_id(&self, test_id: &str) -> &Element {
        exactly_one(
            self.scope().find_all(|e| e.test_id.as_deref() == Some(test_id)),
            &format!("test id {test_id:?}"),
        )
    }

    /// Every element with the given role
    fn get_all_by_role(&self, role: Role) -> Vec<&Element> {
        self.scope().find_all(|e| e.role() == Some(role))
    }

    /// The element with the given role and, optionally, accessible name
    ///
    /// # Panics
    ///
    /// Panics unless exactly one element matches.
    fn get_by_role(&self, role: Role, name: Option<&str>) -> &Element {
        let matches = self
            .get_all_by_role(role)
            .into_iter()
            .filter(|e| name.is_none_or(|name| e.accessible_name() == name))
            .collect();
        exactly_one(matches, &format!("role {role:?} named {name:?}"))
    }

    /// The element whose own text is exactly `text` (surrounding whitespace ignored)
    ///
    /// # Panics
    ///
    /// Panics unless exactly one element matches.
    fn get_by_text(&self, text: &str) -> &Element {
        exactly_one(
            self.scope()
                .find_all(|e| e.text.as_deref().map(str::trim) == Some(text)),
            &format!("text {text:?}"),
        )
    }
}

impl Queries for Element {
    fn scope(&self) -> &Element {
        self
    }
}

/// A rendered view under test
#[derive(Clone, Debug)]
pub struct Screen {
    root: Element,
}

impl Screen {
    /// Wrap a rendered view
    #[must_use]
    pub const fn new(root: Element) -> Self {
        Self { root }
    }

    /// Root of the rendered view
    #[must_use]
    pub const fn root(&self) -> &Element {
        &self.root
    }
}

impl Queries for Screen {
    fn scope(&self) -> &Element {
        &self.root
    }
}

/// Narrow queries to the subtree under `element`
#[must_use]
pub const fn within(element: &Element) -> &Element {
    element
}

#[allow(clippy::panic)] // Test query
fn exactly_one<'a>(mut found: Vec<&'a Element>, what: &str) -> &'a Element {
    match found.len() {
        1 => found.remove(0),
        0 => panic!("Unable to find an element by {what}"),
        n => panic!("Found {n} elements by {what}, expected exactly one"),
    }
}

#[allow(clippy::panic)] // Test query
fn at_most_one<'a>(mut found: Vec<&'a Element>, what: &str) -> Option<&'a Element> {
    match found.len() {
        0 => None,
        1 => Some(found.remove(0)),
        n => panic!("Found {n} elements by {what}, expected at most one"),
    }
}
