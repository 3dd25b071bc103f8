//! A todo list widget.
//!
//! The widget lets a user type a description, submit it into the "Ready"
//! list, mark items done (moving them to "Completed"), move completed items
//! back, and remove completed items. State lives in memory for as long as
//! the widget is mounted.
//!
//! - [`types`]: items, widget state, actions
//! - [`reducer`]: the four state transitions (draft, add, toggle, remove)
//! - [`view`]: pure projection of state into a labelled element tree
//! - [`events`]: what clicking, typing, and submitting dispatch
//! - [`command`]: line commands used by the `todo-widget` binary
//! - [`config`]: environment configuration
//!
//! # Quick Start
//!
//! ```no_run
//! use todo_widget::{TodoAction, TodoEnvironment, events, mount, render};
//! use todo_widget::config::Config;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let env = TodoEnvironment::from_config(&Config::default());
//! let store = mount(env, Vec::new()).await?;
//!
//! store.send(events::input("Buy milk")).await?;
//! store.send(TodoAction::Submit).await?;
//!
//! let view = render(&store).await;
//! println!("{}", view.render_text());
//! # Ok(())
//! # }
//! ```

pub mod command;
pub mod config;
pub mod events;
pub mod reducer;
pub mod types;
pub mod view;

// Re-export commonly used types
pub use reducer::{TodoEnvironment, TodoReducer};
pub use types::{TodoAction, TodoId, TodoItem, TodoState};

use todo_widget_core::view::Element;
use todo_widget_runtime::{Store, StoreError};

/// A mounted widget
pub type TodoStore = Store<TodoState, TodoAction, TodoEnvironment, TodoReducer>;

/// Mount a widget, optionally seeded with items (listed top to bottom)
///
/// # Errors
///
/// Propagates [`StoreError`] from dispatching the seed.
pub async fn mount(env: TodoEnvironment, seed: Vec<String>) -> Result<TodoStore, StoreError> {
    let store = Store::new(TodoState::new(), TodoReducer::new(), env);
    if !seed.is_empty() {
        store.send(TodoAction::Seed { descriptions: seed }).await?;
    }
    tracing::debug!("Todo widget mounted");
    Ok(store)
}

/// Render the widget's current state
pub async fn render(store: &TodoStore) -> Element {
    store.state(view::render).await
}
