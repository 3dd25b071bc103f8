//! Reducer logic for the todo widget.
//!
//! Every transition is synchronous and in-memory, so no action ever produces
//! an effect. Actions that do not apply to the current state (blank submit,
//! unknown id, removing an item that is still active) leave state untouched.

use crate::config::{Config, IdStrategy};
use crate::types::{TodoAction, TodoId, TodoItem, TodoState};
use std::sync::Arc;
use todo_widget_core::{
    SmallVec,
    effect::Effect,
    environment::{Clock, IdGenerator, MonotonicIds, RandomIds, SystemClock},
    reducer::Reducer,
};

/// Environment dependencies for the todo reducer
#[derive(Clone)]
pub struct TodoEnvironment {
    /// Clock for creation timestamps
    pub clock: Arc<dyn Clock>,
    /// Source of item ids
    pub ids: Arc<dyn IdGenerator>,
}

impl TodoEnvironment {
    /// Creates a new `TodoEnvironment`
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>, ids: Arc<dyn IdGenerator>) -> Self {
        Self { clock, ids }
    }

    /// System clock and the id strategy named in the configuration
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let ids: Arc<dyn IdGenerator> = match config.id_strategy {
            IdStrategy::Sequential => Arc::new(MonotonicIds::new()),
            IdStrategy::Random => Arc::new(RandomIds),
        };
        Self::new(Arc::new(SystemClock), ids)
    }

    fn new_item(&self, description: String) -> TodoItem {
        TodoItem::new(
            TodoId::from_u128(self.ids.next_id()),
            description,
            self.clock.now(),
        )
    }
}

impl std::fmt::Debug for TodoEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TodoEnvironment").finish_non_exhaustive()
    }
}

/// Reducer for the todo widget
#[derive(Clone, Debug, Default)]
pub struct TodoReducer;

impl TodoReducer {
    /// Creates a new `TodoReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn submit(state: &mut TodoState, env: &TodoEnvironment) {
        if !state.can_submit() {
            tracing::debug!("Ignored submit: draft is blank");
            return;
        }

        let description = std::mem::take(&mut state.draft);
        let item = env.new_item(description);
        tracing::debug!(id = %item.id, "Todo added");
        state.items.insert(0, item);
    }

    fn toggle(state: &mut TodoState, id: TodoId) {
        match state.get_mut(&id) {
            Some(item) => {
                item.toggle();
                tracing::debug!(%id, completed = item.completed, "Todo toggled");
            },
            None => tracing::debug!(%id, "Ignored toggle: unknown todo"),
        }
    }

    fn remove(state: &mut TodoState, id: TodoId) {
        match state.items.iter().position(|item| item.id == id) {
            Some(index) if state.items[index].completed => {
                state.items.remove(index);
                tracing::debug!(%id, "Todo removed");
            },
            Some(_) => tracing::debug!(%id, "Ignored remove: todo is still active"),
            None => tracing::debug!(%id, "Ignored remove: unknown todo"),
        }
    }

    fn seed(state: &mut TodoState, descriptions: Vec<String>, env: &TodoEnvironment) {
        let seeded: Vec<TodoItem> = descriptions
            .into_iter()
            .filter(|description| !description.trim().is_empty())
            .map(|description| env.new_item(description))
            .collect();
        tracing::debug!(count = seeded.len(), "Todos seeded");
        state.items.splice(0..0, seeded);
    }
}

impl Reducer for TodoReducer {
    type State = TodoState;
    type Action = TodoAction;
    type Environment = TodoEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            TodoAction::DraftChanged { text } => state.draft = text,
            TodoAction::Submit => Self::submit(state, env),
            TodoAction::ToggleComplete { id } => Self::toggle(state, id),
            TodoAction::Remove { id } => Self::remove(state, id),
            TodoAction::Seed { descriptions } => Self::seed(state, descriptions, env),
        }

        SmallVec::new()
    }
}
