//! Property tests for the todo reducer.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic

use proptest::prelude::*;
use proptest::test_runner::Config;
use std::collections::HashSet;
use std::sync::Arc;
use todo_widget::{TodoAction, TodoEnvironment, TodoId, TodoReducer, TodoState};
use todo_widget_core::environment::MonotonicIds;
use todo_widget_core::reducer::Reducer;
use todo_widget_testing::test_clock;

#[derive(Debug, Clone)]
enum Op {
    Type(String),
    Submit,
    Toggle(usize),
    Remove(usize),
    Unknown,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => "[ a-z]{0,8}".prop_map(Op::Type),
        3 => Just(Op::Submit),
        2 => any::<usize>().prop_map(Op::Toggle),
        2 => any::<usize>().prop_map(Op::Remove),
        1 => Just(Op::Unknown),
    ]
}

fn env() -> TodoEnvironment {
    TodoEnvironment::new(Arc::new(test_clock()), Arc::new(MonotonicIds::new()))
}

/// Pick an existing item by index, wrapping around
fn pick(state: &TodoState, index: usize) -> Option<TodoId> {
    (!state.items.is_empty()).then(|| state.items[index % state.items.len()].id)
}

fn to_action(state: &TodoState, op: &Op) -> Option<TodoAction> {
    match op {
        Op::Type(text) => Some(TodoAction::DraftChanged { text: text.clone() }),
        Op::Submit => Some(TodoAction::Submit),
        Op::Toggle(i) => pick(state, *i).map(|id| TodoAction::ToggleComplete { id }),
        Op::Remove(i) => pick(state, *i).map(|id| TodoAction::Remove { id }),
        Op::Unknown => Some(TodoAction::ToggleComplete {
            id: TodoId::from_u128(u128::MAX),
        }),
    }
}

proptest! {
    #![proptest_config(Config::with_cases(256))]

    #[test]
    fn every_nonblank_submit_adds_one_item(descriptions in prop::collection::vec("[ a-z]{0,6}", 0..24)) {
        let reducer = TodoReducer::new();
        let env = env();
        let mut state = TodoState::new();

        let mut expected = 0;
        for description in descriptions {
            let blank = description.trim().is_empty();
            reducer.reduce(&mut state, TodoAction::DraftChanged { text: description.clone() }, &env);
            reducer.reduce(&mut state, TodoAction::Submit, &env);

            if blank {
                prop_assert_eq!(&state.draft, &description);
            } else {
                expected += 1;
                prop_assert_eq!(&state.items[0].description, &description);
                prop_assert!(state.draft.is_empty());
            }
            prop_assert_eq!(state.count(), expected);
        }

        let ids: HashSet<TodoId> = state.items.iter().map(|item| item.id).collect();
        prop_assert_eq!(ids.len(), state.count());
    }

    #[test]
    fn items_partition_into_ready_and_completed(ops in prop::collection::vec(op(), 0..64)) {
        let reducer = TodoReducer::new();
        let env = env();
        let mut state = TodoState::new();

        for op in &ops {
            let before = state.clone();
            let Some(action) = to_action(&state, op) else { continue };
            let effects = reducer.reduce(&mut state, action.clone(), &env);
            prop_assert!(effects.is_empty());

            match action {
                TodoAction::Remove { id } if before.get(&id).is_some_and(|item| !item.completed) => {
                    prop_assert_eq!(&state, &before);
                },
                TodoAction::Remove { id } => {
                    prop_assert!(!state.exists(&id));
                    prop_assert_eq!(state.count() + 1, before.count());
                },
                TodoAction::ToggleComplete { id } if !before.exists(&id) => {
                    prop_assert_eq!(&state, &before);
                },
                _ => {},
            }

            let ready: HashSet<TodoId> = state.active_items().map(|item| item.id).collect();
            let completed: HashSet<TodoId> = state.completed_items().map(|item| item.id).collect();
            prop_assert!(ready.is_disjoint(&completed));
            prop_assert_eq!(ready.len() + completed.len(), state.count());
            prop_assert_eq!(completed.len(), state.completed_count());
        }
    }

    #[test]
    fn toggling_twice_restores_state(
        setup in prop::collection::vec(op(), 0..32),
        index in any::<usize>(),
    ) {
        let reducer = TodoReducer::new();
        let env = env();
        let mut state = TodoState::new();
        for op in &setup {
            if let Some(action) = to_action(&state, op) {
                reducer.reduce(&mut state, action, &env);
            }
        }

        let before = state.clone();
        if let Some(id) = pick(&state, index) {
            reducer.reduce(&mut state, TodoAction::ToggleComplete { id }, &env);
            prop_assert_ne!(&state, &before);
            reducer.reduce(&mut state, TodoAction::ToggleComplete { id }, &env);
        }
        prop_assert_eq!(state, before);
    }
}
