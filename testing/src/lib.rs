//! # Todo Widget Testing
//!
//! Testing utilities and helpers for the todo widget.
//!
//! This crate provides:
//! - Mock implementations of Environment traits
//! - A Given-When-Then harness for reducers
//! - Assertion helpers for effects
//! - [`Screen`], a query API over rendered element trees
//!
//! ## Example
//!
//! ```ignore
//! use todo_widget_testing::{Screen, test_clock};
//!
//! #[tokio::test]
//! async fn adds_an_item() {
//!     let store = TodoStore::new(TodoState::new(), TodoReducer::new(), test_env());
//!
//!     store.send(TodoAction::DraftChanged { text: "test".into() }).await?;
//!     store.send(TodoAction::Submit).await?;
//!
//!     let screen = Screen::new(store.state(view::render).await);
//!     screen.get_by_test_id("ready-list");
//! }
//! ```

use chrono::{DateTime, Utc};
use todo_widget_core::environment::Clock;


/// Queries over rendered element trees
pub mod screen;

/// Mock implementations of Environment traits
pub mod mocks {
    use super::{Clock, DateTime, Utc};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use todo_widget_testing::mocks::FixedClock;
    /// use todo_widget_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// assert_eq!(clock.now(), clock.now());
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    #[must_use]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(DateTime::<Utc>::UNIX_EPOCH + chrono::Duration::days(20_089))
    }
}

/// Install a tracing subscriber that writes through the test harness
///
/// Safe to call from every test; only the first call installs anything.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}

// Re-export commonly used items
pub use mocks::{FixedClock, test_clock};
pub use reducer_test::{ReducerTest, assertions};
pub use screen::Screen;
