//! # Todo Widget Runtime
//!
//! The Store runtime that coordinates reducer execution, effect handling,
//! and render notification.
//!
//! ## Core Components
//!
//! - **Store**: Owns state, runs the reducer, executes effects
//! - **Effect Executor**: Executes effect descriptions and feeds actions back to the reducer
//! - **Render revision**: A counter bumped after every processed action so a
//!   view layer can await the update before re-projecting state
//!
//! ## Example
//!
//! ```ignore
//! use todo_widget_runtime::Store;
//!
//! let store = Store::new(initial_state, my_reducer, environment);
//!
//! let before = store.revision();
//! store.send(Action::DoSomething).await?;
//! store.rendered(before).await;
//!
//! let value = store.state(|s| s.some_field).await;
//! ```

use todo_widget_core::{effect::Effect, reducer::Reducer};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::{RwLock, watch};

/// Error types for the Store runtime
pub mod error {
    use thiserror::Error;

    /// Errors that can occur during Store operations
    #[derive(Error, Debug)]
    pub enum StoreError {
        /// An effect task panicked or was cancelled
        #[error("Effect task failed: {0}")]
        TaskJoinError(#[from] tokio::task::JoinError),

        /// Effects kept feeding actions back past the configured depth
        #[error("Effect feedback exceeded depth {0}")]
        FeedbackLimit(usize),

        /// The store was unmounted and no longer accepts actions
        #[error("Store has been unmounted")]
        Unmounted,
    }
}

pub use error::StoreError;

/// Store configuration
///
/// # Example
///
/// ```
/// use todo_widget_runtime::StoreConfig;
///
/// let config = StoreConfig::default().with_max_feedback_depth(4);
/// assert_eq!(config.max_feedback_depth, 4);
/// ```
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// How many times effects may feed an action back for a single `send`
    pub max_feedback_depth: usize,
}

impl StoreConfig {
    /// Set the maximum feedback depth
    #[must_use]
    pub const fn with_max_feedback_depth(mut self, depth: usize) -> Self {
        self.max_feedback_depth = depth;
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            max_feedback_depth: 32,
        }
    }
}

/// Store module - The runtime for reducers
pub mod store {
    use super::{
        Arc, AtomicBool, Effect, Ordering, Reducer, RwLock, StoreConfig, StoreError, watch,
    };
    use futures::future::{BoxFuture, join_all};

    /// The Store - runtime coordinator for a reducer
    ///
    /// The Store manages:
    /// 1. State (behind `RwLock`, exclusively owned by this store)
    /// 2. Reducer (state transitions)
    /// 3. Environment (injected dependencies)
    /// 4. Effect execution (with feedback loop)
    /// 5. The render revision observers wait on
    ///
    /// Cloning a Store is cheap and yields a handle to the same state.
    pub struct Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        state: Arc<RwLock<S>>,
        reducer: Arc<R>,
        environment: Arc<E>,
        config: StoreConfig,
        unmounted: Arc<AtomicBool>,
        revision: Arc<watch::Sender<u64>>,
    }

    impl<S, A, E, R> Clone for Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        fn clone(&self) -> Self {
            Self {
                state: Arc::clone(&self.state),
                reducer: Arc::clone(&self.reducer),
                environment: Arc::clone(&self.environment),
                config: self.config.clone(),
                unmounted: Arc::clone(&self.unmounted),
                revision: Arc::clone(&self.revision),
            }
        }
    }

    impl<S, A, E, R> Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E> + Send + Sync + 'static,
        A: Send + 'static,
        S: Send + Sync + 'static,
        E: Send + Sync + 'static,
    {
        /// Create a new store with initial state, reducer, and environment
        #[must_use]
        pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
            Self::with_config(initial_state, reducer, environment, StoreConfig::default())
        }

        /// Create a new store with custom configuration
        #[must_use]
        pub fn with_config(
            initial_state: S,
            reducer: R,
            environment: E,
            config: StoreConfig,
        ) -> Self {
            let (revision, _) = watch::channel(0);

            Self {
                state: Arc::new(RwLock::new(initial_state)),
                reducer: Arc::new(reducer),
                environment: Arc::new(environment),
                config,
                unmounted: Arc::new(AtomicBool::new(false)),
                revision: Arc::new(revision),
            }
        }

        /// Send an action to the store
        ///
        /// The reducer runs under the write lock, then every returned effect
        /// is executed to completion (actions produced by effects are fed back
        /// in). Only after all of that does the render revision advance, so a
        /// single `send` is one atomic step from the view's point of view.
        ///
        /// # Errors
        ///
        /// - [`StoreError::Unmounted`] if [`unmount`](Self::unmount) was called
        /// - [`StoreError::TaskJoinError`] if an effect task panicked
        /// - [`StoreError::FeedbackLimit`] if effects recursed past the configured depth
        #[tracing::instrument(skip(self, action), name = "store_send")]
        pub async fn send(&self, action: A) -> Result<(), StoreError> {
            if self.unmounted.load(Ordering::Acquire) {
                tracing::warn!("Rejected action: store is unmounted");
                metrics::counter!("store.unmounted.rejected_actions").increment(1);
                return Err(StoreError::Unmounted);
            }

            let outcome = self.dispatch(action, 0).await;

            // State may have changed even if a later effect failed
            self.revision.send_modify(|revision| *revision += 1);
            tracing::trace!(revision = *self.revision.borrow(), "Render revision advanced");

            outcome
        }

        fn dispatch(&self, action: A, depth: usize) -> BoxFuture<'_, Result<(), StoreError>> {
            Box::pin(async move {
                if depth > self.config.max_feedback_depth {
                    tracing::error!(depth, "Effect feedback loop exceeded configured depth");
                    return Err(StoreError::FeedbackLimit(self.config.max_feedback_depth));
                }

                metrics::counter!("store.actions.total").increment(1);

                let effects = {
                    let mut state = self.state.write().await;

                    let span = tracing::debug_span!("reducer_execution", depth);
                    let _enter = span.enter();

                    let start = std::time::Instant::now();
                    let effects = self.reducer.reduce(&mut *state, action, &self.environment);
                    metrics::histogram!("store.reducer.duration_seconds")
                        .record(start.elapsed().as_secs_f64());

                    tracing::trace!("Reducer completed, returned {} effects", effects.len());
                    effects
                };

                for effect in effects {
                    self.execute(effect, depth).await?;
                }
                Ok(())
            })
        }

        fn execute(&self, effect: Effect<A>, depth: usize) -> BoxFuture<'_, Result<(), StoreError>> {
            Box::pin(async move {
                match effect {
                    Effect::None => Ok(()),
                    Effect::Sequential(effects) => {
                        for effect in effects {
                            self.execute(effect, depth).await?;
                        }
                        Ok(())
                    },
                    Effect::Parallel(effects) => join_all(
                        effects.into_iter().map(|effect| self.execute(effect, depth)),
                    )
                    .await
                    .into_iter()
                    .collect(),
                    Effect::Future(future) => {
                        if let Some(action) = tokio::spawn(future).await? {
                            tracing::trace!("Effect produced feedback action");
                            self.dispatch(action, depth + 1).await?;
                        }
                        Ok(())
                    },
                }
            })
        }

        /// Read current state via a closure
        ///
        /// ```ignore
        /// let count = store.state(|s| s.items.len()).await;
        /// ```
        pub async fn state<F, T>(&self, f: F) -> T
        where
            F: FnOnce(&S) -> T,
        {
            let state = self.state.read().await;
            f(&*state)
        }

        /// Number of actions fully processed so far
        #[must_use]
        pub fn revision(&self) -> u64 {
            *self.revision.borrow()
        }

        /// Watch the render revision
        #[must_use]
        pub fn subscribe(&self) -> watch::Receiver<u64> {
            self.revision.subscribe()
        }

        /// Wait until the render revision moves past `after`
        ///
        /// Returns the revision observed. Returns immediately if the store is
        /// already past `after`.
        pub async fn rendered(&self, after: u64) -> u64 {
            let mut receiver = self.revision.subscribe();
            match receiver.wait_for(|revision| *revision > after).await {
                Ok(revision) => *revision,
                Err(_) => self.revision(),
            }
        }

        /// Discard the component: subsequent sends are rejected
        pub fn unmount(&self) {
            if !self.unmounted.swap(true, Ordering::AcqRel) {
                tracing::debug!("Store unmounted");
                self.revision.send_modify(|revision| *revision += 1);
            }
        }

        /// Whether the store still accepts actions
        #[must_use]
        pub fn is_mounted(&self) -> bool {
            !self.unmounted.load(Ordering::Acquire)
        }
    }
}

pub use store::Store;
