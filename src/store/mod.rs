//! Application state and the single-writer store that owns it.
//!
//! [`AppState`] is an immutable snapshot: each domain lives behind its own
//! `Arc`, and reducing an action replaces only the `Arc` of the domain it
//! touches. [`Store`] owns the current snapshot together with the channel
//! background tasks use to report their terminal actions.

mod action;
mod auth;
mod favourites;
mod modal;
mod reducer;
mod search;
pub mod selectors;
mod slice;

pub use action::{Action, AuthAction, FavouritesAction, FetchMode, ModalAction, SearchAction, SliceAction};
pub use auth::{AuthState, Credentials, SignUpDetails, User};
pub use favourites::FavouritesState;
pub use modal::{MediaDetail, SelectionState};
pub use reducer::{reduce, Reducer};
pub use search::SearchState;
pub use selectors::{Selectors, SliceMeta};
pub use slice::{AsyncSlice, CategorySlice, Status};

use crate::registry::{self, CategoryKey};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Capacity of the action channel between background tasks and the store.
const CHANNEL_CAPACITY: usize = 32;

/// Snapshot of every reducer domain.
///
/// Cloning is cheap (reference counts only). Two snapshots that share every
/// `Arc` are indistinguishable to selectors.
#[derive(Debug, Clone)]
pub struct AppState {
    categories: BTreeMap<CategoryKey, Arc<CategorySlice>>,
    pub search: Arc<SearchState>,
    pub favourites: Arc<FavouritesState>,
    pub selection: Arc<SelectionState>,
    pub auth: Arc<AuthState>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    /// Initial state: one idle slice per registered category.
    pub fn new() -> Self {
        Self {
            categories: registry::all()
                .map(|entry| (entry.key, Arc::new(CategorySlice::default())))
                .collect(),
            search: Arc::default(),
            favourites: Arc::default(),
            selection: Arc::default(),
            auth: Arc::default(),
        }
    }

    pub fn category(&self, key: &CategoryKey) -> Option<&Arc<CategorySlice>> {
        self.categories.get(key)
    }

    pub fn categories(&self) -> impl Iterator<Item = (&CategoryKey, &Arc<CategorySlice>)> {
        self.categories.iter()
    }

    /// Apply `action` to the one domain it addresses.
    ///
    /// Every other domain keeps its `Arc`. An action for an unregistered
    /// category is dropped.
    pub fn reduce(&self, action: Action) -> AppState {
        let mut next = self.clone();
        match action {
            Action::Category {
                key,
                generation,
                action,
            } => match self.categories.get(&key) {
                Some(slice) if !slice.accepts(generation) => {
                    tracing::debug!(
                        slice = %key,
                        expected = slice.generation,
                        got = ?generation,
                        "Ignoring stale category result (generation mismatch)"
                    );
                }
                Some(slice) => {
                    next.categories.insert(key, reduce(slice, action));
                }
                None => {
                    tracing::warn!(slice = %key, "Dropping action for unregistered category");
                }
            },
            Action::Search(action) => next.search = reduce(&self.search, action),
            Action::Favourites(action) => next.favourites = reduce(&self.favourites, action),
            Action::Modal(action) => next.selection = reduce(&self.selection, action),
            Action::Auth(action) => next.auth = reduce(&self.auth, action),
        }
        next
    }

    /// True when both snapshots share every domain `Arc`.
    pub fn ptr_eq(&self, other: &AppState) -> bool {
        Arc::ptr_eq(&self.search, &other.search)
            && Arc::ptr_eq(&self.favourites, &other.favourites)
            && Arc::ptr_eq(&self.selection, &other.selection)
            && Arc::ptr_eq(&self.auth, &other.auth)
            && self.categories.len() == other.categories.len()
            && self
                .categories
                .iter()
                .zip(other.categories.iter())
                .all(|((ka, a), (kb, b))| ka == kb && Arc::ptr_eq(a, b))
    }
}

/// Root context: the current [`AppState`] plus the action channel.
///
/// The store is the only writer. Background tasks hold a [`mpsc::Sender`]
/// and their actions are applied, in arrival order, when the owner drains
/// the channel.
pub struct Store {
    state: AppState,
    tx: mpsc::Sender<Action>,
    rx: mpsc::Receiver<Action>,
    needs_render: bool,
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl Store {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        Self {
            state: AppState::new(),
            tx,
            rx,
            needs_render: true,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Apply an action synchronously.
    pub fn dispatch(&mut self, action: impl Into<Action>) {
        let action = action.into();
        tracing::trace!(action = %action, "dispatch");
        let next = self.state.reduce(action);
        if !next.ptr_eq(&self.state) {
            self.needs_render = true;
        }
        self.state = next;
    }

    /// Sender for background tasks.
    pub fn sender(&self) -> mpsc::Sender<Action> {
        self.tx.clone()
    }

    /// Apply every action already queued on the channel. Returns how many
    /// were applied.
    pub fn drain_pending(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(action) = self.rx.try_recv() {
            self.dispatch(action);
            applied += 1;
        }
        applied
    }

    /// Apply actions as they arrive until every task in `handles` finished,
    /// then drain whatever they queued last.
    pub async fn run_until_settled(&mut self, handles: Vec<JoinHandle<()>>) {
        let all_done = futures::future::join_all(handles);
        tokio::pin!(all_done);

        loop {
            tokio::select! {
                biased;

                Some(action) = self.rx.recv() => {
                    self.dispatch(action);
                }

                results = &mut all_done => {
                    for result in results {
                        if let Err(e) = result {
                            tracing::error!(error = %e, "Background task failed to complete");
                        }
                    }
                    break;
                }
            }
        }

        self.drain_pending();
    }

    /// Whether state changed since the last call.
    pub fn take_needs_render(&mut self) -> bool {
        std::mem::take(&mut self.needs_render)
    }
}
