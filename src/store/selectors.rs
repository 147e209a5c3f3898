//! Read-only projections from [`AppState`] to view-ready data.
//!
//! Memoized selectors cache on the identity of their input `Arc`, never on
//! deep equality. Reducers return the same `Arc` for a no-op, so an untouched
//! slice never triggers a recomputation.

use crate::api::MediaItem;
use crate::registry::CategoryKey;
use crate::store::auth::User;
use crate::store::favourites::FavouritesState;
use crate::store::modal::SelectionState;
use crate::store::search::SearchState;
use crate::store::slice::{CategorySlice, Status};
use crate::store::AppState;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::Arc;

/// Single-entry cache keyed by input pointer identity.
///
/// Holds on to the input `Arc` so its allocation cannot be reused by a new
/// value while the cached output still refers to it.
pub struct Memo<I, O> {
    input: Option<Arc<I>>,
    output: Option<O>,
    recomputations: usize,
}

impl<I, O> Default for Memo<I, O> {
    fn default() -> Self {
        Self {
            input: None,
            output: None,
            recomputations: 0,
        }
    }
}

impl<I, O: Clone> Memo<I, O> {
    pub fn get(&mut self, input: &Arc<I>, compute: impl FnOnce(&I) -> O) -> O {
        if let (Some(cached_input), Some(output)) = (&self.input, &self.output) {
            if Arc::ptr_eq(cached_input, input) {
                return output.clone();
            }
        }
        let output = compute(input);
        self.input = Some(Arc::clone(input));
        self.output = Some(output.clone());
        self.recomputations += 1;
        output
    }

    /// Number of times `compute` has run.
    pub fn recomputations(&self) -> usize {
        self.recomputations
    }
}

/// Row metadata for a view: what to render besides the items themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SliceMeta {
    pub status: Status,
    pub error: Option<String>,
    pub len: usize,
    pub has_more: bool,
}

impl SliceMeta {
    fn of(slice: &CategorySlice) -> Self {
        Self {
            status: slice.status,
            error: slice.error.clone(),
            len: slice.data.len(),
            has_more: slice.can_load_more(),
        }
    }
}

#[derive(Default)]
struct CategoryMemos {
    data: Memo<CategorySlice, Arc<[MediaItem]>>,
    meta: Memo<CategorySlice, Arc<SliceMeta>>,
}

/// Memo caches for every selector a view may call repeatedly.
///
/// Category caches are kept for the most recently read rows only; an evicted
/// row simply recomputes on its next read.
pub struct Selectors {
    categories: LruCache<CategoryKey, CategoryMemos>,
    favourites: Memo<FavouritesState, Arc<[MediaItem]>>,
    search_results: Memo<SearchState, Arc<[MediaItem]>>,
}

impl Selectors {
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            categories: LruCache::new(capacity),
            favourites: Memo::default(),
            search_results: Memo::default(),
        }
    }

    /// Items of one category row; `None` for an unregistered key.
    pub fn category_data(&mut self, state: &AppState, key: &CategoryKey) -> Option<Arc<[MediaItem]>> {
        let slice = select_slice(state, key)?;
        let memos = self.categories.get_or_insert_mut(*key, CategoryMemos::default);
        Some(memos.data.get(slice, |s| Arc::from(s.data.as_slice())))
    }

    pub fn category_meta(&mut self, state: &AppState, key: &CategoryKey) -> Option<Arc<SliceMeta>> {
        let slice = select_slice(state, key)?;
        let memos = self.categories.get_or_insert_mut(*key, CategoryMemos::default);
        Some(memos.meta.get(slice, |s| Arc::new(SliceMeta::of(s))))
    }

    pub fn favourites(&mut self, state: &AppState) -> Arc<[MediaItem]> {
        self.favourites
            .get(&state.favourites, |f| Arc::from(f.items()))
    }

    pub fn search_results(&mut self, state: &AppState) -> Arc<[MediaItem]> {
        self.search_results
            .get(&state.search, |s| Arc::from(s.results.as_slice()))
    }

    /// Recomputation count of the data memo for `key`, if it is cached.
    pub fn category_recomputations(&self, key: &CategoryKey) -> Option<usize> {
        self.categories.peek(key).map(|m| m.data.recomputations())
    }

    pub fn favourites_recomputations(&self) -> usize {
        self.favourites.recomputations()
    }

    pub fn search_recomputations(&self) -> usize {
        self.search_results.recomputations()
    }
}

pub fn select_slice<'a>(state: &'a AppState, key: &CategoryKey) -> Option<&'a Arc<CategorySlice>> {
    state.category(key)
}

pub fn select_modal(state: &AppState) -> &SelectionState {
    &state.selection
}

pub fn select_current_user(state: &AppState) -> Option<&User> {
    state.auth.current_user.as_ref()
}
