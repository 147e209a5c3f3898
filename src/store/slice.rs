//! Per-category async slices and their reducer.

use crate::api::{MediaItem, Page};
use crate::store::action::{FetchMode, SliceAction};
use crate::store::reducer::Reducer;

/// Lifecycle of an async slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed,
}

/// `{status, data, error}` for one async data source, plus page bookkeeping.
///
/// Invariants:
/// - `Failed` implies `data` is empty and `error` is set.
/// - `data` is in page-fetch order.
/// - `last_page == 0` means nothing has been loaded since the last fresh
///   request or failure.
/// - `generation` advances on every request and survives every other
///   transition.
#[derive(Debug, Clone, PartialEq)]
pub struct AsyncSlice<T> {
    pub status: Status,
    pub data: Vec<T>,
    pub error: Option<String>,
    pub last_page: u32,
    pub total_pages: u32,
    pub generation: u64,
}

/// The slice type used for every category row.
pub type CategorySlice = AsyncSlice<MediaItem>;

impl<T> Default for AsyncSlice<T> {
    fn default() -> Self {
        Self {
            status: Status::Idle,
            data: Vec::new(),
            error: None,
            last_page: 0,
            total_pages: 0,
            generation: 0,
        }
    }
}

impl<T> AsyncSlice<T> {
    pub fn is_loading(&self) -> bool {
        self.status == Status::Loading
    }

    /// First page not yet loaded, while the API reports more pages.
    pub fn next_page(&self) -> Option<u32> {
        (self.last_page > 0 && self.last_page < self.total_pages).then(|| self.last_page + 1)
    }

    /// Whether a load-more request makes sense right now.
    pub fn can_load_more(&self) -> bool {
        self.status == Status::Loaded && self.next_page().is_some()
    }

    /// Whether a result tagged with `generation` answers the latest request.
    /// Untagged results always apply.
    pub fn accepts(&self, generation: Option<u64>) -> bool {
        generation.map_or(true, |g| g == self.generation)
    }
}

impl<T: Clone> Reducer for AsyncSlice<T> {
    type Action = SliceAction<T>;

    fn apply(&self, action: SliceAction<T>) -> Option<Self> {
        let next = match action {
            SliceAction::Request(FetchMode::Fresh) => Self {
                status: Status::Loading,
                generation: self.generation.wrapping_add(1),
                ..Self::default()
            },
            SliceAction::Request(FetchMode::LoadMore) => Self {
                status: Status::Loading,
                error: None,
                generation: self.generation.wrapping_add(1),
                ..self.clone()
            },
            SliceAction::Success(Page {
                items,
                page,
                total_pages,
            }) => Self {
                status: Status::Loaded,
                data: items,
                error: None,
                last_page: page,
                total_pages,
                generation: self.generation,
            },
            SliceAction::LoadMoreSuccess(Page {
                items,
                page,
                total_pages,
            }) => {
                let mut data = Vec::with_capacity(self.data.len() + items.len());
                data.extend_from_slice(&self.data);
                data.extend(items);
                Self {
                    status: Status::Loaded,
                    data,
                    error: None,
                    last_page: page.max(self.last_page),
                    total_pages,
                    generation: self.generation,
                }
            }
            SliceAction::Failure(message) => Self {
                status: Status::Failed,
                error: Some(message),
                generation: self.generation,
                ..Self::default()
            },
        };
        Some(next)
    }
}
