use crate::api::{MediaId, MediaItem};
use crate::store::action::FavouritesAction;
use crate::store::reducer::Reducer;
use std::collections::HashSet;

/// The user's favourites, most recently added last.
///
/// `ids` indexes `items` so membership checks do not scan the list; the two
/// are only ever changed together, through the reducer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FavouritesState {
    items: Vec<MediaItem>,
    ids: HashSet<MediaId>,
}

impl FavouritesState {
    pub fn items(&self) -> &[MediaItem] {
        &self.items
    }

    pub fn contains(&self, id: MediaId) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Reducer for FavouritesState {
    type Action = FavouritesAction;

    /// Add and remove are idempotent: a duplicate add or a remove of an
    /// absent id leaves the state untouched.
    fn apply(&self, action: FavouritesAction) -> Option<Self> {
        match action {
            FavouritesAction::Add(item) => {
                if self.contains(item.id) {
                    return None;
                }
                let mut next = self.clone();
                next.ids.insert(item.id);
                next.items.push(MediaItem {
                    is_favourite: true,
                    ..item
                });
                Some(next)
            }
            FavouritesAction::Remove(id) => {
                if !self.contains(id) {
                    return None;
                }
                let mut next = self.clone();
                next.ids.remove(&id);
                next.items.retain(|item| item.id != id);
                Some(next)
            }
        }
    }
}
