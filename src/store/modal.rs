use crate::api::{genre_names, MediaItem};
use crate::store::action::ModalAction;
use crate::store::favourites::FavouritesState;
use crate::store::reducer::Reducer;
use crate::util::year_only;

/// Snapshot shown in the detail modal.
///
/// Built by the caller (see [`MediaDetail::compose`]); the reducer stores it
/// verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaDetail {
    pub item: MediaItem,
    pub fallback_title: String,
    pub genre_names: Vec<String>,
    pub release_year: Option<String>,
    pub is_favourite: bool,
}

impl MediaDetail {
    /// Copy `item` and resolve the display fields a detail view needs.
    pub fn compose(item: &MediaItem, favourites: &FavouritesState) -> Self {
        Self {
            item: item.clone(),
            fallback_title: item.display_title().to_string(),
            genre_names: genre_names(&item.genre_ids)
                .into_iter()
                .map(str::to_string)
                .collect(),
            release_year: item.date().and_then(year_only).map(str::to_string),
            is_favourite: favourites.contains(item.id),
        }
    }
}

/// The single, global "currently inspected item".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionState {
    pub is_open: bool,
    pub content: Option<MediaDetail>,
}

impl Reducer for SelectionState {
    type Action = ModalAction;

    fn apply(&self, action: ModalAction) -> Option<Self> {
        match action {
            // Opening while open replaces the content; there is no stack.
            ModalAction::Show(detail) => Some(Self {
                is_open: true,
                content: Some(*detail),
            }),
            ModalAction::Hide if !self.is_open && self.content.is_none() => None,
            ModalAction::Hide => Some(Self::default()),
        }
    }
}
