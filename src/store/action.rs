//! Action vocabulary.
//!
//! Every state transition is requested through one of these messages. Each
//! reducer domain has its own closed enum; [`Action`] routes a message to
//! exactly one domain.

use crate::api::{MediaId, MediaItem, Page};
use crate::registry::CategoryKey;
use crate::store::auth::{Credentials, SignUpDetails, User};
use crate::store::modal::MediaDetail;
use std::fmt;

/// Whether a category request replaces the row or extends it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchMode {
    /// First page: previous data is cleared while loading.
    Fresh,
    /// Next page: previous data stays visible while loading.
    LoadMore,
}

/// Transitions of an [`AsyncSlice`](crate::store::AsyncSlice).
#[derive(Debug, Clone, PartialEq)]
pub enum SliceAction<T> {
    Request(FetchMode),
    Success(Page<T>),
    LoadMoreSuccess(Page<T>),
    Failure(String),
}

/// Search input and result lifecycle.
///
/// Terminal actions carry the generation of the search that produced them;
/// the reducer ignores any generation other than the current one.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchAction {
    ChangeInput(String),
    ClearInput,
    Request,
    Success {
        generation: u64,
        items: Vec<MediaItem>,
    },
    Failure {
        generation: u64,
        message: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum FavouritesAction {
    Add(MediaItem),
    Remove(MediaId),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ModalAction {
    Show(Box<MediaDetail>),
    Hide,
}

/// Not `Clone`: credentials are moved, never copied.
#[derive(Debug)]
pub enum AuthAction {
    CheckSession,
    EmailSignInStart(Credentials),
    GoogleSignInStart,
    AnonymousSignInStart,
    SignInSuccess(User),
    SignInFailure(String),
    SignOutStart,
    SignOutSuccess,
    SignOutFailure(String),
    SignUpStart(SignUpDetails),
    SignUpSuccess {
        user: User,
        display_name: Option<String>,
    },
    SignUpFailure(String),
}

/// Root message type accepted by [`Store::dispatch`](crate::store::Store::dispatch).
#[derive(Debug)]
pub enum Action {
    Category {
        key: CategoryKey,
        /// Request generation a terminal action answers; `None` always applies.
        generation: Option<u64>,
        action: SliceAction<MediaItem>,
    },
    Search(SearchAction),
    Favourites(FavouritesAction),
    Modal(ModalAction),
    Auth(AuthAction),
}

impl Action {
    /// Tag a category action with the request generation it answers.
    /// Other actions are returned unchanged.
    pub fn for_generation(self, generation: u64) -> Self {
        match self {
            Action::Category { key, action, .. } => Action::Category {
                key,
                generation: Some(generation),
                action,
            },
            other => other,
        }
    }
}

impl From<SearchAction> for Action {
    fn from(action: SearchAction) -> Self {
        Action::Search(action)
    }
}

impl From<FavouritesAction> for Action {
    fn from(action: FavouritesAction) -> Self {
        Action::Favourites(action)
    }
}

impl From<ModalAction> for Action {
    fn from(action: ModalAction) -> Self {
        Action::Modal(action)
    }
}

impl From<AuthAction> for Action {
    fn from(action: AuthAction) -> Self {
        Action::Auth(action)
    }
}

/// Writes the conventional action-type name, e.g. `FETCH_ACTION_MOVIES_REQUEST`.
impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Category { key, action, .. } => {
                let stem = key.action_stem();
                match action {
                    SliceAction::Request(FetchMode::Fresh) => write!(f, "FETCH_{}_REQUEST", stem),
                    SliceAction::Request(FetchMode::LoadMore) => {
                        write!(f, "LOAD_MORE_{}_REQUEST", stem)
                    }
                    SliceAction::Success(_) => write!(f, "FETCH_{}_SUCCESS", stem),
                    SliceAction::LoadMoreSuccess(_) => write!(f, "LOAD_MORE_{}_SUCCESS", stem),
                    SliceAction::Failure(_) => write!(f, "FETCH_{}_FAILURE", stem),
                }
            }
            Action::Search(action) => f.write_str(match action {
                SearchAction::ChangeInput(_) => "CHANGE_SEARCH_INPUT_VALUE",
                SearchAction::ClearInput => "CLEAR_SEARCH_INPUT_VALUE",
                SearchAction::Request => "FETCH_SEARCH_RESULTS_REQUEST",
                SearchAction::Success { .. } => "FETCH_SEARCH_RESULTS_SUCCESS",
                SearchAction::Failure { .. } => "FETCH_SEARCH_RESULTS_FAILURE",
            }),
            Action::Favourites(action) => f.write_str(match action {
                FavouritesAction::Add(_) => "ADD_TO_FAVOURITES",
                FavouritesAction::Remove(_) => "REMOVE_FROM_FAVOURITES",
            }),
            Action::Modal(action) => f.write_str(match action {
                ModalAction::Show(_) => "SHOW_MODAL_DETAILS",
                ModalAction::Hide => "HIDE_MODAL_DETAILS",
            }),
            Action::Auth(action) => f.write_str(match action {
                AuthAction::CheckSession => "CHECK_USER_SESSION",
                AuthAction::EmailSignInStart(_) => "EMAIL_SIGN_IN_START",
                AuthAction::GoogleSignInStart => "GOOGLE_SIGN_IN_START",
                AuthAction::AnonymousSignInStart => "ANONYMOUS_SIGN_IN_START",
                AuthAction::SignInSuccess(_) => "SIGN_IN_SUCCESS",
                AuthAction::SignInFailure(_) => "SIGN_IN_FAILURE",
                AuthAction::SignOutStart => "SIGN_OUT_START",
                AuthAction::SignOutSuccess => "SIGN_OUT_SUCCESS",
                AuthAction::SignOutFailure(_) => "SIGN_OUT_FAILURE",
                AuthAction::SignUpStart(_) => "SIGN_UP_START",
                AuthAction::SignUpSuccess { .. } => "SIGN_UP_SUCCESS",
                AuthAction::SignUpFailure(_) => "SIGN_UP_FAILURE",
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::ContentType;

    #[test]
    fn test_category_action_names() {
        let key = CategoryKey::new(ContentType::Movies, "action");
        assert_eq!(key.request().to_string(), "FETCH_ACTION_MOVIES_REQUEST");
        assert_eq!(
            key.load_more_request().to_string(),
            "LOAD_MORE_ACTION_MOVIES_REQUEST"
        );
        assert_eq!(
            key.success(Page::single(vec![])).to_string(),
            "FETCH_ACTION_MOVIES_SUCCESS"
        );
        assert_eq!(
            key.load_more_success(Page::single(vec![])).to_string(),
            "LOAD_MORE_ACTION_MOVIES_SUCCESS"
        );
        assert_eq!(key.failure("boom").to_string(), "FETCH_ACTION_MOVIES_FAILURE");
    }

    #[test]
    fn test_domain_action_names() {
        assert_eq!(
            Action::from(SearchAction::ClearInput).to_string(),
            "CLEAR_SEARCH_INPUT_VALUE"
        );
        assert_eq!(
            Action::from(FavouritesAction::Remove(5)).to_string(),
            "REMOVE_FROM_FAVOURITES"
        );
        assert_eq!(Action::from(ModalAction::Hide).to_string(), "HIDE_MODAL_DETAILS");
        assert_eq!(
            Action::from(AuthAction::CheckSession).to_string(),
            "CHECK_USER_SESSION"
        );
    }
}
