use crate::api::MediaItem;
use crate::store::action::SearchAction;
use crate::store::reducer::Reducer;
use crate::store::slice::Status;

/// Search box text and the results of the latest search.
///
/// `generation` advances whenever the input text changes. Only terminal
/// actions tagged with the current generation are committed, so a slow
/// response for an older query can never replace newer results.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchState {
    pub query_text: String,
    pub results: Vec<MediaItem>,
    pub status: Status,
    pub error: Option<String>,
    pub generation: u64,
}

impl SearchState {
    fn is_current(&self, generation: u64) -> bool {
        if generation != self.generation {
            tracing::debug!(
                expected = self.generation,
                got = generation,
                query = %self.query_text,
                "Ignoring stale search result (generation mismatch)"
            );
            return false;
        }
        true
    }

    /// Status once the in-flight search, if any, has been invalidated.
    fn settled_status(&self) -> Status {
        match self.status {
            Status::Loading if self.results.is_empty() => Status::Idle,
            Status::Loading => Status::Loaded,
            status => status,
        }
    }
}

impl Reducer for SearchState {
    type Action = SearchAction;

    fn apply(&self, action: SearchAction) -> Option<Self> {
        match action {
            // A non-blank input is followed by `Request`, which sets `Loading` again.
            SearchAction::ChangeInput(text) => Some(Self {
                query_text: text,
                status: self.settled_status(),
                generation: self.generation.wrapping_add(1),
                ..self.clone()
            }),
            // Results stay on screen until the view itself goes away.
            SearchAction::ClearInput => Some(Self {
                query_text: String::new(),
                status: self.settled_status(),
                generation: self.generation.wrapping_add(1),
                ..self.clone()
            }),
            SearchAction::Request => Some(Self {
                status: Status::Loading,
                ..self.clone()
            }),
            SearchAction::Success { generation, items } => {
                self.is_current(generation).then(|| Self {
                    results: items,
                    status: Status::Loaded,
                    error: None,
                    ..self.clone()
                })
            }
            SearchAction::Failure {
                generation,
                message,
            } => self.is_current(generation).then(|| Self {
                results: Vec::new(),
                status: Status::Failed,
                error: Some(message),
                ..self.clone()
            }),
        }
    }
}
