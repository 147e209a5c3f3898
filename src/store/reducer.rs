use std::sync::Arc;

/// A pure state transition for one slice of the store.
///
/// `apply` returns `None` when the action leaves the state untouched. The
/// [`reduce`] wrapper turns that into the *same* `Arc`, which is what lets
/// memoized selectors use pointer identity as their recompute trigger.
pub trait Reducer: Sized {
    type Action;

    fn apply(&self, action: Self::Action) -> Option<Self>;
}

/// Apply `action` to `state`, sharing the original allocation on a no-op.
pub fn reduce<S: Reducer>(state: &Arc<S>, action: S::Action) -> Arc<S> {
    match state.apply(action) {
        Some(next) => Arc::new(next),
        None => Arc::clone(state),
    }
}
