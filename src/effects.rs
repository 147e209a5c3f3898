//! Async orchestration: network work that ends in exactly one terminal action.
//!
//! Each call dispatches its request action synchronously on the [`Store`],
//! then spawns a task that performs the HTTP call and reports the outcome
//! over the store's channel. A task writes to the one slice it was started
//! for and sends a single terminal action, even if it panics.

use crate::api::MediaApi;
use crate::registry::{CategoryEntry, ContentType};
use crate::store::{Action, SearchAction, Store};
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Run `future`, turning a panic into an error message.
async fn catch_task_panic<F, T>(future: F) -> Result<T, String>
where
    F: std::future::Future<Output = T>,
{
    AssertUnwindSafe(future).catch_unwind().await.map_err(|panic| {
        if let Some(s) = panic.downcast_ref::<&'static str>() {
            s.to_string()
        } else if let Some(s) = panic.downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        }
    })
}

async fn send(tx: &mpsc::Sender<Action>, action: Action) {
    let name = action.to_string();
    if let Err(e) = tx.send(action).await {
        tracing::warn!(error = %e, action = %name, "Channel send failed (receiver dropped)");
    }
}

/// Spawns fetches against the media API on behalf of a [`Store`].
#[derive(Debug, Clone)]
pub struct Effects {
    api: MediaApi,
    tx: mpsc::Sender<Action>,
}

impl Effects {
    pub fn new(api: MediaApi, store: &Store) -> Self {
        Self {
            api,
            tx: store.sender(),
        }
    }

    /// Fresh fetch of a row: clears it, then loads page 1.
    pub fn fetch_category(&self, store: &mut Store, entry: &'static CategoryEntry) -> JoinHandle<()> {
        store.dispatch(entry.key.request());
        self.spawn_page(store, entry, 1)
    }

    /// Load the next unseen page of a row.
    ///
    /// Returns `None` without dispatching anything when the row is loading,
    /// has failed, or has no pages left.
    pub fn load_more(&self, store: &mut Store, entry: &'static CategoryEntry) -> Option<JoinHandle<()>> {
        let slice = entry.select(store.state())?;
        let page = match slice.next_page() {
            Some(page) if slice.can_load_more() => page,
            _ => {
                tracing::debug!(
                    slice = %entry.key,
                    status = ?slice.status,
                    last_page = slice.last_page,
                    total_pages = slice.total_pages,
                    "Skipping load-more"
                );
                return None;
            }
        };

        store.dispatch(entry.key.load_more_request());
        Some(self.spawn_page(store, entry, page))
    }

    /// Fresh fetch of every row of a content type.
    pub fn fetch_rows(&self, store: &mut Store, content: ContentType) -> Vec<JoinHandle<()>> {
        content
            .entries()
            .iter()
            .map(|entry| self.fetch_category(store, entry))
            .collect()
    }

    /// Update the search text and, unless it is blank, search for it.
    ///
    /// The task is tagged with the generation the text change produced. If
    /// the text changes again before it resolves, its result is discarded
    /// by the reducer.
    pub fn search(&self, store: &mut Store, text: &str) -> Option<JoinHandle<()>> {
        store.dispatch(SearchAction::ChangeInput(text.to_string()));
        let query = text.trim();
        if query.is_empty() {
            return None;
        }

        store.dispatch(SearchAction::Request);
        let generation = store.state().search.generation;
        let api = self.api.clone();
        let tx = self.tx.clone();
        let query = query.to_string();

        tracing::debug!(query = %query, generation, "Spawning search task");

        Some(tokio::spawn(async move {
            let action = match catch_task_panic(api.search(&query, 1)).await {
                Ok(Ok(page)) => SearchAction::Success {
                    generation,
                    items: page.items,
                },
                Ok(Err(e)) => {
                    tracing::warn!(query = %query, error = %e, "Search failed");
                    SearchAction::Failure {
                        generation,
                        message: e.to_string(),
                    }
                }
                Err(panic) => {
                    tracing::error!(query = %query, panic = %panic, "Search task panicked");
                    SearchAction::Failure {
                        generation,
                        message: format!("Task panicked: {}", panic),
                    }
                }
            };
            send(&tx, action.into()).await;
        }))
    }

    pub fn clear_search(&self, store: &mut Store) {
        store.dispatch(SearchAction::ClearInput);
    }

    /// Spawn the fetch for the request just dispatched on `store`.
    ///
    /// The result is tagged with the slice's current generation, so it is
    /// dropped if another request for the row starts before it lands.
    fn spawn_page(&self, store: &Store, entry: &'static CategoryEntry, page: u32) -> JoinHandle<()> {
        let api = self.api.clone();
        let tx = self.tx.clone();
        let key = entry.key;
        let generation = entry.select(store.state()).map_or(0, |slice| slice.generation);

        tokio::spawn(async move {
            let action = match catch_task_panic(api.fetch_page(&entry.endpoint, page)).await {
                Ok(Ok(result)) if page == 1 => key.success(result),
                Ok(Ok(result)) => key.load_more_success(result),
                Ok(Err(e)) => {
                    tracing::warn!(slice = %key, page, error = %e, "Category fetch failed");
                    key.failure(e.to_string())
                }
                Err(panic) => {
                    tracing::error!(slice = %key, page, panic = %panic, "Category task panicked");
                    key.failure(format!("Task panicked: {}", panic))
                }
            };
            send(&tx, action.for_generation(generation)).await;
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_catch_task_panic_reports_message() {
        let result: Result<(), String> = catch_task_panic(async { panic!("boom") }).await;
        assert_eq!(result, Err("boom".to_string()));
    }

    #[tokio::test]
    async fn test_catch_task_panic_passes_output() {
        assert_eq!(catch_task_panic(async { 7 }).await, Ok(7));
    }
}
