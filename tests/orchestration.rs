//! Integration tests for async orchestration against a mocked media API.
//!
//! Each test starts its own `MockServer`, wires a `MediaApi` to it and drives
//! `Effects` through a real `Store`, waiting for spawned tasks to settle.

use marquee::api::MediaApi;
use marquee::effects::Effects;
use marquee::registry::{self, CategoryEntry, ContentType};
use marquee::store::{Status, Store};
use marquee::view;
use pretty_assertions::assert_eq;
use secrecy::SecretString;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn api_for(base: &str) -> MediaApi {
    MediaApi::with_client(
        reqwest::Client::new(),
        base,
        Some(SecretString::from("test-key".to_string())),
        "en-US",
        "US",
    )
    .unwrap()
}

fn comedy() -> &'static CategoryEntry {
    registry::find(ContentType::Movies, "comedy").unwrap()
}

fn page_body(ids: &[i64], page: u32, total_pages: u32) -> serde_json::Value {
    let results: Vec<_> = ids
        .iter()
        .map(|id| json!({ "id": id, "title": format!("Title {}", id), "genre_ids": [35] }))
        .collect();
    json!({ "results": results, "page": page, "total_pages": total_pages })
}

fn ids_of(store: &Store, entry: &CategoryEntry) -> Vec<i64> {
    entry
        .select(store.state())
        .unwrap()
        .data
        .iter()
        .map(|item| item.id)
        .collect()
}

async fn mount_comedy_page(server: &MockServer, page: u32, ids: &[i64], total_pages: u32) {
    Mock::given(method("GET"))
        .and(path("/discover/movie"))
        .and(query_param("with_genres", "35"))
        .and(query_param("page", page.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(ids, page, total_pages)))
        .expect(1)
        .mount(server)
        .await;
}

// ============================================================================
// Category fetch and pagination
// ============================================================================

#[tokio::test]
async fn test_fetch_category_loads_first_page() {
    let server = MockServer::start().await;
    mount_comedy_page(&server, 1, &[1, 2, 3], 4).await;

    let mut store = Store::new();
    let effects = Effects::new(api_for(&server.uri()), &store);

    let handle = effects.fetch_category(&mut store, comedy());
    assert!(comedy().select(store.state()).unwrap().is_loading());

    store.run_until_settled(vec![handle]).await;

    let slice = comedy().select(store.state()).unwrap();
    assert_eq!(slice.status, Status::Loaded);
    assert_eq!(slice.error, None);
    assert_eq!(ids_of(&store, comedy()), vec![1, 2, 3]);
    assert_eq!(slice.next_page(), Some(2));
}

#[tokio::test]
async fn test_load_more_appends_until_last_page() {
    let server = MockServer::start().await;
    mount_comedy_page(&server, 1, &[1, 2], 2).await;
    mount_comedy_page(&server, 2, &[3, 4], 2).await;

    let mut store = Store::new();
    let effects = Effects::new(api_for(&server.uri()), &store);

    let handle = effects.fetch_category(&mut store, comedy());
    store.run_until_settled(vec![handle]).await;

    let handle = effects.load_more(&mut store, comedy()).expect("second page");
    // Loaded rows stay visible while the next page is in flight.
    assert_eq!(ids_of(&store, comedy()), vec![1, 2]);
    store.run_until_settled(vec![handle]).await;

    assert_eq!(ids_of(&store, comedy()), vec![1, 2, 3, 4]);
    assert!(effects.load_more(&mut store, comedy()).is_none());
}

#[tokio::test]
async fn test_load_more_skipped_while_loading() {
    let server = MockServer::start().await;
    mount_comedy_page(&server, 1, &[1], 3).await;

    let mut store = Store::new();
    let effects = Effects::new(api_for(&server.uri()), &store);

    let handle = effects.fetch_category(&mut store, comedy());
    assert!(effects.load_more(&mut store, comedy()).is_none());
    store.run_until_settled(vec![handle]).await;
}

#[tokio::test]
async fn test_refetch_discards_in_flight_load_more() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/discover/movie"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(&[1, 2], 1, 3)))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/discover/movie"))
        .and(query_param("page", "2"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(page_body(&[3, 4], 2, 3))
                .set_delay(Duration::from_millis(200)),
        )
        .mount(&server)
        .await;

    let mut store = Store::new();
    let effects = Effects::new(api_for(&server.uri()), &store);

    let handle = effects.fetch_category(&mut store, comedy());
    store.run_until_settled(vec![handle]).await;

    let more = effects.load_more(&mut store, comedy()).expect("second page");
    let fresh = effects.fetch_category(&mut store, comedy());
    store.run_until_settled(vec![more, fresh]).await;

    let slice = comedy().select(store.state()).unwrap();
    assert_eq!(slice.status, Status::Loaded);
    assert_eq!(ids_of(&store, comedy()), vec![1, 2]);
    assert_eq!(slice.next_page(), Some(2));
}

#[tokio::test]
async fn test_http_error_becomes_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/discover/movie"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let mut store = Store::new();
    let effects = Effects::new(api_for(&server.uri()), &store);

    let handle = effects.fetch_category(&mut store, comedy());
    store.run_until_settled(vec![handle]).await;

    let slice = comedy().select(store.state()).unwrap();
    assert_eq!(slice.status, Status::Failed);
    assert!(slice.data.is_empty());
    assert_eq!(slice.error.as_deref(), Some("HTTP error: status 500"));
    assert!(effects.load_more(&mut store, comedy()).is_none());
}

#[tokio::test]
async fn test_unreachable_api_becomes_failure() {
    let mut store = Store::new();
    let effects = Effects::new(api_for("http://127.0.0.1:1"), &store);

    let handle = effects.fetch_category(&mut store, comedy());
    store.run_until_settled(vec![handle]).await;

    let slice = comedy().select(store.state()).unwrap();
    assert_eq!(slice.status, Status::Failed);
    assert!(slice.error.is_some());
}

#[tokio::test]
async fn test_fetch_rows_writes_each_row_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(&[], 1, 1)))
        .expect(ContentType::Popular.entries().len() as u64)
        .mount(&server)
        .await;

    let mut store = Store::new();
    let effects = Effects::new(api_for(&server.uri()), &store);

    let handles = effects.fetch_rows(&mut store, ContentType::Popular);
    store.run_until_settled(handles).await;

    for entry in ContentType::Popular.entries() {
        let slice = entry.select(store.state()).unwrap();
        assert_eq!(slice.status, Status::Loaded, "row {}", entry.key);
        assert!(slice.data.is_empty());
    }
    for entry in ContentType::Movies.entries() {
        assert_eq!(entry.select(store.state()).unwrap().status, Status::Idle);
    }
}

// ============================================================================
// Search
// ============================================================================

#[tokio::test]
async fn test_slow_stale_search_does_not_overwrite_newer() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search/multi"))
        .and(query_param("query", "bat"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(page_body(&[999], 1, 1))
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/search/multi"))
        .and(query_param("query", "batman"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(&[268], 1, 1)))
        .mount(&server)
        .await;

    let mut store = Store::new();
    let effects = Effects::new(api_for(&server.uri()), &store);

    let bat = effects.search(&mut store, "bat").unwrap();
    let batman = effects.search(&mut store, "batman").unwrap();
    store.run_until_settled(vec![bat, batman]).await;

    let search = &store.state().search;
    assert_eq!(search.query_text, "batman");
    assert_eq!(search.status, Status::Loaded);
    let ids: Vec<i64> = search.results.iter().map(|item| item.id).collect();
    assert_eq!(ids, vec![268]);
}

#[tokio::test]
async fn test_blank_search_sends_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut store = Store::new();
    let effects = Effects::new(api_for(&server.uri()), &store);

    assert!(effects.search(&mut store, "   ").is_none());
    assert_eq!(store.state().search.query_text, "   ");
    assert_eq!(store.state().search.status, Status::Idle);
}

#[tokio::test]
async fn test_clear_search_discards_in_flight_result() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search/multi"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(page_body(&[348], 1, 1))
                .set_delay(Duration::from_millis(100)),
        )
        .mount(&server)
        .await;

    let mut store = Store::new();
    let effects = Effects::new(api_for(&server.uri()), &store);

    let handle = effects.search(&mut store, "alien").unwrap();
    effects.clear_search(&mut store);
    store.run_until_settled(vec![handle]).await;

    let search = &store.state().search;
    assert_eq!(search.query_text, "");
    assert!(search.results.is_empty());
    assert_eq!(search.status, Status::Idle);
    assert!(!view::render_search(search, 80).contains(view::LOADING));
}

#[tokio::test]
async fn test_blank_input_discards_in_flight_result() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search/multi"))
        .and(query_param("query", "bat"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(page_body(&[999], 1, 1))
                .set_delay(Duration::from_millis(100)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut store = Store::new();
    let effects = Effects::new(api_for(&server.uri()), &store);

    let handle = effects.search(&mut store, "bat").unwrap();
    assert!(effects.search(&mut store, "").is_none());
    store.run_until_settled(vec![handle]).await;

    let search = &store.state().search;
    assert_eq!(search.query_text, "");
    assert!(search.results.is_empty());
    assert_eq!(search.status, Status::Idle);
    assert!(!view::render_search(search, 80).contains(view::LOADING));
}

#[tokio::test]
async fn test_search_failure_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search/multi"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let mut store = Store::new();
    let effects = Effects::new(api_for(&server.uri()), &store);

    let handle = effects.search(&mut store, "heat").unwrap();
    store.run_until_settled(vec![handle]).await;

    let search = &store.state().search;
    assert_eq!(search.status, Status::Failed);
    assert_eq!(search.error.as_deref(), Some("HTTP error: status 401"));
}
