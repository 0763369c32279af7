//! End-to-end gateway tests against a fake upstream on a loopback port.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use flicklist::app::{handle_event, perform, AppState, Event, SearchStatus};
use flicklist::favorites::FavoritesStore;
use flicklist::gateway::{
    router, ClientError, ErrorBody, GatewayState, ProxyClient, ResponseCache, SearchResponse,
    UpstreamClient, RESULT_CAP,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

const API_KEY: &str = "test-key";

async fn spawn(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

/// Upstream returning 25 movies for any query, counting its calls.
async fn fake_upstream(calls: Arc<AtomicUsize>) -> String {
    async fn search(
        State(calls): State<Arc<AtomicUsize>>,
        Query(params): Query<HashMap<String, String>>,
    ) -> (StatusCode, Json<Value>) {
        calls.fetch_add(1, Ordering::SeqCst);

        if params.get("api_key").map(String::as_str) != Some(API_KEY) {
            return (StatusCode::UNAUTHORIZED, Json(json!({ "status_message": "bad key" })));
        }

        let query = params.get("query").cloned().unwrap_or_default();
        let results: Vec<Value> = (1..=25)
            .map(|id| json!({
                "id": id,
                "title": format!("{query} {id}"),
                "poster_path": null,
                "vote_average": 7.5,
                "release_date": "1999-03-31",
                "overview": "",
                "popularity": 12.0
            }))
            .collect();

        (
            StatusCode::OK,
            Json(json!({ "page": 1, "results": results, "total_results": 250, "total_pages": 13 })),
        )
    }

    spawn(Router::new().route("/search/movie", get(search)).with_state(calls)).await
}

async fn proxy(upstream: Option<&str>, api_key: &str, cache_ttl: Duration) -> String {
    let state = GatewayState::new(
        UpstreamClient::new(upstream.map(str::to_string), Some(api_key.to_string())),
        ResponseCache::new(cache_ttl),
    );
    spawn(router(state)).await
}

async fn get_json(url: &str) -> (u16, Value) {
    let response = reqwest::get(url).await.unwrap();
    let status = response.status().as_u16();
    (status, response.json().await.unwrap())
}

#[tokio::test]
async fn search_caps_results_and_keeps_upstream_totals() {
    let calls = Arc::new(AtomicUsize::new(0));
    let upstream = fake_upstream(calls.clone()).await;
    let proxy = proxy(Some(upstream.as_str()), API_KEY, Duration::ZERO).await;

    let response = ProxyClient::new(&proxy).search("  matrix ").await.unwrap();

    assert_eq!(response.results.len(), RESULT_CAP);
    assert_eq!(response.total_results, 250);
    assert_eq!(response.total_pages, 13);
    assert_eq!(response.results[0].title, "matrix 1");
    assert_eq!(response.results[0].release_year(), Some(1999));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn blank_query_is_a_bad_request() {
    let calls = Arc::new(AtomicUsize::new(0));
    let upstream = fake_upstream(calls.clone()).await;
    let proxy = proxy(Some(upstream.as_str()), API_KEY, Duration::ZERO).await;

    for url in [format!("{proxy}/api/search?q=%20%20"), format!("{proxy}/api/search")] {
        let (status, body) = get_json(&url).await;
        assert_eq!(status, 400);
        assert_eq!(body, json!({ "error": "Search query is required" }));
    }
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn missing_configuration_is_a_server_error() {
    let proxy = proxy(None, API_KEY, Duration::ZERO).await;

    let err = ProxyClient::new(&proxy).search("alien").await.unwrap_err();
    match &err {
        ClientError::Rejected { status, message } => {
            assert_eq!(*status, 500);
            assert_eq!(message, "API configuration missing");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(err.user_message(), "API configuration missing");
}

#[tokio::test]
async fn upstream_failure_status_is_reported_without_leaking_details() {
    let calls = Arc::new(AtomicUsize::new(0));
    let upstream = fake_upstream(calls).await;
    let proxy = proxy(Some(upstream.as_str()), "wrong-key", Duration::ZERO).await;

    let (status, body) = get_json(&format!("{proxy}/api/search?q=alien")).await;
    assert_eq!(status, 500);

    let body: ErrorBody = serde_json::from_value(body).unwrap();
    assert_eq!(
        body.error,
        "Failed to fetch movies from TMDB: upstream returned an error status"
    );
    assert!(!body.error.contains("wrong-key"));
}

#[tokio::test]
async fn unreachable_upstream_has_its_own_message() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let closed = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);
    let proxy = proxy(Some(closed.as_str()), API_KEY, Duration::ZERO).await;

    let (status, body) = get_json(&format!("{proxy}/api/search?q=alien")).await;
    assert_eq!(status, 500);

    let body: ErrorBody = serde_json::from_value(body).unwrap();
    assert_eq!(body.error, "Failed to fetch movies from TMDB: upstream request failed");
    assert_ne!(
        body.error,
        "Failed to fetch movies from TMDB: upstream returned an error status"
    );
    assert!(!body.error.contains(API_KEY));
}

#[tokio::test]
async fn repeated_queries_are_served_from_cache() {
    let calls = Arc::new(AtomicUsize::new(0));
    let upstream = fake_upstream(calls.clone()).await;
    let proxy = proxy(Some(upstream.as_str()), API_KEY, Duration::from_secs(60)).await;
    let client = ProxyClient::new(&proxy);

    let first: SearchResponse = client.search("heat").await.unwrap();
    let second = client.search(" heat ").await.unwrap();
    client.search("ronin").await.unwrap();

    assert_eq!(first, second);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn unreachable_proxy_is_a_transport_failure() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = ProxyClient::new(format!("http://{addr}")).search("alien").await.unwrap_err();
    assert!(matches!(err, ClientError::Transport(_)));
    assert_eq!(err.user_message(), "Failed to fetch movies. Try again.");
}

#[tokio::test]
async fn health_check() {
    let proxy = proxy(None, API_KEY, Duration::ZERO).await;
    let body = reqwest::get(format!("{proxy}/health")).await.unwrap().text().await.unwrap();
    assert_eq!(body, "ok");
}

#[tokio::test]
async fn app_search_flow_through_the_proxy() {
    let calls = Arc::new(AtomicUsize::new(0));
    let upstream = fake_upstream(calls).await;
    let proxy = proxy(Some(upstream.as_str()), API_KEY, Duration::ZERO).await;
    let client = ProxyClient::new(&proxy);

    let mut state = AppState::new(FavoritesStore::in_memory());
    handle_event(&mut state, &Event::HydrateFavorites);

    handle_event(&mut state, &Event::QueryChanged("first".to_string()));
    let (_, stale_actions) = handle_event(&mut state, &Event::SubmitSearch);
    handle_event(&mut state, &Event::QueryChanged("second".to_string()));
    let (_, actions) = handle_event(&mut state, &Event::SubmitSearch);

    let latest = perform(&client, actions[0].clone()).await;
    let stale = perform(&client, stale_actions[0].clone()).await;

    handle_event(&mut state, &latest);
    let (rendered, _) = handle_event(&mut state, &stale);

    assert!(!rendered);
    assert_eq!(state.status, SearchStatus::Loaded);
    assert_eq!(state.results.len(), RESULT_CAP);
    assert!(state.results.iter().all(|movie| movie.title.starts_with("second")));

    handle_event(&mut state, &Event::AddAllResults);
    let viewmodel = state.compute_viewmodel();
    assert_eq!(viewmodel.search.summary.as_deref(), Some("Found 20 movies"));
    assert!(viewmodel.search.cards.iter().all(|card| card.is_favorite));
}
