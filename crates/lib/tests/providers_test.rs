//! # Provider Wire Tests
//!
//! Runs the real HTTP providers against `wiremock` servers to pin down the
//! request shapes they send and how they map responses and failures.

use reelquest::providers::ai::{AiProvider, ChatRequest, OpenAiProvider};
use reelquest::providers::catalog::{CatalogProvider, TmdbProvider};
use reelquest::{ReelError, SearchQuery, UpstreamService};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn openai_provider(server: &MockServer) -> OpenAiProvider {
    OpenAiProvider::new(
        format!("{}/v1/chat/completions", server.uri()),
        "test-openai-key".to_string(),
        "gpt-4o".to_string(),
    )
    .unwrap()
}

fn tmdb_provider(server: &MockServer) -> TmdbProvider {
    TmdbProvider::new(
        format!("{}/3/", server.uri()),
        "test-tmdb-key".to_string(),
        "ko-KR".to_string(),
    )
    .unwrap()
}

#[tokio::test]
async fn test_openai_provider_sends_fixed_shape_and_returns_trimmed_content() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer test-openai-key"))
        .and(body_partial_json(json!({
            "model": "gpt-4o",
            "messages": [
                { "role": "system", "content": "sys" },
                { "role": "user", "content": "usr" }
            ],
            "temperature": 0.5,
            "max_tokens": 32
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{ "message": { "role": "assistant", "content": "  [\"Q1\"]  \n" } }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let content = openai_provider(&server)
        .complete(&ChatRequest::new("sys", "usr", 0.5, 32))
        .await
        .unwrap();

    assert_eq!(content, "[\"Q1\"]");
}

#[tokio::test]
async fn test_openai_provider_without_choices_returns_empty_string() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
        .mount(&server)
        .await;

    let content = openai_provider(&server)
        .complete(&ChatRequest::new("sys", "usr", 0.7, 1024))
        .await
        .unwrap();

    assert_eq!(content, "");
}

#[tokio::test]
async fn test_openai_provider_keeps_upstream_status_and_payload() {
    let server = MockServer::start().await;
    let payload = json!({ "error": { "message": "Rate limit reached", "type": "requests" } });
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).set_body_json(payload.clone()))
        .mount(&server)
        .await;

    let err = openai_provider(&server)
        .complete(&ChatRequest::new("sys", "usr", 0.7, 1024))
        .await
        .unwrap_err();

    match err {
        ReelError::Upstream {
            service,
            status,
            body,
        } => {
            assert_eq!(service, UpstreamService::Model);
            assert_eq!(status, 429);
            assert_eq!(body, payload);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_tmdb_provider_sends_multi_search_parameters() {
    let server = MockServer::start().await;
    let payload = json!({ "page": 2, "results": [{ "id": 209867, "name": "장송의 프리렌" }] });
    Mock::given(method("GET"))
        .and(path("/3/search/multi"))
        .and(query_param("api_key", "test-tmdb-key"))
        .and(query_param("query", "프리렌"))
        .and(query_param("language", "ko-KR"))
        .and(query_param("page", "2"))
        .and(query_param("include_adult", "false"))
        .respond_with(ResponseTemplate::new(200).set_body_json(payload.clone()))
        .expect(1)
        .mount(&server)
        .await;

    let result = tmdb_provider(&server)
        .search(&SearchQuery::new("프리렌", 2).unwrap())
        .await
        .unwrap();

    assert_eq!(result, payload);
}

#[tokio::test]
async fn test_tmdb_provider_forwards_non_json_failure_as_string() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/3/search/multi"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let err = tmdb_provider(&server)
        .search(&SearchQuery::new("프리렌", 1).unwrap())
        .await
        .unwrap_err();

    match err {
        ReelError::Upstream {
            service,
            status,
            body,
        } => {
            assert_eq!(service, UpstreamService::Catalog);
            assert_eq!(status, 502);
            assert_eq!(body, json!("Bad Gateway"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}
