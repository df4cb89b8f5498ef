use movie_browse_sources::{RetryPolicy, SourceError, TmdbClient};
use serde_json::json;
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> TmdbClient {
    TmdbClient::new(Some("test-key".to_string()))
        .unwrap()
        .with_base_url(server.uri())
        .with_retry(RetryPolicy::immediate())
}

fn results_page(titles: &[&str]) -> serde_json::Value {
    let results: Vec<_> = titles
        .iter()
        .enumerate()
        .map(|(i, t)| {
            json!({
                "id": i + 1,
                "title": t,
                "overview": format!("About {}", t),
                "release_date": "2014-11-05",
                "vote_average": 7.5
            })
        })
        .collect();
    json!({
        "page": 1,
        "results": results,
        "total_pages": 3,
        "total_results": 42
    })
}

#[tokio::test]
async fn search_sends_query_and_excludes_adult() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search/movie"))
        .and(query_param("query", "Interstellar"))
        .and(query_param("language", "en"))
        .and(query_param("page", "1"))
        .and(query_param("include_adult", "false"))
        .and(query_param("api_key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(results_page(&["Interstellar"])))
        .expect(1)
        .mount(&server)
        .await;

    let page = client_for(&server)
        .search_movies("Interstellar", "en", 1)
        .await
        .unwrap();
    assert_eq!(page.results.len(), 1);
    assert_eq!(page.total_pages, 3);
    assert_eq!(page.total_results, 42);
}

#[tokio::test]
async fn discover_with_no_genres_omits_the_filter_parameter() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/discover/movie"))
        .and(query_param_is_missing("with_genres"))
        .and(query_param("sort_by", "popularity.desc"))
        .and(query_param("include_adult", "false"))
        .respond_with(ResponseTemplate::new(200).set_body_json(results_page(&["Popular"])))
        .expect(1)
        .mount(&server)
        .await;

    let page = client_for(&server)
        .discover(&[], "en", 1, None, None)
        .await
        .unwrap();
    assert_eq!(page.results.len(), 1);

    // No region or original-language filters were requested either.
    let requests = server.received_requests().await.unwrap();
    let raw_query = requests[0].url.query().unwrap_or_default();
    assert!(!raw_query.contains("region"));
    assert!(!raw_query.contains("with_original_language"));
}

#[tokio::test]
async fn discover_passes_genres_region_and_original_language() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/discover/movie"))
        .and(query_param("with_genres", "28,12"))
        .and(query_param("region", "US"))
        .and(query_param("watch_region", "US"))
        .and(query_param("with_original_language", "ja"))
        .respond_with(ResponseTemplate::new(200).set_body_json(results_page(&["Action"])))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server)
        .discover(&[28, 12], "en", 1, Some("US"), Some("ja"))
        .await
        .unwrap();
}

#[tokio::test]
async fn details_requests_appended_subresources() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/movie/157336"))
        .and(query_param(
            "append_to_response",
            "videos,external_ids,watch/providers",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 157336,
            "title": "Interstellar",
            "homepage": "https://interstellar.example",
            "external_ids": { "imdb_id": "tt0816692" },
            "videos": { "results": [
                { "site": "YouTube", "type": "Trailer", "key": "zSWdZVtXT7E" }
            ]}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let detail = client_for(&server).details(157336, "en").await.unwrap();
    assert_eq!(detail.external_ids.imdb_id.as_deref(), Some("tt0816692"));
    assert_eq!(detail.videos.results[0].key, "zSWdZVtXT7E");
}

#[tokio::test]
async fn genre_list_parses() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/genre/movie/list"))
        .and(query_param("language", "fr"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "genres": [
                { "id": 28, "name": "Action" },
                { "id": 35, "name": "Comédie" }
            ]
        })))
        .mount(&server)
        .await;

    let genres = client_for(&server).list_genres("fr").await.unwrap();
    assert_eq!(genres.len(), 2);
    assert_eq!(genres[1].name, "Comédie");
}

#[tokio::test]
async fn transient_failures_are_retried_until_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/genre/movie/list"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/genre/movie/list"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "genres": [{ "id": 28, "name": "Action" }] })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let genres = client_for(&server).list_genres("en").await.unwrap();
    assert_eq!(genres.len(), 1);
}

#[tokio::test]
async fn exhausted_retries_surface_upstream_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search/movie"))
        .respond_with(ResponseTemplate::new(500))
        .expect(3)
        .mount(&server)
        .await;

    let err = client_for(&server)
        .search_movies("Interstellar", "en", 1)
        .await
        .unwrap_err();
    match err {
        SourceError::Upstream { endpoint, status } => {
            assert_eq!(endpoint, "/search/movie");
            assert_eq!(status, 500);
        }
        other => panic!("expected upstream error, got {other:?}"),
    }
}

#[tokio::test]
async fn client_errors_are_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/movie/42"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let err = client_for(&server).details(42, "en").await.unwrap_err();
    assert!(matches!(err, SourceError::Upstream { status: 404, .. }));
}

#[tokio::test]
async fn bearer_keys_skip_the_query_parameter() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/genre/movie/list"))
        .and(query_param_is_missing("api_key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "genres": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let client = TmdbClient::new(Some("eyJhbGciOiJIUzI1NiJ9.payload".to_string()))
        .unwrap()
        .with_base_url(server.uri())
        .with_retry(RetryPolicy::immediate());
    client.list_genres("en").await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let auth = requests[0].headers.get("authorization").unwrap();
    assert!(auth.to_str().unwrap().starts_with("Bearer eyJ"));
}
