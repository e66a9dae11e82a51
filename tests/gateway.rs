//! Gateway contract tests against a mock QuickByte backend.
//!
//! These pin the endpoint shapes (paths and query parameters), the
//! distinction between "no favorites" and a hard failure, and the error
//! taxonomy mapping.

use quickbyte::gateway::{GatewayError, NewsGateway};
use std::time::Duration;
use url::Url;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn article_json(id: &str, title: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "title": title,
        "description": "A description",
        "url": format!("https://example.com/{id}"),
        "sourceName": "Example Times",
        "publishedAt": "2024-05-01T10:00:00Z",
        "imageUrl": null,
        "content": null
    })
}

fn gateway(server: &MockServer) -> NewsGateway {
    NewsGateway::new(
        reqwest::Client::new(),
        Url::parse(&server.uri()).unwrap(),
        "us",
        "publishedAt",
        Duration::from_secs(5),
    )
}

#[tokio::test]
async fn test_headlines_sends_country_and_paging_params() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/news/top-headlines"))
        .and(query_param("country", "us"))
        .and(query_param("page", "2"))
        .and(query_param("pageSize", "12"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            article_json("h1", "Headline one")
        ])))
        .mount(&server)
        .await;

    let articles = gateway(&server).headlines(2, 12).await.unwrap();
    assert_eq!(articles.len(), 1);
    assert_eq!(articles[0].id, "h1");
    assert_eq!(articles[0].source_name.as_deref(), Some("Example Times"));
}

#[tokio::test]
async fn test_search_sends_query_and_sort_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/news/search"))
        .and(query_param("query", "rust language"))
        .and(query_param("sortBy", "publishedAt"))
        .and(query_param("page", "1"))
        .and(query_param("pageSize", "12"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            article_json("s1", "Search hit")
        ])))
        .mount(&server)
        .await;

    let articles = gateway(&server).search("rust language", 1, 12).await.unwrap();
    assert_eq!(articles.len(), 1);
    assert_eq!(articles[0].id, "s1");
}

#[tokio::test]
async fn test_category_is_a_search_by_name() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/news/search"))
        .and(query_param("query", "Sports"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            article_json("c1", "Sports story")
        ])))
        .mount(&server)
        .await;

    let articles = gateway(&server).category("Sports", 1, 12).await.unwrap();
    assert_eq!(articles.len(), 1);
}

#[tokio::test]
async fn test_favorites_no_content_is_empty_not_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/favorites/u1"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let articles = gateway(&server).favorites_list("u1").await.unwrap();
    assert!(articles.is_empty());
}

#[tokio::test]
async fn test_favorites_list_decodes_articles() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/favorites/u1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            article_json("f1", "Saved one"),
            article_json("f2", "Saved two")
        ])))
        .mount(&server)
        .await;

    let articles = gateway(&server).favorites_list("u1").await.unwrap();
    assert_eq!(articles.len(), 2);
}

#[tokio::test]
async fn test_add_favorite_posts_to_add_path() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/favorites/u1/add/a1"))
        .respond_with(ResponseTemplate::new(201).set_body_string("Article added to favorites"))
        .expect(1)
        .mount(&server)
        .await;

    gateway(&server).add_favorite("u1", "a1").await.unwrap();
}

#[tokio::test]
async fn test_remove_favorite_deletes_remove_path() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/favorites/u1/remove/a1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("Article removed from favorites"))
        .expect(1)
        .mount(&server)
        .await;

    gateway(&server).remove_favorite("u1", "a1").await.unwrap();
}

#[tokio::test]
async fn test_remote_error_message_is_surfaced() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/news/top-headlines"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_json(serde_json::json!({"error": "News API unavailable"})),
        )
        .mount(&server)
        .await;

    let err = gateway(&server).headlines(1, 12).await.unwrap_err();
    match err {
        GatewayError::Remote(message) => assert_eq!(message, "News API unavailable"),
        e => panic!("Expected Remote error, got {:?}", e),
    }
}

#[tokio::test]
async fn test_failure_without_message_maps_to_status() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/favorites/u1/remove/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Article not found in favorites"))
        .mount(&server)
        .await;

    let err = gateway(&server)
        .remove_favorite("u1", "missing")
        .await
        .unwrap_err();
    match err {
        GatewayError::HttpStatus(404) => {}
        e => panic!("Expected HttpStatus(404), got {:?}", e),
    }
}

#[tokio::test]
async fn test_undecodable_success_body_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/news/top-headlines"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let err = gateway(&server).headlines(1, 12).await.unwrap_err();
    assert!(matches!(err, GatewayError::Decode(_)));
}

#[tokio::test]
async fn test_slow_response_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/news/top-headlines"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!([]))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let gateway = NewsGateway::new(
        reqwest::Client::new(),
        Url::parse(&server.uri()).unwrap(),
        "us",
        "publishedAt",
        Duration::from_millis(100),
    );
    let err = gateway.headlines(1, 12).await.unwrap_err();
    assert!(matches!(err, GatewayError::Timeout));
}
