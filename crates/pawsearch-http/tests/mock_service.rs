//! Mock service tests for the HTTP backend.
//!
//! These tests use wiremock to simulate the adoption service and exercise
//! the backend without network access.

use std::time::Duration;

use pawsearch_core::error::{AuthError, TransportError};
use pawsearch_core::{
    CatalogBrowser, Credentials, Cursor, DogId, Error, ErrorClass, SearchRequest, Service,
    ServiceUrl, Session, SortOrder,
};
use pawsearch_http::{HttpConfig, HttpService, HttpSession};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

const COOKIE_HEADER: &str = "fetch-access-token=test-token";

fn mock_service_url(server: &MockServer) -> ServiceUrl {
    ServiceUrl::new(server.uri()).unwrap()
}

fn dog_json(id: &str, breed: &str) -> serde_json::Value {
    json!({
        "id": id,
        "img": format!("https://img.example.com/{id}.jpg"),
        "name": format!("Dog {id}"),
        "age": 3,
        "zip_code": "30301",
        "breed": breed
    })
}

async fn mount_login(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(json!({"name": "Ada", "email": "ada@example.com"})))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header(
                    "set-cookie",
                    "fetch-access-token=test-token; Path=/; HttpOnly; Secure",
                )
                .set_body_string("OK"),
        )
        .mount(server)
        .await;
}

async fn login(server: &MockServer) -> HttpSession {
    mount_login(server).await;
    let service = HttpService::new(mock_service_url(server)).unwrap();
    service
        .login(Credentials::new("Ada", "ada@example.com"))
        .await
        .unwrap()
}

fn id(s: &str) -> DogId {
    DogId::new(s).unwrap()
}

// ============================================================================
// Authentication Tests
// ============================================================================

#[tokio::test]
async fn test_login_success() {
    let server = MockServer::start().await;
    let session = login(&server).await;

    assert_eq!(session.user(), "Ada");
    assert_eq!(session.token().as_str(), "test-token");
}

#[tokio::test]
async fn test_login_rejected() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
        .mount(&server)
        .await;

    let service = HttpService::new(mock_service_url(&server)).unwrap();
    let err = service
        .login(Credentials::new("Ada", "not-an-email"))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Auth(AuthError::InvalidCredentials(_))));
    assert_eq!(err.class(), ErrorClass::Authentication);
}

#[tokio::test]
async fn test_login_without_cookie() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_string("OK"))
        .mount(&server)
        .await;

    let service = HttpService::new(mock_service_url(&server)).unwrap();
    let err = service
        .login(Credentials::new("Ada", "ada@example.com"))
        .await
        .unwrap_err();

    assert!(err.to_string().contains("fetch-access-token"));
}

#[tokio::test]
async fn test_logout_sends_cookie() {
    let server = MockServer::start().await;
    let session = login(&server).await;

    Mock::given(method("POST"))
        .and(path("/auth/logout"))
        .and(header("cookie", COOKIE_HEADER))
        .respond_with(ResponseTemplate::new(200).set_body_string("OK"))
        .expect(1)
        .mount(&server)
        .await;

    session.logout().await.unwrap();
}

#[tokio::test]
async fn test_resumed_session_uses_stored_token() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/dogs/breeds"))
        .and(header("cookie", "fetch-access-token=stored"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["Akita"])))
        .mount(&server)
        .await;

    let service = HttpService::new(mock_service_url(&server)).unwrap();
    let session = service.resume("Ada", pawsearch_core::AuthToken::new("stored"));

    assert_eq!(session.list_breeds().await.unwrap(), ["Akita"]);
}

// ============================================================================
// Catalog Operation Tests
// ============================================================================

#[tokio::test]
async fn test_list_breeds() {
    let server = MockServer::start().await;
    let session = login(&server).await;

    Mock::given(method("GET"))
        .and(path("/dogs/breeds"))
        .and(header("cookie", COOKIE_HEADER))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            "Affenpinscher",
            "Beagle",
            "Poodle"
        ])))
        .mount(&server)
        .await;

    let breeds = session.list_breeds().await.unwrap();
    assert_eq!(breeds, ["Affenpinscher", "Beagle", "Poodle"]);
}

#[tokio::test]
async fn test_first_page_query_parameters() {
    let server = MockServer::start().await;
    let session = login(&server).await;

    Mock::given(method("GET"))
        .and(path("/dogs/search"))
        .and(query_param("breeds", "Beagle"))
        .and(query_param("size", "6"))
        .and(query_param("sort", "breed:desc"))
        .and(header("cookie", COOKIE_HEADER))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "resultIds": ["a", "b"],
            "total": 2
        })))
        .expect(1)
        .mount(&server)
        .await;

    let results = session
        .search_dogs(&SearchRequest::FirstPage {
            breed: Some("Beagle".to_string()),
            sort: SortOrder::Descending,
            size: 6,
        })
        .await
        .unwrap();

    assert_eq!(results.result_ids, vec![id("a"), id("b")]);
    assert!(results.next.is_none());
    assert!(results.prev.is_none());
}

#[tokio::test]
async fn test_unfiltered_search_omits_breeds() {
    let server = MockServer::start().await;
    let session = login(&server).await;

    Mock::given(method("GET"))
        .and(path("/dogs/search"))
        .and(query_param_is_missing("breeds"))
        .and(query_param("sort", "breed:asc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "resultIds": [],
            "total": 0
        })))
        .expect(1)
        .mount(&server)
        .await;

    let results = session
        .search_dogs(&SearchRequest::FirstPage {
            breed: None,
            sort: SortOrder::Ascending,
            size: 6,
        })
        .await
        .unwrap();

    assert!(results.result_ids.is_empty());
}

#[tokio::test]
async fn test_cursor_search_is_sent_verbatim() {
    let server = MockServer::start().await;
    let session = login(&server).await;

    Mock::given(method("GET"))
        .and(path("/dogs/search"))
        .and(query_param("size", "6"))
        .and(query_param("from", "6"))
        .and(query_param("sort", "breed:asc"))
        .and(query_param("breeds", "Beagle"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "resultIds": ["g"],
            "total": 7,
            "prev": "/dogs/search?size=6&from=0&sort=breed:asc&breeds=Beagle"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let cursor = Cursor::new("/dogs/search?size=6&from=6&sort=breed:asc&breeds=Beagle");
    let results = session
        .search_dogs(&SearchRequest::Cursor(cursor))
        .await
        .unwrap();

    assert_eq!(results.result_ids, vec![id("g")]);
    assert_eq!(results.total, Some(7));
    assert!(results.prev.is_some());
}

#[tokio::test]
async fn test_fetch_dogs_posts_ids() {
    let server = MockServer::start().await;
    let session = login(&server).await;

    Mock::given(method("POST"))
        .and(path("/dogs"))
        .and(body_json(json!(["a", "b"])))
        .and(header("cookie", COOKIE_HEADER))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([dog_json("b", "Beagle"), dog_json("a", "Beagle")])),
        )
        .mount(&server)
        .await;

    let dogs = session.fetch_dogs(&[id("a"), id("b")]).await.unwrap();

    assert_eq!(dogs.len(), 2);
    assert_eq!(dogs[0].id, id("b"));
    assert_eq!(dogs[0].zip_code, "30301");
}

#[tokio::test]
async fn test_match_returns_single_id() {
    let server = MockServer::start().await;
    let session = login(&server).await;

    Mock::given(method("POST"))
        .and(path("/dogs/match"))
        .and(body_json(json!(["a", "c"])))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"match": "c"})))
        .expect(1)
        .mount(&server)
        .await;

    let matched = session.match_dogs(&[id("a"), id("c")]).await.unwrap();
    assert_eq!(matched, id("c"));
}

// ============================================================================
// Error Handling Tests
// ============================================================================

#[tokio::test]
async fn test_expired_session_is_authentication_error() {
    let server = MockServer::start().await;
    let session = login(&server).await;

    Mock::given(method("GET"))
        .and(path("/dogs/breeds"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
        .mount(&server)
        .await;

    let err = session.list_breeds().await.unwrap_err();
    assert_eq!(err.class(), ErrorClass::Authentication);
    assert!(err.to_string().contains("401"));
}

#[tokio::test]
async fn test_server_error_is_transient() {
    let server = MockServer::start().await;
    let session = login(&server).await;

    Mock::given(method("POST"))
        .and(path("/dogs/match"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_string("Internal Server Error")
                .insert_header("content-type", "text/plain"),
        )
        .mount(&server)
        .await;

    let err = session.match_dogs(&[id("a")]).await.unwrap_err();
    assert!(err.is_retryable());
    assert!(err.to_string().contains("500"));
    assert!(err.to_string().contains("Internal Server Error"));
}

#[tokio::test]
async fn test_malformed_body_is_protocol_error() {
    let server = MockServer::start().await;
    let session = login(&server).await;

    Mock::given(method("GET"))
        .and(path("/dogs/breeds"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = session.list_breeds().await.unwrap_err();
    assert!(matches!(err, Error::Protocol(_)));
}

#[tokio::test]
async fn test_slow_response_times_out() {
    let server = MockServer::start().await;
    mount_login(&server).await;

    Mock::given(method("GET"))
        .and(path("/dogs/breeds"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([]))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let config = HttpConfig::default().with_timeout(Duration::from_millis(200));
    let service = HttpService::with_config(mock_service_url(&server), &config).unwrap();
    let session = service
        .login(Credentials::new("Ada", "ada@example.com"))
        .await
        .unwrap();

    let err = session.list_breeds().await.unwrap_err();
    assert!(matches!(err, Error::Transport(TransportError::Timeout)));
}

// ============================================================================
// Browsing Through HTTP
// ============================================================================

#[tokio::test]
async fn test_browser_pages_through_service() {
    let server = MockServer::start().await;
    let session = login(&server).await;

    let next = "/dogs/search?size=6&from=6&sort=breed:asc&breeds=Beagle";

    Mock::given(method("GET"))
        .and(path("/dogs/search"))
        .and(query_param_is_missing("from"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "resultIds": ["a", "b", "c", "d", "e", "f"],
            "total": 7,
            "next": next
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/dogs/search"))
        .and(query_param("from", "6"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "resultIds": ["g"],
            "total": 7,
            "prev": "/dogs/search?size=6&from=0&sort=breed:asc&breeds=Beagle"
        })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/dogs"))
        .and(body_json(json!(["a", "b", "c", "d", "e", "f"])))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(
            ["f", "e", "d", "c", "b", "a"]
                .iter()
                .map(|i| dog_json(i, "Beagle"))
                .collect::<Vec<_>>()
        )))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/dogs"))
        .and(body_json(json!(["g"])))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([dog_json("g", "Beagle")])))
        .mount(&server)
        .await;

    let browser = CatalogBrowser::new();
    browser.set_breed_filter(&session, "Beagle").await.unwrap();

    let ids: Vec<_> = browser.page().into_iter().map(|d| d.id).collect();
    assert_eq!(ids.first(), Some(&id("a")));
    assert_eq!(ids.len(), 6);
    assert!(browser.has_next());
    assert!(!browser.has_prev());
    assert_eq!(browser.cursor().next, Some(Cursor::new(next)));

    browser.go_next(&session).await.unwrap();
    assert_eq!(browser.page().len(), 1);
    assert!(!browser.has_next());
    assert!(browser.has_prev());
}
