//! Tests for the repository module

use super::*;
use crate::auth::{AuthConfig, AuthSession, Authenticator};
use crate::error::Error;
use crate::http::{HttpClient, HttpClientConfig};
use crate::types::{ArticleId, User};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// Helpers
// ============================================================================

#[test]
fn test_parse_max_index() {
    assert_eq!(parse_max_index(Some("41")), 41);
    assert_eq!(parse_max_index(Some(" 7 ")), 7);
    assert_eq!(parse_max_index(Some("seven")), DEFAULT_MAX_INDEX);
    assert_eq!(parse_max_index(Some("-3")), DEFAULT_MAX_INDEX);
    assert_eq!(parse_max_index(None), DEFAULT_MAX_INDEX);
}

#[test]
fn test_top_indexes_default() {
    assert_eq!(top_indexes_or_default(None), vec![ArticleId::new("0")]);
    assert!(top_indexes_or_default(Some(vec![])).is_empty());
}

// ============================================================================
// MemoryStore
// ============================================================================

#[tokio::test]
async fn test_memory_store_articles() {
    let store = MemoryStore::with_articles(3);

    let article = store.fetch_by_id(&ArticleId::new("2")).await.unwrap();
    assert_eq!(article.en_title.as_deref(), Some("Article 2"));
    assert_eq!(store.fetch_max_index().await.unwrap(), 3);

    let err = store.fetch_by_id(&ArticleId::new("9")).await.unwrap_err();
    assert!(matches!(err, Error::NotFound { ref id } if id == "9"));

    assert_eq!(
        store.fetch_log().await,
        vec![ArticleId::new("2"), ArticleId::new("9")]
    );
}

#[tokio::test]
async fn test_memory_store_broken_article() {
    let store = MemoryStore::with_articles(1);
    store.break_article(&ArticleId::new("1")).await;

    let err = store.fetch_by_id(&ArticleId::new("1")).await.unwrap_err();
    assert!(matches!(err, Error::HttpStatus { status: 500, .. }));
}

#[tokio::test]
async fn test_memory_store_update_likes() {
    let store = MemoryStore::with_articles(1);
    let id = ArticleId::new("1");

    store.update_likes(&id, 12).await.unwrap();
    assert_eq!(store.article(&id).await.unwrap().likes_count, Some(12));

    assert!(store.update_likes(&ArticleId::new("5"), 1).await.is_err());
}

#[tokio::test]
async fn test_memory_store_users() {
    let store = MemoryStore::new();
    assert!(matches!(
        store.fetch_current_user().await,
        Err(Error::Unauthenticated)
    ));

    store.sign_in(User::new("u1")).await;
    let id = ArticleId::new("4");

    store.add_liked_post("u1", &id).await.unwrap();
    store.add_liked_post("u1", &id).await.unwrap();
    assert_eq!(store.user("u1").await.unwrap().liked(), &[id.clone()]);

    store.remove_liked_post("u1", &id).await.unwrap();
    assert!(store.user("u1").await.unwrap().liked().is_empty());

    store.increment_articles_read("u1", 6).await.unwrap();
    store.change_name("u1", "Tim").await.unwrap();

    let user = store.fetch_current_user().await.unwrap();
    assert_eq!(user.articles_read, Some(7));
    assert_eq!(user.name.as_deref(), Some("Tim"));

    store.sign_out().await;
    assert!(store.fetch_current_user().await.is_err());
}

#[tokio::test]
async fn test_arc_repository_forwarding() {
    let store = std::sync::Arc::new(MemoryStore::with_articles(2));
    let repo: &dyn ArticleRepository = &store;
    assert_eq!(repo.fetch_max_index().await.unwrap(), 2);
}

// ============================================================================
// HttpStore
// ============================================================================

fn http_store(server: &MockServer, auth: Authenticator) -> HttpStore {
    let config = HttpClientConfig::builder()
        .base_url(server.uri())
        .no_rate_limit()
        .build();
    HttpStore::new(HttpClient::with_auth(config, auth).unwrap())
}

#[tokio::test]
async fn test_http_store_fetch_article() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/articles/5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "5",
            "en_title": "Borrowing",
            "date_created": "2024-12-19T10:00:00Z",
            "likes_count": 3,
            "is_premium": false
        })))
        .mount(&server)
        .await;

    let store = http_store(&server, Authenticator::default());
    let article = store.fetch_by_id(&ArticleId::new("5")).await.unwrap();

    assert_eq!(article.en_title.as_deref(), Some("Borrowing"));
    assert_eq!(article.likes(), 3);
    assert!(article.date_created.is_some());
}

#[tokio::test]
async fn test_http_store_missing_article_is_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/articles/8"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let store = http_store(&server, Authenticator::default());
    let err = store.fetch_by_id(&ArticleId::new("8")).await.unwrap_err();
    assert!(matches!(err, Error::NotFound { ref id } if id == "8"));
}

#[tokio::test]
async fn test_http_store_index_documents() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/maxIndex/0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"max_index": "41"})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/topArticlesIndexes/0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "top_articles_indexes": ["3", "7", "12", "20", "33"]
        })))
        .mount(&server)
        .await;

    let store = http_store(&server, Authenticator::default());

    assert_eq!(store.fetch_max_index().await.unwrap(), 41);
    let top = store.fetch_top_indexes().await.unwrap();
    assert_eq!(top.len(), 5);
    assert_eq!(top[1], ArticleId::new("7"));
}

#[tokio::test]
async fn test_http_store_index_fallbacks() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/maxIndex/0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/topArticlesIndexes/0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let store = http_store(&server, Authenticator::default());

    assert_eq!(store.fetch_max_index().await.unwrap(), DEFAULT_MAX_INDEX);
    assert_eq!(
        store.fetch_top_indexes().await.unwrap(),
        vec![ArticleId::new("0")]
    );
}

#[tokio::test]
async fn test_http_store_current_user() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/u1"))
        .and(header("Authorization", "Bearer tok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "u1",
            "name": "Tim",
            "liked_posts": ["2"],
            "articles_read": 4
        })))
        .mount(&server)
        .await;

    let signed_out = http_store(&server, Authenticator::default());
    assert!(matches!(
        signed_out.fetch_current_user().await,
        Err(Error::Unauthenticated)
    ));

    let auth = Authenticator::with_session(AuthConfig::None, AuthSession::new("u1").with_token("tok"));
    let store = http_store(&server, auth);
    let user = store.fetch_current_user().await.unwrap();
    assert_eq!(user.name.as_deref(), Some("Tim"));
    assert_eq!(user.liked(), &[ArticleId::new("2")]);
}

#[tokio::test]
async fn test_http_store_user_updates() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/u1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "u1",
            "liked_posts": ["2"]
        })))
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/users/u1"))
        .and(body_json(json!({"liked_posts": ["2", "9"]})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/users/u1"))
        .and(body_json(json!({"liked_posts": []})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/users/u1"))
        .and(body_json(json!({"articles_read": 5})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let store = http_store(&server, Authenticator::default());

    store.add_liked_post("u1", &ArticleId::new("9")).await.unwrap();
    store.remove_liked_post("u1", &ArticleId::new("2")).await.unwrap();
    store.increment_articles_read("u1", 4).await.unwrap();
}

async fn mount_versioned_user(server: &MockServer, etag: &str) {
    Mock::given(method("GET"))
        .and(path("/users/u1"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("ETag", etag)
                .set_body_json(json!({"id": "u1", "liked_posts": ["2"]})),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_http_store_liked_posts_write_is_conditional() {
    let server = MockServer::start().await;
    mount_versioned_user(&server, "\"v3\"").await;
    Mock::given(method("PATCH"))
        .and(path("/users/u1"))
        .and(header("If-Match", "\"v3\""))
        .and(body_json(json!({"liked_posts": ["2", "9"]})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let store = http_store(&server, Authenticator::default());
    store.add_liked_post("u1", &ArticleId::new("9")).await.unwrap();
}

#[tokio::test]
async fn test_http_store_liked_posts_conflict_is_retried() {
    let server = MockServer::start().await;
    mount_versioned_user(&server, "\"v3\"").await;
    Mock::given(method("PATCH"))
        .and(path("/users/u1"))
        .respond_with(ResponseTemplate::new(412))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/users/u1"))
        .and(body_json(json!({"liked_posts": []})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let store = http_store(&server, Authenticator::default());
    store.remove_liked_post("u1", &ArticleId::new("2")).await.unwrap();
}

#[tokio::test]
async fn test_http_store_liked_posts_gives_up_after_conflicts() {
    let server = MockServer::start().await;
    mount_versioned_user(&server, "\"v3\"").await;
    Mock::given(method("PATCH"))
        .and(path("/users/u1"))
        .respond_with(ResponseTemplate::new(412))
        .expect(LIKED_POSTS_ATTEMPTS as u64)
        .mount(&server)
        .await;

    let store = http_store(&server, Authenticator::default());
    let err = store
        .add_liked_post("u1", &ArticleId::new("9"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::HttpStatus { status: 412, .. }));
}

#[tokio::test]
async fn test_http_store_update_likes() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/articles/3"))
        .and(body_json(json!({"likes_count": 11})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let store = http_store(&server, Authenticator::default());
    store.update_likes(&ArticleId::new("3"), 11).await.unwrap();
}

#[tokio::test]
async fn test_http_store_fetch_image() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/images/3.jpg"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0xFF, 0xD8, 0xFF]))
        .mount(&server)
        .await;

    let store = http_store(&server, Authenticator::default());

    let bytes = store.fetch_image(&ArticleId::new("3")).await.unwrap();
    assert_eq!(bytes, vec![0xFF, 0xD8, 0xFF]);

    let err = store.fetch_image(&ArticleId::new("4")).await.unwrap_err();
    match err {
        Error::NotFound { id } => assert_eq!(id, "4"),
        other => panic!("Expected NotFound, got {other:?}"),
    }
}
