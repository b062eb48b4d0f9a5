mod common;

use chrono::{Duration, Utc};
use sqlx::PgPool;
use std::sync::Arc;
use url_sh::domain::entities::{NewShortUrl, ShortenMethod, UtmParams};
use url_sh::domain::repositories::ShortUrlRepository;
use url_sh::error::AppError;
use url_sh::infrastructure::persistence::PgShortUrlRepository;

fn new_short_url(code: &str, url: &str) -> NewShortUrl {
    NewShortUrl {
        original_url: url.to_string(),
        short_code: code.to_string(),
        short_url: format!("{}/{code}", common::BASE_URL),
        method: ShortenMethod::Custom,
        expires_at: None,
        utm: UtmParams::default(),
    }
}

#[sqlx::test]
async fn test_create_short_url(pool: PgPool) {
    let repo = PgShortUrlRepository::new(Arc::new(pool));

    let mut new = new_short_url("create1", "https://example.com");
    new.utm.source = Some("newsletter".to_string());

    let created = repo.create(new).await.unwrap();

    assert_eq!(created.short_code, "create1");
    assert_eq!(created.method, ShortenMethod::Custom);
    assert_eq!(created.redirect_count, 0);
    assert!(created.last_accessed.is_none());
    assert_eq!(created.utm.source.as_deref(), Some("newsletter"));
}

#[sqlx::test]
async fn test_create_duplicate_code_is_conflict(pool: PgPool) {
    let repo = PgShortUrlRepository::new(Arc::new(pool));

    repo.create(new_short_url("dup", "https://a.example"))
        .await
        .unwrap();
    let result = repo.create(new_short_url("dup", "https://b.example")).await;

    assert!(matches!(result.unwrap_err(), AppError::Conflict { .. }));
}

#[sqlx::test]
async fn test_find_by_code_not_found(pool: PgPool) {
    let repo = PgShortUrlRepository::new(Arc::new(pool));

    let result = repo.find_by_code("notfound").await.unwrap();

    assert!(result.is_none());
}

#[sqlx::test]
async fn test_find_by_url_prefers_newest(pool: PgPool) {
    let repo = PgShortUrlRepository::new(Arc::new(pool));

    repo.create(new_short_url("older", "https://same.example"))
        .await
        .unwrap();
    let newer = repo
        .create(new_short_url("newer", "https://same.example"))
        .await
        .unwrap();

    let found = repo
        .find_by_url("https://same.example")
        .await
        .unwrap()
        .unwrap();

    assert_eq!(found.id, newer.id);
}

#[sqlx::test]
async fn test_increment_redirect_count(pool: PgPool) {
    let repo = PgShortUrlRepository::new(Arc::new(pool));

    repo.create(new_short_url("inc", "https://example.com"))
        .await
        .unwrap();

    repo.increment_redirect_count("inc").await.unwrap();
    let updated = repo.increment_redirect_count("inc").await.unwrap().unwrap();

    assert_eq!(updated.redirect_count, 2);
    assert!(updated.last_accessed.is_some());
}

#[sqlx::test]
async fn test_increment_skips_expired_and_missing(pool: PgPool) {
    let repo = PgShortUrlRepository::new(Arc::new(pool));

    let mut expired = new_short_url("expired", "https://example.com");
    expired.expires_at = Some(Utc::now() - Duration::minutes(5));
    repo.create(expired).await.unwrap();

    assert!(repo.increment_redirect_count("expired").await.unwrap().is_none());
    assert!(repo.increment_redirect_count("missing").await.unwrap().is_none());

    let stored = repo.find_by_code("expired").await.unwrap().unwrap();
    assert_eq!(stored.redirect_count, 0);
}

#[sqlx::test]
async fn test_count(pool: PgPool) {
    let repo = PgShortUrlRepository::new(Arc::new(pool));

    repo.create(new_short_url("c1", "https://example.com/1"))
        .await
        .unwrap();
    repo.create(new_short_url("c2", "https://example.com/2"))
        .await
        .unwrap();

    assert_eq!(repo.count().await.unwrap(), 2);
}
