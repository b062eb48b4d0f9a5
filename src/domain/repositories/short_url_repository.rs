//! Repository trait for short URL data access.

use crate::domain::entities::{NewShortUrl, ShortUrl};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for persisted short URLs.
///
/// Short-code uniqueness is enforced by the storage layer.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgShortUrlRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShortUrlRepository: Send + Sync {
    /// Persists a new short URL.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the short code is already taken.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_short_url: NewShortUrl) -> Result<ShortUrl, AppError>;

    /// Finds a short URL by its code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_code(&self, short_code: &str) -> Result<Option<ShortUrl>, AppError>;

    /// Finds the newest short URL whose composed short URL, short code or
    /// original URL equals `url`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_url(&self, url: &str) -> Result<Option<ShortUrl>, AppError>;

    /// Increments the redirect count and stamps `last_accessed` for a
    /// non-expired code, returning the updated row.
    ///
    /// Returns `Ok(None)` if the code does not exist or has expired.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn increment_redirect_count(
        &self,
        short_code: &str,
    ) -> Result<Option<ShortUrl>, AppError>;

    /// Counts all stored short URLs.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn count(&self) -> Result<i64, AppError>;
}
