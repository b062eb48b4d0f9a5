//! Short URL creation, resolution and lookup service.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::json;
use tracing::{debug, info};

use crate::domain::entities::{NewShortUrl, ShortUrl, ShortenMethod, UtmParams};
use crate::domain::repositories::ShortUrlRepository;
use crate::error::AppError;
use crate::utils::code_generator::ShortenerRequest;

/// Upper bound on regenerations for Random and Secure codes.
const MAX_GENERATION_ATTEMPTS: usize = 10;

/// Aliases shadowed by fixed routes at `/` or `/v1/shorten/`.
const RESERVED_ALIASES: &[&str] = &["health", "v1", "find", "last", "top-agents", "ips"];

/// Validated input for creating a short URL.
#[derive(Debug, Clone)]
pub struct ShortenInput {
    pub url: String,
    pub method: ShortenMethod,
    pub custom_alias: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
    pub utm: UtmParams,
}

impl ShortenInput {
    /// Input with default options for the given URL and method.
    pub fn new(url: impl Into<String>, method: ShortenMethod) -> Self {
        Self {
            url: url.into(),
            method,
            custom_alias: None,
            expires_at: None,
            utm: UtmParams::default(),
        }
    }
}

/// Service for creating and resolving short URLs.
///
/// Runs the code generator against the configured base URL and applies the
/// collision policy of each method before inserting.
pub struct ShortenerService<R: ShortUrlRepository> {
    repository: Arc<R>,
    base_url: String,
}

impl<R: ShortUrlRepository> ShortenerService<R> {
    /// Creates a new shortener service.
    pub fn new(repository: Arc<R>, base_url: impl Into<String>) -> Self {
        Self {
            repository,
            base_url: base_url.into(),
        }
    }

    /// Generates a short code for `input` and stores it.
    ///
    /// # Collision Handling
    ///
    /// - Custom: a taken alias is a conflict
    /// - Hash: the same URL returns the existing record, a different URL is a conflict
    /// - Random and Secure: regenerated up to 10 times
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the Custom alias is missing, empty,
    /// reserved by a route or contains `/`, `?` or `#`.
    /// Returns [`AppError::Conflict`] on an unresolvable code collision.
    /// Returns [`AppError::Internal`] if generation fails or collisions persist.
    pub async fn create(&self, input: ShortenInput) -> Result<ShortUrl, AppError> {
        if input.method == ShortenMethod::Custom
            && let Some(alias) = input.custom_alias.as_deref()
        {
            ensure_routable_alias(alias)?;
        }

        let attempts = match input.method {
            ShortenMethod::Random | ShortenMethod::Secure => MAX_GENERATION_ATTEMPTS,
            ShortenMethod::Custom | ShortenMethod::Hash => 1,
        };

        for attempt in 1..=attempts {
            let generated = ShortenerRequest::new(
                input.url.clone(),
                input.method,
                input.custom_alias.clone(),
                self.base_url.clone(),
            )
            .generate()?;

            if let Some(existing) = self
                .repository
                .find_by_code(&generated.short_code)
                .await?
            {
                match input.method {
                    ShortenMethod::Hash if existing.original_url == input.url => {
                        debug!(short_code = %existing.short_code, "Returning existing hash code");
                        return Ok(existing);
                    }
                    ShortenMethod::Hash => {
                        return Err(AppError::conflict(
                            "Hash code already used by a different URL",
                            json!({ "short_code": generated.short_code }),
                        ));
                    }
                    ShortenMethod::Custom => {
                        return Err(AppError::conflict(
                            "Custom alias already exists",
                            json!({ "short_code": generated.short_code }),
                        ));
                    }
                    ShortenMethod::Random | ShortenMethod::Secure => {
                        debug!(attempt, "Short code collision, regenerating");
                        continue;
                    }
                }
            }

            let new_short_url = NewShortUrl {
                original_url: input.url.clone(),
                short_code: generated.short_code,
                short_url: generated.short_url,
                method: input.method,
                expires_at: input.expires_at,
                utm: input.utm.clone(),
            };

            let created = self.repository.create(new_short_url).await?;

            metrics::counter!("shortener_links_created_total", "method" => input.method.as_str())
                .increment(1);
            info!(
                short_code = %created.short_code,
                method = %created.method,
                "Short URL created"
            );

            return Ok(created);
        }

        Err(AppError::internal(
            "Failed to generate unique code",
            json!({ "reason": "Too many collisions" }),
        ))
    }

    /// Retrieves a short URL and its statistics by code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no short URL matches the code.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn get_by_code(&self, short_code: &str) -> Result<ShortUrl, AppError> {
        self.repository
            .find_by_code(short_code)
            .await?
            .ok_or_else(|| short_url_not_found(short_code))
    }

    /// Records a redirect and returns the updated short URL.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no short URL matches the code.
    /// Returns [`AppError::Gone`] if the short URL has expired.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn resolve(&self, short_code: &str) -> Result<ShortUrl, AppError> {
        if let Some(short_url) = self.repository.increment_redirect_count(short_code).await? {
            metrics::counter!("shortener_redirects_total").increment(1);
            return Ok(short_url);
        }

        match self.repository.find_by_code(short_code).await? {
            Some(short_url) if short_url.is_expired() => Err(AppError::gone(
                "Short URL has expired",
                json!({ "short_code": short_code, "expires_at": short_url.expires_at }),
            )),
            _ => Err(short_url_not_found(short_code)),
        }
    }

    /// Finds a short URL by its composed short URL, code or original URL.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if nothing matches.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn find_by_url(&self, url: &str) -> Result<ShortUrl, AppError> {
        self.repository
            .find_by_url(url)
            .await?
            .ok_or_else(|| AppError::not_found("Short URL not found", json!({ "url": url })))
    }

    /// Counts all stored short URLs.
    pub async fn count(&self) -> Result<i64, AppError> {
        self.repository.count().await
    }
}

fn short_url_not_found(short_code: &str) -> AppError {
    AppError::not_found("Short URL not found", json!({ "short_code": short_code }))
}

/// Rejects aliases that could never be resolved through `GET /{code}`.
fn ensure_routable_alias(alias: &str) -> Result<(), AppError> {
    if RESERVED_ALIASES.contains(&alias) {
        return Err(AppError::bad_request(
            "Custom alias is reserved",
            json!({ "custom_alias": alias }),
        ));
    }

    if alias.contains(['/', '?', '#']) {
        return Err(AppError::bad_request(
            "Custom alias cannot contain '/', '?' or '#'",
            json!({ "custom_alias": alias }),
        ));
    }

    Ok(())
}
