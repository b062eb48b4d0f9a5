//! DTOs for the shortening endpoint.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::json;
use validator::Validate;

use crate::application::services::ShortenInput;
use crate::domain::entities::{ShortenMethod, UtmParams};
use crate::error::AppError;

/// Request to shorten a single URL.
///
/// `method` is case-insensitive and defaults to `RANDOM`.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    /// The original URL (must be absolute).
    #[validate(url(message = "Invalid URL format"))]
    pub url: String,

    pub method: Option<String>,

    /// Required when `method` is `CUSTOM`; used verbatim as the short code.
    pub custom_alias: Option<String>,

    /// After this time the short URL answers 410 Gone.
    pub expires_at: Option<DateTime<Utc>>,

    pub utm_source: Option<String>,
    pub utm_medium: Option<String>,
    pub utm_campaign: Option<String>,
    pub utm_term: Option<String>,
    pub utm_content: Option<String>,
}

impl ShortenRequest {
    /// Validates the request and converts it into service input.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if:
    /// - `url` is not an absolute URL
    /// - `url` is longer than `max_url_length` characters
    /// - `method` is not a known shortening method
    pub fn into_input(self, max_url_length: usize) -> Result<ShortenInput, AppError> {
        self.validate()?;

        let length = self.url.chars().count();
        if length > max_url_length {
            return Err(AppError::bad_request(
                "URL is too long",
                json!({ "length": length, "max": max_url_length }),
            ));
        }

        let method = match self.method.as_deref() {
            Some(method) => method.parse::<ShortenMethod>()?,
            None => ShortenMethod::default(),
        };

        Ok(ShortenInput {
            url: self.url,
            method,
            custom_alias: self.custom_alias,
            expires_at: self.expires_at,
            utm: UtmParams {
                source: self.utm_source,
                medium: self.utm_medium,
                campaign: self.utm_campaign,
                term: self.utm_term,
                content: self.utm_content,
            },
        })
    }
}
