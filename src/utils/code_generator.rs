//! Short code generation.
//!
//! Four strategies are supported, selected by [`ShortenMethod`]:
//!
//! - **Custom** - the caller-supplied alias, used verbatim
//! - **Random** - 8 base62 characters sampled uniformly from OS randomness
//! - **Hash** - first 8 characters of the URL-safe base64 SHA-256 digest
//! - **Secure** - first 12 characters of an AES-256-GCM sealed URL
//!
//! Generation is pure computation: nothing is persisted and no uniqueness is
//! checked here. Collision handling belongs to
//! [`crate::application::services::ShortenerService`].
//!
//! The Secure key is generated per call and dropped, so Secure codes cannot be
//! decrypted back into the original URL. They behave as high-entropy random tokens.

use std::fmt;
use std::str::FromStr;

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce};
use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

/// Base62 alphabet: digits, then uppercase, then lowercase.
pub const BASE62_ALPHABET: &[u8; 62] =
    b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Length of codes produced by [`ShortenMethod::Random`].
pub const RANDOM_CODE_LENGTH: usize = 8;

/// Length of codes produced by [`ShortenMethod::Hash`].
pub const HASH_CODE_LENGTH: usize = 8;

/// Length of codes produced by [`ShortenMethod::Secure`].
pub const SECURE_CODE_LENGTH: usize = 12;

/// AES-256 key size in bytes.
const KEY_SIZE: usize = 32;

/// AES-GCM nonce size in bytes.
const NONCE_SIZE: usize = 12;

/// Bytes at or above this value are rejected so that `byte % 62` stays uniform.
const REJECTION_THRESHOLD: u8 = 248;

/// Random bytes drawn per refill while sampling base62 characters.
const RANDOM_BUFFER_BYTES: usize = 16;

/// Errors produced by code generation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShortenerError {
    /// The request cannot be acted on; the caller has to correct it.
    #[error("{0}")]
    InvalidInput(String),

    /// The randomness source or cipher setup failed.
    #[error("{0}")]
    Generation(String),
}

impl ShortenerError {
    fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    fn generation(message: impl Into<String>) -> Self {
        Self::Generation(message.into())
    }
}

/// Strategy used to produce a short code.
///
/// Stored as upper-case text (`CUSTOM`, `RANDOM`, `HASH`, `SECURE`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ShortenMethod {
    Custom,
    #[default]
    Random,
    Hash,
    Secure,
}

impl ShortenMethod {
    pub const ALL: [ShortenMethod; 4] = [Self::Custom, Self::Random, Self::Hash, Self::Secure];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Custom => "CUSTOM",
            Self::Random => "RANDOM",
            Self::Hash => "HASH",
            Self::Secure => "SECURE",
        }
    }
}

impl fmt::Display for ShortenMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShortenMethod {
    type Err = ShortenerError;

    /// Parses a method name, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|method| method.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ShortenerError::invalid_input("invalid shortening method"))
    }
}

/// A single code generation request.
///
/// Built per shorten call and consumed by [`ShortenerRequest::generate`].
#[derive(Debug, Clone)]
pub struct ShortenerRequest {
    pub original_url: String,
    pub method: ShortenMethod,
    /// Required for [`ShortenMethod::Custom`], ignored otherwise.
    pub custom_alias: Option<String>,
    /// Public origin the code is appended to. Trailing slashes are ignored.
    pub base_url: String,
}

/// Outcome of a successful generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortenerResult {
    pub short_code: String,
    pub short_url: String,
}

impl ShortenerRequest {
    pub fn new(
        original_url: impl Into<String>,
        method: ShortenMethod,
        custom_alias: Option<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            original_url: original_url.into(),
            method,
            custom_alias,
            base_url: base_url.into(),
        }
    }

    /// Builds a request from a textual method name.
    ///
    /// # Errors
    ///
    /// Returns [`ShortenerError::InvalidInput`] if `method` is not a known method.
    pub fn parse(
        original_url: impl Into<String>,
        method: &str,
        custom_alias: Option<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, ShortenerError> {
        Ok(Self::new(
            original_url,
            method.parse()?,
            custom_alias,
            base_url,
        ))
    }

    /// Produces the short code and the composed short URL.
    ///
    /// # Errors
    ///
    /// - [`ShortenerError::InvalidInput`] if the Custom alias is missing or empty
    /// - [`ShortenerError::Generation`] if randomness or cipher setup fails
    pub fn generate(self) -> Result<ShortenerResult, ShortenerError> {
        let short_code = match self.method {
            ShortenMethod::Custom => match self.custom_alias {
                Some(alias) if !alias.is_empty() => alias,
                _ => return Err(ShortenerError::invalid_input("custom alias cannot be empty")),
            },
            ShortenMethod::Random => generate_random_code(RANDOM_CODE_LENGTH)?,
            ShortenMethod::Hash => generate_hash_code(&self.original_url),
            ShortenMethod::Secure => generate_secure_code(&self.original_url)?,
        };

        let short_url = compose_short_url(&self.base_url, &short_code);

        Ok(ShortenerResult {
            short_code,
            short_url,
        })
    }
}

/// Joins a base URL and a short code with exactly one `/`.
///
/// All trailing slashes are stripped from `base_url` and all leading slashes
/// from `short_code`.
pub fn compose_short_url(base_url: &str, short_code: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        short_code.trim_start_matches('/')
    )
}

/// Generates a base62 string of `length` characters.
///
/// Every character is drawn independently and uniformly from [`BASE62_ALPHABET`]
/// using reject-and-retry sampling over OS random bytes.
pub fn generate_random_code(length: usize) -> Result<String, ShortenerError> {
    let mut code = String::with_capacity(length);
    let mut buffer = [0u8; RANDOM_BUFFER_BYTES];

    while code.len() < length {
        fill_random(&mut buffer)?;
        push_base62(&buffer, &mut code, length);
    }

    Ok(code)
}

/// Hashes `url` with SHA-256 and keeps the first 8 URL-safe base64 characters.
pub fn generate_hash_code(url: &str) -> String {
    let digest = Sha256::digest(url.as_bytes());
    let mut encoded = URL_SAFE.encode(digest);
    encoded.truncate(HASH_CODE_LENGTH);
    encoded
}

/// Seals `url` under a throwaway AES-256-GCM key and keeps the first 12
/// URL-safe base64 characters of `nonce || ciphertext || tag`.
pub fn generate_secure_code(url: &str) -> Result<String, ShortenerError> {
    let mut key = [0u8; KEY_SIZE];
    fill_random(&mut key)?;

    let cipher = Aes256Gcm::new_from_slice(&key)
        .map_err(|e| ShortenerError::generation(format!("cipher setup failed: {e}")))?;

    let mut nonce = [0u8; NONCE_SIZE];
    fill_random(&mut nonce)?;

    let ciphertext = cipher
        .encrypt(Nonce::from_slice(&nonce), url.as_bytes())
        .map_err(|e| ShortenerError::generation(format!("encryption failed: {e}")))?;

    let mut sealed = Vec::with_capacity(NONCE_SIZE + ciphertext.len());
    sealed.extend_from_slice(&nonce);
    sealed.extend_from_slice(&ciphertext);

    let mut encoded = URL_SAFE.encode(sealed);
    encoded.truncate(SECURE_CODE_LENGTH);
    Ok(encoded)
}

fn fill_random(buffer: &mut [u8]) -> Result<(), ShortenerError> {
    getrandom::fill(buffer)
        .map_err(|e| ShortenerError::generation(format!("random source failed: {e}")))
}

/// Appends base62 characters for every accepted byte until `code` holds `length` chars.
fn push_base62(bytes: &[u8], code: &mut String, length: usize) {
    for &byte in bytes {
        if code.len() == length {
            return;
        }
        if byte < REJECTION_THRESHOLD {
            let index = usize::from(byte) % BASE62_ALPHABET.len();
            code.push(char::from(BASE62_ALPHABET[index]));
        }
    }
}
