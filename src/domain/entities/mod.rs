//! Core domain entities.
//!
//! - [`ShortUrl`] - A persisted short code mapping with redirect bookkeeping
//! - [`AccessLog`] - A recorded redirect with client metadata
//!
//! Creation inputs use separate `New*` structs: [`NewShortUrl`], [`NewAccessLog`].

pub mod access_log;
pub mod short_url;

pub use crate::utils::code_generator::ShortenMethod;
pub use access_log::{AccessLog, NewAccessLog, UserAgentCount};
pub use short_url::{NewShortUrl, ShortUrl, UtmParams};
