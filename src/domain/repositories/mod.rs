//! Repository trait definitions for the domain layer.
//!
//! Traits define the data-access contract; PostgreSQL implementations live in
//! `crate::infrastructure::persistence`. Mock implementations are generated
//! with `mockall` for unit tests.
//!
//! # Available Repositories
//!
//! - [`ShortUrlRepository`] - Short URL storage and redirect bookkeeping
//! - [`AccessLogRepository`] - Access logs and analytics queries
//!
//! # Testing
//!
//! See integration tests in `tests/repository_*.rs`.

pub mod access_log_repository;
pub mod short_url_repository;

pub use access_log_repository::AccessLogRepository;
pub use short_url_repository::ShortUrlRepository;

#[cfg(test)]
pub use access_log_repository::MockAccessLogRepository;
#[cfg(test)]
pub use short_url_repository::MockShortUrlRepository;
