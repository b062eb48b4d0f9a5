//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx queries
//! bound at runtime.
//!
//! # Repositories
//!
//! - [`PgShortUrlRepository`] - Short URL storage and redirect bookkeeping
//! - [`PgAccessLogRepository`] - Access logs and analytics queries

pub mod pg_access_log_repository;
pub mod pg_short_url_repository;

pub use pg_access_log_repository::PgAccessLogRepository;
pub use pg_short_url_repository::PgShortUrlRepository;
