//! Application layer services implementing business logic.
//!
//! Services coordinate repository calls, the code generator and the collision
//! policy, and give HTTP handlers a narrow API.
//!
//! # Available Services
//!
//! - [`services::shortener_service::ShortenerService`] - Short URL creation, resolution and lookup
//! - [`services::analytics_service::AnalyticsService`] - Access recording and analytics

pub mod services;
