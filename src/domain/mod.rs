//! Domain layer containing business entities and logic.
//!
//! Defines entities, repository interfaces and the access-logging pipeline,
//! independent of infrastructure concerns.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`access_event`] - Access tracking event model
//! - [`access_worker`] - Asynchronous access processing worker
//!
//! # Access Processing Flow
//!
//! 1. HTTP handler resolves a short code and increments its redirect count
//! 2. [`access_event::AccessEvent`] is offered to a bounded channel
//! 3. [`access_worker::run_access_worker`] persists events with retry logic
//! 4. Access data is stored via [`repositories::AccessLogRepository`]

pub mod access_event;
pub mod access_worker;
pub mod entities;
pub mod repositories;
