//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod analytics;
pub mod find;
pub mod health;
pub mod redirect;
pub mod shorten;
pub mod stats;

pub use analytics::{last_access_handler, top_agents_handler, unique_ips_handler};
pub use find::find_handler;
pub use health::health_handler;
pub use redirect::{redirect_handler, redirect_put_handler};
pub use shorten::shorten_handler;
pub use stats::stats_handler;
