//! HTTP API handlers for mapinsol-catalog

pub mod health;
pub mod practices;
pub mod stats;
pub mod taxonomy;

pub use health::health_routes;
pub use practices::{get_practice, list_featured, list_latest, list_practices, list_slugs};
pub use stats::get_stats;
pub use taxonomy::{list_categories, list_tags};
