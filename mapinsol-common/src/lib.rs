//! # Mapinsol Common Library
//!
//! Shared code for the Mapinsol practice catalog:
//! - Error types
//! - Configuration loading (TOML bootstrap + environment overrides)
//! - Display labels for CMS vocabulary keys
//! - Text helpers for CMS-rendered HTML fields

pub mod config;
pub mod error;
pub mod labels;
pub mod text;

pub use error::{Error, Result};
