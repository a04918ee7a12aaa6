//! # stillpoint-core
//!
//! Core library for stillpoint - a meditation-practice journal with an
//! analytics engine.
//!
//! This library provides:
//! - Domain types for practice sessions and journal entries
//! - Database storage layer with SQLite
//! - The practice analytics engine (heatmaps, streaks, overviews)
//! - Configuration management
//! - Logging infrastructure
//!
//! ## Example
//!
//! ```rust,no_run
//! use stillpoint_core::{AnalyticsService, Config, Database, ViewMode};
//! use std::sync::Arc;
//!
//! let config = Config::load().expect("failed to load config");
//! let db = Database::open(&Config::database_path()).expect("failed to open database");
//! db.migrate().expect("failed to run migrations");
//!
//! let engine = AnalyticsService::new(Arc::new(db), config.analytics.clone());
//! let heatmap = engine.get_heatmap("user-1", 2026, ViewMode::Duration);
//! ```

// Re-export commonly used items at the crate root
pub use analytics::{AnalyticsService, OverviewStats};
pub use config::Config;
pub use db::Database;
pub use error::{Error, Result};
pub use types::*;

// Public modules
pub mod analytics;
pub mod cache;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod types;
