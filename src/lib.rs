//! Library catalog service
//!
//! A REST JSON API to add, search, borrow, return, list, remove and count
//! books. Records live in a PostgreSQL primary store and are copied, without
//! any transaction spanning both, to a MongoDB mirror store.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
