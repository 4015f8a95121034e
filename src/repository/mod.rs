//! Storage layer: one narrow trait per store
//!
//! The catalog service talks to the primary store and the mirror store only
//! through these traits. Each call maps to a single query or command so the
//! dual-write behavior stays visible in the service code.

pub mod memory;
pub mod mongo;
pub mod postgres;

use async_trait::async_trait;

use crate::{
    error::AppResult,
    models::{Book, NewBook},
};

pub use memory::{MemoryMirrorStore, MemoryPrimaryStore};
pub use mongo::MongoBookMirror;
pub use postgres::PgBookStore;

/// Relational source of truth for book records
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PrimaryStore: Send + Sync {
    /// Insert a record and return it with its generated id
    async fn insert(&self, book: &NewBook) -> AppResult<Book>;

    /// Records whose title, author or isbn contain `query` (case-sensitive)
    async fn search(&self, query: &str) -> AppResult<Vec<Book>>;

    /// First record (lowest id) with this ISBN
    async fn find_by_isbn(&self, isbn: &str) -> AppResult<Option<Book>>;

    /// Overwrite the quantity of one record
    async fn set_quantity(&self, id: i32, quantity: i32) -> AppResult<()>;

    async fn list(&self) -> AppResult<Vec<Book>>;

    /// Delete every record with this ISBN, returning the number removed
    async fn delete_by_isbn(&self, isbn: &str) -> AppResult<u64>;

    async fn count(&self) -> AppResult<i64>;

    async fn ping(&self) -> AppResult<()>;
}

/// Best-effort document copy of the catalog
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MirrorStore: Send + Sync {
    async fn insert(&self, book: &Book) -> AppResult<()>;

    /// Documents whose title, author or isbn match `query` (case-insensitive)
    async fn search(&self, query: &str) -> AppResult<Vec<Book>>;

    /// Add `delta` to the quantity of the document with this ISBN, no floor
    async fn adjust_quantity(&self, isbn: &str, delta: i32) -> AppResult<()>;

    async fn delete_by_isbn(&self, isbn: &str) -> AppResult<u64>;

    async fn count(&self) -> AppResult<i64>;

    async fn ping(&self) -> AppResult<()>;
}
