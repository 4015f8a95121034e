//! In-process stores for local runs and tests
//!
//! Both stores can be switched into a failing state to reproduce partial
//! writes between the primary and the mirror.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{MirrorStore, PrimaryStore};
use crate::{
    error::{AppError, AppResult},
    models::{Book, NewBook},
};

fn check(failing: &AtomicBool, store: &str) -> AppResult<()> {
    if failing.load(Ordering::SeqCst) {
        return Err(AppError::Storage(format!("{} store unavailable", store)));
    }
    Ok(())
}

#[derive(Default)]
struct PrimaryState {
    rows: Vec<Book>,
    next_id: i32,
}

/// Primary store backed by a vector, ids start at 1
#[derive(Default)]
pub struct MemoryPrimaryStore {
    state: RwLock<PrimaryState>,
    failing: AtomicBool,
}

impl MemoryPrimaryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

#[async_trait]
impl PrimaryStore for MemoryPrimaryStore {
    async fn insert(&self, book: &NewBook) -> AppResult<Book> {
        check(&self.failing, "primary")?;
        let mut state = self.state.write().await;
        state.next_id += 1;
        let row = book.clone().with_id(state.next_id);
        state.rows.push(row.clone());
        Ok(row)
    }

    async fn search(&self, query: &str) -> AppResult<Vec<Book>> {
        check(&self.failing, "primary")?;
        let state = self.state.read().await;
        Ok(state
            .rows
            .iter()
            .filter(|b| b.title.contains(query) || b.author.contains(query) || b.isbn.contains(query))
            .cloned()
            .collect())
    }

    async fn find_by_isbn(&self, isbn: &str) -> AppResult<Option<Book>> {
        check(&self.failing, "primary")?;
        let state = self.state.read().await;
        Ok(state.rows.iter().find(|b| b.isbn == isbn).cloned())
    }

    async fn set_quantity(&self, id: i32, quantity: i32) -> AppResult<()> {
        check(&self.failing, "primary")?;
        let mut state = self.state.write().await;
        if let Some(row) = state.rows.iter_mut().find(|b| b.id == id) {
            row.quantity = quantity;
        }
        Ok(())
    }

    async fn list(&self) -> AppResult<Vec<Book>> {
        check(&self.failing, "primary")?;
        Ok(self.state.read().await.rows.clone())
    }

    async fn delete_by_isbn(&self, isbn: &str) -> AppResult<u64> {
        check(&self.failing, "primary")?;
        let mut state = self.state.write().await;
        let before = state.rows.len();
        state.rows.retain(|b| b.isbn != isbn);
        Ok((before - state.rows.len()) as u64)
    }

    async fn count(&self) -> AppResult<i64> {
        check(&self.failing, "primary")?;
        Ok(self.state.read().await.rows.len() as i64)
    }

    async fn ping(&self) -> AppResult<()> {
        check(&self.failing, "primary")
    }
}

/// Mirror store backed by a vector of documents
#[derive(Default)]
pub struct MemoryMirrorStore {
    docs: RwLock<Vec<Book>>,
    failing: AtomicBool,
}

impl MemoryMirrorStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Current copy of the document with this ISBN
    pub async fn get(&self, isbn: &str) -> Option<Book> {
        self.docs.read().await.iter().find(|b| b.isbn == isbn).cloned()
    }
}

#[async_trait]
impl MirrorStore for MemoryMirrorStore {
    async fn insert(&self, book: &Book) -> AppResult<()> {
        check(&self.failing, "mirror")?;
        self.docs.write().await.push(book.clone());
        Ok(())
    }

    async fn search(&self, query: &str) -> AppResult<Vec<Book>> {
        check(&self.failing, "mirror")?;
        let needle = query.to_lowercase();
        let docs = self.docs.read().await;
        Ok(docs
            .iter()
            .filter(|b| {
                b.title.to_lowercase().contains(&needle)
                    || b.author.to_lowercase().contains(&needle)
                    || b.isbn.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect())
    }

    async fn adjust_quantity(&self, isbn: &str, delta: i32) -> AppResult<()> {
        check(&self.failing, "mirror")?;
        let mut docs = self.docs.write().await;
        if let Some(doc) = docs.iter_mut().find(|b| b.isbn == isbn) {
            doc.quantity = doc.quantity.checked_add(delta).ok_or_else(|| {
                AppError::Storage(format!("mirror quantity overflow for {}", isbn))
            })?;
        }
        Ok(())
    }

    async fn delete_by_isbn(&self, isbn: &str) -> AppResult<u64> {
        check(&self.failing, "mirror")?;
        let mut docs = self.docs.write().await;
        let before = docs.len();
        docs.retain(|b| b.isbn != isbn);
        Ok((before - docs.len()) as u64)
    }

    async fn count(&self) -> AppResult<i64> {
        check(&self.failing, "mirror")?;
        Ok(self.docs.read().await.len() as i64)
    }

    async fn ping(&self) -> AppResult<()> {
        check(&self.failing, "mirror")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dune() -> NewBook {
        NewBook {
            title: "Dune".into(),
            author: "Herbert".into(),
            isbn: "111".into(),
            quantity: 2,
        }
    }

    #[tokio::test]
    async fn primary_search_is_case_sensitive() {
        let store = MemoryPrimaryStore::new();
        store.insert(&dune()).await.unwrap();

        assert_eq!(store.search("Dun").await.unwrap().len(), 1);
        assert!(store.search("dun").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn mirror_search_ignores_case_and_quantity_has_no_floor() {
        let store = MemoryMirrorStore::new();
        store.insert(&dune().with_id(1)).await.unwrap();

        assert_eq!(store.search("dUnE").await.unwrap().len(), 1);

        store.adjust_quantity("111", -3).await.unwrap();
        assert_eq!(store.get("111").await.unwrap().quantity, -1);
    }

    #[tokio::test]
    async fn mirror_quantity_overflow_is_an_error() {
        let store = MemoryMirrorStore::new();
        let mut book = dune().with_id(1);
        book.quantity = i32::MAX;
        store.insert(&book).await.unwrap();

        assert!(matches!(
            store.adjust_quantity("111", 1).await,
            Err(AppError::Storage(_))
        ));
        assert_eq!(store.get("111").await.unwrap().quantity, i32::MAX);
    }

    #[tokio::test]
    async fn failing_store_rejects_calls() {
        let store = MemoryPrimaryStore::new();
        store.set_failing(true);
        assert!(matches!(store.count().await, Err(AppError::Storage(_))));
    }
}
