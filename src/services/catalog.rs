//! Catalog service
//!
//! Every operation hits the primary store first and then, for mutations,
//! repeats the change on the mirror. The two writes are independent: a mirror
//! failure after a committed primary write is reported to the caller but
//! nothing is rolled back, so the stores may diverge.

use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::{Book, NewBook},
    repository::{MirrorStore, PrimaryStore},
};

#[derive(Clone)]
pub struct CatalogService {
    primary: Arc<dyn PrimaryStore>,
    mirror: Option<Arc<dyn MirrorStore>>,
}

/// Log a mirror failure that follows a committed primary write
fn diverged(operation: &str, isbn: &str, err: AppError) -> AppError {
    tracing::warn!(
        operation,
        isbn,
        error = %err,
        "Mirror write failed after primary commit, stores may have diverged"
    );
    err
}

impl CatalogService {
    pub fn new(primary: Arc<dyn PrimaryStore>, mirror: Option<Arc<dyn MirrorStore>>) -> Self {
        Self { primary, mirror }
    }

    /// Insert into the primary, then copy the created record to the mirror
    pub async fn add_book(&self, book: NewBook) -> AppResult<Book> {
        let created = self.primary.insert(&book).await?;
        tracing::info!(id = created.id, isbn = %created.isbn, "Book added");

        if let Some(mirror) = &self.mirror {
            mirror
                .insert(&created)
                .await
                .map_err(|e| diverged("add", &created.isbn, e))?;
        }
        Ok(created)
    }

    /// Primary matches followed by mirror matches, duplicates kept
    pub async fn search_books(&self, query: &str) -> AppResult<Vec<Book>> {
        let mut books = self.primary.search(query).await?;
        if let Some(mirror) = &self.mirror {
            books.extend(mirror.search(query).await?);
        }
        Ok(books)
    }

    /// Take one copy off the shelf. Returns the primary record after the update.
    pub async fn borrow_book(&self, isbn: &str) -> AppResult<Book> {
        let mut book = self.find(isbn).await?;
        if book.quantity <= 0 {
            return Err(AppError::Unavailable("Book not available".to_string()));
        }

        book.quantity -= 1;
        self.primary.set_quantity(book.id, book.quantity).await?;

        // no stock check on the mirror side
        if let Some(mirror) = &self.mirror {
            mirror
                .adjust_quantity(isbn, -1)
                .await
                .map_err(|e| diverged("borrow", isbn, e))?;
        }
        Ok(book)
    }

    /// Put one copy back, whatever the current quantity
    pub async fn return_book(&self, isbn: &str) -> AppResult<Book> {
        let mut book = self.find(isbn).await?;

        book.quantity = book
            .quantity
            .checked_add(1)
            .ok_or_else(|| AppError::Validation("Book quantity is at its maximum".to_string()))?;
        self.primary.set_quantity(book.id, book.quantity).await?;

        if let Some(mirror) = &self.mirror {
            mirror
                .adjust_quantity(isbn, 1)
                .await
                .map_err(|e| diverged("return", isbn, e))?;
        }
        Ok(book)
    }

    /// Primary store only
    pub async fn list_books(&self) -> AppResult<Vec<Book>> {
        self.primary.list().await
    }

    /// Delete from both stores. The mirror delete runs even when the primary
    /// had no matching row.
    pub async fn remove_book(&self, isbn: &str) -> AppResult<()> {
        let removed = self.primary.delete_by_isbn(isbn).await?;

        if let Some(mirror) = &self.mirror {
            mirror
                .delete_by_isbn(isbn)
                .await
                .map_err(|e| diverged("remove", isbn, e))?;
        }

        if removed == 0 {
            return Err(AppError::NotFound("Book not found".to_string()));
        }
        tracing::info!(isbn, removed, "Book removed");
        Ok(())
    }

    /// `(primary + mirror) / 2` with integer division, or the primary count
    /// alone in single-store mode
    pub async fn total_books(&self) -> AppResult<i64> {
        let primary = self.primary.count().await?;
        match &self.mirror {
            Some(mirror) => {
                let mirrored = mirror.count().await?;
                Ok((primary + mirrored) / 2)
            }
            None => Ok(primary),
        }
    }

    /// Check every configured store answers
    pub async fn ping(&self) -> AppResult<()> {
        self.primary.ping().await?;
        if let Some(mirror) = &self.mirror {
            mirror.ping().await?;
        }
        Ok(())
    }

    async fn find(&self, isbn: &str) -> AppResult<Book> {
        self.primary
            .find_by_isbn(isbn)
            .await?
            .ok_or_else(|| AppError::NotFound("Book not found".to_string()))
    }
}
