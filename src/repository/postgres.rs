//! PostgreSQL primary store

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use super::PrimaryStore;
use crate::{
    error::AppResult,
    models::{Book, NewBook},
};

#[derive(Clone)]
pub struct PgBookStore {
    pool: Pool<Postgres>,
}

impl PgBookStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

/// Build a `LIKE` pattern matching `query` as a literal substring.
///
/// `%`, `_` and the escape character itself are escaped so user input never
/// acts as a wildcard.
pub fn like_pattern(query: &str) -> String {
    let mut pattern = String::with_capacity(query.len() + 2);
    pattern.push('%');
    for c in query.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[async_trait]
impl PrimaryStore for PgBookStore {
    async fn insert(&self, book: &NewBook) -> AppResult<Book> {
        let row = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (title, author, isbn, quantity)
            VALUES ($1, $2, $3, $4)
            RETURNING id, title, author, isbn, quantity
            "#,
        )
        .bind(&book.title)
        .bind(&book.author)
        .bind(&book.isbn)
        .bind(book.quantity)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn search(&self, query: &str) -> AppResult<Vec<Book>> {
        let rows = sqlx::query_as::<_, Book>(
            r#"
            SELECT id, title, author, isbn, quantity FROM books
            WHERE title LIKE $1 ESCAPE '\'
               OR author LIKE $1 ESCAPE '\'
               OR isbn LIKE $1 ESCAPE '\'
            ORDER BY id
            "#,
        )
        .bind(like_pattern(query))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn find_by_isbn(&self, isbn: &str) -> AppResult<Option<Book>> {
        let row = sqlx::query_as::<_, Book>(
            "SELECT id, title, author, isbn, quantity FROM books WHERE isbn = $1 ORDER BY id LIMIT 1",
        )
        .bind(isbn)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn set_quantity(&self, id: i32, quantity: i32) -> AppResult<()> {
        sqlx::query("UPDATE books SET quantity = $1 WHERE id = $2")
            .bind(quantity)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn list(&self) -> AppResult<Vec<Book>> {
        let rows = sqlx::query_as::<_, Book>(
            "SELECT id, title, author, isbn, quantity FROM books ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn delete_by_isbn(&self, isbn: &str) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM books WHERE isbn = $1")
            .bind(isbn)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
