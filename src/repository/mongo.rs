//! MongoDB mirror store

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, Document},
    Client, Collection, Database,
};

use super::MirrorStore;
use crate::{config::MirrorConfig, error::AppResult, models::Book};

#[derive(Clone)]
pub struct MongoBookMirror {
    database: Database,
    books: Collection<Book>,
}

impl MongoBookMirror {
    /// Connect to the mirror and check it answers
    pub async fn connect(config: &MirrorConfig) -> AppResult<Self> {
        let client = Client::with_uri_str(&config.uri).await?;
        let database = client.database(&config.database);
        let mirror = Self {
            books: database.collection::<Book>(&config.collection),
            database,
        };
        mirror.ping().await?;
        Ok(mirror)
    }
}

/// Case-insensitive filter over title, author and isbn.
///
/// The query is escaped, so it is matched literally rather than as a regex.
pub fn search_filter(query: &str) -> Document {
    let pattern = regex::escape(query);
    doc! {
        "$or": [
            { "title": { "$regex": pattern.as_str(), "$options": "i" } },
            { "author": { "$regex": pattern.as_str(), "$options": "i" } },
            { "isbn": { "$regex": pattern.as_str(), "$options": "i" } },
        ]
    }
}

/// Match the document for `isbn` only when adding `delta` keeps the quantity
/// within `i32`. `$inc` would otherwise promote the field to int64.
pub fn adjust_filter(isbn: &str, delta: i32) -> Document {
    if delta >= 0 {
        doc! { "isbn": isbn, "quantity": { "$lte": i32::MAX - delta } }
    } else {
        doc! { "isbn": isbn, "quantity": { "$gte": i32::MIN - delta } }
    }
}

#[async_trait]
impl MirrorStore for MongoBookMirror {
    async fn insert(&self, book: &Book) -> AppResult<()> {
        self.books.insert_one(book, None).await?;
        Ok(())
    }

    async fn search(&self, query: &str) -> AppResult<Vec<Book>> {
        let cursor = self.books.find(search_filter(query), None).await?;
        let books: Vec<Book> = cursor.try_collect().await?;
        Ok(books)
    }

    async fn adjust_quantity(&self, isbn: &str, delta: i32) -> AppResult<()> {
        self.books
            .update_one(adjust_filter(isbn, delta), doc! { "$inc": { "quantity": delta } }, None)
            .await?;
        Ok(())
    }

    async fn delete_by_isbn(&self, isbn: &str) -> AppResult<u64> {
        let result = self.books.delete_many(doc! { "isbn": isbn }, None).await?;
        Ok(result.deleted_count)
    }

    async fn count(&self) -> AppResult<i64> {
        let count = self.books.count_documents(doc! {}, None).await?;
        Ok(count as i64)
    }

    async fn ping(&self) -> AppResult<()> {
        self.database.run_command(doc! { "ping": 1 }, None).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{adjust_filter, search_filter};

    #[test]
    fn filter_escapes_regex_metacharacters() {
        let filter = search_filter("c++ (2nd)");
        let clauses = filter.get_array("$or").unwrap();
        assert_eq!(clauses.len(), 3);

        let title = clauses[0].as_document().unwrap().get_document("title").unwrap();
        assert_eq!(title.get_str("$regex").unwrap(), r"c\+\+ \(2nd\)");
        assert_eq!(title.get_str("$options").unwrap(), "i");
    }

    #[test]
    fn empty_query_yields_empty_pattern() {
        let filter = search_filter("");
        let isbn = filter.get_array("$or").unwrap()[2]
            .as_document()
            .unwrap()
            .get_document("isbn")
            .unwrap()
            .get_str("$regex")
            .unwrap()
            .to_string();
        assert!(isbn.is_empty());
    }

    #[test]
    fn adjust_filter_bounds_quantity_to_i32() {
        let up = adjust_filter("111", 1);
        assert_eq!(up.get_str("isbn").unwrap(), "111");
        assert_eq!(
            up.get_document("quantity").unwrap().get_i32("$lte").unwrap(),
            i32::MAX - 1
        );

        let down = adjust_filter("111", -1);
        assert_eq!(
            down.get_document("quantity").unwrap().get_i32("$gte").unwrap(),
            i32::MIN + 1
        );
    }
}
