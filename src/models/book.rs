//! Book model and request/response types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};

/// Book record as stored in either store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    /// Identifier generated by the primary store
    pub id: i32,
    pub title: String,
    pub author: String,
    /// External lookup key (not unique)
    pub isbn: String,
    /// Copies on the shelf
    pub quantity: i32,
}

/// Add book request
///
/// Every field must be present. Any `id` sent by the client is ignored.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub quantity: i32,
}

impl NewBook {
    /// Attach the identifier assigned by the primary store
    pub fn with_id(self, id: i32) -> Book {
        Book {
            id,
            title: self.title,
            author: self.author,
            isbn: self.isbn,
            quantity: self.quantity,
        }
    }
}

/// Search query string
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    /// Substring to look for in title, author or ISBN. Missing means empty.
    #[serde(default)]
    pub query: String,
}

/// Plain confirmation body
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

/// Total books body
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TotalBooksResponse {
    #[serde(rename = "totalBooks")]
    pub total_books: i64,
}
