//! Data models for the library catalog

pub mod book;

pub use book::{Book, MessageResponse, NewBook, SearchQuery, TotalBooksResponse};
