//! Book endpoints

use axum::{
    extract::State,
    Json,
};

use crate::{
    error::AppResult,
    models::{Book, MessageResponse, NewBook, SearchQuery, TotalBooksResponse},
};

use super::{AppJson, AppPath, AppQuery};

/// Add a book to both stores
#[utoipa::path(
    post,
    path = "/add_book",
    tag = "books",
    request_body = NewBook,
    responses(
        (status = 200, description = "Book added", body = MessageResponse),
        (status = 400, description = "Malformed body", body = crate::error::ErrorResponse),
        (status = 500, description = "Storage error", body = crate::error::ErrorResponse)
    )
)]
pub async fn add_book(
    State(state): State<crate::AppState>,
    AppJson(book): AppJson<NewBook>,
) -> AppResult<Json<MessageResponse>> {
    state.services.catalog.add_book(book).await?;
    Ok(Json(MessageResponse::new("Book added successfully")))
}

/// Search books by title, author or ISBN
#[utoipa::path(
    get,
    path = "/search_book",
    tag = "books",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matches from the primary store, then the mirror", body = Vec<Book>),
        (status = 400, description = "Malformed query string", body = crate::error::ErrorResponse),
        (status = 500, description = "Storage error", body = crate::error::ErrorResponse)
    )
)]
pub async fn search_book(
    State(state): State<crate::AppState>,
    AppQuery(query): AppQuery<SearchQuery>,
) -> AppResult<Json<Vec<Book>>> {
    let books = state.services.catalog.search_books(&query.query).await?;
    Ok(Json(books))
}

/// Borrow one copy
#[utoipa::path(
    put,
    path = "/borrow_book/{isbn}",
    tag = "books",
    params(("isbn" = String, Path, description = "Book ISBN")),
    responses(
        (status = 200, description = "Book borrowed", body = MessageResponse),
        (status = 400, description = "No copy available", body = crate::error::ErrorResponse),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse),
        (status = 500, description = "Storage error", body = crate::error::ErrorResponse)
    )
)]
pub async fn borrow_book(
    State(state): State<crate::AppState>,
    AppPath(isbn): AppPath<String>,
) -> AppResult<Json<MessageResponse>> {
    state.services.catalog.borrow_book(&isbn).await?;
    Ok(Json(MessageResponse::new("Book borrowed successfully")))
}

/// Return one copy
#[utoipa::path(
    put,
    path = "/return_book/{isbn}",
    tag = "books",
    params(("isbn" = String, Path, description = "Book ISBN")),
    responses(
        (status = 200, description = "Book returned", body = MessageResponse),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse),
        (status = 500, description = "Storage error", body = crate::error::ErrorResponse)
    )
)]
pub async fn return_book(
    State(state): State<crate::AppState>,
    AppPath(isbn): AppPath<String>,
) -> AppResult<Json<MessageResponse>> {
    state.services.catalog.return_book(&isbn).await?;
    Ok(Json(MessageResponse::new("Book returned successfully")))
}

/// List every book in the primary store
#[utoipa::path(
    get,
    path = "/list_books",
    tag = "books",
    responses(
        (status = 200, description = "All books", body = Vec<Book>),
        (status = 500, description = "Storage error", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_books(State(state): State<crate::AppState>) -> AppResult<Json<Vec<Book>>> {
    let books = state.services.catalog.list_books().await?;
    Ok(Json(books))
}

/// Remove every record with this ISBN
#[utoipa::path(
    delete,
    path = "/remove_book/{isbn}",
    tag = "books",
    params(("isbn" = String, Path, description = "Book ISBN")),
    responses(
        (status = 200, description = "Book removed", body = MessageResponse),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse),
        (status = 500, description = "Storage error", body = crate::error::ErrorResponse)
    )
)]
pub async fn remove_book(
    State(state): State<crate::AppState>,
    AppPath(isbn): AppPath<String>,
) -> AppResult<Json<MessageResponse>> {
    state.services.catalog.remove_book(&isbn).await?;
    Ok(Json(MessageResponse::new("Book removed successfully")))
}

/// Total books, averaged across both stores
#[utoipa::path(
    get,
    path = "/total_books",
    tag = "books",
    responses(
        (status = 200, description = "Book count", body = TotalBooksResponse),
        (status = 500, description = "Storage error", body = crate::error::ErrorResponse)
    )
)]
pub async fn total_books(
    State(state): State<crate::AppState>,
) -> AppResult<Json<TotalBooksResponse>> {
    let total_books = state.services.catalog.total_books().await?;
    Ok(Json(TotalBooksResponse { total_books }))
}
