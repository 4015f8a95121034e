//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{books, health};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Library Catalog API",
        version = "0.1.0",
        description = "Book catalog with a relational primary store and a document mirror"
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Books
        books::add_book,
        books::search_book,
        books::borrow_book,
        books::return_book,
        books::list_books,
        books::remove_book,
        books::total_books,
    ),
    components(
        schemas(
            crate::models::Book,
            crate::models::NewBook,
            crate::models::SearchQuery,
            crate::models::MessageResponse,
            crate::models::TotalBooksResponse,
            health::HealthResponse,
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "books", description = "Catalog operations")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
