//! HTTP handlers and router for the catalog endpoints

pub mod books;
pub mod health;
pub mod openapi;

use axum::{
    async_trait,
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        FromRequest, FromRequestParts, Path, Query, Request,
    },
    http::{request::Parts, Method, Uri},
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::de::DeserializeOwned;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{error::AppError, AppState};

/// JSON body extractor whose rejections become `ValidationError` (400)
pub struct AppJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for AppJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection: JsonRejection| AppError::Validation(rejection.body_text()))?;
        Ok(AppJson(value))
    }
}

/// Path parameter extractor with JSON rejections
pub struct AppPath<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for AppPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection: PathRejection| AppError::Validation(rejection.body_text()))?;
        Ok(AppPath(value))
    }
}

/// Query string extractor with JSON rejections
pub struct AppQuery<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for AppQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection: QueryRejection| AppError::Validation(rejection.body_text()))?;
        Ok(AppQuery(value))
    }
}

async fn route_not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {}", uri.path()))
}

async fn method_not_allowed(method: Method, uri: Uri) -> AppError {
    AppError::MethodNotAllowed(format!("{} not allowed on {}", method, uri.path()))
}

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    // Any origin may call the catalog
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let catalog = Router::new()
        .route("/health", get(health::health_check).fallback(method_not_allowed))
        .route("/ready", get(health::readiness_check).fallback(method_not_allowed))
        .route("/add_book", post(books::add_book).fallback(method_not_allowed))
        .route("/search_book", get(books::search_book).fallback(method_not_allowed))
        .route("/borrow_book/:isbn", put(books::borrow_book).fallback(method_not_allowed))
        .route("/return_book/:isbn", put(books::return_book).fallback(method_not_allowed))
        .route("/list_books", get(books::list_books).fallback(method_not_allowed))
        .route("/remove_book/:isbn", delete(books::remove_book).fallback(method_not_allowed))
        .route("/total_books", get(books::total_books).fallback(method_not_allowed))
        .with_state(state);

    Router::new()
        .merge(catalog)
        .merge(openapi::create_openapi_router())
        .fallback(route_not_found)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
