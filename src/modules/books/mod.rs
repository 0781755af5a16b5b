use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use plume_http::error::AppError;
use plume_kernel::{InitCtx, Module};

use crate::catalog::models::{Book, BookId};

/// Serves the book catalog at `/api/books`.
pub struct BooksModule {
    books: Arc<Vec<Book>>,
}

impl BooksModule {
    pub fn new(books: Vec<Book>) -> Self {
        Self {
            books: Arc::new(books),
        }
    }
}

#[async_trait]
impl Module for BooksModule {
    fn name(&self) -> &'static str {
        "books"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            books = self.books.len(),
            "books module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        Router::new()
            .route("/", get(list_books))
            .route("/{id}", get(get_book))
            .with_state(self.books.clone())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module stopped");
        Ok(())
    }
}

async fn list_books(State(books): State<Arc<Vec<Book>>>) -> Json<Vec<Book>> {
    Json(books.as_ref().clone())
}

async fn get_book(
    State(books): State<Arc<Vec<Book>>>,
    Path(id): Path<BookId>,
) -> Result<Json<Book>, AppError> {
    if id.as_str().trim().is_empty() {
        return Err(AppError::bad_request("book id must not be blank"));
    }

    books
        .iter()
        .find(|book| book.id == id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::not_found(format!("book '{}' not found", id)))
}

pub fn create_module(books: Vec<Book>) -> Arc<dyn Module> {
    Arc::new(BooksModule::new(books))
}
