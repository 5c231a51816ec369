// src/repositories/catalog_repository.rs
//
// Book catalog on the backend: personal libraries, the exchange feed and
// new catalog entries

use std::sync::Arc;

use async_trait::async_trait;

use super::describe_failure;
use crate::domain::{Author, Book};
use crate::error::{AppError, AppResult};
use crate::integrations::catalog::{AddBookDto, BookItemDto, CatalogApi};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Books owned by the user with this email
    async fn books_by_owner(&self, email: String) -> AppResult<Vec<Book>>;

    /// Every book offered for exchange or as a gift
    async fn exchange_books(&self) -> AppResult<Vec<Book>>;

    /// Register a copy of `isbn` for `owner_email`; returns the catalog record
    async fn add_book(&self, isbn: String, owner_email: String) -> AppResult<Book>;
}

pub struct ApiCatalogRepository {
    api: Arc<dyn CatalogApi>,
}

impl ApiCatalogRepository {
    pub fn new(api: Arc<dyn CatalogApi>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl CatalogRepository for ApiCatalogRepository {
    async fn books_by_owner(&self, email: String) -> AppResult<Vec<Book>> {
        let list = self
            .api
            .books_by_email(email.clone())
            .await
            .map_err(|e| describe_failure(e, "libros/email", "Error fetching books"))?;

        let books: Vec<Book> = list.into_items().into_iter().map(BookItemDto::into_book).collect();
        log::debug!("{} books owned by {}", books.len(), email);
        Ok(books)
    }

    async fn exchange_books(&self) -> AppResult<Vec<Book>> {
        let list = self
            .api
            .all_books()
            .await
            .map_err(|e| describe_failure(e, "libros", "Error fetching books"))?;

        Ok(list
            .into_items()
            .into_iter()
            .map(BookItemDto::into_book)
            .filter(Book::is_shareable)
            .collect())
    }

    async fn add_book(&self, isbn: String, owner_email: String) -> AppResult<Book> {
        let response = self
            .api
            .add_book(AddBookDto {
                isbn: isbn.clone(),
                owner_email: owner_email.clone(),
            })
            .await
            .map_err(|e| describe_failure(e, "libros/add-libro", "Error adding book"))?
            .ok_or_else(|| AppError::Api("No book present in response body".to_string()))?;

        let code = response
            .barcode
            .filter(|c| !c.trim().is_empty())
            .unwrap_or(isbn);

        let mut book = Book::new(response.title.unwrap_or_default()).with_owner(owner_email);
        book.authors = response
            .authors
            .into_iter()
            .map(|a| Author { id: a.id, name: a.name })
            .collect();
        if code.len() == 10 {
            book.isbn10 = Some(code);
        } else {
            book.isbn13 = Some(code);
        }

        Ok(book)
    }
}
