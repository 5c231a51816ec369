// src/repositories/openlibrary_repository.rs
//
// ISBN lookup against OpenLibrary, registered with the catalog in the same step

use std::sync::Arc;

use async_trait::async_trait;

use super::catalog_repository::CatalogRepository;
use crate::domain::{validate_isbn, Author, Book};
use crate::error::{AppError, AppResult};
use crate::integrations::openlibrary::{EditionDto, OpenLibraryApi};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OpenLibraryRepository: Send + Sync {
    /// Fetch the edition for `isbn`, register a copy for `owner_email` and
    /// return the merged record
    async fn lookup_isbn(
        &self,
        isbn: String,
        owner_email: String,
        resolve_authors: bool,
    ) -> AppResult<Book>;
}

pub struct ApiOpenLibraryRepository {
    api: Arc<dyn OpenLibraryApi>,
    catalog: Arc<dyn CatalogRepository>,
    cover_base_url: String,
}

impl ApiOpenLibraryRepository {
    pub fn new(
        api: Arc<dyn OpenLibraryApi>,
        catalog: Arc<dyn CatalogRepository>,
        cover_base_url: impl Into<String>,
    ) -> Self {
        Self {
            api,
            catalog,
            cover_base_url: cover_base_url.into(),
        }
    }

    /// Author names in edition order. Keys without a name are skipped.
    async fn resolve_authors(&self, edition: &EditionDto) -> AppResult<Vec<Author>> {
        let mut authors = Vec::new();
        for key in edition.author_keys() {
            let entry = self.api.by_key(key.to_string()).await?;
            match entry.name.filter(|n| !n.trim().is_empty()) {
                Some(name) => authors.push(Author::new(name)),
                None => log::debug!("Author {} has no name", key),
            }
        }
        Ok(authors)
    }

    async fn lookup(&self, isbn: &str, owner_email: String, resolve_authors: bool) -> AppResult<Book> {
        let edition = self.api.edition_by_isbn(isbn.to_string()).await?;

        let authors = if resolve_authors {
            self.resolve_authors(&edition).await?
        } else {
            Vec::new()
        };

        let mut book = edition.to_book(authors, &self.cover_base_url);
        if book.isbn10.is_none() && book.isbn13.is_none() {
            if isbn.len() == 10 {
                book.isbn10 = Some(isbn.to_string());
            } else {
                book.isbn13 = Some(isbn.to_string());
            }
        }

        let registered = self.catalog.add_book(isbn.to_string(), owner_email.clone()).await?;

        if !registered.title.trim().is_empty() {
            book.title = registered.title;
        }
        if !registered.authors.is_empty() {
            book.authors = registered.authors;
        }

        Ok(book.with_owner(owner_email))
    }
}

/// Collapse transport failures into the messages shown for a lookup
fn lookup_failure(error: AppError, isbn: &str) -> AppError {
    match error {
        AppError::Http { status: 404, .. } => {
            AppError::NotFound(format!("ISBN not found in OpenLibrary: {}", isbn))
        }
        AppError::Http { status, .. } => {
            AppError::Api(format!("HTTP error {} from OpenLibrary", status))
        }
        AppError::Network(_) | AppError::Io(_) => {
            AppError::Api("Network error while accessing OpenLibrary".to_string())
        }
        other => other,
    }
}

#[async_trait]
impl OpenLibraryRepository for ApiOpenLibraryRepository {
    async fn lookup_isbn(
        &self,
        isbn: String,
        owner_email: String,
        resolve_authors: bool,
    ) -> AppResult<Book> {
        let isbn = validate_isbn(&isbn)?;
        log::debug!("Looking up ISBN {}", isbn);

        self.lookup(&isbn, owner_email, resolve_authors)
            .await
            .map_err(|e| {
                let mapped = lookup_failure(e, &isbn);
                log::warn!("Lookup of {} failed: {}", isbn, mapped);
                mapped
            })
    }
}
