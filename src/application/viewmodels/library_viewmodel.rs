// src/application/viewmodels/library_viewmodel.rs
//
// Personal library: the owner's catalog plus a local working list

use std::sync::Arc;

use super::state::{message_or, StateHandle, UiState};
use crate::domain::Book;
use crate::error::{AppError, AppResult};
use crate::repositories::CatalogRepository;
use crate::services::SessionStore;

pub struct LibraryViewModel {
    repo: Arc<dyn CatalogRepository>,
    session: Arc<SessionStore>,
    state: StateHandle<UiState<Vec<Book>>>,
    books: StateHandle<Vec<Book>>,
}

impl LibraryViewModel {
    pub fn new(repo: Arc<dyn CatalogRepository>, session: Arc<SessionStore>) -> Self {
        Self {
            repo,
            session,
            state: StateHandle::default(),
            books: StateHandle::default(),
        }
    }

    pub fn state(&self) -> UiState<Vec<Book>> {
        self.state.get()
    }

    pub fn subscribe(&self) -> tokio::sync::watch::Receiver<UiState<Vec<Book>>> {
        self.state.subscribe()
    }

    /// Local working list
    pub fn books(&self) -> Vec<Book> {
        self.books.get()
    }

    /// Fetch the logged-in user's books from the catalog
    pub async fn load_books(&self) -> AppResult<UiState<Vec<Book>>> {
        let session = self
            .session
            .current_session()
            .ok_or(AppError::Unauthenticated)?;

        self.state.set(UiState::Loading);

        let next = match self.repo.books_by_owner(session.user_email.clone()).await {
            Ok(books) => UiState::Success(books),
            Err(e) => UiState::Error(message_or(&e, || {
                format!("Error fetching books for {}", session.display_name())
            })),
        };
        Ok(self.state.set(next))
    }

    /// Append unless a book with one of the same ISBNs is already listed.
    /// Returns whether the book was added.
    pub fn add(&self, book: Book) -> bool {
        let mut added = false;
        self.books.update(|books| {
            if !books.iter().any(|b| b.shares_isbn(&book)) {
                books.push(book);
                added = true;
            }
        });
        added
    }

    /// Remove the first entry equal to `book`
    pub fn remove(&self, book: &Book) {
        self.books.update(|books| {
            if let Some(pos) = books.iter().position(|b| b == book) {
                books.remove(pos);
            }
        });
    }

    pub fn clear(&self) {
        self.books.set(Vec::new());
    }

    /// Back to `Idle`; the local list is kept
    pub fn reset(&self) {
        self.state.set(UiState::Idle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::viewmodels::test_support::{logged_in_store, logged_out_store};
    use crate::repositories::MockCatalogRepository;

    fn book(title: &str, isbn10: Option<&str>, isbn13: Option<&str>) -> Book {
        let mut book = Book::new(title);
        book.isbn10 = isbn10.map(str::to_string);
        book.isbn13 = isbn13.map(str::to_string);
        book
    }

    #[tokio::test]
    async fn test_load_books_uses_session_email() {
        let mut repo = MockCatalogRepository::new();
        repo.expect_books_by_owner()
            .withf(|email| email == "ana@example.com")
            .times(1)
            .returning(|_| Ok(vec![Book::new("Dune")]));

        let vm = LibraryViewModel::new(Arc::new(repo), logged_in_store());
        let state = vm.load_books().await.unwrap();

        assert_eq!(state, UiState::Success(vec![Book::new("Dune")]));
    }

    #[tokio::test]
    async fn test_load_books_failure() {
        let mut repo = MockCatalogRepository::new();
        repo.expect_books_by_owner()
            .returning(|_| Err(AppError::Api("Error fetching books: 500".to_string())));

        let vm = LibraryViewModel::new(Arc::new(repo), logged_in_store());
        assert_eq!(
            vm.load_books().await.unwrap(),
            UiState::Error("Error fetching books: 500".to_string())
        );

        vm.add(Book::new("Kept"));
        vm.reset();
        assert_eq!(vm.state(), UiState::Idle);
        assert_eq!(vm.books().len(), 1);
    }

    #[tokio::test]
    async fn test_load_books_requires_session() {
        let vm = LibraryViewModel::new(Arc::new(MockCatalogRepository::new()), logged_out_store());
        assert!(matches!(vm.load_books().await, Err(AppError::Unauthenticated)));
        assert_eq!(vm.state(), UiState::Idle);
    }

    #[test]
    fn test_add_dedupes_by_present_isbn() {
        let vm = LibraryViewModel::new(Arc::new(MockCatalogRepository::new()), logged_in_store());

        assert!(vm.add(book("A", Some("0441172717"), None)));
        assert!(!vm.add(book("A again", Some("0441172717"), None)));
        assert!(vm.add(book("B", None, Some("9780441172719"))));
        // Books without ISBNs never collide
        assert!(vm.add(book("C", None, None)));
        assert!(vm.add(book("D", None, None)));

        assert_eq!(vm.books().len(), 4);
    }

    #[test]
    fn test_remove_and_clear() {
        let vm = LibraryViewModel::new(Arc::new(MockCatalogRepository::new()), logged_in_store());
        let a = book("A", Some("0441172717"), None);
        let b = book("B", None, Some("9780441172719"));
        vm.add(a.clone());
        vm.add(b.clone());

        vm.remove(&a);
        assert_eq!(vm.books(), vec![b]);

        vm.clear();
        assert!(vm.books().is_empty());
    }
}
