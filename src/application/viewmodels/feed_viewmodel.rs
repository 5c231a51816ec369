// src/application/viewmodels/feed_viewmodel.rs
//
// Exchange feed: books other users offer, plus locally published ones

use std::sync::Arc;

use super::state::{message_or, StateHandle, UiState};
use crate::domain::{validate_book, Book};
use crate::error::AppResult;
use crate::events::{BookPublished, EventBus};
use crate::repositories::CatalogRepository;

pub struct FeedViewModel {
    repo: Arc<dyn CatalogRepository>,
    event_bus: Arc<EventBus>,
    state: StateHandle<UiState<Vec<Book>>>,
    books: StateHandle<Vec<Book>>,
}

impl FeedViewModel {
    pub fn new(repo: Arc<dyn CatalogRepository>, event_bus: Arc<EventBus>) -> Self {
        Self {
            repo,
            event_bus,
            state: StateHandle::default(),
            books: StateHandle::default(),
        }
    }

    pub fn state(&self) -> UiState<Vec<Book>> {
        self.state.get()
    }

    /// Books currently shown, newest publication first
    pub fn books(&self) -> Vec<Book> {
        self.books.get()
    }

    pub fn subscribe_books(&self) -> tokio::sync::watch::Receiver<Vec<Book>> {
        self.books.subscribe()
    }

    pub async fn load_feed(&self) -> UiState<Vec<Book>> {
        self.state.set(UiState::Loading);

        let next = match self.repo.exchange_books().await {
            Ok(books) => {
                self.books.set(books.clone());
                UiState::Success(books)
            }
            Err(e) => UiState::Error(message_or(&e, || "Error fetching books".to_string())),
        };
        self.state.set(next)
    }

    pub fn reset(&self) {
        self.state.set(UiState::Idle);
    }

    /// Put a copy of `book` owned by `user_name` at the top of the feed.
    ///
    /// An entry with the same publication key is replaced; books without a
    /// key are always added.
    pub fn publish_book(&self, book: &Book, user_name: &str) -> AppResult<Book> {
        let published = book.clone().with_owner(user_name);
        validate_book(&published)?;

        self.books.update(|books| {
            if let Some(key) = published.publication_key() {
                if let Some(pos) = books.iter().position(|b| b.publication_key() == Some(key)) {
                    books.remove(pos);
                }
            }
            books.insert(0, published.clone());
        });

        self.event_bus.emit(BookPublished::new(
            published.publication_key().map(str::to_string),
            published.title.clone(),
            user_name,
        ));
        Ok(published)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::repositories::MockCatalogRepository;

    fn keyed(title: &str, edition: Option<&str>, work: Option<&str>) -> Book {
        let mut book = Book::new(title);
        book.edition_key = edition.map(str::to_string);
        book.work_key = work.map(str::to_string);
        book
    }

    #[tokio::test]
    async fn test_load_feed() {
        let mut repo = MockCatalogRepository::new();
        repo.expect_exchange_books()
            .times(1)
            .returning(|| Ok(vec![Book::new("Swap me").with_availability(true, false)]));

        let vm = FeedViewModel::new(Arc::new(repo), Arc::new(EventBus::new()));
        let state = vm.load_feed().await;

        assert_eq!(state.success().map(Vec::len), Some(1));
        assert_eq!(vm.books().len(), 1);
    }

    #[tokio::test]
    async fn test_load_feed_failure() {
        let mut repo = MockCatalogRepository::new();
        repo.expect_exchange_books()
            .returning(|| Err(AppError::Api("Error fetching books: down".to_string())));

        let vm = FeedViewModel::new(Arc::new(repo), Arc::new(EventBus::new()));
        assert_eq!(
            vm.load_feed().await,
            UiState::Error("Error fetching books: down".to_string())
        );

        vm.reset();
        assert_eq!(vm.state(), UiState::Idle);
    }

    #[test]
    fn test_publish_replaces_same_key_and_goes_on_top() {
        let bus = Arc::new(EventBus::new());
        let vm = FeedViewModel::new(Arc::new(MockCatalogRepository::new()), Arc::clone(&bus));

        vm.publish_book(&keyed("Dune", Some("/books/OL1M"), None), "Ana").unwrap();
        vm.publish_book(&keyed("Emma", None, Some("/works/OL9W")), "Ana").unwrap();
        vm.publish_book(&keyed("Dune 2nd", Some("/books/OL1M"), None), "Carlos").unwrap();

        let books = vm.books();
        assert_eq!(books.len(), 2);
        assert_eq!(books[0].title, "Dune 2nd");
        assert_eq!(books[0].owner_name.as_deref(), Some("Carlos"));
        assert_eq!(books[1].title, "Emma");
        assert_eq!(bus.get_event_log().len(), 3);
    }

    #[test]
    fn test_publish_without_key_always_adds() {
        let vm = FeedViewModel::new(Arc::new(MockCatalogRepository::new()), Arc::new(EventBus::new()));

        vm.publish_book(&Book::new("Untitled"), "Ana").unwrap();
        vm.publish_book(&Book::new("Untitled"), "Ana").unwrap();

        assert_eq!(vm.books().len(), 2);
    }

    #[test]
    fn test_publish_rejects_untitled_book() {
        let bus = Arc::new(EventBus::new());
        let vm = FeedViewModel::new(Arc::new(MockCatalogRepository::new()), Arc::clone(&bus));

        assert!(vm.publish_book(&Book::new(" "), "Ana").is_err());
        assert!(vm.books().is_empty());
        assert!(bus.get_event_log().is_empty());
    }
}
