use serde::{Deserialize, Serialize};

use super::cover::CoverUrl;

/// A physical book as shown in a library, the feed or a lookup result.
///
/// Books are value records: they are produced by mapping a backend DTO and
/// never mutated in place. Changes go through the `with_*` helpers, which
/// consume the record and return an updated copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// ISBN-10 code, if known
    pub isbn10: Option<String>,

    /// ISBN-13 code, if known
    pub isbn13: Option<String>,

    pub title: String,

    pub authors: Vec<Author>,

    pub description: Option<String>,

    /// Cover images, built once when the record is mapped
    pub cover: Option<CoverUrl>,

    /// OpenLibrary work key (`/works/OL...W`)
    pub work_key: Option<String>,

    /// OpenLibrary edition key (`/books/OL...M`)
    pub edition_key: Option<String>,

    /// Display name (or email) of the user holding the copy
    pub owner_name: Option<String>,

    pub owner_id: Option<String>,

    /// Owner offers the book for exchange
    pub for_exchange: bool,

    /// Owner gives the book away
    pub as_gift: bool,
}

/// Book author. OpenLibrary has no stable numeric id, so `id` is optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: Option<i64>,
    pub name: String,
}

impl Author {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
        }
    }

    pub fn with_id(id: i64, name: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            name: name.into(),
        }
    }
}

impl Book {
    /// Create a book with only a title; every other field empty
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            isbn10: None,
            isbn13: None,
            title: title.into(),
            authors: Vec::new(),
            description: None,
            cover: None,
            work_key: None,
            edition_key: None,
            owner_name: None,
            owner_id: None,
            for_exchange: false,
            as_gift: false,
        }
    }

    /// Copy of this book attributed to another owner
    pub fn with_owner(self, owner_name: impl Into<String>) -> Self {
        Self {
            owner_name: Some(owner_name.into()),
            ..self
        }
    }

    /// Copy of this book with new availability flags
    pub fn with_availability(self, for_exchange: bool, as_gift: bool) -> Self {
        Self {
            for_exchange,
            as_gift,
            ..self
        }
    }

    /// Identifier used to de-duplicate publications: edition key, else work key
    pub fn publication_key(&self) -> Option<&str> {
        fn present(key: &Option<String>) -> Option<&str> {
            key.as_deref().filter(|k| !k.trim().is_empty())
        }
        present(&self.edition_key).or(present(&self.work_key))
    }

    /// True when both books carry the same ISBN-10 or the same ISBN-13.
    /// Missing identifiers never match each other.
    pub fn shares_isbn(&self, other: &Book) -> bool {
        let same = |a: &Option<String>, b: &Option<String>| matches!((a, b), (Some(x), Some(y)) if x == y);
        same(&self.isbn10, &other.isbn10) || same(&self.isbn13, &other.isbn13)
    }

    /// Preferred ISBN for display and cover lookup (ISBN-13 first)
    pub fn isbn(&self) -> Option<&str> {
        self.isbn13.as_deref().or(self.isbn10.as_deref())
    }

    /// Available for exchange or as a gift
    pub fn is_shareable(&self) -> bool {
        self.for_exchange || self.as_gift
    }

    /// Comma-separated author names
    pub fn author_line(&self) -> String {
        self.authors
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_owner_keeps_other_fields() {
        let mut book = Book::new("Cien Años de Soledad");
        book.isbn10 = Some("9500700298".to_string());

        let owned = book.clone().with_owner("Maria");

        assert_eq!(owned.owner_name.as_deref(), Some("Maria"));
        assert_eq!(owned.isbn10, book.isbn10);
        assert_eq!(owned.title, book.title);
    }

    #[test]
    fn test_publication_key_prefers_edition() {
        let mut book = Book::new("The Hobbit");
        book.work_key = Some("/works/OL1W".to_string());
        assert_eq!(book.publication_key(), Some("/works/OL1W"));

        book.edition_key = Some("/books/OL2M".to_string());
        assert_eq!(book.publication_key(), Some("/books/OL2M"));
    }

    #[test]
    fn test_publication_key_skips_blank_edition() {
        let mut book = Book::new("The Hobbit");
        book.edition_key = Some(String::new());
        book.work_key = Some("/works/OL1W".to_string());
        assert_eq!(book.publication_key(), Some("/works/OL1W"));

        book.work_key = Some(" ".to_string());
        assert_eq!(book.publication_key(), None);
    }

    #[test]
    fn test_missing_isbns_do_not_match() {
        let a = Book::new("A");
        let b = Book::new("B");
        assert!(!a.shares_isbn(&b));

        let mut c = Book::new("C");
        c.isbn13 = Some("9786070704628".to_string());
        let mut d = Book::new("D");
        d.isbn13 = Some("9786070704628".to_string());
        assert!(c.shares_isbn(&d));
    }

    #[test]
    fn test_author_line() {
        let mut book = Book::new("Good Omens");
        book.authors = vec![Author::new("Terry Pratchett"), Author::new("Neil Gaiman")];
        assert_eq!(book.author_line(), "Terry Pratchett, Neil Gaiman");
    }
}
