pub mod cover;
pub mod entity;
pub mod invariants;

pub use cover::{CoverSize, CoverUrl};
pub use entity::{Author, Book};
pub use invariants::{normalize_isbn, validate_book, validate_isbn};
