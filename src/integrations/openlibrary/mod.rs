pub mod client;
pub mod dto;

pub use client::{OpenLibraryApi, OpenLibraryClient};
#[cfg(test)]
pub use client::MockOpenLibraryApi;
pub use dto::{Description, EditionDto, GenericKeyDto, KeyRef};
