// src/integrations/mod.rs
//
// External integrations: the catalog backend and OpenLibrary.
//
// Clients speak HTTP and return wire DTOs. Mapping to domain records and
// user-facing error messages happens in the repositories.

pub mod catalog;
pub mod http;
pub mod openlibrary;

pub use catalog::{CatalogApi, CatalogClient};
pub use http::is_host_resolvable;
pub use openlibrary::{OpenLibraryApi, OpenLibraryClient};
