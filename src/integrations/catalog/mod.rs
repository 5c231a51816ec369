pub mod client;
pub mod dto;

pub use client::{CatalogApi, CatalogClient};
#[cfg(test)]
pub use client::MockCatalogApi;
pub use dto::{
    parse_author_names, AddBookDto, AuthorDto, AuthorNames, BookItemDto, BookListDto,
    BookResponseDto, LenientBool, LoginDto, RegisterUserDto, RegisterUserResponseDto, UserDto,
};
