// src/integrations/catalog/client.rs
//
// Catalog backend client
//
// - One HTTP request per call, no retry
// - Returns wire DTOs; repositories map them to domain records
// - Non-2xx answers surface as AppError::Http with the error body

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};

use super::dto::{
    AddBookDto, BookListDto, BookResponseDto, LoginDto, RegisterUserDto, RegisterUserResponseDto,
    UserDto,
};
use crate::config::ApiConfig;
use crate::error::AppResult;
use crate::integrations::http::{build_http_client, endpoint, read_json, read_optional_json};

/// Transport seam for the catalog backend
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// `POST /usuarios/registrar`
    async fn register_user(&self, request: RegisterUserDto) -> AppResult<RegisterUserResponseDto>;

    /// `POST /usuarios/login`
    async fn login(&self, request: LoginDto) -> AppResult<UserDto>;

    /// `GET /libros/email/{correo}`
    async fn books_by_email(&self, email: String) -> AppResult<BookListDto>;

    /// `GET /libros`
    async fn all_books(&self) -> AppResult<BookListDto>;

    /// `POST /libros/add-libro`; an empty body is `None`
    async fn add_book(&self, request: AddBookDto) -> AppResult<Option<BookResponseDto>>;
}

pub struct CatalogClient {
    base_url: String,
    http_client: Client,
    log_requests: bool,
}

impl CatalogClient {
    pub fn new(config: &ApiConfig) -> AppResult<Self> {
        Ok(Self {
            base_url: config.base_url.clone(),
            http_client: build_http_client(config)?,
            log_requests: config.log_requests,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn get(&self, segments: &[&str]) -> AppResult<RequestBuilder> {
        let url = endpoint(&self.base_url, segments)?;
        if self.log_requests {
            log::debug!("GET {}", url);
        }
        Ok(self.http_client.get(url))
    }

    fn post(&self, segments: &[&str]) -> AppResult<RequestBuilder> {
        let url = endpoint(&self.base_url, segments)?;
        if self.log_requests {
            log::debug!("POST {}", url);
        }
        Ok(self.http_client.post(url))
    }
}

#[async_trait]
impl CatalogApi for CatalogClient {
    async fn register_user(&self, request: RegisterUserDto) -> AppResult<RegisterUserResponseDto> {
        let response = self
            .post(&["usuarios", "registrar"])?
            .json(&request)
            .send()
            .await?;
        Ok(read_optional_json(response).await?.unwrap_or_default())
    }

    async fn login(&self, request: LoginDto) -> AppResult<UserDto> {
        let response = self
            .post(&["usuarios", "login"])?
            .json(&request)
            .send()
            .await?;
        read_json(response).await
    }

    async fn books_by_email(&self, email: String) -> AppResult<BookListDto> {
        let response = self.get(&["libros", "email", email.as_str()])?.send().await?;
        Ok(read_optional_json(response)
            .await?
            .unwrap_or(BookListDto::Bare(Vec::new())))
    }

    async fn all_books(&self) -> AppResult<BookListDto> {
        let response = self.get(&["libros"])?.send().await?;
        Ok(read_optional_json(response)
            .await?
            .unwrap_or(BookListDto::Bare(Vec::new())))
    }

    async fn add_book(&self, request: AddBookDto) -> AppResult<Option<BookResponseDto>> {
        let response = self
            .post(&["libros", "add-libro"])?
            .json(&request)
            .send()
            .await?;
        read_optional_json(response).await
    }
}
