// src/integrations/openlibrary/client.rs
//
// OpenLibrary public API client
//
// - Read-only, unauthenticated
// - GET /isbn/{isbn}.json and GET /{key}.json
// - Returns DTOs; never builds domain records itself

use async_trait::async_trait;
use reqwest::Client;

use super::dto::{EditionDto, GenericKeyDto};
use crate::config::ApiConfig;
use crate::error::{AppError, AppResult};
use crate::integrations::http::{build_http_client, endpoint, read_json};

/// Transport seam for OpenLibrary
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OpenLibraryApi: Send + Sync {
    /// Edition metadata for an ISBN
    async fn edition_by_isbn(&self, isbn: String) -> AppResult<EditionDto>;

    /// Any record by key, e.g. `/authors/OL12345A` or `works/OL82563W`
    async fn by_key(&self, key: String) -> AppResult<GenericKeyDto>;
}

pub struct OpenLibraryClient {
    base_url: String,
    http_client: Client,
    log_requests: bool,
}

impl OpenLibraryClient {
    pub fn new(config: &ApiConfig) -> AppResult<Self> {
        Ok(Self {
            base_url: config.base_url.clone(),
            http_client: build_http_client(config)?,
            log_requests: config.log_requests,
        })
    }

    async fn fetch<T>(&self, segments: &[&str]) -> AppResult<T>
    where
        T: for<'de> serde::Deserialize<'de>,
    {
        let url = endpoint(&self.base_url, segments)?;
        if self.log_requests {
            log::debug!("GET {}", url);
        }
        let response = self.http_client.get(url).send().await?;
        read_json(response).await
    }
}

/// `"/authors/OL1A"` -> `["authors", "OL1A.json"]`
fn key_segments(key: &str) -> AppResult<Vec<String>> {
    let mut segments: Vec<String> = key
        .trim()
        .trim_start_matches('/')
        .split('/')
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();

    match segments.last_mut() {
        Some(last) => {
            last.push_str(".json");
            Ok(segments)
        }
        None => Err(AppError::Other(format!("Empty OpenLibrary key: {:?}", key))),
    }
}

#[async_trait]
impl OpenLibraryApi for OpenLibraryClient {
    async fn edition_by_isbn(&self, isbn: String) -> AppResult<EditionDto> {
        let file = format!("{}.json", isbn);
        self.fetch(&["isbn", file.as_str()]).await
    }

    async fn by_key(&self, key: String) -> AppResult<GenericKeyDto> {
        let segments = key_segments(&key)?;
        let segments: Vec<&str> = segments.iter().map(String::as_str).collect();
        self.fetch(&segments).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_segments() {
        assert_eq!(
            key_segments("/authors/OL12345A").unwrap(),
            vec!["authors".to_string(), "OL12345A.json".to_string()]
        );
        assert_eq!(
            key_segments("works/OL82563W").unwrap(),
            vec!["works".to_string(), "OL82563W.json".to_string()]
        );
        assert!(key_segments(" / ").is_err());
    }

    #[test]
    fn test_client_creation() {
        let client = OpenLibraryClient::new(&ApiConfig::new("https://openlibrary.org/")).unwrap();
        assert_eq!(client.base_url, "https://openlibrary.org/");
    }
}
