// src/integrations/http.rs
//
// Shared HTTP plumbing for the backend clients

use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;

use crate::config::ApiConfig;
use crate::error::{AppError, AppResult};

/// Build a reqwest client with the configured timeouts and default headers
pub fn build_http_client(config: &ApiConfig) -> AppResult<Client> {
    let mut headers = HeaderMap::new();
    headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));

    if let Some(token) = config.bearer_token.as_deref().filter(|t| !t.trim().is_empty()) {
        let value = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|e| AppError::Config(format!("Invalid bearer token: {}", e)))?;
        headers.insert(header::AUTHORIZATION, value);
    }

    if let Some(cookie) = config.cookie.as_deref().filter(|c| !c.trim().is_empty()) {
        let value = HeaderValue::from_str(cookie)
            .map_err(|e| AppError::Config(format!("Invalid cookie header: {}", e)))?;
        headers.insert(header::COOKIE, value);
    }

    Client::builder()
        .user_agent(config.user_agent.clone())
        .connect_timeout(config.connect_timeout)
        .timeout(config.read_timeout)
        .default_headers(headers)
        .build()
        .map_err(|e| AppError::Config(format!("Failed to create HTTP client: {}", e)))
}

/// Append path segments to a base URL, percent-encoding each one
pub fn endpoint(base_url: &str, segments: &[&str]) -> AppResult<Url> {
    let mut url = Url::parse(base_url)
        .map_err(|e| AppError::Config(format!("Invalid base URL {}: {}", base_url, e)))?;

    url.path_segments_mut()
        .map_err(|_| AppError::Config(format!("Base URL cannot carry a path: {}", base_url)))?
        .pop_if_empty()
        .extend(segments);

    Ok(url)
}

/// Read a successful response body as JSON.
/// Non-2xx statuses become `AppError::Http` carrying the error body.
pub async fn read_json<T: DeserializeOwned>(response: Response) -> AppResult<T> {
    let body = read_body(response).await?;
    serde_json::from_str(&body).map_err(|e| AppError::Decode(e.to_string()))
}

/// Like [`read_json`] but an empty body is `None`
pub async fn read_optional_json<T: DeserializeOwned>(response: Response) -> AppResult<Option<T>> {
    let body = read_body(response).await?;
    if body.trim().is_empty() {
        return Ok(None);
    }
    serde_json::from_str(&body)
        .map(Some)
        .map_err(|e| AppError::Decode(e.to_string()))
}

async fn read_body(response: Response) -> AppResult<String> {
    let status = response.status();
    let url = response.url().clone();
    let body = response.text().await?;

    if !status.is_success() {
        log::warn!("{} returned {}", url, status);
        return Err(AppError::Http {
            status: status.as_u16(),
            body,
        });
    }

    log::debug!("{} returned {} ({} bytes)", url, status, body.len());
    Ok(body)
}

/// DNS check used before talking to a backend. Any failure means "no".
pub async fn is_host_resolvable(host: &str) -> bool {
    match tokio::net::lookup_host((host, 0)).await {
        Ok(mut addrs) => addrs.next().is_some(),
        Err(e) => {
            log::debug!("Host {} did not resolve: {}", host, e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_segments() {
        let url = endpoint("http://10.0.2.2:8080/", &["libros", "email", "ana@example.com"]).unwrap();
        assert_eq!(url.as_str(), "http://10.0.2.2:8080/libros/email/ana@example.com");
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let url = endpoint("https://example.org/api/", &["usuarios", "registrar"]).unwrap();
        assert_eq!(url.as_str(), "https://example.org/api/usuarios/registrar");
    }

    #[test]
    fn test_endpoint_encodes_segments() {
        let url = endpoint("https://openlibrary.org", &["isbn", "a b.json"]).unwrap();
        assert_eq!(url.as_str(), "https://openlibrary.org/isbn/a%20b.json");
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(endpoint("not a url", &["x"]), Err(AppError::Config(_))));
    }

    #[test]
    fn test_client_rejects_bad_cookie() {
        let mut config = ApiConfig::new("http://localhost/");
        config.cookie = Some("bad\nvalue".to_string());
        assert!(build_http_client(&config).is_err());
    }

    #[tokio::test]
    async fn test_localhost_resolves() {
        assert!(is_host_resolvable("localhost").await);
    }
}
