// src/repositories/auth_repository.rs
//
// User accounts on the catalog backend

use std::sync::Arc;

use async_trait::async_trait;

use super::describe_failure;
use crate::domain::{NewUser, User};
use crate::error::AppResult;
use crate::integrations::catalog::{CatalogApi, LoginDto, RegisterUserDto};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthRepository: Send + Sync {
    async fn login(&self, email: String, password: String) -> AppResult<User>;

    /// The backend has no lookup endpoint; implementations may always answer `false`
    async fn user_exists(&self, email: String) -> AppResult<bool>;

    async fn create_user(&self, new_user: NewUser) -> AppResult<User>;

    /// Server-side logout. The local session is cleared by the caller.
    async fn logout(&self) -> AppResult<()>;
}

pub struct ApiAuthRepository {
    api: Arc<dyn CatalogApi>,
}

impl ApiAuthRepository {
    pub fn new(api: Arc<dyn CatalogApi>) -> Self {
        Self { api }
    }
}

/// Register answers with loose strings, so the id may be a number or a numeric string
fn id_from(value: Option<&serde_json::Value>) -> Option<i64> {
    match value? {
        serde_json::Value::Number(n) => n.as_i64(),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[async_trait]
impl AuthRepository for ApiAuthRepository {
    async fn login(&self, email: String, password: String) -> AppResult<User> {
        let dto = self
            .api
            .login(LoginDto {
                email: email.clone(),
                password,
            })
            .await
            .map_err(|e| describe_failure(e, "usuarios/login", "Login failed"))?;

        Ok(User {
            id: dto.id,
            first_name: dto.first_name.unwrap_or_default(),
            last_name: dto.last_name.unwrap_or_default(),
            email: dto.email.filter(|e| !e.is_empty()).unwrap_or(email),
        })
    }

    async fn user_exists(&self, email: String) -> AppResult<bool> {
        log::debug!("No user lookup endpoint; treating {} as unknown", email);
        Ok(false)
    }

    async fn create_user(&self, new_user: NewUser) -> AppResult<User> {
        let NewUser {
            first_name,
            last_name,
            email,
            password,
        } = new_user;

        let body = self
            .api
            .register_user(RegisterUserDto {
                first_name: first_name.clone(),
                last_name: last_name.clone(),
                email: email.clone(),
                password,
            })
            .await
            .map_err(|e| describe_failure(e, "usuarios/registrar", "Error registering user"))?;

        log::info!("Registered user {}", email);

        Ok(User {
            id: id_from(body.get("id")),
            first_name,
            last_name,
            email,
        })
    }

    async fn logout(&self) -> AppResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::integrations::catalog::{MockCatalogApi, UserDto};

    fn new_user() -> NewUser {
        NewUser {
            first_name: "Ana".to_string(),
            last_name: "García".to_string(),
            email: "ana@example.com".to_string(),
            password: "secret1".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_user_success_keeps_submitted_names() {
        let mut api = MockCatalogApi::new();
        api.expect_register_user()
            .withf(|dto| dto.email == "ana@example.com" && dto.first_name == "Ana")
            .times(1)
            .returning(|_| Ok([("id".to_string(), serde_json::json!("42"))].into()));

        let repo = ApiAuthRepository::new(Arc::new(api));
        let user = repo.create_user(new_user()).await.unwrap();

        assert_eq!(user.id, Some(42));
        assert_eq!(user.first_name, "Ana");
        assert_eq!(user.last_name, "García");
    }

    #[tokio::test]
    async fn test_create_user_failure_carries_error_body() {
        let mut api = MockCatalogApi::new();
        api.expect_register_user().returning(|_| {
            Err(AppError::Http {
                status: 409,
                body: "email already registered".to_string(),
            })
        });

        let repo = ApiAuthRepository::new(Arc::new(api));
        let err = repo.create_user(new_user()).await.unwrap_err();

        assert_eq!(err.to_string(), "Error registering user: email already registered");
    }

    #[tokio::test]
    async fn test_create_user_malformed_json() {
        let mut api = MockCatalogApi::new();
        api.expect_register_user()
            .returning(|_| Err(AppError::Decode("expected value at line 1".to_string())));

        let repo = ApiAuthRepository::new(Arc::new(api));
        let err = repo.create_user(new_user()).await.unwrap_err();

        assert_eq!(
            err.to_string(),
            "Malformed JSON in response from usuarios/registrar: expected value at line 1"
        );
    }

    #[tokio::test]
    async fn test_login_maps_user() {
        let mut api = MockCatalogApi::new();
        api.expect_login().returning(|_| {
            Ok(UserDto {
                id: Some(7),
                first_name: Some("Carlos".to_string()),
                last_name: Some("López".to_string()),
                email: None,
            })
        });

        let repo = ApiAuthRepository::new(Arc::new(api));
        let user = repo
            .login("carlos@example.com".to_string(), "secret1".to_string())
            .await
            .unwrap();

        assert_eq!(user.id, Some(7));
        assert_eq!(user.email, "carlos@example.com");
        assert_eq!(user.full_name(), "Carlos López");
    }

    #[tokio::test]
    async fn test_user_exists_is_always_false() {
        let repo = ApiAuthRepository::new(Arc::new(MockCatalogApi::new()));
        assert!(!repo.user_exists("ana@example.com".to_string()).await.unwrap());
    }
}
