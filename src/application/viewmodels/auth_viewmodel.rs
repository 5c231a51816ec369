// src/application/viewmodels/auth_viewmodel.rs
//
// Login screen

use std::sync::Arc;

use super::state::{message_or, StateHandle, UiState};
use crate::domain::{validate_credentials, NewUser, User};
use crate::error::AppResult;
use crate::repositories::AuthRepository;
use crate::services::SessionStore;

pub struct AuthViewModel {
    repo: Arc<dyn AuthRepository>,
    session: Arc<SessionStore>,
    state: StateHandle<UiState<User>>,
    user_exists: StateHandle<Option<bool>>,
}

impl AuthViewModel {
    pub fn new(repo: Arc<dyn AuthRepository>, session: Arc<SessionStore>) -> Self {
        Self {
            repo,
            session,
            state: StateHandle::default(),
            user_exists: StateHandle::default(),
        }
    }

    pub fn state(&self) -> UiState<User> {
        self.state.get()
    }

    pub fn subscribe(&self) -> tokio::sync::watch::Receiver<UiState<User>> {
        self.state.subscribe()
    }

    /// Last answer of [`Self::check_user_exists`]; `None` until asked
    pub fn user_exists(&self) -> Option<bool> {
        self.user_exists.get()
    }

    /// Validate locally, log in and persist the session.
    ///
    /// Local validation failures never reach the backend. Any backend
    /// failure is shown as "Invalid user".
    pub async fn login(&self, email: &str, password: &str) -> UiState<User> {
        if let Err(e) = validate_credentials(email, password) {
            return self.state.set(UiState::Error(e.to_string()));
        }

        self.state.set(UiState::Loading);

        match self.repo.login(email.to_string(), password.to_string()).await {
            Ok(user) => self.finish_login(user),
            Err(e) => {
                log::warn!("Login for {} failed: {}", email, e);
                self.state.set(UiState::Error("Invalid user".to_string()))
            }
        }
    }

    pub fn reset(&self) {
        self.state.set(UiState::Idle);
    }

    pub async fn check_user_exists(&self, email: &str) -> AppResult<bool> {
        let exists = self.repo.user_exists(email.to_string()).await?;
        self.user_exists.set(Some(exists));
        Ok(exists)
    }

    /// Register, then log in with the same credentials
    pub async fn create_user_and_login(&self, new_user: NewUser) -> UiState<User> {
        if let Err(e) = validate_credentials(&new_user.email, &new_user.password) {
            return self.state.set(UiState::Error(e.to_string()));
        }

        self.state.set(UiState::Loading);

        let email = new_user.email.clone();
        let password = new_user.password.clone();

        if let Err(e) = self.repo.create_user(new_user).await {
            return self
                .state
                .set(UiState::Error(message_or(&e, || "Error creating user".to_string())));
        }

        match self.repo.login(email, password).await {
            Ok(user) => self.finish_login(user),
            Err(e) => self
                .state
                .set(UiState::Error(message_or(&e, || "Authentication error".to_string()))),
        }
    }

    fn finish_login(&self, user: User) -> UiState<User> {
        let name = user.full_name();
        let name = if name.is_empty() { user.email.clone() } else { name };

        match self.session.set_logged_in(user.session_id(), name, user.email.clone()) {
            Ok(()) => {
                log::info!("Logged in as {}", user.email);
                self.state.set(UiState::Success(user))
            }
            Err(e) => self.state.set(UiState::Error(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::viewmodels::test_support::logged_out_store;
    use crate::error::AppError;
    use crate::repositories::MockAuthRepository;

    fn ana() -> User {
        User {
            id: Some(7),
            first_name: "Ana".to_string(),
            last_name: "García".to_string(),
            email: "ana@example.com".to_string(),
        }
    }

    fn signup() -> NewUser {
        NewUser {
            first_name: "Ana".to_string(),
            last_name: "García".to_string(),
            email: "ana@example.com".to_string(),
            password: "secret1".to_string(),
        }
    }

    #[tokio::test]
    async fn test_login_success_writes_session() {
        let mut repo = MockAuthRepository::new();
        repo.expect_login()
            .withf(|email, password| email == "ana@example.com" && password == "secret1")
            .times(1)
            .returning(|_, _| Ok(ana()));

        let session = logged_out_store();
        let vm = AuthViewModel::new(Arc::new(repo), Arc::clone(&session));

        let state = vm.login("ana@example.com", "secret1").await;

        assert_eq!(state, UiState::Success(ana()));
        assert_eq!(vm.state(), UiState::Success(ana()));
        let current = session.current_session().unwrap();
        assert_eq!(current.user_id, "7");
        assert_eq!(current.user_name, "Ana García");
    }

    #[tokio::test]
    async fn test_login_failure_is_invalid_user() {
        let mut repo = MockAuthRepository::new();
        repo.expect_login()
            .returning(|_, _| Err(AppError::Api("Login failed: 401".to_string())));

        let session = logged_out_store();
        let vm = AuthViewModel::new(Arc::new(repo), Arc::clone(&session));

        let state = vm.login("ana@example.com", "secret1").await;

        assert_eq!(state, UiState::Error("Invalid user".to_string()));
        assert!(session.current_session().is_none());
    }

    #[tokio::test]
    async fn test_login_validates_locally() {
        let mut repo = MockAuthRepository::new();
        repo.expect_login().never();
        let vm = AuthViewModel::new(Arc::new(repo), logged_out_store());

        assert_eq!(
            vm.login("not-an-email", "secret1").await,
            UiState::Error("Invalid email".to_string())
        );
        assert_eq!(
            vm.login("ana@example.com", "123").await,
            UiState::Error("Password must be at least 6 characters".to_string())
        );
    }

    #[tokio::test]
    async fn test_reset_returns_to_idle() {
        let vm = AuthViewModel::new(Arc::new(MockAuthRepository::new()), logged_out_store());
        vm.login("bad", "bad").await;
        vm.reset();
        assert_eq!(vm.state(), UiState::Idle);
    }

    #[tokio::test]
    async fn test_check_user_exists() {
        let mut repo = MockAuthRepository::new();
        repo.expect_user_exists().returning(|_| Ok(false));
        let vm = AuthViewModel::new(Arc::new(repo), logged_out_store());

        assert_eq!(vm.user_exists(), None);
        assert!(!vm.check_user_exists("ana@example.com").await.unwrap());
        assert_eq!(vm.user_exists(), Some(false));
    }

    #[tokio::test]
    async fn test_create_user_and_login() {
        let mut repo = MockAuthRepository::new();
        repo.expect_create_user().times(1).returning(|_| Ok(ana()));
        repo.expect_login().times(1).returning(|_, _| Ok(ana()));

        let session = logged_out_store();
        let vm = AuthViewModel::new(Arc::new(repo), Arc::clone(&session));

        assert_eq!(vm.create_user_and_login(signup()).await, UiState::Success(ana()));
        assert!(session.current_session().is_some());
    }

    #[tokio::test]
    async fn test_create_user_failure_skips_login() {
        let mut repo = MockAuthRepository::new();
        repo.expect_create_user().returning(|_| {
            Err(AppError::Api("Error registering user: duplicated".to_string()))
        });
        repo.expect_login().never();

        let vm = AuthViewModel::new(Arc::new(repo), logged_out_store());
        assert_eq!(
            vm.create_user_and_login(signup()).await,
            UiState::Error("Error registering user: duplicated".to_string())
        );
    }

    #[tokio::test]
    async fn test_create_user_and_login_validates_locally() {
        let mut repo = MockAuthRepository::new();
        repo.expect_create_user().never();
        repo.expect_login().never();

        let session = logged_out_store();
        let vm = AuthViewModel::new(Arc::new(repo), Arc::clone(&session));
        let state = vm
            .create_user_and_login(NewUser {
                password: "short".to_string(),
                ..signup()
            })
            .await;

        assert_eq!(
            state,
            UiState::Error("Password must be at least 6 characters".to_string())
        );
        assert!(session.current_session().is_none());
    }
}
