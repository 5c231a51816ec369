// src/application/viewmodels/register_viewmodel.rs
//
// Sign-up screen

use std::sync::Arc;

use super::state::{message_or, StateHandle, UiState};
use crate::domain::{validate_credentials, NewUser, User};
use crate::repositories::AuthRepository;

pub struct RegisterViewModel {
    repo: Arc<dyn AuthRepository>,
    state: StateHandle<UiState<User>>,
}

impl RegisterViewModel {
    pub fn new(repo: Arc<dyn AuthRepository>) -> Self {
        Self {
            repo,
            state: StateHandle::default(),
        }
    }

    pub fn state(&self) -> UiState<User> {
        self.state.get()
    }

    pub fn subscribe(&self) -> tokio::sync::watch::Receiver<UiState<User>> {
        self.state.subscribe()
    }

    pub async fn create_user(&self, new_user: NewUser) -> UiState<User> {
        if let Err(e) = validate_credentials(&new_user.email, &new_user.password) {
            return self.state.set(UiState::Error(e.to_string()));
        }

        self.state.set(UiState::Loading);

        let next = match self.repo.create_user(new_user).await {
            Ok(user) => UiState::Success(user),
            Err(e) => UiState::Error(message_or(&e, || "Error creating user".to_string())),
        };
        self.state.set(next)
    }

    pub fn reset(&self) {
        self.state.set(UiState::Idle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::repositories::MockAuthRepository;

    fn signup() -> NewUser {
        NewUser {
            first_name: "Carlos".to_string(),
            last_name: "López".to_string(),
            email: "carlos@example.com".to_string(),
            password: "secret1".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_user_success() {
        let mut repo = MockAuthRepository::new();
        repo.expect_create_user()
            .withf(|u| u.email == "carlos@example.com")
            .returning(|u| {
                Ok(User {
                    id: Some(9),
                    first_name: u.first_name,
                    last_name: u.last_name,
                    email: u.email,
                })
            });

        let vm = RegisterViewModel::new(Arc::new(repo));
        let state = vm.create_user(signup()).await;

        assert_eq!(state.success().and_then(|u| u.id), Some(9));
        assert_eq!(vm.state(), state);
    }

    #[tokio::test]
    async fn test_create_user_failure_message() {
        let mut repo = MockAuthRepository::new();
        repo.expect_create_user()
            .returning(|_| Err(AppError::Api("Error registering user: taken".to_string())));

        let vm = RegisterViewModel::new(Arc::new(repo));
        assert_eq!(
            vm.create_user(signup()).await,
            UiState::Error("Error registering user: taken".to_string())
        );

        vm.reset();
        assert_eq!(vm.state(), UiState::Idle);
    }

    #[tokio::test]
    async fn test_create_user_rejects_bad_credentials_locally() {
        let mut repo = MockAuthRepository::new();
        repo.expect_create_user().never();

        let vm = RegisterViewModel::new(Arc::new(repo));
        let state = vm
            .create_user(NewUser {
                email: "not-an-email".to_string(),
                password: "1".to_string(),
                ..signup()
            })
            .await;
        assert_eq!(state, UiState::Error("Invalid email".to_string()));

        let state = vm
            .create_user(NewUser {
                password: "12345".to_string(),
                ..signup()
            })
            .await;
        assert_eq!(
            state,
            UiState::Error("Password must be at least 6 characters".to_string())
        );
    }
}
