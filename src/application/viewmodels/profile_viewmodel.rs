// src/application/viewmodels/profile_viewmodel.rs
//
// Profile screen. The profile is built from the session; address and
// photo are kept locally.

use std::sync::Arc;

use super::state::StateHandle;
use crate::domain::{Address, UserProfile};
use crate::error::AppResult;
use crate::repositories::AuthRepository;
use crate::services::SessionStore;

pub struct ProfileViewModel {
    auth: Arc<dyn AuthRepository>,
    session: Arc<SessionStore>,
    profile: StateHandle<Option<UserProfile>>,
}

impl ProfileViewModel {
    pub fn new(auth: Arc<dyn AuthRepository>, session: Arc<SessionStore>) -> Self {
        Self {
            auth,
            session,
            profile: StateHandle::default(),
        }
    }

    pub fn profile(&self) -> Option<UserProfile> {
        self.profile.get()
    }

    pub fn subscribe(&self) -> tokio::sync::watch::Receiver<Option<UserProfile>> {
        self.profile.subscribe()
    }

    /// Build the profile from the session. Only the first successful call
    /// has an effect.
    pub fn load_profile(&self) -> Option<UserProfile> {
        if self.profile.get().is_none() {
            if let Some(session) = self.session.current_session() {
                self.profile.set(Some(UserProfile {
                    full_name: session.user_name,
                    email: session.user_email,
                    photo_url: String::new(),
                    address: None,
                }));
            }
        }
        self.profile.get()
    }

    pub fn update_address(&self, address: Address) {
        self.profile.update(|profile| {
            if let Some(profile) = profile {
                profile.address = Some(address);
            }
        });
    }

    pub fn update_profile_picture(&self, photo_url: impl Into<String>) {
        let photo_url = photo_url.into();
        self.profile.update(|profile| {
            if let Some(profile) = profile {
                profile.photo_url = photo_url;
            }
        });
    }

    /// Log out on the backend, then forget the local session
    pub async fn logout(&self) -> AppResult<()> {
        self.auth.logout().await?;
        self.session.clear()?;
        self.profile.set(None);
        Ok(())
    }
}
