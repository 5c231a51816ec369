use serde::{Deserialize, Serialize};

/// Identity of the user logged in on this device.
///
/// There is a single session slot: it is replaced wholesale on login and
/// reset to [`Session::default`] on logout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub is_logged_in: bool,
    pub user_id: String,
    pub user_name: String,
    pub user_email: String,
}

impl Session {
    pub fn logged_in(
        user_id: impl Into<String>,
        user_name: impl Into<String>,
        user_email: impl Into<String>,
    ) -> Self {
        Self {
            is_logged_in: true,
            user_id: user_id.into(),
            user_name: user_name.into(),
            user_email: user_email.into(),
        }
    }

    pub fn logged_out() -> Self {
        Self::default()
    }

    /// Name shown as message sender; falls back to a generic label
    pub fn display_name(&self) -> &str {
        if self.user_name.trim().is_empty() {
            "User"
        } else {
            &self.user_name
        }
    }
}
