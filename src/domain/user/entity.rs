use serde::{Deserialize, Serialize};

/// Registered catalog user. The password is never kept on the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Option<i64>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    /// Session id for this user; users without a backend id use their email
    pub fn session_id(&self) -> String {
        self.id
            .map(|id| id.to_string())
            .unwrap_or_else(|| self.email.clone())
    }
}

/// Sign-up form data. The password only travels to the register endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

/// Postal address used for book hand-overs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub number: String,
    pub commune: String,
    pub region: String,
}

impl Address {
    pub fn is_blank(&self) -> bool {
        [&self.street, &self.number, &self.commune, &self.region]
            .iter()
            .all(|part| part.trim().is_empty())
    }

    pub fn to_display_string(&self) -> String {
        if self.is_blank() {
            return String::new();
        }
        format!(
            "{} {}, {}, {}",
            self.street, self.number, self.commune, self.region
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub full_name: String,
    pub email: String,
    pub photo_url: String,
    pub address: Option<Address>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_address_renders_empty() {
        assert_eq!(Address::default().to_display_string(), "");
    }

    #[test]
    fn test_address_display() {
        let address = Address {
            street: "Av. Providencia".to_string(),
            number: "1234".to_string(),
            commune: "Providencia".to_string(),
            region: "RM".to_string(),
        };
        assert_eq!(
            address.to_display_string(),
            "Av. Providencia 1234, Providencia, RM"
        );
    }

    #[test]
    fn test_session_id_falls_back_to_email() {
        let user = User {
            id: None,
            first_name: "Ana".to_string(),
            last_name: "García".to_string(),
            email: "ana@example.com".to_string(),
        };
        assert_eq!(user.session_id(), "ana@example.com");
        assert_eq!(user.full_name(), "Ana García");
    }
}
