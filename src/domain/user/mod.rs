pub mod entity;
pub mod invariants;

pub use entity::{Address, NewUser, User, UserProfile};
pub use invariants::{validate_credentials, validate_email, validate_password, MIN_PASSWORD_LEN};
