use serde::{Deserialize, Serialize};

/// Claims carried by the bearer tokens issued by the external identity
/// provider. The backend only verifies them; it never mints tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: String,
    pub email: String,
    pub exp: usize,
    pub iat: usize,
}

/// The acting user for a request. Every workflow operation takes this (or the
/// bare user id) explicitly; there is no ambient session state.
#[derive(Debug, Clone, PartialEq)]
pub struct Identity {
    pub user_id: String,
    pub email: String,
}

impl Identity {
    pub fn new(user_id: &str, email: &str) -> Self {
        Identity {
            user_id: user_id.to_string(),
            email: email.to_string(),
        }
    }
}
