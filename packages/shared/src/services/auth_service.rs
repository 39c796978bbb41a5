use chrono::Utc;
use jsonwebtoken::{decode, DecodingKey, Validation};

use crate::models::auth::{Identity, TokenClaims};
use crate::services::errors::auth_service_errors::AuthServiceError;

#[cfg(test)]
use mockall::automock;

/// Tokens are issued by the external identity provider; this service only
/// verifies them and extracts the acting identity. All authority checks
/// downstream trust the identity extracted here.
#[cfg_attr(test, automock)]
pub trait AuthServiceTrait: Send + Sync {
    fn verify_token(&self, token: &str) -> Result<TokenClaims, AuthServiceError>;
    fn identity_from_token(&self, token: &str) -> Result<Identity, AuthServiceError>;
}

pub struct AuthService {
    jwt_secret: String,
}

impl AuthService {
    pub fn new() -> Self {
        let jwt_secret =
            std::env::var("JWT_SECRET").expect("JWT_SECRET environment variable must be set");
        AuthService { jwt_secret }
    }

    pub fn with_jwt_secret(jwt_secret: String) -> Self {
        AuthService { jwt_secret }
    }
}

impl Default for AuthService {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthServiceTrait for AuthService {
    fn verify_token(&self, token: &str) -> Result<TokenClaims, AuthServiceError> {
        let decoding_key = DecodingKey::from_secret(self.jwt_secret.as_ref());
        let validation = Validation::default();

        match decode::<TokenClaims>(token, &decoding_key, &validation) {
            Ok(token_data) => {
                let now = Utc::now().timestamp() as usize;
                if token_data.claims.exp < now {
                    Err(AuthServiceError::ExpiredToken)
                } else {
                    Ok(token_data.claims)
                }
            }
            Err(err) => match err.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    Err(AuthServiceError::ExpiredToken)
                }
                _ => Err(AuthServiceError::InvalidToken),
            },
        }
    }

    fn identity_from_token(&self, token: &str) -> Result<Identity, AuthServiceError> {
        let claims = self.verify_token(token)?;
        if claims.sub.is_empty() {
            return Err(AuthServiceError::ValidationError(
                "Token has an empty subject".to_string(),
            ));
        }
        Ok(Identity {
            user_id: claims.sub,
            email: claims.email,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use jsonwebtoken::{encode, EncodingKey, Header};

    const SECRET: &str = "test-secret";

    fn token_for(sub: &str, email: &str, expires_in: Duration) -> String {
        let now = Utc::now();
        let claims = TokenClaims {
            sub: sub.to_string(),
            email: email.to_string(),
            exp: (now + expires_in).timestamp() as usize,
            iat: now.timestamp() as usize,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_ref()),
        )
        .unwrap()
    }

    #[test]
    fn valid_token_yields_identity() {
        let service = AuthService::with_jwt_secret(SECRET.to_string());
        let token = token_for("user-1", "sam@example.com", Duration::hours(1));

        let identity = service.identity_from_token(&token).unwrap();
        assert_eq!(identity.user_id, "user-1");
        assert_eq!(identity.email, "sam@example.com");
    }

    #[test]
    fn expired_token_is_rejected() {
        let service = AuthService::with_jwt_secret(SECRET.to_string());
        let token = token_for("user-1", "sam@example.com", Duration::hours(-2));

        assert!(matches!(
            service.verify_token(&token),
            Err(AuthServiceError::ExpiredToken)
        ));
    }

    #[test]
    fn token_signed_with_other_secret_is_invalid() {
        let service = AuthService::with_jwt_secret("another-secret".to_string());
        let token = token_for("user-1", "sam@example.com", Duration::hours(1));

        assert!(matches!(
            service.verify_token(&token),
            Err(AuthServiceError::InvalidToken)
        ));
    }

    #[test]
    fn garbage_token_is_invalid() {
        let service = AuthService::with_jwt_secret(SECRET.to_string());
        assert!(matches!(
            service.identity_from_token("not-a-jwt"),
            Err(AuthServiceError::InvalidToken)
        ));
    }
}
