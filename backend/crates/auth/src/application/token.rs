//! Token Service
//!
//! Issues and validates signed, time-bounded tokens (HS256 JWTs).
//! Session tokens carry the subject email plus role names; activation
//! tokens carry only the subject.

use chrono::Utc;
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode,
    errors::ErrorKind as JwtErrorKind,
};
use serde::{Deserialize, Serialize};

use crate::application::config::AuthConfig;
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};

/// Claims carried by every token issued by this service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject (owner email)
    pub sub: String,
    /// Role names (empty for activation tokens)
    #[serde(default)]
    pub roles: Vec<String>,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

/// Signed-token issue/validate/extract service
///
/// Keys are derived once from the configured secret; the service itself is
/// immutable and shared behind an `Arc`.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    session_ttl: chrono::Duration,
    activation_ttl: chrono::Duration,
}

impl TokenService {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(&config.jwt_secret),
            decoding_key: DecodingKey::from_secret(&config.jwt_secret),
            session_ttl: config.session_ttl_chrono(),
            activation_ttl: config.activation_ttl_chrono(),
        }
    }

    /// Issue a short-lived session token embedding role names
    pub fn issue_session(&self, email: &Email, roles: Vec<String>) -> AuthResult<String> {
        self.issue(email.as_str(), roles, self.session_ttl)
    }

    /// Issue a long-lived activation token (subject only)
    pub fn issue_activation(&self, email: &Email) -> AuthResult<String> {
        self.issue(email.as_str(), Vec::new(), self.activation_ttl)
    }

    fn issue(&self, subject: &str, roles: Vec<String>, ttl: chrono::Duration) -> AuthResult<String> {
        let now = Utc::now();
        let claims = TokenClaims {
            sub: subject.to_string(),
            roles,
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Internal(format!("Failed to sign token: {}", e)))
    }

    /// Check signature and expiry; every failure collapses to `false`
    pub fn validate(&self, token: &str) -> bool {
        match decode::<TokenClaims>(token, &self.decoding_key, &Self::validation()) {
            Ok(_) => true,
            Err(e) => {
                match e.kind() {
                    JwtErrorKind::InvalidSignature => {
                        tracing::warn!("Invalid token signature");
                    }
                    JwtErrorKind::ExpiredSignature => {
                        tracing::warn!("Token is expired");
                    }
                    JwtErrorKind::InvalidAlgorithm => {
                        tracing::warn!("Token signed with unsupported algorithm");
                    }
                    _ => {
                        tracing::warn!(error = %e, "Malformed token");
                    }
                }
                false
            }
        }
    }

    /// Extract claims; fails with `InvalidToken`/`TokenExpired` when
    /// [`validate`](Self::validate) would be false
    pub fn claims(&self, token: &str) -> AuthResult<TokenClaims> {
        decode::<TokenClaims>(token, &self.decoding_key, &Self::validation())
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                JwtErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidToken,
            })
    }

    fn validation() -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        // Zero leeway: a three-minute session TTL leaves no room for clock
        // slack, and tests rely on deterministic expiry.
        validation.leeway = 0;
        validation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn service() -> TokenService {
        TokenService::new(&AuthConfig::with_random_secret())
    }

    fn email() -> Email {
        Email::new("user@example.com").unwrap()
    }

    #[test]
    fn test_issue_and_validate_session() {
        let tokens = service();
        let token = tokens
            .issue_session(&email(), vec!["USER".to_string()])
            .unwrap();

        assert_eq!(token.matches('.').count(), 2); // JWT has 3 parts
        assert!(tokens.validate(&token));

        let claims = tokens.claims(&token).unwrap();
        assert_eq!(claims.sub, "user@example.com");
        assert_eq!(claims.roles, vec!["USER".to_string()]);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_activation_token_has_no_roles() {
        let tokens = service();
        let token = tokens.issue_activation(&email()).unwrap();

        let claims = tokens.claims(&token).unwrap();
        assert_eq!(claims.sub, "user@example.com");
        assert!(claims.roles.is_empty());
    }

    #[test]
    fn test_tampered_token_rejected() {
        let tokens = service();
        let token = tokens.issue_session(&email(), Vec::new()).unwrap();

        let mut tampered = token.clone();
        tampered.pop();
        tampered.push('A');

        assert!(!tokens.validate(&tampered));
        assert!(matches!(
            tokens.claims(&tampered),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let issuer = service();
        let verifier = service(); // different random secret

        let token = issuer.issue_session(&email(), Vec::new()).unwrap();
        assert!(!verifier.validate(&token));
    }

    #[test]
    fn test_expired_token_rejected() {
        let config = AuthConfig {
            session_ttl: Duration::from_secs(0),
            ..AuthConfig::with_random_secret()
        };
        let tokens = TokenService::new(&config);

        let token = tokens.issue_session(&email(), Vec::new()).unwrap();

        // exp == iat, and leeway is zero
        std::thread::sleep(Duration::from_millis(1100));
        assert!(!tokens.validate(&token));
        assert!(matches!(tokens.claims(&token), Err(AuthError::TokenExpired)));
    }
}
