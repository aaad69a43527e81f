//! Session token service
//!
//! This module issues and verifies the signed, time-limited session token
//! carried by the auth cookie, using the HS256 algorithm, and builds the
//! cookie itself. Tokens are never persisted server-side; expiry and
//! explicit sign-out (cookie cleared) are the only invalidation paths.

use anyhow::Result;
use axum_extra::extract::cookie::{Cookie, SameSite};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Name of the session cookie
pub const AUTH_COOKIE_NAME: &str = "uniq_session";

/// Session token lifetime in seconds (1 hour)
pub const TOKEN_TTL_SECONDS: u64 = 60 * 60;

/// Auth configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Secret used to sign and verify session tokens
    pub secret: String,
    /// Token lifetime in seconds
    pub token_ttl: u64,
    /// Whether the session cookie carries the `Secure` flag
    pub secure_cookies: bool,
}

impl AuthConfig {
    /// Create a new AuthConfig from environment variables
    ///
    /// # Environment Variables
    /// - `AUTH_JWT_SECRET`: Secret for signing session tokens (required)
    /// - `AUTH_TOKEN_TTL`: Token lifetime in seconds (default: 3600)
    /// - `APP_ENV`: `production` enables the cookie `Secure` flag
    pub fn from_env() -> Result<Self> {
        let secret = std::env::var("AUTH_JWT_SECRET")
            .map_err(|_| anyhow::anyhow!("AUTH_JWT_SECRET environment variable not set"))?;

        let token_ttl = std::env::var("AUTH_TOKEN_TTL")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(TOKEN_TTL_SECONDS);

        let secure_cookies = std::env::var("APP_ENV")
            .map(|env| env == "production")
            .unwrap_or(false);

        Ok(AuthConfig {
            secret,
            token_ttl,
            secure_cookies,
        })
    }
}

/// Session token claims
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub sub: Uuid,
    /// User email
    pub email: String,
    /// Issued at time
    pub iat: u64,
    /// Expiration time
    pub exp: u64,
}

/// Session token service
#[derive(Clone)]
pub struct AuthService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    token_ttl: u64,
    secure_cookies: bool,
}

impl AuthService {
    /// Initialize a new session token service
    pub fn new(config: &AuthConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());
        let mut validation = Validation::new(jsonwebtoken::Algorithm::HS256);
        validation.validate_exp = true;

        AuthService {
            encoding_key,
            decoding_key,
            validation,
            token_ttl: config.token_ttl,
            secure_cookies: config.secure_cookies,
        }
    }

    /// Issue a session token for a user
    pub fn issue_token(&self, user_id: Uuid, email: &str) -> Result<String> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| anyhow::anyhow!("Failed to get current time: {}", e))?
            .as_secs();

        let claims = Claims {
            sub: user_id,
            email: email.to_string(),
            iat: now,
            exp: now + self.token_ttl,
        };

        let token = encode(
            &Header::new(jsonwebtoken::Algorithm::HS256),
            &claims,
            &self.encoding_key,
        )?;
        Ok(token)
    }

    /// Verify a session token and return its claims
    pub fn verify_token(&self, token: &str) -> Result<Claims> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)?;
        Ok(token_data.claims)
    }

    /// Get the token lifetime in seconds
    pub fn token_ttl(&self) -> u64 {
        self.token_ttl
    }

    /// Build the session cookie carrying a freshly issued token
    pub fn session_cookie(&self, token: String) -> Cookie<'static> {
        Cookie::build((AUTH_COOKIE_NAME, token))
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.secure_cookies)
            .path("/")
            .max_age(time::Duration::seconds(self.token_ttl as i64))
            .build()
    }

    /// Build the expired cookie that clears the session on sign-out
    pub fn removal_cookie(&self) -> Cookie<'static> {
        Cookie::build((AUTH_COOKIE_NAME, ""))
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.secure_cookies)
            .path("/")
            .max_age(time::Duration::ZERO)
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_auth_env() {
        unsafe {
            std::env::remove_var("AUTH_JWT_SECRET");
            std::env::remove_var("AUTH_TOKEN_TTL");
            std::env::remove_var("APP_ENV");
        }
    }

    #[test]
    #[serial]
    fn config_requires_the_signing_secret() {
        clear_auth_env();

        assert!(AuthConfig::from_env().is_err());
    }

    #[test]
    #[serial]
    fn config_defaults_apply_when_only_the_secret_is_set() {
        clear_auth_env();
        unsafe {
            std::env::set_var("AUTH_JWT_SECRET", "test-secret-at-least-32-characters-long");
        }

        let config = AuthConfig::from_env().expect("Failed to create auth config");
        assert_eq!(config.secret, "test-secret-at-least-32-characters-long");
        assert_eq!(config.token_ttl, TOKEN_TTL_SECONDS);
        assert!(!config.secure_cookies);

        clear_auth_env();
    }

    #[test]
    #[serial]
    fn config_honours_ttl_and_production_overrides() {
        clear_auth_env();
        unsafe {
            std::env::set_var("AUTH_JWT_SECRET", "test-secret-at-least-32-characters-long");
            std::env::set_var("AUTH_TOKEN_TTL", "120");
            std::env::set_var("APP_ENV", "production");
        }

        let config = AuthConfig::from_env().expect("Failed to create auth config");
        assert_eq!(config.token_ttl, 120);
        assert!(config.secure_cookies);

        clear_auth_env();
    }

    fn test_service() -> AuthService {
        AuthService::new(&AuthConfig {
            secret: "test-secret-at-least-32-characters-long".to_string(),
            token_ttl: TOKEN_TTL_SECONDS,
            secure_cookies: false,
        })
    }

    #[test]
    fn issued_token_round_trips() {
        let service = test_service();
        let user_id = Uuid::new_v4();

        let token = service
            .issue_token(user_id, "student@example.com")
            .expect("issue token");
        let claims = service.verify_token(&token).expect("verify token");

        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.email, "student@example.com");
        assert_eq!(claims.exp, claims.iat + TOKEN_TTL_SECONDS);
    }

    #[test]
    fn token_signed_with_another_secret_is_rejected() {
        let service = test_service();
        let other = AuthService::new(&AuthConfig {
            secret: "a-completely-different-signing-secret".to_string(),
            token_ttl: TOKEN_TTL_SECONDS,
            secure_cookies: false,
        });

        let token = other
            .issue_token(Uuid::new_v4(), "student@example.com")
            .expect("issue token");
        assert!(service.verify_token(&token).is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let service = test_service();
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("current time")
            .as_secs();

        // Expired well past the default validation leeway.
        let claims = Claims {
            sub: Uuid::new_v4(),
            email: "student@example.com".to_string(),
            iat: now - 7200,
            exp: now - 3600,
        };
        let token = encode(
            &Header::new(jsonwebtoken::Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret("test-secret-at-least-32-characters-long".as_bytes()),
        )
        .expect("encode token");

        assert!(service.verify_token(&token).is_err());
    }

    #[test]
    fn garbage_token_is_rejected() {
        let service = test_service();
        assert!(service.verify_token("not-a-token").is_err());
    }

    #[test]
    fn session_cookie_carries_the_required_attributes() {
        let service = test_service();
        let cookie = service.session_cookie("token-value".to_string());

        assert_eq!(cookie.name(), AUTH_COOKIE_NAME);
        assert_eq!(cookie.value(), "token-value");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(
            cookie.max_age(),
            Some(time::Duration::seconds(TOKEN_TTL_SECONDS as i64))
        );
    }

    #[test]
    fn removal_cookie_expires_immediately() {
        let service = test_service();
        let cookie = service.removal_cookie();

        assert_eq!(cookie.name(), AUTH_COOKIE_NAME);
        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.max_age(), Some(time::Duration::ZERO));
    }
}
