//! Local account registry: signup with a salted password hash, login with a
//! signed expiring token.

pub mod token;

use crate::utils::fs::{read_json, write_json_atomic};
use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

pub use token::Claims;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("All fields are required")]
    MissingFields,

    #[error("User already exists")]
    UserExists,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Token expired")]
    TokenExpired,

    #[error("account storage error: {0}")]
    Io(#[from] io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// HTTP status the signup/login endpoints answer with for this error.
    pub fn status(&self) -> u16 {
        match self {
            Self::MissingFields | Self::UserExists => 400,
            Self::InvalidCredentials | Self::InvalidToken | Self::TokenExpired => 401,
            Self::Io(_) | Self::Internal(_) => 500,
        }
    }
}

pub type Result<T> = std::result::Result<T, AuthError>;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    pub email: String,
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub username: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: String,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Account> for UserSummary {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id.clone(),
            username: account.username.clone(),
            email: account.email.clone(),
            created_at: account.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub message: &'static str,
    pub user: UserSummary,
}

#[derive(Debug, Clone)]
pub struct TokenSettings {
    pub secret: String,
    pub ttl_secs: i64,
}

pub struct AccountStore {
    path: PathBuf,
    tokens: TokenSettings,
}

impl AccountStore {
    pub fn new(root: impl Into<PathBuf>, tokens: TokenSettings) -> Self {
        Self {
            path: root.into().join("accounts.json"),
            tokens,
        }
    }

    fn load(&self) -> Result<Vec<Account>> {
        Ok(read_json(&self.path)?.unwrap_or_default())
    }

    pub fn find_by_email(&self, email: &str) -> Result<Option<Account>> {
        let email = normalize_email(email);
        Ok(self.load()?.into_iter().find(|account| account.email == email))
    }

    pub fn signup(&self, request: SignupRequest) -> Result<Account> {
        let email = normalize_email(&request.email);
        let username = request.username.trim();
        if email.is_empty() || request.password.is_empty() || username.is_empty() {
            return Err(AuthError::MissingFields);
        }

        let mut accounts = self.load()?;
        if accounts.iter().any(|account| account.email == email) {
            warn!(%email, "signup rejected, email already registered");
            return Err(AuthError::UserExists);
        }

        let account = Account {
            id: Uuid::new_v4().to_string(),
            email,
            username: username.to_string(),
            password_hash: hash_password(&request.password)?,
            created_at: Utc::now(),
        };
        accounts.push(account.clone());
        write_json_atomic(&self.path, &accounts)?;
        info!(email = %account.email, "account created");
        Ok(account)
    }

    pub fn login(&self, request: LoginRequest) -> Result<LoginResponse> {
        self.login_at(request, Utc::now().timestamp())
    }

    fn login_at(&self, request: LoginRequest, now: i64) -> Result<LoginResponse> {
        let Some(account) = self.find_by_email(&request.email)? else {
            return Err(AuthError::InvalidCredentials);
        };
        if !verify_password(&request.password, &account.password_hash)? {
            warn!(email = %account.email, "login rejected, password mismatch");
            return Err(AuthError::InvalidCredentials);
        }

        let exp = now
            .checked_add(self.tokens.ttl_secs)
            .ok_or_else(|| AuthError::Internal("token lifetime overflows".to_string()))?;
        let claims = Claims {
            user_id: account.id.clone(),
            iat: now,
            exp,
        };
        let token = token::sign(&claims, self.tokens.secret.as_bytes())?;
        info!(email = %account.email, "login succeeded");

        Ok(LoginResponse {
            token,
            message: "Login successful",
            user: UserSummary::from(&account),
        })
    }

    pub fn verify_token(&self, token: &str) -> Result<Claims> {
        token::verify(token, self.tokens.secret.as_bytes(), Utc::now().timestamp())
    }
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| AuthError::Internal(err.to_string()))
}

fn verify_password(password: &str, stored_hash: &str) -> Result<bool> {
    let parsed =
        PasswordHash::new(stored_hash).map_err(|err| AuthError::Internal(err.to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn accounts() -> (TempDir, AccountStore) {
        let dir = TempDir::new().expect("tempdir");
        let store = AccountStore::new(
            dir.path(),
            TokenSettings {
                secret: "test-secret".to_string(),
                ttl_secs: 3600,
            },
        );
        (dir, store)
    }

    fn signup(email: &str) -> SignupRequest {
        SignupRequest {
            email: email.to_string(),
            password: "hunter22".to_string(),
            username: "sam".to_string(),
        }
    }

    #[test]
    fn signup_normalizes_email_and_hashes_password() {
        let (_dir, store) = accounts();
        let account = store.signup(signup("  Sam@Example.COM ")).expect("signup");
        assert_eq!(account.email, "sam@example.com");
        assert_ne!(account.password_hash, "hunter22");
        assert!(account.password_hash.starts_with("$argon2"));
    }

    #[test]
    fn signup_requires_every_field() {
        let (_dir, store) = accounts();
        for request in [
            SignupRequest {
                email: " ".to_string(),
                ..signup("x@y.z")
            },
            SignupRequest {
                password: String::new(),
                ..signup("x@y.z")
            },
            SignupRequest {
                username: String::new(),
                ..signup("x@y.z")
            },
        ] {
            let err = store.signup(request).expect_err("should fail");
            assert!(matches!(err, AuthError::MissingFields));
            assert_eq!(err.status(), 400);
        }
    }

    #[test]
    fn duplicate_email_is_rejected_after_normalization() {
        let (_dir, store) = accounts();
        store.signup(signup("sam@example.com")).expect("signup");
        let err = store
            .signup(signup("SAM@example.com "))
            .expect_err("duplicate");
        assert!(matches!(err, AuthError::UserExists));
        assert_eq!(err.status(), 400);
    }

    #[test]
    fn login_issues_token_valid_for_an_hour() {
        let (_dir, store) = accounts();
        let account = store.signup(signup("sam@example.com")).expect("signup");

        let response = store
            .login_at(
                LoginRequest {
                    email: "Sam@Example.com".to_string(),
                    password: "hunter22".to_string(),
                },
                10_000,
            )
            .expect("login");
        assert_eq!(response.user.id, account.id);
        assert_eq!(response.user.email, "sam@example.com");

        let claims = token::verify(&response.token, b"test-secret", 10_001).expect("valid");
        assert_eq!(claims.user_id, account.id);
        assert_eq!(claims.exp - claims.iat, 3600);
        assert!(matches!(
            token::verify(&response.token, b"test-secret", 13_600),
            Err(AuthError::TokenExpired)
        ));
    }

    #[test]
    fn oversized_token_lifetime_is_an_error() {
        let dir = TempDir::new().expect("tempdir");
        let store = AccountStore::new(
            dir.path(),
            TokenSettings {
                secret: "test-secret".to_string(),
                ttl_secs: i64::MAX,
            },
        );
        store.signup(signup("sam@example.com")).expect("signup");

        let err = store
            .login_at(
                LoginRequest {
                    email: "sam@example.com".to_string(),
                    password: "hunter22".to_string(),
                },
                10_000,
            )
            .expect_err("overflow");
        assert!(matches!(err, AuthError::Internal(_)));
        assert_eq!(err.status(), 500);
    }

    #[test]
    fn login_failures_are_indistinguishable() {
        let (_dir, store) = accounts();
        store.signup(signup("sam@example.com")).expect("signup");

        let wrong_password = store
            .login(LoginRequest {
                email: "sam@example.com".to_string(),
                password: "nope".to_string(),
            })
            .expect_err("wrong password");
        let unknown = store
            .login(LoginRequest {
                email: "who@example.com".to_string(),
                password: "hunter22".to_string(),
            })
            .expect_err("unknown email");

        assert_eq!(wrong_password.to_string(), unknown.to_string());
        assert_eq!(wrong_password.status(), 401);
        assert_eq!(unknown.status(), 401);
    }
}
