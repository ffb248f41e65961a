//! # Auth State
//!
//! Customer accounts and the current session.
//!
//! ## Session Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   signed out ──register(name, email, pw)──► signed in                  │
//! │       ▲       ──login(email, pw)──────────►    │                        │
//! │       │                                        │                        │
//! │       └──────────────── logout() ──────────────┘                        │
//! │                                                                         │
//! │   is_loading is true while a login/register round trip is in flight   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Passwords are stored as argon2 PHC strings. Emails are matched
//! case-insensitively.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use flickd_core::validation::{validate_email, validate_name, validate_password};
use flickd_core::{Money, User, UserPreferences, ValidationError};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Auth failures.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Unknown email or wrong password. Deliberately does not say which.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Operation needs a signed-in customer.
    #[error("Not signed in")]
    NotSignedIn,

    /// Registration form failed validation.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Password hashing failed.
    #[error("Password hashing failed: {0}")]
    Hashing(String),
}

#[derive(Debug, Clone)]
struct Account {
    user: User,
    password_hash: String,
}

#[derive(Debug, Default)]
struct AuthInner {
    accounts: Vec<Account>,
    session: Option<String>,
    /// Login/register round trips currently in flight.
    in_flight: u32,
}

impl AuthInner {
    fn account_by_email(&self, email: &str) -> Option<&Account> {
        self.accounts
            .iter()
            .find(|a| a.user.email.eq_ignore_ascii_case(email))
    }

    fn current_user(&self) -> Option<&User> {
        let id = self.session.as_deref()?;
        self.accounts
            .iter()
            .find(|a| a.user.id == id)
            .map(|a| &a.user)
    }
}

/// What the UI renders in the header.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSnapshot {
    pub user: Option<User>,
    pub is_authenticated: bool,
    pub is_loading: bool,
}

/// Shared auth state.
#[derive(Debug, Clone, Default)]
pub struct AuthState {
    inner: Arc<Mutex<AuthInner>>,
}

impl AuthState {
    /// No accounts, signed out.
    pub fn new() -> Self {
        AuthState::default()
    }

    /// One demo account (Sarah Johnson), signed out.
    pub fn seeded(demo_email: &str, demo_password: &str) -> Result<Self, AuthError> {
        let state = AuthState::new();
        let user = User {
            id: "1".to_string(),
            name: "Sarah Johnson".to_string(),
            email: demo_email.trim().to_string(),
            avatar: Some("/images/avatars/sarah.jpg".to_string()),
            preferences: UserPreferences {
                style: vec!["clean-girl".to_string(), "coquette".to_string()],
                sizes: vec!["S".to_string(), "M".to_string()],
                price_range: (Money::from_cents(5_000), Money::from_cents(20_000)),
            },
        };
        let password_hash = hash_password(demo_password)?;
        state.lock().accounts.push(Account {
            user,
            password_hash,
        });
        Ok(state)
    }

    fn lock(&self) -> MutexGuard<'_, AuthInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Marks a round trip as in flight until the guard drops.
    pub fn begin_request(&self) -> LoadingGuard {
        let mut inner = self.lock();
        inner.in_flight = inner.in_flight.saturating_add(1);
        drop(inner);
        LoadingGuard {
            state: self.clone(),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.lock().in_flight > 0
    }

    pub fn current_user(&self) -> Option<User> {
        self.lock().current_user().cloned()
    }

    /// The signed-in user, or `NotSignedIn`.
    pub fn require_user(&self) -> Result<User, AuthError> {
        self.current_user().ok_or(AuthError::NotSignedIn)
    }

    pub fn snapshot(&self) -> AuthSnapshot {
        let inner = self.lock();
        let user = inner.current_user().cloned();
        AuthSnapshot {
            is_authenticated: user.is_some(),
            user,
            is_loading: inner.in_flight > 0,
        }
    }

    /// Creates an account and signs it in.
    ///
    /// ## Errors
    /// - `Validation` for a bad name, email or short password
    /// - `Validation(Duplicate)` if the email is already registered
    pub fn register(&self, name: &str, email: &str, password: &str) -> Result<User, AuthError> {
        validate_name(name)?;
        validate_email(email)?;
        validate_password(password)?;

        let email = email.trim();
        if self.lock().account_by_email(email).is_some() {
            return Err(ValidationError::Duplicate {
                field: "email".to_string(),
                value: email.to_string(),
            }
            .into());
        }

        // Hash outside the lock
        let password_hash = hash_password(password)?;

        let user = User {
            id: format!("user-{}", Uuid::new_v4()),
            name: name.trim().to_string(),
            email: email.to_string(),
            avatar: None,
            preferences: UserPreferences::default(),
        };

        let mut inner = self.lock();
        // Re-check: another register may have won while hashing
        if inner.account_by_email(email).is_some() {
            return Err(ValidationError::Duplicate {
                field: "email".to_string(),
                value: email.to_string(),
            }
            .into());
        }
        inner.accounts.push(Account {
            user: user.clone(),
            password_hash,
        });
        inner.session = Some(user.id.clone());

        info!(user_id = %user.id, "Account registered");
        Ok(user)
    }

    /// Verifies credentials and signs the account in.
    pub fn login(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let account = self.lock().account_by_email(email.trim()).cloned();

        let Some(account) = account else {
            warn!("Login for unknown email");
            return Err(AuthError::InvalidCredentials);
        };

        if !verify_password(password, &account.password_hash) {
            warn!(user_id = %account.user.id, "Login with wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        self.lock().session = Some(account.user.id.clone());
        info!(user_id = %account.user.id, "Signed in");
        Ok(account.user)
    }

    /// Clears the session. Signing out when signed out is a no-op.
    pub fn logout(&self) {
        if let Some(user_id) = self.lock().session.take() {
            debug!(user_id = %user_id, "Signed out");
        }
    }
}

/// Ends one in-flight round trip on drop. Loading stays set until every
/// outstanding guard is gone.
#[derive(Debug)]
pub struct LoadingGuard {
    state: AuthState,
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        let mut inner = self.state.lock();
        inner.in_flight = inner.in_flight.saturating_sub(1);
    }
}

/// Hashes a password for storage.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AuthError::Hashing(e.to_string()))?;

    Ok(hash.to_string())
}

/// Verifies a password against its stored hash.
fn verify_password(password: &str, hash: &str) -> bool {
    let parsed_hash = match PasswordHash::new(hash) {
        Ok(h) => h,
        Err(_) => return false,
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}
