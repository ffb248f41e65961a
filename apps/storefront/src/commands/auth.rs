//! # Auth Commands
//!
//! Sign in, create account, sign out.
//!
//! ```text
//! login/register
//!      │
//!      ├── is_loading = true            (LoadingGuard)
//!      ├── sleep(auth_delay)            simulated round trip
//!      ├── verify / create account
//!      └── is_loading = false           (guard dropped, success or error)
//! ```

use serde::Deserialize;
use tracing::debug;

use crate::error::ApiResult;
use crate::state::{AuthSnapshot, AuthState, StoreConfig};

/// Sign-in form.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Create-account form.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

pub async fn login(
    config: &StoreConfig,
    auth: &AuthState,
    request: LoginRequest,
) -> ApiResult<AuthSnapshot> {
    debug!(email = %request.email, "login command");

    let _loading = auth.begin_request();
    tokio::time::sleep(config.auth_delay()).await;

    auth.login(&request.email, &request.password)?;
    Ok(auth.snapshot())
}

pub async fn register(
    config: &StoreConfig,
    auth: &AuthState,
    request: RegisterRequest,
) -> ApiResult<AuthSnapshot> {
    debug!(email = %request.email, "register command");

    let _loading = auth.begin_request();
    tokio::time::sleep(config.auth_delay()).await;

    auth.register(&request.name, &request.email, &request.password)?;
    Ok(auth.snapshot())
}

pub fn logout(auth: &AuthState) -> AuthSnapshot {
    debug!("logout command");
    auth.logout();
    auth.snapshot()
}

pub fn get_auth_state(auth: &AuthState) -> AuthSnapshot {
    auth.snapshot()
}
