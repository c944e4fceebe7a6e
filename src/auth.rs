//! Token authentication for incoming requests.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use model::access::{self, Endpoint, Role};
use model::entities::{account, auth_token};
use model::ModelError;
use tracing::{debug, trace};

use crate::error::ApiError;
use crate::schemas::AppState;

/// Schemes accepted in the `Authorization` header.
const SCHEMES: [&str; 2] = ["Token", "Bearer"];

/// The account behind a request, if its token resolved to one.
#[derive(Debug)]
pub struct Caller {
    pub account: Option<account::Model>,
}

impl Caller {
    pub fn role(&self) -> Role {
        Role::of(self.account.as_ref())
    }

    /// Apply the access policy for `endpoint` and return the calling account.
    pub fn authorize(self, endpoint: Endpoint) -> Result<account::Model, ModelError> {
        access::authorize(endpoint, self.role())?;
        self.account.ok_or(ModelError::Forbidden)
    }
}

/// Extract the key from `Token <key>` or `Bearer <key>`.
pub fn parse_authorization(value: &str) -> Option<&str> {
    let (scheme, key) = value.trim().split_once(' ')?;
    let key = key.trim();

    if SCHEMES.iter().any(|s| s.eq_ignore_ascii_case(scheme)) && !key.is_empty() {
        Some(key)
    } else {
        None
    }
}

#[async_trait]
impl FromRequestParts<AppState> for Caller {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let key = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(parse_authorization);

        let Some(key) = key else {
            trace!("Request carries no token");
            return Ok(Caller { account: None });
        };

        let account = auth_token::account_for_key(&state.db, key).await?;
        match &account {
            Some(account) => debug!(account_id = account.id, "Authenticated request"),
            None => debug!("Token did not match any account"),
        }

        Ok(Caller { account })
    }
}
