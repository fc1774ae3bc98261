//! # Sign-in Provider
//!
//! The storefront offers a single "Continue with Google" button. The
//! simulated provider signs everyone in as the demo customer, who is also
//! the admin account.

use std::time::Duration;

use async_trait::async_trait;
use tracing::info;

use delicia_core::{User, ADMIN_USER_ID};

use crate::error::ApiError;

#[async_trait]
pub trait LoginProvider: Send + Sync {
    async fn sign_in(&self) -> Result<User, ApiError>;
}

/// Returns the demo customer after `delay`.
#[derive(Debug, Clone, Default)]
pub struct SimulatedGoogleLogin {
    delay: Duration,
}

impl SimulatedGoogleLogin {
    pub fn new(delay: Duration) -> Self {
        SimulatedGoogleLogin { delay }
    }

    pub fn demo_user() -> User {
        User {
            id: ADMIN_USER_ID.to_string(),
            name: "João Silva".to_string(),
            email: "joao@email.com".to_string(),
            phone: "(11) 99999-9999".to_string(),
        }
    }
}

#[async_trait]
impl LoginProvider for SimulatedGoogleLogin {
    async fn sign_in(&self) -> Result<User, ApiError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        let user = Self::demo_user();
        info!(user_id = %user.id, "Signed in with Google (simulated)");
        Ok(user)
    }
}
