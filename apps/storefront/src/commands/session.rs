//! # Session Commands
//!
//! Sign in and sign out. Checkout and the admin panel both require a
//! signed-in customer.

use tracing::{debug, info};

use delicia_core::{Action, User};

use crate::error::ApiError;
use crate::services::LoginProvider;
use crate::state::StoreState;

/// Signs in through `provider`. Already signed in returns the current user.
pub async fn login(store: &StoreState, provider: &dyn LoginProvider) -> Result<User, ApiError> {
    debug!("login command");

    if let Some(user) = current_user(store) {
        debug!(user_id = %user.id, "Already signed in");
        return Ok(user);
    }

    let user = provider.sign_in().await?;
    store.dispatch(Action::SetUser(Some(user.clone())))?;

    info!(user_id = %user.id, admin = user.is_admin(), "User signed in");
    Ok(user)
}

/// Signs out. The cart is kept.
pub fn logout(store: &StoreState) -> Result<(), ApiError> {
    debug!("logout command");
    store.dispatch(Action::SetUser(None))?;
    info!("User signed out");
    Ok(())
}

pub fn current_user(store: &StoreState) -> Option<User> {
    store.with_state(|s| s.user.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::SimulatedGoogleLogin;

    #[tokio::test]
    async fn test_login_logout() {
        let store = StoreState::default();
        let provider = SimulatedGoogleLogin::default();

        let user = login(&store, &provider).await.unwrap();
        assert_eq!(current_user(&store), Some(user.clone()));

        // second login is a no-op
        assert_eq!(login(&store, &provider).await.unwrap(), user);

        logout(&store).unwrap();
        assert!(current_user(&store).is_none());
    }
}
