//! Client implementation for the uLogin auth plugin.
//!
//! Implements `AuthDriver` using the domain service.

use async_trait::async_trait;
use auth_driver_sdk::{AuthDriver, AuthDriverError, AuthRequest, UserAccount};
use modkit_security::ActorSession;
use tracing::debug;

use super::service::Service;

/// Registry key of the driver.
pub const DRIVER_NAME: &str = "ulogin";

#[async_trait]
impl AuthDriver for Service {
    fn name(&self) -> &str {
        DRIVER_NAME
    }

    fn description(&self) -> &str {
        "uLogin"
    }

    async fn sign_up(
        &self,
        session: &mut ActorSession,
        request: &AuthRequest,
    ) -> Result<UserAccount, AuthDriverError> {
        Ok(self.authenticate(session, request).await?)
    }

    // Sign-in and sign-up are the same exchange for uLogin.
    async fn sign_in(
        &self,
        session: &mut ActorSession,
        request: &AuthRequest,
    ) -> Result<UserAccount, AuthDriverError> {
        self.sign_up(session, request).await
    }

    async fn sign_out(
        &self,
        _session: &mut ActorSession,
        account: &UserAccount,
    ) -> Result<(), AuthDriverError> {
        debug!(account_id = %account.id, "uLogin keeps no sign-out state");
        Ok(())
    }
}
