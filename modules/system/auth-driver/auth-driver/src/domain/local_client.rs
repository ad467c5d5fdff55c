//! Local (in-process) client for the auth driver host.

use std::sync::Arc;

use async_trait::async_trait;
use auth_driver_sdk::{
    AuthDriverClient, AuthDriverError, AuthRequest, FormRequest, FormSpec, UserAccount,
};
use modkit_security::ActorSession;

use super::{DomainError, DriverRegistry};

/// Local client routing calls to registered drivers.
pub struct AuthDriverLocalClient {
    registry: Arc<DriverRegistry>,
}

impl AuthDriverLocalClient {
    #[must_use]
    pub fn new(registry: Arc<DriverRegistry>) -> Self {
        Self { registry }
    }
}

fn log_and_convert(op: &str, driver: &str, e: DomainError) -> AuthDriverError {
    match &e {
        DomainError::Driver(
            AuthDriverError::Input(_)
            | AuthDriverError::Authentication(_)
            | AuthDriverError::NotImplemented(_),
        ) => {
            tracing::info!(operation = op, driver, error = %e, "auth driver call rejected");
        }
        _ => {
            tracing::error!(operation = op, driver, error = ?e, "auth driver call failed");
        }
    }
    e.into()
}

#[async_trait]
impl AuthDriverClient for AuthDriverLocalClient {
    async fn authenticate(
        &self,
        driver: &str,
        session: &mut ActorSession,
        request: &AuthRequest,
    ) -> Result<UserAccount, AuthDriverError> {
        let auth = self
            .registry
            .auth_driver(driver)
            .map_err(|e| log_and_convert("authenticate", driver, e))?;
        auth.sign_in(session, request)
            .await
            .map_err(|e| log_and_convert("authenticate", driver, e.into()))
    }

    async fn sign_out(
        &self,
        driver: &str,
        session: &mut ActorSession,
        account: &UserAccount,
    ) -> Result<(), AuthDriverError> {
        let auth = self
            .registry
            .auth_driver(driver)
            .map_err(|e| log_and_convert("sign_out", driver, e))?;
        auth.sign_out(session, account)
            .await
            .map_err(|e| log_and_convert("sign_out", driver, e.into()))
    }

    fn sign_in_form(
        &self,
        driver: &str,
        request: &FormRequest,
    ) -> Result<FormSpec, AuthDriverError> {
        self.registry
            .ui_driver(driver)
            .and_then(|ui| ui.sign_in_form(request).map_err(DomainError::from))
            .map_err(|e| log_and_convert("sign_in_form", driver, e))
    }

    fn sign_up_form(
        &self,
        driver: &str,
        request: &FormRequest,
    ) -> Result<FormSpec, AuthDriverError> {
        self.registry
            .ui_driver(driver)
            .and_then(|ui| ui.sign_up_form(request).map_err(DomainError::from))
            .map_err(|e| log_and_convert("sign_up_form", driver, e))
    }

    fn restore_account_form(
        &self,
        driver: &str,
        request: &FormRequest,
    ) -> Result<FormSpec, AuthDriverError> {
        self.registry
            .ui_driver(driver)
            .and_then(|ui| ui.restore_account_form(request).map_err(DomainError::from))
            .map_err(|e| log_and_convert("restore_account_form", driver, e))
    }
}
