//! Public API trait for driver consumers.

use async_trait::async_trait;
use modkit_security::ActorSession;

use crate::error::AuthDriverError;
use crate::models::{AuthRequest, FormRequest, FormSpec, UserAccount};

/// Entry point the host uses to run auth flows by driver name.
///
/// ```ignore
/// let mut session = ActorSession::anonymous();
/// let account = client.authenticate("ulogin", &mut session, &request).await?;
/// ```
#[async_trait]
pub trait AuthDriverClient: Send + Sync {
    /// Sign in or sign up through the named driver.
    ///
    /// # Errors
    ///
    /// - `DriverNotFound` if no driver has that name
    /// - any error of [`AuthDriver::sign_up`](crate::AuthDriver::sign_up)
    async fn authenticate(
        &self,
        driver: &str,
        session: &mut ActorSession,
        request: &AuthRequest,
    ) -> Result<UserAccount, AuthDriverError>;

    /// # Errors
    ///
    /// `DriverNotFound` or the driver's own failure.
    async fn sign_out(
        &self,
        driver: &str,
        session: &mut ActorSession,
        account: &UserAccount,
    ) -> Result<(), AuthDriverError>;

    /// # Errors
    ///
    /// `DriverNotFound` or the driver's own failure.
    fn sign_in_form(&self, driver: &str, request: &FormRequest)
    -> Result<FormSpec, AuthDriverError>;

    /// # Errors
    ///
    /// `DriverNotFound` or the driver's own failure.
    fn sign_up_form(&self, driver: &str, request: &FormRequest)
    -> Result<FormSpec, AuthDriverError>;

    /// # Errors
    ///
    /// `DriverNotFound`, or `NotImplemented` for drivers without restoration.
    fn restore_account_form(
        &self,
        driver: &str,
        request: &FormRequest,
    ) -> Result<FormSpec, AuthDriverError>;
}
