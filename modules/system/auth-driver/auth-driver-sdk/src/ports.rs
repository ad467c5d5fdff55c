//! Collaborators an auth driver depends on.
//!
//! Hosts provide implementations; drivers receive them as `Arc<dyn ...>`.
//! Every write takes the acting [`SecurityContext`] explicitly.

use async_trait::async_trait;
use modkit_security::SecurityContext;

use crate::error::StoreError;
use crate::models::{ResourceHandle, UserAccount};

/// Durable user accounts keyed by unique email.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Look an account up by email.
    ///
    /// # Errors
    ///
    /// Returns an error only on store failure; a missing account is `Ok(None)`.
    async fn find_by_email(
        &self,
        ctx: &SecurityContext,
        email: &str,
    ) -> Result<Option<UserAccount>, StoreError>;

    /// Create an account for `email`.
    ///
    /// # Errors
    ///
    /// - `Forbidden` if `ctx` may not create accounts
    /// - `Conflict` if the email is taken
    async fn create_account(
        &self,
        ctx: &SecurityContext,
        email: &str,
    ) -> Result<UserAccount, StoreError>;

    /// Persist all fields of `account`.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the account does not exist
    /// - `Forbidden` if `ctx` may not modify it
    async fn save(&self, ctx: &SecurityContext, account: &UserAccount) -> Result<(), StoreError>;

    /// Remove `account` together with the resources the store attached to
    /// it on creation. Used to undo a creation whose sign-in failed.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the account does not exist
    /// - `Forbidden` if `ctx` may not delete accounts
    async fn delete_account(
        &self,
        ctx: &SecurityContext,
        account: &UserAccount,
    ) -> Result<(), StoreError>;
}

/// File resources such as profile pictures.
#[async_trait]
pub trait ResourceStore: Send + Sync {
    /// Fetch `url` and store its content.
    ///
    /// # Errors
    ///
    /// Returns an error if the content cannot be fetched or stored.
    async fn store_from_url(
        &self,
        ctx: &SecurityContext,
        url: &str,
    ) -> Result<ResourceHandle, StoreError>;

    /// Delete a stored resource.
    ///
    /// # Errors
    ///
    /// Returns an error if the resource cannot be removed.
    async fn delete(&self, ctx: &SecurityContext, handle: &ResourceHandle)
    -> Result<(), StoreError>;
}

/// Message localization.
pub trait Translator: Send + Sync {
    /// Translate `key`; unknown keys come back unchanged.
    fn translate(&self, key: &str) -> String;
}

/// Global account registration settings.
pub trait RegistrationPolicy: Send + Sync {
    fn is_self_registration_enabled(&self) -> bool;
}
