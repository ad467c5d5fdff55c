//! Outbound port to the identity provider.

use async_trait::async_trait;

use super::error::DomainError;
use super::profile::ProviderProfile;

/// Exchanges a client token for the provider's profile of the user.
#[async_trait]
pub trait ProfileProvider: Send + Sync {
    /// # Errors
    ///
    /// - `ProviderStatus` on a non-200 response
    /// - `MalformedResponse` if the body is not a JSON object
    /// - `ProviderUnreachable` on transport failure
    async fn fetch_profile(&self, token: &str, host: &str) -> Result<ProviderProfile, DomainError>;
}
