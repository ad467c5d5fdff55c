//! Merging a provider profile into an account.
//!
//! Only fields the account does not have yet are filled; the picture is
//! handled by the service because it touches the resource store.

use auth_driver_sdk::UserAccount;
use serde_json::Value;
use tracing::debug;

use super::profile::ProviderProfile;

/// Options key holding the last raw provider payload.
pub const OPTIONS_KEY: &str = "ulogin";

/// Apply `profile` to `account`.
///
/// `is_new` marks an account created during this sign-in; only such accounts
/// get their nickname derived from the name.
pub fn apply_profile(account: &mut UserAccount, profile: &ProviderProfile, is_new: bool) {
    if account.first_name.is_empty()
        && let Some(first_name) = profile.first_name()
    {
        first_name.clone_into(&mut account.first_name);
    }
    if account.last_name.is_empty()
        && let Some(last_name) = profile.last_name()
    {
        last_name.clone_into(&mut account.last_name);
    }

    if is_new {
        account.nickname = account.first_last_name();
    }

    if !account.gender.is_set()
        && let Some(gender) = profile.gender()
    {
        account.gender = gender;
    }

    match profile.birth_date() {
        Some(Ok(date)) => account.birth_date = Some(date),
        Some(Err(e)) => debug!(error = %e, "ignoring unparsable birth date from uLogin"),
        None => {}
    }

    if let Some(url) = profile.profile_url() {
        account.urls.push(url.to_owned());
    }

    account
        .options
        .insert(OPTIONS_KEY.to_owned(), Value::Object(profile.raw().clone()));
}
