#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! uLogin Auth Driver Plugin
//!
//! Signs users in through the uLogin single-sign-on service. The client-side
//! widget puts a uLogin token into the submitted form; the driver exchanges
//! it for the user's profile and reconciles that profile with a local account.
//!
//! ## Flow
//!
//! 1. Take the token from the `token` field (or the first `*token` field)
//! 2. `GET <provider_base_url>/token.php?token=..&host=..`
//! 3. Find the account by the verified email, creating it as the system
//!    actor when self-registration is enabled
//! 4. Fill empty profile fields, stash the raw payload under option `ulogin`
//! 5. Save and return the account
//!
//! ## Configuration
//!
//! ```yaml
//! provider_base_url: "http://ulogin.ru"
//! self_registration: false
//! language: en
//! request_timeout_secs: null
//! ```

pub mod config;
pub mod domain;
pub mod infra;
pub mod module;
pub mod ui;

pub use config::ULoginPluginConfig;
pub use module::ULoginPlugin;
