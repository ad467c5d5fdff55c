//! Auth Driver Module
//!
//! Loads auth driver plugins, keeps their registrations (drivers, translations,
//! templates, assets) and routes auth flows to a driver by name.
//!
//! Provides the `AuthDriverClient` implementation consumed by the host.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod config;
pub mod domain;
pub mod module;

pub use module::AuthDriverModule;
