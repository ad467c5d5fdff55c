#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Security primitives shared by auth drivers.
//!
//! - [`SecurityContext`] identifies the actor performing an operation.
//! - [`ActorSession`] holds the current actor of one request and hands out
//!   [`ActorGuard`]s that put the previous actor back when dropped.

pub mod constants;
pub mod context;
pub mod session;

pub use context::SecurityContext;
pub use session::{ActorGuard, ActorSession};
