//! Well-known identifiers.

use uuid::Uuid;

/// Subject id of the system actor.
///
/// Only privileged writes (such as account creation during self-registration)
/// run under this identity.
pub const SYSTEM_SUBJECT_ID: Uuid = Uuid::from_u128(0x0000_0000_0000_4000_8000_0000_0000_0001);

/// Tenant used when no multi-tenancy is configured.
pub const DEFAULT_TENANT_ID: Uuid = Uuid::from_u128(0x0000_0000_df51_5b42_9538_d2b5_6b7e_e953);

/// Subject type of the system actor.
pub const SUBJECT_TYPE_SYSTEM: &str = "system";

/// Subject type of a human user account.
pub const SUBJECT_TYPE_USER: &str = "user";
