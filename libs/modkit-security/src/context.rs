use secrecy::SecretString;
use uuid::Uuid;

use crate::constants::{
    DEFAULT_TENANT_ID, SUBJECT_TYPE_SYSTEM, SUBJECT_TYPE_USER, SYSTEM_SUBJECT_ID,
};

/// `SecurityContext` identifies the actor on whose behalf an operation runs.
///
/// Stores and other collaborators receive it explicitly with every call and
/// decide what the actor is allowed to do.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SecurityContext {
    /// Subject ID: the authenticated user or the system actor.
    subject_id: Uuid,
    /// Subject type classification (`"user"`, `"system"`).
    subject_type: Option<String>,
    /// Subject's home tenant.
    subject_tenant_id: Uuid,
    /// Token capability restrictions. `["*"]` means first-party / unrestricted.
    #[serde(default)]
    token_scopes: Vec<String>,
    /// Token the subject authenticated with. Never serialized/persisted.
    /// Wrapped in `SecretString` so `Debug` redacts the value automatically.
    #[serde(skip)]
    bearer_token: Option<SecretString>,
}

impl SecurityContext {
    /// Create a new `SecurityContext` builder
    #[must_use]
    pub fn builder() -> SecurityContextBuilder {
        SecurityContextBuilder::default()
    }

    /// Create an anonymous `SecurityContext` with no subject or permissions
    #[must_use]
    pub fn anonymous() -> Self {
        SecurityContextBuilder::default().build()
    }

    /// The system actor, allowed to perform privileged writes.
    #[must_use]
    pub fn system() -> Self {
        SecurityContextBuilder::default()
            .subject_id(SYSTEM_SUBJECT_ID)
            .subject_type(SUBJECT_TYPE_SYSTEM)
            .subject_tenant_id(DEFAULT_TENANT_ID)
            .token_scopes(vec!["*".to_owned()])
            .build()
    }

    /// Context of a user account in the default tenant.
    #[must_use]
    pub fn for_user(user_id: Uuid) -> Self {
        SecurityContextBuilder::default()
            .subject_id(user_id)
            .subject_type(SUBJECT_TYPE_USER)
            .subject_tenant_id(DEFAULT_TENANT_ID)
            .build()
    }

    /// Get the subject ID (user or system) associated with the security context
    #[must_use]
    pub fn subject_id(&self) -> Uuid {
        self.subject_id
    }

    /// Get the subject type classification (e.g., "user", "system").
    #[must_use]
    pub fn subject_type(&self) -> Option<&str> {
        self.subject_type.as_deref()
    }

    /// Get the subject's home tenant ID.
    #[must_use]
    pub fn subject_tenant_id(&self) -> Uuid {
        self.subject_tenant_id
    }

    /// Get the token scopes. `["*"]` means first-party / unrestricted.
    #[must_use]
    pub fn token_scopes(&self) -> &[String] {
        &self.token_scopes
    }

    /// Get the token the subject authenticated with.
    #[must_use]
    pub fn bearer_token(&self) -> Option<&SecretString> {
        self.bearer_token.as_ref()
    }

    /// Whether this is the system actor.
    #[must_use]
    pub fn is_system(&self) -> bool {
        self.subject_id == SYSTEM_SUBJECT_ID
            && self.subject_type.as_deref() == Some(SUBJECT_TYPE_SYSTEM)
    }

    /// Whether no subject is attached.
    #[must_use]
    pub fn is_anonymous(&self) -> bool {
        self.subject_id.is_nil()
    }
}

#[derive(Default)]
pub struct SecurityContextBuilder {
    subject_id: Option<Uuid>,
    subject_type: Option<String>,
    subject_tenant_id: Option<Uuid>,
    token_scopes: Vec<String>,
    bearer_token: Option<SecretString>,
}

impl SecurityContextBuilder {
    #[must_use]
    pub fn subject_id(mut self, subject_id: Uuid) -> Self {
        self.subject_id = Some(subject_id);
        self
    }

    #[must_use]
    pub fn subject_type(mut self, subject_type: &str) -> Self {
        self.subject_type = Some(subject_type.to_owned());
        self
    }

    #[must_use]
    pub fn subject_tenant_id(mut self, subject_tenant_id: Uuid) -> Self {
        self.subject_tenant_id = Some(subject_tenant_id);
        self
    }

    #[must_use]
    pub fn token_scopes(mut self, scopes: Vec<String>) -> Self {
        self.token_scopes = scopes;
        self
    }

    #[must_use]
    pub fn bearer_token(mut self, token: impl Into<SecretString>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    #[must_use]
    pub fn build(self) -> SecurityContext {
        SecurityContext {
            subject_id: self.subject_id.unwrap_or_default(),
            subject_type: self.subject_type,
            subject_tenant_id: self.subject_tenant_id.unwrap_or_default(),
            token_scopes: self.token_scopes,
            bearer_token: self.bearer_token,
        }
    }
}
