//! Models shared by auth drivers and their hosts.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

/// Form fields as submitted by the client, in submission order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmittedFields(Vec<(String, String)>);

impl SubmittedFields {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field. Duplicate names are kept.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.push((name.into(), value.into()));
    }

    /// Value of the first field named exactly `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for SubmittedFields {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// One inbound sign-in / sign-up submission.
#[derive(Debug, Clone)]
pub struct AuthRequest {
    /// Submitted form fields.
    pub fields: SubmittedFields,
    /// Value of the request's `Host` header.
    pub host: String,
}

impl AuthRequest {
    #[must_use]
    pub fn new(fields: SubmittedFields, host: impl Into<String>) -> Self {
        Self {
            fields,
            host: host.into(),
        }
    }
}

/// Gender stored on an account.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    #[default]
    Unset,
}

impl Gender {
    /// Whether one of the two valid values is set.
    #[must_use]
    pub fn is_set(self) -> bool {
        !matches!(self, Self::Unset)
    }
}

/// Handle of a file resource owned by the resource store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceHandle {
    pub id: Uuid,
    /// Where the content came from (URL or internal marker).
    pub source: String,
}

/// A user account as seen by auth drivers.
///
/// The email is the identity key and cannot change after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserAccount {
    pub id: Uuid,
    email: String,
    pub first_name: String,
    pub last_name: String,
    pub nickname: String,
    pub gender: Gender,
    pub birth_date: Option<Date>,
    pub picture: Option<ResourceHandle>,
    /// External profile URLs, in the order they were added.
    pub urls: Vec<String>,
    /// Open-ended per-account options; drivers stash provider data here.
    pub options: Map<String, Value>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl UserAccount {
    /// A fresh account with empty profile fields.
    #[must_use]
    pub fn new(id: Uuid, email: impl Into<String>) -> Self {
        let now = OffsetDateTime::now_utc();
        Self {
            id,
            email: email.into(),
            first_name: String::new(),
            last_name: String::new(),
            nickname: String::new(),
            gender: Gender::Unset,
            birth_date: None,
            picture: None,
            urls: Vec::new(),
            options: Map::new(),
            created_at: now,
            updated_at: now,
        }
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Display name made of first and last name.
    #[must_use]
    pub fn first_last_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_owned()
    }
}

/// Placement of a widget inside a form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormArea {
    Body,
    Hidden,
}

/// What a widget renders as.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum WidgetKind {
    /// Hidden input filled by client-side code.
    HiddenInput,
    /// Markup rendered from a template.
    Template { template: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetSpec {
    pub uid: String,
    pub kind: WidgetKind,
    pub area: FormArea,
    pub css: Vec<String>,
}

/// Form descriptor handed to the UI layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormSpec {
    pub uid: String,
    pub widgets: Vec<WidgetSpec>,
    /// Whether the UI layer should render its submit button.
    pub submit_button: bool,
}

impl FormSpec {
    #[must_use]
    pub fn widget(&self, uid: &str) -> Option<&WidgetSpec> {
        self.widgets.iter().find(|w| w.uid == uid)
    }
}

/// Parameters of a form request.
#[derive(Debug, Clone)]
pub struct FormRequest {
    /// Form uid; widget uids are derived from it.
    pub uid: String,
}

impl FormRequest {
    #[must_use]
    pub fn new(uid: impl Into<String>) -> Self {
        Self { uid: uid.into() }
    }
}

/// Static asset registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum AssetSpec {
    /// Named JS module resolved from a package location.
    JsModule { name: String, location: String },
    /// Glob of JS files to run through translation.
    TranslatedJs { glob: String },
    /// Glob of LESS files to run through translation.
    TranslatedLess { glob: String },
}
