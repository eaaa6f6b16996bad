use std::fmt::{self, Debug};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::util;

/// Identifier assigned by the service to a stored credential.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CredentialId(pub(crate) i64);

impl CredentialId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }
}

impl fmt::Display for CredentialId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Extra attribute table.
/// e.g. `[ "role" => "admin", "port" => "22" ]`
///
/// Iteration order is insertion order; it is the order the fields are rendered in.
pub type Attributes = IndexMap<String, String>;

/// A credential record as stored by the service.
///
/// `Credential::default()` is the empty record a new form starts from.
#[derive(Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Credential {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<CredentialId>,
    #[serde(default, deserialize_with = "util::null_as_default")]
    pub alias: String,
    #[serde(default, deserialize_with = "util::null_as_default")]
    pub username: String,
    #[serde(default, deserialize_with = "util::null_as_default")]
    pub password: String,
    #[serde(default, deserialize_with = "util::null_as_default")]
    pub attributes: Attributes,
}

impl Credential {
    pub fn new<S1, S2, S3>(alias: S1, username: S2, password: S3) -> Self
    where
        S1: Into<String>,
        S2: Into<String>,
        S3: Into<String>,
    {
        Self {
            id: None,
            alias: alias.into(),
            username: username.into(),
            password: password.into(),
            attributes: Attributes::new(),
        }
    }

    pub fn with_id(mut self, id: CredentialId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn field_mut(&mut self, field: Field) -> &mut String {
        use Field::*;
        match field {
            Alias => &mut self.alias,
            Username => &mut self.username,
            Password => &mut self.password,
        }
    }

    pub fn from_json(s: &str) -> serde_json::Result<Self> {
        serde_json::from_str(s)
    }
}

impl Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let password = if self.password.is_empty() { "" } else { "***" };
        f.debug_struct("Credential")
            .field("id", &self.id)
            .field("alias", &self.alias)
            .field("username", &self.username)
            .field("password", &password)
            .field("attributes", &self.attributes)
            .finish()
    }
}

/// Top-level scalar fields of a credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Field {
    Alias,
    Username,
    Password,
}

/// Partial update of the scalar fields. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldPatch {
    pub alias: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl FieldPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: Field, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        *self.slot_mut(field) = Some(value.into());
    }

    pub fn is_empty(&self) -> bool {
        self.alias.is_none() && self.username.is_none() && self.password.is_none()
    }

    /// Overwrites the given fields of `cred`. Never touches `id` or `attributes`.
    pub fn apply_to(self, cred: &mut Credential) {
        let Self {
            alias,
            username,
            password,
        } = self;
        for (field, value) in [
            (Field::Alias, alias),
            (Field::Username, username),
            (Field::Password, password),
        ] {
            if let Some(value) = value {
                *cred.field_mut(field) = value;
            }
        }
    }

    fn slot_mut(&mut self, field: Field) -> &mut Option<String> {
        use Field::*;
        match field {
            Alias => &mut self.alias,
            Username => &mut self.username,
            Password => &mut self.password,
        }
    }
}

impl<S: Into<String>> FromIterator<(Field, S)> for FieldPatch {
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = (Field, S)>,
    {
        let mut patch = Self::new();
        for (field, value) in iter {
            patch.set(field, value);
        }
        patch
    }
}
