//! Update allow-lists
//!
//! Each updatable entity declares the fields a client may change as an enum
//! implementing [`PatchField`]. [`check_keys`] rejects a payload carrying any
//! other key before it is deserialized into a typed update request.

use crate::errors::PatchError;
use serde_json::Value;

/// A field that may appear in an update payload
pub trait PatchField: Copy + Sized + 'static {
    /// Every field the entity allows to change
    const ALLOWED: &'static [Self];

    /// Wire name of the field
    fn key(self) -> &'static str;

    /// Look up a field by its wire name
    fn from_key(key: &str) -> Option<Self> {
        Self::ALLOWED.iter().copied().find(|field| field.key() == key)
    }
}

/// Updatable user profile fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserField {
    Name,
    Email,
    Password,
    Age,
}

impl PatchField for UserField {
    const ALLOWED: &'static [Self] = &[Self::Name, Self::Email, Self::Password, Self::Age];

    fn key(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Password => "password",
            Self::Age => "age",
        }
    }
}

/// Updatable task fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskField {
    Description,
    Completed,
}

impl PatchField for TaskField {
    const ALLOWED: &'static [Self] = &[Self::Description, Self::Completed];

    fn key(self) -> &'static str {
        match self {
            Self::Description => "description",
            Self::Completed => "completed",
        }
    }
}

/// Check that every key of `body` is in the allow-list of `F`
///
/// Returns the fields present, in payload order. An empty object is
/// accepted and yields no fields.
pub fn check_keys<F: PatchField>(body: &Value) -> Result<Vec<F>, PatchError> {
    let object = body.as_object().ok_or(PatchError::NotAnObject)?;

    object
        .keys()
        .map(|key| F::from_key(key).ok_or_else(|| PatchError::UnknownField(key.clone())))
        .collect()
}
