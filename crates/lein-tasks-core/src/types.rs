//! Core types shared by task definitions

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer};

/// Environment variables passed through to an external command, in a stable order
pub type Environment = BTreeMap<String, String>;

/// A caller-supplied option that distinguishes "not mentioned" from
/// "explicitly cleared".
///
/// Fields such as `ensure_task_name` or `directory` have a non-empty default.
/// Leaving the option out keeps that default, while clearing it (`false` or
/// `null` in a build file) removes the value altogether.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Override<T> {
    /// Not supplied; the definition's default applies
    #[default]
    Inherit,
    /// Explicitly cleared
    Clear,
    /// Explicitly set
    Set(T),
}

impl<T> Override<T> {
    /// Overlay this option on a default value
    pub fn resolve(self, default: Option<T>) -> Option<T> {
        match self {
            Self::Inherit => default,
            Self::Clear => None,
            Self::Set(value) => Some(value),
        }
    }
}

impl<T> From<Option<T>> for Override<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Self::Set(value),
            None => Self::Clear,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawOverride<T> {
    Flag(bool),
    Value(T),
}

impl<'de, T> Deserialize<'de> for Override<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<RawOverride<T>>::deserialize(deserializer)? {
            None | Some(RawOverride::Flag(false)) => Ok(Self::Clear),
            Some(RawOverride::Flag(true)) => Err(serde::de::Error::custom(
                "`true` is not a value; give a value or `false` to clear it",
            )),
            Some(RawOverride::Value(value)) => Ok(Self::Set(value)),
        }
    }
}
