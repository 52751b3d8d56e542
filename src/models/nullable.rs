use serde::{Deserialize, Deserializer};

/// A patch field for a nullable column.
///
/// Distinguishes a key missing from the payload (`Unset`) from an explicit
/// JSON `null` (`Null`). Fields of this type need `#[serde(default)]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Nullable<T> {
    #[default]
    Unset,
    Null,
    Value(T),
}

impl<T> Nullable<T> {
    /// `None` when unset, otherwise the new column value.
    pub fn into_change(self) -> Option<Option<T>> {
        match self {
            Nullable::Unset => None,
            Nullable::Null => Some(None),
            Nullable::Value(v) => Some(Some(v)),
        }
    }

    pub fn as_value(&self) -> Option<&T> {
        match self {
            Nullable::Value(v) => Some(v),
            _ => None,
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Nullable<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(v) => Nullable::Value(v),
            None => Nullable::Null,
        })
    }
}

/// Deserializes a present key into `Some`, rejecting `null`.
///
/// Paired with `#[serde(default)]` this gives a field that may be omitted
/// but never cleared.
pub(crate) fn non_null<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}
