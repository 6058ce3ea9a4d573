//! Three-state fields for partial updates.
//!
//! A JSON partial update has to distinguish a key that is absent from the
//! payload (leave the stored value unchanged) from a key that is present
//! with an explicit `null` (clear a nullable field). A plain `Option<T>`
//! collapses the two, so patch structs use [`Patch<T>`] together with
//! `#[serde(default)]`: serde only invokes the deserializer when the key is
//! present, and `Missing` is the default.

use serde::{Deserialize, Deserializer};

/// The state of one field in an update payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Patch<T> {
  /// Key absent from the payload — keep the stored value.
  Missing,
  /// Key present with an explicit `null`.
  Null,
  /// Key present with a value.
  Value(T),
}

impl<T> Default for Patch<T> {
  fn default() -> Self { Patch::Missing }
}

impl<T> Patch<T> {
  pub fn is_missing(&self) -> bool { matches!(self, Patch::Missing) }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Patch<T> {
  fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
  where
    D: Deserializer<'de>,
  {
    Option::<T>::deserialize(deserializer)
      .map(|opt| opt.map_or(Patch::Null, Patch::Value))
  }
}
