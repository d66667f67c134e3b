//! Distinguishes an absent JSON field from an explicit `null`.
//!
//! Use on `Option<Option<T>>` fields of partial-update payloads together with
//! `#[serde(default)]`:
//!
//! - field missing: `None` (keep the stored value)
//! - field is `null`: `Some(None)` (clear the stored value)
//! - field has a value: `Some(Some(v))`
//!
//! ```ignore
//! #[derive(Deserialize)]
//! struct UpdateTask {
//!     #[serde(default, with = "axum_helpers::nullable")]
//!     user_id: Option<Option<Uuid>>,
//! }
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

pub fn serialize<T, S>(value: &Option<Option<T>>, serializer: S) -> Result<S::Ok, S::Error>
where
    T: Serialize,
    S: Serializer,
{
    match value {
        Some(inner) => inner.serialize(serializer),
        None => serializer.serialize_none(),
    }
}
