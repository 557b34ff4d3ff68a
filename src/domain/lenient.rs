//! Field deserializers for loosely-typed backend JSON.
//!
//! Backend JSON is loosely typed: a list can arrive as `null` and a
//! count can arrive as `120.0`. These helpers are used with
//! `#[serde(deserialize_with = "...")]` next to `#[serde(default)]`, which
//! still covers missing keys.

use serde::{Deserialize, Deserializer};

/// `null` decodes as the type's default.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Non-negative count from an integer or a float; `null`, negative and
/// non-finite numbers decode as 0.
pub fn count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(opt_count(deserializer)?.unwrap_or(0))
}

/// Like [`count`], keeping `null` and unusable numbers as absent.
pub fn opt_count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<f64>::deserialize(deserializer)?;
    Ok(value.and_then(to_count))
}

fn to_count(v: f64) -> Option<u64> {
    (v.is_finite() && v >= 0.0).then(|| v.round() as u64)
}
