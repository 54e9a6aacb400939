pub mod achievement;
pub mod dates;
pub mod resume;
pub mod user;

/// Serde helper that distinguishes an absent field from an explicit `null`.
///
/// Use with `#[serde(default, deserialize_with = "crate::models::nullable")]`
/// on an `Option<Option<T>>` field: absent → `None`, `null` → `Some(None)`.
pub fn nullable<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: serde::Deserialize<'de>,
    D: serde::Deserializer<'de>,
{
    use serde::Deserialize;
    Option::<T>::deserialize(deserializer).map(Some)
}
