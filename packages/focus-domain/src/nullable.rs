//! Patch fields that can be cleared. An absent key reads as `None` (leave unchanged) and an
//! explicit `null` as `Some(None)` (clear).

use serde::{Deserialize, Deserializer};

pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
	D: Deserializer<'de>,
	T: Deserialize<'de>,
{
	Option::<T>::deserialize(deserializer).map(Some)
}
