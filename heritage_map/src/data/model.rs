// Engine-agnostic village and business records.
// Gemini-specific types stay in gemini.rs; conversion happens there.

use bevy::math::Vec3;
use serde::{Deserialize, Serialize};

/// A single village's static record. The whole dataset is a compile-time
/// table, so every field borrows from the binary.
#[derive(Clone, Copy, Debug)]
pub struct Village {
    pub id: &'static str,
    pub name: &'static str,
    pub region: &'static str,
    pub coordinates: Vec3,
    pub history: &'static str,
    pub leadership: &'static [&'static str],
}

/// One discovered local entity. Batches are replaced wholesale on every
/// selection change; slot position within the batch is the only identity.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Business {
    pub name: String,
    pub category: String,
    pub detail: String,
    #[serde(default, rename = "sourceUrl", skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
}
