//! Minimal prelude for SDK consumers.

pub use crate::config;
pub use crate::data::villages::{village_by_id, VILLAGES};
pub use crate::data::{Business, DiscoveryChannel, Village};
pub use crate::sdk::HeritageMapBuilder;
