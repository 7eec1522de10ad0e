mod channel;
pub mod gemini;
mod model;
pub mod villages;

use crossbeam_channel::{Receiver, Sender};
use url::Url;

pub use channel::{
    init_disabled_channel, init_discovery_channel, init_fixture_channel, DiscoveryBatch,
    DiscoveryChannel, DiscoveryRequest,
};
pub use model::{Business, Village};

/// Configuration for spawning a discovery worker.
pub struct DiscoveryConfig {
    pub api_key: String,
    pub endpoint: Url,
}

/// Interface for business-discovery backends. A backend owns its worker
/// thread; the engine only ever talks to the two channel ends.
pub trait BusinessDiscovery: Send + 'static {
    fn spawn(config: DiscoveryConfig) -> (Sender<DiscoveryRequest>, Receiver<DiscoveryBatch>);
}
