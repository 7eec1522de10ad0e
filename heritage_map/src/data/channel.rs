use std::collections::HashMap;
use std::path::Path;
use std::thread;
use std::time::Duration;

use crossbeam_channel::{Receiver, Sender};

use crate::data::gemini::GeminiDiscovery;
use crate::data::model::Business;
use crate::data::{BusinessDiscovery, DiscoveryConfig};

/// A lookup issued for the village selected at request time. The id rides
/// along so the result can be checked against the selection current at
/// arrival time.
#[derive(Clone, Debug)]
pub struct DiscoveryRequest {
    pub village_id: &'static str,
    pub village_name: &'static str,
}

/// A batch of business records tagged with the village that requested it.
#[derive(Clone, Debug)]
pub struct DiscoveryBatch {
    pub village_id: &'static str,
    pub businesses: Vec<Business>,
}

/// Bevy resource holding both ends of the discovery worker's channels.
/// Selection changes push requests; the ECS drains tagged results each frame.
#[derive(bevy::prelude::Resource)]
pub struct DiscoveryChannel {
    pub requests: Sender<DiscoveryRequest>,
    pub results: Receiver<DiscoveryBatch>,
}

/// Create a discovery channel and spawn the Gemini worker on a dedicated
/// thread.
pub fn init_discovery_channel(config: DiscoveryConfig) -> DiscoveryChannel {
    let (requests, results) = GeminiDiscovery::spawn(config);
    DiscoveryChannel { requests, results }
}

/// Create a discovery channel that answers every request with an empty
/// batch, for runs without an API key. The engine still sees the normal
/// request → batch transition.
pub fn init_disabled_channel() -> DiscoveryChannel {
    let (req_tx, req_rx) = crossbeam_channel::bounded::<DiscoveryRequest>(8);
    let (res_tx, res_rx) = crossbeam_channel::bounded(8);

    thread::spawn(move || {
        while let Ok(request) = req_rx.recv() {
            let batch = DiscoveryBatch {
                village_id: request.village_id,
                businesses: Vec::new(),
            };
            if res_tx.send(batch).is_err() {
                return;
            }
        }
    });

    DiscoveryChannel {
        requests: req_tx,
        results: res_rx,
    }
}

const FIXTURE_LATENCY: Duration = Duration::from_millis(300);

/// Create a discovery channel that replays canned batches from a JSON
/// fixture file mapping village id → business array. Requests for villages
/// absent from the fixture get an empty batch. Batches are delayed slightly
/// to keep the asynchronous arrival path honest.
pub fn init_fixture_channel(path: &Path) -> DiscoveryChannel {
    let json = std::fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("failed to read fixture {}: {e}", path.display()));
    let canned: HashMap<String, Vec<Business>> = serde_json::from_str(&json)
        .unwrap_or_else(|e| panic!("failed to parse fixture {}: {e}", path.display()));

    let (req_tx, req_rx) = crossbeam_channel::bounded::<DiscoveryRequest>(8);
    let (res_tx, res_rx) = crossbeam_channel::bounded(8);

    thread::spawn(move || {
        while let Ok(request) = req_rx.recv() {
            thread::sleep(FIXTURE_LATENCY);
            let businesses = canned.get(request.village_id).cloned().unwrap_or_default();
            let batch = DiscoveryBatch {
                village_id: request.village_id,
                businesses,
            };
            if res_tx.send(batch).is_err() {
                return;
            }
        }
    });

    DiscoveryChannel {
        requests: req_tx,
        results: res_rx,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_channel_answers_with_empty_tagged_batch() {
        let channel = init_disabled_channel();
        channel
            .requests
            .send(DiscoveryRequest {
                village_id: "phokeng",
                village_name: "Phokeng",
            })
            .unwrap();

        let batch = channel
            .results
            .recv_timeout(Duration::from_secs(2))
            .expect("expected an empty batch");
        assert_eq!(batch.village_id, "phokeng");
        assert!(batch.businesses.is_empty());
    }

    #[test]
    fn fixture_channel_replays_canned_batches() {
        let dir = std::env::temp_dir().join("heritage_map_fixture_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("discoveries.json");
        std::fs::write(
            &path,
            r#"{"luka": [{"name": "Luka Mall", "category": "Retail", "detail": "Shopping center."}]}"#,
        )
        .unwrap();

        let channel = init_fixture_channel(&path);
        channel
            .requests
            .send(DiscoveryRequest {
                village_id: "luka",
                village_name: "Luka",
            })
            .unwrap();

        let batch = channel
            .results
            .recv_timeout(Duration::from_secs(2))
            .expect("expected the canned batch");
        assert_eq!(batch.village_id, "luka");
        assert_eq!(batch.businesses.len(), 1);
        assert_eq!(batch.businesses[0].name, "Luka Mall");
    }
}
