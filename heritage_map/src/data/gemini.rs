//! Gemini-backed business discovery: dedicated thread + reqwest → batches.

use std::thread;
use std::time::Duration;

use crossbeam_channel::{Receiver, Sender};
use serde_json::{json, Value};

use crate::data::model::Business;
use crate::data::{BusinessDiscovery, DiscoveryBatch, DiscoveryConfig, DiscoveryRequest};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(45);

/// Discovery backed by a Gemini `generateContent` endpoint with
/// Google-Search grounding. Every failure collapses to an empty batch;
/// the engine never sees an error, only batches.
pub struct GeminiDiscovery;

impl BusinessDiscovery for GeminiDiscovery {
    fn spawn(config: DiscoveryConfig) -> (Sender<DiscoveryRequest>, Receiver<DiscoveryBatch>) {
        let (req_tx, req_rx) = crossbeam_channel::bounded(8);
        let (res_tx, res_rx) = crossbeam_channel::bounded(8);
        thread::spawn(move || {
            let rt = match tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
            {
                Ok(rt) => rt,
                Err(err) => {
                    eprintln!("lefatshe: failed to build tokio runtime: {err}");
                    return;
                }
            };
            rt.block_on(worker_loop(config, req_rx, res_tx));
        });
        (req_tx, res_rx)
    }
}

async fn worker_loop(
    config: DiscoveryConfig,
    requests: Receiver<DiscoveryRequest>,
    results: Sender<DiscoveryBatch>,
) {
    let client = reqwest::Client::new();

    // One lookup at a time; a selection change on the engine side simply
    // discards whatever stale batch this loop eventually emits.
    while let Ok(request) = requests.recv() {
        let businesses = lookup(&client, &config, request.village_name).await;
        eprintln!(
            "lefatshe: discovery for {} returned {} records",
            request.village_name,
            businesses.len()
        );
        let batch = DiscoveryBatch {
            village_id: request.village_id,
            businesses,
        };
        if results.send(batch).is_err() {
            return;
        }
    }
}

/// Runs a single lookup. Transport errors, HTTP errors, timeouts, and
/// malformed payloads are all reported as diagnostics and swallowed into
/// an empty batch.
async fn lookup(
    client: &reqwest::Client,
    config: &DiscoveryConfig,
    village_name: &str,
) -> Vec<Business> {
    let fut = generate(client, config, village_name);
    match tokio::time::timeout(REQUEST_TIMEOUT, fut).await {
        Ok(Ok(businesses)) => businesses,
        Ok(Err(err)) => {
            eprintln!("lefatshe: discovery failed for {village_name}: {err}");
            Vec::new()
        }
        Err(_) => {
            eprintln!("lefatshe: discovery timed out for {village_name}");
            Vec::new()
        }
    }
}

async fn generate(
    client: &reqwest::Client,
    config: &DiscoveryConfig,
    village_name: &str,
) -> Result<Vec<Business>, reqwest::Error> {
    let body = json!({
        "contents": [{ "parts": [{ "text": prompt(village_name) }] }],
        "tools": [{ "google_search": {} }],
    });

    let response: Value = client
        .post(config.endpoint.clone())
        .query(&[("key", config.api_key.as_str())])
        .json(&body)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    let text = response["candidates"][0]["content"]["parts"][0]["text"]
        .as_str()
        .unwrap_or("");
    let mut businesses = extract_fenced_json(text);

    // Grounding attribution: the first grounding chunk's URL backfills any
    // record that arrived without a source.
    if let Some(uri) = grounding_url(&response) {
        for business in &mut businesses {
            business.source_url.get_or_insert_with(|| uri.to_string());
        }
    }

    Ok(businesses)
}

fn prompt(village_name: &str) -> String {
    format!(
        "Provide a detailed intelligence report on local assets for the village \
         of {village_name}, Royal Bafokeng Nation, Rustenburg region, South Africa.\n\
         List 8-10 real entities including:\n\
         - Schools (Primary, High, or Technical)\n\
         - Businesses (Retail, Mining contractors, or Local services)\n\
         - Community landmarks or Health clinics\n\n\
         CRITICAL: Provide the data as a valid JSON array inside a markdown code \
         block labeled \"JSON\". Each object must have keys: \"name\", \
         \"category\", and \"detail\"."
    )
}

fn grounding_url(response: &Value) -> Option<&str> {
    response["candidates"][0]["groundingMetadata"]["groundingChunks"][0]["web"]["uri"].as_str()
}

/// Pulls the first fenced code block out of a markdown response and parses
/// it as a business array. A structurally invalid payload is an empty batch.
pub fn extract_fenced_json(text: &str) -> Vec<Business> {
    let Some(block) = fenced_block(text) else {
        eprintln!("lefatshe: discovery response had no fenced JSON block");
        return Vec::new();
    };
    match serde_json::from_str(block.trim()) {
        Ok(businesses) => businesses,
        Err(err) => {
            eprintln!("lefatshe: discovery payload failed to parse: {err}");
            Vec::new()
        }
    }
}

fn fenced_block(text: &str) -> Option<&str> {
    let open = text.find("```")?;
    let after_fence = &text[open + 3..];
    // Skip an optional language tag ("json", "JSON", ...) up to end of line.
    let body_start = after_fence.find('\n').map(|i| i + 1).unwrap_or(0);
    let body = &after_fence[body_start..];
    let close = body.find("```")?;
    Some(&body[..close])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_labeled_json_block() {
        let text = "Here is the report.\n```JSON\n[{\"name\": \"Lebone II College\", \
                    \"category\": \"Education\", \"detail\": \"An independent school.\"}]\n```\nDone.";
        let businesses = extract_fenced_json(text);
        assert_eq!(businesses.len(), 1);
        assert_eq!(businesses[0].name, "Lebone II College");
        assert_eq!(businesses[0].category, "Education");
        assert!(businesses[0].source_url.is_none());
    }

    #[test]
    fn extracts_unlabeled_block() {
        let text = "```\n[{\"name\": \"Clinic\", \"category\": \"Health\", \"detail\": \"d\"}]\n```";
        assert_eq!(extract_fenced_json(text).len(), 1);
    }

    #[test]
    fn missing_fence_is_empty_batch() {
        assert!(extract_fenced_json("no code block here").is_empty());
    }

    #[test]
    fn malformed_payload_is_empty_batch() {
        let text = "```json\n{\"not\": \"an array\"\n```";
        assert!(extract_fenced_json(text).is_empty());
    }

    #[test]
    fn source_url_round_trips_through_serde() {
        let json = "{\"name\": \"n\", \"category\": \"c\", \"detail\": \"d\", \
                    \"sourceUrl\": \"https://example.com\"}";
        let business: Business = serde_json::from_str(json).unwrap();
        assert_eq!(business.source_url.as_deref(), Some("https://example.com"));
    }
}
