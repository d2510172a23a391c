//! Startup precondition: the language-model backend must be reachable.
//!
//! The scraped listings are only useful to a running Ollama instance, so the
//! binary probes `GET {backend}/api/tags` once before collecting anything.

use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{info, instrument, warn};

pub const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// `true` when `{base_url}/api/tags` answers with a 2xx status within
/// [`PROBE_TIMEOUT`].
#[instrument(level = "info")]
pub async fn check_backend(base_url: &str) -> bool {
    let probe = format!("{}/api/tags", base_url.trim_end_matches('/'));
    let client = match Client::builder().timeout(PROBE_TIMEOUT).build() {
        Ok(client) => client,
        Err(e) => {
            warn!(error = %e, "Failed to build probe client");
            return false;
        }
    };

    let t0 = Instant::now();
    match client.get(&probe).send().await {
        Ok(resp) if resp.status().is_success() => {
            info!(
                elapsed_ms = t0.elapsed().as_millis() as u64,
                "Backend reachable"
            );
            true
        }
        Ok(resp) => {
            warn!(status = %resp.status(), %probe, "Backend answered with an error status");
            false
        }
        Err(e) => {
            warn!(error = %e, %probe, "Backend unreachable");
            false
        }
    }
}
