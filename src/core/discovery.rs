use log::{debug, info};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::core::connector;
use crate::core::device_lister::list_devices;
use crate::core::state::AppState;

/// How often the attached-device list is re-polled.
pub const DISCOVERY_PERIOD: Duration = Duration::from_secs(2);

/// Keep the identifiers that are neither connected nor already being probed.
/// Duplicate identifiers in one listing (two identical-model devices) are
/// collapsed to a single attempt.
pub fn filter_new(
    listed: &[String],
    connected: &HashSet<String>,
    in_flight: &HashSet<String>,
) -> Vec<String> {
    let mut seen = HashSet::new();
    listed
        .iter()
        .filter(|id| !connected.contains(id.as_str()) && !in_flight.contains(id.as_str()))
        .filter(|id| seen.insert(id.as_str()))
        .cloned()
        .collect()
}

/// One discovery tick: list devices, pick the new ones, and fire one
/// handshake task per identifier. The in-flight mark is taken synchronously
/// before the task is spawned, so a tick that overlaps a slow attempt cannot
/// start a second attempt for the same identifier.
pub fn poll_once(state: &Arc<Mutex<AppState>>) {
    let listed = list_devices();
    debug!("Discovery tick: {} device(s) listed", listed.len());

    let fresh = {
        let mut st = state.lock().unwrap();
        let fresh = filter_new(&listed, st.connected_ids(), st.in_flight_ids());
        for id in &fresh {
            st.begin_attempt(id);
        }
        fresh
    };

    for identifier in fresh {
        info!("New device {}, starting handshake", identifier);
        let state = Arc::clone(state);
        // Serial open/write/read are blocking with 1 s timeouts; keep them
        // off the async worker threads.
        tokio::task::spawn_blocking(move || {
            connector::connect(&state, &identifier);
            state.lock().unwrap().finish_attempt(&identifier);
        });
    }
}

/// Run the discovery loop forever. Attempts still pending when the next tick
/// fires are left to finish; the in-flight set keeps them from being doubled.
pub async fn run(state: Arc<Mutex<AppState>>) {
    let mut ticker = tokio::time::interval(DISCOVERY_PERIOD);
    loop {
        ticker.tick().await;
        poll_once(&state);
    }
}
