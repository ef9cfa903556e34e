use serde::Serialize;
use serialport::SerialPort;
use std::collections::{HashMap, HashSet};

use crate::core::settings::ShiftSettings;

/// One-line status shown by the front end; `error` selects the red styling.
#[derive(Debug, Clone, Serialize)]
pub struct StatusMessage {
    pub text: String,
    pub error: bool,
}

/// Shared application state, owned behind a single `Arc<Mutex<..>>` and
/// passed to the discovery loop and the render layer.
///
/// `connected` and `sessions` only ever grow: there is no disconnect
/// detection, so an unplugged device keeps its entry and its (now dead)
/// session for the lifetime of the process. Known limitation inherited from
/// the original behavior.
pub struct AppState {
    pub settings: ShiftSettings,
    /// Identifiers that completed a handshake at some point.
    connected: HashSet<String>,
    /// Open serial sessions, one per identifier.
    sessions: HashMap<String, Box<dyn SerialPort>>,
    /// Identifiers with a connect attempt currently in progress. Marked
    /// synchronously before the attempt is spawned so overlapping discovery
    /// ticks cannot launch duplicate attempts.
    in_flight: HashSet<String>,
    status: Option<StatusMessage>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            settings: ShiftSettings::new(),
            connected: HashSet::new(),
            sessions: HashMap::new(),
            in_flight: HashSet::new(),
            status: None,
        }
    }

    pub fn connected_ids(&self) -> &HashSet<String> {
        &self.connected
    }

    pub fn in_flight_ids(&self) -> &HashSet<String> {
        &self.in_flight
    }

    /// Mark an attempt as started. Returns false if one is already running
    /// for this identifier.
    pub fn begin_attempt(&mut self, identifier: &str) -> bool {
        self.in_flight.insert(identifier.to_string())
    }

    pub fn finish_attempt(&mut self, identifier: &str) {
        self.in_flight.remove(identifier);
    }

    /// Register an open session after a successful handshake. At most one
    /// session is kept per identifier: if one is already registered the new
    /// port is rejected and the caller drops it, closing the duplicate.
    pub fn register_session(&mut self, identifier: &str, port: Box<dyn SerialPort>) -> bool {
        if self.sessions.contains_key(identifier) {
            return false;
        }
        self.sessions.insert(identifier.to_string(), port);
        self.connected.insert(identifier.to_string());
        true
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    pub fn set_status(&mut self, text: String, error: bool) {
        self.status = Some(StatusMessage { text, error });
    }

    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
