use shiftlight_link::core::discovery;
use shiftlight_link::core::state::AppState;
use std::sync::{Arc, Mutex};

/// Headless discovery monitor: polls for Shiftlight devices every two seconds
/// and prints status transitions. Ctrl-C to stop.
#[tokio::main]
async fn main() {
    env_logger::init();

    println!("Shiftlight discovery monitor");
    println!("Polling every {:?}, Ctrl-C to stop.", discovery::DISCOVERY_PERIOD);

    let state = Arc::new(Mutex::new(AppState::new()));

    let status_state = Arc::clone(&state);
    tokio::spawn(async move {
        let mut last = String::new();
        let mut ticker = tokio::time::interval(discovery::DISCOVERY_PERIOD);
        loop {
            ticker.tick().await;
            let st = status_state.lock().unwrap();
            log::debug!("Values JSON: {}", st.settings.values_json());
            if let Some(status) = st.status() {
                if status.text != last {
                    last = status.text.clone();
                    let prefix = if status.error { "ERROR" } else { "OK" };
                    println!("[{}] {} ({} session(s) open)", prefix, status.text, st.session_count());
                }
            }
        }
    });

    discovery::run(state).await;
}
