use anyhow::{anyhow, Context, Result};
use log::{info, warn};
use serialport::SerialPort;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::core::device_lister::resolve_identifier;
use crate::core::state::AppState;

pub const BAUD_RATE: u32 = 9600;
pub const HANDSHAKE_TIMEOUT: Duration = Duration::from_millis(1000);
/// Probe payload sent to the device to confirm it speaks JSON.
pub const PROBE: &[u8] = b"{}";
/// Maximum reply size read back during the handshake.
pub const REPLY_LIMIT: usize = 1024;

/// Perform the probe/reply handshake on an already open port.
///
/// Writes the `{}` probe, reads a single reply of up to 1024 bytes within the
/// port's configured timeout, and checks that the reply parses as JSON. The
/// reply content is ignored; well-formedness is the whole contract.
pub fn handshake(port: &mut dyn SerialPort) -> Result<()> {
    port.write_all(PROBE).context("Failed to write probe")?;
    port.flush().context("Failed to flush probe")?;

    let mut buf = [0u8; REPLY_LIMIT];
    let n = match port.read(&mut buf) {
        Ok(0) => return Err(anyhow!("Device closed the connection without replying")),
        Ok(n) => n,
        Err(ref e) if e.kind() == std::io::ErrorKind::TimedOut => {
            return Err(anyhow!("No handshake reply within {:?}", HANDSHAKE_TIMEOUT));
        }
        Err(e) => return Err(anyhow!("Handshake read error: {}", e)),
    };

    let reply = std::str::from_utf8(&buf[..n]).context("Handshake reply is not valid UTF-8")?;
    serde_json::from_str::<serde_json::Value>(reply)
        .with_context(|| format!("Handshake reply is not valid JSON: {:?}", reply))?;
    Ok(())
}

/// Resolve an identifier to a device, open it at 9600-8-N-1 and run the
/// handshake. On success the open port is returned; on any failure the
/// transient port is dropped, which closes it.
pub fn try_connect(identifier: &str) -> Result<Box<dyn SerialPort>> {
    // Identifiers are recomputed on every attempt rather than cached; a
    // device swapped between listing and connecting can match the wrong
    // physical unit if VID:PID collide.
    let port_name = resolve_identifier(identifier)
        .ok_or_else(|| anyhow!("No attached device matches {}", identifier))?;

    let mut port = serialport::new(&port_name, BAUD_RATE)
        .data_bits(serialport::DataBits::Eight)
        .parity(serialport::Parity::None)
        .stop_bits(serialport::StopBits::One)
        .flow_control(serialport::FlowControl::None)
        .timeout(HANDSHAKE_TIMEOUT)
        .open()
        .map_err(|e| anyhow!("Failed to open {}: {}", port_name, e))?;

    handshake(port.as_mut())?;
    Ok(port)
}

/// Connect to the device behind `identifier` and register the session.
///
/// This is the whole public contract of the connector: `true` means the
/// handshake succeeded and the open session is registered under the
/// identifier, `false` means the attempt failed and nothing was kept open.
/// Errors never escape; every failure is logged and reflected in the status
/// line.
pub fn connect(state: &Arc<Mutex<AppState>>, identifier: &str) -> bool {
    match try_connect(identifier) {
        Ok(port) => {
            let mut st = state.lock().unwrap();
            let registered = st.register_session(identifier, port);
            if registered {
                info!("Connected to {}", identifier);
                st.set_status(format!("Connected to {}", identifier), false);
            } else {
                // A concurrent attempt won the race; the duplicate port is
                // dropped on scope exit and the existing session is kept.
                warn!("Session for {} already registered, closing duplicate", identifier);
            }
            true
        }
        Err(e) => {
            warn!("Connection to {} failed: {:#}", identifier, e);
            let mut st = state.lock().unwrap();
            st.set_status(format!("Connection to {} failed", identifier), true);
            false
        }
    }
}
