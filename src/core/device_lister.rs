use serialport::SerialPortType;

/// Format a USB vendor/product pair into the identifier string used
/// throughout the app: `USB VID:PID vvvv:pppp`, lowercase, zero-padded.
pub fn format_identifier(vid: u16, pid: u16) -> String {
    format!("USB VID:PID {:04x}:{:04x}", vid, pid)
}

/// List identifiers for all attached USB serial devices.
///
/// Enumeration problems (no devices, platform denies access) yield an empty
/// list rather than an error. Two identical-model devices produce the same
/// identifier; callers cannot tell them apart.
pub fn list_devices() -> Vec<String> {
    let ports = match serialport::available_ports() {
        Ok(ports) => ports,
        Err(e) => {
            log::debug!("Port enumeration failed: {}", e);
            return Vec::new();
        }
    };

    ports
        .into_iter()
        .filter_map(|port| match port.port_type {
            SerialPortType::UsbPort(info) => Some(format_identifier(info.vid, info.pid)),
            _ => None,
        })
        .collect()
}

/// Resolve an identifier back to a concrete port name by re-enumerating.
/// Returns the first matching port; identifiers are not unique across
/// identical-model devices, so a collision picks an arbitrary unit.
pub fn resolve_identifier(identifier: &str) -> Option<String> {
    let ports = serialport::available_ports().ok()?;
    ports.into_iter().find_map(|port| match &port.port_type {
        SerialPortType::UsbPort(info) if format_identifier(info.vid, info.pid) == identifier => {
            Some(port.port_name)
        }
        _ => None,
    })
}
