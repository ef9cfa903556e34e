use shiftlight_link::core::device_lister::list_devices;

fn main() {
    env_logger::init();

    let devices = list_devices();
    if devices.is_empty() {
        println!("No USB serial devices found.");
        return;
    }

    println!("Attached USB serial devices:");
    for identifier in devices {
        println!("  - {}", identifier);
    }
}
