use anyhow::{Context as _, Result};
use serialport::SerialPortType;

pub fn list() -> Result<()> {
    let ports = serialport::available_ports().context("failed to enumerate serial ports")?;

    println!("Available serial ports:");
    if ports.is_empty() {
        println!("  (none)");
    }
    for port in ports {
        match &port.port_type {
            SerialPortType::UsbPort(info) => {
                println!(
                    "  {} - USB (VID: 0x{:04x}, PID: 0x{:04x})",
                    port.port_name, info.vid, info.pid
                );
                if let Some(product) = &info.product {
                    println!("      Product: {product}");
                }
            }
            other => println!("  {} - {}", port.port_name, port_type_name(other)),
        }
    }
    Ok(())
}

fn port_type_name(port_type: &SerialPortType) -> &str {
    match port_type {
        SerialPortType::UsbPort(_) => "USB",
        SerialPortType::BluetoothPort => "Bluetooth",
        SerialPortType::PciPort => "PCI",
        SerialPortType::Unknown => "Unknown",
    }
}
