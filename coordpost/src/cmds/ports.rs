use eyre::Result;
use serialport::{SerialPortInfo, SerialPortType};
use tabled::builder::Builder;
use tabled::settings::Style;
use tracing::trace;

/// Return a table of the serial ports seen by the system.
///
#[tracing::instrument]
pub fn list_ports() -> Result<String> {
    trace!("list_ports");

    let ports = serialport::available_ports()?;
    Ok(ports_table(&ports))
}

fn ports_table(ports: &[SerialPortInfo]) -> String {
    let header = vec!["Name", "Type", "Details"];

    let mut builder = Builder::default();
    builder.push_record(header);

    for port in ports {
        let (kind, details) = match &port.port_type {
            SerialPortType::UsbPort(usb) => (
                "USB",
                format!(
                    "{:04x}:{:04x} {} {}",
                    usb.vid,
                    usb.pid,
                    usb.manufacturer.as_deref().unwrap_or(""),
                    usb.product.as_deref().unwrap_or("")
                )
                .trim_end()
                .to_string(),
            ),
            SerialPortType::PciPort => ("PCI", String::new()),
            SerialPortType::BluetoothPort => ("Bluetooth", String::new()),
            SerialPortType::Unknown => ("Unknown", String::new()),
        };
        builder.push_record(vec![port.port_name.clone(), kind.to_string(), details]);
    }

    builder.build().with(Style::modern()).to_string()
}
