//! Appliance summary report.

use anyhow::Result;
use opengear_api::{builtin_uart_labels, ApplianceApi};
use std::io::Write;
use tracing::debug;

/// Write the appliance summary to `out`.
///
/// Lines, in order: firmware version, device summary, one label per built-in
/// UART port, modem summary. A section whose data the appliance did not
/// return is skipped. Transport failures abort the report.
pub fn write_report<A, W>(api: &A, out: &mut W) -> Result<()>
where
    A: ApplianceApi + ?Sized,
    W: Write,
{
    if let Some(firmware) = api
        .get_version()?
        .and_then(|version| version.firmware_version)
    {
        writeln!(out, "{firmware}")?;
    }

    if let Some(device) = api.get_device()? {
        writeln!(out, "{}", device.summary())?;
    }

    if let Some(ports) = api.get_serial_ports()? {
        for label in builtin_uart_labels(&ports) {
            writeln!(out, "{label}")?;
        }
    }

    if let Some(modem) = api.get_modem_status()? {
        match modem.summary() {
            Some(line) => writeln!(out, "{line}")?,
            None => debug!("modem status reported no links"),
        }
    }

    Ok(())
}
