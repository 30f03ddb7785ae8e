//! Response models for the Opengear REST API.
//!
//! Only the fields the client reads are typed. Everything else the appliance
//! returns is preserved in the flattened `extra` map of each model.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// Hardware type reported for the appliance's built-in UART ports.
pub const BUILTIN_UART: &str = "builtInUART";

const UNKNOWN: &str = "unknown";

fn or_unknown(value: Option<&str>) -> &str {
    value.unwrap_or(UNKNOWN)
}

/// The `system_version` object of `GET /system/version`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SystemVersion {
    /// Firmware version string, e.g. `4.1.2`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub firmware_version: Option<String>,
    /// Remaining fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body of `GET /nodeDescription`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NodeDescription {
    /// Appliance model.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_number: Option<String>,
    /// Appliance serial number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<String>,
    /// Running firmware version.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub firmware_version: Option<String>,
    /// Remaining fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl NodeDescription {
    /// One-line summary: `model=…,serial=…,version=…`.
    ///
    /// Fields the appliance omitted render as `unknown`.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "model={},serial={},version={}",
            or_unknown(self.model_number.as_deref()),
            or_unknown(self.serial_number.as_deref()),
            or_unknown(self.firmware_version.as_deref()),
        )
    }
}

/// One entry of the `serialports` array of `GET /serialPorts`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SerialPort {
    /// Port label as configured on the appliance.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Hardware type, e.g. `builtInUART`.
    #[serde(
        rename = "hardwareType",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub hardware_type: Option<String>,
    /// Remaining fields (mode, pinout, baud rate, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SerialPort {
    /// Whether this port is one of the appliance's built-in UARTs.
    #[must_use]
    pub fn is_builtin_uart(&self) -> bool {
        self.hardware_type.as_deref() == Some(BUILTIN_UART)
    }
}

/// Labels of the built-in UART ports, in appliance order. Unlabelled
/// ports are skipped.
#[must_use]
pub fn builtin_uart_labels(ports: &[SerialPort]) -> Vec<&str> {
    ports
        .iter()
        .filter(|port| port.is_builtin_uart())
        .filter_map(|port| port.label.as_deref())
        .collect()
}

/// Body of `GET /interfaces/cellmodem/status`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModemStatus {
    /// Whether the cellular interface is up.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub up: Option<bool>,
    /// Per-link status.
    #[serde(default)]
    pub links: Vec<ModemLink>,
    /// Remaining fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ModemStatus {
    /// WWAN details of the first link, if any.
    #[must_use]
    pub fn primary_wwan(&self) -> Option<&WwanStatus> {
        self.links.first().and_then(|link| link.wwan.as_ref())
    }

    /// One-line summary built from the first link:
    /// `active=…,signal_strength=…,carrier=…,tech=…`.
    ///
    /// Returns `None` when the modem reports no link with WWAN details.
    #[must_use]
    pub fn summary(&self) -> Option<String> {
        let wwan = self.primary_wwan()?;
        Some(format!(
            "active={},signal_strength={},carrier={},tech={}",
            self.up
                .map_or_else(|| UNKNOWN.to_string(), |up| up.to_string()),
            wwan.signal_strength
                .as_ref()
                .map_or_else(|| UNKNOWN.to_string(), Number::to_string),
            or_unknown(wwan.carrier.as_deref()),
            or_unknown(wwan.technology.as_deref()),
        ))
    }
}

/// One entry of the `links` array of the modem status.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModemLink {
    /// Wireless WAN details.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wwan: Option<WwanStatus>,
    /// Remaining fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Wireless WAN status of a modem link.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WwanStatus {
    /// Signal strength as reported (percent or dBm depending on firmware).
    #[serde(
        rename = "signalStrength",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub signal_strength: Option<Number>,
    /// Carrier name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carrier: Option<String>,
    /// Radio technology, e.g. `LTE`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub technology: Option<String>,
    /// Remaining fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
