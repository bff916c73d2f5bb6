//! # Session Configuration
//!
//! Everything fixed for the lifetime of a session: serial line settings, the
//! unit id, the default read quantity, the register byte order and the
//! location of the name table.
//!
//! ## File Format
//!
//! ```json
//! {
//!   "slave_id": 1,
//!   "default_quantity": 10,
//!   "endianness": "BIG",
//!   "serial": { "port": "/dev/ttyUSB0", "baud_rate": 9600, "parity": "none" },
//!   "names": "names.json"
//! }
//! ```
//!
//! Every field is optional. A relative `names` path is resolved against the
//! directory holding the configuration file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::bytes::Endianness;
use crate::constants::{
    DEFAULT_BAUD_RATE, DEFAULT_DATA_BITS, DEFAULT_READ_QUANTITY, DEFAULT_SERIAL_PORT,
    DEFAULT_SLAVE_ID, DEFAULT_STOP_BITS, DEFAULT_TIMEOUT_MS,
};
use crate::error::{RegviewError, RegviewResult};
use crate::names::NameTable;

/// Serial parity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Parity {
    #[default]
    None,
    Odd,
    Even,
}

/// Serial line settings handed to the RTU client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SerialConfig {
    /// Device path, e.g. `/dev/ttyUSB0` or `COM3`
    pub port: String,
    pub baud_rate: u32,
    /// 5 to 8
    pub data_bits: u8,
    pub parity: Parity,
    /// 1 or 2
    pub stop_bits: u8,
    /// Per-request timeout in milliseconds
    pub timeout_ms: u64,
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_SERIAL_PORT.to_string(),
            baud_rate: DEFAULT_BAUD_RATE,
            data_bits: DEFAULT_DATA_BITS,
            parity: Parity::None,
            stop_bits: DEFAULT_STOP_BITS,
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

/// Session-wide settings.
///
/// # Example
///
/// ```rust
/// use modbus_regview::{Endianness, SessionConfig};
///
/// let config = SessionConfig::new()
///     .with_slave_id(3)
///     .with_default_quantity(4)
///     .with_endianness(Endianness::Little);
///
/// assert_eq!(config.default_quantity, 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Modbus unit identifier
    pub slave_id: u8,
    /// Quantity used when a read omits one
    pub default_quantity: u16,
    /// Byte order of register words
    pub endianness: Endianness,
    pub serial: SerialConfig,
    /// Name table file
    pub names: Option<PathBuf>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            slave_id: DEFAULT_SLAVE_ID,
            default_quantity: DEFAULT_READ_QUANTITY,
            endianness: Endianness::default(),
            serial: SerialConfig::default(),
            names: None,
        }
    }
}

impl SessionConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the unit identifier.
    pub fn with_slave_id(mut self, slave_id: u8) -> Self {
        self.slave_id = slave_id;
        self
    }

    /// Set the default read quantity.
    pub fn with_default_quantity(mut self, quantity: u16) -> Self {
        self.default_quantity = quantity;
        self
    }

    /// Set the register byte order.
    pub fn with_endianness(mut self, endianness: Endianness) -> Self {
        self.endianness = endianness;
        self
    }

    /// Set the serial line settings.
    pub fn with_serial(mut self, serial: SerialConfig) -> Self {
        self.serial = serial;
        self
    }

    /// Set the name table path.
    pub fn with_names(mut self, path: impl Into<PathBuf>) -> Self {
        self.names = Some(path.into());
        self
    }

    /// Parse and validate JSON text.
    pub fn from_json_str(json: &str) -> RegviewResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a JSON file, resolving a relative `names` path against the
    /// file's directory.
    pub fn from_json_file(path: impl AsRef<Path>) -> RegviewResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            RegviewError::configuration(format!("cannot read {}: {}", path.display(), e))
        })?;
        let mut config = Self::from_json_str(&text)?;

        if let (Some(names), Some(dir)) = (config.names.as_ref(), path.parent()) {
            if names.is_relative() {
                config.names = Some(dir.join(names));
            }
        }

        debug!(
            "Loaded session config from {}: slave={} quantity={} endianness={}",
            path.display(),
            config.slave_id,
            config.default_quantity,
            config.endianness
        );
        Ok(config)
    }

    /// Check value ranges the type system cannot express.
    pub fn validate(&self) -> RegviewResult<()> {
        if self.default_quantity == 0 {
            return Err(RegviewError::configuration(
                "default_quantity must be at least 1",
            ));
        }
        if !(5..=8).contains(&self.serial.data_bits) {
            return Err(RegviewError::configuration(format!(
                "data_bits must be 5..=8, got {}",
                self.serial.data_bits
            )));
        }
        if !(1..=2).contains(&self.serial.stop_bits) {
            return Err(RegviewError::configuration(format!(
                "stop_bits must be 1 or 2, got {}",
                self.serial.stop_bits
            )));
        }
        Ok(())
    }

    /// Load the configured name table, or an empty one when none is set.
    pub fn load_name_table(&self) -> RegviewResult<NameTable> {
        match &self.names {
            Some(path) => NameTable::from_json_file(path),
            None => Ok(NameTable::new()),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::RegisterClass;
    use std::fs;

    #[test]
    fn test_defaults() {
        let config = SessionConfig::default();
        assert_eq!(config.slave_id, DEFAULT_SLAVE_ID);
        assert_eq!(config.default_quantity, DEFAULT_READ_QUANTITY);
        assert_eq!(config.endianness, Endianness::Big);
        assert_eq!(config.serial.port, DEFAULT_SERIAL_PORT);
        assert_eq!(config.serial.baud_rate, 9600);
        assert_eq!(config.serial.parity, Parity::None);
        assert!(config.names.is_none());
    }

    #[test]
    fn test_builder_pattern() {
        let config = SessionConfig::new()
            .with_slave_id(17)
            .with_default_quantity(2)
            .with_endianness(Endianness::Little)
            .with_names("names.json");

        assert_eq!(config.slave_id, 17);
        assert_eq!(config.default_quantity, 2);
        assert_eq!(config.endianness, Endianness::Little);
        assert_eq!(config.names, Some(PathBuf::from("names.json")));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = SessionConfig::from_json_str(
            r#"{"endianness": "little", "serial": {"baud_rate": 19200, "parity": "even"}}"#,
        )
        .unwrap();

        assert_eq!(config.endianness, Endianness::Little);
        assert_eq!(config.serial.baud_rate, 19200);
        assert_eq!(config.serial.parity, Parity::Even);
        assert_eq!(config.serial.port, DEFAULT_SERIAL_PORT);
        assert_eq!(config.default_quantity, DEFAULT_READ_QUANTITY);
    }

    #[test]
    fn test_validation() {
        for json in [
            r#"{"default_quantity": 0}"#,
            r#"{"serial": {"data_bits": 9}}"#,
            r#"{"serial": {"stop_bits": 0}}"#,
            r#"{"endianness": "middle"}"#,
        ] {
            let err = SessionConfig::from_json_str(json).unwrap_err();
            assert!(
                matches!(err, RegviewError::Configuration { .. }),
                "{json}: {err:?}"
            );
        }
    }

    #[test]
    fn test_from_file_resolves_relative_names() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("names.json"),
            r#"{"holding_registers": {"0x0004": "OPERATING_MODE"}}"#,
        )
        .unwrap();
        let config_path = dir.path().join("regview.json");
        fs::write(&config_path, r#"{"slave_id": 2, "names": "names.json"}"#).unwrap();

        let config = SessionConfig::from_json_file(&config_path).unwrap();
        assert_eq!(config.slave_id, 2);
        assert_eq!(config.names, Some(dir.path().join("names.json")));

        let table = config.load_name_table().unwrap();
        assert_eq!(
            table.resolve(RegisterClass::HoldingRegister, 4),
            "OPERATING_MODE"
        );
    }

    #[test]
    fn test_without_names_loads_empty_table() {
        let table = SessionConfig::default().load_name_table().unwrap();
        assert!(table.is_empty());
    }
}
