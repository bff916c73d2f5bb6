//! # Register Name Table
//!
//! Maps `(class, address)` pairs to symbolic names. The table is built once at
//! startup and shared read-only afterwards.
//!
//! ## File Format
//!
//! ```json
//! {
//!   "holding_registers": { "0x0004": "OPERATING_MODE", "0x000a": "SETPOINT" },
//!   "coils": { "0X0001": "PUMP_ENABLE" },
//!   "input_registers": null
//! }
//! ```
//!
//! A class that is missing or `null` has no names. Keys may use either prefix
//! case and any digit case; they are stored as `0x` plus 4 uppercase digits.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use tracing::debug;

use crate::error::{RegviewError, RegviewResult};
use crate::format::to_hex_display;
use crate::protocol::RegisterClass;

/// On-disk shape of a name table, keyed by [`RegisterClass::table_key`].
type NameTableFile = BTreeMap<String, Option<BTreeMap<String, String>>>;

/// Read-only address → name lookup per register class.
///
/// # Example
///
/// ```rust
/// use modbus_regview::{NameTable, RegisterClass};
///
/// let table = NameTable::from_json_str(r#"{"holding_registers": {"0X000a": "SETPOINT"}}"#).unwrap();
/// assert_eq!(table.resolve(RegisterClass::HoldingRegister, 10), "SETPOINT");
/// assert_eq!(table.resolve(RegisterClass::Coil, 10), "");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameTable {
    classes: HashMap<RegisterClass, HashMap<String, String>>,
}

impl NameTable {
    /// Create an empty table; every lookup resolves to "".
    pub fn new() -> Self {
        Self::default()
    }

    /// Add names for one class, replacing any previous names for it.
    ///
    /// Keys are canonicalized; an unparseable key is a configuration error.
    pub fn with_class<I, K, V>(mut self, class: RegisterClass, entries: I) -> RegviewResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut names = HashMap::new();
        for (key, name) in entries {
            let address = canonical_key(key.as_ref()).ok_or_else(|| {
                RegviewError::configuration(format!(
                    "invalid {} address key '{}' in name table",
                    class,
                    key.as_ref()
                ))
            })?;
            names.insert(address, name.into());
        }
        self.classes.insert(class, names);
        Ok(self)
    }

    /// Drop all names for one class.
    pub fn disable(mut self, class: RegisterClass) -> Self {
        self.classes.remove(&class);
        self
    }

    /// Parse a name table from JSON text.
    pub fn from_json_str(json: &str) -> RegviewResult<Self> {
        let mut file: NameTableFile = serde_json::from_str(json)?;
        let mut table = Self::new();
        for class in RegisterClass::ALL {
            if let Some(entries) = file.remove(class.table_key()).flatten() {
                table = table.with_class(class, entries)?;
            }
        }
        if let Some(key) = file.keys().next() {
            return Err(RegviewError::configuration(format!(
                "unknown register class '{}' in name table",
                key
            )));
        }
        debug!(
            "Loaded name table: {} name(s) across {} class(es)",
            table.len(),
            table.classes.len()
        );
        Ok(table)
    }

    /// Load a name table from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> RegviewResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            RegviewError::configuration(format!(
                "cannot read name table {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_json_str(&text)
    }

    /// Name bound to `address`, or "" when there is none.
    pub fn resolve(&self, class: RegisterClass, address: u16) -> &str {
        self.classes
            .get(&class)
            .and_then(|names| names.get(&to_hex_display(address)))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// True when the class has a table at all.
    pub fn is_enabled(&self, class: RegisterClass) -> bool {
        self.classes.contains_key(&class)
    }

    /// Total number of names across all classes.
    pub fn len(&self) -> usize {
        self.classes.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Normalize a table key to the address display form.
fn canonical_key(key: &str) -> Option<String> {
    let key = key.trim();
    let digits = key
        .strip_prefix("0x")
        .or_else(|| key.strip_prefix("0X"))?;
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    u16::from_str_radix(digits, 16).ok().map(to_hex_display)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_canonical_key() {
        assert_eq!(canonical_key("0x0004").as_deref(), Some("0x0004"));
        assert_eq!(canonical_key("0X0004").as_deref(), Some("0x0004"));
        assert_eq!(canonical_key("0x00ff").as_deref(), Some("0x00FF"));
        assert_eq!(canonical_key("0x4").as_deref(), Some("0x0004"));
        assert_eq!(canonical_key("4"), None);
        assert_eq!(canonical_key("0x"), None);
        assert_eq!(canonical_key("0x10000"), None);
        assert_eq!(canonical_key("0x+4"), None);
    }

    #[test]
    fn test_resolve_ignores_key_casing() {
        for key in ["0x0004", "0X0004", "0x4"] {
            let table = NameTable::new()
                .with_class(RegisterClass::HoldingRegister, [(key, "MODE")])
                .unwrap();
            assert_eq!(table.resolve(RegisterClass::HoldingRegister, 4), "MODE");
        }

        let table = NameTable::new()
            .with_class(RegisterClass::InputRegister, [("0x00ab", "FLOW")])
            .unwrap();
        assert_eq!(table.resolve(RegisterClass::InputRegister, 0xAB), "FLOW");
    }

    #[test]
    fn test_resolve_missing() {
        let table = NameTable::new()
            .with_class(RegisterClass::HoldingRegister, [("0x0004", "MODE")])
            .unwrap();
        assert_eq!(table.resolve(RegisterClass::HoldingRegister, 5), "");
        assert_eq!(table.resolve(RegisterClass::InputRegister, 4), "");
        assert_eq!(NameTable::new().resolve(RegisterClass::Coil, 0), "");
    }

    #[test]
    fn test_disable() {
        let table = NameTable::new()
            .with_class(RegisterClass::Coil, [("0x0001", "PUMP")])
            .unwrap()
            .disable(RegisterClass::Coil);
        assert!(!table.is_enabled(RegisterClass::Coil));
        assert_eq!(table.resolve(RegisterClass::Coil, 1), "");
    }

    #[test]
    fn test_invalid_key_is_configuration_error() {
        let err = NameTable::new()
            .with_class(RegisterClass::Coil, [("pump", "PUMP")])
            .unwrap_err();
        assert!(matches!(err, RegviewError::Configuration { .. }));
    }

    #[test]
    fn test_from_json_str() {
        let table = NameTable::from_json_str(
            r#"{
                "coils": {"0X0001": "PUMP_ENABLE"},
                "holding_registers": {"0x0004": "OPERATING_MODE", "0x000a": "SETPOINT"},
                "input_registers": null
            }"#,
        )
        .unwrap();

        assert_eq!(table.len(), 3);
        assert_eq!(table.resolve(RegisterClass::Coil, 1), "PUMP_ENABLE");
        assert_eq!(table.resolve(RegisterClass::HoldingRegister, 10), "SETPOINT");
        assert!(!table.is_enabled(RegisterClass::InputRegister));
        assert!(!table.is_enabled(RegisterClass::DiscreteInput));
    }

    #[test]
    fn test_from_json_rejects_unknown_class() {
        let err = NameTable::from_json_str(r#"{"registers": {}}"#).unwrap_err();
        assert!(matches!(err, RegviewError::Configuration { .. }));
        assert!(err.to_string().contains("registers"), "{err}");

        let err = NameTable::from_json_str(r#"{"coils": null, "inputs": null}"#).unwrap_err();
        assert!(matches!(err, RegviewError::Configuration { .. }));
    }

    #[test]
    fn test_from_json_uses_class_table_keys() {
        for class in RegisterClass::ALL {
            let json = format!(r#"{{"{}": {{"0x0003": "X"}}}}"#, class.table_key());
            let table = NameTable::from_json_str(&json).unwrap();
            assert_eq!(table.resolve(class, 3), "X");
            assert_eq!(table.len(), 1);
        }
    }

    #[test]
    fn test_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"discrete_inputs": {{"0x0002": "DOOR_OPEN"}}}}"#).unwrap();

        let table = NameTable::from_json_file(file.path()).unwrap();
        assert_eq!(table.resolve(RegisterClass::DiscreteInput, 2), "DOOR_OPEN");
    }

    #[test]
    fn test_from_missing_file() {
        let err = NameTable::from_json_file("/nonexistent/names.json").unwrap_err();
        assert!(matches!(err, RegviewError::Configuration { .. }));
    }
}
