//! # Byte Order Handling for Registers
//!
//! Devices disagree on how the two bytes of a 16-bit register map onto the
//! value an operator expects to see. The session is configured once with an
//! [`Endianness`] and every register word passes through [`Endianness::convert`]
//! on its way to the display and on its way back to the wire.
//!
//! For register word `0x1234`:
//! - `Big (AB)`: shown as `0x1234`
//! - `Little (BA)`: shown as `0x3412`
//!
//! The transform is its own inverse, so one function serves both directions.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Byte order applied to 16-bit register words.
///
/// # Example
///
/// ```rust
/// use modbus_regview::Endianness;
///
/// let order = Endianness::from_str("little").unwrap();
/// assert_eq!(order.convert(0x1234), 0x3412);
/// assert_eq!(order.convert(order.convert(0x1234)), 0x1234);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Endianness {
    /// Words are used as received (AB)
    #[default]
    Big,
    /// Low and high bytes are swapped (BA)
    Little,
}

impl Endianness {
    /// Parse from configuration strings.
    ///
    /// Accepts, case-insensitively and ignoring `-`/`_`:
    /// - "BIG", "BE", "BIG_ENDIAN", "AB" → Big
    /// - "LITTLE", "LE", "LITTLE_ENDIAN", "BA" → Little
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .map(|c| c.to_ascii_uppercase())
            .collect();
        match normalized.as_str() {
            "BIG" | "BE" | "BIGENDIAN" | "AB" => Some(Self::Big),
            "LITTLE" | "LE" | "LITTLEENDIAN" | "BA" => Some(Self::Little),
            _ => None,
        }
    }

    /// Canonical configuration name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Big => "BIG",
            Self::Little => "LITTLE",
        }
    }

    /// Transform a register word between wire and display form.
    #[inline]
    pub fn convert(self, value: u16) -> u16 {
        match self {
            Self::Big => value,
            Self::Little => swap_bytes(value),
        }
    }

    /// Apply [`convert`](Self::convert) to every word of a slice.
    pub fn convert_all(self, values: &[u16]) -> Vec<u16> {
        values.iter().map(|&v| self.convert(v)).collect()
    }
}

impl fmt::Display for Endianness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Endianness {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Endianness {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::from_str(&raw).ok_or_else(|| {
            serde::de::Error::custom(format!(
                "unknown endianness '{}', expected BIG or LITTLE",
                raw
            ))
        })
    }
}

/// Swap the low and high byte of a register word.
#[inline]
pub fn swap_bytes(value: u16) -> u16 {
    ((value & 0xFF) << 8) | ((value >> 8) & 0xFF)
}

// ============================================================================
// Tests
// ============================================================================
