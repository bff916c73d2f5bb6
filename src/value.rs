//! # Register Values
//!
//! A value read from one of the four data tables: a bit for coils and
//! discrete inputs, a 16-bit word for holding and input registers.

use std::fmt;

/// Value of a single coil, input or register.
///
/// # Example
///
/// ```rust
/// use modbus_regview::RegisterValue;
///
/// assert_eq!(RegisterValue::from(0x00FFu16), RegisterValue::Word(255));
/// assert_eq!(RegisterValue::from(true).to_string(), "true");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegisterValue {
    /// Coil or discrete input state
    Bit(bool),
    /// Holding or input register word, in display byte order
    Word(u16),
}

impl fmt::Display for RegisterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegisterValue::Bit(v) => write!(f, "{}", v),
            RegisterValue::Word(v) => write!(f, "{}", v),
        }
    }
}

impl From<bool> for RegisterValue {
    fn from(v: bool) -> Self {
        RegisterValue::Bit(v)
    }
}

impl From<u16> for RegisterValue {
    fn from(v: u16) -> Self {
        RegisterValue::Word(v)
    }
}
