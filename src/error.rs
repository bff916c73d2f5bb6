//! Error types for register access
//!
//! Every failure the core reports falls into one of four categories:
//!
//! | Variant | Raised when |
//! |---------|-------------|
//! | `InvalidInput` | a token fails numeric parsing, a value is out of range, or a write has no values |
//! | `UnsupportedOperation` | a function code is not one of the six supported ones, or is used in the wrong direction |
//! | `Transport` | the transport collaborator fails (I/O, timeout, bad response, short read) |
//! | `Configuration` | a configuration file or name table cannot be loaded |
//!
//! None of these are retried by this crate.

use thiserror::Error;

/// Result type for register access operations
pub type RegviewResult<T> = Result<T, RegviewError>;

/// Failure reported by a transport collaborator.
///
/// Carries the collaborator's own message unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct TransportError {
    pub message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<voltage_modbus::ModbusError> for TransportError {
    fn from(err: voltage_modbus::ModbusError) -> Self {
        Self::new(err.to_string())
    }
}

/// Register access errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegviewError {
    /// Caller-supplied input could not be used
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    /// Function code outside the supported set
    #[error("Unsupported operation 0x{code:02X}: {message}")]
    UnsupportedOperation { code: u32, message: String },

    /// Transport collaborator failed
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// Configuration or name table could not be loaded
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl RegviewError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    pub fn unsupported(code: u32, message: impl Into<String>) -> Self {
        Self::UnsupportedOperation {
            code,
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(TransportError::new(message))
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    #[inline]
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput { .. })
    }

    #[inline]
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::UnsupportedOperation { .. })
    }

    #[inline]
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

impl From<std::io::Error> for RegviewError {
    fn from(err: std::io::Error) -> Self {
        Self::configuration(format!("I/O error: {}", err))
    }
}

impl From<serde_json::Error> for RegviewError {
    fn from(err: serde_json::Error) -> Self {
        Self::configuration(format!("JSON error: {}", err))
    }
}
