//! # Modbus Regview - Named Register Access for Serial Modbus Devices
//!
//! Reads and writes coils and registers on a Modbus device and presents the
//! result as named, formatted rows.
//!
//! ## Features
//!
//! - **Mixed-base input**: `b1010`, `0xFF` and `42` are all valid tokens
//! - **Byte order**: register words shown and written in the device's byte order
//! - **Named registers**: addresses resolved through a JSON name table
//! - **Tabular output**: decimal, hex and grouped binary columns, or JSON
//! - **Pluggable transport**: any `voltage_modbus` client, or a test fake
//!
//! ## Supported Function Codes
//!
//! | Code | Function | Rows |
//! |------|----------|------|
//! | 0x01 | Read Coils | `C<n>` |
//! | 0x02 | Read Discrete Inputs | `DI<n>` |
//! | 0x03 | Read Holding Registers | `HR<n>` |
//! | 0x04 | Read Input Registers | `IR<n>` |
//! | 0x0F | Write Multiple Coils | |
//! | 0x10 | Write Multiple Registers | |
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! # #[cfg(feature = "rtu")]
//! # async fn example() -> modbus_regview::RegviewResult<()> {
//! use std::sync::Arc;
//! use modbus_regview::{render_table, ClientTransport, RegisterAccessService, SessionConfig};
//!
//! let config = SessionConfig::from_json_file("regview.json")?;
//! let names = Arc::new(config.load_name_table()?);
//! let transport = ClientTransport::open_serial(&config.serial, config.slave_id)?;
//! let mut service = RegisterAccessService::from_config(transport, &config, names);
//!
//! // Read 4 holding registers starting at 0x0004
//! let rows = service.read_command("0x03", "0x0004 4").await?;
//! print!("{}", render_table(&rows));
//!
//! // Write two holding registers
//! service.write_command("0x10", "0x0004 1 0xFF").await?;
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Core modules
// ============================================================================

/// Error types and result handling
pub mod error;

/// Function codes, prefixes and defaults
pub mod constants;

/// Register classes and function codes
pub mod protocol;

/// Register values
pub mod value;

/// Byte order of register words
pub mod bytes;

/// Token parsing and write encoding
pub mod codec;

/// Address name table
pub mod names;

/// Row building and table rendering
pub mod format;

/// Transport seam and `voltage_modbus` adapter
pub mod transport;

/// Read/write orchestration
pub mod service;

/// Session configuration
pub mod config;

// ============================================================================
// Re-exports for convenience
// ============================================================================

// === Service API ===
pub use service::{parse_function, Outcome, RegisterAccessService};
pub use transport::{ClientTransport, RegisterTransport};

// === Error handling ===
pub use error::{RegviewError, RegviewResult, TransportError};

// === Core types ===
pub use bytes::Endianness;
pub use names::NameTable;
pub use protocol::{Direction, FunctionCode, RegisterClass};
pub use value::RegisterValue;

// === Parsing and formatting ===
pub use codec::{parse_address, parse_quantity, parse_value};
pub use format::{build_row, render_table, to_binary_display, to_hex_display, ResultRow, RowValue};

// === Configuration ===
pub use config::{Parity, SerialConfig, SessionConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
