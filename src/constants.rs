//! Function codes, display prefixes and defaults
//!
//! Only the six function codes the register console dispatches are listed here.
//! Single-write codes (FC05/FC06) are not dispatched; writes always go
//! through the multiple-write primitives, even for one value.

// ============================================================================
// Modbus Function Codes
// ============================================================================

/// Read Coils (FC01)
pub const FC_READ_COILS: u8 = 0x01;

/// Read Discrete Inputs (FC02)
pub const FC_READ_DISCRETE_INPUTS: u8 = 0x02;

/// Read Holding Registers (FC03)
pub const FC_READ_HOLDING_REGISTERS: u8 = 0x03;

/// Read Input Registers (FC04)
pub const FC_READ_INPUT_REGISTERS: u8 = 0x04;

/// Write Multiple Coils (FC15)
pub const FC_WRITE_MULTIPLE_COILS: u8 = 0x0F;

/// Write Multiple Registers (FC16)
pub const FC_WRITE_MULTIPLE_REGISTERS: u8 = 0x10;

// ============================================================================
// Display
// ============================================================================

/// Row id prefix for coils
pub const PREFIX_COIL: &str = "C";

/// Row id prefix for discrete inputs
pub const PREFIX_DISCRETE_INPUT: &str = "DI";

/// Row id prefix for holding registers
pub const PREFIX_HOLDING_REGISTER: &str = "HR";

/// Row id prefix for input registers
pub const PREFIX_INPUT_REGISTER: &str = "IR";

/// Hex digits in the address display form (`0x0004`)
pub const HEX_DISPLAY_DIGITS: usize = 4;

/// Bits shown in the binary display form
pub const BINARY_DISPLAY_BITS: usize = 16;

/// Bits per group in the binary display form
pub const BINARY_GROUP_BITS: usize = 4;

// ============================================================================
// Session Defaults
// ============================================================================

/// Default Modbus unit identifier
pub const DEFAULT_SLAVE_ID: u8 = 1;

/// Registers/coils read when the caller omits a quantity
pub const DEFAULT_READ_QUANTITY: u16 = 10;

/// Default serial device
pub const DEFAULT_SERIAL_PORT: &str = "/dev/ttyUSB0";

/// Default serial baud rate
pub const DEFAULT_BAUD_RATE: u32 = 9600;

/// Default serial data bits
pub const DEFAULT_DATA_BITS: u8 = 8;

/// Default serial stop bits
pub const DEFAULT_STOP_BITS: u8 = 1;

/// Default transport timeout in milliseconds
pub const DEFAULT_TIMEOUT_MS: u64 = 1000;
