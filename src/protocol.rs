//! Register classes and the function codes that address them
//!
//! Each [`FunctionCode`] carries its [`RegisterClass`] and [`Direction`], so
//! read/write dispatch and row display all switch on one closed type.
//!
//! | Code | Function | Class | Prefix |
//! |------|----------|-------|--------|
//! | 0x01 | Read Coils | Coil | C |
//! | 0x02 | Read Discrete Inputs | DiscreteInput | DI |
//! | 0x03 | Read Holding Registers | HoldingRegister | HR |
//! | 0x04 | Read Input Registers | InputRegister | IR |
//! | 0x0F | Write Multiple Coils | Coil | C |
//! | 0x10 | Write Multiple Registers | HoldingRegister | HR |

use std::fmt;

use crate::constants::{
    FC_READ_COILS, FC_READ_DISCRETE_INPUTS, FC_READ_HOLDING_REGISTERS, FC_READ_INPUT_REGISTERS,
    FC_WRITE_MULTIPLE_COILS, FC_WRITE_MULTIPLE_REGISTERS, PREFIX_COIL, PREFIX_DISCRETE_INPUT,
    PREFIX_HOLDING_REGISTER, PREFIX_INPUT_REGISTER,
};
use crate::error::{RegviewError, RegviewResult};

/// The four Modbus data tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RegisterClass {
    /// Single-bit read/write output
    Coil,
    /// Single-bit read-only input
    DiscreteInput,
    /// 16-bit read/write register
    HoldingRegister,
    /// 16-bit read-only register
    InputRegister,
}

impl RegisterClass {
    pub const ALL: [RegisterClass; 4] = [
        RegisterClass::Coil,
        RegisterClass::DiscreteInput,
        RegisterClass::HoldingRegister,
        RegisterClass::InputRegister,
    ];

    /// Row id prefix ("C", "DI", "HR", "IR").
    #[inline]
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::Coil => PREFIX_COIL,
            Self::DiscreteInput => PREFIX_DISCRETE_INPUT,
            Self::HoldingRegister => PREFIX_HOLDING_REGISTER,
            Self::InputRegister => PREFIX_INPUT_REGISTER,
        }
    }

    /// True for coils and discrete inputs.
    #[inline]
    pub fn is_bit(&self) -> bool {
        matches!(self, Self::Coil | Self::DiscreteInput)
    }

    /// Function code reading this class.
    pub fn read_function(&self) -> FunctionCode {
        match self {
            Self::Coil => FunctionCode::ReadCoils,
            Self::DiscreteInput => FunctionCode::ReadDiscreteInputs,
            Self::HoldingRegister => FunctionCode::ReadHoldingRegisters,
            Self::InputRegister => FunctionCode::ReadInputRegisters,
        }
    }

    /// Function code writing this class, if the class is writable.
    pub fn write_function(&self) -> Option<FunctionCode> {
        match self {
            Self::Coil => Some(FunctionCode::WriteCoils),
            Self::HoldingRegister => Some(FunctionCode::WriteRegisters),
            Self::DiscreteInput | Self::InputRegister => None,
        }
    }

    /// Key used for this class in name table files.
    pub fn table_key(&self) -> &'static str {
        match self {
            Self::Coil => "coils",
            Self::DiscreteInput => "discrete_inputs",
            Self::HoldingRegister => "holding_registers",
            Self::InputRegister => "input_registers",
        }
    }
}

impl fmt::Display for RegisterClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Coil => "coil",
            Self::DiscreteInput => "discrete input",
            Self::HoldingRegister => "holding register",
            Self::InputRegister => "input register",
        };
        f.write_str(name)
    }
}

/// Whether a function code reads or writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Read,
    Write,
}

/// The six supported operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FunctionCode {
    /// FC01
    ReadCoils,
    /// FC02
    ReadDiscreteInputs,
    /// FC03
    ReadHoldingRegisters,
    /// FC04
    ReadInputRegisters,
    /// FC15
    WriteCoils,
    /// FC16
    WriteRegisters,
}

impl FunctionCode {
    pub const ALL: [FunctionCode; 6] = [
        FunctionCode::ReadCoils,
        FunctionCode::ReadDiscreteInputs,
        FunctionCode::ReadHoldingRegisters,
        FunctionCode::ReadInputRegisters,
        FunctionCode::WriteCoils,
        FunctionCode::WriteRegisters,
    ];

    /// Map a raw code onto a supported operation.
    pub fn from_u8(code: u8) -> Option<Self> {
        match code {
            FC_READ_COILS => Some(Self::ReadCoils),
            FC_READ_DISCRETE_INPUTS => Some(Self::ReadDiscreteInputs),
            FC_READ_HOLDING_REGISTERS => Some(Self::ReadHoldingRegisters),
            FC_READ_INPUT_REGISTERS => Some(Self::ReadInputRegisters),
            FC_WRITE_MULTIPLE_COILS => Some(Self::WriteCoils),
            FC_WRITE_MULTIPLE_REGISTERS => Some(Self::WriteRegisters),
            _ => None,
        }
    }

    #[inline]
    pub fn to_u8(self) -> u8 {
        match self {
            Self::ReadCoils => FC_READ_COILS,
            Self::ReadDiscreteInputs => FC_READ_DISCRETE_INPUTS,
            Self::ReadHoldingRegisters => FC_READ_HOLDING_REGISTERS,
            Self::ReadInputRegisters => FC_READ_INPUT_REGISTERS,
            Self::WriteCoils => FC_WRITE_MULTIPLE_COILS,
            Self::WriteRegisters => FC_WRITE_MULTIPLE_REGISTERS,
        }
    }

    #[inline]
    pub fn class(self) -> RegisterClass {
        match self {
            Self::ReadCoils | Self::WriteCoils => RegisterClass::Coil,
            Self::ReadDiscreteInputs => RegisterClass::DiscreteInput,
            Self::ReadHoldingRegisters | Self::WriteRegisters => RegisterClass::HoldingRegister,
            Self::ReadInputRegisters => RegisterClass::InputRegister,
        }
    }

    #[inline]
    pub fn direction(self) -> Direction {
        match self {
            Self::WriteCoils | Self::WriteRegisters => Direction::Write,
            _ => Direction::Read,
        }
    }

    #[inline]
    pub fn is_read(self) -> bool {
        self.direction() == Direction::Read
    }

    /// Human readable operation name.
    pub fn description(self) -> &'static str {
        match self {
            Self::ReadCoils => "Read Coils",
            Self::ReadDiscreteInputs => "Read Discrete Inputs",
            Self::ReadHoldingRegisters => "Read Holding Registers",
            Self::ReadInputRegisters => "Read Input Registers",
            Self::WriteCoils => "Write Multiple Coils",
            Self::WriteRegisters => "Write Multiple Registers",
        }
    }
}

impl TryFrom<u8> for FunctionCode {
    type Error = RegviewError;

    fn try_from(code: u8) -> RegviewResult<Self> {
        Self::from_u8(code)
            .ok_or_else(|| RegviewError::unsupported(u32::from(code), "function code is not supported"))
    }
}

impl fmt::Display for FunctionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:02X} ({})", self.to_u8(), self.description())
    }
}
