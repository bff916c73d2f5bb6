//! Register access service
//!
//! Orchestrates one read or write against a [`RegisterTransport`]: validate the
//! request, call the matching primitive, then for reads apply the session byte
//! order, resolve names and build display rows.
//!
//! # Entry Points
//!
//! | Method | Input |
//! |--------|-------|
//! | [`read`](RegisterAccessService::read) | typed function, start, quantity |
//! | [`write`](RegisterAccessService::write) | typed function, start, parsed values |
//! | [`read_command`](RegisterAccessService::read_command) | `"0x03"`, `"<address> [quantity]"` |
//! | [`write_command`](RegisterAccessService::write_command) | `"0x10"`, `"<address> <v1> [v2 ...]"` |
//! | [`execute`](RegisterAccessService::execute) | either of the above, dispatched on the code |
//!
//! Every call is independent. Nothing is retried here; retry policy, if any,
//! belongs to the transport.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::bytes::Endianness;
use crate::codec::{
    encode_coil_values, encode_register_values, parse_address, parse_quantity, parse_value,
    parse_values,
};
use crate::config::SessionConfig;
use crate::error::{RegviewError, RegviewResult, TransportError};
use crate::format::{build_row, to_hex_display, ResultRow};
use crate::names::NameTable;
use crate::protocol::{Direction, FunctionCode, RegisterClass};
use crate::transport::RegisterTransport;
use crate::value::RegisterValue;

/// Result of [`RegisterAccessService::execute`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Rows of a completed read, in address order
    Rows(Vec<ResultRow>),
    /// A completed write
    Written {
        function: FunctionCode,
        address: u16,
        count: usize,
    },
}

/// Parse a function code token into one of the six supported operations.
///
/// Non-numeric text and negative or huge numbers are `InvalidInput`; any other
/// number outside the supported set is `UnsupportedOperation` carrying that
/// number.
pub fn parse_function(token: &str) -> RegviewResult<FunctionCode> {
    let value = parse_value(token)?;
    let code = u32::try_from(value).map_err(|_| {
        RegviewError::invalid_input(format!("function code {} is out of range", value))
    })?;
    match u8::try_from(code) {
        Ok(code) => FunctionCode::try_from(code),
        Err(_) => Err(RegviewError::unsupported(code, "function code is not supported")),
    }
}

/// Stateless read/write orchestration over one transport.
pub struct RegisterAccessService<T: RegisterTransport> {
    transport: T,
    endianness: Endianness,
    names: Arc<NameTable>,
    default_quantity: u16,
}

impl<T: RegisterTransport> RegisterAccessService<T> {
    /// Create a service with an empty name table and default quantity.
    pub fn new(transport: T, endianness: Endianness) -> Self {
        Self {
            transport,
            endianness,
            names: Arc::new(NameTable::new()),
            default_quantity: SessionConfig::default().default_quantity,
        }
    }

    /// Create a service from session settings and a loaded name table.
    pub fn from_config(transport: T, config: &SessionConfig, names: Arc<NameTable>) -> Self {
        Self {
            transport,
            endianness: config.endianness,
            names,
            default_quantity: config.default_quantity,
        }
    }

    /// Use a shared name table.
    pub fn with_names(mut self, names: Arc<NameTable>) -> Self {
        self.names = names;
        self
    }

    /// Quantity used by [`read_command`](Self::read_command) when none is given.
    pub fn with_default_quantity(mut self, quantity: u16) -> Self {
        self.default_quantity = quantity.max(1);
        self
    }

    pub fn endianness(&self) -> Endianness {
        self.endianness
    }

    pub fn names(&self) -> &NameTable {
        &self.names
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    pub fn into_transport(self) -> T {
        self.transport
    }

    // ===== Typed operations =====

    /// Read `quantity` values starting at `start` and build display rows.
    ///
    /// The range must end at or before `0xFFFF`. Extra values from the
    /// transport are dropped; missing values are a transport error. No rows
    /// are returned unless the whole read succeeds.
    pub async fn read(
        &mut self,
        function: FunctionCode,
        start: u16,
        quantity: u16,
    ) -> RegviewResult<Vec<ResultRow>> {
        if function.direction() != Direction::Read {
            return Err(not_a_read(function));
        }
        if quantity == 0 {
            return Err(RegviewError::invalid_input("quantity must be at least 1"));
        }
        if u32::from(start) + u32::from(quantity) > 0x1_0000 {
            return Err(RegviewError::invalid_input(format!(
                "{} value(s) from {} run past address 0xFFFF",
                quantity,
                to_hex_display(start)
            )));
        }

        let class = function.class();
        debug!("{} start={} quantity={}", function, start, quantity);

        let values: Vec<RegisterValue> = match function {
            FunctionCode::ReadCoils => {
                let bits = self.transport.read_coils(start, quantity).await?;
                checked_take(bits, quantity, class)?
                    .into_iter()
                    .map(RegisterValue::from)
                    .collect()
            }
            FunctionCode::ReadDiscreteInputs => {
                let bits = self.transport.read_discrete_inputs(start, quantity).await?;
                checked_take(bits, quantity, class)?
                    .into_iter()
                    .map(RegisterValue::from)
                    .collect()
            }
            FunctionCode::ReadHoldingRegisters => {
                let words = self.transport.read_holding_registers(start, quantity).await?;
                self.decode_words(checked_take(words, quantity, class)?)
            }
            FunctionCode::ReadInputRegisters => {
                let words = self.transport.read_input_registers(start, quantity).await?;
                self.decode_words(checked_take(words, quantity, class)?)
            }
            FunctionCode::WriteCoils | FunctionCode::WriteRegisters => {
                return Err(not_a_read(function))
            }
        };

        let rows = values
            .into_iter()
            .enumerate()
            .map(|(index, value)| {
                let name = self.names.resolve(class, start + index as u16);
                build_row(class, start, index, name, value)
            })
            .collect();
        Ok(rows)
    }

    /// Write `values` starting at `start`.
    ///
    /// Coil values are nonzero-is-true. Register values are display form and
    /// must fit in 16 bits; the session byte order is applied before sending.
    pub async fn write(
        &mut self,
        function: FunctionCode,
        start: u16,
        values: &[i64],
    ) -> RegviewResult<()> {
        if function.direction() != Direction::Write {
            return Err(not_a_write(function));
        }
        if values.is_empty() {
            return Err(RegviewError::invalid_input(
                "a write needs at least one value",
            ));
        }

        debug!("{} start={} count={}", function, start, values.len());

        match function {
            FunctionCode::WriteCoils => {
                let coils = encode_coil_values(values);
                self.transport.write_coils(start, &coils).await?;
            }
            FunctionCode::WriteRegisters => {
                let words = encode_register_values(values, self.endianness)?;
                self.transport.write_registers(start, &words).await?;
            }
            _ => return Err(not_a_write(function)),
        }

        info!(
            "Wrote {} {}(s) at {}",
            values.len(),
            function.class(),
            to_hex_display(start)
        );
        Ok(())
    }

    // ===== Raw token entry points =====

    /// Read using raw tokens: `args` is `"<address> [quantity]"`.
    pub async fn read_command(
        &mut self,
        function: &str,
        args: &str,
    ) -> RegviewResult<Vec<ResultRow>> {
        let function = parse_function(function)?;
        if function.direction() != Direction::Read {
            return Err(not_a_read(function));
        }
        let (start, quantity) = self.parse_read_args(args)?;
        self.read(function, start, quantity).await
    }

    /// Write using raw tokens: `args` is `"<address> <v1> [v2 ...]"`.
    pub async fn write_command(&mut self, function: &str, args: &str) -> RegviewResult<()> {
        let function = parse_function(function)?;
        if function.direction() != Direction::Write {
            return Err(not_a_write(function));
        }
        let (start, values) = parse_write_args(args)?;
        self.write(function, start, &values).await
    }

    /// Run one raw command, reading or writing depending on the function code.
    pub async fn execute(&mut self, function: &str, args: &str) -> RegviewResult<Outcome> {
        let function = parse_function(function)?;
        match function.direction() {
            Direction::Read => {
                let (start, quantity) = self.parse_read_args(args)?;
                Ok(Outcome::Rows(self.read(function, start, quantity).await?))
            }
            Direction::Write => {
                let (address, values) = parse_write_args(args)?;
                self.write(function, address, &values).await?;
                Ok(Outcome::Written {
                    function,
                    address,
                    count: values.len(),
                })
            }
        }
    }

    fn parse_read_args(&self, args: &str) -> RegviewResult<(u16, u16)> {
        let tokens: Vec<&str> = args.split_whitespace().collect();
        match tokens.as_slice() {
            [address] => Ok((parse_address(address)?, self.default_quantity)),
            [address, quantity] => Ok((parse_address(address)?, parse_quantity(quantity)?)),
            [] => Err(RegviewError::invalid_input("missing start address")),
            _ => Err(RegviewError::invalid_input(
                "expected '<address> [quantity]'",
            )),
        }
    }

    fn decode_words(&self, words: Vec<u16>) -> Vec<RegisterValue> {
        words
            .into_iter()
            .map(|w| RegisterValue::from(self.endianness.convert(w)))
            .collect()
    }
}

fn parse_write_args(args: &str) -> RegviewResult<(u16, Vec<i64>)> {
    let tokens: Vec<&str> = args.split_whitespace().collect();
    let (address, rest) = tokens
        .split_first()
        .ok_or_else(|| RegviewError::invalid_input("missing start address"))?;
    Ok((parse_address(address)?, parse_values(rest)?))
}

fn not_a_read(function: FunctionCode) -> RegviewError {
    RegviewError::unsupported(
        u32::from(function.to_u8()),
        format!("{} is not a read operation", function.description()),
    )
}

fn not_a_write(function: FunctionCode) -> RegviewError {
    RegviewError::unsupported(
        u32::from(function.to_u8()),
        format!("{} is not a write operation", function.description()),
    )
}

/// Keep exactly `quantity` values; fewer is a transport error.
fn checked_take<V>(
    mut values: Vec<V>,
    quantity: u16,
    class: RegisterClass,
) -> RegviewResult<Vec<V>> {
    let wanted = quantity as usize;
    if values.len() < wanted {
        return Err(TransportError::new(format!(
            "expected {} {} value(s), device returned {}",
            wanted,
            class,
            values.len()
        ))
        .into());
    }
    if values.len() > wanted {
        warn!(
            "Transport returned {} {} value(s) for {} requested, truncating",
            values.len(),
            class,
            wanted
        );
        values.truncate(wanted);
    }
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_function() {
        assert_eq!(parse_function("3").unwrap(), FunctionCode::ReadHoldingRegisters);
        assert_eq!(parse_function("0x0F").unwrap(), FunctionCode::WriteCoils);
        assert_eq!(parse_function("b10000").unwrap(), FunctionCode::WriteRegisters);
        assert!(parse_function("0x05").unwrap_err().is_unsupported());
        assert!(parse_function("256").unwrap_err().is_unsupported());
        assert!(parse_function("read").unwrap_err().is_invalid_input());
        assert!(parse_function("-1").unwrap_err().is_invalid_input());
    }

    #[test]
    fn test_parse_function_keeps_wide_code() {
        let err = parse_function("0x103").unwrap_err();
        assert!(matches!(
            err,
            RegviewError::UnsupportedOperation { code: 0x103, .. }
        ));
        assert_eq!(
            err.to_string(),
            "Unsupported operation 0x103: function code is not supported"
        );
    }

    #[test]
    fn test_checked_take() {
        assert_eq!(
            checked_take(vec![1, 2, 3], 2, RegisterClass::HoldingRegister).unwrap(),
            vec![1, 2]
        );
        assert_eq!(
            checked_take(vec![true], 1, RegisterClass::Coil).unwrap(),
            vec![true]
        );
        let err = checked_take(vec![1], 2, RegisterClass::InputRegister).unwrap_err();
        assert!(err.is_transport());
    }
}
