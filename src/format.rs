//! Display formatting for result rows
//!
//! Rows come out in a fixed shape: `HR5 | 0x0004 | NAME | 255 | 0x00FF | 0000 0000 1111 1111 `.
//! The hex and binary helpers always render 16 bits.

use serde::Serialize;

use crate::constants::{BINARY_DISPLAY_BITS, BINARY_GROUP_BITS, HEX_DISPLAY_DIGITS};
use crate::protocol::RegisterClass;
use crate::value::RegisterValue;

/// `0x` followed by 4 zero-padded uppercase hex digits.
///
/// ```rust
/// use modbus_regview::to_hex_display;
///
/// assert_eq!(to_hex_display(4), "0x0004");
/// assert_eq!(to_hex_display(65535), "0xFFFF");
/// ```
pub fn to_hex_display(n: u16) -> String {
    format!("0x{:0width$X}", n, width = HEX_DISPLAY_DIGITS)
}

/// 16-bit binary in groups of four, each group followed by one space.
///
/// The trailing space is part of the format.
///
/// ```rust
/// use modbus_regview::to_binary_display;
///
/// assert_eq!(to_binary_display(255), "0000 0000 1111 1111 ");
/// ```
pub fn to_binary_display(n: u16) -> String {
    let bits = format!("{:0width$b}", n, width = BINARY_DISPLAY_BITS);
    let mut out = String::with_capacity(bits.len() + bits.len() / BINARY_GROUP_BITS);
    for (i, c) in bits.chars().enumerate() {
        out.push(c);
        if (i + 1) % BINARY_GROUP_BITS == 0 {
            out.push(' ');
        }
    }
    out
}

/// Value columns of a row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum RowValue {
    /// Coil or discrete input
    Bit { value: bool },
    /// Holding or input register
    Register {
        decimal: u16,
        hex: String,
        binary: String,
    },
}

/// One displayed register, coil or input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultRow {
    /// Class prefix plus 1-based index, e.g. `HR5`
    pub id: String,
    /// Address in display form, e.g. `0x0004`
    pub address: String,
    /// Symbolic name, empty when the table has none
    pub name: String,
    #[serde(flatten)]
    pub value: RowValue,
}

/// Assemble the row for the `index`-th value of a read starting at `start`.
///
/// Register words must already be in display byte order. Addresses past
/// `0xFFFF` are rendered without wrapping; the service never requests them.
pub fn build_row(
    class: RegisterClass,
    start: u16,
    index: usize,
    name: &str,
    value: RegisterValue,
) -> ResultRow {
    let address = u32::from(start) + index as u32;
    let address_display = match u16::try_from(address) {
        Ok(a) => to_hex_display(a),
        Err(_) => format!("0x{:0width$X}", address, width = HEX_DISPLAY_DIGITS),
    };

    let value = match value {
        RegisterValue::Bit(value) => RowValue::Bit { value },
        RegisterValue::Word(word) => RowValue::Register {
            decimal: word,
            hex: to_hex_display(word),
            binary: to_binary_display(word),
        },
    };

    ResultRow {
        id: format!("{}{}", class.prefix(), address + 1),
        address: address_display,
        name: name.to_string(),
        value,
    }
}

/// Render rows as an aligned text table.
///
/// Bit rows use the columns `ID | Address | Name | Value`; register rows add
/// `Decimal | Hex | Binary`. Output is identical for identical input.
pub fn render_table(rows: &[ResultRow]) -> String {
    if rows.is_empty() {
        return String::new();
    }

    let registers = rows
        .iter()
        .any(|r| matches!(r.value, RowValue::Register { .. }));
    let header: Vec<&str> = if registers {
        vec!["ID", "Address", "Name", "Decimal", "Hex", "Binary"]
    } else {
        vec!["ID", "Address", "Name", "Value"]
    };

    let body: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            let mut cells = vec![row.id.clone(), row.address.clone(), row.name.clone()];
            match &row.value {
                RowValue::Bit { value } => {
                    cells.push(value.to_string());
                    if registers {
                        cells.push(String::new());
                        cells.push(String::new());
                    }
                }
                RowValue::Register {
                    decimal,
                    hex,
                    binary,
                } => {
                    cells.push(decimal.to_string());
                    cells.push(hex.clone());
                    cells.push(binary.trim_end().to_string());
                }
            }
            cells
        })
        .collect();

    let mut widths: Vec<usize> = header.iter().map(|h| h.len()).collect();
    for cells in &body {
        for (w, cell) in widths.iter_mut().zip(cells) {
            *w = (*w).max(cell.len());
        }
    }

    let mut out = String::new();
    push_line(&mut out, header.iter().copied(), &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_line(&mut out, rule.iter().map(String::as_str), &widths);
    for cells in &body {
        push_line(&mut out, cells.iter().map(String::as_str), &widths);
    }
    out
}

fn push_line<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>, widths: &[usize]) {
    let line = cells
        .zip(widths)
        .map(|(cell, w)| format!("{:<width$}", cell, width = *w))
        .collect::<Vec<_>>()
        .join(" | ");
    out.push_str(line.trim_end());
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_hex_display() {
        assert_eq!(to_hex_display(0), "0x0000");
        assert_eq!(to_hex_display(4), "0x0004");
        assert_eq!(to_hex_display(0xABC), "0x0ABC");
        assert_eq!(to_hex_display(65535), "0xFFFF");
    }

    #[test]
    fn test_binary_display() {
        assert_eq!(to_binary_display(255), "0000 0000 1111 1111 ");
        assert_eq!(to_binary_display(0), "0000 0000 0000 0000 ");
        assert_eq!(to_binary_display(0x8001), "1000 0000 0000 0001 ");
        assert_eq!(to_binary_display(65535), "1111 1111 1111 1111 ");
    }

    #[test]
    fn test_build_register_row() {
        let row = build_row(
            RegisterClass::HoldingRegister,
            4,
            0,
            "MODE",
            RegisterValue::Word(255),
        );
        assert_eq!(row.id, "HR5");
        assert_eq!(row.address, "0x0004");
        assert_eq!(row.name, "MODE");
        assert_eq!(
            row.value,
            RowValue::Register {
                decimal: 255,
                hex: "0x00FF".to_string(),
                binary: "0000 0000 1111 1111 ".to_string(),
            }
        );
    }

    #[test]
    fn test_build_bit_row() {
        let row = build_row(RegisterClass::DiscreteInput, 0, 2, "", RegisterValue::Bit(true));
        assert_eq!(row.id, "DI3");
        assert_eq!(row.address, "0x0002");
        assert_eq!(row.name, "");
        assert_eq!(row.value, RowValue::Bit { value: true });
    }

    #[test]
    fn test_build_row_at_top_of_address_space() {
        let row = build_row(RegisterClass::Coil, 0xFFFF, 0, "", RegisterValue::Bit(false));
        assert_eq!(row.id, "C65536");
        assert_eq!(row.address, "0xFFFF");
    }

    #[test]
    fn test_render_register_table() {
        let rows = vec![
            build_row(RegisterClass::InputRegister, 0, 0, "TEMP", RegisterValue::Word(1)),
            build_row(RegisterClass::InputRegister, 0, 1, "", RegisterValue::Word(256)),
        ];
        let expected = "\
ID  | Address | Name | Decimal | Hex    | Binary
--- | ------- | ---- | ------- | ------ | -------------------
IR1 | 0x0000  | TEMP | 1       | 0x0001 | 0000 0000 0000 0001
IR2 | 0x0001  |      | 256     | 0x0100 | 0000 0001 0000 0000
";
        assert_eq!(render_table(&rows), expected);
    }

    #[test]
    fn test_render_bit_table() {
        let rows = vec![
            build_row(RegisterClass::Coil, 9, 0, "PUMP", RegisterValue::Bit(true)),
            build_row(RegisterClass::Coil, 9, 1, "", RegisterValue::Bit(false)),
        ];
        let expected = "\
ID  | Address | Name | Value
--- | ------- | ---- | -----
C10 | 0x0009  | PUMP | true
C11 | 0x000A  |      | false
";
        assert_eq!(render_table(&rows), expected);
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(render_table(&[]), "");
    }

    #[test]
    fn test_row_serializes_flat() {
        let row = build_row(RegisterClass::Coil, 0, 0, "RUN", RegisterValue::Bit(true));
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": "C1", "address": "0x0000", "name": "RUN", "value": true})
        );

        let row = build_row(RegisterClass::HoldingRegister, 0, 0, "", RegisterValue::Word(2));
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["decimal"], 2);
        assert_eq!(json["hex"], "0x0002");
        assert_eq!(json["binary"], "0000 0000 0000 0010 ");
    }

    proptest! {
        #[test]
        fn prop_hex_display_parses_back(n in any::<u16>()) {
            let s = to_hex_display(n);
            prop_assert_eq!(s.len(), 6);
            prop_assert_eq!(u16::from_str_radix(&s[2..], 16).unwrap(), n);
        }

        #[test]
        fn prop_binary_display_shape(n in any::<u16>()) {
            let s = to_binary_display(n);
            prop_assert_eq!(s.len(), 20);
            prop_assert!(s.ends_with(' '));
            let digits: String = s.chars().filter(|c| *c != ' ').collect();
            prop_assert_eq!(u16::from_str_radix(&digits, 2).unwrap(), n);
        }
    }
}
