//! LDmicro Interpretable Opcodes.
//!
//! Numeric opcode values as written by the compiler into each record's first field.
//! The conditional group (`50..=54`) is named after the compiler's intermediate
//! code: each one jumps when its condition is *false*.

/// `bits[a] := 1`
pub const SET_BIT: u16 = 1;
/// `bits[a] := 0`
pub const CLEAR_BIT: u16 = 2;
/// `bits[a] := bits[b]`
pub const COPY_BIT_TO_BIT: u16 = 3;
/// `int16s[a] := literal`
pub const SET_VARIABLE_TO_LITERAL: u16 = 4;
/// `int16s[a] := int16s[b]`
pub const SET_VARIABLE_TO_VARIABLE: u16 = 5;
/// `int16s[a]++`
pub const INCREMENT_VARIABLE: u16 = 6;
/// `int16s[a] := int16s[b] + int16s[c]`
pub const SET_VARIABLE_ADD: u16 = 7;
/// `int16s[a] := int16s[b] - int16s[c]`
pub const SET_VARIABLE_SUBTRACT: u16 = 8;
/// `int16s[a] := int16s[b] * int16s[c]`
pub const SET_VARIABLE_MULTIPLY: u16 = 9;
/// `int16s[a] := int16s[b] / int16s[c]`, skipped when the divisor is zero.
pub const SET_VARIABLE_DIVIDE: u16 = 10;

/// Peripheral: analog read. Not executable by the interpreter.
pub const READ_ADC: u16 = 11;
/// Peripheral: PWM duty update. Not executable by the interpreter.
pub const SET_PWM: u16 = 12;
/// Peripheral: UART transmit. Not executable by the interpreter.
pub const UART_SEND: u16 = 13;
/// Peripheral: UART receive. Not executable by the interpreter.
pub const UART_RECV: u16 = 14;
/// Peripheral: EEPROM busy poll. Not executable by the interpreter.
pub const EEPROM_BUSY_CHECK: u16 = 15;
/// Peripheral: EEPROM read. Not executable by the interpreter.
pub const EEPROM_READ: u16 = 16;
/// Peripheral: EEPROM write. Not executable by the interpreter.
pub const EEPROM_WRITE: u16 = 17;

/// Jumps when `bits[a]` is clear.
pub const IF_BIT_SET: u16 = 50;
/// Jumps when `bits[a]` is set.
pub const IF_BIT_CLEAR: u16 = 51;
/// Jumps unless `int16s[a] < literal`.
pub const IF_VARIABLE_LES_LITERAL: u16 = 52;
/// Jumps unless `int16s[a] == int16s[b]`.
pub const IF_VARIABLE_EQUALS_VARIABLE: u16 = 53;
/// Jumps unless `int16s[a] > int16s[b]`.
pub const IF_VARIABLE_GRT_VARIABLE: u16 = 54;

/// Unconditional jump.
pub const ELSE: u16 = 60;

/// End-of-cycle marker.
pub const END_OF_PROGRAM: u16 = 255;

/// Returns the compiler name of a peripheral opcode, or `None` if `op` is not one.
pub const fn peripheral_name(op: u16) -> Option<&'static str> {
    match op {
        READ_ADC => Some("READ_ADC"),
        SET_PWM => Some("SET_PWM"),
        UART_SEND => Some("UART_SEND"),
        UART_RECV => Some("UART_RECV"),
        EEPROM_BUSY_CHECK => Some("EEPROM_BUSY_CHECK"),
        EEPROM_READ => Some("EEPROM_READ"),
        EEPROM_WRITE => Some("EEPROM_WRITE"),
        _ => None,
    }
}
