//! Value assembly and interpretation for individual fields.

use alloc::{format, string::String};

use thiserror::Error;

use super::schema::{Command, FieldDescriptor, FieldKind, FlightState};

/// Widest field the accumulator can hold, in bytes.
pub const MAX_WIDTH: u8 = 4;

/// A field descriptor that cannot be decoded.
///
/// This indicates a bug in a field table, not a corrupt stream.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaError {
    #[error("Unsupported width ({width}) for field {name}.")]
    Width { name: &'static str, width: u8 },
}

/// Place `byte` at little-endian position `rank` of the accumulator.
///
/// The caller guarantees `rank` is below the field width.
pub fn accumulate(accumulator: u32, byte: u8, rank: u8) -> u32 {
    accumulator | (byte as u32) << (8 * rank as u32)
}

/// Interpret the low `byte_width` bytes of `value` as two's complement.
pub fn sign_extend(value: u32, byte_width: u8) -> i32 {
    let shift = 32 - 8 * byte_width.clamp(1, MAX_WIDTH) as u32;
    ((value << shift) as i32) >> shift
}

/// The typed result of interpreting a field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outcome {
    /// A command field, if the value named a known command.
    Command(Option<Command>),
    /// A flight state field, if the value named a known state.
    FlightState(Option<FlightState>),
    /// A scaled value in the field's unit.
    Scaled(f64),
    /// An unscaled, unsigned number.
    Number(u32),
}

/// A field value rendered for display.
#[derive(Debug, Clone, PartialEq)]
pub struct Interpretation {
    pub text: String,
    pub outcome: Outcome,
}

/// Interpret an assembled field value according to its descriptor.
pub fn interpret(field: &FieldDescriptor, value: u32) -> Result<Interpretation, SchemaError> {
    if field.byte_width == 0 || field.byte_width > MAX_WIDTH {
        Err(SchemaError::Width {
            name: field.name,
            width: field.byte_width,
        })?;
    }

    let (text, outcome) = match field.kind {
        FieldKind::Command => {
            let command = Command::from_raw(value);
            let text = match command {
                Some(c) => format!("Cmd {}", c.name()),
                None => String::from("Unknown Command"),
            };
            (text, Outcome::Command(command))
        }
        FieldKind::FlightState => {
            let state = FlightState::from_raw(value);
            let text = match state {
                Some(s) => format!("{} = {}", field.name, s.name()),
                None => String::from("invalid flight state"),
            };
            (text, Outcome::FlightState(state))
        }
        FieldKind::UnsignedScaled { scale, unit } => {
            let scaled = scale.apply(value as f64);
            (format!("{} = {} {}", field.name, scaled, unit), Outcome::Scaled(scaled))
        }
        FieldKind::SignedScaled { scale, unit } => {
            let scaled = scale.apply(sign_extend(value, field.byte_width) as f64);
            (format!("{} = {} {}", field.name, scaled, unit), Outcome::Scaled(scaled))
        }
        FieldKind::RawNumber => (format!("{} = {}", field.name, value), Outcome::Number(value)),
    };

    Ok(Interpretation { text, outcome })
}
