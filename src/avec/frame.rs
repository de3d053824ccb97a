//! Typed records for whole transactions.

use alloc::vec::Vec;

use thiserror::Error;
use zerocopy::{
    FromBytes,
    byteorder::little_endian::{I16, U16},
};

use crate::sans::{
    check::is_complement,
    schema::{CENTI, Command, FlightState, SIXTEENTH},
};

/// Errors occurring while parsing a transaction.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FrameError {
    /// The transaction ended inside a field.
    #[error("Transaction ended after {found} bytes, expected {expected}.")]
    Truncated { expected: usize, found: usize },
    /// Bytes followed a frame that expects none.
    #[error("Unexpected data at offset {offset}.")]
    UnexpectedData { offset: usize },
}

/// The header common to every frame.
#[repr(C, packed)]
#[derive(Debug, Clone, Copy, FromBytes)]
pub struct Header {
    command: u8,
    state: u8,
    tick: U16,
    serial: U16,
    flight: U16,
    accel: I16,
    speed: I16,
    height: I16,
    motor: U16,
}

impl Header {
    /// The command, if the wire value names a known one.
    pub fn command(&self) -> Option<Command> {
        Command::from_raw(self.command as u32)
    }

    /// The flight state, if the wire value names a known one.
    pub fn flight_state(&self) -> Option<FlightState> {
        FlightState::from_raw(self.state as u32)
    }

    /// Time since boot, in seconds.
    pub fn tick_s(&self) -> f64 {
        CENTI.apply(self.tick.get() as f64)
    }

    pub fn serial(&self) -> u16 {
        self.serial.get()
    }

    pub fn flight(&self) -> u16 {
        self.flight.get()
    }

    /// Acceleration along the airframe, in m/s^2.
    pub fn accel_mss(&self) -> f64 {
        SIXTEENTH.apply(self.accel.get() as f64)
    }

    /// Speed along the airframe, in m/s.
    pub fn speed_ms(&self) -> f64 {
        SIXTEENTH.apply(self.speed.get() as f64)
    }

    /// Height above the pad, in m.
    pub fn height_m(&self) -> i16 {
        self.height.get()
    }

    pub fn motor(&self) -> u16 {
        self.motor.get()
    }
}

/// The sub-frame following a `SETUP` header.
#[repr(C, packed)]
#[derive(Debug, Clone, Copy, FromBytes)]
pub struct Setup {
    id: U16,
    id_inv: U16,
    update: u8,
    telm: u8,
}

impl Setup {
    pub fn id(&self) -> u16 {
        self.id.get()
    }

    /// Whether the ID matches its transmitted complement.
    pub fn is_consistent(&self) -> bool {
        is_complement(self.id.get(), self.id_inv.get())
    }

    /// Requested telemetry update interval, in seconds.
    pub fn update_s(&self) -> f64 {
        CENTI.apply(self.update as f64)
    }

    pub fn telemetry_type(&self) -> u8 {
        self.telm
    }
}

/// The command-specific part of a frame.
#[derive(Debug, Clone)]
pub enum Body {
    Setup(Setup),
    Fetch(Vec<u16>),
    None,
}

/// A complete transaction.
#[derive(Debug, Clone)]
pub struct Frame {
    pub header: Header,
    pub body: Body,
}

impl Frame {
    /// Parse the host bytes of one transaction.
    pub fn parse(r: &[u8]) -> Result<Self, FrameError> {
        let i = &mut 0; // Offset of the next unread byte.

        let header: Header = zerocopy::transmute!(take::<16>(r, i)?);

        let body = match header.command() {
            Some(Command::Setup) => Body::Setup(zerocopy::transmute!(take::<6>(r, i)?)),
            Some(Command::Fetch) => {
                let mut words = Vec::new();
                while *i < r.len() {
                    words.push(u16::from_le_bytes(take(r, i)?));
                }
                Body::Fetch(words)
            }
            _ => Body::None,
        };

        if *i < r.len() {
            Err(FrameError::UnexpectedData { offset: *i })?;
        }

        Ok(Self { header, body })
    }
}

/// Take an exact number of bytes from an offset in a slice, advancing the offset.
fn take<const N: usize>(r: &[u8], i: &mut usize) -> Result<[u8; N], FrameError> {
    let s = *i;
    let bytes = r
        .get(s..s + N)
        .and_then(|b| <[u8; N]>::try_from(b).ok())
        .ok_or(FrameError::Truncated {
            expected: s + N,
            found: r.len(),
        })?;

    *i += N;

    Ok(bytes)
}
