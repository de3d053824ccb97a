//! Slice-based decoder implementation.

use thiserror::Error;

use crate::sans::{ChannelRequirementError, Decoder, Event, Sink};

/// Errors occurring while decoding from a slice.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// A required channel is missing from the capture.
    #[error("Missing channel: {0}")]
    Channel(#[from] ChannelRequirementError),
}

/// Decode a slice of capture events, publishing annotations to a receiver.
///
/// Decoding stops at the first missing channel. Annotations published before
/// it are kept.
///
/// This method is also re-exported as `amcomp::avec::decode_slice`.
pub fn decode(r: &[Event], o: &mut impl Sink) -> Result<(), Error> {
    let mut decoder = Decoder::new();

    for event in r {
        decoder.on_event(event, o)?;
    }

    Ok(())
}
