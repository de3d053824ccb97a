//! Reader-based decoder implementation.
//!
//! _Requires Cargo feature `std`._

use std::io::{ErrorKind, Read};

use thiserror::Error;
use tracing::debug;

use crate::sans::{ChannelRequirementError, Decoder, Event, Level, Sink, Span};

extern crate std;

/// Errors occurring while decoding from a reader.
#[derive(Debug, Error)]
pub enum Error {
    /// An error from the supplied reader.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// A required channel is missing from the capture.
    #[error("Missing channel: {0}")]
    Channel(#[from] ChannelRequirementError),
}

/// Decode a capture of a single transaction from a reader, publishing
/// annotations to a receiver.
///
/// The capture holds interleaved `(host, device)` byte pairs, framed in one
/// chip-select window as by [`super::transaction::events`]. A trailing
/// unpaired byte is ignored.
///
/// This method is also re-exported as `amcomp::avec::decode_reader`.
///
/// _Requires Cargo feature `std`._
pub fn decode(r: &mut impl Read, o: &mut impl Sink) -> Result<(), Error> {
    let mut decoder = Decoder::new();

    let open = Span::new(0, 0);
    decoder.on_event(&chip_select(open, None, Level::Released), o)?;
    decoder.on_event(&chip_select(open, Some(Level::Released), Level::Asserted), o)?;

    let mut i = 0; // Index of the pair being read, used as its sample number.

    while let Some([host, device]) = take(r)? {
        let span = Span::new(i, i + 1);
        decoder.on_event(
            &Event::Data {
                span,
                host: Some(host),
                device: Some(device),
            },
            o,
        )?;
        i += 1;
    }

    debug!(pairs = i, phase = ?decoder.phase(), "end of capture");

    let close = Span::new(i, i);
    decoder.on_event(&chip_select(close, Some(Level::Asserted), Level::Released), o)?;

    Ok(())
}

fn chip_select(span: Span, previous: Option<Level>, new: Level) -> Event {
    Event::ChipSelect {
        span,
        previous,
        new: Some(new),
    }
}

/// Take a byte pair from a reader, or `None` at the end of the capture.
fn take(r: &mut impl Read) -> Result<Option<[u8; 2]>, Error> {
    let mut buf = [0; 2];

    match r.read_exact(&mut buf) {
        Ok(()) => Ok(Some(buf)),
        Err(err) if err.kind() == ErrorKind::UnexpectedEof => Ok(None),
        Err(err) => Err(err.into()),
    }
}
