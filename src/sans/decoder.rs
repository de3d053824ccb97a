//! Dispatch of capture events to the frame decoding session.

use thiserror::Error;
use tracing::{debug, error};

use super::{
    event::{Event, Level, Sink, Span},
    session::{Phase, Session},
};

/// A channel the decoder requires is not connected.
///
/// This error is fatal: once returned, the decoder ignores all further events.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ChannelRequirementError {
    /// The chip-select channel supplied no level.
    #[error("CS# pin required.")]
    ChipSelect,
    /// A data channel supplied no byte.
    #[error("Both MISO and MOSI pins required.")]
    Data,
}

/// Decoder for a companion bus capture.
///
/// Feed events in capture order with [`Decoder::on_event`].
#[derive(Debug, Clone, PartialEq)]
pub struct Decoder {
    session: Session,
    requirements_met: bool,
    chip_select_primed: bool,
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder {
    pub fn new() -> Self {
        Self {
            session: Session::new(),
            requirements_met: true,
            chip_select_primed: false,
        }
    }

    /// Process a single event, publishing annotations to a receiver.
    ///
    /// Returns an error the first time a required channel is found missing.
    /// Every event after that is ignored.
    pub fn on_event(
        &mut self,
        event: &Event,
        o: &mut impl Sink,
    ) -> Result<(), ChannelRequirementError> {
        if !self.requirements_met {
            return Ok(());
        }

        match *event {
            Event::ChipSelect { previous, new, .. } => match (previous, new) {
                (None, None) => self.fail(ChannelRequirementError::ChipSelect)?,
                (None, Some(Level::Released)) => self.chip_select_primed = true,
                // The end of a transaction.
                (Some(Level::Asserted), Some(Level::Released)) => {
                    self.reset_session();
                    self.chip_select_primed = true;
                }
                _ => {}
            },
            Event::Data { span, host, device } if self.chip_select_primed => {
                let (Some(host), Some(_)) = (host, device) else {
                    return self.fail(ChannelRequirementError::Data);
                };

                self.feed_byte(host, span, o);
            }
            Event::Data { .. } => {}
        }

        Ok(())
    }

    fn fail(&mut self, err: ChannelRequirementError) -> Result<(), ChannelRequirementError> {
        error!(%err, "decoder disabled");
        self.requirements_met = false;
        Err(err)
    }

    /// Consume one host byte of the current frame.
    pub fn feed_byte(&mut self, value: u8, span: Span, o: &mut impl Sink) {
        self.session.feed_byte(value, span, o);
    }

    /// Discard any partial frame and await a new header.
    pub fn reset_session(&mut self) {
        debug!(phase = ?self.session.phase(), "session reset");
        self.session.reset();
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn phase(&self) -> Phase {
        self.session.phase()
    }

    /// Whether all required channels have been present so far.
    pub fn requirements_met(&self) -> bool {
        self.requirements_met
    }

    /// Whether a released chip-select has been observed, enabling data.
    pub fn chip_select_primed(&self) -> bool {
        self.chip_select_primed
    }
}
