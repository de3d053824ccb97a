//! Internal finite-state machine for decoding the companion bus.
//!
//! This module is intended for applications that need fine control over the
//! decoding process, such as those fed live by an acquisition layer. See
//! [`crate::avec`] for implementations covering common decoding patterns.
//!
//! # Architecture
//!
//! A [`Decoder`] consumes [`Event`]s one at a time, in capture order, and
//! publishes [`Annotation`]s to a [`Sink`]. Chip-select transitions frame the
//! stream into transactions; data events carry one byte in each direction, of
//! which only the host byte drives the field grammar.
//!
//! Within a transaction, the [`Session`] walks a static field sequence from
//! the [`schema`] tables, assembling each little-endian field in an
//! accumulator and interpreting it through the [`codec`]. Every transaction
//! starts with the header sequence; the command decoded from its first field
//! selects what follows:
//!
//! - `SETUP`: the setup sub-frame, whose companion ID is validated against
//!   its complement (see [`check`]).
//! - `FETCH`: a stream of telemetry words, one annotation per word, until the
//!   next chip-select release.
//! - anything else: nothing. Further bytes are flagged as unexpected.
//!
//! All non-fatal protocol violations are published as warning annotations.
//! Missing channels are fatal, reported once through
//! [`ChannelRequirementError`], and silence the decoder for good.

pub mod check;
pub mod codec;
pub mod decoder;
pub mod event;
pub mod schema;
pub mod session;

pub use decoder::{ChannelRequirementError, Decoder};
pub use event::{Annotation, AnnotationClass, Event, Level, Row, Sink, Span};
pub use session::{Phase, Session};
