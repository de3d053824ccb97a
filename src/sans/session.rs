//! The per-transaction frame decoding state.

use alloc::string::String;

use either::Either::{self, Left, Right};
use tracing::{debug, error, trace, warn};

use super::{
    check::is_complement,
    codec::{self, Interpretation, Outcome},
    event::{Annotation, AnnotationClass, Sink, Span},
    schema::{
        COMPANION_ID, COMPANION_ID_INV, Command, FETCH_SUBFRAME, FieldDescriptor, HEADER_FRAME,
        SETUP_SUBFRAME,
    },
};

/// Which part of a frame the session is decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// The header common to all frames.
    HeaderDecode,
    /// The sub-frame following a `SETUP` header.
    SetupDecode,
    /// Telemetry words following a `FETCH` header.
    FetchDecode,
    /// Nothing more is expected until the next chip-select release.
    Complete,
}

/// A companion ID awaiting comparison with its complement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CompanionId {
    value: u16,
    start: u64,
}

/// Mutable state for decoding a single frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    phase: Phase,
    fields: &'static [FieldDescriptor],
    index: usize,
    bytes_consumed: u8,
    accumulator: u32,
    field_start: u64,
    command: Option<Command>,
    companion_id: Option<CompanionId>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            phase: Phase::HeaderDecode,
            fields: &HEADER_FRAME,
            index: 0,
            bytes_consumed: 0,
            accumulator: 0,
            field_start: 0,
            command: None,
            companion_id: None,
        }
    }

    /// Discard any partial frame and await a new header.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The command decoded from the header, once its field is complete.
    pub fn command(&self) -> Option<Command> {
        self.command
    }

    /// The field currently being assembled, if any more are expected.
    pub fn current_field(&self) -> Option<&'static FieldDescriptor> {
        match self.phase {
            Phase::Complete => None,
            _ => self.fields.get(self.index),
        }
    }

    /// Number of bytes received for the current field.
    pub fn bytes_consumed(&self) -> u8 {
        self.bytes_consumed
    }

    /// Consume one host byte, publishing any completed field.
    pub fn feed_byte(&mut self, value: u8, span: Span, o: &mut impl Sink) {
        let Some(field) = self.current_field() else {
            warn!(start = span.start, value, "unexpected data after complete frame");
            return put(o, span, AnnotationClass::Warning, "Unexpected Data");
        };

        if self.bytes_consumed == 0 {
            self.field_start = span.start;
        }

        // Bytes past the accumulator's width are counted but dropped; the
        // oversized field is reported once it completes.
        if self.bytes_consumed < codec::MAX_WIDTH {
            self.accumulator = codec::accumulate(self.accumulator, value, self.bytes_consumed);
        }
        self.bytes_consumed += 1;

        if self.bytes_consumed < field.byte_width {
            return;
        }

        let raw = self.accumulator;
        self.accumulator = 0;
        self.bytes_consumed = 0;

        trace!(field = field.name, raw, "field complete");

        let text = match codec::interpret(field, raw) {
            Ok(Interpretation { text, outcome }) => {
                if let Outcome::Command(command) = outcome {
                    self.command = command;
                }
                text
            }
            Err(err) => {
                error!(%err, "cannot interpret field");
                String::from("Internal Error")
            }
        };

        let field_span = Span::new(self.field_start, span.end);

        match self.phase {
            Phase::HeaderDecode => {
                put(o, field_span, AnnotationClass::Command, text);
                self.advance();
            }
            Phase::SetupDecode => {
                put(o, field_span, AnnotationClass::RxData, text);
                self.check_companion_id(field, raw, field_span, o);
                self.advance();
            }
            // Telemetry words repeat, so the cursor stays on the same field.
            Phase::FetchDecode => put(o, field_span, AnnotationClass::RxData, text),
            Phase::Complete => {}
        }
    }

    fn check_companion_id(
        &mut self,
        field: &FieldDescriptor,
        raw: u32,
        field_span: Span,
        o: &mut impl Sink,
    ) {
        let raw = raw as u16;

        if *field == COMPANION_ID {
            self.companion_id = Some(CompanionId {
                value: raw,
                start: field_span.start,
            });
        } else if *field == COMPANION_ID_INV {
            let (matches, start) = match self.companion_id.take() {
                Some(id) => (is_complement(id.value, raw), id.start),
                None => (false, field_span.start),
            };

            if !matches {
                warn!(start, end = field_span.end, inverse = raw, "companion ID mismatch");
                put(
                    o,
                    Span::new(start, field_span.end),
                    AnnotationClass::Warning,
                    "Companion ID mismatch",
                );
            }
        }
    }

    fn advance(&mut self) {
        match self.successor() {
            Left(index) => self.index = index,
            Right(phase) => self.enter(phase),
        }
    }

    /// The next field in the active sequence, or the phase that follows it.
    fn successor(&self) -> Either<usize, Phase> {
        let next = self.index + 1;

        if next < self.fields.len() {
            return Left(next);
        }

        Right(match (self.phase, self.command) {
            (Phase::HeaderDecode, Some(Command::Setup)) => Phase::SetupDecode,
            (Phase::HeaderDecode, Some(Command::Fetch)) => Phase::FetchDecode,
            _ => Phase::Complete,
        })
    }

    fn enter(&mut self, phase: Phase) {
        debug!(from = ?self.phase, to = ?phase, command = ?self.command, "frame phase");

        self.phase = phase;
        self.index = 0;
        self.fields = match phase {
            Phase::HeaderDecode => &HEADER_FRAME[..],
            Phase::SetupDecode => {
                self.companion_id = None;
                &SETUP_SUBFRAME[..]
            }
            Phase::FetchDecode => &FETCH_SUBFRAME[..],
            Phase::Complete => &[],
        };
    }
}

fn put(o: &mut impl Sink, span: Span, class: AnnotationClass, text: impl Into<String>) {
    o.put(Annotation {
        span,
        class,
        text: text.into(),
    });
}
