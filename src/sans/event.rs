//! Events consumed and annotations produced by the decoder.

use alloc::{string::String, vec::Vec};

/// A range of sample numbers in the capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: u64,
    pub end: u64,
}

impl Span {
    pub const fn new(start: u64, end: u64) -> Self {
        Self { start, end }
    }
}

/// The level of the active-low chip-select line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    /// Driven low: a transaction is in progress.
    Asserted,
    /// Driven high: the bus is idle.
    Released,
}

impl Level {
    /// Convert a logic level, where `0` is asserted.
    pub fn from_bit(bit: u8) -> Self {
        if bit == 0 { Self::Asserted } else { Self::Released }
    }
}

/// An event delivered by the acquisition layer.
///
/// `None` levels and bytes indicate that the corresponding channel is not
/// connected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// The chip-select line changed level.
    ChipSelect {
        span: Span,
        previous: Option<Level>,
        new: Option<Level>,
    },
    /// One byte was exchanged in each direction.
    Data {
        span: Span,
        host: Option<u8>,
        device: Option<u8>,
    },
}

impl Event {
    pub fn span(&self) -> Span {
        match self {
            Self::ChipSelect { span, .. } | Self::Data { span, .. } => *span,
        }
    }
}

/// The kind of an annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnotationClass {
    /// A header field sent to the companion.
    Command,
    /// Payload sent to the companion.
    TxData,
    /// A register read from the companion.
    Register,
    /// A sub-frame field.
    RxData,
    /// A protocol violation.
    Warning,
}

impl AnnotationClass {
    pub const ALL: [Self; 5] = [
        Self::Command,
        Self::TxData,
        Self::Register,
        Self::RxData,
        Self::Warning,
    ];

    /// Short identifier of this class.
    pub fn id(self) -> &'static str {
        match self {
            Self::Command => "cmd",
            Self::TxData => "tx-data",
            Self::Register => "register",
            Self::RxData => "rx-data",
            Self::Warning => "warning",
        }
    }

    /// Look up a class by its short identifier.
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.id() == id)
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Command => "Commands sent to the device",
            Self::TxData => "Payload sent to the device",
            Self::Register => "Registers read from the device",
            Self::RxData => "Payload read from the device",
            Self::Warning => "Warnings",
        }
    }

    /// The display row this class is grouped into.
    pub fn row(self) -> Row {
        match self {
            Self::Command | Self::TxData => Row::Commands,
            Self::Register | Self::RxData => Row::Responses,
            Self::Warning => Row::Warnings,
        }
    }
}

/// A group of annotation classes displayed together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Row {
    Commands,
    Responses,
    Warnings,
}

impl Row {
    pub const ALL: [Self; 3] = [Self::Commands, Self::Responses, Self::Warnings];

    pub fn id(self) -> &'static str {
        match self {
            Self::Commands => "commands",
            Self::Responses => "responses",
            Self::Warnings => "warnings",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Commands => "Commands",
            Self::Responses => "Responses",
            Self::Warnings => "Warnings",
        }
    }

    /// The annotation classes displayed in this row.
    pub fn classes(self) -> impl Iterator<Item = AnnotationClass> {
        AnnotationClass::ALL.into_iter().filter(move |c| c.row() == self)
    }
}

/// A labelled span of the capture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    pub span: Span,
    pub class: AnnotationClass,
    pub text: String,
}

/// Receive annotations from the decoder.
pub trait Sink {
    /// Add an annotation. Annotations arrive in event order.
    fn put(&mut self, annotation: Annotation);
}

impl Sink for Vec<Annotation> {
    fn put(&mut self, annotation: Annotation) {
        self.push(annotation);
    }
}

impl<S: Sink + ?Sized> Sink for &mut S {
    fn put(&mut self, annotation: Annotation) {
        (**self).put(annotation);
    }
}
