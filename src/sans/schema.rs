//! Static field tables for companion bus frames.

/// A command sent by the altimeter in the first header byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Configure the companion; followed by the setup sub-frame.
    Setup,
    /// Request telemetry; followed by telemetry words.
    Fetch,
    /// Push a header only.
    Notify,
}

impl Command {
    /// Look up a command by its wire value.
    pub fn from_raw(raw: u32) -> Option<Self> {
        match raw {
            0x01 => Some(Self::Setup),
            0x02 => Some(Self::Fetch),
            0x03 => Some(Self::Notify),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Setup => "SETUP",
            Self::Fetch => "FETCH",
            Self::Notify => "NOTIFY",
        }
    }
}

/// The altimeter flight state carried in every header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlightState {
    Startup,
    Idle,
    Pad,
    Boost,
    Fast,
    Coast,
    Drogue,
    Main,
    Landed,
    Invalid,
    Test,
}

impl FlightState {
    const ALL: [Self; 11] = [
        Self::Startup,
        Self::Idle,
        Self::Pad,
        Self::Boost,
        Self::Fast,
        Self::Coast,
        Self::Drogue,
        Self::Main,
        Self::Landed,
        Self::Invalid,
        Self::Test,
    ];

    /// Look up a flight state by its wire value.
    pub fn from_raw(raw: u32) -> Option<Self> {
        usize::try_from(raw)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Startup => "STARTUP",
            Self::Idle => "IDLE",
            Self::Pad => "PAD",
            Self::Boost => "BOOST",
            Self::Fast => "FAST",
            Self::Coast => "COAST",
            Self::Drogue => "DROGUE",
            Self::Main => "MAIN",
            Self::Landed => "LANDED",
            Self::Invalid => "INVALID",
            Self::Test => "TEST",
        }
    }
}

/// A rational scale factor applied to a raw field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scale {
    pub numerator: u32,
    pub denominator: u32,
}

impl Scale {
    pub const fn new(numerator: u32, denominator: u32) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    /// Scale a value, dividing last so decimal scales round correctly.
    pub fn apply(self, value: f64) -> f64 {
        value * self.numerator as f64 / self.denominator as f64
    }
}

/// How the raw bytes of a field are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Command,
    FlightState,
    UnsignedScaled { scale: Scale, unit: &'static str },
    SignedScaled { scale: Scale, unit: &'static str },
    RawNumber,
}

/// Static description of one scalar value within a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub byte_width: u8,
    pub kind: FieldKind,
}

impl FieldDescriptor {
    pub const fn new(name: &'static str, byte_width: u8, kind: FieldKind) -> Self {
        Self {
            name,
            byte_width,
            kind,
        }
    }
}

const fn unsigned(
    name: &'static str,
    byte_width: u8,
    scale: Scale,
    unit: &'static str,
) -> FieldDescriptor {
    FieldDescriptor::new(name, byte_width, FieldKind::UnsignedScaled { scale, unit })
}

const fn signed(
    name: &'static str,
    byte_width: u8,
    scale: Scale,
    unit: &'static str,
) -> FieldDescriptor {
    FieldDescriptor::new(name, byte_width, FieldKind::SignedScaled { scale, unit })
}

const fn number(name: &'static str, byte_width: u8) -> FieldDescriptor {
    FieldDescriptor::new(name, byte_width, FieldKind::RawNumber)
}

/// Hundredths, for times in seconds.
pub const CENTI: Scale = Scale::new(1, 100);
/// Sixteenths, for acceleration and speed.
pub const SIXTEENTH: Scale = Scale::new(1, 16);
pub const UNIT: Scale = Scale::new(1, 1);

/// The companion ID, validated against [`COMPANION_ID_INV`].
pub const COMPANION_ID: FieldDescriptor = number("ID", 2);
/// The bitwise complement of [`COMPANION_ID`].
pub const COMPANION_ID_INV: FieldDescriptor = number("ID_INV", 2);
/// A telemetry word, repeated for as long as a fetch transaction lasts.
pub const TELEMETRY: FieldDescriptor = number("TLM", 2);

/// The header common to every frame.
pub static HEADER_FRAME: [FieldDescriptor; 9] = [
    FieldDescriptor::new("COMMAND", 1, FieldKind::Command),
    FieldDescriptor::new("STATE", 1, FieldKind::FlightState),
    unsigned("TICK", 2, CENTI, "s"),
    number("SERIAL", 2),
    number("FLIGHT", 2),
    signed("ACCEL", 2, SIXTEENTH, "m/s^2"),
    signed("SPEED", 2, SIXTEENTH, "m/s"),
    signed("HEIGHT", 2, UNIT, "m"),
    number("MOTOR", 2),
];

/// The sub-frame following a `SETUP` header.
pub static SETUP_SUBFRAME: [FieldDescriptor; 4] = [
    COMPANION_ID,
    COMPANION_ID_INV,
    unsigned("UPDATE", 1, CENTI, "s"),
    number("TELM", 1),
];

/// The sub-frame following a `FETCH` header. It never advances.
pub static FETCH_SUBFRAME: [FieldDescriptor; 1] = [TELEMETRY];

/// Number of host bytes in a complete header.
pub fn header_size() -> usize {
    sequence_size(&HEADER_FRAME)
}

/// Number of host bytes in a complete setup sub-frame.
pub fn setup_size() -> usize {
    sequence_size(&SETUP_SUBFRAME)
}

fn sequence_size(fields: &[FieldDescriptor]) -> usize {
    fields.iter().map(|f| f.byte_width as usize).sum()
}
