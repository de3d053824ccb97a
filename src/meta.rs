//! Declared properties of the decoder, for registration with a host
//! application.
//!
//! Nothing here affects decoding; hosts use it to label channels, lay out
//! annotation rows and report missing inputs before a capture is fed.

use crate::sans::{AnnotationClass, Row, schema};

pub const ID: &str = "am-comp";
pub const NAME: &str = "AMcomp";
pub const LONG_NAME: &str = "AltusMetrum Companion";
pub const DESCRIPTION: &str = "Rocket altimeter companion interface";
pub const LICENSE: &str = "gplv2+";

/// Protocols whose output this decoder consumes.
pub const INPUTS: &[&str] = &["spi"];
/// Protocols this decoder produces for stacked decoders.
pub const OUTPUTS: &[&str] = &["Command"];

/// A bus line the decoder requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Channel {
    pub id: &'static str,
    pub description: &'static str,
}

/// Every channel must be connected. A missing one is reported the first time
/// it is needed, not at startup.
pub const REQUIRED_CHANNELS: [Channel; 3] = [
    Channel {
        id: "cs",
        description: "Chip-select",
    },
    Channel {
        id: "mosi",
        description: "Host to device data",
    },
    Channel {
        id: "miso",
        description: "Device to host data",
    },
];

/// All annotation classes, in their declared order.
pub fn annotation_classes() -> [AnnotationClass; 5] {
    AnnotationClass::ALL
}

/// All annotation rows, in their declared order.
pub fn annotation_rows() -> [Row; 3] {
    Row::ALL
}

/// Nominal number of host bytes in a header.
pub fn frame_size() -> usize {
    schema::header_size()
}

/// Nominal number of bytes in a setup response.
pub fn response_size() -> usize {
    schema::setup_size()
}
