//! Convenience interfaces for common decoding patterns.
//!
//! The functions in this module decode captures held in memory or read from a
//! file, publishing annotations to a [`Sink`](crate::sans::Sink). When only
//! the values of a transaction are of interest, [`Frame::parse`] decodes its
//! host bytes into typed records instead.

pub mod frame;
#[cfg(feature = "std")]
pub mod reader;
pub mod slice;
pub mod transaction;

pub use frame::Frame;
#[cfg(feature = "std")]
pub use reader::decode as decode_reader;
pub use slice::decode as decode_slice;
