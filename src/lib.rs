#![cfg_attr(not(test), no_std)]

//! A streaming decoder for the AltusMetrum altimeter companion interface.
//!
//! The companion bus is a synchronous serial link on which the altimeter (the
//! host) pushes a telemetry header to a companion board, optionally followed
//! by a command-specific sub-frame. This crate reconstructs those frames from
//! a captured stream of byte pairs and chip-select transitions, and labels
//! every decoded field with its sample span.
//!
//! Most users should begin with the functions in the [`avec`] module. If these
//! prove insufficient, drive the state machine in the [`sans`] module
//! directly.
//!
//! ## Cargo Features
//!
//! The following crate feature flags are available:
//!
//! - `std`: enable reader-based decoder (default).

extern crate alloc;

pub mod avec;
pub mod meta;
pub mod sans;
