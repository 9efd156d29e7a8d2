//! A compiler from line-oriented workout descriptions to Garmin FIT workout
//! files.
//!
//! Cassette reads a simple textual format, validates every field against the
//! FIT profile, and encodes the resulting records into a FIT document.
//!
//! Most users should begin with [`text::convert`]. The layers beneath are
//! public for applications needing finer control:
//!
//! - [`text`] reads tokens, values and records, and sequences them.
//! - [`profile`] holds the typed workout records and enumerations.
//! - [`avec`] encodes records through a writer.
//! - [`sans`] holds the byte-level building blocks of the encoder.

pub mod avec;
pub mod profile;
pub mod sans;
pub mod text;

pub use text::{Error, Mode, convert};
