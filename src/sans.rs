//! Byte-level building blocks for encoding FIT documents.
//!
//! This module is intended for applications that need control over how a
//! document is laid out. Most users should write records through the encoder
//! in [`crate::avec`] instead.
//!
//! # Architecture
//!
//! A FIT document is a fixed header, a section of records, and a trailing
//! cyclic redundancy check. Every data record is preceded, at some earlier
//! point, by a definition record bound to the same local message number (a
//! slot from 0 to 15). The pieces here encode each part independently and
//! leave buffering and output to the caller:
//!
//! - [`header`] encodes the document header and record header bytes.
//! - [`definition`] describes the shape of a record and tracks which local
//!   message slot currently holds which definition.
//! - [`data`] holds field values and their base types.
//! - [`check`] accumulates the cyclic redundancy check.
//!
//! All multi-byte values are written little-endian, and records never use
//! compressed timestamp headers or developer fields.

pub mod check;
pub mod data;
pub mod definition;
pub mod header;

/// Entrypoint for document layout: the header written ahead of all records.
pub type Document = header::DocumentHeader;
