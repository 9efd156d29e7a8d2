//! Document and record headers.

use tartan_bitfield::bitfield;
use zerocopy::{Immutable, IntoBytes};

use super::check::compute_crc;

/// Protocol version 2.0, in the header's major/minor nibble layout.
pub const PROTOCOL_VERSION: u8 = 0x20;

/// Profile version 21.32, scaled by 100.
pub const PROFILE_VERSION: u16 = 2132;

/// Size in bytes of the (extended) document header.
pub const HEADER_SIZE: u8 = 14;

/// The header opening a document.
///
/// The record section size is only known once every record is buffered, so
/// the header is encoded last and written first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentHeader {
    /// Number of bytes in the record section, excluding the trailing check.
    pub data_size: u32,
}

#[repr(C, packed)]
#[derive(IntoBytes, Immutable)]
struct FileHeader {
    header_size: u8,
    protocol_version: u8,
    profile_version: [u8; 2],
    data_size: [u8; 4],
    data_type: [u8; 4],
}

impl DocumentHeader {
    /// Encode the header, including its own cyclic redundancy check.
    pub fn encode(&self) -> [u8; HEADER_SIZE as usize] {
        let header = FileHeader {
            header_size: HEADER_SIZE,
            protocol_version: PROTOCOL_VERSION,
            profile_version: PROFILE_VERSION.to_le_bytes(),
            data_size: self.data_size.to_le_bytes(),
            data_type: *b".FIT",
        };

        let bytes: [u8; 12] = zerocopy::transmute!(header);
        let crc = compute_crc(0, &bytes).to_le_bytes();

        let mut r = [0; HEADER_SIZE as usize];
        r[..12].copy_from_slice(&bytes);
        r[12..].copy_from_slice(&crc);
        r
    }
}

/// Encode a normal record header byte for a local message number.
///
/// Local message numbers above 15 are masked to their low four bits.
pub fn record_header(local_message: u8, is_definition: bool) -> u8 {
    bitfield! {
        struct NormalHeader(u8) {
            [0..4] local_message: u8,
            [5] is_developer,
            [6] is_definition,
            [7] is_compressed,
        }
    }

    let mut header = NormalHeader(0);
    header.set_local_message(local_message & 0xF);
    header.set_is_definition(is_definition);
    header.set_is_developer(false);
    header.set_is_compressed(false);

    header.0
}
