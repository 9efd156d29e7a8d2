//! Helper for computing cyclic redundancy checks.

const CRC_TABLE: [u16; 16] = [
    0x0000, 0xCC01, 0xD801, 0x1400, 0xF001, 0x3C00, 0x2800, 0xE401, 0xA001, 0x6C00, 0x7800,
    0xB401, 0x5000, 0x9C01, 0x8801, 0x4400,
];

/// Accumulate a slice of bytes into a cyclic redundancy check value.
///
/// Accumulating a document together with its trailing check (stored
/// little-endian) yields zero.
pub fn compute_crc(init: u16, r: &[u8]) -> u16 {
    r.iter().fold(init, |acc, b| {
        let acc = nibble(acc, b & 0xF);
        nibble(acc, b >> 4)
    })
}

/// A running cyclic redundancy check over bytes written in sequence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Crc(u16);

impl Crc {
    /// Accumulate further bytes.
    pub fn update(&mut self, r: &[u8]) {
        self.0 = compute_crc(self.0, r);
    }

    /// The check value over all bytes accumulated so far.
    pub fn value(self) -> u16 {
        self.0
    }
}

fn nibble(crc: u16, n: u8) -> u16 {
    let tmp = CRC_TABLE[(crc & 0xF) as usize];
    let crc = (crc >> 4) & 0x0FFF;
    crc ^ tmp ^ CRC_TABLE[(n & 0xF) as usize]
}
