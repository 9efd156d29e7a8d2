#![allow(dead_code)]

use std::path::Path;

use cassette::{
    avec::{FieldSink, RecordSink, ToRecord},
    sans::{check::compute_crc, data::Value},
};
use csv::ReaderBuilder;

/// A document walked back into rows of `[global, field, value, field, value, ...]`.
#[derive(Debug, Default)]
pub struct Decoded {
    pub rows: Vec<Vec<String>>,
    pub definitions: usize,
}

/// Walk an encoded document, checking its structure and checks.
pub fn decode(data: &[u8]) -> Decoded {
    assert_eq!(data[0], 14, "header size");
    assert_eq!(&data[8..12], b".FIT");
    assert_eq!(
        u16::from_le_bytes([data[12], data[13]]),
        compute_crc(0, &data[..12]),
        "header check"
    );
    assert_eq!(compute_crc(0, data), 0, "document check");

    let size = u32::from_le_bytes(data[4..8].try_into().unwrap()) as usize;
    assert_eq!(data.len(), 14 + size + 2, "data size");

    let mut definitions: [Option<(u16, Vec<(u8, u8, u8)>)>; 16] = Default::default();
    let mut decoded = Decoded::default();
    let mut i = 14;

    while i < 14 + size {
        let header = data[i];
        i += 1;

        assert_eq!(header & 0xA0, 0, "compressed or developer header");
        let local = (header & 0xF) as usize;

        if header & 0x40 != 0 {
            assert_eq!(data[i + 1], 0, "architecture");
            let global = u16::from_le_bytes([data[i + 2], data[i + 3]]);
            let count = data[i + 4] as usize;
            i += 5;

            let fields = (0..count)
                .map(|n| (data[i + 3 * n], data[i + 3 * n + 1], data[i + 3 * n + 2]))
                .collect();
            i += 3 * count;

            definitions[local] = Some((global, fields));
            decoded.definitions += 1;
        } else {
            let (global, fields) = definitions[local].as_ref().expect("undefined local message");
            let mut row = vec![global.to_string()];

            for &(field, size, base_type) in fields {
                let bytes = &data[i..i + size as usize];
                i += size as usize;

                row.push(field.to_string());
                row.push(show_bytes(base_type, bytes));
            }

            decoded.rows.push(row);
        }
    }

    decoded
}

fn show_bytes(base_type: u8, b: &[u8]) -> String {
    match base_type {
        0x00 | 0x02 | 0x0A => b[0].to_string(),
        0x01 => (b[0] as i8).to_string(),
        0x83 => i16::from_le_bytes(b.try_into().unwrap()).to_string(),
        0x84 | 0x8B => u16::from_le_bytes(b.try_into().unwrap()).to_string(),
        0x85 => i32::from_le_bytes(b.try_into().unwrap()).to_string(),
        0x86 | 0x8C => u32::from_le_bytes(b.try_into().unwrap()).to_string(),
        0x88 => f32::from_le_bytes(b.try_into().unwrap()).to_string(),
        0x89 => f64::from_le_bytes(b.try_into().unwrap()).to_string(),
        0x8E => i64::from_le_bytes(b.try_into().unwrap()).to_string(),
        0x8F | 0x90 => u64::from_le_bytes(b.try_into().unwrap()).to_string(),
        0x07 => {
            let (text, terminator) = b.split_at(b.len() - 1);
            assert_eq!(terminator, [0]);
            String::from_utf8(text.to_vec()).unwrap()
        }
        _ => panic!("unknown base type {base_type:#x}"),
    }
}

/// Compare decoded rows to a fixture of expected rows.
pub fn validate(decoded: &Decoded, path: impl AsRef<Path>) {
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .has_headers(false)
        .from_path(path)
        .unwrap();

    let expected: Vec<Vec<String>> = reader
        .records()
        .map(|r| r.unwrap().iter().map(|f| f.to_string()).collect())
        .collect();

    assert_eq!(decoded.rows, expected);
}

/// A record sink keeping `(global, [(field, value)])` for each record.
#[derive(Debug, Default)]
pub struct Collect(pub Vec<(u16, Vec<(u8, String)>)>);

impl Collect {
    pub fn globals(&self) -> Vec<u16> {
        self.0.iter().map(|(global, _)| *global).collect()
    }

    /// Values of a field across every record with a global message number.
    pub fn values(&self, global: u16, field: u8) -> Vec<String> {
        self.0
            .iter()
            .filter(|(g, _)| *g == global)
            .flat_map(|(_, fields)| fields.iter().filter(|(f, _)| *f == field))
            .map(|(_, v)| v.clone())
            .collect()
    }
}

impl RecordSink for Collect {
    fn add_record(&mut self, record: &dyn ToRecord) {
        let mut fields = Fields::default();
        record.add_fields(&mut fields);
        self.0.push((record.global(), fields.0));
    }
}

#[derive(Debug, Default)]
pub struct Fields(pub Vec<(u8, String)>);

impl FieldSink for Fields {
    fn add_field(&mut self, field: u8, value: Value<'_>) {
        self.0.push((field, show(&value)));
    }
}

pub fn show(value: &Value) -> String {
    match *value {
        Value::Enum(x) | Value::U8(x) | Value::U8Z(x) => x.to_string(),
        Value::I8(x) => x.to_string(),
        Value::I16(x) => x.to_string(),
        Value::U16(x) | Value::U16Z(x) => x.to_string(),
        Value::I32(x) => x.to_string(),
        Value::U32(x) | Value::U32Z(x) => x.to_string(),
        Value::I64(x) => x.to_string(),
        Value::U64(x) | Value::U64Z(x) => x.to_string(),
        Value::F32(x) => x.to_string(),
        Value::F64(x) => x.to_string(),
        Value::String(s) => s.to_string(),
    }
}
