//! Definition records and local message slots.

use either::Either::{self, Left, Right};
use tinyvec::TinyVec;
use zerocopy::{Immutable, IntoBytes};

use super::{data::Value, header::record_header};

/// Number of local message slots available to record headers.
pub const LOCAL_MESSAGES: usize = 16;

/// Most fields a definition record can describe.
pub const MAX_FIELDS: usize = u8::MAX as usize;

/// The definition of a single field: its number, size and base type.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, IntoBytes, Immutable)]
pub struct FieldDefinition {
    pub field: u8,
    pub size: u8,
    pub base_type: u8,
}

impl FieldDefinition {
    /// Describe the field holding a value.
    pub fn of(field: u8, value: &Value) -> Self {
        Self {
            field,
            size: value.size(),
            base_type: value.base_type(),
        }
    }
}

/// The shape of a data record: its global message number and fields, in the
/// order their values are written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Definition {
    pub global_message: u16,
    pub fields: TinyVec<[FieldDefinition; 12]>,
}

#[repr(C, packed)]
#[derive(IntoBytes, Immutable)]
struct DefinitionMessage {
    _reserved: u8,
    architecture: u8,
    global_message: [u8; 2],
    fields: u8,
}

impl Definition {
    /// Start a definition with no fields.
    pub fn new(global_message: u16) -> Self {
        Self {
            global_message,
            fields: TinyVec::new(),
        }
    }

    /// Add a field, unless the definition already holds [`MAX_FIELDS`].
    ///
    /// Returns whether the field was added.
    pub fn push(&mut self, field: FieldDefinition) -> bool {
        if self.fields.len() >= MAX_FIELDS {
            return false;
        }

        self.fields.push(field);
        true
    }

    /// Append a definition record, including its record header, binding this
    /// definition to a local message number.
    pub fn encode(&self, local_message: u8, buf: &mut Vec<u8>) {
        let message = DefinitionMessage {
            _reserved: 0,
            architecture: 0, // Little-endian.
            global_message: self.global_message.to_le_bytes(),
            fields: u8::try_from(self.fields.len()).unwrap_or(u8::MAX),
        };

        let bytes: [u8; 5] = zerocopy::transmute!(message);

        buf.push(record_header(local_message, true));
        buf.extend_from_slice(&bytes);

        for field in self.fields.iter().take(MAX_FIELDS) {
            buf.extend_from_slice(field.as_bytes());
        }
    }
}

/// Tracks the definition bound to each local message slot.
///
/// Slots are handed out in order and, once all are taken, reclaimed from the
/// least recently bound.
#[derive(Debug, Default)]
pub struct LocalTable {
    slots: [Option<Definition>; LOCAL_MESSAGES],
    next: usize,
}

impl LocalTable {
    /// Find a slot for a definition.
    ///
    /// Returns the slot number alone when it already holds an identical
    /// definition, or the slot number with the newly bound definition when a
    /// definition record must be written first.
    pub fn assign(&mut self, definition: Definition) -> Either<(u8, &Definition), u8> {
        if let Some(local) = self
            .slots
            .iter()
            .position(|slot| slot.as_ref() == Some(&definition))
        {
            return Right(local as u8);
        }

        let local = self.next;
        self.next = (self.next + 1) % LOCAL_MESSAGES;

        Left((local as u8, self.slots[local].insert(definition)))
    }
}
