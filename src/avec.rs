//! Convenience interfaces for writing records.
//!
//! Records publish their fields through the [`ToRecord`] trait, and an
//! [`Encoder`] lays them out into a document over any [`std::io::Write`]
//! implementation. Record shapes known ahead of time can derive the trait;
//! see the [`ToRecord`](macro@ToRecord) macro for details.

pub mod writer;

pub use writer::Encoder;

use crate::sans::data::Value;

/// Derive [`ToRecord`] for a struct representing a single record.
///
/// # Examples
///
/// Add the `record(N)` attribute to the struct, where `N` is the global
/// message number. To publish a field, add the `field(N)` attribute to an
/// `Option<T>` struct field, where `N` is the field number and `T` implements
/// [`IntoValue`]. Fields holding `None` are left out of the record.
///
/// ```
/// #[derive(Debug, Default, ToRecord)]
/// #[record(49)]
/// struct FileCreator {
///     #[field(0)]
///     software_version: Option<u16>,
///     #[field(1)]
///     hardware_version: Option<u8>,
/// }
/// ```
///
/// To publish a value under a base type other than the default for its
/// primitive, or to convert from a domain type, supply a closure taking a
/// reference to the inner value. Since the parameter type cannot be inferred,
/// it must be annotated.
///
/// ```
/// #[derive(Debug, Default, ToRecord)]
/// #[record(0)]
/// struct FileId {
///     #[field(3, |v: &u32| Value::U32Z(*v))]
///     serial_number: Option<u32>,
/// }
/// ```
///
/// The generated code refers to [`ToRecord`], [`FieldSink`], [`IntoValue`] and
/// [`Value`] by name, so these must be in scope.
pub use cassette_derive::ToRecord;

/// Publish field values for a record.
///
/// See the [`ToRecord`](macro@ToRecord) derive macro for an automatic
/// implementation of this trait.
pub trait ToRecord {
    /// The global message number of the record.
    fn global(&self) -> u16;
    /// Publish each present field, in definition order.
    fn add_fields(&self, o: &mut dyn FieldSink);
}

/// Receive field values for a record.
pub trait FieldSink {
    /// Add a value for a field to the record.
    fn add_field(&mut self, field: u8, value: Value<'_>);
}

/// Receive complete records, in document order.
pub trait RecordSink {
    /// Add a record to the document.
    fn add_record(&mut self, record: &dyn ToRecord);
}

/// Convert a Rust primitive to a field value of its natural base type.
pub trait IntoValue {
    fn to_value(&self) -> Value<'_>;
}

macro_rules! into_value {
    ($($t:ty => $variant:ident,)*) => {
        $(
            impl IntoValue for $t {
                fn to_value(&self) -> Value<'_> {
                    Value::$variant(*self)
                }
            }
        )*
    };
}

into_value! {
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    f32 => F32,
    f64 => F64,
}

impl IntoValue for String {
    fn to_value(&self) -> Value<'_> {
        Value::String(self)
    }
}
