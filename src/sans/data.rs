//! Field values and their base types.

/// Longest string payload in bytes; one more byte holds the terminator.
pub const MAX_STRING_LEN: usize = 254;

macro_rules! values {
    ($($variant:ident($into:ident) = $code:literal, $(#[$attr:meta])*;)*) => {
        /// A field value tagged with its base type.
        ///
        /// Values are encoded little-endian. Strings are truncated to
        /// [`MAX_STRING_LEN`] bytes on a character boundary and terminated
        /// with a zero byte.
        #[derive(Debug, Clone, Copy, PartialEq)]
        pub enum Value<'a> {
            $($(#[$attr])* $variant($into),)*
            /// `string`
            String(&'a str),
        }

        impl Value<'_> {
            /// The base type number written in field definitions.
            pub fn base_type(&self) -> u8 {
                match self {
                    $(Self::$variant(_) => $code,)*
                    Self::String(_) => 0x07,
                }
            }

            /// The number of bytes this value occupies in a data record.
            pub fn size(&self) -> u8 {
                match self {
                    $(Self::$variant(_) => size_of::<$into>() as u8,)*
                    Self::String(s) => truncate(s).len() as u8 + 1,
                }
            }

            /// Append the encoded value to a buffer.
            pub fn encode(&self, buf: &mut Vec<u8>) {
                match self {
                    $(Self::$variant(x) => buf.extend_from_slice(&x.to_le_bytes()),)*
                    Self::String(s) => {
                        buf.extend_from_slice(truncate(s).as_bytes());
                        buf.push(0);
                    }
                }
            }
        }
    };
}

values! {
    Enum(u8) = 0x00, /** `enum` */;
    I8(i8) = 0x01, /** `sint8` */;
    U8(u8) = 0x02, /** `uint8` */;
    I16(i16) = 0x83, /** `sint16` */;
    U16(u16) = 0x84, /** `uint16` */;
    I32(i32) = 0x85, /** `sint32` */;
    U32(u32) = 0x86, /** `uint32` */;
    F32(f32) = 0x88, /** `float32` */;
    F64(f64) = 0x89, /** `float64` */;
    U8Z(u8) = 0x0A, /** `uint8z` */;
    U16Z(u16) = 0x8B, /** `uint16z` */;
    U32Z(u32) = 0x8C, /** `uint32z` */;
    I64(i64) = 0x8E, /** `sint64` */;
    U64(u64) = 0x8F, /** `uint64` */;
    U64Z(u64) = 0x90, /** `uint64z` */;
}

fn truncate(s: &str) -> &str {
    let mut end = s.len().min(MAX_STRING_LEN);
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}
