use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Four-byte code used by the platform to identify format families and
/// status values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FourCc(pub u32);

impl FourCc {
    pub const fn from_bytes(bytes: [u8; 4]) -> Self {
        FourCc(u32::from_be_bytes(bytes))
    }

    pub const fn bytes(self) -> [u8; 4] {
        self.0.to_be_bytes()
    }
}

fn is_printable(bytes: &[u8; 4]) -> bool {
    bytes.iter().all(|b| b.is_ascii_graphic() || *b == b' ')
}

impl fmt::Display for FourCc {
    /// Renders as `'abcd'` when every byte is printable ASCII, otherwise as
    /// the raw decimal value.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bytes = self.bytes();
        if is_printable(&bytes) {
            write!(
                f,
                "'{}{}{}{}'",
                bytes[0] as char, bytes[1] as char, bytes[2] as char, bytes[3] as char
            )
        } else {
            write!(f, "{}", self.0)
        }
    }
}

impl Serialize for FourCc {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let bytes = self.bytes();
        if is_printable(&bytes) {
            let text: String = bytes.iter().map(|b| *b as char).collect();
            serializer.serialize_str(&text)
        } else {
            serializer.serialize_u32(self.0)
        }
    }
}

impl<'de> Deserialize<'de> for FourCc {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct FourCcVisitor;

        impl<'de> Visitor<'de> for FourCcVisitor {
            type Value = FourCc;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a four-character string or an integer code")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<FourCc, E> {
                let bytes: [u8; 4] = value
                    .as_bytes()
                    .try_into()
                    .map_err(|_| E::invalid_length(value.len(), &self))?;
                Ok(FourCc::from_bytes(bytes))
            }

            fn visit_u64<E: de::Error>(self, value: u64) -> Result<FourCc, E> {
                u32::try_from(value)
                    .map(FourCc)
                    .map_err(|_| E::custom("code out of u32 range"))
            }
        }

        deserializer.deserialize_any(FourCcVisitor)
    }
}
