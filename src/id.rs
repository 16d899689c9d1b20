use std::{fmt, ops, str};

/// Represents a Universally Unique IDentifier.
///
/// The 16 bytes are always held in the canonical network (big-endian) order defined by RFC 4122.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
pub struct Uuid(pub(crate) [u8; 16]);

/// The RFC 4122 fields of a UUID with the multi-byte integers decoded as native integers.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct Fields {
    /// The low 32 bits of the timestamp.
    pub time_low: u32,
    /// The middle 16 bits of the timestamp.
    pub time_mid: u16,
    /// The 4-bit version followed by the high 12 bits of the timestamp.
    pub time_hi_and_version: u16,
    /// The 2 or 3 variant bits followed by the high bits of the clock sequence.
    pub clock_seq_hi_and_reserved: u8,
    /// The low 8 bits of the clock sequence.
    pub clock_seq_low: u8,
    /// The 48-bit node identifier.
    pub node: [u8; 6],
}

/// The variant field of a UUID, determining the interpretation of the rest of the layout.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Variant {
    /// `0xxx`: reserved for NCS backward compatibility; also covers the Nil UUID.
    Var0,
    /// `10xx`: the variant specified by RFC 4122.
    Var10,
    /// `110x`: reserved for Microsoft backward compatibility.
    Var110,
    /// `111x`: reserved for future definition.
    Var111,
}

impl Uuid {
    /// Returns a reference to the underlying byte array.
    pub const fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }

    /// Creates a UUID from its field values.
    pub const fn from_fields(fields: &Fields) -> Self {
        let tl = fields.time_low.to_be_bytes();
        let tm = fields.time_mid.to_be_bytes();
        let th = fields.time_hi_and_version.to_be_bytes();
        let n = fields.node;
        Self([
            tl[0],
            tl[1],
            tl[2],
            tl[3],
            tm[0],
            tm[1],
            th[0],
            th[1],
            fields.clock_seq_hi_and_reserved,
            fields.clock_seq_low,
            n[0],
            n[1],
            n[2],
            n[3],
            n[4],
            n[5],
        ])
    }

    /// Returns the field values of this UUID.
    pub const fn fields(&self) -> Fields {
        let b = &self.0;
        Fields {
            time_low: u32::from_be_bytes([b[0], b[1], b[2], b[3]]),
            time_mid: u16::from_be_bytes([b[4], b[5]]),
            time_hi_and_version: u16::from_be_bytes([b[6], b[7]]),
            clock_seq_hi_and_reserved: b[8],
            clock_seq_low: b[9],
            node: [b[10], b[11], b[12], b[13], b[14], b[15]],
        }
    }

    /// Reports the variant field value of the UUID.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pguuid::{Uuid, Variant};
    ///
    /// assert_eq!(Uuid::NIL.variant(), Variant::Var0);
    /// assert_eq!(Uuid::NAMESPACE_DNS.variant(), Variant::Var10);
    /// ```
    pub const fn variant(&self) -> Variant {
        match self.0[8] >> 5 {
            0b000..=0b011 => Variant::Var0,
            0b100..=0b101 => Variant::Var10,
            0b110 => Variant::Var110,
            _ => Variant::Var111,
        }
    }

    /// Returns the version field value of the UUID or `None` if the UUID does not have the
    /// variant field value of `10`.
    pub const fn version(&self) -> Option<u8> {
        match self.variant() {
            Variant::Var10 => Some(self.0[6] >> 4),
            _ => None,
        }
    }

    /// Converts a UUID whose multi-byte fields are laid out in host byte order into the network
    /// byte order.
    ///
    /// Only `time_low`, `time_mid`, and `time_hi_and_version` are affected; the clock sequence
    /// and node are byte arrays and have no endianness. This is the identity on big-endian hosts.
    pub const fn to_network_order(self) -> Self {
        let b = self.0;
        let tl = u32::from_ne_bytes([b[0], b[1], b[2], b[3]]).to_be_bytes();
        let tm = u16::from_ne_bytes([b[4], b[5]]).to_be_bytes();
        let th = u16::from_ne_bytes([b[6], b[7]]).to_be_bytes();
        Self([
            tl[0], tl[1], tl[2], tl[3], tm[0], tm[1], th[0], th[1], b[8], b[9], b[10], b[11],
            b[12], b[13], b[14], b[15],
        ])
    }

    /// Converts a UUID in network byte order into the host byte order layout.
    ///
    /// The inverse of [`Uuid::to_network_order`].
    pub const fn to_host_order(self) -> Self {
        let b = self.0;
        let tl = u32::from_be_bytes([b[0], b[1], b[2], b[3]]).to_ne_bytes();
        let tm = u16::from_be_bytes([b[4], b[5]]).to_ne_bytes();
        let th = u16::from_be_bytes([b[6], b[7]]).to_ne_bytes();
        Self([
            tl[0], tl[1], tl[2], tl[3], tm[0], tm[1], th[0], th[1], b[8], b[9], b[10], b[11],
            b[12], b[13], b[14], b[15],
        ])
    }

    /// Returns the 8-4-4-4-12 hexadecimal string representation stored in a stack-allocated
    /// structure that can be dereferenced as `str` and [`Display`](fmt::Display)ed.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pguuid::Uuid;
    ///
    /// let x = "6BA7B810-9DAD-11D1-80B4-00C04FD430C8".parse::<Uuid>()?;
    /// let y = x.encode();
    /// assert_eq!(&y as &str, "6ba7b810-9dad-11d1-80b4-00c04fd430c8");
    /// assert_eq!(format!("{}", y), "6ba7b810-9dad-11d1-80b4-00c04fd430c8");
    /// # Ok::<(), pguuid::ParseError>(())
    /// ```
    pub fn encode(&self) -> impl ops::Deref<Target = str> + fmt::Display {
        const DIGITS: &[u8; 16] = b"0123456789abcdef";

        let mut buffer = [0u8; 36];
        let mut pos = 0;
        for (i, e) in self.0.iter().enumerate() {
            buffer[pos] = DIGITS[(e >> 4) as usize];
            buffer[pos + 1] = DIGITS[(e & 15) as usize];
            pos += 2;
            if i == 3 || i == 5 || i == 7 || i == 9 {
                buffer[pos] = b'-';
                pos += 1;
            }
        }
        debug_assert!(buffer.is_ascii());
        UuidStr(buffer)
    }
}

impl Fields {
    /// Reads the fields from a 16-byte array whose multi-byte fields are in host byte order.
    pub const fn from_host_bytes(b: &[u8; 16]) -> Self {
        Fields {
            time_low: u32::from_ne_bytes([b[0], b[1], b[2], b[3]]),
            time_mid: u16::from_ne_bytes([b[4], b[5]]),
            time_hi_and_version: u16::from_ne_bytes([b[6], b[7]]),
            clock_seq_hi_and_reserved: b[8],
            clock_seq_low: b[9],
            node: [b[10], b[11], b[12], b[13], b[14], b[15]],
        }
    }

    /// Writes the fields into a 16-byte array with the multi-byte fields in host byte order.
    pub const fn to_host_bytes(&self) -> [u8; 16] {
        let tl = self.time_low.to_ne_bytes();
        let tm = self.time_mid.to_ne_bytes();
        let th = self.time_hi_and_version.to_ne_bytes();
        let n = self.node;
        [
            tl[0],
            tl[1],
            tl[2],
            tl[3],
            tm[0],
            tm[1],
            th[0],
            th[1],
            self.clock_seq_hi_and_reserved,
            self.clock_seq_low,
            n[0],
            n[1],
            n[2],
            n[3],
            n[4],
            n[5],
        ]
    }

    /// Overwrites bits 12-15 of `time_hi_and_version` with `version`.
    pub fn set_version(&mut self, version: u8) {
        self.time_hi_and_version &= 0x0fff;
        self.time_hi_and_version |= u16::from(version & 0x0f) << 12;
    }

    /// Sets the two high bits of `clock_seq_hi_and_reserved` to `10`.
    pub fn set_rfc_variant(&mut self) {
        self.clock_seq_hi_and_reserved &= 0x3f;
        self.clock_seq_hi_and_reserved |= 0x80;
    }
}

impl fmt::Display for Uuid {
    /// Returns the 8-4-4-4-12 canonical hexadecimal string representation.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl str::FromStr for Uuid {
    type Err = ParseError;

    /// Creates an object from the 8-4-4-4-12 hexadecimal string representation.
    fn from_str(src: &str) -> Result<Self, Self::Err> {
        const ERR: ParseError = ParseError {};
        let mut dst = [0u8; 16];
        let mut iter = src.chars();
        for (i, e) in dst.iter_mut().enumerate() {
            let hi = iter.next().ok_or(ERR)?.to_digit(16).ok_or(ERR)? as u8;
            let lo = iter.next().ok_or(ERR)?.to_digit(16).ok_or(ERR)? as u8;
            *e = (hi << 4) | lo;
            if (i == 3 || i == 5 || i == 7 || i == 9) && iter.next().ok_or(ERR)? != '-' {
                return Err(ERR);
            }
        }
        if iter.next().is_none() {
            Ok(Self(dst))
        } else {
            Err(ERR)
        }
    }
}

impl From<Uuid> for [u8; 16] {
    fn from(src: Uuid) -> Self {
        src.0
    }
}

impl From<[u8; 16]> for Uuid {
    fn from(src: [u8; 16]) -> Self {
        Self(src)
    }
}

impl AsRef<[u8]> for Uuid {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl From<Uuid> for u128 {
    fn from(src: Uuid) -> Self {
        Self::from_be_bytes(src.0)
    }
}

impl From<u128> for Uuid {
    fn from(src: u128) -> Self {
        Self(src.to_be_bytes())
    }
}

impl From<Uuid> for String {
    fn from(src: Uuid) -> Self {
        src.to_string()
    }
}

impl TryFrom<String> for Uuid {
    type Error = ParseError;

    fn try_from(src: String) -> Result<Self, Self::Error> {
        src.parse()
    }
}

/// Concrete return type of [`Uuid::encode()`] containing the stack-allocated 8-4-4-4-12 string
/// representation.
struct UuidStr([u8; 36]);

impl ops::Deref for UuidStr {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        // only ASCII hex digits and hyphens are ever written
        str::from_utf8(&self.0).unwrap_or_default()
    }
}

impl fmt::Display for UuidStr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self)
    }
}

/// Error parsing an invalid string representation of UUID.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct ParseError {}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid string representation")
    }
}

impl std::error::Error for ParseError {}

#[cfg(feature = "uuid")]
#[cfg_attr(docsrs, doc(cfg(feature = "uuid")))]
mod uuid_support {
    use super::Uuid;

    impl From<Uuid> for uuid::Uuid {
        fn from(src: Uuid) -> Self {
            uuid::Uuid::from_bytes(src.0)
        }
    }

    impl From<uuid::Uuid> for Uuid {
        fn from(src: uuid::Uuid) -> Self {
            Self(src.into_bytes())
        }
    }
}

#[cfg(feature = "serde")]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
mod serde_support {
    use super::{fmt, Uuid};
    use serde::{de, Deserializer, Serializer};

    impl serde::Serialize for Uuid {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            if serializer.is_human_readable() {
                serializer.serialize_str(&self.encode())
            } else {
                serializer.serialize_bytes(self.as_bytes())
            }
        }
    }

    impl<'de> serde::Deserialize<'de> for Uuid {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            if deserializer.is_human_readable() {
                deserializer.deserialize_str(VisitorImpl)
            } else {
                deserializer.deserialize_bytes(VisitorImpl)
            }
        }
    }

    struct VisitorImpl;

    impl<'de> de::Visitor<'de> for VisitorImpl {
        type Value = Uuid;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(formatter, "a UUID representation")
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
            value.parse::<Self::Value>().map_err(de::Error::custom)
        }

        fn visit_bytes<E: de::Error>(self, value: &[u8]) -> Result<Self::Value, E> {
            <[u8; 16]>::try_from(value)
                .map(Self::Value::from)
                .map_err(de::Error::custom)
        }
    }

    #[cfg(test)]
    mod tests {
        use super::Uuid;
        use serde_test::{assert_tokens, Configure, Token};

        /// Serializes and deserializes prepared cases correctly
        #[test]
        fn serializes_and_deserializes_prepared_cases_correctly() {
            let cases = [
                ("00000000-0000-0000-0000-000000000000", &[0u8; 16]),
                (
                    "6ba7b811-9dad-11d1-80b4-00c04fd430c8",
                    &[
                        107, 167, 184, 17, 157, 173, 17, 209, 128, 180, 0, 192, 79, 212, 48, 200,
                    ],
                ),
                (
                    "b63cdfa4-3df9-568e-97ae-006c5b8fd652",
                    &[
                        182, 60, 223, 164, 61, 249, 86, 142, 151, 174, 0, 108, 91, 143, 214, 82,
                    ],
                ),
            ];

            for (text, bytes) in cases {
                let e = text.parse::<Uuid>().unwrap();
                assert_tokens(&e.readable(), &[Token::String(text)]);
                assert_tokens(&e.compact(), &[Token::Bytes(bytes)]);
            }
        }
    }
}
