//! Nil UUID and the well-known namespace UUIDs

use crate::{Kind, Uuid};

impl Uuid {
    /// Nil UUID (00000000-0000-0000-0000-000000000000)
    pub const NIL: Self = Self([0x00; 16]);

    /// Namespace for fully-qualified domain names (6ba7b810-9dad-11d1-80b4-00c04fd430c8)
    pub const NAMESPACE_DNS: Self = Self::namespace(0x10);

    /// Namespace for URLs (6ba7b811-9dad-11d1-80b4-00c04fd430c8)
    pub const NAMESPACE_URL: Self = Self::namespace(0x11);

    /// Namespace for ISO OIDs (6ba7b812-9dad-11d1-80b4-00c04fd430c8)
    pub const NAMESPACE_OID: Self = Self::namespace(0x12);

    /// Namespace for X.500 DNs in DER or text format (6ba7b814-9dad-11d1-80b4-00c04fd430c8)
    pub const NAMESPACE_X500: Self = Self::namespace(0x14);

    /// The four RFC 4122 namespaces differ only in the last byte of `time_low`.
    const fn namespace(time_low_lsb: u8) -> Self {
        Self([
            0x6b,
            0xa7,
            0xb8,
            time_low_lsb,
            0x9d,
            0xad,
            0x11,
            0xd1,
            0x80,
            0xb4,
            0x00,
            0xc0,
            0x4f,
            0xd4,
            0x30,
            0xc8,
        ])
    }
}

/// Returns the constant UUID for `kind`, or `None` if `kind` is generated rather than fixed.
pub const fn fixed_value(kind: Kind) -> Option<Uuid> {
    match kind {
        Kind::Nil => Some(Uuid::NIL),
        Kind::NsDns => Some(Uuid::NAMESPACE_DNS),
        Kind::NsUrl => Some(Uuid::NAMESPACE_URL),
        Kind::NsOid => Some(Uuid::NAMESPACE_OID),
        Kind::NsX500 => Some(Uuid::NAMESPACE_X500),
        Kind::V1 | Kind::V1Mc | Kind::V3 | Kind::V4 | Kind::V5 => None,
    }
}

#[cfg(test)]
mod tests {
    use super::fixed_value;
    use crate::{Kind, Uuid};

    /// Returns Nil and namespace UUIDs
    #[test]
    fn returns_nil_and_namespace_uuids() {
        let cases = [
            (Kind::Nil, "00000000-0000-0000-0000-000000000000"),
            (Kind::NsDns, "6ba7b810-9dad-11d1-80b4-00c04fd430c8"),
            (Kind::NsUrl, "6ba7b811-9dad-11d1-80b4-00c04fd430c8"),
            (Kind::NsOid, "6ba7b812-9dad-11d1-80b4-00c04fd430c8"),
            (Kind::NsX500, "6ba7b814-9dad-11d1-80b4-00c04fd430c8"),
        ];
        for (kind, text) in cases {
            let e = fixed_value(kind).unwrap();
            assert_eq!(&e.encode() as &str, text);
            assert_eq!(text.parse::<Uuid>(), Ok(e));
        }
    }

    /// Has no fixed value for generated kinds
    #[test]
    fn has_no_fixed_value_for_generated_kinds() {
        for kind in [Kind::V1, Kind::V1Mc, Kind::V3, Kind::V4, Kind::V5] {
            assert_eq!(fixed_value(kind), None);
        }
    }
}
