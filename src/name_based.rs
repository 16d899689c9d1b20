//! Name-based UUIDs (version 3 and version 5)

use crate::{Fields, Uuid};
use digest::Digest;

/// The hash function of a name-based UUID.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum NameHash {
    /// MD5, producing version-3 UUIDs.
    Md5,
    /// SHA-1 truncated to 128 bits, producing version-5 UUIDs.
    Sha1,
}

impl NameHash {
    /// Returns the UUID version number that corresponds to the hash function.
    pub const fn version(self) -> u8 {
        match self {
            Self::Md5 => 3,
            Self::Sha1 => 5,
        }
    }
}

/// Generates a UUIDv3 object from a namespace and a name.
///
/// # Examples
///
/// ```rust
/// use pguuid::{uuid_v3, Uuid};
///
/// let uuid = uuid_v3(&Uuid::NAMESPACE_DNS, b"python.org");
/// assert_eq!(uuid.to_string(), "6fa459ea-ee8a-3ca4-894e-db77e160355e");
/// ```
pub fn uuid_v3(namespace: &Uuid, name: &[u8]) -> Uuid {
    uuid_name_based(NameHash::Md5, namespace, name)
}

/// Generates a UUIDv5 object from a namespace and a name.
///
/// # Examples
///
/// ```rust
/// use pguuid::{uuid_v5, Uuid};
///
/// let uuid = uuid_v5(&Uuid::NAMESPACE_URL, b"www.example.com");
/// assert_eq!(uuid.to_string(), "b63cdfa4-3df9-568e-97ae-006c5b8fd652");
/// ```
pub fn uuid_v5(namespace: &Uuid, name: &[u8]) -> Uuid {
    uuid_name_based(NameHash::Sha1, namespace, name)
}

/// Hashes the namespace's canonical bytes followed by the raw `name` bytes, then patches the
/// version and variant bits.
///
/// `name` need not be valid UTF-8. A namespace read from a structure that stores its integer
/// fields in host byte order must go through [`Uuid::to_network_order`] first.
pub fn uuid_name_based(hash: NameHash, namespace: &Uuid, name: &[u8]) -> Uuid {
    let digest = match hash {
        NameHash::Md5 => hash_128::<md5::Md5>(namespace, name),
        NameHash::Sha1 => hash_128::<sha1::Sha1>(namespace, name),
    };

    // the digest is in network order; patch the integer fields in host order
    let host = Uuid::from(digest).to_host_order();
    let mut fields = Fields::from_host_bytes(host.as_bytes());
    fields.set_version(hash.version());
    fields.set_rfc_variant();
    Uuid::from(fields.to_host_bytes()).to_network_order()
}

/// Returns the leading 128 bits of `D(namespace || name)`.
fn hash_128<D: Digest>(namespace: &Uuid, name: &[u8]) -> [u8; 16] {
    let mut hasher = D::new();
    hasher.update(namespace.as_bytes());
    hasher.update(name);
    let mut bytes = [0u8; 16];
    for (dst, src) in bytes.iter_mut().zip(hasher.finalize().iter()) {
        *dst = *src;
    }
    bytes
}
