//! RFC 4122 UUID generation: the Nil UUID, the well-known namespace UUIDs, and versions 1, 3, 4,
//! and 5
//!
//! ```rust
//! use pguuid::{Kind, Uuid};
//!
//! let uuid = pguuid::uuid_generate_v4()?;
//! println!("{}", uuid); // e.g. "2ca4b2ce-6c13-40d4-bccf-37d222820f6f"
//! println!("{:?}", uuid.as_bytes()); // as 16-byte big-endian array
//!
//! let name = b"www.example.com".as_slice();
//! let uuid = pguuid::generate(Kind::V5, Some(&Uuid::NAMESPACE_URL), Some(name))?;
//! assert_eq!(uuid.to_string(), "b63cdfa4-3df9-568e-97ae-006c5b8fd652");
//! # Ok::<(), pguuid::Error>(())
//! ```
//!
//! See [RFC 4122](https://www.rfc-editor.org/rfc/rfc4122).
//!
//! # Field and bit layout
//!
//! ```text
//!  0                   1                   2                   3
//!  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                            time_low                           |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |            time_mid           |  ver  |        time_hi        |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |var| clk_seq_hi|  clk_seq_low  |           node (0-1)          |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                           node (2-5)                          |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! ```
//!
//! - The 4-bit `ver` field holds 1, 3, 4, or 5 for the generated kinds and 0 for the Nil UUID.
//!   The namespace UUIDs are themselves version-1 UUIDs.
//! - The 2-bit `var` field is set at `10` for every generated UUID.
//! - Version 1 packs a 60-bit count of 100-nanosecond intervals since 1582-10-15 into the
//!   `time_*` fields, a 14-bit clock sequence, and a 48-bit node identifier. The clock sequence
//!   is bumped whenever the clock does not advance between two calls.
//! - Versions 3 and 5 take the leading 128 bits of MD5 or SHA-1 over the namespace's 16 bytes
//!   followed by the name's raw bytes.
//! - Version 4 fills every other bit from a cryptographically strong random number generator.
//!
//! # Customization
//!
//! The `uuid_generate_*` functions share a process-wide [`Generator`]. Build your own
//! [`Generator`] or [`V1Generator`] to inject the random number source, node identifier source,
//! clock, or saved [`ClockState`].

mod id;
pub use id::{Fields, ParseError, Uuid, Variant};

mod error;
pub use error::{Error, Result};

mod fixed;
pub use fixed::fixed_value;

pub mod rand_source;
pub use rand_source::RandSource;

pub mod node;
pub use node::NodeIdSource;

mod time_based;
pub use time_based::{ClockState, SystemClock, TimeSource, V1Generator, GREGORIAN_OFFSET};

mod name_based;
pub use name_based::{uuid_name_based, uuid_v3, uuid_v5, NameHash};

mod random;
pub use random::uuid_v4_from;

mod dispatch;
pub use dispatch::{Generator, Kind};

mod global_gen;
#[cfg(feature = "global_gen")]
pub use global_gen::{
    generate, uuid_generate_v1, uuid_generate_v1mc, uuid_generate_v3, uuid_generate_v4,
    uuid_generate_v5, uuid_nil, uuid_ns_dns, uuid_ns_oid, uuid_ns_url, uuid_ns_x500,
};
