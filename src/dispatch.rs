//! UUID kinds and the generator that routes each kind to its construction path.

use std::{fmt, str, sync};

use crate::name_based::{uuid_name_based, NameHash};
use crate::{fixed_value, uuid_v4_from, Error, NodeIdSource, RandSource, Result, Uuid};
use crate::{SystemClock, TimeSource, V1Generator};

/// A requested kind of UUID.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Kind {
    /// The Nil UUID.
    Nil,
    /// The DNS namespace UUID.
    NsDns,
    /// The URL namespace UUID.
    NsUrl,
    /// The ISO OID namespace UUID.
    NsOid,
    /// The X.500 namespace UUID.
    NsX500,
    /// Version 1 with the node identifier of the host.
    V1,
    /// Version 1 with a random multicast node identifier.
    V1Mc,
    /// Version 3 (MD5 of namespace and name).
    V3,
    /// Version 4 (random).
    V4,
    /// Version 5 (SHA-1 of namespace and name).
    V5,
}

impl Kind {
    /// All kinds in declaration order.
    pub const ALL: [Kind; 10] = [
        Kind::Nil,
        Kind::NsDns,
        Kind::NsUrl,
        Kind::NsOid,
        Kind::NsX500,
        Kind::V1,
        Kind::V1Mc,
        Kind::V3,
        Kind::V4,
        Kind::V5,
    ];

    /// Returns the UUID version this kind generates, or `None` for the constant kinds.
    pub const fn version(self) -> Option<u8> {
        match self {
            Kind::Nil | Kind::NsDns | Kind::NsUrl | Kind::NsOid | Kind::NsX500 => None,
            Kind::V1 | Kind::V1Mc => Some(1),
            Kind::V3 => Some(3),
            Kind::V4 => Some(4),
            Kind::V5 => Some(5),
        }
    }

    /// Returns the short name of the kind.
    pub const fn name(self) -> &'static str {
        match self {
            Kind::Nil => "nil",
            Kind::NsDns => "ns_dns",
            Kind::NsUrl => "ns_url",
            Kind::NsOid => "ns_oid",
            Kind::NsX500 => "ns_x500",
            Kind::V1 => "v1",
            Kind::V1Mc => "v1mc",
            Kind::V3 => "v3",
            Kind::V4 => "v4",
            Kind::V5 => "v5",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl str::FromStr for Kind {
    type Err = Error;

    fn from_str(src: &str) -> Result<Self> {
        Kind::ALL
            .into_iter()
            .find(|k| k.name().eq_ignore_ascii_case(src))
            .ok_or_else(|| Error::InvalidArgument(format!("unknown UUID kind '{}'", src)))
    }
}

/// Generates UUIDs of every [`Kind`] from shared sources.
///
/// The clock state is behind one mutex so that version-1 calls from several threads never reuse
/// a clock sequence; the random number source for version 4 is behind another.
///
/// # Examples
///
/// ```rust
/// use pguuid::{node::FixedNode, rand_source, Generator, Kind, Uuid};
///
/// let (rng_v1, rng_v4) = (rand_source::os_rand_source(), rand_source::os_rand_source());
/// let g = Generator::new(rng_v1, rng_v4, FixedNode([0x02, 0, 0, 0, 0, 1]));
/// let ns = g.generate(Kind::NsUrl, None, None)?;
/// let e = g.generate(Kind::V5, Some(&ns), Some(b"www.example.com".as_slice()))?;
/// assert_eq!(e.to_string(), "b63cdfa4-3df9-568e-97ae-006c5b8fd652");
/// # Ok::<(), pguuid::Error>(())
/// ```
#[derive(Debug)]
pub struct Generator<R, N, T = SystemClock> {
    v1: sync::Mutex<V1Generator<R, N, T>>,
    rng: sync::Mutex<R>,
}

impl<R: RandSource, N: NodeIdSource> Generator<R, N> {
    /// Creates a generator that reads the system clock.
    ///
    /// `rng_v1` feeds the clock sequence and multicast nodes; `rng_v4` feeds version 4. Pass two
    /// independently seeded sources: a pseudorandom generator cloned into both would make the
    /// two paths return the same bytes.
    pub fn new(rng_v1: R, rng_v4: R, node_source: N) -> Self {
        Self::with_v1_generator(V1Generator::new(rng_v1, node_source), rng_v4)
    }
}

impl<R: RandSource, N: NodeIdSource, T: TimeSource> Generator<R, N, T> {
    /// Creates a generator from a prepared version-1 generator and a random number source for
    /// version 4.
    pub fn with_v1_generator(v1: V1Generator<R, N, T>, rng: R) -> Self {
        Self {
            v1: sync::Mutex::new(v1),
            rng: sync::Mutex::new(rng),
        }
    }

    /// Generates a UUID of `kind`.
    ///
    /// `namespace` and `name` are required by [`Kind::V3`] and [`Kind::V5`] and ignored by the
    /// other kinds.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidArgument`] if a name-based kind lacks `namespace` or `name`.
    /// - [`Error::RandomSourceUnavailable`] if the random number source fails.
    pub fn generate(
        &self,
        kind: Kind,
        namespace: Option<&Uuid>,
        name: Option<&[u8]>,
    ) -> Result<Uuid> {
        match kind {
            Kind::V1 => self.lock_v1().generate(),
            Kind::V1Mc => self.lock_v1().generate_mc(),
            Kind::V4 => uuid_v4_from(&mut *self.lock_rng()),
            _ => generate_stateless(kind, namespace, name)?
                .ok_or_else(|| Error::InvalidArgument(format!("{} needs a generator", kind))),
        }
    }

    /// Returns a copy of the current version-1 clock state.
    pub fn clock_state(&self) -> crate::ClockState {
        *self.lock_v1().state()
    }

    // A panic while holding a lock cannot leave the state half-written, so poisoning is ignored.
    fn lock_v1(&self) -> sync::MutexGuard<'_, V1Generator<R, N, T>> {
        self.v1.lock().unwrap_or_else(sync::PoisonError::into_inner)
    }

    fn lock_rng(&self) -> sync::MutexGuard<'_, R> {
        self.rng.lock().unwrap_or_else(sync::PoisonError::into_inner)
    }
}

/// Builds the kinds that need neither clock state nor randomness, returning `Ok(None)` for
/// [`Kind::V1`], [`Kind::V1Mc`], and [`Kind::V4`].
pub(crate) fn generate_stateless(
    kind: Kind,
    namespace: Option<&Uuid>,
    name: Option<&[u8]>,
) -> Result<Option<Uuid>> {
    match kind {
        Kind::Nil | Kind::NsDns | Kind::NsUrl | Kind::NsOid | Kind::NsX500 => Ok(fixed_value(kind)),
        Kind::V3 => name_based(NameHash::Md5, kind, namespace, name).map(Some),
        Kind::V5 => name_based(NameHash::Sha1, kind, namespace, name).map(Some),
        Kind::V1 | Kind::V1Mc | Kind::V4 => Ok(None),
    }
}

fn name_based(
    hash: NameHash,
    kind: Kind,
    namespace: Option<&Uuid>,
    name: Option<&[u8]>,
) -> Result<Uuid> {
    match (namespace, name) {
        (Some(namespace), Some(name)) => Ok(uuid_name_based(hash, namespace, name)),
        (None, _) => Err(Error::InvalidArgument(format!("{} requires a namespace", kind))),
        (_, None) => Err(Error::InvalidArgument(format!("{} requires a name", kind))),
    }
}
