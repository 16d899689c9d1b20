//! Default generator and entry point functions.

#![cfg(feature = "global_gen")]
#![cfg_attr(docsrs, doc(cfg(feature = "global_gen")))]

use std::sync;

use crate::dispatch::generate_stateless;
use crate::{uuid_v3, uuid_v5, Kind, Result, Uuid};
use inner::{GlobalGen, GlobalGenInner};

/// Runs `f` with the process-wide global generator, creating one if none exists.
///
/// The process-wide lock only covers creation and the fork check; `f` runs under the
/// per-version locks of [`Generator`](crate::Generator) alone.
fn with_global_gen<T>(f: impl FnOnce(&GlobalGen) -> Result<T>) -> Result<T> {
    static G: sync::Mutex<Option<GlobalGenInner>> = sync::Mutex::new(None);
    let generator = {
        let mut guard = G.lock().unwrap_or_else(sync::PoisonError::into_inner);
        let inner = match guard.take() {
            Some(inner) => inner,
            None => GlobalGenInner::new()?,
        };
        guard.insert(inner).get()?
    };
    f(&generator)
}

/// Generates a UUID of `kind` with the process-wide generator.
///
/// The global generator is only touched for [`Kind::V1`], [`Kind::V1Mc`], and [`Kind::V4`]; the
/// other kinds never fail because of the random number source.
///
/// # Examples
///
/// ```rust
/// use pguuid::{Kind, Uuid};
///
/// let name = b"python.org".as_slice();
/// let e = pguuid::generate(Kind::V3, Some(&Uuid::NAMESPACE_DNS), Some(name))?;
/// assert_eq!(e.to_string(), "6fa459ea-ee8a-3ca4-894e-db77e160355e");
/// # Ok::<(), pguuid::Error>(())
/// ```
pub fn generate(kind: Kind, namespace: Option<&Uuid>, name: Option<&[u8]>) -> Result<Uuid> {
    match generate_stateless(kind, namespace, name)? {
        Some(value) => Ok(value),
        None => with_global_gen(|g| g.generate(kind, namespace, name)),
    }
}

/// Returns the Nil UUID.
pub const fn uuid_nil() -> Uuid {
    Uuid::NIL
}

/// Returns the DNS namespace UUID.
pub const fn uuid_ns_dns() -> Uuid {
    Uuid::NAMESPACE_DNS
}

/// Returns the URL namespace UUID.
pub const fn uuid_ns_url() -> Uuid {
    Uuid::NAMESPACE_URL
}

/// Returns the ISO OID namespace UUID.
pub const fn uuid_ns_oid() -> Uuid {
    Uuid::NAMESPACE_OID
}

/// Returns the X.500 namespace UUID.
pub const fn uuid_ns_x500() -> Uuid {
    Uuid::NAMESPACE_X500
}

/// Generates a UUIDv1 object with the node identifier of the host.
///
/// This function employs a global generator and guarantees distinct clock sequences process-wide
/// for UUIDs generated within the same timestamp tick. On Unix, this function resets the generator
/// when the process ID changes (i.e., upon process forks) to prevent collisions across processes.
///
/// # Examples
///
/// ```rust
/// let uuid = pguuid::uuid_generate_v1()?;
/// println!("{}", uuid); // e.g., "1c3e0f2a-8d7b-11ef-9b1e-0242ac120002"
/// # Ok::<(), pguuid::Error>(())
/// ```
pub fn uuid_generate_v1() -> Result<Uuid> {
    with_global_gen(|g| g.generate(Kind::V1, None, None))
}

/// Generates a UUIDv1 object with a random multicast node identifier.
pub fn uuid_generate_v1mc() -> Result<Uuid> {
    with_global_gen(|g| g.generate(Kind::V1Mc, None, None))
}

/// Generates a UUIDv3 object.
pub fn uuid_generate_v3(namespace: &Uuid, name: &[u8]) -> Uuid {
    uuid_v3(namespace, name)
}

/// Generates a UUIDv4 object.
///
/// # Examples
///
/// ```rust
/// let uuid = pguuid::uuid_generate_v4()?;
/// println!("{}", uuid); // e.g., "2ca4b2ce-6c13-40d4-bccf-37d222820f6f"
/// # Ok::<(), pguuid::Error>(())
/// ```
pub fn uuid_generate_v4() -> Result<Uuid> {
    with_global_gen(|g| g.generate(Kind::V4, None, None))
}

/// Generates a UUIDv5 object.
pub fn uuid_generate_v5(namespace: &Uuid, name: &[u8]) -> Uuid {
    uuid_v5(namespace, name)
}

mod inner {
    use rand::rngs::{adapter::ReseedingRng, OsRng};
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Core;
    use std::sync::Arc;

    use crate::rand_source::Adapter;
    use crate::{Error, Generator, Result, V1Generator};

    /// The type alias for the random number generator of the global generator.
    ///
    /// The global generator currently employs [`ChaCha12Core`] with [`ReseedingRng`] wrapper to
    /// emulate the strategy used by [`rand::rngs::ThreadRng`].
    pub type GlobalGenRng = Adapter<ReseedingRng<ChaCha12Core, OsRng>>;

    #[cfg(feature = "hardware_node")]
    type GlobalNode = crate::node::HardwareNode<GlobalGenRng>;

    #[cfg(not(feature = "hardware_node"))]
    type GlobalNode = crate::node::RandomMulticastNode<GlobalGenRng>;

    pub type GlobalGen = Generator<GlobalGenRng, GlobalNode>;

    fn new_rng() -> Result<GlobalGenRng> {
        let core = ChaCha12Core::from_rng(OsRng).map_err(Error::RandomSourceUnavailable)?;
        Ok(Adapter(ReseedingRng::new(core, 1024 * 64, OsRng)))
    }

    #[cfg(feature = "hardware_node")]
    fn new_node() -> Result<GlobalNode> {
        Ok(crate::node::HardwareNode(new_rng()?))
    }

    #[cfg(not(feature = "hardware_node"))]
    fn new_node() -> Result<GlobalNode> {
        Ok(crate::node::RandomMulticastNode(new_rng()?))
    }

    /// A thin wrapper to reset the state when the process ID changes (i.e., upon Unix forks).
    pub struct GlobalGenInner {
        #[cfg(unix)]
        pid: u32,
        generator: Arc<GlobalGen>,
    }

    impl GlobalGenInner {
        pub fn new() -> Result<Self> {
            let v1 = V1Generator::new(new_rng()?, new_node()?);
            Ok(Self {
                #[cfg(unix)]
                pid: std::process::id(),
                generator: Arc::new(Generator::with_v1_generator(v1, new_rng()?)),
            })
        }

        /// Returns a handle to the inner [`Generator`] instance, resetting the generator state
        /// on Unix if the process ID has changed.
        pub fn get(&mut self) -> Result<Arc<GlobalGen>> {
            #[cfg(unix)]
            if self.pid != std::process::id() {
                log::debug!("process ID changed; resetting global generator");
                *self = Self::new()?;
            }
            Ok(Arc::clone(&self.generator))
        }
    }
}
