//! Random number source abstraction and its integration with `rand` (v0.8) crate.

use crate::{Error, Result};
use rand::RngCore;

/// A trait that defines the minimum random number generator interface used by the builders.
///
/// Implementations must report exhaustion or inaccessibility of the entropy source as
/// [`Error::RandomSourceUnavailable`] instead of degrading to a predictable fallback.
pub trait RandSource {
    /// Fills `dest` with random data.
    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<()>;
}

/// An adapter that implements [`RandSource`] for [`RngCore`] types.
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct Adapter<T>(/** The wrapped [`RngCore`] type. */ pub T);

impl<T: RngCore> RandSource for Adapter<T> {
    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<()> {
        self.0.try_fill_bytes(dest).map_err(|err| {
            log::warn!("random source failed: {}", err);
            Error::RandomSourceUnavailable(err)
        })
    }
}

/// Creates a source that reads directly from the operating system's entropy source.
pub fn os_rand_source() -> Adapter<rand::rngs::OsRng> {
    Adapter(rand::rngs::OsRng)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::{Adapter, RandSource};
    use crate::{Error, Result};

    /// A source whose entropy is always exhausted
    pub(crate) struct FailingSource;

    impl RandSource for FailingSource {
        fn try_fill_bytes(&mut self, _dest: &mut [u8]) -> Result<()> {
            Err(Error::RandomSourceUnavailable(rand::Error::new(
                std::io::Error::other("entropy exhausted"),
            )))
        }
    }

    /// Fills bytes from wrapped RngCore
    #[test]
    fn fills_bytes_from_wrapped_rng_core() {
        use rand::SeedableRng;
        let mut a = Adapter(rand::rngs::StdRng::seed_from_u64(42));
        let mut b = Adapter(rand::rngs::StdRng::seed_from_u64(42));
        let (mut x, mut y) = ([0u8; 32], [0u8; 32]);
        a.try_fill_bytes(&mut x).unwrap();
        b.try_fill_bytes(&mut y).unwrap();
        assert_eq!(x, y);
        assert_ne!(x, [0u8; 32]);
    }

    /// Reads from operating system
    #[test]
    fn reads_from_operating_system() {
        let mut buf = [0u8; 64];
        super::os_rand_source().try_fill_bytes(&mut buf).unwrap();
        assert_ne!(buf, [0u8; 64]);
    }
}
