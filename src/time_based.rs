//! UUIDv1 generator and related types

use crate::node::random_multicast_node;
use crate::{Fields, NodeIdSource, RandSource, Result, Uuid};

/// Number of 100-nanosecond intervals between the Gregorian reform (1582-10-15) and the Unix
/// epoch.
pub const GREGORIAN_OFFSET: u64 = 0x01b2_1dd2_1381_4000;

const MAX_TIMESTAMP: u64 = (1 << 60) - 1;
const MAX_CLOCK_SEQ: u16 = (1 << 14) - 1;

/// A trait that supplies the 60-bit timestamp of a version-1 UUID.
///
/// The source may tick more coarsely than every 100 nanoseconds; [`V1Generator`] moves the
/// timestamp ahead by itself when a single tick runs out of clock sequence values.
pub trait TimeSource {
    /// Returns the current time in 100-nanosecond intervals since 1582-10-15 00:00:00 UTC.
    fn timestamp(&mut self) -> u64;
}

/// [`TimeSource`] backed by [`std::time::SystemTime`].
///
/// A system clock set before the Unix epoch is read as the Unix epoch.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct SystemClock;

impl TimeSource for SystemClock {
    fn timestamp(&mut self) -> u64 {
        use std::time;
        let since_unix = time::SystemTime::now()
            .duration_since(time::UNIX_EPOCH)
            .unwrap_or_default();
        ((since_unix.as_nanos() / 100) as u64 + GREGORIAN_OFFSET) & MAX_TIMESTAMP
    }
}

/// The last-used time value of a version-1 generator.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct ClockState {
    /// The largest timestamp handed out so far.
    pub last_timestamp: u64,

    /// The 14-bit clock sequence, or `None` until the first generation seeds it.
    pub clock_seq: Option<u16>,

    /// The node identifier used by [`V1Generator::generate`], or `None` until the first lookup.
    pub node_id: Option<[u8; 6]>,

    /// The number of clock sequence increments since `last_timestamp` last advanced.
    pub seq_bumps: u16,
}

/// Represents a UUIDv1 generator that encapsulates the clock state and guarantees distinct clock
/// sequences for UUIDs generated within the same timestamp tick.
///
/// This type provides the interface to customize the random number generator, node identifier,
/// and system clock of a UUIDv1 generator. Wrap it in a `Mutex` to share the clock state between
/// threads, so that reading the last timestamp, bumping the clock sequence, and writing both back
/// happen as one step.
///
/// # Examples
///
/// ```rust
/// use pguuid::{node::FixedNode, rand_source, V1Generator};
/// use std::{sync, thread};
///
/// let node = FixedNode([0x02, 0x00, 0x5e, 0x10, 0x00, 0x01]);
/// let g = sync::Arc::new(sync::Mutex::new(V1Generator::new(rand_source::os_rand_source(), node)));
/// thread::scope(|s| {
///     for i in 0..4 {
///         let g = sync::Arc::clone(&g);
///         s.spawn(move || {
///             for _ in 0..8 {
///                 println!("{} by thread {}", g.lock().unwrap().generate().unwrap(), i);
///                 thread::yield_now();
///             }
///         });
///     }
/// });
/// ```
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct V1Generator<R, N, T = SystemClock> {
    state: ClockState,
    rng: R,
    node_source: N,
    time_source: T,
}

impl<R: RandSource, N: NodeIdSource> V1Generator<R, N> {
    /// Creates a generator instance that reads the system clock.
    pub const fn new(rng: R, node_source: N) -> Self {
        Self::with_sources(rng, node_source, SystemClock)
    }
}

impl<R: RandSource, N: NodeIdSource, T: TimeSource> V1Generator<R, N, T> {
    /// Creates a generator instance with a specified time source.
    pub const fn with_sources(rng: R, node_source: N, time_source: T) -> Self {
        Self {
            state: ClockState {
                last_timestamp: 0,
                clock_seq: None,
                node_id: None,
                seq_bumps: 0,
            },
            rng,
            node_source,
            time_source,
        }
    }

    /// Replaces the clock state, e.g. to restore one saved from an earlier generator.
    pub fn with_state(mut self, state: ClockState) -> Self {
        self.state = state;
        self
    }

    /// Returns the current clock state.
    pub const fn state(&self) -> &ClockState {
        &self.state
    }

    /// Generates a new UUIDv1 object with the node identifier of the node source.
    pub fn generate(&mut self) -> Result<Uuid> {
        let node = match self.state.node_id {
            Some(node) => node,
            None => {
                let node = self.node_source.node_id()?;
                self.state.node_id = Some(node);
                node
            }
        };
        let timestamp = self.time_source.timestamp();
        self.generate_core(timestamp, node)
    }

    /// Generates a new UUIDv1 object with a random multicast node identifier instead of the node
    /// source's.
    pub fn generate_mc(&mut self) -> Result<Uuid> {
        let node = random_multicast_node(&mut self.rng)?;
        let timestamp = self.time_source.timestamp();
        self.generate_core(timestamp, node)
    }

    /// Generates a new UUIDv1 object from the `timestamp` and `node` passed, advancing the clock
    /// sequence if `timestamp` is not greater than the last one.
    ///
    /// Bits of `timestamp` above the 60th are ignored. Once all 2^14 clock sequence values have
    /// been used since the last timestamp advance, this method increments the last timestamp by
    /// one and uses it instead of `timestamp`, so a coarse clock never makes the sequence wrap
    /// onto a UUID it already returned.
    pub fn generate_core(&mut self, timestamp: u64, node: [u8; 6]) -> Result<Uuid> {
        let mut timestamp = timestamp & MAX_TIMESTAMP;
        let clock_seq = match self.state.clock_seq {
            None => {
                let mut buf = [0u8; 2];
                self.rng.try_fill_bytes(&mut buf)?;
                let seeded = u16::from_be_bytes(buf) & MAX_CLOCK_SEQ;
                log::debug!("seeded clock sequence {:#06x}", seeded);
                self.state.seq_bumps = 0;
                seeded
            }
            Some(prev) if timestamp <= self.state.last_timestamp => {
                if self.state.seq_bumps < MAX_CLOCK_SEQ {
                    log::trace!("timestamp did not advance; bumping clock sequence");
                    self.state.seq_bumps += 1;
                    prev.wrapping_add(1) & MAX_CLOCK_SEQ
                } else {
                    log::debug!("clock sequence exhausted; borrowing next timestamp tick");
                    timestamp = (self.state.last_timestamp + 1).min(MAX_TIMESTAMP);
                    self.state.seq_bumps = 0;
                    prev
                }
            }
            Some(prev) => {
                self.state.seq_bumps = 0;
                prev
            }
        };
        self.state.clock_seq = Some(clock_seq);
        self.state.last_timestamp = self.state.last_timestamp.max(timestamp);

        Ok(Uuid::from_fields(&Fields {
            time_low: timestamp as u32,
            time_mid: (timestamp >> 32) as u16,
            time_hi_and_version: 0x1000 | (timestamp >> 48) as u16,
            clock_seq_hi_and_reserved: 0x80 | (clock_seq >> 8) as u8,
            clock_seq_low: clock_seq as u8,
            node,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::{ClockState, SystemClock, TimeSource, V1Generator, GREGORIAN_OFFSET};
    use crate::node::{FixedNode, RandomMulticastNode};
    use crate::rand_source::{tests::FailingSource, Adapter};
    use crate::{Error, Uuid, Variant};
    use rand::rngs::ThreadRng;

    type ThreadGen = V1Generator<Adapter<ThreadRng>, FixedNode, StoppedClock>;

    const NODE: [u8; 6] = [0x00, 0xc0, 0x4f, 0xd4, 0x30, 0xc8];

    /// A clock that never advances
    #[derive(Default)]
    struct StoppedClock(u64);

    impl TimeSource for StoppedClock {
        fn timestamp(&mut self) -> u64 {
            self.0
        }
    }

    fn stopped_gen(ts: u64) -> ThreadGen {
        V1Generator::with_sources(Adapter::default(), FixedNode(NODE), StoppedClock(ts))
    }

    /// Encodes prepared fields correctly
    #[test]
    fn encodes_prepared_fields_correctly() {
        // the DNS namespace UUID is itself a version-1 UUID
        let mut g = stopped_gen(0).with_state(ClockState {
            last_timestamp: 0,
            clock_seq: Some(0x00b4),
            ..ClockState::default()
        });
        let e = g.generate_core(0x01d1_9dad_6ba7_b810, NODE).unwrap();
        assert_eq!(e, Uuid::NAMESPACE_DNS);
        assert_eq!(g.state().clock_seq, Some(0x00b4));
        assert_eq!(g.state().last_timestamp, 0x01d1_9dad_6ba7_b810);
    }

    /// Yields distinct clock sequences within same timestamp tick
    #[test]
    fn yields_distinct_clock_sequences_within_same_timestamp_tick() {
        let mut g = stopped_gen(0x01ed_0000_0000_0000);
        let first = g.generate().unwrap();
        let second = g.generate().unwrap();
        let mc = g.generate_mc().unwrap();
        assert_eq!(first.as_bytes()[..8], second.as_bytes()[..8]);
        assert_ne!(first.as_bytes()[8..10], second.as_bytes()[8..10]);
        assert_ne!(second.as_bytes()[8..10], mc.as_bytes()[8..10]);

        let seq = |e: &Uuid| u16::from_be_bytes([e.as_bytes()[8] & 0x3f, e.as_bytes()[9]]);
        assert_eq!(seq(&second), (seq(&first) + 1) & 0x3fff);
        assert_eq!(seq(&mc), (seq(&first) + 2) & 0x3fff);
    }

    /// Keeps clock sequence while timestamp advances
    #[test]
    fn keeps_clock_sequence_while_timestamp_advances() {
        let mut g = stopped_gen(0).with_state(ClockState {
            last_timestamp: 1_000,
            clock_seq: Some(0x1234),
            node_id: Some(NODE),
            ..ClockState::default()
        });
        for ts in 1_001..1_100 {
            let e = g.generate_core(ts, NODE).unwrap();
            assert_eq!(e.as_bytes()[8..10], [0x80 | 0x12, 0x34]);
        }
        assert_eq!(g.state().last_timestamp, 1_099);
    }

    /// Bumps clock sequence when clock goes backwards
    #[test]
    fn bumps_clock_sequence_when_clock_goes_backwards() {
        let mut g = stopped_gen(0).with_state(ClockState {
            last_timestamp: 5_000,
            clock_seq: Some(0x3fff),
            node_id: Some(NODE),
            ..ClockState::default()
        });
        let e = g.generate_core(4_000, NODE).unwrap();
        assert_eq!(e.as_bytes()[8..10], [0x80, 0x00]);
        assert_eq!(g.state().last_timestamp, 5_000);

        let e = g.generate_core(4_500, NODE).unwrap();
        assert_eq!(e.as_bytes()[8..10], [0x80, 0x01]);

        let e = g.generate_core(5_001, NODE).unwrap();
        assert_eq!(e.as_bytes()[8..10], [0x80, 0x01]);
        assert_eq!(g.state().last_timestamp, 5_001);
    }

    /// Borrows next timestamp tick instead of wrapping clock sequence
    #[test]
    fn borrows_next_timestamp_tick_instead_of_wrapping_clock_sequence() {
        use std::collections::HashSet;
        const N_SEQ: usize = 1 << 14;

        let mut g = stopped_gen(1_000);
        let samples: Vec<Uuid> = (0..2 * N_SEQ + 1).map(|_| g.generate().unwrap()).collect();
        let s: HashSet<&Uuid> = samples.iter().collect();
        assert_eq!(s.len(), samples.len());

        let timestamp = |e: &Uuid| u64::from(e.fields().time_low);
        assert!(samples[..N_SEQ].iter().all(|e| timestamp(e) == 1_000));
        assert_eq!(timestamp(&samples[N_SEQ]), 1_001);
        assert_eq!(timestamp(&samples[2 * N_SEQ]), 1_002);
        assert_eq!(g.state().last_timestamp, 1_002);

        // the borrowed tick keeps the clock sequence in use
        assert_eq!(
            samples[N_SEQ - 1].as_bytes()[8..10],
            samples[N_SEQ].as_bytes()[8..10]
        );
    }

    /// Sets correct variant and version bits
    #[test]
    fn sets_correct_variant_and_version_bits() {
        let mut g = V1Generator::new(Adapter(rand::thread_rng()), FixedNode(NODE));
        for _ in 0..1_000 {
            for e in [g.generate().unwrap(), g.generate_mc().unwrap()] {
                assert_eq!(e.variant(), Variant::Var10);
                assert_eq!(e.version(), Some(1));
            }
        }
    }

    /// Reuses looked-up node for v1 and draws fresh multicast node for v1mc
    #[test]
    fn reuses_looked_up_node_for_v1_and_draws_fresh_multicast_node_for_v1mc() {
        let mut g = V1Generator::new(
            Adapter(rand::thread_rng()),
            RandomMulticastNode(Adapter(rand::thread_rng())),
        );
        let node = g.generate().unwrap().as_bytes()[10..].to_vec();
        assert_eq!(g.state().node_id.map(|n| n.to_vec()), Some(node.clone()));
        for _ in 0..100 {
            assert_eq!(g.generate().unwrap().as_bytes()[10..], node[..]);
            let mc = g.generate_mc().unwrap();
            assert_eq!(mc.as_bytes()[10] & 0x03, 0x03);
            assert_ne!(mc.as_bytes()[10..], node[..]);
        }
    }

    /// Generates 100k identifiers without collision
    #[test]
    fn generates_100k_identifiers_without_collision() {
        use std::collections::HashSet;
        let mut g = V1Generator::new(Adapter(rand::thread_rng()), FixedNode(NODE));
        let s: HashSet<Uuid> = (0..100_000).map(|_| g.generate().unwrap()).collect();
        assert_eq!(s.len(), 100_000);
    }

    /// Encodes up-to-date timestamp
    #[test]
    fn encodes_up_to_date_timestamp() {
        use std::time;
        let mut g = V1Generator::new(Adapter(rand::thread_rng()), FixedNode(NODE));
        for _ in 0..10_000 {
            let ts_now = (time::SystemTime::now()
                .duration_since(time::UNIX_EPOCH)
                .expect("clock may have gone backwards")
                .as_millis()) as i64;
            let fs = g.generate().unwrap().fields();
            let timestamp = u64::from(fs.time_low)
                | u64::from(fs.time_mid) << 32
                | u64::from(fs.time_hi_and_version & 0x0fff) << 48;
            let ms = ((timestamp - GREGORIAN_OFFSET) / 10_000) as i64;
            assert!((ts_now - ms).abs() < 16);
        }
    }

    /// Reads system clock after Gregorian offset
    #[test]
    fn reads_system_clock_after_gregorian_offset() {
        // 2020-01-01T00:00:00Z
        assert!(SystemClock.timestamp() > GREGORIAN_OFFSET + 1_577_836_800 * 10_000_000);
    }

    /// Reports random source failure when seeding clock sequence
    #[test]
    fn reports_random_source_failure_when_seeding_clock_sequence() {
        let mut g = V1Generator::with_sources(FailingSource, FixedNode(NODE), StoppedClock(1));
        assert!(matches!(
            g.generate(),
            Err(Error::RandomSourceUnavailable(_))
        ));
        assert!(matches!(
            g.generate_mc(),
            Err(Error::RandomSourceUnavailable(_))
        ));
        assert_eq!(g.state().clock_seq, None);

        // no entropy is needed once the clock sequence is known
        let mut g = g.with_state(ClockState {
            last_timestamp: 0,
            clock_seq: Some(7),
            ..ClockState::default()
        });
        assert!(g.generate().is_ok());
    }
}
