//! Node identifier sources for time-based UUIDs.

use crate::{RandSource, Result};

/// The multicast bit (lowest bit of the first octet) plus the locally administered bit.
const MULTICAST_LOCAL_ADMIN: u8 = 0x03;

/// A capability that supplies the 48-bit node field of a version-1 UUID.
pub trait NodeIdSource {
    /// Returns a node identifier.
    fn node_id(&mut self) -> Result<[u8; 6]>;
}

/// Draws 48 random bits and marks them as a multicast, locally administered address so that the
/// result cannot collide with a real IEEE 802 hardware address.
pub fn random_multicast_node(rng: &mut impl RandSource) -> Result<[u8; 6]> {
    let mut node = [0u8; 6];
    rng.try_fill_bytes(&mut node)?;
    node[0] |= MULTICAST_LOCAL_ADMIN;
    Ok(node)
}

/// Returns a fresh random multicast node identifier on every call.
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct RandomMulticastNode<R>(/** The random number source. */ pub R);

impl<R: RandSource> NodeIdSource for RandomMulticastNode<R> {
    fn node_id(&mut self) -> Result<[u8; 6]> {
        random_multicast_node(&mut self.0)
    }
}

/// Always returns the same node identifier.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct FixedNode(/** The node identifier. */ pub [u8; 6]);

impl NodeIdSource for FixedNode {
    fn node_id(&mut self) -> Result<[u8; 6]> {
        Ok(self.0)
    }
}

/// Reads the MAC address of a network interface, falling back to a random multicast node when the
/// host has none.
///
/// Every call performs a fresh lookup; [`V1Generator`](crate::V1Generator) keeps the result in its
/// [`ClockState`](crate::ClockState).
#[cfg(feature = "hardware_node")]
#[cfg_attr(docsrs, doc(cfg(feature = "hardware_node")))]
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct HardwareNode<R>(/** The random number source for the fallback node. */ pub R);

#[cfg(feature = "hardware_node")]
impl<R: RandSource> NodeIdSource for HardwareNode<R> {
    fn node_id(&mut self) -> Result<[u8; 6]> {
        match mac_address::get_mac_address() {
            Ok(Some(mac)) if mac.bytes() != [0u8; 6] => {
                log::debug!("using hardware node id {}", mac);
                Ok(mac.bytes())
            }
            Ok(_) => {
                log::warn!("no network interface found; using random multicast node id");
                random_multicast_node(&mut self.0)
            }
            Err(err) => {
                log::warn!("could not read MAC address ({}); using random multicast node id", err);
                random_multicast_node(&mut self.0)
            }
        }
    }
}
