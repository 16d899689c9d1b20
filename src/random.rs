//! UUIDv4-related functionality

use crate::{RandSource, Result, Uuid};

/// Generates a UUIDv4 object from the random number source passed.
///
/// # Examples
///
/// ```rust
/// use pguuid::{rand_source, uuid_v4_from};
///
/// let uuid = uuid_v4_from(&mut rand_source::os_rand_source())?;
/// println!("{}", uuid); // e.g. "2ca4b2ce-6c13-40d4-bccf-37d222820f6f"
/// # Ok::<(), pguuid::Error>(())
/// ```
pub fn uuid_v4_from(rng: &mut impl RandSource) -> Result<Uuid> {
    let mut bytes = [0u8; 16];
    rng.try_fill_bytes(&mut bytes)?;
    let mut fields = Uuid::from(bytes).fields();
    fields.set_version(4);
    fields.set_rfc_variant();
    Ok(Uuid::from_fields(&fields))
}
