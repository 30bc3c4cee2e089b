//! Inbound Ports (Driving Ports)
//!
//! The API that calling applications use to record and check items.

use crate::error::FilterError;

/// Membership API (Driving Port)
///
/// Items are raw text; digests are hexadecimal text whose first 16
/// characters seed the hashes.
pub trait MembershipApi {
    /// Record an item as seen
    fn add(&mut self, item: &str);

    /// Record a hex digest as seen
    ///
    /// Fails without touching the filter when the digest is malformed.
    fn add_digest(&mut self, digest: &str) -> Result<(), FilterError>;

    /// Whether an item has possibly been seen
    fn contains(&self, item: &str) -> bool;

    /// Whether a hex digest has possibly been seen
    fn contains_digest(&self, digest: &str) -> Result<bool, FilterError>;

    /// Fraction of set bits, as a fill diagnostic
    fn fill_ratio(&self) -> f64;
}
