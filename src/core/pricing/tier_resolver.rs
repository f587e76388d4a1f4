//! Tier lookup by quantity

use crate::core::models::Tier;

/// Find the tier that covers `quantity`.
///
/// Scans in order and returns the first match, so if a catalog ever holds
/// overlapping tiers the earlier one wins. Returns `None` when the quantity
/// falls below the first tier or above every bounded tier.
#[must_use]
pub fn resolve_tier(tiers: &[Tier], quantity: u32) -> Option<&Tier> {
    tiers.iter().find(|tier| tier.contains(quantity))
}
