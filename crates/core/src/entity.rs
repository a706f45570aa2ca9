//! Entity trait: identity across derived copies of the same record.

/// Entity marker + minimal interface.
///
/// Enriched copies of an item keep the identity of the record they were
/// derived from, so bucket membership can be decided by identifier alone.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
