//! Entities are compared by identity, not by their current attributes.

/// Something with a stable identifier, such as a catalog product.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    fn id(&self) -> &Self::Id;

    /// Two entities are the same entity when their identifiers match,
    /// regardless of the rest of their state.
    fn same_identity_as(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}
