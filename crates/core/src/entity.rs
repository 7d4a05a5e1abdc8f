//! Entity trait: identity + continuity across edits.

/// Anything the store keeps by identity (products, customers, orders, tags...).
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Copy + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> Self::Id;
}
