//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects have no identity and are compared by their attribute values:
/// a `Tag("socket-am5")` equals any other `Tag("socket-am5")`, a `Money(4500)`
/// equals any other `Money(4500)`. Products, by contrast, are entities and are
/// compared by id.
///
/// Value objects are immutable; "changing" one means building a new one.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
