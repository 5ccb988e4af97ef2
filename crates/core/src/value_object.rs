//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are immutable and compared by their attributes: to "modify"
/// one, build a new one. In FieldOps the permission snapshot of a session and
/// the guard requests evaluated against it are value objects, which is what
/// lets them be shared across threads and re-evaluated freely.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Eq)]
/// struct Shift { starts_at: u32, ends_at: u32 }
///
/// impl ValueObject for Shift {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
