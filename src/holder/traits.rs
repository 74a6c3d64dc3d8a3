//! The interface shared by every holder variant.

/// A source of one shared instance.
///
/// Implemented by every holder in the catalogue whose factory is infallible,
/// so call sites and tests can range over guarantee levels generically. The
/// thread-safety of `get` is a property of the implementing type, not of the
/// trait: [`UnsyncHolder`](crate::UnsyncHolder) implements this while being
/// `!Sync`.
pub trait Holder {
    /// The instance type this holder produces.
    type Value;

    /// Returns the shared instance, constructing it first if this holder is
    /// lazy and still empty.
    fn get(&self) -> &Self::Value;

    /// Returns `true` if the instance has been constructed.
    fn is_initialized(&self) -> bool;
}
