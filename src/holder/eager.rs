//! `EagerHolder` — the degenerate case: construct up front, share forever.

use crate::holder::Holder;

/// A holder whose instance exists from the moment the holder does.
///
/// No laziness, no synchronization, no state machine: the value is stored
/// inline and `get` is a field borrow. This is the catalogue's reference
/// point — when construction is cheap and unconditional, eager beats every
/// lazy variant. It also stands in for the constant-style singletons
/// (final-field, static-factory, enum) that need no initialization protocol
/// at all.
pub struct EagerHolder<T> {
    value: T,
}

impl<T> EagerHolder<T> {
    /// Creates a holder around an already-constructed instance.
    pub const fn new(value: T) -> Self {
        Self { value }
    }

    /// Creates a holder by running `factory` immediately.
    pub fn with<F: FnOnce() -> T>(factory: F) -> Self {
        Self::new(factory())
    }

    /// Returns the shared instance.
    #[inline]
    pub fn get(&self) -> &T {
        &self.value
    }
}

impl<T: Default> Default for EagerHolder<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> Holder for EagerHolder<T> {
    type Value = T;

    fn get(&self) -> &T {
        EagerHolder::get(self)
    }

    /// Always `true`; eager holders are born initialized.
    fn is_initialized(&self) -> bool {
        true
    }
}
