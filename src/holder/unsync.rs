//! `UnsyncHolder` — lazy initialization with no synchronization at all.

use core::cell::UnsafeCell;

use crate::holder::Holder;

/// A lazy holder with no locking and no atomics.
///
/// This is the baseline of the catalogue: the classic check-then-construct
/// sequence with nothing protecting it. Shared across threads it would be a
/// data race — two threads can both observe the empty slot, both run the
/// factory, and both write — so the `UnsafeCell` field keeps the type `!Sync`
/// and the compiler rejects exactly the usage that is unsound:
///
/// ```compile_fail
/// fn shareable<T: Sync>(_: &T) {}
///
/// let holder = holdfast::UnsyncHolder::<u32>::new(|| 0);
/// shareable(&holder);
/// ```
///
/// Within one thread the holder behaves like the strong variants: the factory
/// runs once and every call returns the same reference.
pub struct UnsyncHolder<T, F = fn() -> T> {
    value: UnsafeCell<Option<T>>,
    factory: F,
}

impl<T, F> UnsyncHolder<T, F> {
    /// Creates an empty holder that constructs its instance with `factory`.
    pub const fn new(factory: F) -> Self {
        Self {
            value: UnsafeCell::new(None),
            factory,
        }
    }

    /// Returns `true` if the instance has been constructed.
    #[inline]
    pub fn is_initialized(&self) -> bool {
        // SAFETY: `!Sync` confines all access to one thread, and no exclusive
        // reference to the slot outlives any call into this holder.
        unsafe { (*self.value.get()).is_some() }
    }
}

impl<T, F: Fn() -> T> UnsyncHolder<T, F> {
    /// Returns the shared instance, constructing it on first call.
    pub fn get(&self) -> &T {
        let slot = self.value.get();
        // SAFETY: single-threaded by construction (`!Sync`); the shared read
        // ends before the write below.
        if unsafe { (*slot).is_none() } {
            let value = (self.factory)();
            // Re-check: a reentrant factory may already have filled the slot,
            // and its value must not be overwritten while borrowed.
            // SAFETY: as above.
            unsafe {
                if (*slot).is_none() {
                    *slot = Some(value);
                }
            }
        }
        // SAFETY: the slot is `Some` here and is never written again.
        unsafe { (*slot).as_ref().unwrap_unchecked() }
    }
}

impl<T, E, F: Fn() -> Result<T, E>> UnsyncHolder<T, F> {
    /// Fallible counterpart of [`get`](Self::get).
    ///
    /// # Errors
    ///
    /// Propagates the factory's error; nothing is stored on failure and the
    /// next call retries the factory.
    pub fn try_get(&self) -> Result<&T, E> {
        let slot = self.value.get();
        // SAFETY: see `get`.
        if unsafe { (*slot).is_none() } {
            let value = (self.factory)()?;
            // SAFETY: see `get`.
            unsafe {
                if (*slot).is_none() {
                    *slot = Some(value);
                }
            }
        }
        // SAFETY: the slot is `Some` here and is never written again.
        Ok(unsafe { (*slot).as_ref().unwrap_unchecked() })
    }
}

impl<T: Default> Default for UnsyncHolder<T, fn() -> T> {
    fn default() -> Self {
        Self::new(T::default)
    }
}

impl<T, F: Fn() -> T> Holder for UnsyncHolder<T, F> {
    type Value = T;

    fn get(&self) -> &T {
        UnsyncHolder::get(self)
    }

    fn is_initialized(&self) -> bool {
        UnsyncHolder::is_initialized(self)
    }
}
