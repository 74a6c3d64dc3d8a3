//! `MutexHolder` — the fully synchronized lazy holder.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::holder::Holder;
use crate::slot::OnceSlot;

/// A lazy holder that takes its lock on every call.
///
/// Correctness is bought with contention: each `get` acquires the mutex,
/// checks the slot, constructs if needed, and only then returns. Exactly one
/// construction ever happens and every caller sees the same instance, but the
/// steady state still pays one lock round-trip per call — observable through
/// [`lock_acquisitions`](Self::lock_acquisitions). Compare
/// [`DoubleCheckedHolder`](crate::DoubleCheckedHolder), which removes that
/// cost after initialization.
pub struct MutexHolder<T, F = fn() -> T> {
    slot: OnceSlot<T>,
    lock: Mutex<()>,
    lock_acquisitions: AtomicUsize,
    factory: F,
}

impl<T, F> MutexHolder<T, F> {
    /// Creates an empty holder that constructs its instance with `factory`.
    pub const fn new(factory: F) -> Self {
        Self {
            slot: OnceSlot::new(),
            lock: Mutex::new(()),
            lock_acquisitions: AtomicUsize::new(0),
            factory,
        }
    }

    /// Returns `true` if the instance has been constructed.
    #[inline]
    pub fn is_initialized(&self) -> bool {
        self.slot.is_initialized()
    }

    /// Number of times `get`/`try_get` acquired the internal lock.
    ///
    /// Instrumentation for tests and benchmarks; for this variant the counter
    /// tracks the call count one-to-one.
    pub fn lock_acquisitions(&self) -> usize {
        self.lock_acquisitions.load(Ordering::Relaxed)
    }

    fn lock(&self) -> MutexGuard<'_, ()> {
        self.lock_acquisitions.fetch_add(1, Ordering::Relaxed);
        // Poison only means an earlier factory panicked before publishing;
        // the slot is still empty, so the next caller may retry.
        self.lock.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T, F: Fn() -> T> MutexHolder<T, F> {
    /// Returns the shared instance, constructing it under the lock on first
    /// call.
    ///
    /// The guard is released on every exit path, including a panicking
    /// factory, so a failed construction leaves the holder empty and
    /// retryable rather than deadlocked.
    pub fn get(&self) -> &T {
        let _guard = self.lock();
        if let Some(value) = self.slot.get() {
            return value;
        }
        #[cfg(feature = "tracing")]
        tracing::trace!("constructing instance under full synchronization");
        let value = (self.factory)();
        // SAFETY: the guard is held and the slot was checked empty above.
        unsafe { self.slot.set_exclusive(value) }
    }
}

impl<T, E, F: Fn() -> Result<T, E>> MutexHolder<T, F> {
    /// Fallible counterpart of [`get`](Self::get).
    ///
    /// # Errors
    ///
    /// Propagates the factory's error. Nothing is published on failure, the
    /// guard still drops, and the holder stays empty; a later call retries.
    pub fn try_get(&self) -> Result<&T, E> {
        let _guard = self.lock();
        if let Some(value) = self.slot.get() {
            return Ok(value);
        }
        let value = (self.factory)()?;
        // SAFETY: the guard is held and the slot was checked empty above.
        Ok(unsafe { self.slot.set_exclusive(value) })
    }
}

impl<T: Default> Default for MutexHolder<T, fn() -> T> {
    fn default() -> Self {
        Self::new(T::default)
    }
}

impl<T, F: Fn() -> T> Holder for MutexHolder<T, F> {
    type Value = T;

    fn get(&self) -> &T {
        MutexHolder::get(self)
    }

    fn is_initialized(&self) -> bool {
        MutexHolder::is_initialized(self)
    }
}
