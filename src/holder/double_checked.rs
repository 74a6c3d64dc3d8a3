//! `DoubleCheckedHolder` — double-checked locking with a lock-free fast path.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::holder::Holder;
use crate::slot::OnceSlot;

/// A lazy holder with the exactly-once guarantee of
/// [`MutexHolder`](crate::MutexHolder), optimized for the steady state.
///
/// The first check reads the slot with acquire ordering and no lock; once a
/// value has been published that path returns it immediately, so an
/// initialized holder never touches its mutex again. An empty first check
/// falls into the cold path: take the lock, check a second time (another
/// thread may have finished construction in between), construct if still
/// empty, and publish with release ordering.
///
/// The acquire/release pairing on the slot's state byte is what makes the
/// unlocked first check sound: a non-empty read is guaranteed to observe the
/// fully constructed value, never a partially initialized one. Each check
/// captures the reference it will return, so the slot is not re-read after
/// the guard drops.
///
/// The slot moves `Uninit → Init` exactly once, on the thread that wins the
/// lock; `Init` is terminal.
pub struct DoubleCheckedHolder<T, F = fn() -> T> {
    slot: OnceSlot<T>,
    lock: Mutex<()>,
    lock_acquisitions: AtomicUsize,
    factory: F,
}

impl<T, F> DoubleCheckedHolder<T, F> {
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

    /// Number of times the slow path acquired the internal lock.
    ///
    /// Instrumentation for tests and benchmarks. Once the holder is
    /// initialized the counter never moves again — that is the fast-path
    /// property the whole idiom exists for.
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

impl<T, F: Fn() -> T> DoubleCheckedHolder<T, F> {
    /// Returns the shared instance.
    ///
    /// Lock-free after initialization; blocks only while contending for the
    /// at-most-once construction window.
    #[inline]
    pub fn get(&self) -> &T {
        // First check, no lock taken.
        if let Some(value) = self.slot.get() {
            return value;
        }
        self.get_slow()
    }

    #[cold]
    fn get_slow(&self) -> &T {
        let _guard = self.lock();
        // Second check: the winner may have published while this thread was
        // waiting for the lock.
        if let Some(value) = self.slot.get() {
            return value;
        }
        #[cfg(feature = "tracing")]
        tracing::trace!("constructing instance on the slow path");
        let value = (self.factory)();
        // SAFETY: the guard is held and the second check saw the slot empty.
        unsafe { self.slot.set_exclusive(value) }
    }
}

impl<T, E, F: Fn() -> Result<T, E>> DoubleCheckedHolder<T, F> {
    /// Fallible counterpart of [`get`](Self::get), same two-check protocol.
    ///
    /// # Errors
    ///
    /// Propagates the factory's error. Nothing is published on failure, the
    /// guard still drops, and the holder stays empty; a later call retries.
    #[inline]
    pub fn try_get(&self) -> Result<&T, E> {
        if let Some(value) = self.slot.get() {
            return Ok(value);
        }
        self.try_get_slow()
    }

    #[cold]
    fn try_get_slow(&self) -> Result<&T, E> {
        let _guard = self.lock();
        if let Some(value) = self.slot.get() {
            return Ok(value);
        }
        let value = (self.factory)()?;
        // SAFETY: the guard is held and the second check saw the slot empty.
        Ok(unsafe { self.slot.set_exclusive(value) })
    }
}

impl<T: Default> Default for DoubleCheckedHolder<T, fn() -> T> {
    fn default() -> Self {
        Self::new(T::default)
    }
}

impl<T, F: Fn() -> T> Holder for DoubleCheckedHolder<T, F> {
    type Value = T;

    fn get(&self) -> &T {
        DoubleCheckedHolder::get(self)
    }

    fn is_initialized(&self) -> bool {
        DoubleCheckedHolder::is_initialized(self)
    }
}
