//! `RacyHolder` — the single-checked holder; duplicate construction allowed.

use crate::holder::Holder;
use crate::slot::OnceSlot;

/// A lazy holder with one unlocked check and no lock at all.
///
/// Every thread that observes the empty slot runs the factory, so concurrent
/// first access can construct the value more than once. That is this
/// variant's documented weaker guarantee, kept for comparison against the
/// locked holders rather than fixed — do not reach for it expecting
/// exactly-once semantics. Publication itself is still safe: the first write
/// wins, losers drop their own construction and take the winner's value, and
/// every caller ends up with the same reference.
///
/// Worth considering when the factory is cheap and idempotent and the lock of
/// the stronger variants costs more than an occasional duplicate
/// construction.
pub struct RacyHolder<T, F = fn() -> T> {
    slot: OnceSlot<T>,
    factory: F,
}

impl<T, F> RacyHolder<T, F> {
    /// Creates an empty holder that constructs its instance with `factory`.
    pub const fn new(factory: F) -> Self {
        Self {
            slot: OnceSlot::new(),
            factory,
        }
    }

    /// Returns `true` if the instance has been constructed.
    #[inline]
    pub fn is_initialized(&self) -> bool {
        self.slot.is_initialized()
    }
}

impl<T, F: Fn() -> T> RacyHolder<T, F> {
    /// Returns the shared instance, racing to construct it if empty.
    #[inline]
    pub fn get(&self) -> &T {
        if let Some(value) = self.slot.get() {
            return value;
        }
        let value = (self.factory)();
        match self.slot.publish(value) {
            Ok(published) => published,
            Err(existing) => {
                #[cfg(feature = "tracing")]
                tracing::trace!("lost the publication race, dropped a duplicate instance");
                existing
            }
        }
    }
}

impl<T, E, F: Fn() -> Result<T, E>> RacyHolder<T, F> {
    /// Fallible counterpart of [`get`](Self::get).
    ///
    /// # Errors
    ///
    /// Propagates the factory's error; nothing is published on failure and
    /// the next call retries. A racing caller that succeeded in the meantime
    /// still wins as usual.
    #[inline]
    pub fn try_get(&self) -> Result<&T, E> {
        if let Some(value) = self.slot.get() {
            return Ok(value);
        }
        let value = (self.factory)()?;
        Ok(match self.slot.publish(value) {
            Ok(published) => published,
            Err(existing) => existing,
        })
    }
}

impl<T: Default> Default for RacyHolder<T, fn() -> T> {
    fn default() -> Self {
        Self::new(T::default)
    }
}

impl<T, F: Fn() -> T> Holder for RacyHolder<T, F> {
    type Value = T;

    fn get(&self) -> &T {
        RacyHolder::get(self)
    }

    fn is_initialized(&self) -> bool {
        RacyHolder::is_initialized(self)
    }
}
