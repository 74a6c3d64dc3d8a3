//! Write-once publication slot shared by the lazy holder variants.
//!
//! `OnceSlot` is the single place that encodes the absent → present state
//! machine and its acquire/release protocol. The holder variants differ only
//! in how they decide who gets to write.

use core::cell::UnsafeCell;
use core::mem::MaybeUninit;
use core::sync::atomic::{AtomicU8, Ordering};

use crossbeam_utils::Backoff;

/// An inline write-once slot: empty until published, readable forever after.
///
/// Reads synchronize with the publishing write through the state byte, so a
/// non-empty [`get`](Self::get) always observes a fully constructed value.
pub(crate) struct OnceSlot<T> {
    state: AtomicU8,
    value: UnsafeCell<MaybeUninit<T>>,
}

impl<T> OnceSlot<T> {
    const UNINIT: u8 = 0;
    const BUSY: u8 = 1;
    const INIT: u8 = 2;

    pub(crate) const fn new() -> Self {
        Self {
            state: AtomicU8::new(Self::UNINIT),
            value: UnsafeCell::new(MaybeUninit::uninit()),
        }
    }

    /// Returns `true` once a value has been published.
    #[inline]
    pub(crate) fn is_initialized(&self) -> bool {
        self.state.load(Ordering::Acquire) == Self::INIT
    }

    /// Acquire-reads the slot.
    ///
    /// `Some` is only ever returned after the matching release store of a
    /// publish, never for a value mid-construction.
    #[inline]
    pub(crate) fn get(&self) -> Option<&T> {
        if self.state.load(Ordering::Acquire) == Self::INIT {
            // SAFETY: `INIT` was release-stored after the value was written.
            Some(unsafe { self.get_unchecked() })
        } else {
            None
        }
    }

    /// # Safety
    ///
    /// The slot must have been observed in the `INIT` state with acquire
    /// ordering on this thread.
    #[inline]
    pub(crate) unsafe fn get_unchecked(&self) -> &T {
        (*self.value.get()).assume_init_ref()
    }

    /// Publishes `value` while the caller holds an external lock.
    ///
    /// Returns the reference captured at publication so the caller does not
    /// re-read the slot after dropping its guard.
    ///
    /// # Safety
    ///
    /// The caller must hold the holder's lock and must have checked the slot
    /// empty under that lock; no other thread may be writing.
    pub(crate) unsafe fn set_exclusive(&self, value: T) -> &T {
        debug_assert_eq!(self.state.load(Ordering::Relaxed), Self::UNINIT);
        (*self.value.get()).write(value);
        self.state.store(Self::INIT, Ordering::Release);
        // SAFETY: written just above, on this thread.
        self.get_unchecked()
    }

    /// Lock-free first-write-wins publish.
    ///
    /// Exactly one caller transitions the slot `UNINIT → BUSY → INIT` and
    /// keeps its value; `Ok` is that caller's reference. Every other caller
    /// drops `value`, waits out the short `BUSY` window with backoff, and
    /// gets the winner's reference back as `Err`.
    pub(crate) fn publish(&self, value: T) -> Result<&T, &T> {
        match self.state.compare_exchange(
            Self::UNINIT,
            Self::BUSY,
            Ordering::Acquire,
            Ordering::Acquire,
        ) {
            Ok(_) => {
                // SAFETY: the CAS made this thread the only writer.
                unsafe {
                    (*self.value.get()).write(value);
                }
                self.state.store(Self::INIT, Ordering::Release);
                // SAFETY: written just above, on this thread.
                Ok(unsafe { self.get_unchecked() })
            }
            Err(_) => {
                drop(value);
                let backoff = Backoff::new();
                while self.state.load(Ordering::Acquire) != Self::INIT {
                    backoff.snooze();
                }
                // SAFETY: observed `INIT` with acquire ordering.
                Err(unsafe { self.get_unchecked() })
            }
        }
    }
}

impl<T> Drop for OnceSlot<T> {
    fn drop(&mut self) {
        if *self.state.get_mut() == Self::INIT {
            // SAFETY: `INIT` means the value was written and never moved out.
            unsafe { self.value.get_mut().assume_init_drop() };
        }
    }
}

// SAFETY: the slot hands out `&T` only after release-publication; the value
// is written by exactly one thread and never mutated afterwards.
unsafe impl<T: Send> Send for OnceSlot<T> {}
unsafe impl<T: Send + Sync> Sync for OnceSlot<T> {}
