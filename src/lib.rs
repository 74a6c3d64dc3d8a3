//! # `holdfast` — graded lazy initialization holders
//!
//! A pedagogical catalogue of shared-instance holders, ordered by the
//! strength of their concurrency guarantee. Each holder binds a zero-argument
//! factory at creation, constructs at most one value of `T` (under the strong
//! variants), and hands out `&T` for the holder's lifetime.
//!
//! ## The catalogue
//!
//! | Holder | First check | Lock | Guarantee |
//! |---|---|---|---|
//! | [`EagerHolder`] | — | none | constructed up front |
//! | [`UnsyncHolder`] | plain | none | single-threaded only (`!Sync`) |
//! | [`RacyHolder`] | atomic | none | may construct more than once; one winner published |
//! | [`MutexHolder`] | under lock | every call | exactly one construction |
//! | [`DoubleCheckedHolder`] | atomic | slow path only | exactly one construction, lock-free steady state |
//!
//! The engineering content lives in [`DoubleCheckedHolder`]: an unlocked
//! acquire-load first check, a second check under the lock, and release
//! publication so the fast path can never observe a half-built value.
//!
//! ## Example
//!
//! ```rust
//! use holdfast::DoubleCheckedHolder;
//!
//! let holder = DoubleCheckedHolder::new(|| vec![1, 2, 3]);
//! let a = holder.get();
//! let b = holder.get();
//! assert!(std::ptr::eq(a, b));
//! ```
//!
//! Holders are `const`-constructible, so the same types work as statics:
//!
//! ```rust
//! use holdfast::DoubleCheckedHolder;
//!
//! static MOTD: DoubleCheckedHolder<String> =
//!     DoubleCheckedHolder::new(|| "ready".to_owned());
//!
//! assert_eq!(MOTD.get(), "ready");
//! ```
//!
//! ## Design rules
//!
//! - Holders are plain values, not ambient globals: each container, registry,
//!   or test case owns its own.
//! - A failed factory (error or panic) leaves the holder empty and retryable;
//!   locks release on every exit path and no poisoned state is recorded.
//! - The weak variants stay weak. [`UnsyncHolder`] is `!Sync` instead of
//!   being a data race waiting to happen, and [`RacyHolder`] keeps its
//!   duplicate-construction behavior on purpose — they exist to make the cost
//!   of the strong variants legible, not to be quietly upgraded.

#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod holder;
mod slot;

pub use holder::{
    DoubleCheckedHolder, EagerHolder, Holder, MutexHolder, RacyHolder, UnsyncHolder,
};

// Compile-time layout checks: holders stay small and allocation-free.
const _: () = {
    use core::mem;

    // The lock-free holders carry one state byte plus the value and factory.
    assert!(mem::size_of::<RacyHolder<u64>>() <= mem::size_of::<usize>() * 4);
    assert!(mem::size_of::<UnsyncHolder<u64>>() <= mem::size_of::<usize>() * 4);

    // The locked holders add a mutex and an instrumentation counter. Loose
    // upper bounds: enough to catch an accidentally boxed or padded
    // regression without being brittle across platforms.
    assert!(mem::size_of::<MutexHolder<u64>>() <= mem::size_of::<usize>() * 8);
    assert!(mem::size_of::<DoubleCheckedHolder<u64>>() <= mem::size_of::<usize>() * 8);

    // Eager holders are transparent over their value.
    assert!(mem::size_of::<EagerHolder<u64>>() == mem::size_of::<u64>());
};
