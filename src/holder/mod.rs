//! The holder catalogue: one shared-instance primitive per guarantee level.
//!
//! Ordered from weakest to strongest concurrency guarantee:
//! [`UnsyncHolder`] (single-threaded only), [`RacyHolder`] (shared, may
//! construct more than once), [`MutexHolder`] and [`DoubleCheckedHolder`]
//! (shared, exactly-once). [`EagerHolder`] sits outside the ordering: it has
//! no lazy state at all.

pub mod double_checked;
pub mod eager;
pub mod mutex;
pub mod racy;
pub mod traits;
pub mod unsync;

pub use double_checked::DoubleCheckedHolder;
pub use eager::EagerHolder;
pub use mutex::MutexHolder;
pub use racy::RacyHolder;
pub use traits::Holder;
pub use unsync::UnsyncHolder;
