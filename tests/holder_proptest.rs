use holdfast::{DoubleCheckedHolder, Holder, MutexHolder, RacyHolder, UnsyncHolder};
use proptest::prelude::*;
use std::cell::Cell;

#[derive(Debug, Clone, Copy)]
enum Variant {
    Unsync,
    Mutex,
    DoubleChecked,
    Racy,
}

fn variant() -> impl Strategy<Value = Variant> {
    prop_oneof![
        Just(Variant::Unsync),
        Just(Variant::Mutex),
        Just(Variant::DoubleChecked),
        Just(Variant::Racy),
    ]
}

fn exercise<H: Holder<Value = u64>>(holder: &H, calls: u8, constructions: &Cell<u64>) {
    for _ in 0..calls {
        assert_eq!(*holder.get(), 41);
    }
    let expected = u64::from(calls > 0);
    assert_eq!(constructions.get(), expected);
    assert_eq!(holder.is_initialized(), calls > 0);
}

proptest! {
    // Sequentially, every variant obeys the same contract: any number of
    // calls runs the factory at most once, and exactly once after the first.
    #[test]
    fn sequential_calls_construct_at_most_once(v in variant(), calls in 0_u8..32) {
        let constructions = Cell::new(0_u64);
        let factory = || {
            constructions.set(constructions.get() + 1);
            41_u64
        };

        match v {
            Variant::Unsync => exercise(&UnsyncHolder::new(factory), calls, &constructions),
            Variant::Mutex => exercise(&MutexHolder::new(factory), calls, &constructions),
            Variant::DoubleChecked => {
                exercise(&DoubleCheckedHolder::new(factory), calls, &constructions);
            }
            Variant::Racy => exercise(&RacyHolder::new(factory), calls, &constructions),
        }
    }

    // The double-checked lock count depends only on whether initialization
    // happened, never on call volume.
    #[test]
    fn double_checked_lock_count_is_call_volume_independent(calls in 1_u8..64) {
        let holder = DoubleCheckedHolder::new(|| 41_u64);
        for _ in 0..calls {
            assert_eq!(*holder.get(), 41);
        }
        prop_assert_eq!(holder.lock_acquisitions(), 1);
    }

    // The mutex holder pays the lock on every call.
    #[test]
    fn mutex_lock_count_tracks_call_volume(calls in 0_u8..64) {
        let holder = MutexHolder::new(|| 41_u64);
        for _ in 0..calls {
            assert_eq!(*holder.get(), 41);
        }
        prop_assert_eq!(holder.lock_acquisitions(), usize::from(calls));
    }
}
