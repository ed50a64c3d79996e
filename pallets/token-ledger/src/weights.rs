//! Weights for pallet-token-ledger.
//!
//! Hand-estimated from the storage accesses of each call. Replace with the
//! output of `frame-omni-bencher` once the benchmarks run on reference hardware.

#![allow(unused_parens)]
#![allow(unused_imports)]

use core::marker::PhantomData;
use frame_support::{
    traits::Get,
    weights::{constants::RocksDbWeight, Weight},
};

pub trait WeightInfo {
    fn transfer() -> Weight;
    fn transfer_from() -> Weight;
    fn approve() -> Weight;
    fn set_sale_address() -> Weight;
    fn pause() -> Weight;
    fn unpause() -> Weight;
    fn transfer_ownership() -> Weight;
}

/// Weights for pallet-token-ledger using the runtime's configured database weights.
pub struct SubstrateWeight<T>(PhantomData<T>);
impl<T: frame_system::Config> WeightInfo for SubstrateWeight<T> {
    // Reads: Paused, StartTime, Balances x2, Issuer, LockReleaseTime, LockedAmount
    fn transfer() -> Weight {
        Weight::from_parts(32_000_000, 3_593)
            .saturating_add(T::DbWeight::get().reads(7))
            .saturating_add(T::DbWeight::get().writes(2))
    }
    fn transfer_from() -> Weight {
        Weight::from_parts(41_000_000, 6_196)
            .saturating_add(T::DbWeight::get().reads(9))
            .saturating_add(T::DbWeight::get().writes(3))
    }
    fn approve() -> Weight {
        Weight::from_parts(18_000_000, 3_593)
            .saturating_add(T::DbWeight::get().reads(1))
            .saturating_add(T::DbWeight::get().writes(1))
    }
    fn set_sale_address() -> Weight {
        Weight::from_parts(20_000_000, 1_505)
            .saturating_add(T::DbWeight::get().reads(3))
            .saturating_add(T::DbWeight::get().writes(2))
    }
    fn pause() -> Weight {
        Weight::from_parts(11_000_000, 1_505)
            .saturating_add(T::DbWeight::get().reads(1))
            .saturating_add(T::DbWeight::get().writes(1))
    }
    fn unpause() -> Weight {
        Weight::from_parts(11_000_000, 1_505)
            .saturating_add(T::DbWeight::get().reads(1))
            .saturating_add(T::DbWeight::get().writes(1))
    }
    fn transfer_ownership() -> Weight {
        Weight::from_parts(14_000_000, 1_505)
            .saturating_add(T::DbWeight::get().reads(2))
            .saturating_add(T::DbWeight::get().writes(1))
    }
}

// For backwards compatibility and tests
impl WeightInfo for () {
    fn transfer() -> Weight {
        Weight::from_parts(32_000_000, 3_593)
            .saturating_add(RocksDbWeight::get().reads(7))
            .saturating_add(RocksDbWeight::get().writes(2))
    }
    fn transfer_from() -> Weight {
        Weight::from_parts(41_000_000, 6_196)
            .saturating_add(RocksDbWeight::get().reads(9))
            .saturating_add(RocksDbWeight::get().writes(3))
    }
    fn approve() -> Weight {
        Weight::from_parts(18_000_000, 3_593)
            .saturating_add(RocksDbWeight::get().reads(1))
            .saturating_add(RocksDbWeight::get().writes(1))
    }
    fn set_sale_address() -> Weight {
        Weight::from_parts(20_000_000, 1_505)
            .saturating_add(RocksDbWeight::get().reads(3))
            .saturating_add(RocksDbWeight::get().writes(2))
    }
    fn pause() -> Weight {
        Weight::from_parts(11_000_000, 1_505)
            .saturating_add(RocksDbWeight::get().reads(1))
            .saturating_add(RocksDbWeight::get().writes(1))
    }
    fn unpause() -> Weight {
        Weight::from_parts(11_000_000, 1_505)
            .saturating_add(RocksDbWeight::get().reads(1))
            .saturating_add(RocksDbWeight::get().writes(1))
    }
    fn transfer_ownership() -> Weight {
        Weight::from_parts(14_000_000, 1_505)
            .saturating_add(RocksDbWeight::get().reads(2))
            .saturating_add(RocksDbWeight::get().writes(1))
    }
}
