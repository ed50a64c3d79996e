//! Weights for pallet-crowdsale.
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
    fn buy_tokens() -> Weight;
    fn contribute() -> Weight;
    fn set_rate() -> Weight;
    fn finalize() -> Weight;
    fn claim_refund() -> Weight;
    fn withdraw_funds() -> Weight;
}

/// Weights for pallet-crowdsale using the runtime's configured database weights.
pub struct SubstrateWeight<T>(PhantomData<T>);
impl<T: frame_system::Config> WeightInfo for SubstrateWeight<T> {
    // Includes the nested ledger transfer_from
    fn buy_tokens() -> Weight {
        Weight::from_parts(58_000_000, 6_196)
            .saturating_add(T::DbWeight::get().reads(12))
            .saturating_add(T::DbWeight::get().writes(6))
    }
    fn contribute() -> Weight {
        Weight::from_parts(34_000_000, 3_593)
            .saturating_add(T::DbWeight::get().reads(3))
            .saturating_add(T::DbWeight::get().writes(2))
    }
    fn set_rate() -> Weight {
        Weight::from_parts(12_000_000, 1_505)
            .saturating_add(T::DbWeight::get().reads(2))
            .saturating_add(T::DbWeight::get().writes(1))
    }
    fn finalize() -> Weight {
        Weight::from_parts(16_000_000, 1_505)
            .saturating_add(T::DbWeight::get().reads(4))
            .saturating_add(T::DbWeight::get().writes(2))
    }
    fn claim_refund() -> Weight {
        Weight::from_parts(40_000_000, 6_196)
            .saturating_add(T::DbWeight::get().reads(5))
            .saturating_add(T::DbWeight::get().writes(3))
    }
    fn withdraw_funds() -> Weight {
        Weight::from_parts(38_000_000, 6_196)
            .saturating_add(T::DbWeight::get().reads(4))
            .saturating_add(T::DbWeight::get().writes(2))
    }
}

// For backwards compatibility and tests
impl WeightInfo for () {
    fn buy_tokens() -> Weight {
        Weight::from_parts(58_000_000, 6_196)
            .saturating_add(RocksDbWeight::get().reads(12))
            .saturating_add(RocksDbWeight::get().writes(6))
    }
    fn contribute() -> Weight {
        Weight::from_parts(34_000_000, 3_593)
            .saturating_add(RocksDbWeight::get().reads(3))
            .saturating_add(RocksDbWeight::get().writes(2))
    }
    fn set_rate() -> Weight {
        Weight::from_parts(12_000_000, 1_505)
            .saturating_add(RocksDbWeight::get().reads(2))
            .saturating_add(RocksDbWeight::get().writes(1))
    }
    fn finalize() -> Weight {
        Weight::from_parts(16_000_000, 1_505)
            .saturating_add(RocksDbWeight::get().reads(4))
            .saturating_add(RocksDbWeight::get().writes(2))
    }
    fn claim_refund() -> Weight {
        Weight::from_parts(40_000_000, 6_196)
            .saturating_add(RocksDbWeight::get().reads(5))
            .saturating_add(RocksDbWeight::get().writes(3))
    }
    fn withdraw_funds() -> Weight {
        Weight::from_parts(38_000_000, 6_196)
            .saturating_add(RocksDbWeight::get().reads(4))
            .saturating_add(RocksDbWeight::get().writes(2))
    }
}
