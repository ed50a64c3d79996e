//! Benchmarking setup for pallet-token-ledger

use super::*;

#[allow(unused)]
use crate::Pallet as TokenLedger;
use frame_benchmarking::v2::*;
use frame_system::RawOrigin;

/// Open transfers and release the issuer lock regardless of the bench clock.
fn open_ledger<T: Config>() {
    StartTime::<T>::put(0);
    LockReleaseTime::<T>::put(0);
}

#[benchmarks]
mod benchmarks {
    use super::*;

    #[benchmark]
    fn transfer() {
        let caller: T::AccountId = whitelisted_caller();
        let recipient: T::AccountId = account("recipient", 0, 0);
        let amount: u128 = 1_000_000;

        open_ledger::<T>();
        Balances::<T>::insert(&caller, 10_000_000);

        #[extrinsic_call]
        _(RawOrigin::Signed(caller.clone()), recipient.clone(), amount);

        assert_eq!(Balances::<T>::get(&recipient), amount);
    }

    #[benchmark]
    fn transfer_from() {
        let caller: T::AccountId = whitelisted_caller();
        let owner: T::AccountId = account("owner", 0, 0);
        let recipient: T::AccountId = account("recipient", 0, 0);
        let amount: u128 = 1_000_000;

        // Worst case: the owner is the issuer, so the lock check runs too
        Issuer::<T>::put(&owner);
        LockedAmount::<T>::put(1);
        StartTime::<T>::put(0);
        LockReleaseTime::<T>::put(u64::MAX);
        Balances::<T>::insert(&owner, 10_000_000);
        Allowances::<T>::insert(&owner, &caller, amount);

        #[extrinsic_call]
        _(RawOrigin::Signed(caller.clone()), owner.clone(), recipient.clone(), amount);

        assert_eq!(Balances::<T>::get(&recipient), amount);
        assert_eq!(Allowances::<T>::get(&owner, &caller), 0);
    }

    #[benchmark]
    fn approve() {
        let caller: T::AccountId = whitelisted_caller();
        let spender: T::AccountId = account("spender", 0, 0);

        #[extrinsic_call]
        _(RawOrigin::Signed(caller.clone()), spender.clone(), 1_000);

        assert_eq!(Allowances::<T>::get(&caller, &spender), 1_000);
    }

    #[benchmark]
    fn set_sale_address() {
        let caller: T::AccountId = whitelisted_caller();
        let sale: T::AccountId = account("sale", 0, 0);
        Issuer::<T>::put(&caller);
        SaleAddress::<T>::kill();
        PublicAmount::<T>::put(400_000);

        #[extrinsic_call]
        _(RawOrigin::Signed(caller.clone()), sale.clone());

        assert_eq!(Allowances::<T>::get(&caller, &sale), 400_000);
    }

    #[benchmark]
    fn pause() {
        let caller: T::AccountId = whitelisted_caller();
        Issuer::<T>::put(&caller);

        #[extrinsic_call]
        _(RawOrigin::Signed(caller));

        assert!(Paused::<T>::get());
    }

    #[benchmark]
    fn unpause() {
        let caller: T::AccountId = whitelisted_caller();
        Issuer::<T>::put(&caller);
        Paused::<T>::put(true);

        #[extrinsic_call]
        _(RawOrigin::Signed(caller));

        assert!(!Paused::<T>::get());
    }

    #[benchmark]
    fn transfer_ownership() {
        let caller: T::AccountId = whitelisted_caller();
        let new_issuer: T::AccountId = account("issuer", 0, 0);
        Issuer::<T>::put(&caller);
        open_ledger::<T>();

        #[extrinsic_call]
        _(RawOrigin::Signed(caller), new_issuer.clone());

        assert_eq!(Issuer::<T>::get(), Some(new_issuer));
    }

    impl_benchmark_test_suite!(TokenLedger, crate::mock::new_test_ext(), crate::mock::Test);
}
