//! Benchmarking setup for pallet-crowdsale

use super::*;

#[allow(unused)]
use crate::Pallet as Crowdsale;
use frame_benchmarking::v2::*;
use frame_system::RawOrigin;

/// A payment the escrow account can always receive.
fn unit<T: Config>() -> BalanceOf<T> {
    T::Currency::minimum_balance().saturating_mul(100u32.into()).max(100u32.into())
}

fn fund<T: Config>(who: &T::AccountId, amount: BalanceOf<T>) {
    let _ = T::Currency::set_balance(who, T::Currency::minimum_balance().saturating_add(amount));
}

/// Owner and wallet configured, window open around any clock value.
fn open_sale<T: Config>() -> (T::AccountId, T::AccountId) {
    let owner: T::AccountId = account("owner", 0, 0);
    let wallet: T::AccountId = account("wallet", 0, 0);
    SaleOwner::<T>::put(&owner);
    Wallet::<T>::put(&wallet);
    StartTime::<T>::put(0);
    EndTime::<T>::put(u64::MAX);
    Rate::<T>::put(T::MinRate::get());

    let escrow = Crowdsale::<T>::account_id();
    if T::Currency::balance(&escrow) < T::Currency::minimum_balance() {
        let _ = T::Currency::set_balance(&escrow, T::Currency::minimum_balance());
    }
    (owner, wallet)
}

/// Contributions recorded for `who` on a sale that settled below the soft cap.
fn failed_sale<T: Config>(who: &T::AccountId, amount: BalanceOf<T>) {
    open_sale::<T>();
    IsFinalized::<T>::put(true);
    Outcome::<T>::put(Settlement::Failure);
    Contributions::<T>::insert(who, amount);
    Raised::<T>::put(amount);
    fund::<T>(&Crowdsale::<T>::account_id(), amount);
}

#[benchmarks]
mod benchmarks {
    use super::*;

    #[benchmark]
    fn buy_tokens() {
        let caller: T::AccountId = whitelisted_caller();
        let beneficiary: T::AccountId = account("beneficiary", 0, 0);
        let issuer: T::AccountId = account("issuer", 0, 0);
        let value = unit::<T>();

        open_sale::<T>();
        T::Ledger::prepare_sale(&issuer, &Crowdsale::<T>::account_id(), T::HardCap::get());
        fund::<T>(&caller, value);

        #[extrinsic_call]
        _(RawOrigin::Signed(caller), beneficiary.clone(), value);

        assert!(TokensSold::<T>::get() > 0);
        assert!(T::Ledger::balance_of(&beneficiary) > 0);
    }

    #[benchmark]
    fn contribute() {
        let (_, wallet) = open_sale::<T>();
        let value = unit::<T>();
        fund::<T>(&wallet, value);

        #[extrinsic_call]
        _(RawOrigin::Signed(wallet), value);

        assert_eq!(Crowdsale::<T>::escrow_balance(), value);
    }

    #[benchmark]
    fn set_rate() {
        let (owner, _) = open_sale::<T>();
        let new_rate = T::MaxRate::get();

        #[extrinsic_call]
        _(RawOrigin::Signed(owner), new_rate);

        assert_eq!(Rate::<T>::get(), new_rate);
    }

    #[benchmark]
    fn finalize() {
        let (owner, _) = open_sale::<T>();
        // Genesis clock reads zero, which no end time lies before
        let now = T::UnixTime::now().as_secs().max(1);
        T::BenchmarkHelper::set_time(now);
        EndTime::<T>::put(now.saturating_sub(1));
        TokensSold::<T>::put(T::SoftCap::get());

        #[extrinsic_call]
        _(RawOrigin::Signed(owner));

        assert_eq!(Outcome::<T>::get(), Some(Settlement::Success));
    }

    #[benchmark]
    fn claim_refund() {
        let caller: T::AccountId = whitelisted_caller();
        failed_sale::<T>(&caller, unit::<T>());

        #[extrinsic_call]
        _(RawOrigin::Signed(caller.clone()));

        assert!(Contributions::<T>::get(&caller).is_zero());
    }

    #[benchmark]
    fn withdraw_funds() {
        let (owner, wallet) = open_sale::<T>();
        let amount = unit::<T>();
        fund::<T>(&Crowdsale::<T>::account_id(), amount);

        #[extrinsic_call]
        _(RawOrigin::Signed(owner), amount);

        assert!(T::Currency::balance(&wallet) >= amount);
    }

    impl_benchmark_test_suite!(Crowdsale, crate::mock::new_bench_ext(), crate::mock::Test);
}
