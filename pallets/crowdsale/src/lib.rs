#![cfg_attr(not(feature = "std"), no_std)]
// Getters are kept until the query API moves to view functions
#![allow(deprecated)]
#![allow(clippy::let_unit_value)]

//! Fixed-rate crowdsale selling tokens of `pallet-token-ledger` for the native currency.
//!
//! Payments are escrowed in the pallet account. Once the window has closed the
//! owner finalizes the sale, which fixes the settlement branch: above the soft
//! cap the owner may withdraw to the wallet, below it every contributor can
//! reclaim what they paid.

use frame_support::{
    dispatch::DispatchResult,
    ensure,
    pallet_prelude::*,
    traits::{
        fungible::{Inspect, Mutate},
        tokens::{Fortitude, Preservation},
        UnixTime,
    },
    PalletId,
};
use frame_system::{ensure_signed, pallet_prelude::*};
use pallet_token_ledger::SaleLedger;
use sp_runtime::traits::{AccountIdConversion, SaturatedConversion, Saturating, Zero};

pub use pallet::*;
pub use types::{quote, Purchase, QuoteError, SalePhase, Settlement};
pub use weights::WeightInfo;

#[cfg(test)]
mod mock;


#[cfg(feature = "runtime-benchmarks")]
mod benchmarking;

pub mod types;
pub mod weights;

/// The current storage version.
const STORAGE_VERSION: StorageVersion = StorageVersion::new(1);

const LOG_TARGET: &str = "runtime::crowdsale";

pub type BalanceOf<T> =
    <<T as Config>::Currency as Inspect<<T as frame_system::Config>::AccountId>>::Balance;

/// Drives the clock behind `Config::UnixTime` in benchmarks.
#[cfg(feature = "runtime-benchmarks")]
pub trait BenchmarkHelper {
    fn set_time(secs: u64);
}

#[frame_support::pallet]
pub mod pallet {
    use super::*;

    #[pallet::config]
    pub trait Config: frame_system::Config {
        type RuntimeEvent: From<Event<Self>> + IsType<<Self as frame_system::Config>::RuntimeEvent>;
        /// Currency buyers pay with.
        type Currency: Mutate<Self::AccountId>;
        /// Token being sold.
        type Ledger: SaleLedger<Self::AccountId>;
        type UnixTime: UnixTime;

        /// Derives the escrow account, which is also the ledger's sale address.
        #[pallet::constant]
        type PalletId: Get<PalletId>;

        /// Tokens that must be sold for the sale to succeed.
        #[pallet::constant]
        type SoftCap: Get<u128>;

        /// Tokens that may be sold at most.
        #[pallet::constant]
        type HardCap: Get<u128>;

        #[pallet::constant]
        type MinRate: Get<u128>;

        #[pallet::constant]
        type MaxRate: Get<u128>;

        type WeightInfo: WeightInfo;

        #[cfg(feature = "runtime-benchmarks")]
        type BenchmarkHelper: BenchmarkHelper;
    }

    #[pallet::pallet]
    #[pallet::storage_version(STORAGE_VERSION)]
    pub struct Pallet<T>(_);

    /// Unix seconds the sale opens at (inclusive)
    #[pallet::storage]
    #[pallet::getter(fn start_time)]
    pub type StartTime<T> = StorageValue<_, u64, ValueQuery>;

    /// Unix seconds the sale closes at (inclusive)
    #[pallet::storage]
    #[pallet::getter(fn end_time)]
    pub type EndTime<T> = StorageValue<_, u64, ValueQuery>;

    /// Destination of withdrawn funds; also the only account whose plain
    /// contributions count as returned funds
    #[pallet::storage]
    #[pallet::getter(fn wallet)]
    pub type Wallet<T: Config> = StorageValue<_, T::AccountId, OptionQuery>;

    #[pallet::storage]
    #[pallet::getter(fn owner)]
    pub type SaleOwner<T: Config> = StorageValue<_, T::AccountId, OptionQuery>;

    /// Token units per currency unit
    #[pallet::storage]
    #[pallet::getter(fn rate)]
    pub type Rate<T> = StorageValue<_, u128, ValueQuery>;

    #[pallet::storage]
    #[pallet::getter(fn tokens_sold)]
    pub type TokensSold<T> = StorageValue<_, u128, ValueQuery>;

    /// Currency accepted over the whole sale; refunds do not reduce it
    #[pallet::storage]
    #[pallet::getter(fn raised)]
    pub type Raised<T: Config> = StorageValue<_, BalanceOf<T>, ValueQuery>;

    /// Currency each beneficiary is owed on a failed sale
    #[pallet::storage]
    #[pallet::getter(fn contribution_of)]
    pub type Contributions<T: Config> =
        StorageMap<_, Blake2_128Concat, T::AccountId, BalanceOf<T>, ValueQuery>;

    #[pallet::storage]
    #[pallet::getter(fn is_finalized)]
    pub type IsFinalized<T> = StorageValue<_, bool, ValueQuery>;

    #[pallet::storage]
    #[pallet::getter(fn outcome)]
    pub type Outcome<T> = StorageValue<_, Settlement, OptionQuery>;

    #[pallet::event]
    #[pallet::generate_deposit(pub(super) fn deposit_event)]
    pub enum Event<T: Config> {
        /// Tokens bought; `refunded` is the part of the payment above the hard cap
        TokensPurchased {
            payer: T::AccountId,
            beneficiary: T::AccountId,
            value: BalanceOf<T>,
            tokens: u128,
            refunded: BalanceOf<T>,
        },
        RateChanged { old: u128, new: u128 },
        Finalized { outcome: Settlement, tokens_sold: u128 },
        Refunded { who: T::AccountId, amount: BalanceOf<T> },
        /// Wallet sent funds back into escrow
        FundsReturned { amount: BalanceOf<T> },
        FundsWithdrawn { wallet: T::AccountId, amount: BalanceOf<T> },
    }

    #[pallet::error]
    pub enum Error<T> {
        /// Caller is not the sale owner
        Unauthorized,
        ZeroValue,
        /// Outside the purchase window
        SaleNotActive,
        /// The window has not closed yet
        SaleNotEnded,
        AlreadyFinalized,
        NotFinalized,
        /// Refunds are only open when the soft cap was missed
        SoftCapReached,
        RateOutOfBounds,
        /// Hard cap already sold out
        CapExceeded,
        Overflow,
        NoContribution,
        /// Escrow cannot cover the payout
        InsufficientEscrow,
        /// Payer cannot cover the tendered value
        InsufficientFunds,
        /// Escrow is reserved for refunds after a failed sale
        RefundsOpen,
        /// Wallet, owner or ledger issuer missing
        NotConfigured,
    }

    #[pallet::hooks]
    impl<T: Config> Hooks<BlockNumberFor<T>> for Pallet<T> {
        fn integrity_test() {
            assert!(T::SoftCap::get() < T::HardCap::get(), "SoftCap must be below HardCap");
            assert!(T::MinRate::get() > 0, "MinRate must be positive");
            assert!(T::MinRate::get() <= T::MaxRate::get(), "MinRate must not exceed MaxRate");
        }

        #[cfg(feature = "try-runtime")]
        fn try_state(_n: BlockNumberFor<T>) -> Result<(), sp_runtime::TryRuntimeError> {
            Self::do_try_state()
        }
    }

    #[pallet::call]
    impl<T: Config> Pallet<T> {
        /// Pay `value` and have the tokens delivered to `beneficiary`.
        #[pallet::call_index(0)]
        #[pallet::weight(T::WeightInfo::buy_tokens())]
        pub fn buy_tokens(
            origin: OriginFor<T>,
            beneficiary: T::AccountId,
            #[pallet::compact] value: BalanceOf<T>,
        ) -> DispatchResult {
            let payer = ensure_signed(origin)?;
            Self::do_buy(payer, beneficiary, value)
        }

        /// Plain payment into the sale.
        ///
        /// From the wallet this returns funds to escrow; from anyone else it
        /// buys tokens for the caller.
        #[pallet::call_index(1)]
        #[pallet::weight(T::WeightInfo::buy_tokens().max(T::WeightInfo::contribute()))]
        pub fn contribute(
            origin: OriginFor<T>,
            #[pallet::compact] value: BalanceOf<T>,
        ) -> DispatchResult {
            let who = ensure_signed(origin)?;
            if Wallet::<T>::get().as_ref() == Some(&who) {
                Self::do_return_funds(&who, value)
            } else {
                Self::do_buy(who.clone(), who, value)
            }
        }

        #[pallet::call_index(2)]
        #[pallet::weight(T::WeightInfo::set_rate())]
        pub fn set_rate(origin: OriginFor<T>, new_rate: u128) -> DispatchResult {
            Self::ensure_owner(origin)?;
            ensure!(
                (T::MinRate::get()..=T::MaxRate::get()).contains(&new_rate),
                Error::<T>::RateOutOfBounds
            );

            let old = Rate::<T>::get();
            Rate::<T>::put(new_rate);
            Self::deposit_event(Event::RateChanged { old, new: new_rate });
            Ok(())
        }

        /// Close the sale for good and fix the settlement branch.
        #[pallet::call_index(3)]
        #[pallet::weight(T::WeightInfo::finalize())]
        pub fn finalize(origin: OriginFor<T>) -> DispatchResult {
            Self::ensure_owner(origin)?;
            ensure!(Self::now() > EndTime::<T>::get(), Error::<T>::SaleNotEnded);
            ensure!(!IsFinalized::<T>::get(), Error::<T>::AlreadyFinalized);

            let tokens_sold = TokensSold::<T>::get();
            let outcome = if tokens_sold >= T::SoftCap::get() {
                Settlement::Success
            } else {
                Settlement::Failure
            };
            IsFinalized::<T>::put(true);
            Outcome::<T>::put(outcome);

            log::info!(target: LOG_TARGET, "sale finalized: {outcome:?}, {tokens_sold} tokens sold");
            Self::deposit_event(Event::Finalized { outcome, tokens_sold });
            Ok(())
        }

        /// Pay back everything the caller contributed to a failed sale.
        #[pallet::call_index(4)]
        #[pallet::weight(T::WeightInfo::claim_refund())]
        pub fn claim_refund(origin: OriginFor<T>) -> DispatchResult {
            let who = ensure_signed(origin)?;
            ensure!(IsFinalized::<T>::get(), Error::<T>::NotFinalized);
            ensure!(Outcome::<T>::get() == Some(Settlement::Failure), Error::<T>::SoftCapReached);

            let amount = Contributions::<T>::get(&who);
            ensure!(!amount.is_zero(), Error::<T>::NoContribution);
            ensure!(Self::escrow_balance() >= amount, Error::<T>::InsufficientEscrow);

            Contributions::<T>::remove(&who);
            T::Currency::transfer(&Self::account_id(), &who, amount, Preservation::Preserve)?;

            log::debug!(target: LOG_TARGET, "refunded {amount:?}");
            Self::deposit_event(Event::Refunded { who, amount });
            Ok(())
        }

        /// Move escrowed funds to the wallet. Closed once the sale settled as a failure.
        #[pallet::call_index(5)]
        #[pallet::weight(T::WeightInfo::withdraw_funds())]
        pub fn withdraw_funds(
            origin: OriginFor<T>,
            #[pallet::compact] amount: BalanceOf<T>,
        ) -> DispatchResult {
            Self::ensure_owner(origin)?;
            ensure!(Outcome::<T>::get() != Some(Settlement::Failure), Error::<T>::RefundsOpen);
            ensure!(!amount.is_zero(), Error::<T>::ZeroValue);
            ensure!(Self::escrow_balance() >= amount, Error::<T>::InsufficientEscrow);
            let wallet = Wallet::<T>::get().ok_or(Error::<T>::NotConfigured)?;

            T::Currency::transfer(&Self::account_id(), &wallet, amount, Preservation::Preserve)?;
            Self::deposit_event(Event::FundsWithdrawn { wallet, amount });
            Ok(())
        }
    }

    #[pallet::genesis_config]
    #[derive(frame_support::DefaultNoBound)]
    pub struct GenesisConfig<T: Config> {
        pub start_time: u64,
        pub end_time: u64,
        /// Initial token units per currency unit
        pub rate: u128,
        pub wallet: Option<T::AccountId>,
        pub owner: Option<T::AccountId>,
    }

    #[pallet::genesis_build]
    impl<T: Config> BuildGenesisConfig for GenesisConfig<T> {
        fn build(&self) {
            assert!(self.end_time > self.start_time, "Sale must end after it starts");
            assert!(
                (T::MinRate::get()..=T::MaxRate::get()).contains(&self.rate),
                "Initial rate outside [MinRate, MaxRate]"
            );

            StartTime::<T>::put(self.start_time);
            EndTime::<T>::put(self.end_time);
            Rate::<T>::put(self.rate);
            if let Some(ref wallet) = self.wallet {
                Wallet::<T>::put(wallet);
            }
            if let Some(ref owner) = self.owner {
                SaleOwner::<T>::put(owner);
            }

            // Escrow must outlive every payout, so it starts with the existential deposit.
            let account_id = Pallet::<T>::account_id();
            let min = T::Currency::minimum_balance();
            if T::Currency::balance(&account_id) < min {
                let _ = T::Currency::set_balance(&account_id, min);
            }
        }
    }
}

impl<T: Config> Pallet<T> {
    /// Escrow account holding collected payments. Register it as the ledger's sale address.
    pub fn account_id() -> T::AccountId {
        T::PalletId::get().into_account_truncating()
    }

    /// Escrowed funds available for payouts; the existential deposit stays behind.
    pub fn escrow_balance() -> BalanceOf<T> {
        T::Currency::reducible_balance(&Self::account_id(), Preservation::Preserve, Fortitude::Polite)
    }

    pub fn phase() -> SalePhase {
        SalePhase::at(Self::now(), StartTime::<T>::get(), EndTime::<T>::get(), Outcome::<T>::get())
    }

    pub fn has_ended() -> bool {
        Self::now() > EndTime::<T>::get()
    }

    fn now() -> u64 {
        T::UnixTime::now().as_secs()
    }

    fn ensure_owner(origin: OriginFor<T>) -> Result<T::AccountId, DispatchError> {
        let who = ensure_signed(origin)?;
        ensure!(SaleOwner::<T>::get().as_ref() == Some(&who), Error::<T>::Unauthorized);
        Ok(who)
    }

    fn do_buy(payer: T::AccountId, beneficiary: T::AccountId, value: BalanceOf<T>) -> DispatchResult {
        ensure!(!value.is_zero(), Error::<T>::ZeroValue);
        let now = Self::now();
        ensure!(
            now >= StartTime::<T>::get() && now <= EndTime::<T>::get(),
            Error::<T>::SaleNotActive
        );
        // Unreachable while finalize requires a closed window; SaleNotActive fires first
        ensure!(!IsFinalized::<T>::get(), Error::<T>::AlreadyFinalized);
        ensure!(
            T::Currency::reducible_balance(&payer, Preservation::Expendable, Fortitude::Polite) >=
                value,
            Error::<T>::InsufficientFunds
        );

        let sold = TokensSold::<T>::get();
        let purchase = quote(value.saturated_into(), Rate::<T>::get(), sold, T::HardCap::get())
            .map_err(|e| match e {
                QuoteError::Overflow => Error::<T>::Overflow,
                QuoteError::CapReached => Error::<T>::CapExceeded,
            })?;
        // Both are bounded by `value`, so they convert back exactly
        let kept: BalanceOf<T> = purchase.value.saturated_into();
        let refunded: BalanceOf<T> = purchase.refund.saturated_into();

        let issuer = T::Ledger::issuer().ok_or(Error::<T>::NotConfigured)?;
        let escrow = Self::account_id();

        // Only the kept part leaves the payer; the excess is never collected.
        if !kept.is_zero() {
            T::Currency::transfer(&payer, &escrow, kept, Preservation::Expendable)?;
        }
        T::Ledger::transfer_from(&escrow, &issuer, &beneficiary, purchase.tokens)?;

        TokensSold::<T>::put(sold.saturating_add(purchase.tokens));
        Contributions::<T>::mutate(&beneficiary, |paid| *paid = paid.saturating_add(kept));
        Raised::<T>::mutate(|raised| *raised = raised.saturating_add(kept));

        log::debug!(
            target: LOG_TARGET,
            "sold {} tokens, {} of {} sold",
            purchase.tokens,
            sold.saturating_add(purchase.tokens),
            T::HardCap::get()
        );
        Self::deposit_event(Event::TokensPurchased {
            payer,
            beneficiary,
            value: kept,
            tokens: purchase.tokens,
            refunded,
        });
        Ok(())
    }

    fn do_return_funds(wallet: &T::AccountId, value: BalanceOf<T>) -> DispatchResult {
        ensure!(!value.is_zero(), Error::<T>::ZeroValue);
        T::Currency::transfer(wallet, &Self::account_id(), value, Preservation::Expendable)?;
        Self::deposit_event(Event::FundsReturned { amount: value });
        Ok(())
    }

    /// Cap and bookkeeping checks over the sale state.
    #[cfg(any(feature = "try-runtime", test))]
    pub fn do_try_state() -> Result<(), DispatchError> {
        ensure!(
            TokensSold::<T>::get() <= T::HardCap::get(),
            DispatchError::Other("tokens sold above hard cap")
        );

        let owed = Contributions::<T>::iter_values()
            .fold(BalanceOf::<T>::zero(), |acc, paid| acc.saturating_add(paid));
        ensure!(owed <= Raised::<T>::get(), DispatchError::Other("contributions exceed raised"));

        ensure!(
            IsFinalized::<T>::get() == Outcome::<T>::get().is_some(),
            DispatchError::Other("finalize latch and outcome disagree")
        );

        ensure!(
            T::Currency::balance(&Self::account_id()) >= T::Currency::minimum_balance(),
            DispatchError::Other("escrow below existential deposit")
        );
        Ok(())
    }
}
