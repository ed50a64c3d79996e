#![cfg_attr(not(feature = "std"), no_std)]
// Getters are kept until the query API moves to view functions
#![allow(deprecated)]
#![allow(clippy::let_unit_value)]

use frame_support::{dispatch::DispatchResult, ensure, pallet_prelude::*, traits::UnixTime};
use frame_system::{ensure_signed, pallet_prelude::*};
use sp_std::prelude::*;

pub use pallet::*;
pub use weights::WeightInfo;

#[cfg(test)]
mod mock;


#[cfg(feature = "runtime-benchmarks")]
mod benchmarking;

pub mod weights;

/// The current storage version.
const STORAGE_VERSION: StorageVersion = StorageVersion::new(1);

const LOG_TARGET: &str = "runtime::token-ledger";

/// Seconds after `StartTime` during which the issuer may not dip into `LockedAmount`.
pub const LOCK_PERIOD: u64 = 160 * 24 * 60 * 60;

/// Delegated spending surface the sale pallet drives.
///
/// Implemented by [`Pallet`]; `transfer_from` applies exactly the rules of the
/// `transfer_from` extrinsic, including the pre-sale exemption for the sale address.
pub trait SaleLedger<AccountId> {
    /// Account holding the undistributed supply, if configured.
    fn issuer() -> Option<AccountId>;

    fn balance_of(who: &AccountId) -> u128;

    fn allowance(owner: &AccountId, spender: &AccountId) -> u128;

    /// Move `amount` from `owner` to `to`, spending `spender`'s allowance.
    fn transfer_from(
        spender: &AccountId,
        owner: &AccountId,
        to: &AccountId,
        amount: u128,
    ) -> DispatchResult;

    /// Mint `amount` to `issuer` and let `sale` spend exactly that, with transfers open.
    #[cfg(feature = "runtime-benchmarks")]
    fn prepare_sale(issuer: &AccountId, sale: &AccountId, amount: u128);
}

#[frame_support::pallet]
pub mod pallet {
    use super::*;

    #[pallet::config]
    pub trait Config: frame_system::Config {
        type RuntimeEvent: From<Event<Self>> + IsType<<Self as frame_system::Config>::RuntimeEvent>;
        /// Clock used for the transfer start and lock release gates.
        type UnixTime: UnixTime;
        type WeightInfo: WeightInfo;
    }

    #[pallet::pallet]
    #[pallet::storage_version(STORAGE_VERSION)]
    pub struct Pallet<T>(_);

    /// Token name (e.g., "BitDegree Token")
    #[pallet::storage]
    #[pallet::getter(fn token_name)]
    pub type TokenName<T> = StorageValue<_, BoundedVec<u8, ConstU32<64>>, ValueQuery>;

    /// Token symbol (e.g., "BDG")
    #[pallet::storage]
    #[pallet::getter(fn token_symbol)]
    pub type TokenSymbol<T> = StorageValue<_, BoundedVec<u8, ConstU32<16>>, ValueQuery>;

    #[pallet::storage]
    #[pallet::getter(fn decimals)]
    pub type Decimals<T> = StorageValue<_, u8, ValueQuery>;

    /// Total token supply, fixed at genesis
    #[pallet::storage]
    #[pallet::getter(fn total_supply)]
    pub type TotalSupply<T> = StorageValue<_, u128, ValueQuery>;

    /// Portion of the supply earmarked for the public sale
    #[pallet::storage]
    #[pallet::getter(fn public_amount)]
    pub type PublicAmount<T> = StorageValue<_, u128, ValueQuery>;

    /// Portion the issuer must keep until `LockReleaseTime`
    #[pallet::storage]
    #[pallet::getter(fn locked_amount)]
    pub type LockedAmount<T> = StorageValue<_, u128, ValueQuery>;

    /// Unix seconds from which transfers are enabled
    #[pallet::storage]
    #[pallet::getter(fn start_time)]
    pub type StartTime<T> = StorageValue<_, u64, ValueQuery>;

    /// Unix seconds from which the issuer's locked amount becomes transferable
    #[pallet::storage]
    #[pallet::getter(fn lock_release_time)]
    pub type LockReleaseTime<T> = StorageValue<_, u64, ValueQuery>;

    #[pallet::storage]
    #[pallet::getter(fn issuer)]
    pub type Issuer<T: Config> = StorageValue<_, T::AccountId, OptionQuery>;

    /// Sale contract account; set once by the issuer
    #[pallet::storage]
    #[pallet::getter(fn sale_address)]
    pub type SaleAddress<T: Config> = StorageValue<_, T::AccountId, OptionQuery>;

    #[pallet::storage]
    #[pallet::getter(fn is_paused)]
    pub type Paused<T> = StorageValue<_, bool, ValueQuery>;

    /// Account balances
    #[pallet::storage]
    #[pallet::getter(fn balance_of)]
    pub type Balances<T: Config> = StorageMap<_, Blake2_128Concat, T::AccountId, u128, ValueQuery>;

    /// Remaining amount `spender` may move out of `owner`'s balance, keyed (owner, spender)
    #[pallet::storage]
    #[pallet::getter(fn allowance)]
    pub type Allowances<T: Config> = StorageDoubleMap<
        _,
        Blake2_128Concat,
        T::AccountId,
        Blake2_128Concat,
        T::AccountId,
        u128,
        ValueQuery,
    >;

    #[pallet::event]
    #[pallet::generate_deposit(pub(super) fn deposit_event)]
    pub enum Event<T: Config> {
        /// Tokens transferred from one account to another
        Transferred { from: T::AccountId, to: T::AccountId, amount: u128 },
        /// Allowance set for a spender
        Approved { owner: T::AccountId, spender: T::AccountId, amount: u128 },
        /// Sale address registered and granted the public allocation
        SaleAddressSet { sale: T::AccountId, allowance: u128 },
        /// All transfers halted
        Paused,
        /// Transfers resumed
        Unpaused,
        /// Issuer role handed over
        OwnershipTransferred { previous: T::AccountId, new: T::AccountId },
    }

    #[pallet::error]
    pub enum Error<T> {
        /// Caller is not the issuer
        Unauthorized,
        /// Transfers are not enabled before `StartTime`
        TransfersNotStarted,
        /// Ownership cannot change before `LockReleaseTime`
        LockNotReleased,
        /// Transfer would take the issuer below `LockedAmount` while locked
        BalanceLocked,
        InsufficientBalance,
        InsufficientAllowance,
        TransfersPaused,
        /// A non-zero allowance must be reset to zero before it can change
        AllowanceNotReset,
        SaleAddressAlreadySet,
        Overflow,
    }

    #[pallet::hooks]
    impl<T: Config> Hooks<BlockNumberFor<T>> for Pallet<T> {
        #[cfg(feature = "try-runtime")]
        fn try_state(_n: BlockNumberFor<T>) -> Result<(), sp_runtime::TryRuntimeError> {
            Self::do_try_state()
        }
    }

    #[pallet::call]
    impl<T: Config> Pallet<T> {
        #[pallet::call_index(0)]
        #[pallet::weight(T::WeightInfo::transfer())]
        pub fn transfer(origin: OriginFor<T>, to: T::AccountId, amount: u128) -> DispatchResult {
            let from = ensure_signed(origin)?;
            Self::do_transfer(&from, &to, amount, Self::now(), false)
        }

        #[pallet::call_index(1)]
        #[pallet::weight(T::WeightInfo::transfer_from())]
        pub fn transfer_from(
            origin: OriginFor<T>,
            owner: T::AccountId,
            to: T::AccountId,
            amount: u128,
        ) -> DispatchResult {
            let spender = ensure_signed(origin)?;
            Self::do_transfer_from(&spender, &owner, &to, amount)
        }

        /// Overwrite the caller's allowance for `spender`.
        ///
        /// A non-zero allowance can only be replaced after resetting it to zero.
        #[pallet::call_index(2)]
        #[pallet::weight(T::WeightInfo::approve())]
        pub fn approve(origin: OriginFor<T>, spender: T::AccountId, amount: u128) -> DispatchResult {
            let owner = ensure_signed(origin)?;
            let current = Allowances::<T>::get(&owner, &spender);
            ensure!(
                current == 0 || amount == 0 || current == amount,
                Error::<T>::AllowanceNotReset
            );

            Allowances::<T>::insert(&owner, &spender, amount);
            Self::deposit_event(Event::Approved { owner, spender, amount });
            Ok(())
        }

        #[pallet::call_index(3)]
        #[pallet::weight(T::WeightInfo::set_sale_address())]
        pub fn set_sale_address(origin: OriginFor<T>, sale: T::AccountId) -> DispatchResult {
            let issuer = Self::ensure_issuer(origin)?;
            ensure!(SaleAddress::<T>::get().is_none(), Error::<T>::SaleAddressAlreadySet);

            let allowance = PublicAmount::<T>::get();
            SaleAddress::<T>::put(&sale);
            Allowances::<T>::insert(&issuer, &sale, allowance);

            log::debug!(target: LOG_TARGET, "sale address set, allowance {allowance}");
            Self::deposit_event(Event::SaleAddressSet { sale, allowance });
            Ok(())
        }

        #[pallet::call_index(4)]
        #[pallet::weight(T::WeightInfo::pause())]
        pub fn pause(origin: OriginFor<T>) -> DispatchResult {
            Self::ensure_issuer(origin)?;
            Paused::<T>::put(true);
            Self::deposit_event(Event::Paused);
            Ok(())
        }

        #[pallet::call_index(5)]
        #[pallet::weight(T::WeightInfo::unpause())]
        pub fn unpause(origin: OriginFor<T>) -> DispatchResult {
            Self::ensure_issuer(origin)?;
            Paused::<T>::put(false);
            Self::deposit_event(Event::Unpaused);
            Ok(())
        }

        /// Hand the issuer role to `new_issuer`. Only possible once the lock has expired.
        #[pallet::call_index(6)]
        #[pallet::weight(T::WeightInfo::transfer_ownership())]
        pub fn transfer_ownership(origin: OriginFor<T>, new_issuer: T::AccountId) -> DispatchResult {
            let previous = Self::ensure_issuer(origin)?;
            ensure!(Self::now() >= LockReleaseTime::<T>::get(), Error::<T>::LockNotReleased);

            Issuer::<T>::put(&new_issuer);
            log::debug!(target: LOG_TARGET, "issuer role transferred");
            Self::deposit_event(Event::OwnershipTransferred { previous, new: new_issuer });
            Ok(())
        }
    }

    #[pallet::genesis_config]
    #[derive(frame_support::DefaultNoBound)]
    pub struct GenesisConfig<T: Config> {
        /// Account credited with the whole supply
        pub issuer: Option<T::AccountId>,
        pub token_name: Vec<u8>,
        pub token_symbol: Vec<u8>,
        pub decimals: u8,
        pub total_supply: u128,
        pub public_amount: u128,
        pub locked_amount: u128,
        /// Unix seconds from which transfers are enabled
        pub start_time: u64,
    }

    #[pallet::genesis_build]
    impl<T: Config> BuildGenesisConfig for GenesisConfig<T> {
        fn build(&self) {
            let name: BoundedVec<u8, ConstU32<64>> =
                self.token_name.clone().try_into().expect("Token name too long (max 64 bytes)");
            TokenName::<T>::put(name);

            let symbol: BoundedVec<u8, ConstU32<16>> =
                self.token_symbol.clone().try_into().expect("Token symbol too long (max 16 bytes)");
            TokenSymbol::<T>::put(symbol);

            Decimals::<T>::put(self.decimals);

            let earmarked = self
                .public_amount
                .checked_add(self.locked_amount)
                .expect("Public and locked amounts overflow");
            assert!(earmarked <= self.total_supply, "Public and locked amounts exceed total supply");

            TotalSupply::<T>::put(self.total_supply);
            PublicAmount::<T>::put(self.public_amount);
            LockedAmount::<T>::put(self.locked_amount);
            StartTime::<T>::put(self.start_time);
            LockReleaseTime::<T>::put(self.start_time.saturating_add(LOCK_PERIOD));

            match self.issuer {
                Some(ref issuer) => {
                    Issuer::<T>::put(issuer);
                    Balances::<T>::insert(issuer, self.total_supply);
                }
                None => assert!(self.total_supply == 0, "Supply configured without an issuer"),
            }
        }
    }
}

impl<T: Config> Pallet<T> {
    fn now() -> u64 {
        T::UnixTime::now().as_secs()
    }

    fn ensure_issuer(origin: OriginFor<T>) -> Result<T::AccountId, DispatchError> {
        let who = ensure_signed(origin)?;
        ensure!(Issuer::<T>::get().as_ref() == Some(&who), Error::<T>::Unauthorized);
        Ok(who)
    }

    /// Balance `who` can move right now, accounting for the issuer lock.
    pub fn transferable_balance(who: &T::AccountId) -> u128 {
        let balance = Balances::<T>::get(who);
        if Issuer::<T>::get().as_ref() == Some(who) && Self::now() < LockReleaseTime::<T>::get() {
            balance.saturating_sub(LockedAmount::<T>::get())
        } else {
            balance
        }
    }

    /// Validate every transfer rule, then debit and credit in one go.
    ///
    /// `presale` lifts the `StartTime` gate; nothing else.
    fn do_transfer(
        from: &T::AccountId,
        to: &T::AccountId,
        amount: u128,
        now: u64,
        presale: bool,
    ) -> DispatchResult {
        ensure!(!Paused::<T>::get(), Error::<T>::TransfersPaused);
        ensure!(presale || now >= StartTime::<T>::get(), Error::<T>::TransfersNotStarted);

        let from_balance = Balances::<T>::get(from);
        let remaining = from_balance.checked_sub(amount).ok_or(Error::<T>::InsufficientBalance)?;

        if Issuer::<T>::get().as_ref() == Some(from) && now < LockReleaseTime::<T>::get() {
            ensure!(remaining >= LockedAmount::<T>::get(), Error::<T>::BalanceLocked);
        }

        if from != to {
            let credited =
                Balances::<T>::get(to).checked_add(amount).ok_or(Error::<T>::Overflow)?;
            Balances::<T>::insert(from, remaining);
            Balances::<T>::insert(to, credited);
        }

        Self::deposit_event(Event::Transferred { from: from.clone(), to: to.clone(), amount });
        Ok(())
    }

    fn do_transfer_from(
        spender: &T::AccountId,
        owner: &T::AccountId,
        to: &T::AccountId,
        amount: u128,
    ) -> DispatchResult {
        let allowance = Allowances::<T>::get(owner, spender);
        let left = allowance.checked_sub(amount).ok_or(Error::<T>::InsufficientAllowance)?;

        let presale = Issuer::<T>::get().as_ref() == Some(owner)
            && SaleAddress::<T>::get().as_ref() == Some(spender);

        Self::do_transfer(owner, to, amount, Self::now(), presale)?;
        Allowances::<T>::insert(owner, spender, left);
        Ok(())
    }

    /// Conservation and lock checks over the whole ledger.
    #[cfg(any(feature = "try-runtime", test))]
    pub fn do_try_state() -> Result<(), DispatchError> {
        let sum = Balances::<T>::iter_values()
            .try_fold(0u128, |acc, balance| acc.checked_add(balance))
            .ok_or(DispatchError::Other("balance sum overflows"))?;
        ensure!(sum == TotalSupply::<T>::get(), DispatchError::Other("balances do not sum to supply"));

        let earmarked = PublicAmount::<T>::get().saturating_add(LockedAmount::<T>::get());
        ensure!(
            earmarked <= TotalSupply::<T>::get(),
            DispatchError::Other("allocations exceed supply")
        );

        if let Some(issuer) = Issuer::<T>::get() {
            if Self::now() < LockReleaseTime::<T>::get() {
                ensure!(
                    Balances::<T>::get(&issuer) >= LockedAmount::<T>::get(),
                    DispatchError::Other("issuer below locked amount")
                );
            }
        }
        Ok(())
    }
}

impl<T: Config> SaleLedger<T::AccountId> for Pallet<T> {
    fn issuer() -> Option<T::AccountId> {
        Issuer::<T>::get()
    }

    fn balance_of(who: &T::AccountId) -> u128 {
        Balances::<T>::get(who)
    }

    fn allowance(owner: &T::AccountId, spender: &T::AccountId) -> u128 {
        Allowances::<T>::get(owner, spender)
    }

    fn transfer_from(
        spender: &T::AccountId,
        owner: &T::AccountId,
        to: &T::AccountId,
        amount: u128,
    ) -> DispatchResult {
        Self::do_transfer_from(spender, owner, to, amount)
    }

    #[cfg(feature = "runtime-benchmarks")]
    fn prepare_sale(issuer: &T::AccountId, sale: &T::AccountId, amount: u128) {
        Issuer::<T>::put(issuer);
        SaleAddress::<T>::put(sale);
        Paused::<T>::put(false);
        StartTime::<T>::put(0);
        LockReleaseTime::<T>::put(0);
        TotalSupply::<T>::mutate(|supply| *supply = supply.saturating_add(amount));
        Balances::<T>::mutate(issuer, |balance| *balance = balance.saturating_add(amount));
        Allowances::<T>::insert(issuer, sale, amount);
    }
}
