use crate as pallet_crowdsale;
use frame_support::{
    assert_ok, derive_impl, parameter_types,
    traits::{ConstU128, ConstU32, ConstU64},
    PalletId,
};
use sp_core::H256;
use sp_runtime::{
    traits::{BlakeTwo256, IdentityLookup},
    BuildStorage,
};

type Block = frame_system::mocking::MockBlock<Test>;

// Configure a mock runtime with both the ledger and the sale.
frame_support::construct_runtime!(
    pub enum Test {
        System: frame_system,
        Timestamp: pallet_timestamp,
        Balances: pallet_balances,
        TokenLedger: pallet_token_ledger,
        Crowdsale: pallet_crowdsale,
    }
);

#[derive_impl(frame_system::config_preludes::TestDefaultConfig)]
impl frame_system::Config for Test {
    type BaseCallFilter = frame_support::traits::Everything;
    type BlockWeights = ();
    type BlockLength = ();
    type DbWeight = ();
    type RuntimeOrigin = RuntimeOrigin;
    type RuntimeCall = RuntimeCall;
    type Nonce = u64;
    type Hash = H256;
    type Hashing = BlakeTwo256;
    type AccountId = u64;
    type Lookup = IdentityLookup<Self::AccountId>;
    type Block = Block;
    type RuntimeEvent = RuntimeEvent;
    type BlockHashCount = ConstU64<250>;
    type Version = ();
    type PalletInfo = PalletInfo;
    type AccountData = pallet_balances::AccountData<u64>;
    type OnNewAccount = ();
    type OnKilledAccount = ();
    type SystemWeightInfo = ();
    type SS58Prefix = ();
    type OnSetCode = ();
    type MaxConsumers = ConstU32<16>;
}

impl pallet_timestamp::Config for Test {
    type Moment = u64;
    type OnTimestampSet = ();
    type MinimumPeriod = ConstU64<1>;
    type WeightInfo = ();
}

parameter_types! {
    pub const ExistentialDeposit: u64 = ED;
}

#[derive_impl(pallet_balances::config_preludes::TestDefaultConfig)]
impl pallet_balances::Config for Test {
    type ExistentialDeposit = ExistentialDeposit;
    type AccountStore = System;
}

impl pallet_token_ledger::Config for Test {
    type RuntimeEvent = RuntimeEvent;
    type UnixTime = Timestamp;
    type WeightInfo = ();
}

parameter_types! {
    pub const CrowdsalePalletId: PalletId = PalletId(*b"py/crwds");
}

impl pallet_crowdsale::Config for Test {
    type RuntimeEvent = RuntimeEvent;
    type Currency = Balances;
    type Ledger = TokenLedger;
    type UnixTime = Timestamp;
    type PalletId = CrowdsalePalletId;
    type SoftCap = ConstU128<SOFT_CAP>;
    type HardCap = ConstU128<HARD_CAP>;
    type MinRate = ConstU128<1>;
    type MaxRate = ConstU128<100>;
    type WeightInfo = ();
    #[cfg(feature = "runtime-benchmarks")]
    type BenchmarkHelper = MockClock;
}

#[cfg(feature = "runtime-benchmarks")]
pub struct MockClock;

#[cfg(feature = "runtime-benchmarks")]
impl pallet_crowdsale::BenchmarkHelper for MockClock {
    fn set_time(secs: u64) {
        set_now(secs);
    }
}

/// Issuer of the token and owner of the sale.
pub const OWNER: u64 = 1;
pub const ALICE: u64 = 2;
pub const BOB: u64 = 3;
/// Holds just enough currency for small purchases.
pub const CHARLIE: u64 = 4;
pub const WALLET: u64 = 9;

pub const INITIAL_FUNDS: u64 = 1_000_000;
/// Above one so that payouts can leave dust behind.
pub const ED: u64 = 10;

pub const TOTAL_SUPPLY: u128 = 1_000_000;
pub const PUBLIC_AMOUNT: u128 = 400_000;
pub const LOCKED_AMOUNT: u128 = 100_000;

pub const SOFT_CAP: u128 = 5_000;
pub const HARD_CAP: u128 = 10_000;
pub const RATE: u128 = 10;

pub const SALE_START: u64 = 1_700_000_000;
pub const SALE_END: u64 = SALE_START + 1_000;
/// Free token transfers open once the sale is over.
pub const TRANSFERS_START: u64 = SALE_END;

/// Move the shared clock to `secs` unix seconds.
pub fn set_now(secs: u64) {
    Timestamp::set_timestamp(secs * 1_000);
}

/// Genesis for both pallets, without registering the sale with the ledger.
pub fn new_unwired_ext() -> sp_io::TestExternalities {
    let mut t = frame_system::GenesisConfig::<Test>::default().build_storage().unwrap();

    pallet_balances::GenesisConfig::<Test> {
        balances: vec![
            (ALICE, INITIAL_FUNDS),
            (BOB, INITIAL_FUNDS),
            (CHARLIE, 1_000),
            (WALLET, INITIAL_FUNDS),
        ],
        dev_accounts: None,
    }
    .assimilate_storage(&mut t)
    .unwrap();

    pallet_token_ledger::GenesisConfig::<Test> {
        issuer: Some(OWNER),
        token_name: b"BitDegree Token".to_vec(),
        token_symbol: b"BDG".to_vec(),
        decimals: 18,
        total_supply: TOTAL_SUPPLY,
        public_amount: PUBLIC_AMOUNT,
        locked_amount: LOCKED_AMOUNT,
        start_time: TRANSFERS_START,
    }
    .assimilate_storage(&mut t)
    .unwrap();

    pallet_crowdsale::GenesisConfig::<Test> {
        start_time: SALE_START,
        end_time: SALE_END,
        rate: RATE,
        wallet: Some(WALLET),
        owner: Some(OWNER),
    }
    .assimilate_storage(&mut t)
    .unwrap();

    let mut ext = sp_io::TestExternalities::new(t);
    ext.execute_with(|| {
        System::set_block_number(1);
        set_now(SALE_START - 10);
    });
    ext
}

/// Full setup: the issuer registers the sale escrow as the ledger's sale address.
pub fn new_test_ext() -> sp_io::TestExternalities {
    let mut ext = new_unwired_ext();
    ext.execute_with(|| {
        assert_ok!(TokenLedger::set_sale_address(RuntimeOrigin::signed(OWNER), Crowdsale::account_id()));
    });
    ext
}

/// Wired sale with the clock at zero, as a fresh chain presents it to the bencher.
#[cfg(feature = "runtime-benchmarks")]
pub fn new_bench_ext() -> sp_io::TestExternalities {
    let mut ext = new_test_ext();
    ext.execute_with(|| set_now(0));
    ext
}
