use crate as pallet_token_ledger;
use frame_support::{
    derive_impl,
    traits::{ConstU32, ConstU64},
};
use sp_core::H256;
use sp_runtime::{
    traits::{BlakeTwo256, IdentityLookup},
    BuildStorage,
};

type Block = frame_system::mocking::MockBlock<Test>;

// Configure a mock runtime to test the pallet.
frame_support::construct_runtime!(
    pub enum Test {
        System: frame_system,
        Timestamp: pallet_timestamp,
        TokenLedger: pallet_token_ledger,
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
    type AccountData = ();
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

impl pallet_token_ledger::Config for Test {
    type RuntimeEvent = RuntimeEvent;
    type UnixTime = Timestamp;
    type WeightInfo = ();
}

pub const ISSUER: u64 = 1;
pub const ALICE: u64 = 2;
pub const BOB: u64 = 3;
pub const SALE: u64 = 9;

pub const TOTAL_SUPPLY: u128 = 1_000_000;
pub const PUBLIC_AMOUNT: u128 = 400_000;
pub const LOCKED_AMOUNT: u128 = 100_000;

/// Unix seconds at which transfers open.
pub const START: u64 = 1_700_000_000;

/// Move the shared clock to `secs` unix seconds.
pub fn set_now(secs: u64) {
    Timestamp::set_timestamp(secs * 1_000);
}

// Build genesis storage according to the mock runtime. The clock starts
// shortly before `START`.
pub fn new_test_ext() -> sp_io::TestExternalities {
    let mut t = frame_system::GenesisConfig::<Test>::default().build_storage().unwrap();

    pallet_token_ledger::GenesisConfig::<Test> {
        issuer: Some(ISSUER),
        token_name: b"BitDegree Token".to_vec(),
        token_symbol: b"BDG".to_vec(),
        decimals: 18,
        total_supply: TOTAL_SUPPLY,
        public_amount: PUBLIC_AMOUNT,
        locked_amount: LOCKED_AMOUNT,
        start_time: START,
    }
    .assimilate_storage(&mut t)
    .unwrap();

    let mut ext = sp_io::TestExternalities::new(t);
    ext.execute_with(|| {
        System::set_block_number(1);
        set_now(START - 100);
    });
    ext
}
