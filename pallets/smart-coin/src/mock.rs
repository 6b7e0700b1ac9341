use crate as pallet_smart_coin;
use crate::{OnImplementationUpgrade, PendingApprovals, PendingTransfers};
use frame_support::{
    derive_impl, parameter_types,
    traits::{ConstU32, ConstU64},
    BoundedVec,
};
use sp_core::H256;
use sp_runtime::{
    traits::{BlakeTwo256, IdentityLookup},
    BuildStorage, DispatchError, DispatchResult,
};

type Block = frame_system::mocking::MockBlock<Test>;

// Configure a mock runtime to test the pallet.
frame_support::construct_runtime!(
    pub enum Test {
        System: frame_system,
        SmartCoin: pallet_smart_coin,
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

/// The null account of this runtime.
pub const NULL: u64 = 0;
pub const REGISTRAR: u64 = 1;
pub const ALICE: u64 = 2;
pub const BOB: u64 = 3;
pub const CHARLIE: u64 = 4;
pub const DAVE: u64 = 5;
pub const OPERATIONS: u64 = 8;
pub const TECHNICAL: u64 = 9;

pub const REGISTRAR_BALANCE: u128 = 100_000;
pub const ALICE_BALANCE: u128 = 1_000_000;
pub const BOB_BALANCE: u128 = 500_000;
pub const INITIAL_SUPPLY: u128 = REGISTRAR_BALANCE + ALICE_BALANCE + BOB_BALANCE;
pub const MAX_PENDING: u32 = 4;

parameter_types! {
    pub storage UniversalEscrow: bool = false;
    pub storage DelegatedContext: bool = true;
    pub storage UpgradeCalls: Vec<(H256, Vec<u8>)> = Vec::new();
    pub const MaxPendingPerAccount: u32 = MAX_PENDING;
}

/// Records every post-upgrade call. Data `b"revert"` makes the call fail.
pub struct RecordUpgradeCalls;
impl OnImplementationUpgrade<H256> for RecordUpgradeCalls {
    fn on_upgrade(implementation: &H256, data: &[u8]) -> DispatchResult {
        if data == b"revert" {
            return Err(DispatchError::Other("initializer reverted"));
        }
        let mut calls = UpgradeCalls::get();
        calls.push((*implementation, data.to_vec()));
        UpgradeCalls::set(&calls);
        Ok(())
    }
}

impl pallet_smart_coin::Config for Test {
    type RuntimeEvent = RuntimeEvent;
    type MaxBatchSize = ConstU32<16>;
    type MaxCallDataLen = ConstU32<256>;
    type MaxPendingPerAccount = MaxPendingPerAccount;
    type UniversalEscrow = UniversalEscrow;
    type DelegatedContext = DelegatedContext;
    type OnUpgrade = RecordUpgradeCalls;
    type WeightInfo = ();
}

// Build genesis storage according to the mock runtime.
pub fn new_test_ext() -> sp_io::TestExternalities {
    let mut t = frame_system::GenesisConfig::<Test>::default().build_storage().unwrap();

    pallet_smart_coin::GenesisConfig::<Test> {
        registrar: Some(REGISTRAR),
        operations: Some(OPERATIONS),
        technical: Some(TECHNICAL),
        token_name: b"EUR CoinVertible".to_vec(),
        token_symbol: b"EURCV".to_vec(),
        decimals: 6,
        initial_balances: vec![
            (REGISTRAR, REGISTRAR_BALANCE),
            (ALICE, ALICE_BALANCE),
            (BOB, BOB_BALANCE),
        ],
        frozen_accounts: vec![],
    }
    .assimilate_storage(&mut t)
    .unwrap();

    let mut ext: sp_io::TestExternalities = t.into();
    // Events are not recorded in block 0.
    ext.execute_with(|| System::set_block_number(1));
    ext
}

/// Run `test` on a fresh chain, then check the ledger invariants.
pub fn build_and_execute(test: impl FnOnce()) {
    new_test_ext().execute_with(|| {
        test();
        SmartCoin::do_try_state().expect("ledger invariants hold");
    });
}

pub fn accounts(list: Vec<u64>) -> BoundedVec<u64, ConstU32<16>> {
    list.try_into().expect("batch fits MaxBatchSize")
}

/// Id of the pending transfer request from `from` to `to`.
pub fn pending_transfer(from: u64, to: u64) -> H256 {
    PendingTransfers::<Test>::get(from, to).expect("transfer request is pending")
}

/// Id of the pending approve request from `owner` to `spender`.
pub fn pending_approval(owner: u64, spender: u64) -> H256 {
    PendingApprovals::<Test>::get(owner, spender).expect("approve request is pending")
}

pub fn events() -> Vec<pallet_smart_coin::Event<Test>> {
    System::events()
        .into_iter()
        .filter_map(|record| match record.event {
            RuntimeEvent::SmartCoin(event) => Some(event),
            _ => None,
        })
        .collect()
}
