use crate as pallet_circuit_breaker;
use crate::settlement::DelayedExecution;
use polkadot_sdk::frame_support::{
  construct_runtime,
  traits::{ConstU32, ConstU64},
};
use polkadot_sdk::frame_system::EnsureRoot;
use polkadot_sdk::sp_core::H256;
use polkadot_sdk::sp_runtime::{
  BuildStorage, DispatchError, DispatchResult,
  traits::{BlakeTwo256, IdentityLookup},
};

use alloc::collections::BTreeMap;
use alloc::vec;
use core::cell::RefCell;

type Block = polkadot_sdk::frame_system::mocking::MockBlock<Test>;
pub type AccountId = u64;

/// Protected caller wired in at genesis.
pub const VAULT: AccountId = 1;
/// Signed account with no special standing.
pub const OUTSIDER: AccountId = 2;

/// Genesis wall-clock; divisible by the tick length so tick math reads
/// cleanly in tests.
pub const BASE_TIME: u64 = 600_000;

pub const WINDOW: u64 = 3600;
pub const TICK: u64 = 300;
pub const COOLDOWN: u64 = 7200;
pub const DELAY: u64 = 600;

construct_runtime!(
  pub enum Test {
    System: polkadot_sdk::frame_system,
    Timestamp: polkadot_sdk::pallet_timestamp,
    CircuitBreaker: pallet_circuit_breaker,
  }
);

impl polkadot_sdk::frame_system::Config for Test {
  type BaseCallFilter = polkadot_sdk::frame_support::traits::Everything;
  type BlockWeights = ();
  type BlockLength = ();
  type DbWeight = ();
  type RuntimeOrigin = RuntimeOrigin;
  type RuntimeCall = RuntimeCall;
  type Nonce = u64;
  type Hash = H256;
  type Hashing = BlakeTwo256;
  type AccountId = AccountId;
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
  type RuntimeTask = ();
  type ExtensionsWeightInfo = ();
  type SingleBlockMigrations = ();
  type MultiBlockMigrator = ();
  type PreInherents = ();
  type PostInherents = ();
  type PostTransactions = ();
}

impl polkadot_sdk::pallet_timestamp::Config for Test {
  type Moment = u64;
  type OnTimestampSet = ();
  type MinimumPeriod = ConstU64<1>;
  type WeightInfo = ();
}

thread_local! {
  // effect id -> earliest release time (seconds)
  static SCHEDULED: RefCell<BTreeMap<H256, u64>> = RefCell::new(BTreeMap::new());
}

pub fn reset_scheduler() {
  SCHEDULED.with(|s| s.borrow_mut().clear());
}

pub fn scheduled_count() -> usize {
  SCHEDULED.with(|s| s.borrow().len())
}

pub fn is_scheduled(effect_id: H256) -> bool {
  SCHEDULED.with(|s| s.borrow().contains_key(&effect_id))
}

/// Delayed-execution engine backed by a thread-local queue. Enforces the
/// minimum delay and single release, like the real scheduler it stands for.
pub struct TestExecutor;

impl DelayedExecution<AccountId, H256> for TestExecutor {
  fn schedule(
    effect_id: H256,
    _target: &AccountId,
    _value: u128,
    _payload: &[u8],
    min_delay: u64,
  ) -> DispatchResult {
    let ready_at = now_secs() + min_delay;
    SCHEDULED.with(|s| {
      s.borrow_mut().insert(effect_id, ready_at);
    });
    Ok(())
  }

  fn run(effect_id: H256) -> DispatchResult {
    SCHEDULED.with(|s| {
      let mut scheduled = s.borrow_mut();
      let ready_at = scheduled
        .get(&effect_id)
        .copied()
        .ok_or(DispatchError::Other("no scheduled effect"))?;
      if now_secs() < ready_at {
        return Err(DispatchError::Other("delay not elapsed"));
      }
      scheduled.remove(&effect_id);
      Ok(())
    })
  }
}

impl pallet_circuit_breaker::Config for Test {
  type AdminOrigin = EnsureRoot<AccountId>;
  type TimeProvider = Timestamp;
  type DelayedExecutor = TestExecutor;
  type WithdrawalPeriod = ConstU64<WINDOW>;
  type TickLength = ConstU64<TICK>;
  type RateLimitCooldownPeriod = ConstU64<COOLDOWN>;
  type SettlementDelay = ConstU64<DELAY>;
  type MaxPayloadLen = ConstU32<128>;
  type WeightInfo = ();
  #[cfg(feature = "runtime-benchmarks")]
  type BenchmarkHelper = MockBenchmarkHelper;
}

#[cfg(feature = "runtime-benchmarks")]
pub struct MockBenchmarkHelper;

#[cfg(feature = "runtime-benchmarks")]
impl crate::BenchmarkHelper for MockBenchmarkHelper {
  fn set_time(secs: u64) {
    Timestamp::set_timestamp(secs * 1000);
  }
}

pub fn now_secs() -> u64 {
  Timestamp::get() / 1000
}

pub fn set_now(secs: u64) {
  Timestamp::set_timestamp(secs * 1000);
}

// Build genesis storage according to the mock runtime.
pub fn new_test_ext() -> polkadot_sdk::sp_io::TestExternalities {
  reset_scheduler();
  let mut t = polkadot_sdk::frame_system::GenesisConfig::<Test>::default()
    .build_storage()
    .unwrap();

  pallet_circuit_breaker::GenesisConfig::<Test> {
    operational: true,
    protected_contracts: vec![VAULT],
    grace_period_end: 0,
  }
  .assimilate_storage(&mut t)
  .unwrap();

  let mut ext: polkadot_sdk::sp_io::TestExternalities = t.into();
  ext.execute_with(|| {
    polkadot_sdk::frame_system::Pallet::<Test>::set_block_number(1);
    set_now(BASE_TIME);
  });
  ext
}
