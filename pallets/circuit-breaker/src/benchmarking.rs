use crate::*;
use alloc::vec;
use polkadot_sdk::frame_benchmarking::v2::*;
use polkadot_sdk::frame_support::traits::{EnsureOrigin, Get};
use polkadot_sdk::frame_system::RawOrigin;
use primitives::{ParameterId, SettlementStrategy};

const BASE_TIME: u64 = 600_000;

fn bench_pid() -> ParameterId {
  ParameterId::new([1u8; 32])
}

fn admin_origin<T: Config>() -> T::RuntimeOrigin {
  T::AdminOrigin::try_successful_origin().expect("admin origin must be constructible")
}

fn setup_parameter<T: Config>(strategy: SettlementStrategy) {
  Pallet::<T>::add_security_parameter(admin_origin::<T>(), bench_pid(), 7000, 100, strategy)
    .expect("parameter registration failed");
}

/// Arm the breaker and allow-list `who` so flow-change calls go through.
fn setup_flow_caller<T: Config>(who: &T::AccountId) {
  Operational::<T>::put(true);
  ProtectedContracts::<T>::insert(who, ());
}

#[benchmarks]
mod benches {
  use super::*;

  #[benchmark]
  fn add_protected_contracts() {
    let account: T::AccountId = whitelisted_caller();

    let origin = admin_origin::<T>();

    #[extrinsic_call]
    _(origin as T::RuntimeOrigin, vec![account.clone()]);

    assert!(ProtectedContracts::<T>::contains_key(&account));
  }

  #[benchmark]
  fn remove_protected_contracts() {
    let account: T::AccountId = whitelisted_caller();
    ProtectedContracts::<T>::insert(&account, ());
    let origin = admin_origin::<T>();

    #[extrinsic_call]
    _(origin as T::RuntimeOrigin, vec![account.clone()]);

    assert!(!ProtectedContracts::<T>::contains_key(&account));
  }

  #[benchmark]
  fn add_security_parameter() {
    let origin = admin_origin::<T>();

    #[extrinsic_call]
    _(
      origin as T::RuntimeOrigin,
      bench_pid(),
      7000,
      100,
      SettlementStrategy::Reject,
    );

    assert!(Limiters::<T>::contains_key(bench_pid()));
  }

  #[benchmark]
  fn update_security_parameter() {
    setup_parameter::<T>(SettlementStrategy::Reject);
    let origin = admin_origin::<T>();

    #[extrinsic_call]
    _(
      origin as T::RuntimeOrigin,
      bench_pid(),
      8000,
      50,
      SettlementStrategy::Delay,
    );

    let limiter = Limiters::<T>::get(bench_pid()).expect("limiter must exist");
    assert_eq!(limiter.min_retained_bps, 8000);
  }

  #[benchmark]
  fn set_operational_status() {
    Operational::<T>::put(true);
    let origin = admin_origin::<T>();

    #[extrinsic_call]
    _(origin as T::RuntimeOrigin, false);

    assert!(!Operational::<T>::get());
  }

  #[benchmark]
  fn start_grace_period() {
    T::BenchmarkHelper::set_time(BASE_TIME);
    let origin = admin_origin::<T>();

    #[extrinsic_call]
    _(origin as T::RuntimeOrigin, BASE_TIME + 500);
  }

  #[benchmark]
  fn override_rate_limit() {
    setup_parameter::<T>(SettlementStrategy::Reject);
    RateLimited::<T>::put(true);
    let origin = admin_origin::<T>();

    #[extrinsic_call]
    _(origin as T::RuntimeOrigin, bench_pid());

    assert!(!RateLimited::<T>::get());
  }

  #[benchmark]
  fn override_expired_rate_limit() {
    let caller: T::AccountId = whitelisted_caller();
    RateLimited::<T>::put(true);
    LastRateLimitTime::<T>::put(BASE_TIME);
    T::BenchmarkHelper::set_time(BASE_TIME + T::RateLimitCooldownPeriod::get());

    #[extrinsic_call]
    _(RawOrigin::Signed(caller));

    assert!(!RateLimited::<T>::get());
  }

  #[benchmark]
  fn clear_backlog() {
    let caller: T::AccountId = whitelisted_caller();
    setup_parameter::<T>(SettlementStrategy::Reject);
    setup_flow_caller::<T>(&caller);
    let tick = T::TickLength::get().max(1);
    T::BenchmarkHelper::set_time(BASE_TIME);
    Pallet::<T>::increase_parameter(
      RawOrigin::Signed(caller.clone()).into(),
      bench_pid(),
      1000,
      caller.clone(),
      0,
      vec![],
    )
    .expect("inflow failed");
    T::BenchmarkHelper::set_time(BASE_TIME + tick);
    Pallet::<T>::increase_parameter(
      RawOrigin::Signed(caller.clone()).into(),
      bench_pid(),
      1000,
      caller.clone(),
      0,
      vec![],
    )
    .expect("inflow failed");
    // push every node past the window
    T::BenchmarkHelper::set_time(BASE_TIME + T::WithdrawalPeriod::get() + 2 * tick);

    #[extrinsic_call]
    _(RawOrigin::Signed(caller), bench_pid(), u32::MAX);
  }

  #[benchmark]
  fn increase_parameter() {
    let caller: T::AccountId = whitelisted_caller();
    setup_parameter::<T>(SettlementStrategy::Reject);
    setup_flow_caller::<T>(&caller);
    T::BenchmarkHelper::set_time(BASE_TIME);

    #[extrinsic_call]
    _(
      RawOrigin::Signed(caller.clone()),
      bench_pid(),
      1000,
      caller.clone(),
      1000,
      vec![],
    );
  }

  #[benchmark]
  fn decrease_parameter() {
    let caller: T::AccountId = whitelisted_caller();
    setup_parameter::<T>(SettlementStrategy::Reject);
    setup_flow_caller::<T>(&caller);
    // worst case: the change lands on an active rate limit and is diverted
    RateLimited::<T>::put(true);
    T::BenchmarkHelper::set_time(BASE_TIME);

    #[extrinsic_call]
    _(
      RawOrigin::Signed(caller.clone()),
      bench_pid(),
      1000,
      caller.clone(),
      1000,
      vec![],
    );
  }

  #[benchmark]
  fn execute_settlement() {
    let caller: T::AccountId = whitelisted_caller();
    setup_parameter::<T>(SettlementStrategy::Delay);
    T::BenchmarkHelper::set_time(BASE_TIME);
    let effect_id = crate::settlement::settlement_effect_id::<T>(&caller, 1000, &[]);
    T::DelayedExecutor::schedule(effect_id, &caller, 1000, &[], T::SettlementDelay::get())
      .expect("scheduling failed");
    T::BenchmarkHelper::set_time(BASE_TIME + T::SettlementDelay::get());

    #[extrinsic_call]
    _(RawOrigin::Signed(caller.clone()), bench_pid(), caller.clone(), 1000, vec![]);
  }

  #[cfg(test)]
  use crate::mock::{Test, new_test_ext};
  #[cfg(test)]
  impl_benchmark_test_suite!(Pallet, new_test_ext(), Test);
}
