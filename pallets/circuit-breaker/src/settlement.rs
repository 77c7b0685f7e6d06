//! Settlement strategies for diverted transfers.
//!
//! The orchestrator never inspects which variant guards a parameter: it only
//! calls [`SettlementHandler::prevent`] on breach and
//! [`SettlementHandler::execute`] on release, so new strategies slot in
//! without touching the flow-accounting path.

use frame::deps::{
  frame_support::traits::Get,
  frame_system,
  sp_runtime::{DispatchError, DispatchResult, traits::Hash as HashT},
};
use primitives::SettlementStrategy;

use crate::pallet::{Config, Error, Moment, SettlementIntent};

/// Opaque delayed-execution engine consumed by the Delay strategy.
///
/// `schedule` queues a call for execution no earlier than `min_delay`
/// seconds from now; `run` releases it and is expected to fail while the
/// delay is unexpired or the caller is not an authorized executor. The
/// engine's queueing and authorization internals are outside the breaker.
pub trait DelayedExecution<AccountId, Hash> {
  fn schedule(
    effect_id: Hash,
    target: &AccountId,
    value: u128,
    payload: &[u8],
    min_delay: Moment,
  ) -> DispatchResult;

  fn run(effect_id: Hash) -> DispatchResult;
}

/// No-op engine for runtimes that only configure the Reject strategy.
impl<AccountId, Hash> DelayedExecution<AccountId, Hash> for () {
  fn schedule(
    _effect_id: Hash,
    _target: &AccountId,
    _value: u128,
    _payload: &[u8],
    _min_delay: Moment,
  ) -> DispatchResult {
    Ok(())
  }

  fn run(_effect_id: Hash) -> DispatchResult {
    Ok(())
  }
}

/// Identifier of a diverted transfer, derived from the transfer itself so
/// prevention and release agree on it without extra storage.
pub fn settlement_effect_id<T: Config>(
  target: &T::AccountId,
  value: u128,
  payload: &[u8],
) -> T::Hash {
  <T as frame_system::Config>::Hashing::hash_of(&(target, value, payload))
}

/// Capability interface every strategy variant satisfies.
pub trait SettlementHandler<T: Config> {
  /// Divert a would-be transfer; invoked exactly once per breach event.
  fn prevent(&self, intent: &SettlementIntent<T>) -> Result<T::Hash, DispatchError>;

  /// Release a previously diverted transfer, if the variant supports it.
  fn execute(&self, effect_id: T::Hash) -> DispatchResult;
}

impl<T: Config> SettlementHandler<T> for SettlementStrategy {
  fn prevent(&self, intent: &SettlementIntent<T>) -> Result<T::Hash, DispatchError> {
    let effect_id = settlement_effect_id::<T>(&intent.target, intent.value, &intent.payload);
    match self {
      SettlementStrategy::Delay => {
        T::DelayedExecutor::schedule(
          effect_id,
          &intent.target,
          intent.value,
          &intent.payload,
          T::SettlementDelay::get(),
        )?;
      }
      // The transfer is simply never completed through this path; the id is
      // still returned for observability.
      SettlementStrategy::Reject => {}
    }
    Ok(effect_id)
  }

  fn execute(&self, effect_id: T::Hash) -> DispatchResult {
    match self {
      SettlementStrategy::Delay => T::DelayedExecutor::run(effect_id),
      SettlementStrategy::Reject => Err(Error::<T>::CannotExecuteRejected.into()),
    }
  }
}
