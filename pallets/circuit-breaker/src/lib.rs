//! Circuit Breaker Pallet
//!
//! Guards an asset-custody protocol by tracking net in/out flow per security
//! parameter over a sliding time window. When the net outflow breaches the
//! configured retained-fraction tolerance, the triggering transfer is
//! diverted to the parameter's settlement strategy (delayed release or
//! permanent rejection) instead of completing.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub use pallet::*;

pub mod settlement;
pub use settlement::{DelayedExecution, SettlementHandler};

pub mod weights;
pub use weights::WeightInfo;

#[cfg(test)]
mod mock;

#[cfg(feature = "runtime-benchmarks")]
mod benchmarking;

/// Helper for benchmarking — moves the clock where the bench environment has
/// no inherent to do it.
#[cfg(feature = "runtime-benchmarks")]
pub trait BenchmarkHelper {
  fn set_time(secs: u64);
}

#[cfg(feature = "runtime-benchmarks")]
impl BenchmarkHelper for () {
  fn set_time(_secs: u64) {}
}

#[frame::pallet]
pub mod pallet {
  use crate::settlement::{DelayedExecution, SettlementHandler};
  use crate::weights::WeightInfo;
  use alloc::vec::Vec;
  use frame::deps::{
    frame_support::traits::{EnsureOrigin, UnixTime},
    sp_runtime::DispatchError,
  };
  use frame::prelude::*;
  use primitives::{BPS_DENOMINATOR, LimitStatus, ParameterId, SettlementStrategy};

  pub type Balance = u128;
  /// Wall-clock seconds since the unix epoch.
  pub type Moment = u64;

  /// One tick bucket of the per-parameter change sequence.
  ///
  /// `next_tick == 0` marks the tail of the sequence.
  #[derive(
    Clone, Copy, Encode, Decode, Eq, PartialEq, RuntimeDebug, TypeInfo, MaxEncodedLen, Default,
  )]
  pub struct TickNode {
    /// Tick timestamp of the next live node, 0 at the tail.
    pub next_tick: Moment,
    /// Net signed change recorded within this tick.
    pub amount: i128,
  }

  /// Per-parameter sliding-window accounting state.
  #[derive(Clone, Encode, Decode, Eq, PartialEq, RuntimeDebug, TypeInfo, MaxEncodedLen)]
  pub struct Limiter {
    /// Minimum fraction (bps) of liquidity that must survive the window.
    pub min_retained_bps: u32,
    /// Absolute liquidity floor below which breach checks are skipped.
    pub begin_threshold: Balance,
    /// All-time net liquidity; cumulative, untouched by eviction.
    pub liq_total: i128,
    /// Net change within the current window only.
    pub liq_in_period: i128,
    /// Tick of the oldest live node, 0 when the sequence is empty.
    pub list_head: Moment,
    /// Tick of the newest live node, 0 when the sequence is empty.
    pub list_tail: Moment,
    /// Settlement policy applied to transfers diverted by this limiter.
    pub strategy: SettlementStrategy,
    /// Administrative escape hatch: suppresses breach detection entirely.
    pub overridden: bool,
  }

  /// The would-be transfer carried by a flow-change call, handed to the
  /// settlement strategy when the change is diverted.
  pub struct SettlementIntent<T: Config> {
    pub target: T::AccountId,
    pub value: Balance,
    pub payload: BoundedVec<u8, T::MaxPayloadLen>,
  }

  #[pallet::config]
  pub trait Config: frame_system::Config {
    /// Origin allowed to administer parameters, callers and global flags.
    type AdminOrigin: EnsureOrigin<Self::RuntimeOrigin>;

    /// Wall-clock source for window accounting.
    type TimeProvider: UnixTime;

    /// External delayed-execution engine used by the Delay strategy. The
    /// breaker only schedules and releases through it; queueing and executor
    /// authorization live on the other side.
    type DelayedExecutor: DelayedExecution<Self::AccountId, Self::Hash>;

    /// Length of the sliding window, in seconds.
    #[pallet::constant]
    type WithdrawalPeriod: Get<Moment>;

    /// Tick granularity for bucketing changes, in seconds. Must be non-zero;
    /// live nodes per parameter are bounded by `WithdrawalPeriod / TickLength`.
    #[pallet::constant]
    type TickLength: Get<Moment>;

    /// How long a rate limit must stand before anyone may lift it
    /// permissionlessly.
    #[pallet::constant]
    type RateLimitCooldownPeriod: Get<Moment>;

    /// Minimum delay the Delay strategy schedules diverted transfers with.
    #[pallet::constant]
    type SettlementDelay: Get<Moment>;

    /// Upper bound on the opaque settlement payload.
    #[pallet::constant]
    type MaxPayloadLen: Get<u32>;

    /// Weight information for extrinsics.
    type WeightInfo: WeightInfo;

    /// Benchmark helper for moving the clock in benchmark context.
    #[cfg(feature = "runtime-benchmarks")]
    type BenchmarkHelper: crate::BenchmarkHelper;
  }

  #[pallet::pallet]
  pub struct Pallet<T>(_);

  /// Limiter configuration and running totals by security parameter.
  #[pallet::storage]
  #[pallet::getter(fn limiters)]
  pub type Limiters<T: Config> = StorageMap<_, Blake2_128Concat, ParameterId, Limiter, OptionQuery>;

  /// Live tick nodes by parameter and tick timestamp. Keyed storage is the
  /// node arena; the limiter's head/tail and each node's `next_tick` give the
  /// chronological order.
  #[pallet::storage]
  #[pallet::getter(fn liquidity_changes)]
  pub type LiquidityChanges<T: Config> =
    StorageDoubleMap<_, Blake2_128Concat, ParameterId, Blake2_128Concat, Moment, TickNode, OptionQuery>;

  /// Allow-list of callers authorized to report flow changes.
  #[pallet::storage]
  pub type ProtectedContracts<T: Config> =
    StorageMap<_, Blake2_128Concat, T::AccountId, (), OptionQuery>;

  /// Whether flow-change operations are accepted at all.
  #[pallet::storage]
  pub type Operational<T: Config> = StorageValue<_, bool, ValueQuery>;

  /// Global flag set on the first unsuppressed breach; cleared only by
  /// override operations.
  #[pallet::storage]
  pub type RateLimited<T: Config> = StorageValue<_, bool, ValueQuery>;

  /// When the rate limit was last raised; basis for the permissionless
  /// cooldown override.
  #[pallet::storage]
  #[pallet::getter(fn last_rate_limit_time)]
  pub type LastRateLimitTime<T: Config> = StorageValue<_, Moment, ValueQuery>;

  /// Breaches detected while `now <= GracePeriodEnd` are observed but not
  /// acted upon.
  #[pallet::storage]
  #[pallet::getter(fn grace_period_end)]
  pub type GracePeriodEnd<T: Config> = StorageValue<_, Moment, ValueQuery>;

  #[pallet::event]
  #[pallet::generate_deposit(pub(super) fn deposit_event)]
  pub enum Event<T: Config> {
    /// A security parameter was registered.
    ParameterAdded {
      id: ParameterId,
      min_retained_bps: u32,
      begin_threshold: Balance,
      strategy: SettlementStrategy,
    },
    /// A security parameter's configuration was replaced.
    ParameterUpdated {
      id: ParameterId,
      min_retained_bps: u32,
      begin_threshold: Balance,
      strategy: SettlementStrategy,
    },
    /// An inflow was recorded.
    ParameterIncreased {
      id: ParameterId,
      amount: Balance,
      triggered: bool,
    },
    /// An outflow was recorded.
    ParameterDecreased {
      id: ParameterId,
      amount: Balance,
      triggered: bool,
    },
    /// A breach set the global rate limit.
    RateLimitTriggered { id: ParameterId, time: Moment },
    /// The global rate limit was lifted; `id` names the limiter an
    /// administrator overrode, `None` for the permissionless cooldown path.
    RateLimitOverridden { id: Option<ParameterId> },
    /// A grace period was declared.
    GracePeriodStarted { end: Moment },
    /// Operational status was toggled.
    OperationalStatusSet { operational: bool },
    /// An account was added to the protected-caller allow-list.
    ProtectedContractAdded { account: T::AccountId },
    /// An account was removed from the protected-caller allow-list.
    ProtectedContractRemoved { account: T::AccountId },
    /// Stale nodes were drained from a limiter's window.
    BacklogCleared { id: ParameterId, evicted: u32 },
    /// A transfer was diverted to the parameter's settlement strategy.
    SettlementPrevented {
      id: ParameterId,
      effect_id: T::Hash,
      strategy: SettlementStrategy,
    },
    /// A previously diverted transfer was released.
    SettlementExecuted { id: ParameterId, effect_id: T::Hash },
  }

  #[pallet::error]
  pub enum Error<T> {
    /// The caller is not on the protected-contract allow-list.
    NotProtectedContract,
    /// Flow-change operations are disabled.
    NotOperational,
    /// No rate limit is currently in force.
    NotRateLimited,
    /// The permissionless override cooldown has not elapsed yet.
    CooldownPending,
    /// A grace period must end in the future.
    InvalidGracePeriodEnd,
    /// The security parameter is already registered.
    ParameterAlreadyRegistered,
    /// The security parameter was never registered.
    ParameterNotRegistered,
    /// `min_retained_bps` must be in `1..=10_000`.
    InvalidRetentionBps,
    /// A rejected settlement can never be executed.
    CannotExecuteRejected,
    /// The settlement payload exceeds `MaxPayloadLen`.
    PayloadTooLong,
    /// The flow amount does not fit signed accounting.
    AmountOutOfRange,
  }

  #[pallet::call]
  impl<T: Config> Pallet<T> {
    /// Add accounts to the protected-caller allow-list.
    #[pallet::call_index(0)]
    #[pallet::weight(T::WeightInfo::add_protected_contracts())]
    pub fn add_protected_contracts(
      origin: OriginFor<T>,
      contracts: Vec<T::AccountId>,
    ) -> DispatchResult {
      T::AdminOrigin::ensure_origin(origin)?;
      for account in contracts {
        ProtectedContracts::<T>::insert(&account, ());
        Self::deposit_event(Event::ProtectedContractAdded { account });
      }
      Ok(())
    }

    /// Remove accounts from the protected-caller allow-list.
    #[pallet::call_index(1)]
    #[pallet::weight(T::WeightInfo::remove_protected_contracts())]
    pub fn remove_protected_contracts(
      origin: OriginFor<T>,
      contracts: Vec<T::AccountId>,
    ) -> DispatchResult {
      T::AdminOrigin::ensure_origin(origin)?;
      for account in contracts {
        ProtectedContracts::<T>::remove(&account);
        Self::deposit_event(Event::ProtectedContractRemoved { account });
      }
      Ok(())
    }

    /// Register a security parameter with its tolerance and settlement
    /// strategy. Fails if the parameter already exists; use
    /// `update_security_parameter` to reconfigure.
    #[pallet::call_index(2)]
    #[pallet::weight(T::WeightInfo::add_security_parameter())]
    pub fn add_security_parameter(
      origin: OriginFor<T>,
      id: ParameterId,
      min_retained_bps: u32,
      begin_threshold: Balance,
      strategy: SettlementStrategy,
    ) -> DispatchResult {
      T::AdminOrigin::ensure_origin(origin)?;
      ensure!(
        min_retained_bps > 0 && min_retained_bps <= BPS_DENOMINATOR,
        Error::<T>::InvalidRetentionBps
      );
      ensure!(
        !Limiters::<T>::contains_key(id),
        Error::<T>::ParameterAlreadyRegistered
      );
      Limiters::<T>::insert(
        id,
        Limiter {
          min_retained_bps,
          begin_threshold,
          liq_total: 0,
          liq_in_period: 0,
          list_head: 0,
          list_tail: 0,
          strategy,
          overridden: false,
        },
      );
      Self::deposit_event(Event::ParameterAdded {
        id,
        min_retained_bps,
        begin_threshold,
        strategy,
      });
      Ok(())
    }

    /// Replace a parameter's configuration without resetting its totals.
    ///
    /// Re-arms an overridden limiter and immediately re-syncs the window so
    /// the accumulated history is evaluated against the new tolerance.
    #[pallet::call_index(3)]
    #[pallet::weight(T::WeightInfo::update_security_parameter())]
    pub fn update_security_parameter(
      origin: OriginFor<T>,
      id: ParameterId,
      min_retained_bps: u32,
      begin_threshold: Balance,
      strategy: SettlementStrategy,
    ) -> DispatchResult {
      T::AdminOrigin::ensure_origin(origin)?;
      ensure!(
        min_retained_bps > 0 && min_retained_bps <= BPS_DENOMINATOR,
        Error::<T>::InvalidRetentionBps
      );
      let mut limiter = Limiters::<T>::get(id).ok_or(Error::<T>::ParameterNotRegistered)?;
      limiter.min_retained_bps = min_retained_bps;
      limiter.begin_threshold = begin_threshold;
      limiter.strategy = strategy;
      limiter.overridden = false;
      Self::evict_stale(&mut limiter, id, Self::now(), u32::MAX);
      Limiters::<T>::insert(id, limiter);
      Self::deposit_event(Event::ParameterUpdated {
        id,
        min_retained_bps,
        begin_threshold,
        strategy,
      });
      Ok(())
    }

    /// Enable or disable all flow-change operations. While not operational
    /// the breaker fails closed.
    #[pallet::call_index(4)]
    #[pallet::weight(T::WeightInfo::set_operational_status())]
    pub fn set_operational_status(origin: OriginFor<T>, operational: bool) -> DispatchResult {
      T::AdminOrigin::ensure_origin(origin)?;
      Operational::<T>::put(operational);
      Self::deposit_event(Event::OperationalStatusSet { operational });
      Ok(())
    }

    /// Declare a grace period: breaches detected until `end_time` are
    /// observed but never raise the rate limit. Intended as a bounded
    /// migration window after parameter changes.
    #[pallet::call_index(5)]
    #[pallet::weight(T::WeightInfo::start_grace_period())]
    pub fn start_grace_period(origin: OriginFor<T>, end_time: Moment) -> DispatchResult {
      T::AdminOrigin::ensure_origin(origin)?;
      ensure!(end_time > Self::now(), Error::<T>::InvalidGracePeriodEnd);
      GracePeriodEnd::<T>::put(end_time);
      Self::deposit_event(Event::GracePeriodStarted { end: end_time });
      Ok(())
    }

    /// Administrative clearing of a confirmed false positive. Lifts the
    /// global rate limit, marks the named limiter overridden so its
    /// still-drained window cannot immediately re-trigger, and drains its
    /// stale nodes.
    #[pallet::call_index(6)]
    #[pallet::weight(T::WeightInfo::override_rate_limit())]
    pub fn override_rate_limit(origin: OriginFor<T>, id: ParameterId) -> DispatchResult {
      T::AdminOrigin::ensure_origin(origin)?;
      ensure!(RateLimited::<T>::get(), Error::<T>::NotRateLimited);
      let mut limiter = Limiters::<T>::get(id).ok_or(Error::<T>::ParameterNotRegistered)?;
      RateLimited::<T>::put(false);
      limiter.overridden = true;
      Self::evict_stale(&mut limiter, id, Self::now(), u32::MAX);
      Limiters::<T>::insert(id, limiter);
      Self::deposit_event(Event::RateLimitOverridden { id: Some(id) });
      Ok(())
    }

    /// Permissionless safety valve: once the cooldown since the last breach
    /// has elapsed, anyone may lift a forgotten rate limit so the protocol
    /// cannot stay locked forever.
    #[pallet::call_index(7)]
    #[pallet::weight(T::WeightInfo::override_expired_rate_limit())]
    pub fn override_expired_rate_limit(origin: OriginFor<T>) -> DispatchResult {
      ensure_signed(origin)?;
      ensure!(RateLimited::<T>::get(), Error::<T>::NotRateLimited);
      ensure!(
        Self::now().saturating_sub(LastRateLimitTime::<T>::get())
          >= T::RateLimitCooldownPeriod::get(),
        Error::<T>::CooldownPending
      );
      RateLimited::<T>::put(false);
      Self::deposit_event(Event::RateLimitOverridden { id: None });
      Ok(())
    }

    /// Permissionless capped eviction. Stale-node backlog accrues while a
    /// parameter sees no flow; anyone may drain it incrementally,
    /// `max_iterations` nodes per call.
    #[pallet::call_index(8)]
    #[pallet::weight(T::WeightInfo::clear_backlog())]
    pub fn clear_backlog(
      origin: OriginFor<T>,
      id: ParameterId,
      max_iterations: u32,
    ) -> DispatchResult {
      ensure_signed(origin)?;
      let mut limiter = Limiters::<T>::get(id).ok_or(Error::<T>::ParameterNotRegistered)?;
      let evicted = Self::evict_stale(&mut limiter, id, Self::now(), max_iterations);
      Limiters::<T>::insert(id, limiter);
      Self::deposit_event(Event::BacklogCleared { id, evicted });
      Ok(())
    }

    /// Record an inflow for a tracked resource. The settlement arguments
    /// describe the transfer to divert should this call land on a breached
    /// window.
    #[pallet::call_index(9)]
    #[pallet::weight(T::WeightInfo::increase_parameter())]
    pub fn increase_parameter(
      origin: OriginFor<T>,
      id: ParameterId,
      amount: Balance,
      target: T::AccountId,
      value: Balance,
      payload: Vec<u8>,
    ) -> DispatchResult {
      let who = ensure_signed(origin)?;
      let intent = Self::intent(target, value, payload)?;
      let triggered = Self::record_inflow(&who, id, amount, intent)?;
      Self::deposit_event(Event::ParameterIncreased {
        id,
        amount,
        triggered,
      });
      Ok(())
    }

    /// Record an outflow for a tracked resource. On breach the transfer
    /// described by `target`/`value`/`payload` is diverted to the
    /// parameter's settlement strategy; the caller must not also forward
    /// funds when the emitted event reports `triggered`.
    #[pallet::call_index(10)]
    #[pallet::weight(T::WeightInfo::decrease_parameter())]
    pub fn decrease_parameter(
      origin: OriginFor<T>,
      id: ParameterId,
      amount: Balance,
      target: T::AccountId,
      value: Balance,
      payload: Vec<u8>,
    ) -> DispatchResult {
      let who = ensure_signed(origin)?;
      let intent = Self::intent(target, value, payload)?;
      let triggered = Self::record_outflow(&who, id, amount, intent)?;
      Self::deposit_event(Event::ParameterDecreased {
        id,
        amount,
        triggered,
      });
      Ok(())
    }

    /// Attempt to release a previously diverted transfer through the
    /// parameter's settlement strategy. The delayed-execution engine
    /// enforces that the delay has elapsed and that the caller is an
    /// authorized executor; rejected settlements always fail here.
    #[pallet::call_index(11)]
    #[pallet::weight(T::WeightInfo::execute_settlement())]
    pub fn execute_settlement(
      origin: OriginFor<T>,
      id: ParameterId,
      target: T::AccountId,
      value: Balance,
      payload: Vec<u8>,
    ) -> DispatchResult {
      ensure_signed(origin)?;
      let limiter = Limiters::<T>::get(id).ok_or(Error::<T>::ParameterNotRegistered)?;
      let intent = Self::intent(target, value, payload)?;
      let effect_id =
        crate::settlement::settlement_effect_id::<T>(&intent.target, intent.value, &intent.payload);
      <SettlementStrategy as SettlementHandler<T>>::execute(&limiter.strategy, effect_id)?;
      Self::deposit_event(Event::SettlementExecuted { id, effect_id });
      Ok(())
    }
  }

  impl<T: Config> Pallet<T> {
    /// Flow-change entry point for protected sibling pallets: record an
    /// inflow and report whether the change was diverted.
    pub fn record_inflow(
      who: &T::AccountId,
      id: ParameterId,
      amount: Balance,
      intent: SettlementIntent<T>,
    ) -> Result<bool, DispatchError> {
      let signed = i128::try_from(amount).map_err(|_| Error::<T>::AmountOutOfRange)?;
      Self::do_record_flow(who, id, signed, intent)
    }

    /// Flow-change entry point for protected sibling pallets: record an
    /// outflow and report whether the change was diverted.
    pub fn record_outflow(
      who: &T::AccountId,
      id: ParameterId,
      amount: Balance,
      intent: SettlementIntent<T>,
    ) -> Result<bool, DispatchError> {
      let signed = i128::try_from(amount).map_err(|_| Error::<T>::AmountOutOfRange)?;
      Self::do_record_flow(who, id, -signed, intent)
    }

    fn do_record_flow(
      who: &T::AccountId,
      id: ParameterId,
      signed_amount: i128,
      intent: SettlementIntent<T>,
    ) -> Result<bool, DispatchError> {
      ensure!(Operational::<T>::get(), Error::<T>::NotOperational);
      ensure!(
        ProtectedContracts::<T>::contains_key(who),
        Error::<T>::NotProtectedContract
      );
      // Never-configured parameters are unrestricted: accept and ignore.
      let Some(mut limiter) = Limiters::<T>::get(id) else {
        return Ok(false);
      };
      let now = Self::now();
      Self::record_change(&mut limiter, id, signed_amount, now);
      let status = Self::limit_status(&limiter);
      Limiters::<T>::insert(id, &limiter);
      if RateLimited::<T>::get() {
        // Already rate limited: every further flow is diverted outright.
        Self::divert(id, &limiter, &intent)?;
        return Ok(true);
      }
      if status == LimitStatus::Triggered && now > GracePeriodEnd::<T>::get() {
        RateLimited::<T>::put(true);
        LastRateLimitTime::<T>::put(now);
        Self::deposit_event(Event::RateLimitTriggered { id, time: now });
        Self::divert(id, &limiter, &intent)?;
        return Ok(true);
      }
      Ok(false)
    }

    fn divert(id: ParameterId, limiter: &Limiter, intent: &SettlementIntent<T>) -> DispatchResult {
      let effect_id = limiter.strategy.prevent(intent)?;
      Self::deposit_event(Event::SettlementPrevented {
        id,
        effect_id,
        strategy: limiter.strategy,
      });
      Ok(())
    }

    /// Record one signed change: evict, bucket into the current tick,
    /// update totals. Amortized O(1) plus the evictions it pays for.
    fn record_change(limiter: &mut Limiter, id: ParameterId, amount: i128, now: Moment) {
      Self::evict_stale(limiter, id, now, u32::MAX);
      let current_tick = Self::tick_of(now);
      // tick 0 would collide with the empty-list sentinel; any real unix
      // wall clock is far past the first tick
      debug_assert!(current_tick != 0);
      if limiter.list_head == 0 {
        limiter.list_head = current_tick;
        limiter.list_tail = current_tick;
        LiquidityChanges::<T>::insert(
          id,
          current_tick,
          TickNode {
            next_tick: 0,
            amount,
          },
        );
      } else if limiter.list_tail == current_tick {
        LiquidityChanges::<T>::mutate(id, current_tick, |node| {
          if let Some(node) = node {
            node.amount = node.amount.saturating_add(amount);
          }
        });
      } else {
        LiquidityChanges::<T>::mutate(id, limiter.list_tail, |node| {
          if let Some(node) = node {
            node.next_tick = current_tick;
          }
        });
        LiquidityChanges::<T>::insert(
          id,
          current_tick,
          TickNode {
            next_tick: 0,
            amount,
          },
        );
        limiter.list_tail = current_tick;
      }
      limiter.liq_total = limiter.liq_total.saturating_add(amount);
      limiter.liq_in_period = limiter.liq_in_period.saturating_add(amount);
    }

    /// Drop nodes whose tick has left the window, at most `max_iterations`
    /// of them, and return how many were evicted. The window is inclusive:
    /// a tick exactly `WithdrawalPeriod` old is still live. `liq_total` is
    /// cumulative and stays untouched.
    fn evict_stale(limiter: &mut Limiter, id: ParameterId, now: Moment, max_iterations: u32) -> u32 {
      let period = T::WithdrawalPeriod::get();
      let mut head = limiter.list_head;
      let mut evicted: u32 = 0;
      while head != 0 && now.saturating_sub(head) > period && evicted < max_iterations {
        let Some(node) = LiquidityChanges::<T>::take(id, head) else {
          break;
        };
        limiter.liq_in_period = limiter.liq_in_period.saturating_sub(node.amount);
        head = node.next_tick;
        evicted = evicted.saturating_add(1);
      }
      if head == 0 {
        limiter.list_head = 0;
        limiter.list_tail = 0;
      } else {
        limiter.list_head = head;
      }
      evicted
    }

    /// Evaluate a limiter against its tolerance. Breach iff the window is a
    /// net drain and the projected liquidity after it falls below the
    /// retained fraction; the boundary case (projected == minimum) is
    /// Normal.
    pub fn limit_status(limiter: &Limiter) -> LimitStatus {
      if limiter.overridden {
        return LimitStatus::Normal;
      }
      let begin_threshold = i128::try_from(limiter.begin_threshold).unwrap_or(i128::MAX);
      if limiter.liq_total < begin_threshold {
        return LimitStatus::Normal;
      }
      if limiter.liq_in_period >= 0 {
        return LimitStatus::Normal;
      }
      let projected = limiter.liq_total.saturating_add(limiter.liq_in_period);
      let min_allowed =
        limiter.liq_total.saturating_mul(limiter.min_retained_bps as i128) / BPS_DENOMINATOR as i128;
      if projected < min_allowed {
        LimitStatus::Triggered
      } else {
        LimitStatus::Normal
      }
    }

    pub fn is_initialized(id: ParameterId) -> bool {
      Limiters::<T>::contains_key(id)
    }

    pub fn is_operational() -> bool {
      Operational::<T>::get()
    }

    pub fn is_rate_limited() -> bool {
      RateLimited::<T>::get()
    }

    pub fn is_in_grace_period() -> bool {
      Self::now() <= GracePeriodEnd::<T>::get()
    }

    /// Whether a parameter currently evaluates to Triggered against its
    /// stored window. A view: stale nodes are not evicted first.
    pub fn is_parameter_rate_limited(id: ParameterId) -> bool {
      Limiters::<T>::get(id)
        .map(|limiter| Self::limit_status(&limiter) == LimitStatus::Triggered)
        .unwrap_or(false)
    }

    fn intent(
      target: T::AccountId,
      value: Balance,
      payload: Vec<u8>,
    ) -> Result<SettlementIntent<T>, DispatchError> {
      let payload = BoundedVec::try_from(payload).map_err(|_| Error::<T>::PayloadTooLong)?;
      Ok(SettlementIntent {
        target,
        value,
        payload,
      })
    }

    fn now() -> Moment {
      T::TimeProvider::now().as_secs()
    }

    /// Bucket a timestamp to its tick. Tick 0 is reserved as the empty-list
    /// sentinel, so this assumes `timestamp >= TickLength`.
    fn tick_of(timestamp: Moment) -> Moment {
      let tick_length = T::TickLength::get().max(1);
      timestamp - timestamp % tick_length
    }
  }

  #[pallet::genesis_config]
  pub struct GenesisConfig<T: Config> {
    /// Whether flow changes are accepted from the start; deployments default
    /// to an armed breaker.
    pub operational: bool,
    /// Initially allow-listed callers.
    pub protected_contracts: Vec<T::AccountId>,
    /// Optional migration window active from genesis; 0 disables it.
    pub grace_period_end: Moment,
  }

  impl<T: Config> Default for GenesisConfig<T> {
    fn default() -> Self {
      Self {
        operational: true,
        protected_contracts: Vec::new(),
        grace_period_end: 0,
      }
    }
  }

  #[pallet::genesis_build]
  impl<T: Config> BuildGenesisConfig for GenesisConfig<T> {
    fn build(&self) {
      Operational::<T>::put(self.operational);
      for account in &self.protected_contracts {
        ProtectedContracts::<T>::insert(account, ());
      }
      if self.grace_period_end > 0 {
        GracePeriodEnd::<T>::put(self.grace_period_end);
      }
    }
  }
}
