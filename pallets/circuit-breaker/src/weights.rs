#![cfg_attr(rustfmt, rustfmt_skip)]
#![allow(unused_parens)]
#![allow(unused_imports)]
#![allow(missing_docs)]

use polkadot_sdk::frame_support::{traits::Get, weights::{Weight, constants::RocksDbWeight}};
use core::marker::PhantomData;

pub trait WeightInfo {
	fn add_protected_contracts() -> Weight;
	fn remove_protected_contracts() -> Weight;
	fn add_security_parameter() -> Weight;
	fn update_security_parameter() -> Weight;
	fn set_operational_status() -> Weight;
	fn start_grace_period() -> Weight;
	fn override_rate_limit() -> Weight;
	fn override_expired_rate_limit() -> Weight;
	fn clear_backlog() -> Weight;
	fn increase_parameter() -> Weight;
	fn decrease_parameter() -> Weight;
	fn execute_settlement() -> Weight;
}

pub struct SubstrateWeight<T>(PhantomData<T>);
impl<T: polkadot_sdk::frame_system::Config> WeightInfo for SubstrateWeight<T> {
	fn add_protected_contracts() -> Weight {
		Weight::from_parts(15_000_000, 1500)
			.saturating_add(T::DbWeight::get().writes(1))
	}
	fn remove_protected_contracts() -> Weight {
		Weight::from_parts(15_000_000, 1500)
			.saturating_add(T::DbWeight::get().writes(1))
	}
	fn add_security_parameter() -> Weight {
		Weight::from_parts(25_000_000, 2000)
			.saturating_add(T::DbWeight::get().reads(1))
			.saturating_add(T::DbWeight::get().writes(1))
	}
	fn update_security_parameter() -> Weight {
		Weight::from_parts(35_000_000, 2500)
			.saturating_add(T::DbWeight::get().reads(2))
			.saturating_add(T::DbWeight::get().writes(2))
	}
	fn set_operational_status() -> Weight {
		Weight::from_parts(10_000_000, 1000)
			.saturating_add(T::DbWeight::get().writes(1))
	}
	fn start_grace_period() -> Weight {
		Weight::from_parts(12_000_000, 1000)
			.saturating_add(T::DbWeight::get().reads(1))
			.saturating_add(T::DbWeight::get().writes(1))
	}
	fn override_rate_limit() -> Weight {
		Weight::from_parts(35_000_000, 2500)
			.saturating_add(T::DbWeight::get().reads(3))
			.saturating_add(T::DbWeight::get().writes(3))
	}
	fn override_expired_rate_limit() -> Weight {
		Weight::from_parts(15_000_000, 1500)
			.saturating_add(T::DbWeight::get().reads(3))
			.saturating_add(T::DbWeight::get().writes(1))
	}
	fn clear_backlog() -> Weight {
		Weight::from_parts(40_000_000, 3000)
			.saturating_add(T::DbWeight::get().reads(2))
			.saturating_add(T::DbWeight::get().writes(2))
	}
	fn increase_parameter() -> Weight {
		Weight::from_parts(50_000_000, 3000)
			.saturating_add(T::DbWeight::get().reads(5))
			.saturating_add(T::DbWeight::get().writes(3))
	}
	fn decrease_parameter() -> Weight {
		Weight::from_parts(50_000_000, 3000)
			.saturating_add(T::DbWeight::get().reads(5))
			.saturating_add(T::DbWeight::get().writes(3))
	}
	fn execute_settlement() -> Weight {
		Weight::from_parts(30_000_000, 2000)
			.saturating_add(T::DbWeight::get().reads(2))
	}
}

impl WeightInfo for () {
	fn add_protected_contracts() -> Weight {
		Weight::from_parts(15_000_000, 1500)
	}
	fn remove_protected_contracts() -> Weight {
		Weight::from_parts(15_000_000, 1500)
	}
	fn add_security_parameter() -> Weight {
		Weight::from_parts(25_000_000, 2000)
	}
	fn update_security_parameter() -> Weight {
		Weight::from_parts(35_000_000, 2500)
	}
	fn set_operational_status() -> Weight {
		Weight::from_parts(10_000_000, 1000)
	}
	fn start_grace_period() -> Weight {
		Weight::from_parts(12_000_000, 1000)
	}
	fn override_rate_limit() -> Weight {
		Weight::from_parts(35_000_000, 2500)
	}
	fn override_expired_rate_limit() -> Weight {
		Weight::from_parts(15_000_000, 1500)
	}
	fn clear_backlog() -> Weight {
		Weight::from_parts(40_000_000, 3000)
	}
	fn increase_parameter() -> Weight {
		Weight::from_parts(50_000_000, 3000)
	}
	fn decrease_parameter() -> Weight {
		Weight::from_parts(50_000_000, 3000)
	}
	fn execute_settlement() -> Weight {
		Weight::from_parts(30_000_000, 2000)
	}
}
