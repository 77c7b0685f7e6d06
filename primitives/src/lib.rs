#![cfg_attr(not(feature = "std"), no_std)]

pub mod parameters;

pub use parameters::*;
