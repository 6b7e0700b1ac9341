//! Weights for pallet-smart-coin.
//!
//! Hand-estimated from the storage accesses of each call until the
//! benchmarks in `benchmarking.rs` are run against a reference machine.

#![allow(unused_parens)]
#![allow(unused_imports)]

use core::marker::PhantomData;
use frame_support::{
    traits::Get,
    weights::{constants::RocksDbWeight, Weight},
};

pub trait WeightInfo {
    fn transfer() -> Weight;
    fn approve() -> Weight;
    fn increase_allowance() -> Weight;
    fn decrease_allowance() -> Weight;
    fn transfer_from() -> Weight;
    fn mint() -> Weight;
    fn burn() -> Weight;
    fn recall() -> Weight;
    fn wipe_frozen_address(n: u32) -> Weight;
    fn freeze(n: u32) -> Weight;
    fn unfreeze(n: u32) -> Weight;
    fn validate_transfer() -> Weight;
    fn reject_transfer() -> Weight;
    fn validate_approve() -> Weight;
    fn reject_approve() -> Weight;
    fn pause() -> Weight;
    fn unpause() -> Weight;
    fn name_new_operators() -> Weight;
    fn accept_role() -> Weight;
    fn authorize_implementation() -> Weight;
    fn upgrade_to() -> Weight;
    fn upgrade_to_and_call(len: u32) -> Weight;
}

/// (ref_time, reads, writes) of each call. Escrowed paths are the upper bound.
mod costs {
    pub const TRANSFER: (u64, u64, u64) = (42_000_000, 10, 7);
    pub const APPROVE: (u64, u64, u64) = (32_000_000, 8, 6);
    pub const DECREASE_ALLOWANCE: (u64, u64, u64) = (22_000_000, 4, 1);
    pub const TRANSFER_FROM: (u64, u64, u64) = (50_000_000, 12, 8);
    pub const MINT: (u64, u64, u64) = (25_000_000, 4, 2);
    pub const BURN: (u64, u64, u64) = (24_000_000, 4, 2);
    pub const RECALL: (u64, u64, u64) = (28_000_000, 5, 2);
    pub const WIPE: (u64, u64, u64) = (30_000_000, 5, 3);
    pub const FREEZE_BASE: (u64, u64, u64) = (12_000_000, 1, 0);
    pub const FREEZE_PER_ACCOUNT: (u64, u64, u64) = (4_000_000, 1, 1);
    pub const RESOLVE_TRANSFER: (u64, u64, u64) = (44_000_000, 9, 7);
    pub const REJECT: (u64, u64, u64) = (28_000_000, 4, 4);
    pub const RESOLVE_APPROVE: (u64, u64, u64) = (36_000_000, 7, 5);
    pub const PAUSE: (u64, u64, u64) = (15_000_000, 2, 1);
    pub const NAME_OPERATORS: (u64, u64, u64) = (30_000_000, 4, 3);
    pub const ACCEPT_ROLE: (u64, u64, u64) = (18_000_000, 1, 1);
    pub const AUTHORIZE: (u64, u64, u64) = (20_000_000, 4, 1);
    pub const UPGRADE: (u64, u64, u64) = (22_000_000, 2, 2);
    pub const CALL_DATA_PER_BYTE: u64 = 2_000;
}

fn weight_of<W: Get<frame_support::weights::RuntimeDbWeight>>(cost: (u64, u64, u64)) -> Weight {
    let (ref_time, reads, writes) = cost;
    Weight::from_parts(ref_time, 0).saturating_add(W::get().reads_writes(reads, writes))
}

fn freeze_weight<W: Get<frame_support::weights::RuntimeDbWeight>>(n: u32) -> Weight {
    let (ref_time, reads, writes) = costs::FREEZE_PER_ACCOUNT;
    weight_of::<W>(costs::FREEZE_BASE)
        .saturating_add(Weight::from_parts(ref_time, 0).saturating_mul(n.into()))
        .saturating_add(W::get().reads_writes(reads, writes).saturating_mul(n.into()))
}

macro_rules! impl_weights {
    ($db:ty) => {
        fn transfer() -> Weight {
            weight_of::<$db>(costs::TRANSFER)
        }
        fn approve() -> Weight {
            weight_of::<$db>(costs::APPROVE)
        }
        fn increase_allowance() -> Weight {
            weight_of::<$db>(costs::APPROVE)
        }
        fn decrease_allowance() -> Weight {
            weight_of::<$db>(costs::DECREASE_ALLOWANCE)
        }
        fn transfer_from() -> Weight {
            weight_of::<$db>(costs::TRANSFER_FROM)
        }
        fn mint() -> Weight {
            weight_of::<$db>(costs::MINT)
        }
        fn burn() -> Weight {
            weight_of::<$db>(costs::BURN)
        }
        fn recall() -> Weight {
            weight_of::<$db>(costs::RECALL)
        }
        fn wipe_frozen_address(n: u32) -> Weight {
            weight_of::<$db>(costs::WIPE)
                .saturating_add(weight_of::<$db>(costs::REJECT).saturating_mul(n.into()))
        }
        fn freeze(n: u32) -> Weight {
            freeze_weight::<$db>(n)
        }
        fn unfreeze(n: u32) -> Weight {
            freeze_weight::<$db>(n)
        }
        fn validate_transfer() -> Weight {
            weight_of::<$db>(costs::RESOLVE_TRANSFER)
        }
        fn reject_transfer() -> Weight {
            weight_of::<$db>(costs::REJECT)
        }
        fn validate_approve() -> Weight {
            weight_of::<$db>(costs::RESOLVE_APPROVE)
        }
        fn reject_approve() -> Weight {
            weight_of::<$db>(costs::REJECT)
        }
        fn pause() -> Weight {
            weight_of::<$db>(costs::PAUSE)
        }
        fn unpause() -> Weight {
            weight_of::<$db>(costs::PAUSE)
        }
        fn name_new_operators() -> Weight {
            weight_of::<$db>(costs::NAME_OPERATORS)
        }
        fn accept_role() -> Weight {
            weight_of::<$db>(costs::ACCEPT_ROLE)
        }
        fn authorize_implementation() -> Weight {
            weight_of::<$db>(costs::AUTHORIZE)
        }
        fn upgrade_to() -> Weight {
            weight_of::<$db>(costs::UPGRADE)
        }
        fn upgrade_to_and_call(len: u32) -> Weight {
            weight_of::<$db>(costs::UPGRADE).saturating_add(Weight::from_parts(
                costs::CALL_DATA_PER_BYTE.saturating_mul(len.into()),
                0,
            ))
        }
    };
}

/// Weights for pallet-smart-coin using the runtime's database weights.
pub struct SubstrateWeight<T>(PhantomData<T>);
impl<T: frame_system::Config> WeightInfo for SubstrateWeight<T> {
    impl_weights!(T::DbWeight);
}

// For backwards compatibility and tests.
impl WeightInfo for () {
    impl_weights!(RocksDbWeight);
}
