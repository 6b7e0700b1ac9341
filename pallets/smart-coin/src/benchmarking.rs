//! Benchmarking setup for pallet-smart-coin

use super::*;

#[allow(unused)]
use crate::Pallet as SmartCoin;
use frame_benchmarking::v2::*;
use frame_system::RawOrigin;
use sp_runtime::traits::Hash;

const SEED: u32 = 0;
const FUNDS: u128 = 1_000_000_000;

struct Operators<T: Config> {
    registrar: T::AccountId,
    operations: T::AccountId,
    technical: T::AccountId,
}

fn install_operators<T: Config>() -> Operators<T> {
    let registrar: T::AccountId = account("registrar", 0, SEED);
    let operations: T::AccountId = account("operations", 0, SEED);
    let technical: T::AccountId = account("technical", 0, SEED);
    Roles::<T>::insert(Role::Registrar, RoleAssignment::new(registrar.clone()));
    Roles::<T>::insert(Role::Operations, RoleAssignment::new(operations.clone()));
    Roles::<T>::insert(Role::Technical, RoleAssignment::new(technical.clone()));
    Operators { registrar, operations, technical }
}

fn fund<T: Config>(who: &T::AccountId, value: u128) {
    Balances::<T>::mutate(who, |balance| *balance = balance.saturating_add(value));
    TotalSupply::<T>::mutate(|supply| *supply = supply.saturating_add(value));
}

/// A pending transfer from a funded investor to the registrar.
fn pending_transfer<T: Config>(registrar: &T::AccountId) -> T::Hash {
    let investor: T::AccountId = account("investor", 0, SEED);
    fund::<T>(&investor, FUNDS);
    Pallet::<T>::request_transfer(investor.clone(), registrar.clone(), None, FUNDS / 2)
        .expect("request is valid");
    PendingTransfers::<T>::get(&investor, registrar).expect("request is pending")
}

fn pending_approval<T: Config>() -> T::Hash {
    let owner: T::AccountId = account("owner", 0, SEED);
    let spender: T::AccountId = account("spender", 0, SEED);
    fund::<T>(&owner, FUNDS);
    Pallet::<T>::request_approve(owner.clone(), spender.clone(), FUNDS / 2)
        .expect("request is valid");
    PendingApprovals::<T>::get(&owner, &spender).expect("request is pending")
}

/// Under universal escrow the grant waits as an approve request.
fn assert_granted<T: Config>(owner: &T::AccountId, spender: &T::AccountId, value: u128) {
    if T::UniversalEscrow::get() {
        assert_eq!(EngagedAmount::<T>::get(owner), value);
        assert!(PendingApprovals::<T>::contains_key(owner, spender));
    } else {
        assert_eq!(Allowances::<T>::get(owner, spender), value);
    }
}

#[benchmarks]
mod benchmarks {
    use super::*;

    /// Escrowed path: the recipient is the registrar.
    #[benchmark]
    fn transfer() {
        let ops = install_operators::<T>();
        let caller: T::AccountId = whitelisted_caller();
        fund::<T>(&caller, FUNDS);

        #[extrinsic_call]
        _(RawOrigin::Signed(caller.clone()), ops.registrar.clone(), FUNDS);

        assert_eq!(EngagedAmount::<T>::get(&caller), FUNDS);
    }

    #[benchmark]
    fn approve() {
        install_operators::<T>();
        let caller: T::AccountId = whitelisted_caller();
        let spender: T::AccountId = account("spender", 0, SEED);
        fund::<T>(&caller, FUNDS);

        #[extrinsic_call]
        _(RawOrigin::Signed(caller.clone()), spender.clone(), FUNDS);

        assert_granted::<T>(&caller, &spender, FUNDS);
    }

    #[benchmark]
    fn increase_allowance() {
        install_operators::<T>();
        let caller: T::AccountId = whitelisted_caller();
        let spender: T::AccountId = account("spender", 0, SEED);
        fund::<T>(&caller, 2 * FUNDS);
        Allowances::<T>::insert(&caller, &spender, FUNDS);

        #[extrinsic_call]
        _(RawOrigin::Signed(caller.clone()), spender.clone(), FUNDS);

        assert_granted::<T>(&caller, &spender, 2 * FUNDS);
    }

    #[benchmark]
    fn decrease_allowance() {
        let caller: T::AccountId = whitelisted_caller();
        let spender: T::AccountId = account("spender", 0, SEED);
        Allowances::<T>::insert(&caller, &spender, FUNDS);

        #[extrinsic_call]
        _(RawOrigin::Signed(caller.clone()), spender.clone(), FUNDS);

        assert_eq!(Allowances::<T>::get(&caller, &spender), 0);
    }

    #[benchmark]
    fn transfer_from() {
        let ops = install_operators::<T>();
        let caller: T::AccountId = whitelisted_caller();
        let owner: T::AccountId = account("owner", 0, SEED);
        fund::<T>(&owner, FUNDS);
        Allowances::<T>::insert(&owner, &caller, FUNDS);

        #[extrinsic_call]
        _(RawOrigin::Signed(caller.clone()), owner.clone(), ops.operations.clone(), FUNDS);

        assert_eq!(EngagedAmount::<T>::get(&owner), FUNDS);
        assert_eq!(Allowances::<T>::get(&owner, &caller), 0);
    }

    #[benchmark]
    fn mint() {
        let ops = install_operators::<T>();
        let recipient: T::AccountId = account("recipient", 0, SEED);

        #[extrinsic_call]
        _(RawOrigin::Signed(ops.registrar), recipient.clone(), FUNDS);

        assert_eq!(Balances::<T>::get(&recipient), FUNDS);
    }

    #[benchmark]
    fn burn() {
        let ops = install_operators::<T>();
        fund::<T>(&ops.registrar, FUNDS);

        #[extrinsic_call]
        _(RawOrigin::Signed(ops.registrar.clone()), FUNDS);

        assert_eq!(Balances::<T>::get(&ops.registrar), 0);
    }

    #[benchmark]
    fn recall() {
        let ops = install_operators::<T>();
        let holder: T::AccountId = account("holder", 0, SEED);
        fund::<T>(&holder, FUNDS);

        #[extrinsic_call]
        _(RawOrigin::Signed(ops.registrar.clone()), holder.clone(), FUNDS);

        assert_eq!(Balances::<T>::get(&ops.registrar), FUNDS);
    }

    /// `n` pending requests from the wiped account, transfers and approvals alternating.
    #[benchmark]
    fn wipe_frozen_address(n: Linear<0, { T::MaxPendingPerAccount::get() }>) {
        let ops = install_operators::<T>();
        let holder: T::AccountId = account("holder", 0, SEED);
        fund::<T>(&holder, FUNDS);
        for i in 0..n {
            let counterparty: T::AccountId = account("counterparty", i, SEED);
            if i % 2 == 0 {
                Pallet::<T>::request_transfer(holder.clone(), counterparty, None, 1)
                    .expect("request is valid");
            } else {
                Pallet::<T>::request_approve(holder.clone(), counterparty, 1)
                    .expect("request is valid");
            }
        }
        Frozen::<T>::insert(&holder, true);

        #[extrinsic_call]
        _(RawOrigin::Signed(ops.registrar), holder.clone());

        assert_eq!(Balances::<T>::get(&holder), 0);
        assert_eq!(EngagedAmount::<T>::get(&holder), 0);
        assert_eq!(PendingRequestCount::<T>::get(&holder), 0);
    }

    #[benchmark]
    fn freeze(n: Linear<1, { T::MaxBatchSize::get() }>) {
        let ops = install_operators::<T>();
        let accounts: Vec<T::AccountId> = (0..n).map(|i| account("frozen", i, SEED)).collect();
        let batch: BoundedVec<_, T::MaxBatchSize> =
            accounts.clone().try_into().expect("batch within bounds");

        #[extrinsic_call]
        _(RawOrigin::Signed(ops.registrar), batch);

        assert!(accounts.iter().all(|who| Frozen::<T>::get(who)));
    }

    #[benchmark]
    fn unfreeze(n: Linear<1, { T::MaxBatchSize::get() }>) {
        let ops = install_operators::<T>();
        let accounts: Vec<T::AccountId> = (0..n).map(|i| account("frozen", i, SEED)).collect();
        for who in &accounts {
            Frozen::<T>::insert(who, true);
        }
        let batch: BoundedVec<_, T::MaxBatchSize> =
            accounts.clone().try_into().expect("batch within bounds");

        #[extrinsic_call]
        _(RawOrigin::Signed(ops.registrar), batch);

        assert!(accounts.iter().all(|who| !Frozen::<T>::get(who)));
    }

    #[benchmark]
    fn validate_transfer() {
        let ops = install_operators::<T>();
        let id = pending_transfer::<T>(&ops.registrar);

        #[extrinsic_call]
        _(RawOrigin::Signed(ops.registrar), id);

        assert_eq!(
            TransferRequests::<T>::get(id).map(|request| request.status),
            Some(RequestStatus::Validated)
        );
    }

    #[benchmark]
    fn reject_transfer() {
        let ops = install_operators::<T>();
        let id = pending_transfer::<T>(&ops.registrar);

        #[extrinsic_call]
        _(RawOrigin::Signed(ops.registrar), id);

        assert_eq!(
            TransferRequests::<T>::get(id).map(|request| request.status),
            Some(RequestStatus::Rejected)
        );
    }

    #[benchmark]
    fn validate_approve() {
        let ops = install_operators::<T>();
        let id = pending_approval::<T>();

        #[extrinsic_call]
        _(RawOrigin::Signed(ops.registrar), id);

        assert_eq!(
            ApproveRequests::<T>::get(id).map(|request| request.status),
            Some(RequestStatus::Validated)
        );
    }

    #[benchmark]
    fn reject_approve() {
        let ops = install_operators::<T>();
        let id = pending_approval::<T>();

        #[extrinsic_call]
        _(RawOrigin::Signed(ops.registrar), id);

        assert_eq!(
            ApproveRequests::<T>::get(id).map(|request| request.status),
            Some(RequestStatus::Rejected)
        );
    }

    #[benchmark]
    fn pause() {
        let ops = install_operators::<T>();

        #[extrinsic_call]
        _(RawOrigin::Signed(ops.registrar));

        assert!(Paused::<T>::get());
    }

    #[benchmark]
    fn unpause() {
        let ops = install_operators::<T>();
        Paused::<T>::put(true);

        #[extrinsic_call]
        _(RawOrigin::Signed(ops.registrar));

        assert!(!Paused::<T>::get());
    }

    #[benchmark]
    fn name_new_operators() {
        let ops = install_operators::<T>();
        let registrar: T::AccountId = account("registrar", 1, SEED);
        let operations: T::AccountId = account("operations", 1, SEED);
        let technical: T::AccountId = account("technical", 1, SEED);

        #[extrinsic_call]
        _(RawOrigin::Signed(ops.registrar), registrar.clone(), operations, technical);

        assert_eq!(Pallet::<T>::pending_holder(Role::Registrar), Some(registrar));
    }

    #[benchmark]
    fn accept_role() {
        let ops = install_operators::<T>();
        let successor: T::AccountId = account("registrar", 1, SEED);
        Roles::<T>::mutate(Role::Registrar, |slot| {
            if let Some(assignment) = slot {
                assignment.pending = Some(successor.clone());
            }
        });

        #[extrinsic_call]
        accept_registrar_role(RawOrigin::Signed(successor.clone()));

        assert_eq!(Pallet::<T>::holder(Role::Registrar), Some(successor));
        assert_ne!(Pallet::<T>::holder(Role::Registrar), Some(ops.registrar));
    }

    #[benchmark]
    fn authorize_implementation() {
        let ops = install_operators::<T>();
        let implementation = T::Hashing::hash(b"implementation");

        #[extrinsic_call]
        _(RawOrigin::Signed(ops.registrar), implementation);

        assert_eq!(
            AuthorizedImplementation::<T>::get().map(|slot| slot.implementation),
            Some(implementation)
        );
    }

    #[benchmark]
    fn upgrade_to() {
        let ops = install_operators::<T>();
        let implementation = T::Hashing::hash(b"implementation");
        AuthorizedImplementation::<T>::put(ImplementationAuthorization {
            implementation,
            consumed: false,
        });

        #[extrinsic_call]
        _(RawOrigin::Signed(ops.technical), implementation);

        assert_eq!(CurrentImplementation::<T>::get(), Some(implementation));
    }

    #[benchmark]
    fn upgrade_to_and_call(l: Linear<0, { T::MaxCallDataLen::get() }>) {
        let ops = install_operators::<T>();
        let implementation = T::Hashing::hash(b"implementation");
        AuthorizedImplementation::<T>::put(ImplementationAuthorization {
            implementation,
            consumed: false,
        });
        let data: BoundedVec<u8, T::MaxCallDataLen> =
            sp_std::vec![0u8; l as usize].try_into().expect("data within bounds");

        #[extrinsic_call]
        _(RawOrigin::Signed(ops.technical), implementation, data);

        assert_eq!(CurrentImplementation::<T>::get(), Some(implementation));
    }

    impl_benchmark_test_suite!(SmartCoin, crate::mock::new_test_ext(), crate::mock::Test);
}
