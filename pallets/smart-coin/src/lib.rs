//! # Smart Coin Pallet
//!
//! A permissioned coin for a regulated-currency issuer. Ordinary ERC20-style
//! movements (`transfer`, `approve`, `transfer_from`) pass a freeze gate and a
//! pause gate. Movements towards the registrar or operations accounts are
//! escrowed: the funds are engaged at request time and only move once the
//! registrar validates the request.
//!
//! ## Roles
//! - **Registrar**: freezes accounts, mints, burns, recalls, wipes, resolves
//!   requests, pauses, names operators and authorizes implementations.
//! - **Operations**: privileged counterparty.
//! - **Technical**: executes upgrades to an authorized implementation.
//!
//! Roles change hands in two steps: the registrar names the new holders, and
//! each one accepts its role from its own account.

#![cfg_attr(not(feature = "std"), no_std)]
// `#[pallet::getter]` is deprecated upstream; the query surface still relies on it.
#![allow(deprecated)]
#![allow(clippy::let_unit_value)]

use frame_support::{dispatch::DispatchResult, ensure, pallet_prelude::*};
use frame_system::{ensure_signed, pallet_prelude::*};
use sp_runtime::traits::TrailingZeroInput;
use sp_std::prelude::*;

pub use pallet::*;
pub use types::*;
pub use upgrade::OnImplementationUpgrade;
pub use weights::WeightInfo;

mod escrow;
mod gate;
mod ledger;
mod roles;
pub mod types;
pub mod upgrade;
pub mod weights;

#[cfg(test)]
mod mock;


#[cfg(feature = "runtime-benchmarks")]
mod benchmarking;

pub(crate) const LOG_TARGET: &str = "runtime::smart-coin";

/// The current storage version.
const STORAGE_VERSION: StorageVersion = StorageVersion::new(1);

/// Allowance value that `transfer_from` never decrements.
pub const UNLIMITED_ALLOWANCE: u128 = u128::MAX;

#[frame_support::pallet]
pub mod pallet {
    use super::*;

    #[pallet::config]
    pub trait Config: frame_system::Config {
        type RuntimeEvent: From<Event<Self>> + IsType<<Self as frame_system::Config>::RuntimeEvent>;

        /// Largest number of accounts a single freeze or unfreeze call accepts.
        #[pallet::constant]
        type MaxBatchSize: Get<u32>;

        /// Largest payload `upgrade_to_and_call` forwards to the new implementation.
        #[pallet::constant]
        type MaxCallDataLen: Get<u32>;

        /// Largest number of pending transfer and approve requests one
        /// account may have sent. Bounds the work of a wipe.
        #[pallet::constant]
        type MaxPendingPerAccount: Get<u32>;

        /// Route every transfer and approval through the request workflow,
        /// not only those whose counterparty is the registrar or operations.
        type UniversalEscrow: Get<bool>;

        /// Whether the dispatch runs in the proxy's storage context. Upgrade
        /// entrypoints refuse to run otherwise.
        type DelegatedContext: Get<bool>;

        /// Receives the call data of `upgrade_to_and_call`.
        type OnUpgrade: OnImplementationUpgrade<Self::Hash>;

        type WeightInfo: WeightInfo;
    }

    #[pallet::pallet]
    #[pallet::storage_version(STORAGE_VERSION)]
    pub struct Pallet<T>(_);

    /// Token name (e.g., "EUR CoinVertible")
    #[pallet::storage]
    #[pallet::getter(fn token_name)]
    pub type TokenName<T> = StorageValue<_, BoundedVec<u8, ConstU32<64>>, ValueQuery>;

    /// Token symbol (e.g., "EURCV")
    #[pallet::storage]
    #[pallet::getter(fn token_symbol)]
    pub type TokenSymbol<T> = StorageValue<_, BoundedVec<u8, ConstU32<16>>, ValueQuery>;

    #[pallet::storage]
    #[pallet::getter(fn decimals)]
    pub type Decimals<T> = StorageValue<_, u8, ValueQuery>;

    #[pallet::storage]
    #[pallet::getter(fn total_supply)]
    pub type TotalSupply<T> = StorageValue<_, u128, ValueQuery>;

    #[pallet::storage]
    #[pallet::getter(fn balance_of)]
    pub type Balances<T: Config> = StorageMap<_, Blake2_128Concat, T::AccountId, u128, ValueQuery>;

    /// Part of the balance locked by pending requests. Never exceeds the balance.
    #[pallet::storage]
    #[pallet::getter(fn engaged_amount)]
    pub type EngagedAmount<T: Config> =
        StorageMap<_, Blake2_128Concat, T::AccountId, u128, ValueQuery>;

    #[pallet::storage]
    #[pallet::getter(fn is_frozen)]
    pub type Frozen<T: Config> = StorageMap<_, Blake2_128Concat, T::AccountId, bool, ValueQuery>;

    /// Allowances, keyed by (owner, spender).
    #[pallet::storage]
    #[pallet::getter(fn allowance)]
    pub type Allowances<T: Config> = StorageDoubleMap<
        _,
        Blake2_128Concat,
        T::AccountId,
        Blake2_128Concat,
        T::AccountId,
        u128,
        ValueQuery,
    >;

    #[pallet::storage]
    #[pallet::getter(fn role)]
    pub type Roles<T: Config> =
        StorageMap<_, Twox64Concat, Role, RoleAssignment<T::AccountId>, OptionQuery>;

    /// Transfer requests, retained after resolution.
    #[pallet::storage]
    #[pallet::getter(fn transfer_request)]
    pub type TransferRequests<T: Config> =
        StorageMap<_, Identity, T::Hash, TransferRequest<T::AccountId, T::Hash>, OptionQuery>;

    /// Approve requests, retained after resolution.
    #[pallet::storage]
    #[pallet::getter(fn approve_request)]
    pub type ApproveRequests<T: Config> =
        StorageMap<_, Identity, T::Hash, ApproveRequest<T::AccountId, T::Hash>, OptionQuery>;

    /// The pending transfer request of a (from, to) pair.
    #[pallet::storage]
    pub type PendingTransfers<T: Config> = StorageDoubleMap<
        _,
        Blake2_128Concat,
        T::AccountId,
        Blake2_128Concat,
        T::AccountId,
        T::Hash,
        OptionQuery,
    >;

    /// The pending approve request of an (owner, spender) pair.
    #[pallet::storage]
    pub type PendingApprovals<T: Config> = StorageDoubleMap<
        _,
        Blake2_128Concat,
        T::AccountId,
        Blake2_128Concat,
        T::AccountId,
        T::Hash,
        OptionQuery,
    >;

    /// Pending requests sent by an account, transfers and approvals together.
    #[pallet::storage]
    #[pallet::getter(fn pending_request_count)]
    pub type PendingRequestCount<T: Config> =
        StorageMap<_, Blake2_128Concat, T::AccountId, u32, ValueQuery>;

    /// Folded into every request id.
    #[pallet::storage]
    pub type RequestNonce<T> = StorageValue<_, u64, ValueQuery>;

    #[pallet::storage]
    #[pallet::getter(fn is_paused)]
    pub type Paused<T> = StorageValue<_, bool, ValueQuery>;

    #[pallet::storage]
    #[pallet::getter(fn authorized_implementation)]
    pub type AuthorizedImplementation<T: Config> =
        StorageValue<_, ImplementationAuthorization<T::Hash>, OptionQuery>;

    #[pallet::storage]
    #[pallet::getter(fn current_implementation)]
    pub type CurrentImplementation<T: Config> = StorageValue<_, T::Hash, OptionQuery>;

    #[pallet::event]
    #[pallet::generate_deposit(pub(super) fn deposit_event)]
    pub enum Event<T: Config> {
        /// Value moved. `None` stands for the null account (mint and burn).
        Transfer { from: Option<T::AccountId>, to: Option<T::AccountId>, value: u128 },
        Approval { owner: T::AccountId, spender: T::AccountId, value: u128 },
        TransferRequested {
            id: T::Hash,
            from: T::AccountId,
            to: T::AccountId,
            spender: Option<T::AccountId>,
            value: u128,
        },
        TransferValidated { id: T::Hash },
        TransferRejected { id: T::Hash },
        ApproveRequested { id: T::Hash, from: T::AccountId, to: T::AccountId, value: u128 },
        ApproveValidated { id: T::Hash },
        ApproveRejected { id: T::Hash },
        AddressesFrozen { accounts: Vec<T::AccountId> },
        AddressesUnFrozen { accounts: Vec<T::AccountId> },
        NamedNewOperators {
            registrar: T::AccountId,
            operations: T::AccountId,
            technical: T::AccountId,
        },
        AcceptedRegistrarRole { account: T::AccountId },
        AcceptedOperationsRole { account: T::AccountId },
        AcceptedTechnicalRole { account: T::AccountId },
        RegistrarUpdated { previous: T::AccountId, new: T::AccountId },
        ImplementationAuthorized { implementation: T::Hash },
        Upgraded { implementation: T::Hash },
        Paused,
        UnPaused,
    }

    #[pallet::error]
    pub enum Error<T> {
        /// The null account was supplied where it is forbidden.
        ZeroAddressCheck,
        /// The named operators are not pairwise distinct.
        InconsistentOperators,
        UnauthorizedRegistrar,
        UnauthorizedOperations,
        UnauthorizedTechnical,
        /// The given participant of the call is frozen.
        Unauthorized(Party),
        /// The registrar cannot be a spender or a direct recipient.
        ForbiddenForRegistrar,
        /// The operations account cannot be a spender or a direct recipient.
        ForbiddenForOperations,
        AddressAlreadyFrozen,
        AddressNotFrozen,
        InsufficientBalance,
        InsufficientAllowance,
        AllowanceBelowZero,
        TransferRequestNotFound,
        InvalidTransferRequestStatus,
        /// A request for the same pair is still pending.
        OngoingRequest,
        /// The sender already has `MaxPendingPerAccount` pending requests.
        TooManyPendingRequests,
        ContractPaused,
        ContractNotPaused,
        /// The implementation is not authorized, or its authorization was spent.
        UnauthorizedImplementation,
        /// Upgrades must go through the proxy's storage context.
        NotDelegatedCall,
        Overflow,
    }

    #[pallet::hooks]
    impl<T: Config> Hooks<BlockNumberFor<T>> for Pallet<T> {
        #[cfg(feature = "try-runtime")]
        fn try_state(_n: BlockNumberFor<T>) -> Result<(), sp_runtime::TryRuntimeError> {
            Self::do_try_state()
        }
    }

    #[pallet::call]
    impl<T: Config> Pallet<T> {
        #[pallet::call_index(0)]
        #[pallet::weight(T::WeightInfo::transfer())]
        pub fn transfer(origin: OriginFor<T>, to: T::AccountId, value: u128) -> DispatchResult {
            let from = ensure_signed(origin)?;
            Self::ensure_not_paused()?;
            ensure!(!Self::is_null(&to), Error::<T>::ZeroAddressCheck);
            Self::ensure_not_frozen(&from, Party::Owner)?;
            Self::ensure_not_frozen(&to, Party::Recipient)?;

            if Self::routes_through_escrow(&to) {
                Self::request_transfer(from, to, None, value)
            } else {
                Self::move_balance(&from, &to, value)
            }
        }

        #[pallet::call_index(1)]
        #[pallet::weight(T::WeightInfo::approve())]
        pub fn approve(origin: OriginFor<T>, spender: T::AccountId, value: u128) -> DispatchResult {
            let owner = ensure_signed(origin)?;
            Self::ensure_can_grant(&owner, &spender)?;

            if T::UniversalEscrow::get() {
                Self::request_approve(owner, spender, value)
            } else {
                Self::set_allowance(&owner, &spender, value);
                Ok(())
            }
        }

        #[pallet::call_index(2)]
        #[pallet::weight(T::WeightInfo::increase_allowance())]
        pub fn increase_allowance(
            origin: OriginFor<T>,
            spender: T::AccountId,
            added: u128,
        ) -> DispatchResult {
            let owner = ensure_signed(origin)?;
            Self::ensure_can_grant(&owner, &spender)?;
            let value = Allowances::<T>::get(&owner, &spender)
                .checked_add(added)
                .ok_or(Error::<T>::Overflow)?;

            if T::UniversalEscrow::get() {
                Self::request_approve(owner, spender, value)
            } else {
                Self::set_allowance(&owner, &spender, value);
                Ok(())
            }
        }

        #[pallet::call_index(3)]
        #[pallet::weight(T::WeightInfo::decrease_allowance())]
        pub fn decrease_allowance(
            origin: OriginFor<T>,
            spender: T::AccountId,
            subtracted: u128,
        ) -> DispatchResult {
            let owner = ensure_signed(origin)?;
            Self::ensure_not_paused()?;
            ensure!(!Self::is_null(&spender), Error::<T>::ZeroAddressCheck);
            Self::ensure_not_frozen(&owner, Party::Owner)?;
            Self::ensure_not_frozen(&spender, Party::Spender)?;
            let value = Allowances::<T>::get(&owner, &spender)
                .checked_sub(subtracted)
                .ok_or(Error::<T>::AllowanceBelowZero)?;

            Self::set_allowance(&owner, &spender, value);
            Ok(())
        }

        #[pallet::call_index(4)]
        #[pallet::weight(T::WeightInfo::transfer_from())]
        pub fn transfer_from(
            origin: OriginFor<T>,
            from: T::AccountId,
            to: T::AccountId,
            value: u128,
        ) -> DispatchResult {
            let spender = ensure_signed(origin)?;
            Self::ensure_not_paused()?;
            ensure!(!Self::is_null(&from), Error::<T>::ZeroAddressCheck);
            ensure!(!Self::is_null(&to), Error::<T>::ZeroAddressCheck);
            Self::ensure_not_frozen(&from, Party::Owner)?;
            Self::ensure_not_frozen(&spender, Party::Spender)?;
            Self::ensure_not_frozen(&to, Party::Recipient)?;

            Self::spend_allowance(&from, &spender, value)?;
            if Self::routes_through_escrow(&to) {
                Self::request_transfer(from, to, Some(spender), value)
            } else {
                Self::move_balance(&from, &to, value)
            }
        }

        #[pallet::call_index(5)]
        #[pallet::weight(T::WeightInfo::mint())]
        pub fn mint(origin: OriginFor<T>, to: T::AccountId, value: u128) -> DispatchResult {
            Self::ensure_role(origin, Role::Registrar)?;
            ensure!(!Self::is_null(&to), Error::<T>::ZeroAddressCheck);
            Self::ensure_not_frozen(&to, Party::Recipient)?;
            Self::do_mint(&to, value)
        }

        #[pallet::call_index(6)]
        #[pallet::weight(T::WeightInfo::burn())]
        pub fn burn(origin: OriginFor<T>, value: u128) -> DispatchResult {
            let registrar = Self::ensure_role(origin, Role::Registrar)?;
            Self::do_burn(&registrar, value)
        }

        /// Move `value` from any account back to the registrar.
        #[pallet::call_index(7)]
        #[pallet::weight(T::WeightInfo::recall())]
        pub fn recall(origin: OriginFor<T>, from: T::AccountId, value: u128) -> DispatchResult {
            let registrar = Self::ensure_role(origin, Role::Registrar)?;
            Self::move_balance(&from, &registrar, value)
        }

        /// Destroy the whole balance of a frozen account.
        ///
        /// Requests the account still has pending are rejected first. The
        /// call is charged for `MaxPendingPerAccount` of them and refunds
        /// the rest.
        #[pallet::call_index(8)]
        #[pallet::weight(T::WeightInfo::wipe_frozen_address(T::MaxPendingPerAccount::get()))]
        pub fn wipe_frozen_address(
            origin: OriginFor<T>,
            account: T::AccountId,
        ) -> DispatchResultWithPostInfo {
            Self::ensure_role(origin, Role::Registrar)?;
            ensure!(Frozen::<T>::get(&account), Error::<T>::AddressNotFrozen);
            let rejected = Self::do_wipe(&account)?;
            Ok(Some(T::WeightInfo::wipe_frozen_address(rejected)).into())
        }

        #[pallet::call_index(9)]
        #[pallet::weight(T::WeightInfo::freeze(accounts.len() as u32))]
        pub fn freeze(
            origin: OriginFor<T>,
            accounts: BoundedVec<T::AccountId, T::MaxBatchSize>,
        ) -> DispatchResult {
            Self::ensure_role(origin, Role::Registrar)?;
            Self::do_freeze(&accounts)?;
            Self::deposit_event(Event::AddressesFrozen { accounts: accounts.into_inner() });
            Ok(())
        }

        #[pallet::call_index(10)]
        #[pallet::weight(T::WeightInfo::unfreeze(accounts.len() as u32))]
        pub fn unfreeze(
            origin: OriginFor<T>,
            accounts: BoundedVec<T::AccountId, T::MaxBatchSize>,
        ) -> DispatchResult {
            Self::ensure_role(origin, Role::Registrar)?;
            Self::do_unfreeze(&accounts)?;
            Self::deposit_event(Event::AddressesUnFrozen { accounts: accounts.into_inner() });
            Ok(())
        }

        #[pallet::call_index(11)]
        #[pallet::weight(T::WeightInfo::validate_transfer())]
        pub fn validate_transfer(origin: OriginFor<T>, id: T::Hash) -> DispatchResult {
            Self::ensure_role(origin, Role::Registrar)?;
            Self::do_validate_transfer(id)
        }

        #[pallet::call_index(12)]
        #[pallet::weight(T::WeightInfo::reject_transfer())]
        pub fn reject_transfer(origin: OriginFor<T>, id: T::Hash) -> DispatchResult {
            Self::ensure_role(origin, Role::Registrar)?;
            Self::do_reject_transfer(id)
        }

        #[pallet::call_index(13)]
        #[pallet::weight(T::WeightInfo::validate_approve())]
        pub fn validate_approve(origin: OriginFor<T>, id: T::Hash) -> DispatchResult {
            Self::ensure_role(origin, Role::Registrar)?;
            Self::do_validate_approve(id)
        }

        #[pallet::call_index(14)]
        #[pallet::weight(T::WeightInfo::reject_approve())]
        pub fn reject_approve(origin: OriginFor<T>, id: T::Hash) -> DispatchResult {
            Self::ensure_role(origin, Role::Registrar)?;
            Self::do_reject_approve(id)
        }

        #[pallet::call_index(15)]
        #[pallet::weight(T::WeightInfo::pause())]
        pub fn pause(origin: OriginFor<T>) -> DispatchResult {
            Self::ensure_role(origin, Role::Registrar)?;
            Self::do_pause()
        }

        #[pallet::call_index(16)]
        #[pallet::weight(T::WeightInfo::unpause())]
        pub fn unpause(origin: OriginFor<T>) -> DispatchResult {
            Self::ensure_role(origin, Role::Registrar)?;
            Self::do_unpause()
        }

        /// Propose new holders for the three roles. Each must accept.
        #[pallet::call_index(17)]
        #[pallet::weight(T::WeightInfo::name_new_operators())]
        pub fn name_new_operators(
            origin: OriginFor<T>,
            registrar: T::AccountId,
            operations: T::AccountId,
            technical: T::AccountId,
        ) -> DispatchResult {
            Self::ensure_role(origin, Role::Registrar)?;
            Self::do_name_new_operators(registrar, operations, technical)
        }

        #[pallet::call_index(18)]
        #[pallet::weight(T::WeightInfo::accept_role())]
        pub fn accept_registrar_role(origin: OriginFor<T>) -> DispatchResult {
            Self::do_accept_role(origin, Role::Registrar)
        }

        #[pallet::call_index(19)]
        #[pallet::weight(T::WeightInfo::accept_role())]
        pub fn accept_operations_role(origin: OriginFor<T>) -> DispatchResult {
            Self::do_accept_role(origin, Role::Operations)
        }

        #[pallet::call_index(20)]
        #[pallet::weight(T::WeightInfo::accept_role())]
        pub fn accept_technical_role(origin: OriginFor<T>) -> DispatchResult {
            Self::do_accept_role(origin, Role::Technical)
        }

        #[pallet::call_index(21)]
        #[pallet::weight(T::WeightInfo::authorize_implementation())]
        pub fn authorize_implementation(
            origin: OriginFor<T>,
            implementation: T::Hash,
        ) -> DispatchResult {
            Self::ensure_role(origin, Role::Registrar)?;
            Self::do_authorize_implementation(implementation)
        }

        #[pallet::call_index(22)]
        #[pallet::weight(T::WeightInfo::upgrade_to())]
        pub fn upgrade_to(origin: OriginFor<T>, implementation: T::Hash) -> DispatchResult {
            Self::ensure_delegated_context()?;
            Self::ensure_role(origin, Role::Technical)?;
            Self::do_upgrade(implementation)
        }

        /// Upgrade, then hand `data` to the new implementation. A failing
        /// call reverts the upgrade.
        #[pallet::call_index(23)]
        #[pallet::weight(T::WeightInfo::upgrade_to_and_call(data.len() as u32))]
        pub fn upgrade_to_and_call(
            origin: OriginFor<T>,
            implementation: T::Hash,
            data: BoundedVec<u8, T::MaxCallDataLen>,
        ) -> DispatchResult {
            Self::ensure_delegated_context()?;
            Self::ensure_role(origin, Role::Technical)?;
            Self::do_upgrade(implementation)?;
            T::OnUpgrade::on_upgrade(&implementation, &data)
        }
    }

    #[pallet::genesis_config]
    #[derive(frame_support::DefaultNoBound)]
    pub struct GenesisConfig<T: Config> {
        /// Initial holders of the three roles. All or none must be set.
        pub registrar: Option<T::AccountId>,
        pub operations: Option<T::AccountId>,
        pub technical: Option<T::AccountId>,
        /// Token name
        pub token_name: Vec<u8>,
        /// Token symbol
        pub token_symbol: Vec<u8>,
        /// Token decimals
        pub decimals: u8,
        /// Initial token mints (account, amount)
        pub initial_balances: Vec<(T::AccountId, u128)>,
        /// Accounts frozen at genesis
        pub frozen_accounts: Vec<T::AccountId>,
    }

    #[pallet::genesis_build]
    impl<T: Config> BuildGenesisConfig for GenesisConfig<T> {
        fn build(&self) {
            let name: BoundedVec<u8, ConstU32<64>> =
                self.token_name.clone().try_into().expect("Token name too long (max 64 bytes)");
            TokenName::<T>::put(name);

            let symbol: BoundedVec<u8, ConstU32<16>> =
                self.token_symbol.clone().try_into().expect("Token symbol too long (max 16 bytes)");
            TokenSymbol::<T>::put(symbol);

            Decimals::<T>::put(self.decimals);

            match (&self.registrar, &self.operations, &self.technical) {
                (Some(registrar), Some(operations), Some(technical)) => {
                    Pallet::<T>::check_operators(registrar, operations, technical)
                        .expect("Genesis operators must be non-null and pairwise distinct");
                    Roles::<T>::insert(Role::Registrar, RoleAssignment::new(registrar.clone()));
                    Roles::<T>::insert(Role::Operations, RoleAssignment::new(operations.clone()));
                    Roles::<T>::insert(Role::Technical, RoleAssignment::new(technical.clone()));
                },
                (None, None, None) => {},
                _ => panic!("Genesis operators must be set together"),
            }

            let mut total: u128 = 0;
            for (account, amount) in &self.initial_balances {
                Balances::<T>::mutate(account, |balance| {
                    *balance = balance.checked_add(*amount).expect("Initial balance overflow")
                });
                total = total.checked_add(*amount).expect("Initial supply overflow");
            }
            TotalSupply::<T>::put(total);

            for account in &self.frozen_accounts {
                Frozen::<T>::insert(account, true);
            }
        }
    }
}

impl<T: Config> Pallet<T> {
    /// Whether `who` decodes from an all-zero input, the null account.
    pub fn is_null(who: &T::AccountId) -> bool {
        T::AccountId::decode(&mut TrailingZeroInput::zeroes()).map_or(false, |null| &null == who)
    }

    /// Check the invariants of the ledger and of the request workflow.
    #[cfg(any(feature = "try-runtime", test))]
    pub fn do_try_state() -> Result<(), sp_runtime::TryRuntimeError> {
        let mut supply: u128 = 0;
        for (who, balance) in Balances::<T>::iter() {
            supply = supply.checked_add(balance).ok_or("balances overflow u128")?;
            ensure!(EngagedAmount::<T>::get(&who) <= balance, "engaged amount exceeds balance");
        }
        ensure!(supply == TotalSupply::<T>::get(), "sum of balances differs from total supply");

        for (who, engaged) in EngagedAmount::<T>::iter() {
            let transfers = PendingTransfers::<T>::iter_prefix_values(&who)
                .filter_map(|id| TransferRequests::<T>::get(id))
                .map(|request| request.value);
            let approvals = PendingApprovals::<T>::iter_prefix_values(&who)
                .filter_map(|id| ApproveRequests::<T>::get(id))
                .map(|request| request.value);
            let locked = transfers.chain(approvals).fold(0u128, |acc, v| acc.saturating_add(v));
            ensure!(locked == engaged, "engaged amount differs from pending requests");
        }

        for (who, count) in PendingRequestCount::<T>::iter() {
            let pending = PendingTransfers::<T>::iter_prefix_values(&who)
                .count()
                .saturating_add(PendingApprovals::<T>::iter_prefix_values(&who).count());
            ensure!(count as usize == pending, "pending request count differs from pending requests");
            ensure!(count <= T::MaxPendingPerAccount::get(), "too many pending requests");
        }

        for (from, to, id) in PendingTransfers::<T>::iter() {
            let request = TransferRequests::<T>::get(id).ok_or("pending transfer without record")?;
            ensure!(request.status == RequestStatus::Pending, "resolved transfer still pending");
            ensure!(request.from == from && request.to == to, "pending transfer keyed wrongly");
        }
        for (from, to, id) in PendingApprovals::<T>::iter() {
            let request = ApproveRequests::<T>::get(id).ok_or("pending approval without record")?;
            ensure!(request.status == RequestStatus::Pending, "resolved approval still pending");
            ensure!(request.from == from && request.to == to, "pending approval keyed wrongly");
        }

        Ok(())
    }
}
