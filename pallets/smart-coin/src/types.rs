//! Records kept in storage by the coin pallet.

use codec::{Decode, DecodeWithMemTracking, Encode, MaxEncodedLen};
use frame_support::PalletError;
use scale_info::TypeInfo;

/// Operator roles of the coin.
#[derive(Clone, Copy, Encode, Decode, MaxEncodedLen, TypeInfo, PartialEq, Eq, Debug)]
pub enum Role {
    /// Compliance authority: freezes, supply, request resolution, naming operators.
    Registrar,
    /// Privileged counterparty whose incoming movements are escrowed.
    Operations,
    /// Executes code upgrades.
    Technical,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Registrar, Role::Operations, Role::Technical];
}

/// Holder of a role and, during a handoff, the account proposed to replace it.
#[derive(Clone, Encode, Decode, MaxEncodedLen, TypeInfo, PartialEq, Eq, Debug)]
pub struct RoleAssignment<AccountId> {
    pub current: AccountId,
    pub pending: Option<AccountId>,
}

impl<AccountId> RoleAssignment<AccountId> {
    pub fn new(current: AccountId) -> Self {
        Self { current, pending: None }
    }
}

#[derive(Clone, Copy, Encode, Decode, MaxEncodedLen, TypeInfo, PartialEq, Eq, Debug)]
pub enum RequestStatus {
    Pending,
    Validated,
    Rejected,
}

/// A transfer held back until the registrar validates or rejects it.
///
/// `spender` is set when the request was created by `transfer_from`.
#[derive(Clone, Encode, Decode, MaxEncodedLen, TypeInfo, PartialEq, Eq, Debug)]
pub struct TransferRequest<AccountId, Hash> {
    pub id: Hash,
    pub from: AccountId,
    pub to: AccountId,
    pub spender: Option<AccountId>,
    pub value: u128,
    pub status: RequestStatus,
}

/// An allowance of `value` from `from` to `to`, held back until resolved.
#[derive(Clone, Encode, Decode, MaxEncodedLen, TypeInfo, PartialEq, Eq, Debug)]
pub struct ApproveRequest<AccountId, Hash> {
    pub id: Hash,
    pub from: AccountId,
    pub to: AccountId,
    pub value: u128,
    pub status: RequestStatus,
}

/// Next implementation approved by the registrar. Spent by a single upgrade.
#[derive(Clone, Encode, Decode, MaxEncodedLen, TypeInfo, PartialEq, Eq, Debug)]
pub struct ImplementationAuthorization<Hash> {
    pub implementation: Hash,
    pub consumed: bool,
}

/// Which participant of a call tripped the freeze gate.
#[derive(
    Clone, Copy, Encode, Decode, DecodeWithMemTracking, TypeInfo, PalletError, PartialEq, Eq, Debug,
)]
pub enum Party {
    Owner,
    Spender,
    Recipient,
}
