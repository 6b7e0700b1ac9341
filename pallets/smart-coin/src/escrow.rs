//! Two-phase requests for transfers and approvals.
//!
//! Creating a request engages the value on the sender's account without
//! moving it. The registrar then validates the request, which moves the value
//! or sets the allowance, or rejects it, which only releases the engagement.
//! A pair of accounts has at most one pending request of each kind.

use crate::{
    ApproveRequest, ApproveRequests, Config, EngagedAmount, Error, Event, Pallet, Party,
    PendingApprovals, PendingRequestCount, PendingTransfers, RequestNonce, RequestStatus,
    TransferRequest, TransferRequests, LOG_TARGET,
};
use codec::Encode;
use frame_support::{dispatch::DispatchResult, ensure, traits::Get};
use sp_runtime::{traits::Hash, DispatchError};
use sp_std::vec::Vec;

const TRANSFER_REQUEST: &[u8] = b"smart-coin/transfer";
const APPROVE_REQUEST: &[u8] = b"smart-coin/approve";

impl<T: Config> Pallet<T> {
    /// Whether a movement towards `counterparty` must wait for the registrar.
    pub(crate) fn routes_through_escrow(counterparty: &T::AccountId) -> bool {
        T::UniversalEscrow::get() || Self::privileged_role(counterparty).is_some()
    }

    fn next_request_id(kind: &[u8], participants: impl Encode, value: u128) -> Result<T::Hash, DispatchError> {
        let nonce = RequestNonce::<T>::get();
        RequestNonce::<T>::put(nonce.checked_add(1).ok_or(Error::<T>::Overflow)?);
        Ok(T::Hashing::hash_of(&(kind, participants, value, nonce)))
    }

    fn engage(who: &T::AccountId, value: u128) -> DispatchResult {
        Self::ensure_free_balance(who, value)?;
        EngagedAmount::<T>::mutate(who, |engaged| *engaged = engaged.saturating_add(value));
        Ok(())
    }

    fn release(who: &T::AccountId, value: u128) {
        EngagedAmount::<T>::mutate(who, |engaged| *engaged = engaged.saturating_sub(value));
    }

    fn open_slot(who: &T::AccountId) -> DispatchResult {
        PendingRequestCount::<T>::try_mutate(who, |count| -> DispatchResult {
            ensure!(*count < T::MaxPendingPerAccount::get(), Error::<T>::TooManyPendingRequests);
            *count += 1;
            Ok(())
        })
    }

    fn close_slot(who: &T::AccountId) {
        PendingRequestCount::<T>::mutate(who, |count| *count = count.saturating_sub(1));
    }

    pub(crate) fn request_transfer(
        from: T::AccountId,
        to: T::AccountId,
        spender: Option<T::AccountId>,
        value: u128,
    ) -> DispatchResult {
        ensure!(!PendingTransfers::<T>::contains_key(&from, &to), Error::<T>::OngoingRequest);
        Self::open_slot(&from)?;
        Self::engage(&from, value)?;

        let id = Self::next_request_id(TRANSFER_REQUEST, (&from, &to, &spender), value)?;
        TransferRequests::<T>::insert(
            id,
            TransferRequest {
                id,
                from: from.clone(),
                to: to.clone(),
                spender: spender.clone(),
                value,
                status: RequestStatus::Pending,
            },
        );
        PendingTransfers::<T>::insert(&from, &to, id);

        log::debug!(target: LOG_TARGET, "transfer request {id:?}: {value} from {from:?} to {to:?}");
        Self::deposit_event(Event::Transfer {
            from: Some(from.clone()),
            to: Some(to.clone()),
            value: 0,
        });
        Self::deposit_event(Event::TransferRequested { id, from, to, spender, value });
        Ok(())
    }

    pub(crate) fn request_approve(
        from: T::AccountId,
        to: T::AccountId,
        value: u128,
    ) -> DispatchResult {
        ensure!(!PendingApprovals::<T>::contains_key(&from, &to), Error::<T>::OngoingRequest);
        Self::open_slot(&from)?;
        Self::engage(&from, value)?;

        let id = Self::next_request_id(APPROVE_REQUEST, (&from, &to), value)?;
        ApproveRequests::<T>::insert(
            id,
            ApproveRequest {
                id,
                from: from.clone(),
                to: to.clone(),
                value,
                status: RequestStatus::Pending,
            },
        );
        PendingApprovals::<T>::insert(&from, &to, id);

        log::debug!(target: LOG_TARGET, "approve request {id:?}: {value} from {from:?} to {to:?}");
        Self::deposit_event(Event::ApproveRequested { id, from, to, value });
        Ok(())
    }

    fn pending_transfer(id: &T::Hash) -> Result<TransferRequest<T::AccountId, T::Hash>, DispatchError> {
        let request = TransferRequests::<T>::get(id).ok_or(Error::<T>::TransferRequestNotFound)?;
        ensure!(request.status == RequestStatus::Pending, Error::<T>::InvalidTransferRequestStatus);
        Ok(request)
    }

    fn pending_approve(id: &T::Hash) -> Result<ApproveRequest<T::AccountId, T::Hash>, DispatchError> {
        let request = ApproveRequests::<T>::get(id).ok_or(Error::<T>::TransferRequestNotFound)?;
        ensure!(request.status == RequestStatus::Pending, Error::<T>::InvalidTransferRequestStatus);
        Ok(request)
    }

    fn close_transfer(mut request: TransferRequest<T::AccountId, T::Hash>, status: RequestStatus) {
        PendingTransfers::<T>::remove(&request.from, &request.to);
        Self::close_slot(&request.from);
        request.status = status;
        TransferRequests::<T>::insert(request.id, request);
    }

    fn close_approve(mut request: ApproveRequest<T::AccountId, T::Hash>, status: RequestStatus) {
        PendingApprovals::<T>::remove(&request.from, &request.to);
        Self::close_slot(&request.from);
        request.status = status;
        ApproveRequests::<T>::insert(request.id, request);
    }

    pub(crate) fn do_validate_transfer(id: T::Hash) -> DispatchResult {
        let request = Self::pending_transfer(&id)?;
        Self::ensure_not_frozen(&request.from, Party::Owner)?;
        Self::ensure_not_frozen(&request.to, Party::Recipient)?;

        Self::release(&request.from, request.value);
        Self::move_balance(&request.from, &request.to, request.value)?;
        Self::close_transfer(request, RequestStatus::Validated);

        log::debug!(target: LOG_TARGET, "transfer request {id:?} validated");
        Self::deposit_event(Event::TransferValidated { id });
        Ok(())
    }

    pub(crate) fn do_reject_transfer(id: T::Hash) -> DispatchResult {
        let request = Self::pending_transfer(&id)?;
        Self::release(&request.from, request.value);
        Self::close_transfer(request, RequestStatus::Rejected);

        log::debug!(target: LOG_TARGET, "transfer request {id:?} rejected");
        Self::deposit_event(Event::TransferRejected { id });
        Ok(())
    }

    pub(crate) fn do_validate_approve(id: T::Hash) -> DispatchResult {
        let request = Self::pending_approve(&id)?;
        Self::ensure_not_frozen(&request.from, Party::Owner)?;
        Self::ensure_not_frozen(&request.to, Party::Spender)?;

        Self::release(&request.from, request.value);
        Self::set_allowance(&request.from, &request.to, request.value);
        Self::close_approve(request, RequestStatus::Validated);

        log::debug!(target: LOG_TARGET, "approve request {id:?} validated");
        Self::deposit_event(Event::ApproveValidated { id });
        Ok(())
    }

    pub(crate) fn do_reject_approve(id: T::Hash) -> DispatchResult {
        let request = Self::pending_approve(&id)?;
        Self::release(&request.from, request.value);
        Self::close_approve(request, RequestStatus::Rejected);

        log::debug!(target: LOG_TARGET, "approve request {id:?} rejected");
        Self::deposit_event(Event::ApproveRejected { id });
        Ok(())
    }

    /// Reject every pending request sent by `who` and return how many there
    /// were, at most `MaxPendingPerAccount`.
    pub(crate) fn reject_all_from(who: &T::AccountId) -> Result<u32, DispatchError> {
        let transfers: Vec<T::Hash> = PendingTransfers::<T>::iter_prefix_values(who).collect();
        let approvals: Vec<T::Hash> = PendingApprovals::<T>::iter_prefix_values(who).collect();
        let rejected = transfers.len().saturating_add(approvals.len()) as u32;

        for id in transfers {
            Self::do_reject_transfer(id)?;
        }
        for id in approvals {
            Self::do_reject_approve(id)?;
        }
        Ok(rejected)
    }
}
