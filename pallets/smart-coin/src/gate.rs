//! Freeze and pause gates.

use crate::{Config, Error, Event, Frozen, Pallet, Party, Paused, LOG_TARGET};
use frame_support::{dispatch::DispatchResult, ensure};
use sp_std::vec::Vec;

impl<T: Config> Pallet<T> {
    /// `accounts` without the frozen ones, order preserved.
    pub fn find_not_frozen(accounts: &[T::AccountId]) -> Vec<T::AccountId> {
        accounts.iter().filter(|who| !Frozen::<T>::get(*who)).cloned().collect()
    }

    pub(crate) fn ensure_not_frozen(who: &T::AccountId, party: Party) -> DispatchResult {
        if Frozen::<T>::get(who) {
            log::debug!(target: LOG_TARGET, "rejected: {party:?} {who:?} is frozen");
            return Err(Error::<T>::Unauthorized(party).into());
        }
        Ok(())
    }

    pub(crate) fn ensure_not_paused() -> DispatchResult {
        ensure!(!Paused::<T>::get(), Error::<T>::ContractPaused);
        Ok(())
    }

    pub(crate) fn do_freeze(accounts: &[T::AccountId]) -> DispatchResult {
        for who in accounts {
            ensure!(!Frozen::<T>::get(who), Error::<T>::AddressAlreadyFrozen);
            Frozen::<T>::insert(who, true);
        }
        Ok(())
    }

    pub(crate) fn do_unfreeze(accounts: &[T::AccountId]) -> DispatchResult {
        for who in accounts {
            if !Frozen::<T>::get(who) {
                log::debug!(target: LOG_TARGET, "cannot unfreeze {who:?}: not frozen");
                return Err(Error::<T>::AddressNotFrozen.into());
            }
            Frozen::<T>::remove(who);
        }
        Ok(())
    }

    pub(crate) fn do_pause() -> DispatchResult {
        ensure!(!Paused::<T>::get(), Error::<T>::ContractPaused);
        Paused::<T>::put(true);
        log::info!(target: LOG_TARGET, "market operations paused");
        Self::deposit_event(Event::Paused);
        Ok(())
    }

    pub(crate) fn do_unpause() -> DispatchResult {
        ensure!(Paused::<T>::get(), Error::<T>::ContractNotPaused);
        Paused::<T>::put(false);
        log::info!(target: LOG_TARGET, "market operations resumed");
        Self::deposit_event(Event::UnPaused);
        Ok(())
    }
}
