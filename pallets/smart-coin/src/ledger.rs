//! Balances, supply and allowances.
//!
//! Only the free balance (`balance - engaged`) can leave an account. Every
//! debit below goes through [`Pallet::ensure_free_balance`].

use crate::{
    Allowances, Balances, Config, EngagedAmount, Error, Event, Pallet, Party, TotalSupply,
    LOG_TARGET, UNLIMITED_ALLOWANCE,
};
use frame_support::{dispatch::DispatchResult, ensure};
use sp_runtime::DispatchError;

impl<T: Config> Pallet<T> {
    /// Balance not engaged by pending requests.
    pub fn free_balance(who: &T::AccountId) -> u128 {
        Balances::<T>::get(who).saturating_sub(EngagedAmount::<T>::get(who))
    }

    pub(crate) fn ensure_free_balance(who: &T::AccountId, value: u128) -> DispatchResult {
        let free = Self::free_balance(who);
        if free < value {
            log::debug!(target: LOG_TARGET, "{who:?} has {free} free, needs {value}");
            return Err(Error::<T>::InsufficientBalance.into());
        }
        Ok(())
    }

    fn credit(who: &T::AccountId, value: u128) -> DispatchResult {
        Balances::<T>::try_mutate(who, |balance| -> DispatchResult {
            *balance = balance.checked_add(value).ok_or(Error::<T>::Overflow)?;
            Ok(())
        })
    }

    /// Move `value` between two accounts. Gate checks are the caller's job.
    pub(crate) fn move_balance(from: &T::AccountId, to: &T::AccountId, value: u128) -> DispatchResult {
        Self::ensure_free_balance(from, value)?;
        Balances::<T>::mutate(from, |balance| *balance = balance.saturating_sub(value));
        Self::credit(to, value)?;
        Self::deposit_event(Event::Transfer { from: Some(from.clone()), to: Some(to.clone()), value });
        Ok(())
    }

    pub(crate) fn do_mint(to: &T::AccountId, value: u128) -> DispatchResult {
        let supply = TotalSupply::<T>::get().checked_add(value).ok_or(Error::<T>::Overflow)?;
        Self::credit(to, value)?;
        TotalSupply::<T>::put(supply);
        Self::deposit_event(Event::Transfer { from: None, to: Some(to.clone()), value });
        Ok(())
    }

    pub(crate) fn do_burn(from: &T::AccountId, value: u128) -> DispatchResult {
        Self::ensure_free_balance(from, value)?;
        Balances::<T>::mutate(from, |balance| *balance = balance.saturating_sub(value));
        TotalSupply::<T>::mutate(|supply| *supply = supply.saturating_sub(value));
        Self::deposit_event(Event::Transfer { from: Some(from.clone()), to: None, value });
        Ok(())
    }

    /// Reject what `who` still has pending, then destroy its balance.
    /// Returns the number of rejected requests.
    pub(crate) fn do_wipe(who: &T::AccountId) -> Result<u32, DispatchError> {
        let rejected = Self::reject_all_from(who)?;

        let value = Balances::<T>::take(who);
        TotalSupply::<T>::mutate(|supply| *supply = supply.saturating_sub(value));
        log::info!(target: LOG_TARGET, "wiped {value} from frozen account {who:?}");
        Self::deposit_event(Event::Transfer { from: Some(who.clone()), to: None, value });
        Ok(rejected)
    }

    /// Checks shared by `approve` and `increase_allowance`.
    pub(crate) fn ensure_can_grant(owner: &T::AccountId, spender: &T::AccountId) -> DispatchResult {
        Self::ensure_not_paused()?;
        ensure!(!Self::is_null(spender), Error::<T>::ZeroAddressCheck);
        Self::ensure_not_frozen(owner, Party::Owner)?;
        Self::ensure_not_frozen(spender, Party::Spender)?;
        Self::ensure_not_privileged(spender)
    }

    pub(crate) fn set_allowance(owner: &T::AccountId, spender: &T::AccountId, value: u128) {
        Allowances::<T>::insert(owner, spender, value);
        Self::deposit_event(Event::Approval { owner: owner.clone(), spender: spender.clone(), value });
    }

    /// Deduct `value` from the allowance, unless the allowance is unlimited.
    pub(crate) fn spend_allowance(
        owner: &T::AccountId,
        spender: &T::AccountId,
        value: u128,
    ) -> DispatchResult {
        let current = Allowances::<T>::get(owner, spender);
        if current == UNLIMITED_ALLOWANCE {
            return Ok(());
        }
        if current < value {
            log::debug!(target: LOG_TARGET, "{spender:?} may spend {current} of {owner:?}, needs {value}");
            return Err(Error::<T>::InsufficientAllowance.into());
        }
        Allowances::<T>::insert(owner, spender, current - value);
        Ok(())
    }
}
