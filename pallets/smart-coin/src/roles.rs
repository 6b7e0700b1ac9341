//! Operator roles and their two-step handoff.

use crate::{Config, Error, Event, Pallet, Role, Roles, LOG_TARGET};
use frame_support::{dispatch::DispatchResult, ensure};
use frame_system::{ensure_signed, pallet_prelude::OriginFor};
use sp_runtime::DispatchError;

impl<T: Config> Pallet<T> {
    /// Current holder of `role`.
    pub fn holder(role: Role) -> Option<T::AccountId> {
        Roles::<T>::get(role).map(|assignment| assignment.current)
    }

    /// Account proposed for `role` and not yet accepted.
    pub fn pending_holder(role: Role) -> Option<T::AccountId> {
        Roles::<T>::get(role).and_then(|assignment| assignment.pending)
    }

    pub(crate) fn unauthorized(role: Role) -> Error<T> {
        match role {
            Role::Registrar => Error::<T>::UnauthorizedRegistrar,
            Role::Operations => Error::<T>::UnauthorizedOperations,
            Role::Technical => Error::<T>::UnauthorizedTechnical,
        }
    }

    /// Ensure the origin is signed by the current holder of `role`.
    pub(crate) fn ensure_role(
        origin: OriginFor<T>,
        role: Role,
    ) -> Result<T::AccountId, DispatchError> {
        let who = ensure_signed(origin)?;
        ensure!(Self::holder(role).as_ref() == Some(&who), Self::unauthorized(role));
        Ok(who)
    }

    /// The role that makes `who` a privileged counterparty, if any.
    pub(crate) fn privileged_role(who: &T::AccountId) -> Option<Role> {
        [Role::Registrar, Role::Operations]
            .into_iter()
            .find(|role| Self::holder(*role).as_ref() == Some(who))
    }

    pub(crate) fn ensure_not_privileged(who: &T::AccountId) -> DispatchResult {
        match Self::privileged_role(who) {
            Some(Role::Registrar) => Err(Error::<T>::ForbiddenForRegistrar.into()),
            Some(Role::Operations) => Err(Error::<T>::ForbiddenForOperations.into()),
            _ => Ok(()),
        }
    }

    pub(crate) fn check_operators(
        registrar: &T::AccountId,
        operations: &T::AccountId,
        technical: &T::AccountId,
    ) -> DispatchResult {
        ensure!(
            !Self::is_null(registrar) && !Self::is_null(operations) && !Self::is_null(technical),
            Error::<T>::ZeroAddressCheck
        );
        ensure!(
            registrar != operations && operations != technical && registrar != technical,
            Error::<T>::InconsistentOperators
        );
        Ok(())
    }

    pub(crate) fn do_name_new_operators(
        registrar: T::AccountId,
        operations: T::AccountId,
        technical: T::AccountId,
    ) -> DispatchResult {
        Self::check_operators(&registrar, &operations, &technical)?;

        for (role, who) in [
            (Role::Registrar, &registrar),
            (Role::Operations, &operations),
            (Role::Technical, &technical),
        ] {
            Roles::<T>::try_mutate(role, |slot| -> DispatchResult {
                let assignment = slot.as_mut().ok_or(Self::unauthorized(role))?;
                assignment.pending = Some(who.clone());
                Ok(())
            })?;
        }

        log::info!(
            target: LOG_TARGET,
            "named operators: registrar {registrar:?}, operations {operations:?}, technical {technical:?}"
        );
        Self::deposit_event(Event::NamedNewOperators { registrar, operations, technical });
        Ok(())
    }

    /// Promote the caller from pending to current holder of `role`.
    pub(crate) fn do_accept_role(origin: OriginFor<T>, role: Role) -> DispatchResult {
        let who = ensure_signed(origin)?;

        let previous = Roles::<T>::try_mutate(role, |slot| -> Result<_, DispatchError> {
            let assignment = slot.as_mut().ok_or(Self::unauthorized(role))?;
            ensure!(assignment.pending.as_ref() == Some(&who), Self::unauthorized(role));
            assignment.pending = None;
            Ok(core::mem::replace(&mut assignment.current, who.clone()))
        })?;

        log::info!(target: LOG_TARGET, "{role:?} role accepted by {who:?}");
        match role {
            Role::Registrar => {
                Self::deposit_event(Event::AcceptedRegistrarRole { account: who.clone() });
                Self::deposit_event(Event::RegistrarUpdated { previous, new: who });
            },
            Role::Operations => Self::deposit_event(Event::AcceptedOperationsRole { account: who }),
            Role::Technical => Self::deposit_event(Event::AcceptedTechnicalRole { account: who }),
        }
        Ok(())
    }
}
