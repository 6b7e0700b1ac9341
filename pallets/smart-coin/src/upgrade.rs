//! Registrar-authorized, single-use upgrades of the implementation.

use crate::{
    AuthorizedImplementation, Config, CurrentImplementation, Error, Event, ImplementationAuthorization,
    Pallet, Role, LOG_TARGET,
};
use frame_support::{dispatch::DispatchResult, ensure, traits::Get};
use sp_runtime::DispatchError;

/// Hook run by `upgrade_to_and_call` once the implementation is switched.
///
/// An error reverts the whole call, the switch included.
pub trait OnImplementationUpgrade<Hash> {
    fn on_upgrade(implementation: &Hash, data: &[u8]) -> DispatchResult;
}

impl<Hash> OnImplementationUpgrade<Hash> for () {
    fn on_upgrade(_implementation: &Hash, _data: &[u8]) -> DispatchResult {
        Ok(())
    }
}

impl<T: Config> Pallet<T> {
    pub(crate) fn ensure_delegated_context() -> DispatchResult {
        ensure!(T::DelegatedContext::get(), Error::<T>::NotDelegatedCall);
        Ok(())
    }

    /// Record `implementation` as the next allowed upgrade target.
    ///
    /// Refused while any role handoff is still pending.
    pub(crate) fn do_authorize_implementation(implementation: T::Hash) -> DispatchResult {
        ensure!(implementation != T::Hash::default(), Error::<T>::ZeroAddressCheck);
        for role in Role::ALL {
            ensure!(Self::pending_holder(role).is_none(), Self::unauthorized(role));
        }

        AuthorizedImplementation::<T>::put(ImplementationAuthorization {
            implementation,
            consumed: false,
        });
        log::info!(target: LOG_TARGET, "implementation {implementation:?} authorized");
        Self::deposit_event(Event::ImplementationAuthorized { implementation });
        Ok(())
    }

    pub(crate) fn do_upgrade(implementation: T::Hash) -> DispatchResult {
        AuthorizedImplementation::<T>::try_mutate(|slot| -> Result<(), DispatchError> {
            match slot {
                Some(authorization)
                    if authorization.implementation == implementation && !authorization.consumed =>
                {
                    authorization.consumed = true;
                    Ok(())
                },
                _ => Err(Error::<T>::UnauthorizedImplementation.into()),
            }
        })?;

        CurrentImplementation::<T>::put(implementation);
        log::info!(target: LOG_TARGET, "upgraded to implementation {implementation:?}");
        Self::deposit_event(Event::Upgraded { implementation });
        Ok(())
    }
}
