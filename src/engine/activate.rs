// Host-side profile activation: register, request, wait, unregister

use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use super::device::{DeviceError, ProfileCallback, ProfileManager};
use super::profile::{ActivationRequest, ProfileId};
use super::waiter::{ActivationOutcome, ProfileActivationWaiter};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ActivationError {
    #[error("Profile {0} is not available on this device")]
    ProfileNotFound(ProfileId),

    #[error(transparent)]
    Device(#[from] DeviceError),
}

/// Keeps a callback registered for as long as it lives
struct CallbackRegistration<'a> {
    manager: &'a dyn ProfileManager,
}

impl<'a> CallbackRegistration<'a> {
    fn register(
        manager: &'a dyn ProfileManager,
        callback: Arc<dyn ProfileCallback>,
    ) -> Result<Self, DeviceError> {
        manager.set_callback(Some(callback))?;
        Ok(Self { manager })
    }
}

impl Drop for CallbackRegistration<'_> {
    fn drop(&mut self) {
        if let Err(e) = self.manager.set_callback(None) {
            tracing::warn!(error = %e, "failed to unregister profile callback");
        }
    }
}

/// Switch `manager`'s device to `target` and wait up to `timeout` for the
/// driver to confirm it.
///
/// A timeout is not an error: it comes back as [`ActivationOutcome::TimedOut`]
/// and the change may still complete later.
pub fn activate_profile(
    manager: &dyn ProfileManager,
    target: ProfileId,
    timeout: Duration,
) -> Result<ActivationOutcome, ActivationError> {
    if !manager.profiles().iter().any(|p| p.id == target) {
        return Err(ActivationError::ProfileNotFound(target));
    }

    let waiter = ProfileActivationWaiter::new(ActivationRequest::new(target), manager.active_profile());
    let _span = tracing::info_span!(
        "activate",
        request = %waiter.request().id(),
        profile = %target
    )
    .entered();

    if waiter.is_already_active() {
        tracing::info!("Profile is already active");
        return Ok(waiter.await_confirmation(timeout));
    }

    let _registration = CallbackRegistration::register(manager, Arc::new(waiter.notifier()))?;

    tracing::debug!("requesting profile change");
    manager.set_active(target)?;

    let outcome = waiter.await_confirmation(timeout);
    match outcome {
        ActivationOutcome::TimedOut => tracing::info!(
            timeout_ms = timeout.as_millis() as u64,
            "timed out waiting for profile activation"
        ),
        _ => tracing::info!("profile activation confirmed"),
    }
    Ok(outcome)
}
