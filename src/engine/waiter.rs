//! Bounded wait for a driver-confirmed profile activation.
//!
//! The driver reports activations on its own thread at an arbitrary point
//! relative to when the caller starts waiting. The flag is checked and the
//! wait entered under the same lock, so a confirmation delivered before
//! [`ProfileActivationWaiter::await_confirmation`] starts is never lost.

use std::sync::{Arc, Condvar, Mutex, PoisonError};
use std::time::Duration;

use super::device::ProfileCallback;
use super::profile::{ActivationRequest, ProfileId};

/// Built-in wait limit for a profile change
pub const DEFAULT_ACTIVATION_TIMEOUT: Duration = Duration::from_secs(5);

/// Result of one activation request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationOutcome {
    /// The target was already active when the waiter was created
    AlreadyActive,
    /// The driver confirmed the target before the deadline
    ActivatedWithinTimeout,
    /// No confirmation before the deadline; the change may still complete
    TimedOut,
}

impl ActivationOutcome {
    pub fn is_confirmed(&self) -> bool {
        !matches!(self, Self::TimedOut)
    }
}

/// Flag + condvar shared between the waiting thread and the driver thread.
/// The flag only ever goes false -> true.
#[derive(Debug, Default)]
struct SharedSignal {
    activated: Mutex<bool>,
    condvar: Condvar,
}

impl SharedSignal {
    fn set(&self) {
        {
            let mut activated = self.activated.lock().unwrap_or_else(PoisonError::into_inner);
            *activated = true;
        }
        self.condvar.notify_one();
    }
}

/// One-shot waiter for a single [`ActivationRequest`]
#[derive(Debug)]
pub struct ProfileActivationWaiter {
    request: ActivationRequest,
    already_active: bool,
    signal: Arc<SharedSignal>,
}

impl ProfileActivationWaiter {
    /// Create a waiter, given the profile that is active right now
    pub fn new(request: ActivationRequest, active_profile: Option<ProfileId>) -> Self {
        let already_active = active_profile == Some(request.profile());
        Self {
            request,
            already_active,
            signal: Arc::new(SharedSignal::default()),
        }
    }

    pub fn request(&self) -> &ActivationRequest {
        &self.request
    }

    pub fn is_already_active(&self) -> bool {
        self.already_active
    }

    /// Handle for the driver side. It shares the signal, so it stays valid
    /// after the waiter has been consumed.
    pub fn notifier(&self) -> ActivationNotifier {
        ActivationNotifier {
            target: self.request.profile(),
            signal: Arc::clone(&self.signal),
        }
    }

    /// Record that the driver reports `observed` as the active profile
    pub fn on_external_notification(&self, observed: ProfileId) {
        if observed == self.request.profile() {
            self.signal.set();
        }
    }

    /// Block until the target is confirmed or `timeout` elapses
    pub fn await_confirmation(self, timeout: Duration) -> ActivationOutcome {
        if self.already_active {
            tracing::debug!(request = %self.request.id(), "profile already active, not waiting");
            return ActivationOutcome::AlreadyActive;
        }

        let activated = self
            .signal
            .activated
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if *activated {
            return ActivationOutcome::ActivatedWithinTimeout;
        }

        let (activated, _) = self
            .signal
            .condvar
            .wait_timeout_while(activated, timeout, |activated| !*activated)
            .unwrap_or_else(PoisonError::into_inner);

        if *activated {
            ActivationOutcome::ActivatedWithinTimeout
        } else {
            tracing::debug!(
                request = %self.request.id(),
                timeout_ms = timeout.as_millis() as u64,
                "gave up waiting for profile activation"
            );
            ActivationOutcome::TimedOut
        }
    }
}

/// Driver-side half of a [`ProfileActivationWaiter`]
#[derive(Debug, Clone)]
pub struct ActivationNotifier {
    target: ProfileId,
    signal: Arc<SharedSignal>,
}

impl ActivationNotifier {
    pub fn target(&self) -> ProfileId {
        self.target
    }

    pub fn on_external_notification(&self, observed: ProfileId) {
        if observed == self.target {
            self.signal.set();
        }
    }
}

impl ProfileCallback for ActivationNotifier {
    fn profile_activated(&self, profile: ProfileId) {
        tracing::info!(profile = %profile, "Profile has been activated");
        self.on_external_notification(profile);
    }
}
