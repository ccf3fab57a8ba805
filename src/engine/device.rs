// Driver-facing capability traits

use std::sync::Arc;
use thiserror::Error;

use super::profile::{DeviceProfile, ProfileId};

/// Errors reported by a device's profile manager
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DeviceError {
    #[error("Profile change already in progress")]
    ChangeInProgress,

    #[error("Unable to activate profile {0}")]
    ActivationFailed(ProfileId),

    #[error("Profile {0} is not offered by this device")]
    UnsupportedProfile(ProfileId),

    #[error("Unable to register profile callback: {0}")]
    CallbackRegistration(String),
}

/// Notifications a driver delivers while switching profiles.
///
/// Both methods are called on the driver's own thread. The profile change is
/// held up until they return, so implementations must not block.
pub trait ProfileCallback: Send + Sync {
    /// A change to `profile` is about to happen
    fn profile_changing(&self, profile: ProfileId, streams_will_be_forced_to_stop: bool) {
        tracing::debug!(
            profile = %profile,
            streams_will_be_forced_to_stop,
            "Changing to profile"
        );
    }

    /// `profile` is now the active profile
    fn profile_activated(&self, profile: ProfileId);
}

/// Profile control for one device
pub trait ProfileManager: Send + Sync {
    /// Profiles offered by the device, in driver order
    fn profiles(&self) -> Vec<DeviceProfile>;

    fn active_profile(&self) -> Option<ProfileId>;

    /// Register (or with `None`, revoke) the notification callback
    fn set_callback(&self, callback: Option<Arc<dyn ProfileCallback>>) -> Result<(), DeviceError>;

    /// Request a profile change. Returns once the request is accepted; the
    /// outcome arrives later through the registered callback.
    fn set_active(&self, profile: ProfileId) -> Result<(), DeviceError>;
}
