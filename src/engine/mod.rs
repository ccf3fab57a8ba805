// Profile activation engine - independent of the CLI

pub mod activate;
pub mod device;
pub mod log;
pub mod profile;
pub mod sim;
pub mod waiter;

pub use activate::{ActivationError, activate_profile};
pub use device::{DeviceError, ProfileCallback, ProfileManager};
pub use profile::{ActivationRequest, DeviceProfile, ProfileId, describe_fourcc, profile_catalog};
pub use sim::{SimulatedDevice, SimulatedProfileManager, simulated_devices};
pub use waiter::{
    ActivationNotifier, ActivationOutcome, DEFAULT_ACTIVATION_TIMEOUT, ProfileActivationWaiter,
};
