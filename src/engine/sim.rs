//! In-process stand-in for a capture-card driver.
//!
//! Profile changes complete on a separate driver thread after a configurable
//! delay, and are reported through the registered [`ProfileCallback`] the
//! same way real hardware reports them.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread;
use std::time::Duration;

use super::device::{DeviceError, ProfileCallback, ProfileManager};
use super::profile::{DeviceProfile, ProfileId};
use crate::config::SimulationConfig;

/// A capture device as seen by the host program
#[derive(Clone)]
pub struct SimulatedDevice {
    pub name: String,
    /// `None` for devices that offer a single profile
    pub manager: Option<Arc<SimulatedProfileManager>>,
}

impl SimulatedDevice {
    pub fn profile_manager(&self) -> Option<&dyn ProfileManager> {
        self.manager.as_deref().map(|m| m as &dyn ProfileManager)
    }
}

/// The fixed device lineup of the simulated backend
pub fn simulated_devices(config: &SimulationConfig) -> Vec<SimulatedDevice> {
    let delay = Duration::from_millis(config.delay_ms);
    let manager = |profiles: Vec<ProfileId>, active: ProfileId| {
        let mut manager = SimulatedProfileManager::new(profiles, active).with_delay(delay);
        if config.stall {
            manager = manager.stalled();
        }
        Some(Arc::new(manager))
    };

    vec![
        SimulatedDevice {
            name: "DeckLink 8K Pro".to_string(),
            manager: manager(ProfileId::ALL.to_vec(), ProfileId::FourSubDevicesHalfDuplex),
        },
        SimulatedDevice {
            name: "DeckLink Duo 2".to_string(),
            manager: manager(
                vec![
                    ProfileId::TwoSubDevicesFullDuplex,
                    ProfileId::FourSubDevicesHalfDuplex,
                ],
                ProfileId::FourSubDevicesHalfDuplex,
            ),
        },
        SimulatedDevice {
            name: "DeckLink Mini Recorder 4K".to_string(),
            manager: None,
        },
    ]
}

struct SimState {
    profiles: Vec<ProfileId>,
    active: Mutex<ProfileId>,
    callback: Mutex<Option<Arc<dyn ProfileCallback>>>,
    changing: AtomicBool,
}

impl SimState {
    // Cloned out so callbacks never run under our lock
    fn callback(&self) -> Option<Arc<dyn ProfileCallback>> {
        self.callback
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn run_change(&self, profile: ProfileId, delay: Duration, stall: bool) {
        thread::sleep(delay);

        if let Some(callback) = self.callback() {
            callback.profile_changing(profile, false);
        }

        if stall {
            // Another application is holding the device; the change never lands.
            tracing::debug!(profile = %profile, "simulated driver stalled profile change");
            return;
        }

        *self.active.lock().unwrap_or_else(PoisonError::into_inner) = profile;
        self.changing.store(false, Ordering::SeqCst);

        #[cfg(feature = "dev-logging")]
        {
            let _ = super::log::write_debug_log(&format!("[sim] activated {}", profile));
        }

        if let Some(callback) = self.callback() {
            callback.profile_activated(profile);
        }
    }
}

/// Simulated profile manager for one device
pub struct SimulatedProfileManager {
    state: Arc<SimState>,
    delay: Duration,
    stall: bool,
}

impl SimulatedProfileManager {
    pub fn new(profiles: Vec<ProfileId>, active: ProfileId) -> Self {
        Self {
            state: Arc::new(SimState {
                profiles,
                active: Mutex::new(active),
                callback: Mutex::new(None),
                changing: AtomicBool::new(false),
            }),
            delay: Duration::ZERO,
            stall: false,
        }
    }

    /// Time between accepting a change and reporting it
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Accept changes but never complete them
    pub fn stalled(mut self) -> Self {
        self.stall = true;
        self
    }

    pub fn has_callback(&self) -> bool {
        self.state.callback().is_some()
    }

    pub fn is_changing(&self) -> bool {
        self.state.changing.load(Ordering::SeqCst)
    }
}

impl ProfileManager for SimulatedProfileManager {
    fn profiles(&self) -> Vec<DeviceProfile> {
        let active = self.active_profile();
        self.state
            .profiles
            .iter()
            .map(|&id| DeviceProfile {
                id,
                active: Some(id) == active,
            })
            .collect()
    }

    fn active_profile(&self) -> Option<ProfileId> {
        Some(*self.state.active.lock().unwrap_or_else(PoisonError::into_inner))
    }

    fn set_callback(&self, callback: Option<Arc<dyn ProfileCallback>>) -> Result<(), DeviceError> {
        *self
            .state
            .callback
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = callback;
        Ok(())
    }

    fn set_active(&self, profile: ProfileId) -> Result<(), DeviceError> {
        if !self.state.profiles.contains(&profile) {
            return Err(DeviceError::UnsupportedProfile(profile));
        }
        if self.state.changing.swap(true, Ordering::SeqCst) {
            return Err(DeviceError::ChangeInProgress);
        }

        let state = Arc::clone(&self.state);
        let (delay, stall) = (self.delay, self.stall);
        let spawned = thread::Builder::new()
            .name("sim-driver".to_string())
            .spawn(move || state.run_change(profile, delay, stall));

        if let Err(e) = spawned {
            tracing::error!(error = %e, "failed to start simulated driver thread");
            self.state.changing.store(false, Ordering::SeqCst);
            return Err(DeviceError::ActivationFailed(profile));
        }
        Ok(())
    }
}
