//! Device profile identifiers and the description catalog

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;
use uuid::Uuid;

/// Build a driver FourCC code from its four ASCII characters
const fn fourcc(code: &[u8; 4]) -> u32 {
    ((code[0] as u32) << 24) | ((code[1] as u32) << 16) | ((code[2] as u32) << 8) | code[3] as u32
}

/// Profiles a capture device can be switched between
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProfileId {
    OneSubDeviceFullDuplex,
    OneSubDeviceHalfDuplex,
    TwoSubDevicesFullDuplex,
    TwoSubDevicesHalfDuplex,
    FourSubDevicesHalfDuplex,
}

impl ProfileId {
    pub const ALL: [ProfileId; 5] = [
        ProfileId::OneSubDeviceFullDuplex,
        ProfileId::OneSubDeviceHalfDuplex,
        ProfileId::TwoSubDevicesFullDuplex,
        ProfileId::TwoSubDevicesHalfDuplex,
        ProfileId::FourSubDevicesHalfDuplex,
    ];

    /// The 32-bit code the driver reports for this profile
    pub fn fourcc(&self) -> u32 {
        match self {
            Self::OneSubDeviceFullDuplex => fourcc(b"1dfd"),
            Self::OneSubDeviceHalfDuplex => fourcc(b"1dhd"),
            Self::TwoSubDevicesFullDuplex => fourcc(b"2dfd"),
            Self::TwoSubDevicesHalfDuplex => fourcc(b"2dhd"),
            Self::FourSubDevicesHalfDuplex => fourcc(b"4dhd"),
        }
    }

    pub fn from_fourcc(code: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.fourcc() == code)
    }

    /// Human-readable description, e.g. "two sub-devices full-duplex"
    pub fn description(&self) -> &'static str {
        describe_fourcc(self.fourcc())
    }
}

impl fmt::Display for ProfileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Process-wide FourCC -> description table, built on first use
pub fn profile_catalog() -> &'static BTreeMap<u32, &'static str> {
    static CATALOG: OnceLock<BTreeMap<u32, &'static str>> = OnceLock::new();
    CATALOG.get_or_init(|| {
        BTreeMap::from([
            (fourcc(b"1dfd"), "one sub-device full-duplex"),
            (fourcc(b"1dhd"), "one sub-device half-duplex"),
            (fourcc(b"2dfd"), "two sub-devices full-duplex"),
            (fourcc(b"2dhd"), "two sub-devices half-duplex"),
            (fourcc(b"4dhd"), "four sub-devices half-duplex"),
        ])
    })
}

/// Description for a raw driver code; unknown codes describe as ""
pub fn describe_fourcc(code: u32) -> &'static str {
    profile_catalog().get(&code).copied().unwrap_or("")
}

/// A profile as offered by one device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeviceProfile {
    pub id: ProfileId,
    pub active: bool,
}

/// The profile a caller wants the driver to confirm as active
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivationRequest {
    id: Uuid,
    profile: ProfileId,
}

impl ActivationRequest {
    pub fn new(profile: ProfileId) -> Self {
        Self {
            id: Uuid::new_v4(),
            profile,
        }
    }

    /// Correlation id for log events belonging to this request
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn profile(&self) -> ProfileId {
        self.profile
    }
}
