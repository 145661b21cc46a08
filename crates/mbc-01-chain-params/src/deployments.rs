//! # Soft-Fork Deployments
//!
//! Static configuration of version-bits deployments. Activation state is
//! not tracked here, only the signalling parameters each network starts
//! with.
//!
//! ## Sentinels
//!
//! | Constant | Field | Meaning |
//! |----------|-------|---------|
//! | `ALWAYS_ACTIVE` | `start_time` | Active from genesis |
//! | `NEVER_ACTIVE` | `start_time` | Never signals |
//! | `NO_TIMEOUT` | `timeout` | Signalling never expires |
//!
//! `min_activation_height` gates activation on chain height even after
//! signalling has locked in.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{ChainParamsError, Result};

/// Highest usable version bit.
pub const MAX_VERSION_BIT: u8 = 28;

/// Deployment identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeploymentPos {
    /// Test-only deployment
    TestDummy,
    /// Schnorr/Taproot
    Taproot,
}

impl DeploymentPos {
    /// Number of deployments in every table.
    pub const COUNT: usize = 2;

    /// All deployments in table order.
    pub const ALL: [DeploymentPos; Self::COUNT] = [DeploymentPos::TestDummy, DeploymentPos::Taproot];

    /// Name accepted by `-vbparams`.
    pub const fn name(self) -> &'static str {
        match self {
            DeploymentPos::TestDummy => "testdummy",
            DeploymentPos::Taproot => "taproot",
        }
    }

    const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for DeploymentPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DeploymentPos {
    type Err = ChainParamsError;

    fn from_str(s: &str) -> Result<Self> {
        DeploymentPos::ALL
            .into_iter()
            .find(|d| d.name() == s)
            .ok_or_else(|| ChainParamsError::UnknownDeployment(s.to_string()))
    }
}

/// Signalling parameters of one deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deployment {
    /// Version bit used for signalling
    pub bit: u8,
    /// Median time past at which signalling starts, or a sentinel
    pub start_time: i64,
    /// Median time past after which signalling fails, or `NO_TIMEOUT`
    pub timeout: i64,
    /// Earliest height at which the deployment may activate
    pub min_activation_height: i32,
}

impl Deployment {
    /// Start time meaning "active from genesis".
    pub const ALWAYS_ACTIVE: i64 = -1;
    /// Start time meaning "never signals".
    pub const NEVER_ACTIVE: i64 = -2;
    /// Timeout meaning "no expiry".
    pub const NO_TIMEOUT: i64 = i64::MAX;

    /// Deployment that never activates.
    pub const fn never_active(bit: u8) -> Self {
        Self {
            bit,
            start_time: Self::NEVER_ACTIVE,
            timeout: Self::NO_TIMEOUT,
            min_activation_height: 0,
        }
    }

    /// Deployment active from genesis.
    pub const fn always_active(bit: u8) -> Self {
        Self {
            bit,
            start_time: Self::ALWAYS_ACTIVE,
            timeout: Self::NO_TIMEOUT,
            min_activation_height: 0,
        }
    }

    /// `true` for the always-active sentinel.
    pub fn is_always_active(&self) -> bool {
        self.start_time == Self::ALWAYS_ACTIVE
    }

    /// `true` for the never-active sentinel.
    pub fn is_never_active(&self) -> bool {
        self.start_time == Self::NEVER_ACTIVE
    }

    /// Whether this deployment can ever occupy its bit.
    pub fn may_signal(&self) -> bool {
        !self.is_always_active() && !self.is_never_active()
    }

    /// Whether the signalling windows of two deployments can overlap.
    pub fn overlaps(&self, other: &Deployment) -> bool {
        self.may_signal()
            && other.may_signal()
            && self.start_time < other.timeout
            && other.start_time < self.timeout
    }

    /// Checks the bit range.
    pub fn validate(&self) -> bool {
        self.bit <= MAX_VERSION_BIT
    }
}

/// Fixed-size table indexed by [`DeploymentPos`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deployments([Deployment; DeploymentPos::COUNT]);

impl Deployments {
    /// Table from `testdummy` and `taproot` entries.
    pub const fn new(test_dummy: Deployment, taproot: Deployment) -> Self {
        Self([test_dummy, taproot])
    }

    /// Entry for `pos`.
    pub fn get(&self, pos: DeploymentPos) -> &Deployment {
        &self.0[pos.index()]
    }

    /// Mutable entry for `pos`.
    pub fn get_mut(&mut self, pos: DeploymentPos) -> &mut Deployment {
        &mut self.0[pos.index()]
    }

    /// `(pos, deployment)` pairs in table order.
    pub fn iter(&self) -> impl Iterator<Item = (DeploymentPos, &Deployment)> {
        DeploymentPos::ALL.into_iter().zip(self.0.iter())
    }

    /// Applies a parsed override.
    pub fn apply(&mut self, update: &VersionBitsOverride) {
        let entry = self.get_mut(update.deployment);
        entry.start_time = update.start_time;
        entry.timeout = update.timeout;
        entry.min_activation_height = update.min_activation_height;
        info!(
            "Setting version bits activation parameters for {} to start={}, timeout={}, min_activation_height={}",
            update.deployment, update.start_time, update.timeout, update.min_activation_height
        );
    }
}

impl std::ops::Index<DeploymentPos> for Deployments {
    type Output = Deployment;

    fn index(&self, pos: DeploymentPos) -> &Deployment {
        self.get(pos)
    }
}

/// One parsed `-vbparams` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionBitsOverride {
    /// Target deployment
    pub deployment: DeploymentPos,
    /// New start time
    pub start_time: i64,
    /// New timeout
    pub timeout: i64,
    /// New minimum activation height (0 when omitted)
    pub min_activation_height: i32,
}

impl FromStr for VersionBitsOverride {
    type Err = ChainParamsError;

    /// Parses `deployment:start:end[:min_activation_height]`.
    ///
    /// Numeric fields are checked before the name, so `unknown:abc:1`
    /// reports the start time.
    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.split(':').collect();
        if !(3..=4).contains(&parts.len()) {
            return Err(ChainParamsError::MalformedVbParams);
        }

        let start_time = parts[1]
            .parse::<i64>()
            .map_err(|_| ChainParamsError::InvalidStartTime(parts[1].to_string()))?;
        let timeout = parts[2]
            .parse::<i64>()
            .map_err(|_| ChainParamsError::InvalidTimeout(parts[2].to_string()))?;
        let min_activation_height = match parts.get(3) {
            Some(raw) => raw
                .parse::<i32>()
                .map_err(|_| ChainParamsError::InvalidMinActivationHeight(raw.to_string()))?,
            None => 0,
        };
        let deployment = parts[0].parse()?;

        Ok(Self {
            deployment,
            start_time,
            timeout,
            min_activation_height,
        })
    }
}
