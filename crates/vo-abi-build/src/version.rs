//! Host API version probe.
//!
//! The shim vendors the layout definitions of exactly one host version
//! per build. `VO_ABI_HOST_VERSION` selects which one; when the variable
//! is absent the bundled (latest stable) version is assumed, since the
//! crate ships that version's layouts. A value that is present but
//! malformed or unsupported is a hard build failure - never a
//! silently-misconfigured binary.

use std::env;
use std::fmt;
use thiserror::Error;

/// Environment variable that selects the host API version.
pub const VERSION_ENV: &str = "VO_ABI_HOST_VERSION";

/// Oldest host release the stable ABI layer supports.
pub const MIN_SUPPORTED: HostVersion = HostVersion::new(1, 0);

/// Newest host release the vendored layouts match.
pub const LATEST_STABLE: HostVersion = HostVersion::new(1, 4);

/// Version assumed when no probe result exists.
pub const BUNDLED: HostVersion = LATEST_STABLE;

/// Typed-data accessors exist since this release. Older hosts get
/// well-defined defaults (false/null) instead.
pub const TYPED_DATA_SINCE: HostVersion = HostVersion::new(1, 2);

/// The string-encoding convenience accessor exists since this release.
/// Older hosts reconstruct the index by masking the header flag word.
pub const ENC_ACCESSOR_SINCE: HostVersion = HostVersion::new(1, 3);

/// A `MAJOR.MINOR` host API version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct HostVersion(u32, u32);

impl HostVersion {
    pub const fn new(major: u32, minor: u32) -> Self {
        Self(major, minor)
    }

    pub fn major(&self) -> u32 {
        self.0
    }

    pub fn minor(&self) -> u32 {
        self.1
    }

    pub fn is_supported(&self) -> bool {
        *self >= MIN_SUPPORTED && *self <= LATEST_STABLE
    }

    /// Parse a `MAJOR.MINOR` string.
    pub fn parse(raw: &str) -> Result<Self, VersionError> {
        let mut parts = raw.trim().splitn(2, '.');
        let major = parts.next().and_then(|p| p.parse::<u32>().ok());
        let minor = parts.next().and_then(|p| p.parse::<u32>().ok());

        match (major, minor) {
            (Some(major), Some(minor)) => Ok(Self::new(major, minor)),
            _ => Err(VersionError::Malformed(raw.to_string())),
        }
    }

    /// Resolve the host version for this build from the environment.
    pub fn from_env() -> Result<Self, VersionError> {
        match env::var(VERSION_ENV) {
            Ok(raw) => {
                let version = Self::parse(&raw)?;
                if !version.is_supported() {
                    return Err(VersionError::Unsupported(version));
                }
                Ok(version)
            }
            Err(_) => Ok(BUNDLED),
        }
    }
}

impl fmt::Display for HostVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.0, self.1)
    }
}

#[derive(Debug, Error)]
pub enum VersionError {
    #[error("malformed host version {0:?}: expected MAJOR.MINOR, e.g. \"1.4\"")]
    Malformed(String),
    #[error("host version {0} is outside the supported range 1.0 through 1.4; upgrade vo-abi or pick a supported host")]
    Unsupported(HostVersion),
}
