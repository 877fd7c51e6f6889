//! # vo-abi-build
//!
//! Build-time support for the `vo-abi` shim:
//! - `version` - probes the host API version and decides which
//!   capabilities the configured host exposes
//! - `intrin_shim` - renders the Windows-only header prelude that keeps
//!   compiler intrinsic headers from conflicting with the host headers
//!
//! This crate is consumed as a build-dependency; nothing in it runs at
//! runtime.

pub mod intrin_shim;
pub mod version;

pub use intrin_shim::ShimVariant;
pub use version::{HostVersion, VersionError};
