//! # vo-abi
//!
//! Stable ABI function layer over the Vo host runtime's value
//! representation.
//!
//! The host exposes most of its object model only as inline helpers that
//! compile away: type predicates, container accessors, field extraction.
//! This crate re-exports that surface as ordinary callable functions so
//! callers built against a stable binary interface keep working across
//! host versions. Three parallel symbol sets share one canonical
//! implementation:
//!
//! - [`exports`] - `vo_macros_*`, one symbol per host macro
//! - [`stable`] - `vo_stable_*`, the full surface with version-gated
//!   capabilities absorbed at build time
//! - [`fallback`] - `vo_abi_fallback_*`, a minimal accessor set for
//!   linkage environments where the stable symbols are unavailable
//!
//! A consuming build links exactly one set per artifact; there is no
//! runtime dispatch between them and no shared mutable state beyond the
//! GC memory-accounting counter.
//!
//! The shim owns nothing: every [`Value`] stays owned by the host, and
//! every pointer handed out is valid only for as long as the host leaves
//! the underlying object alone.

#![cfg_attr(not(feature = "std"), no_std)]

pub mod abi;
pub mod exports;
pub mod fallback;
pub mod gc;
pub mod layout;
pub mod stable;
pub mod value;

pub use abi::{get_default, Definition, HostAbi, HOST_VERSION};
pub use value::{SymId, Value, ValueKind};
