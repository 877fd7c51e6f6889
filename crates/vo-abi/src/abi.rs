//! Canonical stable-ABI operation surface.
//!
//! One trait method per host macro/inline helper. The three linkage
//! layers ([`crate::exports`], [`crate::stable`], [`crate::fallback`])
//! are thin forwarders into this trait, so their behavior cannot drift
//! apart. Host-version differences are resolved once at build time via
//! cfg flags emitted by the build script, never by a runtime branch.
//!
//! ### Goals
//!
//! 1. Give callers access to host internals that are not exported by the
//!    host library itself (macros and inline functions).
//! 2. Keep the symbol surface linkable and stable across host versions,
//!    even where the underlying helper is not.

use core::ffi::c_void;

use crate::layout::DataTypeDesc;
use crate::value::{SymId, Value, ValueKind};

#[cfg(feature = "std")]
use std::time::Duration;

include!(concat!(env!("OUT_DIR"), "/host_version.rs"));

/// The canonical operation set. Every method forwards exactly what the
/// corresponding host macro would evaluate to; callers must satisfy
/// every precondition the macro silently assumes.
pub trait HostAbi {
    /// Host API version this definition targets.
    fn version(&self) -> (u32, u32) {
        HOST_VERSION
    }

    /// Tests if the value is encoded entirely in its handle.
    fn immediate_p(&self, obj: Value) -> bool;

    /// Tests if the value is an immediate or a falsy singleton - i.e.
    /// anything that is not a heap pointer.
    fn special_const_p(&self, obj: Value) -> bool;

    /// Checks if the given value is nil.
    fn nil_p(&self, obj: Value) -> bool;

    /// Emulates the host's "if" statement: false only for nil and false.
    fn truthy(&self, obj: Value) -> bool;

    fn fixnum_p(&self, obj: Value) -> bool;

    fn flonum_p(&self, obj: Value) -> bool;

    fn static_sym_p(&self, obj: Value) -> bool;

    /// Checks if the given object is a heap-allocated symbol.
    ///
    /// # Safety
    /// May dereference the object header of a non-immediate `obj`.
    unsafe fn dynamic_sym_p(&self, obj: Value) -> bool;

    /// Checks if the given object is a symbol of either flavor.
    ///
    /// # Safety
    /// May dereference the object header of a non-immediate `obj`.
    unsafe fn symbol_p(&self, obj: Value) -> bool;

    /// Checks if the given object is a float of either flavor.
    ///
    /// # Safety
    /// May dereference the object header of a non-immediate `obj`.
    unsafe fn float_type_p(&self, obj: Value) -> bool;

    /// Checks if the given object is a fixnum or a big integer.
    ///
    /// # Safety
    /// May dereference the object header of a non-immediate `obj`.
    unsafe fn integer_type_p(&self, obj: Value) -> bool;

    /// Queries the kind tag of a heap object.
    ///
    /// # Safety
    /// `obj` must not be a special constant; its header is dereferenced.
    unsafe fn builtin_kind(&self, obj: Value) -> ValueKind;

    /// Tests the object's kind against `kind`, accepting any value.
    ///
    /// # Safety
    /// May dereference the object header of a non-immediate `obj`.
    unsafe fn kind_p(&self, obj: Value, kind: ValueKind) -> bool;

    /// Queries the kind of any value, special constants included.
    ///
    /// # Safety
    /// May dereference the object header of a non-immediate `obj`.
    unsafe fn kind_of(&self, obj: Value) -> ValueKind;

    /// Length in bytes of a host string.
    ///
    /// # Safety
    /// `obj` must be a valid string handle; its storage is dereferenced.
    unsafe fn string_len(&self, obj: Value) -> i64;

    /// Pointer to the byte contents of a host string. Valid only until
    /// the host mutates, moves or collects the string.
    ///
    /// # Safety
    /// `obj` must be a valid string handle; its storage is dereferenced.
    unsafe fn string_ptr(&self, obj: Value) -> *const u8;

    /// Checks if a host string is interned. Hard type check: aborts via
    /// the host's type-check mechanism on a non-string handle.
    ///
    /// # Safety
    /// `obj` must be a valid handle; its header is dereferenced.
    unsafe fn string_interned_p(&self, obj: Value) -> bool;

    /// Encoding index of a host string; 0 for special constants.
    /// Version-gated: hosts without the convenience accessor derive the
    /// index by masking the header flag word, bit-identically.
    ///
    /// # Safety
    /// Non-immediate `obj` must be a valid handle; its header is read.
    unsafe fn string_encoding(&self, obj: Value) -> u32;

    /// Number of elements in a host array.
    ///
    /// # Safety
    /// `obj` must be a valid array handle; its storage is dereferenced.
    unsafe fn array_len(&self, obj: Value) -> i64;

    /// Pointer to the element storage of a host array. Valid only until
    /// the host mutates, moves or collects the array.
    ///
    /// # Safety
    /// `obj` must be a valid array handle; its storage is dereferenced.
    unsafe fn array_ptr(&self, obj: Value) -> *const Value;

    /// Checks if the given object is frozen. Special constants are
    /// always frozen.
    ///
    /// # Safety
    /// May dereference the object header of a non-immediate `obj`.
    unsafe fn frozen_p(&self, obj: Value) -> bool;

    /// Class handle of a heap object.
    ///
    /// # Safety
    /// `obj` must be a valid non-immediate handle.
    unsafe fn obj_class(&self, obj: Value) -> Value;

    /// Sign test for a big integer.
    ///
    /// # Safety
    /// `obj` must be a valid big-integer handle.
    unsafe fn bigint_positive_p(&self, obj: Value) -> bool;

    /// # Safety
    /// `obj` must be a valid big-integer handle.
    #[inline]
    unsafe fn bigint_negative_p(&self, obj: Value) -> bool {
        !self.bigint_positive_p(obj)
    }

    /// Checks if the given data object carries a typed-data descriptor.
    /// Always false on hosts without typed data.
    ///
    /// # Safety
    /// On capable hosts `obj` must be a valid data-object handle.
    unsafe fn typeddata_p(&self, obj: Value) -> bool;

    /// Checks if a typed-data payload is embedded inline rather than
    /// heap-indirected. Always false on hosts without typed data.
    ///
    /// # Safety
    /// On capable hosts `obj` must be a valid typed-data handle.
    unsafe fn typeddata_embedded_p(&self, obj: Value) -> bool;

    /// Type descriptor of a typed-data object. Null on hosts without
    /// typed data.
    ///
    /// # Safety
    /// On capable hosts `obj` must be a valid typed-data handle.
    unsafe fn typeddata_desc(&self, obj: Value) -> *const DataTypeDesc;

    /// Payload pointer of a typed-data object. Null on hosts without
    /// typed data.
    ///
    /// # Safety
    /// On capable hosts `obj` must be a valid typed-data handle.
    unsafe fn typeddata_get_data(&self, obj: Value) -> *mut c_void;

    /// Pack an integer into a fixnum handle. Precondition: `fixable`.
    fn fixnum_from_int(&self, v: i64) -> Value;

    /// Unpack a fixnum handle. Precondition: `fixnum_p`.
    fn int_from_fixnum(&self, obj: Value) -> i64;

    /// True when the integer survives a fixnum round-trip.
    fn fixable(&self, v: i64) -> bool;

    /// Pack a symbol id into a static-symbol handle.
    fn sym_from_id(&self, id: SymId) -> Value;

    /// Extract the id of a symbol of either flavor. Hard type check:
    /// aborts via the host's type-check mechanism on a non-symbol.
    ///
    /// # Safety
    /// `obj` must be a valid handle; dynamic symbols are dereferenced.
    unsafe fn sym_to_id(&self, obj: Value) -> SymId;

    /// Record that a reference to `young` was stored into `old`. Must be
    /// called exactly when such a store genuinely happened.
    ///
    /// # Safety
    /// `old` must be a valid heap object handle.
    unsafe fn gc_writebarrier(&self, old: Value, young: Value);

    /// Opt `obj` out of the incremental write barrier.
    ///
    /// # Safety
    /// `obj` must be a valid heap object handle or a special constant.
    unsafe fn gc_writebarrier_unprotect(&self, obj: Value);

    /// Report a signed off-heap allocation delta to the host's memory
    /// accounting. Must reflect a genuine allocation event.
    fn gc_adjust_memory_usage(&self, diff: i64);

    /// Store `young` into `slot` of `old` and run the write barrier.
    /// Returns `old`.
    ///
    /// # Safety
    /// `old` must be a valid heap object handle and `slot` a valid
    /// pointer to a value slot inside it.
    unsafe fn obj_write(&self, old: Value, slot: *mut Value, young: Value) -> Value;

    /// Run the write barrier for a store that already happened.
    /// Returns `old`.
    ///
    /// # Safety
    /// `old` must be a valid heap object handle.
    unsafe fn obj_written(&self, old: Value, oldv: Value, young: Value) -> Value;

    /// Block the calling thread for `duration` by delegating to the
    /// host's blocking-wait primitive, so a cooperative scheduler is
    /// correctly informed. Runs to completion; no cancellation.
    #[cfg(feature = "std")]
    fn thread_sleep(&self, duration: Duration);
}

mod imp;

pub use imp::Definition;

/// The ABI definition selected for the configured host version.
#[inline(always)]
pub const fn get_default() -> &'static Definition {
    const API: Definition = Definition;
    &API
}

impl core::fmt::Debug for Definition {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("HostAbiDefinition")
            .field("HOST_VERSION", &HOST_VERSION)
            .finish()
    }
}
