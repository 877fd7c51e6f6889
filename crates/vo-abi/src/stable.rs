//! Stable-ABI exports.
//!
//! The full operation surface under `vo_stable_*` names. This symbol set
//! is guaranteed linkable and stable across host versions, even where
//! the underlying host helper is not: version differences are absorbed
//! by the canonical implementation at build time.

use core::ffi::c_void;

use crate::abi::{get_default, HostAbi};
use crate::layout::DataTypeDesc;
use crate::value::{SymId, Value, ValueKind};

#[no_mangle]
pub extern "C" fn vo_stable_abi_version(major: *mut u32, minor: *mut u32) {
    let (maj, min) = get_default().version();
    if !major.is_null() {
        unsafe { *major = maj };
    }
    if !minor.is_null() {
        unsafe { *minor = min };
    }
}

#[no_mangle]
pub extern "C" fn vo_stable_immediate_p(obj: Value) -> bool {
    get_default().immediate_p(obj)
}

#[no_mangle]
pub extern "C" fn vo_stable_special_const_p(obj: Value) -> bool {
    get_default().special_const_p(obj)
}

#[no_mangle]
pub extern "C" fn vo_stable_nil_p(obj: Value) -> bool {
    get_default().nil_p(obj)
}

#[no_mangle]
pub extern "C" fn vo_stable_truthy(obj: Value) -> bool {
    get_default().truthy(obj)
}

#[no_mangle]
pub extern "C" fn vo_stable_fixnum_p(obj: Value) -> bool {
    get_default().fixnum_p(obj)
}

#[no_mangle]
pub extern "C" fn vo_stable_flonum_p(obj: Value) -> bool {
    get_default().flonum_p(obj)
}

#[no_mangle]
pub extern "C" fn vo_stable_static_sym_p(obj: Value) -> bool {
    get_default().static_sym_p(obj)
}

/// # Safety
/// May dereference the object header of a non-immediate `obj`.
#[no_mangle]
pub unsafe extern "C" fn vo_stable_dynamic_sym_p(obj: Value) -> bool {
    get_default().dynamic_sym_p(obj)
}

/// # Safety
/// May dereference the object header of a non-immediate `obj`.
#[no_mangle]
pub unsafe extern "C" fn vo_stable_symbol_p(obj: Value) -> bool {
    get_default().symbol_p(obj)
}

/// # Safety
/// May dereference the object header of a non-immediate `obj`.
#[no_mangle]
pub unsafe extern "C" fn vo_stable_float_type_p(obj: Value) -> bool {
    get_default().float_type_p(obj)
}

/// # Safety
/// May dereference the object header of a non-immediate `obj`.
#[no_mangle]
pub unsafe extern "C" fn vo_stable_integer_type_p(obj: Value) -> bool {
    get_default().integer_type_p(obj)
}

/// # Safety
/// `obj` must not be a special constant.
#[no_mangle]
pub unsafe extern "C" fn vo_stable_builtin_kind(obj: Value) -> ValueKind {
    get_default().builtin_kind(obj)
}

/// # Safety
/// May dereference the object header of a non-immediate `obj`.
#[no_mangle]
pub unsafe extern "C" fn vo_stable_kind_p(obj: Value, kind: ValueKind) -> bool {
    get_default().kind_p(obj, kind)
}

/// # Safety
/// May dereference the object header of a non-immediate `obj`.
#[no_mangle]
pub unsafe extern "C" fn vo_stable_kind_of(obj: Value) -> ValueKind {
    get_default().kind_of(obj)
}

/// # Safety
/// `obj` must be a valid string handle.
#[no_mangle]
pub unsafe extern "C" fn vo_stable_string_len(obj: Value) -> i64 {
    get_default().string_len(obj)
}

/// # Safety
/// `obj` must be a valid string handle.
#[no_mangle]
pub unsafe extern "C" fn vo_stable_string_ptr(obj: Value) -> *const u8 {
    get_default().string_ptr(obj)
}

/// # Safety
/// `obj` must be a valid handle; aborts on a non-string.
#[no_mangle]
pub unsafe extern "C" fn vo_stable_string_interned_p(obj: Value) -> bool {
    get_default().string_interned_p(obj)
}

/// # Safety
/// Non-immediate `obj` must be a valid handle.
#[no_mangle]
pub unsafe extern "C" fn vo_stable_string_encoding(obj: Value) -> u32 {
    get_default().string_encoding(obj)
}

/// # Safety
/// `obj` must be a valid array handle.
#[no_mangle]
pub unsafe extern "C" fn vo_stable_array_len(obj: Value) -> i64 {
    get_default().array_len(obj)
}

/// # Safety
/// `obj` must be a valid array handle.
#[no_mangle]
pub unsafe extern "C" fn vo_stable_array_ptr(obj: Value) -> *const Value {
    get_default().array_ptr(obj)
}

/// # Safety
/// May dereference the object header of a non-immediate `obj`.
#[no_mangle]
pub unsafe extern "C" fn vo_stable_frozen_p(obj: Value) -> bool {
    get_default().frozen_p(obj)
}

/// # Safety
/// `obj` must be a valid non-immediate handle.
#[no_mangle]
pub unsafe extern "C" fn vo_stable_obj_class(obj: Value) -> Value {
    get_default().obj_class(obj)
}

/// # Safety
/// `obj` must be a valid big-integer handle.
#[no_mangle]
pub unsafe extern "C" fn vo_stable_bigint_positive_p(obj: Value) -> bool {
    get_default().bigint_positive_p(obj)
}

/// # Safety
/// `obj` must be a valid big-integer handle.
#[no_mangle]
pub unsafe extern "C" fn vo_stable_bigint_negative_p(obj: Value) -> bool {
    get_default().bigint_negative_p(obj)
}

/// # Safety
/// On capable hosts `obj` must be a valid data-object handle.
#[no_mangle]
pub unsafe extern "C" fn vo_stable_typeddata_p(obj: Value) -> bool {
    get_default().typeddata_p(obj)
}

/// # Safety
/// On capable hosts `obj` must be a valid typed-data handle.
#[no_mangle]
pub unsafe extern "C" fn vo_stable_typeddata_embedded_p(obj: Value) -> bool {
    get_default().typeddata_embedded_p(obj)
}

/// # Safety
/// On capable hosts `obj` must be a valid typed-data handle.
#[no_mangle]
pub unsafe extern "C" fn vo_stable_typeddata_desc(obj: Value) -> *const DataTypeDesc {
    get_default().typeddata_desc(obj)
}

/// # Safety
/// On capable hosts `obj` must be a valid typed-data handle.
#[no_mangle]
pub unsafe extern "C" fn vo_stable_typeddata_get_data(obj: Value) -> *mut c_void {
    get_default().typeddata_get_data(obj)
}

#[no_mangle]
pub extern "C" fn vo_stable_fixnum_from_int(v: i64) -> Value {
    get_default().fixnum_from_int(v)
}

#[no_mangle]
pub extern "C" fn vo_stable_int_from_fixnum(obj: Value) -> i64 {
    get_default().int_from_fixnum(obj)
}

#[no_mangle]
pub extern "C" fn vo_stable_fixable(v: i64) -> bool {
    get_default().fixable(v)
}

#[no_mangle]
pub extern "C" fn vo_stable_sym_from_id(id: SymId) -> Value {
    get_default().sym_from_id(id)
}

/// # Safety
/// `obj` must be a valid handle; aborts on a non-symbol.
#[no_mangle]
pub unsafe extern "C" fn vo_stable_sym_to_id(obj: Value) -> SymId {
    get_default().sym_to_id(obj)
}

/// # Safety
/// `old` must be a valid heap object handle.
#[no_mangle]
pub unsafe extern "C" fn vo_stable_gc_writebarrier(old: Value, young: Value) {
    get_default().gc_writebarrier(old, young)
}

/// # Safety
/// `obj` must be a valid heap object handle or a special constant.
#[no_mangle]
pub unsafe extern "C" fn vo_stable_gc_writebarrier_unprotect(obj: Value) {
    get_default().gc_writebarrier_unprotect(obj)
}

#[no_mangle]
pub extern "C" fn vo_stable_gc_adjust_memory_usage(diff: i64) {
    get_default().gc_adjust_memory_usage(diff)
}

/// # Safety
/// `old` must be a valid heap object handle and `slot` a valid pointer
/// to a value slot inside it.
#[no_mangle]
pub unsafe extern "C" fn vo_stable_obj_write(old: Value, slot: *mut Value, young: Value) -> Value {
    get_default().obj_write(old, slot, young)
}

/// # Safety
/// `old` must be a valid heap object handle.
#[no_mangle]
pub unsafe extern "C" fn vo_stable_obj_written(old: Value, oldv: Value, young: Value) -> Value {
    get_default().obj_written(old, oldv, young)
}

/// Blocks the calling thread for `micros` microseconds through the
/// host's blocking-wait primitive.
#[cfg(feature = "std")]
#[no_mangle]
pub extern "C" fn vo_stable_thread_sleep_us(micros: u64) {
    get_default().thread_sleep(core::time::Duration::from_micros(micros))
}
