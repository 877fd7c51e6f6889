//! Direct macro-forwarding exports.
//!
//! One linkable `vo_macros_*` symbol per host macro. Each forwards into
//! the canonical implementation and inherits its behavior, including the
//! kind checks the container accessors run before touching storage; a
//! precondition violation aborts there instead of proceeding into
//! undefined behavior. Callers must still satisfy every precondition the
//! original macro silently assumes.

use crate::abi::{get_default, HostAbi};
use crate::value::{SymId, Value, ValueKind};

/// # Safety
/// May dereference the object header of a non-immediate `obj`.
#[no_mangle]
pub unsafe extern "C" fn vo_macros_kind_p(obj: Value, kind: ValueKind) -> bool {
    get_default().kind_p(obj, kind)
}

/// # Safety
/// May dereference the object header of a non-immediate `obj`.
#[no_mangle]
pub unsafe extern "C" fn vo_macros_integer_p(obj: Value) -> bool {
    get_default().integer_type_p(obj)
}

/// # Safety
/// May dereference the object header of a non-immediate `obj`.
#[no_mangle]
pub unsafe extern "C" fn vo_macros_float_p(obj: Value) -> bool {
    get_default().float_type_p(obj)
}

/// # Safety
/// May dereference the object header of a non-immediate `obj`.
#[no_mangle]
pub unsafe extern "C" fn vo_macros_symbol_p(obj: Value) -> bool {
    get_default().symbol_p(obj)
}

#[no_mangle]
pub extern "C" fn vo_macros_nil_p(obj: Value) -> bool {
    get_default().nil_p(obj)
}

#[no_mangle]
pub extern "C" fn vo_macros_truthy(obj: Value) -> bool {
    get_default().truthy(obj)
}

#[no_mangle]
pub extern "C" fn vo_macros_sym_from_id(id: SymId) -> Value {
    get_default().sym_from_id(id)
}

/// # Safety
/// `obj` must be a valid handle; aborts on a non-symbol.
#[no_mangle]
pub unsafe extern "C" fn vo_macros_sym_to_id(obj: Value) -> SymId {
    get_default().sym_to_id(obj)
}

/// # Safety
/// `obj` must be a valid string handle.
#[no_mangle]
pub unsafe extern "C" fn vo_macros_string_len(obj: Value) -> i64 {
    get_default().string_len(obj)
}

/// # Safety
/// `obj` must be a valid string handle.
#[no_mangle]
pub unsafe extern "C" fn vo_macros_string_ptr(obj: Value) -> *const u8 {
    get_default().string_ptr(obj)
}

/// # Safety
/// `obj` must be a valid array handle.
#[no_mangle]
pub unsafe extern "C" fn vo_macros_array_len(obj: Value) -> i64 {
    get_default().array_len(obj)
}

/// # Safety
/// `obj` must be a valid array handle.
#[no_mangle]
pub unsafe extern "C" fn vo_macros_array_ptr(obj: Value) -> *const Value {
    get_default().array_ptr(obj)
}
