//! Unlinkable-fallback exports.
//!
//! Re-publishes the minimal accessor set (string length/pointer, array
//! length/pointer) under `vo_abi_fallback_*` names, for build
//! configurations where the primary stable symbols cannot be linked
//! directly (cross-compilation, restricted linkage). Generated from a
//! one-line-per-symbol table; each entry forwards into the canonical
//! implementation with no extra validation and no extra side effects.

use crate::abi::HostAbi;
use crate::value::Value;

macro_rules! fallback_export {
    ($(($name:ident, $method:ident, $ret:ty);)*) => {
        $(
            /// # Safety
            /// Same contract as the stable-ABI symbol of the same
            /// operation.
            #[no_mangle]
            pub unsafe extern "C" fn $name(obj: Value) -> $ret {
                crate::abi::get_default().$method(obj)
            }
        )*
    };
}

fallback_export! {
    (vo_abi_fallback_string_len, string_len, i64);
    (vo_abi_fallback_string_ptr, string_ptr, *const u8);
    (vo_abi_fallback_array_len, array_len, i64);
    (vo_abi_fallback_array_ptr, array_ptr, *const Value);
}
