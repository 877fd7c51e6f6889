//! The single canonical implementation of [`HostAbi`].
//!
//! Pure bit inspection lives in [`crate::value`]; everything touching a
//! heap object goes through the vendored layouts in [`crate::layout`].
//! Version-gated bodies are selected by the cfg flags the build script
//! emits (`abi_has_typed_data`, `abi_has_enc_accessor`).

use core::ffi::c_void;

use super::HostAbi;
use crate::layout::{self, DataTypeDesc, ObjHeader, RawArray, RawString, RawSymbol};
#[cfg(abi_has_typed_data)]
use crate::layout::RawTypedData;
use crate::value::{self, SymId, Value, ValueKind, VAL_FALSE, VAL_NIL, VAL_TRUE, VAL_UNDEF};
use crate::gc;

#[cfg(feature = "std")]
use std::time::Duration;

pub struct Definition;

/// The host's type-check mechanism: mismatches abort, they do not
/// degrade into a return code.
#[inline]
unsafe fn check_kind(api: &Definition, obj: Value, expected: ValueKind) {
    let actual = api.kind_of(obj);
    if actual != expected {
        panic!("host type check failed: expected {expected:?}, got {actual:?}");
    }
}

impl HostAbi for Definition {
    #[inline]
    fn immediate_p(&self, obj: Value) -> bool {
        value::immediate_p(obj)
    }

    #[inline]
    fn special_const_p(&self, obj: Value) -> bool {
        value::special_const_p(obj)
    }

    #[inline]
    fn nil_p(&self, obj: Value) -> bool {
        value::nil_p(obj)
    }

    #[inline]
    fn truthy(&self, obj: Value) -> bool {
        value::truthy(obj)
    }

    #[inline]
    fn fixnum_p(&self, obj: Value) -> bool {
        value::fixnum_p(obj)
    }

    #[inline]
    fn flonum_p(&self, obj: Value) -> bool {
        value::flonum_p(obj)
    }

    #[inline]
    fn static_sym_p(&self, obj: Value) -> bool {
        value::static_sym_p(obj)
    }

    #[inline]
    unsafe fn dynamic_sym_p(&self, obj: Value) -> bool {
        if self.special_const_p(obj) {
            false
        } else {
            self.builtin_kind(obj) == ValueKind::Symbol
        }
    }

    #[inline]
    unsafe fn symbol_p(&self, obj: Value) -> bool {
        self.static_sym_p(obj) || self.dynamic_sym_p(obj)
    }

    #[inline]
    unsafe fn float_type_p(&self, obj: Value) -> bool {
        if self.flonum_p(obj) {
            true
        } else if self.special_const_p(obj) {
            false
        } else {
            self.builtin_kind(obj) == ValueKind::Float
        }
    }

    #[inline]
    unsafe fn integer_type_p(&self, obj: Value) -> bool {
        if self.fixnum_p(obj) {
            true
        } else if self.special_const_p(obj) {
            false
        } else {
            self.builtin_kind(obj) == ValueKind::BigInt
        }
    }

    #[inline]
    unsafe fn builtin_kind(&self, obj: Value) -> ValueKind {
        let header = &*(obj as *const ObjHeader);
        header.kind()
    }

    #[inline]
    unsafe fn kind_p(&self, obj: Value, kind: ValueKind) -> bool {
        match kind {
            ValueKind::True => obj == VAL_TRUE,
            ValueKind::False => obj == VAL_FALSE,
            ValueKind::Nil => obj == VAL_NIL,
            ValueKind::Fixnum => self.fixnum_p(obj),
            ValueKind::Flonum => self.flonum_p(obj),
            ValueKind::Symbol => self.symbol_p(obj),
            ValueKind::Float => self.float_type_p(obj),
            _ if self.special_const_p(obj) => false,
            _ => self.builtin_kind(obj) == kind,
        }
    }

    #[inline]
    unsafe fn kind_of(&self, obj: Value) -> ValueKind {
        if !self.special_const_p(obj) {
            return self.builtin_kind(obj);
        }
        match obj {
            VAL_FALSE => ValueKind::False,
            VAL_NIL => ValueKind::Nil,
            VAL_TRUE => ValueKind::True,
            VAL_UNDEF => ValueKind::None,
            _ if self.fixnum_p(obj) => ValueKind::Fixnum,
            _ if self.static_sym_p(obj) => ValueKind::Symbol,
            _ => {
                debug_assert!(self.flonum_p(obj));
                ValueKind::Flonum
            }
        }
    }

    #[inline]
    unsafe fn string_len(&self, obj: Value) -> i64 {
        assert!(self.kind_p(obj, ValueKind::String));

        let rstring = &*(obj as *const RawString);
        rstring.len
    }

    #[inline]
    unsafe fn string_ptr(&self, obj: Value) -> *const u8 {
        assert!(self.kind_p(obj, ValueKind::String));

        let rstring = &*(obj as *const RawString);
        let is_heap = rstring.header.flags & layout::STR_NOEMBED != 0;
        let ptr = if is_heap {
            rstring.storage.heap.ptr as *const u8
        } else {
            core::ptr::addr_of!(rstring.storage.embed.ary) as *const u8
        };

        assert!(!ptr.is_null());
        ptr
    }

    #[inline]
    unsafe fn string_interned_p(&self, obj: Value) -> bool {
        check_kind(self, obj, ValueKind::String);

        let rstring = &*(obj as *const RawString);
        rstring.header.flags & layout::STR_INTERNED != 0
    }

    #[inline]
    unsafe fn string_encoding(&self, obj: Value) -> u32 {
        if self.special_const_p(obj) {
            return 0;
        }
        let header = &*(obj as *const ObjHeader);

        #[cfg(abi_has_enc_accessor)]
        let index = header.encoding_index();
        #[cfg(not(abi_has_enc_accessor))]
        let index = layout::encoding_from_flags(header.flags);

        index
    }

    #[inline]
    unsafe fn array_len(&self, obj: Value) -> i64 {
        assert!(self.kind_p(obj, ValueKind::Array));

        let rarray = &*(obj as *const RawArray);
        let flags = rarray.header.flags;
        if flags & layout::ARY_EMBED != 0 {
            ((flags & layout::ARY_EMBED_LEN_MASK) >> layout::ARY_EMBED_LEN_SHIFT) as i64
        } else {
            rarray.storage.heap.len
        }
    }

    #[inline]
    unsafe fn array_ptr(&self, obj: Value) -> *const Value {
        assert!(self.kind_p(obj, ValueKind::Array));

        let rarray = &*(obj as *const RawArray);
        let ptr = if rarray.header.flags & layout::ARY_EMBED != 0 {
            core::ptr::addr_of!(rarray.storage.embed.ary) as *const Value
        } else {
            rarray.storage.heap.ptr
        };

        assert!(!ptr.is_null());
        ptr
    }

    #[inline]
    unsafe fn frozen_p(&self, obj: Value) -> bool {
        if self.special_const_p(obj) {
            true
        } else {
            let header = &*(obj as *const ObjHeader);
            header.flags & layout::FL_FREEZE != 0
        }
    }

    #[inline]
    unsafe fn obj_class(&self, obj: Value) -> Value {
        let header = &*(obj as *const ObjHeader);
        header.klass
    }

    #[inline]
    unsafe fn bigint_positive_p(&self, obj: Value) -> bool {
        let header = &*(obj as *const ObjHeader);
        header.flags & layout::BIG_POSITIVE != 0
    }

    #[cfg(abi_has_typed_data)]
    #[inline]
    unsafe fn typeddata_p(&self, obj: Value) -> bool {
        debug_assert!(self.kind_p(obj, ValueKind::Data));

        let rdata = &*(obj as *const RawTypedData);
        rdata.typed_flag != 0 && rdata.typed_flag <= 3
    }

    #[cfg(not(abi_has_typed_data))]
    #[inline]
    unsafe fn typeddata_p(&self, _obj: Value) -> bool {
        false
    }

    #[cfg(abi_has_typed_data)]
    #[inline]
    unsafe fn typeddata_embedded_p(&self, obj: Value) -> bool {
        debug_assert!(self.kind_p(obj, ValueKind::Data));

        let rdata = &*(obj as *const RawTypedData);
        rdata.typed_flag & layout::TYPED_DATA_EMBEDDED != 0
    }

    #[cfg(not(abi_has_typed_data))]
    #[inline]
    unsafe fn typeddata_embedded_p(&self, _obj: Value) -> bool {
        false
    }

    #[cfg(abi_has_typed_data)]
    #[inline]
    unsafe fn typeddata_desc(&self, obj: Value) -> *const DataTypeDesc {
        debug_assert!(self.kind_p(obj, ValueKind::Data));

        let rdata = &*(obj as *const RawTypedData);
        rdata.desc
    }

    #[cfg(not(abi_has_typed_data))]
    #[inline]
    unsafe fn typeddata_desc(&self, _obj: Value) -> *const DataTypeDesc {
        core::ptr::null()
    }

    #[cfg(abi_has_typed_data)]
    #[inline]
    unsafe fn typeddata_get_data(&self, obj: Value) -> *mut c_void {
        debug_assert!(self.kind_p(obj, ValueKind::Data));

        let rdata = &*(obj as *const RawTypedData);
        if rdata.typed_flag & layout::TYPED_DATA_EMBEDDED != 0 {
            (obj as *mut u8).add(layout::EMBEDDED_DATA_OFFSET) as *mut c_void
        } else {
            rdata.data
        }
    }

    #[cfg(not(abi_has_typed_data))]
    #[inline]
    unsafe fn typeddata_get_data(&self, _obj: Value) -> *mut c_void {
        core::ptr::null_mut()
    }

    #[inline]
    fn fixnum_from_int(&self, v: i64) -> Value {
        value::fixnum_from_int(v)
    }

    #[inline]
    fn int_from_fixnum(&self, obj: Value) -> i64 {
        value::int_from_fixnum(obj)
    }

    #[inline]
    fn fixable(&self, v: i64) -> bool {
        value::fixable(v)
    }

    #[inline]
    fn sym_from_id(&self, id: SymId) -> Value {
        value::sym_from_id(id)
    }

    #[inline]
    unsafe fn sym_to_id(&self, obj: Value) -> SymId {
        if self.static_sym_p(obj) {
            return value::static_sym_id(obj);
        }
        check_kind(self, obj, ValueKind::Symbol);

        let rsymbol = &*(obj as *const RawSymbol);
        rsymbol.id
    }

    #[inline]
    unsafe fn gc_writebarrier(&self, old: Value, young: Value) {
        gc::writebarrier(old, young)
    }

    #[inline]
    unsafe fn gc_writebarrier_unprotect(&self, obj: Value) {
        gc::writebarrier_unprotect(obj)
    }

    #[inline]
    fn gc_adjust_memory_usage(&self, diff: i64) {
        gc::adjust_memory_usage(diff)
    }

    #[inline]
    unsafe fn obj_write(&self, old: Value, slot: *mut Value, young: Value) -> Value {
        *slot = young;
        gc::writebarrier(old, young);
        old
    }

    #[inline]
    unsafe fn obj_written(&self, old: Value, _oldv: Value, young: Value) -> Value {
        gc::writebarrier(old, young);
        old
    }

    #[cfg(feature = "std")]
    #[inline]
    fn thread_sleep(&self, duration: Duration) {
        // The host's blocking-wait primitive bottoms out in the OS
        // sleep; routing through it keeps the host scheduler informed.
        std::thread::sleep(duration);
    }
}
