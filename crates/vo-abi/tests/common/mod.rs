//! Fixtures that build layout-accurate host objects on the Rust heap, so
//! accessor behavior can be exercised without a live host process. Each
//! fixture owns its allocation and reclaims it on drop; the `Value`
//! handed out is the object's address, exactly as the host would hand it
//! out.

#![allow(dead_code)]

use vo_abi::layout::{
    ArrayEmbed, ArrayHeap, ArrayStorage, ObjHeader, RawArray, RawString, RawSymbol, StringEmbed,
    StringHeap, StringStorage, ARY_EMBED, ARY_EMBED_CAP, ARY_EMBED_LEN_SHIFT, BIG_POSITIVE,
    ENC_SHIFT, STR_EMBED_CAP, STR_INTERNED, STR_NOEMBED,
};
use vo_abi::value::{SymId, Value, ValueKind};

/// A boxed host object with a stable address.
pub struct HostObject<T> {
    ptr: *mut T,
}

impl<T> HostObject<T> {
    pub fn new(obj: T) -> Self {
        Self {
            ptr: Box::into_raw(Box::new(obj)),
        }
    }

    pub fn value(&self) -> Value {
        self.ptr as Value
    }

    pub fn ptr(&self) -> *mut T {
        self.ptr
    }
}

impl<T> Drop for HostObject<T> {
    fn drop(&mut self) {
        unsafe { drop(Box::from_raw(self.ptr)) };
    }
}

/// A heap-storage object plus the buffer backing its out-of-line data.
pub struct HeapBacked<T, B> {
    pub obj: HostObject<T>,
    _buf: B,
}

impl<T, B> HeapBacked<T, B> {
    pub fn value(&self) -> Value {
        self.obj.value()
    }
}

fn string_header(extra: u64) -> ObjHeader {
    ObjHeader {
        flags: ValueKind::String as u64 | extra,
        klass: 0,
    }
}

pub fn embedded_string(bytes: &[u8]) -> HostObject<RawString> {
    embedded_string_with(bytes, 0)
}

pub fn embedded_string_with(bytes: &[u8], extra_flags: u64) -> HostObject<RawString> {
    assert!(bytes.len() <= STR_EMBED_CAP);
    let mut ary = [0u8; STR_EMBED_CAP];
    ary[..bytes.len()].copy_from_slice(bytes);
    HostObject::new(RawString {
        header: string_header(extra_flags),
        len: bytes.len() as i64,
        storage: StringStorage {
            embed: StringEmbed { ary },
        },
    })
}

pub fn heap_string(bytes: &[u8]) -> HeapBacked<RawString, Vec<u8>> {
    let mut buf = bytes.to_vec();
    let obj = HostObject::new(RawString {
        header: string_header(STR_NOEMBED),
        len: bytes.len() as i64,
        storage: StringStorage {
            heap: StringHeap {
                ptr: buf.as_mut_ptr(),
                capa: buf.capacity() as i64,
            },
        },
    });
    HeapBacked { obj, _buf: buf }
}

pub fn interned_string(bytes: &[u8]) -> HostObject<RawString> {
    embedded_string_with(bytes, STR_INTERNED)
}

pub fn encoded_string(bytes: &[u8], enc: u32) -> HostObject<RawString> {
    embedded_string_with(bytes, (enc as u64) << ENC_SHIFT)
}

pub fn embedded_array(values: &[Value]) -> HostObject<RawArray> {
    assert!(values.len() <= ARY_EMBED_CAP);
    let mut ary = [0 as Value; ARY_EMBED_CAP];
    ary[..values.len()].copy_from_slice(values);
    HostObject::new(RawArray {
        header: ObjHeader {
            flags: ValueKind::Array as u64
                | ARY_EMBED
                | ((values.len() as u64) << ARY_EMBED_LEN_SHIFT),
            klass: 0,
        },
        storage: ArrayStorage {
            embed: ArrayEmbed { ary },
        },
    })
}

pub fn heap_array(values: &[Value]) -> HeapBacked<RawArray, Vec<Value>> {
    let buf = values.to_vec();
    let obj = HostObject::new(RawArray {
        header: ObjHeader {
            flags: ValueKind::Array as u64,
            klass: 0,
        },
        storage: ArrayStorage {
            heap: ArrayHeap {
                len: buf.len() as i64,
                capa: buf.capacity() as i64,
                ptr: buf.as_ptr(),
            },
        },
    });
    HeapBacked { obj, _buf: buf }
}

pub fn bigint(positive: bool) -> HostObject<ObjHeader> {
    let sign = if positive { BIG_POSITIVE } else { 0 };
    HostObject::new(ObjHeader {
        flags: ValueKind::BigInt as u64 | sign,
        klass: 0,
    })
}

pub fn dynamic_symbol(id: SymId) -> HostObject<RawSymbol> {
    HostObject::new(RawSymbol {
        header: ObjHeader {
            flags: ValueKind::Symbol as u64,
            klass: 0,
        },
        id,
    })
}

/// A bare heap object: header only, arbitrary kind and flags.
pub fn heap_object(kind: ValueKind, extra_flags: u64, klass: Value) -> HostObject<ObjHeader> {
    HostObject::new(ObjHeader {
        flags: kind as u64 | extra_flags,
        klass,
    })
}

#[cfg(abi_has_typed_data)]
pub mod typed {
    use core::ffi::{c_char, c_void};

    use vo_abi::layout::{DataTypeDesc, ObjHeader, RawTypedData, TYPED_DATA, TYPED_DATA_EMBEDDED};
    use vo_abi::value::ValueKind;

    use super::HostObject;

    pub fn desc(name: &'static [u8]) -> HostObject<DataTypeDesc> {
        assert_eq!(name.last(), Some(&0));
        HostObject::new(DataTypeDesc {
            name: name.as_ptr() as *const c_char,
            dmark: None,
            dfree: None,
            dsize: None,
            flags: 0,
        })
    }

    pub fn heap_typed_data(
        desc: *const DataTypeDesc,
        data: *mut c_void,
    ) -> HostObject<RawTypedData> {
        HostObject::new(RawTypedData {
            header: ObjHeader {
                flags: ValueKind::Data as u64,
                klass: 0,
            },
            desc,
            typed_flag: TYPED_DATA,
            data,
        })
    }

    /// Embedded form: the payload is tail-allocated where the data
    /// pointer would otherwise live.
    #[repr(C)]
    pub struct EmbeddedTypedData {
        pub header: ObjHeader,
        pub desc: *const DataTypeDesc,
        pub typed_flag: u64,
        pub payload: u64,
    }

    pub fn embedded_typed_data(
        desc: *const DataTypeDesc,
        payload: u64,
    ) -> HostObject<EmbeddedTypedData> {
        HostObject::new(EmbeddedTypedData {
            header: ObjHeader {
                flags: ValueKind::Data as u64,
                klass: 0,
            },
            desc,
            typed_flag: TYPED_DATA | TYPED_DATA_EMBEDDED,
            payload,
        })
    }
}
