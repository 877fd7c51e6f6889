//! Vendored host heap-object layouts.
//!
//! These mirror the host runtime's object representation bit for bit and
//! are the contract this shim is built against. The shim only reads
//! through them (plus the two GC notification bits); the host owns every
//! object and governs the lifetime of every pointer handed out here.

use core::ffi::c_void;

use crate::value::{SymId, Value, ValueKind, KIND_MASK};

/// First bit of the per-kind user flag space.
pub const FL_USHIFT: u32 = 12;

/// Bit `n` of the per-kind user flag space.
pub const fn fl_user(n: u32) -> u64 {
    1 << (FL_USHIFT + n)
}

/// Object participates in the incremental write barrier.
pub const FL_WB_PROTECTED: u64 = 1 << 5;
/// Object holds a recorded old-to-young reference.
pub const FL_REMEMBERED: u64 = 1 << 6;
/// Object is frozen.
pub const FL_FREEZE: u64 = 1 << 11;

// String flags.
pub const STR_NOEMBED: u64 = fl_user(1);
pub const STR_INTERNED: u64 = fl_user(5);
/// Encoding index bits packed into the flag word.
pub const ENC_SHIFT: u32 = FL_USHIFT + 6;
pub const ENC_MASK: u64 = 0x7f << ENC_SHIFT;

// Array flags. Embedded arrays pack their length into the flag word.
pub const ARY_EMBED: u64 = fl_user(1);
pub const ARY_EMBED_LEN_SHIFT: u32 = FL_USHIFT + 3;
pub const ARY_EMBED_LEN_MASK: u64 = fl_user(3) | fl_user(4);

// Big-integer flags.
pub const BIG_POSITIVE: u64 = fl_user(1);

// Typed-data flags, kept in `RawTypedData::typed_flag` (not the header).
pub const TYPED_DATA: u64 = 1;
pub const TYPED_DATA_EMBEDDED: u64 = 2;

/// Bytes of string payload stored inline before spilling to the heap.
pub const STR_EMBED_CAP: usize = 24;
/// Elements stored inline in an embedded array.
pub const ARY_EMBED_CAP: usize = 3;

/// Common header of every heap object.
#[repr(C)]
#[derive(Clone, Copy)]
pub struct ObjHeader {
    pub flags: u64,
    pub klass: Value,
}

impl ObjHeader {
    #[inline]
    pub fn kind(&self) -> ValueKind {
        ValueKind::from_u8((self.flags & KIND_MASK) as u8)
    }

    /// Convenience encoding accessor. Hosts >= 1.3 export this directly;
    /// older hosts only expose the raw flag word.
    #[inline]
    pub fn encoding_index(&self) -> u32 {
        ((self.flags & ENC_MASK) >> ENC_SHIFT) as u32
    }
}

/// Manual fallback for hosts without the convenience accessor:
/// reconstruct the encoding index by masking the known bit offsets out of
/// a raw flag word. Must stay bit-identical to
/// [`ObjHeader::encoding_index`].
#[inline]
pub fn encoding_from_flags(flags: u64) -> u32 {
    ((flags >> ENC_SHIFT) & (ENC_MASK >> ENC_SHIFT)) as u32
}

#[repr(C)]
#[derive(Clone, Copy)]
pub struct StringHeap {
    pub ptr: *mut u8,
    pub capa: i64,
}

#[repr(C)]
#[derive(Clone, Copy)]
pub struct StringEmbed {
    pub ary: [u8; STR_EMBED_CAP],
}

#[repr(C)]
pub union StringStorage {
    pub heap: StringHeap,
    pub embed: StringEmbed,
}

/// A host string. `len` is valid for both storage forms; which union arm
/// is live follows from `STR_NOEMBED` in the header flags.
#[repr(C)]
pub struct RawString {
    pub header: ObjHeader,
    pub len: i64,
    pub storage: StringStorage,
}

#[repr(C)]
#[derive(Clone, Copy)]
pub struct ArrayHeap {
    pub len: i64,
    pub capa: i64,
    pub ptr: *const Value,
}

#[repr(C)]
#[derive(Clone, Copy)]
pub struct ArrayEmbed {
    pub ary: [Value; ARY_EMBED_CAP],
}

#[repr(C)]
pub union ArrayStorage {
    pub heap: ArrayHeap,
    pub embed: ArrayEmbed,
}

/// A host array. Embedded arrays keep their length in the header flag
/// word (`ARY_EMBED_LEN_MASK`), heap arrays in `storage.heap.len`.
#[repr(C)]
pub struct RawArray {
    pub header: ObjHeader,
    pub storage: ArrayStorage,
}

/// A dynamic (heap-allocated) symbol.
#[repr(C)]
pub struct RawSymbol {
    pub header: ObjHeader,
    pub id: SymId,
}

pub type DataHook = Option<unsafe extern "C" fn(*mut c_void)>;
pub type DataSizeHook = Option<unsafe extern "C" fn(*const c_void) -> usize>;

/// Descriptor identifying how the host manages a typed-data payload.
#[repr(C)]
pub struct DataTypeDesc {
    pub name: *const core::ffi::c_char,
    pub dmark: DataHook,
    pub dfree: DataHook,
    pub dsize: DataSizeHook,
    pub flags: u64,
}

/// A host value wrapping an opaque native payload. When
/// `TYPED_DATA_EMBEDDED` is set in `typed_flag` the payload is
/// tail-allocated directly after this struct and `data` is dead space;
/// otherwise `data` points at the heap payload.
#[repr(C)]
pub struct RawTypedData {
    pub header: ObjHeader,
    pub desc: *const DataTypeDesc,
    pub typed_flag: u64,
    pub data: *mut c_void,
}

/// Byte offset of an embedded typed-data payload: everything up to (but
/// not including) the trailing data pointer.
pub const EMBEDDED_DATA_OFFSET: usize =
    core::mem::size_of::<RawTypedData>() - core::mem::size_of::<*mut c_void>();
