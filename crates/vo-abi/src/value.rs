//! Tagged value handles and immediate-value bit inspection.
//!
//! `Value` is the host's universal handle: either an immediate (encoded
//! entirely in the tag bits, no heap storage) or a pointer to a
//! GC-managed heap object. Everything in this module is pure bit math;
//! nothing here dereferences memory.

use num_enum::TryFromPrimitive;

/// Opaque host value handle. The host runtime owns every value reachable
/// through one of these; the shim only reads or forwards them.
pub type Value = u64;

/// Interned-symbol identifier.
pub type SymId = u64;

pub const VAL_FALSE: Value = 0x00;
pub const VAL_NIL: Value = 0x08;
pub const VAL_TRUE: Value = 0x14;
pub const VAL_UNDEF: Value = 0x34;

/// Any value with one of these low bits set is an immediate.
pub const IMMEDIATE_MASK: Value = 0x07;
pub const FIXNUM_FLAG: Value = 0x01;
pub const FLONUM_MASK: Value = 0x03;
pub const FLONUM_FLAG: Value = 0x02;
/// Low-byte pattern of a static symbol.
pub const SYMBOL_FLAG: Value = 0x0c;
/// Static symbols carry their id above this many tag bits.
pub const SPECIAL_SHIFT: u32 = 8;

pub const FIXNUM_MAX: i64 = i64::MAX >> 1;
pub const FIXNUM_MIN: i64 = i64::MIN >> 1;

/// Header bits reserved for the kind tag of a heap object.
pub const KIND_MASK: u64 = 0x1f;

/// Runtime classification of host values.
///
/// Heap objects store their kind in the low bits of the header flag
/// word; immediate kinds are derived from the handle's tag bits instead
/// and never appear in a header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive)]
#[repr(u8)]
pub enum ValueKind {
    None = 0,
    Object = 1,
    Class = 2,
    String = 3,
    Array = 4,
    Map = 5,
    Float = 6,
    BigInt = 7,
    Data = 8,
    Struct = 9,
    Closure = 10,
    Symbol = 11,
    // Immediates and singletons.
    Nil = 27,
    True = 28,
    False = 29,
    Fixnum = 30,
    Flonum = 31,
}

impl ValueKind {
    /// Create a ValueKind from its u8 representation.
    #[inline]
    pub fn from_u8(v: u8) -> Self {
        Self::try_from(v).unwrap_or(ValueKind::None)
    }
}

/// True for values with no storage inside the object space.
#[inline]
pub fn immediate_p(obj: Value) -> bool {
    obj & IMMEDIATE_MASK != 0
}

/// True for immediates plus the false/nil singletons - everything that
/// is not a heap pointer.
#[inline]
pub fn special_const_p(obj: Value) -> bool {
    immediate_p(obj) || !truthy(obj)
}

#[inline]
pub fn nil_p(obj: Value) -> bool {
    obj == VAL_NIL
}

/// The host's "if" test: everything but nil and false is truthy.
/// Clearing the nil bit maps both falsy singletons to zero.
#[inline]
pub fn truthy(obj: Value) -> bool {
    obj & !VAL_NIL != 0
}

#[inline]
pub fn fixnum_p(obj: Value) -> bool {
    obj & FIXNUM_FLAG != 0
}

#[inline]
pub fn flonum_p(obj: Value) -> bool {
    obj & FLONUM_MASK == FLONUM_FLAG
}

#[inline]
pub fn static_sym_p(obj: Value) -> bool {
    let low_byte_mask = !(Value::MAX << SPECIAL_SHIFT);
    obj & low_byte_mask == SYMBOL_FLAG
}

/// Pack a symbol id into a static-symbol handle.
#[inline]
pub fn sym_from_id(id: SymId) -> Value {
    (id << SPECIAL_SHIFT) | SYMBOL_FLAG
}

/// Extract the id of a static symbol. Precondition: `static_sym_p(obj)`.
#[inline]
pub fn static_sym_id(obj: Value) -> SymId {
    obj >> SPECIAL_SHIFT
}

/// Pack an integer into a fixnum handle. Precondition: `fixable(v)`.
#[inline]
pub fn fixnum_from_int(v: i64) -> Value {
    ((v as Value) << 1) | FIXNUM_FLAG
}

/// Unpack a fixnum handle. Arithmetic shift keeps the sign.
#[inline]
pub fn int_from_fixnum(obj: Value) -> i64 {
    (obj as i64) >> 1
}

/// True when `v` survives a fixnum round-trip.
#[inline]
pub fn fixable(v: i64) -> bool {
    (FIXNUM_MIN..=FIXNUM_MAX).contains(&v)
}
