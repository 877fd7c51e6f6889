//! GC notification wrappers.
//!
//! These are trust-the-caller contracts: each must be invoked exactly
//! when the described host-level event has genuinely occurred, or
//! collector correctness in the host breaks silently. Nothing here can
//! validate that locally.

use core::sync::atomic::{AtomicI64, Ordering};

use crate::layout::{ObjHeader, FL_REMEMBERED, FL_WB_PROTECTED};
use crate::value::{self, Value};

/// Off-heap memory attributed to host values but invisible to the
/// collector's own bookkeeping. The host polls this between cycles.
static MEMORY_DELTA: AtomicI64 = AtomicI64::new(0);

/// Record that a reference to `young` was stored into `old`.
///
/// # Safety
/// `old` must be a valid heap object handle.
#[inline]
pub unsafe fn writebarrier(old: Value, young: Value) {
    // Immediates are never collected, nothing to remember.
    if value::special_const_p(young) {
        return;
    }
    let header = &mut *(old as *mut ObjHeader);
    if header.flags & FL_WB_PROTECTED != 0 {
        header.flags |= FL_REMEMBERED;
    }
}

/// Opt `obj` out of the incremental write barrier. The collector falls
/// back to rescanning it every cycle.
///
/// # Safety
/// `obj` must be a valid heap object handle or a special constant.
#[inline]
pub unsafe fn writebarrier_unprotect(obj: Value) {
    if value::special_const_p(obj) {
        return;
    }
    let header = &mut *(obj as *mut ObjHeader);
    header.flags &= !FL_WB_PROTECTED;
}

/// Report a signed off-heap allocation delta to the host's memory
/// accounting.
#[inline]
pub fn adjust_memory_usage(diff: i64) {
    MEMORY_DELTA.fetch_add(diff, Ordering::Relaxed);
}

/// Net off-heap delta reported so far.
#[inline]
pub fn memory_usage_delta() -> i64 {
    MEMORY_DELTA.load(Ordering::Relaxed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{ValueKind, VAL_NIL};

    fn header(flags: u64) -> ObjHeader {
        ObjHeader { flags, klass: 0 }
    }

    #[test]
    fn barrier_remembers_protected_objects() {
        let mut old = header(ValueKind::Array as u64 | FL_WB_PROTECTED);
        let young = header(ValueKind::String as u64);
        unsafe {
            writebarrier(
                &mut old as *mut ObjHeader as Value,
                &young as *const ObjHeader as Value,
            );
        }
        assert!(old.flags & FL_REMEMBERED != 0);
    }

    #[test]
    fn barrier_skips_unprotected_and_immediates() {
        let mut old = header(ValueKind::Array as u64);
        let young = header(ValueKind::String as u64);
        unsafe {
            writebarrier(
                &mut old as *mut ObjHeader as Value,
                &young as *const ObjHeader as Value,
            );
        }
        assert_eq!(old.flags & FL_REMEMBERED, 0);

        // Storing an immediate never needs remembering.
        let mut protected = header(ValueKind::Array as u64 | FL_WB_PROTECTED);
        unsafe { writebarrier(&mut protected as *mut ObjHeader as Value, VAL_NIL) };
        assert_eq!(protected.flags & FL_REMEMBERED, 0);
    }

    #[test]
    fn unprotect_clears_the_bit() {
        let mut obj = header(ValueKind::Object as u64 | FL_WB_PROTECTED);
        unsafe { writebarrier_unprotect(&mut obj as *mut ObjHeader as Value) };
        assert_eq!(obj.flags & FL_WB_PROTECTED, 0);
        // Special constants are ignored, not dereferenced.
        unsafe { writebarrier_unprotect(VAL_NIL) };
    }

    #[test]
    fn memory_accounting_sums_deltas() {
        let before = memory_usage_delta();
        adjust_memory_usage(4096);
        adjust_memory_usage(-1024);
        assert_eq!(memory_usage_delta() - before, 3072);
    }
}
