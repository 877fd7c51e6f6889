//! Observable effects of the GC notification surface: barrier bookkeeping
//! bits and the off-heap memory accounting counter.

mod common;

use vo_abi::gc;
use vo_abi::layout::{FL_REMEMBERED, FL_WB_PROTECTED};
use vo_abi::stable::*;
use vo_abi::value::VAL_NIL;
use vo_abi::ValueKind;

#[test]
fn obj_write_stores_and_remembers() {
    let arr = common::embedded_array(&[VAL_NIL, VAL_NIL, VAL_NIL]);
    let young = common::embedded_string(b"young");
    unsafe {
        (*arr.ptr()).header.flags |= FL_WB_PROTECTED;
        let slot = core::ptr::addr_of_mut!((*arr.ptr()).storage.embed.ary[0]);

        let ret = vo_stable_obj_write(arr.value(), slot, young.value());
        assert_eq!(ret, arr.value());
        assert_eq!(*slot, young.value());
        assert!((*arr.ptr()).header.flags & FL_REMEMBERED != 0);
    }
}

#[test]
fn obj_written_remembers_without_touching_slots() {
    let arr = common::embedded_array(&[VAL_NIL]);
    let young = common::embedded_string(b"y");
    unsafe {
        (*arr.ptr()).header.flags |= FL_WB_PROTECTED;

        let ret = vo_stable_obj_written(arr.value(), VAL_NIL, young.value());
        assert_eq!(ret, arr.value());
        assert_eq!(vo_stable_array_len(arr.value()), 1);
        assert_eq!(*vo_stable_array_ptr(arr.value()), VAL_NIL);
        assert!((*arr.ptr()).header.flags & FL_REMEMBERED != 0);
    }
}

#[test]
fn barrier_ignores_unprotected_parents_and_immediate_children() {
    let unprotected = common::heap_object(ValueKind::Object, 0, 0);
    let young = common::embedded_string(b"y");
    unsafe {
        vo_stable_gc_writebarrier(unprotected.value(), young.value());
        assert_eq!((*unprotected.ptr()).flags & FL_REMEMBERED, 0);
    }

    let protected = common::heap_object(ValueKind::Object, FL_WB_PROTECTED, 0);
    unsafe {
        vo_stable_gc_writebarrier(protected.value(), VAL_NIL);
        assert_eq!((*protected.ptr()).flags & FL_REMEMBERED, 0);
    }
}

#[test]
fn unprotect_opts_out_of_the_barrier() {
    let obj = common::heap_object(ValueKind::Object, FL_WB_PROTECTED, 0);
    unsafe {
        vo_stable_gc_writebarrier_unprotect(obj.value());
        assert_eq!((*obj.ptr()).flags & FL_WB_PROTECTED, 0);

        // Special constants are skipped, not dereferenced.
        vo_stable_gc_writebarrier_unprotect(VAL_NIL);
    }
}

#[test]
fn memory_accounting_is_cumulative() {
    let before = gc::memory_usage_delta();
    vo_stable_gc_adjust_memory_usage(1 << 20);
    vo_stable_gc_adjust_memory_usage(-(1 << 18));
    assert_eq!(gc::memory_usage_delta() - before, (1 << 20) - (1 << 18));
}
