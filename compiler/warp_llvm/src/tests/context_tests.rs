use std::cell::{Cell, RefCell};
use std::ffi::c_void;
use std::rc::Rc;

use llvm_sys::prelude::LLVMDiagnosticInfoRef;
use pretty_assertions::assert_eq;
use warp_abi::{DiagnosticSeverity, EnumDomain};

use super::{arg, take_string, TestModule};
use crate::builder::{warp_build_add, warp_build_ret};
use crate::context::{
    warp_context_create, warp_context_dispose, warp_context_get_diagnostic_context,
    warp_context_set_diagnostic_handler, warp_context_should_discard_value_names,
    warp_get_diag_info_description, warp_get_diag_info_severity, Context, Diagnostic,
};
use crate::functions::warp_get_param;
use crate::handles::{DiagnosticInfoRef, ModuleRef};
use crate::init_tracing;
use crate::module::{
    warp_create_memory_buffer_with_text, warp_dispose_memory_buffer, warp_parse_bitcode_in_context,
};
use crate::values::warp_get_value_name;

#[test]
fn discarded_names_leave_values_anonymous() {
    let t = TestModule::new("anonymous");
    assert!(!t.context.discards_value_names());
    t.context.set_discard_value_names(true);
    assert!(t.context.discards_value_names());
    assert_eq!(warp_context_should_discard_value_names(t.ctx()), 1);

    let i32_ty = t.i32();
    let f = t.function("f", i32_ty, &mut [i32_ty]);
    t.enter(f, "entry");
    let x = warp_get_param(f, 0);
    let sum = warp_build_add(t.builder, x, x, arg("sum").raw());
    warp_build_ret(t.builder, sum);

    assert_eq!(take_string(warp_get_value_name(sum)), "");
    assert_eq!(take_string(warp_get_value_name(f)), "f");
    t.verify().unwrap();
}

/// Feed the context a buffer that is not bitcode. LLVM reports the failure
/// as an error diagnostic before the parse returns.
fn parse_garbage(context: &Context) -> i32 {
    let buffer = warp_create_memory_buffer_with_text(
        arg("not bitcode").raw(),
        arg("garbage.bc").raw(),
    );
    let mut module = ModuleRef::null();
    let ok = warp_parse_bitcode_in_context(context.handle(), buffer, &mut module);
    assert!(module.is_null());
    warp_dispose_memory_buffer(buffer);
    ok
}

#[test]
fn diagnostic_handler_sees_parse_errors() {
    let mut context = Context::new();
    let seen: Rc<RefCell<Vec<Diagnostic>>> = Rc::default();
    let sink = Rc::clone(&seen);
    context.set_diagnostic_handler(move |diagnostic| sink.borrow_mut().push(diagnostic.clone()));

    assert_eq!(parse_garbage(&context), 0);

    let seen = seen.borrow();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].severity, DiagnosticSeverity::Error);
    assert!(!seen[0].description.is_empty());
}

#[test]
fn replacing_the_handler_routes_to_the_new_one() {
    let mut context = Context::new();
    let first = Rc::new(Cell::new(0));
    let second = Rc::new(Cell::new(0));

    let counter = Rc::clone(&first);
    context.set_diagnostic_handler(move |_| counter.set(counter.get() + 1));
    parse_garbage(&context);

    let counter = Rc::clone(&second);
    context.set_diagnostic_handler(move |_| counter.set(counter.get() + 1));
    parse_garbage(&context);

    assert_eq!((first.get(), second.get()), (1, 1));
    context.clear_diagnostic_handler();
}

#[test]
fn dropping_the_context_releases_the_yield_callback() {
    let mut context = Context::new();
    let yields = Rc::new(Cell::new(0));
    let counter = Rc::clone(&yields);
    context.set_yield_callback(move || counter.set(counter.get() + 1));
    drop(context);
    assert_eq!(Rc::strong_count(&yields), 1);
}

extern "C" fn record(info: LLVMDiagnosticInfoRef, opaque: *mut c_void) {
    // SAFETY: the test passes a live Vec as the diagnostic context
    let seen = unsafe { &mut *opaque.cast::<Vec<(i32, String)>>() };
    let info = DiagnosticInfoRef::from_raw(info);
    let description = take_string(warp_get_diag_info_description(info));
    seen.push((warp_get_diag_info_severity(info), description));
}

#[test]
fn c_handler_gets_its_opaque_pointer_back() {
    let raw = warp_context_create();
    let mut seen: Vec<(i32, String)> = Vec::new();
    let opaque: *mut c_void = (&mut seen as *mut Vec<(i32, String)>).cast();
    warp_context_set_diagnostic_handler(raw, Some(record), opaque);
    assert_eq!(warp_context_get_diagnostic_context(raw), opaque);

    let buffer = warp_create_memory_buffer_with_text(
        arg("not bitcode").raw(),
        arg("garbage.bc").raw(),
    );
    let mut module = ModuleRef::null();
    assert_eq!(warp_parse_bitcode_in_context(raw, buffer, &mut module), 0);
    warp_dispose_memory_buffer(buffer);
    warp_context_dispose(raw);

    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].0, DiagnosticSeverity::Error.code());
    assert!(!seen[0].1.is_empty());
}

#[test]
fn tracing_initializes_once() {
    init_tracing();
    init_tracing();
}
