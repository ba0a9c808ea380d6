use std::fs;

use pretty_assertions::assert_eq;
use warp_abi::{DllStorageClass, EnumDomain, Linkage, ModuleFlagBehavior, UnnamedAddr, Visibility};
use warp_marshal::RawHostString;

use super::{arg, take_string, take_units, TestModule};
use crate::builder::{warp_build_add, warp_build_ret};
use crate::functions::{warp_get_named_function, warp_get_param};
use crate::globals::{
    warp_add_global, warp_get_alignment, warp_get_comdat, warp_get_dll_storage_class,
    warp_get_linkage, warp_get_named_global, warp_get_or_insert_comdat, warp_get_section,
    warp_get_unnamed_address, warp_get_visibility, warp_is_thread_local, warp_set_alignment,
    warp_set_comdat, warp_set_dll_storage_class, warp_set_initializer, warp_set_linkage,
    warp_set_section, warp_set_thread_local, warp_set_unnamed_address, warp_set_visibility,
};
use crate::handles::{MemoryBufferRef, ModuleRef, ValueRef};
use crate::metadata::warp_value_as_metadata;
use crate::module::{
    warp_add_module_flag, warp_append_module_inline_asm, warp_copy_module_flags_metadata,
    warp_create_memory_buffer_with_contents_of_file, warp_create_memory_buffer_with_text,
    warp_dispose_memory_buffer, warp_dispose_module, warp_dispose_module_flags_metadata,
    warp_get_buffer_contents, warp_get_buffer_size, warp_get_data_layout_str,
    warp_get_first_function, warp_get_module_flag, warp_get_module_identifier,
    warp_get_module_inline_asm, warp_get_next_function, warp_get_source_file_name,
    warp_get_target, warp_module_flag_entries_get_flag_behavior, warp_module_flag_entries_get_key,
    warp_module_flag_entries_get_metadata, warp_parse_bitcode_in_context,
    warp_parse_ir_in_context, warp_print_module_to_file, warp_set_data_layout,
    warp_set_module_identifier, warp_set_module_inline_asm, warp_set_source_file_name,
    warp_set_target, warp_write_bitcode_to_file, warp_write_bitcode_to_memory_buffer,
};
use crate::values::warp_const_int;

/// `define i32 @add(i32, i32)` returning the sum.
fn adder() -> (TestModule, ValueRef) {
    let t = TestModule::new("adder");
    let i32_ty = t.i32();
    let add = t.function("add", i32_ty, &mut [i32_ty, i32_ty]);
    t.enter(add, "entry");
    let sum = warp_build_add(
        t.builder,
        warp_get_param(add, 0),
        warp_get_param(add, 1),
        arg("sum").raw(),
    );
    warp_build_ret(t.builder, sum);
    (t, add)
}

#[test]
fn built_function_verifies_and_prints() {
    let (t, add) = adder();
    t.verify().unwrap();

    let ir = t.ir();
    assert!(ir.contains("define i32 @add(i32 %0, i32 %1)"), "{ir}");
    assert!(ir.contains("%sum = add i32 %0, %1"), "{ir}");

    assert_eq!(warp_get_first_function(t.module), add);
    assert!(warp_get_next_function(add).is_null());
    assert_eq!(warp_get_named_function(t.module, arg("add").raw()), add);
    assert!(warp_get_named_function(t.module, arg("sub").raw()).is_null());
}

#[test]
fn verifier_reports_missing_terminator() {
    let t = TestModule::new("broken");
    let f = t.function("f", t.i32(), &mut []);
    t.enter(f, "entry");

    let message = t.verify().unwrap_err();
    assert!(message.contains("terminator"), "{message}");
}

#[test]
fn verify_without_error_slot_still_reports_status() {
    let t = TestModule::new("broken");
    let f = t.function("f", t.i32(), &mut []);
    t.enter(f, "entry");

    assert_eq!(crate::module::warp_verify_module(t.module, std::ptr::null_mut()), 0);
}

#[test]
fn identification_strings_round_trip() {
    let t = TestModule::new("first");
    assert_eq!(take_string(warp_get_module_identifier(t.module)), "first");

    warp_set_module_identifier(t.module, arg("second").raw());
    assert_eq!(take_string(warp_get_module_identifier(t.module)), "second");

    warp_set_source_file_name(t.module, arg("src/main.warp").raw());
    assert_eq!(take_string(warp_get_source_file_name(t.module)), "src/main.warp");

    warp_set_target(t.module, arg("x86_64-unknown-linux-gnu").raw());
    assert_eq!(take_string(warp_get_target(t.module)), "x86_64-unknown-linux-gnu");

    warp_set_data_layout(t.module, arg("e-m:e-i64:64-n32:64-S128").raw());
    assert_eq!(take_string(warp_get_data_layout_str(t.module)), "e-m:e-i64:64-n32:64-S128");
}

#[test]
fn module_flags_take_behavior_codes() {
    let t = TestModule::new("flags");
    let one = warp_value_as_metadata(warp_const_int(t.i32(), 1, 0));
    warp_add_module_flag(
        t.module,
        ModuleFlagBehavior::Warning.code(),
        arg("wchar_size").raw(),
        one,
    );

    assert!(!warp_get_module_flag(t.module, arg("wchar_size").raw()).is_null());
    assert!(warp_get_module_flag(t.module, arg("absent").raw()).is_null());
    let ir = t.ir();
    assert!(ir.contains("!{i32 2, !\"wchar_size\", i32 1}"), "{ir}");
}

#[test]
fn module_flags_snapshot_lists_behavior_and_key() {
    let t = TestModule::new("flags");
    let one = warp_value_as_metadata(warp_const_int(t.i32(), 1, 0));
    let two = warp_value_as_metadata(warp_const_int(t.i32(), 2, 0));
    warp_add_module_flag(
        t.module,
        ModuleFlagBehavior::Warning.code(),
        arg("wchar_size").raw(),
        one,
    );
    warp_add_module_flag(
        t.module,
        ModuleFlagBehavior::Override.code(),
        arg("PIC Level").raw(),
        two,
    );

    let mut len = 0;
    let entries = warp_copy_module_flags_metadata(t.module, &mut len);
    assert_eq!(len, 2);
    let flags: Vec<(i32, String)> = (0..2)
        .map(|index| {
            let behavior = warp_module_flag_entries_get_flag_behavior(entries, index);
            (behavior, take_string(warp_module_flag_entries_get_key(entries, index)))
        })
        .collect();
    assert_eq!(
        flags,
        [
            (ModuleFlagBehavior::Warning.code(), "wchar_size".to_owned()),
            (ModuleFlagBehavior::Override.code(), "PIC Level".to_owned()),
        ]
    );
    assert_eq!(warp_module_flag_entries_get_metadata(entries, 1), two);
    warp_dispose_module_flags_metadata(entries);
}

#[test]
fn module_without_flags_gives_an_empty_snapshot() {
    let t = TestModule::new("flags");
    let mut len = 7;
    let entries = warp_copy_module_flags_metadata(t.module, &mut len);
    assert_eq!(len, 0);
    warp_dispose_module_flags_metadata(entries);

    let entries = warp_copy_module_flags_metadata(t.module, std::ptr::null_mut());
    warp_dispose_module_flags_metadata(entries);
}

#[test]
fn module_inline_asm_appends_lines() {
    let t = TestModule::new("asm");
    warp_set_module_inline_asm(t.module, arg("nop").raw());
    warp_append_module_inline_asm(t.module, arg("hlt").raw());

    let asm = take_string(warp_get_module_inline_asm(t.module));
    assert_eq!(asm.lines().collect::<Vec<_>>(), ["nop", "hlt"]);
}

#[test]
fn print_to_file_writes_ir() {
    let (t, _) = adder();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("adder.ll");

    let mut error = RawHostString::null();
    let ok = warp_print_module_to_file(t.module, arg(path.to_str().unwrap()).raw(), &mut error);
    assert_eq!(ok, 1);
    assert!(error.is_null());
    assert!(fs::read_to_string(&path).unwrap().contains("define i32 @add"));
}

#[test]
fn print_to_file_passes_the_error_through() {
    let (t, _) = adder();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("adder.ll");

    let mut error = RawHostString::null();
    let ok = warp_print_module_to_file(t.module, arg(path.to_str().unwrap()).raw(), &mut error);
    assert_eq!(ok, 0);
    assert!(!take_string(error).is_empty());
}

#[test]
fn bitcode_survives_file_round_trip() {
    let (t, _) = adder();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("adder.bc");
    let path = path.to_str().unwrap();

    assert_eq!(warp_write_bitcode_to_file(t.module, arg(path).raw()), 1);

    let mut buffer = MemoryBufferRef::null();
    let mut error = RawHostString::null();
    let ok = warp_create_memory_buffer_with_contents_of_file(
        arg(path).raw(),
        &mut buffer,
        &mut error,
    );
    assert_eq!(ok, 1);
    assert!(error.is_null());

    let mut parsed = ModuleRef::null();
    assert_eq!(warp_parse_bitcode_in_context(t.ctx(), buffer, &mut parsed), 1);
    assert!(!warp_get_named_function(parsed, arg("add").raw()).is_null());

    warp_dispose_module(parsed);
    warp_dispose_memory_buffer(buffer);
}

#[test]
fn missing_file_yields_null_buffer_and_message() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.bc");

    let mut buffer = MemoryBufferRef::null();
    let mut error = RawHostString::null();
    let ok = warp_create_memory_buffer_with_contents_of_file(
        arg(path.to_str().unwrap()).raw(),
        &mut buffer,
        &mut error,
    );
    assert_eq!(ok, 0);
    assert!(buffer.is_null());
    assert!(!take_string(error).is_empty());
}

#[test]
fn bitcode_buffer_starts_with_magic() {
    let (t, _) = adder();
    let buffer = warp_write_bitcode_to_memory_buffer(t.module);
    assert!(warp_get_buffer_size(buffer) > 4);

    let units = take_units(warp_get_buffer_contents(buffer));
    assert_eq!(&units[..4], &[0x42, 0x43, 0xC0, 0xDE]);
    warp_dispose_memory_buffer(buffer);
}

#[test]
fn textual_ir_parses() {
    let t = TestModule::new("host");
    let buffer = warp_create_memory_buffer_with_text(
        arg("define i32 @one() {\n  ret i32 1\n}\n").raw(),
        arg("one.ll").raw(),
    );
    assert_eq!(
        take_string(warp_get_buffer_contents(buffer)),
        "define i32 @one() {\n  ret i32 1\n}\n",
    );

    let mut parsed = ModuleRef::null();
    let mut error = RawHostString::null();
    assert_eq!(warp_parse_ir_in_context(t.ctx(), buffer, &mut parsed, &mut error), 1);
    assert!(error.is_null());
    assert!(!warp_get_named_function(parsed, arg("one").raw()).is_null());
    warp_dispose_module(parsed);
}

#[test]
fn malformed_ir_reports_the_parse_error() {
    let t = TestModule::new("host");
    let buffer =
        warp_create_memory_buffer_with_text(arg("define i32 @one( {").raw(), arg("bad.ll").raw());

    let mut parsed = ModuleRef::null();
    let mut error = RawHostString::null();
    assert_eq!(warp_parse_ir_in_context(t.ctx(), buffer, &mut parsed, &mut error), 0);
    assert!(parsed.is_null());
    assert!(take_string(error).contains("bad.ll"));
}

#[test]
fn global_properties_cross_as_codes() {
    let t = TestModule::new("globals");
    let counter = warp_add_global(t.module, t.i32(), arg("counter").raw());
    warp_set_initializer(counter, warp_const_int(t.i32(), 7, 0));
    warp_set_linkage(counter, Linkage::Internal.code());
    assert_eq!(warp_get_linkage(counter), Linkage::Internal.code());
    assert_eq!(warp_get_named_global(t.module, arg("counter").raw()), counter);

    let exported = warp_add_global(t.module, t.i32(), arg("exported").raw());
    warp_set_visibility(exported, Visibility::Protected.code());
    warp_set_dll_storage_class(exported, DllStorageClass::Export.code());
    warp_set_unnamed_address(exported, UnnamedAddr::Local.code());
    warp_set_section(exported, arg(".data.warp").raw());
    warp_set_alignment(exported, 16);
    warp_set_thread_local(exported, 1);

    assert_eq!(warp_get_visibility(exported), Visibility::Protected.code());
    assert_eq!(warp_get_dll_storage_class(exported), DllStorageClass::Export.code());
    assert_eq!(warp_get_unnamed_address(exported), UnnamedAddr::Local.code());
    assert_eq!(take_string(warp_get_section(exported)), ".data.warp");
    assert_eq!(warp_get_alignment(exported), 16);
    assert_eq!(warp_is_thread_local(exported), 1);
    assert_eq!(take_string(warp_get_section(counter)), "");

    let comdat = warp_get_or_insert_comdat(t.module, arg("counter").raw());
    warp_set_comdat(counter, comdat);
    assert_eq!(warp_get_comdat(counter), comdat);

    let ir = t.ir();
    assert!(ir.contains("@counter = internal global i32 7, comdat"), "{ir}");
}

#[test]
fn rejected_filename_still_clears_the_error_slot() {
    let (t, _) = adder();
    let stale = arg("stale");
    let rejected = RawHostString {
        data: std::ptr::null_mut(),
        len: -1,
    };

    let mut error = stale.raw();
    assert_eq!(warp_print_module_to_file(t.module, rejected, &mut error), 0);
    assert!(error.is_null());

    let mut error = stale.raw();
    let earlier = warp_create_memory_buffer_with_text(arg("x").raw(), arg("x.txt").raw());
    let mut buffer = earlier;
    let ok = warp_create_memory_buffer_with_contents_of_file(rejected, &mut buffer, &mut error);
    assert_eq!(ok, 0);
    assert!(error.is_null());
    assert!(buffer.is_null());
    warp_dispose_memory_buffer(earlier);
}

#[test]
fn results_without_a_slot_are_released() {
    let (t, _) = adder();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("adder.bc");
    let path = path.to_str().unwrap();
    assert_eq!(warp_write_bitcode_to_file(t.module, arg(path).raw()), 1);

    let mut error = RawHostString::null();
    let ok = warp_create_memory_buffer_with_contents_of_file(
        arg(path).raw(),
        std::ptr::null_mut(),
        &mut error,
    );
    assert_eq!(ok, 1);
    assert!(error.is_null());

    let buffer = warp_create_memory_buffer_with_text(
        arg("define i32 @one() {\n  ret i32 1\n}\n").raw(),
        arg("one.ll").raw(),
    );
    assert_eq!(warp_parse_ir_in_context(t.ctx(), buffer, std::ptr::null_mut(), &mut error), 1);
    assert!(error.is_null());

    let buffer = warp_write_bitcode_to_memory_buffer(t.module);
    assert_eq!(warp_parse_bitcode_in_context(t.ctx(), buffer, std::ptr::null_mut()), 1);
    warp_dispose_memory_buffer(buffer);
}
