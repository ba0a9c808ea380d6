use std::ffi::CStr;

use pretty_assertions::assert_eq;
use warp_marshal::{HostArray, RawHostString};

use super::{arg, host_array, take_string, take_units, HostArg, TestModule};
use crate::handles::ValueRef;
use crate::marshal::{
    warp_cstr_is_null, warp_cstr_to_host, warp_free_cstr, warp_free_host_string, warp_host_to_cstr,
    warp_new_null_cstr, warp_sized_cstr_to_host,
};
use crate::metadata::{
    warp_add_named_metadata_operand, warp_get_md_node_operands, warp_get_md_string,
    warp_get_named_metadata, warp_get_named_metadata_name, warp_get_named_metadata_num_operands,
    warp_get_named_metadata_operands, warp_md_node_in_context, warp_md_string_in_context,
    warp_metadata_as_value,
};
use crate::module::warp_module_create_with_name_in_context;
use crate::types::{warp_double_type_in_context, warp_function_type};
use crate::values::{
    warp_const_int_get_zext_value, warp_const_int_of_arbitrary_precision, warp_const_int_of_string,
    warp_const_real, warp_const_real_get_double, warp_const_string_in_context, warp_get_as_string,
    warp_get_element_as_constant, warp_get_value_name, warp_is_constant_string, warp_set_value_name,
};
use crate::{llvm_version, warp_get_version};

#[test]
fn host_to_cstr_substitutes_non_ascii() {
    let ptr = warp_host_to_cstr(arg("Ab\u{e9}!").raw());
    // SAFETY: warp_host_to_cstr returns a terminated buffer
    assert_eq!(unsafe { CStr::from_ptr(ptr) }.to_bytes(), b"Ab?!");
    assert_eq!(take_string(warp_cstr_to_host(ptr)), "Ab?!");
    warp_free_cstr(ptr);
}

#[test]
fn null_cstr_converts_to_the_empty_string() {
    let null = warp_new_null_cstr();
    assert_eq!(warp_cstr_is_null(null), 1);
    assert!(take_units(warp_cstr_to_host(null)).is_empty());
    warp_free_cstr(null);
}

#[test]
fn sized_conversion_keeps_interior_nul() {
    let bytes = b"a\0b\xff";
    let units = take_units(warp_sized_cstr_to_host(bytes.as_ptr().cast(), bytes.len()));
    assert_eq!(units, [0x61, 0, 0x62, 0xFF]);
}

#[test]
fn host_strings_are_released_by_the_free_export() {
    let raw = warp_cstr_to_host(c"release me".as_ptr());
    assert_eq!(raw.len, 10);
    warp_free_host_string(raw);
    warp_free_host_string(RawHostString::null());
}

#[test]
fn malformed_host_structures_become_failure_values() {
    let t = TestModule::new("malformed");
    let negative = RawHostString { data: std::ptr::null_mut(), len: -1 };
    assert!(warp_module_create_with_name_in_context(negative, t.ctx()).is_null());

    let dangling = HostArray { data: std::ptr::null_mut(), len: 2 };
    assert!(warp_function_type(t.i32(), dangling, 0).is_null());
    assert!(warp_host_to_cstr(negative).is_null());
}

#[test]
fn value_names_are_narrowed_and_widened() {
    let t = TestModule::new("names");
    let f = t.function("f", t.i32(), &mut []);
    warp_set_value_name(f, arg("caf\u{e9}").raw());
    assert_eq!(take_string(warp_get_value_name(f)), "caf?");

    let units: Vec<u16> = "x\u{1F600}".encode_utf16().collect();
    warp_set_value_name(f, HostArg::from_units(units).raw());
    assert_eq!(take_string(warp_get_value_name(f)), "x??");
}

#[test]
fn constant_strings_keep_their_bytes() {
    let t = TestModule::new("strings");
    let unterminated = warp_const_string_in_context(t.ctx(), arg("a\0b").raw(), 1);
    assert_eq!(warp_is_constant_string(unterminated), 1);
    assert_eq!(take_units(warp_get_as_string(unterminated)), [0x61, 0, 0x62]);

    let terminated = warp_const_string_in_context(t.ctx(), arg("ok").raw(), 0);
    assert_eq!(take_units(warp_get_as_string(terminated)), [0x6F, 0x6B, 0]);
}

#[test]
fn string_elements_read_back_as_byte_constants() {
    let t = TestModule::new("constants");
    let text = warp_const_string_in_context(t.ctx(), arg("hi").raw(), 0);
    let bytes: Vec<u64> = (0..3)
        .map(|index| warp_const_int_get_zext_value(warp_get_element_as_constant(text, index)))
        .collect();
    assert_eq!(bytes, [0x68, 0x69, 0]);
}

#[test]
fn integer_and_real_constants() {
    let t = TestModule::new("constants");
    let hex = warp_const_int_of_string(t.i32(), arg("ff").raw(), 16);
    assert_eq!(warp_const_int_get_zext_value(hex), 255);

    let mut words = [42_u64, 0];
    let wide = warp_const_int_of_arbitrary_precision(t.i32(), host_array(&mut words));
    assert_eq!(warp_const_int_get_zext_value(wide), 42);

    let double = warp_double_type_in_context(t.ctx());
    let tenth = warp_const_real(double, 0.1);
    let mut loses_info = -1;
    let value = warp_const_real_get_double(tenth, &mut loses_info);
    assert!((value - 0.1).abs() < f64::EPSILON);
    assert_eq!(loses_info, 0);
    assert!((warp_const_real_get_double(tenth, std::ptr::null_mut()) - 0.1).abs() < f64::EPSILON);
}

#[test]
fn metadata_strings_and_named_nodes() {
    let t = TestModule::new("metadata");
    let text = warp_md_string_in_context(t.ctx(), arg("warp").raw());
    assert_eq!(take_string(warp_get_md_string(warp_metadata_as_value(t.ctx(), text))), "warp");

    let mut operands = [text];
    let node = warp_md_node_in_context(t.ctx(), host_array(&mut operands));
    let node_value = warp_metadata_as_value(t.ctx(), node);
    let mut node_operands = [ValueRef::null(); 1];
    assert_eq!(warp_get_md_node_operands(node_value, host_array(&mut node_operands)), 1);
    assert_eq!(take_string(warp_get_md_string(node_operands[0])), "warp");

    warp_add_named_metadata_operand(t.module, arg("warp.info").raw(), node_value);
    assert_eq!(warp_get_named_metadata_num_operands(t.module, arg("warp.info").raw()), 1);

    let mut none: [ValueRef; 0] = [];
    let refused = warp_get_named_metadata_operands(
        t.module,
        arg("warp.info").raw(),
        host_array(&mut none),
    );
    assert_eq!(refused, 0);

    let named = warp_get_named_metadata(t.module, arg("warp.info").raw());
    assert_eq!(take_string(warp_get_named_metadata_name(named)), "warp.info");
    assert!(warp_get_named_metadata(t.module, arg("absent").raw()).is_null());
}

#[test]
fn version_needs_room_for_three_parts() {
    let mut short = [0_u32; 2];
    assert_eq!(warp_get_version(host_array(&mut short)), 0);
    assert_eq!(short, [0, 0]);

    let mut parts = [0_u32; 3];
    assert_eq!(warp_get_version(host_array(&mut parts)), 1);
    let (major, minor, patch) = llvm_version();
    assert_eq!(parts, [major, minor, patch]);
    assert_eq!(major, 18);
}
