use pretty_assertions::assert_eq;

use super::{arg, host_array, take_string, TestModule};
use crate::functions::{
    warp_add_attribute_at_index, warp_count_params, warp_create_enum_attribute,
    warp_create_string_attribute, warp_get_attribute_count_at_index, warp_get_attributes_at_index,
    warp_get_enum_attribute_at_index, warp_get_enum_attribute_kind,
    warp_get_enum_attribute_kind_for_name, warp_get_gc, warp_get_intrinsic_declaration,
    warp_get_intrinsic_id, warp_get_param_parent, warp_get_params,
    warp_get_string_attribute_at_index, warp_get_string_attribute_kind,
    warp_get_string_attribute_value, warp_intrinsic_copy_overloaded_name, warp_intrinsic_get_name,
    warp_intrinsic_is_overloaded, warp_is_enum_attribute, warp_is_string_attribute,
    warp_lookup_intrinsic_id, warp_remove_enum_attribute_at_index,
    warp_remove_string_attribute_at_index, warp_set_gc,
};
use crate::handles::{AttributeRef, TypeRef, ValueRef};
use crate::types::{warp_int64_type_in_context, warp_pointer_type_in_context};
use crate::values::warp_get_value_name;

const FUNCTION_INDEX: u32 = u32::MAX;

#[test]
fn params_copy_into_a_checked_destination() {
    let t = TestModule::new("params");
    let i32_ty = t.i32();
    let f = t.function("f", i32_ty, &mut [i32_ty, i32_ty, i32_ty]);
    assert_eq!(warp_count_params(f), 3);

    let mut short = [ValueRef::null(); 2];
    assert_eq!(warp_get_params(f, host_array(&mut short)), 0);
    assert_eq!(short, [ValueRef::null(); 2]);

    let mut params = [ValueRef::null(); 3];
    assert_eq!(warp_get_params(f, host_array(&mut params)), 1);
    assert!(params.iter().all(|&param| warp_get_param_parent(param) == f));
}

#[test]
fn gc_strategy_round_trips() {
    let t = TestModule::new("gc");
    let f = t.function("f", t.i32(), &mut []);
    assert_eq!(take_string(warp_get_gc(f)), "");
    warp_set_gc(f, arg("shadow-stack").raw());
    assert_eq!(take_string(warp_get_gc(f)), "shadow-stack");
}

#[test]
fn overloaded_intrinsics_get_mangled_names() {
    let t = TestModule::new("intrinsics");
    let memcpy = warp_lookup_intrinsic_id(arg("llvm.memcpy").raw());
    assert_ne!(memcpy, 0);
    assert_eq!(warp_intrinsic_is_overloaded(memcpy), 1);

    let ptr = warp_pointer_type_in_context(t.ctx(), 0);
    let mut overloads = [ptr, ptr, warp_int64_type_in_context(t.ctx())];
    let name = take_string(
        warp_intrinsic_copy_overloaded_name(t.module, memcpy, host_array(&mut overloads)),
    );
    assert_eq!(name, "llvm.memcpy.p0.p0.i64");

    let declaration = warp_get_intrinsic_declaration(t.module, memcpy, host_array(&mut overloads));
    assert_eq!(take_string(warp_get_value_name(declaration)), name);
    assert_eq!(warp_get_intrinsic_id(declaration), memcpy);

    let trap = warp_lookup_intrinsic_id(arg("llvm.trap").raw());
    assert_eq!(warp_intrinsic_is_overloaded(trap), 0);
    assert_eq!(take_string(warp_intrinsic_get_name(trap)), "llvm.trap");

    assert_eq!(warp_lookup_intrinsic_id(arg("llvm.not_an_intrinsic").raw()), 0);
}

#[test]
fn enum_and_string_attributes() {
    let t = TestModule::new("attributes");
    let f = t.function("f", t.i32(), &mut []);

    let noinline = warp_get_enum_attribute_kind_for_name(arg("noinline").raw());
    assert_ne!(noinline, 0);
    let attribute = warp_create_enum_attribute(t.ctx(), noinline, 0);
    assert_eq!(warp_is_enum_attribute(attribute), 1);
    assert_eq!(warp_get_enum_attribute_kind(attribute), noinline);
    warp_add_attribute_at_index(f, FUNCTION_INDEX, attribute);

    let cpu = warp_create_string_attribute(t.ctx(), arg("target-cpu").raw(), arg("generic").raw());
    assert_eq!(warp_is_string_attribute(cpu), 1);
    assert_eq!(take_string(warp_get_string_attribute_kind(cpu)), "target-cpu");
    assert_eq!(take_string(warp_get_string_attribute_value(cpu)), "generic");
    warp_add_attribute_at_index(f, FUNCTION_INDEX, cpu);
    assert_eq!(warp_get_attribute_count_at_index(f, FUNCTION_INDEX), 2);

    let mut short = [AttributeRef::null(); 1];
    assert_eq!(warp_get_attributes_at_index(f, FUNCTION_INDEX, host_array(&mut short)), 0);
    let mut all = [AttributeRef::null(); 2];
    assert_eq!(warp_get_attributes_at_index(f, FUNCTION_INDEX, host_array(&mut all)), 1);
    assert!(all.iter().all(|attribute| !attribute.is_null()));

    let found = warp_get_string_attribute_at_index(f, FUNCTION_INDEX, arg("target-cpu").raw());
    assert_eq!(take_string(warp_get_string_attribute_value(found)), "generic");
    assert!(!warp_get_enum_attribute_at_index(f, FUNCTION_INDEX, noinline).is_null());

    warp_remove_string_attribute_at_index(f, FUNCTION_INDEX, arg("target-cpu").raw());
    warp_remove_enum_attribute_at_index(f, FUNCTION_INDEX, noinline);
    assert_eq!(warp_get_attribute_count_at_index(f, FUNCTION_INDEX), 0);
    assert!(warp_get_enum_attribute_at_index(f, FUNCTION_INDEX, noinline).is_null());
}

#[test]
fn null_overload_array_with_count_is_refused() {
    let t = TestModule::new("intrinsics");
    let memcpy = warp_lookup_intrinsic_id(arg("llvm.memcpy").raw());
    let dangling = warp_marshal::HostArray::<TypeRef> {
        data: std::ptr::null_mut(),
        len: 3,
    };
    assert!(warp_get_intrinsic_declaration(t.module, memcpy, dangling).is_null());
    assert!(
        take_string(warp_intrinsic_copy_overloaded_name(t.module, memcpy, dangling)).is_empty(),
    );
}
