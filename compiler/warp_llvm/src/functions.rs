//! Functions, parameters, intrinsics and attributes.
//!
//! Attribute indices follow LLVM: `0` is the return value, `1..` the
//! parameters, `u32::MAX` the function itself.

use llvm_sys::core as llvm;
use warp_abi::{CallConv, EnumDomain};
use warp_marshal::{HostArray, RawHostString};

use crate::handles::{AttributeRef, ContextRef, ModuleRef, TypeRef, ValueRef};
use crate::marshal::{byte_len, fill_host, host_bytes, host_out, host_parts};
use crate::message;

forward! {
    fn warp_delete_function(function: ValueRef) = llvm::LLVMDeleteFunction;
    fn warp_get_intrinsic_id(function: ValueRef) -> u32 = llvm::LLVMGetIntrinsicID;
    fn warp_count_params(function: ValueRef) -> u32 = llvm::LLVMCountParams;
    fn warp_get_param(function: ValueRef, index: u32) -> ValueRef = llvm::LLVMGetParam;
    fn warp_get_param_parent(argument: ValueRef) -> ValueRef = llvm::LLVMGetParamParent;
    fn warp_intrinsic_is_overloaded(id: u32) -> i32 = llvm::LLVMIntrinsicIsOverloaded;

    fn warp_add_attribute_at_index(function: ValueRef, index: u32, attribute: AttributeRef) =
        llvm::LLVMAddAttributeAtIndex;
    fn warp_get_attribute_count_at_index(function: ValueRef, index: u32) -> u32 =
        llvm::LLVMGetAttributeCountAtIndex;
    fn warp_get_enum_attribute_at_index(function: ValueRef, index: u32, kind: u32) -> AttributeRef =
        llvm::LLVMGetEnumAttributeAtIndex;
    fn warp_remove_enum_attribute_at_index(function: ValueRef, index: u32, kind: u32) =
        llvm::LLVMRemoveEnumAttributeAtIndex;

    fn warp_get_last_enum_attribute_kind() -> u32 = llvm::LLVMGetLastEnumAttributeKind;
    fn warp_create_enum_attribute(context: ContextRef, kind: u32, value: u64) -> AttributeRef =
        llvm::LLVMCreateEnumAttribute;
    fn warp_get_enum_attribute_kind(attribute: AttributeRef) -> u32 = llvm::LLVMGetEnumAttributeKind;
    fn warp_get_enum_attribute_value(attribute: AttributeRef) -> u64 = llvm::LLVMGetEnumAttributeValue;
    fn warp_create_type_attribute(context: ContextRef, kind: u32, ty: TypeRef) -> AttributeRef =
        llvm::LLVMCreateTypeAttribute;
    fn warp_get_type_attribute_value(attribute: AttributeRef) -> TypeRef = llvm::LLVMGetTypeAttributeValue;
    fn warp_is_enum_attribute(attribute: AttributeRef) -> i32 = llvm::LLVMIsEnumAttribute;
    fn warp_is_string_attribute(attribute: AttributeRef) -> i32 = llvm::LLVMIsStringAttribute;
    fn warp_is_type_attribute(attribute: AttributeRef) -> i32 = llvm::LLVMIsTypeAttribute;

    fn warp_add_call_site_attribute(call: ValueRef, index: u32, attribute: AttributeRef) =
        llvm::LLVMAddCallSiteAttribute;
    fn warp_get_call_site_attribute_count(call: ValueRef, index: u32) -> u32 =
        llvm::LLVMGetCallSiteAttributeCount;
    fn warp_get_call_site_enum_attribute(call: ValueRef, index: u32, kind: u32) -> AttributeRef =
        llvm::LLVMGetCallSiteEnumAttribute;
}

#[no_mangle]
pub extern "C" fn warp_add_function(
    module: ModuleRef,
    name: RawHostString,
    function_ty: TypeRef,
) -> ValueRef {
    let Some(name) = host_bytes(name) else {
        return ValueRef::null();
    };
    // SAFETY: live module and function type; LLVM copies the name
    ValueRef::from_raw(unsafe {
        llvm::LLVMAddFunction(module.as_raw(), name.as_ptr().cast_mut(), function_ty.as_raw())
    })
}

#[no_mangle]
pub extern "C" fn warp_get_named_function(module: ModuleRef, name: RawHostString) -> ValueRef {
    let Some(name) = host_bytes(name) else {
        return ValueRef::null();
    };
    // SAFETY: live module; name terminated
    ValueRef::from_raw(unsafe {
        llvm::LLVMGetNamedFunction(module.as_raw(), name.as_ptr().cast_mut())
    })
}

/// `call-conv` code of a function.
#[no_mangle]
pub extern "C" fn warp_get_function_call_conv(function: ValueRef) -> i32 {
    // SAFETY: live function
    CallConv::encode_native(unsafe { llvm::LLVMGetFunctionCallConv(function.as_raw()) })
}

#[no_mangle]
pub extern "C" fn warp_set_function_call_conv(function: ValueRef, conv: i32) {
    let conv = CallConv::decode_native(conv);
    // SAFETY: live function
    unsafe { llvm::LLVMSetFunctionCallConv(function.as_raw(), conv) };
}

/// Garbage collector strategy name, empty when unset. Borrowed from LLVM.
#[no_mangle]
pub extern "C" fn warp_get_gc(function: ValueRef) -> RawHostString {
    // SAFETY: live function; the name is LLVM-owned
    host_out(unsafe { message::borrowed(llvm::LLVMGetGC(function.as_raw())) })
}

#[no_mangle]
pub extern "C" fn warp_set_gc(function: ValueRef, name: RawHostString) {
    let Some(name) = host_bytes(name) else {
        return;
    };
    // SAFETY: live function; LLVM copies the name
    unsafe { llvm::LLVMSetGC(function.as_raw(), name.as_ptr().cast_mut()) };
}

/// Copy a function's parameters into `dest`. Returns 0 without writing when
/// `dest` holds fewer than `warp_count_params` elements.
#[no_mangle]
pub extern "C" fn warp_get_params(function: ValueRef, dest: HostArray<ValueRef>) -> i32 {
    // SAFETY: live function
    let count = unsafe { llvm::LLVMCountParams(function.as_raw()) };
    fill_host(dest, count, |out| {
        // SAFETY: out has room for count handles
        unsafe { llvm::LLVMGetParams(function.as_raw(), out.cast()) };
    })
}

/// Intrinsic ID for a name such as `llvm.memcpy`, or 0.
#[no_mangle]
pub extern "C" fn warp_lookup_intrinsic_id(name: RawHostString) -> u32 {
    let Some(name) = host_bytes(name) else {
        return 0;
    };
    // SAFETY: name valid for len bytes
    unsafe { llvm::LLVMLookupIntrinsicID(name.as_ptr().cast_mut(), name.len()) }
}

/// Declare (or find) an intrinsic in `module`, specialized to `overloads`.
#[no_mangle]
pub extern "C" fn warp_get_intrinsic_declaration(
    module: ModuleRef,
    id: u32,
    overloads: HostArray<TypeRef>,
) -> ValueRef {
    let Some((overloads, count)) = host_parts(overloads) else {
        return ValueRef::null();
    };
    // SAFETY: count live types
    ValueRef::from_raw(unsafe {
        llvm::LLVMGetIntrinsicDeclaration(module.as_raw(), id, overloads.cast(), count as usize)
    })
}

#[no_mangle]
pub extern "C" fn warp_intrinsic_get_type(
    context: ContextRef,
    id: u32,
    overloads: HostArray<TypeRef>,
) -> TypeRef {
    let Some((overloads, count)) = host_parts(overloads) else {
        return TypeRef::null();
    };
    // SAFETY: count live types
    TypeRef::from_raw(unsafe {
        llvm::LLVMIntrinsicGetType(context.as_raw(), id, overloads.cast(), count as usize)
    })
}

/// Base name of a non-overloaded intrinsic. Borrowed from LLVM.
#[no_mangle]
pub extern "C" fn warp_intrinsic_get_name(id: u32) -> RawHostString {
    let mut len = 0;
    // SAFETY: the name table is static
    host_out(unsafe {
        let ptr = llvm::LLVMIntrinsicGetName(id, &mut len);
        message::borrowed_sized(ptr, len)
    })
}

/// Mangled name of an overloaded intrinsic. The LLVM copy is disposed.
#[no_mangle]
pub extern "C" fn warp_intrinsic_copy_overloaded_name(
    module: ModuleRef,
    id: u32,
    overloads: HostArray<TypeRef>,
) -> RawHostString {
    let Some((overloads, count)) = host_parts(overloads) else {
        return RawHostString::null();
    };
    let mut len = 0;
    // SAFETY: count live types; the result is caller-owned
    host_out(unsafe {
        let ptr = llvm::LLVMIntrinsicCopyOverloadedName2(
            module.as_raw(),
            id,
            overloads.cast(),
            count as usize,
            &mut len,
        );
        message::take(ptr.cast_mut())
    })
}

/// Copy the attributes at `index` into `dest`. Checked against
/// `warp_get_attribute_count_at_index`.
#[no_mangle]
pub extern "C" fn warp_get_attributes_at_index(
    function: ValueRef,
    index: u32,
    dest: HostArray<AttributeRef>,
) -> i32 {
    // SAFETY: live function
    let count = unsafe { llvm::LLVMGetAttributeCountAtIndex(function.as_raw(), index) };
    fill_host(dest, count, |out| {
        // SAFETY: out has room for count handles
        unsafe { llvm::LLVMGetAttributesAtIndex(function.as_raw(), index, out.cast()) };
    })
}

/// Copy the attributes of a call site at `index` into `dest`. Checked
/// against `warp_get_call_site_attribute_count`.
#[no_mangle]
pub extern "C" fn warp_get_call_site_attributes(
    call: ValueRef,
    index: u32,
    dest: HostArray<AttributeRef>,
) -> i32 {
    // SAFETY: live call or invoke
    let count = unsafe { llvm::LLVMGetCallSiteAttributeCount(call.as_raw(), index) };
    fill_host(dest, count, |out| {
        // SAFETY: out has room for count handles
        unsafe { llvm::LLVMGetCallSiteAttributes(call.as_raw(), index, out.cast()) };
    })
}

/// Enum attribute kind for a name such as `noinline`, or 0.
#[no_mangle]
pub extern "C" fn warp_get_enum_attribute_kind_for_name(name: RawHostString) -> u32 {
    let Some(name) = host_bytes(name) else {
        return 0;
    };
    // SAFETY: name valid for len bytes
    unsafe { llvm::LLVMGetEnumAttributeKindForName(name.as_ptr().cast_mut(), name.len()) }
}

#[no_mangle]
pub extern "C" fn warp_create_string_attribute(
    context: ContextRef,
    key: RawHostString,
    value: RawHostString,
) -> AttributeRef {
    let (Some(key), Some(value)) = (host_bytes(key), host_bytes(value)) else {
        return AttributeRef::null();
    };
    let (Some(key_len), Some(value_len)) = (byte_len(&key), byte_len(&value)) else {
        return AttributeRef::null();
    };
    // SAFETY: both strings valid for their lengths; LLVM copies them
    AttributeRef::from_raw(unsafe {
        llvm::LLVMCreateStringAttribute(
            context.as_raw(),
            key.as_ptr().cast_mut(),
            key_len,
            value.as_ptr().cast_mut(),
            value_len,
        )
    })
}

/// Key of a string attribute. Borrowed from LLVM.
#[no_mangle]
pub extern "C" fn warp_get_string_attribute_kind(attribute: AttributeRef) -> RawHostString {
    let mut len = 0;
    // SAFETY: live string attribute; the key is LLVM-owned
    host_out(unsafe {
        let ptr = llvm::LLVMGetStringAttributeKind(attribute.as_raw(), &mut len);
        message::borrowed_sized(ptr, len as usize)
    })
}

/// Value of a string attribute. Borrowed from LLVM.
#[no_mangle]
pub extern "C" fn warp_get_string_attribute_value(attribute: AttributeRef) -> RawHostString {
    let mut len = 0;
    // SAFETY: live string attribute; the value is LLVM-owned
    host_out(unsafe {
        let ptr = llvm::LLVMGetStringAttributeValue(attribute.as_raw(), &mut len);
        message::borrowed_sized(ptr, len as usize)
    })
}

#[no_mangle]
pub extern "C" fn warp_get_string_attribute_at_index(
    function: ValueRef,
    index: u32,
    key: RawHostString,
) -> AttributeRef {
    let Some(key) = host_bytes(key) else {
        return AttributeRef::null();
    };
    let Some(len) = byte_len(&key) else {
        return AttributeRef::null();
    };
    // SAFETY: live function; key valid for len bytes
    AttributeRef::from_raw(unsafe {
        llvm::LLVMGetStringAttributeAtIndex(function.as_raw(), index, key.as_ptr().cast_mut(), len)
    })
}

#[no_mangle]
pub extern "C" fn warp_remove_string_attribute_at_index(
    function: ValueRef,
    index: u32,
    key: RawHostString,
) {
    let Some(key) = host_bytes(key) else {
        return;
    };
    let Some(len) = byte_len(&key) else {
        return;
    };
    // SAFETY: live function; key valid for len bytes
    unsafe {
        llvm::LLVMRemoveStringAttributeAtIndex(
            function.as_raw(),
            index,
            key.as_ptr().cast_mut(),
            len,
        );
    }
}
