//! Types: construction and introspection.

use llvm_sys::core as llvm;
use warp_abi::TypeKind;
use warp_marshal::{HostArray, RawHostString};

use crate::handles::{ContextRef, TypeRef};
use crate::marshal::{fill_host, host_bytes, host_out, host_parts};
use crate::message;
use crate::native::LlvmEnum;

forward! {
    fn warp_type_is_sized(ty: TypeRef) -> i32 = llvm::LLVMTypeIsSized;
    fn warp_get_type_context(ty: TypeRef) -> ContextRef = llvm::LLVMGetTypeContext;
    fn warp_dump_type(ty: TypeRef) = llvm::LLVMDumpType;

    fn warp_int1_type_in_context(context: ContextRef) -> TypeRef = llvm::LLVMInt1TypeInContext;
    fn warp_int8_type_in_context(context: ContextRef) -> TypeRef = llvm::LLVMInt8TypeInContext;
    fn warp_int16_type_in_context(context: ContextRef) -> TypeRef = llvm::LLVMInt16TypeInContext;
    fn warp_int32_type_in_context(context: ContextRef) -> TypeRef = llvm::LLVMInt32TypeInContext;
    fn warp_int64_type_in_context(context: ContextRef) -> TypeRef = llvm::LLVMInt64TypeInContext;
    fn warp_int128_type_in_context(context: ContextRef) -> TypeRef = llvm::LLVMInt128TypeInContext;
    fn warp_int_type_in_context(context: ContextRef, bits: u32) -> TypeRef = llvm::LLVMIntTypeInContext;
    fn warp_get_int_type_width(ty: TypeRef) -> u32 = llvm::LLVMGetIntTypeWidth;

    fn warp_half_type_in_context(context: ContextRef) -> TypeRef = llvm::LLVMHalfTypeInContext;
    fn warp_bfloat_type_in_context(context: ContextRef) -> TypeRef = llvm::LLVMBFloatTypeInContext;
    fn warp_float_type_in_context(context: ContextRef) -> TypeRef = llvm::LLVMFloatTypeInContext;
    fn warp_double_type_in_context(context: ContextRef) -> TypeRef = llvm::LLVMDoubleTypeInContext;
    fn warp_x86_fp80_type_in_context(context: ContextRef) -> TypeRef = llvm::LLVMX86FP80TypeInContext;
    fn warp_fp128_type_in_context(context: ContextRef) -> TypeRef = llvm::LLVMFP128TypeInContext;
    fn warp_ppc_fp128_type_in_context(context: ContextRef) -> TypeRef = llvm::LLVMPPCFP128TypeInContext;

    fn warp_void_type_in_context(context: ContextRef) -> TypeRef = llvm::LLVMVoidTypeInContext;
    fn warp_label_type_in_context(context: ContextRef) -> TypeRef = llvm::LLVMLabelTypeInContext;
    fn warp_token_type_in_context(context: ContextRef) -> TypeRef = llvm::LLVMTokenTypeInContext;
    fn warp_metadata_type_in_context(context: ContextRef) -> TypeRef = llvm::LLVMMetadataTypeInContext;

    fn warp_is_function_var_arg(function_ty: TypeRef) -> i32 = llvm::LLVMIsFunctionVarArg;
    fn warp_get_return_type(function_ty: TypeRef) -> TypeRef = llvm::LLVMGetReturnType;
    fn warp_count_param_types(function_ty: TypeRef) -> u32 = llvm::LLVMCountParamTypes;

    fn warp_count_struct_element_types(struct_ty: TypeRef) -> u32 = llvm::LLVMCountStructElementTypes;
    fn warp_struct_get_type_at_index(struct_ty: TypeRef, index: u32) -> TypeRef =
        llvm::LLVMStructGetTypeAtIndex;
    fn warp_is_packed_struct(struct_ty: TypeRef) -> i32 = llvm::LLVMIsPackedStruct;
    fn warp_is_opaque_struct(struct_ty: TypeRef) -> i32 = llvm::LLVMIsOpaqueStruct;
    fn warp_is_literal_struct(struct_ty: TypeRef) -> i32 = llvm::LLVMIsLiteralStruct;

    fn warp_get_element_type(ty: TypeRef) -> TypeRef = llvm::LLVMGetElementType;
    fn warp_get_num_contained_types(ty: TypeRef) -> u32 = llvm::LLVMGetNumContainedTypes;
    fn warp_array_type(element: TypeRef, count: u64) -> TypeRef = llvm::LLVMArrayType2;
    fn warp_get_array_length(array_ty: TypeRef) -> u64 = llvm::LLVMGetArrayLength2;
    fn warp_pointer_type_in_context(context: ContextRef, address_space: u32) -> TypeRef =
        llvm::LLVMPointerTypeInContext;
    fn warp_get_pointer_address_space(pointer_ty: TypeRef) -> u32 = llvm::LLVMGetPointerAddressSpace;
    fn warp_vector_type(element: TypeRef, count: u32) -> TypeRef = llvm::LLVMVectorType;
    fn warp_scalable_vector_type(element: TypeRef, count: u32) -> TypeRef = llvm::LLVMScalableVectorType;
    fn warp_get_vector_size(vector_ty: TypeRef) -> u32 = llvm::LLVMGetVectorSize;
}

/// `type-kind` code of a type.
#[no_mangle]
pub extern "C" fn warp_get_type_kind(ty: TypeRef) -> i32 {
    // SAFETY: live type
    TypeKind::encode_llvm(unsafe { llvm::LLVMGetTypeKind(ty.as_raw()) })
}

/// Textual form of a type. The LLVM copy is disposed.
#[no_mangle]
pub extern "C" fn warp_print_type_to_string(ty: TypeRef) -> RawHostString {
    // SAFETY: live type; the result is caller-owned
    host_out(unsafe { message::take(llvm::LLVMPrintTypeToString(ty.as_raw())) })
}

#[no_mangle]
pub extern "C" fn warp_function_type(
    return_ty: TypeRef,
    params: HostArray<TypeRef>,
    is_var_arg: i32,
) -> TypeRef {
    let Some((params, count)) = host_parts(params) else {
        return TypeRef::null();
    };
    // SAFETY: count handles of live types
    TypeRef::from_raw(unsafe {
        llvm::LLVMFunctionType(return_ty.as_raw(), params.cast(), count, is_var_arg)
    })
}

/// Copy a function type's parameter types into `dest`. Returns 0 without
/// writing when `dest` holds fewer than `warp_count_param_types` elements.
#[no_mangle]
pub extern "C" fn warp_get_param_types(function_ty: TypeRef, dest: HostArray<TypeRef>) -> i32 {
    // SAFETY: live function type
    let count = unsafe { llvm::LLVMCountParamTypes(function_ty.as_raw()) };
    fill_host(dest, count, |out| {
        // SAFETY: out has room for count handles
        unsafe { llvm::LLVMGetParamTypes(function_ty.as_raw(), out.cast()) };
    })
}

#[no_mangle]
pub extern "C" fn warp_struct_type_in_context(
    context: ContextRef,
    elements: HostArray<TypeRef>,
    packed: i32,
) -> TypeRef {
    let Some((elements, count)) = host_parts(elements) else {
        return TypeRef::null();
    };
    // SAFETY: count handles of live types
    TypeRef::from_raw(unsafe {
        llvm::LLVMStructTypeInContext(context.as_raw(), elements.cast(), count, packed)
    })
}

/// A new opaque named struct.
#[no_mangle]
pub extern "C" fn warp_struct_create_named(context: ContextRef, name: RawHostString) -> TypeRef {
    let Some(name) = host_bytes(name) else {
        return TypeRef::null();
    };
    // SAFETY: live context; LLVM copies the name
    TypeRef::from_raw(unsafe {
        llvm::LLVMStructCreateNamed(context.as_raw(), name.as_ptr().cast_mut())
    })
}

/// Target extension type such as `spirv.Image`, with its type and integer
/// parameters.
#[no_mangle]
pub extern "C" fn warp_target_ext_type_in_context(
    context: ContextRef,
    name: RawHostString,
    type_params: HostArray<TypeRef>,
    int_params: HostArray<u32>,
) -> TypeRef {
    let (Some(name), Some((types, type_count)), Some((ints, int_count))) =
        (host_bytes(name), host_parts(type_params), host_parts(int_params))
    else {
        return TypeRef::null();
    };
    // SAFETY: live context and types; both counts match their arrays; LLVM copies the name
    TypeRef::from_raw(unsafe {
        llvm::LLVMTargetExtTypeInContext(
            context.as_raw(),
            name.as_ptr().cast_mut(),
            types.cast(),
            type_count,
            ints,
            int_count,
        )
    })
}

/// Struct name, empty for literal structs. Borrowed from LLVM.
#[no_mangle]
pub extern "C" fn warp_get_struct_name(struct_ty: TypeRef) -> RawHostString {
    // SAFETY: live type; the name is LLVM-owned
    host_out(unsafe { message::borrowed(llvm::LLVMGetStructName(struct_ty.as_raw())) })
}

#[no_mangle]
pub extern "C" fn warp_struct_set_body(
    struct_ty: TypeRef,
    elements: HostArray<TypeRef>,
    packed: i32,
) {
    let Some((elements, count)) = host_parts(elements) else {
        return;
    };
    // SAFETY: count handles of live types
    unsafe { llvm::LLVMStructSetBody(struct_ty.as_raw(), elements.cast(), count, packed) };
}

/// Copy a struct's element types into `dest`. Checked like
/// [`warp_get_param_types`].
#[no_mangle]
pub extern "C" fn warp_get_struct_element_types(
    struct_ty: TypeRef,
    dest: HostArray<TypeRef>,
) -> i32 {
    // SAFETY: live struct type
    let count = unsafe { llvm::LLVMCountStructElementTypes(struct_ty.as_raw()) };
    fill_host(dest, count, |out| {
        // SAFETY: out has room for count handles
        unsafe { llvm::LLVMGetStructElementTypes(struct_ty.as_raw(), out.cast()) };
    })
}

/// Copy the contained types into `dest`. Checked against
/// `warp_get_num_contained_types`.
#[no_mangle]
pub extern "C" fn warp_get_subtypes(ty: TypeRef, dest: HostArray<TypeRef>) -> i32 {
    // SAFETY: live type
    let count = unsafe { llvm::LLVMGetNumContainedTypes(ty.as_raw()) };
    fill_host(dest, count, |out| {
        // SAFETY: out has room for count handles
        unsafe { llvm::LLVMGetSubtypes(ty.as_raw(), out.cast()) };
    })
}

/// Named struct by name, or null.
#[no_mangle]
pub extern "C" fn warp_get_type_by_name(context: ContextRef, name: RawHostString) -> TypeRef {
    let Some(name) = host_bytes(name) else {
        return TypeRef::null();
    };
    // SAFETY: live context; name terminated
    TypeRef::from_raw(unsafe {
        llvm::LLVMGetTypeByName2(context.as_raw(), name.as_ptr().cast_mut())
    })
}
