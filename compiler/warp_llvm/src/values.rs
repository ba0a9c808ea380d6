//! Values in general, use lists, operands and constants.

use llvm_sys::core as llvm;
use warp_abi::{InlineAsmDialect, Opcode, ValueKind};
use warp_marshal::{HostArray, RawHostString};

use crate::handles::{ContextRef, TypeRef, UseRef, ValueRef};
use crate::marshal::{byte_len, host_bytes, host_out, host_parts};
use crate::message;
use crate::native::LlvmEnum;

forward! {
    fn warp_type_of(value: ValueRef) -> TypeRef = llvm::LLVMTypeOf;
    fn warp_dump_value(value: ValueRef) = llvm::LLVMDumpValue;
    fn warp_replace_all_uses_with(old: ValueRef, new: ValueRef) = llvm::LLVMReplaceAllUsesWith;
    fn warp_is_constant(value: ValueRef) -> i32 = llvm::LLVMIsConstant;
    fn warp_is_undef(value: ValueRef) -> i32 = llvm::LLVMIsUndef;
    fn warp_is_poison(value: ValueRef) -> i32 = llvm::LLVMIsPoison;
    fn warp_is_null(value: ValueRef) -> i32 = llvm::LLVMIsNull;

    fn warp_get_first_use(value: ValueRef) -> UseRef = llvm::LLVMGetFirstUse;
    fn warp_get_next_use(edge: UseRef) -> UseRef = llvm::LLVMGetNextUse;
    fn warp_get_user(edge: UseRef) -> ValueRef = llvm::LLVMGetUser;
    fn warp_get_used_value(edge: UseRef) -> ValueRef = llvm::LLVMGetUsedValue;

    fn warp_get_operand(user: ValueRef, index: u32) -> ValueRef = llvm::LLVMGetOperand;
    fn warp_set_operand(user: ValueRef, index: u32, value: ValueRef) = llvm::LLVMSetOperand;
    fn warp_get_num_operands(user: ValueRef) -> i32 = llvm::LLVMGetNumOperands;

    fn warp_const_null(ty: TypeRef) -> ValueRef = llvm::LLVMConstNull;
    fn warp_const_all_ones(ty: TypeRef) -> ValueRef = llvm::LLVMConstAllOnes;
    fn warp_get_undef(ty: TypeRef) -> ValueRef = llvm::LLVMGetUndef;
    fn warp_get_poison(ty: TypeRef) -> ValueRef = llvm::LLVMGetPoison;
    fn warp_const_pointer_null(ty: TypeRef) -> ValueRef = llvm::LLVMConstPointerNull;

    /// Integer constant; `sign_extend` widens `value` from 64 bits as signed.
    fn warp_const_int(ty: TypeRef, value: u64, sign_extend: i32) -> ValueRef = llvm::LLVMConstInt;
    fn warp_const_int_get_zext_value(constant: ValueRef) -> u64 = llvm::LLVMConstIntGetZExtValue;
    fn warp_const_int_get_sext_value(constant: ValueRef) -> i64 = llvm::LLVMConstIntGetSExtValue;
    fn warp_const_real(ty: TypeRef, value: f64) -> ValueRef = llvm::LLVMConstReal;
    fn warp_is_constant_string(constant: ValueRef) -> i32 = llvm::LLVMIsConstantString;
    fn warp_get_aggregate_element(constant: ValueRef, index: u32) -> ValueRef = llvm::LLVMGetAggregateElement;
    /// Element `index` of a `ConstantDataSequential` (a string or numeric array).
    fn warp_get_element_as_constant(constant: ValueRef, index: u32) -> ValueRef = llvm::LLVMGetElementAsConstant;

    fn warp_const_neg(constant: ValueRef) -> ValueRef = llvm::LLVMConstNeg;
    fn warp_const_not(constant: ValueRef) -> ValueRef = llvm::LLVMConstNot;
    fn warp_const_add(lhs: ValueRef, rhs: ValueRef) -> ValueRef = llvm::LLVMConstAdd;
    fn warp_const_sub(lhs: ValueRef, rhs: ValueRef) -> ValueRef = llvm::LLVMConstSub;
    fn warp_const_bit_cast(constant: ValueRef, ty: TypeRef) -> ValueRef = llvm::LLVMConstBitCast;
    fn warp_const_int_to_ptr(constant: ValueRef, ty: TypeRef) -> ValueRef = llvm::LLVMConstIntToPtr;
    fn warp_const_ptr_to_int(constant: ValueRef, ty: TypeRef) -> ValueRef = llvm::LLVMConstPtrToInt;
    fn warp_const_pointer_cast(constant: ValueRef, ty: TypeRef) -> ValueRef = llvm::LLVMConstPointerCast;
    fn warp_const_trunc_or_bit_cast(constant: ValueRef, ty: TypeRef) -> ValueRef =
        llvm::LLVMConstTruncOrBitCast;
}

/// `value-kind` code of a value.
#[no_mangle]
pub extern "C" fn warp_get_value_kind(value: ValueRef) -> i32 {
    // SAFETY: live value
    ValueKind::encode_llvm(unsafe { llvm::LLVMGetValueKind(value.as_raw()) })
}

/// Value name, interior NULs included. Borrowed from LLVM.
#[no_mangle]
pub extern "C" fn warp_get_value_name(value: ValueRef) -> RawHostString {
    let mut len = 0;
    // SAFETY: live value; the name is LLVM-owned and valid for len bytes
    host_out(unsafe {
        let ptr = llvm::LLVMGetValueName2(value.as_raw(), &mut len);
        message::borrowed_sized(ptr, len)
    })
}

#[no_mangle]
pub extern "C" fn warp_set_value_name(value: ValueRef, name: RawHostString) {
    let Some(name) = host_bytes(name) else {
        return;
    };
    // SAFETY: live value; LLVM copies len bytes
    unsafe { llvm::LLVMSetValueName2(value.as_raw(), name.as_ptr().cast_mut(), name.len()) };
}

/// Textual form of a value. The LLVM copy is disposed.
#[no_mangle]
pub extern "C" fn warp_print_value_to_string(value: ValueRef) -> RawHostString {
    // SAFETY: live value; the result is caller-owned
    host_out(unsafe { message::take(llvm::LLVMPrintValueToString(value.as_raw())) })
}

/// Integer constant from 64-bit words, least significant first.
#[no_mangle]
pub extern "C" fn warp_const_int_of_arbitrary_precision(
    ty: TypeRef,
    words: HostArray<u64>,
) -> ValueRef {
    let Some((words, count)) = host_parts(words) else {
        return ValueRef::null();
    };
    // SAFETY: count words
    ValueRef::from_raw(unsafe { llvm::LLVMConstIntOfArbitraryPrecision(ty.as_raw(), count, words) })
}

/// Integer constant parsed from `text` in `radix`.
#[no_mangle]
pub extern "C" fn warp_const_int_of_string(
    ty: TypeRef,
    text: RawHostString,
    radix: u8,
) -> ValueRef {
    let Some(text) = host_bytes(text) else {
        return ValueRef::null();
    };
    let Some(len) = byte_len(&text) else {
        return ValueRef::null();
    };
    // SAFETY: text valid for len bytes
    ValueRef::from_raw(unsafe {
        llvm::LLVMConstIntOfStringAndSize(ty.as_raw(), text.as_ptr().cast_mut(), len, radix)
    })
}

/// Value of a floating-point constant as `double`. `loses_info`, when not
/// null, receives 1 if the conversion was inexact.
#[no_mangle]
pub extern "C" fn warp_const_real_get_double(constant: ValueRef, loses_info: *mut i32) -> f64 {
    let mut lost = 0;
    // SAFETY: live constant; lost is a local
    let value = unsafe { llvm::LLVMConstRealGetDouble(constant.as_raw(), &mut lost) };
    if !loses_info.is_null() {
        // SAFETY: the host passes null or a writable slot
        unsafe { loses_info.write(lost) };
    }
    value
}

/// Constant byte array from `text`, narrowed with substitution.
#[no_mangle]
pub extern "C" fn warp_const_string_in_context(
    context: ContextRef,
    text: RawHostString,
    dont_null_terminate: i32,
) -> ValueRef {
    let Some(text) = host_bytes(text) else {
        return ValueRef::null();
    };
    let Some(len) = byte_len(&text) else {
        return ValueRef::null();
    };
    // SAFETY: text valid for len bytes; LLVM copies them
    ValueRef::from_raw(unsafe {
        llvm::LLVMConstStringInContext(
            context.as_raw(),
            text.as_ptr().cast_mut(),
            len,
            dont_null_terminate,
        )
    })
}

/// Contents of a constant data sequence, interior NULs included. Borrowed
/// from LLVM.
#[no_mangle]
pub extern "C" fn warp_get_as_string(constant: ValueRef) -> RawHostString {
    let mut len = 0;
    // SAFETY: live constant; the data is LLVM-owned and valid for len bytes
    host_out(unsafe {
        let ptr = llvm::LLVMGetAsString(constant.as_raw(), &mut len);
        message::borrowed_sized(ptr, len)
    })
}

#[no_mangle]
pub extern "C" fn warp_const_struct_in_context(
    context: ContextRef,
    fields: HostArray<ValueRef>,
    packed: i32,
) -> ValueRef {
    let Some((fields, count)) = host_parts(fields) else {
        return ValueRef::null();
    };
    // SAFETY: count live constants
    ValueRef::from_raw(unsafe {
        llvm::LLVMConstStructInContext(context.as_raw(), fields.cast(), count, packed)
    })
}

#[no_mangle]
pub extern "C" fn warp_const_named_struct(
    struct_ty: TypeRef,
    fields: HostArray<ValueRef>,
) -> ValueRef {
    let Some((fields, count)) = host_parts(fields) else {
        return ValueRef::null();
    };
    // SAFETY: count live constants
    ValueRef::from_raw(unsafe {
        llvm::LLVMConstNamedStruct(struct_ty.as_raw(), fields.cast(), count)
    })
}

#[no_mangle]
pub extern "C" fn warp_const_array(element_ty: TypeRef, elements: HostArray<ValueRef>) -> ValueRef {
    let Some((elements, count)) = host_parts(elements) else {
        return ValueRef::null();
    };
    // SAFETY: count live constants
    ValueRef::from_raw(unsafe {
        llvm::LLVMConstArray2(element_ty.as_raw(), elements.cast(), u64::from(count))
    })
}

#[no_mangle]
pub extern "C" fn warp_const_vector(elements: HostArray<ValueRef>) -> ValueRef {
    let Some((elements, count)) = host_parts(elements) else {
        return ValueRef::null();
    };
    // SAFETY: count live constants
    ValueRef::from_raw(unsafe { llvm::LLVMConstVector(elements.cast(), count) })
}

/// `opcode` code of a constant expression.
#[no_mangle]
pub extern "C" fn warp_get_const_opcode(constant: ValueRef) -> i32 {
    // SAFETY: live constant expression
    Opcode::encode_llvm(unsafe { llvm::LLVMGetConstOpcode(constant.as_raw()) })
}

#[no_mangle]
pub extern "C" fn warp_const_gep(
    source_ty: TypeRef,
    pointer: ValueRef,
    indices: HostArray<ValueRef>,
) -> ValueRef {
    let Some((indices, count)) = host_parts(indices) else {
        return ValueRef::null();
    };
    // SAFETY: count live constants
    ValueRef::from_raw(unsafe {
        llvm::LLVMConstGEP2(source_ty.as_raw(), pointer.as_raw(), indices.cast(), count)
    })
}

#[no_mangle]
pub extern "C" fn warp_const_in_bounds_gep(
    source_ty: TypeRef,
    pointer: ValueRef,
    indices: HostArray<ValueRef>,
) -> ValueRef {
    let Some((indices, count)) = host_parts(indices) else {
        return ValueRef::null();
    };
    // SAFETY: count live constants
    ValueRef::from_raw(unsafe {
        llvm::LLVMConstInBoundsGEP2(source_ty.as_raw(), pointer.as_raw(), indices.cast(), count)
    })
}

/// Inline assembly callee of type `function_ty`. `dialect` is an
/// `inline-asm-dialect` code.
#[no_mangle]
pub extern "C" fn warp_get_inline_asm(
    function_ty: TypeRef,
    asm: RawHostString,
    constraints: RawHostString,
    has_side_effects: i32,
    is_align_stack: i32,
    dialect: i32,
    can_throw: i32,
) -> ValueRef {
    let dialect = InlineAsmDialect::decode_llvm(dialect);
    let (Some(asm), Some(constraints)) = (host_bytes(asm), host_bytes(constraints)) else {
        return ValueRef::null();
    };
    // SAFETY: both strings valid for their lengths; LLVM copies them
    ValueRef::from_raw(unsafe {
        llvm::LLVMGetInlineAsm(
            function_ty.as_raw(),
            asm.as_ptr().cast_mut(),
            asm.len(),
            constraints.as_ptr().cast_mut(),
            constraints.len(),
            has_side_effects,
            is_align_stack,
            dialect,
            can_throw,
        )
    })
}
