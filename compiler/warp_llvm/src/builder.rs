//! Instruction builder.
//!
//! Every `warp_build_*` that produces a named value takes the name as its
//! last parameter; a malformed name builds nothing and returns null.
//! Opcodes, predicates and orderings arrive as host codes.

use llvm_sys::core as llvm;
use warp_abi::{AtomicOrdering, AtomicRmwBinOp, EnumDomain, IntPredicate, Opcode, RealPredicate};
use warp_marshal::{HostArray, RawHostString};

use crate::handles::{BasicBlockRef, BuilderRef, ContextRef, OperandBundleRef, TypeRef, ValueRef};
use crate::marshal::{host_bytes, host_parts};
use crate::native::LlvmEnum;

/// Forwarders whose LLVM entry point ends in a `const char *Name`.
macro_rules! build_named {
    ($(
        $(#[$meta:meta])*
        fn $name:ident($($arg:ident: $ty:ty),* $(,)?) = $llvm:path;
    )+) => {
        $(
            $(#[$meta])*
            #[no_mangle]
            pub extern "C" fn $name(builder: BuilderRef, $($arg: $ty,)* name: RawHostString) -> ValueRef {
                let Some(name) = host_bytes(name) else {
                    return ValueRef::null();
                };
                // SAFETY: live builder and operands; LLVM copies the name
                ValueRef::from_raw(unsafe {
                    $llvm(builder.as_raw(), $($crate::abi::Abi::into_raw($arg),)* name.as_ptr().cast_mut())
                })
            }
        )+
    };
}

forward! {
    fn warp_create_builder_in_context(context: ContextRef) -> BuilderRef = llvm::LLVMCreateBuilderInContext;
    fn warp_dispose_builder(builder: BuilderRef) = llvm::LLVMDisposeBuilder;
    fn warp_position_builder(builder: BuilderRef, block: BasicBlockRef, instruction: ValueRef) =
        llvm::LLVMPositionBuilder;
    fn warp_position_builder_before(builder: BuilderRef, instruction: ValueRef) =
        llvm::LLVMPositionBuilderBefore;
    fn warp_position_builder_at_end(builder: BuilderRef, block: BasicBlockRef) = llvm::LLVMPositionBuilderAtEnd;
    fn warp_get_insert_block(builder: BuilderRef) -> BasicBlockRef = llvm::LLVMGetInsertBlock;
    fn warp_clear_insertion_position(builder: BuilderRef) = llvm::LLVMClearInsertionPosition;

    fn warp_build_ret_void(builder: BuilderRef) -> ValueRef = llvm::LLVMBuildRetVoid;
    fn warp_build_ret(builder: BuilderRef, value: ValueRef) -> ValueRef = llvm::LLVMBuildRet;
    fn warp_build_br(builder: BuilderRef, dest: BasicBlockRef) -> ValueRef = llvm::LLVMBuildBr;
    fn warp_build_cond_br(
        builder: BuilderRef,
        condition: ValueRef,
        then_block: BasicBlockRef,
        else_block: BasicBlockRef,
    ) -> ValueRef = llvm::LLVMBuildCondBr;
    /// Cases are added with `warp_add_case`.
    fn warp_build_switch(builder: BuilderRef, value: ValueRef, default: BasicBlockRef, cases: u32) -> ValueRef =
        llvm::LLVMBuildSwitch;
    /// Destinations are added with `warp_add_destination`.
    fn warp_build_indirect_br(builder: BuilderRef, address: ValueRef, dests: u32) -> ValueRef =
        llvm::LLVMBuildIndirectBr;
    fn warp_build_unreachable(builder: BuilderRef) -> ValueRef = llvm::LLVMBuildUnreachable;
    fn warp_build_resume(builder: BuilderRef, exception: ValueRef) -> ValueRef = llvm::LLVMBuildResume;
    fn warp_build_store(builder: BuilderRef, value: ValueRef, pointer: ValueRef) -> ValueRef =
        llvm::LLVMBuildStore;
}

build_named! {
    fn warp_build_add(lhs: ValueRef, rhs: ValueRef) = llvm::LLVMBuildAdd;
    fn warp_build_nsw_add(lhs: ValueRef, rhs: ValueRef) = llvm::LLVMBuildNSWAdd;
    fn warp_build_nuw_add(lhs: ValueRef, rhs: ValueRef) = llvm::LLVMBuildNUWAdd;
    fn warp_build_fadd(lhs: ValueRef, rhs: ValueRef) = llvm::LLVMBuildFAdd;
    fn warp_build_sub(lhs: ValueRef, rhs: ValueRef) = llvm::LLVMBuildSub;
    fn warp_build_fsub(lhs: ValueRef, rhs: ValueRef) = llvm::LLVMBuildFSub;
    fn warp_build_mul(lhs: ValueRef, rhs: ValueRef) = llvm::LLVMBuildMul;
    fn warp_build_fmul(lhs: ValueRef, rhs: ValueRef) = llvm::LLVMBuildFMul;
    fn warp_build_udiv(lhs: ValueRef, rhs: ValueRef) = llvm::LLVMBuildUDiv;
    fn warp_build_sdiv(lhs: ValueRef, rhs: ValueRef) = llvm::LLVMBuildSDiv;
    fn warp_build_exact_sdiv(lhs: ValueRef, rhs: ValueRef) = llvm::LLVMBuildExactSDiv;
    fn warp_build_fdiv(lhs: ValueRef, rhs: ValueRef) = llvm::LLVMBuildFDiv;
    fn warp_build_urem(lhs: ValueRef, rhs: ValueRef) = llvm::LLVMBuildURem;
    fn warp_build_srem(lhs: ValueRef, rhs: ValueRef) = llvm::LLVMBuildSRem;
    fn warp_build_frem(lhs: ValueRef, rhs: ValueRef) = llvm::LLVMBuildFRem;
    fn warp_build_shl(lhs: ValueRef, rhs: ValueRef) = llvm::LLVMBuildShl;
    fn warp_build_lshr(lhs: ValueRef, rhs: ValueRef) = llvm::LLVMBuildLShr;
    fn warp_build_ashr(lhs: ValueRef, rhs: ValueRef) = llvm::LLVMBuildAShr;
    fn warp_build_and(lhs: ValueRef, rhs: ValueRef) = llvm::LLVMBuildAnd;
    fn warp_build_or(lhs: ValueRef, rhs: ValueRef) = llvm::LLVMBuildOr;
    fn warp_build_xor(lhs: ValueRef, rhs: ValueRef) = llvm::LLVMBuildXor;
    fn warp_build_neg(value: ValueRef) = llvm::LLVMBuildNeg;
    fn warp_build_fneg(value: ValueRef) = llvm::LLVMBuildFNeg;
    fn warp_build_not(value: ValueRef) = llvm::LLVMBuildNot;
    fn warp_build_freeze(value: ValueRef) = llvm::LLVMBuildFreeze;

    fn warp_build_alloca(ty: TypeRef) = llvm::LLVMBuildAlloca;
    fn warp_build_array_alloca(ty: TypeRef, count: ValueRef) = llvm::LLVMBuildArrayAlloca;
    fn warp_build_load(ty: TypeRef, pointer: ValueRef) = llvm::LLVMBuildLoad2;
    fn warp_build_struct_gep(struct_ty: TypeRef, pointer: ValueRef, index: u32) = llvm::LLVMBuildStructGEP2;
    fn warp_build_ptr_diff(element_ty: TypeRef, lhs: ValueRef, rhs: ValueRef) = llvm::LLVMBuildPtrDiff2;
    fn warp_build_va_arg(list: ValueRef, ty: TypeRef) = llvm::LLVMBuildVAArg;

    fn warp_build_trunc(value: ValueRef, dest_ty: TypeRef) = llvm::LLVMBuildTrunc;
    fn warp_build_zext(value: ValueRef, dest_ty: TypeRef) = llvm::LLVMBuildZExt;
    fn warp_build_sext(value: ValueRef, dest_ty: TypeRef) = llvm::LLVMBuildSExt;
    fn warp_build_fp_to_ui(value: ValueRef, dest_ty: TypeRef) = llvm::LLVMBuildFPToUI;
    fn warp_build_fp_to_si(value: ValueRef, dest_ty: TypeRef) = llvm::LLVMBuildFPToSI;
    fn warp_build_ui_to_fp(value: ValueRef, dest_ty: TypeRef) = llvm::LLVMBuildUIToFP;
    fn warp_build_si_to_fp(value: ValueRef, dest_ty: TypeRef) = llvm::LLVMBuildSIToFP;
    fn warp_build_fp_trunc(value: ValueRef, dest_ty: TypeRef) = llvm::LLVMBuildFPTrunc;
    fn warp_build_fp_ext(value: ValueRef, dest_ty: TypeRef) = llvm::LLVMBuildFPExt;
    fn warp_build_ptr_to_int(value: ValueRef, dest_ty: TypeRef) = llvm::LLVMBuildPtrToInt;
    fn warp_build_int_to_ptr(value: ValueRef, dest_ty: TypeRef) = llvm::LLVMBuildIntToPtr;
    fn warp_build_bit_cast(value: ValueRef, dest_ty: TypeRef) = llvm::LLVMBuildBitCast;
    fn warp_build_pointer_cast(value: ValueRef, dest_ty: TypeRef) = llvm::LLVMBuildPointerCast;
    fn warp_build_int_cast(value: ValueRef, dest_ty: TypeRef, is_signed: i32) = llvm::LLVMBuildIntCast2;

    fn warp_build_phi(ty: TypeRef) = llvm::LLVMBuildPhi;
    fn warp_build_select(condition: ValueRef, then_value: ValueRef, else_value: ValueRef) = llvm::LLVMBuildSelect;
    fn warp_build_extract_value(aggregate: ValueRef, index: u32) = llvm::LLVMBuildExtractValue;
    fn warp_build_insert_value(aggregate: ValueRef, element: ValueRef, index: u32) = llvm::LLVMBuildInsertValue;
    fn warp_build_extract_element(vector: ValueRef, index: ValueRef) = llvm::LLVMBuildExtractElement;
    fn warp_build_insert_element(vector: ValueRef, element: ValueRef, index: ValueRef) =
        llvm::LLVMBuildInsertElement;
    fn warp_build_is_null(value: ValueRef) = llvm::LLVMBuildIsNull;
    fn warp_build_is_not_null(value: ValueRef) = llvm::LLVMBuildIsNotNull;
    /// Clauses are added with `warp_add_clause`.
    fn warp_build_landing_pad(ty: TypeRef, personality: ValueRef, clauses: u32) = llvm::LLVMBuildLandingPad;
}

#[no_mangle]
pub extern "C" fn warp_build_aggregate_ret(
    builder: BuilderRef,
    values: HostArray<ValueRef>,
) -> ValueRef {
    let Some((values, count)) = host_parts(values) else {
        return ValueRef::null();
    };
    // SAFETY: count live values
    ValueRef::from_raw(unsafe {
        llvm::LLVMBuildAggregateRet(builder.as_raw(), values.cast(), count)
    })
}

/// Binary operator by `opcode` code. A non-binary opcode builds nothing.
#[no_mangle]
pub extern "C" fn warp_build_bin_op(
    builder: BuilderRef,
    op: i32,
    lhs: ValueRef,
    rhs: ValueRef,
    name: RawHostString,
) -> ValueRef {
    let op = Opcode::decode(op);
    if !op.is_binary() {
        tracing::warn!(%op, "not a binary operator");
        return ValueRef::null();
    }
    let Some(name) = host_bytes(name) else {
        return ValueRef::null();
    };
    // SAFETY: live builder and operands
    ValueRef::from_raw(unsafe {
        llvm::LLVMBuildBinOp(
            builder.as_raw(),
            op.to_llvm(),
            lhs.as_raw(),
            rhs.as_raw(),
            name.as_ptr().cast_mut(),
        )
    })
}

/// Cast by `opcode` code. A non-cast opcode builds nothing.
#[no_mangle]
pub extern "C" fn warp_build_cast(
    builder: BuilderRef,
    op: i32,
    value: ValueRef,
    dest_ty: TypeRef,
    name: RawHostString,
) -> ValueRef {
    let op = Opcode::decode(op);
    if !op.is_cast() {
        tracing::warn!(%op, "not a cast");
        return ValueRef::null();
    }
    let Some(name) = host_bytes(name) else {
        return ValueRef::null();
    };
    // SAFETY: live builder, value and type
    ValueRef::from_raw(unsafe {
        llvm::LLVMBuildCast(
            builder.as_raw(),
            op.to_llvm(),
            value.as_raw(),
            dest_ty.as_raw(),
            name.as_ptr().cast_mut(),
        )
    })
}

/// `icmp` with an `int-predicate` code.
#[no_mangle]
pub extern "C" fn warp_build_icmp(
    builder: BuilderRef,
    predicate: i32,
    lhs: ValueRef,
    rhs: ValueRef,
    name: RawHostString,
) -> ValueRef {
    let predicate = IntPredicate::decode_llvm(predicate);
    let Some(name) = host_bytes(name) else {
        return ValueRef::null();
    };
    // SAFETY: live builder and operands
    ValueRef::from_raw(unsafe {
        llvm::LLVMBuildICmp(
            builder.as_raw(),
            predicate,
            lhs.as_raw(),
            rhs.as_raw(),
            name.as_ptr().cast_mut(),
        )
    })
}

/// `fcmp` with a `real-predicate` code.
#[no_mangle]
pub extern "C" fn warp_build_fcmp(
    builder: BuilderRef,
    predicate: i32,
    lhs: ValueRef,
    rhs: ValueRef,
    name: RawHostString,
) -> ValueRef {
    let predicate = RealPredicate::decode_llvm(predicate);
    let Some(name) = host_bytes(name) else {
        return ValueRef::null();
    };
    // SAFETY: live builder and operands
    ValueRef::from_raw(unsafe {
        llvm::LLVMBuildFCmp(
            builder.as_raw(),
            predicate,
            lhs.as_raw(),
            rhs.as_raw(),
            name.as_ptr().cast_mut(),
        )
    })
}

#[no_mangle]
pub extern "C" fn warp_build_gep(
    builder: BuilderRef,
    source_ty: TypeRef,
    pointer: ValueRef,
    indices: HostArray<ValueRef>,
    name: RawHostString,
) -> ValueRef {
    let (Some((indices, count)), Some(name)) = (host_parts(indices), host_bytes(name)) else {
        return ValueRef::null();
    };
    // SAFETY: live builder and operands; count indices
    ValueRef::from_raw(unsafe {
        llvm::LLVMBuildGEP2(
            builder.as_raw(),
            source_ty.as_raw(),
            pointer.as_raw(),
            indices.cast(),
            count,
            name.as_ptr().cast_mut(),
        )
    })
}

#[no_mangle]
pub extern "C" fn warp_build_in_bounds_gep(
    builder: BuilderRef,
    source_ty: TypeRef,
    pointer: ValueRef,
    indices: HostArray<ValueRef>,
    name: RawHostString,
) -> ValueRef {
    let (Some((indices, count)), Some(name)) = (host_parts(indices), host_bytes(name)) else {
        return ValueRef::null();
    };
    // SAFETY: live builder and operands; count indices
    ValueRef::from_raw(unsafe {
        llvm::LLVMBuildInBoundsGEP2(
            builder.as_raw(),
            source_ty.as_raw(),
            pointer.as_raw(),
            indices.cast(),
            count,
            name.as_ptr().cast_mut(),
        )
    })
}

/// Private constant global holding `text`, and a pointer to it.
#[no_mangle]
pub extern "C" fn warp_build_global_string_ptr(
    builder: BuilderRef,
    text: RawHostString,
    name: RawHostString,
) -> ValueRef {
    let (Some(text), Some(name)) = (host_bytes(text), host_bytes(name)) else {
        return ValueRef::null();
    };
    // SAFETY: live builder positioned in a function; LLVM copies both strings
    ValueRef::from_raw(unsafe {
        llvm::LLVMBuildGlobalStringPtr(
            builder.as_raw(),
            text.as_ptr().cast_mut(),
            name.as_ptr().cast_mut(),
        )
    })
}

#[no_mangle]
pub extern "C" fn warp_build_call(
    builder: BuilderRef,
    function_ty: TypeRef,
    callee: ValueRef,
    args: HostArray<ValueRef>,
    name: RawHostString,
) -> ValueRef {
    let (Some((args, count)), Some(name)) = (host_parts(args), host_bytes(name)) else {
        return ValueRef::null();
    };
    // SAFETY: live builder and operands; count arguments
    ValueRef::from_raw(unsafe {
        llvm::LLVMBuildCall2(
            builder.as_raw(),
            function_ty.as_raw(),
            callee.as_raw(),
            args.cast(),
            count,
            name.as_ptr().cast_mut(),
        )
    })
}

#[no_mangle]
pub extern "C" fn warp_build_invoke(
    builder: BuilderRef,
    function_ty: TypeRef,
    callee: ValueRef,
    args: HostArray<ValueRef>,
    then_block: BasicBlockRef,
    catch_block: BasicBlockRef,
    name: RawHostString,
) -> ValueRef {
    let (Some((args, count)), Some(name)) = (host_parts(args), host_bytes(name)) else {
        return ValueRef::null();
    };
    // SAFETY: live builder, operands and blocks; count arguments
    ValueRef::from_raw(unsafe {
        llvm::LLVMBuildInvoke2(
            builder.as_raw(),
            function_ty.as_raw(),
            callee.as_raw(),
            args.cast(),
            count,
            then_block.as_raw(),
            catch_block.as_raw(),
            name.as_ptr().cast_mut(),
        )
    })
}

/// `call` carrying operand bundles. LLVM copies the bundles.
#[no_mangle]
pub extern "C" fn warp_build_call_with_operand_bundles(
    builder: BuilderRef,
    function_ty: TypeRef,
    callee: ValueRef,
    args: HostArray<ValueRef>,
    bundles: HostArray<OperandBundleRef>,
    name: RawHostString,
) -> ValueRef {
    let (Some((args, arg_count)), Some((bundles, bundle_count)), Some(name)) =
        (host_parts(args), host_parts(bundles), host_bytes(name))
    else {
        return ValueRef::null();
    };
    // SAFETY: live builder, operands and bundles; both counts match their arrays
    ValueRef::from_raw(unsafe {
        llvm::LLVMBuildCallWithOperandBundles(
            builder.as_raw(),
            function_ty.as_raw(),
            callee.as_raw(),
            args.cast(),
            arg_count,
            bundles.cast(),
            bundle_count,
            name.as_ptr().cast_mut(),
        )
    })
}

/// `invoke` carrying operand bundles. LLVM copies the bundles.
#[no_mangle]
pub extern "C" fn warp_build_invoke_with_operand_bundles(
    builder: BuilderRef,
    function_ty: TypeRef,
    callee: ValueRef,
    args: HostArray<ValueRef>,
    then_block: BasicBlockRef,
    catch_block: BasicBlockRef,
    bundles: HostArray<OperandBundleRef>,
    name: RawHostString,
) -> ValueRef {
    let (Some((args, arg_count)), Some((bundles, bundle_count)), Some(name)) =
        (host_parts(args), host_parts(bundles), host_bytes(name))
    else {
        return ValueRef::null();
    };
    // SAFETY: live builder, operands, blocks and bundles; both counts match their arrays
    ValueRef::from_raw(unsafe {
        llvm::LLVMBuildInvokeWithOperandBundles(
            builder.as_raw(),
            function_ty.as_raw(),
            callee.as_raw(),
            args.cast(),
            arg_count,
            then_block.as_raw(),
            catch_block.as_raw(),
            bundles.cast(),
            bundle_count,
            name.as_ptr().cast_mut(),
        )
    })
}

/// `callbr` falling through to `default_dest`, with `indirect_dests` as the
/// other targets (inline assembly `asm goto`).
#[no_mangle]
pub extern "C" fn warp_build_call_br(
    builder: BuilderRef,
    function_ty: TypeRef,
    callee: ValueRef,
    default_dest: BasicBlockRef,
    indirect_dests: HostArray<BasicBlockRef>,
    args: HostArray<ValueRef>,
    bundles: HostArray<OperandBundleRef>,
    name: RawHostString,
) -> ValueRef {
    let Some((dests, dest_count)) = host_parts(indirect_dests) else {
        return ValueRef::null();
    };
    let (Some((args, arg_count)), Some((bundles, bundle_count)), Some(name)) =
        (host_parts(args), host_parts(bundles), host_bytes(name))
    else {
        return ValueRef::null();
    };
    // SAFETY: live builder, operands, blocks and bundles; every count matches its array
    ValueRef::from_raw(unsafe {
        llvm::LLVMBuildCallBr(
            builder.as_raw(),
            function_ty.as_raw(),
            callee.as_raw(),
            default_dest.as_raw(),
            dests.cast(),
            dest_count,
            args.cast(),
            arg_count,
            bundles.cast(),
            bundle_count,
            name.as_ptr().cast_mut(),
        )
    })
}

/// `fence` with an `atomic-ordering` code.
#[no_mangle]
pub extern "C" fn warp_build_fence(
    builder: BuilderRef,
    ordering: i32,
    single_thread: i32,
    name: RawHostString,
) -> ValueRef {
    let ordering = AtomicOrdering::decode_llvm(ordering);
    let Some(name) = host_bytes(name) else {
        return ValueRef::null();
    };
    // SAFETY: live builder
    ValueRef::from_raw(unsafe {
        llvm::LLVMBuildFence(builder.as_raw(), ordering, single_thread, name.as_ptr().cast_mut())
    })
}

/// `atomicrmw` with `atomic-rmw-bin-op` and `atomic-ordering` codes.
#[no_mangle]
pub extern "C" fn warp_build_atomic_rmw(
    builder: BuilderRef,
    op: i32,
    pointer: ValueRef,
    value: ValueRef,
    ordering: i32,
    single_thread: i32,
) -> ValueRef {
    let op = AtomicRmwBinOp::decode_llvm(op);
    let ordering = AtomicOrdering::decode_llvm(ordering);
    // SAFETY: live builder and operands
    ValueRef::from_raw(unsafe {
        llvm::LLVMBuildAtomicRMW(
            builder.as_raw(),
            op,
            pointer.as_raw(),
            value.as_raw(),
            ordering,
            single_thread,
        )
    })
}

/// `cmpxchg` with success and failure `atomic-ordering` codes.
#[no_mangle]
pub extern "C" fn warp_build_atomic_cmpxchg(
    builder: BuilderRef,
    pointer: ValueRef,
    expected: ValueRef,
    replacement: ValueRef,
    success: i32,
    failure: i32,
    single_thread: i32,
) -> ValueRef {
    let success = AtomicOrdering::decode_llvm(success);
    let failure = AtomicOrdering::decode_llvm(failure);
    // SAFETY: live builder and operands
    ValueRef::from_raw(unsafe {
        llvm::LLVMBuildAtomicCmpXchg(
            builder.as_raw(),
            pointer.as_raw(),
            expected.as_raw(),
            replacement.as_raw(),
            success,
            failure,
            single_thread,
        )
    })
}

#[no_mangle]
pub extern "C" fn warp_build_catch_pad(
    builder: BuilderRef,
    parent: ValueRef,
    args: HostArray<ValueRef>,
    name: RawHostString,
) -> ValueRef {
    let (Some((args, count)), Some(name)) = (host_parts(args), host_bytes(name)) else {
        return ValueRef::null();
    };
    // SAFETY: live builder and parent pad; count arguments
    ValueRef::from_raw(unsafe {
        llvm::LLVMBuildCatchPad(
            builder.as_raw(),
            parent.as_raw(),
            args.cast(),
            count,
            name.as_ptr().cast_mut(),
        )
    })
}

#[no_mangle]
pub extern "C" fn warp_build_cleanup_pad(
    builder: BuilderRef,
    parent: ValueRef,
    args: HostArray<ValueRef>,
    name: RawHostString,
) -> ValueRef {
    let (Some((args, count)), Some(name)) = (host_parts(args), host_bytes(name)) else {
        return ValueRef::null();
    };
    // SAFETY: live builder; parent may be none; count arguments
    ValueRef::from_raw(unsafe {
        llvm::LLVMBuildCleanupPad(
            builder.as_raw(),
            parent.as_raw(),
            args.cast(),
            count,
            name.as_ptr().cast_mut(),
        )
    })
}
