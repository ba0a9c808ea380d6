//! Instruction inspection and in-place modification.
//!
//! Enum-valued properties (opcode, predicates, orderings, tail-call kind,
//! calling convention) cross as host codes in both directions.

use std::ptr;

use llvm_sys::core as llvm;
use warp_abi::{
    AtomicOrdering, AtomicRmwBinOp, CallConv, EnumDomain, IntPredicate, Opcode, RealPredicate,
    TailCallKind,
};
use warp_marshal::{HostArray, RawHostString};

use crate::handles::{BasicBlockRef, TypeRef, ValueRef};
use crate::marshal::{fill_host, host_out, host_slice, raw_parts};
use crate::message;
use crate::native::LlvmEnum;

forward! {
    fn warp_get_instruction_parent(instruction: ValueRef) -> BasicBlockRef = llvm::LLVMGetInstructionParent;
    fn warp_get_next_instruction(instruction: ValueRef) -> ValueRef = llvm::LLVMGetNextInstruction;
    fn warp_get_previous_instruction(instruction: ValueRef) -> ValueRef = llvm::LLVMGetPreviousInstruction;
    fn warp_instruction_erase_from_parent(instruction: ValueRef) = llvm::LLVMInstructionEraseFromParent;
    fn warp_instruction_remove_from_parent(instruction: ValueRef) = llvm::LLVMInstructionRemoveFromParent;
    fn warp_instruction_clone(instruction: ValueRef) -> ValueRef = llvm::LLVMInstructionClone;

    fn warp_get_num_arg_operands(call: ValueRef) -> u32 = llvm::LLVMGetNumArgOperands;
    fn warp_get_called_function_type(call: ValueRef) -> TypeRef = llvm::LLVMGetCalledFunctionType;
    fn warp_get_called_value(call: ValueRef) -> ValueRef = llvm::LLVMGetCalledValue;
    fn warp_is_tail_call(call: ValueRef) -> i32 = llvm::LLVMIsTailCall;
    fn warp_set_tail_call(call: ValueRef, tail: i32) = llvm::LLVMSetTailCall;

    fn warp_get_num_successors(terminator: ValueRef) -> u32 = llvm::LLVMGetNumSuccessors;
    fn warp_get_successor(terminator: ValueRef, index: u32) -> BasicBlockRef = llvm::LLVMGetSuccessor;
    fn warp_set_successor(terminator: ValueRef, index: u32, block: BasicBlockRef) = llvm::LLVMSetSuccessor;
    fn warp_is_conditional(branch: ValueRef) -> i32 = llvm::LLVMIsConditional;
    fn warp_get_condition(branch: ValueRef) -> ValueRef = llvm::LLVMGetCondition;
    fn warp_set_condition(branch: ValueRef, condition: ValueRef) = llvm::LLVMSetCondition;
    fn warp_add_case(switch: ValueRef, on: ValueRef, dest: BasicBlockRef) = llvm::LLVMAddCase;
    fn warp_add_destination(indirect_br: ValueRef, dest: BasicBlockRef) = llvm::LLVMAddDestination;
    fn warp_add_clause(landing_pad: ValueRef, clause: ValueRef) = llvm::LLVMAddClause;
    fn warp_set_cleanup(landing_pad: ValueRef, cleanup: i32) = llvm::LLVMSetCleanup;

    fn warp_count_incoming(phi: ValueRef) -> u32 = llvm::LLVMCountIncoming;
    fn warp_get_incoming_value(phi: ValueRef, index: u32) -> ValueRef = llvm::LLVMGetIncomingValue;
    fn warp_get_incoming_block(phi: ValueRef, index: u32) -> BasicBlockRef = llvm::LLVMGetIncomingBlock;

    fn warp_get_num_indices(instruction: ValueRef) -> u32 = llvm::LLVMGetNumIndices;
    fn warp_get_allocated_type(alloca: ValueRef) -> TypeRef = llvm::LLVMGetAllocatedType;

    fn warp_get_volatile(access: ValueRef) -> i32 = llvm::LLVMGetVolatile;
    fn warp_set_volatile(access: ValueRef, volatile: i32) = llvm::LLVMSetVolatile;
    fn warp_get_weak(cmpxchg: ValueRef) -> i32 = llvm::LLVMGetWeak;
    fn warp_set_weak(cmpxchg: ValueRef, weak: i32) = llvm::LLVMSetWeak;
    fn warp_get_nuw(arith: ValueRef) -> i32 = llvm::LLVMGetNUW;
    fn warp_set_nuw(arith: ValueRef, flag: i32) = llvm::LLVMSetNUW;
    fn warp_get_nsw(arith: ValueRef) -> i32 = llvm::LLVMGetNSW;
    fn warp_set_nsw(arith: ValueRef, flag: i32) = llvm::LLVMSetNSW;
    fn warp_get_exact(division: ValueRef) -> i32 = llvm::LLVMGetExact;
    fn warp_set_exact(division: ValueRef, flag: i32) = llvm::LLVMSetExact;

    fn warp_get_debug_loc_line(value: ValueRef) -> u32 = llvm::LLVMGetDebugLocLine;
    fn warp_get_debug_loc_column(value: ValueRef) -> u32 = llvm::LLVMGetDebugLocColumn;
}

/// `opcode` code of an instruction.
#[no_mangle]
pub extern "C" fn warp_get_instruction_opcode(instruction: ValueRef) -> i32 {
    // SAFETY: live instruction
    Opcode::encode_llvm(unsafe { llvm::LLVMGetInstructionOpcode(instruction.as_raw()) })
}

/// `int-predicate` code of an `icmp`.
#[no_mangle]
pub extern "C" fn warp_get_icmp_predicate(instruction: ValueRef) -> i32 {
    // SAFETY: live icmp
    IntPredicate::encode_llvm(unsafe { llvm::LLVMGetICmpPredicate(instruction.as_raw()) })
}

/// `real-predicate` code of an `fcmp`.
#[no_mangle]
pub extern "C" fn warp_get_fcmp_predicate(instruction: ValueRef) -> i32 {
    // SAFETY: live fcmp
    RealPredicate::encode_llvm(unsafe { llvm::LLVMGetFCmpPredicate(instruction.as_raw()) })
}

/// `tail-call-kind` code of a call.
#[no_mangle]
pub extern "C" fn warp_get_tail_call_kind(call: ValueRef) -> i32 {
    // SAFETY: live call
    TailCallKind::encode_llvm(unsafe { llvm::LLVMGetTailCallKind(call.as_raw()) })
}

#[no_mangle]
pub extern "C" fn warp_set_tail_call_kind(call: ValueRef, kind: i32) {
    let kind = TailCallKind::decode_llvm(kind);
    // SAFETY: live call
    unsafe { llvm::LLVMSetTailCallKind(call.as_raw(), kind) };
}

/// `call-conv` code of a call or invoke.
#[no_mangle]
pub extern "C" fn warp_get_instruction_call_conv(call: ValueRef) -> i32 {
    // SAFETY: live call
    CallConv::encode_native(unsafe { llvm::LLVMGetInstructionCallConv(call.as_raw()) })
}

#[no_mangle]
pub extern "C" fn warp_set_instruction_call_conv(call: ValueRef, conv: i32) {
    let conv = CallConv::decode_native(conv);
    // SAFETY: live call
    unsafe { llvm::LLVMSetInstructionCallConv(call.as_raw(), conv) };
}

/// `atomic-ordering` code of a load, store, fence or atomic.
#[no_mangle]
pub extern "C" fn warp_get_ordering(access: ValueRef) -> i32 {
    // SAFETY: live memory access
    AtomicOrdering::encode_llvm(unsafe { llvm::LLVMGetOrdering(access.as_raw()) })
}

#[no_mangle]
pub extern "C" fn warp_set_ordering(access: ValueRef, ordering: i32) {
    let ordering = AtomicOrdering::decode_llvm(ordering);
    // SAFETY: live memory access
    unsafe { llvm::LLVMSetOrdering(access.as_raw(), ordering) };
}

/// `atomic-rmw-bin-op` code of an `atomicrmw`.
#[no_mangle]
pub extern "C" fn warp_get_atomic_rmw_bin_op(rmw: ValueRef) -> i32 {
    // SAFETY: live atomicrmw
    AtomicRmwBinOp::encode_llvm(unsafe { llvm::LLVMGetAtomicRMWBinOp(rmw.as_raw()) })
}

#[no_mangle]
pub extern "C" fn warp_set_atomic_rmw_bin_op(rmw: ValueRef, op: i32) {
    let op = AtomicRmwBinOp::decode_llvm(op);
    // SAFETY: live atomicrmw
    unsafe { llvm::LLVMSetAtomicRMWBinOp(rmw.as_raw(), op) };
}

#[no_mangle]
pub extern "C" fn warp_get_cmpxchg_success_ordering(cmpxchg: ValueRef) -> i32 {
    // SAFETY: live cmpxchg
    AtomicOrdering::encode_llvm(unsafe { llvm::LLVMGetCmpXchgSuccessOrdering(cmpxchg.as_raw()) })
}

#[no_mangle]
pub extern "C" fn warp_set_cmpxchg_success_ordering(cmpxchg: ValueRef, ordering: i32) {
    let ordering = AtomicOrdering::decode_llvm(ordering);
    // SAFETY: live cmpxchg
    unsafe { llvm::LLVMSetCmpXchgSuccessOrdering(cmpxchg.as_raw(), ordering) };
}

#[no_mangle]
pub extern "C" fn warp_get_cmpxchg_failure_ordering(cmpxchg: ValueRef) -> i32 {
    // SAFETY: live cmpxchg
    AtomicOrdering::encode_llvm(unsafe { llvm::LLVMGetCmpXchgFailureOrdering(cmpxchg.as_raw()) })
}

#[no_mangle]
pub extern "C" fn warp_set_cmpxchg_failure_ordering(cmpxchg: ValueRef, ordering: i32) {
    let ordering = AtomicOrdering::decode_llvm(ordering);
    // SAFETY: live cmpxchg
    unsafe { llvm::LLVMSetCmpXchgFailureOrdering(cmpxchg.as_raw(), ordering) };
}

/// `opcode` code of the cast LLVM would pick from `source` to `dest_ty`.
#[no_mangle]
pub extern "C" fn warp_get_cast_opcode(
    source: ValueRef,
    source_signed: i32,
    dest_ty: TypeRef,
    dest_signed: i32,
) -> i32 {
    // SAFETY: live value and type
    Opcode::encode_llvm(unsafe {
        llvm::LLVMGetCastOpcode(source.as_raw(), source_signed, dest_ty.as_raw(), dest_signed)
    })
}

/// Add `values[i]` incoming from `blocks[i]`. The arrays must have equal
/// length; a mismatch adds nothing and returns 0.
#[no_mangle]
pub extern "C" fn warp_add_incoming(
    phi: ValueRef,
    values: HostArray<ValueRef>,
    blocks: HostArray<BasicBlockRef>,
) -> i32 {
    let (Some(values), Some(blocks)) = (host_slice(values), host_slice(blocks)) else {
        return 0;
    };
    if values.len() != blocks.len() {
        tracing::warn!(
            values = values.len(),
            blocks = blocks.len(),
            "phi incoming length mismatch"
        );
        return 0;
    }
    let (Some((values, count)), Some((blocks, _))) = (raw_parts(values), raw_parts(blocks)) else {
        return 0;
    };
    // SAFETY: count values and count blocks
    unsafe { llvm::LLVMAddIncoming(phi.as_raw(), values.cast(), blocks.cast(), count) };
    1
}

/// Copy the indices of an `extractvalue` or `insertvalue` into `dest`.
/// Checked against `warp_get_num_indices`.
#[no_mangle]
pub extern "C" fn warp_get_indices(instruction: ValueRef, dest: HostArray<u32>) -> i32 {
    // SAFETY: live instruction
    let count = unsafe { llvm::LLVMGetNumIndices(instruction.as_raw()) };
    fill_host(dest, count, |out| {
        // SAFETY: LLVM's index list holds count entries; out has room for them
        unsafe {
            let indices = llvm::LLVMGetIndices(instruction.as_raw());
            if !indices.is_null() {
                ptr::copy_nonoverlapping(indices, out, count as usize);
            }
        }
    })
}

/// Directory of the attached debug location. Borrowed from LLVM.
#[no_mangle]
pub extern "C" fn warp_get_debug_loc_directory(value: ValueRef) -> RawHostString {
    let mut len = 0;
    // SAFETY: live value; the string is LLVM-owned
    host_out(unsafe {
        let ptr = llvm::LLVMGetDebugLocDirectory(value.as_raw(), &mut len);
        message::borrowed_sized(ptr, len as usize)
    })
}

/// File name of the attached debug location. Borrowed from LLVM.
#[no_mangle]
pub extern "C" fn warp_get_debug_loc_filename(value: ValueRef) -> RawHostString {
    let mut len = 0;
    // SAFETY: live value; the string is LLVM-owned
    host_out(unsafe {
        let ptr = llvm::LLVMGetDebugLocFilename(value.as_raw(), &mut len);
        message::borrowed_sized(ptr, len as usize)
    })
}
