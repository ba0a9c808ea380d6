//! Basic blocks.

use llvm_sys::core as llvm;
use warp_marshal::{HostArray, RawHostString};

use crate::handles::{BasicBlockRef, ContextRef, ValueRef};
use crate::marshal::{fill_host, host_bytes, host_out};
use crate::message;

forward! {
    fn warp_count_basic_blocks(function: ValueRef) -> u32 = llvm::LLVMCountBasicBlocks;
    fn warp_get_entry_basic_block(function: ValueRef) -> BasicBlockRef = llvm::LLVMGetEntryBasicBlock;
    fn warp_get_first_basic_block(function: ValueRef) -> BasicBlockRef = llvm::LLVMGetFirstBasicBlock;
    fn warp_get_last_basic_block(function: ValueRef) -> BasicBlockRef = llvm::LLVMGetLastBasicBlock;
    fn warp_get_next_basic_block(block: BasicBlockRef) -> BasicBlockRef = llvm::LLVMGetNextBasicBlock;
    fn warp_get_previous_basic_block(block: BasicBlockRef) -> BasicBlockRef = llvm::LLVMGetPreviousBasicBlock;

    fn warp_basic_block_as_value(block: BasicBlockRef) -> ValueRef = llvm::LLVMBasicBlockAsValue;
    fn warp_value_is_basic_block(value: ValueRef) -> i32 = llvm::LLVMValueIsBasicBlock;
    fn warp_value_as_basic_block(value: ValueRef) -> BasicBlockRef = llvm::LLVMValueAsBasicBlock;
    fn warp_get_basic_block_parent(block: BasicBlockRef) -> ValueRef = llvm::LLVMGetBasicBlockParent;
    fn warp_get_basic_block_terminator(block: BasicBlockRef) -> ValueRef = llvm::LLVMGetBasicBlockTerminator;

    fn warp_delete_basic_block(block: BasicBlockRef) = llvm::LLVMDeleteBasicBlock;
    fn warp_remove_basic_block_from_parent(block: BasicBlockRef) = llvm::LLVMRemoveBasicBlockFromParent;
    fn warp_move_basic_block_before(block: BasicBlockRef, position: BasicBlockRef) =
        llvm::LLVMMoveBasicBlockBefore;
    fn warp_move_basic_block_after(block: BasicBlockRef, position: BasicBlockRef) =
        llvm::LLVMMoveBasicBlockAfter;

    fn warp_get_first_instruction(block: BasicBlockRef) -> ValueRef = llvm::LLVMGetFirstInstruction;
    fn warp_get_last_instruction(block: BasicBlockRef) -> ValueRef = llvm::LLVMGetLastInstruction;
}

/// Copy a function's blocks into `dest`. Returns 0 without writing when
/// `dest` holds fewer than `warp_count_basic_blocks` elements.
#[no_mangle]
pub extern "C" fn warp_get_basic_blocks(function: ValueRef, dest: HostArray<BasicBlockRef>) -> i32 {
    // SAFETY: live function
    let count = unsafe { llvm::LLVMCountBasicBlocks(function.as_raw()) };
    fill_host(dest, count, |out| {
        // SAFETY: out has room for count handles
        unsafe { llvm::LLVMGetBasicBlocks(function.as_raw(), out.cast()) };
    })
}

#[no_mangle]
pub extern "C" fn warp_append_basic_block_in_context(
    context: ContextRef,
    function: ValueRef,
    name: RawHostString,
) -> BasicBlockRef {
    let Some(name) = host_bytes(name) else {
        return BasicBlockRef::null();
    };
    // SAFETY: live context and function; LLVM copies the name
    BasicBlockRef::from_raw(unsafe {
        llvm::LLVMAppendBasicBlockInContext(
            context.as_raw(),
            function.as_raw(),
            name.as_ptr().cast_mut(),
        )
    })
}

/// A new block placed before `position`.
#[no_mangle]
pub extern "C" fn warp_insert_basic_block_in_context(
    context: ContextRef,
    position: BasicBlockRef,
    name: RawHostString,
) -> BasicBlockRef {
    let Some(name) = host_bytes(name) else {
        return BasicBlockRef::null();
    };
    // SAFETY: live context and block; LLVM copies the name
    BasicBlockRef::from_raw(unsafe {
        llvm::LLVMInsertBasicBlockInContext(
            context.as_raw(),
            position.as_raw(),
            name.as_ptr().cast_mut(),
        )
    })
}

/// Block label. Borrowed from LLVM.
#[no_mangle]
pub extern "C" fn warp_get_basic_block_name(block: BasicBlockRef) -> RawHostString {
    // SAFETY: live block; the name is LLVM-owned
    host_out(unsafe { message::borrowed(llvm::LLVMGetBasicBlockName(block.as_raw())) })
}
