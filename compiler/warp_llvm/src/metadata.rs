//! Metadata: strings, nodes, attachments and named metadata.
//!
//! Attachment snapshots (`warp_global_copy_all_metadata`,
//! `warp_instruction_get_all_metadata_other_than_debug_loc`) are LLVM-owned
//! arrays of `(kind, node)` pairs. The host reads them by index below the
//! count it was given and releases them with
//! `warp_dispose_value_metadata_entries`.

use llvm_sys::core as llvm;
use warp_marshal::{HostArray, RawHostString};

use crate::handles::{
    ContextRef, MetadataRef, ModuleRef, NamedMdNodeRef, ValueMetadataEntriesRef, ValueRef,
};
use crate::marshal::{byte_len, fill_host, host_bytes, host_out, host_parts, write_out};
use crate::message;

forward! {
    fn warp_metadata_as_value(context: ContextRef, metadata: MetadataRef) -> ValueRef = llvm::LLVMMetadataAsValue;
    fn warp_value_as_metadata(value: ValueRef) -> MetadataRef = llvm::LLVMValueAsMetadata;
    fn warp_get_md_node_num_operands(node: ValueRef) -> u32 = llvm::LLVMGetMDNodeNumOperands;
    fn warp_has_metadata(instruction: ValueRef) -> i32 = llvm::LLVMHasMetadata;
    fn warp_get_metadata(instruction: ValueRef, kind: u32) -> ValueRef = llvm::LLVMGetMetadata;
    fn warp_set_metadata(instruction: ValueRef, kind: u32, node: ValueRef) = llvm::LLVMSetMetadata;
    fn warp_get_first_named_metadata(module: ModuleRef) -> NamedMdNodeRef = llvm::LLVMGetFirstNamedMetadata;
    fn warp_get_next_named_metadata(node: NamedMdNodeRef) -> NamedMdNodeRef = llvm::LLVMGetNextNamedMetadata;

    fn warp_global_set_metadata(global: ValueRef, kind: u32, node: MetadataRef) = llvm::LLVMGlobalSetMetadata;
    fn warp_global_erase_metadata(global: ValueRef, kind: u32) = llvm::LLVMGlobalEraseMetadata;
    fn warp_global_clear_metadata(global: ValueRef) = llvm::LLVMGlobalClearMetadata;

    fn warp_dispose_value_metadata_entries(entries: ValueMetadataEntriesRef) =
        llvm::LLVMDisposeValueMetadataEntries;
    fn warp_value_metadata_entries_get_kind(entries: ValueMetadataEntriesRef, index: u32) -> u32 =
        llvm::LLVMValueMetadataEntriesGetKind;
    fn warp_value_metadata_entries_get_metadata(entries: ValueMetadataEntriesRef, index: u32) -> MetadataRef =
        llvm::LLVMValueMetadataEntriesGetMetadata;
}

#[no_mangle]
pub extern "C" fn warp_md_string_in_context(
    context: ContextRef,
    text: RawHostString,
) -> MetadataRef {
    let Some(text) = host_bytes(text) else {
        return MetadataRef::null();
    };
    // SAFETY: text valid for len bytes; LLVM uniques a copy
    MetadataRef::from_raw(unsafe {
        llvm::LLVMMDStringInContext2(context.as_raw(), text.as_ptr().cast_mut(), text.len())
    })
}

#[no_mangle]
pub extern "C" fn warp_md_node_in_context(
    context: ContextRef,
    operands: HostArray<MetadataRef>,
) -> MetadataRef {
    let Some((operands, count)) = host_parts(operands) else {
        return MetadataRef::null();
    };
    // SAFETY: count live metadata
    MetadataRef::from_raw(unsafe {
        llvm::LLVMMDNodeInContext2(context.as_raw(), operands.cast(), count as usize)
    })
}

/// Contents of an MD string wrapped as a value. Borrowed from LLVM.
#[no_mangle]
pub extern "C" fn warp_get_md_string(value: ValueRef) -> RawHostString {
    let mut len = 0;
    // SAFETY: live value; the string is LLVM-owned
    host_out(unsafe {
        let ptr = llvm::LLVMGetMDString(value.as_raw(), &mut len);
        message::borrowed_sized(ptr, len as usize)
    })
}

/// Copy an MD node's operands into `dest`. Checked against
/// `warp_get_md_node_num_operands`.
#[no_mangle]
pub extern "C" fn warp_get_md_node_operands(node: ValueRef, dest: HostArray<ValueRef>) -> i32 {
    // SAFETY: live node
    let count = unsafe { llvm::LLVMGetMDNodeNumOperands(node.as_raw()) };
    fill_host(dest, count, |out| {
        // SAFETY: out has room for count handles
        unsafe { llvm::LLVMGetMDNodeOperands(node.as_raw(), out.cast()) };
    })
}

/// Attachment kind ID for a name such as `dbg`, registering it if new.
#[no_mangle]
pub extern "C" fn warp_get_md_kind_id_in_context(
    context: ContextRef,
    name: RawHostString,
) -> u32 {
    let Some(name) = host_bytes(name) else {
        return 0;
    };
    let Some(len) = byte_len(&name) else {
        return 0;
    };
    // SAFETY: name valid for len bytes
    unsafe { llvm::LLVMGetMDKindIDInContext(context.as_raw(), name.as_ptr().cast_mut(), len) }
}

/// Every attachment of a global. `len` (optional) receives the count.
#[no_mangle]
pub extern "C" fn warp_global_copy_all_metadata(
    global: ValueRef,
    len: *mut usize,
) -> ValueMetadataEntriesRef {
    let mut count = 0;
    // SAFETY: live global; count is a local
    let entries = unsafe { llvm::LLVMGlobalCopyAllMetadata(global.as_raw(), &mut count) };
    write_out(len, count);
    ValueMetadataEntriesRef::from_raw(entries)
}

/// Every attachment of an instruction except its `!dbg` location. `len`
/// (optional) receives the count.
#[no_mangle]
pub extern "C" fn warp_instruction_get_all_metadata_other_than_debug_loc(
    instruction: ValueRef,
    len: *mut usize,
) -> ValueMetadataEntriesRef {
    let mut count = 0;
    // SAFETY: live instruction; count is a local
    let entries = unsafe {
        llvm::LLVMInstructionGetAllMetadataOtherThanDebugLoc(instruction.as_raw(), &mut count)
    };
    write_out(len, count);
    ValueMetadataEntriesRef::from_raw(entries)
}

#[no_mangle]
pub extern "C" fn warp_add_named_metadata_operand(
    module: ModuleRef,
    name: RawHostString,
    node: ValueRef,
) {
    let Some(name) = host_bytes(name) else {
        return;
    };
    // SAFETY: live module and node; name terminated
    unsafe {
        llvm::LLVMAddNamedMetadataOperand(module.as_raw(), name.as_ptr().cast_mut(), node.as_raw());
    }
}

#[no_mangle]
pub extern "C" fn warp_get_named_metadata_num_operands(
    module: ModuleRef,
    name: RawHostString,
) -> u32 {
    let Some(name) = host_bytes(name) else {
        return 0;
    };
    // SAFETY: live module; name terminated
    unsafe { llvm::LLVMGetNamedMetadataNumOperands(module.as_raw(), name.as_ptr().cast_mut()) }
}

/// Copy the operands of named metadata `name` into `dest`. Checked against
/// `warp_get_named_metadata_num_operands`.
#[no_mangle]
pub extern "C" fn warp_get_named_metadata_operands(
    module: ModuleRef,
    name: RawHostString,
    dest: HostArray<ValueRef>,
) -> i32 {
    let Some(name) = host_bytes(name) else {
        return 0;
    };
    // SAFETY: live module; name terminated
    let count = unsafe {
        llvm::LLVMGetNamedMetadataNumOperands(module.as_raw(), name.as_ptr().cast_mut())
    };
    fill_host(dest, count, |out| {
        // SAFETY: out has room for count handles
        unsafe {
            llvm::LLVMGetNamedMetadataOperands(
                module.as_raw(),
                name.as_ptr().cast_mut(),
                out.cast(),
            );
        }
    })
}

#[no_mangle]
pub extern "C" fn warp_get_or_insert_named_metadata(
    module: ModuleRef,
    name: RawHostString,
) -> NamedMdNodeRef {
    let Some(name) = host_bytes(name) else {
        return NamedMdNodeRef::null();
    };
    // SAFETY: live module; name valid for len bytes
    NamedMdNodeRef::from_raw(unsafe {
        llvm::LLVMGetOrInsertNamedMetadata(module.as_raw(), name.as_ptr().cast_mut(), name.len())
    })
}

/// Named metadata `name`, or null.
#[no_mangle]
pub extern "C" fn warp_get_named_metadata(
    module: ModuleRef,
    name: RawHostString,
) -> NamedMdNodeRef {
    let Some(name) = host_bytes(name) else {
        return NamedMdNodeRef::null();
    };
    // SAFETY: live module; name valid for len bytes
    NamedMdNodeRef::from_raw(unsafe {
        llvm::LLVMGetNamedMetadata(module.as_raw(), name.as_ptr().cast_mut(), name.len())
    })
}

/// Name of a named metadata node. Borrowed from LLVM.
#[no_mangle]
pub extern "C" fn warp_get_named_metadata_name(node: NamedMdNodeRef) -> RawHostString {
    let mut len = 0;
    // SAFETY: live node; the name is LLVM-owned
    host_out(unsafe {
        let ptr = llvm::LLVMGetNamedMetadataName(node.as_raw(), &mut len);
        message::borrowed_sized(ptr, len)
    })
}
