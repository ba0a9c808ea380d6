//! Modules: lifecycle, identification, flags, printing, verification,
//! bitcode and memory buffers.
//!
//! Entry points that can fail inside LLVM return `1` on success and `0` on
//! failure, and write LLVM's error message (or the null string on success)
//! through an optional `error` out-parameter. The slot is written on every
//! path, including rejected host input. The message content is passed
//! through unchanged. A handle created for a null out-parameter is disposed
//! rather than leaked.

use std::ffi::c_char;
use std::ptr;

use llvm_sys::analysis::{LLVMVerifierFailureAction, LLVMVerifyModule};
use llvm_sys::bit_reader::LLVMParseBitcodeInContext2;
use llvm_sys::bit_writer::{LLVMWriteBitcodeToFile, LLVMWriteBitcodeToMemoryBuffer};
use llvm_sys::core as llvm;
use llvm_sys::ir_reader::LLVMParseIRInContext;
use llvm_sys::prelude::LLVMModuleRef;
use warp_abi::ModuleFlagBehavior;
use warp_marshal::RawHostString;

use crate::handles::{
    ContextRef, MemoryBufferRef, MetadataRef, ModuleFlagEntriesRef, ModuleRef, ValueRef,
};
use crate::marshal::{host_bytes, host_out, write_out};
use crate::message;
use crate::native::LlvmEnum;

/// Report an LLVM-allocated error message through an optional out-parameter,
/// disposing the LLVM copy either way.
fn report(error: *mut RawHostString, message: *mut c_char) {
    // SAFETY: message is null or caller-owned by the LLVM call that produced it
    let text = unsafe { message::take(message) };
    if error.is_null() {
        if !text.is_empty() {
            tracing::debug!(message = %text.to_string_lossy(), "LLVM error dropped");
        }
        return;
    }
    let out = if text.is_empty() {
        RawHostString::null()
    } else {
        host_out(text)
    };
    // SAFETY: the host passes null or a writable slot
    unsafe { error.write(out) };
}

forward! {
    fn warp_clone_module(module: ModuleRef) -> ModuleRef = llvm::LLVMCloneModule;
    fn warp_dispose_module(module: ModuleRef) = llvm::LLVMDisposeModule;
    fn warp_dump_module(module: ModuleRef) = llvm::LLVMDumpModule;
    fn warp_get_module_context(module: ModuleRef) -> ContextRef = llvm::LLVMGetModuleContext;

    fn warp_get_first_function(module: ModuleRef) -> ValueRef = llvm::LLVMGetFirstFunction;
    fn warp_get_last_function(module: ModuleRef) -> ValueRef = llvm::LLVMGetLastFunction;
    fn warp_get_next_function(function: ValueRef) -> ValueRef = llvm::LLVMGetNextFunction;
    fn warp_get_previous_function(function: ValueRef) -> ValueRef = llvm::LLVMGetPreviousFunction;
    fn warp_get_first_global(module: ModuleRef) -> ValueRef = llvm::LLVMGetFirstGlobal;
    fn warp_get_last_global(module: ModuleRef) -> ValueRef = llvm::LLVMGetLastGlobal;
    fn warp_get_next_global(global: ValueRef) -> ValueRef = llvm::LLVMGetNextGlobal;
    fn warp_get_previous_global(global: ValueRef) -> ValueRef = llvm::LLVMGetPreviousGlobal;

    fn warp_write_bitcode_to_memory_buffer(module: ModuleRef) -> MemoryBufferRef =
        LLVMWriteBitcodeToMemoryBuffer;
    fn warp_get_buffer_size(buffer: MemoryBufferRef) -> usize = llvm::LLVMGetBufferSize;
    fn warp_dispose_memory_buffer(buffer: MemoryBufferRef) = llvm::LLVMDisposeMemoryBuffer;

    fn warp_dispose_module_flags_metadata(entries: ModuleFlagEntriesRef) =
        llvm::LLVMDisposeModuleFlagsMetadata;
    fn warp_module_flag_entries_get_metadata(entries: ModuleFlagEntriesRef, index: u32) -> MetadataRef =
        llvm::LLVMModuleFlagEntriesGetMetadata;
}

#[no_mangle]
pub extern "C" fn warp_module_create_with_name_in_context(
    name: RawHostString,
    context: ContextRef,
) -> ModuleRef {
    let Some(name) = host_bytes(name) else {
        return ModuleRef::null();
    };
    // SAFETY: name is terminated and outlives the call; LLVM copies it
    ModuleRef::from_raw(unsafe {
        llvm::LLVMModuleCreateWithNameInContext(name.as_ptr().cast_mut(), context.as_raw())
    })
}

/// Module identifier. Borrowed from LLVM.
#[no_mangle]
pub extern "C" fn warp_get_module_identifier(module: ModuleRef) -> RawHostString {
    let mut len = 0;
    // SAFETY: live module; the result is LLVM-owned and valid for len bytes
    host_out(unsafe {
        let ptr = llvm::LLVMGetModuleIdentifier(module.as_raw(), &mut len);
        message::borrowed_sized(ptr, len)
    })
}

#[no_mangle]
pub extern "C" fn warp_set_module_identifier(module: ModuleRef, ident: RawHostString) {
    let Some(ident) = host_bytes(ident) else {
        return;
    };
    // SAFETY: live module; LLVM copies len bytes
    unsafe {
        llvm::LLVMSetModuleIdentifier(module.as_raw(), ident.as_ptr().cast_mut(), ident.len());
    }
}

/// Source file name. Borrowed from LLVM.
#[no_mangle]
pub extern "C" fn warp_get_source_file_name(module: ModuleRef) -> RawHostString {
    let mut len = 0;
    // SAFETY: live module; the result is LLVM-owned and valid for len bytes
    host_out(unsafe {
        let ptr = llvm::LLVMGetSourceFileName(module.as_raw(), &mut len);
        message::borrowed_sized(ptr, len)
    })
}

#[no_mangle]
pub extern "C" fn warp_set_source_file_name(module: ModuleRef, name: RawHostString) {
    let Some(name) = host_bytes(name) else {
        return;
    };
    // SAFETY: live module; LLVM copies len bytes
    unsafe { llvm::LLVMSetSourceFileName(module.as_raw(), name.as_ptr().cast_mut(), name.len()) };
}

/// Data layout string. Borrowed from LLVM.
#[no_mangle]
pub extern "C" fn warp_get_data_layout_str(module: ModuleRef) -> RawHostString {
    // SAFETY: live module; the result is LLVM-owned and terminated
    host_out(unsafe { message::borrowed(llvm::LLVMGetDataLayoutStr(module.as_raw())) })
}

#[no_mangle]
pub extern "C" fn warp_set_data_layout(module: ModuleRef, layout: RawHostString) {
    let Some(layout) = host_bytes(layout) else {
        return;
    };
    // SAFETY: live module; LLVM parses and copies the string
    unsafe { llvm::LLVMSetDataLayout(module.as_raw(), layout.as_ptr().cast_mut()) };
}

/// Target triple. Borrowed from LLVM.
#[no_mangle]
pub extern "C" fn warp_get_target(module: ModuleRef) -> RawHostString {
    // SAFETY: live module; the result is LLVM-owned and terminated
    host_out(unsafe { message::borrowed(llvm::LLVMGetTarget(module.as_raw())) })
}

#[no_mangle]
pub extern "C" fn warp_set_target(module: ModuleRef, triple: RawHostString) {
    let Some(triple) = host_bytes(triple) else {
        return;
    };
    // SAFETY: live module; LLVM copies the string
    unsafe { llvm::LLVMSetTarget(module.as_raw(), triple.as_ptr().cast_mut()) };
}

/// Add a module flag. `behavior` is a `module-flag-behavior` code.
#[no_mangle]
pub extern "C" fn warp_add_module_flag(
    module: ModuleRef,
    behavior: i32,
    key: RawHostString,
    value: MetadataRef,
) {
    let behavior = ModuleFlagBehavior::decode_llvm(behavior);
    let Some(key) = host_bytes(key) else {
        return;
    };
    // SAFETY: live module and metadata; LLVM copies the key
    unsafe {
        llvm::LLVMAddModuleFlag(
            module.as_raw(),
            behavior,
            key.as_ptr().cast_mut(),
            key.len(),
            value.as_raw(),
        );
    }
}

/// Module flag metadata for `key`, or null.
#[no_mangle]
pub extern "C" fn warp_get_module_flag(module: ModuleRef, key: RawHostString) -> MetadataRef {
    let Some(key) = host_bytes(key) else {
        return MetadataRef::null();
    };
    // SAFETY: live module; key valid for len bytes
    MetadataRef::from_raw(unsafe {
        llvm::LLVMGetModuleFlag(module.as_raw(), key.as_ptr().cast_mut(), key.len())
    })
}

/// Snapshot of every module flag. `len` (optional) receives the entry
/// count. Released with `warp_dispose_module_flags_metadata`, even when the
/// count is 0.
#[no_mangle]
pub extern "C" fn warp_copy_module_flags_metadata(
    module: ModuleRef,
    len: *mut usize,
) -> ModuleFlagEntriesRef {
    let mut count = 0;
    // SAFETY: live module; count is a local
    let entries = unsafe { llvm::LLVMCopyModuleFlagsMetadata(module.as_raw(), &mut count) };
    write_out(len, count);
    ModuleFlagEntriesRef::from_raw(entries)
}

/// `module-flag-behavior` code of entry `index`.
#[no_mangle]
pub extern "C" fn warp_module_flag_entries_get_flag_behavior(
    entries: ModuleFlagEntriesRef,
    index: u32,
) -> i32 {
    // SAFETY: live entries; index below the copied count (host contract)
    ModuleFlagBehavior::encode_llvm(unsafe {
        llvm::LLVMModuleFlagEntriesGetFlagBehavior(entries.as_raw(), index)
    })
}

/// Key of entry `index`. Borrowed from the entries.
#[no_mangle]
pub extern "C" fn warp_module_flag_entries_get_key(
    entries: ModuleFlagEntriesRef,
    index: u32,
) -> RawHostString {
    let mut len = 0;
    // SAFETY: live entries; the key is valid for len bytes while they are
    host_out(unsafe {
        let key = llvm::LLVMModuleFlagEntriesGetKey(entries.as_raw(), index, &mut len);
        message::borrowed_sized(key, len)
    })
}

/// Module-level inline assembly. Borrowed from LLVM.
#[no_mangle]
pub extern "C" fn warp_get_module_inline_asm(module: ModuleRef) -> RawHostString {
    let mut len = 0;
    // SAFETY: live module; the result is LLVM-owned and valid for len bytes
    host_out(unsafe {
        let ptr = llvm::LLVMGetModuleInlineAsm(module.as_raw(), &mut len);
        message::borrowed_sized(ptr, len)
    })
}

#[no_mangle]
pub extern "C" fn warp_set_module_inline_asm(module: ModuleRef, asm: RawHostString) {
    let Some(asm) = host_bytes(asm) else {
        return;
    };
    // SAFETY: live module; LLVM copies len bytes
    unsafe {
        llvm::LLVMSetModuleInlineAsm2(module.as_raw(), asm.as_ptr().cast_mut(), asm.len());
    }
}

#[no_mangle]
pub extern "C" fn warp_append_module_inline_asm(module: ModuleRef, asm: RawHostString) {
    let Some(asm) = host_bytes(asm) else {
        return;
    };
    // SAFETY: live module; LLVM copies len bytes
    unsafe {
        llvm::LLVMAppendModuleInlineAsm(module.as_raw(), asm.as_ptr().cast_mut(), asm.len());
    }
}

/// Textual IR of the module. The LLVM copy is disposed.
#[no_mangle]
pub extern "C" fn warp_print_module_to_string(module: ModuleRef) -> RawHostString {
    // SAFETY: live module; the result is caller-owned
    host_out(unsafe { message::take(llvm::LLVMPrintModuleToString(module.as_raw())) })
}

/// Write textual IR to `filename`.
#[no_mangle]
pub extern "C" fn warp_print_module_to_file(
    module: ModuleRef,
    filename: RawHostString,
    error: *mut RawHostString,
) -> i32 {
    let Some(filename) = host_bytes(filename) else {
        report(error, ptr::null_mut());
        return 0;
    };
    let mut message = ptr::null_mut();
    // SAFETY: live module; filename terminated; message receives a caller-owned string
    let failed = unsafe {
        llvm::LLVMPrintModuleToFile(module.as_raw(), filename.as_ptr().cast_mut(), &mut message)
    };
    report(error, message);
    i32::from(failed == 0)
}

/// Check the module. Returns 1 when valid; otherwise 0 with the verifier's
/// report in `error`.
#[no_mangle]
pub extern "C" fn warp_verify_module(module: ModuleRef, error: *mut RawHostString) -> i32 {
    let mut message = ptr::null_mut();
    // SAFETY: live module; ReturnStatus never aborts the process
    let broken = unsafe {
        LLVMVerifyModule(
            module.as_raw(),
            LLVMVerifierFailureAction::LLVMReturnStatusAction,
            &mut message,
        )
    };
    report(error, message);
    i32::from(broken == 0)
}

/// Write bitcode to `path`. Returns 1 on success.
#[no_mangle]
pub extern "C" fn warp_write_bitcode_to_file(module: ModuleRef, path: RawHostString) -> i32 {
    let Some(path) = host_bytes(path) else {
        return 0;
    };
    // SAFETY: live module; path terminated
    let status = unsafe { LLVMWriteBitcodeToFile(module.as_raw(), path.as_ptr().cast_mut()) };
    i32::from(status == 0)
}

/// Read a file into a new memory buffer. On success `buffer` receives the
/// handle; on failure it receives null and `error` the reason.
#[no_mangle]
pub extern "C" fn warp_create_memory_buffer_with_contents_of_file(
    path: RawHostString,
    buffer: *mut MemoryBufferRef,
    error: *mut RawHostString,
) -> i32 {
    let Some(path) = host_bytes(path) else {
        report(error, ptr::null_mut());
        write_out(buffer, MemoryBufferRef::null());
        return 0;
    };
    let mut raw = ptr::null_mut();
    let mut message = ptr::null_mut();
    // SAFETY: path terminated; both out-pointers are locals
    let failed = unsafe {
        llvm::LLVMCreateMemoryBufferWithContentsOfFile(
            path.as_ptr().cast_mut(),
            &mut raw,
            &mut message,
        )
    };
    report(error, message);
    if failed != 0 {
        write_out(buffer, MemoryBufferRef::null());
        return 0;
    }
    if buffer.is_null() {
        tracing::debug!("no slot for the memory buffer; disposing it");
        // SAFETY: created above and never handed out
        unsafe { llvm::LLVMDisposeMemoryBuffer(raw) };
    } else {
        write_out(buffer, MemoryBufferRef::from_raw(raw));
    }
    1
}

/// Copy host text into a new memory buffer named `name`.
#[no_mangle]
pub extern "C" fn warp_create_memory_buffer_with_text(
    text: RawHostString,
    name: RawHostString,
) -> MemoryBufferRef {
    let (Some(text), Some(name)) = (host_bytes(text), host_bytes(name)) else {
        return MemoryBufferRef::null();
    };
    // SAFETY: both strings outlive the call; LLVM copies the range
    MemoryBufferRef::from_raw(unsafe {
        llvm::LLVMCreateMemoryBufferWithMemoryRangeCopy(
            text.as_ptr().cast_mut(),
            text.len(),
            name.as_ptr().cast_mut(),
        )
    })
}

/// Buffer contents, widened byte for byte. Borrowed from LLVM.
#[no_mangle]
pub extern "C" fn warp_get_buffer_contents(buffer: MemoryBufferRef) -> RawHostString {
    // SAFETY: live buffer; start is valid for size bytes
    host_out(unsafe {
        let start = llvm::LLVMGetBufferStart(buffer.as_raw());
        message::borrowed_sized(start, llvm::LLVMGetBufferSize(buffer.as_raw()))
    })
}

/// Parse textual IR. Takes ownership of `buffer` whatever the outcome.
#[no_mangle]
pub extern "C" fn warp_parse_ir_in_context(
    context: ContextRef,
    buffer: MemoryBufferRef,
    module: *mut ModuleRef,
    error: *mut RawHostString,
) -> i32 {
    let mut raw = ptr::null_mut();
    let mut message = ptr::null_mut();
    // SAFETY: live context and buffer; LLVM consumes the buffer
    let failed = unsafe {
        LLVMParseIRInContext(context.as_raw(), buffer.as_raw(), &mut raw, &mut message)
    };
    report(error, message);
    write_module(module, failed, raw)
}

/// Parse bitcode. `buffer` stays owned by the caller.
#[no_mangle]
pub extern "C" fn warp_parse_bitcode_in_context(
    context: ContextRef,
    buffer: MemoryBufferRef,
    module: *mut ModuleRef,
) -> i32 {
    let mut raw = ptr::null_mut();
    // SAFETY: live context and buffer
    let failed = unsafe { LLVMParseBitcodeInContext2(context.as_raw(), buffer.as_raw(), &mut raw) };
    write_module(module, failed, raw)
}

/// Hand a parsed module to the host. A module with nowhere to go is disposed.
fn write_module(out: *mut ModuleRef, failed: i32, raw: LLVMModuleRef) -> i32 {
    if failed != 0 {
        write_out(out, ModuleRef::null());
        return 0;
    }
    if out.is_null() {
        tracing::debug!("no slot for the parsed module; disposing it");
        // SAFETY: parsed above and never handed out
        unsafe { llvm::LLVMDisposeModule(raw) };
    } else {
        write_out(out, ModuleRef::from_raw(raw));
    }
    1
}
