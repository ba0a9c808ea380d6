//! Opaque handle newtypes.
//!
//! Each LLVM reference type gets its own `#[repr(transparent)]` wrapper, so
//! the C ABI still sees a bare pointer while Rust code cannot hand a type
//! where a value is expected. Every kind also exports three helpers for the
//! host, which has no pointer type of its own: a null constructor, a null
//! test and an identity test.

use std::ptr;

use llvm_sys::comdat::LLVMComdatRef;
use llvm_sys::prelude::{
    LLVMAttributeRef, LLVMBasicBlockRef, LLVMBuilderRef, LLVMContextRef, LLVMDiagnosticInfoRef,
    LLVMMemoryBufferRef, LLVMMetadataRef, LLVMModuleRef, LLVMNamedMDNodeRef,
    LLVMOperandBundleRef, LLVMTypeRef, LLVMUseRef, LLVMValueRef,
};
use llvm_sys::{LLVMModuleFlagEntry, LLVMValueMetadataEntry};

use crate::abi::Abi;

macro_rules! handles {
    ($(
        $(#[$meta:meta])*
        $name:ident($raw:ty) => $null:ident, $is_null:ident, $same:ident;
    )+) => {
        $(
            $(#[$meta])*
            #[repr(transparent)]
            #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
            pub struct $name($raw);

            impl $name {
                pub const fn null() -> Self {
                    Self(ptr::null_mut())
                }

                pub fn is_null(self) -> bool {
                    self.0.is_null()
                }

                pub const fn as_raw(self) -> $raw {
                    self.0
                }

                pub const fn from_raw(raw: $raw) -> Self {
                    Self(raw)
                }
            }

            impl Abi for $name {
                type Raw = $raw;

                #[inline]
                fn into_raw(self) -> $raw {
                    self.0
                }

                #[inline]
                fn from_raw(raw: $raw) -> Self {
                    Self(raw)
                }
            }

            #[no_mangle]
            pub extern "C" fn $null() -> $name {
                $name::null()
            }

            #[no_mangle]
            pub extern "C" fn $is_null(handle: $name) -> i32 {
                i32::from(handle.is_null())
            }

            #[no_mangle]
            pub extern "C" fn $same(a: $name, b: $name) -> i32 {
                i32::from(a == b)
            }
        )+
    };
}

handles! {
    /// `LLVMContextRef`: owns types, constants and metadata.
    ContextRef(LLVMContextRef) => warp_context_null, warp_context_is_null, warp_context_same;
    /// `LLVMModuleRef`.
    ModuleRef(LLVMModuleRef) => warp_module_null, warp_module_is_null, warp_module_same;
    /// `LLVMTypeRef`.
    TypeRef(LLVMTypeRef) => warp_type_null, warp_type_is_null, warp_type_same;
    /// `LLVMValueRef`: constants, globals, functions, arguments, instructions.
    ValueRef(LLVMValueRef) => warp_value_null, warp_value_is_null, warp_value_same;
    /// `LLVMBasicBlockRef`.
    BasicBlockRef(LLVMBasicBlockRef) => warp_block_null, warp_block_is_null, warp_block_same;
    /// `LLVMBuilderRef`.
    BuilderRef(LLVMBuilderRef) => warp_builder_null, warp_builder_is_null, warp_builder_same;
    /// `LLVMAttributeRef`.
    AttributeRef(LLVMAttributeRef) => warp_attribute_null, warp_attribute_is_null, warp_attribute_same;
    /// `LLVMMetadataRef`.
    MetadataRef(LLVMMetadataRef) => warp_metadata_null, warp_metadata_is_null, warp_metadata_same;
    /// `LLVMUseRef`: one edge of a value's use list.
    UseRef(LLVMUseRef) => warp_use_null, warp_use_is_null, warp_use_same;
    /// `LLVMNamedMDNodeRef`.
    NamedMdNodeRef(LLVMNamedMDNodeRef) => warp_named_md_null, warp_named_md_is_null, warp_named_md_same;
    /// `LLVMDiagnosticInfoRef`: only valid inside a diagnostic handler.
    DiagnosticInfoRef(LLVMDiagnosticInfoRef) => warp_diag_info_null, warp_diag_info_is_null, warp_diag_info_same;
    /// `LLVMMemoryBufferRef`.
    MemoryBufferRef(LLVMMemoryBufferRef) => warp_memory_buffer_null, warp_memory_buffer_is_null, warp_memory_buffer_same;
    /// `LLVMComdatRef`.
    ComdatRef(LLVMComdatRef) => warp_comdat_null, warp_comdat_is_null, warp_comdat_same;
    /// `LLVMOperandBundleRef`: a tag plus inputs, attached to calls.
    OperandBundleRef(LLVMOperandBundleRef) => warp_operand_bundle_null, warp_operand_bundle_is_null, warp_operand_bundle_same;
    /// Array of module flags from `warp_copy_module_flags_metadata`.
    ModuleFlagEntriesRef(*mut LLVMModuleFlagEntry) => warp_module_flag_entries_null, warp_module_flag_entries_is_null, warp_module_flag_entries_same;
    /// Array of `(kind, node)` pairs attached to a global or an instruction.
    ValueMetadataEntriesRef(*mut LLVMValueMetadataEntry) => warp_value_metadata_entries_null, warp_value_metadata_entries_is_null, warp_value_metadata_entries_same;
}
