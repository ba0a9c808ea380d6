//! Global values and global variables.

use llvm_sys::comdat;
use llvm_sys::core as llvm;
use warp_abi::{DllStorageClass, Linkage, UnnamedAddr, Visibility};
use warp_marshal::RawHostString;

use crate::handles::{ComdatRef, ModuleRef, TypeRef, ValueRef};
use crate::marshal::{host_bytes, host_out};
use crate::message;
use crate::native::LlvmEnum;

forward! {
    fn warp_get_global_parent(global: ValueRef) -> ModuleRef = llvm::LLVMGetGlobalParent;
    fn warp_is_declaration(global: ValueRef) -> i32 = llvm::LLVMIsDeclaration;
    fn warp_global_get_value_type(global: ValueRef) -> TypeRef = llvm::LLVMGlobalGetValueType;
    fn warp_get_alignment(value: ValueRef) -> u32 = llvm::LLVMGetAlignment;
    fn warp_set_alignment(value: ValueRef, bytes: u32) = llvm::LLVMSetAlignment;

    fn warp_get_initializer(global: ValueRef) -> ValueRef = llvm::LLVMGetInitializer;
    fn warp_set_initializer(global: ValueRef, constant: ValueRef) = llvm::LLVMSetInitializer;
    fn warp_is_thread_local(global: ValueRef) -> i32 = llvm::LLVMIsThreadLocal;
    fn warp_set_thread_local(global: ValueRef, thread_local: i32) = llvm::LLVMSetThreadLocal;
    fn warp_is_global_constant(global: ValueRef) -> i32 = llvm::LLVMIsGlobalConstant;
    fn warp_set_global_constant(global: ValueRef, constant: i32) = llvm::LLVMSetGlobalConstant;
    fn warp_delete_global(global: ValueRef) = llvm::LLVMDeleteGlobal;

    fn warp_get_comdat(global: ValueRef) -> ComdatRef = comdat::LLVMGetComdat;
    fn warp_set_comdat(global: ValueRef, comdat: ComdatRef) = comdat::LLVMSetComdat;
}

#[no_mangle]
pub extern "C" fn warp_add_global(module: ModuleRef, ty: TypeRef, name: RawHostString) -> ValueRef {
    let Some(name) = host_bytes(name) else {
        return ValueRef::null();
    };
    // SAFETY: live module and type; LLVM copies the name
    ValueRef::from_raw(unsafe {
        llvm::LLVMAddGlobal(module.as_raw(), ty.as_raw(), name.as_ptr().cast_mut())
    })
}

#[no_mangle]
pub extern "C" fn warp_get_named_global(module: ModuleRef, name: RawHostString) -> ValueRef {
    let Some(name) = host_bytes(name) else {
        return ValueRef::null();
    };
    // SAFETY: live module; name terminated
    ValueRef::from_raw(unsafe {
        llvm::LLVMGetNamedGlobal(module.as_raw(), name.as_ptr().cast_mut())
    })
}

/// `linkage` code of a global.
#[no_mangle]
pub extern "C" fn warp_get_linkage(global: ValueRef) -> i32 {
    // SAFETY: live global
    Linkage::encode_llvm(unsafe { llvm::LLVMGetLinkage(global.as_raw()) })
}

#[no_mangle]
pub extern "C" fn warp_set_linkage(global: ValueRef, linkage: i32) {
    let linkage = Linkage::decode_llvm(linkage);
    // SAFETY: live global
    unsafe { llvm::LLVMSetLinkage(global.as_raw(), linkage) };
}

/// `visibility` code of a global.
#[no_mangle]
pub extern "C" fn warp_get_visibility(global: ValueRef) -> i32 {
    // SAFETY: live global
    Visibility::encode_llvm(unsafe { llvm::LLVMGetVisibility(global.as_raw()) })
}

#[no_mangle]
pub extern "C" fn warp_set_visibility(global: ValueRef, visibility: i32) {
    let visibility = Visibility::decode_llvm(visibility);
    // SAFETY: live global
    unsafe { llvm::LLVMSetVisibility(global.as_raw(), visibility) };
}

/// `dll-storage-class` code of a global.
#[no_mangle]
pub extern "C" fn warp_get_dll_storage_class(global: ValueRef) -> i32 {
    // SAFETY: live global
    DllStorageClass::encode_llvm(unsafe { llvm::LLVMGetDLLStorageClass(global.as_raw()) })
}

#[no_mangle]
pub extern "C" fn warp_set_dll_storage_class(global: ValueRef, class: i32) {
    let class = DllStorageClass::decode_llvm(class);
    // SAFETY: live global
    unsafe { llvm::LLVMSetDLLStorageClass(global.as_raw(), class) };
}

/// `unnamed-addr` code of a global.
#[no_mangle]
pub extern "C" fn warp_get_unnamed_address(global: ValueRef) -> i32 {
    // SAFETY: live global
    UnnamedAddr::encode_llvm(unsafe { llvm::LLVMGetUnnamedAddress(global.as_raw()) })
}

#[no_mangle]
pub extern "C" fn warp_set_unnamed_address(global: ValueRef, unnamed: i32) {
    let unnamed = UnnamedAddr::decode_llvm(unnamed);
    // SAFETY: live global
    unsafe { llvm::LLVMSetUnnamedAddress(global.as_raw(), unnamed) };
}

/// Section name, empty when unset. Borrowed from LLVM.
#[no_mangle]
pub extern "C" fn warp_get_section(global: ValueRef) -> RawHostString {
    // SAFETY: live global; the section is LLVM-owned
    host_out(unsafe { message::borrowed(llvm::LLVMGetSection(global.as_raw())) })
}

#[no_mangle]
pub extern "C" fn warp_set_section(global: ValueRef, section: RawHostString) {
    let Some(section) = host_bytes(section) else {
        return;
    };
    // SAFETY: live global; LLVM copies the name
    unsafe { llvm::LLVMSetSection(global.as_raw(), section.as_ptr().cast_mut()) };
}

#[no_mangle]
pub extern "C" fn warp_get_or_insert_comdat(module: ModuleRef, name: RawHostString) -> ComdatRef {
    let Some(name) = host_bytes(name) else {
        return ComdatRef::null();
    };
    // SAFETY: live module; LLVM copies the name
    ComdatRef::from_raw(unsafe {
        comdat::LLVMGetOrInsertComdat(module.as_raw(), name.as_ptr().cast_mut())
    })
}
