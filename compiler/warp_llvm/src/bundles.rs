//! Operand bundles: tagged input lists attached to calls and invokes.
//!
//! A bundle from `warp_create_operand_bundle` or
//! `warp_get_operand_bundle_at_index` belongs to the host and is released
//! with `warp_dispose_operand_bundle`. Attaching one to a call copies it.

use llvm_sys::core as llvm;
use warp_marshal::{HostArray, RawHostString};

use crate::handles::{OperandBundleRef, ValueRef};
use crate::marshal::{host_bytes, host_out, host_parts};
use crate::message;

forward! {
    fn warp_dispose_operand_bundle(bundle: OperandBundleRef) = llvm::LLVMDisposeOperandBundle;
    fn warp_get_num_operand_bundle_args(bundle: OperandBundleRef) -> u32 =
        llvm::LLVMGetNumOperandBundleArgs;
    fn warp_get_operand_bundle_arg_at_index(bundle: OperandBundleRef, index: u32) -> ValueRef =
        llvm::LLVMGetOperandBundleArgAtIndex;

    fn warp_get_num_operand_bundles(call: ValueRef) -> u32 = llvm::LLVMGetNumOperandBundles;
    /// A new copy of the call's bundle `index`, owned by the host.
    fn warp_get_operand_bundle_at_index(call: ValueRef, index: u32) -> OperandBundleRef =
        llvm::LLVMGetOperandBundleAtIndex;
}

/// Bundle tagged `tag` (such as `deopt` or `funclet`) over `args`.
#[no_mangle]
pub extern "C" fn warp_create_operand_bundle(
    tag: RawHostString,
    args: HostArray<ValueRef>,
) -> OperandBundleRef {
    let (Some(tag), Some((args, count))) = (host_bytes(tag), host_parts(args)) else {
        return OperandBundleRef::null();
    };
    // SAFETY: tag valid for len bytes; count live values; LLVM copies both
    OperandBundleRef::from_raw(unsafe {
        llvm::LLVMCreateOperandBundle(tag.as_ptr().cast_mut(), tag.len(), args.cast(), count)
    })
}

/// Tag of a bundle. Borrowed from the bundle.
#[no_mangle]
pub extern "C" fn warp_get_operand_bundle_tag(bundle: OperandBundleRef) -> RawHostString {
    let mut len = 0;
    // SAFETY: live bundle; the tag is valid for len bytes while it is
    host_out(unsafe {
        let tag = llvm::LLVMGetOperandBundleTag(bundle.as_raw(), &mut len);
        message::borrowed_sized(tag, len)
    })
}
