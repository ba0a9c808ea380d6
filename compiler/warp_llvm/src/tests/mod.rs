//! Tests against the linked LLVM.
//!
//! Most tests drive the `warp_*` exports directly, the way the host runtime
//! does, with host strings and arrays built by the helpers below.

#![allow(clippy::unwrap_used, reason = "Tests can panic")]

mod context_tests;
mod function_tests;
mod lockstep_tests;
mod module_tests;
mod string_tests;

use warp_marshal::{HostArray, HostString, RawHostString};

use crate::blocks::warp_append_basic_block_in_context;
use crate::builder::{
    warp_create_builder_in_context, warp_dispose_builder, warp_position_builder_at_end,
};
use crate::context::Context;
use crate::functions::warp_add_function;
use crate::handles::{BasicBlockRef, BuilderRef, ContextRef, ModuleRef, TypeRef, ValueRef};
use crate::module::{
    warp_dispose_module, warp_module_create_with_name_in_context, warp_print_module_to_string,
    warp_verify_module,
};
use crate::types::{warp_function_type, warp_int32_type_in_context};

/// A host string argument, released on drop.
pub(crate) struct HostArg(RawHostString);

impl HostArg {
    pub(crate) fn new(s: &str) -> Self {
        Self(HostString::from(s).into_raw().unwrap())
    }

    pub(crate) fn from_units(units: Vec<u16>) -> Self {
        Self(HostString::from_units(units).into_raw().unwrap())
    }

    pub(crate) fn raw(&self) -> RawHostString {
        self.0
    }
}

impl Drop for HostArg {
    fn drop(&mut self) {
        // SAFETY: produced by into_raw in new()
        drop(unsafe { self.0.into_vec() });
    }
}

/// Shorthand for a host string argument.
pub(crate) fn arg(s: &str) -> HostArg {
    HostArg::new(s)
}

/// Read and release a string an export returned.
pub(crate) fn take_units(raw: RawHostString) -> Vec<u16> {
    // SAFETY: exports return strings built with into_raw
    unsafe { raw.into_vec() }.unwrap()
}

/// Read and release a string an export returned, decoded as UTF-16.
pub(crate) fn take_string(raw: RawHostString) -> String {
    String::from_utf16_lossy(&take_units(raw))
}

/// Host view of a Rust slice, for inputs and out-parameter destinations.
pub(crate) fn host_array<T>(items: &mut [T]) -> HostArray<T> {
    HostArray {
        data: items.as_mut_ptr(),
        len: i32::try_from(items.len()).unwrap(),
    }
}

/// A module in its own context, both disposed on drop.
pub(crate) struct TestModule {
    pub(crate) context: Context,
    pub(crate) module: ModuleRef,
    pub(crate) builder: BuilderRef,
}

impl TestModule {
    pub(crate) fn new(name: &str) -> Self {
        let context = Context::new();
        let module = warp_module_create_with_name_in_context(arg(name).raw(), context.handle());
        assert!(!module.is_null());
        let builder = warp_create_builder_in_context(context.handle());
        Self {
            context,
            module,
            builder,
        }
    }

    pub(crate) fn ctx(&self) -> ContextRef {
        self.context.handle()
    }

    pub(crate) fn i32(&self) -> TypeRef {
        warp_int32_type_in_context(self.ctx())
    }

    /// Declare `name` with the given signature.
    pub(crate) fn function(&self, name: &str, ret: TypeRef, params: &mut [TypeRef]) -> ValueRef {
        let function_ty = warp_function_type(ret, host_array(params), 0);
        warp_add_function(self.module, arg(name).raw(), function_ty)
    }

    /// Append a block to `function` and position the builder at its end.
    pub(crate) fn enter(&self, function: ValueRef, label: &str) -> BasicBlockRef {
        let block = warp_append_basic_block_in_context(self.ctx(), function, arg(label).raw());
        warp_position_builder_at_end(self.builder, block);
        block
    }

    pub(crate) fn verify(&self) -> Result<(), String> {
        let mut error = RawHostString::null();
        let valid = warp_verify_module(self.module, &mut error);
        let message = take_string(error);
        if valid == 1 {
            Ok(())
        } else {
            Err(message)
        }
    }

    pub(crate) fn ir(&self) -> String {
        take_string(warp_print_module_to_string(self.module))
    }
}

impl Drop for TestModule {
    fn drop(&mut self) {
        warp_dispose_builder(self.builder);
        warp_dispose_module(self.module);
    }
}
