//! LLVM C-API forwarding layer for a garbage-collected host language.
//!
//! Every `warp_*` export is a thin forwarder: unwrap opaque handles, marshal
//! host strings and arrays (`warp_marshal`), translate enum codes
//! (`warp_abi`), make exactly one LLVM call, and wrap the result. No export
//! keeps state between calls.
//!
//! # Build Modes
//!
//! - **rlib**: for Rust embedders and the tests
//! - **staticlib**: linked into the host runtime
//!
//! # Export Categories
//!
//! - **Handle helpers** ([`handles`]): `warp_<kind>_null`, `_is_null`, `_same`
//! - **Enum codes** ([`native`]): `warp_<domain>_to_int`, `_from_int`
//! - **Strings** ([`marshal`]): `warp_host_to_cstr`, `warp_free_cstr`, ...
//! - **IR** ([`context`], [`module`], [`types`], [`values`], [`globals`],
//!   [`functions`], [`blocks`], [`instructions`], [`bundles`], [`builder`],
//!   [`metadata`])
//!
//! # Failure Values
//!
//! - A malformed host string or array: null handle, empty string, or `0`.
//! - An out-parameter destination that is too small: `0`, nothing written.
//! - An enum code outside its domain, or an LLVM value with no variant: the
//!   `warp_abi` fatal path (an unwind reaching these exports aborts).
//!
//! # Debugging
//!
//! - `RUST_LOG=warp_llvm=debug`: context lifecycle and handler installation
//! - `RUST_LOG=warp_llvm=trace`: forwarded diagnostics
//! - `RUST_LOG=warp_abi=error`: enum ABI mismatches

#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "llvm-sys enums are converted to their unsigned machine values"
)]

#[macro_use]
mod abi;

pub mod blocks;
pub mod builder;
pub mod bundles;
pub mod context;
pub mod functions;
pub mod globals;
pub mod handles;
pub mod instructions;
pub mod marshal;
pub mod message;
pub mod metadata;
pub mod module;
pub mod native;
pub mod types;
pub mod values;

pub use context::{Context, Diagnostic};
pub use handles::{
    AttributeRef, BasicBlockRef, BuilderRef, ComdatRef, ContextRef, DiagnosticInfoRef,
    MemoryBufferRef, MetadataRef, ModuleFlagEntriesRef, ModuleRef, NamedMdNodeRef,
    OperandBundleRef, TypeRef, UseRef, ValueMetadataEntriesRef, ValueRef,
};
pub use message::Message;
pub use native::LlvmEnum;

use std::sync::Once;

use warp_marshal::HostArray;

#[cfg(test)]
mod tests;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call multiple times. Does nothing unless `RUST_LOG` is set.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            // A subscriber installed by the embedder wins.
            let _ = tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .try_init();
        }
    });
}

/// Version of the linked LLVM as `(major, minor, patch)`.
pub fn llvm_version() -> (u32, u32, u32) {
    let (mut major, mut minor, mut patch) = (0, 0, 0);
    // SAFETY: three valid out-pointers
    unsafe { llvm_sys::core::LLVMGetVersion(&mut major, &mut minor, &mut patch) };
    (major, minor, patch)
}

/// Write `[major, minor, patch]` into `dest`. Returns 0 if `dest` holds
/// fewer than three elements.
#[no_mangle]
pub extern "C" fn warp_get_version(dest: HostArray<u32>) -> i32 {
    let (major, minor, patch) = llvm_version();
    marshal::fill_host(dest, 3, |out| {
        // SAFETY: fill_host checked capacity for three elements
        unsafe {
            out.write(major);
            out.add(1).write(minor);
            out.add(2).write(patch);
        }
    })
}
