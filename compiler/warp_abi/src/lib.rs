//! Closed-enum codecs for the LLVM C API.
//!
//! A host language that cannot name C enum types talks to LLVM through small
//! dense integers. This crate owns that numbering: for every enum domain the
//! C API exposes (type kinds, opcodes, linkage, calling conventions, atomic
//! orderings, ...) it provides a hand-authored bijection between the variant,
//! its dense host-facing code in `[0, N)`, and LLVM's own machine value.
//!
//! # Layers
//!
//! - **Codec** ([`codec`]): the [`EnumDomain`] trait and the `closed_enum!`
//!   table macro. Checked conversions return [`CodecError`].
//! - **Domains** ([`domains`]): the sixteen tables, one enum per domain.
//! - **Fatal path** ([`fatal`]): what happens when a code or native value is
//!   not part of a domain. An ABI mismatch between this crate and the linked
//!   LLVM is not recoverable; the failure is logged, handed to an optional
//!   embedder hook, then unwinds or aborts per [`FatalPolicy`].
//!
//! # Numbering
//!
//! Codes follow the declaration order of LLVM's C header, not the ABI value.
//! They are part of the host-facing contract: a renumbering breaks every
//! caller that stored an encoded value. New LLVM variants are appended to the
//! end of their table.
//!
//! # Configuration
//!
//! - `WARP_FATAL=abort|unwind`: initial [`FatalPolicy`] (default `unwind`).
//! - `RUST_LOG=warp_abi=error`: fatal mismatches are logged at error level.

#[macro_use]
pub mod codec;
pub mod domains;
pub mod fatal;

pub use codec::{CodecError, EnumDomain};
pub use domains::{
    AtomicOrdering, AtomicRmwBinOp, CallConv, DiagnosticSeverity, DllStorageClass,
    InlineAsmDialect, IntPredicate, Linkage, ModuleFlagBehavior, Opcode, RealPredicate,
    TailCallKind, TypeKind, UnnamedAddr, ValueKind, Visibility,
};
pub use fatal::{
    abi_mismatch, clear_fatal_hook, fatal_policy, set_fatal_hook, set_fatal_policy, AbiMismatch,
    FatalPolicy,
};
