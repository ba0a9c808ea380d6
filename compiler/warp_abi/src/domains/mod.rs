//! The enum domain tables.
//!
//! One `closed_enum!` per C API enum. Tables are grouped by the part of the
//! IR they describe; the grouping has no effect on numbering.

mod atomics;
mod calling_conv;
mod globals;
mod instructions;
mod module;
mod types;

pub use atomics::{AtomicOrdering, AtomicRmwBinOp};
pub use calling_conv::CallConv;
pub use globals::{DllStorageClass, Linkage, UnnamedAddr, Visibility};
pub use instructions::{IntPredicate, Opcode, RealPredicate, TailCallKind};
pub use module::{DiagnosticSeverity, InlineAsmDialect, ModuleFlagBehavior};
pub use types::{TypeKind, ValueKind};

#[cfg(test)]
mod tests;
