//! Contexts and the state LLVM calls back into.
//!
//! Two surfaces:
//!
//! - The C exports (`warp_context_*`) pass handlers and opaque pointers
//!   straight through; the host keeps whatever state its handler needs.
//! - [`Context`] is the Rust owner. It keeps the diagnostic handler and
//!   yield callback in boxed state whose address is registered with LLVM,
//!   and disposes the context on drop.

use std::ffi::c_void;
use std::ptr::{self, NonNull};

use llvm_sys::core as llvm;
use llvm_sys::prelude::{LLVMContextRef, LLVMDiagnosticInfoRef};
use llvm_sys::{LLVMDiagnosticHandler, LLVMYieldCallback};
use warp_abi::DiagnosticSeverity;
use warp_marshal::RawHostString;

use crate::handles::{ContextRef, DiagnosticInfoRef};
use crate::marshal::host_out;
use crate::message::{self, Message};
use crate::native::LlvmEnum;

/// A diagnostic LLVM reported through a context.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Diagnostic {
    pub severity: DiagnosticSeverity,
    pub description: String,
}

impl Diagnostic {
    /// Read severity and description out of a diagnostic info.
    ///
    /// # Safety
    ///
    /// `info` must be the live diagnostic info of a handler invocation.
    pub unsafe fn from_info(info: DiagnosticInfoRef) -> Self {
        // SAFETY: live diagnostic info (caller)
        let severity =
            DiagnosticSeverity::from_llvm(unsafe { llvm::LLVMGetDiagInfoSeverity(info.as_raw()) });
        // SAFETY: the description is allocated for the caller to dispose
        let description =
            unsafe { Message::from_raw(llvm::LLVMGetDiagInfoDescription(info.as_raw())) }
                .map(|message| message.to_string_lossy())
                .unwrap_or_default();
        Self {
            severity,
            description,
        }
    }
}

type DiagnosticHandler = Box<dyn FnMut(&Diagnostic)>;
type YieldCallback = Box<dyn FnMut()>;

#[derive(Default)]
struct ContextState {
    diagnostic: Option<DiagnosticHandler>,
    on_yield: Option<YieldCallback>,
}

extern "C" fn diagnostic_trampoline(info: LLVMDiagnosticInfoRef, state: *mut c_void) {
    // SAFETY: registered by Context with its state, which outlives the context
    let state = unsafe { &mut *state.cast::<ContextState>() };
    // SAFETY: LLVM passes the live diagnostic
    let diagnostic = unsafe { Diagnostic::from_info(DiagnosticInfoRef::from_raw(info)) };
    tracing::trace!(
        severity = %diagnostic.severity,
        description = %diagnostic.description,
        "forwarding diagnostic"
    );
    if let Some(handler) = state.diagnostic.as_mut() {
        handler(&diagnostic);
    }
}

extern "C" fn yield_trampoline(_context: LLVMContextRef, state: *mut c_void) {
    // SAFETY: registered by Context with its state, which outlives the context
    let state = unsafe { &mut *state.cast::<ContextState>() };
    if let Some(on_yield) = state.on_yield.as_mut() {
        on_yield();
    }
}

/// An owned LLVM context.
pub struct Context {
    raw: ContextRef,
    // Boxed; its address is what LLVM hands back to the trampolines.
    state: NonNull<ContextState>,
}

impl Context {
    pub fn new() -> Self {
        // SAFETY: no preconditions
        let raw = ContextRef::from_raw(unsafe { llvm::LLVMContextCreate() });
        tracing::debug!(context = ?raw, "context created");
        Self {
            raw,
            state: NonNull::from(Box::leak(Box::<ContextState>::default())),
        }
    }

    /// The handle, valid while `self` is alive.
    pub fn handle(&self) -> ContextRef {
        self.raw
    }

    fn state(&mut self) -> &mut ContextState {
        // SAFETY: allocated in new(), freed only in drop
        unsafe { self.state.as_mut() }
    }

    /// Route every diagnostic of this context to `handler`. Replaces any
    /// previous handler, including LLVM's default printer.
    pub fn set_diagnostic_handler(&mut self, handler: impl FnMut(&Diagnostic) + 'static) {
        self.state().diagnostic = Some(Box::new(handler));
        // SAFETY: the state is freed only after the context is disposed
        unsafe {
            llvm::LLVMContextSetDiagnosticHandler(
                self.raw.as_raw(),
                Some(diagnostic_trampoline),
                self.state.as_ptr().cast(),
            );
        }
        tracing::debug!(context = ?self.raw, "diagnostic handler installed");
    }

    /// Restore LLVM's default diagnostic printing.
    pub fn clear_diagnostic_handler(&mut self) {
        // SAFETY: a null handler is LLVM's default
        unsafe { llvm::LLVMContextSetDiagnosticHandler(self.raw.as_raw(), None, ptr::null_mut()) };
        self.state().diagnostic = None;
        tracing::debug!(context = ?self.raw, "diagnostic handler cleared");
    }

    /// Call `on_yield` whenever LLVM offers to yield during long operations.
    pub fn set_yield_callback(&mut self, on_yield: impl FnMut() + 'static) {
        self.state().on_yield = Some(Box::new(on_yield));
        // SAFETY: as for the diagnostic handler
        unsafe {
            llvm::LLVMContextSetYieldCallback(
                self.raw.as_raw(),
                Some(yield_trampoline),
                self.state.as_ptr().cast(),
            );
        }
        tracing::debug!(context = ?self.raw, "yield callback installed");
    }

    /// Drop names of non-global values created in this context.
    pub fn set_discard_value_names(&self, discard: bool) {
        // SAFETY: live context
        unsafe { llvm::LLVMContextSetDiscardValueNames(self.raw.as_raw(), i32::from(discard)) };
    }

    pub fn discards_value_names(&self) -> bool {
        // SAFETY: live context
        unsafe { llvm::LLVMContextShouldDiscardValueNames(self.raw.as_raw()) != 0 }
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Context {
    fn drop(&mut self) {
        // SAFETY: created in new(), disposed once; the state outlives it
        unsafe {
            llvm::LLVMContextDispose(self.raw.as_raw());
            drop(Box::from_raw(self.state.as_ptr()));
        }
        tracing::debug!(context = ?self.raw, "context disposed");
    }
}

forward! {
    fn warp_context_create() -> ContextRef = llvm::LLVMContextCreate;
    fn warp_get_global_context() -> ContextRef = llvm::LLVMGetGlobalContext;
    fn warp_context_dispose(context: ContextRef) = llvm::LLVMContextDispose;
    fn warp_context_should_discard_value_names(context: ContextRef) -> i32 =
        llvm::LLVMContextShouldDiscardValueNames;
    fn warp_context_set_discard_value_names(context: ContextRef, discard: i32) =
        llvm::LLVMContextSetDiscardValueNames;
}

/// Install a C diagnostic handler with an opaque context pointer.
#[no_mangle]
pub extern "C" fn warp_context_set_diagnostic_handler(
    context: ContextRef,
    handler: LLVMDiagnosticHandler,
    diagnostic_context: *mut c_void,
) {
    // SAFETY: pass-through; the host owns diagnostic_context
    unsafe { llvm::LLVMContextSetDiagnosticHandler(context.as_raw(), handler, diagnostic_context) };
    tracing::debug!(context = ?context, installed = handler.is_some(), "diagnostic handler set");
}

#[no_mangle]
pub extern "C" fn warp_context_get_diagnostic_context(context: ContextRef) -> *mut c_void {
    // SAFETY: pass-through
    unsafe { llvm::LLVMContextGetDiagnosticContext(context.as_raw()) }
}

/// Install a C yield callback with an opaque pointer.
#[no_mangle]
pub extern "C" fn warp_context_set_yield_callback(
    context: ContextRef,
    callback: LLVMYieldCallback,
    opaque: *mut c_void,
) {
    // SAFETY: pass-through; the host owns opaque
    unsafe { llvm::LLVMContextSetYieldCallback(context.as_raw(), callback, opaque) };
}

/// Severity code of a diagnostic, as a `diagnostic-severity` code.
#[no_mangle]
pub extern "C" fn warp_get_diag_info_severity(info: DiagnosticInfoRef) -> i32 {
    // SAFETY: called from inside a diagnostic handler
    DiagnosticSeverity::encode_llvm(unsafe { llvm::LLVMGetDiagInfoSeverity(info.as_raw()) })
}

/// Description of a diagnostic. The LLVM copy is disposed.
#[no_mangle]
pub extern "C" fn warp_get_diag_info_description(info: DiagnosticInfoRef) -> RawHostString {
    // SAFETY: called from inside a diagnostic handler; result is caller-owned
    host_out(unsafe { message::take(llvm::LLVMGetDiagInfoDescription(info.as_raw())) })
}
