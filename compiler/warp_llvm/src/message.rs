//! Strings LLVM hands back.
//!
//! Two ownership modes, decided per entry point:
//!
//! - **Disposed**: the caller owns the result and must release it with
//!   `LLVMDisposeMessage` (print-to-string, diagnostic descriptions, error
//!   out-parameters). [`Message`] does that on drop.
//! - **Borrowed**: LLVM keeps ownership (value names, identifiers, MD
//!   strings). [`borrowed`] and [`borrowed_sized`] copy without freeing.

use std::ffi::{c_char, CStr};
use std::ptr::NonNull;

use llvm_sys::core::LLVMDisposeMessage;
use warp_marshal::{bytes_to_host, bytes_to_host_sized, HostString};

/// An LLVM-allocated string, disposed on drop.
pub struct Message(NonNull<c_char>);

impl Message {
    /// Take ownership of a string LLVM allocated. Null yields `None`.
    ///
    /// # Safety
    ///
    /// `ptr` must be null or a string the caller is responsible for
    /// releasing with `LLVMDisposeMessage`.
    pub unsafe fn from_raw(ptr: *mut c_char) -> Option<Self> {
        NonNull::new(ptr).map(Self)
    }

    pub fn as_c_str(&self) -> &CStr {
        // SAFETY: LLVM messages are null-terminated and live until dropped
        unsafe { CStr::from_ptr(self.0.as_ptr()) }
    }

    pub fn to_host(&self) -> HostString {
        bytes_to_host(self.as_c_str())
    }

    pub fn to_string_lossy(&self) -> String {
        self.as_c_str().to_string_lossy().into_owned()
    }
}

impl Drop for Message {
    fn drop(&mut self) {
        // SAFETY: from_raw's contract
        unsafe { LLVMDisposeMessage(self.0.as_ptr()) };
    }
}

/// Copy a disposed-mode string and release it. Null yields the empty string.
///
/// # Safety
///
/// As [`Message::from_raw`].
pub unsafe fn take(ptr: *mut c_char) -> HostString {
    // SAFETY: forwarded contract
    unsafe { Message::from_raw(ptr) }.map_or_else(HostString::default, |message| message.to_host())
}

/// Copy a borrowed null-terminated string. Null yields the empty string.
///
/// # Safety
///
/// `ptr` must be null or valid up to and including its terminator.
pub unsafe fn borrowed(ptr: *const c_char) -> HostString {
    if ptr.is_null() {
        return HostString::default();
    }
    // SAFETY: non-null and terminated (caller)
    bytes_to_host(unsafe { CStr::from_ptr(ptr) })
}

/// Copy a borrowed pointer-plus-length string, interior NULs included. Null
/// yields the empty string.
///
/// # Safety
///
/// `ptr` must be null or valid for `len` bytes.
pub unsafe fn borrowed_sized(ptr: *const c_char, len: usize) -> HostString {
    if ptr.is_null() || len == 0 {
        return HostString::default();
    }
    // SAFETY: valid for len bytes (caller)
    bytes_to_host_sized(unsafe { std::slice::from_raw_parts(ptr.cast::<u8>(), len) })
}
