//! Host structures at the C boundary.
//!
//! Forwarders receive host strings and arrays as `{ data, len }` pairs and
//! return host strings the same way. A malformed pair (negative length, null
//! data with a length) is logged and turns the call into its failure value:
//! a null handle, an empty string, or a `0` flag.

use std::ffi::c_char;

use warp_marshal::{
    fill_from_foreign, host_to_bytes, ByteString, HostArray, HostString, RawHostString,
};

use crate::message;

/// Narrow a host string for an LLVM `const char *` parameter.
pub(crate) fn host_bytes(s: RawHostString) -> Option<ByteString> {
    // SAFETY: the host passes strings valid for len code units during the call
    match unsafe { s.as_slice() } {
        Ok(units) => Some(host_to_bytes(units)),
        Err(err) => {
            tracing::warn!(%err, "rejected host string");
            None
        }
    }
}

/// Borrow a host array for an LLVM array parameter.
pub(crate) fn host_slice<'a, T>(array: HostArray<T>) -> Option<&'a [T]> {
    // SAFETY: the host passes arrays valid for len elements during the call
    match unsafe { array.as_slice() } {
        Ok(items) => Some(items),
        Err(err) => {
            tracing::warn!(%err, "rejected host array");
            None
        }
    }
}

/// Hand a string to the host. Released with [`warp_free_host_string`].
pub(crate) fn host_out(s: HostString) -> RawHostString {
    match s.into_raw() {
        Ok(raw) => raw,
        Err(err) => {
            tracing::warn!(%err, "string too long for the host");
            RawHostString::null()
        }
    }
}

/// Let LLVM write `count` results into host storage. Returns the C flag.
pub(crate) fn fill_host<T>(mut dest: HostArray<T>, count: u32, write: impl FnOnce(*mut T)) -> i32 {
    // SAFETY: the host passes writable storage valid for len elements
    let slots = match unsafe { dest.as_mut_slice() } {
        Ok(slots) => slots,
        Err(err) => {
            tracing::warn!(%err, "rejected host destination");
            return 0;
        }
    };
    i32::from(fill_from_foreign(slots, count, write).is_ok())
}

/// Write through an optional out-parameter. Null is skipped.
pub(crate) fn write_out<T>(out: *mut T, value: T) {
    if !out.is_null() {
        // SAFETY: the host passes null or a writable slot
        unsafe { out.write(value) };
    }
}

/// Pointer and count for an LLVM array parameter, or `None` when the count
/// does not fit `unsigned`.
pub(crate) fn raw_parts<T>(items: &[T]) -> Option<(*mut T, u32)> {
    match warp_marshal::as_raw_parts(items) {
        Ok(parts) => Some(parts),
        Err(err) => {
            tracing::warn!(%err, "array too long for LLVM");
            None
        }
    }
}

/// A host array as LLVM's pointer-plus-count pair.
pub(crate) fn host_parts<T>(array: HostArray<T>) -> Option<(*mut T, u32)> {
    host_slice(array).and_then(raw_parts)
}

/// Byte length of a narrowed string for an `unsigned` length parameter.
pub(crate) fn byte_len(s: &ByteString) -> Option<u32> {
    match u32::try_from(s.len()) {
        Ok(len) => Some(len),
        Err(_) => {
            tracing::warn!(len = s.len(), "string too long for LLVM");
            None
        }
    }
}

/// Narrow a host string into a new null-terminated buffer. Released with
/// [`warp_free_cstr`]. A malformed host string yields null.
#[no_mangle]
pub extern "C" fn warp_host_to_cstr(s: RawHostString) -> *mut c_char {
    host_bytes(s).map_or(std::ptr::null_mut(), ByteString::into_raw)
}

/// Release a buffer from [`warp_host_to_cstr`]. Null is ignored.
#[no_mangle]
pub extern "C" fn warp_free_cstr(ptr: *mut c_char) {
    // SAFETY: the host only frees pointers warp_host_to_cstr returned
    drop(unsafe { ByteString::from_raw(ptr) });
}

/// The null C string.
#[no_mangle]
pub extern "C" fn warp_new_null_cstr() -> *mut c_char {
    std::ptr::null_mut()
}

#[no_mangle]
pub extern "C" fn warp_cstr_is_null(ptr: *const c_char) -> i32 {
    i32::from(ptr.is_null())
}

/// Widen a null-terminated string without taking ownership.
#[no_mangle]
pub extern "C" fn warp_cstr_to_host(ptr: *const c_char) -> RawHostString {
    // SAFETY: the host passes null or a terminated string
    host_out(unsafe { message::borrowed(ptr) })
}

/// Widen `len` bytes without taking ownership.
#[no_mangle]
pub extern "C" fn warp_sized_cstr_to_host(ptr: *const c_char, len: usize) -> RawHostString {
    // SAFETY: the host passes null or a buffer of len bytes
    host_out(unsafe { message::borrowed_sized(ptr, len) })
}

/// Release a string this layer returned.
#[no_mangle]
pub extern "C" fn warp_free_host_string(s: RawHostString) {
    // SAFETY: the host only frees strings this layer returned
    if let Err(err) = unsafe { s.into_vec() } {
        tracing::warn!(%err, "rejected host string release");
    }
}

/// Release a string LLVM allocated and this layer passed through raw.
#[no_mangle]
pub extern "C" fn warp_dispose_message(ptr: *mut c_char) {
    // SAFETY: the pointer came from an LLVM entry point that allocates
    drop(unsafe { message::Message::from_raw(ptr) });
}
