//! Pass-through ABI for the generated forwarders.
//!
//! A forwarder's parameters and return value are either handle newtypes or
//! scalars whose C type matches LLVM's exactly. [`Abi`] maps each to the type
//! the `llvm-sys` signature names, so `forward!` can be written once for
//! every arity.

/// A value that crosses the C boundary unchanged.
pub trait Abi: Copy {
    /// The `llvm-sys` type in the same position.
    type Raw;

    fn into_raw(self) -> Self::Raw;

    fn from_raw(raw: Self::Raw) -> Self;
}

macro_rules! scalar_abi {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Abi for $ty {
                type Raw = $ty;

                #[inline]
                fn into_raw(self) -> $ty {
                    self
                }

                #[inline]
                fn from_raw(raw: $ty) -> $ty {
                    raw
                }
            }
        )+
    };
}

// u8: radix, i32: LLVMBool / c_int, u32: c_uint, u64: c_ulonglong,
// i64: c_longlong, usize: size_t
scalar_abi!(u8, i32, u32, u64, i64, f64, usize);

/// Generate `#[no_mangle]` forwarders, one LLVM call each.
///
/// ```ignore
/// forward! {
///     /// Doc comment carried onto the export.
///     fn warp_type_of(val: ValueRef) -> TypeRef = llvm::LLVMTypeOf;
///     fn warp_dump_value(val: ValueRef) = llvm::LLVMDumpValue;
/// }
/// ```
macro_rules! forward {
    () => {};
    (
        $(#[$meta:meta])*
        fn $name:ident($($arg:ident: $ty:ty),* $(,)?) -> $ret:ty = $llvm:path;
        $($rest:tt)*
    ) => {
        $(#[$meta])*
        #[no_mangle]
        pub extern "C" fn $name($($arg: $ty),*) -> $ret {
            // SAFETY: arguments reach LLVM unchanged; handle validity is the host's contract
            let raw = unsafe { $llvm($($crate::abi::Abi::into_raw($arg)),*) };
            <$ret as $crate::abi::Abi>::from_raw(raw)
        }

        forward!($($rest)*);
    };
    (
        $(#[$meta:meta])*
        fn $name:ident($($arg:ident: $ty:ty),* $(,)?) = $llvm:path;
        $($rest:tt)*
    ) => {
        $(#[$meta])*
        #[no_mangle]
        pub extern "C" fn $name($($arg: $ty),*) {
            // SAFETY: arguments reach LLVM unchanged; handle validity is the host's contract
            unsafe { $llvm($($crate::abi::Abi::into_raw($arg)),*) }
        }

        forward!($($rest)*);
    };
}
