//! The enum codec contract.
//!
//! Every LLVM enum domain implements [`EnumDomain`], which ties together
//! three representations of the same variant:
//!
//! | Representation | Type | Owner |
//! |----------------|------|-------|
//! | Variant | the Rust enum | this crate |
//! | Code | `i32` in `[0, N)` | host language |
//! | Native | `u32` machine value | LLVM's C ABI |
//!
//! Checked conversions (`from_code`, `from_native`) return [`CodecError`].
//! The unchecked forms (`decode`, `encode_native`) are what the forwarding
//! layer calls: an invalid input there means the host and this crate (or this
//! crate and LLVM) disagree about the ABI, so they go through
//! [`fatal::abi_mismatch`](crate::fatal::abi_mismatch) instead of returning.

use std::fmt;
use std::hash::Hash;

use crate::fatal;

/// Failure to map a code or native value onto a domain variant.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, thiserror::Error)]
pub enum CodecError {
    /// A host code outside `[0, cardinality)`.
    #[error("{domain}: code {code} is outside [0, {cardinality})")]
    CodeOutOfRange {
        domain: &'static str,
        code: i32,
        cardinality: usize,
    },

    /// A machine value LLVM produced that no variant of the domain carries.
    #[error("{domain}: native value {value} has no variant")]
    UnknownNative { domain: &'static str, value: u32 },
}

impl CodecError {
    /// Name of the domain the conversion was attempted in.
    pub fn domain(&self) -> &'static str {
        match self {
            Self::CodeOutOfRange { domain, .. } | Self::UnknownNative { domain, .. } => domain,
        }
    }
}

/// A closed LLVM enum with a stable dense numbering.
///
/// Implementations are generated by `closed_enum!`; each one is a
/// hand-written table. `ALL` lists the variants in code order, so
/// `ALL[c].code() == c` for every valid code.
pub trait EnumDomain: Copy + Eq + Hash + fmt::Debug + 'static {
    /// Domain name used in diagnostics (e.g. `"type-kind"`).
    const DOMAIN: &'static str;

    /// Every variant, in code order.
    const ALL: &'static [Self];

    /// Dense host-facing code.
    fn code(self) -> i32;

    /// Variant for a host code, or an error for codes outside `[0, N)`.
    fn from_code(code: i32) -> Result<Self, CodecError>;

    /// LLVM's machine value for this variant.
    fn native(self) -> u32;

    /// Variant for an LLVM machine value.
    fn from_native(value: u32) -> Result<Self, CodecError>;

    /// Variant name as written in the table.
    fn name(self) -> &'static str;

    /// Number of variants.
    fn cardinality() -> usize {
        Self::ALL.len()
    }

    /// Encode a variant for the host. Total.
    fn encode(self) -> i32 {
        self.code()
    }

    /// Decode a host code. Out-of-range codes are fatal.
    fn decode(code: i32) -> Self {
        Self::from_code(code).unwrap_or_else(|err| fatal::abi_mismatch("decode", err))
    }

    /// Encode a machine value received from LLVM. Unknown values are fatal.
    fn encode_native(value: u32) -> i32 {
        match Self::from_native(value) {
            Ok(variant) => variant.code(),
            Err(err) => fatal::abi_mismatch("encode", err),
        }
    }

    /// Decode a host code straight to LLVM's machine value.
    fn decode_native(code: i32) -> u32 {
        Self::decode(code).native()
    }
}

/// Declare an enum domain and its table.
///
/// Each row reads `Variant = code => native`. Both literals are written out
/// by hand; a repeated code or native value makes one of the generated match
/// arms unreachable, which the workspace lints reject.
macro_rules! closed_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident in $domain:literal {
            $(
                $(#[$vmeta:meta])*
                $variant:ident = $code:literal => $native:literal,
            )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                $variant,
            )+
        }

        impl $crate::codec::EnumDomain for $name {
            const DOMAIN: &'static str = $domain;

            const ALL: &'static [Self] = &[$(Self::$variant),+];

            fn code(self) -> i32 {
                match self {
                    $(Self::$variant => $code,)+
                }
            }

            fn from_code(code: i32) -> Result<Self, $crate::codec::CodecError> {
                match code {
                    $($code => Ok(Self::$variant),)+
                    _ => Err($crate::codec::CodecError::CodeOutOfRange {
                        domain: $domain,
                        code,
                        cardinality: Self::ALL.len(),
                    }),
                }
            }

            fn native(self) -> u32 {
                match self {
                    $(Self::$variant => $native,)+
                }
            }

            fn from_native(value: u32) -> Result<Self, $crate::codec::CodecError> {
                match value {
                    $($native => Ok(Self::$variant),)+
                    _ => Err($crate::codec::CodecError::UnknownNative {
                        domain: $domain,
                        value,
                    }),
                }
            }

            fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => stringify!($variant),)+
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str($crate::codec::EnumDomain::name(*self))
            }
        }

        impl ::std::convert::TryFrom<i32> for $name {
            type Error = $crate::codec::CodecError;

            fn try_from(code: i32) -> Result<Self, $crate::codec::CodecError> {
                <Self as $crate::codec::EnumDomain>::from_code(code)
            }
        }

        impl ::std::convert::From<$name> for i32 {
            fn from(variant: $name) -> i32 {
                $crate::codec::EnumDomain::code(variant)
            }
        }
    };
}
