//! The fatal path for ABI mismatches.
//!
//! A code outside its domain, or an LLVM machine value this crate has no
//! variant for, means the host bindings, this crate and the linked LLVM were
//! built against different enum layouts. Forwarding such a value into LLVM is
//! undefined behavior, so there is no recovery: [`abi_mismatch`] never
//! returns.
//!
//! Dispatch order:
//! 1. Log the mismatch at error level (`tracing`) and print it to stderr,
//!    which works without a subscriber.
//! 2. Call the embedder hook, if one is registered. The hook runs with no
//!    lock held, so it may replace or clear itself.
//! 3. Apply the [`FatalPolicy`]: unwind with an [`AbiMismatch`] payload, or
//!    abort the process.
//!
//! Unwinding is the default. An unwind that reaches an `extern "C"` frame
//! aborts the process, so at the C boundary both policies terminate; inside
//! Rust (tests, embedders using the Rust API) the payload can be caught with
//! `catch_unwind` and downcast.

use std::fmt;
use std::panic;
use std::sync::{Arc, OnceLock};

use parking_lot::RwLock;

use crate::codec::CodecError;

/// Environment variable selecting the initial [`FatalPolicy`].
pub const FATAL_POLICY_ENV: &str = "WARP_FATAL";

/// What [`abi_mismatch`] does after logging and running the hook.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub enum FatalPolicy {
    /// Unwind with an [`AbiMismatch`] payload.
    #[default]
    Unwind,
    /// Abort without unwinding.
    Abort,
}

impl FatalPolicy {
    /// Parse a policy name (`abort` or `unwind`, case-insensitive).
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "unwind" => Some(Self::Unwind),
            "abort" => Some(Self::Abort),
            _ => None,
        }
    }

    /// Policy from `WARP_FATAL`, falling back to the default.
    pub fn from_env() -> Self {
        std::env::var(FATAL_POLICY_ENV)
            .ok()
            .and_then(|value| Self::parse(&value))
            .unwrap_or_default()
    }
}

impl fmt::Display for FatalPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unwind => write!(f, "unwind"),
            Self::Abort => write!(f, "abort"),
        }
    }
}

/// Unwind payload of a fatal codec mismatch.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct AbiMismatch {
    /// Codec operation that failed (`"encode"`, `"decode"`, ...).
    pub operation: &'static str,
    /// The conversion failure.
    pub error: CodecError,
}

impl AbiMismatch {
    /// Domain the failing conversion belongs to.
    pub fn domain(&self) -> &'static str {
        self.error.domain()
    }
}

impl fmt::Display for AbiMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "warp ABI mismatch in {} {}: {}",
            self.domain(),
            self.operation,
            self.error
        )
    }
}

/// Embedder callback run before termination.
pub type FatalHook = Arc<dyn Fn(&AbiMismatch) + Send + Sync>;

static FATAL_HOOK: RwLock<Option<FatalHook>> = parking_lot::const_rwlock(None);

static POLICY_OVERRIDE: RwLock<Option<FatalPolicy>> = parking_lot::const_rwlock(None);

static ENV_POLICY: OnceLock<FatalPolicy> = OnceLock::new();

/// The policy currently in effect.
pub fn fatal_policy() -> FatalPolicy {
    if let Some(policy) = *POLICY_OVERRIDE.read() {
        return policy;
    }
    *ENV_POLICY.get_or_init(FatalPolicy::from_env)
}

/// Override the policy for the rest of the process.
pub fn set_fatal_policy(policy: FatalPolicy) {
    *POLICY_OVERRIDE.write() = Some(policy);
}

/// Register a hook that observes every fatal mismatch. Replaces any
/// previous hook.
pub fn set_fatal_hook(hook: impl Fn(&AbiMismatch) + Send + Sync + 'static) {
    *FATAL_HOOK.write() = Some(Arc::new(hook));
}

/// Remove the registered hook.
pub fn clear_fatal_hook() {
    *FATAL_HOOK.write() = None;
}

/// Report an ABI mismatch and terminate per the current policy.
#[cold]
#[inline(never)]
pub fn abi_mismatch(operation: &'static str, error: CodecError) -> ! {
    let mismatch = AbiMismatch { operation, error };

    tracing::error!(
        domain = mismatch.domain(),
        operation,
        %error,
        "enum codec ABI mismatch"
    );

    eprintln!("{mismatch}");

    let hook = FATAL_HOOK.read().clone();
    if let Some(hook) = hook {
        hook(&mismatch);
    }

    match fatal_policy() {
        FatalPolicy::Abort => std::process::abort(),
        FatalPolicy::Unwind => panic::panic_any(mismatch),
    }
}
