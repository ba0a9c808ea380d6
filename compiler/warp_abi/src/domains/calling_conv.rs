//! Calling conventions.
//!
//! The C API passes calling conventions as plain `unsigned` (see
//! `LLVMGetFunctionCallConv`), so this is the domain where `from_native`
//! sees the most foreign input: any convention LLVM grows beyond this table
//! surfaces as an unknown native value.

closed_enum! {
    /// `LLVMCallConv`.
    pub enum CallConv in "calling-convention" {
        C = 0 => 0,
        Fast = 1 => 8,
        Cold = 2 => 9,
        Ghc = 3 => 10,
        HiPe = 4 => 11,
        AnyReg = 5 => 13,
        PreserveMost = 6 => 14,
        PreserveAll = 7 => 15,
        Swift = 8 => 16,
        CxxFastTls = 9 => 17,
        X86Stdcall = 10 => 64,
        X86Fastcall = 11 => 65,
        ArmApcs = 12 => 66,
        ArmAapcs = 13 => 67,
        ArmAapcsVfp = 14 => 68,
        Msp430Intr = 15 => 69,
        X86ThisCall = 16 => 70,
        PtxKernel = 17 => 71,
        PtxDevice = 18 => 72,
        SpirFunc = 19 => 75,
        SpirKernel = 20 => 76,
        IntelOclBi = 21 => 77,
        X8664SysV = 22 => 78,
        Win64 = 23 => 79,
        X86VectorCall = 24 => 80,
        Hhvm = 25 => 81,
        HhvmC = 26 => 82,
        X86Intr = 27 => 83,
        AvrIntr = 28 => 84,
        AvrSignal = 29 => 85,
        AvrBuiltin = 30 => 86,
        AmdGpuVs = 31 => 87,
        AmdGpuGs = 32 => 88,
        AmdGpuPs = 33 => 89,
        AmdGpuCs = 34 => 90,
        AmdGpuKernel = 35 => 91,
        X86RegCall = 36 => 92,
        AmdGpuHs = 37 => 93,
        Msp430Builtin = 38 => 94,
        AmdGpuLs = 39 => 95,
        AmdGpuEs = 40 => 96,
    }
}
