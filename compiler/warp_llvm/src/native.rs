//! Enum domains against the linked `llvm-sys` enums.
//!
//! `warp_abi` knows each variant's machine value as a number. Here every
//! domain variant is also matched to the `llvm-sys` variant it stands for, so
//! forwarders pass LLVM a properly typed enum and the lockstep tests can
//! compare both numberings. The matches are exhaustive over the domain; a
//! variant added to a table without a counterpart here fails to compile.
//!
//! Each domain also exports its host-facing pair:
//! `warp_<domain>_to_int(native) -> code` and
//! `warp_<domain>_from_int(code) -> native`.

use llvm_sys::{
    LLVMAtomicOrdering, LLVMAtomicRMWBinOp, LLVMCallConv, LLVMDLLStorageClass,
    LLVMDiagnosticSeverity, LLVMInlineAsmDialect, LLVMIntPredicate, LLVMLinkage,
    LLVMModuleFlagBehavior, LLVMOpcode, LLVMRealPredicate, LLVMTailCallKind, LLVMTypeKind,
    LLVMUnnamedAddr, LLVMValueKind, LLVMVisibility,
};
use warp_abi::{
    abi_mismatch, AtomicOrdering, AtomicRmwBinOp, CallConv, DiagnosticSeverity, DllStorageClass,
    EnumDomain, InlineAsmDialect, IntPredicate, Linkage, ModuleFlagBehavior, Opcode,
    RealPredicate, TailCallKind, TypeKind, UnnamedAddr, ValueKind, Visibility,
};

/// A domain whose variants correspond to an `llvm-sys` enum.
pub trait LlvmEnum: EnumDomain {
    type Llvm: Copy;

    /// The `llvm-sys` variant for this domain variant.
    fn to_llvm(self) -> Self::Llvm;

    /// Machine value of an `llvm-sys` variant.
    fn llvm_value(raw: Self::Llvm) -> u32;

    /// Domain variant for an enum LLVM returned. Unknown values are fatal.
    fn from_llvm(raw: Self::Llvm) -> Self {
        match Self::from_native(Self::llvm_value(raw)) {
            Ok(variant) => variant,
            Err(err) => abi_mismatch("encode", err),
        }
    }

    /// Host code for an enum LLVM returned.
    fn encode_llvm(raw: Self::Llvm) -> i32 {
        Self::from_llvm(raw).code()
    }

    /// `llvm-sys` variant for a host code. Out-of-range codes are fatal.
    fn decode_llvm(code: i32) -> Self::Llvm {
        Self::decode(code).to_llvm()
    }
}

macro_rules! bridge {
    ($(
        $domain:ident => $llvm:ident, $to_int:ident, $from_int:ident {
            $($variant:ident => $llvm_variant:ident,)+
        }
    )+) => {
        $(
            impl LlvmEnum for $domain {
                type Llvm = $llvm;

                fn to_llvm(self) -> $llvm {
                    match self {
                        $($domain::$variant => $llvm::$llvm_variant,)+
                    }
                }

                fn llvm_value(raw: $llvm) -> u32 {
                    raw as u32
                }
            }

            #[doc = concat!("Host code for a native `", stringify!($llvm), "` value.")]
            #[no_mangle]
            pub extern "C" fn $to_int(native: u32) -> i32 {
                <$domain as EnumDomain>::encode_native(native)
            }

            #[doc = concat!("Native `", stringify!($llvm), "` value for a host code.")]
            #[no_mangle]
            pub extern "C" fn $from_int(code: i32) -> u32 {
                <$domain as EnumDomain>::decode_native(code)
            }
        )+
    };
}

bridge! {
    TypeKind => LLVMTypeKind, warp_type_kind_to_int, warp_type_kind_from_int {
        Void => LLVMVoidTypeKind,
        Half => LLVMHalfTypeKind,
        Float => LLVMFloatTypeKind,
        Double => LLVMDoubleTypeKind,
        X86Fp80 => LLVMX86_FP80TypeKind,
        Fp128 => LLVMFP128TypeKind,
        PpcFp128 => LLVMPPC_FP128TypeKind,
        Label => LLVMLabelTypeKind,
        Integer => LLVMIntegerTypeKind,
        Function => LLVMFunctionTypeKind,
        Struct => LLVMStructTypeKind,
        Array => LLVMArrayTypeKind,
        Pointer => LLVMPointerTypeKind,
        Vector => LLVMVectorTypeKind,
        Metadata => LLVMMetadataTypeKind,
        X86Mmx => LLVMX86_MMXTypeKind,
        Token => LLVMTokenTypeKind,
        ScalableVector => LLVMScalableVectorTypeKind,
        BFloat => LLVMBFloatTypeKind,
        X86Amx => LLVMX86_AMXTypeKind,
        TargetExt => LLVMTargetExtTypeKind,
    }

    ValueKind => LLVMValueKind, warp_value_kind_to_int, warp_value_kind_from_int {
        Argument => LLVMArgumentValueKind,
        BasicBlock => LLVMBasicBlockValueKind,
        MemoryUse => LLVMMemoryUseValueKind,
        MemoryDef => LLVMMemoryDefValueKind,
        MemoryPhi => LLVMMemoryPhiValueKind,
        Function => LLVMFunctionValueKind,
        GlobalAlias => LLVMGlobalAliasValueKind,
        GlobalIFunc => LLVMGlobalIFuncValueKind,
        GlobalVariable => LLVMGlobalVariableValueKind,
        BlockAddress => LLVMBlockAddressValueKind,
        ConstantExpr => LLVMConstantExprValueKind,
        ConstantArray => LLVMConstantArrayValueKind,
        ConstantStruct => LLVMConstantStructValueKind,
        ConstantVector => LLVMConstantVectorValueKind,
        UndefValue => LLVMUndefValueValueKind,
        ConstantAggregateZero => LLVMConstantAggregateZeroValueKind,
        ConstantDataArray => LLVMConstantDataArrayValueKind,
        ConstantDataVector => LLVMConstantDataVectorValueKind,
        ConstantInt => LLVMConstantIntValueKind,
        ConstantFp => LLVMConstantFPValueKind,
        ConstantPointerNull => LLVMConstantPointerNullValueKind,
        ConstantTokenNone => LLVMConstantTokenNoneValueKind,
        MetadataAsValue => LLVMMetadataAsValueValueKind,
        InlineAsm => LLVMInlineAsmValueKind,
        Instruction => LLVMInstructionValueKind,
        PoisonValue => LLVMPoisonValueValueKind,
        ConstantTargetNone => LLVMConstantTargetNoneValueKind,
    }

    Opcode => LLVMOpcode, warp_opcode_to_int, warp_opcode_from_int {
        Ret => LLVMRet,
        Br => LLVMBr,
        Switch => LLVMSwitch,
        IndirectBr => LLVMIndirectBr,
        Invoke => LLVMInvoke,
        Unreachable => LLVMUnreachable,
        CallBr => LLVMCallBr,
        FNeg => LLVMFNeg,
        Add => LLVMAdd,
        FAdd => LLVMFAdd,
        Sub => LLVMSub,
        FSub => LLVMFSub,
        Mul => LLVMMul,
        FMul => LLVMFMul,
        UDiv => LLVMUDiv,
        SDiv => LLVMSDiv,
        FDiv => LLVMFDiv,
        URem => LLVMURem,
        SRem => LLVMSRem,
        FRem => LLVMFRem,
        Shl => LLVMShl,
        LShr => LLVMLShr,
        AShr => LLVMAShr,
        And => LLVMAnd,
        Or => LLVMOr,
        Xor => LLVMXor,
        Alloca => LLVMAlloca,
        Load => LLVMLoad,
        Store => LLVMStore,
        GetElementPtr => LLVMGetElementPtr,
        Trunc => LLVMTrunc,
        ZExt => LLVMZExt,
        SExt => LLVMSExt,
        FpToUi => LLVMFPToUI,
        FpToSi => LLVMFPToSI,
        UiToFp => LLVMUIToFP,
        SiToFp => LLVMSIToFP,
        FpTrunc => LLVMFPTrunc,
        FpExt => LLVMFPExt,
        PtrToInt => LLVMPtrToInt,
        IntToPtr => LLVMIntToPtr,
        BitCast => LLVMBitCast,
        AddrSpaceCast => LLVMAddrSpaceCast,
        ICmp => LLVMICmp,
        FCmp => LLVMFCmp,
        Phi => LLVMPHI,
        Call => LLVMCall,
        Select => LLVMSelect,
        UserOp1 => LLVMUserOp1,
        UserOp2 => LLVMUserOp2,
        VaArg => LLVMVAArg,
        ExtractElement => LLVMExtractElement,
        InsertElement => LLVMInsertElement,
        ShuffleVector => LLVMShuffleVector,
        ExtractValue => LLVMExtractValue,
        InsertValue => LLVMInsertValue,
        Freeze => LLVMFreeze,
        Fence => LLVMFence,
        AtomicCmpXchg => LLVMAtomicCmpXchg,
        AtomicRmw => LLVMAtomicRMW,
        Resume => LLVMResume,
        LandingPad => LLVMLandingPad,
        CleanupRet => LLVMCleanupRet,
        CatchRet => LLVMCatchRet,
        CatchPad => LLVMCatchPad,
        CleanupPad => LLVMCleanupPad,
        CatchSwitch => LLVMCatchSwitch,
    }

    IntPredicate => LLVMIntPredicate, warp_int_predicate_to_int, warp_int_predicate_from_int {
        Eq => LLVMIntEQ,
        Ne => LLVMIntNE,
        Ugt => LLVMIntUGT,
        Uge => LLVMIntUGE,
        Ult => LLVMIntULT,
        Ule => LLVMIntULE,
        Sgt => LLVMIntSGT,
        Sge => LLVMIntSGE,
        Slt => LLVMIntSLT,
        Sle => LLVMIntSLE,
    }

    RealPredicate => LLVMRealPredicate, warp_real_predicate_to_int, warp_real_predicate_from_int {
        PredicateFalse => LLVMRealPredicateFalse,
        Oeq => LLVMRealOEQ,
        Ogt => LLVMRealOGT,
        Oge => LLVMRealOGE,
        Olt => LLVMRealOLT,
        Ole => LLVMRealOLE,
        One => LLVMRealONE,
        Ord => LLVMRealORD,
        Uno => LLVMRealUNO,
        Ueq => LLVMRealUEQ,
        Ugt => LLVMRealUGT,
        Uge => LLVMRealUGE,
        Ult => LLVMRealULT,
        Ule => LLVMRealULE,
        Une => LLVMRealUNE,
        PredicateTrue => LLVMRealPredicateTrue,
    }

    TailCallKind => LLVMTailCallKind, warp_tail_call_kind_to_int, warp_tail_call_kind_from_int {
        None => LLVMTailCallKindNone,
        Tail => LLVMTailCallKindTail,
        MustTail => LLVMTailCallKindMustTail,
        NoTail => LLVMTailCallKindNoTail,
    }

    Linkage => LLVMLinkage, warp_linkage_to_int, warp_linkage_from_int {
        External => LLVMExternalLinkage,
        AvailableExternally => LLVMAvailableExternallyLinkage,
        LinkOnceAny => LLVMLinkOnceAnyLinkage,
        LinkOnceOdr => LLVMLinkOnceODRLinkage,
        LinkOnceOdrAutoHide => LLVMLinkOnceODRAutoHideLinkage,
        WeakAny => LLVMWeakAnyLinkage,
        WeakOdr => LLVMWeakODRLinkage,
        Appending => LLVMAppendingLinkage,
        Internal => LLVMInternalLinkage,
        Private => LLVMPrivateLinkage,
        DllImport => LLVMDLLImportLinkage,
        DllExport => LLVMDLLExportLinkage,
        ExternalWeak => LLVMExternalWeakLinkage,
        Ghost => LLVMGhostLinkage,
        Common => LLVMCommonLinkage,
        LinkerPrivate => LLVMLinkerPrivateLinkage,
        LinkerPrivateWeak => LLVMLinkerPrivateWeakLinkage,
    }

    Visibility => LLVMVisibility, warp_visibility_to_int, warp_visibility_from_int {
        Default => LLVMDefaultVisibility,
        Hidden => LLVMHiddenVisibility,
        Protected => LLVMProtectedVisibility,
    }

    UnnamedAddr => LLVMUnnamedAddr, warp_unnamed_addr_to_int, warp_unnamed_addr_from_int {
        No => LLVMNoUnnamedAddr,
        Local => LLVMLocalUnnamedAddr,
        Global => LLVMGlobalUnnamedAddr,
    }

    DllStorageClass => LLVMDLLStorageClass, warp_dll_storage_class_to_int, warp_dll_storage_class_from_int {
        Default => LLVMDefaultStorageClass,
        Import => LLVMDLLImportStorageClass,
        Export => LLVMDLLExportStorageClass,
    }

    CallConv => LLVMCallConv, warp_call_conv_to_int, warp_call_conv_from_int {
        C => LLVMCCallConv,
        Fast => LLVMFastCallConv,
        Cold => LLVMColdCallConv,
        Ghc => LLVMGHCCallConv,
        HiPe => LLVMHiPECallConv,
        AnyReg => LLVMAnyRegCallConv,
        PreserveMost => LLVMPreserveMostCallConv,
        PreserveAll => LLVMPreserveAllCallConv,
        Swift => LLVMSwiftCallConv,
        CxxFastTls => LLVMCXXFASTTLSCallConv,
        X86Stdcall => LLVMX86StdcallCallConv,
        X86Fastcall => LLVMX86FastcallCallConv,
        ArmApcs => LLVMARMAPCSCallConv,
        ArmAapcs => LLVMARMAAPCSCallConv,
        ArmAapcsVfp => LLVMARMAAPCSVFPCallConv,
        Msp430Intr => LLVMMSP430INTRCallConv,
        X86ThisCall => LLVMX86ThisCallCallConv,
        PtxKernel => LLVMPTXKernelCallConv,
        PtxDevice => LLVMPTXDeviceCallConv,
        SpirFunc => LLVMSPIRFUNCCallConv,
        SpirKernel => LLVMSPIRKERNELCallConv,
        IntelOclBi => LLVMIntelOCLBICallConv,
        X8664SysV => LLVMX8664SysVCallConv,
        Win64 => LLVMWin64CallConv,
        X86VectorCall => LLVMX86VectorCallCallConv,
        Hhvm => LLVMHHVMCallConv,
        HhvmC => LLVMHHVMCCallConv,
        X86Intr => LLVMX86INTRCallConv,
        AvrIntr => LLVMAVRINTRCallConv,
        AvrSignal => LLVMAVRSIGNALCallConv,
        AvrBuiltin => LLVMAVRBUILTINCallConv,
        AmdGpuVs => LLVMAMDGPUVSCallConv,
        AmdGpuGs => LLVMAMDGPUGSCallConv,
        AmdGpuPs => LLVMAMDGPUPSCallConv,
        AmdGpuCs => LLVMAMDGPUCSCallConv,
        AmdGpuKernel => LLVMAMDGPUKERNELCallConv,
        X86RegCall => LLVMX86RegCallCallConv,
        AmdGpuHs => LLVMAMDGPUHSCallConv,
        Msp430Builtin => LLVMMSP430BUILTINCallConv,
        AmdGpuLs => LLVMAMDGPULSCallConv,
        AmdGpuEs => LLVMAMDGPUESCallConv,
    }

    AtomicOrdering => LLVMAtomicOrdering, warp_atomic_ordering_to_int, warp_atomic_ordering_from_int {
        NotAtomic => LLVMAtomicOrderingNotAtomic,
        Unordered => LLVMAtomicOrderingUnordered,
        Monotonic => LLVMAtomicOrderingMonotonic,
        Acquire => LLVMAtomicOrderingAcquire,
        Release => LLVMAtomicOrderingRelease,
        AcquireRelease => LLVMAtomicOrderingAcquireRelease,
        SequentiallyConsistent => LLVMAtomicOrderingSequentiallyConsistent,
    }

    AtomicRmwBinOp => LLVMAtomicRMWBinOp, warp_atomic_rmw_bin_op_to_int, warp_atomic_rmw_bin_op_from_int {
        Xchg => LLVMAtomicRMWBinOpXchg,
        Add => LLVMAtomicRMWBinOpAdd,
        Sub => LLVMAtomicRMWBinOpSub,
        And => LLVMAtomicRMWBinOpAnd,
        Nand => LLVMAtomicRMWBinOpNand,
        Or => LLVMAtomicRMWBinOpOr,
        Xor => LLVMAtomicRMWBinOpXor,
        Max => LLVMAtomicRMWBinOpMax,
        Min => LLVMAtomicRMWBinOpMin,
        UMax => LLVMAtomicRMWBinOpUMax,
        UMin => LLVMAtomicRMWBinOpUMin,
        FAdd => LLVMAtomicRMWBinOpFAdd,
        FSub => LLVMAtomicRMWBinOpFSub,
        FMax => LLVMAtomicRMWBinOpFMax,
        FMin => LLVMAtomicRMWBinOpFMin,
        UIncWrap => LLVMAtomicRMWBinOpUIncWrap,
        UDecWrap => LLVMAtomicRMWBinOpUDecWrap,
    }

    ModuleFlagBehavior => LLVMModuleFlagBehavior, warp_module_flag_behavior_to_int, warp_module_flag_behavior_from_int {
        Error => LLVMModuleFlagBehaviorError,
        Warning => LLVMModuleFlagBehaviorWarning,
        Require => LLVMModuleFlagBehaviorRequire,
        Override => LLVMModuleFlagBehaviorOverride,
        Append => LLVMModuleFlagBehaviorAppend,
        AppendUnique => LLVMModuleFlagBehaviorAppendUnique,
    }

    DiagnosticSeverity => LLVMDiagnosticSeverity, warp_diagnostic_severity_to_int, warp_diagnostic_severity_from_int {
        Error => LLVMDSError,
        Warning => LLVMDSWarning,
        Remark => LLVMDSRemark,
        Note => LLVMDSNote,
    }

    InlineAsmDialect => LLVMInlineAsmDialect, warp_inline_asm_dialect_to_int, warp_inline_asm_dialect_from_int {
        Att => LLVMInlineAsmDialectATT,
        Intel => LLVMInlineAsmDialectIntel,
    }
}

/// Every `llvm-sys` variant of `D`, in code order.
pub fn llvm_variants<D: LlvmEnum>() -> impl Iterator<Item = (D, D::Llvm)> {
    D::ALL.iter().map(|&variant| (variant, variant.to_llvm()))
}
