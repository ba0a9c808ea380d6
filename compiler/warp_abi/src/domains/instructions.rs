//! Instruction opcodes, comparison predicates and call markers.
//!
//! Opcode machine values are sparse: LLVM retired value 6 and appended
//! `CallBr`, `FNeg`, `AddrSpaceCast` and `Freeze` out of header order. Codes
//! follow the header order regardless.

closed_enum! {
    /// `LLVMOpcode`.
    pub enum Opcode in "opcode" {
        // Terminators
        Ret = 0 => 1,
        Br = 1 => 2,
        Switch = 2 => 3,
        IndirectBr = 3 => 4,
        Invoke = 4 => 5,
        Unreachable = 5 => 7,
        CallBr = 6 => 67,

        // Unary
        FNeg = 7 => 66,

        // Binary
        Add = 8 => 8,
        FAdd = 9 => 9,
        Sub = 10 => 10,
        FSub = 11 => 11,
        Mul = 12 => 12,
        FMul = 13 => 13,
        UDiv = 14 => 14,
        SDiv = 15 => 15,
        FDiv = 16 => 16,
        URem = 17 => 17,
        SRem = 18 => 18,
        FRem = 19 => 19,

        // Logical
        Shl = 20 => 20,
        LShr = 21 => 21,
        AShr = 22 => 22,
        And = 23 => 23,
        Or = 24 => 24,
        Xor = 25 => 25,

        // Memory
        Alloca = 26 => 26,
        Load = 27 => 27,
        Store = 28 => 28,
        GetElementPtr = 29 => 29,

        // Casts
        Trunc = 30 => 30,
        ZExt = 31 => 31,
        SExt = 32 => 32,
        FpToUi = 33 => 33,
        FpToSi = 34 => 34,
        UiToFp = 35 => 35,
        SiToFp = 36 => 36,
        FpTrunc = 37 => 37,
        FpExt = 38 => 38,
        PtrToInt = 39 => 39,
        IntToPtr = 40 => 40,
        BitCast = 41 => 41,
        AddrSpaceCast = 42 => 60,

        // Other
        ICmp = 43 => 42,
        FCmp = 44 => 43,
        Phi = 45 => 44,
        Call = 46 => 45,
        Select = 47 => 46,
        UserOp1 = 48 => 47,
        UserOp2 = 49 => 48,
        VaArg = 50 => 49,
        ExtractElement = 51 => 50,
        InsertElement = 52 => 51,
        ShuffleVector = 53 => 52,
        ExtractValue = 54 => 53,
        InsertValue = 55 => 54,
        Freeze = 56 => 68,

        // Atomics
        Fence = 57 => 55,
        AtomicCmpXchg = 58 => 56,
        AtomicRmw = 59 => 57,

        // Exception handling
        Resume = 60 => 58,
        LandingPad = 61 => 59,
        CleanupRet = 62 => 61,
        CatchRet = 63 => 62,
        CatchPad = 64 => 63,
        CleanupPad = 65 => 64,
        CatchSwitch = 66 => 65,
    }
}

impl Opcode {
    /// Whether the opcode ends a basic block.
    pub fn is_terminator(self) -> bool {
        matches!(
            self,
            Self::Ret
                | Self::Br
                | Self::Switch
                | Self::IndirectBr
                | Self::Invoke
                | Self::Unreachable
                | Self::CallBr
                | Self::Resume
                | Self::CleanupRet
                | Self::CatchRet
                | Self::CatchSwitch
        )
    }

    /// Whether the opcode is accepted by `LLVMBuildBinOp`.
    pub fn is_binary(self) -> bool {
        matches!(
            self,
            Self::Add
                | Self::FAdd
                | Self::Sub
                | Self::FSub
                | Self::Mul
                | Self::FMul
                | Self::UDiv
                | Self::SDiv
                | Self::FDiv
                | Self::URem
                | Self::SRem
                | Self::FRem
                | Self::Shl
                | Self::LShr
                | Self::AShr
                | Self::And
                | Self::Or
                | Self::Xor
        )
    }

    /// Whether the opcode is accepted by `LLVMBuildCast`.
    pub fn is_cast(self) -> bool {
        matches!(
            self,
            Self::Trunc
                | Self::ZExt
                | Self::SExt
                | Self::FpToUi
                | Self::FpToSi
                | Self::UiToFp
                | Self::SiToFp
                | Self::FpTrunc
                | Self::FpExt
                | Self::PtrToInt
                | Self::IntToPtr
                | Self::BitCast
                | Self::AddrSpaceCast
        )
    }
}

closed_enum! {
    /// `LLVMIntPredicate`: `icmp` condition codes.
    pub enum IntPredicate in "int-predicate" {
        /// equal
        Eq = 0 => 32,
        /// not equal
        Ne = 1 => 33,
        /// unsigned greater than
        Ugt = 2 => 34,
        /// unsigned greater or equal
        Uge = 3 => 35,
        /// unsigned less than
        Ult = 4 => 36,
        /// unsigned less or equal
        Ule = 5 => 37,
        /// signed greater than
        Sgt = 6 => 38,
        /// signed greater or equal
        Sge = 7 => 39,
        /// signed less than
        Slt = 8 => 40,
        /// signed less or equal
        Sle = 9 => 41,
    }
}

closed_enum! {
    /// `LLVMRealPredicate`: `fcmp` condition codes.
    pub enum RealPredicate in "real-predicate" {
        /// Always false (always folded)
        PredicateFalse = 0 => 0,
        /// True if ordered and equal
        Oeq = 1 => 1,
        /// True if ordered and greater than
        Ogt = 2 => 2,
        /// True if ordered and greater than or equal
        Oge = 3 => 3,
        /// True if ordered and less than
        Olt = 4 => 4,
        /// True if ordered and less than or equal
        Ole = 5 => 5,
        /// True if ordered and operands are unequal
        One = 6 => 6,
        /// True if ordered (no nans)
        Ord = 7 => 7,
        /// True if unordered: isnan(X) | isnan(Y)
        Uno = 8 => 8,
        /// True if unordered or equal
        Ueq = 9 => 9,
        /// True if unordered or greater than
        Ugt = 10 => 10,
        /// True if unordered, greater than, or equal
        Uge = 11 => 11,
        /// True if unordered or less than
        Ult = 12 => 12,
        /// True if unordered, less than, or equal
        Ule = 13 => 13,
        /// True if unordered or not equal
        Une = 14 => 14,
        /// Always true (always folded)
        PredicateTrue = 15 => 15,
    }
}

closed_enum! {
    /// `LLVMTailCallKind`: the tail-call marker on a call instruction.
    pub enum TailCallKind in "tail-call-kind" {
        None = 0 => 0,
        Tail = 1 => 1,
        MustTail = 2 => 2,
        NoTail = 3 => 3,
    }
}
