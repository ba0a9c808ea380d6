//! Type and value classification.

closed_enum! {
    /// `LLVMTypeKind`: the class of an IR type.
    pub enum TypeKind in "type-kind" {
        /// Type with no size
        Void = 0 => 0,
        /// 16-bit floating point
        Half = 1 => 1,
        /// 32-bit floating point
        Float = 2 => 2,
        /// 64-bit floating point
        Double = 3 => 3,
        /// 80-bit x87 floating point
        X86Fp80 = 4 => 4,
        /// 128-bit floating point (112-bit mantissa)
        Fp128 = 5 => 5,
        /// 128-bit floating point (two 64-bits)
        PpcFp128 = 6 => 6,
        /// Labels
        Label = 7 => 7,
        /// Arbitrary bit width integers
        Integer = 8 => 8,
        /// Functions
        Function = 9 => 9,
        /// Structures
        Struct = 10 => 10,
        /// Arrays
        Array = 11 => 11,
        /// Pointers
        Pointer = 12 => 12,
        /// Fixed width SIMD vector
        Vector = 13 => 13,
        /// Metadata
        Metadata = 14 => 14,
        /// x86 MMX
        X86Mmx = 15 => 15,
        /// Tokens
        Token = 16 => 16,
        /// Scalable SIMD vector
        ScalableVector = 17 => 17,
        /// 16-bit brain floating point
        BFloat = 18 => 18,
        /// x86 AMX tile
        X86Amx = 19 => 19,
        /// Target extension type
        TargetExt = 20 => 20,
    }
}

closed_enum! {
    /// `LLVMValueKind`: the concrete subclass of an IR value.
    pub enum ValueKind in "value-kind" {
        Argument = 0 => 0,
        BasicBlock = 1 => 1,
        MemoryUse = 2 => 2,
        MemoryDef = 3 => 3,
        MemoryPhi = 4 => 4,
        Function = 5 => 5,
        GlobalAlias = 6 => 6,
        GlobalIFunc = 7 => 7,
        GlobalVariable = 8 => 8,
        BlockAddress = 9 => 9,
        ConstantExpr = 10 => 10,
        ConstantArray = 11 => 11,
        ConstantStruct = 12 => 12,
        ConstantVector = 13 => 13,
        UndefValue = 14 => 14,
        ConstantAggregateZero = 15 => 15,
        ConstantDataArray = 16 => 16,
        ConstantDataVector = 17 => 17,
        ConstantInt = 18 => 18,
        ConstantFp = 19 => 19,
        ConstantPointerNull = 20 => 20,
        ConstantTokenNone = 21 => 21,
        MetadataAsValue = 22 => 22,
        InlineAsm = 23 => 23,
        Instruction = 24 => 24,
        PoisonValue = 25 => 25,
        ConstantTargetNone = 26 => 26,
    }
}
