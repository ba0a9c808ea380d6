//! Atomic memory orderings and read-modify-write operations.

closed_enum! {
    /// `LLVMAtomicOrdering`.
    ///
    /// Machine value 3 is unused (C++ `consume` has no LLVM counterpart), so
    /// codes and native values diverge from `Acquire` on.
    pub enum AtomicOrdering in "atomic-ordering" {
        /// A load or store which is not atomic
        NotAtomic = 0 => 0,
        /// Lowest level of atomicity, guarantees somewhat sane results, lock
        /// free.
        Unordered = 1 => 1,
        /// Guarantees that if you take all the operations affecting a
        /// specific address, a consistent ordering exists
        Monotonic = 2 => 2,
        /// Provides a barrier of the sort necessary to acquire a lock to
        /// access other memory with normal loads and stores.
        Acquire = 3 => 4,
        /// Similar to Acquire, but with a barrier of the sort necessary to
        /// release a lock.
        Release = 4 => 5,
        /// Both an Acquire and a Release barrier (for fences and operations
        /// which both read and write memory).
        AcquireRelease = 5 => 6,
        /// Acquire semantics for loads and Release semantics for stores, plus
        /// a single total order of all sequentially consistent operations.
        SequentiallyConsistent = 6 => 7,
    }
}

impl AtomicOrdering {
    /// Whether the ordering makes the access atomic at all.
    pub fn is_atomic(self) -> bool {
        self != Self::NotAtomic
    }
}

closed_enum! {
    /// `LLVMAtomicRMWBinOp`.
    pub enum AtomicRmwBinOp in "atomic-rmw-binop" {
        /// Set the new value and return the one old
        Xchg = 0 => 0,
        /// Add a value and return the old one
        Add = 1 => 1,
        /// Subtract a value and return the old one
        Sub = 2 => 2,
        /// And a value and return the old one
        And = 3 => 3,
        /// Not-And a value and return the old one
        Nand = 4 => 4,
        /// OR a value and return the old one
        Or = 5 => 5,
        /// Xor a value and return the old one
        Xor = 6 => 6,
        /// Signed maximum
        Max = 7 => 7,
        /// Signed minimum
        Min = 8 => 8,
        /// Unsigned maximum
        UMax = 9 => 9,
        /// Unsigned minimum
        UMin = 10 => 10,
        /// Floating point add
        FAdd = 11 => 11,
        /// Floating point subtract
        FSub = 12 => 12,
        /// Floating point maximum
        FMax = 13 => 13,
        /// Floating point minimum
        FMin = 14 => 14,
        /// Increment, wrapping back to zero past the operand
        UIncWrap = 15 => 15,
        /// Decrement, wrapping back to the operand at zero
        UDecWrap = 16 => 16,
    }
}
