//! Module-level and context-level enums.

closed_enum! {
    /// `LLVMModuleFlagBehavior`: how a module flag merges when modules link.
    pub enum ModuleFlagBehavior in "module-flag-behavior" {
        /// Emits an error if two values disagree.
        Error = 0 => 0,
        /// Emits a warning if two values disagree.
        Warning = 1 => 1,
        /// Adds a requirement that another module flag be present and have a
        /// specified value after linking is performed.
        Require = 2 => 2,
        /// Uses the specified value, regardless of the behavior or value of
        /// the other module.
        Override = 3 => 3,
        /// Appends the two values, which are required to be metadata nodes.
        Append = 4 => 4,
        /// Appends the two values, dropping duplicate entries.
        AppendUnique = 5 => 5,
    }
}

closed_enum! {
    /// `LLVMDiagnosticSeverity`.
    pub enum DiagnosticSeverity in "diagnostic-severity" {
        Error = 0 => 0,
        Warning = 1 => 1,
        Remark = 2 => 2,
        Note = 3 => 3,
    }
}

closed_enum! {
    /// `LLVMInlineAsmDialect`.
    pub enum InlineAsmDialect in "inline-asm-dialect" {
        Att = 0 => 0,
        Intel = 1 => 1,
    }
}
