//! Global value properties: linkage, visibility, address significance and
//! DLL storage.

closed_enum! {
    /// `LLVMLinkage`.
    pub enum Linkage in "linkage" {
        /// Externally visible function
        External = 0 => 0,
        AvailableExternally = 1 => 1,
        /// Keep one copy of function when linking (inline)
        LinkOnceAny = 2 => 2,
        /// Same, but only replaced by something equivalent
        LinkOnceOdr = 3 => 3,
        /// Obsolete
        LinkOnceOdrAutoHide = 4 => 4,
        /// Keep one copy of function when linking (weak)
        WeakAny = 5 => 5,
        /// Same, but only replaced by something equivalent
        WeakOdr = 6 => 6,
        /// Special purpose, only applies to global arrays
        Appending = 7 => 7,
        /// Rename collisions when linking (static functions)
        Internal = 8 => 8,
        /// Like Internal, but omit from symbol table
        Private = 9 => 9,
        /// Obsolete
        DllImport = 10 => 10,
        /// Obsolete
        DllExport = 11 => 11,
        /// ExternalWeak linkage description
        ExternalWeak = 12 => 12,
        /// Obsolete
        Ghost = 13 => 13,
        /// Tentative definitions
        Common = 14 => 14,
        /// Like Private, but linker removes
        LinkerPrivate = 15 => 15,
        /// Like LinkerPrivate, but is weak
        LinkerPrivateWeak = 16 => 16,
    }
}

closed_enum! {
    /// `LLVMVisibility`.
    pub enum Visibility in "visibility" {
        /// The GV is visible
        Default = 0 => 0,
        /// The GV is hidden
        Hidden = 1 => 1,
        /// The GV is protected
        Protected = 2 => 2,
    }
}

closed_enum! {
    /// `LLVMUnnamedAddr`.
    pub enum UnnamedAddr in "unnamed-addr" {
        /// Address of the GV is significant
        No = 0 => 0,
        /// Address of the GV is locally insignificant
        Local = 1 => 1,
        /// Address of the GV is globally insignificant
        Global = 2 => 2,
    }
}

closed_enum! {
    /// `LLVMDLLStorageClass`.
    pub enum DllStorageClass in "dll-storage-class" {
        Default = 0 => 0,
        /// Function to be imported from DLL
        Import = 1 => 1,
        /// Function to be accessible from DLL
        Export = 2 => 2,
    }
}
